//! Infrastructure layer: SQLite persistence, configuration, logging, RNG.

pub mod config;
pub mod database;
pub mod logging;
pub mod random;
