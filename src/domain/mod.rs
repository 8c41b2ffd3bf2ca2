//! Domain layer: pure business logic, models, and ports.

pub mod errors;
pub mod models;
pub mod ports;
