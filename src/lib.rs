//! MealMax - Meal Catalog with Battle Leaderboard
//!
//! MealMax is a small catalog of meals backed by SQLite. Two catalog entries
//! can be pitted against each other in a "battle": each gets a deterministic
//! score, the score gap biases a random tiebreak, and persistent win/loss
//! statistics feed a leaderboard.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic, models, and ports
//! - **Service Layer** (`services`): Catalog and battle coordination
//! - **Infrastructure Layer** (`infrastructure`): SQLite, config, logging, RNG
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mealmax::{BattleArena, KitchenService, SqliteMealRepository, ThreadRandom};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Wire a repository, a kitchen service, and a battle arena
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{BattleError, KitchenError};
pub use domain::models::{
    BattleOutcome, Difficulty, LeaderboardEntry, LeaderboardSort, Meal, NewMeal,
};
pub use domain::ports::{MealRepository, RandomSource, StoreError};
pub use infrastructure::config::{Config, ConfigError, ConfigLoader, LoggingConfig};
pub use infrastructure::database::{DatabaseConnection, SqliteMealRepository};
pub use infrastructure::random::ThreadRandom;
pub use services::{BattleArena, KitchenService};
