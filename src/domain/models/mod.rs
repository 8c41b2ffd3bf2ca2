//! Domain models for the meal catalog.

pub mod meal;

pub use meal::{BattleOutcome, Difficulty, LeaderboardEntry, LeaderboardSort, Meal, NewMeal};
