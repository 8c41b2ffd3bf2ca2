//! Typed failure taxonomy surfaced to callers.

use thiserror::Error;

use crate::domain::ports::StoreError;

/// Catalog-level errors raised by [`crate::services::KitchenService`].
#[derive(Error, Debug)]
pub enum KitchenError {
    #[error("Invalid price: {0}. Price must be a positive number.")]
    InvalidPrice(f64),

    #[error("Invalid difficulty level: {0}. Must be 'LOW', 'MED', or 'HIGH'.")]
    InvalidDifficulty(String),

    #[error("Invalid sort_by parameter: {0}")]
    InvalidSort(String),

    #[error("Meal with name '{0}' already exists")]
    Duplicate(String),

    #[error("Meal with ID {0} not found")]
    NotFoundById(i64),

    #[error("Meal with name {0} not found")]
    NotFoundByName(String),

    #[error("Meal with ID {0} has been deleted")]
    Deleted(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Battle-level errors raised by [`crate::services::BattleArena`].
#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Combatant list is full, cannot add more combatants.")]
    CombatantsFull,

    #[error("Two combatants must be prepped for a battle.")]
    InsufficientCombatants,

    #[error(transparent)]
    Kitchen(#[from] KitchenError),
}
