/// Meal repository port (trait) for dependency injection.
///
/// Defines the contract for meal storage operations that infrastructure
/// adapters must implement. Services depend on this trait, not concrete
/// implementations.
use async_trait::async_trait;

use super::errors::StoreError;
use crate::domain::models::{BattleOutcome, LeaderboardEntry, LeaderboardSort, Meal, NewMeal};

/// Repository trait for meal persistence.
///
/// Implementations should handle:
/// - Parameterized statement execution (INSERT, UPDATE, SELECT)
/// - Surfacing unique-constraint violations as `StoreError::UniqueViolation`
/// - Commit-on-success semantics per operation
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Inserts a validated meal and returns the id assigned by the store.
    ///
    /// # Errors
    /// Returns `StoreError::UniqueViolation` if the name is already taken,
    /// or `StoreError::Query` on any other database failure.
    async fn insert(&self, meal: &NewMeal) -> Result<i64, StoreError>;

    /// Fetches a meal by id, including soft-deleted rows.
    ///
    /// # Returns
    /// - `Some(Meal)` if a row exists (callers decide how to treat `deleted`)
    /// - `None` if no row exists
    async fn fetch_by_id(&self, id: i64) -> Result<Option<Meal>, StoreError>;

    /// Fetches a meal by name, including soft-deleted rows.
    async fn fetch_by_name(&self, name: &str) -> Result<Option<Meal>, StoreError>;

    /// Reads just the soft-delete flag for an id.
    ///
    /// This is the explicit existence/deleted read issued before any
    /// mutation, so that no mutating statement touches a missing or
    /// soft-deleted row.
    async fn deleted_flag(&self, id: i64) -> Result<Option<bool>, StoreError>;

    /// Flips the soft-delete flag; the row stays in storage.
    async fn mark_deleted(&self, id: i64) -> Result<(), StoreError>;

    /// Records a battle outcome: battles always increments, wins only on a
    /// win.
    async fn record_outcome(&self, id: i64, outcome: BattleOutcome) -> Result<(), StoreError>;

    /// Returns battle-tested meals (battles > 0, not deleted) decorated with
    /// their win percentage, ordered descending by the given sort key.
    async fn leaderboard(
        &self,
        sort: LeaderboardSort,
    ) -> Result<Vec<LeaderboardEntry>, StoreError>;

    /// Destructively resets the catalog by executing the given schema
    /// script (DROP + CREATE). Idempotent.
    async fn reset(&self, schema_sql: &str) -> Result<(), StoreError>;
}
