/// Meal catalog service coordinating validation, lookups, and statistics
/// with the repository.
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::errors::KitchenError;
use crate::domain::models::{BattleOutcome, LeaderboardEntry, LeaderboardSort, Meal, NewMeal};
use crate::domain::ports::{MealRepository, StoreError};

/// Service for managing the meal catalog.
///
/// Validates input before touching storage, translates store-level integrity
/// violations into descriptive duplicate errors, and enforces soft-delete
/// semantics on reads and stat updates. Depends on the [`MealRepository`]
/// trait, enabling dependency injection and testability.
pub struct KitchenService {
    /// Repository for meal persistence
    repo: Arc<dyn MealRepository>,

    /// Path of the schema template used by `clear_meals`
    schema_path: PathBuf,
}

impl KitchenService {
    /// Creates a new `KitchenService` with the provided repository and
    /// schema template path.
    pub fn new(repo: Arc<dyn MealRepository>, schema_path: impl Into<PathBuf>) -> Self {
        Self {
            repo,
            schema_path: schema_path.into(),
        }
    }

    /// Creates a meal after validating price and difficulty.
    ///
    /// # Errors
    /// - `KitchenError::InvalidPrice` / `KitchenError::InvalidDifficulty` if
    ///   validation fails (storage is never touched)
    /// - `KitchenError::Duplicate` if the name is already taken
    #[instrument(skip(self), err)]
    pub async fn create_meal(
        &self,
        name: &str,
        cuisine: &str,
        price: f64,
        difficulty: &str,
    ) -> Result<Meal, KitchenError> {
        let new_meal = NewMeal::new(name, cuisine, price, difficulty)?;

        let id = match self.repo.insert(&new_meal).await {
            Ok(id) => id,
            Err(StoreError::UniqueViolation) => {
                return Err(KitchenError::Duplicate(new_meal.name));
            }
            Err(e) => return Err(e.into()),
        };

        info!(id, name = %new_meal.name, "created meal");

        Ok(Meal {
            id,
            name: new_meal.name,
            cuisine: new_meal.cuisine,
            price: new_meal.price,
            difficulty: new_meal.difficulty,
            battles: 0,
            wins: 0,
            deleted: false,
        })
    }

    /// Looks up a meal by id.
    ///
    /// # Errors
    /// Returns `KitchenError::NotFoundById` if the id is unknown or the meal
    /// is soft-deleted.
    #[instrument(skip(self), err)]
    pub async fn get_meal_by_id(&self, id: i64) -> Result<Meal, KitchenError> {
        match self.repo.fetch_by_id(id).await? {
            Some(meal) if !meal.deleted => Ok(meal),
            _ => Err(KitchenError::NotFoundById(id)),
        }
    }

    /// Looks up a meal by name.
    ///
    /// # Errors
    /// Returns `KitchenError::NotFoundByName` if the name is unknown or the
    /// meal is soft-deleted.
    #[instrument(skip(self), err)]
    pub async fn get_meal_by_name(&self, name: &str) -> Result<Meal, KitchenError> {
        match self.repo.fetch_by_name(name).await? {
            Some(meal) if !meal.deleted => Ok(meal),
            _ => Err(KitchenError::NotFoundByName(name.to_string())),
        }
    }

    /// Soft-deletes a meal: the row stays in storage with its name reserved.
    ///
    /// # Errors
    /// - `KitchenError::NotFoundById` if the id is unknown
    /// - `KitchenError::Deleted` if the meal was already soft-deleted
    #[instrument(skip(self), err)]
    pub async fn delete_meal(&self, id: i64) -> Result<(), KitchenError> {
        self.check_live(id).await?;
        self.repo.mark_deleted(id).await?;
        info!(id, "soft-deleted meal");
        Ok(())
    }

    /// Records a battle outcome for a meal.
    ///
    /// Battles always increment; wins only on [`BattleOutcome::Win`]. The
    /// deleted flag is read first, so no mutating statement is issued for a
    /// missing or soft-deleted meal.
    ///
    /// # Errors
    /// - `KitchenError::NotFoundById` if the id is unknown
    /// - `KitchenError::Deleted` if the meal is soft-deleted
    #[instrument(skip(self), err)]
    pub async fn update_meal_stats(
        &self,
        id: i64,
        outcome: BattleOutcome,
    ) -> Result<(), KitchenError> {
        self.check_live(id).await?;
        self.repo.record_outcome(id, outcome).await?;
        debug!(id, ?outcome, "updated meal stats");
        Ok(())
    }

    /// Returns the leaderboard: battle-tested meals with their win
    /// percentage, deleted meals excluded, ordered descending by the sort
    /// key.
    #[instrument(skip(self), err)]
    pub async fn leaderboard(
        &self,
        sort: LeaderboardSort,
    ) -> Result<Vec<LeaderboardEntry>, KitchenError> {
        Ok(self.repo.leaderboard(sort).await?)
    }

    /// Destructively resets the catalog from the configured schema template.
    #[instrument(skip(self), err)]
    pub async fn clear_meals(&self) -> Result<(), KitchenError> {
        let schema_sql = tokio::fs::read_to_string(&self.schema_path)
            .await
            .map_err(|e| {
                StoreError::SchemaScript(format!(
                    "cannot read {}: {e}",
                    self.schema_path.display()
                ))
            })?;

        self.repo.reset(&schema_sql).await?;
        info!(schema = %self.schema_path.display(), "cleared meal catalog");
        Ok(())
    }

    /// Existence/deleted gate shared by the mutating operations.
    async fn check_live(&self, id: i64) -> Result<(), KitchenError> {
        match self.repo.deleted_flag(id).await? {
            None => Err(KitchenError::NotFoundById(id)),
            Some(true) => Err(KitchenError::Deleted(id)),
            Some(false) => Ok(()),
        }
    }
}
