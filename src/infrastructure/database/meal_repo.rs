use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, SqlitePool};

use crate::domain::models::{
    BattleOutcome, Difficulty, LeaderboardEntry, LeaderboardSort, Meal, NewMeal,
};
use crate::domain::ports::{MealRepository, StoreError};

/// `SQLite` implementation of `MealRepository`
pub struct SqliteMealRepository {
    pool: SqlitePool,
}

impl SqliteMealRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Maps a fixed-order `meals` row to a `Meal`, failing fast on a missing
/// column or an unexpected type.
fn meal_from_row(row: &SqliteRow) -> Result<Meal, StoreError> {
    let difficulty: String = row.try_get("difficulty")?;
    let difficulty = difficulty
        .parse::<Difficulty>()
        .map_err(|e| StoreError::Decode(e.to_string()))?;

    Ok(Meal {
        id: row.try_get("id")?,
        name: row.try_get("meal")?,
        cuisine: row.try_get("cuisine")?,
        price: row.try_get("price")?,
        difficulty,
        battles: row.try_get("battles")?,
        wins: row.try_get("wins")?,
        deleted: row.try_get("deleted")?,
    })
}

fn entry_from_row(row: &SqliteRow) -> Result<LeaderboardEntry, StoreError> {
    let difficulty: String = row.try_get("difficulty")?;
    let difficulty = difficulty
        .parse::<Difficulty>()
        .map_err(|e| StoreError::Decode(e.to_string()))?;

    Ok(LeaderboardEntry {
        id: row.try_get("id")?,
        name: row.try_get("meal")?,
        cuisine: row.try_get("cuisine")?,
        price: row.try_get("price")?,
        difficulty,
        battles: row.try_get("battles")?,
        wins: row.try_get("wins")?,
        win_pct: row.try_get("win_pct")?,
    })
}

fn map_insert_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::UniqueViolation,
        _ => StoreError::Query(e),
    }
}

#[async_trait]
impl MealRepository for SqliteMealRepository {
    async fn insert(&self, meal: &NewMeal) -> Result<i64, StoreError> {
        let difficulty = meal.difficulty.to_string();
        let result = sqlx::query(
            r#"
            INSERT INTO meals (meal, cuisine, price, difficulty)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&meal.name)
        .bind(&meal.cuisine)
        .bind(meal.price)
        .bind(difficulty)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Meal>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, meal, cuisine, price, difficulty, battles, wins, deleted
            FROM meals
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(meal_from_row).transpose()
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Option<Meal>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, meal, cuisine, price, difficulty, battles, wins, deleted
            FROM meals
            WHERE meal = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(meal_from_row).transpose()
    }

    async fn deleted_flag(&self, id: i64) -> Result<Option<bool>, StoreError> {
        let row = sqlx::query("SELECT deleted FROM meals WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_get("deleted").map_err(StoreError::from))
            .transpose()
    }

    async fn mark_deleted(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE meals SET deleted = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn record_outcome(&self, id: i64, outcome: BattleOutcome) -> Result<(), StoreError> {
        let query = match outcome {
            BattleOutcome::Win => {
                "UPDATE meals SET battles = battles + 1, wins = wins + 1 WHERE id = ?"
            }
            BattleOutcome::Loss => "UPDATE meals SET battles = battles + 1 WHERE id = ?",
        };

        sqlx::query(query).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn leaderboard(
        &self,
        sort: LeaderboardSort,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        // Sort column comes from the enum, never from caller input
        let order_by = match sort {
            LeaderboardSort::Wins => "wins",
            LeaderboardSort::WinPct => "win_pct",
        };

        let query = format!(
            r#"
            SELECT id, meal, cuisine, price, difficulty, battles, wins,
                   (wins * 1.0 / battles) AS win_pct
            FROM meals
            WHERE deleted = FALSE AND battles > 0
            ORDER BY {order_by} DESC
            "#
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(entry_from_row).collect()
    }

    async fn reset(&self, schema_sql: &str) -> Result<(), StoreError> {
        // Unprepared execution so the multi-statement script runs whole
        self.pool
            .execute(schema_sql)
            .await
            .map_err(|e| StoreError::SchemaScript(e.to_string()))?;
        Ok(())
    }
}
