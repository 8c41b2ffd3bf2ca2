use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::KitchenError;

/// Preparation difficulty of a meal.
///
/// Stored as `'LOW'`, `'MED'`, or `'HIGH'` in the database and mirrored by a
/// CHECK constraint on the `meals` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Med,
    High,
}

impl Difficulty {
    /// Score penalty applied during a battle.
    ///
    /// Harder dishes are relatively undervalued: MED costs 2 points, HIGH
    /// costs 1, LOW costs nothing.
    pub const fn penalty(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Med => 2.0,
            Self::High => 1.0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Med => write!(f, "MED"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = KitchenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MED" => Ok(Self::Med),
            "HIGH" => Ok(Self::High),
            _ => Err(KitchenError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Outcome of a battle from one combatant's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Win,
    Loss,
}

/// Sort key for the leaderboard query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardSort {
    /// Descending by total wins.
    Wins,
    /// Descending by win percentage (wins / battles).
    WinPct,
}

impl FromStr for LeaderboardSort {
    type Err = KitchenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wins" => Ok(Self::Wins),
            "win_pct" => Ok(Self::WinPct),
            _ => Err(KitchenError::InvalidSort(s.to_string())),
        }
    }
}

/// Meal record as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique id assigned by the store on creation
    pub id: i64,

    /// Meal name, unique across the catalog
    pub name: String,

    /// Cuisine, free text
    pub cuisine: String,

    /// Positive price
    pub price: f64,

    /// Preparation difficulty
    pub difficulty: Difficulty,

    /// Total battles fought
    pub battles: i64,

    /// Battles won (never exceeds `battles`)
    pub wins: i64,

    /// Soft-delete flag; deleted meals are hidden from lookups
    pub deleted: bool,
}

/// Validated input for creating a meal.
///
/// Construction is the validation gate: a `NewMeal` only exists if the price
/// is a finite positive number and the difficulty is one of the three levels.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
}

impl NewMeal {
    /// Validate raw input into a `NewMeal`.
    ///
    /// # Errors
    /// Returns `KitchenError::InvalidPrice` if the price is not a finite
    /// positive number, or `KitchenError::InvalidDifficulty` if the
    /// difficulty string is not one of `LOW`, `MED`, `HIGH`.
    pub fn new(
        name: impl Into<String>,
        cuisine: impl Into<String>,
        price: f64,
        difficulty: &str,
    ) -> Result<Self, KitchenError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(KitchenError::InvalidPrice(price));
        }
        let difficulty = difficulty.parse::<Difficulty>()?;

        Ok(Self {
            name: name.into(),
            cuisine: cuisine.into(),
            price,
            difficulty,
        })
    }
}

/// One leaderboard row: a battle-tested meal decorated with its win rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: i64,
    pub wins: i64,
    /// wins / battles, computed by the store
    pub win_pct: f64,
}
