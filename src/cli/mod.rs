//! Command-line interface for the meal catalog.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::models::{LeaderboardEntry, LeaderboardSort, Meal};
use crate::infrastructure::config::{Config, ConfigLoader};
use crate::infrastructure::database::{DatabaseConnection, SqliteMealRepository};
use crate::infrastructure::random::ThreadRandom;
use crate::services::{BattleArena, KitchenService};

/// MealMax - meal catalog with a battle-based leaderboard
#[derive(Parser)]
#[command(name = "mealmax", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Path of an alternative config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and apply migrations
    Init,

    /// Add a meal to the catalog
    Add {
        name: String,
        cuisine: String,
        price: f64,
        /// One of LOW, MED, HIGH
        difficulty: String,
    },

    /// Look up a meal by id or by name
    Get {
        #[arg(long, conflicts_with = "name")]
        id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
    },

    /// Soft-delete a meal by id
    Delete { id: i64 },

    /// Show the leaderboard of battle-tested meals
    Leaderboard {
        /// Sort key: "wins" or "win_pct"
        #[arg(long, default_value = "wins")]
        sort: String,
    },

    /// Battle two meals by name and record the outcome
    Battle { first: String, second: String },

    /// Destructively reset the catalog from the schema template
    Clear,
}

/// Run a parsed CLI invocation to completion.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    crate::infrastructure::logging::init(&config.logging)?;

    let db = DatabaseConnection::new(&config.database_url).await?;
    db.migrate().await?;

    let repo = Arc::new(SqliteMealRepository::new(db.pool().clone()));
    let kitchen = Arc::new(KitchenService::new(repo, &config.schema_path));

    let result = dispatch(cli.command, &kitchen, cli.json).await;
    db.close().await;
    result
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(p) => ConfigLoader::load_from_file(p),
        None => ConfigLoader::load(),
    }
}

async fn dispatch(command: Commands, kitchen: &Arc<KitchenService>, json: bool) -> Result<()> {
    match command {
        Commands::Init => {
            // Migrations already ran in `run`
            println!("database initialized");
            Ok(())
        }
        Commands::Add {
            name,
            cuisine,
            price,
            difficulty,
        } => {
            let meal = kitchen
                .create_meal(&name, &cuisine, price, &difficulty)
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&meal)?);
            } else {
                println!("created meal '{}' with id {}", meal.name, meal.id);
            }
            Ok(())
        }
        Commands::Get { id, name } => {
            let meal = match (id, name) {
                (Some(id), None) => kitchen.get_meal_by_id(id).await?,
                (None, Some(name)) => kitchen.get_meal_by_name(&name).await?,
                _ => bail!("pass exactly one of --id or --name"),
            };
            print_meal(&meal, json)?;
            Ok(())
        }
        Commands::Delete { id } => {
            kitchen.delete_meal(id).await?;
            println!("deleted meal {id}");
            Ok(())
        }
        Commands::Leaderboard { sort } => {
            let sort = sort.parse::<LeaderboardSort>()?;
            let entries = kitchen.leaderboard(sort).await?;
            print_leaderboard(&entries, json)?;
            Ok(())
        }
        Commands::Battle { first, second } => {
            let meal_1 = lookup(kitchen, &first).await?;
            let meal_2 = lookup(kitchen, &second).await?;

            let mut arena = BattleArena::new(Arc::clone(kitchen), Arc::new(ThreadRandom));
            arena.prep_combatant(meal_1)?;
            arena.prep_combatant(meal_2)?;
            let winner = arena.battle().await?;

            println!("winner: {winner}");
            Ok(())
        }
        Commands::Clear => {
            kitchen.clear_meals().await?;
            println!("catalog cleared");
            Ok(())
        }
    }
}

fn print_meal(meal: &Meal, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(meal)?);
        return Ok(());
    }

    println!(
        "#{} {} ({}, {:.2}, {}) - {} wins / {} battles",
        meal.id, meal.name, meal.cuisine, meal.price, meal.difficulty, meal.wins, meal.battles
    );
    Ok(())
}

fn print_leaderboard(entries: &[LeaderboardEntry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Id",
        "Meal",
        "Cuisine",
        "Price",
        "Difficulty",
        "Battles",
        "Wins",
        "Win %",
    ]);

    for e in entries {
        table.add_row(vec![
            e.id.to_string(),
            e.name.clone(),
            e.cuisine.clone(),
            format!("{:.2}", e.price),
            e.difficulty.to_string(),
            e.battles.to_string(),
            e.wins.to_string(),
            format!("{:.1}", e.win_pct * 100.0),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// CLI convenience: resolve a battle argument to a meal.
///
/// Names take precedence, so a meal named "101" stays reachable; an argument
/// that matches no name but parses as an integer falls back to an id lookup.
pub async fn lookup(kitchen: &KitchenService, arg: &str) -> Result<Meal, crate::KitchenError> {
    match kitchen.get_meal_by_name(arg).await {
        Ok(meal) => Ok(meal),
        Err(crate::KitchenError::NotFoundByName(_)) => match arg.parse::<i64>() {
            Ok(id) => kitchen.get_meal_by_id(id).await,
            Err(_) => Err(crate::KitchenError::NotFoundByName(arg.to_string())),
        },
        Err(e) => Err(e),
    }
}
