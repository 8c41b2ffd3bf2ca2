//! MealMax CLI entry point.

use clap::Parser;

use mealmax::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = mealmax::cli::run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
