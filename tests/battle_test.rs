mod helpers;

use std::sync::Arc;

use mealmax::domain::errors::BattleError;
use mealmax::domain::models::Meal;
use mealmax::domain::ports::RandomSource;
use mealmax::infrastructure::database::SqliteMealRepository;
use mealmax::services::{BattleArena, KitchenService};
use sqlx::SqlitePool;

use helpers::database::{setup_test_db, teardown_test_db};

/// Fixed draw substituted for the thread RNG so the winner is deterministic.
struct FixedRandom(f64);

impl RandomSource for FixedRandom {
    fn uniform(&self) -> f64 {
        self.0
    }
}

async fn kitchen(pool: &SqlitePool) -> Arc<KitchenService> {
    let repo = Arc::new(SqliteMealRepository::new(pool.clone()));
    Arc::new(KitchenService::new(repo, "sql/create_meal_table.sql"))
}

/// Hotpot scores 50 * 7 - 2 = 348, Sushi scores 12 * 8 - 1 = 95.
async fn sample_combatants(kitchen: &KitchenService) -> (Meal, Meal) {
    let hotpot = kitchen
        .create_meal("Hotpot", "Chinese", 50.0, "MED")
        .await
        .expect("failed to create Hotpot");
    let sushi = kitchen
        .create_meal("Sushi", "Japanese", 12.0, "HIGH")
        .await
        .expect("failed to create Sushi");
    (hotpot, sushi)
}

#[tokio::test]
async fn test_prep_combatant() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;
    let (hotpot, _) = sample_combatants(&kitchen).await;

    let mut arena = BattleArena::new(Arc::clone(&kitchen), Arc::new(FixedRandom(0.5)));
    arena.prep_combatant(hotpot).expect("failed to prep");

    assert_eq!(arena.combatants().len(), 1);
    assert_eq!(arena.combatants()[0].name, "Hotpot");

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_prep_combatant_full_list() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;
    let (hotpot, sushi) = sample_combatants(&kitchen).await;
    let pizza = kitchen
        .create_meal("Pizza", "Italian", 20.0, "LOW")
        .await
        .expect("failed to create Pizza");

    let mut arena = BattleArena::new(Arc::clone(&kitchen), Arc::new(FixedRandom(0.5)));
    arena.prep_combatant(hotpot).expect("first prep");
    arena.prep_combatant(sushi).expect("second prep");

    let err = arena
        .prep_combatant(pizza)
        .expect_err("third prep should fail");
    assert_eq!(
        err.to_string(),
        "Combatant list is full, cannot add more combatants."
    );

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_clear_combatants() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;
    let (hotpot, _) = sample_combatants(&kitchen).await;

    let mut arena = BattleArena::new(Arc::clone(&kitchen), Arc::new(FixedRandom(0.5)));
    arena.prep_combatant(hotpot).expect("failed to prep");
    arena.clear_combatants();

    assert!(arena.combatants().is_empty());

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_get_combatants_keeps_order() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;
    let (hotpot, sushi) = sample_combatants(&kitchen).await;

    let mut arena = BattleArena::new(Arc::clone(&kitchen), Arc::new(FixedRandom(0.5)));
    arena.prep_combatant(hotpot.clone()).expect("first prep");
    arena.prep_combatant(sushi.clone()).expect("second prep");

    assert_eq!(arena.combatants(), [hotpot, sushi].as_slice());

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_battle_not_enough_combatants() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;
    let (hotpot, _) = sample_combatants(&kitchen).await;

    let mut arena = BattleArena::new(Arc::clone(&kitchen), Arc::new(FixedRandom(0.5)));
    arena.prep_combatant(hotpot).expect("failed to prep");

    let err = arena.battle().await.expect_err("battle should fail");
    assert!(matches!(err, BattleError::InsufficientCombatants));
    assert_eq!(
        err.to_string(),
        "Two combatants must be prepped for a battle."
    );

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_battle_first_combatant_wins_below_threshold() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;
    let (hotpot, sushi) = sample_combatants(&kitchen).await;

    // Normalized delta is 253/254 ~= 0.996, so a draw of 0.5 picks Hotpot
    let mut arena = BattleArena::new(Arc::clone(&kitchen), Arc::new(FixedRandom(0.5)));
    arena.prep_combatant(hotpot.clone()).expect("first prep");
    arena.prep_combatant(sushi.clone()).expect("second prep");

    let winner = arena.battle().await.expect("battle failed");
    assert_eq!(winner, "Hotpot");

    // Loser leaves the arena, winner stays
    assert_eq!(arena.combatants().len(), 1);
    assert_eq!(arena.combatants()[0].name, "Hotpot");

    // Statistics were recorded through the kitchen service
    let hotpot_after = kitchen.get_meal_by_id(hotpot.id).await.unwrap();
    assert_eq!(hotpot_after.battles, 1);
    assert_eq!(hotpot_after.wins, 1);

    let sushi_after = kitchen.get_meal_by_id(sushi.id).await.unwrap();
    assert_eq!(sushi_after.battles, 1);
    assert_eq!(sushi_after.wins, 0);

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_battle_second_combatant_wins_above_threshold() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;
    let (hotpot, sushi) = sample_combatants(&kitchen).await;

    // A draw above 253/254 picks the second combatant
    let mut arena = BattleArena::new(Arc::clone(&kitchen), Arc::new(FixedRandom(0.999)));
    arena.prep_combatant(hotpot.clone()).expect("first prep");
    arena.prep_combatant(sushi.clone()).expect("second prep");

    let winner = arena.battle().await.expect("battle failed");
    assert_eq!(winner, "Sushi");

    assert_eq!(arena.combatants().len(), 1);
    assert_eq!(arena.combatants()[0].name, "Sushi");

    let sushi_after = kitchen.get_meal_by_id(sushi.id).await.unwrap();
    assert_eq!(sushi_after.battles, 1);
    assert_eq!(sushi_after.wins, 1);

    let hotpot_after = kitchen.get_meal_by_id(hotpot.id).await.unwrap();
    assert_eq!(hotpot_after.battles, 1);
    assert_eq!(hotpot_after.wins, 0);

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_battle_equal_scores_second_combatant_wins() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;

    // Same cuisine, price, difficulty: identical scores, threshold 0
    let twin_a = kitchen
        .create_meal("Twin A", "Italian", 10.0, "LOW")
        .await
        .unwrap();
    let twin_b = kitchen
        .create_meal("Twin B", "Italian", 10.0, "LOW")
        .await
        .unwrap();

    // Any draw in [0, 1) is >= 0, so combatant B always wins a dead heat
    let mut arena = BattleArena::new(Arc::clone(&kitchen), Arc::new(FixedRandom(0.0)));
    arena.prep_combatant(twin_a).expect("first prep");
    arena.prep_combatant(twin_b).expect("second prep");

    let winner = arena.battle().await.expect("battle failed");
    assert_eq!(winner, "Twin B");

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_lookup_prefers_name_over_id() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;

    let first = kitchen
        .create_meal("Hotpot", "Chinese", 50.0, "MED")
        .await
        .expect("failed to create Hotpot");
    let numeric = kitchen
        .create_meal(&first.id.to_string(), "Japanese", 12.0, "HIGH")
        .await
        .expect("failed to create digit-named meal");

    // A digit-named meal resolves by name, not as an id
    let resolved = mealmax::cli::lookup(&kitchen, &numeric.name)
        .await
        .expect("digit-named meal should resolve");
    assert_eq!(resolved.id, numeric.id);

    // An argument matching no name still falls back to an id lookup
    let unnamed_id = kitchen
        .create_meal("Pizza", "Italian", 20.0, "LOW")
        .await
        .expect("failed to create Pizza")
        .id;
    let resolved = mealmax::cli::lookup(&kitchen, &unnamed_id.to_string())
        .await
        .expect("id fallback should resolve");
    assert_eq!(resolved.name, "Pizza");

    // Neither a name nor a usable id
    assert!(mealmax::cli::lookup(&kitchen, "Ramen").await.is_err());

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_rematch_after_battle() {
    let pool = setup_test_db().await;
    let kitchen = kitchen(&pool).await;
    let (hotpot, sushi) = sample_combatants(&kitchen).await;

    let mut arena = BattleArena::new(Arc::clone(&kitchen), Arc::new(FixedRandom(0.5)));
    arena.prep_combatant(hotpot).expect("first prep");
    arena.prep_combatant(sushi.clone()).expect("second prep");
    arena.battle().await.expect("first battle failed");

    // Winner stays prepped; staging one more combatant allows a rematch
    arena.prep_combatant(sushi.clone()).expect("rematch prep");
    let winner = arena.battle().await.expect("rematch failed");
    assert_eq!(winner, "Hotpot");

    let sushi_after = kitchen.get_meal_by_id(sushi.id).await.unwrap();
    assert_eq!(sushi_after.battles, 2);
    assert_eq!(sushi_after.wins, 0);

    teardown_test_db(pool).await;
}
