/// Battle resolver: scores two prepped meals, draws a random tiebreak, and
/// records the outcome through the kitchen service.
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::errors::BattleError;
use crate::domain::models::{BattleOutcome, Meal};
use crate::domain::ports::RandomSource;
use crate::services::KitchenService;

/// Maximum number of meals staged for one battle.
const MAX_COMBATANTS: usize = 2;

/// Holds up to two staged combatants and resolves battles between them.
///
/// The combatant list moves through three states: empty, one-prepped, and
/// two-prepped. `prep_combatant` advances it, `battle` requires two-prepped
/// and drops back to one-prepped by removing the loser. Callers typically
/// `clear_combatants` afterward for a fresh round.
pub struct BattleArena {
    kitchen: Arc<KitchenService>,
    rng: Arc<dyn RandomSource>,
    combatants: Vec<Meal>,
}

impl BattleArena {
    /// Creates an arena with an empty combatant list.
    pub fn new(kitchen: Arc<KitchenService>, rng: Arc<dyn RandomSource>) -> Self {
        Self {
            kitchen,
            rng,
            combatants: Vec::with_capacity(MAX_COMBATANTS),
        }
    }

    /// Stages a meal for battle.
    ///
    /// # Errors
    /// Returns `BattleError::CombatantsFull` once two meals are staged.
    pub fn prep_combatant(&mut self, meal: Meal) -> Result<(), BattleError> {
        if self.combatants.len() >= MAX_COMBATANTS {
            return Err(BattleError::CombatantsFull);
        }
        debug!(name = %meal.name, "prepped combatant");
        self.combatants.push(meal);
        Ok(())
    }

    /// Empties the combatant list.
    pub fn clear_combatants(&mut self) {
        self.combatants.clear();
    }

    /// Current combatants in insertion order.
    pub fn combatants(&self) -> &[Meal] {
        &self.combatants
    }

    /// Battle score of a meal: `price * len(cuisine) - difficulty penalty`.
    ///
    /// Pure function, no side effects.
    pub fn battle_score(meal: &Meal) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let cuisine_len = meal.cuisine.chars().count() as f64;
        meal.price * cuisine_len - meal.difficulty.penalty()
    }

    /// Resolves a battle between the two staged combatants.
    ///
    /// The absolute score difference is squashed into [0, 1) via
    /// `delta / (delta + 1)`; the first combatant wins if one uniform draw
    /// falls below that threshold, otherwise the second. The winner's and
    /// loser's statistics are recorded through the kitchen service, the
    /// loser leaves the arena, and the winner's name is returned.
    ///
    /// # Errors
    /// - `BattleError::InsufficientCombatants` unless exactly two meals are
    ///   staged
    /// - `BattleError::Kitchen` if a statistics update fails
    #[instrument(skip(self), err)]
    pub async fn battle(&mut self) -> Result<String, BattleError> {
        if self.combatants.len() < MAX_COMBATANTS {
            return Err(BattleError::InsufficientCombatants);
        }

        let score_1 = Self::battle_score(&self.combatants[0]);
        let score_2 = Self::battle_score(&self.combatants[1]);
        let threshold = normalized_delta(score_1, score_2);
        let draw = self.rng.uniform();

        debug!(score_1, score_2, threshold, draw, "resolving battle");

        let (winner_idx, loser_idx) = if draw < threshold { (0, 1) } else { (1, 0) };
        let winner_id = self.combatants[winner_idx].id;
        let loser_id = self.combatants[loser_idx].id;
        let winner_name = self.combatants[winner_idx].name.clone();

        info!(
            winner = %winner_name,
            loser = %self.combatants[loser_idx].name,
            "battle resolved"
        );

        self.kitchen
            .update_meal_stats(winner_id, BattleOutcome::Win)
            .await?;
        self.kitchen
            .update_meal_stats(loser_id, BattleOutcome::Loss)
            .await?;

        self.combatants.remove(loser_idx);

        Ok(winner_name)
    }
}

/// Squashes the absolute score gap into [0, 1), monotone in the gap.
fn normalized_delta(score_1: f64, score_2: f64) -> f64 {
    let delta = (score_1 - score_2).abs();
    delta / (delta + 1.0)
}
