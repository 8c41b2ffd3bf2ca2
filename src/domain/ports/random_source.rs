/// Randomness port for the battle tiebreak.
///
/// The battle resolver depends on this single-draw interface instead of a
/// module-level RNG so tests can substitute a fixed source and make the
/// winner deterministic.
pub trait RandomSource: Send + Sync {
    /// Next uniform draw from [0, 1).
    fn uniform(&self) -> f64;
}
