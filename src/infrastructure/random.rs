use rand::Rng;

use crate::domain::ports::RandomSource;

/// Thread-local RNG adapter for the battle tiebreak.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_in_unit_interval() {
        let rng = ThreadRandom;
        for _ in 0..1000 {
            let draw = rng.uniform();
            assert!((0.0..1.0).contains(&draw));
        }
    }
}
