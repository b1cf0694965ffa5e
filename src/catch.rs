//! Catch Probability
//!
//! A Pokeball throw is a single weighted coin flip: the higher a Pokemon's
//! base experience, the harder it is to catch.

use rand::Rng;

/// Base experience at which the catch chance is exactly 100% before clamping.
pub const CATCH_THRESHOLD: f64 = 50.0;

/// Used when the API reports no base experience.
const DEFAULT_BASE_EXPERIENCE: u32 = 50;

const MIN_CHANCE: f64 = 0.05;
const MAX_CHANCE: f64 = 0.95;

/// Probability in `[0.05, 0.95]` that a throw succeeds.
pub fn catch_chance(base_experience: Option<u32>) -> f64 {
    let experience = base_experience.unwrap_or(DEFAULT_BASE_EXPERIENCE).max(1);
    (CATCH_THRESHOLD / f64::from(experience)).clamp(MIN_CHANCE, MAX_CHANCE)
}

/// Rolls once against [`catch_chance`].
pub fn attempt_catch<R: Rng + ?Sized>(rng: &mut R, base_experience: Option<u32>) -> bool {
    rng.gen_bool(catch_chance(base_experience))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chance_is_clamped() {
        assert_eq!(catch_chance(Some(1)), MAX_CHANCE);
        assert_eq!(catch_chance(Some(0)), MAX_CHANCE);
        assert_eq!(catch_chance(Some(10_000)), MIN_CHANCE);
    }

    #[test]
    fn test_chance_decreases_with_experience() {
        let weak = catch_chance(Some(64));
        let strong = catch_chance(Some(306));
        assert!(weak > strong);
        assert!((catch_chance(Some(100)) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_experience_uses_default() {
        assert_eq!(catch_chance(None), catch_chance(Some(DEFAULT_BASE_EXPERIENCE)));
    }

    #[test]
    fn test_attempt_catch_tracks_chance() {
        let mut rng = StdRng::seed_from_u64(7);
        let throws = 10_000;
        let caught = (0..throws)
            .filter(|_| attempt_catch(&mut rng, Some(100)))
            .count();

        let rate = caught as f64 / throws as f64;
        assert!((0.45..0.55).contains(&rate), "rate was {}", rate);
    }
}
