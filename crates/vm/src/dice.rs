//! Randomness sources for dice instructions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Produces one uniformly distributed die roll.
///
/// The evaluator only calls `roll` with `sides >= 1` and rejects results
/// outside `[1, sides]`. Implementations must be safe to share between
/// threads evaluating different programs.
pub trait DiceSource: Send + Sync {
    /// Roll one die with `sides` faces.
    fn roll(&self, sides: u64) -> u64;
}

/// Draws from the thread-local generator on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngDice;

impl DiceSource for ThreadRngDice {
    fn roll(&self, sides: u64) -> u64 {
        rand::thread_rng().gen_range(1..=sides)
    }
}

/// Reproducible rolls from a seeded generator.
///
/// The generator sits behind a mutex so one source can serve concurrent
/// evaluations; the sequence is then shared across them.
#[derive(Debug)]
pub struct SeededDice {
    rng: Mutex<StdRng>,
}

impl SeededDice {
    /// A source whose roll sequence is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DiceSource for SeededDice {
    fn roll(&self, sides: u64) -> u64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(1..=sides)
    }
}
