//! Injectable random draws.
//!
//! Every probabilistic decision in the engine and the reveal planner pulls from a
//! `RandomSource`, so a page can be replayed from its seed and tests can script the
//! exact draw sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A stream of floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seeded ChaCha stream. Same seed, same draws.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Picks a fresh seed from the thread RNG. The seed stays readable for replay.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, then repeats `fallback` forever.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: std::collections::VecDeque<f64>,
    fallback: f64,
    consumed: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback,
            consumed: 0,
        }
    }

    /// Every roll fails: `1.0` is never below a probability.
    pub fn never() -> Self {
        Self::new([], 1.0)
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.consumed += 1;
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}
