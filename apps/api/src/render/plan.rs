//! Reveal timing for the live typing view.
//!
//! Long streams degrade: above 10,000 characters the page is painted in one go,
//! above 5,000 the cadence is accelerated. Each per-character delay is jittered to
//! `[0.3 × base, 1.3 × base)` so the typing never looks metronomic.

use std::time::Duration;

use serde::Serialize;

use crate::imperfection::RandomSource;

/// Above this many characters there is no incremental reveal.
pub const INSTANT_THRESHOLD: usize = 10_000;
/// Above this many characters the reveal runs at the accelerated base.
pub const ACCELERATED_THRESHOLD: usize = 5_000;

const NATURAL_BASE_MS: f64 = 30.0;
const ACCELERATED_BASE_MS: f64 = 1.0;
const JITTER_FLOOR: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealMode {
    Instant,
    Accelerated,
    Natural,
}

impl RevealMode {
    pub fn for_len(len: usize) -> Self {
        if len > INSTANT_THRESHOLD {
            RevealMode::Instant
        } else if len > ACCELERATED_THRESHOLD {
            RevealMode::Accelerated
        } else {
            RevealMode::Natural
        }
    }

    /// Base delay in milliseconds; `None` when nothing is scheduled.
    pub fn base_delay_ms(self) -> Option<f64> {
        match self {
            RevealMode::Instant => None,
            RevealMode::Accelerated => Some(ACCELERATED_BASE_MS),
            RevealMode::Natural => Some(NATURAL_BASE_MS),
        }
    }
}

/// The per-character schedule for one presentation.
///
/// `delays[i]` is the pause after character `i` is painted. Instant plans carry no
/// delays.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealPlan {
    pub mode: RevealMode,
    pub delays: Vec<Duration>,
}

impl RevealPlan {
    /// Builds the plan for a stream of `len` characters, one draw per character.
    pub fn for_stream<R: RandomSource + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mode = RevealMode::for_len(len);
        let delays = match mode.base_delay_ms() {
            None => Vec::new(),
            Some(base) => (0..len)
                .map(|_| {
                    let ms = base * JITTER_FLOOR + rng.next_f64() * base;
                    Duration::from_secs_f64(ms / 1000.0)
                })
                .collect(),
        };
        Self { mode, delays }
    }

    pub fn total(&self) -> Duration {
        self.delays.iter().sum()
    }
}
