//! Axum route handlers for the live reveal API.
//!
//! The browser runs the reveal loop itself; this endpoint hands it the schedule so
//! a seeded page replays with the same cadence.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::imperfection::{AnnotatedChar, SeededRandom};
use crate::render::{RevealMode, RevealPlan};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RevealPlanRequest {
    pub characters: Vec<AnnotatedChar>,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RevealPlanResponse {
    pub mode: RevealMode,
    pub seed: u64,
    pub character_count: usize,
    /// Pause after each character, in milliseconds. Empty in instant mode.
    pub delays_ms: Vec<f64>,
    pub total_ms: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/typewriter/reveal-plan
pub async fn handle_reveal_plan(
    Json(request): Json<RevealPlanRequest>,
) -> Result<Json<RevealPlanResponse>, AppError> {
    let mut rng = match request.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    let count = request.characters.len();
    let plan = RevealPlan::for_stream(count, &mut rng);

    debug!(mode = ?plan.mode, count, seed = rng.seed(), "built reveal plan");

    Ok(Json(RevealPlanResponse {
        mode: plan.mode,
        seed: rng.seed(),
        character_count: count,
        delays_ms: plan
            .delays
            .iter()
            .map(|d| d.as_secs_f64() * 1000.0)
            .collect(),
        total_ms: plan.total().as_secs_f64() * 1000.0,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(len: usize, seed: Option<u64>) -> RevealPlanRequest {
        RevealPlanRequest {
            characters: (0..len).map(|_| AnnotatedChar::plain('a')).collect(),
            seed,
        }
    }

    #[tokio::test]
    async fn test_seeded_plan_is_reproducible() {
        let Json(a) = handle_reveal_plan(Json(request(40, Some(9)))).await.unwrap();
        let Json(b) = handle_reveal_plan(Json(request(40, Some(9)))).await.unwrap();
        assert_eq!(a.delays_ms, b.delays_ms);
        assert_eq!(a.seed, 9);
        assert_eq!(a.mode, RevealMode::Natural);
        assert_eq!(a.character_count, 40);
    }

    #[tokio::test]
    async fn test_total_matches_sum_of_delays() {
        let Json(plan) = handle_reveal_plan(Json(request(25, Some(1)))).await.unwrap();
        let sum: f64 = plan.delays_ms.iter().sum();
        assert!((plan.total_ms - sum).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_large_stream_is_instant() {
        let Json(plan) = handle_reveal_plan(Json(request(10_001, None))).await.unwrap();
        assert_eq!(plan.mode, RevealMode::Instant);
        assert!(plan.delays_ms.is_empty());
        assert_eq!(plan.total_ms, 0.0);
    }
}
