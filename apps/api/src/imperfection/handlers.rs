//! Axum route handlers for the transform API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::imperfection::markup::{plain_text, to_markup, EffectStats};
use crate::imperfection::{apply_imperfections, AnnotatedChar, SeededRandom};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    pub text: String,
    pub level: String,
    /// Replays a previous page when set; a fresh seed is drawn otherwise.
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct TransformResponse {
    /// Canonical lowercase level identifier.
    pub level: String,
    pub seed: u64,
    pub characters: Vec<AnnotatedChar>,
    pub markup: String,
    pub plain_text: String,
    pub stats: EffectStats,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/typewriter/transform
///
/// Runs the imperfection engine over the submitted text. The response carries the
/// seed so the same page can be reproduced later.
pub async fn handle_transform(
    Json(request): Json<TransformRequest>,
) -> Result<Json<TransformResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Nothing to process: text is empty".to_string(),
        ));
    }

    let mut rng = match request.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    let seed = rng.seed();
    let TransformRequest { text, level, .. } = request;

    let response = tokio::task::spawn_blocking(move || {
        let characters = apply_imperfections(&text, &level, &mut rng)?;
        Ok::<_, AppError>(TransformResponse {
            level: level.trim().to_ascii_lowercase(),
            seed,
            markup: to_markup(&characters),
            plain_text: plain_text(&characters),
            stats: EffectStats::collect(&characters),
            characters,
        })
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in transform: {e}")))??;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, level: &str, seed: Option<u64>) -> Json<TransformRequest> {
        Json(TransformRequest {
            text: text.to_string(),
            level: level.to_string(),
            seed,
        })
    }

    #[tokio::test]
    async fn test_transform_with_seed_is_reproducible() {
        let Json(a) = handle_transform(request("the cat sat on the mat", "heavy", Some(11)))
            .await
            .unwrap();
        let Json(b) = handle_transform(request("the cat sat on the mat", "heavy", Some(11)))
            .await
            .unwrap();
        assert_eq!(a.seed, 11);
        assert_eq!(a.characters, b.characters);
        assert_eq!(a.markup, b.markup);
        assert_eq!(a.stats.total_chars, a.characters.len());
    }

    #[tokio::test]
    async fn test_transform_rejects_unknown_level() {
        let err = handle_transform(request("text", "wobbly", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidLevel(_)));
    }

    #[tokio::test]
    async fn test_transform_rejects_blank_text() {
        let err = handle_transform(request("  \n ", "light", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    // ────────────────────────────────────────────────────────────────────────
    // Level resolution
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_transform_matches_engine_for_same_seed() {
        let Json(response) = handle_transform(request("ribbon and platen", "medium", Some(21)))
            .await
            .unwrap();
        let expected =
            apply_imperfections("ribbon and platen", "medium", &mut SeededRandom::new(21))
                .unwrap();
        assert_eq!(response.characters, expected);
    }

    #[tokio::test]
    async fn test_transform_accepts_level_in_any_case() {
        let Json(response) = handle_transform(request("carriage return", " Heavy ", Some(2)))
            .await
            .unwrap();
        assert_eq!(response.level, "heavy");
    }

    #[tokio::test]
    async fn test_blank_text_is_checked_before_level() {
        let err = handle_transform(request("   ", "wobbly", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
