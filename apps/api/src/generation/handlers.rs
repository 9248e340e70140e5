//! Axum route handlers for the text generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{era_system_prompt, DEFAULT_ERA};
use crate::generation::request::{requested_words, validate_prompt, GenerationPlan};
use crate::llm_client::LlmError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Accepts the browser client's camelCase field names as well.
#[derive(Debug, Deserialize)]
pub struct GenerateTextRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, alias = "pageLength")]
    pub page_length: Option<String>,
    #[serde(default, alias = "timeEra")]
    pub time_era: Option<String>,
    #[serde(default, alias = "customWordCount")]
    pub custom_word_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateTextResponse {
    pub text: String,
    pub word_count: usize,
    pub model: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-text
pub async fn handle_generate_text(
    State(state): State<AppState>,
    Json(request): Json<GenerateTextRequest>,
) -> Result<Json<GenerateTextResponse>, AppError> {
    let prompt = validate_prompt(&request.prompt)?;
    let words = requested_words(request.page_length.as_deref(), request.custom_word_count)?;
    let plan = GenerationPlan::new(words, state.config.max_words);

    let era = request
        .time_era
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_ERA);

    info!(
        era,
        target_words = plan.target_words,
        model = plan.model,
        "generating period text"
    );

    let completion = plan.completion(era_system_prompt(era, plan.target_words), prompt);
    let raw = state.generator.complete(&completion).await?;

    let text = raw.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyContent.into());
    }

    Ok(Json(GenerateTextResponse {
        word_count: text.split_whitespace().count(),
        text: text.to_string(),
        model: plan.model,
    }))
}
