//! Request validation and model selection for text generation.
//!
//! Page lengths are named sizes mapped to a word target; the target is capped by
//! the configured `MAX_WORDS` and decides the model and token budget.

use crate::errors::AppError;
use crate::llm_client::{CompletionRequest, LONG_FORM_MODEL, STANDARD_MODEL};

pub const MAX_PROMPT_CHARS: usize = 2000;
pub const MIN_CUSTOM_WORDS: u32 = 50;
/// Target for a missing or unrecognised page length (one full page).
pub const DEFAULT_WORDS: u32 = 400;
/// Targets above this use the long-form model and the larger token cap.
pub const LONG_FORM_THRESHOLD: u32 = 4000;
const STANDARD_TOKEN_CAP: u32 = 4000;
const LONG_FORM_TOKEN_CAP: u32 = 8000;
const TEMPERATURE: f32 = 0.8;

/// Word target for a named page length.
pub fn words_for_page_length(page_length: &str) -> Option<u32> {
    let words = match page_length {
        "quarter" => 100,
        "half" => 200,
        "full" => 400,
        "double" => 800,
        "triple" => 1200,
        "fivepage" => 2000,
        "tenpage" => 4000,
        "twentypage" => 8000,
        "fiftypage" => 20000,
        _ => return None,
    };
    Some(words)
}

/// Returns the trimmed prompt, or a validation error.
pub fn validate_prompt(prompt: &str) -> Result<&str, AppError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Invalid prompt provided".to_string()));
    }
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(AppError::Validation(format!(
            "Prompt too long (max {MAX_PROMPT_CHARS} characters)"
        )));
    }
    Ok(trimmed)
}

/// Resolves the requested length to a word count before the `MAX_WORDS` cap.
pub fn requested_words(
    page_length: Option<&str>,
    custom_word_count: Option<u32>,
) -> Result<u32, AppError> {
    match page_length.map(str::trim) {
        Some("custom") => match custom_word_count {
            Some(words) if words >= MIN_CUSTOM_WORDS => Ok(words),
            _ => Err(AppError::Validation(format!(
                "Custom word count must be at least {MIN_CUSTOM_WORDS}"
            ))),
        },
        Some(name) => Ok(words_for_page_length(name).unwrap_or(DEFAULT_WORDS)),
        None => Ok(DEFAULT_WORDS),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPlan {
    pub target_words: u32,
    pub model: &'static str,
    pub max_tokens: u32,
}

impl GenerationPlan {
    pub fn new(requested_words: u32, max_words: u32) -> Self {
        let target_words = requested_words.min(max_words);
        let long_form = target_words > LONG_FORM_THRESHOLD;
        let cap = if long_form {
            LONG_FORM_TOKEN_CAP
        } else {
            STANDARD_TOKEN_CAP
        };
        Self {
            target_words,
            model: if long_form {
                LONG_FORM_MODEL
            } else {
                STANDARD_MODEL
            },
            max_tokens: (target_words.saturating_mul(3) / 2).min(cap),
        }
    }

    pub fn completion(&self, system: String, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model,
            system,
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
        }
    }
}
