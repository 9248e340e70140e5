use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::imperfection::ImperfectionError;
use crate::layout::LayoutError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Invalid layout config: {0}")]
    InvalidLayoutConfig(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ImperfectionError> for AppError {
    fn from(err: ImperfectionError) -> Self {
        match err {
            ImperfectionError::InvalidLevel(_) => AppError::InvalidLevel(err.to_string()),
        }
    }
}

impl From<LayoutError> for AppError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::InvalidLayoutConfig(msg) => AppError::InvalidLayoutConfig(msg),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match &err {
            LlmError::RateLimited { .. } | LlmError::Api { status: 429, .. } => {
                AppError::RateLimited(err.to_string())
            }
            _ => AppError::UpstreamUnavailable(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidLevel(msg) => (StatusCode::BAD_REQUEST, "INVALID_LEVEL", msg.clone()),
            AppError::InvalidLayoutConfig(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_LAYOUT_CONFIG",
                msg.clone(),
            ),
            AppError::RateLimited(msg) => {
                tracing::warn!("Upstream rate limit: {msg}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    "Rate limit exceeded. Please try again later.".to_string(),
                )
            }
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UPSTREAM_UNAVAILABLE",
                    "Failed to generate text. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_maps_to_bad_request() {
        let err: AppError = ImperfectionError::InvalidLevel("nope".to_string()).into();
        assert!(matches!(err, AppError::InvalidLevel(ref m) if m.contains("nope")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_layout_error_maps_to_unprocessable() {
        let err: AppError = LayoutError::InvalidLayoutConfig("margins".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_upstream_429_is_rate_limited() {
        let err: AppError = LlmError::Api {
            status: 429,
            message: "slow down".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::RateLimited(_)));
        assert_eq!(err.into_response().status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_upstream_failure_is_retryable_unavailable() {
        let err: AppError = LlmError::EmptyContent.into();
        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let err: AppError = LlmError::NotConfigured.into();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
