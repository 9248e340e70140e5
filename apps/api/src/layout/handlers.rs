//! Axum route handlers for the export API.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::imperfection::AnnotatedChar;
use crate::layout::{layout_for_export, ExportDocument, ExportLayoutOverrides, HeaderInfo};
use crate::state::AppState;

const DEFAULT_TITLE: &str = "Typewritten Document";
const DEFAULT_FONT_NAME: &str = "Courier";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub characters: Vec<AnnotatedChar>,
    #[serde(default)]
    pub config: ExportLayoutOverrides,
    pub title: Option<String>,
    pub font_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub filename: String,
    pub document: ExportDocument,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/typewriter/export
///
/// Lays out an annotated stream for print/PDF. The layout config is the service
/// default with the request's overrides applied; nothing is kept between calls.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let config = state.config.export_defaults.with_overrides(&request.config);
    let generated_at = Utc::now();
    let header = HeaderInfo {
        title: request.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        font_name: request
            .font_name
            .unwrap_or_else(|| DEFAULT_FONT_NAME.to_string()),
        generated_at,
    };
    let characters = request.characters;

    let document = tokio::task::spawn_blocking(move || {
        layout_for_export(&characters, &config, &header)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    info!(pages = document.page_count(), "export laid out");

    Ok(Json(ExportResponse {
        filename: format!("typewriter-{}.pdf", generated_at.timestamp_millis()),
        document,
    }))
}
