//! # Ask Handler
//!
//! The answer-generation pipeline for one question: resolve the document
//! source, extract its text, truncate, build the persona prompt, and make
//! exactly one completion call.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::session::Session;
use axum::extract::{Path, Query, State};
use axum::Json;
use duolens::{Persona, QaClientBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    /// The fixed heading the answer is displayed under.
    pub heading: String,
}

/// Answers one question about the current mode's document.
///
/// The source is re-read and re-extracted on every question; nothing is
/// cached between requests. Resolution order: the predefined library
/// document when it exists on disk, else the file uploaded in this session
/// for the mode.
pub async fn ask_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<ApiResponse<AskResponse>>, AppError> {
    let session = app_state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::Unauthorized("Unknown or expired session.".to_string()))?;

    let persona = session.mode.persona().ok_or_else(|| {
        AppError::BadRequest("Select an analysis mode before asking a question.".to_string())
    })?;

    let document_path = resolve_document(&app_state, &session, persona)?;
    info!(
        %session_id,
        ?persona,
        document = %document_path.display(),
        "Answering question"
    );

    let document_text = duolens_pdf::extract_text_from_path(&document_path)?;

    let client = QaClientBuilder::new()
        .ai_provider(session.provider.clone())
        .max_context_chars(app_state.config.context.max_chars)
        .build()?;

    let answer = client
        .answer(persona, &payload.query, &document_text)
        .await?;

    let debug_info = json!({
        "document": document_path.display().to_string(),
        "persona": persona,
        "extracted_chars": document_text.chars().count(),
        "context_budget": app_state.config.context.max_chars,
    });
    let response = AskResponse {
        answer,
        heading: persona.heading().to_string(),
    };
    Ok(wrap_response(response, debug_params, Some(debug_info)))
}

/// Picks the document source for a persona: the predefined library file when
/// it is present, else the session's own upload.
fn resolve_document(
    app_state: &AppState,
    session: &Session,
    persona: Persona,
) -> Result<PathBuf, AppError> {
    let predefined = app_state.config.library.predefined_path(persona);
    if predefined.exists() {
        return Ok(predefined);
    }
    session.uploads.get(&persona).cloned().ok_or_else(|| {
        AppError::NotFound(
            "No predefined document found. Upload a PDF for this mode first.".to_string(),
        )
    })
}
