//! # Session Handlers
//!
//! Credential verification and mode navigation. Both analysis modes stay
//! gated behind a session, and a session only comes into existence after the
//! supplied API key has been accepted by the remote service.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::session::Session;
use axum::extract::{Path, Query, State};
use axum::Json;
use duolens::providers::ai::openai::OpenAiProvider;
use duolens::providers::ai::AiProvider;
use duolens::{ExploreMode, PromptError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

// --- API Payloads ---

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub api_key: String,
}

#[derive(Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub mode: ExploreMode,
}

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub mode: ExploreMode,
}

#[derive(Serialize, Deserialize)]
pub struct NavigateResponse {
    pub mode: ExploreMode,
    /// For analysis modes: whether a document source already exists
    /// (predefined file on disk, or an upload from this session).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_available: Option<bool>,
    /// For analysis modes: the fixed heading answers appear under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// For analysis modes: the label shown while an answer is generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_label: Option<String>,
}

// --- Handlers ---

/// Verifies the supplied API key and opens a session.
///
/// The key is stripped of surrounding whitespace before use; a key that is
/// empty afterwards is rejected without any remote call. Verification is a
/// single model-listing round-trip whose failure is terminal for this key:
/// the caller must resubmit a credential to retry, and the remote error
/// message is passed through.
pub async fn create_session_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<ApiResponse<CreateSessionResponse>>, AppError> {
    let provider = OpenAiProvider::new(
        &app_state.config.provider.api_url,
        &payload.api_key,
        Some(app_state.config.provider.model_name.clone()),
    )?;

    if let Err(err) = provider.verify_credential().await {
        warn!("API key verification failed: {err}");
        return Err(match err {
            PromptError::AiApi(message) => {
                AppError::Unauthorized(format!("API Key Validation Error: {message}"))
            }
            other => AppError::from(other),
        });
    }

    let session_id = app_state.sessions.insert(Session::new(Box::new(provider)));
    info!(%session_id, "Session created");

    let response = CreateSessionResponse {
        session_id,
        mode: ExploreMode::Home,
    };
    let debug_info = json!({ "api_url": app_state.config.provider.api_url });
    Ok(wrap_response(response, debug_params, Some(debug_info)))
}

/// Applies a mode-selection event to the session's navigation state.
pub async fn navigate_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<ApiResponse<NavigateResponse>>, AppError> {
    let session = app_state
        .sessions
        .update(&session_id, |s| s.mode = s.mode.navigate(payload.mode))
        .ok_or_else(|| AppError::Unauthorized("Unknown or expired session.".to_string()))?;

    let (document_available, heading, progress_label) = match session.mode.persona() {
        Some(persona) => {
            let predefined = app_state.config.library.predefined_path(persona);
            let available = predefined.exists() || session.uploads.contains_key(&persona);
            (
                Some(available),
                Some(persona.heading().to_string()),
                Some(persona.progress_label().to_string()),
            )
        }
        None => (None, None, None),
    };

    info!(%session_id, mode = ?session.mode, "Navigated");
    let response = NavigateResponse {
        mode: session.mode,
        document_available,
        heading,
        progress_label,
    };
    Ok(wrap_response(response, debug_params, None))
}
