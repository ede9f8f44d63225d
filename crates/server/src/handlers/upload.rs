//! # Upload Handler
//!
//! Persists a user-supplied PDF for the session's current mode. Files are
//! written once under a unique name and never cleaned up; no session ever
//! reads or deletes another session's upload.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::extract::{Path, Query, State};
use axum::Json;
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// The unique filename the upload was stored under.
    pub stored_as: String,
}

/// Stores an uploaded PDF in the current mode's library directory.
///
/// The stored filename is the original name prefixed with a freshly
/// generated random identifier, so repeated uploads of the same file (or
/// concurrent sessions uploading like-named files) can never overwrite each
/// other.
pub async fn upload_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    debug_params: Query<DebugParams>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, AppError> {
    let session = app_state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::Unauthorized("Unknown or expired session.".to_string()))?;

    let persona = session.mode.persona().ok_or_else(|| {
        AppError::BadRequest("Select an analysis mode before uploading a document.".to_string())
    })?;

    let mut file_data: Option<Vec<u8>> = None;
    let mut original_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(anyhow::Error::from)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                original_name = Some(field.file_name().unwrap_or("uploaded_file.pdf").to_string());
                file_data = Some(field.bytes().await.map_err(anyhow::Error::from)?.to_vec());
            }
            _ => warn!("Ignoring unknown multipart field: {}", name),
        }
    }

    let file_data = file_data
        .ok_or_else(|| AppError::BadRequest("No 'file' part found in upload.".to_string()))?;
    let original_name = original_name.unwrap_or_else(|| "uploaded_file.pdf".to_string());

    let stored_as = format!("{}-{}", Uuid::new_v4(), original_name);
    let target = app_state.config.library.dir_for(persona).join(&stored_as);
    tokio::fs::write(&target, &file_data)
        .await
        .map_err(anyhow::Error::from)?;
    info!(
        %session_id,
        path = %target.display(),
        size = file_data.len(),
        "Stored uploaded document"
    );

    app_state.sessions.update(&session_id, |s| {
        s.uploads.insert(persona, target.clone());
    });

    let debug_info = json!({
        "original": original_name,
        "size": file_data.len(),
        "persona": persona,
    });
    let response = UploadResponse {
        message: "Upload stored.".to_string(),
        stored_as,
    };
    Ok(wrap_response(response, debug_params, Some(debug_info)))
}
