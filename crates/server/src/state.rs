//! # Application State
//!
//! The shared application state (`AppState`) and the logic for building it
//! at startup. Startup is also where the library directories are created,
//! once and idempotently, so no request path has to care whether they exist.

use crate::config::AppConfig;
use crate::session::SessionStore;
use duolens::Persona;
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The in-memory session map.
    pub sessions: SessionStore,
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    for persona in [Persona::Opinion, Persona::Data] {
        let dir = config.library.dir_for(persona);
        tokio::fs::create_dir_all(dir).await?;
        info!(dir = %dir.display(), "Library directory ready");
    }

    Ok(AppState {
        config: Arc::new(config),
        sessions: SessionStore::new(),
    })
}
