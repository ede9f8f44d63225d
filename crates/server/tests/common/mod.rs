//! # Common Test Utilities
//!
//! The `TestApp` harness spawns the real server on a random port, configured
//! with temporary library directories and with the AI provider pointed at an
//! `httpmock::MockServer` standing in for the remote completion service.

// Allow unused code because this is a test utility module, and not all
// helpers are used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use duolens_server::{config, router::create_router, state::build_app_state};
use httpmock::prelude::*;
use reqwest::Client;
use serde_json::json;
use std::{fs::File, io::Write, path::PathBuf};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub opinion_dir: PathBuf,
    pub data_dir: PathBuf,
    _library_root: TempDir,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let library_root = tempfile::tempdir()?;
        let opinion_dir = library_root.path().join("opinion_pdfs");
        let data_dir = library_root.path().join("data_pdfs");

        let config_dir = tempfile::tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
provider:
  api_url: "{}"
  model_name: "mock-chat-model"
context:
  max_chars: 10000
library:
  opinion_dir: "{}"
  data_dir: "{}"
"#,
            mock_server.url("/v1"),
            opinion_dir.display(),
            data_dir.display(),
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let address = format!("http://127.0.0.1:{port}");

        let app = create_router(app_state);
        let server_handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Server error during test: {e}");
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            opinion_dir,
            data_dir,
            _library_root: library_root,
            _config_dir: config_dir,
            _server_handle: server_handle,
        })
    }

    /// Stubs `GET /v1/models` to accept the given bearer token.
    pub fn accept_credential(&self, api_key: &str) -> httpmock::Mock<'_> {
        self.mock_server.mock(|when, then| {
            when.method(GET)
                .path("/v1/models")
                .header("authorization", format!("Bearer {api_key}"));
            then.status(200).json_body(json!({
                "object": "list",
                "data": [{ "id": "mock-chat-model", "object": "model" }]
            }));
        })
    }

    /// Stubs `POST /v1/chat/completions` to count any completion attempt.
    pub fn count_completions(&self) -> httpmock::Mock<'_> {
        self.mock_server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "unexpected answer" } }
                ]
            }));
        })
    }

    /// Opens a session and returns its id. Callers stub `/v1/models` first.
    pub async fn create_session(&self, api_key: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/session", self.address))
            .json(&json!({ "api_key": api_key }))
            .send()
            .await?;
        anyhow::ensure!(
            response.status().is_success(),
            "session creation failed with status {}",
            response.status()
        );
        let body: serde_json::Value = response.json().await?;
        Ok(body["result"]["session_id"]
            .as_str()
            .expect("session_id missing from response")
            .to_string())
    }

    pub async fn navigate(&self, session_id: &str, mode: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/session/{session_id}/navigate", self.address))
            .json(&json!({ "mode": mode }))
            .send()
            .await?)
    }

    pub async fn upload_pdf(
        &self,
        session_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<reqwest::Response> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        Ok(self
            .client
            .post(format!("{}/session/{session_id}/upload", self.address))
            .multipart(form)
            .send()
            .await?)
    }

    pub async fn ask(&self, session_id: &str, query: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/session/{session_id}/ask", self.address))
            .json(&json!({ "query": query }))
            .send()
            .await?)
    }
}
