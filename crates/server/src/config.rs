//! # Application Configuration
//!
//! Configuration for `duolens-server`, loaded from an optional `config.yml`
//! (with `${VAR}` environment substitution) and layered under environment
//! variable overrides. Top-level keys like `port` are overridden by plain
//! variables (`PORT`); nested keys by `DUOLENS_`-prefixed ones
//! (e.g. `DUOLENS_PROVIDER__API_URL`).

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use duolens::context::DEFAULT_MAX_CONTEXT_CHARS;
use duolens::providers::ai::openai::DEFAULT_CHAT_MODEL;
use duolens::Persona;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The OpenAI-compatible completion service.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Context preparation limits.
    #[serde(default)]
    pub context: ContextConfig,
    /// Predefined document locations and upload directories.
    #[serde(default)]
    pub library: LibraryConfig,
}

fn default_port() -> u16 {
    8080
}

/// Where completion requests go. The API key itself is not configured here:
/// it is supplied by the end user per session.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model_name: default_model_name(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model_name() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContextConfig {
    /// Character budget for the document context embedded in prompts.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CONTEXT_CHARS
}

/// Per-persona document directories and the predefined filenames looked up
/// inside them. Uploads land in the same directories.
#[derive(Debug, Deserialize, Clone)]
pub struct LibraryConfig {
    #[serde(default = "default_opinion_dir")]
    pub opinion_dir: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_opinion_document")]
    pub opinion_document: String,
    #[serde(default = "default_data_document")]
    pub data_document: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            opinion_dir: default_opinion_dir(),
            data_dir: default_data_dir(),
            opinion_document: default_opinion_document(),
            data_document: default_data_document(),
        }
    }
}

fn default_opinion_dir() -> String {
    "backend/opinion_pdfs".to_string()
}

fn default_data_dir() -> String {
    "backend/data_pdfs".to_string()
}

fn default_opinion_document() -> String {
    "naturalness_opinions.pdf".to_string()
}

fn default_data_document() -> String {
    "naturalness_data.pdf".to_string()
}

impl LibraryConfig {
    /// The document directory for a persona.
    pub fn dir_for(&self, persona: Persona) -> &Path {
        match persona {
            Persona::Opinion => Path::new(&self.opinion_dir),
            Persona::Data => Path::new(&self.data_dir),
        }
    }

    /// The full path of the predefined document for a persona.
    pub fn predefined_path(&self, persona: Persona) -> PathBuf {
        match persona {
            Persona::Opinion => self.dir_for(persona).join(&self.opinion_document),
            Persona::Data => self.dir_for(persona).join(&self.data_document),
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap();
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration.
///
/// Layering, lowest to highest precedence: programmatic defaults, the
/// `config.yml` next to this crate (optional unless an override path is
/// given), plain environment variables for top-level keys, and
/// `DUOLENS_...` variables for nested keys.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let config_path = match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            path.to_string()
        }
        None => {
            let default_path = format!("{}/config.yml", env!("CARGO_MANIFEST_DIR"));
            if let Some(content) = read_and_substitute(&default_path)? {
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
            default_path
        }
    };
    info!("Loading configuration from '{config_path}'.");

    let settings = builder
        // Plain environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("DUOLENS")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}
