//! Server configuration
//!
//! Everything comes from the environment. The model credential is
//! optional by design: without it the server still answers every
//! request from the template path.

use appspec_core::ModelConfig;

/// Environment variable holding the completion-provider credential
pub(crate) const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Runtime settings for the server binary
#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    /// Socket address to bind
    pub(crate) addr: String,
    /// Optional completion-provider credential
    pub(crate) api_key: Option<String>,
    /// Model decoding/endpoint settings
    pub(crate) model: ModelConfig,
    /// Directory of the static demo page
    pub(crate) static_dir: String,
}

impl ServerConfig {
    /// Read configuration from the environment
    #[must_use]
    pub(crate) fn from_env() -> Self {
        let mut model = ModelConfig::default();
        if let Ok(name) = std::env::var("APPSPEC_MODEL") {
            model.model = name;
        }
        if let Ok(base) = std::env::var("APPSPEC_BASE_URL") {
            model.base_url = base;
        }

        Self {
            addr: std::env::var("APPSPEC_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string()),
            api_key: std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()),
            model,
            static_dir: std::env::var("APPSPEC_STATIC").unwrap_or_else(|_| "static".to_string()),
        }
    }

    /// Whether the model-backed path is enabled
    #[inline]
    #[must_use]
    pub(crate) fn model_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}
