//! Model-backed generation adapter
//!
//! The external completion service sits behind the [`ModelBackend`]
//! trait so the generator receives it as an injected capability: the
//! server constructs one backend at startup, tests substitute a
//! scripted double. The adapter converts every failure mode (no
//! credential, transport error, unparseable output) into "no
//! candidate" and never raises to its caller.

use crate::error::ModelError;
use crate::extract::extract_json_object;
use crate::template::Lang;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You convert natural language app ideas into a strict JSON \
spec that matches the provided JSON Schema. Return ONLY valid JSON (no markdown). \
Keys: appName,dataModels,pages.";

/// A text-completion capability
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Run one completion round-trip
    ///
    /// # Errors
    /// Returns [`ModelError`] on transport or provider failure; the
    /// adapter absorbs these.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ModelError>;
}

/// Decoding and endpoint settings for the live backend
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Provider model name
    pub model: String,
    /// Near-deterministic decoding
    pub temperature: f32,
    /// OpenAI-compatible API root
    pub base_url: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Live backend against an OpenAI-compatible chat-completions API
///
/// One awaited round-trip per request: no retry, no streaming, no
/// timeout beyond what the surrounding runtime imposes.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    config: ModelConfig,
}

impl OpenAiBackend {
    /// Create a backend holding the given credential
    #[must_use]
    pub fn new(api_key: impl Into<String>, config: ModelConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            config,
        }
    }
}

impl std::fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log the credential.
        f.debug_struct("OpenAiBackend")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ModelBackend for OpenAiBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ModelError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = serde_json::json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ModelError::EmptyCompletion)
    }
}

/// Fallible model path wrapped into an infallible "maybe a candidate"
#[derive(Clone)]
pub struct ModelAdapter {
    backend: Option<Arc<dyn ModelBackend>>,
}

impl ModelAdapter {
    /// Adapter with a live or scripted backend
    #[must_use]
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Adapter with no backend: generation is skipped entirely
    ///
    /// Running without a credential is a supported configuration, not
    /// an error.
    #[must_use]
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// Whether a backend is configured
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Ask the model for a candidate spec
    ///
    /// Returns `None` on every failure path: no backend, upstream
    /// failure, or output that holds no parseable JSON object. The
    /// candidate is unvalidated; schema checking is the caller's job.
    pub async fn draft(&self, transcript: &str, schema: &Value, lang: Lang) -> Option<Value> {
        let backend = self.backend.as_ref()?;

        let user = format!(
            "Language: {}\nSchema: {}\nTranscript:\n\"\"\"\n{}\n\"\"\"",
            lang, schema, transcript
        );

        let raw = match backend.complete(SYSTEM_PROMPT, &user).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("model completion failed, falling back: {e}");
                return None;
            }
        };

        let snippet = extract_json_object(&raw)?;
        match serde_json::from_str::<Value>(snippet) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::debug!("model output not parseable as JSON: {e}");
                None
            }
        }
    }
}

impl std::fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Scripted backend returning a fixed result
    struct Scripted(Result<String, ()>);

    #[async_trait]
    impl ModelBackend for Scripted {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, ModelError> {
            self.0.clone().map_err(|()| ModelError::EmptyCompletion)
        }
    }

    fn adapter(result: Result<&str, ()>) -> ModelAdapter {
        ModelAdapter::new(Arc::new(Scripted(result.map(str::to_string))))
    }

    #[tokio::test]
    async fn disabled_adapter_yields_none() {
        let adapter = ModelAdapter::disabled();
        assert!(!adapter.is_enabled());
        assert!(adapter.draft("anything", &json!({}), Lang::En).await.is_none());
    }

    #[tokio::test]
    async fn backend_error_yields_none() {
        let adapter = adapter(Err(()));
        assert!(adapter.draft("x", &json!({}), Lang::En).await.is_none());
    }

    #[tokio::test]
    async fn prose_wrapped_json_is_extracted() {
        let adapter = adapter(Ok(r#"Here you go: {"appName":"X"} enjoy!"#));
        let candidate = adapter.draft("x", &json!({}), Lang::En).await;
        assert_eq!(candidate, Some(json!({ "appName": "X" })));
    }

    #[tokio::test]
    async fn truncated_output_yields_none() {
        let adapter = adapter(Ok(r#"{"appName":"X","dataModels":["#));
        assert!(adapter.draft("x", &json!({}), Lang::En).await.is_none());
    }

    #[tokio::test]
    async fn non_json_output_yields_none() {
        let adapter = adapter(Ok("I'm sorry, I can't do that."));
        assert!(adapter.draft("x", &json!({}), Lang::En).await.is_none());
    }

    #[tokio::test]
    async fn prompt_carries_schema_and_language() {
        struct Capture(std::sync::Mutex<Option<String>>);

        #[async_trait]
        impl ModelBackend for Capture {
            async fn complete(&self, _system: &str, user: &str) -> Result<String, ModelError> {
                *self.0.lock().unwrap() = Some(user.to_string());
                Ok("{}".to_string())
            }
        }

        let capture = Arc::new(Capture(std::sync::Mutex::new(None)));
        let adapter = ModelAdapter::new(capture.clone());
        adapter
            .draft("build me a crm", &json!({ "type": "object" }), Lang::He)
            .await;

        let prompt = capture.0.lock().unwrap().take().expect("prompt captured");
        assert!(prompt.contains("Language: he"));
        assert!(prompt.contains(r#""type":"object""#));
        assert!(prompt.contains("build me a crm"));
    }
}
