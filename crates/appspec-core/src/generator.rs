//! The spec generator pipeline
//!
//! Ties classification, model-backed drafting, schema validation, and
//! template fallback into one request-scoped flow:
//!
//! ```text
//! START -> (backend? -> MODEL_CALL : SKIP)
//!       -> (parse ok? -> CANDIDATE : NONE)
//!       -> VALIDATE
//!       -> (valid? -> RETURN_CANDIDATE : SELECT_TEMPLATE -> RETURN_TEMPLATE)
//! ```
//!
//! Every branch converges on a usable spec; there is no retry loop and
//! no error state visible past request validation.

use crate::classify::{classify, Category};
use crate::error::RequestError;
use crate::model::ModelAdapter;
use crate::schema::{default_schema, SpecValidator};
use crate::template::{template, Lang};
use serde_json::Value;

/// One generation request
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Free-text description of the desired application
    pub transcript: String,
    /// Output language tag; unrecognized or absent means English
    pub lang: Option<String>,
    /// Caller-supplied schema; absent means the bundled schema
    pub schema: Option<Value>,
    /// Short-circuit classification to a named category
    pub preset: Option<Category>,
}

impl GenerateRequest {
    /// Request carrying only a transcript
    #[must_use]
    pub fn from_transcript(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            ..Self::default()
        }
    }
}

/// Where the returned spec came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Model-generated and schema-valid
    Model,
    /// Bundled fallback template
    Template,
}

/// A successfully generated (or substituted) spec
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// The schema-valid app spec
    pub spec: Value,
    /// Category the transcript classified into
    pub category: Category,
    /// Language the spec was produced for
    pub lang: Lang,
    /// Model or template path
    pub origin: Origin,
}

impl Generated {
    /// Whether the fallback path produced this spec
    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Template
    }
}

/// Request-scoped spec generator
///
/// Holds the injected model capability; everything else is computed
/// fresh per request, so instances are cheap to share across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct SpecGenerator {
    adapter: ModelAdapter,
}

impl SpecGenerator {
    /// Generator with the given model capability
    #[inline]
    #[must_use]
    pub fn new(adapter: ModelAdapter) -> Self {
        Self { adapter }
    }

    /// Generator with the model path disabled
    #[inline]
    #[must_use]
    pub fn without_model() -> Self {
        Self::new(ModelAdapter::disabled())
    }

    /// Generate a spec for the request
    ///
    /// Total below request validation: the only error is a
    /// caller-supplied schema that does not compile. Generation
    /// failures of any kind resolve to the category template.
    ///
    /// # Errors
    /// Returns [`RequestError::InvalidSchema`] for an uncompilable
    /// caller schema.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Generated, RequestError> {
        let lang: Lang = request
            .lang
            .as_deref()
            .unwrap_or_default()
            .parse()
            .unwrap_or_default();
        let category = request
            .preset
            .unwrap_or_else(|| classify(&request.transcript));

        // Compile the caller's schema up front so a bad request fails
        // before any upstream call is made.
        let custom = match &request.schema {
            Some(schema) => Some((SpecValidator::compile(schema)?, schema)),
            None => None,
        };
        let (validator, schema): (&SpecValidator, &Value) = match &custom {
            Some((validator, schema)) => (validator, *schema),
            None => (SpecValidator::bundled(), default_schema()),
        };

        if let Some(candidate) = self.adapter.draft(&request.transcript, schema, lang).await {
            if validator.is_valid(&candidate) {
                tracing::info!(%category, %lang, "model candidate accepted");
                return Ok(Generated {
                    spec: candidate,
                    category,
                    lang,
                    origin: Origin::Model,
                });
            }
            tracing::info!(
                %category,
                "model candidate failed schema validation, selecting template"
            );
            tracing::debug!(reasons = ?validator.explain(&candidate));
        } else if self.adapter.is_enabled() {
            tracing::info!(%category, "model yielded no candidate, selecting template");
        } else {
            tracing::debug!(%category, "no model configured, selecting template");
        }

        Ok(Generated {
            spec: template(category, lang).to_value(),
            category,
            lang,
            origin: Origin::Template,
        })
    }
}

/// The generic English fallback, for callers recovering from faults
/// outside the pipeline
#[must_use]
pub fn default_fallback() -> Generated {
    Generated {
        spec: template(Category::Generic, Lang::En).to_value(),
        category: Category::Generic,
        lang: Lang::En,
        origin: Origin::Template,
    }
}
