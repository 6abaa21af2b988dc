//! Error types for the spec generator
//!
//! The generation pipeline deliberately exposes very few errors:
//! everything below request validation is absorbed by the fallback
//! mechanism. Only malformed requests surface to callers.

/// Errors a caller can be blamed for
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Required request fields are absent or blank
    #[error("missing required field(s): {0}")]
    MissingFields(String),

    /// Caller-supplied schema does not compile
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

impl RequestError {
    /// Build a missing-fields error from the field names
    #[must_use]
    pub fn missing(fields: &[&str]) -> Self {
        Self::MissingFields(fields.join(", "))
    }
}

/// Failures of the model-backed generation path
///
/// These never cross the generator boundary: the adapter logs them and
/// resolves to "no candidate", which selects the fallback template.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Transport-level failure calling the completion provider
    #[error("upstream call failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// Provider answered but the completion was empty
    #[error("empty completion")]
    EmptyCompletion,
}
