//! AppSpec Core
//!
//! Turns a free-text description of a desired application into a
//! structured, schema-valid app spec:
//! - classifies the transcript into a template category by keyword
//! - optionally drafts a spec through an injected completion backend
//! - validates every candidate against the active JSON Schema
//! - substitutes a bundled, schema-valid template on any failure
//!
//! # Example
//!
//! ```rust,ignore
//! use appspec_core::{GenerateRequest, SpecGenerator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = SpecGenerator::without_model();
//! let request = GenerateRequest::from_transcript("track my daily todos");
//! let generated = generator.generate(&request).await?;
//!
//! println!("{}", generated.spec);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod classify;
pub mod error;
pub mod extract;
pub mod generator;
pub mod model;
pub mod preview;
pub mod schema;
pub mod spec;
pub mod template;

// Re-exports for convenience
pub use classify::{classify, Category, UnknownCategory};
pub use error::{ModelError, RequestError};
pub use extract::extract_json_object;
pub use generator::{default_fallback, Generated, GenerateRequest, Origin, SpecGenerator};
pub use model::{ModelAdapter, ModelBackend, ModelConfig, OpenAiBackend};
pub use preview::{preview, ChartPoint, Preview};
pub use schema::{default_schema, SpecValidator};
pub use spec::{AppSpec, DataModel, Field, Page, Widget};
pub use template::{template, Lang};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
