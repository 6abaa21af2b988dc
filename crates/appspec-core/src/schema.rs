//! Schema validation
//!
//! Structural contract every app spec must satisfy before it is
//! surfaced to a caller. The bundled draft-07 schema is the default;
//! callers may supply their own, which is compiled per request. The
//! bundled validator is compiled once per process (pure performance
//! choice, requests stay stateless).

use crate::error::RequestError;
use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

static BUNDLED_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["appName", "dataModels", "pages"],
        "properties": {
            "appName": { "type": "string", "minLength": 1 },
            "dataModels": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["name", "fields"],
                    "properties": {
                        "name": { "type": "string", "minLength": 1 },
                        "fields": {
                            "type": "array",
                            "minItems": 1,
                            "items": {
                                "type": "object",
                                "required": ["name", "type"],
                                "properties": {
                                    "name": { "type": "string" },
                                    "type": { "type": "string" },
                                    "required": { "type": "boolean" },
                                    "options": {
                                        "type": "array",
                                        "items": { "type": "string" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "pages": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["name", "widgets"],
                    "properties": {
                        "name": { "type": "string", "minLength": 1 },
                        "widgets": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["type"],
                                "properties": {
                                    "type": { "type": "string" }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
});

static BUNDLED_VALIDATOR: Lazy<SpecValidator> = Lazy::new(|| {
    // The bundled schema is a constant; it must always compile.
    SpecValidator::compile(&BUNDLED_SCHEMA)
        .unwrap_or_else(|e| panic!("bundled schema failed to compile: {e}"))
});

/// The bundled structural contract as a JSON value
#[inline]
#[must_use]
pub fn default_schema() -> &'static Value {
    &BUNDLED_SCHEMA
}

/// Compiled schema used to gate every outgoing app spec
pub struct SpecValidator {
    compiled: JSONSchema,
}

impl SpecValidator {
    /// Compile a caller-supplied schema
    ///
    /// # Errors
    /// Returns [`RequestError::InvalidSchema`] if the schema does not
    /// compile; a malformed schema is a request fault, not a
    /// generation fault.
    pub fn compile(schema: &Value) -> Result<Self, RequestError> {
        let compiled = JSONSchema::compile(schema)
            .map_err(|e| RequestError::InvalidSchema(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// The memoized validator for the bundled schema
    #[inline]
    #[must_use]
    pub fn bundled() -> &'static Self {
        &BUNDLED_VALIDATOR
    }

    /// Check a candidate spec against the schema
    #[inline]
    #[must_use]
    pub fn is_valid(&self, candidate: &Value) -> bool {
        self.compiled.is_valid(candidate)
    }

    /// Collect human-readable validation failures
    #[must_use]
    pub fn explain(&self, candidate: &Value) -> Vec<String> {
        match self.compiled.validate(candidate) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.map(|e| e.to_string()).collect(),
        }
    }
}

impl std::fmt::Debug for SpecValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecValidator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_schema_compiles() {
        // Forces the Lazy; a panic here means the constant is broken.
        let _ = SpecValidator::bundled();
    }

    #[test]
    fn valid_spec_passes() {
        let spec = json!({
            "appName": "Demo",
            "dataModels": [
                { "name": "items", "fields": [ { "name": "title", "type": "text" } ] }
            ],
            "pages": [
                { "name": "Items", "widgets": [ { "type": "table", "source": "items" } ] }
            ]
        });

        assert!(SpecValidator::bundled().is_valid(&spec));
        assert!(SpecValidator::bundled().explain(&spec).is_empty());
    }

    #[test]
    fn missing_top_level_key_fails() {
        let spec = json!({
            "appName": "Demo",
            "dataModels": [
                { "name": "items", "fields": [ { "name": "title", "type": "text" } ] }
            ]
        });

        assert!(!SpecValidator::bundled().is_valid(&spec));
        let reasons = SpecValidator::bundled().explain(&spec);
        assert!(!reasons.is_empty());
    }

    #[test]
    fn wrong_field_shape_fails() {
        let spec = json!({
            "appName": "Demo",
            "dataModels": [ { "name": "items", "fields": [ { "name": "title" } ] } ],
            "pages": [ { "name": "Items", "widgets": [] } ]
        });

        assert!(!SpecValidator::bundled().is_valid(&spec));
    }

    #[test]
    fn non_object_candidate_fails() {
        assert!(!SpecValidator::bundled().is_valid(&json!("just a string")));
        assert!(!SpecValidator::bundled().is_valid(&json!(null)));
    }

    #[test]
    fn caller_schema_compile_rejects_garbage() {
        let bad = json!({ "type": "definitely-not-a-type" });
        assert!(SpecValidator::compile(&bad).is_err());
    }

    #[test]
    fn caller_schema_overrides_bundled() {
        // A stricter schema the bundled templates would not satisfy.
        let strict = json!({
            "type": "object",
            "required": ["appName", "version"],
        });
        let validator = SpecValidator::compile(&strict).unwrap();

        assert!(!validator.is_valid(&json!({ "appName": "Demo" })));
        assert!(validator.is_valid(&json!({ "appName": "Demo", "version": 1 })));
    }
}
