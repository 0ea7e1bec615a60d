//! JSON Schema validation of classifier replies.
//!
//! The schema is generated from [`RawIntent`] with `schemars` and compiled
//! once with `jsonschema`.

use std::sync::LazyLock;

use schemars::schema_for;

use crate::error::IntentError;
use crate::intent::RawIntent;

static VALIDATOR: LazyLock<Result<jsonschema::Validator, String>> = LazyLock::new(|| {
    let schema = serde_json::to_value(schema_for!(RawIntent)).map_err(|e| e.to_string())?;
    jsonschema::validator_for(&schema).map_err(|e| e.to_string())
});

/// The generated intent schema, for `tkl` introspection and tests.
///
/// # Errors
///
/// Returns `IntentError::Schema` if the schema cannot be serialized.
pub fn intent_schema() -> Result<serde_json::Value, IntentError> {
    serde_json::to_value(schema_for!(RawIntent)).map_err(|e| IntentError::Schema {
        errors: vec![e.to_string()],
    })
}

/// Validate a decoded reply against the intent schema.
///
/// # Errors
///
/// Returns `IntentError::Schema` listing every violation.
pub fn validate(instance: &serde_json::Value) -> Result<(), IntentError> {
    let validator = VALIDATOR.as_ref().map_err(|e| IntentError::Schema {
        errors: vec![format!("schema failed to compile: {e}")],
    })?;

    let errors: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(IntentError::Schema { errors })
    }
}
