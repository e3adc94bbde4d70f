//! JSON Schema of the configuration document and validation against it.

use anyhow::{Context, Result};
use jsonschema::validator_for;
use schemars::{schema::RootSchema, schema_for};
use serde_json::Value;

use crate::{domain::FormConfig, error::FormError, form::FormCommand};

pub fn config_schema() -> RootSchema {
    schema_for!(FormConfig)
}

pub fn command_schema() -> RootSchema {
    schema_for!(Vec<FormCommand>)
}

pub fn config_schema_value() -> Result<Value> {
    serde_json::to_value(config_schema()).context("failed to encode configuration schema")
}

/// Check `value` against the configuration schema. Every violation is
/// reported as `pointer: message`, in document order.
pub fn validate_config_value(value: &Value) -> Result<()> {
    let schema = config_schema_value()?;
    let validator = validator_for(&schema).context("failed to compile JSON schema")?;
    let issues: Vec<String> = validator
        .iter_errors(value)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let prefix = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            format!("{prefix}: {error}")
        })
        .collect();
    if issues.is_empty() {
        return Ok(());
    }
    Err(FormError::InvalidDocument(issues.join("; "))).context("configuration failed validation")
}
