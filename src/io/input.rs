use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::{domain::FormConfig, form::FormCommand, schema::validate_config_value};

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Load a form configuration document, validating it against the
/// configuration schema before deserializing.
pub fn parse_config_str(contents: &str, format: DocumentFormat) -> Result<FormConfig> {
    let value = parse_document_str(contents, format)?;
    parse_config_value(value)
}

pub fn parse_config_value(value: Value) -> Result<FormConfig> {
    validate_config_value(&value)?;
    let config: FormConfig =
        serde_json::from_value(value).context("failed to decode form configuration")?;
    config
        .check_integrity()
        .context("configuration failed integrity checks")?;
    debug!(
        sections = config.sections.len(),
        fields = config.field_count(),
        "loaded form configuration"
    );
    Ok(config)
}

/// Load a command script: either a list of commands or an object whose
/// `commands` key holds that list.
pub fn parse_commands_str(contents: &str, format: DocumentFormat) -> Result<Vec<FormCommand>> {
    let value = parse_document_str(contents, format)?;
    parse_commands_value(value)
}

pub fn parse_commands_value(value: Value) -> Result<Vec<FormCommand>> {
    let list = match value {
        Value::Object(mut map) if map.contains_key("commands") => {
            map.remove("commands").unwrap_or(Value::Null)
        }
        other => other,
    };
    let commands: Vec<FormCommand> =
        serde_json::from_value(list).context("failed to decode command script")?;
    debug!(commands = commands.len(), "loaded command script");
    Ok(commands)
}
