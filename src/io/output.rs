use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::FormConfig;

use super::DocumentFormat;

/// Destination for serialized documents and generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }

    /// `-` means stdout; anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            OutputDestination::Stdout
        } else {
            OutputDestination::file(raw)
        }
    }

    fn describe(&self) -> String {
        match self {
            OutputDestination::Stdout => "stdout".to_string(),
            OutputDestination::File(path) => format!("file {}", path.display()),
        }
    }
}

/// Controls how a configuration document is serialized.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }

    pub fn add_destination(mut self, destination: OutputDestination) -> Self {
        self.destinations.push(destination);
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// Serialize a configuration and write it to every destination.
pub fn emit_config(config: &FormConfig, options: &OutputOptions) -> Result<()> {
    let value = serde_json::to_value(config).context("failed to encode form configuration")?;
    emit(&value, options)
}

/// Serialize `value` and write it to every configured destination.
pub fn emit(value: &Value, options: &OutputOptions) -> Result<()> {
    if options.destinations.is_empty() {
        return Ok(());
    }
    let mut payload = serialize_value(value, options)?;
    if !payload.ends_with('\n') {
        payload.push('\n');
    }
    write_all(&payload, &options.destinations)
}

/// Write already-rendered text (markup, stylesheet) verbatim.
pub fn emit_text(text: &str, destinations: &[OutputDestination]) -> Result<()> {
    write_all(text, destinations)
}

fn write_all(payload: &str, destinations: &[OutputDestination]) -> Result<()> {
    for destination in destinations {
        write_payload(destination, payload)
            .with_context(|| format!("failed to write to {}", destination.describe()))?;
    }
    Ok(())
}

fn serialize_value(value: &Value, options: &OutputOptions) -> Result<String> {
    match options.format {
        DocumentFormat::Json => {
            if options.pretty {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            } else {
                serde_json::to_string(value).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if options.pretty {
                toml::to_string_pretty(value).context("failed to serialize TOML")
            } else {
                toml::to_string(value).context("failed to serialize TOML")
            }
        }
    }
}

fn write_payload(destination: &OutputDestination, payload: &str) -> Result<()> {
    match destination {
        OutputDestination::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(payload.as_bytes())?;
            stdout.flush().context("failed to flush stdout")
        }
        OutputDestination::File(path) => {
            let mut file = File::create(path)?;
            file.write_all(payload.as_bytes())?;
            file.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("formsmith-test-{tag}-{nanos}"))
    }

    #[test]
    fn writes_nothing_when_not_configured() {
        let options = OutputOptions::default().with_destinations(Vec::new());
        emit(&json!({"ok": true}), &options).unwrap();
    }

    #[test]
    fn writes_configuration_to_file() {
        let path = temp_path("config");
        let options =
            OutputOptions::default().with_destinations(vec![OutputDestination::file(&path)]);
        emit_config(&FormConfig::default(), &options).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"formType\": \"basic\""));
        assert!(contents.ends_with("}\n"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn writes_text_verbatim() {
        let path = temp_path("markup");
        emit_text("<form></form>\n", &[OutputDestination::file(&path)]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<form></form>\n");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn dash_means_stdout() {
        assert_eq!(OutputDestination::parse("-"), OutputDestination::Stdout);
        assert_eq!(
            OutputDestination::parse("out.html"),
            OutputDestination::File(PathBuf::from("out.html"))
        );
    }
}
