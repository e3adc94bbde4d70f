//! `formsmith`: load a form configuration, optionally replay a command
//! script over it, and write the generated markup and stylesheet.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::Value;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use formsmith::{
    DocumentFormat, FormCommand, FormConfig, FormSession, FormStyle, FormType, GeneratorOptions,
    HtmlPolicy, OutputDestination, OutputOptions, form::ops, generate_all_with,
    io::{emit, emit_config, emit_text, parse_commands_value, parse_config_value},
    parse_document_str,
    schema::config_schema_value,
};

#[derive(Debug, Parser)]
#[command(
    name = "formsmith",
    version,
    about = "Generate embeddable form markup from a form configuration"
)]
struct Cli {
    /// Form configuration: file path, inline payload, or "-" for stdin
    #[arg(short = 'c', long = "config", value_name = "SPEC")]
    config: Option<String>,

    /// Command script replayed over the configuration: file path, inline payload, or "-"
    #[arg(short = 'a', long = "apply", value_name = "SPEC")]
    apply: Option<String>,

    /// Override the configuration's style (tailwind, css, bem)
    #[arg(long = "style", value_name = "STYLE")]
    style: Option<FormStyle>,

    /// Override the configuration's form type (basic, advanced)
    #[arg(long = "form-type", value_name = "TYPE")]
    form_type: Option<FormType>,

    /// Markup destinations ("-" writes to stdout). Defaults to stdout.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Stylesheet destination for css/bem output. Without it the stylesheet
    /// is embedded in a <style> block ahead of the markup.
    #[arg(long = "css-output", value_name = "DEST")]
    css_output: Option<String>,

    /// Print the resulting configuration document instead of markup
    #[arg(long = "print-config")]
    print_config: bool,

    /// Print the JSON Schema of configuration documents and exit
    #[arg(long = "print-schema")]
    print_schema: bool,

    /// Escape the content of html fields instead of passing it through
    #[arg(long = "escape-html")]
    escape_html: bool,

    /// Indentation width of generated code
    #[arg(long = "indent", value_name = "N", default_value_t = 2)]
    indent: usize,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long = "log-level", value_name = "FILTER", default_value = "warn")]
    log_level: String,
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if cli.print_schema {
        let schema = config_schema_value().map_err(Report::msg)?;
        emit(&schema, &OutputOptions::default()).map_err(Report::msg)?;
        return Ok(());
    }

    let mut diagnostics = DiagnosticCollector::default();

    let config_spec = cli.config.as_deref();
    let apply_spec = cli.apply.as_deref();
    let both_stdin = config_spec == Some("-") && apply_spec == Some("-");
    if both_stdin {
        diagnostics.push_input(
            "config/apply",
            "cannot read config and command script from stdin simultaneously; provide inline content or files",
        );
    }

    let config_hint = resolve_format_hint(config_spec, "config", &mut diagnostics);
    let apply_hint = resolve_format_hint(apply_spec, "apply", &mut diagnostics);

    let config_value = load_optional_value(
        config_spec,
        config_hint.format,
        "config",
        config_hint.blocked || both_stdin,
        &mut diagnostics,
    );
    let apply_value = load_optional_value(
        apply_spec,
        apply_hint.format,
        "apply",
        apply_hint.blocked || both_stdin,
        &mut diagnostics,
    );

    let config = config_value.and_then(|value| match parse_config_value(value) {
        Ok(config) => Some(config),
        Err(err) => {
            diagnostics.push_input("config", format!("{err:#}"));
            None
        }
    });
    let commands = apply_value.and_then(|value| match parse_commands_value(value) {
        Ok(commands) => Some(commands),
        Err(err) => {
            diagnostics.push_input("apply", format!("{err:#}"));
            None
        }
    });

    let outputs = build_destinations(&cli.outputs, &mut diagnostics);
    let css_output = cli.css_output.as_deref().map(OutputDestination::parse);
    let file_paths: Vec<PathBuf> = outputs
        .iter()
        .chain(css_output.iter())
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Stdout => None,
        })
        .collect();
    ensure_output_paths_available(&file_paths, cli.force, &mut diagnostics);

    diagnostics.into_result()?;

    let config = build_config(&cli, config, commands.as_deref().unwrap_or_default());
    for field in config.off_palette_fields() {
        warn!(
            field = %field.id,
            field_type = %field.field_type(),
            form_type = %config.form_type,
            "field type is not offered by the form type's palette"
        );
    }

    if cli.print_config {
        let options = OutputOptions::default().with_destinations(outputs);
        emit_config(&config, &options).map_err(Report::msg)?;
        return Ok(());
    }

    let options = GeneratorOptions::default()
        .with_indent(cli.indent)
        .with_html_policy(if cli.escape_html {
            HtmlPolicy::Escape
        } else {
            HtmlPolicy::Raw
        });
    let generated = generate_all_with(&config, &options);

    let markup = match (generated.stylesheet, css_output) {
        (Some(stylesheet), Some(destination)) => {
            emit_text(&stylesheet, &[destination]).map_err(Report::msg)?;
            generated.markup
        }
        (Some(stylesheet), None) => format!("<style>\n{stylesheet}</style>\n{}", generated.markup),
        (None, Some(_)) => {
            warn!(style = %config.style, "utility-class output has no stylesheet; --css-output ignored");
            generated.markup
        }
        (None, None) => generated.markup,
    };
    emit_text(&markup, &outputs).map_err(Report::msg)?;
    info!(
        fields = config.field_count(),
        sections = config.sections.len(),
        "generated form"
    );

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn build_config(cli: &Cli, loaded: Option<FormConfig>, commands: &[FormCommand]) -> FormConfig {
    let mut config = loaded.unwrap_or_default();
    if let Some(style) = cli.style {
        config = ops::set_style(&config, style);
    }
    if let Some(form_type) = cli.form_type {
        config = ops::set_form_type(&config, form_type);
    }
    if commands.is_empty() {
        return config;
    }
    let mut session = FormSession::resume(config);
    let applied = session.apply_all(commands);
    debug!(
        applied,
        skipped = commands.len() - applied,
        "replayed command script"
    );
    session.into_config()
}

#[derive(Debug, Clone, Copy, Default)]
struct FormatResolution {
    format: DocumentFormat,
    blocked: bool,
}

fn resolve_format_hint(
    path_hint: Option<&str>,
    label: &str,
    diagnostics: &mut DiagnosticCollector,
) -> FormatResolution {
    if let Some(path) = path_hint
        && path != "-"
    {
        match probe_format_from_extension(Path::new(path)) {
            ExtensionFormat::Known(format) => {
                return FormatResolution {
                    format,
                    blocked: false,
                };
            }
            ExtensionFormat::UnsupportedFeature {
                format_name,
                feature_flag,
            } => {
                diagnostics.push_input(
                    label,
                    format!(
                        "{label} '{path}' requires {format_name} support, but this build lacks the '{feature_flag}' feature"
                    ),
                );
                return FormatResolution {
                    format: DocumentFormat::default(),
                    blocked: true,
                };
            }
            ExtensionFormat::Unknown => {}
        }
    }

    FormatResolution::default()
}

fn load_optional_value(
    spec: Option<&str>,
    format: DocumentFormat,
    label: &str,
    skip: bool,
    diagnostics: &mut DiagnosticCollector,
) -> Option<Value> {
    if skip {
        return None;
    }
    let raw = spec?;
    match load_value(raw, format, label) {
        Ok(value) => Some(value),
        Err(err) => {
            diagnostics.push_input(label, err.to_string());
            None
        }
    }
}

fn load_value(spec: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    if spec == "-" {
        let contents = read_from_source(&InputSource::Stdin)?;
        return parse_contents(&contents, format, label);
    }
    if looks_inline(spec) {
        return parse_contents(spec, format, &format!("inline {label}"));
    }

    let path = PathBuf::from(spec);
    match read_from_source(&InputSource::File(path.clone())) {
        Ok(contents) => parse_contents(&contents, format, label),
        Err(err) => {
            if is_not_found(&err) {
                let inline_label = format!("inline {label}");
                return parse_contents(spec, format, &inline_label);
            }
            Err(err.wrap_err(format!("failed to load {label} from {}", path.display())))
        }
    }
}

/// Payloads that cannot be a path; long documents would otherwise fail
/// with a name-too-long error instead of not-found.
fn looks_inline(spec: &str) -> bool {
    let trimmed = spec.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[') || spec.contains('\n')
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &Report) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

fn parse_contents(contents: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    match parse_document_str(contents, format) {
        Ok(value) => Ok(value),
        Err(primary) => {
            for candidate in DocumentFormat::available_formats() {
                if candidate == format {
                    continue;
                }
                if let Ok(value) = parse_document_str(contents, candidate) {
                    return Ok(value);
                }
            }
            Err(eyre!(
                "failed to parse {label}: tried {} (first error: {primary})",
                format_list()
            ))
        }
    }
}

fn format_list() -> String {
    let items: Vec<String> = DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect();
    items.join(", ")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

fn build_destinations(
    raw_outputs: &[String],
    diagnostics: &mut DiagnosticCollector,
) -> Vec<OutputDestination> {
    if raw_outputs.is_empty() {
        return vec![OutputDestination::Stdout];
    }
    let mut destinations = Vec::new();
    for raw in raw_outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        destinations.push(OutputDestination::parse(raw));
    }
    destinations
}

fn probe_format_from_extension(path: &Path) -> ExtensionFormat {
    if let Some(format) = DocumentFormat::from_path(path) {
        return ExtensionFormat::Known(format);
    }
    let Some(ext) = path.extension() else {
        return ExtensionFormat::Unknown;
    };
    match ext.to_string_lossy().to_ascii_lowercase().as_str() {
        "yaml" | "yml" => ExtensionFormat::UnsupportedFeature {
            format_name: "yaml",
            feature_flag: "yaml",
        },
        "toml" => ExtensionFormat::UnsupportedFeature {
            format_name: "toml",
            feature_flag: "toml",
        },
        _ => ExtensionFormat::Unknown,
    }
}

#[derive(Debug)]
enum ExtensionFormat {
    Known(DocumentFormat),
    UnsupportedFeature {
        format_name: &'static str,
        feature_flag: &'static str,
    },
    Unknown,
}

fn ensure_output_paths_available(
    paths: &[PathBuf],
    force: bool,
    diagnostics: &mut DiagnosticCollector,
) {
    if force {
        return;
    }
    for path in paths {
        if path.exists() {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_diagnostics_before_failing() {
        let mut diagnostics = DiagnosticCollector::default();
        diagnostics.push_input("config", "missing");
        diagnostics.push_output("exists");
        let err = diagnostics.into_result().unwrap_err().to_string();
        assert!(err.contains("1. input (config): missing"));
        assert!(err.contains("2. output: exists"));
    }

    #[test]
    fn probes_known_extensions() {
        assert!(matches!(
            probe_format_from_extension(Path::new("form.json")),
            ExtensionFormat::Known(DocumentFormat::Json)
        ));
        assert!(matches!(
            probe_format_from_extension(Path::new("form.html")),
            ExtensionFormat::Unknown
        ));
    }

    #[test]
    fn empty_output_list_means_stdout() {
        let mut diagnostics = DiagnosticCollector::default();
        assert_eq!(
            build_destinations(&[], &mut diagnostics),
            vec![OutputDestination::Stdout]
        );
        build_destinations(&[" ".to_string()], &mut diagnostics);
        assert!(diagnostics.into_result().is_err());
    }
}
