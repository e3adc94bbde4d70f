//! Markup and stylesheet generation.
//!
//! Generation is a pure function of the configuration: the same input always
//! yields byte-identical text.

mod classes;
mod names;
mod stylesheet;
mod templates;
mod writer;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::{Alignment, FieldType, FormConfig};

use self::{
    classes::scheme_for,
    names::RenderedNames,
    templates::{RenderContext, SLIDER_SCRIPT, STEPPER_SCRIPT, render_field, submit_button},
    writer::{Attrs, MarkupWriter},
};

pub use writer::{escape_attr, escape_text};

/// Third-party relay every generated form posts to.
pub const FORM_ENDPOINT: &str = "https://api.web3forms.com/submit";
/// Value of the hidden `access_key` input; replaced by the end user.
pub const ACCESS_KEY_PLACEHOLDER: &str = "YOUR_ACCESS_KEY_HERE";

/// How `html` field content reaches the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HtmlPolicy {
    /// Pass content through untouched.
    #[default]
    Raw,
    /// Escape content so it renders as text.
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub indent: usize,
    pub html_policy: HtmlPolicy,
    /// Label of the submit button appended to forms without a button field.
    pub submit_label: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            html_policy: HtmlPolicy::Raw,
            submit_label: "Submit".to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_html_policy(mut self, html_policy: HtmlPolicy) -> Self {
        self.html_policy = html_policy;
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }
}

/// Markup plus, for semantic styles, the stylesheet it relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub markup: String,
    pub stylesheet: Option<String>,
}

pub fn generate(config: &FormConfig) -> String {
    generate_with(config, &GeneratorOptions::default())
}

pub fn generate_with(config: &FormConfig, options: &GeneratorOptions) -> String {
    let classes = scheme_for(config.style);
    let ctx = RenderContext {
        classes,
        html_policy: options.html_policy,
    };
    let mut w = MarkupWriter::new(options.indent);
    let mut names = RenderedNames::new();

    let form = Attrs::new()
        .set("action", FORM_ENDPOINT)
        .set("method", "POST")
        .set("class", classes.form());
    w.open(format!("<form{form}>"));
    let access_key = Attrs::new()
        .set("type", "hidden")
        .set("name", "access_key")
        .set("value", ACCESS_KEY_PLACEHOLDER);
    w.line(format!("<input{access_key}>"));

    for section in &config.sections {
        let container = Attrs::new().set("class", classes.section(section.column_count()));
        w.open(format!("<div{container}>"));
        for column in section.columns() {
            let column_attrs = Attrs::new().set("class", classes.column());
            if column.is_empty() {
                w.line(format!("<div{column_attrs}></div>"));
                continue;
            }
            w.open(format!("<div{column_attrs}>"));
            for field in column.iter() {
                render_field(&mut w, field, &mut names, &ctx);
            }
            w.close("</div>");
        }
        w.close("</div>");
    }

    if !config.has_field_type(FieldType::Button) {
        submit_button(&mut w, &ctx, &options.submit_label, Alignment::Left);
    }

    let scripts: Vec<&str> = [
        (FieldType::Slider, SLIDER_SCRIPT),
        (FieldType::NumberIncrement, STEPPER_SCRIPT),
    ]
    .into_iter()
    .filter(|(field_type, _)| config.has_field_type(*field_type))
    .map(|(_, script)| script)
    .collect();
    if !scripts.is_empty() {
        w.open("<script>");
        for script in scripts {
            w.block(script);
        }
        w.close("</script>");
    }

    w.close("</form>");
    let markup = w.finish();
    trace!(
        style = %config.style,
        sections = config.sections.len(),
        bytes = markup.len(),
        "generated markup"
    );
    markup
}

/// Stylesheet paired with the markup. Utility-class output needs none and
/// yields an empty string.
pub fn generate_stylesheet(config: &FormConfig) -> String {
    generate_stylesheet_with(config, &GeneratorOptions::default())
}

pub fn generate_stylesheet_with(config: &FormConfig, options: &GeneratorOptions) -> String {
    if !config.style.is_semantic() {
        return String::new();
    }
    let css = stylesheet::semantic_stylesheet(config, options.indent);
    trace!(style = %config.style, bytes = css.len(), "generated stylesheet");
    css
}

pub fn generate_all(config: &FormConfig) -> GeneratedCode {
    generate_all_with(config, &GeneratorOptions::default())
}

pub fn generate_all_with(config: &FormConfig, options: &GeneratorOptions) -> GeneratedCode {
    GeneratedCode {
        markup: generate_with(config, options),
        stylesheet: config
            .style
            .is_semantic()
            .then(|| generate_stylesheet_with(config, options)),
    }
}
