#![deny(rust_2018_idioms)]
//! Form-builder core: a section/column/field model, a pure mutation engine
//! over it, and a generator that turns a configuration into embeddable
//! markup and stylesheet text.

pub mod codegen;
pub mod domain;
mod error;
pub mod form;
pub mod io;
pub mod schema;

pub use codegen::{
    ACCESS_KEY_PLACEHOLDER, FORM_ENDPOINT, GeneratedCode, GeneratorOptions, HtmlPolicy, generate,
    generate_all, generate_all_with, generate_stylesheet, generate_stylesheet_with, generate_with,
};
pub use domain::{
    Alignment, Field, FieldId, FieldKind, FieldOption, FieldPatch, FieldType, FormConfig,
    FormStyle, FormType, IdGenerator, RandomIds, Section, SectionId, SequentialIds,
};
pub use error::FormError;
pub use form::{Direction, FormCommand, FormEngine, FormSession, Locator};
pub use io::{
    DocumentFormat, OutputDestination, OutputOptions, parse_commands_str, parse_config_str,
    parse_document_str,
};
pub use schema::{config_schema, validate_config_value};

pub mod prelude {
    pub use super::form::ops;
    pub use super::{
        FieldPatch, FieldType, FormCommand, FormConfig, FormEngine, FormSession, FormStyle,
        FormType, GeneratorOptions, generate, generate_stylesheet,
    };
}
