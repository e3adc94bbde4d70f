mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{
    parse_commands_str, parse_commands_value, parse_config_str, parse_config_value,
    parse_document_str,
};
pub use output::{OutputDestination, OutputOptions, emit, emit_config, emit_text};
