use thiserror::Error;

/// Failures raised while building or loading a form configuration.
///
/// Mutation operations never produce these; they absorb stale targets as
/// no-ops instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field type '{0}'")]
    InvalidFieldType(String),
    #[error("unknown form style '{0}' (expected tailwind, css or bem)")]
    InvalidStyle(String),
    #[error("unknown form type '{0}' (expected basic or advanced)")]
    InvalidFormType(String),
    #[error("section '{section}' declares {columns} columns; expected 1 to 4")]
    ColumnCount { section: String, columns: usize },
    #[error("section '{section}' declares {declared} columns but carries {actual}")]
    ColumnMismatch {
        section: String,
        declared: usize,
        actual: usize,
    },
    #[error("invalid alignment '{0}' (expected left, center, right or full-width)")]
    InvalidAlignment(String),
    #[error("section id '{0}' is used more than once")]
    DuplicateSectionId(String),
    #[error("field id '{0}' is used more than once")]
    DuplicateFieldId(String),
    #[error("field name '{0}' is used more than once")]
    DuplicateName(String),
    #[error("document does not describe a form configuration: {0}")]
    InvalidDocument(String),
}
