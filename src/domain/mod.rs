mod field;
mod form;
mod ids;
mod section;

pub use field::{
    Alignment, ButtonAttrs, ChoiceAttrs, Field, FieldKind, FieldOption, FieldPatch, FieldType,
    HtmlAttrs, NumericRange, RatingScale, TextAttrs,
};
pub use form::{FormConfig, FormStyle, FormType};
pub use ids::{FieldId, IdGenerator, RandomIds, SectionId, SequentialIds};
pub use section::{Column, MAX_COLUMNS, MIN_COLUMNS, Section, clamp_columns};
