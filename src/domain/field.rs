use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FormError;

use super::ids::FieldId;

/// Closed set of field kinds a palette can request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    Email,
    Password,
    Number,
    Tel,
    Date,
    Textarea,
    Select,
    Checkbox,
    Radio,
    File,
    Button,
    Html,
    Slider,
    NumberIncrement,
    Rating,
}

impl FieldType {
    pub const ALL: [FieldType; 16] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Password,
        FieldType::Number,
        FieldType::Tel,
        FieldType::Date,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::File,
        FieldType::Button,
        FieldType::Html,
        FieldType::Slider,
        FieldType::NumberIncrement,
        FieldType::Rating,
    ];

    /// Wire name used in configuration documents.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Password => "password",
            FieldType::Number => "number",
            FieldType::Tel => "tel",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::File => "file",
            FieldType::Button => "button",
            FieldType::Html => "html",
            FieldType::Slider => "slider",
            FieldType::NumberIncrement => "numberIncrement",
            FieldType::Rating => "rating",
        }
    }

    /// Submission key a new field starts from before collision suffixing.
    pub fn base_name(self) -> &'static str {
        match self {
            FieldType::NumberIncrement => "number_increment",
            other => other.as_str(),
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Email => "Email",
            FieldType::Password => "Password",
            FieldType::Number => "Number",
            FieldType::Tel => "Phone",
            FieldType::Date => "Date",
            FieldType::Textarea => "Text Area",
            FieldType::Select => "Select",
            FieldType::Checkbox => "Checkbox",
            FieldType::Radio => "Radio",
            FieldType::File => "File Upload",
            FieldType::Button => "Submit",
            FieldType::Html => "HTML Block",
            FieldType::Slider => "Slider",
            FieldType::NumberIncrement => "Number Increment",
            FieldType::Rating => "Rating",
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Checkbox | FieldType::Radio
        )
    }

    /// `required` carries no meaning for buttons and raw markup.
    pub fn accepts_required(self) -> bool {
        !matches!(self, FieldType::Button | FieldType::Html)
    }

    /// Types whose generated markup needs the shared behaviour script.
    pub fn needs_script(self) -> bool {
        matches!(self, FieldType::Slider | FieldType::NumberIncrement)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FormError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        FieldType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == trimmed || ty.base_name() == trimmed)
            .ok_or_else(|| FormError::InvalidFieldType(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    FullWidth,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::FullWidth => "full-width",
        }
    }
}

impl FromStr for Alignment {
    type Err = FormError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            "full-width" | "full" => Ok(Alignment::FullWidth),
            other => Err(FormError::InvalidAlignment(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextAttrs {
    #[serde(default)]
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChoiceAttrs {
    pub options: Vec<FieldOption>,
}

impl Default for ChoiceAttrs {
    fn default() -> Self {
        Self {
            options: vec![
                FieldOption::new("option_1", "Option 1"),
                FieldOption::new("option_2", "Option 2"),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ButtonAttrs {
    #[serde(default)]
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HtmlAttrs {
    pub content: String,
}

impl Default for HtmlAttrs {
    fn default() -> Self {
        Self {
            content: "<p>Custom HTML</p>".to_string(),
        }
    }
}

/// Numeric parameters shared by sliders and stepper inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

impl Default for NumericRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            value: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingScale {
    #[schemars(range(min = 1))]
    pub max_rating: u32,
    #[serde(default)]
    pub value: u32,
}

impl Default for RatingScale {
    fn default() -> Self {
        Self {
            max_rating: 5,
            value: 0,
        }
    }
}

/// Type-specific payload of a field. Each variant only carries the
/// attributes that mean something for that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Text(TextAttrs),
    Email(TextAttrs),
    Password(TextAttrs),
    Number(TextAttrs),
    Tel(TextAttrs),
    Date(TextAttrs),
    Textarea(TextAttrs),
    Select(ChoiceAttrs),
    Checkbox(ChoiceAttrs),
    Radio(ChoiceAttrs),
    File,
    Button(ButtonAttrs),
    Html(HtmlAttrs),
    Slider(NumericRange),
    NumberIncrement(NumericRange),
    Rating(RatingScale),
}

impl FieldKind {
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => FieldKind::Text(TextAttrs::default()),
            FieldType::Email => FieldKind::Email(TextAttrs::default()),
            FieldType::Password => FieldKind::Password(TextAttrs::default()),
            FieldType::Number => FieldKind::Number(TextAttrs::default()),
            FieldType::Tel => FieldKind::Tel(TextAttrs::default()),
            FieldType::Date => FieldKind::Date(TextAttrs::default()),
            FieldType::Textarea => FieldKind::Textarea(TextAttrs::default()),
            FieldType::Select => FieldKind::Select(ChoiceAttrs::default()),
            FieldType::Checkbox => FieldKind::Checkbox(ChoiceAttrs::default()),
            FieldType::Radio => FieldKind::Radio(ChoiceAttrs::default()),
            FieldType::File => FieldKind::File,
            FieldType::Button => FieldKind::Button(ButtonAttrs::default()),
            FieldType::Html => FieldKind::Html(HtmlAttrs::default()),
            FieldType::Slider => FieldKind::Slider(NumericRange::default()),
            FieldType::NumberIncrement => FieldKind::NumberIncrement(NumericRange::default()),
            FieldType::Rating => FieldKind::Rating(RatingScale::default()),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text(_) => FieldType::Text,
            FieldKind::Email(_) => FieldType::Email,
            FieldKind::Password(_) => FieldType::Password,
            FieldKind::Number(_) => FieldType::Number,
            FieldKind::Tel(_) => FieldType::Tel,
            FieldKind::Date(_) => FieldType::Date,
            FieldKind::Textarea(_) => FieldType::Textarea,
            FieldKind::Select(_) => FieldType::Select,
            FieldKind::Checkbox(_) => FieldType::Checkbox,
            FieldKind::Radio(_) => FieldType::Radio,
            FieldKind::File => FieldType::File,
            FieldKind::Button(_) => FieldType::Button,
            FieldKind::Html(_) => FieldType::Html,
            FieldKind::Slider(_) => FieldType::Slider,
            FieldKind::NumberIncrement(_) => FieldType::NumberIncrement,
            FieldKind::Rating(_) => FieldType::Rating,
        }
    }

    fn text_attrs_mut(&mut self) -> Option<&mut TextAttrs> {
        match self {
            FieldKind::Text(attrs)
            | FieldKind::Email(attrs)
            | FieldKind::Password(attrs)
            | FieldKind::Number(attrs)
            | FieldKind::Tel(attrs)
            | FieldKind::Date(attrs)
            | FieldKind::Textarea(attrs) => Some(attrs),
            _ => None,
        }
    }
}

/// One form control: shared attributes plus its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    pub id: FieldId,
    pub label: String,
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    /// Build a field of the given type with its palette defaults. The caller
    /// is responsible for handing in a form-unique `name`.
    pub fn new(id: FieldId, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id,
            label: field_type.default_label().to_string(),
            name: name.into(),
            required: false,
            kind: FieldKind::default_for(field_type),
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Text(attrs)
            | FieldKind::Email(attrs)
            | FieldKind::Password(attrs)
            | FieldKind::Number(attrs)
            | FieldKind::Tel(attrs)
            | FieldKind::Date(attrs)
            | FieldKind::Textarea(attrs) => Some(attrs.placeholder.as_str()),
            _ => None,
        }
    }

    pub fn options(&self) -> Option<&[FieldOption]> {
        match &self.kind {
            FieldKind::Select(choices) | FieldKind::Checkbox(choices) | FieldKind::Radio(choices) => {
                Some(&choices.options)
            }
            _ => None,
        }
    }

    /// `required` as the generator should honour it.
    pub fn is_required(&self) -> bool {
        self.required && self.field_type().accepts_required()
    }

    /// Shallow-merge `patch` into a copy of this field. Attributes that do not
    /// apply to this field's kind are ignored, as is `name`: renames go through
    /// the engine so uniqueness holds.
    pub fn merged(&self, patch: &FieldPatch) -> Field {
        let mut next = self.clone();
        if let Some(label) = &patch.label {
            next.label = label.clone();
        }
        if let Some(required) = patch.required {
            next.required = required;
        }
        if let Some(placeholder) = &patch.placeholder
            && let Some(attrs) = next.kind.text_attrs_mut()
        {
            attrs.placeholder = placeholder.clone();
        }
        match &mut next.kind {
            FieldKind::Select(choices) | FieldKind::Checkbox(choices) | FieldKind::Radio(choices) => {
                if let Some(options) = &patch.options {
                    choices.options = options.clone();
                }
            }
            FieldKind::Button(button) => {
                if let Some(alignment) = patch.alignment {
                    button.alignment = alignment;
                }
            }
            FieldKind::Html(html) => {
                if let Some(content) = &patch.content {
                    html.content = content.clone();
                }
            }
            FieldKind::Slider(range) | FieldKind::NumberIncrement(range) => {
                if let Some(min) = patch.min {
                    range.min = min;
                }
                if let Some(max) = patch.max {
                    range.max = max;
                }
                if let Some(step) = patch.step {
                    range.step = step;
                }
                if let Some(value) = patch.value {
                    range.value = value;
                }
            }
            FieldKind::Rating(scale) => {
                if let Some(max_rating) = patch.max_rating {
                    scale.max_rating = max_rating.max(1);
                }
                if let Some(value) = patch.value {
                    scale.value = value.max(0.0).round() as u32;
                }
                scale.value = scale.value.min(scale.max_rating);
            }
            _ => {}
        }
        next
    }
}

/// Partial update applied by `update_field`. Unset attributes are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldPatch {
    pub label: Option<String>,
    pub name: Option<String>,
    pub required: Option<bool>,
    pub placeholder: Option<String>,
    pub options: Option<Vec<FieldOption>>,
    pub alignment: Option<Alignment>,
    pub content: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub value: Option<f64>,
    pub max_rating: Option<u32>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.step = Some(step);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_max_rating(mut self, max_rating: u32) -> Self {
        self.max_rating = Some(max_rating);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &FieldPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_wire_and_snake_names() {
        assert_eq!(
            "numberIncrement".parse::<FieldType>().unwrap(),
            FieldType::NumberIncrement
        );
        assert_eq!(
            "number_increment".parse::<FieldType>().unwrap(),
            FieldType::NumberIncrement
        );
        assert_eq!(
            "signature".parse::<FieldType>(),
            Err(FormError::InvalidFieldType("signature".to_string()))
        );
    }

    #[test]
    fn defaults_follow_field_type() {
        let slider = Field::new(FieldId::new("f"), "slider", FieldType::Slider);
        assert_eq!(slider.kind, FieldKind::Slider(NumericRange::default()));
        let radio = Field::new(FieldId::new("r"), "radio", FieldType::Radio);
        assert_eq!(radio.options().map(<[FieldOption]>::len), Some(2));
        let rating = Field::new(FieldId::new("s"), "rating", FieldType::Rating);
        assert_eq!(
            rating.kind,
            FieldKind::Rating(RatingScale {
                max_rating: 5,
                value: 0
            })
        );
        assert_eq!(rating.placeholder(), None);
    }

    #[test]
    fn serializes_flat_with_type_tag() {
        let field = Field::new(FieldId::new("field-1"), "email", FieldType::Email);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "field-1",
                "label": "Email",
                "name": "email",
                "required": false,
                "type": "email",
                "placeholder": ""
            })
        );
        let back: Field = serde_json::from_value(value).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn deserializes_kind_specific_attributes() {
        let field: Field = serde_json::from_value(json!({
            "id": "b",
            "label": "Send",
            "name": "send",
            "type": "button",
            "alignment": "full-width"
        }))
        .unwrap();
        assert_eq!(
            field.kind,
            FieldKind::Button(ButtonAttrs {
                alignment: Alignment::FullWidth
            })
        );
        assert!(!field.required);
    }

    #[test]
    fn merge_ignores_attributes_of_other_kinds() {
        let field = Field::new(FieldId::new("f"), "file", FieldType::File);
        let patch = FieldPatch::new()
            .with_label("Resume")
            .with_placeholder("ignored")
            .with_alignment(Alignment::Center)
            .with_required(true);
        let merged = field.merged(&patch);
        assert_eq!(merged.label, "Resume");
        assert!(merged.required);
        assert_eq!(merged.kind, FieldKind::File);
    }

    #[test]
    fn merge_clamps_rating_value() {
        let field = Field::new(FieldId::new("r"), "rating", FieldType::Rating);
        let merged = field.merged(&FieldPatch::new().with_max_rating(3).with_value(9.0));
        assert_eq!(
            merged.kind,
            FieldKind::Rating(RatingScale {
                max_rating: 3,
                value: 3
            })
        );
    }

    #[test]
    fn required_is_meaningless_for_buttons() {
        let mut button = Field::new(FieldId::new("b"), "button", FieldType::Button);
        button.required = true;
        assert!(!button.is_required());
    }
}
