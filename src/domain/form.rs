use std::{collections::HashSet, fmt, str::FromStr, sync::Arc};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FormError;

use super::{
    field::{Field, FieldType},
    ids::{FieldId, SectionId, SequentialIds},
    section::Section,
};

/// Governs which field types the palette offers. The model itself accepts
/// any type regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    #[default]
    Basic,
    Advanced,
}

const BASIC_PALETTE: &[FieldType] = &[
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
];

impl FormType {
    pub fn palette(self) -> &'static [FieldType] {
        match self {
            FormType::Basic => BASIC_PALETTE,
            FormType::Advanced => &FieldType::ALL,
        }
    }

    pub fn offers(self, field_type: FieldType) -> bool {
        self.palette().contains(&field_type)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormType::Basic => "basic",
            FormType::Advanced => "advanced",
        }
    }
}

impl FromStr for FormType {
    type Err = FormError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(FormType::Basic),
            "advanced" => Ok(FormType::Advanced),
            _ => Err(FormError::InvalidFormType(raw.to_string())),
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output mode of the code generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormStyle {
    /// Utility classes inline, no stylesheet.
    #[default]
    Tailwind,
    /// Semantic `block__element--modifier` classes plus a stylesheet.
    Css,
    /// Same vocabulary as `Css`.
    Bem,
}

impl FormStyle {
    pub fn is_semantic(self) -> bool {
        matches!(self, FormStyle::Css | FormStyle::Bem)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormStyle::Tailwind => "tailwind",
            FormStyle::Css => "css",
            FormStyle::Bem => "bem",
        }
    }
}

impl FromStr for FormStyle {
    type Err = FormError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tailwind" => Ok(FormStyle::Tailwind),
            "css" => Ok(FormStyle::Css),
            "bem" => Ok(FormStyle::Bem),
            _ => Err(FormError::InvalidStyle(raw.to_string())),
        }
    }
}

impl fmt::Display for FormStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate root: the whole form being built.
///
/// Sections are shared behind `Arc`; mutations rebuild only the touched
/// section and keep the others pointer-identical to the previous snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    #[serde(default)]
    pub form_type: FormType,
    #[serde(default)]
    pub style: FormStyle,
    #[serde(rename = "fields", alias = "sections", default)]
    pub sections: Vec<Arc<Section>>,
}

impl FormConfig {
    pub fn new(form_type: FormType, style: FormStyle) -> Self {
        Self {
            form_type,
            style,
            sections: Vec::new(),
        }
    }

    /// Configuration holding a single empty one-column section.
    pub fn with_default_section(
        form_type: FormType,
        style: FormStyle,
        section_id: SectionId,
    ) -> Self {
        Self {
            form_type,
            style,
            sections: vec![Arc::new(Section::new(section_id, 1))],
        }
    }

    pub fn section(&self, section_id: &SectionId) -> Option<&Arc<Section>> {
        self.sections.iter().find(|section| section.id() == section_id)
    }

    pub fn section_index(&self, section_id: &SectionId) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.id() == section_id)
    }

    /// Every field in display order: sections, then columns, then fields.
    pub fn iter_fields(&self) -> impl Iterator<Item = &Arc<Field>> {
        self.sections.iter().flat_map(|section| section.iter_fields())
    }

    pub fn field(&self, field_id: &FieldId) -> Option<&Arc<Field>> {
        self.iter_fields().find(|field| &field.id == field_id)
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|section| section.field_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    pub fn field_names(&self) -> HashSet<&str> {
        self.iter_fields().map(|field| field.name.as_str()).collect()
    }

    pub fn has_field_type(&self, field_type: FieldType) -> bool {
        self.iter_fields()
            .any(|field| field.field_type() == field_type)
    }

    /// Field types in the configuration that its form type's palette would
    /// not have offered.
    pub fn off_palette_fields(&self) -> Vec<&Arc<Field>> {
        self.iter_fields()
            .filter(|field| !self.form_type.offers(field.field_type()))
            .collect()
    }

    /// Reject documents that reuse a section id, a field id or a field
    /// name. Mutations keep these unique; loaded documents may not.
    pub fn check_integrity(&self) -> Result<(), FormError> {
        let mut sections = HashSet::new();
        for section in &self.sections {
            if !sections.insert(section.id()) {
                return Err(FormError::DuplicateSectionId(section.id().to_string()));
            }
        }
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for field in self.iter_fields() {
            if !ids.insert(&field.id) {
                return Err(FormError::DuplicateFieldId(field.id.to_string()));
            }
            if !names.insert(field.name.as_str()) {
                return Err(FormError::DuplicateName(field.name.clone()));
            }
        }
        Ok(())
    }

    /// Counter-based generator that continues after the highest
    /// `field-N`/`section-N` id already present.
    pub fn sequential_ids(&self) -> SequentialIds {
        let fields = self
            .iter_fields()
            .filter_map(|field| numeric_suffix(field.id.as_str(), "field-"))
            .max()
            .unwrap_or(0);
        let sections = self
            .sections
            .iter()
            .filter_map(|section| numeric_suffix(section.id().as_str(), "section-"))
            .max()
            .unwrap_or(0);
        SequentialIds::starting_after(fields, sections)
    }
}

fn numeric_suffix(raw: &str, prefix: &str) -> Option<u64> {
    raw.strip_prefix(prefix)?.parse().ok()
}
