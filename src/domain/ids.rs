use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a field, stable for the field's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FieldId(String);

/// Opaque identifier of a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SectionId(String);

macro_rules! opaque_id {
    ($ty:ident) => {
        impl $ty {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

opaque_id!(FieldId);
opaque_id!(SectionId);

/// Source of fresh identifiers, injected into the mutation engine.
pub trait IdGenerator {
    fn next_field_id(&mut self) -> FieldId;
    fn next_section_id(&mut self) -> SectionId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_field_id(&mut self) -> FieldId {
        (**self).next_field_id()
    }

    fn next_section_id(&mut self) -> SectionId {
        (**self).next_section_id()
    }
}

/// Deterministic counter-based ids: `field-1`, `field-2`, `section-1`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    fields: u64,
    sections: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume numbering after the given counters, e.g. when a loaded
    /// configuration already uses `field-1..=field-n`.
    pub fn starting_after(fields: u64, sections: u64) -> Self {
        Self { fields, sections }
    }
}

impl IdGenerator for SequentialIds {
    fn next_field_id(&mut self) -> FieldId {
        self.fields += 1;
        FieldId(format!("field-{}", self.fields))
    }

    fn next_section_id(&mut self) -> SectionId {
        self.sections += 1;
        SectionId(format!("section-{}", self.sections))
    }
}

/// Random UUID v4 ids for sessions that never need reproducible output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_field_id(&mut self) -> FieldId {
        FieldId(format!("field_{}", Uuid::new_v4().simple()))
    }

    fn next_section_id(&mut self) -> SectionId {
        SectionId(format!("section_{}", Uuid::new_v4().simple()))
    }
}
