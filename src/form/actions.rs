use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{FieldId, FieldPatch, FieldType, FormStyle, FormType, SectionId};

use super::ops::{Direction, Locator};

/// One mutation request, as issued by a palette, a drag gesture or a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum FormCommand {
    #[serde(rename_all = "camelCase")]
    AddField {
        field_type: FieldType,
    },
    #[serde(rename_all = "camelCase")]
    AddFieldAt {
        field_type: FieldType,
        target: Locator,
    },
    #[serde(rename_all = "camelCase")]
    AddSection {
        columns: usize,
    },
    #[serde(rename_all = "camelCase")]
    RemoveField {
        section_id: SectionId,
        column_index: usize,
        field_id: FieldId,
    },
    #[serde(rename_all = "camelCase")]
    MoveField {
        section_id: SectionId,
        column_index: usize,
        field_id: FieldId,
        direction: Direction,
    },
    #[serde(rename_all = "camelCase")]
    MoveFieldAcross {
        source: Locator,
        destination: Locator,
    },
    #[serde(rename_all = "camelCase")]
    DuplicateField {
        section_id: SectionId,
        column_index: usize,
        field_id: FieldId,
    },
    #[serde(rename_all = "camelCase")]
    MoveSection {
        section_id: SectionId,
        direction: Direction,
    },
    #[serde(rename_all = "camelCase")]
    RemoveSection {
        section_id: SectionId,
    },
    #[serde(rename_all = "camelCase")]
    AdjustSectionColumns {
        section_id: SectionId,
        delta: i32,
    },
    #[serde(rename_all = "camelCase")]
    UpdateField {
        field_id: FieldId,
        patch: FieldPatch,
    },
    #[serde(rename_all = "camelCase")]
    RenameField {
        field_id: FieldId,
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    SetStyle {
        style: FormStyle,
    },
    #[serde(rename_all = "camelCase")]
    SetFormType {
        form_type: FormType,
    },
}

impl FormCommand {
    pub fn name(&self) -> &'static str {
        match self {
            FormCommand::AddField { .. } => "addField",
            FormCommand::AddFieldAt { .. } => "addFieldAt",
            FormCommand::AddSection { .. } => "addSection",
            FormCommand::RemoveField { .. } => "removeField",
            FormCommand::MoveField { .. } => "moveField",
            FormCommand::MoveFieldAcross { .. } => "moveFieldAcross",
            FormCommand::DuplicateField { .. } => "duplicateField",
            FormCommand::MoveSection { .. } => "moveSection",
            FormCommand::RemoveSection { .. } => "removeSection",
            FormCommand::AdjustSectionColumns { .. } => "adjustSectionColumns",
            FormCommand::UpdateField { .. } => "updateField",
            FormCommand::RenameField { .. } => "renameField",
            FormCommand::SetStyle { .. } => "setStyle",
            FormCommand::SetFormType { .. } => "setFormType",
        }
    }
}
