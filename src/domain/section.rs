use std::{ops::Deref, sync::Arc};

use schemars::{JsonSchema, r#gen::SchemaGenerator, schema::Schema};
use serde::{Deserialize, Serialize};

use crate::error::FormError;

use super::{
    field::Field,
    ids::{FieldId, SectionId},
};

pub const MIN_COLUMNS: usize = 1;
pub const MAX_COLUMNS: usize = 4;

/// Ordered fields of one column; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Column {
    fields: Vec<Arc<Field>>,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn position(&self, field_id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|field| &field.id == field_id)
    }

    pub fn fields(&self) -> &[Arc<Field>] {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Vec<Arc<Field>> {
        &mut self.fields
    }

    pub(crate) fn into_fields(self) -> Vec<Arc<Field>> {
        self.fields
    }

    pub(crate) fn push(&mut self, field: Arc<Field>) {
        self.fields.push(field);
    }
}

impl Deref for Column {
    type Target = [Arc<Field>];

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl FromIterator<Arc<Field>> for Column {
    fn from_iter<T: IntoIterator<Item = Arc<Field>>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A horizontal group of 1..=4 columns.
///
/// The column count is the number of stored columns, so the serialized
/// `columns` attribute and the `fields` grid can never disagree in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectionDocument", into = "SectionDocument")]
pub struct Section {
    id: SectionId,
    columns: Vec<Column>,
}

impl Section {
    /// Empty section with `columns` clamped into 1..=4.
    pub fn new(id: SectionId, columns: usize) -> Self {
        let count = clamp_columns(columns);
        Self {
            id,
            columns: vec![Column::new(); count],
        }
    }

    pub fn from_columns(id: SectionId, columns: Vec<Column>) -> Result<Self, FormError> {
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns.len()) {
            return Err(FormError::ColumnCount {
                section: id.to_string(),
                columns: columns.len(),
            });
        }
        Ok(Self { id, columns })
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }

    pub fn field_count(&self) -> usize {
        self.columns.iter().map(|column| column.len()).sum()
    }

    /// Fields in column-major order: all of column 0, then column 1, ...
    pub fn iter_fields(&self) -> impl Iterator<Item = &Arc<Field>> {
        self.columns.iter().flat_map(|column| column.iter())
    }

    /// Index of the column holding the fewest fields; ties go to the
    /// lowest index.
    pub fn sparsest_column(&self) -> usize {
        self.columns
            .iter()
            .enumerate()
            .min_by_key(|(idx, column)| (column.len(), *idx))
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    pub fn locate(&self, field_id: &FieldId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(col, column)| column.position(field_id).map(|idx| (col, idx)))
    }
}

pub fn clamp_columns(columns: usize) -> usize {
    columns.clamp(MIN_COLUMNS, MAX_COLUMNS)
}

/// Wire shape of a section: `{ id, columns, fields: [[...], ...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "Section")]
struct SectionDocument {
    id: SectionId,
    #[schemars(range(min = 1, max = 4))]
    columns: usize,
    fields: Vec<Column>,
}

impl TryFrom<SectionDocument> for Section {
    type Error = FormError;

    fn try_from(doc: SectionDocument) -> Result<Self, Self::Error> {
        if doc.fields.len() != doc.columns {
            return Err(FormError::ColumnMismatch {
                section: doc.id.to_string(),
                declared: doc.columns,
                actual: doc.fields.len(),
            });
        }
        Section::from_columns(doc.id, doc.fields)
    }
}

impl From<Section> for SectionDocument {
    fn from(section: Section) -> Self {
        SectionDocument {
            columns: section.columns.len(),
            id: section.id,
            fields: section.columns,
        }
    }
}

impl JsonSchema for Section {
    fn schema_name() -> String {
        SectionDocument::schema_name()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        SectionDocument::json_schema(generator)
    }
}
