//! Pure mutation operations over a [`FormConfig`].
//!
//! Every operation borrows the current configuration and returns the next
//! one. Targets that no longer exist and moves past a boundary are absorbed:
//! the input comes back unchanged and a `debug` event records why.

use std::{collections::HashSet, fmt, str::FromStr, sync::Arc};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    domain::{
        Column, Field, FieldId, FieldPatch, FieldType, FormConfig, FormStyle, FormType,
        IdGenerator, MAX_COLUMNS, MIN_COLUMNS, Section, SectionId,
    },
    error::FormError,
};

use super::naming::{normalize_name, unique_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn neighbour(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Up => index.checked_sub(1),
            Direction::Down => (index + 1 < len).then_some(index + 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown direction '{other}' (expected up or down)")),
        }
    }
}

/// Position of a field slot: `(section, column, index within column)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Locator {
    pub section_id: SectionId,
    pub column_index: usize,
    pub index: usize,
}

impl Locator {
    pub fn new(section_id: impl Into<SectionId>, column_index: usize, index: usize) -> Self {
        Self {
            section_id: section_id.into(),
            column_index,
            index,
        }
    }
}

/// Build a new field of `field_type` whose name is unique across `config`.
pub fn create_field(config: &FormConfig, field_type: FieldType, ids: &mut impl IdGenerator) -> Field {
    let name = unique_name(field_type.base_name(), &config.field_names());
    Field::new(ids.next_field_id(), name, field_type)
}

/// Append a field to the sparsest column of the last section, or to a new
/// one-column section when the form has none.
pub fn add_field(
    config: &FormConfig,
    field_type: FieldType,
    ids: &mut impl IdGenerator,
) -> FormConfig {
    let field = Arc::new(create_field(config, field_type, ids));
    let mut next = config.clone();
    match next.sections.last_mut() {
        Some(last) => {
            let mut section = Section::clone(last);
            let column = section.sparsest_column();
            trace!(op = "add_field", field = %field.id, section = %section.id(), column, "placed field");
            section.columns_mut()[column].push(field);
            *last = Arc::new(section);
        }
        None => {
            let section_id = ids.next_section_id();
            trace!(op = "add_field", field = %field.id, section = %section_id, "placed field in new section");
            let mut section = Section::new(section_id, 1);
            section.columns_mut()[0].push(field);
            next.sections.push(Arc::new(section));
        }
    }
    next
}

/// String entry point for palettes: unknown type names are rejected.
pub fn add_field_named(
    config: &FormConfig,
    field_type: &str,
    ids: &mut impl IdGenerator,
) -> Result<FormConfig, FormError> {
    let field_type = field_type.parse::<FieldType>()?;
    Ok(add_field(config, field_type, ids))
}

/// Drop a new field onto an explicit slot. The index is clamped to the
/// column length.
pub fn add_field_at(
    config: &FormConfig,
    field_type: FieldType,
    target: &Locator,
    ids: &mut impl IdGenerator,
) -> FormConfig {
    let valid_target = config
        .section(&target.section_id)
        .is_some_and(|section| target.column_index < section.column_count());
    if !valid_target {
        debug!(op = "add_field_at", section = %target.section_id, column = target.column_index, "drop target not found; ignoring");
        return config.clone();
    }
    let field = Arc::new(create_field(config, field_type, ids));
    edit_section(config, &target.section_id, "add_field_at", |section| {
        let column = section.columns_mut()[target.column_index].fields_mut();
        let index = target.index.min(column.len());
        column.insert(index, field);
        true
    })
}

/// Append an empty section with `columns` clamped into 1..=4.
pub fn add_section(config: &FormConfig, columns: usize, ids: &mut impl IdGenerator) -> FormConfig {
    let section = Section::new(ids.next_section_id(), columns);
    trace!(op = "add_section", section = %section.id(), columns = section.column_count(), "appended section");
    let mut next = config.clone();
    next.sections.push(Arc::new(section));
    next
}

pub fn remove_field(
    config: &FormConfig,
    section_id: &SectionId,
    column_index: usize,
    field_id: &FieldId,
) -> FormConfig {
    edit_section(config, section_id, "remove_field", |section| {
        let Some(column) = section.columns_mut().get_mut(column_index) else {
            debug!(op = "remove_field", column = column_index, "column not found; ignoring");
            return false;
        };
        let Some(index) = column.position(field_id) else {
            debug!(op = "remove_field", field = %field_id, "field not found; ignoring");
            return false;
        };
        column.fields_mut().remove(index);
        true
    })
}

/// Swap a field with its neighbour in the same column.
pub fn move_field(
    config: &FormConfig,
    section_id: &SectionId,
    column_index: usize,
    field_id: &FieldId,
    direction: Direction,
) -> FormConfig {
    edit_section(config, section_id, "move_field", |section| {
        let Some(column) = section.columns_mut().get_mut(column_index) else {
            debug!(op = "move_field", column = column_index, "column not found; ignoring");
            return false;
        };
        let Some(index) = column.position(field_id) else {
            debug!(op = "move_field", field = %field_id, "field not found; ignoring");
            return false;
        };
        let Some(target) = direction.neighbour(index, column.len()) else {
            debug!(op = "move_field", field = %field_id, %direction, "field already at boundary");
            return false;
        };
        column.fields_mut().swap(index, target);
        true
    })
}

/// Take the field at `source` and insert it at `destination`. The
/// destination index addresses the column after the source slot has been
/// vacated, and is clamped to that column's length.
pub fn move_field_across(config: &FormConfig, source: &Locator, destination: &Locator) -> FormConfig {
    let source_ok = config.section(&source.section_id).is_some_and(|section| {
        section
            .column(source.column_index)
            .is_some_and(|column| source.index < column.len())
    });
    let destination_ok = config
        .section(&destination.section_id)
        .is_some_and(|section| destination.column_index < section.column_count());
    if !source_ok || !destination_ok {
        debug!(op = "move_field_across", source = ?source, destination = ?destination, "locator not found; ignoring");
        return config.clone();
    }
    if source == destination {
        return config.clone();
    }

    if source.section_id == destination.section_id {
        return edit_section(config, &source.section_id, "move_field_across", |section| {
            let columns = section.columns_mut();
            let field = columns[source.column_index]
                .fields_mut()
                .remove(source.index);
            let target = columns[destination.column_index].fields_mut();
            let index = destination.index.min(target.len());
            target.insert(index, field);
            true
        });
    }

    let (Some(src_idx), Some(dst_idx)) = (
        config.section_index(&source.section_id),
        config.section_index(&destination.section_id),
    ) else {
        return config.clone();
    };
    let mut from = Section::clone(&config.sections[src_idx]);
    let mut to = Section::clone(&config.sections[dst_idx]);
    let field = from.columns_mut()[source.column_index]
        .fields_mut()
        .remove(source.index);
    let field_id = field.id.clone();
    let target = to.columns_mut()[destination.column_index].fields_mut();
    let index = destination.index.min(target.len());
    target.insert(index, field);
    trace!(op = "move_field_across", field = %field_id, from = %from.id(), to = %to.id(), index, "moved field");

    let mut next = config.clone();
    next.sections[src_idx] = Arc::new(from);
    next.sections[dst_idx] = Arc::new(to);
    next
}

/// Insert a copy right after the original. The copy gets a fresh id and a
/// name that is unique across the form.
pub fn duplicate_field(
    config: &FormConfig,
    section_id: &SectionId,
    column_index: usize,
    field_id: &FieldId,
    ids: &mut impl IdGenerator,
) -> FormConfig {
    let Some(original) = config
        .section(section_id)
        .and_then(|section| section.column(column_index))
        .and_then(|column| column.iter().find(|field| &field.id == field_id))
    else {
        debug!(op = "duplicate_field", section = %section_id, column = column_index, field = %field_id, "field not found; ignoring");
        return config.clone();
    };
    let mut copy = Field::clone(original);
    copy.id = ids.next_field_id();
    copy.name = unique_name(&original.name, &config.field_names());
    let copy = Arc::new(copy);

    edit_section(config, section_id, "duplicate_field", |section| {
        let column = &mut section.columns_mut()[column_index];
        let Some(index) = column.position(field_id) else {
            return false;
        };
        column.fields_mut().insert(index + 1, copy);
        true
    })
}

/// Swap a section with its neighbour in the top-level list.
pub fn move_section(config: &FormConfig, section_id: &SectionId, direction: Direction) -> FormConfig {
    let Some(index) = config.section_index(section_id) else {
        debug!(op = "move_section", section = %section_id, "section not found; ignoring");
        return config.clone();
    };
    let Some(target) = direction.neighbour(index, config.sections.len()) else {
        debug!(op = "move_section", section = %section_id, %direction, "section already at boundary");
        return config.clone();
    };
    let mut next = config.clone();
    next.sections.swap(index, target);
    next
}

pub fn remove_section(config: &FormConfig, section_id: &SectionId) -> FormConfig {
    let Some(index) = config.section_index(section_id) else {
        debug!(op = "remove_section", section = %section_id, "section not found; ignoring");
        return config.clone();
    };
    let mut next = config.clone();
    let removed = next.sections.remove(index);
    trace!(op = "remove_section", section = %section_id, fields = removed.field_count(), "removed section");
    next
}

/// Change a section's column count by `delta`, clamped into 1..=4.
///
/// Growing appends empty columns. Shrinking deals the fields of the dropped
/// columns, in column-major order, round-robin onto the remaining columns.
pub fn adjust_section_columns(config: &FormConfig, section_id: &SectionId, delta: i32) -> FormConfig {
    edit_section(config, section_id, "adjust_section_columns", |section| {
        let current = section.column_count();
        let wanted = (current as i64 + i64::from(delta)).clamp(MIN_COLUMNS as i64, MAX_COLUMNS as i64)
            as usize;
        if wanted == current {
            debug!(op = "adjust_section_columns", section = %section.id(), current, delta, "column count unchanged");
            return false;
        }
        let columns = section.columns_mut();
        if wanted > current {
            columns.resize_with(wanted, Column::new);
        } else {
            let displaced: Vec<Arc<Field>> = columns
                .split_off(wanted)
                .into_iter()
                .flat_map(Column::into_fields)
                .collect();
            for (idx, field) in displaced.into_iter().enumerate() {
                columns[idx % wanted].push(field);
            }
        }
        debug_assert_eq!(columns.len(), wanted, "section column invariant violated");
        trace!(op = "adjust_section_columns", from = current, to = wanted, "resized section");
        true
    })
}

/// Shallow-merge `patch` into the field with `field_id`, wherever it sits.
/// A `name` in the patch is normalized and suffixed to stay unique.
pub fn update_field(config: &FormConfig, field_id: &FieldId, patch: &FieldPatch) -> FormConfig {
    let Some((section_idx, column_idx, field_idx)) = locate_field(config, field_id) else {
        debug!(op = "update_field", field = %field_id, "field not found; ignoring");
        return config.clone();
    };
    let section = &config.sections[section_idx];
    let original = &section.columns()[column_idx][field_idx];
    let mut updated = original.merged(patch);
    if let Some(raw) = &patch.name {
        let taken: HashSet<&str> = config
            .iter_fields()
            .filter(|field| &field.id != field_id)
            .map(|field| field.name.as_str())
            .collect();
        let normalized = normalize_name(raw, original.field_type().base_name());
        updated.name = unique_name(&normalized, &taken);
    }
    if &updated == original.as_ref() {
        return config.clone();
    }

    let mut section = Section::clone(section);
    section.columns_mut()[column_idx].fields_mut()[field_idx] = Arc::new(updated);
    let mut next = config.clone();
    next.sections[section_idx] = Arc::new(section);
    next
}

pub fn rename_field(config: &FormConfig, field_id: &FieldId, name: &str) -> FormConfig {
    update_field(config, field_id, &FieldPatch::new().with_name(name))
}

pub fn set_style(config: &FormConfig, style: FormStyle) -> FormConfig {
    FormConfig {
        style,
        ..config.clone()
    }
}

pub fn set_form_type(config: &FormConfig, form_type: FormType) -> FormConfig {
    FormConfig {
        form_type,
        ..config.clone()
    }
}

fn locate_field(config: &FormConfig, field_id: &FieldId) -> Option<(usize, usize, usize)> {
    config
        .sections
        .iter()
        .enumerate()
        .find_map(|(idx, section)| section.locate(field_id).map(|(col, pos)| (idx, col, pos)))
}

/// Copy-on-write edit of one section. `edit` returns whether it changed
/// anything; when it did not, the input configuration is returned as is.
fn edit_section<F>(config: &FormConfig, section_id: &SectionId, op: &'static str, edit: F) -> FormConfig
where
    F: FnOnce(&mut Section) -> bool,
{
    let Some(index) = config.section_index(section_id) else {
        debug!(op, section = %section_id, "section not found; ignoring");
        return config.clone();
    };
    let mut section = Section::clone(&config.sections[index]);
    if !edit(&mut section) {
        return config.clone();
    }
    let mut next = config.clone();
    next.sections[index] = Arc::new(section);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldKind, SequentialIds};

    fn ids_of(column: &Column) -> Vec<&str> {
        column.iter().map(|field| field.id.as_str()).collect()
    }

    fn sid(raw: &str) -> SectionId {
        SectionId::new(raw)
    }

    fn fid(raw: &str) -> FieldId {
        FieldId::new(raw)
    }

    /// One section (`section-1`) with `columns` columns, then `count` text
    /// fields added through the normal placement policy.
    fn seeded(columns: usize, count: usize) -> (FormConfig, SequentialIds) {
        let mut ids = SequentialIds::new();
        let mut config = add_section(&FormConfig::default(), columns, &mut ids);
        for _ in 0..count {
            config = add_field(&config, FieldType::Text, &mut ids);
        }
        (config, ids)
    }

    #[test]
    fn add_field_creates_section_when_form_is_empty() {
        let mut ids = SequentialIds::new();
        let config = add_field(&FormConfig::default(), FieldType::Email, &mut ids);
        assert_eq!(config.sections.len(), 1);
        let section = &config.sections[0];
        assert_eq!(section.column_count(), 1);
        assert_eq!(section.columns()[0][0].name, "email");
        assert_eq!(section.columns()[0][0].label, "Email");
    }

    #[test]
    fn add_field_fills_sparsest_column_of_last_section() {
        let (config, _) = seeded(3, 4);
        let section = &config.sections[0];
        assert_eq!(ids_of(&section.columns()[0]), ["field-1", "field-4"]);
        assert_eq!(ids_of(&section.columns()[1]), ["field-2"]);
        assert_eq!(ids_of(&section.columns()[2]), ["field-3"]);
    }

    #[test]
    fn add_field_suffixes_colliding_names() {
        let (config, _) = seeded(1, 3);
        let names: Vec<&str> = config.iter_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["text", "text_1", "text_2"]);
    }

    #[test]
    fn add_field_named_rejects_unknown_types() {
        let mut ids = SequentialIds::new();
        let err = add_field_named(&FormConfig::default(), "signature", &mut ids).unwrap_err();
        assert_eq!(err, FormError::InvalidFieldType("signature".to_string()));
        let ok = add_field_named(&FormConfig::default(), "slider", &mut ids).unwrap();
        assert!(matches!(ok.sections[0].columns()[0][0].kind, FieldKind::Slider(_)));
    }

    #[test]
    fn add_field_at_inserts_into_target_slot() {
        let (config, mut ids) = seeded(2, 2);
        let next = add_field_at(
            &config,
            FieldType::Date,
            &Locator::new("section-1", 1, 0),
            &mut ids,
        );
        assert_eq!(ids_of(&next.sections[0].columns()[1]), ["field-3", "field-2"]);

        let missing = add_field_at(&config, FieldType::Date, &Locator::new("nope", 0, 0), &mut ids);
        assert_eq!(missing, config);
    }

    #[test]
    fn add_section_clamps_columns() {
        let mut ids = SequentialIds::new();
        let config = add_section(&FormConfig::default(), 7, &mut ids);
        let config = add_section(&config, 0, &mut ids);
        assert_eq!(config.sections[0].column_count(), 4);
        assert_eq!(config.sections[1].column_count(), 1);
    }

    #[test]
    fn remove_field_ignores_unknown_targets() {
        let (config, _) = seeded(2, 2);
        assert_eq!(remove_field(&config, &sid("section-1"), 0, &fid("field-2")), config);
        assert_eq!(remove_field(&config, &sid("section-9"), 0, &fid("field-1")), config);
        assert_eq!(remove_field(&config, &sid("section-1"), 5, &fid("field-1")), config);

        let next = remove_field(&config, &sid("section-1"), 1, &fid("field-2"));
        assert_eq!(next.field_count(), 1);
        assert_eq!(next.sections[0].column_count(), 2);
    }

    #[test]
    fn move_field_swaps_neighbours_and_stops_at_boundaries() {
        let (config, _) = seeded(1, 3);
        let section = sid("section-1");
        let down = move_field(&config, &section, 0, &fid("field-1"), Direction::Down);
        assert_eq!(ids_of(&down.sections[0].columns()[0]), ["field-2", "field-1", "field-3"]);
        assert_eq!(move_field(&config, &section, 0, &fid("field-1"), Direction::Up), config);
        assert_eq!(move_field(&config, &section, 0, &fid("field-3"), Direction::Down), config);
    }

    #[test]
    fn move_field_across_reorders_within_a_column() {
        let (config, _) = seeded(1, 3);
        let next = move_field_across(
            &config,
            &Locator::new("section-1", 0, 0),
            &Locator::new("section-1", 0, 2),
        );
        assert_eq!(ids_of(&next.sections[0].columns()[0]), ["field-2", "field-3", "field-1"]);
    }

    #[test]
    fn move_field_across_moves_between_sections() {
        let (config, mut ids) = seeded(2, 2);
        let config = add_section(&config, 1, &mut ids);
        let next = move_field_across(
            &config,
            &Locator::new("section-1", 1, 0),
            &Locator::new("section-2", 0, 10),
        );
        assert_eq!(next.field_count(), 2);
        assert!(next.sections[0].columns()[1].is_empty());
        assert_eq!(ids_of(&next.sections[1].columns()[0]), ["field-2"]);
    }

    #[test]
    fn move_field_across_rejects_stale_locators() {
        let (config, _) = seeded(2, 2);
        let stale_source = move_field_across(
            &config,
            &Locator::new("section-1", 0, 4),
            &Locator::new("section-1", 1, 0),
        );
        assert_eq!(stale_source, config);
        let stale_destination = move_field_across(
            &config,
            &Locator::new("section-1", 0, 0),
            &Locator::new("section-1", 3, 0),
        );
        assert_eq!(stale_destination, config);
    }

    #[test]
    fn duplicate_field_inserts_copy_after_original() {
        let (config, mut ids) = seeded(1, 2);
        let next = duplicate_field(&config, &sid("section-1"), 0, &fid("field-1"), &mut ids);
        let column = &next.sections[0].columns()[0];
        assert_eq!(ids_of(column), ["field-1", "field-3", "field-2"]);
        assert_eq!(column[1].label, column[0].label);
        assert_eq!(column[1].kind, column[0].kind);
        assert_eq!(column[1].name, "text_2");
    }

    #[test]
    fn move_and_remove_sections() {
        let mut ids = SequentialIds::new();
        let config = add_section(&FormConfig::default(), 1, &mut ids);
        let config = add_section(&config, 2, &mut ids);
        let moved = move_section(&config, &sid("section-2"), Direction::Up);
        assert_eq!(moved.sections[0].id().as_str(), "section-2");
        assert_eq!(move_section(&config, &sid("section-1"), Direction::Up), config);
        assert_eq!(move_section(&config, &sid("section-2"), Direction::Down), config);

        let removed = remove_section(&config, &sid("section-1"));
        assert_eq!(removed.sections.len(), 1);
        assert_eq!(remove_section(&config, &sid("section-7")), config);
    }

    #[test]
    fn shrinking_columns_redistributes_round_robin() {
        let mut ids = SequentialIds::new();
        let config = add_section(&FormConfig::default(), 4, &mut ids);
        let config = (0..6).fold(config, |config, _| add_field(&config, FieldType::Text, &mut ids));
        // columns: [1,5] [2,6] [3] [4]
        let next = adjust_section_columns(&config, &sid("section-1"), -3);
        let section = &next.sections[0];
        assert_eq!(section.column_count(), 1);
        assert_eq!(
            ids_of(&section.columns()[0]),
            ["field-1", "field-5", "field-2", "field-6", "field-3", "field-4"]
        );
    }

    #[test]
    fn growing_columns_appends_empty_ones_and_clamps() {
        let (config, _) = seeded(3, 3);
        let next = adjust_section_columns(&config, &sid("section-1"), 5);
        assert_eq!(next.sections[0].column_count(), 4);
        assert!(next.sections[0].columns()[3].is_empty());
        assert_eq!(next.field_count(), 3);
        assert_eq!(adjust_section_columns(&next, &sid("section-1"), 1), next);
    }

    #[test]
    fn update_field_merges_patch_wherever_field_lives() {
        let (config, mut ids) = seeded(2, 2);
        let config = add_section(&config, 1, &mut ids);
        let config = add_field(&config, FieldType::Select, &mut ids);
        let patch = FieldPatch::new().with_label("Country").with_required(true);
        let next = update_field(&config, &fid("field-3"), &patch);
        let field = next.field(&fid("field-3")).unwrap();
        assert_eq!(field.label, "Country");
        assert!(field.required);
        assert!(Arc::ptr_eq(&config.sections[0], &next.sections[0]));
        assert_eq!(update_field(&config, &fid("missing"), &patch), config);
    }

    #[test]
    fn rename_keeps_names_unique() {
        let (config, _) = seeded(1, 2);
        let next = rename_field(&config, &fid("field-2"), "text");
        assert_eq!(next.field(&fid("field-2")).unwrap().name, "text_1");
        let next = rename_field(&config, &fid("field-2"), "Full name");
        assert_eq!(next.field(&fid("field-2")).unwrap().name, "Full_name");
        assert_eq!(rename_field(&config, &fid("field-1"), "text"), config);
    }

    #[test]
    fn untouched_sections_stay_shared() {
        let (config, mut ids) = seeded(1, 1);
        let config = add_section(&config, 2, &mut ids);
        let next = add_field(&config, FieldType::Tel, &mut ids);
        assert!(Arc::ptr_eq(&config.sections[0], &next.sections[0]));
        assert!(!Arc::ptr_eq(&config.sections[1], &next.sections[1]));
        assert_eq!(config.sections[1].field_count(), 0);
    }

    #[test]
    fn form_level_settings() {
        let config = FormConfig::default();
        assert_eq!(set_style(&config, FormStyle::Css).style, FormStyle::Css);
        assert_eq!(
            set_form_type(&config, FormType::Advanced).form_type,
            FormType::Advanced
        );
    }
}
