use tracing::trace;

use crate::domain::{FormConfig, IdGenerator, SequentialIds};

use super::{actions::FormCommand, ops};

/// Dispatches [`FormCommand`]s onto the pure operations, supplying ids from
/// the generator it owns.
#[derive(Debug, Clone, Default)]
pub struct FormEngine<G = SequentialIds> {
    ids: G,
}

impl<G: IdGenerator> FormEngine<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    pub fn ids_mut(&mut self) -> &mut G {
        &mut self.ids
    }

    pub fn dispatch(&mut self, config: &FormConfig, command: &FormCommand) -> FormConfig {
        trace!(command = command.name(), "dispatching form command");
        match command {
            FormCommand::AddField { field_type } => ops::add_field(config, *field_type, &mut self.ids),
            FormCommand::AddFieldAt { field_type, target } => {
                ops::add_field_at(config, *field_type, target, &mut self.ids)
            }
            FormCommand::AddSection { columns } => ops::add_section(config, *columns, &mut self.ids),
            FormCommand::RemoveField {
                section_id,
                column_index,
                field_id,
            } => ops::remove_field(config, section_id, *column_index, field_id),
            FormCommand::MoveField {
                section_id,
                column_index,
                field_id,
                direction,
            } => ops::move_field(config, section_id, *column_index, field_id, *direction),
            FormCommand::MoveFieldAcross {
                source,
                destination,
            } => ops::move_field_across(config, source, destination),
            FormCommand::DuplicateField {
                section_id,
                column_index,
                field_id,
            } => ops::duplicate_field(config, section_id, *column_index, field_id, &mut self.ids),
            FormCommand::MoveSection {
                section_id,
                direction,
            } => ops::move_section(config, section_id, *direction),
            FormCommand::RemoveSection { section_id } => ops::remove_section(config, section_id),
            FormCommand::AdjustSectionColumns { section_id, delta } => {
                ops::adjust_section_columns(config, section_id, *delta)
            }
            FormCommand::UpdateField { field_id, patch } => ops::update_field(config, field_id, patch),
            FormCommand::RenameField { field_id, name } => ops::rename_field(config, field_id, name),
            FormCommand::SetStyle { style } => ops::set_style(config, *style),
            FormCommand::SetFormType { form_type } => ops::set_form_type(config, *form_type),
        }
    }

    /// Fold a whole script of commands over `config`.
    pub fn apply_all<'c>(
        &mut self,
        config: &FormConfig,
        commands: impl IntoIterator<Item = &'c FormCommand>,
    ) -> FormConfig {
        commands
            .into_iter()
            .fold(config.clone(), |current, command| self.dispatch(&current, command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldId, FieldPatch, FieldType, SectionId};

    #[test]
    fn replays_scripts_deterministically() {
        let script = vec![
            FormCommand::AddSection { columns: 2 },
            FormCommand::AddField {
                field_type: FieldType::Text,
            },
            FormCommand::AddField {
                field_type: FieldType::Email,
            },
            FormCommand::UpdateField {
                field_id: FieldId::new("field-2"),
                patch: FieldPatch::new().with_label("Work email"),
            },
            FormCommand::AdjustSectionColumns {
                section_id: SectionId::new("section-1"),
                delta: -1,
            },
        ];
        let first = FormEngine::new(SequentialIds::new()).apply_all(&FormConfig::default(), &script);
        let second = FormEngine::new(SequentialIds::new()).apply_all(&FormConfig::default(), &script);
        assert_eq!(first, second);

        let section = &first.sections[0];
        assert_eq!(section.column_count(), 1);
        let labels: Vec<&str> = section.columns()[0].iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["Text", "Work email"]);
    }
}
