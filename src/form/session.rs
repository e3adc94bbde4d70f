use tracing::debug;

use crate::domain::{FormConfig, IdGenerator, SequentialIds};

use super::{actions::FormCommand, reducers::FormEngine};

const DEFAULT_HISTORY_LIMIT: usize = 100;

/// The one configuration a builder session owns, with undo/redo over the
/// snapshots the engine produces.
///
/// Snapshots share untouched sections, so keeping history is cheap.
#[derive(Debug, Clone)]
pub struct FormSession<G = SequentialIds> {
    engine: FormEngine<G>,
    current: FormConfig,
    undo: Vec<FormConfig>,
    redo: Vec<FormConfig>,
    history_limit: usize,
}

impl FormSession<SequentialIds> {
    /// Session continuing the counter ids already present in `config`.
    pub fn resume(config: FormConfig) -> Self {
        let ids = config.sequential_ids();
        Self::new(config, ids)
    }
}

impl<G: IdGenerator> FormSession<G> {
    pub fn new(config: FormConfig, ids: G) -> Self {
        Self {
            engine: FormEngine::new(ids),
            current: config,
            undo: Vec::new(),
            redo: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn config(&self) -> &FormConfig {
        &self.current
    }

    pub fn into_config(self) -> FormConfig {
        self.current
    }

    /// Apply one command. Returns `false` when the command was absorbed as a
    /// no-op; such commands leave the history untouched.
    pub fn apply(&mut self, command: &FormCommand) -> bool {
        let next = self.engine.dispatch(&self.current, command);
        if next == self.current {
            debug!(command = command.name(), "command left the form unchanged");
            return false;
        }
        let previous = std::mem::replace(&mut self.current, next);
        self.undo.push(previous);
        if self.undo.len() > self.history_limit {
            self.undo.remove(0);
        }
        self.redo.clear();
        true
    }

    /// Apply every command in order; returns how many changed the form.
    pub fn apply_all<'c>(&mut self, commands: impl IntoIterator<Item = &'c FormCommand>) -> usize {
        commands
            .into_iter()
            .filter(|command| self.apply(command))
            .count()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, previous);
        self.redo.push(current);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, next);
        self.undo.push(current);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldId, FieldType, SectionId};
    use crate::form::Direction;

    fn add(field_type: FieldType) -> FormCommand {
        FormCommand::AddField { field_type }
    }

    #[test]
    fn undo_and_redo_walk_snapshots() {
        let mut session = FormSession::resume(FormConfig::default());
        assert!(session.apply(&add(FieldType::Text)));
        assert!(session.apply(&add(FieldType::Email)));
        assert_eq!(session.config().field_count(), 2);

        assert!(session.undo());
        assert_eq!(session.config().field_count(), 1);
        assert!(session.redo());
        assert_eq!(session.config().field_count(), 2);
        assert!(!session.redo());
    }

    #[test]
    fn no_op_commands_are_not_recorded() {
        let mut session = FormSession::resume(FormConfig::default());
        session.apply(&add(FieldType::Text));
        let stale = FormCommand::MoveField {
            section_id: SectionId::new("section-1"),
            column_index: 0,
            field_id: FieldId::new("field-1"),
            direction: Direction::Up,
        };
        assert!(!session.apply(&stale));
        assert!(session.undo());
        assert!(!session.can_undo());
    }

    #[test]
    fn new_commands_clear_redo_and_respect_limit() {
        let mut session = FormSession::resume(FormConfig::default()).with_history_limit(2);
        let applied = session.apply_all(&[add(FieldType::Text), add(FieldType::Tel), add(FieldType::Date)]);
        assert_eq!(applied, 3);
        assert!(session.undo());
        assert!(session.can_redo());
        session.apply(&add(FieldType::File));
        assert!(!session.can_redo());
        assert!(session.undo());
        assert!(session.undo());
        assert!(!session.undo());
    }

    #[test]
    fn resume_continues_existing_ids() {
        let mut session = FormSession::resume(FormConfig::default());
        session.apply(&add(FieldType::Text));
        let mut resumed = FormSession::resume(session.into_config());
        resumed.apply(&add(FieldType::Text));
        let ids: Vec<&str> = resumed.config().iter_fields().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["field-1", "field-2"]);
    }
}
