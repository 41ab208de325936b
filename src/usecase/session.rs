use crate::domain::entities::score_table::ScoreTable;
use crate::domain::entities::source::{DataSource, LoadOutcome};
use crate::usecase::services::edit_service::EditService;

/// Per-window working state: where the table came from and the edits made to
/// it since. Replaced wholesale on every successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    source: DataSource,
    editor: EditService,
}

impl Session {
    pub fn new(outcome: LoadOutcome) -> Self {
        Self {
            source: outcome.source,
            editor: EditService::new(outcome.table),
        }
    }

    pub fn replace(&mut self, outcome: LoadOutcome) {
        *self = Self::new(outcome);
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn notice(&self) -> String {
        self.source.notice()
    }

    pub fn editor(&self) -> &EditService {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditService {
        &mut self.editor
    }

    pub fn working_table(&self) -> ScoreTable {
        self.editor.working_table()
    }
}
