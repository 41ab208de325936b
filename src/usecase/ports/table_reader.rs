use std::path::Path;

use crate::domain::entities::score_table::ScoreTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Message(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<anyhow::Error> for LoadError {
    fn from(err: anyhow::Error) -> Self {
        LoadError::Message(format!("{err:#}"))
    }
}

/// Parses one uploaded file format into a score table.
pub trait TableReader: Send + Sync {
    fn read_table(&self, path: &Path) -> Result<ScoreTable, LoadError>;
}
