use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::score_table::sample_table;
use crate::domain::entities::source::{DataSource, LoadOutcome};
use crate::usecase::ports::table_reader::{LoadError, TableReader};

pub struct LoadService {
    csv_reader: Arc<dyn TableReader>,
    workbook_reader: Arc<dyn TableReader>,
}

impl LoadService {
    pub fn new(csv_reader: Arc<dyn TableReader>, workbook_reader: Arc<dyn TableReader>) -> Self {
        Self {
            csv_reader,
            workbook_reader,
        }
    }

    pub fn sample(&self) -> LoadOutcome {
        let table = sample_table();
        info!(rows = table.row_count(), "using sample score table");
        LoadOutcome {
            source: DataSource::Sample,
            table,
        }
    }

    /// Loads the uploaded file, or the sample table when nothing was uploaded.
    pub fn load(&self, upload: Option<&Path>) -> Result<LoadOutcome, LoadError> {
        let Some(path) = upload else {
            return Ok(self.sample());
        };

        let reader = if is_csv_path(path) {
            &self.csv_reader
        } else {
            &self.workbook_reader
        };

        match reader.read_table(path) {
            Ok(table) => {
                info!(
                    path = %path.display(),
                    rows = table.row_count(),
                    columns = table.columns.len(),
                    "loaded uploaded score table"
                );
                Ok(LoadOutcome {
                    source: DataSource::from_path(path),
                    table,
                })
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load uploaded file");
                Err(err)
            }
        }
    }
}

pub fn is_csv_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_ascii_lowercase().ends_with(".csv"))
        .unwrap_or(false)
}

/// User-facing message for a failed upload.
pub fn load_error_message(err: &LoadError) -> String {
    format!("文件读取失败: {err}")
}
