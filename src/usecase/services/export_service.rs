use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

use crate::domain::entities::score_table::ScoreTable;
use crate::infra::export::csv::write_csv_table;

pub struct ExportService;

impl ExportService {
    pub fn export_csv(&self, table: &ScoreTable, path: &Path) -> Result<()> {
        write_csv_table(table, path)?;
        info!(path = %path.display(), rows = table.row_count(), "exported score table");
        Ok(())
    }
}

pub fn default_export_file_name() -> String {
    export_file_name_for(Local::now().date_naive())
}

pub fn export_file_name_for(date: NaiveDate) -> String {
    format!("成绩单_{:02}{:02}.csv", date.month(), date.day())
}
