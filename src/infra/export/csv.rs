use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::score_table::ScoreTable;

pub fn write_csv_table(table: &ScoreTable, csv_path: &Path) -> Result<()> {
    if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    writer
        .write_record(&table.columns)
        .context("failed to write csv header")?;
    for row in &table.rows {
        writer
            .write_record(row)
            .context("failed to write csv record")?;
    }
    writer.flush().context("failed to flush csv")?;
    Ok(())
}
