use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::score_table::ScoreTable;
use crate::usecase::ports::table_reader::{LoadError, TableReader};

pub struct CsvTableReader;

impl TableReader for CsvTableReader {
    fn read_table(&self, path: &Path) -> Result<ScoreTable, LoadError> {
        read_csv_table(path).map_err(LoadError::from)
    }
}

pub fn read_csv_table(csv_path: &Path) -> Result<ScoreTable> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    parse_csv_table(file)
        .with_context(|| format!("failed to parse csv: {}", csv_path.display()))
}

pub fn parse_csv_table<R: Read>(input: R) -> Result<ScoreTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader
        .headers()
        .context("failed to read csv header")?
        .clone();

    if headers.is_empty() || headers.iter().all(|name| name.trim().is_empty()) {
        anyhow::bail!("csv header is required")
    }

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                name.trim_start_matches('\u{feff}').to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let header_len = columns.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        if record.len() > header_len {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            anyhow::bail!(
                "expected {header_len} fields in line {line}, saw {}",
                record.len()
            );
        }
        let row = (0..header_len)
            .map(|col_idx| record.get(col_idx).unwrap_or("").to_string())
            .collect();
        rows.push(row);
    }

    Ok(ScoreTable::new(columns, rows))
}
