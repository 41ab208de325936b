use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::entities::score_table::{format_numeric_value, ScoreTable};
use crate::usecase::ports::table_reader::{LoadError, TableReader};

pub struct WorkbookTableReader;

impl TableReader for WorkbookTableReader {
    fn read_table(&self, path: &Path) -> Result<ScoreTable, LoadError> {
        read_first_sheet(path).map_err(LoadError::from)
    }
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => format_numeric_value(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

pub fn read_first_sheet(workbook_path: &Path) -> Result<ScoreTable> {
    let mut workbook = open_workbook_auto(workbook_path)
        .with_context(|| format!("failed to open workbook: {}", workbook_path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("workbook has no sheets: {}", workbook_path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let mut cells: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();
    while cells
        .last()
        .is_some_and(|row| row.iter().all(|value| value.is_empty()))
    {
        cells.pop();
    }

    let mut cells = cells.into_iter();
    let columns: Vec<String> = cells
        .next()
        .filter(|header| header.iter().any(|name| !name.is_empty()))
        .ok_or_else(|| anyhow!("sheet {sheet_name} has no header row"))?;

    let header_len = columns.len();
    let rows = cells
        .map(|mut row| {
            row.resize(header_len, String::new());
            row
        })
        .collect();

    Ok(ScoreTable::new(columns, rows))
}
