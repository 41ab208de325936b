use std::collections::{BTreeSet, HashMap};

use crate::domain::entities::score_table::ScoreTable;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub row_idx: usize,
    pub col_idx: usize,
    pub column: String,
}

/// Pending grid changes against the loaded table.
///
/// Row indices address the base table. Added rows live in their own list and
/// are edited in place, so their indices never collide with base rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedEdits {
    pub staged_cells: HashMap<CellKey, String>,
    pub deleted_rows: BTreeSet<usize>,
    pub added_rows: Vec<Vec<String>>,
}

impl StagedEdits {
    pub fn is_empty(&self) -> bool {
        self.staged_cells.is_empty() && self.deleted_rows.is_empty() && self.added_rows.is_empty()
    }

    pub fn apply_to(&self, base: &ScoreTable) -> ScoreTable {
        ScoreTable::new(
            base.columns.clone(),
            build_updated_rows(
                &base.columns,
                &base.rows,
                &self.staged_cells,
                &self.deleted_rows,
                &self.added_rows,
            ),
        )
    }
}

pub fn build_updated_rows(
    columns: &[String],
    rows: &[Vec<String>],
    staged_cells: &HashMap<CellKey, String>,
    deleted_rows: &BTreeSet<usize>,
    added_rows: &[Vec<String>],
) -> Vec<Vec<String>> {
    let mut updated = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        if deleted_rows.contains(&row_idx) {
            continue;
        }
        let mut next_row = row.clone();
        next_row.resize(columns.len(), String::new());
        for (col_idx, header) in columns.iter().enumerate() {
            if let Some(value) = staged_cells.get(&CellKey {
                row_idx,
                col_idx,
                column: header.clone(),
            }) {
                next_row[col_idx] = value.clone();
            }
        }
        updated.push(next_row);
    }
    for row in added_rows {
        let mut next_row = row.clone();
        next_row.resize(columns.len(), String::new());
        updated.push(next_row);
    }
    updated
}
