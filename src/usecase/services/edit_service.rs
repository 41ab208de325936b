use std::collections::BTreeSet;

use crate::domain::entities::edit::{CellKey, StagedEdits};
use crate::domain::entities::score_table::ScoreTable;

/// Grid editor over a loaded table.
///
/// Display row indices cover the working table: surviving base rows first,
/// then added rows. Deleted base rows stay addressable through
/// [`EditService::base_row_count`] so the grid can offer to restore them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditService {
    base: ScoreTable,
    edits: StagedEdits,
}

impl EditService {
    pub fn new(base: ScoreTable) -> Self {
        Self {
            base,
            edits: StagedEdits::default(),
        }
    }

    pub fn base(&self) -> &ScoreTable {
        &self.base
    }

    pub fn base_row_count(&self) -> usize {
        self.base.row_count()
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.edits.is_empty()
    }

    pub fn working_table(&self) -> ScoreTable {
        self.edits.apply_to(&self.base)
    }

    /// Current value of a grid cell, addressed in grid coordinates
    /// (base rows, including deleted ones, followed by added rows).
    pub fn grid_value(&self, row_idx: usize, col_idx: usize) -> String {
        if let Some(added_idx) = row_idx.checked_sub(self.base_row_count()) {
            return self
                .edits
                .added_rows
                .get(added_idx)
                .and_then(|row| row.get(col_idx))
                .cloned()
                .unwrap_or_default();
        }
        let Some(column) = self.base.columns.get(col_idx) else {
            return String::new();
        };
        let key = CellKey {
            row_idx,
            col_idx,
            column: column.clone(),
        };
        self.edits
            .staged_cells
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.base.cell(row_idx, col_idx).to_string())
    }

    pub fn grid_row_count(&self) -> usize {
        self.base_row_count() + self.edits.added_rows.len()
    }

    pub fn is_deleted(&self, row_idx: usize) -> bool {
        self.edits.deleted_rows.contains(&row_idx)
    }

    pub fn is_added(&self, row_idx: usize) -> bool {
        row_idx >= self.base_row_count()
    }

    pub fn set_cell(&mut self, row_idx: usize, col_idx: usize, value: String) {
        let Some(column) = self.base.columns.get(col_idx).cloned() else {
            return;
        };
        let width = self.base.columns.len();
        if let Some(added_idx) = row_idx.checked_sub(self.base_row_count()) {
            if let Some(row) = self.edits.added_rows.get_mut(added_idx) {
                row.resize(width, String::new());
                row[col_idx] = value;
            }
            return;
        }
        let key = CellKey {
            row_idx,
            col_idx,
            column,
        };
        if self.base.cell(row_idx, col_idx) == value {
            self.edits.staged_cells.remove(&key);
        } else {
            self.edits.staged_cells.insert(key, value);
        }
    }

    pub fn add_row(&mut self) -> usize {
        self.edits
            .added_rows
            .push(vec![String::new(); self.base.columns.len()]);
        self.grid_row_count() - 1
    }

    /// Base rows are marked deleted; added rows are dropped outright.
    pub fn delete_rows(&mut self, rows: &BTreeSet<usize>) {
        let base_count = self.base_row_count();
        let mut added_to_remove: Vec<usize> = Vec::new();
        for &row_idx in rows {
            if row_idx < base_count {
                self.edits.deleted_rows.insert(row_idx);
            } else {
                added_to_remove.push(row_idx - base_count);
            }
        }
        for added_idx in added_to_remove.into_iter().rev() {
            if added_idx < self.edits.added_rows.len() {
                self.edits.added_rows.remove(added_idx);
            }
        }
    }

    pub fn restore_rows(&mut self, rows: &BTreeSet<usize>) {
        for row_idx in rows {
            self.edits.deleted_rows.remove(row_idx);
        }
    }

    pub fn reset(&mut self) {
        self.edits = StagedEdits::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::score_table::sample_table;

    #[test]
    fn set_cell_stages_value_and_clears_when_reverted() {
        let mut editor = EditService::new(sample_table());
        editor.set_cell(0, 3, "99".to_string());
        assert_eq!(editor.working_table().cell(0, 3), "99");
        assert!(editor.has_pending_changes());

        editor.set_cell(0, 3, "85".to_string());
        assert!(!editor.has_pending_changes());
    }

    #[test]
    fn added_rows_are_editable_and_appended() {
        let mut editor = EditService::new(sample_table());
        let row_idx = editor.add_row();
        assert_eq!(row_idx, 6);
        editor.set_cell(row_idx, 0, "王五".to_string());

        let table = editor.working_table();
        assert_eq!(table.row_count(), 7);
        assert_eq!(table.cell(6, 0), "王五");
        assert_eq!(editor.grid_value(6, 0), "王五");
    }

    #[test]
    fn delete_and_restore_rows() {
        let mut editor = EditService::new(sample_table());
        let added = editor.add_row();
        editor.delete_rows(&BTreeSet::from([0, 2, added]));

        let table = editor.working_table();
        assert_eq!(table.row_count(), 4);
        assert_eq!(editor.grid_row_count(), 6);
        assert!(editor.is_deleted(0));

        editor.restore_rows(&BTreeSet::from([0]));
        assert_eq!(editor.working_table().row_count(), 5);
    }

    #[test]
    fn reset_discards_all_edits() {
        let mut editor = EditService::new(sample_table());
        editor.set_cell(1, 3, "60".to_string());
        editor.add_row();
        editor.reset();
        assert_eq!(editor.working_table(), sample_table());
    }
}
