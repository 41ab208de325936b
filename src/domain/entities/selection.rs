use crate::domain::entities::score_table::{ScoreTable, STUDENT_COLUMN, SUBJECT_COLUMN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    MissingColumn(String),
    NoOptions(String),
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::MissingColumn(column) => {
                write!(f, "数据表缺少“{column}”列，无法生成筛选选项")
            }
            SelectionError::NoOptions(column) => {
                write!(f, "“{column}”列没有任何数据，请先添加记录")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Selector choices derived from the working table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOptions {
    pub students: Vec<String>,
    pub subjects: Vec<String>,
}

impl SelectionOptions {
    pub fn from_table(table: &ScoreTable) -> Result<Self, SelectionError> {
        let students = distinct_column(table, STUDENT_COLUMN)?;
        let subjects = distinct_column(table, SUBJECT_COLUMN)?;
        Ok(Self { students, subjects })
    }
}

fn distinct_column(table: &ScoreTable, column: &str) -> Result<Vec<String>, SelectionError> {
    let col_idx = table
        .column_index(column)
        .ok_or_else(|| SelectionError::MissingColumn(column.to_string()))?;
    let values = table.distinct_values(col_idx);
    if values.is_empty() {
        return Err(SelectionError::NoOptions(column.to_string()));
    }
    Ok(values)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub student: String,
    pub subjects: Vec<String>,
}

impl Selection {
    pub fn default_for(options: &SelectionOptions) -> Self {
        Self {
            student: options.students.first().cloned().unwrap_or_default(),
            subjects: options.subjects.iter().take(1).cloned().collect(),
        }
    }

    /// Carries a previous selection over to freshly derived options.
    pub fn reconcile(previous: Option<&Selection>, options: &SelectionOptions) -> Self {
        let Some(previous) = previous else {
            return Self::default_for(options);
        };

        let student = if options.students.contains(&previous.student) {
            previous.student.clone()
        } else {
            options.students.first().cloned().unwrap_or_default()
        };

        let surviving: Vec<String> = previous
            .subjects
            .iter()
            .filter(|subject| options.subjects.contains(subject))
            .cloned()
            .collect();
        let subjects = if surviving.is_empty() && !previous.subjects.is_empty() {
            options.subjects.iter().take(1).cloned().collect()
        } else {
            surviving
        };

        Self { student, subjects }
    }

    pub fn select_student(&mut self, student: &str) {
        self.student = student.to_string();
    }

    pub fn toggle_subject(&mut self, subject: &str) {
        if let Some(pos) = self.subjects.iter().position(|s| s == subject) {
            self.subjects.remove(pos);
        } else {
            self.subjects.push(subject.to_string());
        }
    }

    pub fn set_subjects(&mut self, subjects: Vec<String>) {
        self.subjects = subjects;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(students: &[&str], subjects: &[&str]) -> SelectionOptions {
        SelectionOptions {
            students: students.iter().map(|s| s.to_string()).collect(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn default_picks_first_student_and_first_subject() {
        let selection = Selection::default_for(&options(&["张三", "李四"], &["数学", "语文"]));
        assert_eq!(selection.student, "张三");
        assert_eq!(selection.subjects, vec!["数学".to_string()]);
    }

    #[test]
    fn reconcile_keeps_existing_choices() {
        let previous = Selection {
            student: "李四".to_string(),
            subjects: vec!["语文".to_string(), "英语".to_string()],
        };
        let next = Selection::reconcile(
            Some(&previous),
            &options(&["张三", "李四"], &["数学", "语文"]),
        );
        assert_eq!(next.student, "李四");
        assert_eq!(next.subjects, vec!["语文".to_string()]);
    }

    #[test]
    fn reconcile_falls_back_when_choices_vanish() {
        let previous = Selection {
            student: "王五".to_string(),
            subjects: vec!["物理".to_string()],
        };
        let next = Selection::reconcile(Some(&previous), &options(&["张三"], &["数学", "语文"]));
        assert_eq!(next.student, "张三");
        assert_eq!(next.subjects, vec!["数学".to_string()]);
    }

    #[test]
    fn reconcile_keeps_explicitly_empty_subjects() {
        let previous = Selection {
            student: "张三".to_string(),
            subjects: Vec::new(),
        };
        let next = Selection::reconcile(Some(&previous), &options(&["张三"], &["数学"]));
        assert!(next.subjects.is_empty());
    }

    #[test]
    fn toggle_subject_adds_then_removes() {
        let mut selection = Selection::default_for(&options(&["张三"], &["数学", "语文"]));
        selection.toggle_subject("语文");
        assert_eq!(selection.subjects, vec!["数学".to_string(), "语文".to_string()]);
        selection.toggle_subject("数学");
        assert_eq!(selection.subjects, vec!["语文".to_string()]);
    }

    #[test]
    fn empty_table_is_a_validation_error() {
        let table = ScoreTable::new(
            vec![STUDENT_COLUMN.to_string(), SUBJECT_COLUMN.to_string()],
            Vec::new(),
        );
        assert_eq!(
            SelectionOptions::from_table(&table),
            Err(SelectionError::NoOptions(STUDENT_COLUMN.to_string()))
        );
    }

    #[test]
    fn missing_subject_column_is_reported() {
        let table = ScoreTable::new(
            vec![STUDENT_COLUMN.to_string()],
            vec![vec!["张三".to_string()]],
        );
        assert_eq!(
            SelectionOptions::from_table(&table),
            Err(SelectionError::MissingColumn(SUBJECT_COLUMN.to_string()))
        );
    }
}
