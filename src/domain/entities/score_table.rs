pub const STUDENT_COLUMN: &str = "姓名";
pub const EXAM_COLUMN: &str = "考试名称";
pub const SUBJECT_COLUMN: &str = "科目";
pub const SCORE_COLUMN: &str = "成绩";
pub const RANK_COLUMN: &str = "排名";

/// Schemaless score table: ordered column names plus string cells.
///
/// Rows are kept exactly as loaded or edited. Numeric interpretation is left
/// to the chart stage, so a table with odd values is still a valid table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ScoreTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row_idx: usize, col_idx: usize) -> &str {
        self.rows
            .get(row_idx)
            .and_then(|row| row.get(col_idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Distinct values of a column in order of first appearance.
    pub fn distinct_values(&self, col_idx: usize) -> Vec<String> {
        let mut seen = Vec::<String>::new();
        for row in &self.rows {
            let value = row.get(col_idx).cloned().unwrap_or_default();
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen
    }
}

/// Built-in demo data shown until a file is uploaded.
pub fn sample_table() -> ScoreTable {
    let columns = [
        STUDENT_COLUMN,
        EXAM_COLUMN,
        SUBJECT_COLUMN,
        SCORE_COLUMN,
        RANK_COLUMN,
    ]
    .iter()
    .map(|name| name.to_string())
    .collect();

    let records = [
        ("张三", "月考1", "数学", "85", "5"),
        ("张三", "期中考", "数学", "92", "2"),
        ("张三", "月考2", "数学", "88", "4"),
        ("李四", "月考1", "数学", "78", "10"),
        ("李四", "期中考", "数学", "85", "5"),
        ("李四", "月考2", "数学", "95", "1"),
    ];
    let rows = records
        .iter()
        .map(|(student, exam, subject, score, rank)| {
            vec![
                student.to_string(),
                exam.to_string(),
                subject.to_string(),
                score.to_string(),
                rank.to_string(),
            ]
        })
        .collect();

    ScoreTable::new(columns, rows)
}

/// Parses a cell as a number. Thousands separators and padding are accepted.
pub fn parse_numeric_value(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn format_numeric_value(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_table_has_two_students_three_exams() {
        let table = sample_table();
        assert_eq!(table.row_count(), 6);
        assert_eq!(table.columns.len(), 5);
        let student_idx = table.column_index(STUDENT_COLUMN).expect("student column");
        assert_eq!(table.distinct_values(student_idx), vec!["张三", "李四"]);
        assert!(table.has_column(RANK_COLUMN));
    }

    #[test]
    fn parse_numeric_value_accepts_separators_and_rejects_text() {
        assert_eq!(parse_numeric_value(" 1,234.5 "), Some(1234.5));
        assert_eq!(parse_numeric_value("88"), Some(88.0));
        assert_eq!(parse_numeric_value(""), None);
        assert_eq!(parse_numeric_value("缺考"), None);
        assert_eq!(parse_numeric_value("NaN"), None);
    }

    #[test]
    fn format_numeric_value_trims_trailing_zeros() {
        assert_eq!(format_numeric_value(85.0), "85");
        assert_eq!(format_numeric_value(92.50), "92.5");
        assert_eq!(format_numeric_value(f64::NAN), "");
    }
}
