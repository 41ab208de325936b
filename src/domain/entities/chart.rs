use crate::domain::entities::score_table::{
    parse_numeric_value, ScoreTable, EXAM_COLUMN, SUBJECT_COLUMN,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    MissingColumn(String),
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
    Render(String),
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::MissingColumn(column) => write!(f, "数据表缺少“{column}”列"),
            ChartError::NonNumeric { column, row, value } => {
                write!(f, "第 {} 行“{column}”的值“{value}”不是数字", row + 1)
            }
            ChartError::Render(message) => write!(f, "图表绘制失败：{message}"),
        }
    }
}

impl std::error::Error for ChartError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Score,
    Rank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub category: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
    /// Indices into `points` where a blank value interrupted the line.
    pub breaks: Vec<usize>,
}

impl ChartSeries {
    pub fn new(name: String) -> Self {
        Self {
            name,
            points: Vec::new(),
            breaks: Vec::new(),
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.value).collect()
    }

    fn mark_break(&mut self) {
        let at = self.points.len();
        if at > 0 && self.breaks.last() != Some(&at) {
            self.breaks.push(at);
        }
    }

    /// Runs of consecutive points to be joined by a line.
    pub fn segments(&self) -> Vec<&[ChartPoint]> {
        let mut segments = Vec::new();
        let mut start = 0;
        for &end in self.breaks.iter().chain(std::iter::once(&self.points.len())) {
            if end > start {
                segments.push(&self.points[start..end]);
            }
            start = end;
        }
        segments
    }
}

/// One entry of the unified hover: every series value sharing an x category.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverRow {
    pub category: String,
    pub entries: Vec<(String, f64)>,
}

/// Renderer-independent description of a categorical multi-series line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub y_axis_inverted: bool,
    pub markers: bool,
}

impl ChartSpec {
    /// Builds one series per subject with the x axis following row order.
    ///
    /// Empty value cells are gaps. Any other value that is not a number aborts
    /// the chart.
    pub fn from_table(
        kind: ChartKind,
        table: &ScoreTable,
        value_column: &str,
        title: String,
        y_title: String,
    ) -> Result<Self, ChartError> {
        let exam_idx = required_column(table, EXAM_COLUMN)?;
        let subject_idx = required_column(table, SUBJECT_COLUMN)?;
        let value_idx = required_column(table, value_column)?;

        let mut categories: Vec<String> = Vec::new();
        let mut series: Vec<ChartSeries> = Vec::new();

        for (row_idx, row) in table.rows.iter().enumerate() {
            let exam = row.get(exam_idx).cloned().unwrap_or_default();
            let subject = row.get(subject_idx).cloned().unwrap_or_default();
            let raw = row.get(value_idx).map(String::as_str).unwrap_or("");

            let category = match categories.iter().position(|c| *c == exam) {
                Some(idx) => idx,
                None => {
                    categories.push(exam);
                    categories.len() - 1
                }
            };
            let series_idx = match series.iter().position(|s| s.name == subject) {
                Some(idx) => idx,
                None => {
                    series.push(ChartSeries::new(subject));
                    series.len() - 1
                }
            };

            if raw.trim().is_empty() {
                series[series_idx].mark_break();
                continue;
            }
            let value = parse_numeric_value(raw).ok_or_else(|| ChartError::NonNumeric {
                column: value_column.to_string(),
                row: row_idx,
                value: raw.to_string(),
            })?;
            series[series_idx].points.push(ChartPoint { category, value });
        }

        Ok(Self {
            kind,
            title,
            x_title: EXAM_COLUMN.to_string(),
            y_title,
            categories,
            series,
            y_axis_inverted: kind == ChartKind::Rank,
            markers: true,
        })
    }

    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|series| series.points.iter().map(|point| point.value))
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            })
    }

    pub fn unified_hover(&self) -> Vec<HoverRow> {
        self.categories
            .iter()
            .enumerate()
            .map(|(category_idx, category)| HoverRow {
                category: category.clone(),
                entries: self
                    .series
                    .iter()
                    .flat_map(|series| {
                        series
                            .points
                            .iter()
                            .filter(move |point| point.category == category_idx)
                            .map(move |point| (series.name.clone(), point.value))
                    })
                    .collect(),
            })
            .collect()
    }
}

fn required_column(table: &ScoreTable, column: &str) -> Result<usize, ChartError> {
    table
        .column_index(column)
        .ok_or_else(|| ChartError::MissingColumn(column.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::score_table::{sample_table, SCORE_COLUMN};

    #[test]
    fn blank_value_splits_series_into_segments() {
        let mut table = sample_table();
        table.rows[1][3] = String::new();

        let spec = ChartSpec::from_table(
            ChartKind::Score,
            &table,
            SCORE_COLUMN,
            "张三 各科成绩走势".to_string(),
            "分数".to_string(),
        )
        .expect("spec should build");

        let zhang = &spec.series[0];
        let runs: Vec<Vec<usize>> = zhang
            .segments()
            .iter()
            .map(|run| run.iter().map(|point| point.category).collect())
            .collect();
        assert_eq!(runs, vec![vec![0], vec![2, 0, 1, 2]]);
    }

    #[test]
    fn leading_and_repeated_blanks_do_not_create_empty_segments() {
        let mut series = ChartSeries::new("数学".to_string());
        series.mark_break();
        series.points.push(ChartPoint {
            category: 0,
            value: 1.0,
        });
        series.mark_break();
        series.mark_break();

        assert_eq!(series.breaks, vec![1]);
        assert_eq!(series.segments().len(), 1);
    }
}
