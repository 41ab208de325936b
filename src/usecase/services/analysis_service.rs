use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::chart::{ChartError, ChartKind, ChartSpec};
use crate::domain::entities::score_table::{
    ScoreTable, RANK_COLUMN, SCORE_COLUMN, STUDENT_COLUMN, SUBJECT_COLUMN,
};
use crate::domain::entities::selection::Selection;
use crate::usecase::ports::chart_renderer::ChartRenderer;

pub const NO_DATA_WARNING: &str = "未找到该学生的考试数据。";
pub const MISSING_RANK_WARNING: &str = "⚠️ 数据表中未检测到‘排名’列，无法生成排名趋势图。";

/// Rows matching the selected student and any of the selected subjects.
pub fn filter_rows(table: &ScoreTable, student: &str, subjects: &[String]) -> ScoreTable {
    let (Some(student_idx), Some(subject_idx)) = (
        table.column_index(STUDENT_COLUMN),
        table.column_index(SUBJECT_COLUMN),
    ) else {
        return ScoreTable::new(table.columns.clone(), Vec::new());
    };

    let rows = table
        .rows
        .iter()
        .filter(|row| {
            row.get(student_idx).map(String::as_str) == Some(student)
                && row
                    .get(subject_idx)
                    .is_some_and(|subject| subjects.contains(subject))
        })
        .cloned()
        .collect();

    ScoreTable::new(table.columns.clone(), rows)
}

pub fn score_chart_spec(student: &str, subset: &ScoreTable) -> Result<ChartSpec, ChartError> {
    ChartSpec::from_table(
        ChartKind::Score,
        subset,
        SCORE_COLUMN,
        format!("{student} 各科成绩走势"),
        "分数".to_string(),
    )
}

/// `None` when the subset has no rank column at all.
pub fn rank_chart_spec(
    student: &str,
    subset: &ScoreTable,
) -> Option<Result<ChartSpec, ChartError>> {
    if !subset.has_column(RANK_COLUMN) {
        return None;
    }
    Some(ChartSpec::from_table(
        ChartKind::Rank,
        subset,
        RANK_COLUMN,
        format!("{student} 各科排名走势 (越高越好)"),
        "名次".to_string(),
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub spec: ChartSpec,
    pub svg: Result<String, ChartError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartPanel {
    Chart(RenderedChart),
    Failed(ChartError),
    Warning(String),
}

impl ChartPanel {
    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            ChartPanel::Chart(rendered) => Some(&rendered.spec),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendView {
    NoData { warning: String },
    Ready {
        student: String,
        score: ChartPanel,
        rank: ChartPanel,
        detail: ScoreTable,
    },
}

pub struct AnalysisService {
    renderer: Arc<dyn ChartRenderer>,
}

impl AnalysisService {
    pub fn new(renderer: Arc<dyn ChartRenderer>) -> Self {
        Self { renderer }
    }

    pub fn trend_view(&self, table: &ScoreTable, selection: &Selection) -> TrendView {
        let subset = filter_rows(table, &selection.student, &selection.subjects);
        debug!(
            student = %selection.student,
            subjects = selection.subjects.len(),
            rows = subset.row_count(),
            "filtered score table"
        );
        self.trend_view_for_subset(&selection.student, subset)
    }

    pub fn trend_view_for_subset(&self, student: &str, subset: ScoreTable) -> TrendView {
        if subset.is_empty() {
            return TrendView::NoData {
                warning: NO_DATA_WARNING.to_string(),
            };
        }

        let score = self.panel(score_chart_spec(student, &subset));
        let rank = match rank_chart_spec(student, &subset) {
            Some(spec) => self.panel(spec),
            None => ChartPanel::Warning(MISSING_RANK_WARNING.to_string()),
        };

        TrendView::Ready {
            student: student.to_string(),
            score,
            rank,
            detail: subset,
        }
    }

    fn panel(&self, spec: Result<ChartSpec, ChartError>) -> ChartPanel {
        match spec {
            Ok(spec) => {
                let svg = self.renderer.render_svg(&spec);
                ChartPanel::Chart(RenderedChart { spec, svg })
            }
            Err(err) => ChartPanel::Failed(err),
        }
    }
}
