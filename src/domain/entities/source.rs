use std::path::Path;

use crate::domain::entities::score_table::ScoreTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Sample,
    Upload { file_name: String },
}

impl DataSource {
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
            .unwrap_or_else(|| path.display().to_string());
        DataSource::Upload { file_name }
    }

    pub fn is_sample(&self) -> bool {
        matches!(self, DataSource::Sample)
    }

    pub fn notice(&self) -> String {
        match self {
            DataSource::Sample => {
                "👋 尚未上传文件，正在使用示例数据演示。请在侧边栏上传您的 Excel 表格。".to_string()
            }
            DataSource::Upload { .. } => "✅ 数据导入成功！".to_string(),
        }
    }

    /// Short name of the data currently shown, for the sidebar.
    pub fn label(&self) -> &str {
        match self {
            DataSource::Sample => "示例数据",
            DataSource::Upload { file_name } => file_name,
        }
    }
}

/// Result of one successful Data Loader run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub source: DataSource,
    pub table: ScoreTable,
}
