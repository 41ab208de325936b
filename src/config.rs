use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::{ProjectDirs, UserDirs};

pub const WINDOW_TITLE: &str = "学生成绩趋势分析系统";
pub const DEFAULT_CHART_WIDTH: u32 = 960;
pub const DEFAULT_CHART_HEIGHT: u32 = 420;

const CHART_WIDTH_ENV: &str = "SCORE_TREND_CHART_WIDTH";
const CHART_HEIGHT_ENV: &str = "SCORE_TREND_CHART_HEIGHT";
const WINDOW_TITLE_ENV: &str = "SCORE_TREND_WINDOW_TITLE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub window_title: String,
    pub chart_width: u32,
    pub chart_height: u32,
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: WINDOW_TITLE.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
            export_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            window_title: lookup(WINDOW_TITLE_ENV)
                .map(|raw| raw.trim().to_string())
                .filter(|title| !title.is_empty())
                .unwrap_or(defaults.window_title.clone()),
            chart_width: parse_dimension(lookup(CHART_WIDTH_ENV)).unwrap_or(defaults.chart_width),
            chart_height: parse_dimension(lookup(CHART_HEIGHT_ENV))
                .unwrap_or(defaults.chart_height),
            export_dir: UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf)),
            ..defaults
        }
    }
}

fn parse_dimension(value: Option<String>) -> Option<u32> {
    value
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|v| (200..=4000).contains(v))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "scoretrend", "score-trend")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_size_overrides_are_bounded() {
        let config = AppConfig::from_lookup(|key| match key {
            CHART_WIDTH_ENV => Some("1200".to_string()),
            CHART_HEIGHT_ENV => Some("10".to_string()),
            _ => None,
        });
        assert_eq!(config.chart_width, 1200);
        assert_eq!(config.chart_height, DEFAULT_CHART_HEIGHT);
        assert_eq!(config.window_title, WINDOW_TITLE);
    }

    #[test]
    fn garbage_overrides_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(|_| Some("wide".to_string()));
        assert_eq!(config.chart_width, DEFAULT_CHART_WIDTH);
    }

    #[test]
    fn window_title_override_ignores_blank_values() {
        let custom = AppConfig::from_lookup(|key| match key {
            WINDOW_TITLE_ENV => Some(" 高三(2)班成绩 ".to_string()),
            _ => None,
        });
        let blank = AppConfig::from_lookup(|key| match key {
            WINDOW_TITLE_ENV => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(custom.window_title, "高三(2)班成绩");
        assert_eq!(blank.window_title, WINDOW_TITLE);
    }
}
