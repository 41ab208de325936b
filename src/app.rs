use std::collections::BTreeSet;
use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::entities::chart::ChartSpec;
use crate::domain::entities::edit::CellKey;
use crate::domain::entities::score_table::{format_numeric_value, ScoreTable};
use crate::domain::entities::selection::{Selection, SelectionOptions};
use crate::infra::chart::svg::{series_color_hex, PlottersSvgRenderer};
use crate::infra::import::csv::CsvTableReader;
use crate::infra::import::xlsx::WorkbookTableReader;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::AppState;
use crate::usecase::services::analysis_service::{AnalysisService, ChartPanel, TrendView};
use crate::usecase::services::export_service::{default_export_file_name, ExportService};
use crate::usecase::services::load_service::{load_error_message, LoadService};
use crate::usecase::session::Session;

const INFO_STYLE: &str =
    "background: #e8f1fb; color: #0b4a8b; padding: 8px 12px; border-radius: 6px; margin: 8px 0;";
const SUCCESS_STYLE: &str =
    "background: #e6f6ea; color: #1b6b34; padding: 8px 12px; border-radius: 6px; margin: 8px 0;";
const WARNING_STYLE: &str =
    "background: #fff6dd; color: #7a5a00; padding: 8px 12px; border-radius: 6px; margin: 8px 0;";
const ERROR_STYLE: &str =
    "background: #fdecea; color: #a61b1b; padding: 8px 12px; border-radius: 6px; margin: 8px 0;";
const CELL_STYLE: &str = "border: 1px solid #bbb; padding: 4px 8px;";
const HEADER_CELL_STYLE: &str =
    "border: 1px solid #bbb; padding: 4px 8px; background: #f3f3f3; position: sticky; top: 0;";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

fn notice_style(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => INFO_STYLE,
        NoticeKind::Success => SUCCESS_STYLE,
        NoticeKind::Warning => WARNING_STYLE,
        NoticeKind::Error => ERROR_STYLE,
    }
}

#[component]
fn Notice(kind: NoticeKind, message: String) -> Element {
    rsx! {
        div { style: "{notice_style(kind)}", "{message}" }
    }
}

pub fn hover_text(category: &str, entries: &[(String, f64)]) -> String {
    let mut lines = vec![category.to_string()];
    lines.extend(
        entries
            .iter()
            .map(|(series, value)| format!("{series}: {}", format_numeric_value(*value))),
    );
    lines.join("\n")
}

#[component]
fn HoverStrip(spec: ChartSpec) -> Element {
    let hover_rows = spec.unified_hover();
    let legend: Vec<(String, String)> = spec
        .series
        .iter()
        .enumerate()
        .map(|(idx, series)| (series.name.clone(), series_color_hex(idx)))
        .collect();
    rsx! {
        div { style: "display: flex; gap: 6px; flex-wrap: wrap; margin: 4px 0 12px 0;",
            for row in hover_rows.into_iter() {
                div {
                    style: "border: 1px solid #ddd; border-radius: 4px; padding: 2px 8px; cursor: default; font-size: 12px;",
                    title: "{hover_text(&row.category, &row.entries)}",
                    "{row.category}"
                }
            }
            for (name, color) in legend.into_iter() {
                span { style: "font-size: 12px; color: {color};", "● {name}" }
            }
        }
    }
}

#[component]
fn ChartCard(heading: String, panel: ChartPanel) -> Element {
    let body = match panel {
        ChartPanel::Chart(rendered) => match rendered.svg {
            Ok(svg) => rsx! {
                div { style: "width: 100%; overflow-x: auto;", dangerous_inner_html: "{svg}" }
                HoverStrip { spec: rendered.spec.clone() }
            },
            Err(err) => rsx! {
                Notice { kind: NoticeKind::Error, message: err.to_string() }
            },
        },
        ChartPanel::Failed(err) => rsx! {
            Notice { kind: NoticeKind::Error, message: err.to_string() }
        },
        ChartPanel::Warning(message) => rsx! {
            Notice { kind: NoticeKind::Warning, message }
        },
    };
    rsx! {
        h3 { "{heading}" }
        {body}
    }
}

#[component]
fn DetailTable(table: ScoreTable) -> Element {
    rsx! {
        div { style: "max-height: 360px; overflow: auto;",
            table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                thead {
                    tr {
                        for header in table.columns.iter() {
                            th { style: "{HEADER_CELL_STYLE}", "{header}" }
                        }
                    }
                }
                tbody {
                    for row in table.rows.iter() {
                        tr {
                            for value in row.iter() {
                                td { style: "{CELL_STYLE}", "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TrendPanel(view: TrendView) -> Element {
    match view {
        TrendView::NoData { warning } => rsx! {
            Notice { kind: NoticeKind::Warning, message: warning }
        },
        TrendView::Ready {
            student,
            score,
            rank,
            detail,
        } => rsx! {
            ChartCard { heading: format!("📈 {student} - 成绩变化趋势"), panel: score }
            ChartCard { heading: format!("🏆 {student} - 排名变化趋势"), panel: rank }
            h3 { "📋 详细数据记录" }
            DetailTable { table: detail }
        },
    }
}

/// The sample switch is offered whenever the sample is not what is on screen.
pub fn show_sample_switch(is_sample: bool, has_load_error: bool) -> bool {
    !is_sample || has_load_error
}

fn grid_row_style(deleted: bool, added: bool) -> &'static str {
    if deleted {
        "color: #999; text-decoration: line-through; border-top: 2px solid #d24; border-bottom: 2px solid #d24;"
    } else if added {
        "background: #d9f7d9;"
    } else {
        ""
    }
}

#[component]
fn DataEditor(
    mut session: Signal<Session>,
    mut selected_rows: Signal<BTreeSet<usize>>,
    mut editing_cell: Signal<Option<CellKey>>,
    mut editing_value: Signal<String>,
    mut status: Signal<String>,
) -> Element {
    let editor = session.read().editor().clone();
    let columns = editor.base().columns.clone();
    let selected_snapshot = selected_rows();
    let editing_snapshot = editing_cell();
    let grid_rows: Vec<(usize, Vec<String>, bool, &'static str)> = (0..editor.grid_row_count())
        .map(|row_idx| {
            let values = (0..columns.len())
                .map(|col_idx| editor.grid_value(row_idx, col_idx))
                .collect();
            let deleted = editor.is_deleted(row_idx);
            (
                row_idx,
                values,
                deleted,
                grid_row_style(deleted, editor.is_added(row_idx)),
            )
        })
        .collect();
    let has_selection = !selected_snapshot.is_empty();

    rsx! {
        p { style: "color: #666; font-size: 13px;", "您可以在下方表格中直接修改数据，或者添加新行。双击单元格编辑，Enter 确认，Esc 取消。" }
        div { style: "margin-bottom: 8px; display: flex; gap: 8px;",
            button {
                onclick: move |_| {
                    session.write().editor_mut().add_row();
                    *status.write() = "已新增行".to_string();
                },
                "新增行"
            }
            button {
                disabled: !has_selection,
                onclick: move |_| {
                    let targets = selected_rows();
                    if targets.is_empty() {
                        return;
                    }
                    session.write().editor_mut().delete_rows(&targets);
                    selected_rows.write().clear();
                    *status.write() = "已删除选取行".to_string();
                },
                "删除选取行"
            }
            button {
                disabled: !has_selection,
                onclick: move |_| {
                    let targets = selected_rows();
                    session.write().editor_mut().restore_rows(&targets);
                    selected_rows.write().clear();
                    *status.write() = "已恢复选取行".to_string();
                },
                "恢复选取行"
            }
        }
        div { style: "max-height: 320px; overflow: auto;",
            table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                thead {
                    tr {
                        th { style: "{HEADER_CELL_STYLE}", "" }
                        for header in columns.iter() {
                            th { style: "{HEADER_CELL_STYLE}", "{header}" }
                        }
                    }
                }
                tbody {
                    for (row_idx, values, deleted, row_style) in grid_rows.into_iter() {
                        tr {
                            style: "{row_style}",
                            td { style: "{CELL_STYLE} text-align: center;",
                                input {
                                    r#type: "checkbox",
                                    checked: selected_snapshot.contains(&row_idx),
                                    onclick: move |_| {
                                        let mut selected = selected_rows.write();
                                        if selected.contains(&row_idx) {
                                            selected.remove(&row_idx);
                                        } else {
                                            selected.insert(row_idx);
                                        }
                                    }
                                }
                            }
                            for (col_idx, value) in values.into_iter().enumerate() {
                                {
                                    let value_for_edit = value.clone();
                                    let cell_key = CellKey {
                                        row_idx,
                                        col_idx,
                                        column: columns.get(col_idx).cloned().unwrap_or_default(),
                                    };
                                    if editing_snapshot.as_ref() == Some(&cell_key) {
                                        rsx! {
                                            td { style: "{CELL_STYLE}",
                                                input {
                                                    value: editing_value(),
                                                    oninput: move |event| {
                                                        editing_value.set(event.value());
                                                    },
                                                    onkeydown: move |event| {
                                                        if event.key() == Key::Enter {
                                                            let next_value = editing_value();
                                                            session
                                                                .write()
                                                                .editor_mut()
                                                                .set_cell(row_idx, col_idx, next_value);
                                                            *editing_cell.write() = None;
                                                            editing_value.set(String::new());
                                                        } else if event.key() == Key::Escape {
                                                            *editing_cell.write() = None;
                                                            editing_value.set(String::new());
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    } else {
                                        rsx! {
                                            td {
                                                style: "{CELL_STYLE}",
                                                ondoubleclick: move |_| {
                                                    if deleted {
                                                        return;
                                                    }
                                                    *editing_cell.write() = Some(cell_key.clone());
                                                    editing_value.set(value_for_edit.clone());
                                                },
                                                "{value}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(|| Arc::new(AppConfig::from_env()));
    let load_service = use_hook(|| {
        Arc::new(LoadService::new(
            Arc::new(CsvTableReader),
            Arc::new(WorkbookTableReader),
        ))
    });
    let analysis_service = use_hook(|| {
        Arc::new(AnalysisService::new(Arc::new(PlottersSvgRenderer {
            width: config.chart_width,
            height: config.chart_height,
        })))
    });
    let export_service = use_hook(|| Arc::new(ExportService));

    let load_service_for_init = load_service.clone();
    let AppState {
        mut session,
        mut selection,
        mut load_error,
        mut busy,
        mut status,
        mut show_editor,
        mut selected_rows,
        mut editing_cell,
        editing_value,
    } = AppState::new(move || Session::new(load_service_for_init.sample()));

    let working_table = use_memo(move || session.read().working_table());
    let options = use_memo(move || {
        SelectionOptions::from_table(&working_table.read())
            .inspect_err(|err| warn!(error = %err, "selector options unavailable"))
    });
    let effective_selection = use_memo(move || match &*options.read() {
        Ok(opts) => Some(Selection::reconcile(selection.read().as_ref(), opts)),
        Err(_) => None,
    });
    let analysis_for_view = analysis_service.clone();
    let trend_view = use_memo(move || {
        let current = effective_selection.read().clone()?;
        Some(analysis_for_view.trend_view(&working_table.read(), &current))
    });

    let load_service_for_upload = load_service.clone();
    let load_service_for_sample = load_service.clone();
    let export_service_for_save = export_service.clone();
    let export_dir = config.export_dir.clone();

    let source_notice = session.read().notice();
    let is_sample = session.read().source().is_sample();
    let source_label = session.read().source().label().to_string();
    let has_pending_changes = session.read().editor().has_pending_changes();
    let load_error_snapshot = load_error();
    let status_text = status();
    let options_snapshot = options();
    let selection_snapshot = effective_selection();
    let trend_snapshot = trend_view();

    rsx! {
        div {
            style: "display: flex; height: 100vh; font-family: sans-serif;",
            aside {
                style: "width: 280px; flex-shrink: 0; padding: 16px; border-right: 1px solid #ddd; background: #fafafa; overflow-y: auto;",
                h2 { "1. 数据来源" }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        if busy() {
                            return;
                        }
                        let Some(file_path) = FileDialog::new()
                            .add_filter("成绩单 (Excel/CSV)", &["xlsx", "xls", "csv"])
                            .pick_file() else {
                            *status.write() = "已取消上传".to_string();
                            return;
                        };

                        *busy.write() = true;
                        *status.write() = format!("正在读取 {}", file_path.display());
                        match run_blocking(|| load_service_for_upload.load(Some(&file_path))) {
                            Ok(outcome) => {
                                let loaded = format!("已载入 {}", outcome.source.label());
                                session.write().replace(outcome);
                                selected_rows.write().clear();
                                *editing_cell.write() = None;
                                load_error.set(None);
                                *status.write() = loaded;
                            }
                            Err(err) => {
                                load_error.set(Some(load_error_message(&err)));
                                *status.write() = "读取失败".to_string();
                            }
                        }
                        *busy.write() = false;
                    },
                    "上传成绩单 (Excel/CSV)"
                }
                if show_sample_switch(is_sample, load_error_snapshot.is_some()) {
                    button {
                        style: "margin-left: 8px;",
                        disabled: busy(),
                        onclick: move |_| {
                            session.write().replace(load_service_for_sample.sample());
                            selected_rows.write().clear();
                            *editing_cell.write() = None;
                            load_error.set(None);
                            *status.write() = "已载入 示例数据".to_string();
                        },
                        "改用示例数据"
                    }
                }
                if load_error_snapshot.is_none() && !is_sample {
                    Notice { kind: NoticeKind::Success, message: source_notice.clone() }
                }
                p { style: "margin-top: 8px; font-size: 13px;", "当前数据：{source_label}" }
                div { style: "margin-top: 16px; display: flex; flex-direction: column; gap: 8px;",
                    button {
                        disabled: busy() || load_error_snapshot.is_some(),
                        onclick: move |_| {
                            let mut dialog = FileDialog::new()
                                .add_filter("CSV", &["csv"])
                                .set_file_name(default_export_file_name());
                            if let Some(dir) = export_dir.as_ref() {
                                dialog = dialog.set_directory(dir);
                            }
                            let Some(path) = dialog.save_file() else {
                                *status.write() = "已取消导出".to_string();
                                return;
                            };
                            let table = working_table();
                            match run_blocking(|| export_service_for_save.export_csv(&table, &path)) {
                                Ok(()) => {
                                    *status.write() = format!("已导出 {}", path.display());
                                }
                                Err(err) => {
                                    *status.write() = format!("导出失败：{err:#}");
                                }
                            }
                        },
                        "导出当前数据 (CSV)"
                    }
                    button {
                        disabled: busy() || !has_pending_changes,
                        onclick: move |_| {
                            session.write().editor_mut().reset();
                            selected_rows.write().clear();
                            *status.write() = "已还原全部编辑".to_string();
                        },
                        "还原全部编辑"
                    }
                }
                p { style: "margin-top: 16px; color: #666; font-size: 12px;", "状态：{status_text}" }
            }
            main {
                style: "flex: 1; padding: 16px 24px; overflow-y: auto;",
                h1 { "📊 学生成绩与排名追踪系统" }
                if let Some(message) = load_error_snapshot.clone() {
                    Notice { kind: NoticeKind::Error, message }
                } else {
                    if is_sample {
                        Notice { kind: NoticeKind::Info, message: source_notice.clone() }
                    }
                    div { style: "border: 1px solid #ddd; border-radius: 6px; padding: 8px 12px; margin: 8px 0;",
                        div {
                            style: "cursor: pointer; font-weight: 600;",
                            onclick: move |_| show_editor.set(!show_editor()),
                            if show_editor() { "▾ 📝 数据预览与编辑" } else { "▸ 📝 数据预览与编辑 (点击此处展开)" }
                        }
                        if show_editor() {
                            DataEditor {
                                session,
                                selected_rows,
                                editing_cell,
                                editing_value,
                                status,
                            }
                        }
                    }
                    hr {}
                    h2 { "2. 趋势分析面板" }
                    {match (options_snapshot, selection_snapshot) {
                        (Err(err), _) => rsx! {
                            Notice { kind: NoticeKind::Error, message: err.to_string() }
                        },
                        (Ok(opts), Some(current)) => rsx! {
                            div { style: "display: flex; gap: 32px; margin-bottom: 12px;",
                                label {
                                    "选择学生: "
                                    select {
                                        onchange: move |event| {
                                            let mut next = effective_selection().unwrap_or_else(|| Selection {
                                                student: String::new(),
                                                subjects: Vec::new(),
                                            });
                                            next.select_student(&event.value());
                                            selection.set(Some(next));
                                        },
                                        for student in opts.students.iter() {
                                            option {
                                                value: "{student}",
                                                selected: *student == current.student,
                                                "{student}"
                                            }
                                        }
                                    }
                                }
                                div {
                                    span { "选择科目 (可多选): " }
                                    button {
                                        style: "margin-right: 6px; font-size: 12px;",
                                        onclick: {
                                            let all_subjects = opts.subjects.clone();
                                            move |_| {
                                                if let Some(mut next) = effective_selection() {
                                                    next.set_subjects(all_subjects.clone());
                                                    selection.set(Some(next));
                                                }
                                            }
                                        },
                                        "全选"
                                    }
                                    button {
                                        style: "margin-right: 12px; font-size: 12px;",
                                        onclick: move |_| {
                                            if let Some(mut next) = effective_selection() {
                                                next.set_subjects(Vec::new());
                                                selection.set(Some(next));
                                            }
                                        },
                                        "清空"
                                    }
                                    for subject in opts.subjects.iter().cloned() {
                                        label { style: "margin-right: 12px;",
                                            input {
                                                r#type: "checkbox",
                                                checked: current.subjects.contains(&subject),
                                                onclick: {
                                                    let subject = subject.clone();
                                                    move |_| {
                                                        if let Some(mut next) = effective_selection() {
                                                            next.toggle_subject(&subject);
                                                            selection.set(Some(next));
                                                        }
                                                    }
                                                }
                                            }
                                            "{subject}"
                                        }
                                    }
                                }
                            }
                            if let Some(view) = trend_snapshot {
                                TrendPanel { view }
                            }
                        },
                        (Ok(_), None) => rsx! {},
                    }}
                }
            }
        }
    }
}
