use std::collections::BTreeSet;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::edit::CellKey;
use crate::domain::entities::selection::Selection;
use crate::usecase::session::Session;

pub struct AppState {
    pub session: Signal<Session>,
    pub selection: Signal<Option<Selection>>,
    pub load_error: Signal<Option<String>>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub show_editor: Signal<bool>,
    pub selected_rows: Signal<BTreeSet<usize>>,
    pub editing_cell: Signal<Option<CellKey>>,
    pub editing_value: Signal<String>,
}

impl AppState {
    pub fn new(initial_session: impl FnOnce() -> Session) -> Self {
        Self {
            session: use_signal(initial_session),
            selection: use_signal(|| None::<Selection>),
            load_error: use_signal(|| None::<String>),
            busy: use_signal(|| false),
            status: use_signal(|| "就绪".to_string()),
            show_editor: use_signal(|| false),
            selected_rows: use_signal(BTreeSet::<usize>::new),
            editing_cell: use_signal(|| None::<CellKey>),
            editing_value: use_signal(String::new),
        }
    }
}
