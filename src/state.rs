// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, store::QuestionStore};

/// Shared handle to whichever question store the server was started with.
pub type DynQuestionStore = Arc<dyn QuestionStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: DynQuestionStore,
    pub config: Config,
}

impl FromRef<AppState> for DynQuestionStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
