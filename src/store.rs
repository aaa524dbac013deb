use std::sync::Arc;

use tokio::sync::watch;

use crate::types::{AnalysisResult, HistoryItem};

/// Fields owned by the analysis controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisView {
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    pub loading: bool,
}

/// Fields owned by the history pager.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryView {
    pub items: Vec<HistoryItem>,
    /// Number of items consumed from the server's ordering.
    pub offset: usize,
    pub has_more: bool,
    pub in_flight: bool,
}

/// Everything the UI renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub input: String,
    pub analysis: AnalysisView,
    pub history: HistoryView,
    /// Selected history row.
    pub selected: usize,
    /// Advances on ticks while a classification is loading.
    pub spinner: usize,
}

/// Shared, observable handle to the session's `AppState`.
///
/// Every `update` notifies all receivers returned by `subscribe`, so views
/// only ever render the latest snapshot.
#[derive(Debug, Clone)]
pub struct Store {
    tx: Arc<watch::Sender<AppState>>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx: Arc::new(tx) }
    }

    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut AppState),
    {
        self.tx.send_modify(f);
    }

    pub fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&AppState) -> T,
    {
        f(&self.tx.borrow())
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> AppState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
