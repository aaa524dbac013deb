use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::action::Action;
use crate::analysis::{AnalysisController, AnalysisTicket, Outcome};
use crate::event::Event;
use crate::history::{HistoryPager, PageRequest};
use crate::service::SentimentService;
use crate::store::Store;

pub struct App {
    pub store: Store,
    pub should_quit: bool,
    analysis: AnalysisController,
    history: HistoryPager,
    service: Arc<dyn SentimentService>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        store: Store,
        service: Arc<dyn SentimentService>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            analysis: AnalysisController::new(store.clone()),
            history: HistoryPager::new(store.clone()),
            store,
            should_quit: false,
            service,
            action_tx,
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::RefreshHistory,
            Event::Tick => Action::Tick,
            Event::Paste(text) => Action::InputPaste(text),
            Event::Key(key) => self.handle_key(key),
            Event::Resize => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('r') => Action::RefreshHistory,
                KeyCode::Char('l') => Action::LoadMoreHistory,
                KeyCode::Char('u') => Action::ClearInput,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => Action::Quit,
            // The submit button is disabled while a request is outstanding
            KeyCode::Enter if self.analysis.is_loading() => Action::None,
            KeyCode::Enter => Action::Submit,
            KeyCode::Backspace => Action::InputBackspace,
            KeyCode::Up => Action::ScrollUp,
            KeyCode::Down => Action::ScrollDown,
            KeyCode::Home => Action::GoToTop,
            KeyCode::End => Action::GoToBottom,
            KeyCode::PageDown => Action::LoadMoreHistory,
            KeyCode::Char(c) => Action::InputChar(c),
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }

            Action::InputChar(c) => self.store.update(|s| s.input.push(c)),
            Action::InputPaste(text) => {
                let text: String = text
                    .chars()
                    .map(|c| if c.is_control() { ' ' } else { c })
                    .collect();
                self.store.update(|s| s.input.push_str(&text));
            }
            Action::InputBackspace => self.store.update(|s| {
                s.input.pop();
            }),
            Action::ClearInput => self.store.update(|s| s.input.clear()),

            Action::ScrollUp => self.store.update(|s| {
                s.selected = s.selected.saturating_sub(1);
            }),
            Action::ScrollDown => {
                let (selected, len) = self
                    .store
                    .read(|s| (s.selected, s.history.items.len()));
                if selected + 1 < len {
                    self.store.update(|s| s.selected += 1);
                } else {
                    // Past the last row
                    self.load_more();
                }
            }
            Action::GoToTop => self.store.update(|s| s.selected = 0),
            Action::GoToBottom => self.store.update(|s| {
                s.selected = s.history.items.len().saturating_sub(1);
            }),

            Action::Submit => {
                let raw = self.store.read(|s| s.input.clone());
                if let Ok(ticket) = self.analysis.submit(&raw) {
                    self.spawn_analyze(ticket);
                }
            }
            Action::AnalysisFinished { id, response } => {
                if self.analysis.complete(id, response) == Outcome::Stored {
                    let request = self.history.refresh();
                    self.spawn_load_history(request);
                }
            }

            Action::RefreshHistory => {
                let request = self.history.refresh();
                self.spawn_load_history(request);
            }
            Action::LoadMoreHistory => self.load_more(),
            Action::HistoryLoaded { request, response } => {
                if self.history.complete(request, response) {
                    // A refresh may have shrunk the list under the cursor
                    self.store.update(|s| {
                        let last = s.history.items.len().saturating_sub(1);
                        s.selected = s.selected.min(last);
                    });
                }
            }

            Action::Tick => {
                if self.analysis.is_loading() {
                    self.store.update(|s| s.spinner = s.spinner.wrapping_add(1));
                }
            }
            Action::None => {}
        }
    }

    fn load_more(&mut self) {
        if let Some(request) = self.history.load_more() {
            self.spawn_load_history(request);
        }
    }

    /// Check the service is reachable without holding up the UI. Only logs.
    pub fn spawn_health_probe(&self) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            match service.health().await {
                Ok(health) => info!(
                    server = service.name(),
                    status = %health.status,
                    message = health.message.as_deref().unwrap_or(""),
                    "sentiment service reachable"
                ),
                Err(e) => warn!(
                    server = service.name(),
                    error = %e,
                    "sentiment service health check failed"
                ),
            }
        })
    }

    fn spawn_analyze(&self, ticket: AnalysisTicket) {
        let tx = self.action_tx.clone();
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let response = service.analyze(&ticket.request).await;
            // Receiver gone means the session ended; drop the late result
            tx.send(Action::analysis_finished(&ticket, response)).ok();
        });
    }

    fn spawn_load_history(&self, request: PageRequest) {
        let tx = self.action_tx.clone();
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let response = service.list_history(request.offset).await;
            tx.send(Action::HistoryLoaded { request, response }).ok();
        });
    }
}
