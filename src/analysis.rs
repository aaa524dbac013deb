use tracing::{debug, error, info};

use crate::error::{AppError, Result};
use crate::store::Store;
use crate::types::{AnalysisRequest, AnalysisResult, MIN_INPUT_CHARS};

pub const INPUT_TOO_SHORT: &str = "input too short";
pub const CONNECTION_FAILED: &str = "Cannot reach the sentiment server";

/// A classification request accepted by the controller and waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub id: u64,
    pub request: AnalysisRequest,
}

/// What happened when a classification response came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Result stored; the history should be refreshed.
    Stored,
    Failed,
    /// Response to a superseded request, dropped.
    Stale,
}

/// Owns the validate -> submit -> resolve cycle of one classification.
///
/// State lives in the shared store (`input` and `analysis`); the controller
/// itself only remembers which request is the latest one.
#[derive(Debug)]
pub struct AnalysisController {
    store: Store,
    latest: u64,
}

impl AnalysisController {
    pub fn new(store: Store) -> Self {
        Self { store, latest: 0 }
    }

    /// Validate `raw` and move to loading.
    ///
    /// Returns the request to dispatch. Short input fails before anything is
    /// cleared, so the previous result stays on screen.
    pub fn submit(&mut self, raw: &str) -> Result<AnalysisTicket> {
        if raw.trim().chars().count() < MIN_INPUT_CHARS {
            self.store
                .update(|s| s.analysis.error = Some(INPUT_TOO_SHORT.to_string()));
            return Err(AppError::Validation(INPUT_TOO_SHORT.to_string()));
        }

        self.latest += 1;
        self.store.update(|s| {
            s.analysis.error = None;
            s.analysis.result = None;
            s.analysis.loading = true;
        });
        debug!(id = self.latest, "dispatching classification request");

        Ok(AnalysisTicket {
            id: self.latest,
            request: AnalysisRequest {
                text: raw.to_string(),
            },
        })
    }

    /// Apply the response for ticket `id`. Both branches leave `loading` false.
    pub fn complete(&mut self, id: u64, response: Result<AnalysisResult>) -> Outcome {
        if id != self.latest {
            debug!(id, latest = self.latest, "discarding stale classification response");
            return Outcome::Stale;
        }

        match response {
            Ok(result) => {
                info!(sentiment = %result.sentiment, "classification stored");
                self.store.update(|s| {
                    s.analysis.result = Some(result);
                    s.analysis.loading = false;
                    s.input.clear();
                });
                Outcome::Stored
            }
            Err(err) => {
                error!(error = %err, "classification failed");
                let message = error_message(&err);
                self.store.update(|s| {
                    s.analysis.error = Some(message);
                    s.analysis.loading = false;
                });
                Outcome::Failed
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.store.read(|s| s.analysis.loading)
    }
}

/// Server-supplied message if there is one, otherwise a generic one.
pub fn error_message(err: &AppError) -> String {
    match err {
        AppError::Server(message) | AppError::Validation(message) => message.clone(),
        _ => CONNECTION_FAILED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentiment;

    fn happy() -> AnalysisResult {
        AnalysisResult {
            text: "I am very happy today".to_string(),
            clean_text: "i am very happy today".to_string(),
            sentiment: Sentiment::Positive,
        }
    }

    #[test]
    fn short_input_is_rejected_without_ticket() {
        let store = Store::default();
        let mut ctl = AnalysisController::new(store.clone());

        for raw in ["", "hi", "    ", "  abcd  ", "\tab\n"] {
            let err = ctl.submit(raw).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{raw:?}");
        }

        let state = store.snapshot();
        assert_eq!(state.analysis.error.as_deref(), Some(INPUT_TOO_SHORT));
        assert!(!state.analysis.loading);
        assert_eq!(ctl.latest, 0);
    }

    #[test]
    fn short_input_keeps_previous_result() {
        let store = Store::default();
        store.update(|s| s.analysis.result = Some(happy()));
        let mut ctl = AnalysisController::new(store.clone());

        assert!(ctl.submit("hi").is_err());
        assert_eq!(store.snapshot().analysis.result, Some(happy()));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut ctl = AnalysisController::new(Store::default());
        // "vữnđ" is 4 characters but 7 bytes
        assert!(ctl.submit("vữngđ").is_ok());
        assert!(ctl.submit("vữnđ").is_err());
    }

    #[test]
    fn submit_clears_old_state_and_sends_raw_text() {
        let store = Store::default();
        store.update(|s| {
            s.analysis.result = Some(happy());
            s.analysis.error = Some("old".into());
        });
        let mut ctl = AnalysisController::new(store.clone());

        let ticket = ctl.submit("  padded input  ").unwrap();
        assert_eq!(ticket.request.text, "  padded input  ");

        let state = store.snapshot();
        assert!(state.analysis.loading);
        assert!(state.analysis.result.is_none());
        assert!(state.analysis.error.is_none());
        assert!(ctl.is_loading());
    }

    #[test]
    fn success_stores_result_and_clears_input() {
        let store = Store::default();
        store.update(|s| s.input = "I am very happy today".into());
        let mut ctl = AnalysisController::new(store.clone());

        let ticket = ctl.submit("I am very happy today").unwrap();
        let outcome = ctl.complete(ticket.id, Ok(happy()));

        assert_eq!(outcome, Outcome::Stored);
        let state = store.snapshot();
        assert_eq!(state.analysis.result, Some(happy()));
        assert!(state.input.is_empty());
        assert!(!state.analysis.loading);
        assert!(state.analysis.error.is_none());
    }

    #[test]
    fn failure_prefers_server_message() {
        let store = Store::default();
        let mut ctl = AnalysisController::new(store.clone());

        let ticket = ctl.submit("some text here").unwrap();
        let outcome = ctl.complete(ticket.id, Err(AppError::Server("model offline".into())));

        assert_eq!(outcome, Outcome::Failed);
        let state = store.snapshot();
        assert_eq!(state.analysis.error.as_deref(), Some("model offline"));
        assert!(!state.analysis.loading);
        assert!(state.analysis.result.is_none());
    }

    #[test]
    fn failure_without_server_message_is_generic() {
        let store = Store::default();
        store.update(|s| s.analysis.result = Some(happy()));
        store.update(|s| s.input = "keep me please".into());
        let mut ctl = AnalysisController::new(store.clone());

        let ticket = ctl.submit("keep me please").unwrap();
        ctl.complete(ticket.id, Err(AppError::Http("connection refused".into())));

        let state = store.snapshot();
        assert_eq!(state.analysis.error.as_deref(), Some(CONNECTION_FAILED));
        // cleared on submit, not restored
        assert!(state.analysis.result.is_none());
        assert_eq!(state.input, "keep me please");
    }

    #[test]
    fn stale_response_is_discarded() {
        let store = Store::default();
        let mut ctl = AnalysisController::new(store.clone());

        let first = ctl.submit("first request").unwrap();
        let second = ctl.submit("second request").unwrap();

        assert_eq!(ctl.complete(first.id, Ok(happy())), Outcome::Stale);
        assert!(store.snapshot().analysis.loading);

        assert_eq!(
            ctl.complete(second.id, Err(AppError::Decode("bad json".into()))),
            Outcome::Failed
        );
        assert!(!store.snapshot().analysis.loading);
    }
}
