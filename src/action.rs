use crate::analysis::AnalysisTicket;
use crate::error::Result;
use crate::history::PageRequest;
use crate::types::{AnalysisResult, HistoryItem};

#[derive(Debug)]
pub enum Action {
    Quit,

    // Input editing
    InputChar(char),
    InputPaste(String),
    InputBackspace,
    ClearInput,

    // History navigation
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,

    // Classification
    Submit,
    AnalysisFinished {
        id: u64,
        response: Result<AnalysisResult>,
    },

    // History
    RefreshHistory,
    LoadMoreHistory,
    HistoryLoaded {
        request: PageRequest,
        response: Result<Vec<HistoryItem>>,
    },

    Tick,
    None,
}

impl Action {
    pub fn analysis_finished(ticket: &AnalysisTicket, response: Result<AnalysisResult>) -> Self {
        Action::AnalysisFinished {
            id: ticket.id,
            response,
        }
    }
}
