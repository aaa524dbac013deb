mod analysis;
mod history;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::store::AppState;
use crate::types::Sentiment;

pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    analysis::render_input(frame, state, chunks[1]);
    analysis::render_error(frame, state, chunks[2]);
    analysis::render_result(frame, state, chunks[3]);
    history::render(frame, state, chunks[4]);
    render_status_bar(frame, state, chunks[5]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![Span::styled(
        "sentiview - Sentiment classifier",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let status = if state.analysis.loading {
        Line::from(vec![Span::styled(
            "Classifying...",
            Style::default().fg(Color::Yellow),
        )])
    } else if state.history.in_flight {
        Line::from(vec![Span::styled(
            "Loading history...",
            Style::default().fg(Color::Yellow),
        )])
    } else {
        Line::from(vec![Span::styled(
            "Enter: classify | Up/Down/Home/End: history | PgDn/Ctrl+L: more | Ctrl+R: refresh | Ctrl+U: clear | Esc: quit",
            Style::default().fg(Color::Gray),
        )])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

fn sentiment_style(sentiment: &Sentiment) -> Style {
    let color = match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Negative => Color::Red,
        Sentiment::Neutral | Sentiment::Unknown(_) => Color::Gray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Cut to at most `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
