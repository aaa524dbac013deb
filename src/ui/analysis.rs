use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::store::AppState;

use super::{sentiment_style, truncate};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render_input(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Text to classify ")
        .border_style(Style::default().fg(Color::Cyan));

    let line = if state.analysis.loading {
        Line::from(vec![
            Span::styled(
                SPINNER[state.spinner % SPINNER.len()],
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" "),
            Span::styled("Classifying...", Style::default().fg(Color::DarkGray)),
        ])
    } else if state.input.is_empty() {
        Line::from(Span::styled(
            "e.g. Hom nay toi rat vui...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![Span::raw(state.input.as_str()), Span::raw("_")])
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render_error(frame: &mut Frame, state: &AppState, area: Rect) {
    if let Some(error) = &state.analysis.error {
        let line = Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

pub fn render_result(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Result ")
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(result) = &state.analysis.result else {
        frame.render_widget(block, area);
        return;
    };

    let w = area.width.saturating_sub(4) as usize;
    let lines = vec![
        Line::from(Span::styled(
            format!("\"{}\"", truncate(&result.text, w.saturating_sub(2))),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Normalized: ", Style::default().fg(Color::Gray)),
            Span::styled(
                truncate(&result.clean_text, w.saturating_sub(12)),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::from(Span::styled(
            format!("[ {} ]", result.sentiment),
            sentiment_style(&result.sentiment),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
