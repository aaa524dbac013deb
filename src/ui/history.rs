use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::store::AppState;

use super::{sentiment_style, truncate};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let history = &state.history;

    let footer = if history.in_flight {
        format!(" {} items, loading... ", history.items.len())
    } else if history.has_more {
        format!(
            " {} items, more available (PgDn/Ctrl+L) ",
            history.items.len()
        )
    } else {
        format!(" {} items, end of history ", history.items.len())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " History ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            footer,
            Style::default().fg(Color::DarkGray),
        )))
        .border_style(Style::default().fg(Color::Yellow));

    if history.items.is_empty() {
        let empty = Paragraph::new("No classifications yet. Try entering a sentence!")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 35; // time(21) + sentiment(10) + spacing(4)
    let flex = w.saturating_sub(fixed).max(10);

    let rows: Vec<Row> = history
        .items
        .iter()
        .map(|item| {
            Row::new(vec![
                Cell::from(Span::styled(
                    item.display_timestamp(),
                    Style::default().fg(Color::DarkGray),
                )),
                Cell::from(truncate(&item.text, flex)),
                Cell::from(Span::styled(
                    item.sentiment.to_string(),
                    sentiment_style(&item.sentiment),
                )),
            ])
        })
        .collect();

    let header = Row::new(vec!["Time", "Text", "Sentiment"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Length(21),
            Constraint::Min(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected.min(history.items.len() - 1)));

    frame.render_stateful_widget(table, area, &mut table_state);
}
