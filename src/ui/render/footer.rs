//! Renders the footer: navigation controls, key hints and the most
//! recent log line.

use super::Frame;
use crate::session::{ButtonAlignment, Session};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn footer(frame: &mut Frame, state: &Session, log_lines: &[String], area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    buttons(frame, state, chunks[0]);
    status(frame, log_lines, chunks[1]);
}

fn buttons(frame: &mut Frame, state: &Session, area: Rect) {
    let controls = state.nav_controls();
    let button = |label: &str| {
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )
    };

    let mut spans: Vec<Span> = vec![];
    if controls.prev_visible {
        spans.push(button("◂ Anterior (AvPàg↑)"));
        spans.push(Span::raw("   "));
    }
    if controls.next_visible {
        spans.push(button("Següent (Retorn) ▸"));
    }
    if controls.finish_visible {
        spans.push(button("Finalitzar (Retorn)"));
    }

    // A lone forward control sits at the end; a pair spreads out
    let alignment = match controls.alignment {
        ButtonAlignment::End => Alignment::Right,
        ButtonAlignment::Between => Alignment::Center,
    };

    let hints = Line::from(Span::styled(
        "Tab/↑↓ camp · ←→ opció · Espai marcar · Esc sortir",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(
        Paragraph::new(vec![Line::from(spans), hints])
            .alignment(alignment)
            .block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn status(frame: &mut Frame, log_lines: &[String], area: Rect) {
    let latest = log_lines.last().cloned().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            latest,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}
