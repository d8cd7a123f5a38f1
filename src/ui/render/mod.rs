//! Top-level render function and layout.

mod footer;
mod form;

use super::Frame;
use crate::session::Session;
use footer::footer;
use form::form;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the whole interface for the current session state.
///
pub fn render(frame: &mut Frame, state: &Session, log_lines: &[String]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .split(frame.size());

    header(frame, state, chunks[0]);
    form(frame, state, chunks[1]);
    footer(frame, state, log_lines, chunks[2]);
}

fn header(frame: &mut Frame, state: &Session, area: ratatui::layout::Rect) {
    let step = format!("Pas {} de {}", state.step_index() + 1, state.step_count());
    let badge = if state.registered() {
        Span::styled(" · respostes recuperades", Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };
    let title = Line::from(vec![
        Span::styled(
            "Enquesta d'impacte miner",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  —  "),
        Span::raw(step),
        badge,
    ]);
    frame.render_widget(
        Paragraph::new(vec![title]).alignment(Alignment::Center),
        area,
    );
}
