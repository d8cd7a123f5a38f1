//! Renders the form body for the active wizard step.

use super::Frame;
use crate::document::{Control, ControlKind};
use crate::session::Session;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn form(frame: &mut Frame, state: &Session, area: Rect) {
    let card = match state.current_card() {
        Some(card) => card,
        None => return,
    };
    let focused = state.focused_control_id();

    let mut lines: Vec<Line> = vec![];
    if state.finished() {
        lines.push(Line::from(Span::styled(
            "Formulari finalitzat. Gràcies per participar!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    for section in &card.sections {
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for control in &section.controls {
            if !control.visible {
                continue;
            }
            let is_focused = focused.as_deref() == Some(control.id.as_str());
            control_lines(control, is_focused, state.option_cursor(), &mut lines);
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(card.title.clone());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn control_lines(control: &Control, focused: bool, option_cursor: usize, lines: &mut Vec<Line>) {
    let base = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let pointer = if focused { "> " } else { "  " };

    match &control.kind {
        ControlKind::Radio { checked } => {
            let marker = if *checked { "(•)" } else { "( )" };
            lines.push(Line::from(Span::styled(
                format!("{}{} {}", pointer, marker, control.label),
                base,
            )));
        }
        ControlKind::Checkbox { checked } => {
            let marker = if *checked { "[x]" } else { "[ ]" };
            lines.push(Line::from(Span::styled(
                format!("{}{} {}", pointer, marker, control.label),
                base,
            )));
        }
        ControlKind::MultiSelect { options, selected } => {
            lines.push(Line::from(Span::styled(
                format!("{}{}:", pointer, control.label),
                base,
            )));
            for (index, option) in options.iter().enumerate() {
                let marker = if selected.iter().any(|s| s == option) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let cursor = if focused && index == option_cursor {
                    "▸ "
                } else {
                    "  "
                };
                lines.push(Line::from(Span::styled(
                    format!("    {}{} {}", cursor, marker, option),
                    base,
                )));
            }
        }
        ControlKind::Select { value, .. } => {
            lines.push(Line::from(Span::styled(
                format!("{}{}: ◂ {} ▸", pointer, control.label, value),
                base,
            )));
        }
        ControlKind::Text { value } | ControlKind::Number { value, .. } => {
            let caret = if focused { "_" } else { "" };
            lines.push(Line::from(Span::styled(
                format!("{}{}: {}{}", pointer, control.label, value, caret),
                base,
            )));
            if let Some(alert) = &control.alert {
                lines.push(Line::from(Span::styled(
                    format!("      {}", alert),
                    Style::default().fg(Color::Red),
                )));
            }
        }
    }
}
