//! Collects answers from the document before a submission.
//!
//! `collect_section` is the per-section field collector; `collect_card`
//! aggregates every accordion section of a card into the nested mapping
//! the dimension endpoints expect. Both treat missing containers as
//! empty rather than as errors.

use super::{Answer, FormAnswers, SectionAnswers, SessionError};
use crate::document::{naming, Control, ControlKind, Document};

/// Return the answers of one accordion section, keyed by field name.
/// A section key with no matching container yields an empty mapping.
///
pub fn collect_section(document: &Document, key: &str) -> SectionAnswers {
    let mut values = SectionAnswers::new();
    let section = match document.section(key) {
        Some(section) => section,
        None => return values,
    };
    for control in &section.controls {
        collect_control(control, &mut values);
    }
    values
}

fn collect_control(control: &Control, values: &mut SectionAnswers) {
    match &control.kind {
        // Only the checked member of a radio group contributes; its code
        // is derived from the identifier's polarity prefix.
        ControlKind::Radio { checked } => {
            if *checked {
                let code = match naming::radio_polarity(&control.id) {
                    Ok((true, _)) => "on",
                    _ => "off",
                };
                values.insert(control.field_key().to_owned(), Answer::text(code));
            }
        }
        ControlKind::Checkbox { checked } => {
            values.insert(control.field_key().to_owned(), Answer::Flag(*checked));
        }
        // Multi-selects are keyed by identifier, never by name
        ControlKind::MultiSelect { selected, .. } => {
            values.insert(control.id.clone(), Answer::Multi(selected.clone()));
        }
        ControlKind::Select { value, .. }
        | ControlKind::Number { value, .. }
        | ControlKind::Text { value } => {
            values.insert(control.field_key().to_owned(), Answer::text(value));
        }
    }
}

/// Aggregate every accordion section of a card into [`FormAnswers`]. A
/// missing card, or a card without accordion sections, yields an empty
/// mapping; a section carrying the accordion prefix with a malformed key
/// is an error.
///
pub fn collect_card(document: &Document, card_id: &str) -> Result<FormAnswers, SessionError> {
    let mut values = FormAnswers::new();
    let card = match document.card(card_id) {
        Some(card) => card,
        None => return Ok(values),
    };
    for section in &card.sections {
        if !naming::is_accordion_id(&section.id) {
            continue;
        }
        let key = naming::accordion_key(&section.id)?;
        values.insert(key.to_owned(), collect_section(document, key));
    }
    Ok(values)
}
