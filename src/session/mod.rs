//! Form-session state management module.
//!
//! This module owns all mutable form state: the current wizard step,
//! the conditional visibility of dependent questions, and the
//! collection of answers into the payloads sent to the server. The [`Session`] struct is the single owner;
//! every user interaction reaches it through [`Session::dispatch`].

mod answers;
mod collector;
mod dependencies;
mod error;
mod navigation;
mod validation;

pub use answers::{
    parse_multi_values, Answer, DimensionPayload, FormAnswers, MineLocation, OverviewPayload,
    SectionAnswers,
};
pub use collector::{collect_card, collect_section};
pub use dependencies::{DependencyController, DependencyRule, VisibilityChange};
pub use error::SessionError;
pub use navigation::{ButtonAlignment, NavControls, StepNavigator};
pub use validation::{check_range, validate_control};

use crate::document::{naming, Card, ControlKind, Document};
use log::*;

/// User interactions the session can process.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    FocusNext,
    FocusPrev,
    /// Check the focused radio, toggle the focused checkbox, or toggle
    /// the highlighted option of the focused multi-select
    Toggle,
    /// Move the option highlight (multi-select) or cycle the value
    /// (select) forward
    OptionNext,
    /// Same, backwards
    OptionPrev,
    Input(char),
    Backspace,
    Advance,
    Retreat,
}

/// Explicit owner of the form-session state.
///
pub struct Session {
    document: Document,
    navigator: StepNavigator,
    dependencies: DependencyController,
    fingerprint: String,
    registered: bool,
    finished: bool,
    focus: usize,
    option_cursor: usize,
}

impl Session {
    /// Build a session over the given document, binding dependency rules
    /// and placing the navigator on the first step.
    ///
    pub fn new(mut document: Document, fingerprint: String) -> Result<Session, SessionError> {
        let dependencies = DependencyController::bind(&mut document)?;
        let navigator = StepNavigator::new(document.cards().len());
        Ok(Session {
            document,
            navigator,
            dependencies,
            fingerprint,
            registered: false,
            finished: false,
            focus: 0,
            option_cursor: 0,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn registered(&self) -> bool {
        self.registered
    }

    pub fn set_registered(&mut self, registered: bool) {
        self.registered = registered;
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn set_finished(&mut self) {
        self.finished = true;
    }

    pub fn nav_controls(&self) -> NavControls {
        self.navigator.controls()
    }

    pub fn step_index(&self) -> usize {
        self.navigator.current_index()
    }

    pub fn step_count(&self) -> usize {
        self.navigator.step_count()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.document.cards().get(self.navigator.current_index())
    }

    /// Identifiers of the currently visible controls of the active step,
    /// in document order.
    ///
    pub fn visible_control_ids(&self) -> Vec<String> {
        match self.current_card() {
            Some(card) => card
                .sections
                .iter()
                .flat_map(|s| s.controls.iter())
                .filter(|c| c.visible)
                .map(|c| c.id.clone())
                .collect(),
            None => vec![],
        }
    }

    pub fn focused_control_id(&self) -> Option<String> {
        let ids = self.visible_control_ids();
        if ids.is_empty() {
            return None;
        }
        Some(ids[self.focus.min(ids.len() - 1)].clone())
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    /// Single entry point for user interactions.
    ///
    pub fn dispatch(&mut self, event: FormEvent) {
        match event {
            FormEvent::FocusNext => self.focus_next(),
            FormEvent::FocusPrev => self.focus_prev(),
            FormEvent::Toggle => self.toggle_focused(),
            FormEvent::OptionNext => self.move_option(1),
            FormEvent::OptionPrev => self.move_option(-1),
            FormEvent::Input(c) => self.input_char(c),
            FormEvent::Backspace => self.backspace(),
            FormEvent::Advance => {
                self.advance_step();
            }
            FormEvent::Retreat => {
                self.retreat_step();
            }
        }
    }

    pub fn advance_step(&mut self) -> bool {
        let moved = self.navigator.advance();
        if moved {
            self.reset_focus();
        }
        moved
    }

    pub fn retreat_step(&mut self) -> bool {
        let moved = self.navigator.retreat();
        if moved {
            self.reset_focus();
        }
        moved
    }

    fn reset_focus(&mut self) {
        self.focus = 0;
        self.option_cursor = 0;
    }

    fn focus_next(&mut self) {
        let count = self.visible_control_ids().len();
        if count > 0 && self.focus + 1 < count {
            self.focus += 1;
            self.option_cursor = 0;
        }
    }

    fn focus_prev(&mut self) {
        if self.focus > 0 {
            self.focus -= 1;
            self.option_cursor = 0;
        }
    }

    fn toggle_focused(&mut self) {
        let id = match self.focused_control_id() {
            Some(id) => id,
            None => return,
        };
        let kind = match self.document.control(&id) {
            Some(control) => control.kind.clone(),
            None => return,
        };
        match kind {
            ControlKind::Radio { .. } => {
                self.document.check_radio(&id);
            }
            ControlKind::Checkbox { checked } => {
                self.document.set_checkbox(&id, !checked);
            }
            ControlKind::MultiSelect { options, .. } => {
                if let Some(option) = options.get(self.option_cursor).cloned() {
                    self.document.toggle_multi_option(&id, &option);
                }
            }
            _ => return,
        }
        self.control_changed(&id);
    }

    fn move_option(&mut self, delta: isize) {
        let id = match self.focused_control_id() {
            Some(id) => id,
            None => return,
        };
        let kind = match self.document.control(&id) {
            Some(control) => control.kind.clone(),
            None => return,
        };
        match kind {
            ControlKind::MultiSelect { options, .. } => {
                if options.is_empty() {
                    return;
                }
                let count = options.len() as isize;
                let cursor = self.option_cursor as isize + delta;
                self.option_cursor = cursor.rem_euclid(count) as usize;
            }
            ControlKind::Select { options, value } => {
                if options.is_empty() {
                    return;
                }
                let count = options.len() as isize;
                let current = options.iter().position(|o| *o == value).unwrap_or(0) as isize;
                let next = (current + delta).rem_euclid(count) as usize;
                let next_value = options[next].clone();
                self.document.set_value(&id, &next_value);
                self.control_changed(&id);
            }
            _ => {}
        }
    }

    fn input_char(&mut self, c: char) {
        let id = match self.focused_control_id() {
            Some(id) => id,
            None => return,
        };
        let mut changed = false;
        if let Some(control) = self.document.control_mut(&id) {
            match &mut control.kind {
                ControlKind::Text { value } | ControlKind::Number { value, .. } => {
                    value.push(c);
                    changed = true;
                }
                _ => {}
            }
        }
        if changed {
            self.control_changed(&id);
        }
    }

    fn backspace(&mut self) {
        let id = match self.focused_control_id() {
            Some(id) => id,
            None => return,
        };
        let mut changed = false;
        if let Some(control) = self.document.control_mut(&id) {
            match &mut control.kind {
                ControlKind::Text { value } | ControlKind::Number { value, .. } => {
                    if value.pop().is_some() {
                        changed = true;
                    }
                }
                _ => {}
            }
        }
        if changed {
            self.control_changed(&id);
        }
    }

    /// Post-change pipeline: controlling radios re-resolve their
    /// dependents, numeric inputs re-validate their bounds.
    ///
    fn control_changed(&mut self, id: &str) {
        let is_radio = matches!(
            self.document.control(id).map(|c| &c.kind),
            Some(ControlKind::Radio { .. })
        );
        if is_radio {
            self.dependencies.notify(&mut self.document, id);
        }
        if let Some(control) = self.document.control_mut(id) {
            validate_control(control);
        }
    }

    /// Answers of one card, aggregated per accordion section.
    ///
    pub fn card_answers(&self, card_id: &str) -> Result<FormAnswers, SessionError> {
        collect_card(&self.document, card_id)
    }

    /// Build the `/update-overview/` body from the overview controls.
    ///
    pub fn overview_payload(&self) -> OverviewPayload {
        let value_of = |id: &str| -> String {
            self.document
                .control(id)
                .and_then(|c| c.value())
                .unwrap_or_default()
                .to_owned()
        };
        OverviewPayload {
            fingerprint: self.fingerprint.clone(),
            project_name: value_of("project_name"),
            company_name: value_of("company_name"),
            mine_ubication: MineLocation {
                latitude: value_of("latitude"),
                longitude: value_of("longitude"),
            },
            phase: value_of("phase"),
        }
    }

    /// Build a dimension update body for the given card.
    ///
    pub fn dimension_payload(&self, card_id: &str) -> Result<DimensionPayload, SessionError> {
        Ok(DimensionPayload {
            fingerprint: self.fingerprint.clone(),
            sections: self.card_answers(card_id)?,
        })
    }

    /// Feed previously saved answers back into the document. Unknown
    /// fields and malformed values are logged and skipped; restoration
    /// never fails the session.
    ///
    pub fn restore_form(&mut self, form: &serde_json::Value) {
        let map = match form.as_object() {
            Some(map) => map,
            None => {
                warn!("Saved form data is not an object; skipping restore.");
                return;
            }
        };
        for (field, value) in map {
            if let Some(nested) = value.as_object() {
                // Section or sub-object: restore its fields recursively
                for (field, value) in nested {
                    if value.is_object() {
                        self.restore_form(value);
                    } else {
                        self.restore_field(field, value);
                    }
                }
            } else {
                self.restore_field(field, value);
            }
        }
        self.dependencies.apply_all(&mut self.document);
    }

    fn restore_field(&mut self, field: &str, value: &serde_json::Value) {
        let id = match self.document.control_id_by_field(field) {
            Some(id) => id,
            None => {
                debug!("Ignoring saved value for unknown field '{}'.", field);
                return;
            }
        };
        let kind = match self.document.control(&id) {
            Some(control) => control.kind.clone(),
            None => return,
        };
        match (&kind, value) {
            (ControlKind::Checkbox { .. }, serde_json::Value::Bool(b)) => {
                self.document.set_checkbox(&id, *b);
            }
            (ControlKind::Radio { .. }, serde_json::Value::String(code)) => {
                self.restore_radio(field, code);
            }
            (ControlKind::MultiSelect { .. }, serde_json::Value::Array(items)) => {
                let values: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect();
                self.document.set_multi_selection(&id, &values);
            }
            (ControlKind::MultiSelect { .. }, serde_json::Value::String(raw)) => {
                match parse_multi_values(raw) {
                    Ok(values) => self.document.set_multi_selection(&id, &values),
                    Err(e) => warn!("Could not restore multi-select '{}': {}", field, e),
                }
            }
            (_, serde_json::Value::String(text)) => {
                self.document.set_value(&id, text);
            }
            (_, serde_json::Value::Number(number)) => {
                self.document.set_value(&id, &number.to_string());
            }
            _ => {
                warn!("Ignoring saved value of unexpected shape for '{}'.", field);
            }
        }
        self.control_changed(&id);
    }

    /// Restore a radio group from its `"on"`/`"off"` code by checking
    /// the matching polarity control.
    ///
    fn restore_radio(&mut self, group: &str, code: &str) {
        let wanted = code == "on";
        let id = self
            .document
            .controls()
            .filter(|c| matches!(c.kind, ControlKind::Radio { .. }))
            .filter(|c| c.name.as_deref() == Some(group))
            .find(|c| matches!(naming::radio_polarity(&c.id), Ok((polarity, _)) if polarity == wanted))
            .map(|c| c.id.clone());
        match id {
            Some(id) => {
                self.document.check_radio(&id);
                self.control_changed(&id);
            }
            None => warn!("No radio of group '{}' matches code '{}'.", group, code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::survey;
    use serde_json::json;

    fn session() -> Session {
        Session::new(survey::default_survey(), "deadbeef".to_owned()).unwrap()
    }

    #[test]
    fn dispatch_moves_focus_over_visible_controls() {
        let mut session = session();
        let first = session.focused_control_id().unwrap();
        session.dispatch(FormEvent::FocusNext);
        let second = session.focused_control_id().unwrap();
        assert_ne!(first, second);
        session.dispatch(FormEvent::FocusPrev);
        assert_eq!(session.focused_control_id().unwrap(), first);
    }

    #[test]
    fn advancing_submits_snapshots_independently_of_focus() {
        let mut session = session();
        assert_eq!(session.step_index(), 0);
        session.dispatch(FormEvent::Advance);
        assert_eq!(session.step_index(), 1);
        session.dispatch(FormEvent::Retreat);
        assert_eq!(session.step_index(), 0);
        // Silent at the first step
        session.dispatch(FormEvent::Retreat);
        assert_eq!(session.step_index(), 0);
    }

    #[test]
    fn typing_into_a_numeric_control_validates_bounds() {
        let mut session = session();
        session.dispatch(FormEvent::Advance);
        // Focus the local jobs percentage on the socioeconomic card
        let id = session.focused_control_id().unwrap();
        assert_eq!(id, "local_jobs_pct");
        for c in "150".chars() {
            session.dispatch(FormEvent::Input(c));
        }
        let control = session.document().control("local_jobs_pct").unwrap();
        assert!(control.invalid);
        assert_eq!(
            control.alert.as_deref(),
            Some("El valor ha d'estar entre 0 i 100.")
        );
        session.dispatch(FormEvent::Backspace);
        let control = session.document().control("local_jobs_pct").unwrap();
        assert!(!control.invalid);
    }

    #[test]
    fn answering_no_hides_the_dependent_from_the_focus_order() {
        let mut session = session();
        session.dispatch(FormEvent::Advance);
        assert!(session
            .visible_control_ids()
            .contains(&"consultation_channels".to_owned()));

        // Focus the "no" radio of the consultation question and check it
        while session.focused_control_id().as_deref() != Some("false-consultation") {
            session.dispatch(FormEvent::FocusNext);
        }
        session.dispatch(FormEvent::Toggle);
        assert!(!session
            .visible_control_ids()
            .contains(&"consultation_channels".to_owned()));
    }

    #[test]
    fn overview_payload_reads_the_overview_controls() {
        let mut session = session();
        for c in "Mina Nord".chars() {
            session.dispatch(FormEvent::Input(c));
        }
        let payload = session.overview_payload();
        assert_eq!(payload.project_name, "Mina Nord");
        assert_eq!(payload.fingerprint, "deadbeef");
        assert_eq!(payload.phase, "Exploració");
    }

    #[test]
    fn dimension_payload_nests_sections_by_key() {
        let session = session();
        let payload = session.dimension_payload(survey::ENVIRONMENT_CARD).unwrap();
        assert!(payload.sections.contains_key("Water"));
        assert!(payload.sections.contains_key("Biodiversity"));
    }

    #[test]
    fn restore_form_round_trips_collected_answers() {
        let mut original = session();
        original.document.check_radio("true-consultation");
        original.dependencies.apply_all(&mut original.document);
        original.document.set_multi_selection(
            "consultation_channels",
            &["Premsa local".to_owned(), "Enquestes".to_owned()],
        );
        original.document.set_checkbox("training_programs", true);
        original.document.set_value("community_rating", "8");

        let saved = serde_json::to_value(
            original.card_answers(survey::SOCIOECONOMIC_CARD).unwrap(),
        )
        .unwrap();

        let mut restored = session();
        restored.restore_form(&saved);
        assert_eq!(
            restored.card_answers(survey::SOCIOECONOMIC_CARD).unwrap(),
            original.card_answers(survey::SOCIOECONOMIC_CARD).unwrap()
        );
    }

    #[test]
    fn restore_form_accepts_the_stringified_multi_select_shape() {
        let mut session = session();
        session.restore_form(&json!({
            "Biodiversity": {
                "protected_areas": "on",
                "mitigation_measures": "[\"Revegetació\", \"Corredors ecològics\"]",
            }
        }));
        assert!(session.document().is_checked("true-protected_areas"));
        match &session.document().control("mitigation_measures").unwrap().kind {
            ControlKind::MultiSelect { selected, .. } => {
                assert_eq!(
                    selected,
                    &["Revegetació".to_owned(), "Corredors ecològics".to_owned()]
                );
            }
            _ => panic!("expected a multi-select"),
        }
    }

    #[test]
    fn restore_form_skips_malformed_values_without_failing() {
        let mut session = session();
        session.restore_form(&json!({
            "Biodiversity": {
                "mitigation_measures": "['Revegetació']",
                "unknown_field": "x",
            }
        }));
        match &session.document().control("mitigation_measures").unwrap().kind {
            ControlKind::MultiSelect { selected, .. } => assert!(selected.is_empty()),
            _ => panic!("expected a multi-select"),
        }
    }
}
