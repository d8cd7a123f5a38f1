//! In-memory model of the survey form document.
//!
//! Ordered cards (one per wizard step), each holding accordion sections
//! identified by the `accordion<key>` convention, each holding form
//! controls. All reads and writes the session performs against "the
//! form" go through [`Document`].

mod control;
pub mod naming;
pub mod survey;

pub use control::{Control, ControlKind};
pub use naming::NamingError;

/// An accordion section grouping a subset of form controls.
///
#[derive(Clone, Debug)]
pub struct Section {
    /// Conventional identifier, `accordion<key>`
    pub id: String,
    pub title: String,
    pub controls: Vec<Control>,
}

impl Section {
    pub fn new(id: &str, title: &str, controls: Vec<Control>) -> Section {
        Section {
            id: id.to_owned(),
            title: title.to_owned(),
            controls,
        }
    }
}

/// A card groups the accordion sections shown on one wizard step.
///
#[derive(Clone, Debug)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub sections: Vec<Section>,
}

impl Card {
    pub fn new(id: &str, title: &str, sections: Vec<Section>) -> Card {
        Card {
            id: id.to_owned(),
            title: title.to_owned(),
            sections,
        }
    }
}

/// The whole multi-step form document.
///
#[derive(Clone, Debug)]
pub struct Document {
    cards: Vec<Card>,
}

impl Document {
    pub fn new(cards: Vec<Card>) -> Document {
        Document { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    /// Find an accordion section by its key (without the prefix).
    ///
    pub fn section(&self, key: &str) -> Option<&Section> {
        let id = naming::accordion_id(key);
        self.cards
            .iter()
            .flat_map(|c| c.sections.iter())
            .find(|s| s.id == id)
    }

    /// Iterate over every control of the document in order.
    ///
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.cards
            .iter()
            .flat_map(|c| c.sections.iter())
            .flat_map(|s| s.controls.iter())
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls().find(|c| c.id == id)
    }

    pub fn control_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.cards
            .iter_mut()
            .flat_map(|c| c.sections.iter_mut())
            .flat_map(|s| s.controls.iter_mut())
            .find(|c| c.id == id)
    }

    /// Find the control answering to a field key, preferring names over
    /// identifiers the way answers are keyed.
    ///
    pub fn control_id_by_field(&self, field: &str) -> Option<String> {
        self.controls()
            .find(|c| c.field_key() == field)
            .map(|c| c.id.clone())
    }

    /// Whether the referenced control is checked. Missing controls read
    /// as unchecked.
    ///
    pub fn is_checked(&self, id: &str) -> bool {
        self.control(id).map(Control::is_checked).unwrap_or(false)
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(control) = self.control_mut(id) {
            control.visible = visible;
        }
    }

    /// Check a radio control and clear the rest of its same-named group.
    ///
    pub fn check_radio(&mut self, id: &str) {
        let group = match self.control(id) {
            Some(control) => control.name.clone(),
            None => return,
        };
        for card in &mut self.cards {
            for section in &mut card.sections {
                for control in &mut section.controls {
                    if let ControlKind::Radio { checked } = &mut control.kind {
                        if control.name == group {
                            *checked = control.id == id;
                        }
                    }
                }
            }
        }
    }

    pub fn set_checkbox(&mut self, id: &str, value: bool) {
        if let Some(control) = self.control_mut(id) {
            if let ControlKind::Checkbox { checked } = &mut control.kind {
                *checked = value;
            }
        }
    }

    pub fn set_value(&mut self, id: &str, new_value: &str) {
        if let Some(control) = self.control_mut(id) {
            match &mut control.kind {
                ControlKind::Text { value } | ControlKind::Number { value, .. } => {
                    *value = new_value.to_owned();
                }
                ControlKind::Select { options, value } => {
                    if options.iter().any(|o| o == new_value) {
                        *value = new_value.to_owned();
                    }
                }
                _ => {}
            }
        }
    }

    /// Replace a multi-select's selection with the given values, keeping
    /// their order and dropping values that are not offered as options.
    ///
    pub fn set_multi_selection(&mut self, id: &str, values: &[String]) {
        if let Some(control) = self.control_mut(id) {
            if let ControlKind::MultiSelect { options, selected } = &mut control.kind {
                *selected = values
                    .iter()
                    .filter(|v| options.iter().any(|o| o == *v))
                    .cloned()
                    .collect();
            }
        }
    }

    /// Toggle one option of a multi-select. Newly selected options are
    /// appended, preserving selection order.
    ///
    pub fn toggle_multi_option(&mut self, id: &str, option: &str) {
        if let Some(control) = self.control_mut(id) {
            if let ControlKind::MultiSelect { options, selected } = &mut control.kind {
                if !options.iter().any(|o| o == option) {
                    return;
                }
                if let Some(index) = selected.iter().position(|s| s == option) {
                    selected.remove(index);
                } else {
                    selected.push(option.to_owned());
                }
            }
        }
    }
}
