//! Form control types.

/// Specifies the kind of a form control together with its current value.
///
#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
    /// One member of a same-named yes/no radio group
    Radio { checked: bool },
    /// Independent boolean toggle
    Checkbox { checked: bool },
    /// Multi-select with an ordered set of selected option values
    MultiSelect {
        options: Vec<String>,
        selected: Vec<String>,
    },
    /// Single-choice select
    Select { options: Vec<String>, value: String },
    /// Numeric input with optional bounds
    Number {
        value: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Free-text input
    Text { value: String },
}

/// A single input of the survey document.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub id: String,
    pub name: Option<String>,
    pub label: String,
    pub kind: ControlKind,
    /// Dependency declaration referencing a controlling question key,
    /// optionally carrying the `question-` prefix
    pub depends_on: Option<String>,
    pub visible: bool,
    pub invalid: bool,
    /// Inline validation message shown under the control
    pub alert: Option<String>,
}

impl Control {
    fn new(id: &str, name: Option<&str>, label: &str, kind: ControlKind) -> Control {
        Control {
            id: id.to_owned(),
            name: name.map(str::to_owned),
            label: label.to_owned(),
            kind,
            depends_on: None,
            visible: true,
            invalid: false,
            alert: None,
        }
    }

    /// Return a radio control belonging to the named group.
    ///
    pub fn radio(id: &str, name: &str, label: &str, checked: bool) -> Control {
        Control::new(id, Some(name), label, ControlKind::Radio { checked })
    }

    /// Return an unchecked checkbox control.
    ///
    pub fn checkbox(id: &str, name: &str, label: &str) -> Control {
        Control::new(id, Some(name), label, ControlKind::Checkbox { checked: false })
    }

    /// Return a multi-select control with nothing selected.
    ///
    pub fn multi_select(id: &str, label: &str, options: &[&str]) -> Control {
        Control::new(
            id,
            None,
            label,
            ControlKind::MultiSelect {
                options: options.iter().map(|o| (*o).to_owned()).collect(),
                selected: vec![],
            },
        )
    }

    /// Return a single-choice select defaulting to the first option.
    ///
    pub fn select(id: &str, name: &str, label: &str, options: &[&str]) -> Control {
        Control::new(
            id,
            Some(name),
            label,
            ControlKind::Select {
                options: options.iter().map(|o| (*o).to_owned()).collect(),
                value: options.first().map(|o| (*o).to_owned()).unwrap_or_default(),
            },
        )
    }

    /// Return an empty numeric input with optional bounds.
    ///
    pub fn number(id: &str, name: &str, label: &str, min: Option<f64>, max: Option<f64>) -> Control {
        Control::new(
            id,
            Some(name),
            label,
            ControlKind::Number {
                value: String::new(),
                min,
                max,
            },
        )
    }

    /// Return an empty free-text input.
    ///
    pub fn text(id: &str, name: &str, label: &str) -> Control {
        Control::new(id, Some(name), label, ControlKind::Text { value: String::new() })
    }

    /// Attach a dependency declaration to the control.
    ///
    pub fn depends_on(mut self, declaration: &str) -> Control {
        self.depends_on = Some(declaration.to_owned());
        self
    }

    /// The key under which this control's answer is reported: its name
    /// when present, its identifier otherwise.
    ///
    pub fn field_key(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether a radio or checkbox control is currently checked.
    ///
    pub fn is_checked(&self) -> bool {
        matches!(
            self.kind,
            ControlKind::Radio { checked: true } | ControlKind::Checkbox { checked: true }
        )
    }

    /// Current textual value of a text, number or select control.
    ///
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            ControlKind::Text { value }
            | ControlKind::Number { value, .. }
            | ControlKind::Select { value, .. } => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_key_prefers_name() {
        let control = Control::text("project_name_input", "project_name", "Nom del projecte");
        assert_eq!(control.field_key(), "project_name");

        let control = Control::multi_select("channels", "Canals", &["web", "premsa"]);
        assert_eq!(control.field_key(), "channels");
    }

    #[test]
    fn select_defaults_to_first_option() {
        let control = Control::select("phase", "phase", "Fase", &["Exploració", "Explotació"]);
        assert_eq!(control.value(), Some("Exploració"));
    }

    #[test]
    fn controls_start_visible_and_valid() {
        let control = Control::checkbox("restoration", "restoration", "Pla de restauració")
            .depends_on("question-permits");
        assert!(control.visible);
        assert!(!control.invalid);
        assert_eq!(control.depends_on.as_deref(), Some("question-permits"));
    }
}
