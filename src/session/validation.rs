//! Numeric range validation with inline Catalan messages.

use crate::document::{Control, ControlKind};

/// Check a raw input value against optional bounds. Returns the inline
/// message when the value is out of range, None when it is acceptable.
/// Non-numeric input is not this check's concern and passes.
///
pub fn check_range(value: &str, min: Option<f64>, max: Option<f64>) -> Option<String> {
    let value: f64 = value.trim().parse().ok()?;
    let below = min.map_or(false, |m| value < m);
    let above = max.map_or(false, |m| value > m);
    if !below && !above {
        return None;
    }
    Some(match (min, max) {
        (Some(min), Some(max)) => format!("El valor ha d'estar entre {} i {}.", min, max),
        (Some(min), None) => format!("El valor ha de ser mínim {}.", min),
        (None, Some(max)) => format!("El valor ha de ser màxim {}.", max),
        (None, None) => unreachable!("no bound can be violated without bounds"),
    })
}

/// Validate a numeric control in place, marking it invalid with its
/// inline message or clearing both. Returns whether it is valid. Other
/// control kinds are always valid.
///
pub fn validate_control(control: &mut Control) -> bool {
    let message = match &control.kind {
        ControlKind::Number { value, min, max } => check_range(value, *min, *max),
        _ => None,
    };
    match message {
        Some(message) => {
            control.invalid = true;
            control.alert = Some(message);
            false
        }
        None => {
            control.invalid = false;
            control.alert = None;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_values_produce_the_interval_message() {
        let message = check_range("15", Some(0.0), Some(10.0)).unwrap();
        assert_eq!(message, "El valor ha d'estar entre 0 i 10.");
        let message = check_range("-1", Some(0.0), Some(10.0)).unwrap();
        assert_eq!(message, "El valor ha d'estar entre 0 i 10.");
    }

    #[test]
    fn in_range_and_non_numeric_values_pass() {
        assert!(check_range("5", Some(0.0), Some(10.0)).is_none());
        assert!(check_range("0", Some(0.0), Some(10.0)).is_none());
        assert!(check_range("10", Some(0.0), Some(10.0)).is_none());
        assert!(check_range("", Some(0.0), Some(10.0)).is_none());
        assert!(check_range("abc", Some(0.0), Some(10.0)).is_none());
    }

    #[test]
    fn single_bound_messages() {
        assert_eq!(
            check_range("-3", Some(0.0), None).unwrap(),
            "El valor ha de ser mínim 0."
        );
        assert_eq!(
            check_range("120", None, Some(100.0)).unwrap(),
            "El valor ha de ser màxim 100."
        );
    }

    #[test]
    fn validate_control_marks_and_clears() {
        let mut control =
            Control::number("rating", "rating", "Valoració", Some(0.0), Some(10.0));
        if let ControlKind::Number { value, .. } = &mut control.kind {
            *value = "15".to_owned();
        }
        assert!(!validate_control(&mut control));
        assert!(control.invalid);
        assert_eq!(
            control.alert.as_deref(),
            Some("El valor ha d'estar entre 0 i 10.")
        );

        if let ControlKind::Number { value, .. } = &mut control.kind {
            *value = "5".to_owned();
        }
        assert!(validate_control(&mut control));
        assert!(!control.invalid);
        assert!(control.alert.is_none());
    }
}
