//! Conditional visibility between questions.
//!
//! A control may declare that it depends on the yes/no answer of another
//! question. The controller decodes those declarations into rules, keeps
//! a binding table from controlling radio identifiers to rule indices,
//! and re-resolves the affected rules whenever a controlling radio
//! changes. Rules are resolved once at bind time so initial visibility
//! matches the current answers.

use super::SessionError;
use crate::document::{naming, Document};
use std::collections::HashMap;

/// Outcome of resolving one rule. Hiding is immediate; showing fades
/// the control back in.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityChange {
    Hide,
    Show { animated: bool },
}

/// Relation between a dependent control and its controlling question.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyRule {
    pub dependent_id: String,
    pub question_key: String,
}

/// Resolves dependent-control visibility from controlling answers.
///
pub struct DependencyController {
    rules: Vec<DependencyRule>,
    /// Controlling radio identifier to the rules it influences
    bindings: HashMap<String, Vec<usize>>,
}

impl DependencyController {
    /// Decode every dependency declaration of the document into rules,
    /// build the binding table and resolve all rules once.
    ///
    pub fn bind(document: &mut Document) -> Result<DependencyController, SessionError> {
        let mut rules = Vec::new();
        for control in document.controls() {
            if let Some(declaration) = &control.depends_on {
                let key = naming::question_key(declaration)?;
                rules.push(DependencyRule {
                    dependent_id: control.id.clone(),
                    question_key: key.to_owned(),
                });
            }
        }

        let mut bindings: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for control_id in [
                naming::true_control_id(&rule.question_key),
                naming::false_control_id(&rule.question_key),
            ] {
                if document.control(&control_id).is_some() {
                    bindings.entry(control_id).or_default().push(index);
                }
            }
        }

        let controller = DependencyController { rules, bindings };
        controller.apply_all(document);
        Ok(controller)
    }

    /// Visibility policy: a checked "no" hides the dependent; a checked
    /// "yes", or no answer at all, shows it (fail-open).
    ///
    pub fn resolve(true_checked: bool, false_checked: bool) -> VisibilityChange {
        if false_checked && !true_checked {
            VisibilityChange::Hide
        } else {
            VisibilityChange::Show { animated: true }
        }
    }

    /// Re-resolve the rules bound to the given controlling identifier.
    ///
    pub fn notify(&self, document: &mut Document, control_id: &str) {
        if let Some(indices) = self.bindings.get(control_id) {
            for index in indices.clone() {
                self.apply(document, index);
            }
        }
    }

    /// Resolve every rule against the document's current answers.
    ///
    pub fn apply_all(&self, document: &mut Document) {
        for index in 0..self.rules.len() {
            self.apply(document, index);
        }
    }

    pub fn rules(&self) -> &[DependencyRule] {
        &self.rules
    }

    fn apply(&self, document: &mut Document, index: usize) -> Option<VisibilityChange> {
        let rule = self.rules.get(index)?;
        let true_checked = document.is_checked(&naming::true_control_id(&rule.question_key));
        let false_checked = document.is_checked(&naming::false_control_id(&rule.question_key));
        let change = DependencyController::resolve(true_checked, false_checked);
        document.set_visible(
            &rule.dependent_id,
            matches!(change, VisibilityChange::Show { .. }),
        );
        Some(change)
    }
}
