//! Naming-convention parser for form element identifiers.
//!
//! The survey document follows a small set of identifier conventions:
//! accordion containers are `accordion<key>`, the yes/no radio pair of a
//! question is `true-<key>` / `false-<key>`, and dependency declarations
//! reference the controlling question as `question-<key>` (the
//! `question-` prefix is optional). Every decode validates the key and
//! fails with a clear error instead of silently mis-keying.

use regex::Regex;
use std::sync::OnceLock;

/// Prefix carried by accordion section identifiers.
pub const ACCORDION_PREFIX: &str = "accordion";

/// Prefix of the "yes" radio control of a question.
pub const TRUE_PREFIX: &str = "true-";

/// Prefix of the "no" radio control of a question.
pub const FALSE_PREFIX: &str = "false-";

/// Optional prefix of a dependency declaration.
pub const QUESTION_PREFIX: &str = "question-";

/// Errors produced when decoding conventional identifiers.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NamingError {
    /// Identifier does not start with the expected prefix
    #[error("identifier '{id}' does not carry the '{prefix}' prefix")]
    MissingPrefix { id: String, prefix: &'static str },

    /// Identifier carries the prefix but nothing after it
    #[error("identifier '{id}' has an empty key after the '{prefix}' prefix")]
    EmptyKey { id: String, prefix: &'static str },

    /// Key contains characters outside the allowed set
    #[error("identifier '{0}' contains characters outside [A-Za-z0-9_-]")]
    InvalidKey(String),
}

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static pattern is valid"))
}

fn strip_and_validate<'a>(id: &'a str, prefix: &'static str) -> Result<&'a str, NamingError> {
    let key = id.strip_prefix(prefix).ok_or_else(|| NamingError::MissingPrefix {
        id: id.to_owned(),
        prefix,
    })?;
    if key.is_empty() {
        return Err(NamingError::EmptyKey {
            id: id.to_owned(),
            prefix,
        });
    }
    if !key_pattern().is_match(key) {
        return Err(NamingError::InvalidKey(id.to_owned()));
    }
    Ok(key)
}

/// Returns true when the identifier carries the accordion prefix.
///
pub fn is_accordion_id(id: &str) -> bool {
    id.starts_with(ACCORDION_PREFIX)
}

/// Decode the section key from an `accordion<key>` identifier.
///
pub fn accordion_key(id: &str) -> Result<&str, NamingError> {
    strip_and_validate(id, ACCORDION_PREFIX)
}

/// Build the accordion identifier for a section key.
///
pub fn accordion_id(key: &str) -> String {
    format!("{}{}", ACCORDION_PREFIX, key)
}

/// Decode a radio control identifier into its polarity and question key.
///
pub fn radio_polarity(id: &str) -> Result<(bool, &str), NamingError> {
    if id.starts_with(TRUE_PREFIX) {
        return Ok((true, strip_and_validate(id, TRUE_PREFIX)?));
    }
    if id.starts_with(FALSE_PREFIX) {
        return Ok((false, strip_and_validate(id, FALSE_PREFIX)?));
    }
    Err(NamingError::MissingPrefix {
        id: id.to_owned(),
        prefix: TRUE_PREFIX,
    })
}

/// Decode the question key from a dependency declaration. The
/// `question-` prefix is optional in declarations.
///
pub fn question_key(declaration: &str) -> Result<&str, NamingError> {
    let key = declaration
        .strip_prefix(QUESTION_PREFIX)
        .unwrap_or(declaration);
    if key.is_empty() {
        return Err(NamingError::EmptyKey {
            id: declaration.to_owned(),
            prefix: QUESTION_PREFIX,
        });
    }
    if !key_pattern().is_match(key) {
        return Err(NamingError::InvalidKey(declaration.to_owned()));
    }
    Ok(key)
}

/// Build the "yes" radio identifier for a question key.
///
pub fn true_control_id(key: &str) -> String {
    format!("{}{}", TRUE_PREFIX, key)
}

/// Build the "no" radio identifier for a question key.
///
pub fn false_control_id(key: &str) -> String {
    format!("{}{}", FALSE_PREFIX, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accordion_key_roundtrip() {
        assert_eq!(accordion_key("accordionWater").unwrap(), "Water");
        assert_eq!(accordion_id("Water"), "accordionWater");
        assert!(is_accordion_id("accordionWater"));
        assert!(!is_accordion_id("collapseWater"));
    }

    #[test]
    fn accordion_key_rejects_malformed_ids() {
        assert_eq!(
            accordion_key("sidebar"),
            Err(NamingError::MissingPrefix {
                id: "sidebar".to_owned(),
                prefix: ACCORDION_PREFIX,
            })
        );
        assert_eq!(
            accordion_key("accordion"),
            Err(NamingError::EmptyKey {
                id: "accordion".to_owned(),
                prefix: ACCORDION_PREFIX,
            })
        );
        assert!(matches!(
            accordion_key("accordion one two"),
            Err(NamingError::InvalidKey(_))
        ));
    }

    #[test]
    fn radio_polarity_decodes_both_sides() {
        assert_eq!(radio_polarity("true-consultation").unwrap(), (true, "consultation"));
        assert_eq!(radio_polarity("false-consultation").unwrap(), (false, "consultation"));
        assert!(radio_polarity("maybe-consultation").is_err());
        assert!(radio_polarity("true-").is_err());
    }

    #[test]
    fn question_key_prefix_is_optional() {
        assert_eq!(question_key("question-consultation").unwrap(), "consultation");
        assert_eq!(question_key("consultation").unwrap(), "consultation");
        assert!(question_key("question-").is_err());
        assert!(question_key("bad key!").is_err());
    }
}
