//! Form-session-specific error types.

use crate::document::NamingError;

/// Errors that can occur while operating on the form session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A conventional identifier failed to decode
    #[error("Naming convention error: {0}")]
    Naming(#[from] NamingError),

    /// Multi-select restore input was neither a JSON string array nor a
    /// comma-separated list
    #[error("Malformed multi-select value list: {0}")]
    MalformedValueList(String),

    /// A referenced control does not exist in the document
    #[error("Unknown control: {0}")]
    #[allow(dead_code)]
    UnknownControl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        let error = SessionError::MalformedValueList("['a']".to_owned());
        assert!(error.to_string().contains("Malformed multi-select"));
        assert!(error.to_string().contains("['a']"));

        let error = SessionError::UnknownControl("phase".to_owned());
        assert!(error.to_string().contains("Unknown control"));

        let error: SessionError = NamingError::InvalidKey("x y".to_owned()).into();
        assert!(error.to_string().contains("Naming convention error"));
    }
}
