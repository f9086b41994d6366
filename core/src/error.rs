//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Every variant is fatal for the unit being processed: the engine performs
//! single in-memory edits, so nothing here is ever retried.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML (de)serialization errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A declaration was not of the kind the engine expected, or carried no marker.
    #[from(ignore)]
    #[display("Invariant Violation: {_0}")]
    InvariantViolation(String),

    /// A declaration, unit or node index does not resolve to any tree.
    #[from(ignore)]
    #[display("Missing Tree: {_0}")]
    MissingTree(String),

    /// A marker annotation could not be bound to its schema.
    #[from(ignore)]
    #[display("Binding Error: {_0}")]
    Binding(String),

    /// A qualified name or import path is malformed.
    #[from(ignore)]
    #[display("Invalid Name: {_0}")]
    InvalidName(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_json_conversion() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Json(_)));
    }

    #[test]
    fn test_invariant_display() {
        let app_err = AppError::InvariantViolation("score is a method".into());
        assert_eq!(
            format!("{}", app_err),
            "Invariant Violation: score is a method"
        );
    }
}
