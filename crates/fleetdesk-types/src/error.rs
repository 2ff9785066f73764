use thiserror::Error;

/// Failure to turn a wire value into one of the canonical entity shapes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NormalizeError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("incomplete permission matrix: {0}")]
    IncompletePermissions(String),

    #[error("expected a list response")]
    NotAList,

    #[error("expected an object response")]
    NotAnObject,

    #[error("request rejected by server: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
}
