//! List building error types.

use thiserror::Error;

/// Errors raised while assembling a list query or resolving row values.
///
/// Every variant is a configuration error: the list definition references
/// something that does not exist or is malformed. None of them are
/// recoverable at runtime, and none of them leave a partially built query
/// behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    /// A field or filter path references a join that was never registered.
    #[error("path '{path}' does not match any registered join")]
    UnresolvedJoinPath { path: String },

    /// A list field references a selector type that is not in the registry.
    #[error("field '{field_id}' references unknown selector type '{name}'")]
    UnknownSelector { field_id: String, name: String },

    /// A filter field references a filter type that is not in the registry.
    #[error("filter '{field_id}' references unknown filter type '{name}'")]
    UnknownFilter { field_id: String, name: String },

    /// Filter options failed schema resolution (unknown key or bad value).
    #[error("invalid options for filter '{field_id}': {message}")]
    InvalidOptions { field_id: String, message: String },

    /// Translation was requested but no translator is configured.
    #[error("translation requested but no translator is configured")]
    MissingTranslator,
}

/// Result type alias using ListError.
pub type ListResult<T> = Result<T, ListError>;
