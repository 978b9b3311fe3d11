//! Error types for unflattening.
//!
//! Every failure carries the document path at which it was detected, joined
//! with the delimiter that was active for the call. Errors are raised eagerly:
//! no partial entry list or partial document is ever returned.
//!
//! ## Error Categories
//!
//! - **Invalid input**: the value is not a record, or an optional reference
//!   to a nested record is absent
//! - **Nested type**: a field holds something that is neither a scalar nor a
//!   record (sequences, maps, data-carrying enum variants)
//! - **Path collision**: two fields claim the same document slot (only
//!   reported when strict path checking is enabled)
//! - **Encode / I/O**: the JSON encoder or the output writer failed
//!
//! ## Examples
//!
//! ```rust
//! use serde_unflatten::{to_string, Error};
//!
//! let result = to_string(&42);
//! assert!(matches!(result, Err(Error::InvalidInput { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while unflattening a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input (or a referenced nested record) is not a usable record.
    #[error("invalid input at {}: {}", display_path(.path), .msg)]
    InvalidInput { path: String, msg: String },

    /// A nested field resolves to a kind that cannot be placed in the document.
    #[error("unsupported nested type at {}: {} cannot be unflattened", display_path(.path), .kind)]
    NestedType { path: String, kind: &'static str },

    /// Two fields resolve to the same or overlapping document paths.
    #[error("path collision at {}: already occupied by an earlier field", display_path(.path))]
    PathCollision { path: String },

    /// The document encoder failed
    #[error("encode error: {0}")]
    Encode(String),

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        format!("`{}`", path)
    }
}

impl Error {
    /// Creates an invalid input error at the given path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_unflatten::Error;
    ///
    /// let err = Error::invalid_input("outer.inner", "absent reference");
    /// assert!(err.to_string().contains("`outer.inner`"));
    ///
    /// let err = Error::invalid_input("", "not a record");
    /// assert!(err.to_string().contains("<root>"));
    /// ```
    pub fn invalid_input(path: impl Into<String>, msg: &str) -> Self {
        Error::InvalidInput {
            path: path.into(),
            msg: msg.to_string(),
        }
    }

    /// Creates a nested type error for a field of an unsupported kind.
    pub fn nested_type(path: impl Into<String>, kind: &'static str) -> Self {
        Error::NestedType {
            path: path.into(),
            kind,
        }
    }

    /// Creates a path collision error.
    pub fn path_collision(path: impl Into<String>) -> Self {
        Error::PathCollision { path: path.into() }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the document path the error was raised at, if it has one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::InvalidInput { path, .. }
            | Error::NestedType { path, .. }
            | Error::PathCollision { path } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encode(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
