//! Configuration options for unflattening.
//!
//! ## Examples
//!
//! ```rust
//! use serde_unflatten::{to_string_with_options, UnflattenOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data {
//!     #[serde(rename = "point/x")]
//!     x: i32,
//!     #[serde(rename = "point/y")]
//!     y: i32,
//! }
//!
//! let options = UnflattenOptions::new("/");
//! let json = to_string_with_options(&Data { x: 1, y: 2 }, options).unwrap();
//! assert_eq!(json, r#"{"point":{"x":1,"y":2}}"#);
//! ```

/// The delimiter used by the crate-root convenience functions.
pub const DEFAULT_DELIMITER: &str = ".";

/// Configuration options for unflattening.
///
/// # Examples
///
/// ```rust
/// use serde_unflatten::UnflattenOptions;
///
/// let options = UnflattenOptions::new("__")
///     .with_pretty(true)
///     .with_strict_paths(true);
/// assert_eq!(options.delimiter, "__");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UnflattenOptions {
    /// Splits field keys into path segments. An empty delimiter disables splitting.
    pub delimiter: String,
    pub pretty: bool,
    /// Reject overlapping paths instead of letting the later field win.
    pub strict_paths: bool,
}

impl Default for UnflattenOptions {
    fn default() -> Self {
        UnflattenOptions::new(DEFAULT_DELIMITER)
    }
}

impl UnflattenOptions {
    /// Creates options with the given delimiter, compact output and
    /// permissive (last-write-wins) path handling.
    #[must_use]
    pub fn new(delimiter: impl Into<String>) -> Self {
        UnflattenOptions {
            delimiter: delimiter.into(),
            pretty: false,
            strict_paths: false,
        }
    }

    /// Sets the path delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Enables pretty-printed JSON output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enables collision checking between field paths.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_unflatten::{to_string_with_options, Error, UnflattenOptions};
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Clash {
    ///     a: i32,
    ///     #[serde(rename = "a.b")]
    ///     ab: i32,
    /// }
    ///
    /// let options = UnflattenOptions::default().with_strict_paths(true);
    /// let result = to_string_with_options(&Clash { a: 1, ab: 2 }, options);
    /// assert!(matches!(result, Err(Error::PathCollision { .. })));
    /// ```
    #[must_use]
    pub fn with_strict_paths(mut self, strict: bool) -> Self {
        self.strict_paths = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = UnflattenOptions::default();
        assert_eq!(options.delimiter, ".");
        assert!(!options.pretty);
        assert!(!options.strict_paths);
    }

    #[test]
    fn test_builder_chain() {
        let options = UnflattenOptions::default()
            .with_delimiter("::")
            .with_pretty(true);
        assert_eq!(options.delimiter, "::");
        assert!(options.pretty);
    }
}
