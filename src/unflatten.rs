//! The configurable unflattening entry point.
//!
//! [`Unflattener`] owns the options for a series of calls and runs the two
//! phases in sequence: resolve the record into path entries, then assemble
//! and encode the document.

use crate::document::{encode, DocumentBuilder};
use crate::{Error, MetaEntry, PathResolver, Result, UnflattenOptions, Value};
use log::debug;
use serde::Serialize;
use std::io;

/// Converts records with delimited field keys into nested JSON documents.
///
/// The delimiter can be changed between calls with
/// [`set_delimiter`](Self::set_delimiter); a change only affects calls made
/// after it.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_unflatten::Unflattener;
///
/// #[derive(Serialize)]
/// struct Test {
///     #[serde(rename = "inner.value")]
///     value: String,
/// }
///
/// let mut unflattener = Unflattener::new(".");
/// let test = Test { value: "hello".to_string() };
///
/// let bytes = unflattener.unflatten(&test).unwrap();
/// assert_eq!(bytes, br#"{"inner":{"value":"hello"}}"#);
///
/// unflattener.set_delimiter("/");
/// let json = unflattener.unflatten_to_string(&test).unwrap();
/// assert_eq!(json, r#"{"inner.value":"hello"}"#);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Unflattener {
    options: UnflattenOptions,
}

impl Unflattener {
    /// Creates an unflattener splitting field keys on `delimiter`.
    #[must_use]
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self::with_options(UnflattenOptions::new(delimiter))
    }

    #[must_use]
    pub fn with_options(options: UnflattenOptions) -> Self {
        Unflattener { options }
    }

    /// Replaces the delimiter used by subsequent calls.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) {
        self.options.delimiter = delimiter.into();
    }

    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.options.delimiter
    }

    #[must_use]
    pub fn options(&self) -> &UnflattenOptions {
        &self.options
    }

    /// Returns a resolver bound to the current delimiter.
    #[must_use]
    pub fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(&self.options.delimiter)
    }

    /// Resolves `record` into its terminal fields in declaration order.
    ///
    /// # Errors
    ///
    /// See [`PathResolver::resolve`].
    pub fn resolve<T>(&self, record: &T) -> Result<Vec<MetaEntry>>
    where
        T: ?Sized + Serialize,
    {
        self.resolver().resolve(record, &[])
    }

    /// Resolves `record` and assembles the nested document without encoding it.
    ///
    /// # Errors
    ///
    /// Returns resolution errors unchanged, and [`Error::PathCollision`] when
    /// strict paths are enabled and two fields overlap.
    pub fn unflatten_to_value<T>(&self, record: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let entries = self.resolve(record)?;
        debug!(
            "assembling document from {} field(s) (delimiter {:?}, strict: {})",
            entries.len(),
            self.options.delimiter,
            self.options.strict_paths
        );

        let mut builder = if self.options.strict_paths {
            DocumentBuilder::strict(&self.options.delimiter)
        } else {
            DocumentBuilder::new()
        };
        builder.extend(entries)?;
        Ok(builder.finish())
    }

    /// Unflattens `record` into encoded JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution, assembly or encoding fails.
    pub fn unflatten<T>(&self, record: &T) -> Result<Vec<u8>>
    where
        T: ?Sized + Serialize,
    {
        let document = self.unflatten_to_value(record)?;
        encode(&document, self.options.pretty)
    }

    /// Unflattens `record` into a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution, assembly or encoding fails.
    pub fn unflatten_to_string<T>(&self, record: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        let bytes = self.unflatten(record)?;
        String::from_utf8(bytes).map_err(|e| Error::Encode(e.to_string()))
    }

    /// Unflattens `record` and writes the JSON to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if unflattening fails or writing to the writer fails.
    pub fn unflatten_to_writer<W, T>(&self, mut writer: W, record: &T) -> Result<()>
    where
        W: io::Write,
        T: ?Sized + Serialize,
    {
        let bytes = self.unflatten(record)?;
        writer
            .write_all(&bytes)
            .map_err(|e| Error::io(&e.to_string()))
    }
}
