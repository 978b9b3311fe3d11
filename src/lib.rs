//! # serde_unflatten
//!
//! Serialize Rust structs whose fields carry flat, delimited names into nested
//! JSON documents.
//!
//! ## What does it do?
//!
//! A field renamed to `"inner.value"` ends up at `{"inner":{"value": ...}}`.
//! Records can be defined flat, the way a config file, a form or a database
//! row names its columns, and still serialize into the hierarchical shape a
//! consumer expects, without hand-writing the intermediate structs.
//!
//! ## Key Features
//!
//! - **Serde Driven**: Records are plain `#[derive(Serialize)]` structs; the path
//!   annotation is the ordinary `#[serde(rename = "...")]` attribute
//! - **Nested Records**: Fields holding other structs (by value, `Box`, `Option`
//!   or [`Ref`]) are expanded in place under their own path
//! - **Declaration Order**: Object keys are emitted in field declaration order
//! - **Configurable Delimiter**: Any non-empty string splits paths, `"."` by default
//! - **Fail Fast**: Absent nested records and unsupported field kinds are errors,
//!   never a partial document
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use serde_unflatten::to_string;
//!
//! #[derive(Serialize)]
//! struct Entry {
//!     #[serde(rename = "inner.key")]
//!     inner_key: String,
//!     #[serde(rename = "inner.value")]
//!     inner_value: u32,
//!     #[serde(rename = "outer.key")]
//!     outer_key: String,
//!     #[serde(rename = "outer.value")]
//!     outer_value: u32,
//! }
//!
//! let entry = Entry {
//!     inner_key: "k1".to_string(),
//!     inner_value: 1,
//!     outer_key: "k2".to_string(),
//!     outer_value: 2,
//! };
//!
//! let json = to_string(&entry).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"inner":{"key":"k1","value":1},"outer":{"key":"k2","value":2}}"#
//! );
//! ```
//!
//! ### Nested Records
//!
//! ```rust
//! use serde::Serialize;
//! use serde_unflatten::{to_string, Ref};
//!
//! #[derive(Serialize)]
//! struct Address {
//!     city: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Customer {
//!     #[serde(rename = "profile.name")]
//!     name: String,
//!     #[serde(rename = "profile.address")]
//!     address: Ref<Address>,
//! }
//!
//! let customer = Customer {
//!     name: "Alice".to_string(),
//!     address: Ref::new(Address { city: "Oslo".to_string() }),
//! };
//!
//! assert_eq!(
//!     to_string(&customer).unwrap(),
//!     r#"{"profile":{"name":"Alice","address":{"city":"Oslo"}}}"#
//! );
//! ```
//!
//! ### Custom Delimiters
//!
//! ```rust
//! use serde::Serialize;
//! use serde_unflatten::Unflattener;
//!
//! #[derive(Serialize)]
//! struct Env {
//!     #[serde(rename = "APP__PORT")]
//!     port: u16,
//! }
//!
//! let unflattener = Unflattener::new("__");
//! let json = unflattener.unflatten_to_string(&Env { port: 8080 }).unwrap();
//! assert_eq!(json, r#"{"APP":{"PORT":8080}}"#);
//! ```
//!
//! ## Overlapping Paths
//!
//! Two fields that resolve to the same path, or where one path is a prefix of
//! another, are not detected by default: the field declared later wins.
//! [`UnflattenOptions::with_strict_paths`] turns that into an
//! [`Error::PathCollision`].
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: one `debug`
//! record per call, `trace` records per field, and a `warn` record when a key
//! produces an empty path segment (a key starting or ending with the
//! delimiter). Install any `log` backend to see them.

pub mod document;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod reference;
pub mod resolver;
pub mod unflatten;
pub mod value;

pub use document::{encode, DocumentBuilder};
pub use error::{Error, Result};
pub use map::Map;
pub use options::{UnflattenOptions, DEFAULT_DELIMITER};
pub use reference::Ref;
pub use resolver::{FieldDescriptor, MetaEntry, PathResolver};
pub use unflatten::Unflattener;
pub use value::{Number, Value};

use serde::Serialize;
use std::io;

/// Unflatten any struct to JSON bytes, splitting field names on `"."`.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_unflatten::to_vec;
///
/// #[derive(Serialize)]
/// struct Test {
///     #[serde(rename = "inner.value")]
///     value: String,
/// }
///
/// let bytes = to_vec(&Test { value: "hello".to_string() }).unwrap();
/// assert_eq!(bytes, br#"{"inner":{"value":"hello"}}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a struct, a nested reference is
/// absent, or a field has an unsupported kind.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_vec_with_options(value, UnflattenOptions::default())
}

/// Unflatten any struct to JSON bytes with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be unflattened.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options<T>(value: &T, options: UnflattenOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    Unflattener::with_options(options).unflatten(value)
}

/// Unflatten any struct to a JSON string, splitting field names on `"."`.
///
/// # Errors
///
/// Returns an error if the value cannot be unflattened.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, UnflattenOptions::default())
}

/// Unflatten any struct to a pretty-printed JSON string.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_unflatten::to_string_pretty;
///
/// #[derive(Serialize)]
/// struct Point {
///     #[serde(rename = "pos.x")]
///     x: i32,
/// }
///
/// let json = to_string_pretty(&Point { x: 1 }).unwrap();
/// assert_eq!(json, "{\n  \"pos\": {\n    \"x\": 1\n  }\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be unflattened.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, UnflattenOptions::default().with_pretty(true))
}

/// Unflatten any struct to a JSON string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be unflattened.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: UnflattenOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Unflattener::with_options(options).unflatten_to_string(value)
}

/// Unflatten any struct into a [`Value`] document without encoding it.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_unflatten::{to_value, value};
///
/// #[derive(Serialize)]
/// struct Flag {
///     #[serde(rename = "features.beta")]
///     beta: bool,
/// }
///
/// let doc = to_value(&Flag { beta: true }).unwrap();
/// assert_eq!(doc, value!({ "features": { "beta": true } }));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be unflattened.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    Unflattener::with_options(UnflattenOptions::default()).unflatten_to_value(value)
}

/// Unflatten any struct and write the JSON to `writer`.
///
/// # Errors
///
/// Returns an error if unflattening fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    Unflattener::with_options(UnflattenOptions::default()).unflatten_to_writer(writer, value)
}

/// Resolve any struct into its terminal fields, splitting names on `"."`.
///
/// # Errors
///
/// Returns an error if the value is not a struct, a nested reference is
/// absent, or a field has an unsupported kind.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn resolve<T>(value: &T) -> Result<Vec<MetaEntry>>
where
    T: ?Sized + Serialize,
{
    PathResolver::new(DEFAULT_DELIMITER).resolve(value, &[])
}
