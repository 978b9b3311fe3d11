//! Field path resolution.
//!
//! [`PathResolver`] walks a record through its `Serialize` impl and produces
//! one [`MetaEntry`] per terminal field, in declaration order. Nested records
//! are expanded in place, depth first, with the containing field's path
//! segments prepended to every entry they produce.
//!
//! The key serde hands to `serialize_field` is the field's logical path: the
//! `#[serde(rename = "...")]` value when present, the declared field name
//! otherwise. That key is split on the configured delimiter, so one field can
//! introduce several nesting levels.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Serialize;
//! use serde_unflatten::{PathResolver, Value};
//!
//! #[derive(Serialize)]
//! struct Pair {
//!     #[serde(rename = "inner.key")]
//!     key: String,
//!     #[serde(rename = "inner.value")]
//!     value: i32,
//! }
//!
//! let pair = Pair { key: "k".to_string(), value: 7 };
//! let entries = PathResolver::new(".").resolve(&pair, &[]).unwrap();
//!
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[0].path, vec!["inner", "key"]);
//! assert_eq!(entries[1].value, Value::from(7));
//! ```

use crate::reference::{ABSENT_TOKEN, REF_TOKEN};
use crate::{Error, Number, Result, Value};
use log::{trace, warn};
use serde::ser::{self, Impossible, Serialize};

/// Describes the record field a [`MetaEntry`] was produced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name of the struct that declares the field.
    pub record: &'static str,
    /// The field's serialized key: its path annotation, or its declared name.
    pub key: &'static str,
    /// Whether the value was reached through an `Option`.
    pub indirect: bool,
}

/// One terminal field of a resolved record.
#[derive(Clone, Debug, PartialEq)]
pub struct MetaEntry {
    pub value: Value,
    pub field: FieldDescriptor,
    /// Full path from the record root, one element per segment.
    pub path: Vec<String>,
}

/// Resolves records into ordered lists of [`MetaEntry`].
#[derive(Clone, Copy, Debug)]
pub struct PathResolver<'d> {
    delimiter: &'d str,
}

impl<'d> PathResolver<'d> {
    /// Creates a resolver splitting keys on `delimiter`. An empty delimiter
    /// leaves every key as a single segment.
    #[must_use]
    pub const fn new(delimiter: &'d str) -> Self {
        PathResolver { delimiter }
    }

    #[must_use]
    pub const fn delimiter(&self) -> &'d str {
        self.delimiter
    }

    /// Splits a field key into path segments.
    ///
    /// ```rust
    /// use serde_unflatten::PathResolver;
    ///
    /// let resolver = PathResolver::new("__");
    /// assert_eq!(resolver.split("a__b__c"), vec!["a", "b", "c"]);
    /// assert_eq!(resolver.split("__a"), vec!["", "a"]);
    /// assert_eq!(PathResolver::new("").split("a.b"), vec!["a.b"]);
    /// ```
    #[must_use]
    pub fn split<'k>(&self, key: &'k str) -> Vec<&'k str> {
        split_key(self.delimiter, key)
    }

    /// Joins path segments back into a delimited string.
    #[must_use]
    pub fn join<S: AsRef<str>>(&self, path: &[S]) -> String {
        join_path(self.delimiter, path)
    }

    /// Resolves `record` into its terminal fields, each path starting with `prefix`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `record` is not a struct (or a present
    ///   reference to one), or if a [`Ref`](crate::Ref) inside it is absent.
    ///   A struct using `#[serde(flatten)]` serializes as a map and is
    ///   rejected here too.
    /// - [`Error::NestedType`] if a field holds a sequence, map, tuple or
    ///   data-carrying enum variant, or a 128-bit integer that does not fit
    ///   in 64 bits.
    pub fn resolve<T>(&self, record: &T, prefix: &[String]) -> Result<Vec<MetaEntry>>
    where
        T: ?Sized + Serialize,
    {
        let mut entries = Vec::new();
        record.serialize(RecordSerializer {
            delimiter: self.delimiter,
            path: prefix.to_vec(),
            entries: &mut entries,
            root: true,
        })?;
        trace!(
            "resolved {} field(s) below {}",
            entries.len(),
            join_path(self.delimiter, prefix)
        );
        Ok(entries)
    }
}

fn split_key<'k>(delimiter: &str, key: &'k str) -> Vec<&'k str> {
    if delimiter.is_empty() {
        vec![key]
    } else {
        key.split(delimiter).collect()
    }
}

fn join_path<S: AsRef<str>>(delimiter: &str, path: &[S]) -> String {
    let mut joined = String::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            joined.push_str(delimiter);
        }
        joined.push_str(segment.as_ref());
    }
    joined
}

/// Accepts only records: the top-level input and the target of a [`Ref`](crate::Ref).
struct RecordSerializer<'a> {
    delimiter: &'a str,
    path: Vec<String>,
    entries: &'a mut Vec<MetaEntry>,
    root: bool,
}

impl RecordSerializer<'_> {
    fn not_a_record(&self, kind: &'static str) -> Error {
        let path = join_path(self.delimiter, &self.path);
        if self.root {
            Error::invalid_input(path, &format!("expected a struct, found {}", kind))
        } else {
            Error::nested_type(path, kind)
        }
    }

    fn absent(&self) -> Error {
        let msg = if self.root {
            "expected a struct, found an absent value"
        } else {
            "reference to a nested record is absent"
        };
        Error::invalid_input(join_path(self.delimiter, &self.path), msg)
    }
}

impl<'a> ser::Serializer for RecordSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = FieldWalker<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<()> {
        Err(self.not_a_record("a boolean"))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        Err(self.not_a_record("an integer"))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, _v: u64) -> Result<()> {
        Err(self.not_a_record("an integer"))
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        Err(self.not_a_record("an integer"))
    }

    fn serialize_u128(self, _v: u128) -> Result<()> {
        Err(self.not_a_record("an integer"))
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(self.not_a_record("a float"))
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Err(self.not_a_record("a string"))
    }

    fn serialize_str(self, _v: &str) -> Result<()> {
        Err(self.not_a_record("a string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(self.not_a_record("a byte array"))
    }

    fn serialize_none(self) -> Result<()> {
        Err(self.absent())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Err(self.not_a_record("a unit value"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        if name == ABSENT_TOKEN {
            return Err(self.absent());
        }
        // A record without fields contributes nothing.
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(self.not_a_record("an enum"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(self.not_a_record("an enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(self.not_a_record("a sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(self.not_a_record("a tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(self.not_a_record("a tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.not_a_record("an enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.not_a_record("a map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<FieldWalker<'a>> {
        Ok(FieldWalker {
            delimiter: self.delimiter,
            prefix: self.path,
            entries: self.entries,
            record: name,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.not_a_record("an enum"))
    }
}

/// Visits the fields of one record in declaration order.
struct FieldWalker<'a> {
    delimiter: &'a str,
    prefix: Vec<String>,
    entries: &'a mut Vec<MetaEntry>,
    record: &'static str,
}

impl ser::SerializeStruct for FieldWalker<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let segments = split_key(self.delimiter, key);
        if segments.iter().any(|segment| segment.is_empty()) {
            warn!(
                "field `{}` of {} produces an empty path segment",
                key, self.record
            );
        }

        let mut path = Vec::with_capacity(self.prefix.len() + segments.len());
        path.extend(self.prefix.iter().cloned());
        path.extend(segments.into_iter().map(str::to_owned));

        value.serialize(FieldSerializer {
            delimiter: self.delimiter,
            path,
            entries: &mut *self.entries,
            field: FieldDescriptor {
                record: self.record,
                key,
                indirect: false,
            },
        })
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        trace!("skipping field `{}` of {}", key, self.record);
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Classifies a single field value: scalars become entries, records recurse.
struct FieldSerializer<'a> {
    delimiter: &'a str,
    path: Vec<String>,
    entries: &'a mut Vec<MetaEntry>,
    field: FieldDescriptor,
}

impl<'a> FieldSerializer<'a> {
    fn push(self, value: Value) -> Result<()> {
        trace!(
            "{}.{} -> {}",
            self.field.record,
            self.field.key,
            join_path(self.delimiter, &self.path)
        );
        self.entries.push(MetaEntry {
            value,
            field: self.field,
            path: self.path,
        });
        Ok(())
    }

    fn unsupported(&self, kind: &'static str) -> Error {
        Error::nested_type(join_path(self.delimiter, &self.path), kind)
    }
}

impl<'a> ser::Serializer for FieldSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = FieldWalker<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.push(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.push(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.push(Value::Number(Number::from(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        match i64::try_from(v) {
            Ok(v) => self.serialize_i64(v),
            Err(_) => Err(self.unsupported("a 128-bit integer beyond 64 bits")),
        }
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        match u64::try_from(v) {
            Ok(v) => self.serialize_u64(v),
            Err(_) => Err(self.unsupported("a 128-bit integer beyond 64 bits")),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.push(Value::Number(Number::Float32(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.push(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.push(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.push(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(self.unsupported("a byte array"))
    }

    fn serialize_none(mut self) -> Result<()> {
        self.field.indirect = true;
        self.push(Value::Null)
    }

    fn serialize_some<T>(mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field.indirect = true;
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.push(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.push(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.push(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if name == REF_TOKEN {
            return value.serialize(RecordSerializer {
                delimiter: self.delimiter,
                path: self.path,
                entries: self.entries,
                root: false,
            });
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(self.unsupported("an enum variant with data"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(self.unsupported("a sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(self.unsupported("a tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(self.unsupported("a tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.unsupported("an enum variant with data"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.unsupported("a map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<FieldWalker<'a>> {
        trace!(
            "descending into {} at {}",
            name,
            join_path(self.delimiter, &self.path)
        );
        Ok(FieldWalker {
            delimiter: self.delimiter,
            prefix: self.path,
            entries: self.entries,
            record: name,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.unsupported("an enum variant with data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ref;
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Leaf {
        #[serde(rename = "leaf.v")]
        v: u8,
    }

    #[derive(Serialize)]
    struct Middle {
        #[serde(rename = "m")]
        leaf: Ref<Leaf>,
        flag: bool,
    }

    #[derive(Serialize)]
    struct Top {
        #[serde(rename = "top.mid")]
        middle: Middle,
        name: Option<String>,
    }

    fn paths(entries: &[MetaEntry]) -> Vec<String> {
        entries.iter().map(|e| e.path.join("/")).collect()
    }

    #[test]
    fn test_multi_level_paths() {
        let top = Top {
            middle: Middle {
                leaf: Ref::new(Leaf { v: 9 }),
                flag: true,
            },
            name: None,
        };

        let entries = PathResolver::new(".").resolve(&top, &[]).unwrap();
        assert_eq!(
            paths(&entries),
            vec!["top/mid/m/leaf/v", "top/mid/flag", "name"]
        );
        assert_eq!(entries[0].field.record, "Leaf");
        assert_eq!(entries[0].field.key, "leaf.v");
        assert!(!entries[0].field.indirect);
        assert_eq!(entries[2].value, Value::Null);
        assert!(entries[2].field.indirect);
    }

    #[test]
    fn test_prefix_is_prepended() {
        let leaf = Leaf { v: 1 };
        let prefix = vec!["root".to_string()];
        let entries = PathResolver::new(".").resolve(&leaf, &prefix).unwrap();
        assert_eq!(paths(&entries), vec!["root/leaf/v"]);
    }

    #[test]
    fn test_absent_reference_reports_path() {
        let top = Top {
            middle: Middle {
                leaf: Ref::none(),
                flag: false,
            },
            name: Some("x".to_string()),
        };

        let err = PathResolver::new("::").resolve(&top, &[]).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_input("top.mid::m", "reference to a nested record is absent")
        );
    }

    #[test]
    fn test_map_field_is_nested_type_error() {
        #[derive(Serialize)]
        struct WithMap {
            #[serde(rename = "a.b")]
            labels: HashMap<String, String>,
        }

        let err = PathResolver::new(".")
            .resolve(&WithMap { labels: HashMap::new() }, &[])
            .unwrap_err();
        assert_eq!(err, Error::nested_type("a.b", "a map"));
    }

    #[test]
    fn test_reference_to_scalar_is_nested_type_error() {
        #[derive(Serialize)]
        struct BadRef {
            r: Ref<u32>,
        }

        let err = PathResolver::new(".")
            .resolve(&BadRef { r: Ref::new(3) }, &[])
            .unwrap_err();
        assert!(matches!(err, Error::NestedType { ref path, .. } if path == "r"));
    }

    #[test]
    fn test_top_level_scalar_is_invalid_input() {
        let err = PathResolver::new(".").resolve("text", &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref path, .. } if path.is_empty()));
    }

    #[test]
    fn test_skipped_fields_produce_nothing() {
        #[derive(Serialize)]
        struct Sparse {
            #[serde(skip_serializing_if = "Option::is_none")]
            maybe: Option<i32>,
            always: i32,
        }

        let entries = PathResolver::new(".")
            .resolve(&Sparse { maybe: None, always: 1 }, &[])
            .unwrap();
        assert_eq!(paths(&entries), vec!["always"]);
    }

    #[test]
    fn test_f32_keeps_single_precision() {
        #[derive(Serialize)]
        struct Ratio {
            #[serde(rename = "stats.ratio")]
            ratio: f32,
        }

        let entries = PathResolver::new(".")
            .resolve(&Ratio { ratio: 0.1 }, &[])
            .unwrap();
        assert_eq!(entries[0].value, Value::Number(Number::Float32(0.1)));
    }

    #[test]
    fn test_wide_integers() {
        #[derive(Serialize)]
        struct Wide {
            #[serde(rename = "n.small")]
            small: i128,
            #[serde(rename = "n.big")]
            big: u128,
        }

        let entries = PathResolver::new(".")
            .resolve(&Wide { small: -5, big: 7 }, &[])
            .unwrap();
        assert_eq!(entries[0].value, Value::from(-5));
        assert_eq!(entries[1].value, Value::from(7u64));

        let err = PathResolver::new(".")
            .resolve(&Wide { small: 0, big: u128::MAX }, &[])
            .unwrap_err();
        assert!(matches!(err, Error::NestedType { ref path, .. } if path == "n.big"));
    }

    #[test]
    fn test_flattened_record_is_invalid_input() {
        #[derive(Serialize)]
        struct Inner {
            b: u8,
        }

        #[derive(Serialize)]
        struct Outer {
            a: u8,
            #[serde(flatten)]
            inner: Inner,
        }

        let err = PathResolver::new(".")
            .resolve(&Outer { a: 1, inner: Inner { b: 2 } }, &[])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref path, .. } if path.is_empty()));
    }

    #[test]
    fn test_join_uses_delimiter() {
        let resolver = PathResolver::new("->");
        assert_eq!(resolver.join(&["a", "b"]), "a->b");
        assert_eq!(resolver.join::<&str>(&[]), "");
    }
}
