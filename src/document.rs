//! Document assembly and encoding.
//!
//! [`DocumentBuilder`] merges resolved [`MetaEntry`] values into one nested
//! [`Value`] tree. Each entry's path is read as a chain of object keys; the
//! intermediate objects are created on first use and the entry's value is
//! stored under the last key.
//!
//! Overlapping paths are the caller's responsibility. By default the later
//! entry wins: a scalar standing where an intermediate object is needed is
//! replaced by an empty object, and a final key that already holds anything
//! is overwritten. [`DocumentBuilder::strict`] reports those cases as
//! [`Error::PathCollision`] instead.

use crate::{Error, Map, MetaEntry, Result, Value};
use log::debug;

/// Builds a nested document from an ordered list of entries.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_unflatten::{value, DocumentBuilder, PathResolver};
///
/// #[derive(Serialize)]
/// struct Flat {
///     #[serde(rename = "a.b.c")]
///     c: bool,
/// }
///
/// let entries = PathResolver::new(".").resolve(&Flat { c: true }, &[]).unwrap();
/// let doc = DocumentBuilder::build(entries).unwrap();
/// assert_eq!(doc, value!({ "a": { "b": { "c": true } } }));
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    root: Map,
    /// Delimiter for collision diagnostics; `Some` enables strict mode.
    strict: Option<String>,
}

impl DocumentBuilder {
    /// Creates a permissive (last-write-wins) builder with an empty root object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder that rejects overlapping paths. `delimiter` is only
    /// used to render the colliding path in the error.
    #[must_use]
    pub fn strict(delimiter: &str) -> Self {
        DocumentBuilder {
            root: Map::new(),
            strict: Some(delimiter.to_string()),
        }
    }

    /// Builds a document from `entries` with a permissive builder.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has an empty path.
    pub fn build<I>(entries: I) -> Result<Value>
    where
        I: IntoIterator<Item = MetaEntry>,
    {
        let mut builder = DocumentBuilder::new();
        builder.extend(entries)?;
        Ok(builder.finish())
    }

    /// Inserts every entry, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first entry [`insert`](Self::insert) rejects.
    pub fn extend<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = MetaEntry>,
    {
        entries.into_iter().try_for_each(|entry| self.insert(entry))
    }

    /// Places one entry's value at its path.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the entry's path is empty.
    /// - [`Error::PathCollision`] in strict mode, if the path overlaps one
    ///   inserted earlier.
    pub fn insert(&mut self, entry: MetaEntry) -> Result<()> {
        let MetaEntry { value, path, .. } = entry;
        let Some((last, parents)) = path.split_last() else {
            return Err(Error::invalid_input("", "entry has an empty path"));
        };

        let mut node = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            let slot = node
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            match slot {
                Value::Object(map) => node = map,
                scalar => {
                    if let Some(delimiter) = &self.strict {
                        let occupied = path[..=depth].join(delimiter.as_str());
                        return Err(Error::path_collision(occupied));
                    }
                    debug!("replacing scalar at `{}` with an object", segment);
                    *scalar = nest(&path[depth + 1..], value);
                    return Ok(());
                }
            }
        }

        if node.contains_key(last) {
            if let Some(delimiter) = &self.strict {
                return Err(Error::path_collision(path.join(delimiter.as_str())));
            }
            debug!("later field overwrites `{}`", last);
        }
        node.insert(last.clone(), value);
        Ok(())
    }

    /// Returns the assembled document.
    #[must_use]
    pub fn finish(self) -> Value {
        Value::Object(self.root)
    }
}

/// Wraps `value` in one object per segment, innermost last.
fn nest(segments: &[String], value: Value) -> Value {
    segments.iter().rev().fold(value, |inner, segment| {
        let mut map = Map::new();
        map.insert(segment.clone(), inner);
        Value::Object(map)
    })
}

/// Encodes a document as JSON bytes.
///
/// # Errors
///
/// Returns [`Error::Encode`] if `serde_json` rejects the document.
pub fn encode(document: &Value, pretty: bool) -> Result<Vec<u8>> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(document)?
    } else {
        serde_json::to_vec(document)?
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value, FieldDescriptor};

    fn entry(path: &[&str], value: Value) -> MetaEntry {
        MetaEntry {
            value,
            field: FieldDescriptor {
                record: "Test",
                key: "test",
                indirect: false,
            },
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_siblings_share_parent() {
        let doc = DocumentBuilder::build(vec![
            entry(&["inner", "key"], Value::from("k1")),
            entry(&["inner", "value"], Value::from("v1")),
            entry(&["outer", "key"], Value::from("k2")),
            entry(&["outer", "value"], Value::from("v2")),
        ])
        .unwrap();

        assert_eq!(
            doc,
            value!({
                "inner": { "key": "k1", "value": "v1" },
                "outer": { "key": "k2", "value": "v2" }
            })
        );
    }

    #[test]
    fn test_duplicate_path_last_write_wins() {
        let doc = DocumentBuilder::build(vec![
            entry(&["a"], Value::from(1)),
            entry(&["a"], Value::from(2)),
        ])
        .unwrap();
        assert_eq!(doc, value!({ "a": 2 }));
    }

    #[test]
    fn test_prefix_paths_last_write_wins() {
        let scalar_then_object = DocumentBuilder::build(vec![
            entry(&["a"], Value::from(1)),
            entry(&["a", "b"], Value::from(2)),
        ])
        .unwrap();
        assert_eq!(scalar_then_object, value!({ "a": { "b": 2 } }));

        let object_then_scalar = DocumentBuilder::build(vec![
            entry(&["a", "b"], Value::from(2)),
            entry(&["a"], Value::from(1)),
        ])
        .unwrap();
        assert_eq!(object_then_scalar, value!({ "a": 1 }));
    }

    #[test]
    fn test_scalar_replaced_below_existing_object() {
        let doc = DocumentBuilder::build(vec![
            entry(&["x", "y"], Value::from(1)),
            entry(&["x", "z"], Value::from(2)),
            entry(&["x", "y", "p", "q"], Value::from(3)),
        ])
        .unwrap();

        assert_eq!(doc, value!({ "x": { "y": { "p": { "q": 3 } }, "z": 2 } }));
        let keys: Vec<_> = doc.get("x").and_then(Value::as_object).unwrap().keys().collect();
        assert_eq!(keys, vec!["y", "z"]);
    }

    #[test]
    fn test_strict_rejects_overlaps() {
        let mut builder = DocumentBuilder::strict("/");
        builder.insert(entry(&["a"], Value::from(1))).unwrap();
        assert_eq!(
            builder.insert(entry(&["a", "b"], Value::from(2))),
            Err(Error::path_collision("a"))
        );

        let mut builder = DocumentBuilder::strict("/");
        builder.insert(entry(&["a", "b"], Value::from(1))).unwrap();
        assert_eq!(
            builder.insert(entry(&["a"], Value::from(2))),
            Err(Error::path_collision("a"))
        );
        assert_eq!(
            builder.insert(entry(&["a", "b"], Value::from(3))),
            Err(Error::path_collision("a/b"))
        );
    }

    #[test]
    fn test_empty_segment_becomes_empty_key() {
        let doc = DocumentBuilder::build(vec![entry(&["", "x"], Value::Null)]).unwrap();
        assert_eq!(encode(&doc, false).unwrap(), br#"{"":{"x":null}}"#.to_vec());
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = DocumentBuilder::build(vec![entry(&[], Value::Null)]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn test_encode_pretty() {
        let doc = value!({ "a": { "b": 1 } });
        let pretty = String::from_utf8(encode(&doc, true).unwrap()).unwrap();
        assert_eq!(pretty, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
    }
}
