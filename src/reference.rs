//! Optional references to nested records.
//!
//! A plain `Option<T>` field that is `None` serializes exactly like an absent
//! scalar, so the resolver has no way to tell that a record was expected
//! there and emits `null`. [`Ref<T>`] marks the field as pointing at a
//! record: when present it is resolved like any nested record, when absent
//! resolution fails with [`Error::InvalidInput`](crate::Error::InvalidInput).
//!
//! Other serializers see `Ref<T>` as a transparent `Option<T>`-like value
//! (absent encodes as `null`).

use serde::{Serialize, Serializer};

/// Newtype name that tags a reference for the path resolver.
pub(crate) const REF_TOKEN: &str = "$serde_unflatten::private::Ref";

/// Unit-struct name that stands in for an absent reference.
pub(crate) const ABSENT_TOKEN: &str = "$serde_unflatten::private::Absent";

/// An optional reference to a nested record.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_unflatten::{to_string, Error, Ref};
///
/// #[derive(Serialize)]
/// struct Inner {
///     value: i32,
/// }
///
/// #[derive(Serialize)]
/// struct Outer {
///     #[serde(rename = "a.b")]
///     inner: Ref<Inner>,
/// }
///
/// let present = Outer { inner: Ref::new(Inner { value: 1 }) };
/// assert_eq!(to_string(&present).unwrap(), r#"{"a":{"b":{"value":1}}}"#);
///
/// let absent = Outer { inner: Ref::none() };
/// assert!(matches!(to_string(&absent), Err(Error::InvalidInput { .. })));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ref<T>(Option<T>);

impl<T> Ref<T> {
    /// Creates a reference to `value`.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Ref(Some(value))
    }

    /// Creates an absent reference.
    #[must_use]
    pub const fn none() -> Self {
        Ref(None)
    }

    #[must_use]
    pub const fn is_some(&self) -> bool {
        self.0.is_some()
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the referenced record, if present.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Returns the referenced record mutably, if present.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.0.as_mut()
    }

    /// Replaces the referenced record, returning the previous one.
    pub fn set(&mut self, value: T) -> Option<T> {
        self.0.replace(value)
    }

    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for Ref<T> {
    fn default() -> Self {
        Ref(None)
    }
}

impl<T> From<Option<T>> for Ref<T> {
    fn from(value: Option<T>) -> Self {
        Ref(value)
    }
}

struct Absent;

impl Serialize for Absent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_unit_struct(ABSENT_TOKEN)
    }
}

impl<T: Serialize> Serialize for Ref<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.0 {
            Some(value) => serializer.serialize_newtype_struct(REF_TOKEN, value),
            None => serializer.serialize_newtype_struct(REF_TOKEN, &Absent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_serializers_see_plain_values() {
        assert_eq!(serde_json::to_string(&Ref::new(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&Ref::<i32>::none()).unwrap(), "null");
    }

    #[test]
    fn test_accessors() {
        let mut r: Ref<u8> = Ref::default();
        assert!(r.is_none());
        assert_eq!(r.set(3), None);
        assert_eq!(r.get(), Some(&3));
        if let Some(v) = r.get_mut() {
            *v = 4;
        }
        assert_eq!(r.into_inner(), Some(4));
    }
}
