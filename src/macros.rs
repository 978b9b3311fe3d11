/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects keep their keys in the order written, which makes the macro handy
/// for spelling out the document an unflattened record is expected to produce.
///
/// ```rust
/// use serde_unflatten::value;
///
/// let doc = value!({
///     "inner": { "key": "k1", "value": 1 },
///     "enabled": true,
///     "missing": null
/// });
/// assert_eq!(doc.to_string(), r#"{"inner":{"key":"k1","value":1},"enabled":true,"missing":null}"#);
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other literal or expression convertible into a value
    ($s:expr) => {
        $crate::Value::from($s)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(false), Value::Bool(false));
        assert_eq!(value!(42), Value::Number(Number::Integer(42)));
        assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_value_macro_objects() {
        assert_eq!(value!({}), Value::Object(Map::new()));

        let obj = value!({
            "name": "Alice",
            "nested": { "age": 30 }
        });

        let map = obj.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
        assert_eq!(
            obj.pointer(&["nested", "age"]),
            Some(&Value::Number(Number::Integer(30)))
        );
    }
}
