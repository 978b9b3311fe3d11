//! Property-based tests for unflattening across generated records.
//!
//! Records are fixed structs; the generated parts are their field values and
//! the delimiter.

use proptest::prelude::*;
use serde::Serialize;
use serde_unflatten::{resolve, to_string, Unflattener};

#[derive(Serialize, Debug, Clone)]
struct Flat {
    id: i64,
    name: String,
    ratio: f64,
    weight: f32,
    active: bool,
    note: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
struct Nested {
    #[serde(rename = "meta.id")]
    id: i64,
    #[serde(rename = "meta.name")]
    name: String,
    #[serde(rename = "body.flat")]
    flat: Flat,
}

fn flat() -> impl Strategy<Value = Flat> {
    (
        any::<i64>(),
        ".*",
        -1.0e6f64..1.0e6,
        any::<f32>().prop_filter("finite", |w| w.is_finite()),
        any::<bool>(),
        proptest::option::of("[a-z]{0,8}"),
    )
        .prop_map(|(id, name, ratio, weight, active, note)| Flat {
            id,
            name,
            ratio,
            weight,
            active,
            note,
        })
}

proptest! {
    // Keys without the delimiter encode exactly like the plain record.
    #[test]
    fn prop_flat_record_matches_serde_json(record in flat()) {
        prop_assert_eq!(
            to_string(&record).unwrap(),
            serde_json::to_string(&record).unwrap()
        );
    }

    #[test]
    fn prop_entry_count_is_leaf_count(id in any::<i64>(), name in ".*", record in flat()) {
        let nested = Nested { id, name, flat: record };
        let entries = resolve(&nested).unwrap();
        prop_assert_eq!(entries.len(), 8);
        prop_assert_eq!(&entries[0].path, &vec!["meta".to_string(), "id".to_string()]);
        prop_assert_eq!(&entries[2].path, &vec!["body".to_string(), "flat".to_string(), "id".to_string()]);
    }

    // A delimiter that appears in no key leaves every key as one segment.
    #[test]
    fn prop_unused_delimiter_keeps_keys_whole(delimiter in "[#@~]{1,3}", record in flat()) {
        let nested = Nested { id: 1, name: "n".to_string(), flat: record };
        let doc = Unflattener::new(delimiter).unflatten_to_value(&nested).unwrap();
        let obj = doc.as_object().unwrap();
        let keys: Vec<_> = obj.keys().cloned().collect();
        prop_assert_eq!(keys, vec!["meta.id", "meta.name", "body.flat"]);
    }

    #[test]
    fn prop_reconfiguration_is_not_retroactive(delimiter in "[#@~/]{1,2}", record in flat()) {
        let nested = Nested { id: 2, name: "m".to_string(), flat: record };
        let mut unflattener = Unflattener::new(".");
        let before = unflattener.unflatten_to_string(&nested).unwrap();
        unflattener.set_delimiter(delimiter);
        let _ = unflattener.unflatten_to_string(&nested).unwrap();
        unflattener.set_delimiter(".");
        prop_assert_eq!(unflattener.unflatten_to_string(&nested).unwrap(), before);
    }
}
