//! Shared proptest strategies.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// A 24-character hex string in mixed case.
pub(crate) fn arb_object_id_hex() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9a-fA-F]{24}").unwrap()
}

/// A calendar date string that always denotes a real day.
pub(crate) fn arb_date_string() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("(19|20)[0-9]{2}-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-8])")
            .unwrap(),
        prop::string::string_regex(
            "20[0-9]{2}-0[1-9]-1[0-9]T([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9](\\.[0-9]{1,3})?Z"
        )
        .unwrap(),
    ]
}

/// A string that can be neither an identifier nor a date.
pub(crate) fn arb_plain_string() -> impl Strategy<Value = String> {
    prop::string::string_regex("[g-z _]{0,16}").unwrap()
}

fn json_tree(leaf: BoxedStrategy<Value>) -> impl Strategy<Value = Value> {
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn scalar_leaf() -> BoxedStrategy<Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
    ]
    .boxed()
}

/// JSON containing no identifier- or date-shaped strings.
pub(crate) fn arb_plain_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![scalar_leaf(), arb_plain_string().prop_map(Value::String)].boxed();
    json_tree(leaf)
}

/// JSON mixing plain leaves with identifier and date strings.
pub(crate) fn arb_payload_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        scalar_leaf(),
        arb_plain_string().prop_map(Value::String),
        arb_object_id_hex().prop_map(Value::String),
        arb_date_string().prop_map(Value::String),
    ]
    .boxed();
    json_tree(leaf)
}
