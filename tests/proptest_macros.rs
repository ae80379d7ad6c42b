//! Property-based tests using proptest
//!
//! These tests check the endpoint macro router and query string building
//! against randomized contexts and parameter maps.

use hcloud::api::macros::{query_string, resolve};
use hcloud::Macros;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Placeholder-safe keys
fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,15}"
}

/// Values that render without characters the router treats specially
fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<u32>().prop_map(Value::from),
        "[a-z0-9-]{1,20}".prop_map(Value::from),
    ]
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parameter values, falsy ones included
fn arb_param() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!(false)),
        Just(json!(0)),
        Just(json!("")),
        Just(json!(true)),
        (1u32..10_000).prop_map(Value::from),
        "[a-z0-9]{1,10}".prop_map(Value::from),
    ]
}

fn is_falsy(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Bool(false))
        || value.as_f64() == Some(0.0)
        || value.as_str() == Some("")
}

proptest! {
    /// The first context holding a key always wins
    #[test]
    fn test_first_context_wins(
        key in arb_key(),
        first in arb_value(),
        second in arb_value(),
    ) {
        let a = json!({ key.clone(): first.clone() });
        let b = json!({ key.clone(): second });
        let template = format!("things/{{{}}}", key);

        let url = Macros::from([&a, &b]).resolve(&template);
        prop_assert_eq!(url, format!("things/{}", render(&first)));
    }

    /// Keys only a later context holds still resolve
    #[test]
    fn test_later_context_fills_gaps(
        own in arb_value(),
        extra in arb_value(),
    ) {
        let a = json!({"id": own.clone()});
        let b = json!({"action_id": extra.clone()});

        let url = Macros::from([&a, &b]).resolve("servers/{id}/actions/{action_id}");
        prop_assert_eq!(url, format!("servers/{}/actions/{}", render(&own), render(&extra)));
    }

    /// Placeholders no context resolves come back verbatim
    #[test]
    fn test_unresolved_placeholders_stay(
        key in arb_key(),
        prefix in "[a-z/]{0,20}",
    ) {
        let context = json!({"unrelated_key_that_never_matches_0": 1});
        let template = format!("{}{{{}}}", prefix, key);

        prop_assert_eq!(resolve(&template, &Macros::from(&context)), template.clone());
        prop_assert_eq!(resolve(&template, &Macros::new()), template);
    }

    /// Templates without braces pass through untouched
    #[test]
    fn test_plain_templates_unchanged(template in "[a-z0-9/_-]{0,40}") {
        let context = json!({"id": 1});
        prop_assert_eq!(Macros::from(&context).resolve(&template), template);
    }

    /// Falsy values never reach the query string, truthy ones always do
    #[test]
    fn test_query_string_skips_falsy(
        params in prop::collection::btree_map(arb_key(), arb_param(), 0..10),
    ) {
        let map: Map<String, Value> = params.clone().into_iter().collect();
        let query = query_string(&map);

        let truthy: Vec<_> = params.iter().filter(|(_, v)| !is_falsy(v)).collect();
        if truthy.is_empty() {
            prop_assert_eq!(query, "");
        } else {
            prop_assert!(!query.ends_with('&'));
            prop_assert!(!query.starts_with('&'));

            let pairs: Vec<&str> = query.split('&').collect();
            prop_assert_eq!(pairs.len(), truthy.len());
            for (key, value) in truthy {
                let expected = format!("{}={}", key, render(value));
                prop_assert!(pairs.contains(&expected.as_str()));
            }
        }
    }
}
