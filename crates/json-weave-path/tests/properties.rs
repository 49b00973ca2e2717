//! Property tests for path parsing and traversal.

use json_weave_path::{assign, format_path, parse, resolve, resolve_steps, Step};
use proptest::prelude::*;
use serde_json::{json, Value};

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,7}".prop_map(Step::Key),
        (0usize..4).prop_map(Step::Index),
    ]
}

fn steps_strategy() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step_strategy(), 1..6)
}

/// Build a document that contains exactly the given path, with `leaf` at
/// the addressed location. Array levels are padded with nulls.
fn doc_containing(steps: &[Step], leaf: Value) -> Value {
    let mut value = leaf;
    for step in steps.iter().rev() {
        value = match step {
            Step::Key(k) => json!({ k.clone(): value }),
            Step::Index(i) => {
                let mut arr = vec![Value::Null; *i];
                arr.push(value);
                Value::Array(arr)
            }
        };
    }
    value
}

proptest! {
    #[test]
    fn parse_format_round_trip(steps in steps_strategy()) {
        let formatted = format_path(&steps);
        prop_assert_eq!(parse(&formatted), steps);
    }

    #[test]
    fn resolve_reaches_constructed_leaf(steps in steps_strategy()) {
        let doc = doc_containing(&steps, json!("leaf"));
        prop_assert_eq!(resolve_steps(&doc, &steps), Some(&json!("leaf")));
    }

    #[test]
    fn assign_is_idempotent_where_resolve_succeeds(steps in steps_strategy()) {
        let mut doc = doc_containing(&steps, json!("leaf"));
        let path = format_path(&steps);
        let v = resolve(&doc, &path).unwrap().clone();
        assign(&mut doc, &path, v.clone()).unwrap();
        prop_assert_eq!(resolve(&doc, &path), Some(&v));
    }

    #[test]
    fn resolve_never_panics_on_arbitrary_paths(
        path in "[a-z0-9.\\[\\]]{0,20}",
    ) {
        let doc = json!({"a": {"b": [1, 2, {"c": null}]}});
        let _ = resolve(&doc, &path);
    }
}
