//! # Tree Walker — Untyped Data to Typed Instances
//!
//! The recursive converter at the center of the engine: given untyped input
//! (anything `serde_json` can represent) and a schema, produce a validated
//! typed tree.
//!
//! ## Leniency
//!
//! Parsing never fails on shape. Missing declared fields become absent
//! (arrays: an empty list), undeclared input keys are ignored, and scalar
//! values pass through uninterpreted, whatever their JSON type. The only
//! failure mode is a constraint violation, reported by the validator with
//! the failing node's path.
//!
//! ## Validation Points
//!
//! Every array element and object value is validated immediately after its
//! subtree is built; the root is validated last, by [`parse`] itself.
//! Scalars are never validated in isolation, only as fields of their owning
//! node.

use std::sync::Arc;

use serde_json::Value;

use crate::instance::{FieldValue, Instance};
use crate::schema::{FieldShape, Schema};
use crate::validate::{validate_node, ValidationError};

/// Convert untyped data into a validated typed tree.
///
/// The error path is rooted at the schema's name: a failing element two
/// levels down reads `StaticData.Cards[0]`.
///
/// # Errors
///
/// Returns the first failing node's [`ValidationError`]; the walk stops
/// there and no partial tree escapes.
pub fn parse(data: &Value, schema: &Arc<Schema>) -> Result<Instance, ValidationError> {
    let root = walk(data, schema, schema.name())?;
    validate_node(schema.name(), &root)?;
    Ok(root)
}

/// Build one node from `data` according to `schema`, recursing into
/// container fields. Children are validated here; the caller validates the
/// node itself.
fn walk(data: &Value, schema: &Arc<Schema>, path: &str) -> Result<Instance, ValidationError> {
    let mut node = Instance::empty(Arc::clone(schema));
    for descriptor in schema.fields() {
        let input = data.get(descriptor.name());
        match descriptor.shape() {
            FieldShape::Scalar => {
                if let Some(value) = input {
                    node.set(descriptor.name(), FieldValue::Scalar(value.clone()));
                }
            }
            FieldShape::Array(element) => {
                let mut children = Vec::new();
                if let Some(Value::Array(items)) = input {
                    for (index, item) in items.iter().enumerate() {
                        let child_path = format!("{path}.{}[{index}]", descriptor.name());
                        let child = walk(item, element, &child_path)?;
                        validate_node(&child_path, &child)?;
                        children.push(child);
                    }
                }
                // Absent, null, or non-array input still yields a list, so
                // consumers iterate without a presence check.
                node.set(descriptor.name(), FieldValue::List(children));
            }
            FieldShape::Object(nested) => {
                if let Some(value) = input {
                    if value.is_object() {
                        let child_path = format!("{path}.{}", descriptor.name());
                        let child = walk(value, nested, &child_path)?;
                        validate_node(&child_path, &child)?;
                        node.set(descriptor.name(), FieldValue::Node(child));
                    }
                }
            }
        }
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Constraint, FieldDescriptor};

    fn card_schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder("Card")
                .field(FieldDescriptor::scalar("id").constrain(Constraint::Number))
                .field(FieldDescriptor::scalar("name").constrain(Constraint::Text))
                .build(),
        )
    }

    fn root_schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder("StaticData")
                .field(FieldDescriptor::array("Cards", card_schema()))
                .build(),
        )
    }

    #[test]
    fn parses_example_deck() {
        let data = serde_json::json!({
            "Cards": [
                {"id": 1, "name": "Fireball"},
                {"id": 2, "name": "Ice"}
            ]
        });
        let tree = parse(&data, &root_schema()).expect("valid deck");
        assert_eq!(tree.to_value(), data);
    }

    #[test]
    fn missing_scalar_field_is_absent() {
        let data = serde_json::json!({"Cards": [{"id": 1}]});
        let tree = parse(&data, &root_schema()).expect("missing name is fine");
        let FieldValue::List(cards) = tree.get("Cards").unwrap() else {
            panic!("Cards should be a list");
        };
        assert!(!cards[0].has("name"));
    }

    #[test]
    fn extra_input_keys_are_dropped() {
        let data = serde_json::json!({
            "Cards": [{"id": 1, "name": "Fireball", "debug_notes": "remove me"}],
            "Unknown": {"a": 1}
        });
        let tree = parse(&data, &root_schema()).expect("extras are ignored");
        assert_eq!(
            tree.to_value(),
            serde_json::json!({"Cards": [{"id": 1, "name": "Fireball"}]})
        );
    }

    #[test]
    fn absent_array_becomes_empty_list() {
        let tree = parse(&serde_json::json!({}), &root_schema()).expect("empty input");
        assert_eq!(tree.get("Cards"), Some(&FieldValue::List(Vec::new())));
        assert_eq!(tree.to_value(), serde_json::json!({"Cards": []}));
    }

    #[test]
    fn null_and_non_array_input_become_empty_list() {
        for bad in [serde_json::json!({"Cards": null}), serde_json::json!({"Cards": "x"})] {
            let tree = parse(&bad, &root_schema()).expect("lenient");
            assert_eq!(tree.get("Cards"), Some(&FieldValue::List(Vec::new())));
        }
    }

    #[test]
    fn array_order_is_preserved() {
        let data = serde_json::json!({
            "Cards": [
                {"id": 3, "name": "c"},
                {"id": 1, "name": "a"},
                {"id": 2, "name": "b"}
            ]
        });
        let tree = parse(&data, &root_schema()).unwrap();
        assert_eq!(tree.to_value(), data);
    }

    #[test]
    fn wrong_scalar_type_passes_through_without_constraint() {
        let loose_card = Arc::new(
            Schema::builder("Card")
                .field(FieldDescriptor::scalar("id"))
                .build(),
        );
        let schema = Arc::new(
            Schema::builder("StaticData")
                .field(FieldDescriptor::array("Cards", loose_card))
                .build(),
        );
        let data = serde_json::json!({"Cards": [{"id": "not-a-number"}]});
        let tree = parse(&data, &schema).expect("no constraint, no failure");
        assert_eq!(tree.to_value(), data);
    }

    #[test]
    fn failing_element_reports_indexed_path() {
        let data = serde_json::json!({
            "Cards": [
                {"id": 1, "name": "ok"},
                {"id": "x", "name": "bad"},
                {"id": 3, "name": "never reached"}
            ]
        });
        let err = parse(&data, &root_schema()).unwrap_err();
        assert_eq!(err.path, "StaticData.Cards[1]");
        assert_eq!(err.violations.violations()[0].field, "id");
    }

    #[test]
    fn spec_failure_scenario_path() {
        let data = serde_json::json!({"Cards": [{"id": "x", "name": "A"}]});
        let err = parse(&data, &root_schema()).unwrap_err();
        assert_eq!(err.path, "StaticData.Cards[0]");
    }

    #[test]
    fn nested_object_field_parses_and_validates() {
        let hero = Schema::builder("Hero")
            .field(FieldDescriptor::scalar("hp").constrain(Constraint::Number))
            .build();
        let schema = Arc::new(
            Schema::builder("StaticData")
                .field(FieldDescriptor::object("Starter", hero))
                .build(),
        );

        let ok = serde_json::json!({"Starter": {"hp": 30}});
        let tree = parse(&ok, &schema).unwrap();
        assert!(tree.has("Starter"));

        let bad = serde_json::json!({"Starter": {"hp": "thirty"}});
        let err = parse(&bad, &schema).unwrap_err();
        assert_eq!(err.path, "StaticData.Starter");
    }

    #[test]
    fn non_object_input_for_object_field_is_absent() {
        let hero = Schema::builder("Hero")
            .field(FieldDescriptor::scalar("hp"))
            .build();
        let schema = Arc::new(
            Schema::builder("StaticData")
                .field(FieldDescriptor::object("Starter", hero))
                .build(),
        );
        for bad in [
            serde_json::json!({}),
            serde_json::json!({"Starter": null}),
            serde_json::json!({"Starter": [1, 2]}),
        ] {
            let tree = parse(&bad, &schema).unwrap();
            assert!(!tree.has("Starter"));
        }
    }

    #[test]
    fn required_object_field_fails_at_owner() {
        let hero = Schema::builder("Hero")
            .field(FieldDescriptor::scalar("hp"))
            .build();
        let schema = Arc::new(
            Schema::builder("StaticData")
                .field(FieldDescriptor::object("Starter", hero).constrain(Constraint::Required))
                .build(),
        );
        let err = parse(&serde_json::json!({}), &schema).unwrap_err();
        assert_eq!(err.path, "StaticData");
        assert_eq!(err.violations.violations()[0].field, "Starter");
    }

    #[test]
    fn deep_nesting_builds_full_paths() {
        let rune = Schema::builder("Rune")
            .field(FieldDescriptor::scalar("glyph").constrain(Constraint::Text))
            .build();
        let card = Schema::builder("Card")
            .field(FieldDescriptor::array("Runes", rune))
            .build();
        let schema = Arc::new(
            Schema::builder("StaticData")
                .field(FieldDescriptor::array("Cards", card))
                .build(),
        );
        let data = serde_json::json!({
            "Cards": [
                {"Runes": []},
                {"Runes": [{"glyph": "a"}, {"glyph": 7}]}
            ]
        });
        let err = parse(&data, &schema).unwrap_err();
        assert_eq!(err.path, "StaticData.Cards[1].Runes[1]");
    }

    #[test]
    fn root_constraints_checked_after_walk() {
        let schema = Arc::new(
            Schema::builder("StaticData")
                .field(FieldDescriptor::scalar("version").constrain(Constraint::Required))
                .build(),
        );
        let err = parse(&serde_json::json!({}), &schema).unwrap_err();
        assert_eq!(err.path, "StaticData");
    }

    #[test]
    fn round_trip_reparse_equals_original() {
        let data = serde_json::json!({
            "Cards": [
                {"id": 1, "name": "Fireball"},
                {"id": 2, "name": "Ice"}
            ]
        });
        let schema = root_schema();
        let tree = parse(&data, &schema).unwrap();
        let reparsed = parse(&tree.to_value(), &schema).unwrap();
        assert_eq!(reparsed, tree);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::schema::{Constraint, FieldDescriptor};
    use proptest::prelude::*;

    fn deck_schema() -> Arc<Schema> {
        let card = Schema::builder("Card")
            .field(FieldDescriptor::scalar("id").constrain(Constraint::Number))
            .field(FieldDescriptor::scalar("name"))
            .build();
        Arc::new(
            Schema::builder("StaticData")
                .field(FieldDescriptor::array("Cards", card))
                .build(),
        )
    }

    fn deck_input() -> impl Strategy<Value = Value> {
        prop::collection::vec((any::<i64>(), "[a-zA-Z0-9 ]{0,20}"), 0..16).prop_map(|cards| {
            let cards: Vec<Value> = cards
                .into_iter()
                .map(|(id, name)| serde_json::json!({"id": id, "name": name}))
                .collect();
            serde_json::json!({ "Cards": cards })
        })
    }

    proptest! {
        /// Exporting a parsed tree and re-parsing it reproduces the tree.
        #[test]
        fn parse_export_parse_round_trip(data in deck_input()) {
            let schema = deck_schema();
            let tree = parse(&data, &schema).unwrap();
            let reparsed = parse(&tree.to_value(), &schema).unwrap();
            prop_assert_eq!(reparsed, tree);
        }

        /// Schema-conformant input exports back to itself exactly.
        #[test]
        fn conformant_input_exports_identically(data in deck_input()) {
            let schema = deck_schema();
            let tree = parse(&data, &schema).unwrap();
            prop_assert_eq!(tree.to_value(), data);
        }

        /// Element order always survives the walk.
        #[test]
        fn element_order_preserved(ids in prop::collection::vec(any::<i64>(), 0..32)) {
            let cards: Vec<Value> = ids.iter()
                .map(|id| serde_json::json!({"id": id, "name": "n"}))
                .collect();
            let data = serde_json::json!({ "Cards": cards });
            let tree = parse(&data, &deck_schema()).unwrap();
            let exported = tree.to_value();
            let out_ids: Vec<i64> = exported["Cards"]
                .as_array()
                .unwrap()
                .iter()
                .map(|c| c["id"].as_i64().unwrap())
                .collect();
            prop_assert_eq!(out_ids, ids);
        }
    }
}
