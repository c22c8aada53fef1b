//! # Schema Description — Shape Export for Authoring Tools
//!
//! The inverse of parsing on the schema side: a plain-data description of
//! what the schema expects, for external tooling (spreadsheet add-ons,
//! content editors) that needs the shape without the typed tree.

use serde_json::Value;

use crate::schema::{FieldDescriptor, Schema};

/// Describe a schema as a plain-data tree.
///
/// One entry per field, keyed by internal name:
///
/// ```json
/// { "Cards": { "name": "Cards", "type": "array", "meta": { ... } } }
/// ```
///
/// `name` is the external (remote) field name, `type` the declared kind,
/// and `meta` the nested schema's description for container fields, or the
/// list of constraint summaries for scalar fields.
pub fn describe(schema: &Schema) -> Value {
    let mut out = serde_json::Map::new();
    for descriptor in schema.fields() {
        out.insert(descriptor.name().to_string(), describe_field(descriptor));
    }
    Value::Object(out)
}

fn describe_field(descriptor: &FieldDescriptor) -> Value {
    let meta = match descriptor.nested() {
        Some(nested) => describe(nested),
        None => Value::Array(
            descriptor
                .constraints()
                .iter()
                .map(|c| Value::String(c.summary()))
                .collect(),
        ),
    };
    serde_json::json!({
        "name": descriptor.remote_name(),
        "type": descriptor.kind().as_str(),
        "meta": meta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Constraint, FieldDescriptor};

    #[test]
    fn describes_nested_array_schema() {
        let card = Schema::builder("Card")
            .field(FieldDescriptor::scalar("id").constrain(Constraint::Number))
            .field(FieldDescriptor::scalar("name"))
            .build();
        let root = Schema::builder("StaticData")
            .field(FieldDescriptor::array("Cards", card))
            .build();

        let description = describe(&root);
        assert_eq!(description["Cards"]["name"], "Cards");
        assert_eq!(description["Cards"]["type"], "array");
        assert_eq!(description["Cards"]["meta"]["id"]["type"], "scalar");
        assert_eq!(
            description["Cards"]["meta"]["id"]["meta"],
            serde_json::json!(["number"])
        );
        assert_eq!(description["Cards"]["meta"]["name"]["meta"], serde_json::json!([]));
    }

    #[test]
    fn scalar_meta_lists_constraint_summaries() {
        let schema = Schema::builder("Card")
            .field(
                FieldDescriptor::scalar("cost")
                    .constrain(Constraint::Required)
                    .constrain(Constraint::Range { min: 0.0, max: 10.0 }),
            )
            .build();
        let description = describe(&schema);
        assert_eq!(
            description["cost"]["meta"],
            serde_json::json!(["required", "range 0..=10"])
        );
    }

    #[test]
    fn remote_name_appears_as_display_name() {
        let schema = Schema::builder("Card")
            .field(FieldDescriptor::scalar("mana_cost").with_remote_name("Mana Cost"))
            .build();
        let description = describe(&schema);
        assert_eq!(description["mana_cost"]["name"], "Mana Cost");
    }

    #[test]
    fn object_field_meta_is_nested_description() {
        let hero = Schema::builder("Hero")
            .field(FieldDescriptor::scalar("hp"))
            .build();
        let schema = Schema::builder("StaticData")
            .field(FieldDescriptor::object("Starter", hero))
            .build();
        let description = describe(&schema);
        assert_eq!(description["Starter"]["type"], "object");
        assert!(description["Starter"]["meta"]["hp"].is_object());
    }

    #[test]
    fn empty_schema_describes_as_empty_object() {
        let schema = Schema::builder("Nothing").build();
        assert_eq!(describe(&schema), serde_json::json!({}));
    }
}
