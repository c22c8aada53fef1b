//! # Typed Instances — Nodes of the Static Data Tree
//!
//! An `Instance` is one validated node of the in-memory tree. Its shape
//! mirrors its schema, never the input data: undeclared input keys do not
//! survive parsing, and declared-but-missing fields are simply absent.
//!
//! ## Construction Discipline
//!
//! Instances are produced only by the walker (`parse`) or by
//! [`Instance::empty()`]. There is no public mutation: after a parse the
//! tree is read-only, and every change to the live tree is a whole-tree
//! replacement built from a fresh parse.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::schema::Schema;

/// The value slot of one field inside an [`Instance`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A scalar carried verbatim from the input, `null` included.
    Scalar(Value),
    /// An ordered list of typed child instances.
    List(Vec<Instance>),
    /// A single typed child instance.
    Node(Instance),
}

/// One typed node of the static-data tree.
///
/// Holds its schema and the subset of declared fields the input populated.
/// Array fields are always populated (possibly with an empty list); scalar
/// and object fields may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    schema: Arc<Schema>,
    fields: HashMap<String, FieldValue>,
}

impl Instance {
    /// An instance with no populated fields.
    ///
    /// This is the startup fallback shape when no stored data exists (or
    /// the stored data cannot be loaded), and the walker's starting point
    /// for every node it builds.
    pub fn empty(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            fields: HashMap::new(),
        }
    }

    /// Populate one field. Walker-only; the tree is immutable once built.
    pub(crate) fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// The schema this node was parsed against.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Read one field's value, if populated.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns true if the field is populated.
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Export this node as plain data.
    ///
    /// This is the inverse of parsing: the output contains exactly the
    /// populated declared fields, with nested instances exported
    /// recursively and array order preserved. Re-parsing the result against
    /// the same schema reproduces this instance.
    pub fn to_value(&self) -> Value {
        let mut out = serde_json::Map::new();
        for descriptor in self.schema.fields() {
            let Some(value) = self.fields.get(descriptor.name()) else {
                continue;
            };
            let exported = match value {
                FieldValue::Scalar(v) => v.clone(),
                FieldValue::List(children) => {
                    Value::Array(children.iter().map(Instance::to_value).collect())
                }
                FieldValue::Node(child) => child.to_value(),
            };
            out.insert(descriptor.name().to_string(), exported);
        }
        Value::Object(out)
    }
}
