//! # Schema Declaration — Builder-Composed Field Registries
//!
//! A `Schema` describes one node kind of the static-data tree: an ordered
//! registry of field descriptors, each carrying the field's external name,
//! its explicit value kind, the nested schema for container kinds, and its
//! validation constraints.
//!
//! ## Construction Discipline
//!
//! Schemas are built once, in straight-line initialization code, through
//! [`SchemaBuilder`]. There is no process-wide registry and no mutation
//! after `build()`; the resulting `Schema` is an immutable value shared via
//! `Arc`. Declaring the same field name twice replaces the earlier
//! descriptor in place (the position of the first declaration is kept).
//!
//! ## Kind Invariant
//!
//! A descriptor's nested schema exists exactly when its kind is `Array` or
//! `Object`. The invariant is structural: the descriptor constructors are
//! the only way to build one, and the container constructors are the only
//! ones that take a schema.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The author-declared kind of a field's value.
///
/// Explicit on every descriptor; the walker never inspects runtime types to
/// decide how to treat a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// An uninterpreted leaf value, carried verbatim.
    Scalar,
    /// An ordered list of nested instances.
    Array,
    /// A single nested instance.
    Object,
}

impl FieldKind {
    /// Returns the kind identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation rule attached to one field.
///
/// Checked by the validator on every instance the walker produces. Type
/// constraints (`Number`, `Text`, `Boolean`, `Range`, `OneOf`) apply to
/// present, non-null scalar values; pair them with `Required` to forbid
/// absence and null. On container fields only `Required` is meaningful
/// (array fields always materialize, so it constrains object fields).
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The field must be present, and for scalar fields non-null.
    Required,
    /// The scalar value must be a JSON number.
    Number,
    /// The scalar value must be a JSON string.
    Text,
    /// The scalar value must be a JSON boolean.
    Boolean,
    /// The numeric value must lie within the inclusive range.
    Range {
        /// Lower bound, inclusive.
        min: f64,
        /// Upper bound, inclusive.
        max: f64,
    },
    /// The scalar value must equal one of the listed values.
    OneOf(Vec<Value>),
}

impl Constraint {
    /// One-line summary of the rule, used in schema descriptions.
    pub fn summary(&self) -> String {
        match self {
            Self::Required => "required".to_string(),
            Self::Number => "number".to_string(),
            Self::Text => "text".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Range { min, max } => format!("range {min}..={max}"),
            Self::OneOf(values) => format!("one of {}", Value::Array(values.clone())),
        }
    }
}

/// Internal storage for a descriptor's kind and nested schema.
///
/// A sum type rather than `(FieldKind, Option<Arc<Schema>>)`, so the
/// nested-iff-container invariant cannot be violated by any code path.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldShape {
    Scalar,
    Array(Arc<Schema>),
    Object(Arc<Schema>),
}

/// Metadata for one field of a [`Schema`].
///
/// `name` is the internal identifier and the key looked up in untyped input
/// data. `remote_name` is the external, human-facing identifier (e.g. a
/// spreadsheet column header); it defaults to `name` and is independent of
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    remote_name: String,
    shape: FieldShape,
    constraints: Vec<Constraint>,
}

impl FieldDescriptor {
    /// Declare a scalar field: an uninterpreted leaf carried verbatim.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::with_shape(name, FieldShape::Scalar)
    }

    /// Declare an array field whose elements follow `element`.
    pub fn array(name: impl Into<String>, element: impl Into<Arc<Schema>>) -> Self {
        Self::with_shape(name, FieldShape::Array(element.into()))
    }

    /// Declare an object field whose value follows `nested`.
    pub fn object(name: impl Into<String>, nested: impl Into<Arc<Schema>>) -> Self {
        Self::with_shape(name, FieldShape::Object(nested.into()))
    }

    fn with_shape(name: impl Into<String>, shape: FieldShape) -> Self {
        let name = name.into();
        Self {
            remote_name: name.clone(),
            name,
            shape,
            constraints: Vec::new(),
        }
    }

    /// Override the external name shown to authoring tools.
    pub fn with_remote_name(mut self, remote_name: impl Into<String>) -> Self {
        self.remote_name = remote_name.into();
        self
    }

    /// Attach a validation constraint. May be called multiple times; all
    /// attached constraints are checked.
    pub fn constrain(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// The internal field name (the input-data key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The external, human-facing field name.
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    /// The declared value kind.
    pub fn kind(&self) -> FieldKind {
        match self.shape {
            FieldShape::Scalar => FieldKind::Scalar,
            FieldShape::Array(_) => FieldKind::Array,
            FieldShape::Object(_) => FieldKind::Object,
        }
    }

    /// The nested schema; `Some` exactly for `Array` and `Object` kinds.
    pub fn nested(&self) -> Option<&Arc<Schema>> {
        match &self.shape {
            FieldShape::Scalar => None,
            FieldShape::Array(schema) | FieldShape::Object(schema) => Some(schema),
        }
    }

    /// The attached validation constraints, in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub(crate) fn shape(&self) -> &FieldShape {
        &self.shape
    }
}

/// A declared node type of the static-data tree.
///
/// Immutable after [`SchemaBuilder::build()`]; shared via `Arc` between the
/// walker, the validator, and every instance produced from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Start declaring a schema with the given node-type name.
    ///
    /// The name doubles as the root of validation-error paths when this
    /// schema is parsed as the tree root (e.g. `StaticData.Cards[0]`).
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The node-type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered field descriptors.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a descriptor by internal field name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

/// Incremental schema declaration; one [`field()`](Self::field) call per
/// declared field, then [`build()`](Self::build).
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    /// Append one field descriptor.
    ///
    /// Redeclaring an existing field name replaces the earlier descriptor
    /// in place, keeping the position of the first declaration.
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        match self.fields.iter().position(|f| f.name() == descriptor.name()) {
            Some(index) => self.fields[index] = descriptor,
            None => self.fields.push(descriptor),
        }
        self
    }

    /// Finish the declaration, producing an immutable schema.
    pub fn build(self) -> Schema {
        Schema {
            name: self.name,
            fields: self.fields,
        }
    }
}
