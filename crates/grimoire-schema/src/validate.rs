//! # Constraint Validation
//!
//! Per-node checking of the constraints declared on a schema's fields.
//!
//! The walker calls [`validate_node`] once for every object and
//! array-element instance it produces (never for bare scalars). All
//! violations on one node are collected together; the first failing node
//! aborts the whole parse. Imports are rare, synchronous, and
//! operator-facing, so one actionable path beats a noisy tree-wide report.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::instance::{FieldValue, Instance};
use crate::schema::Constraint;

/// A single constraint violation on one field of one node.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Internal name of the violating field.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.field, self.message)
    }
}

/// Collection of violations found on a single node.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// The first failing node's location and its full violation list.
///
/// `path` is the human-readable position of the node in the tree, rooted at
/// the root schema's name, with array elements indexed:
/// `StaticData.Cards[0]`.
#[derive(Error, Debug, Clone)]
#[error("validation failed at {path}:\n{violations}")]
pub struct ValidationError {
    /// Position of the failing node.
    pub path: String,
    /// Every constraint violation found on that node.
    pub violations: ValidationViolations,
}

/// Check every constraint of every field of one node.
///
/// Violations accumulate across the node's fields; a non-empty result
/// aborts the parse with this node's path.
pub fn validate_node(path: &str, node: &Instance) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    for descriptor in node.schema().fields() {
        let value = node.get(descriptor.name());
        for constraint in descriptor.constraints() {
            if let Some(message) = constraint_violation(constraint, value) {
                violations.push(Violation {
                    field: descriptor.name().to_string(),
                    message,
                });
            }
        }
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            path: path.to_string(),
            violations: ValidationViolations { violations },
        })
    }
}

/// Returns the violation message for one constraint against one field
/// value, or `None` if the constraint holds.
fn constraint_violation(constraint: &Constraint, value: Option<&FieldValue>) -> Option<String> {
    match constraint {
        Constraint::Required => match value {
            None => Some("required field is missing".to_string()),
            Some(FieldValue::Scalar(Value::Null)) => Some("required field is null".to_string()),
            Some(_) => None,
        },
        Constraint::Number => {
            let v = present_scalar(value)?;
            if v.is_number() {
                None
            } else {
                Some(format!("expected a number, got {}", json_kind(v)))
            }
        }
        Constraint::Text => {
            let v = present_scalar(value)?;
            if v.is_string() {
                None
            } else {
                Some(format!("expected a string, got {}", json_kind(v)))
            }
        }
        Constraint::Boolean => {
            let v = present_scalar(value)?;
            if v.is_boolean() {
                None
            } else {
                Some(format!("expected a boolean, got {}", json_kind(v)))
            }
        }
        Constraint::Range { min, max } => {
            let v = present_scalar(value)?;
            match v.as_f64() {
                Some(n) if n < *min || n > *max => {
                    Some(format!("value {n} outside range {min}..={max}"))
                }
                Some(_) => None,
                None => Some(format!("range constraint needs a number, got {}", json_kind(v))),
            }
        }
        Constraint::OneOf(allowed) => {
            let v = present_scalar(value)?;
            if allowed.contains(v) {
                None
            } else {
                Some(format!("value {v} is not one of the allowed values"))
            }
        }
    }
}

/// The scalar value to type-check, or `None` to skip: absent fields are
/// `Required`'s concern, explicit `null` counts as absent for type
/// constraints, and container fields have no scalar to check.
fn present_scalar(value: Option<&FieldValue>) -> Option<&Value> {
    match value {
        Some(FieldValue::Scalar(v)) if !v.is_null() => Some(v),
        _ => None,
    }
}

/// Short name of a JSON value's type, for violation messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
