//! # grimoire-schema — Schema Declaration and the Tree-Walking Engine
//!
//! The typed heart of the static-data system: declare the shape of your
//! content once, then convert untyped imports into validated instance trees
//! and back.
//!
//! ## The Pieces
//!
//! 1. **Declaration** ([`schema`]): `Schema::builder()` composes
//!    [`FieldDescriptor`]s into an immutable [`Schema`]. Kinds are explicit
//!    tags; nested schemas exist exactly for container kinds; constraints
//!    ride on the descriptors.
//!
//! 2. **The walk** ([`walk::parse`]): lenient, schema-shaped conversion of
//!    untyped data into [`Instance`] trees. Missing fields are absent,
//!    extras are dropped, scalars pass through verbatim.
//!
//! 3. **Validation** ([`validate`]): per-node constraint checking with
//!    fail-fast reporting. The first failing node aborts the parse with
//!    its path (`StaticData.Cards[0]`) and every violation on that node.
//!
//! 4. **Description** ([`describe::describe`]): plain-data export of the
//!    schema itself, for authoring tools that need the expected shape.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Parsing is pure: no I/O, no logging, no global state.

pub mod describe;
pub mod instance;
pub mod schema;
pub mod validate;
pub mod walk;

// Re-export primary types for ergonomic imports.
pub use describe::describe;
pub use instance::{FieldValue, Instance};
pub use schema::{Constraint, FieldDescriptor, FieldKind, Schema, SchemaBuilder};
pub use validate::{validate_node, ValidationError, ValidationViolations, Violation};
pub use walk::parse;
