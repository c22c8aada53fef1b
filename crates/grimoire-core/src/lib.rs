//! # grimoire-core — Foundational Types for the Grimoire Engine
//!
//! This crate is the bedrock of the Grimoire static-data engine. It defines
//! the primitives every other crate in the workspace builds on; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalText` newtype.** The serialized form of a static-data tree
//!    flows through exactly one type. Storage, transmission, and digest
//!    computation all take `&CanonicalText`; the only constructors validate
//!    what they accept. No bare strings for serialized trees.
//!
//! 2. **`sha256_digest()` accepts only `&CanonicalText`.** Compile-time
//!    enforcement that every digest covers text produced by the canonical
//!    constructors.
//!
//! 3. **Newtype node identity.** `NodeId` is a distinct type, not a bare
//!    UUID, so publisher identity cannot be confused with any other
//!    identifier.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `grimoire-*` crates (this is the leaf of the
//!   DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalText;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalError, DigestParseError};
pub use identity::NodeId;
