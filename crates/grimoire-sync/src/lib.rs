//! # grimoire-sync — Cluster Synchronization and the Module Façade
//!
//! The top of the workspace: [`StaticDataModule`] binds a schema, a durable
//! store, and an update transport into the four host-facing operations
//! (setup, import, validate, export) plus [`apply_update`] for inbound
//! cluster events.
//!
//! ## How a Cluster Stays Consistent
//!
//! 1. One node imports fresh data. The module parses and validates it,
//!    persists the canonical text, swaps its in-memory tree, and broadcasts
//!    an [`UpdateEvent`].
//! 2. Every other node's host delivers that event to `apply_update`, which
//!    verifies the digest, re-validates the content against the local
//!    schema, persists, and swaps.
//! 3. Applying never re-broadcasts, and nodes skip events carrying their own
//!    [`NodeId`](grimoire_core::NodeId), so updates propagate exactly one
//!    hop.
//!
//! Push mode ships the data inside the event; pull mode ships a bare
//! announcement and receivers re-fetch from their store. The mode is a
//! per-node choice ([`UpdateMode`]), read from `GRIMOIRE_UPDATE_MODE` by
//! [`ModuleConfig::from_env`].
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All I/O goes through the injected [`ContentStore`](grimoire_store::ContentStore)
//!   and [`UpdateTransport`] capabilities.
//!
//! [`apply_update`]: StaticDataModule::apply_update

pub mod config;
pub mod error;
pub mod event;
pub mod module;
pub mod transport;

// Re-export primary types for ergonomic imports.
pub use config::{ModuleConfig, UpdateMode, DEFAULT_STORAGE_PATH};
pub use error::{ImportError, SyncError};
pub use event::UpdateEvent;
pub use module::{StaticDataExport, StaticDataModule, UpdateOutcome};
pub use transport::{LoopbackTransport, TransportError, UpdateTransport};
