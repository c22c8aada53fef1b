//! # grimoire-store — Durable Persistence for Canonical Text
//!
//! Defines the `ContentStore` capability contract the module façade
//! persists through, plus the two in-tree implementations:
//!
//! - [`CompressedFileStore`] — the default durable store: canonical text,
//!   zstd-compressed, at a configured file path. The on-disk artifact is
//!   never uncompressed.
//! - [`MemoryStore`] — an in-process store for embedding and tests.
//!
//! The contract is injected, not inherited: a host with its own backing
//! store (a config service, an object store) implements `ContentStore` and
//! hands it to the module at setup.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Stores move bytes; they never interpret the tree beyond the
//!   canonical-text well-formedness check built into `CanonicalText`.

use grimoire_core::{CanonicalError, CanonicalText};
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::CompressedFileStore;
pub use memory::MemoryStore;

/// Where canonical text is persisted and retrieved.
///
/// `store` persists only; propagation to other nodes is the synchronizer's
/// job and happens after a successful `store`. `load` is also the pull-mode
/// fetch path, so an implementation backed by shared storage gives
/// pull-mode receivers the publisher's content for free.
pub trait ContentStore: Send + Sync {
    /// Retrieve the most recently stored canonical text.
    ///
    /// # Errors
    ///
    /// `StoreError::Missing` when nothing has been stored yet; other
    /// variants for I/O failures and artifacts that cannot be decoded back
    /// to canonical text.
    fn load(&self) -> Result<CanonicalText, StoreError>;

    /// Persist canonical text, replacing any previous content.
    fn store(&self, text: &CanonicalText) -> Result<(), StoreError>;
}

/// Error loading or storing canonical text.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Nothing has been stored yet.
    #[error("no stored content")]
    Missing,

    /// Reading or writing the backing location failed.
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    /// The compressed artifact could not be decompressed.
    #[error("stored artifact is corrupt: {source}")]
    Corrupt {
        /// The decompression failure.
        #[source]
        source: std::io::Error,
    },

    /// Decompressed bytes are not UTF-8 text.
    #[error("stored artifact is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Recovered text failed the canonical well-formedness check.
    #[error("stored artifact is not canonical text: {0}")]
    Canonical(#[from] CanonicalError),
}
