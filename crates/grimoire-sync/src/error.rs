//! # Import and Synchronization Errors
//!
//! Two error surfaces: [`ImportError`] for the local publish path and
//! [`SyncError`] for applying an update received from another node. Both
//! leave the previous in-memory tree in place; the only partially-applied
//! state is [`ImportError::Broadcast`], where the local import succeeded but
//! the cluster was not told.

use grimoire_core::{CanonicalError, ContentDigest};
use grimoire_schema::ValidationError;
use grimoire_store::StoreError;
use thiserror::Error;

use crate::transport::TransportError;

/// Failure while importing and publishing a new static data tree.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The data violated its schema constraints; nothing was persisted or
    /// swapped in.
    #[error("import rejected: {0}")]
    Validation(#[from] ValidationError),
    /// The validated tree could not be rendered as canonical text.
    #[error("import could not encode the tree: {0}")]
    Canonical(#[from] CanonicalError),
    /// Persisting the canonical text failed; the in-memory tree was not
    /// replaced.
    #[error("import could not persist: {0}")]
    Store(#[from] StoreError),
    /// The import persisted and took effect locally, but the update event
    /// never reached the transport. Other nodes are now stale until the next
    /// successful import.
    #[error("import applied locally but the broadcast failed: {0}")]
    Broadcast(#[from] TransportError),
}

/// Failure while applying an update event from another node.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A push-configured node received a bare announcement and has no way to
    /// fetch the content it names.
    #[error("update event carries no payload")]
    MissingPayload,
    /// The inline payload does not hash to the digest the event announced.
    #[error("payload digest mismatch: event announced {expected}, payload is {actual}")]
    DigestMismatch {
        expected: ContentDigest,
        actual: ContentDigest,
    },
    /// The canonical text could not be decoded.
    #[error("update payload is not decodable: {0}")]
    Canonical(#[from] CanonicalError),
    /// The incoming tree failed validation against the local schema.
    #[error("update rejected: {0}")]
    Validation(#[from] ValidationError),
    /// Fetching the announced content or persisting the accepted update
    /// failed.
    #[error("update store failure: {0}")]
    Store(#[from] StoreError),
}
