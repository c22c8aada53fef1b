//! # Update Events
//!
//! The wire format a node publishes after a successful import. Events are
//! plain serde structs so the host can ship them over whatever messaging
//! fabric it already runs; this crate never touches the network itself.
//!
//! ## Push and Pull
//!
//! The `payload` field carries the entire canonical text when the publisher
//! runs in push mode, and is absent in pull mode. Receivers key their
//! behavior off that presence, not off their own configuration, so mixed
//! clusters degrade predictably: a pull-configured node that receives a full
//! payload simply applies it.

use chrono::{DateTime, Utc};
use grimoire_core::{CanonicalText, ContentDigest, NodeId};
use serde::{Deserialize, Serialize};

/// Notification that a node replaced its static data tree.
///
/// The digest always describes the canonical text the publisher persisted,
/// whether or not that text rides along in `payload`. Receivers verify it
/// before swapping anything in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// The node that performed the import. Receivers compare this against
    /// their own identity to ignore their own broadcasts.
    pub origin: NodeId,
    /// When the publisher built the event.
    pub published_at: DateTime<Utc>,
    /// SHA-256 digest of the canonical text this event announces.
    pub digest: ContentDigest,
    /// The canonical text itself in push mode, absent in pull mode.
    pub payload: Option<CanonicalText>,
}

impl UpdateEvent {
    /// Whether the event carries the data inline.
    pub fn carries_payload(&self) -> bool {
        self.payload.is_some()
    }
}
