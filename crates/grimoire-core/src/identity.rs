//! # Cluster Node Identity
//!
//! Newtype wrapper for the identifier a process assumes when it joins the
//! static-data cluster. Update events carry the publisher's `NodeId` so a
//! subscriber can recognize (and skip) its own broadcasts when the transport
//! echoes them back.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one process in the static-data cluster.
///
/// Generated fresh when a module is set up; it identifies the running
/// process, not the host, so two modules in one process are distinct
/// publishers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Generate a new random node identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node:{}", self.0)
    }
}
