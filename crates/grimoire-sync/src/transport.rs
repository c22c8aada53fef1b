//! # Update Transport
//!
//! The capability contract for fanning update events out to the rest of the
//! cluster. The engine only ever calls [`UpdateTransport::broadcast`]; the
//! receiving side is the host's job, which delivers inbound events to
//! [`StaticDataModule::apply_update`](crate::StaticDataModule::apply_update)
//! however its messaging fabric hands them over.
//!
//! [`LoopbackTransport`] is the in-process implementation used by tests and
//! single-process clusters.

use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

use crate::event::UpdateEvent;

/// Broadcast capability a static-data module publishes through.
///
/// Implementations deliver to every *other* node; echoing the event back to
/// the publisher is allowed, since receivers skip their own origin.
pub trait UpdateTransport: Send + Sync {
    /// Send one update event to the rest of the cluster.
    fn broadcast(&self, event: &UpdateEvent) -> Result<(), TransportError>;
}

/// Failure to hand an event to the messaging fabric.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The messaging backend could not be reached.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
    /// The backend refused the event.
    #[error("broadcast rejected: {0}")]
    Rejected(String),
}

/// In-process transport that records every broadcast event.
///
/// Clones share one event log, so a test can hold a handle while the module
/// owns another. [`drain`](LoopbackTransport::drain) hands the recorded
/// events over for delivery to peer modules.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    sent: Arc<Mutex<Vec<UpdateEvent>>>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything broadcast so far, in order.
    pub fn sent(&self) -> Vec<UpdateEvent> {
        self.sent.lock().clone()
    }

    /// Number of events broadcast so far.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Remove and return the recorded events, oldest first.
    pub fn drain(&self) -> Vec<UpdateEvent> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl Clone for LoopbackTransport {
    /// Cloning shares the underlying event log, not a snapshot of it.
    fn clone(&self) -> Self {
        Self {
            sent: Arc::clone(&self.sent),
        }
    }
}

impl UpdateTransport for LoopbackTransport {
    fn broadcast(&self, event: &UpdateEvent) -> Result<(), TransportError> {
        self.sent.lock().push(event.clone());
        Ok(())
    }
}
