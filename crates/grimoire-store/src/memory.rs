//! # In-Memory Store
//!
//! `ContentStore` over process memory. Used by tests and by single-process
//! embeddings that do not want a durable artifact; clones share the same
//! underlying content, so one `MemoryStore` can stand in for the shared
//! backing store of several modules in pull-mode tests.

use std::sync::Arc;

use parking_lot::RwLock;

use grimoire_core::CanonicalText;

use crate::{ContentStore, StoreError};

/// In-process `ContentStore`; starts empty.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: Arc<RwLock<Option<CanonicalText>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Cloning shares the underlying content, not a snapshot of it.
impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
        }
    }
}

impl ContentStore for MemoryStore {
    fn load(&self) -> Result<CanonicalText, StoreError> {
        self.content.read().clone().ok_or(StoreError::Missing)
    }

    fn store(&self, text: &CanonicalText) -> Result<(), StoreError> {
        *self.content.write() = Some(text.clone());
        Ok(())
    }
}
