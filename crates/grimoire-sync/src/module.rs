//! # Static Data Module — The Operation Surface
//!
//! One [`StaticDataModule`] per process is the intended shape: it owns the
//! schema, the current tree behind a lock, and handles to the two injected
//! capabilities (durable storage and the update transport).
//!
//! ## Concurrency Model
//!
//! The live tree is an `Arc<Instance>` behind a `parking_lot::RwLock`.
//! Readers clone the `Arc` and keep using the tree they got; an import or an
//! applied update swaps the `Arc` in one write-lock acquisition. A game tick
//! that started on the old tree finishes on the old tree.
//!
//! ## Publish Order
//!
//! `import` parses and validates first, then persists, then swaps, then
//! broadcasts. A validation or persistence failure therefore leaves both the
//! in-memory tree and the durable copy untouched; only a broadcast failure
//! leaves the node ahead of its peers.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;

use grimoire_core::{sha256_digest, CanonicalText, NodeId};
use grimoire_schema::{describe, parse, Instance, Schema, ValidationError};
use grimoire_store::{CompressedFileStore, ContentStore, StoreError};

use crate::config::ModuleConfig;
use crate::error::{ImportError, SyncError};
use crate::event::UpdateEvent;
use crate::transport::UpdateTransport;

/// What happened to a received update event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The event's content replaced the in-memory tree.
    Applied,
    /// The event originated on this node and was ignored.
    SkippedOwnOrigin,
}

/// Plain-data snapshot of the module: the current tree plus the schema
/// description, ready for handing to authoring tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticDataExport {
    /// The current tree as plain data.
    pub data: Value,
    /// The schema description tree.
    pub schema: Value,
}

/// The static-data engine's host-facing surface.
pub struct StaticDataModule {
    schema: Arc<Schema>,
    tree: RwLock<Arc<Instance>>,
    store: Arc<dyn ContentStore>,
    transport: Arc<dyn UpdateTransport>,
    config: ModuleConfig,
    node: NodeId,
}

impl StaticDataModule {
    /// Set up a module with injected storage and transport.
    ///
    /// Attempts to hydrate the tree from the store. Any load failure is
    /// reported and the module starts with an empty tree; setup itself never
    /// fails, so a host boots even on a fresh machine or with a damaged
    /// data file.
    pub fn setup(
        schema: Arc<Schema>,
        store: Arc<dyn ContentStore>,
        transport: Arc<dyn UpdateTransport>,
        config: ModuleConfig,
    ) -> Self {
        let node = NodeId::new();
        let tree = match load_tree(&schema, store.as_ref()) {
            Ok(tree) => {
                tracing::info!(
                    node = %node,
                    fields = tree.len(),
                    "Hydrated static data from the store"
                );
                tree
            }
            Err(SyncError::Store(StoreError::Missing)) => {
                tracing::info!(
                    node = %node,
                    "No stored static data found, starting with an empty tree"
                );
                Instance::empty(Arc::clone(&schema))
            }
            Err(error) => {
                tracing::warn!(
                    node = %node,
                    error = %error,
                    "Could not load stored static data, starting with an empty tree"
                );
                Instance::empty(Arc::clone(&schema))
            }
        };
        Self {
            schema,
            tree: RwLock::new(Arc::new(tree)),
            store,
            transport,
            config,
            node,
        }
    }

    /// Set up a module backed by the default compressed file store at
    /// `config.storage_path`.
    pub fn setup_with_local_store(
        schema: Arc<Schema>,
        transport: Arc<dyn UpdateTransport>,
        config: ModuleConfig,
    ) -> Self {
        let store = Arc::new(CompressedFileStore::new(&config.storage_path));
        Self::setup(schema, store, transport, config)
    }

    /// Replace the static data tree with `data` and tell the cluster.
    ///
    /// The full pipeline: parse and validate, render canonical text, persist,
    /// swap the in-memory tree, broadcast. Errors before the swap leave
    /// everything untouched; [`ImportError::Broadcast`] means the import took
    /// effect locally but peers were not notified.
    pub fn import(&self, data: &Value) -> Result<(), ImportError> {
        let tree = parse(data, &self.schema)?;
        let text = CanonicalText::encode(&tree.to_value())?;
        self.store.store(&text)?;

        *self.tree.write() = Arc::new(tree);

        let digest = sha256_digest(&text);
        let event = UpdateEvent {
            origin: self.node.clone(),
            published_at: Utc::now(),
            digest,
            payload: self.config.update_mode.is_push().then(|| text.clone()),
        };
        tracing::info!(
            node = %self.node,
            digest = %digest,
            mode = %self.config.update_mode,
            "Imported static data, broadcasting update"
        );
        self.transport.broadcast(&event)?;
        Ok(())
    }

    /// Check `data` against the schema without touching anything.
    ///
    /// Runs the same parse-and-validate pipeline as [`import`](Self::import)
    /// and discards the result. For authoring tools that want feedback
    /// before committing.
    pub fn validate(&self, data: &Value) -> Result<(), ValidationError> {
        parse(data, &self.schema).map(|_| ())
    }

    /// Export the current tree and the schema description as plain data.
    pub fn export(&self) -> StaticDataExport {
        let tree = Arc::clone(&self.tree.read());
        StaticDataExport {
            data: tree.to_value(),
            schema: describe(&self.schema),
        }
    }

    /// Apply an update event received from the cluster.
    ///
    /// Own-origin events are skipped. For the rest, the canonical text is
    /// obtained from the inline payload (verified against the announced
    /// digest) or, for bare announcements on a pull-configured node, from
    /// the store. The text is then parsed, validated, persisted, and swapped
    /// in. On any error the previous tree stays live.
    ///
    /// Applying never re-broadcasts, so an event echoed between nodes dies
    /// out instead of circulating.
    pub fn apply_update(&self, event: &UpdateEvent) -> Result<UpdateOutcome, SyncError> {
        if event.origin == self.node {
            tracing::debug!(node = %self.node, "Skipping own update event");
            return Ok(UpdateOutcome::SkippedOwnOrigin);
        }

        let text = match &event.payload {
            Some(payload) => {
                let actual = sha256_digest(payload);
                if actual != event.digest {
                    tracing::warn!(
                        node = %self.node,
                        origin = %event.origin,
                        expected = %event.digest,
                        actual = %actual,
                        "Rejecting update whose payload does not match its digest"
                    );
                    return Err(SyncError::DigestMismatch {
                        expected: event.digest,
                        actual,
                    });
                }
                payload.clone()
            }
            None => {
                if self.config.update_mode.is_push() {
                    tracing::warn!(
                        node = %self.node,
                        origin = %event.origin,
                        "Received a bare update announcement while configured for push"
                    );
                    return Err(SyncError::MissingPayload);
                }
                let fetched = self.store.load()?;
                let fetched_digest = sha256_digest(&fetched);
                if fetched_digest != event.digest {
                    // The store may already hold a newer write than the one
                    // announced; latest content wins.
                    tracing::debug!(
                        node = %self.node,
                        announced = %event.digest,
                        fetched = %fetched_digest,
                        "Fetched content differs from the announced digest"
                    );
                }
                fetched
            }
        };

        let value = text.decode()?;
        let tree = parse(&value, &self.schema)?;
        self.store.store(&text)?;

        *self.tree.write() = Arc::new(tree);

        tracing::info!(
            node = %self.node,
            origin = %event.origin,
            digest = %event.digest,
            "Applied static data update"
        );
        Ok(UpdateOutcome::Applied)
    }

    /// A handle to the current tree. The handle stays valid across later
    /// imports; it just keeps pointing at the tree that was live when taken.
    pub fn snapshot(&self) -> Arc<Instance> {
        Arc::clone(&self.tree.read())
    }

    /// This node's cluster identity.
    pub fn node_id(&self) -> &NodeId {
        &self.node
    }

    /// The schema this module parses against.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The configuration the module was set up with.
    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }
}

impl std::fmt::Debug for StaticDataModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticDataModule")
            .field("schema", &self.schema.name())
            .field("node", &self.node)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Load, decode, and re-validate the stored tree.
fn load_tree(schema: &Arc<Schema>, store: &dyn ContentStore) -> Result<Instance, SyncError> {
    let text = store.load()?;
    let value = text.decode()?;
    Ok(parse(&value, schema)?)
}
