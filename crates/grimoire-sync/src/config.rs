//! # Module Configuration
//!
//! Where the durable copy lives and how updates are announced. Values come
//! from the environment in deployments (`GRIMOIRE_STATIC_PATH`,
//! `GRIMOIRE_UPDATE_MODE`) and from plain struct literals in tests.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the compressed static-data file, relative to the
/// process working directory.
pub const DEFAULT_STORAGE_PATH: &str = "static.dat";

const STORAGE_PATH_VAR: &str = "GRIMOIRE_STATIC_PATH";
const UPDATE_MODE_VAR: &str = "GRIMOIRE_UPDATE_MODE";

/// How a node announces a successful import to the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Update events carry the full canonical text. Receivers apply it
    /// directly, so nodes need no shared storage.
    #[default]
    Push,
    /// Update events are bare announcements. Receivers re-fetch the
    /// canonical text from their own store, which therefore must see the
    /// publisher's writes.
    Pull,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::Push => "push",
            UpdateMode::Pull => "pull",
        }
    }

    pub fn is_push(&self) -> bool {
        matches!(self, UpdateMode::Push)
    }

    /// Parse the environment spelling. Case-insensitive; anything but
    /// "push" or "pull" is unrecognized.
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "push" => Some(UpdateMode::Push),
            "pull" => Some(UpdateMode::Pull),
            _ => None,
        }
    }
}

impl std::fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one static-data module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    /// Where the default file store keeps the compressed canonical text.
    pub storage_path: PathBuf,
    /// How this node announces its imports.
    pub update_mode: UpdateMode,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            update_mode: UpdateMode::default(),
        }
    }
}

impl ModuleConfig {
    /// Read configuration from the environment.
    ///
    /// `GRIMOIRE_STATIC_PATH` overrides the storage location and
    /// `GRIMOIRE_UPDATE_MODE` (`push` or `pull`) the announcement mode.
    /// Unset variables fall back to the defaults; an unrecognized mode is
    /// logged and treated as unset.
    pub fn from_env() -> Self {
        let storage_path = std::env::var(STORAGE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH));

        let update_mode = match std::env::var(UPDATE_MODE_VAR) {
            Ok(raw) => match UpdateMode::parse(&raw) {
                Some(mode) => mode,
                None => {
                    tracing::warn!(
                        value = %raw,
                        default = %UpdateMode::default(),
                        "Unrecognized GRIMOIRE_UPDATE_MODE, using the default mode"
                    );
                    UpdateMode::default()
                }
            },
            Err(_) => UpdateMode::default(),
        };

        Self {
            storage_path,
            update_mode,
        }
    }
}
