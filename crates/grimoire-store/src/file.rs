//! # Compressed File Store
//!
//! The default durable location: one local file holding the canonical text
//! after zstd compression. Compression is not optional; the artifact on
//! disk is always a zstd frame.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use grimoire_core::CanonicalText;

use crate::{ContentStore, StoreError};

/// Compression level for the durable artifact. Static data is written
/// rarely and read once per boot, so the zstd default trade-off is fine.
const COMPRESSION_LEVEL: i32 = zstd::DEFAULT_COMPRESSION_LEVEL;

/// `ContentStore` backed by one zstd-compressed local file.
#[derive(Debug, Clone)]
pub struct CompressedFileStore {
    path: PathBuf,
}

impl CompressedFileStore {
    /// Create a store at the given path. The file is created on the first
    /// `store`; a missing file reads as [`StoreError::Missing`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentStore for CompressedFileStore {
    fn load(&self) -> Result<CanonicalText, StoreError> {
        let compressed = fs::read(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::Missing
            } else {
                StoreError::Io(e)
            }
        })?;
        let bytes = zstd::stream::decode_all(compressed.as_slice())
            .map_err(|source| StoreError::Corrupt { source })?;
        let text = String::from_utf8(bytes)?;
        Ok(CanonicalText::from_text(text)?)
    }

    fn store(&self, text: &CanonicalText) -> Result<(), StoreError> {
        let compressed = zstd::stream::encode_all(text.as_str().as_bytes(), COMPRESSION_LEVEL)?;
        fs::write(&self.path, compressed)?;
        Ok(())
    }
}
