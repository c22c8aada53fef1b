//! # Canonical Text — The Single Serialized Form
//!
//! This module defines `CanonicalText`, the sole construction path for the
//! textual encoding of a static-data tree. The same encoding serves both
//! roles the engine has for serialized data: the durable artifact (after
//! compression) and the push-mode wire payload.
//!
//! ## Invariant
//!
//! The `CanonicalText` newtype has a private inner field. The only ways to
//! construct it are `CanonicalText::encode()` (from an in-memory value) and
//! `CanonicalText::from_text()` (from inbound text, which is checked to be
//! well-formed JSON before it is accepted). Any function that stores,
//! transmits, or digests the serialized tree takes `&CanonicalText`, so a
//! malformed or unchecked string can never reach those paths.
//!
//! ## What Decoding Recovers
//!
//! `decode()` recovers only an untyped `serde_json::Value`. The typed tree is
//! not embedded in the text; recovering it requires re-walking the value
//! against the schema. This keeps the stored artifact independent of any
//! in-process representation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CanonicalError;

/// Text produced exclusively by JSON serialization of a static-data tree,
/// or accepted from outside after a well-formedness check.
///
/// # Invariants
///
/// - The only constructors are [`CanonicalText::encode()`] and
///   [`CanonicalText::from_text()`].
/// - The inner string is always well-formed JSON.
/// - Scalar values pass through exactly as serialized; no coercion is
///   applied in either direction.
///
/// These invariants are enforced by the constructors and cannot be violated
/// by downstream code because the inner `String` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CanonicalText(String);

impl CanonicalText {
    /// Render a serializable value as canonical text.
    ///
    /// This is the production path: the module façade exports the current
    /// tree as plain data and encodes it here before persisting or
    /// broadcasting.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalError::Encode` if the value cannot be rendered as
    /// JSON (e.g. a map with non-string keys).
    pub fn encode(value: &impl Serialize) -> Result<Self, CanonicalError> {
        let text = serde_json::to_string(value).map_err(CanonicalError::Encode)?;
        Ok(Self(text))
    }

    /// Accept text from outside the process (a decompressed file, a wire
    /// payload) as canonical text.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalError::Malformed` if the text is not well-formed
    /// JSON. Inbound data failing here never reaches the walker or the
    /// store.
    pub fn from_text(text: impl Into<String>) -> Result<Self, CanonicalError> {
        let text = text.into();
        serde_json::from_str::<Value>(&text).map_err(CanonicalError::Malformed)?;
        Ok(Self(text))
    }

    /// Decode the canonical text back to an untyped value tree.
    ///
    /// The result must be re-parsed against a schema to recover typed
    /// instances.
    pub fn decode(&self) -> Result<Value, CanonicalError> {
        serde_json::from_str(&self.0).map_err(CanonicalError::Malformed)
    }

    /// Access the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the length of the canonical text in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical text is empty.
    ///
    /// Cannot occur for text built by the constructors (the empty string is
    /// not JSON); present for API completeness alongside [`len()`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for CanonicalText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CanonicalText> for String {
    fn from(text: CanonicalText) -> Self {
        text.0
    }
}

impl TryFrom<String> for CanonicalText {
    type Error = CanonicalError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::from_text(text)
    }
}
