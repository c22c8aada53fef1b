//! # Error Types — Core Error Hierarchy
//!
//! Defines the error types shared across the Grimoire engine. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Canonical-form errors distinguish the encode direction (a value that
//!   could not be rendered) from the accept direction (inbound text that is
//!   not JSON), because the two have different callers: encoding fails inside
//!   an import, acceptance fails on data read from disk or the wire.
//! - Digest parse errors name the exact precondition that failed.

use thiserror::Error;

/// Error producing or accepting the canonical serialized form.
#[derive(Error, Debug)]
pub enum CanonicalError {
    /// A value could not be rendered as JSON text.
    #[error("canonical encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Inbound text (from disk or the wire) is not well-formed JSON.
    #[error("canonical text is not well-formed JSON: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Error parsing the textual form of a content digest.
#[derive(Error, Debug)]
pub enum DigestParseError {
    /// The text does not carry the `sha256:` algorithm prefix.
    #[error("digest must start with 'sha256:'")]
    MissingPrefix,

    /// The hex portion is not exactly 64 characters.
    #[error("digest hex must be 64 characters, got {0}")]
    BadLength(usize),

    /// The hex portion contains a non-hexadecimal character.
    #[error("digest contains non-hex characters")]
    InvalidHex,
}
