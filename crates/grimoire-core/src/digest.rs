//! # Content Digest — Integrity Tags for Update Events
//!
//! Defines `ContentDigest`, the SHA-256 fingerprint every update event
//! carries for the canonical text it announces. Push-mode receivers verify
//! the payload against it before applying; pull-mode receivers use it to
//! correlate what they fetched with what was announced.
//!
//! ## Invariant
//!
//! A digest is computed only from `CanonicalText`; the signature of
//! [`sha256_digest()`] enforces this. There is no way to digest a raw string
//! that skipped the canonical-form constructors.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalText;
use crate::error::DigestParseError;

/// A SHA-256 digest of canonical text.
///
/// Produced by [`sha256_digest()`] or parsed from its textual form
/// (`sha256:<64 hex chars>`). The inner bytes are private; equality
/// comparison and the textual form are the supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Render the digest as a lowercase hex string (no prefix).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

impl std::str::FromStr for ContentDigest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("sha256:")
            .ok_or(DigestParseError::MissingPrefix)?;
        if hex.len() != 64 {
            return Err(DigestParseError::BadLength(hex.len()));
        }
        // `from_str_radix` tolerates sign characters; only bare hex digits
        // may reach it.
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DigestParseError::InvalidHex);
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| DigestParseError::InvalidHex)?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| DigestParseError::InvalidHex)?;
        }
        Ok(Self(bytes))
    }
}

impl From<ContentDigest> for String {
    fn from(digest: ContentDigest) -> Self {
        digest.to_string()
    }
}

impl TryFrom<String> for ContentDigest {
    type Error = DigestParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Compute the SHA-256 digest of canonical text.
///
/// Accepts only `&CanonicalText`, not a raw `&str`, so every digest in the
/// system covers text that went through the canonical-form constructors.
pub fn sha256_digest(text: &CanonicalText) -> ContentDigest {
    let hash = Sha256::digest(text.as_str().as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_deterministic() {
        let ct = CanonicalText::encode(&serde_json::json!({"a": 1, "b": 2})).unwrap();
        let d1 = sha256_digest(&ct);
        let d2 = sha256_digest(&ct);
        assert_eq!(d1, d2);
    }

    #[test]
    fn digest_hex_format() {
        let ct = CanonicalText::encode(&serde_json::json!({"key": "value"})).unwrap();
        let hex = sha256_digest(&ct).to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_display() {
        let ct = CanonicalText::encode(&serde_json::json!({"a": 1})).unwrap();
        let s = sha256_digest(&ct).to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64); // "sha256:" + 64 hex chars
    }

    #[test]
    fn different_inputs_different_digests() {
        let a = CanonicalText::encode(&serde_json::json!({"a": 1})).unwrap();
        let b = CanonicalText::encode(&serde_json::json!({"a": 2})).unwrap();
        assert_ne!(sha256_digest(&a), sha256_digest(&b));
    }

    #[test]
    fn known_sha256_vector() {
        // SHA256 of the empty JSON object "{}" is a known value.
        let ct = CanonicalText::encode(&serde_json::json!({})).unwrap();
        assert_eq!(ct.as_str(), "{}");
        let digest = sha256_digest(&ct);
        assert_eq!(
            digest.to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn parse_round_trip() {
        let ct = CanonicalText::encode(&serde_json::json!({"x": true})).unwrap();
        let digest = sha256_digest(&ct);
        let parsed: ContentDigest = digest.to_string().parse().unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        let bare = "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a";
        assert!(matches!(
            bare.parse::<ContentDigest>(),
            Err(DigestParseError::MissingPrefix)
        ));
    }

    #[test]
    fn parse_rejects_short_hex() {
        assert!(matches!(
            "sha256:abcd".parse::<ContentDigest>(),
            Err(DigestParseError::BadLength(4))
        ));
    }

    #[test]
    fn parse_rejects_non_hex() {
        let junk = format!("sha256:{}", "zz".repeat(32));
        assert!(matches!(
            junk.parse::<ContentDigest>(),
            Err(DigestParseError::InvalidHex)
        ));
    }

    #[test]
    fn parse_rejects_signed_hex_pairs() {
        // "-0" and "+f" are valid input to `u8::from_str_radix` but are not
        // hex digit pairs; neither may smuggle in a digest.
        let negative = format!("sha256:{}", "-0".repeat(32));
        assert!(matches!(
            negative.parse::<ContentDigest>(),
            Err(DigestParseError::InvalidHex)
        ));
        let positive = format!("sha256:{}", "+f".repeat(32));
        assert!(matches!(
            positive.parse::<ContentDigest>(),
            Err(DigestParseError::InvalidHex)
        ));
    }

    #[test]
    fn serde_form_is_prefixed_hex() {
        let ct = CanonicalText::encode(&serde_json::json!({})).unwrap();
        let digest = sha256_digest(&ct);
        let as_value = serde_json::to_value(digest).unwrap();
        assert_eq!(
            as_value,
            serde_json::json!(
                "sha256:44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
            )
        );
        let back: ContentDigest = serde_json::from_value(as_value).unwrap();
        assert_eq!(back, digest);
    }
}
