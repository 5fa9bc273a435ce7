//! Text and structure conversions.
//!
//! Keeps representation concerns out of the cipher: base64 for bytes that
//! must travel as text, JSON for the plaintext mapping.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use tracing::trace;

use crate::error::{FormatError, Result};

/// Decrypted payload: entry name to JSON value, sorted by name.
pub type Mapping = BTreeMap<String, serde_json::Value>;

/// Encode bytes as padded standard base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded standard base64.
///
/// # Errors
///
/// Returns `FormatError::Encoding` on characters outside the alphabet,
/// missing or extra padding, or non-canonical trailing bits.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| FormatError::Encoding(e).into())
}

/// Serialize a mapping to compact JSON bytes.
///
/// `BTreeMap` input serializes in key order, so the output is deterministic.
///
/// # Errors
///
/// Returns `FormatError::Structure` if the value cannot be represented as JSON.
pub fn serialize<T: Serialize + ?Sized>(mapping: &T) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec(mapping).map_err(FormatError::Structure)?;
    trace!(len = bytes.len(), "serialized mapping");
    Ok(bytes)
}

/// Parse JSON bytes back into a [`Mapping`].
///
/// # Errors
///
/// Returns `FormatError::Structure` on malformed JSON or when the top-level
/// value is not an object.
pub fn deserialize(bytes: &[u8]) -> Result<Mapping> {
    let mapping: Mapping = serde_json::from_slice(bytes).map_err(FormatError::Structure)?;
    trace!(entries = mapping.len(), "deserialized mapping");
    Ok(mapping)
}
