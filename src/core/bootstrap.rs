//! Top-level operations: encrypt, decrypt, bootstrap.
//!
//! ```text
//! encrypt:   mapping -> serialize -> cipher::encrypt -> encode -> blob
//! decrypt:   blob -> decode -> cipher::decrypt -> deserialize -> mapping
//! bootstrap: strategy -> (key, blob) -> decrypt -> merge into target
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher;
use crate::core::codec::{self, Mapping};
use crate::core::store::{ProcessEnv, Store};
use crate::core::strategy::Strategy;
use crate::error::Result;

/// Outcome of a [`bootstrap`] call. Holds entry names only, never values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Entries written to the target.
    pub applied: Vec<String>,
    /// Entries left alone because the target already had them.
    pub skipped: Vec<String>,
}

/// Encrypt a mapping into a base64 blob.
///
/// # Errors
///
/// Returns `CipherError::InvalidKeyLength` for a key that is not 32 bytes,
/// or `FormatError::Structure` if the mapping cannot be serialized.
pub fn encrypt<T: Serialize + ?Sized>(mapping: &T, key: &[u8]) -> Result<String> {
    let plaintext = Zeroizing::new(codec::serialize(mapping)?);
    let envelope = cipher::encrypt(&plaintext, key)?;
    Ok(codec::encode(&envelope))
}

/// Decrypt a base64 blob back into a mapping.
///
/// # Errors
///
/// Returns `FormatError` for bad base64 or a payload that is not a JSON
/// object, and `CipherError` for a bad envelope, key or padding.
pub fn decrypt(text: &str, key: &[u8]) -> Result<Mapping> {
    let envelope = codec::decode(text)?;
    let plaintext = Zeroizing::new(cipher::decrypt(&envelope, key)?);
    codec::deserialize(&plaintext)
}

/// Decrypt the payload supplied by `strategy` and merge it into `target`.
///
/// With `override_existing` set, every decrypted entry is written. Without
/// it, entries already present in `target` keep their current value.
///
/// Key and payload are both resolved, fully decrypted and every entry
/// checked against `target` before the first write, so a failure leaves
/// `target` untouched.
///
/// # Errors
///
/// Propagates `SourceError`, `FormatError` and `CipherError` unchanged.
/// Returns `FormatError::Entry` for an entry `target` cannot hold.
pub fn bootstrap<S: Store + ?Sized>(
    strategy: &Strategy<'_>,
    target: &mut S,
    override_existing: bool,
) -> Result<Report> {
    let key = strategy.key_material()?;
    let payload = strategy.encrypted_payload()?;
    debug!(
        key = %cipher::key_fingerprint(&key),
        payload_len = payload.len(),
        "resolved bootstrap sources"
    );

    let mapping = decrypt(&payload, &key)?;

    let mut report = Report::default();
    let mut pending = Vec::with_capacity(mapping.len());
    for (name, value) in &mapping {
        let value = Zeroizing::new(value_to_string(value));
        target.check(name, &value)?;
        if !override_existing && target.contains(name) {
            report.skipped.push(name.clone());
            continue;
        }
        pending.push((name, value));
    }

    for (name, value) in pending {
        target.set(name, &value)?;
        report.applied.push(name.clone());
    }

    debug!(
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        "bootstrapped environment"
    );
    Ok(report)
}

/// Bootstrap the live process environment from `CRYPTO_ENV` and
/// `CRYPTO_ENV_DECRYPT_KEY`.
///
/// # Errors
///
/// See [`bootstrap`].
pub fn bootstrap_process_env(override_existing: bool) -> Result<Report> {
    bootstrap(&Strategy::from_env(), &mut ProcessEnv, override_existing)
}

/// Render a decrypted value for a string-only store.
///
/// Strings are written verbatim, everything else as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
