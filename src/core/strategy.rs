//! Sources for the decryption key and the encrypted payload.
//!
//! A [`Strategy`] answers two questions for the orchestrator: which key to
//! decrypt with, and which blob to decrypt. Values are either captured up
//! front ([`Strategy::External`]) or looked up by name every time they are
//! asked for ([`Strategy::FromEnvironment`]).

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::codec;
use crate::core::constants::{KEY_VAR, PAYLOAD_VAR};
use crate::core::store::Store;
use crate::error::{Result, SourceError};

/// Named-entry lookup, invoked on every accessor call.
///
/// `Ok(None)` means the entry is absent. An error means it is present but
/// unusable.
pub type Lookup<'a> = Box<dyn Fn(&str) -> Result<Option<String>> + 'a>;

/// Read `name` from the process environment.
///
/// # Errors
///
/// Returns `SourceError::Malformed` if the entry is set but not valid Unicode.
pub fn read_env(name: &str) -> Result<Option<String>> {
    match std::env::var_os(name) {
        None => Ok(None),
        Some(raw) => raw.into_string().map(Some).map_err(|_| {
            SourceError::Malformed {
                name: name.to_string(),
                reason: "value is not valid Unicode".to_string(),
            }
            .into()
        }),
    }
}

/// Supplier of key material and encrypted payload.
pub enum Strategy<'a> {
    /// Values fixed at construction.
    External {
        key: Zeroizing<Vec<u8>>,
        payload: String,
    },
    /// Values read from a live key-value source at call time.
    ///
    /// `key_var` holds the base64-encoded key, `payload_var` the blob verbatim.
    FromEnvironment {
        lookup: Lookup<'a>,
        key_var: String,
        payload_var: String,
    },
}

impl Strategy<'static> {
    /// Fixed key and payload. Nothing is validated here.
    pub fn external(key: impl Into<Vec<u8>>, payload: impl Into<String>) -> Self {
        Strategy::External {
            key: Zeroizing::new(key.into()),
            payload: payload.into(),
        }
    }

    /// Process environment with the default entry names.
    pub fn from_env() -> Self {
        Self::from_env_vars(KEY_VAR, PAYLOAD_VAR)
    }

    /// Process environment with custom entry names.
    pub fn from_env_vars(key_var: impl Into<String>, payload_var: impl Into<String>) -> Self {
        Self::try_from_lookup(read_env, key_var, payload_var)
    }
}

impl<'a> Strategy<'a> {
    /// Arbitrary lookup closure with custom entry names.
    pub fn from_lookup<F>(
        lookup: F,
        key_var: impl Into<String>,
        payload_var: impl Into<String>,
    ) -> Self
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        Self::try_from_lookup(move |name| Ok(lookup(name)), key_var, payload_var)
    }

    /// Lookup closure that can report a present but unusable entry.
    pub fn try_from_lookup<F>(
        lookup: F,
        key_var: impl Into<String>,
        payload_var: impl Into<String>,
    ) -> Self
    where
        F: Fn(&str) -> Result<Option<String>> + 'a,
    {
        Strategy::FromEnvironment {
            lookup: Box::new(lookup),
            key_var: key_var.into(),
            payload_var: payload_var.into(),
        }
    }

    /// Read from a [`Store`] borrowed for the lifetime of the strategy.
    pub fn from_store<S>(
        store: &'a S,
        key_var: impl Into<String>,
        payload_var: impl Into<String>,
    ) -> Self
    where
        S: Store + ?Sized,
    {
        Self::from_lookup(move |name| store.get(name), key_var, payload_var)
    }

    /// Raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if the key entry is absent, or
    /// `SourceError::Malformed` if it is unreadable or not valid base64.
    pub fn key_material(&self) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            Strategy::External { key, .. } => Ok(key.clone()),
            Strategy::FromEnvironment {
                lookup, key_var, ..
            } => {
                let raw = lookup(key_var.as_str())?
                    .map(Zeroizing::new)
                    .ok_or_else(|| SourceError::NotFound(key_var.clone()))?;
                let key = codec::decode(&raw).map_err(|e| SourceError::Malformed {
                    name: key_var.clone(),
                    reason: e.to_string(),
                })?;
                debug!(entry = %key_var, key_len = key.len(), "loaded key material");
                Ok(Zeroizing::new(key))
            }
        }
    }

    /// Encrypted payload text.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if the payload entry is absent, or
    /// `SourceError::Malformed` if the lookup reports it unreadable.
    pub fn encrypted_payload(&self) -> Result<String> {
        match self {
            Strategy::External { payload, .. } => Ok(payload.clone()),
            Strategy::FromEnvironment {
                lookup,
                payload_var,
                ..
            } => {
                let payload = lookup(payload_var.as_str())?
                    .ok_or_else(|| SourceError::NotFound(payload_var.clone()))?;
                debug!(entry = %payload_var, payload_len = payload.len(), "loaded payload");
                Ok(payload)
            }
        }
    }
}

impl fmt::Debug for Strategy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::External { payload, .. } => f
                .debug_struct("External")
                .field("key", &"<redacted>")
                .field("payload_len", &payload.len())
                .finish(),
            Strategy::FromEnvironment {
                key_var,
                payload_var,
                ..
            } => f
                .debug_struct("FromEnvironment")
                .field("key_var", key_var)
                .field("payload_var", payload_var)
                .finish(),
        }
    }
}
