//! Target key-value stores.
//!
//! Bootstrapping writes into a [`Store`] passed in by the caller. Nothing
//! in the core touches the process environment unless handed a
//! [`ProcessEnv`].
//!
//! ## Adding a New Store
//!
//! 1. Implement the `Store` trait
//! 2. Pass it to [`crate::core::bootstrap::bootstrap`]

use std::collections::{BTreeMap, HashMap};

use crate::error::{FormatError, Result};

/// Mutable key-value collection that decrypted entries are merged into.
pub trait Store {
    /// Whether `key` currently has a value.
    fn contains(&self, key: &str) -> bool;

    /// Current value of `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Whether the store can hold `key` = `value`. Accepts everything by
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::Entry` for a pair the store cannot represent.
    fn check(&self, key: &str, value: &str) -> Result<()> {
        let _ = (key, value);
        Ok(())
    }

    /// Set `key` to `value`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::Entry` if [`Store::check`] rejects the pair.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

fn invalid(key: &str, reason: &str) -> crate::error::Error {
    FormatError::Entry {
        name: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// The live environment of the current process.
///
/// The environment is process-global. Callers that bootstrap from several
/// threads must synchronize themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
    fn name_error(key: &str) -> Option<&'static str> {
        if key.is_empty() {
            Some("environment names cannot be empty")
        } else if key.contains('=') {
            Some("environment names cannot contain '='")
        } else if key.contains('\0') {
            Some("environment names cannot contain NUL")
        } else {
            None
        }
    }
}

impl Store for ProcessEnv {
    fn contains(&self, key: &str) -> bool {
        Self::name_error(key).is_none() && std::env::var_os(key).is_some()
    }

    fn get(&self, key: &str) -> Option<String> {
        match Self::name_error(key) {
            Some(_) => None,
            None => std::env::var(key).ok(),
        }
    }

    // std::env::set_var panics on these instead of returning an error.
    fn check(&self, key: &str, value: &str) -> Result<()> {
        if let Some(reason) = Self::name_error(key) {
            return Err(invalid(key, reason));
        }
        if value.contains('\0') {
            return Err(invalid(key, "environment values cannot contain NUL"));
        }
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check(key, value)?;
        std::env::set_var(key, value);
        Ok(())
    }
}

impl Store for HashMap<String, String> {
    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl Store for BTreeMap<String, String> {
    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
