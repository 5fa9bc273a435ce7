//! Constants used throughout cryptenv.
//!
//! Centralizes entry names, file names and cipher sizes.

/// Environment entry holding the encrypted payload.
pub const PAYLOAD_VAR: &str = "CRYPTO_ENV";

/// Environment entry holding the base64-encoded decryption key.
pub const KEY_VAR: &str = "CRYPTO_ENV_DECRYPT_KEY";

/// Environment entry read for the tracing filter.
pub const LOG_VAR: &str = "CRYPTENV_LOG";

/// Configuration file name (.cryptenv.toml).
pub const CONFIG_FILE: &str = ".cryptenv.toml";

/// Default input for `cryptenv encrypt`.
pub const ENV_FILE: &str = ".env";

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = BLOCK_LEN;
