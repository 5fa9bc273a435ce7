//! Keygen command.
//!
//! Prints a fresh base64-encoded 256-bit key to stdout.

use tracing::debug;

use crate::cli::output;
use crate::core::{cipher, codec};
use crate::error::Result;

/// Generate and print a new key.
pub fn execute() -> Result<()> {
    let key = cipher::generate_key();
    debug!(key = %cipher::key_fingerprint(&key), "generated key");
    output::raw(&codec::encode(&key));
    Ok(())
}
