//! Decrypt command.
//!
//! Prints decrypted variables as .env lines or JSON.

use crate::cli::{output, Settings};
use crate::core::{bootstrap, dotenv};
use crate::error::{FormatError, Result};

/// Decrypt a blob and print its contents.
pub fn execute(
    settings: &Settings,
    payload: Option<String>,
    key: Option<String>,
    json: bool,
) -> Result<()> {
    let strategy = settings.strategy(key, payload);
    let key = strategy.key_material()?;
    let payload = strategy.encrypted_payload()?;

    let mapping = bootstrap::decrypt(&payload, &key)?;

    if json {
        let rendered = serde_json::to_string_pretty(&mapping).map_err(FormatError::Structure)?;
        output::raw(&rendered);
    } else {
        output::raw_block(&dotenv::render(&mapping));
    }
    Ok(())
}
