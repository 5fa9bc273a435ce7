//! Encrypt command.
//!
//! Reads a .env file or JSON object and prints the encrypted blob.

use std::io::Read;

use tracing::debug;

use crate::cli::{output, Settings};
use crate::core::codec::{self, Mapping};
use crate::core::{bootstrap, cipher, dotenv};
use crate::error::Result;

/// Encrypt the variables in `path` under the configured key.
pub fn execute(settings: &Settings, path: &str, json: bool, key: Option<String>) -> Result<()> {
    let contents = read_input(path)?;
    let mapping = parse_input(&contents, json)?;

    let key = settings.strategy(key, None).key_material()?;
    debug!(
        entries = mapping.len(),
        key = %cipher::key_fingerprint(&key),
        "encrypting"
    );

    let blob = bootstrap::encrypt(&mapping, &key)?;
    output::raw(&blob);
    Ok(())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Parse .env text or a JSON object into a mapping.
///
/// # Errors
///
/// Returns `FormatError` when the input does not parse.
pub fn parse_input(contents: &str, json: bool) -> Result<Mapping> {
    if json {
        return codec::deserialize(contents.as_bytes());
    }
    Ok(dotenv::parse(contents)?
        .into_iter()
        .map(|(name, value)| (name, serde_json::Value::String(value)))
        .collect())
}
