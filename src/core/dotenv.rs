//! `.env` text in and out.
//!
//! Used by the CLI to turn a dotenv file into a mapping before encryption,
//! and to print a decrypted mapping back in the same shape.

use std::collections::BTreeMap;

use crate::core::bootstrap::value_to_string;
use crate::core::codec::Mapping;
use crate::error::{FormatError, Result};

/// Parse dotenv text into name/value pairs.
///
/// Blank lines and `#` comments are skipped, a leading `export ` is
/// ignored, and single- or double-quoted values are unquoted. A later
/// duplicate name replaces an earlier one.
///
/// # Errors
///
/// Returns `FormatError::Dotenv` for a line without `=` or with an invalid
/// variable name.
pub fn parse(contents: &str) -> Result<BTreeMap<String, String>> {
    let mut entries = BTreeMap::new();

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let (name, value) = line.split_once('=').ok_or_else(|| FormatError::Dotenv {
            line: idx + 1,
            reason: "expected NAME=value".to_string(),
        })?;
        let name = name.trim();
        if !is_valid_name(name) {
            return Err(FormatError::Dotenv {
                line: idx + 1,
                reason: format!("invalid variable name '{}'", name),
            }
            .into());
        }

        entries.insert(name.to_string(), unquote(value.trim()));
    }

    Ok(entries)
}

/// Render a mapping as dotenv text, one `NAME=value` per line.
pub fn render(mapping: &Mapping) -> String {
    let mut output = String::new();

    for (name, value) in mapping {
        let value = value_to_string(value);
        if needs_quotes(&value) {
            output.push_str(&format!("{}=\"{}\"\n", name, escape(&value)));
        } else {
            output.push_str(&format!("{}={}\n", name, value));
        }
    }

    output
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '.' || c.is_ascii_alphanumeric())
}

fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape(&raw[1..raw.len() - 1]);
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }
    raw.to_string()
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(char::is_whitespace)
        || value.contains(['#', '=', '"', '\'', '\\'])
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
