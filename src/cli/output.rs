//! Terminal output helpers.
//!
//! Data (keys, blobs, decrypted variables) goes to stdout untouched so it
//! can be piped. Diagnostics go to stderr and are colored unless NO_COLOR
//! is set or stderr is not a terminal.

use console::style;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Print a line of data to stdout.
pub fn raw(data: &str) {
    println!("{}", data);
}

/// Print pre-terminated data to stdout without adding a newline.
pub fn raw_block(data: &str) {
    print!("{}", data);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ CRYPTO_ENV is not set`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint to stderr (cyan).
///
/// Example: `→ generate one with: cryptenv keygen`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}
