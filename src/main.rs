//! cryptenv - encrypted environment variables in a single blob.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cryptenv::cli::output;
use cryptenv::cli::{execute, Cli};
use cryptenv::core::constants::LOG_VAR;
use cryptenv::error::{CipherError, Error, FormatError, SourceError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("cryptenv=debug")
        } else {
            EnvFilter::new("cryptenv=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<String> {
    match e {
        Error::Source(SourceError::NotFound(name)) => {
            Some(format!("export {} or pass it on the command line", name))
        }
        Error::Source(SourceError::Malformed { .. })
        | Error::Cipher(CipherError::InvalidKeyLength { .. }) => {
            Some("generate a key with: cryptenv keygen".to_string())
        }
        Error::Cipher(CipherError::Padding) => {
            Some("check that the key matches the one used to encrypt".to_string())
        }
        Error::Format(FormatError::Entry { .. }) => {
            Some("re-encrypt with names free of '=' and NUL".to_string())
        }
        Error::Config(_) => Some("check .cryptenv.toml".to_string()),
        _ => None,
    }
}
