//! Command-line interface.

pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::strategy::{read_env, Strategy};
use crate::error::Result;

/// cryptenv - encrypted environment variables in a single blob.
#[derive(Parser)]
#[command(
    name = "cryptenv",
    about = "Encrypt environment variables into one blob and load them at process start",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (default: ./.cryptenv.toml if present)
    #[arg(long, global = true, env = "CRYPTENV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Entry holding the encrypted payload
    #[arg(long, global = true)]
    pub payload_var: Option<String>,

    /// Entry holding the base64 decryption key
    #[arg(long, global = true)]
    pub key_var: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a random base64-encoded 256-bit key
    Keygen,

    /// Encrypt a .env file (or JSON object) into a blob
    Encrypt {
        /// Input file, or - for stdin
        #[arg(default_value = crate::core::constants::ENV_FILE)]
        path: String,
        /// Treat the input as a JSON object instead of .env
        #[arg(long)]
        json: bool,
        /// Base64 key (default: read from the key entry)
        #[arg(long)]
        key: Option<String>,
    },

    /// Decrypt a blob and print its variables
    Decrypt {
        /// Encrypted blob (default: read from the payload entry)
        #[arg(long)]
        payload: Option<String>,
        /// Base64 key (default: read from the key entry)
        #[arg(long)]
        key: Option<String>,
        /// Print JSON instead of .env lines
        #[arg(long)]
        json: bool,
    },

    /// Run a command with decrypted variables in its environment
    Run {
        /// Keep variables that are already set
        #[arg(long)]
        no_override: bool,
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
}

/// Effective settings: config file first, then command-line flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub payload_var: String,
    pub key_var: String,
    pub override_existing: bool,
}

impl Settings {
    /// Resolve settings from the config file and global flags.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file is invalid, or if the flags
    /// produce an invalid combination.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(var) = &cli.payload_var {
            config.source.payload_var = var.clone();
        }
        if let Some(var) = &cli.key_var {
            config.source.key_var = var.clone();
        }
        config.validate()?;

        Ok(Self {
            payload_var: config.source.payload_var,
            key_var: config.source.key_var,
            override_existing: config.bootstrap.override_existing,
        })
    }

    /// Environment strategy where explicit flag values win over the
    /// process environment.
    pub fn strategy(&self, key: Option<String>, payload: Option<String>) -> Strategy<'static> {
        let key_var = self.key_var.clone();
        let payload_var = self.payload_var.clone();

        Strategy::try_from_lookup(
            move |name| {
                let flag = if name == key_var {
                    key.as_ref()
                } else if name == payload_var {
                    payload.as_ref()
                } else {
                    None
                };
                match flag {
                    Some(value) => Ok(Some(value.clone())),
                    None => read_env(name),
                }
            },
            self.key_var.clone(),
            self.payload_var.clone(),
        )
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let settings = Settings::resolve(&cli)?;

    match cli.command {
        Keygen => keygen::execute(),
        Encrypt { path, json, key } => encrypt::execute(&settings, &path, json, key),
        Decrypt { payload, key, json } => decrypt::execute(&settings, payload, key, json),
        Run {
            no_override,
            command,
        } => run::execute(&settings, no_override, &command),
    }
}
