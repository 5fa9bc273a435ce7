//! Run command.
//!
//! Bootstraps the process environment and runs a command that inherits it.

use tracing::debug;

use crate::cli::Settings;
use crate::core::bootstrap;
use crate::core::store::ProcessEnv;
use crate::error::{Error, Result};

/// Run a command with decrypted variables in its environment.
pub fn execute(settings: &Settings, no_override: bool, command: &[String]) -> Result<()> {
    let exit_code = run_with_secrets(settings, no_override, command)?;
    std::process::exit(exit_code);
}

fn run_with_secrets(settings: &Settings, no_override: bool, command: &[String]) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| Error::Other("no command specified".to_string()))?;

    let override_existing = settings.override_existing && !no_override;
    let strategy = settings.strategy(None, None);
    let report = bootstrap::bootstrap(&strategy, &mut ProcessEnv, override_existing)?;
    debug!(
        applied = ?report.applied,
        skipped = ?report.skipped,
        "environment ready"
    );

    let status = std::process::Command::new(program).args(args).status()?;
    // Killed by a signal: no code available
    Ok(status.code().unwrap_or(1))
}
