//! Hand-off to the real application.
//!
//! Once every gate passed, the application module is started through the
//! same interpreter. It inherits the patched environment, so nothing has to
//! be passed along explicitly.

use std::process::{Command, ExitStatus};

use anyhow::Context;

use crate::config::GateConfig;
use crate::error::{Result, FAILURE_CODE};

/// Build the command that starts the application.
pub fn app_command(config: &GateConfig, args: &[String]) -> Command {
    let mut cmd = Command::new(&config.interpreter);
    cmd.arg("-m").arg(&config.app_module).args(args);
    cmd
}

/// Start the application and wait for it to exit.
pub fn hand_off(config: &GateConfig, args: &[String]) -> Result<ExitStatus> {
    tracing::debug!(
        "Starting {} -m {} {:?}",
        config.interpreter,
        config.app_module,
        args
    );
    let status = app_command(config, args)
        .status()
        .with_context(|| format!("could not start {}", config.app_name))?;
    Ok(status)
}

/// Translate the application's exit status into our own exit code.
///
/// A child killed by a signal maps to `128 + signal`, as shells report it.
pub fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return u8::try_from(code).unwrap_or(FAILURE_CODE);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return u8::try_from(128 + signal).unwrap_or(FAILURE_CODE);
        }
    }

    FAILURE_CODE
}
