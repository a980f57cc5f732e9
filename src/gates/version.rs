//! Runtime version gate.

use crate::config::GateConfig;
use crate::error::GateError;
use crate::gates::CheckOutcome;
use crate::host::{HostEnvironment, RuntimeVersion};
use crate::report::{hints, ReportingChannel};

/// Fail unless the runtime is at least `config.minimum_version`.
///
/// Runs before anything else is known to work, so the driver only ever
/// hands it the console channel.
pub fn check_runtime_version(
    host: &HostEnvironment,
    config: &GateConfig,
    channel: ReportingChannel<'_>,
) -> CheckOutcome {
    let (report, error) = match &host.runtime_version {
        RuntimeVersion::Detected(found) if *found >= config.minimum_version => {
            tracing::debug!("Runtime {} satisfies {}", found, config.minimum_version);
            return Ok(());
        }
        RuntimeVersion::Detected(found) => (
            hints::version_too_low(config, *found),
            GateError::VersionTooLow {
                found: *found,
                required: config.minimum_version,
            },
        ),
        RuntimeVersion::Unavailable { reason } => (
            hints::runtime_unavailable(config, reason),
            GateError::RuntimeUnavailable {
                interpreter: config.interpreter.clone(),
                message: reason.clone(),
            },
        ),
    };

    channel.deliver_or_log(&report);
    Err(error)
}
