//! The ordered bootstrap gates.
//!
//! Each gate either falls through or reports a fatal failure and stops the
//! sequence. Later gates rely on what earlier ones proved, and the reporting
//! channel each gate gets is chosen here, from what is known to work at that
//! point:
//!
//! | Stage                | Channel on failure |
//! |----------------------|--------------------|
//! | runtime version      | console            |
//! | crash diagnostics    | never fails        |
//! | compatibility patch  | never fails        |
//! | toolkit core         | console            |
//! | toolkit extension    | modal dialog       |
//!
//! # Modules
//!
//! - [`version`] - Runtime version gate
//! - [`diagnostics`] - Crash diagnostics enabler
//! - [`compat`] - Platform compatibility patch
//! - [`toolkit`] - Toolkit core and extension gates

pub mod compat;
pub mod diagnostics;
pub mod toolkit;
pub mod version;

use std::fmt;
use std::io::Write;

use crate::config::GateConfig;
use crate::env::EnvTable;
use crate::error::Result;
use crate::host::HostEnvironment;
use crate::report::ReportingChannel;
use crate::runtime::{ModalDialog, Runtime};

/// Result of a single gate: `Ok(())` to fall through, `Err` to stop.
pub type CheckOutcome = Result<()>;

/// How far the sequence got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    VersionChecked,
    DiagnosticsSet,
    Patched,
    CoreChecked,
    ExtensionChecked,
    Terminated,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::VersionChecked => "version checked",
            Stage::DiagnosticsSet => "diagnostics set",
            Stage::Patched => "patched",
            Stage::CoreChecked => "core checked",
            Stage::ExtensionChecked => "extension checked",
            Stage::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Drives the gates in order against one runtime.
pub struct Bootstrap<'a> {
    config: &'a GateConfig,
    runtime: &'a dyn Runtime,
    dialog: &'a dyn ModalDialog,
    stage: Stage,
}

impl<'a> Bootstrap<'a> {
    pub fn new(
        config: &'a GateConfig,
        runtime: &'a dyn Runtime,
        dialog: &'a dyn ModalDialog,
    ) -> Self {
        Self {
            config,
            runtime,
            dialog,
            stage: Stage::Start,
        }
    }

    /// Current stage; `Terminated` after any failure.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run every gate, stopping at the first failure.
    ///
    /// Failures have already been shown to the user when this returns. The
    /// gates run at most once: later calls only repeat the earlier verdict.
    pub fn run(
        &mut self,
        host: &HostEnvironment,
        env: &mut dyn EnvTable,
        out: &mut dyn Write,
    ) -> CheckOutcome {
        match self.stage {
            Stage::Start => {}
            Stage::Terminated => {
                return Err(anyhow::anyhow!("bootstrap already failed").into());
            }
            stage => {
                tracing::debug!("Bootstrap already ran (stage: {})", stage);
                return Ok(());
            }
        }

        let result = self.run_stages(host, env, out);
        if let Err(e) = &result {
            tracing::debug!("Bootstrap stopped after '{}': {}", self.stage, e);
            self.stage = Stage::Terminated;
        }
        result
    }

    fn run_stages(
        &mut self,
        host: &HostEnvironment,
        env: &mut dyn EnvTable,
        out: &mut dyn Write,
    ) -> CheckOutcome {
        version::check_runtime_version(
            host,
            self.config,
            ReportingChannel::Console { out: &mut *out },
        )?;
        self.advance(Stage::VersionChecked);

        if let Err(reason) = diagnostics::enable_crash_diagnostics(host, env) {
            tracing::debug!("Crash diagnostics skipped: {}", reason);
        }
        self.advance(Stage::DiagnosticsSet);

        compat::apply_compat_patch(&host.platform, env);
        self.advance(Stage::Patched);

        toolkit::check_core(
            host,
            self.config,
            self.runtime,
            ReportingChannel::Console { out: &mut *out },
        )?;
        self.advance(Stage::CoreChecked);

        toolkit::check_extension(
            host,
            self.config,
            self.runtime,
            ReportingChannel::Dialog {
                dialog: self.dialog,
                out,
            },
        )?;
        self.advance(Stage::ExtensionChecked);

        Ok(())
    }

    fn advance(&mut self, stage: Stage) {
        tracing::debug!("Bootstrap: {} -> {}", self.stage, stage);
        self.stage = stage;
    }
}
