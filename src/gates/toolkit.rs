//! Toolkit availability gates.
//!
//! The core gate can only complain on the console, since without the core
//! nothing can draw a window. Once the core is known to load, the extension
//! gate is handed a dialog channel so users who never see a terminal still
//! learn why the application did not start.

use crate::config::GateConfig;
use crate::error::GateError;
use crate::gates::CheckOutcome;
use crate::host::HostEnvironment;
use crate::report::{hints, Report, ReportingChannel};
use crate::runtime::{ProbeFailure, Runtime};

fn with_debug_trace(report: Report, host: &HostEnvironment, failure: &ProbeFailure) -> Report {
    let trace = host.debug_requested().then(|| failure.trace.clone());
    report.with_trace(trace)
}

/// Fail unless the toolkit core module loads.
pub fn check_core(
    host: &HostEnvironment,
    config: &GateConfig,
    runtime: &dyn Runtime,
    channel: ReportingChannel<'_>,
) -> CheckOutcome {
    let Err(failure) = runtime.probe_module(&config.core_module) else {
        tracing::debug!("Toolkit core {} loaded", config.core_module);
        return Ok(());
    };

    let report = with_debug_trace(hints::core_missing(config), host, &failure);
    channel.deliver_or_log(&report);
    Err(GateError::ToolkitCoreMissing {
        module: config.core_module.clone(),
        trace: Some(failure.trace),
    })
}

/// Fail unless the toolkit extension module loads.
pub fn check_extension(
    host: &HostEnvironment,
    config: &GateConfig,
    runtime: &dyn Runtime,
    channel: ReportingChannel<'_>,
) -> CheckOutcome {
    let Err(failure) = runtime.probe_module(&config.extension_module) else {
        tracing::debug!("Toolkit extension {} loaded", config.extension_module);
        return Ok(());
    };

    let report = with_debug_trace(hints::extension_missing(config), host, &failure);
    channel.deliver_or_log(&report);
    Err(GateError::ToolkitExtensionMissing {
        module: config.extension_module.clone(),
        trace: Some(failure.trace),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Platform, RuntimeVersion, Version};
    use crate::runtime::ModalDialog;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::io;

    struct StubRuntime {
        missing: HashSet<&'static str>,
    }

    impl Runtime for StubRuntime {
        fn version(&self) -> Result<Version, String> {
            Ok(Version::new(3, 11, 0))
        }

        fn probe_module(&self, module: &str) -> Result<(), ProbeFailure> {
            if self.missing.contains(module) {
                Err(ProbeFailure::new(format!(
                    "ModuleNotFoundError: No module named '{}'",
                    module
                )))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct CountingDialog {
        shown: RefCell<usize>,
    }

    impl ModalDialog for CountingDialog {
        fn show_critical(&self, _title: &str, _text: &str) -> io::Result<()> {
            *self.shown.borrow_mut() += 1;
            Ok(())
        }
    }

    fn host(args: &[&str]) -> HostEnvironment {
        HostEnvironment {
            runtime_version: RuntimeVersion::Detected(Version::new(3, 11, 0)),
            platform: Platform::Linux,
            args: args.iter().map(|a| a.to_string()).collect(),
            stderr_available: true,
        }
    }

    fn runtime_missing(modules: &[&'static str]) -> StubRuntime {
        StubRuntime {
            missing: modules.iter().copied().collect(),
        }
    }

    #[test]
    fn core_present_is_silent() {
        let mut out = Vec::new();
        let result = check_core(
            &host(&["earlyinit"]),
            &GateConfig::default(),
            &runtime_missing(&[]),
            ReportingChannel::Console { out: &mut out },
        );
        assert!(result.is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn core_missing_prints_remediation_without_trace() {
        let mut out = Vec::new();
        let err = check_core(
            &host(&["earlyinit"]),
            &GateConfig::default(),
            &runtime_missing(&["PyQt5.QtCore"]),
            ReportingChannel::Console { out: &mut out },
        )
        .unwrap_err();
        assert!(matches!(err, GateError::ToolkitCoreMissing { .. }));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("apt install python3-pyqt5"));
        assert!(!text.contains("ModuleNotFoundError"));
    }

    #[test]
    fn core_missing_with_debug_prints_trace() {
        let mut out = Vec::new();
        let _ = check_core(
            &host(&["earlyinit", "--debug"]),
            &GateConfig::default(),
            &runtime_missing(&["PyQt5.QtCore"]),
            ReportingChannel::Console { out: &mut out },
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("apt install python3-pyqt5"));
        assert!(text.contains("No module named 'PyQt5.QtCore'"));
    }

    #[test]
    fn extension_missing_shows_dialog() {
        let dialog = CountingDialog::default();
        let mut out = Vec::new();
        let err = check_extension(
            &host(&["earlyinit"]),
            &GateConfig::default(),
            &runtime_missing(&["PyQt5.QtWebKit"]),
            ReportingChannel::Dialog {
                dialog: &dialog,
                out: &mut out,
            },
        )
        .unwrap_err();
        assert!(matches!(err, GateError::ToolkitExtensionMissing { .. }));
        assert_eq!(*dialog.shown.borrow(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn extension_missing_with_debug_also_prints_trace() {
        let dialog = CountingDialog::default();
        let mut out = Vec::new();
        let _ = check_extension(
            &host(&["earlyinit", "--debug"]),
            &GateConfig::default(),
            &runtime_missing(&["PyQt5.QtWebKit"]),
            ReportingChannel::Dialog {
                dialog: &dialog,
                out: &mut out,
            },
        );
        assert_eq!(*dialog.shown.borrow(), 1);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("No module named 'PyQt5.QtWebKit'"));
    }

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn extension_dialog_survives_broken_stdout() {
        let dialog = CountingDialog::default();
        let err = check_extension(
            &host(&["earlyinit", "--debug"]),
            &GateConfig::default(),
            &runtime_missing(&["PyQt5.QtWebKit"]),
            ReportingChannel::Dialog {
                dialog: &dialog,
                out: &mut BrokenPipe,
            },
        )
        .unwrap_err();
        assert!(matches!(err, GateError::ToolkitExtensionMissing { .. }));
        assert_eq!(*dialog.shown.borrow(), 1);
    }

    #[test]
    fn core_missing_on_broken_stdout_keeps_its_error() {
        let err = check_core(
            &host(&["earlyinit"]),
            &GateConfig::default(),
            &runtime_missing(&["PyQt5.QtCore"]),
            ReportingChannel::Console {
                out: &mut BrokenPipe,
            },
        )
        .unwrap_err();
        assert!(matches!(err, GateError::ToolkitCoreMissing { .. }));
    }

    #[test]
    fn extension_present_shows_nothing() {
        let dialog = CountingDialog::default();
        let mut out = Vec::new();
        let result = check_extension(
            &host(&["earlyinit"]),
            &GateConfig::default(),
            &runtime_missing(&[]),
            ReportingChannel::Dialog {
                dialog: &dialog,
                out: &mut out,
            },
        );
        assert!(result.is_ok());
        assert_eq!(*dialog.shown.borrow(), 0);
    }
}
