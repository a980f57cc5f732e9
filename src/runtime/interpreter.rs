//! Runtime backed by an interpreter executable.
//!
//! Every question is answered by spawning the interpreter: `--version` for
//! the version, `-c "import <module>"` for module probes, and a short
//! message-box script for the emergency dialog. Children inherit the process
//! environment, so the compatibility patch is already in effect for them.

use std::io;
use std::process::{Command, Output};
use std::sync::LazyLock;

use regex::Regex;

use super::{ModalDialog, ProbeFailure, Runtime};
use crate::host::Version;

static MODULE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("module pattern is valid")
});

/// An interpreter on PATH (or at an absolute path).
#[derive(Debug, Clone)]
pub struct Interpreter {
    program: String,
    widgets_module: String,
}

impl Interpreter {
    /// Create a runtime for `program`, using `widgets_module` for dialogs.
    pub fn new(program: impl Into<String>, widgets_module: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            widgets_module: widgets_module.into(),
        }
    }

    /// The interpreter executable.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[&str]) -> io::Result<Output> {
        tracing::debug!("Running {} {:?}", self.program, args);
        Command::new(&self.program).args(args).output()
    }

    fn dialog_script(&self) -> String {
        format!(
            "import sys\n\
             from {widgets} import QApplication, QMessageBox\n\
             app = QApplication(sys.argv[:1])\n\
             box = QMessageBox(QMessageBox.Critical, sys.argv[1], sys.argv[2])\n\
             box.resize(box.sizeHint())\n\
             box.exec()\n\
             app.quit()\n",
            widgets = self.widgets_module
        )
    }
}

/// Check that `module` is a dotted identifier before splicing it into code.
pub fn is_valid_module_name(module: &str) -> bool {
    MODULE_NAME.is_match(module)
}

impl Runtime for Interpreter {
    fn version(&self) -> Result<Version, String> {
        let output = self
            .run(&["--version"])
            .map_err(|e| format!("could not run '{}': {}", self.program, e))?;

        // Older interpreters print the banner on stderr.
        let banner = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        Version::extract(&banner).ok_or_else(|| {
            format!(
                "'{} --version' did not report a version (got '{}')",
                self.program,
                banner.trim()
            )
        })
    }

    fn probe_module(&self, module: &str) -> Result<(), ProbeFailure> {
        if !is_valid_module_name(module) {
            return Err(ProbeFailure::new(format!(
                "'{}' is not a valid module name",
                module
            )));
        }

        let statement = format!("import {}", module);
        let output = self
            .run(&["-c", &statement])
            .map_err(|e| ProbeFailure::new(format!("could not run '{}': {}", self.program, e)))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            let trace = if stderr.is_empty() {
                format!("'{}' exited with {}", statement, output.status)
            } else {
                stderr
            };
            Err(ProbeFailure::new(trace))
        }
    }
}

impl ModalDialog for Interpreter {
    fn show_critical(&self, title: &str, text: &str) -> io::Result<()> {
        let script = self.dialog_script();
        let output = self.run(&["-c", &script, title, text])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "message box exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}
