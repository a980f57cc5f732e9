//! The external runtime the application is hosted on.
//!
//! The gates never talk to the interpreter or the toolkit directly; they go
//! through these traits so the whole sequence can run against a stub.
//!
//! # Modules
//!
//! - [`interpreter`] - Runtime backed by an interpreter executable

pub mod interpreter;

pub use interpreter::Interpreter;

use crate::host::Version;

/// Why a module probe failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    /// Full diagnostic output from the failed load (e.g. an import traceback).
    pub trace: String,
}

impl ProbeFailure {
    pub fn new(trace: impl Into<String>) -> Self {
        Self {
            trace: trace.into(),
        }
    }
}

/// Version introspection and module loading.
pub trait Runtime {
    /// Ask the runtime for its version.
    ///
    /// The error is a human-readable reason the version could not be read.
    fn version(&self) -> Result<Version, String>;

    /// Try to load a module, returning its diagnostic trace on failure.
    fn probe_module(&self, module: &str) -> Result<(), ProbeFailure>;
}

/// A modal, critical-severity message box.
///
/// Implementations build a throwaway GUI application context, show the box
/// sized to its content, block until the user dismisses it, then tear the
/// context down again.
pub trait ModalDialog {
    fn show_critical(&self, title: &str, text: &str) -> std::io::Result<()>;
}
