//! Error types for the bootstrap gates.
//!
//! This module defines [`GateError`], the failure side of every gate's
//! [`CheckOutcome`](crate::gates::CheckOutcome), and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Every fatal variant is reported to the user by the gate that detected
//!   it, on the channel that gate is allowed to use, before it is returned
//! - The driver never reports again; it only stops and maps to [`FAILURE_CODE`]
//! - Non-fatal problems (crash diagnostics) never become a `GateError`

use thiserror::Error;

use crate::host::Version;

/// Exit code used for every gate failure.
pub const FAILURE_CODE: u8 = 1;

/// A fatal bootstrap failure.
#[derive(Debug, Error)]
pub enum GateError {
    /// The interpreter is older than the supported minimum.
    #[error("runtime version {found} is below the required {required}")]
    VersionTooLow { found: Version, required: Version },

    /// The interpreter could not be started or did not report a version.
    #[error("runtime '{interpreter}' is unavailable: {message}")]
    RuntimeUnavailable {
        interpreter: String,
        message: String,
    },

    /// The GUI toolkit core module could not be loaded.
    #[error("toolkit core module '{module}' could not be loaded")]
    ToolkitCoreMissing {
        module: String,
        trace: Option<String>,
    },

    /// The GUI toolkit extension module could not be loaded.
    #[error("toolkit extension module '{module}' could not be loaded")]
    ToolkitExtensionMissing {
        module: String,
        trace: Option<String>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GateError {
    /// The diagnostic trace captured while probing, if any.
    pub fn trace(&self) -> Option<&str> {
        match self {
            GateError::ToolkitCoreMissing { trace, .. }
            | GateError::ToolkitExtensionMissing { trace, .. } => trace.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;
