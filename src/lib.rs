//! earlyinit - the first thing the application runs.
//!
//! The application depends on an interpreter and a GUI toolkit that may be
//! missing or too old on the host. Before anything else happens, earlyinit
//! walks an ordered list of gates, each allowed to report failures only
//! through a channel that is already known to work:
//!
//! 1. runtime version (console)
//! 2. crash diagnostics (never fatal)
//! 3. platform compatibility patch (never fatal)
//! 4. toolkit core (console)
//! 5. toolkit extension (modal dialog)
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Gate configuration and defaults
//! - [`env`] - Process environment access
//! - [`error`] - Error types and result aliases
//! - [`gates`] - The gates and the driver that runs them
//! - [`host`] - Snapshot of the host process
//! - [`launch`] - Hand-off to the application
//! - [`report`] - Console and dialog reporting
//! - [`runtime`] - Interpreter and toolkit access
//!
//! # Example
//!
//! ```
//! use earlyinit::host::Version;
//!
//! let found = Version::extract("Python 3.2.5").unwrap();
//! assert!(found < earlyinit::config::MINIMUM_RUNTIME);
//! ```

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod gates;
pub mod host;
pub mod launch;
pub mod report;
pub mod runtime;

pub use error::{GateError, Result};
