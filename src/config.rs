//! Gate configuration.
//!
//! The defaults describe the application this launcher was built for; the
//! CLI (and its `EARLYINIT_*` environment variables) can point the gates at
//! a different interpreter or application module.

use crate::cli::Cli;
use crate::host::Version;

/// Oldest interpreter the application runs on.
pub const MINIMUM_RUNTIME: Version = Version::new(3, 3, 0);

/// Everything the gates and the hand-off need to know about the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Name shown to the user in every fatal message.
    pub app_name: String,
    /// Runtime name used in messages, independent of the executable path.
    pub runtime_name: String,
    /// Interpreter executable (name on PATH or absolute path).
    pub interpreter: String,
    /// Oldest acceptable interpreter version.
    pub minimum_version: Version,
    /// Toolkit core module probed by the core gate.
    pub core_module: String,
    /// Toolkit extension module probed by the extension gate.
    pub extension_module: String,
    /// Toolkit module providing the application and message-box classes.
    pub widgets_module: String,
    /// Module started through the interpreter once every gate passed.
    pub app_module: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            app_name: "qutebrowser".to_string(),
            runtime_name: "Python".to_string(),
            interpreter: "python3".to_string(),
            minimum_version: MINIMUM_RUNTIME,
            core_module: "PyQt5.QtCore".to_string(),
            extension_module: "PyQt5.QtWebKit".to_string(),
            widgets_module: "PyQt5.QtWidgets".to_string(),
            app_module: "qutebrowser".to_string(),
        }
    }
}

impl GateConfig {
    /// Apply CLI overrides on top of the defaults.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::default();
        if let Some(interpreter) = &cli.interpreter {
            config.interpreter = interpreter.clone();
        }
        if let Some(app_module) = &cli.app_module {
            config.app_name = app_module.clone();
            config.app_module = app_module.clone();
        }
        config
    }
}
