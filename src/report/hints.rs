//! Remediation text for each fatal failure.
//!
//! Every message names what is missing and tells the user how to get it on
//! each packaging ecosystem we know about.

use super::Report;
use crate::config::GateConfig;
use crate::host::Version;

/// Install instructions for one packaging ecosystem.
struct Ecosystem {
    heading: &'static str,
    steps: &'static [&'static str],
}

const CORE_ECOSYSTEMS: &[Ecosystem] = &[
    Ecosystem {
        heading: "On Debian/Ubuntu:",
        steps: &["apt install python3-pyqt5 python3-pyqt5.qtwebkit"],
    },
    Ecosystem {
        heading: "On Arch Linux:",
        steps: &[
            "pacman -S python-pyqt5 qt5-webkit",
            "or install the {app} package from the AUR",
        ],
    },
    Ecosystem {
        heading: "On macOS:",
        steps: &["brew install pyqt@5"],
    },
    Ecosystem {
        heading: "On Windows:",
        steps: &[
            "Use the PyQt5 installer from Riverbank Computing or the standalone {app} build:",
            "https://www.riverbankcomputing.com/software/pyqt/download5",
        ],
    },
];

const EXTENSION_ECOSYSTEMS: &[Ecosystem] = &[
    Ecosystem {
        heading: "On Debian/Ubuntu:",
        steps: &["apt install python3-pyqt5.qtwebkit"],
    },
    Ecosystem {
        heading: "On Arch Linux:",
        steps: &["pacman -S qt5-webkit"],
    },
    Ecosystem {
        heading: "On macOS:",
        steps: &[
            "brew install qt@5",
            "then rebuild PyQt5 against it with WebKit support enabled.",
        ],
    },
];

const OTHER_ECOSYSTEMS: Ecosystem = Ecosystem {
    heading: "For other distributions:",
    steps: &["Check your package manager for similarly named packages."],
};

fn render(ecosystems: &[Ecosystem], app: &str) -> String {
    ecosystems
        .iter()
        .chain(std::iter::once(&OTHER_ECOSYSTEMS))
        .map(|eco| {
            let mut block = eco.heading.to_string();
            for step in eco.steps {
                block.push_str("\n    ");
                block.push_str(&step.replace("{app}", app));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn title(config: &GateConfig) -> String {
    format!("{}: Fatal error!", config.app_name)
}

/// The interpreter is older than the minimum.
pub fn version_too_low(config: &GateConfig, found: Version) -> Report {
    Report::new(
        title(config),
        format!(
            "Fatal error: At least {} {} is required to run {}, but {} is installed!",
            config.runtime_name, config.minimum_version, config.app_name, found
        ),
    )
    .with_body(format!("Interpreter: {}", config.interpreter))
}

/// The interpreter did not run or did not say which version it is.
pub fn runtime_unavailable(config: &GateConfig, reason: &str) -> Report {
    Report::new(
        title(config),
        format!(
            "Fatal error: {} {} or newer is required to run {}, but it could not be found!",
            config.runtime_name, config.minimum_version, config.app_name
        ),
    )
    .with_body(format!("Interpreter: {}\n{}", config.interpreter, reason))
}

/// The toolkit core failed to load.
pub fn core_missing(config: &GateConfig) -> Report {
    Report::new(
        title(config),
        format!(
            "Fatal error: {} is required to run {} but could not be imported! Maybe it's not installed?",
            config.core_module, config.app_name
        ),
    )
    .with_body(render(CORE_ECOSYSTEMS, &config.app_name))
}

/// The toolkit extension failed to load.
pub fn extension_missing(config: &GateConfig) -> Report {
    Report::new(
        title(config),
        format!(
            "Fatal error: {} is required to run {} but could not be imported! Maybe it's not installed?",
            config.extension_module, config.app_name
        ),
    )
    .with_body(render(EXTENSION_ECOSYSTEMS, &config.app_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_hint_names_both_versions() {
        let report = version_too_low(&GateConfig::default(), Version::new(3, 2, 0));
        assert!(report.summary.contains("3.2.0"));
        assert!(report.summary.contains("3.3.0"));
        assert!(report.summary.contains("At least Python 3.3.0"));
    }

    #[test]
    fn version_hint_names_interpreter_path_separately() {
        let config = GateConfig {
            interpreter: "/opt/python/bin/python3.12".to_string(),
            ..GateConfig::default()
        };
        let report = version_too_low(&config, Version::new(3, 2, 0));
        assert!(!report.summary.contains("/opt/python"));
        assert!(report.body.contains("Interpreter: /opt/python/bin/python3.12"));
    }

    #[test]
    fn macos_extension_command_stands_on_its_own_line() {
        let report = extension_missing(&GateConfig::default());
        assert!(report.body.contains("\n    brew install qt@5\n"));
    }

    #[test]
    fn runtime_unavailable_includes_reason() {
        let report = runtime_unavailable(&GateConfig::default(), "No such file or directory");
        assert!(report.summary.contains("Python 3.3.0"));
        assert!(report.body.contains("Interpreter: python3"));
        assert!(report.body.contains("No such file or directory"));
    }

    #[test]
    fn core_hint_covers_several_ecosystems() {
        let report = core_missing(&GateConfig::default());
        assert!(report.summary.contains("PyQt5.QtCore"));
        for needle in ["apt install", "pacman -S", "brew install", "Riverbank", "other distributions"] {
            assert!(report.body.contains(needle), "missing {}", needle);
        }
    }

    #[test]
    fn core_hint_substitutes_app_name() {
        let report = core_missing(&GateConfig::default());
        assert!(report.body.contains("install the qutebrowser package from the AUR"));
        assert!(!report.body.contains("{app}"));
    }

    #[test]
    fn extension_hint_targets_extension_packages() {
        let report = extension_missing(&GateConfig::default());
        assert!(report.summary.contains("PyQt5.QtWebKit"));
        assert!(report.body.contains("python3-pyqt5.qtwebkit"));
        assert!(report.body.contains("qt5-webkit"));
        assert!(!report.body.contains("python-pyqt5 "));
        assert_eq!(report.title, "qutebrowser: Fatal error!");
    }
}
