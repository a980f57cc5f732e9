//! CLI argument definitions.
//!
//! The launcher only owns a handful of options; everything after them is
//! forwarded to the application untouched.

use clap::Parser;

/// earlyinit - validate the interpreter and GUI toolkit, then start the application.
#[derive(Debug, Parser)]
#[command(name = "earlyinit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Interpreter used to probe the toolkit and run the application
    #[arg(long, env = "EARLYINIT_INTERPRETER")]
    pub interpreter: Option<String>,

    /// Application module started once every check passed
    #[arg(long, env = "EARLYINIT_APP_MODULE")]
    pub app_module: Option<String>,

    /// Run the checks and exit instead of starting the application
    #[arg(long)]
    pub check_only: bool,

    /// Enable debug logging and print diagnostic traces on failure
    #[arg(long)]
    pub debug: bool,

    /// Arguments passed through to the application
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub app_args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_debug_and_check_only() {
        let cli = Cli::parse_from(["earlyinit", "--debug", "--check-only"]);
        assert!(cli.debug);
        assert!(cli.check_only);
        assert!(cli.app_args.is_empty());
    }

    #[test]
    fn forwards_trailing_arguments() {
        let cli = Cli::parse_from(["earlyinit", "https://example.org", "--target", "tab"]);
        assert_eq!(cli.app_args, vec!["https://example.org", "--target", "tab"]);
        assert!(!cli.debug);
    }

    #[test]
    fn interpreter_flag_is_optional() {
        let cli = Cli::parse_from(["earlyinit", "--interpreter", "python3.12"]);
        assert_eq!(cli.interpreter.as_deref(), Some("python3.12"));
    }
}
