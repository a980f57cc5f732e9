//! earlyinit entry point.

use std::process::ExitCode;

use clap::Parser;
use earlyinit::cli::Cli;
use earlyinit::config::GateConfig;
use earlyinit::env::ProcessEnv;
use earlyinit::error::FAILURE_CODE;
use earlyinit::gates::{diagnostics, Bootstrap};
use earlyinit::host::{HostEnvironment, DEBUG_FLAG};
use earlyinit::launch;
use earlyinit::runtime::Interpreter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, so a clean start prints nothing
///
/// Logs go to stderr; stdout belongs to the fatal-error messages.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("earlyinit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("earlyinit=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("earlyinit starting with args: {:?}", cli);

    let config = GateConfig::from_cli(&cli);
    let runtime = Interpreter::new(config.interpreter.clone(), config.widgets_module.clone());
    let host = HostEnvironment::capture(&runtime);

    let mut bootstrap = Bootstrap::new(&config, &runtime, &runtime);
    let mut stdout = std::io::stdout();
    if let Err(e) = bootstrap.run(&host, &mut ProcessEnv, &mut stdout) {
        tracing::debug!("Startup checks failed: {}", e);
        return ExitCode::from(FAILURE_CODE);
    }

    if cli.check_only {
        return ExitCode::SUCCESS;
    }

    diagnostics::release_user_signal();

    let mut app_args = cli.app_args.clone();
    if cli.debug {
        app_args.insert(0, DEBUG_FLAG.to_string());
    }

    match launch::hand_off(&config, &app_args) {
        Ok(status) => ExitCode::from(launch::exit_code(status)),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(FAILURE_CODE)
        }
    }
}
