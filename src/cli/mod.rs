//! Command-line layer: argument parsing, command dispatch and terminal output.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise warnings and errors are shown, or
/// everything from l10nlint down to debug with `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,l10nlint=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(result.exit_status())
}
