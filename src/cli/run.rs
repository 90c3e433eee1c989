use std::path::Path;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, init::init},
};

/// Dispatch to the command handler.
///
/// # Returns
/// - `Ok(CommandResult)` with the findings and exit behavior
/// - `Err` if the run is aborted (config, schema or properties file cannot be loaded)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(Path::new(".")),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
