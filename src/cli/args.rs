//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Validate the `.properties` resource bundles of a project
//! - `init`: Initialize the l10nlint configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::DefaultValidatorKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory holding the properties files (overrides config file)
    #[arg(long)]
    pub property_dir: Option<String>,

    /// Schema profile name or JSON profile path (overrides config file)
    #[arg(long)]
    pub schema: Option<String>,

    /// Key pattern to exclude, in addition to the config file.
    /// Can be specified multiple times: --exclude legacy. --exclude /^tmp\./
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub excludes: Vec<String>,

    /// Validator for keys matching no category (overrides config file)
    #[arg(long, value_enum)]
    pub default_validator: Option<DefaultValidatorKind>,

    /// Exit successfully even when errors are found
    #[arg(long)]
    pub ignore_failure: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate localized .properties files (markup, placeholders, cross-locale coherence)
    Check(CheckCommand),
    /// Initialize a new .l10nrc.json configuration file
    Init,
}
