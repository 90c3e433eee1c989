use crate::cli::exit_status::ExitStatus;
use crate::issues::ReportItem;

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    /// Properties files that were validated.
    pub files_checked: usize,
    pub families_checked: usize,
    /// Directory entries that could not be read.
    pub skipped_count: usize,
    pub schema: String,
}

#[derive(Debug)]
pub struct InitSummary {
    /// False if a configuration file already existed.
    pub created: bool,
}

/// Result of running an l10nlint command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Findings of every severity, ordered by file and key within each family.
    pub items: Vec<ReportItem>,
    pub error_count: usize,
    /// If false, errors are reported but the exit status stays successful.
    pub exit_on_errors: bool,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Init(summary) if !summary.created => ExitStatus::Failure,
            _ if self.exit_on_errors && self.error_count > 0 => ExitStatus::Failure,
            _ => ExitStatus::Success,
        }
    }
}
