use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default configuration into `dir`, unless one already exists.
pub fn init(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let created = !config_path.exists();

    if created {
        fs::write(&config_path, default_config_json()?)
            .with_context(|| format!("Failed to write {:?}", config_path))?;
    }

    Ok(CommandResult {
        summary: CommandSummary::Init(InitSummary { created }),
        items: Vec::new(),
        error_count: 0,
        exit_on_errors: true,
    })
}
