use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandResult, CommandSummary};
use crate::{
    config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, load_config},
    core::{Orchestrator, TracingSink, WordListSpellchecker, load_families, load_schema},
};

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut Config, cmd: &CheckCommand) {
    if let Some(property_dir) = &cmd.property_dir {
        config.property_dir = property_dir.clone();
    }
    if let Some(schema) = &cmd.schema {
        config.xhtml_schema = schema.clone();
    }
    config.excluded_keys.extend(cmd.excludes.iter().cloned());
    if let Some(default_validator) = cmd.default_validator {
        config.default_validator = default_validator;
    }
    if cmd.ignore_failure {
        config.ignore_failure = true;
    }
}

fn build_orchestrator(config: &Config, base_dir: &Path) -> Result<Orchestrator> {
    let schema = load_schema(&config.xhtml_schema, base_dir)
        .with_context(|| format!("Failed to load schema \"{}\"", config.xhtml_schema))?;
    let mut orchestrator = Orchestrator::new(config, Box::new(schema))
        .context("Invalid key pattern configuration")?
        .with_sink(Box::new(TracingSink));

    if !config.dictionaries.is_empty() {
        let paths: Vec<PathBuf> = config
            .dictionaries
            .iter()
            .map(|d| base_dir.join(d))
            .collect();
        let spellchecker = WordListSpellchecker::from_files(&paths)?;
        tracing::debug!(words = spellchecker.len(), "Loaded dictionaries");
        orchestrator = orchestrator.with_spellchecker(Box::new(spellchecker));
    }
    Ok(orchestrator)
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let base_dir = cmd.common.path.as_path();
    let ConfigLoadResult {
        mut config,
        from_file,
    } = load_config(base_dir)?;
    if !from_file {
        tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
    }

    apply_overrides(&mut config, &cmd);
    config.validate()?;

    let orchestrator = build_orchestrator(&config, base_dir)?;
    let loaded = load_families(base_dir, &config)?;

    let mut items = Vec::new();
    let mut error_count = 0;
    for family in &loaded.families {
        error_count += orchestrator.validate_family(family, &mut items);
    }

    Ok(CommandResult {
        summary: CommandSummary::Check(CheckSummary {
            files_checked: loaded.file_count,
            families_checked: loaded.families.len(),
            skipped_count: loaded.skipped_count,
            schema: orchestrator.schema_name().to_string(),
        }),
        items,
        error_count,
        exit_on_errors: !config.ignore_failure,
    })
}

#[cfg(test)]
mod tests {
    use crate::cli::args::CommonArgs;
    use crate::cli::commands::check::*;
    use crate::config::DefaultValidatorKind;
    use crate::issues::ReportType;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn command(path: &Path) -> CheckCommand {
        CheckCommand {
            common: CommonArgs {
                path: path.to_path_buf(),
                verbose: false,
            },
            property_dir: Some("res".to_string()),
            schema: None,
            excludes: Vec::new(),
            default_validator: None,
            ignore_failure: false,
        }
    }

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("res")).unwrap();
        fs::write(
            dir.path().join("res/Bundle.properties"),
            "a.text.ok=<b>fine</b>\na.text.bad=<b>broken\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("res/Bundle_fr.properties"),
            "a.text.ok=bien\na.text.bad=<b>cass\u{e9}</b>\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        let cmd = CheckCommand {
            schema: Some("xhtml5".to_string()),
            excludes: vec!["legacy.".to_string()],
            default_validator: Some(DefaultValidatorKind::Text),
            ignore_failure: true,
            ..command(Path::new("."))
        };
        apply_overrides(&mut config, &cmd);
        assert_eq!(config.property_dir, "res");
        assert_eq!(config.xhtml_schema, "xhtml5");
        assert_eq!(config.excluded_keys, vec!["legacy."]);
        assert_eq!(config.default_validator, DefaultValidatorKind::Text);
        assert!(config.ignore_failure);
    }

    #[test]
    fn test_check_project() {
        let dir = project();
        let result = check(command(dir.path())).unwrap();

        assert_eq!(result.error_count, 1);
        let kinds: Vec<ReportType> = result.items.iter().map(|i| i.kind()).collect();
        assert_eq!(
            kinds,
            vec![ReportType::HtmlValidation, ReportType::IncoherentTags]
        );
        match result.summary {
            CommandSummary::Check(summary) => {
                assert_eq!(summary.files_checked, 2);
                assert_eq!(summary.families_checked, 1);
                assert_eq!(summary.schema, "xhtml1-transitional");
            }
            CommandSummary::Init(_) => panic!("expected check summary"),
        }
    }

    #[test]
    fn test_missing_property_dir_is_an_error() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        assert!(check(command(dir.path())).is_err());
    }

    #[test]
    fn test_dictionaries_enable_spellcheck() {
        let dir = project();
        fs::write(dir.path().join("words.dic"), "fine\nbien\ncass\u{e9}\n").unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "dictionaries": ["words.dic"], "propertyDir": "res" }"#,
        )
        .unwrap();

        let cmd = CheckCommand {
            property_dir: None,
            ..command(dir.path())
        };
        let result = check(cmd).unwrap();
        assert!(result.items.iter().all(|i| i.kind() != ReportType::Spellcheck));
    }
}
