use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["propertyDir", "includes", "htmlKeys", "parametricKeys", "xhtmlSchema"] {
        assert!(parsed.get(field).is_some(), "Config should have '{}' field", field);
    }
    assert_eq!(parsed["xhtmlSchema"], "xhtml1-transitional");
    assert_eq!(parsed["defaultValidator"], "none");

    // 2-space indentation
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let result = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Created .l10nrc.json"));

    assert!(test.root().join(".l10nrc.json").exists());
    let content = test.read_file(".l10nrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".l10nrc.json", "{}")?;

    let result = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(result.code, Some(1));
    assert!(result.stderr.contains(".l10nrc.json already exists"));
    assert_eq!(test.read_file(".l10nrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_resource("Messages.properties", "page.text.welcome=<b>Welcome</b>\n")?;

    let result = run(test.check_command())?;
    assert_eq!(
        result.code,
        Some(0),
        "Check command should work with initialized config. stderr: {}",
        result.stderr
    );

    Ok(())
}
