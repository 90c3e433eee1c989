use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_clean_project_passes() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource(
        "Messages.properties",
        "page.text.welcome=<b>Welcome</b>\npage.url.home=https://example.com/home\n",
    )?;
    test.write_resource(
        "Messages_fr.properties",
        "page.text.welcome=<b>Bienvenue</b>\npage.url.home=https://example.com/fr/home\n",
    )?;

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(0), "stderr: {}", result.stderr);
    assert!(
        result
            .stdout
            .contains("✓ Checked 2 properties files - no issues found"),
        "stdout: {}",
        result.stdout
    );

    Ok(())
}

#[test]
fn test_html_error_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource("Messages.properties", "page.text.broken=<b>Welcome\n")?;

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("error: "));
    assert!(result.stdout.contains("html-validation"));
    assert!(result.stdout.contains("Messages.properties"));
    assert!(result.stdout.contains("= key: page.text.broken"));
    assert!(result.stdout.contains("= value: \"<b>Welcome\""));
    assert!(result.stdout.contains("✘ 1 problems (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_ignore_failure_exits_success() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource("Messages.properties", "page.text.broken=<b>Welcome\n")?;

    let result = run({
        let mut cmd = test.check_command();
        cmd.arg("--ignore-failure");
        cmd
    })?;
    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("html-validation"));
    assert!(result.stdout.contains("errors ignored"));

    Ok(())
}

#[test]
fn test_ignore_failure_from_config() -> Result<()> {
    let test = CliTest::with_file(".l10nrc.json", r#"{ "ignoreFailure": true }"#)?;
    test.write_resource("Messages.properties", "page.url.home=not a url\n")?;

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("url-validation"));

    Ok(())
}

#[test]
fn test_warnings_do_not_fail() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource("Messages.properties", "page.text.welcome=<b>Welcome</b> \n")?;

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("warning: Trailing whitespace"));
    assert!(result.stdout.contains("✘ 1 problems (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_missing_property_dir_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(2));
    assert!(
        result.stderr.contains("Property directory not found"),
        "stderr: {}",
        result.stderr
    );

    Ok(())
}

#[test]
fn test_invalid_config_is_error() -> Result<()> {
    let test = CliTest::with_file(".l10nrc.json", "{ not json")?;

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains("Error: "));

    Ok(())
}

#[test]
fn test_property_dir_argument() -> Result<()> {
    let test = CliTest::with_file("i18n/Labels.properties", "form.url.help=nope\n")?;

    let result = run({
        let mut cmd = test.check_command();
        cmd.args(["--property-dir", "i18n"]);
        cmd
    })?;
    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("Invalid URL: \"nope\""));

    Ok(())
}

#[test]
fn test_path_argument() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "webapp/src/main/resources/Messages.properties",
        "page.text.broken=<i>oops\n",
    )?;

    let mut cmd = test.command();
    cmd.args(["check", "--path", "webapp"]);
    let result = run(cmd)?;
    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("page.text.broken"));

    Ok(())
}

#[test]
fn test_exclude_argument() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource(
        "Messages.properties",
        "legacy.text.old=<b>broken\npage.text.welcome=<b>Welcome</b>\n",
    )?;

    let result = run({
        let mut cmd = test.check_command();
        cmd.args(["--exclude", "legacy."]);
        cmd
    })?;
    assert_eq!(result.code, Some(0), "stdout: {}", result.stdout);
    assert!(!result.stdout.contains("legacy.text.old"));

    // Excluded keys are listed in verbose mode
    let verbose = run({
        let mut cmd = test.check_command();
        cmd.args(["--exclude", "legacy.", "-v"]);
        cmd
    })?;
    assert_eq!(verbose.code, Some(0));
    assert!(verbose.stdout.contains("info: Excluded key"));
    assert!(verbose.stdout.contains("legacy.text.old"));

    Ok(())
}

#[test]
fn test_schema_argument() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource("Messages.properties", "page.text.title=<center>Title</center>\n")?;

    let transitional = run(test.check_command())?;
    assert_eq!(transitional.code, Some(0), "stdout: {}", transitional.stdout);

    let strict = run({
        let mut cmd = test.check_command();
        cmd.args(["--schema", "xhtml1-strict"]);
        cmd
    })?;
    assert_eq!(strict.code, Some(1));
    assert!(strict.stdout.contains("html-validation"));
    assert!(strict.stdout.contains("center"));

    Ok(())
}

#[test]
fn test_incoherent_translation_reported() -> Result<()> {
    let test = CliTest::new()?;
    test.write_resource(
        "Messages.properties",
        "page.text.welcome=<b>Welcome</b>\npage.url.home=https://example.com\n",
    )?;
    test.write_resource("Messages_de.properties", "page.text.welcome=<i>Willkommen</i>\n")?;
    test.write_resource("Messages_fr.properties", "page.text.welcome=<b>Bienvenue</b>\n")?;

    let result = run(test.check_command())?;
    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("incoherent-tags"));
    assert!(result.stdout.contains("Messages_de.properties"));
    assert!(
        result
            .stdout
            .contains("Missing translation for key page.url.home in locale de")
    );
    assert!(
        result
            .stdout
            .contains("Missing translation for key page.url.home in locale fr")
    );

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let result = run(test.command())?;
    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Usage:"));
    assert!(result.stdout.contains("check"));
    assert!(result.stdout.contains("init"));

    Ok(())
}

#[test]
fn test_check_help() -> Result<()> {
    let test = CliTest::new()?;

    let result = run({
        let mut cmd = test.check_command();
        cmd.arg("--help");
        cmd
    })?;
    assert_eq!(result.code, Some(0));
    for flag in [
        "--path",
        "--property-dir",
        "--schema",
        "--exclude",
        "--default-validator",
        "--ignore-failure",
    ] {
        assert!(result.stdout.contains(flag), "help should list {}", flag);
    }

    Ok(())
}
