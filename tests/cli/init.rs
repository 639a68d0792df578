use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created l10nsync.json

    ----- stderr -----
    ");

    let content = test.read_file("l10nsync.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["base_path"], ".");
    assert!(parsed["files"].as_array().is_some_and(|f| !f.is_empty()));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file("l10nsync.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: l10nsync.json already exists
    ");
    assert_eq!(test.read_file("l10nsync.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    test.write_file(
        "Forms/Main.resx",
        r#"<root><data name="Title"><value>Main window</value></data></root>"#,
    )?;

    assert_cmd_snapshot!(test.command().arg("list"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Folders:
      Forms/
    Batch 1 (1 file):
      Forms/Main.resx  -> /%original_path%/%file_name%.%two_letters_code%.%file_extension%
    ✓ Selected 1 file in 1 batch (1 folder)

    ----- stderr -----
    ");

    Ok(())
}
