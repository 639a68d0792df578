use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const FULL_RESX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <data name="Greeting" xml:space="preserve"><value>Hello</value></data>
</root>"#;

const EMPTY_RESX: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <data name="$this.Icon" type="System.Drawing.Icon"><value>AAABAAEAEBAAAAEAIABoBAAAFgAAACgAAAAQAAAAIAAAAAEAIAAAAAAAAAQAAA</value></data>
  <data name="label1.Text" xml:space="preserve"><value>   </value></data>
</root>"#;

fn john_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    for path in [
        "john/test.txt",
        "john/second.txt",
        "john/quincy/test.txt",
        "john/quincy/adams/test.txt",
        "john/quincy/adams/second.txt",
        "john/smith/test.txt",
        "jane/test.txt",
        "jane/doe/test.txt",
    ] {
        test.write_file(path, "some text")?;
    }
    Ok(test)
}

#[test]
fn test_list_recursive_pattern() -> Result<()> {
    let test = john_project()?;
    test.write_config(r#"{ "files": [{ "source": "/john/**/*.txt" }] }"#)?;

    assert_cmd_snapshot!(test.command().arg("list"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Folders:
      john/
      john/quincy/
      john/quincy/adams/
      john/smith/
    Batch 1 (6 files):
      john/quincy/adams/second.txt
      john/quincy/adams/test.txt
      john/quincy/test.txt
      john/second.txt
      john/smith/test.txt
      john/test.txt
    ✓ Selected 6 files in 1 batch (4 folders)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_list_skips_resx_without_translatable_content() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("full.resx", FULL_RESX)?;
    test.write_file("empty.resx", EMPTY_RESX)?;
    test.write_config(r#"{ "base_path": ".", "files": [{ "source": "*.resx" }] }"#)?;

    assert_cmd_snapshot!(test.command().arg("list"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Batch 1 (1 file):
      full.resx
    warning: 1 file without translatable content skipped (use -v for details)
    ✓ Selected 1 file in 1 batch (0 folders)

    ----- stderr -----
    ");

    assert_cmd_snapshot!(test.command().args(["list", "-v"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Batch 1 (1 file):
      full.resx
    Skipped (no translatable content):
      empty.resx
    ✓ Selected 1 file in 1 batch (0 folders)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_list_xml_with_translatable_elements() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "layouts/main.xml",
        r#"<layout><button label="Save"/><spacer/></layout>"#,
    )?;
    test.write_file("layouts/empty.xml", r#"<layout><spacer/></layout>"#)?;
    test.write_config(
        r#"{ "files": [{ "source": "layouts/*.xml", "translatable_elements": ["//button/@label | //text"] }] }"#,
    )?;

    assert_cmd_snapshot!(test.command().args(["list", "-v"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Folders:
      layouts/
    Batch 1 (1 file):
      layouts/main.xml
    Skipped (no translatable content):
      layouts/empty.xml
    ✓ Selected 1 file in 1 batch (1 folder)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_list_first_item_per_section() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "menus/main.xml",
        "<menu><group><item> </item></group><group><item>Open</item></group></menu>",
    )?;
    test.write_config(
        r#"{ "files": [{ "source": "menus/*.xml", "translatable_elements": ["//item[1]"] }] }"#,
    )?;

    assert_cmd_snapshot!(test.command().arg("list"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Folders:
      menus/
    Batch 1 (1 file):
      menus/main.xml
    ✓ Selected 1 file in 1 batch (1 folder)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_list_unimplemented_pattern() -> Result<()> {
    let test = john_project()?;
    test.write_config(r#"{ "files": [{ "source": "/john/*/test.txt" }] }"#)?;

    assert_cmd_snapshot!(test.command().arg("list"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to select files: Pattern syntax is not supported yet. Feel free to submit a pull request that implements it: /john/*/test.txt
    ");

    Ok(())
}

#[test]
fn test_list_wildcard_hidden_by_parent_segment() -> Result<()> {
    let test = john_project()?;
    test.write_config(r#"{ "files": [{ "source": "*/../jane/test.txt" }] }"#)?;

    assert_cmd_snapshot!(test.command().arg("list"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to select files: Pattern syntax is not supported yet. Feel free to submit a pull request that implements it: */../jane/test.txt
    ");

    Ok(())
}

#[test]
fn test_list_pattern_outside_base_path() -> Result<()> {
    let test = john_project()?;
    test.write_config(r#"{ "base_path": "john", "files": [{ "source": "../jane/*.txt" }] }"#)?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.command().arg("list"), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to select files: Unsupported path: "[TEMP]/jane" is outside of base path "[TEMP]/john" (source: "../jane/*.txt")
        "#);
    });

    Ok(())
}

#[test]
fn test_list_missing_directory() -> Result<()> {
    let test = CliTest::new()?;
    test.write_config(r#"{ "files": [{ "source": "missing/*.txt" }] }"#)?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.command().arg("list"), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to select files: Directory not found: [TEMP]/missing
        ");
    });

    Ok(())
}

#[test]
fn test_list_base_path_override() -> Result<()> {
    let test = john_project()?;
    test.write_config(r#"{ "files": [{ "source": "*.txt" }] }"#)?;

    assert_cmd_snapshot!(test.command().args(["list", "--base-path", "jane"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Batch 1 (1 file):
      test.txt
    ✓ Selected 1 file in 1 batch (0 folders)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_list_explicit_files() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().args(["list", "./docs/guide/intro.md", "readme.txt"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Folders:
      docs/
      docs/guide/
    Batch 1 (2 files):
      docs/guide/intro.md
      readme.txt
    ✓ Selected 2 files in 1 batch (2 folders)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_list_invalid_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_config(r#"{ "files": [{ "source": "*.xml", "translate_content": 3 }] }"#)?;

    assert_cmd_snapshot!(test.command().arg("list"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid entry files[0] ("*.xml"): 'translate_content' must be 0 or 1, got 3
    "#);

    Ok(())
}
