use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_upload_writes_manifest_to_stdout() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("strings/app.txt", "Hello")?;
    test.write_file("strings/menu.txt", "File")?;
    test.write_config(
        r#"{
  "files": [
    {
      "source": "strings/*.txt",
      "translation": "/strings/%two_letters_code%/%original_file_name%",
      "title": "App strings"
    }
  ]
}"#,
    )?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.command().arg("upload"), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        {
          "requests": [
            {
              "request": "create_folder",
              "path": "strings"
            },
            {
              "request": "add_files",
              "batch": {
                "files": {
                  "strings/app.txt": "[TEMP]/strings/app.txt",
                  "strings/menu.txt": "[TEMP]/strings/menu.txt"
                },
                "export_patterns": {
                  "strings/app.txt": "/strings/%two_letters_code%/%original_file_name%",
                  "strings/menu.txt": "/strings/%two_letters_code%/%original_file_name%"
                },
                "titles": {
                  "strings/app.txt": "App strings",
                  "strings/menu.txt": "App strings"
                }
              }
            }
          ]
        }

        ----- stderr -----
        ✓ Uploaded 2 files in 1 batch
        "#);
    });

    Ok(())
}

#[test]
fn test_upload_to_output_file() -> Result<()> {
    let test = CliTest::with_file("a.txt", "Hello")?;
    test.write_config(r#"{ "files": [{ "source": "*.txt", "type": "txt" }] }"#)?;

    assert_cmd_snapshot!(test.command().args(["upload", "--output", "manifest.json"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Uploaded 1 file in 1 batch

    ----- stderr -----
    ");

    let manifest = test.read_file("manifest.json")?;
    test.settings().bind(|| {
        insta::assert_snapshot!(manifest, @r#"
        {
          "requests": [
            {
              "request": "add_files",
              "batch": {
                "files": {
                  "a.txt": "[TEMP]/a.txt"
                },
                "type": "txt"
              }
            }
          ]
        }
        "#);
    });

    Ok(())
}

#[test]
fn test_upload_splits_large_patterns_into_batches() -> Result<()> {
    let test = CliTest::new()?;
    for i in 0..21 {
        test.write_file(&format!("docs/{i:02}.md"), "text")?;
    }
    test.write_config(r#"{ "files": [{ "source": "docs/*.md" }] }"#)?;

    assert_cmd_snapshot!(test.command().args(["upload", "-o", "manifest.json"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Uploaded 21 files in 2 batches

    ----- stderr -----
    ");

    let manifest: Value = serde_json::from_str(&test.read_file("manifest.json")?)?;
    let sizes: Vec<usize> = manifest["requests"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["request"] == "add_files")
        .map(|r| r["batch"]["files"].as_object().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![20, 1]);

    Ok(())
}

#[test]
fn test_update_with_renames() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.txt", "Hello")?;
    test.write_file("b.txt", "World")?;
    test.write_config(r#"{ "files": [{ "source": "*.txt" }] }"#)?;

    let mut cmd = test.command();
    cmd.args([
        "update",
        "--rename",
        "a.txt=first.txt",
        "--rename",
        "missing.txt=other.txt",
    ]);

    test.settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        {
          "requests": [
            {
              "request": "update_files",
              "batch": {
                "files": {
                  "a.txt": "[TEMP]/a.txt",
                  "b.txt": "[TEMP]/b.txt"
                },
                "new_names": {
                  "a.txt": "first.txt"
                }
              }
            }
          ]
        }

        ----- stderr -----
        warning: rename ignored, "missing.txt" is not among the selected files
        ✓ Updated 2 files in 1 batch
        "#);
    });

    Ok(())
}

#[test]
fn test_update_verbose_lists_renames() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.txt", "Hello")?;
    test.write_file("b.txt", "World")?;
    test.write_config(r#"{ "files": [{ "source": "*.txt" }] }"#)?;

    let mut cmd = test.command();
    cmd.args([
        "update",
        "-v",
        "--rename",
        "a.txt=first.txt",
        "--output",
        "manifest.json",
    ]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Batch 1 (2 files):
      a.txt  => first.txt
      b.txt
    ✓ Updated 2 files in 1 batch

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_upload_selection_error_exits_with_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_config(r#"{ "files": [{ "source": "a/***/b/*.txt" }] }"#)?;

    assert_cmd_snapshot!(test.command().arg("upload"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to select files: Pattern syntax is not supported yet. Feel free to submit a pull request that implements it: a/***/b/*.txt
    ");

    Ok(())
}
