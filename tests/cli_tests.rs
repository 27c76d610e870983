//! End-to-end tests for the `sheetsplit` binary.

#![allow(deprecated)] // Command::cargo_bin

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

fn write_book(path: &Path, rows: &[Vec<Cell>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => sheet.write_string(r as u32, c as u16, *s)?,
                Cell::Number(n) => sheet.write_number(r as u32, c as u16, *n)?,
            };
        }
    }
    workbook.save(path)?;
    Ok(())
}

fn text_rows(rows: &[&[&'static str]]) -> Vec<Vec<Cell<'static>>> {
    rows.iter()
        .map(|row| row.iter().map(|s| Cell::Text(*s)).collect())
        .collect()
}

fn output_folders(dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}

fn sheetsplit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sheetsplit").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("SHEETSPLIT_OUTPUT_DIR");
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// USAGE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_argument_prints_usage_and_exits_1() {
    let dir = TempDir::new().unwrap();

    sheetsplit(&dir)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: sheetsplit <excelFilePath>"));

    assert!(output_folders(dir.path()).is_empty());
}

#[test]
fn test_help_and_version() {
    let dir = TempDir::new().unwrap();

    sheetsplit(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("timestamped folder"));

    sheetsplit(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetsplit"));
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_rows_become_files_in_timestamped_folder() -> Result<()> {
    let dir = TempDir::new()?;
    write_book(
        &dir.path().join("orders.xlsx"),
        &text_rows(&[&["name", "qty", "tag"], &["a.txt", "1", "x"], &["b.txt", "2", "y"]]),
    )?;

    sheetsplit(&dir)
        .arg("orders.xlsx")
        .assert()
        .success()
        .stdout(predicate::eq(
            "Conversion for row 1 completed successfully.\n\
             Conversion for row 2 completed successfully.\n",
        ));

    let folders = output_folders(dir.path());
    assert_eq!(folders.len(), 1);
    let name = folders[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("orders_"));
    let stamp = &name["orders_".len()..];
    assert_eq!(stamp.len(), 15);
    assert_eq!(&stamp[8..9], "_");
    assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));

    assert_eq!(fs::read_to_string(folders[0].join("a.txt"))?, "1,x");
    assert_eq!(fs::read_to_string(folders[0].join("b.txt"))?, "2,y");
    Ok(())
}

#[test]
fn test_numeric_cells_are_truncated() -> Result<()> {
    let dir = TempDir::new()?;
    write_book(
        &dir.path().join("nums.xlsx"),
        &[
            vec![Cell::Text("id"), Cell::Text("value")],
            vec![Cell::Number(7.0), Cell::Number(42.9), Cell::Text("abc")],
        ],
    )?;

    sheetsplit(&dir).arg("nums.xlsx").assert().success();

    let folders = output_folders(dir.path());
    assert_eq!(fs::read_to_string(folders[0].join("7"))?, "42,abc");
    Ok(())
}

#[test]
fn test_single_column_row_produces_empty_file() -> Result<()> {
    let dir = TempDir::new()?;
    write_book(
        &dir.path().join("single.xlsx"),
        &text_rows(&[&["name"], &["lonely.txt"]]),
    )?;

    sheetsplit(&dir).arg("single.xlsx").assert().success();

    let folders = output_folders(dir.path());
    assert_eq!(fs::read_to_string(folders[0].join("lonely.txt"))?, "");
    Ok(())
}

#[test]
fn test_output_dir_flag_overrides_working_directory() -> Result<()> {
    let dir = TempDir::new()?;
    write_book(
        &dir.path().join("book.xlsx"),
        &text_rows(&[&["name"], &["a.txt"]]),
    )?;

    sheetsplit(&dir)
        .args(["book.xlsx", "--output-dir", "exports/nested"])
        .assert()
        .success();

    let folders = output_folders(&dir.path().join("exports").join("nested"));
    assert_eq!(folders.len(), 1);
    assert!(folders[0].join("a.txt").exists());
    Ok(())
}

#[test]
fn test_config_file_in_working_directory_is_used() -> Result<()> {
    let dir = TempDir::new()?;
    write_book(
        &dir.path().join("book.xlsx"),
        &text_rows(&[&["name"], &["a.txt"]]),
    )?;
    let target = dir.path().join("configured");
    fs::write(
        dir.path().join("sheetsplit.toml"),
        format!(
            "[output]\nbase_directory = {:?}\n",
            target.to_string_lossy()
        ),
    )?;

    sheetsplit(&dir).arg("book.xlsx").assert().success();

    assert_eq!(output_folders(&target).len(), 1);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// FAILURES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_duplicate_filename_aborts_with_exit_1() -> Result<()> {
    let dir = TempDir::new()?;
    write_book(
        &dir.path().join("dups.xlsx"),
        &text_rows(&[
            &["name", "v"],
            &["dup.txt", "1"],
            &["dup.txt", "2"],
            &["after.txt", "3"],
        ]),
    )?;

    sheetsplit(&dir)
        .arg("dups.xlsx")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Conversion for row 1 completed successfully."))
        .stdout(predicate::str::contains("row 2").not())
        .stderr(predicate::str::contains(
            "Error: Duplicate filename detected - dup.txt",
        ));

    let folders = output_folders(dir.path());
    assert_eq!(fs::read_to_string(folders[0].join("dup.txt"))?, "1");
    assert!(!folders[0].join("after.txt").exists());
    Ok(())
}

#[test]
fn test_row_write_failure_is_not_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    write_book(
        &dir.path().join("mixed.xlsx"),
        &text_rows(&[
            &["name", "v"],
            &["ok1.txt", "1"],
            &["no/such/dir.txt", "2"],
            &["ok2.txt", "3"],
        ]),
    )?;

    sheetsplit(&dir)
        .arg("mixed.xlsx")
        .assert()
        .success()
        .stdout(predicate::eq(
            "Conversion for row 1 completed successfully.\n\
             Conversion for row 2 completed successfully.\n",
        ))
        .stderr(predicate::str::contains("no/such/dir.txt"));

    let folders = output_folders(dir.path());
    assert_eq!(fs::read_to_string(folders[0].join("ok2.txt"))?, "3");
    Ok(())
}

#[test]
fn test_missing_workbook_fails_without_output_folder() {
    let dir = TempDir::new().unwrap();

    sheetsplit(&dir)
        .arg("missing.xlsx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.xlsx"));

    assert!(output_folders(dir.path()).is_empty());
}

#[test]
fn test_unwritable_base_directory_fails() -> Result<()> {
    let dir = TempDir::new()?;
    write_book(
        &dir.path().join("book.xlsx"),
        &text_rows(&[&["name"], &["a.txt"]]),
    )?;
    fs::write(dir.path().join("blocker"), "a file, not a directory")?;

    sheetsplit(&dir)
        .args(["book.xlsx", "--output-dir", "blocker"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// DRY RUN AND CONFIG GENERATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    write_book(
        &dir.path().join("plan.xlsx"),
        &text_rows(&[&["name"], &["a.txt"], &["b.txt"]]),
    )?;

    sheetsplit(&dir)
        .args(["plan.xlsx", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data rows:     2"));

    assert!(output_folders(dir.path()).is_empty());
    Ok(())
}

#[test]
fn test_generate_config() {
    let dir = TempDir::new().unwrap();

    sheetsplit(&dir)
        .arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetsplit.toml"));

    let content = fs::read_to_string(dir.path().join("sheetsplit.toml")).unwrap();
    assert!(content.contains("[output]"));
}
