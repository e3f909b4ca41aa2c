use std::error::Error;
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn find_reports_matches_across_files() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let file_one = dir.path().join("one.txt");
    let file_two = dir.path().join("two.txt");
    fs::write(&file_one, "Needle in haystack\nAnother line")?;
    fs::write(&file_two, "no matches here\nneedle again")?;

    Command::cargo_bin("quillpad-cli")?
        .args([
            "find",
            "needle",
            file_one.to_str().unwrap(),
            file_two.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(format!(
                "Search \"needle\" (2 hits in 2 files)\n  {} (1 hits)",
                file_one.display()
            ))
            .and(predicate::str::contains(
                "    Line 1 (Col 1): Needle in haystack",
            ))
            .and(predicate::str::contains(format!(
                "  {} (1 hits)",
                file_two.display()
            )))
            .and(predicate::str::contains("    Line 2 (Col 1): needle again")),
        );

    Ok(())
}

#[test]
fn case_sensitive_flag_narrows_hits() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("sample.txt");
    fs::write(&file, "Word word WORD")?;

    Command::cargo_bin("quillpad-cli")?
        .args(["find", "word", file.to_str().unwrap(), "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));

    Command::cargo_bin("quillpad-cli")?
        .args([
            "find",
            "word",
            file.to_str().unwrap(),
            "--case-sensitive",
            "--count",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));

    Ok(())
}

#[test]
fn whole_word_flag_skips_embedded_occurrences() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("words.txt");
    fs::write(&file, "concatenate cat catalogue")?;

    Command::cargo_bin("quillpad-cli")?
        .args([
            "find",
            "cat",
            file.to_str().unwrap(),
            "--whole-word",
            "--count",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));

    Ok(())
}

#[test]
fn regex_mode_matches_per_line() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("numbers.txt");
    fs::write(&file, "item 12\nitem 345\nno digits")?;

    Command::cargo_bin("quillpad-cli")?
        .args(["find", r"\d+", file.to_str().unwrap(), "--regex"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("(2 hits in 1 files)")
                .and(predicate::str::contains("Line 1 (Col 6): item 12"))
                .and(predicate::str::contains("Line 2 (Col 6): item 345")),
        );

    Ok(())
}

#[test]
fn invalid_regex_is_a_clean_miss() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("input.txt");
    fs::write(&file, "some text [")?;

    Command::cargo_bin("quillpad-cli")?
        .args(["find", "[", file.to_str().unwrap(), "--regex"])
        .assert()
        .success()
        .stdout(predicate::str::diff("No matches found.\n"));

    Ok(())
}

#[test]
fn backward_scan_lists_last_match_first() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("order.txt");
    fs::write(&file, "first hit\nsecond hit")?;

    Command::cargo_bin("quillpad-cli")?
        .args(["find", "hit", file.to_str().unwrap(), "--backward"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "    Line 2 (Col 8): second hit\n    Line 1 (Col 7): first hit",
        ));

    Ok(())
}

#[test]
fn missing_file_is_an_error() -> Result<(), Box<dyn Error>> {
    Command::cargo_bin("quillpad-cli")?
        .args(["find", "pattern", "/no/such/file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));

    Ok(())
}
