#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_version() {
    // Arrange
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kinotui"));
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("details"));
}

#[test]
fn test_list_help_shows_category() {
    // Arrange
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--category"))
        .stdout(predicate::str::contains("--language"));
}

#[test]
fn test_search_help_shows_query() {
    // Arrange
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"));
}

#[test]
fn test_details_help_shows_id() {
    // Arrange
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.args(["details", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--id"));
}

#[test]
fn test_list_rejects_unknown_category() {
    // Arrange
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.args(["list", "--category", "trending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn test_search_rejects_blank_query() {
    // Arrange
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.args(["search", "--query", "   "])
        .env_remove("TMDB_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be blank"));
}

#[test]
fn test_search_requires_query() {
    // Arrange
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_details_requires_id() {
    // Arrange
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.arg("details")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_list_requires_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("kinotui");

    // Act & Assert
    cmd.arg("--dir")
        .arg(dir.path())
        .arg("list")
        .env_remove("TMDB_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}
