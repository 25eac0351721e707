#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use anyhow::Result;
use common::volume_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn version_prints_version_and_exits_zero() {
    volume_cmd()
        .args(["-v", "--version", "--unexpected-argument"])
        .assert()
        .success()
        .stdout(format!("{}\n", flocker_script::VERSION))
        .stderr("");
}

#[test]
fn unexpected_argument_prints_help_and_exits_one() {
    volume_cmd()
        .arg("--unexpected-argument")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("Usage: flocker-volume"))
        .stderr(predicate::str::contains("ERROR: "))
        .stderr(predicate::str::ends_with("\n"));
}

#[test]
fn help_goes_to_stdout() {
    volume_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Usage: flocker-volume"))
        .stdout(predicate::str::contains("--config <PATH>"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn creates_config_and_reuses_uuid() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("etc").join("volume.json");

    let first = volume_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let first = String::from_utf8(first)?;
    assert!(config.exists());
    assert_eq!(first.trim().len(), 36, "expected a UUID, got {first:?}");

    let second = volume_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(first, String::from_utf8(second)?);
    Ok(())
}

#[test]
fn verbose_run_logs_to_stderr() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("volume.json");

    volume_cmd()
        .args(["-v", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("created volume config"));
    Ok(())
}

#[test]
fn malformed_config_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("volume.json");
    std::fs::write(&config, "{not json")?;

    volume_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to start volume service"))
        .stderr(predicate::str::contains("ERROR: ").not());
    Ok(())
}
