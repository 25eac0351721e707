#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::time::Duration;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a `flocker-volume` command suitable for integration tests.
pub fn volume_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("flocker-volume"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("NO_COLOR", "1");
    cmd
}
