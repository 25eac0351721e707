//! `flocker-volume` entry point.

use std::process::ExitCode;

use anyhow::Result;
use flocker_script::{ProcessContext, ScriptRunner};
use flocker_volume::VolumeScript;

fn main() -> Result<ExitCode> {
    let runner = ScriptRunner::new(VolumeScript, ProcessContext::current());
    Ok(runner.main(None)?.into())
}
