//! The `flocker-volume` script.

use anyhow::{Context, Result};
use async_trait::async_trait;
use flocker_script::{Options, OutputStream, Script, initialize_logging};
use tokio::runtime::Handle;

use crate::options::VolumeOptions;
use crate::service::VolumeService;

/// Ensures the node's volume configuration exists and prints the node UUID.
#[derive(Clone, Copy, Debug, Default)]
pub struct VolumeScript;

#[async_trait]
impl Script for VolumeScript {
    type Schema = VolumeOptions;

    async fn main(
        &self,
        _runtime: Handle,
        stdout: OutputStream,
        stderr: OutputStream,
        options: Options<VolumeOptions>,
    ) -> Result<()> {
        let _logging = initialize_logging(options.verbosity(), stderr);

        let service = VolumeService::new(options.config.clone());
        let config = service.start().await.with_context(|| {
            format!(
                "failed to start volume service with {}",
                service.config_path().display()
            )
        })?;

        stdout.write_text(&format!("{}\n", config.uuid))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flocker_script::{ProcessContext, ScriptRunner, SystemExit};
    use std::ffi::OsString;
    use tempfile::TempDir;

    #[test]
    fn test_incorrect_arguments() {
        let stderr = OutputStream::memory();
        let runner = ScriptRunner::new(VolumeScript, ProcessContext::captured(["flocker-volume"]))
            .with_stderr(stderr.clone());

        let exit = runner
            .main(Some(vec![OsString::from("--unexpected-argument")]))
            .unwrap();

        let error_text = stderr.contents_lossy();
        assert_eq!(exit, SystemExit::usage());
        assert!(error_text.starts_with("Usage: flocker-volume"), "{error_text}");
        assert!(error_text.contains("ERROR: "));
    }

    #[test]
    fn test_streams_default_to_context() {
        let context = ProcessContext::captured(["flocker-volume"]);
        let runner = ScriptRunner::new(VolumeScript, context.clone());
        assert!(runner.stdout().ptr_eq(context.stdout()));
        assert!(runner.stderr().ptr_eq(context.stderr()));
    }

    #[test]
    fn test_runs_twice_in_one_process() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("volume.json");
        let arguments = |verbose: &str| {
            Some(vec![
                OsString::from(verbose),
                OsString::from("--config"),
                config.clone().into_os_string(),
            ])
        };

        let first_out = OutputStream::memory();
        let first_err = OutputStream::memory();
        let exit = ScriptRunner::new(VolumeScript, ProcessContext::captured(["flocker-volume"]))
            .with_stdout(first_out.clone())
            .with_stderr(first_err.clone())
            .main(arguments("-v"))
            .unwrap();
        assert_eq!(exit, SystemExit::success());

        let second_out = OutputStream::memory();
        let second_err = OutputStream::memory();
        let exit = ScriptRunner::new(VolumeScript, ProcessContext::captured(["flocker-volume"]))
            .with_stdout(second_out.clone())
            .with_stderr(second_err.clone())
            .main(arguments("-vv"))
            .unwrap();
        assert_eq!(exit, SystemExit::success());

        let uuid = first_out.contents_lossy();
        assert_eq!(uuid.trim().len(), 36, "{uuid}");
        assert_eq!(second_out.contents_lossy(), uuid);
        assert!(first_err.contents_lossy().contains("created volume config"));
        assert!(second_err.contents_lossy().contains("loaded volume config"));
        assert!(!first_err.contents_lossy().contains("loaded volume config"));
    }
}
