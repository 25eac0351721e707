//! Running a script as a process.
//!
//! A [`Script`] provides an option schema and an async main routine.
//! [`ScriptRunner`] parses the command line into the script's options, then
//! hands them to the main routine on a single-threaded tokio runtime and
//! blocks until it finishes.
//!
//! ## Termination
//!
//! [`ScriptRunner::main`] always ends in a termination value:
//!
//! - `Ok(SystemExit)` with code 0 after the main routine succeeds, or when
//!   `--version`/`--help` was handled
//! - `Ok(SystemExit)` with code 1 after a usage error, once the help text and
//!   `ERROR: <message>` have been written to stderr
//! - `Err(_)` when the main routine fails; these errors are not translated
//!
//! ```rust,ignore
//! use flocker_script::{ProcessContext, ScriptRunner};
//!
//! fn main() -> anyhow::Result<std::process::ExitCode> {
//!     let runner = ScriptRunner::new(MyScript, ProcessContext::current());
//!     Ok(runner.main(None)?.into())
//! }
//! ```

use std::ffi::OsString;

use anyhow::Result;
use async_trait::async_trait;
use tokio::runtime::{Builder, Handle};
use tracing::debug;

use crate::context::{OutputStream, ProcessContext};
use crate::error::{ParseInterrupt, SystemExit};
use crate::options::{OptionSchema, Options, StandardOptions};

/// A command-line program: an option schema plus a main routine.
#[async_trait]
pub trait Script: Send + Sync {
    /// The options this script accepts.
    type Schema: OptionSchema + Send + Sync + 'static;

    /// Build the augmented options object the command line is parsed into.
    fn options(
        &self,
        sys_module: &ProcessContext,
        stdout: OutputStream,
        stderr: OutputStream,
    ) -> StandardOptions<Self::Schema> {
        StandardOptions::new(sys_module.clone())
            .with_stdout(stdout)
            .with_stderr(stderr)
    }

    /// Do the script's work.
    ///
    /// `runtime` is the runtime driving this call.
    async fn main(
        &self,
        runtime: Handle,
        stdout: OutputStream,
        stderr: OutputStream,
        options: Options<Self::Schema>,
    ) -> Result<()>;
}

/// Parses the command line for a [`Script`] and runs it.
#[derive(Debug)]
pub struct ScriptRunner<S> {
    script: S,
    stdout: OutputStream,
    stderr: OutputStream,
    sys_module: ProcessContext,
}

impl<S: Script> ScriptRunner<S> {
    /// Create a runner for `script` using the streams of `sys_module`.
    pub fn new(script: S, sys_module: ProcessContext) -> Self {
        Self {
            script,
            stdout: sys_module.stdout().clone(),
            stderr: sys_module.stderr().clone(),
            sys_module,
        }
    }

    /// Write normal output to `stdout` instead.
    #[must_use]
    pub fn with_stdout(mut self, stdout: OutputStream) -> Self {
        self.stdout = stdout;
        self
    }

    /// Write diagnostics to `stderr` instead.
    #[must_use]
    pub fn with_stderr(mut self, stderr: OutputStream) -> Self {
        self.stderr = stderr;
        self
    }

    /// The script being run.
    pub const fn script(&self) -> &S {
        &self.script
    }

    /// The output stream.
    pub const fn stdout(&self) -> &OutputStream {
        &self.stdout
    }

    /// The error stream.
    pub const fn stderr(&self) -> &OutputStream {
        &self.stderr
    }

    /// The system context.
    pub const fn sys_module(&self) -> &ProcessContext {
        &self.sys_module
    }

    /// Parse `arguments`, or the context's arguments when `None`, and run the
    /// script's main routine.
    ///
    /// # Errors
    ///
    /// Returns the main routine's error unchanged, or an error when a
    /// diagnostic could not be written.
    pub fn main(&self, arguments: Option<Vec<OsString>>) -> Result<SystemExit> {
        let arguments = arguments.unwrap_or_else(|| self.sys_module.arguments().to_vec());

        let exit = match self.parse_options(arguments) {
            Ok(options) => {
                self.react(options)?;
                SystemExit::success()
            },
            Err(interrupt) => interrupt.into_exit()?,
        };

        debug!(%exit, "script finished");
        Ok(exit)
    }

    /// Build the script's options with this runner's streams and parse
    /// `arguments` into them.
    ///
    /// A usage error is reported on stderr as the help text followed by
    /// `ERROR: <message>`, then returned.
    pub fn parse_options(
        &self,
        arguments: Vec<OsString>,
    ) -> Result<Options<S::Schema>, ParseInterrupt> {
        let options =
            self.script
                .options(&self.sys_module, self.stdout.clone(), self.stderr.clone());

        match options.parse_options(arguments) {
            Err(ParseInterrupt::Usage(error)) => {
                debug!(%error, "usage error");
                let report = format!("{}ERROR: {error}\n", options.help_text());
                self.stderr.write_text(&report)?;
                Err(ParseInterrupt::Usage(error))
            },
            result => result,
        }
    }

    fn react(&self, options: Options<S::Schema>) -> Result<()> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let handle = runtime.handle().clone();
        let level = options.verbosity_level();
        debug!(
            verbosity = %level,
            verbose = level.is_verbose(),
            "dispatching to main routine"
        );
        runtime.block_on(self.script.main(
            handle,
            self.stdout.clone(),
            self.stderr.clone(),
            options,
        ))
    }
}
