//! # flocker-script
//!
//! Bootstrapping for flocker command-line scripts.
//!
//! A script is a type implementing [`Script`]: it names an option schema and
//! provides an async main routine. [`ScriptRunner`] turns it into a process
//! with the same behavior for every command:
//!
//! - **Standard options**: `--version` and a repeatable `-v`/`--verbose`, added
//!   to any schema by [`standard_options`]
//! - **Injectable streams**: output goes through [`OutputStream`] handles taken
//!   from an explicit [`ProcessContext`], so tests can capture it
//! - **Exit codes**: usage errors print the help text and `ERROR: <message>` to
//!   stderr and exit with 1; success, `--version` and `--help` exit with 0
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use anyhow::Result;
//! use async_trait::async_trait;
//! use clap::Args;
//! use flocker_script::{OptionSchema, Options, OutputStream, ProcessContext, Script, ScriptRunner};
//! use tokio::runtime::Handle;
//!
//! #[derive(Args, Debug)]
//! struct GreetOptions {
//!     #[arg(long, default_value = "world")]
//!     name: String,
//! }
//!
//! impl OptionSchema for GreetOptions {
//!     const NAME: &'static str = "greet";
//! }
//!
//! struct Greet;
//!
//! #[async_trait]
//! impl Script for Greet {
//!     type Schema = GreetOptions;
//!
//!     async fn main(
//!         &self,
//!         _runtime: Handle,
//!         stdout: OutputStream,
//!         _stderr: OutputStream,
//!         options: Options<GreetOptions>,
//!     ) -> Result<()> {
//!         stdout.write_text(&format!("hello {}\n", options.name))?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<std::process::ExitCode> {
//!     Ok(ScriptRunner::new(Greet, ProcessContext::current()).main(None)?.into())
//! }
//! ```

/// Process context and injectable output streams
pub mod context;
/// Usage errors and exit statuses
pub mod error;
/// Logging setup driven by the verbosity counter
pub mod logging;
/// Standard options and option parsing
pub mod options;
/// The script runner
pub mod runner;
/// Verbosity levels
pub mod verbosity;

pub use context::{OutputStream, ProcessContext};
pub use error::{ExitCategory, ParseInterrupt, SystemExit, UsageError};
pub use logging::initialize_logging;
pub use options::{OptionSchema, Options, StandardOptions, standard_options};
pub use runner::{Script, ScriptRunner};
pub use verbosity::Verbosity;

/// Version string printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
