//! Usage errors and exit statuses.
//!
//! Only malformed command lines are translated at this layer. Everything a
//! script's main routine fails with travels as an [`anyhow::Error`] and is left
//! to the binary's entry point.
//!
//! # Exit Codes
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | `Success` | Command completed, or `--version`/`--help` was handled |
//! | 1 | `Usage` | Invalid arguments |

use std::fmt;
use std::io;
use std::process::ExitCode;

use thiserror::Error;

/// A recoverable fault caused by malformed command-line input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct UsageError {
    message: String,
}

impl UsageError {
    /// Create a usage error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&clap::Error> for UsageError {
    /// Keep the opening paragraph of clap's rendered error on a single line,
    /// without its `error: ` prefix. The usage synopsis and `--help` hint that
    /// follow it are dropped.
    fn from(err: &clap::Error) -> Self {
        let rendered = err.to_string();
        let message = rendered
            .lines()
            .map(str::trim)
            .take_while(|line| !line.is_empty() && !line.starts_with("Usage:"))
            .collect::<Vec<_>>()
            .join(" ");
        let message = message.strip_prefix("error: ").unwrap_or(&message);
        Self::new(message)
    }
}

impl From<clap::Error> for UsageError {
    fn from(err: clap::Error) -> Self {
        Self::from(&err)
    }
}

/// Why option parsing stopped before producing parsed options.
#[derive(Debug, Error)]
pub enum ParseInterrupt {
    /// `--version` was given; the version string has been written.
    #[error("version requested")]
    Version,

    /// `--help` was given; the help text has been written.
    #[error("help requested")]
    Help,

    /// The arguments could not be parsed or failed validation.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Writing to one of the injected streams failed.
    #[error("failed to write option output: {0}")]
    Io(#[from] io::Error),
}

impl ParseInterrupt {
    /// The exit status this interruption terminates the process with.
    ///
    /// Stream failures are not an exit status and come back as errors.
    pub fn into_exit(self) -> io::Result<SystemExit> {
        match self {
            Self::Version | Self::Help => Ok(SystemExit::success()),
            Self::Usage(_) => Ok(SystemExit::usage()),
            Self::Io(err) => Err(err),
        }
    }
}

/// Category of a handled termination, determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExitCategory {
    /// Normal completion (exit code 0).
    Success = 0,

    /// Invalid arguments (exit code 1).
    Usage = 1,
}

impl ExitCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage error",
        }
    }
}

impl fmt::Display for ExitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// The termination a script run ends with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemExit {
    category: ExitCategory,
}

impl SystemExit {
    /// Exit with code 0.
    pub const fn success() -> Self {
        Self {
            category: ExitCategory::Success,
        }
    }

    /// Exit with the usage-error code.
    pub const fn usage() -> Self {
        Self {
            category: ExitCategory::Usage,
        }
    }

    /// The category of this exit.
    pub const fn category(self) -> ExitCategory {
        self.category
    }

    /// The numeric exit code.
    pub const fn code(self) -> u8 {
        self.category.exit_code()
    }
}

impl From<SystemExit> for ExitCode {
    fn from(exit: SystemExit) -> Self {
        Self::from(exit.code())
    }
}

impl fmt::Display for SystemExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exit {} ({})", self.code(), self.category)
    }
}
