//! Verbosity levels derived from the `-v`/`--verbose` counter.
//!
//! | Count | Level | Log filter |
//! |-------|-------|------------|
//! | 0 | `Normal` | warnings and errors |
//! | 1 | `Verbose` | adds info |
//! | 2 | `Debug` | adds debug |
//! | 3+ | `Trace` | everything |

use std::fmt;

use tracing::Level;

/// Verbosity level requested on the command line.
///
/// Levels are ordered from quietest to most verbose:
/// `Normal < Verbose < Debug < Trace`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// No `-v` given.
    #[default]
    Normal,

    /// One `-v`.
    Verbose,

    /// Two `-v`.
    Debug,

    /// Three or more.
    Trace,
}

impl Verbosity {
    /// Map a flag count to a level. Counts past three stay at `Trace`.
    #[must_use]
    pub const fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// The most detailed `tracing` level enabled at this verbosity.
    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Check if verbose output should be shown.
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}
