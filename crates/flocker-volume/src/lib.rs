//! # flocker-volume
//!
//! The `flocker-volume` command. [`VolumeScript`] binds [`VolumeOptions`]
//! (the standard options plus `--config`) to the [`VolumeService`] main
//! routine; the binary runs it through [`flocker_script::ScriptRunner`].

/// Volume service errors
pub mod error;
/// `flocker-volume` command-line options
pub mod options;
/// The script binding
pub mod script;
/// Volume configuration service
pub mod service;

pub use error::VolumeError;
pub use options::{DEFAULT_CONFIG_PATH, VolumeOptions};
pub use script::VolumeScript;
pub use service::{VolumeConfig, VolumeService};
