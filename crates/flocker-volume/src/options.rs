//! Command-line options for `flocker-volume`.

use std::path::PathBuf;

use clap::Args;
use flocker_script::OptionSchema;

/// Where the volume configuration lives unless `--config` says otherwise.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/flocker/volume.json";

/// Options accepted by `flocker-volume`.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct VolumeOptions {
    /// The config file to use
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

impl OptionSchema for VolumeOptions {
    const NAME: &'static str = "flocker-volume";
}
