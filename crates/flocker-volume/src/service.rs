//! The node's volume service.
//!
//! Starting the service makes sure the node has a volume configuration: an
//! existing config file is loaded, and a missing one is created with a fresh
//! node UUID so later runs report the same identity.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, VolumeError};

/// Persisted volume configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Identity of this node's volume manager.
    pub uuid: Uuid,
}

/// Volume service bound to a config file.
#[derive(Clone, Debug)]
pub struct VolumeService {
    config_path: PathBuf,
}

impl VolumeService {
    /// Create a service using the config at `config_path`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Path of the config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config, creating it first if it does not exist.
    pub async fn start(&self) -> Result<VolumeConfig> {
        match fs::read(&self.config_path).await {
            Ok(bytes) => {
                let config: VolumeConfig =
                    serde_json::from_slice(&bytes).map_err(|source| {
                        VolumeError::InvalidConfig {
                            path: self.config_path.clone(),
                            source,
                        }
                    })?;
                debug!(path = %self.config_path.display(), uuid = %config.uuid, "loaded volume config");
                Ok(config)
            },
            Err(err) if err.kind() == ErrorKind::NotFound => self.create().await,
            Err(err) => Err(VolumeError::io(&self.config_path, err)),
        }
    }

    async fn create(&self) -> Result<VolumeConfig> {
        if let Some(parent) = self
            .config_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| VolumeError::io(parent, err))?;
        }

        let config = VolumeConfig {
            uuid: Uuid::new_v4(),
        };
        let json = serde_json::to_vec(&config).map_err(|source| VolumeError::InvalidConfig {
            path: self.config_path.clone(),
            source,
        })?;
        fs::write(&self.config_path, json)
            .await
            .map_err(|err| VolumeError::io(&self.config_path, err))?;

        info!(path = %self.config_path.display(), uuid = %config.uuid, "created volume config");
        Ok(config)
    }
}
