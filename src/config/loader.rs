use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::JobConfig;
use crate::error::{ErrorCode, JobError};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "recurring-orders.toml";

/// Resolves and reads the job configuration
pub struct ConfigLoader {
    working_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `recurring-orders.toml` in
    /// the working directory is used when present, otherwise defaults.
    /// Environment overrides apply in every case. Relative file backend paths
    /// resolve against the config file's directory.
    pub async fn load(&self, explicit: Option<&Path>) -> Result<JobConfig, JobError> {
        let (mut config, base_dir) = match explicit {
            Some(path) => {
                let path = self.resolve(path);
                if fs::metadata(&path).await.is_err() {
                    return Err(JobError::config_with_code(
                        ErrorCode::CONFIG_NOT_FOUND,
                        format!("Configuration file not found: {}", path.display()),
                    ));
                }
                (Self::read(&path).await?, parent_dir(&path))
            }
            None => {
                let path = self.working_dir.join(DEFAULT_CONFIG_FILE);
                if fs::metadata(&path).await.is_ok() {
                    (Self::read(&path).await?, parent_dir(&path))
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    (JobConfig::default(), self.working_dir.clone())
                }
            }
        };

        config.merge_env_vars()?;
        resolve_backend_paths(&mut config, &base_dir);
        Ok(config)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    async fn read(path: &Path) -> Result<JobConfig, JobError> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path).await.map_err(|e| {
            JobError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                format!("Cannot read {}", path.display()),
            )
            .with_source(e)
        })?;
        JobConfig::from_toml_str(&content).map_err(|e| e.with_context(path.display()))
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn resolve_backend_paths(config: &mut JobConfig, base_dir: &Path) {
    if let crate::storage::BackendConfig::File(file) = &mut config.backend {
        for path in [&mut file.orders_path, &mut file.deliveries_path] {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }
}
