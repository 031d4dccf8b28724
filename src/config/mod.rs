use serde::{Deserialize, Serialize};

pub mod loader;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE};

use crate::error::{ErrorCode, JobError};
use crate::storage::{BackendConfig, TableNames, MAX_RECORDS_PER_WRITE};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "RECURRING_ORDERS_";

/// Job configuration, read from TOML and then overridden from the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Tracing filter directive, e.g. `info` or `recurring_orders=debug`
    #[serde(default)]
    pub log_level: Option<String>,

    /// Records per write call, at most the store's hard limit
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default)]
    pub tables: TableNames,

    #[serde(default)]
    pub backend: BackendConfig,
}

fn default_batch_size() -> usize {
    MAX_RECORDS_PER_WRITE
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            batch_size: default_batch_size(),
            tables: TableNames::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl JobConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, JobError> {
        toml::from_str(content).map_err(|e| {
            JobError::config_with_code(ErrorCode::CONFIG_PARSE_ERROR, "Invalid configuration file")
                .with_source(e)
        })
    }

    /// Apply overrides from the process environment
    pub fn merge_env_vars(&mut self) -> Result<(), JobError> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// A batch size that is not a number is rejected.
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<(), JobError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(log_level) = var("LOG_LEVEL") {
            self.log_level = Some(log_level);
        }

        if let Some(batch_size) = var("BATCH_SIZE") {
            self.batch_size = batch_size.trim().parse::<usize>().map_err(|e| {
                JobError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("{}BATCH_SIZE must be a number, got {:?}", ENV_PREFIX, batch_size),
                )
                .with_source(e)
            })?;
        }

        if let BackendConfig::Airtable(airtable) = &mut self.backend {
            if let Some(api_key) = var("API_KEY") {
                airtable.api_key = Some(api_key);
            }
            if let Some(base_id) = var("BASE_ID") {
                airtable.base_id = base_id;
            }
        }

        Ok(())
    }

    /// Check values the store or the job cannot work with
    pub fn validate(&self) -> Result<(), JobError> {
        if self.batch_size == 0 || self.batch_size > MAX_RECORDS_PER_WRITE {
            return Err(JobError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!(
                    "batch_size must be between 1 and {}, got {}",
                    MAX_RECORDS_PER_WRITE, self.batch_size
                ),
            ));
        }

        if self.tables.orders.is_empty() || self.tables.deliveries.is_empty() {
            return Err(JobError::config_with_code(
                ErrorCode::CONFIG_MISSING_REQUIRED,
                "table names must not be empty",
            ));
        }

        match &self.backend {
            BackendConfig::File(file) => {
                if file.orders_path.as_os_str().is_empty()
                    || file.deliveries_path.as_os_str().is_empty()
                {
                    return Err(JobError::config_with_code(
                        ErrorCode::CONFIG_MISSING_REQUIRED,
                        "file backend needs orders_path and deliveries_path",
                    ));
                }
            }
            BackendConfig::Airtable(airtable) => {
                if airtable.base_id.is_empty() {
                    return Err(JobError::config_with_code(
                        ErrorCode::CONFIG_MISSING_REQUIRED,
                        format!("airtable backend needs base_id (or {}BASE_ID)", ENV_PREFIX),
                    ));
                }
                if airtable.api_key.as_deref().map_or(true, str::is_empty) {
                    return Err(JobError::config_with_code(
                        ErrorCode::CONFIG_MISSING_REQUIRED,
                        format!("airtable backend needs an API key ({}API_KEY)", ENV_PREFIX),
                    ));
                }
            }
            BackendConfig::Memory(_) => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AirtableConfig, BackendType, FileConfig};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = JobConfig::from_toml_str("").unwrap();
        assert_eq!(config, JobConfig::default());
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.backend.backend_type(), BackendType::File);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_file_config() {
        let config = JobConfig::from_toml_str(
            r#"
            log_level = "debug"
            batch_size = 25

            [tables]
            orders = "Standing orders"

            [backend]
            type = "file"
            orders_path = "data/orders.json"
            deliveries_path = "data/deliveries.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.tables.orders, "Standing orders");
        assert_eq!(config.tables.deliveries, "Deliveries");
        assert_eq!(
            config.backend,
            BackendConfig::File(FileConfig {
                orders_path: PathBuf::from("data/orders.json"),
                deliveries_path: PathBuf::from("data/deliveries.json"),
            })
        );
    }

    #[test]
    fn test_parse_error_code() {
        let err = JobConfig::from_toml_str("batch_size = \"lots\"").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_PARSE_ERROR);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_batch_size_bounds() {
        for bad in [0, 51, 1000] {
            let config = JobConfig {
                batch_size: bad,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
        }
        for good in [1, 10, 50] {
            let config = JobConfig {
                batch_size: good,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_merge_env_overrides() {
        let mut config = JobConfig {
            backend: BackendConfig::Airtable(AirtableConfig::default()),
            ..Default::default()
        };

        config.merge_env_from(env(&[
            ("RECURRING_ORDERS_LOG_LEVEL", "trace"),
            ("RECURRING_ORDERS_BATCH_SIZE", "10"),
            ("RECURRING_ORDERS_API_KEY", "patSecret"),
            ("RECURRING_ORDERS_BASE_ID", "appEnv"),
        ]))
        .unwrap();

        assert_eq!(config.log_level.as_deref(), Some("trace"));
        assert_eq!(config.batch_size, 10);
        let BackendConfig::Airtable(airtable) = &config.backend else {
            panic!("expected airtable backend");
        };
        assert_eq!(airtable.api_key.as_deref(), Some("patSecret"));
        assert_eq!(airtable.base_id, "appEnv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_env_rejects_unparseable_batch_size() {
        let mut config = JobConfig::default();
        let err = config
            .merge_env_from(env(&[("RECURRING_ORDERS_BATCH_SIZE", "many")]))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("RECURRING_ORDERS_BATCH_SIZE"));
        assert_eq!(config.batch_size, 50);
    }

    #[test]
    fn test_airtable_requires_credentials() {
        let config = JobConfig {
            backend: BackendConfig::Airtable(AirtableConfig {
                base_id: "appBase".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_MISSING_REQUIRED);
        assert!(err.to_string().contains("API key"));
    }
}
