//! Table store configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::orders::OrderRecord;

/// Backend type, used in log lines and env overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    File,
    Airtable,
    Memory,
}

/// Backend-specific configuration, selected by the `type` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    File(FileConfig),
    Airtable(AirtableConfig),
    Memory(MemoryConfig),
}

impl BackendConfig {
    pub fn backend_type(&self) -> BackendType {
        match self {
            BackendConfig::File(_) => BackendType::File,
            BackendConfig::Airtable(_) => BackendType::Airtable,
            BackendConfig::Memory(_) => BackendType::Memory,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::File(FileConfig::default())
    }
}

/// Table names in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNames {
    #[serde(default = "default_orders_table")]
    pub orders: String,
    #[serde(default = "default_deliveries_table")]
    pub deliveries: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            orders: default_orders_table(),
            deliveries: default_deliveries_table(),
        }
    }
}

/// JSON documents on local disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// JSON array of order records
    #[serde(default = "default_orders_path")]
    pub orders_path: PathBuf,

    /// JSON array of delivery records, created on first write
    #[serde(default = "default_deliveries_path")]
    pub deliveries_path: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            orders_path: default_orders_path(),
            deliveries_path: default_deliveries_path(),
        }
    }
}

/// Airtable REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirtableConfig {
    /// Base identifier (`app...`)
    #[serde(default)]
    pub base_id: String,

    /// Personal access token; usually supplied through the environment
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// API root
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,

    /// Retries for rate-limited requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff between rate-limited retries
    #[serde(with = "humantime_serde", default = "default_retry_delay")]
    pub retry_delay: Duration,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            base_id: String::new(),
            api_key: None,
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
        }
    }
}

/// In-process tables seeded from configuration (for testing and dry runs)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
}

fn default_orders_table() -> String {
    "Recurring orders".to_string()
}

fn default_deliveries_table() -> String {
    "Deliveries".to_string()
}

fn default_orders_path() -> PathBuf {
    PathBuf::from("orders.json")
}

fn default_deliveries_path() -> PathBuf {
    PathBuf::from("deliveries.json")
}

fn default_endpoint() -> String {
    "https://api.airtable.com/v0".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> Duration {
    Duration::from_secs(1)
}
