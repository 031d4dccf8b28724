//! Storage factory for creating table store instances

use std::sync::Arc;

use super::backends::{AirtableClient, FileTableStore, MemoryTableStore};
use super::config::{BackendConfig, TableNames};
use super::error::StorageResult;
use super::traits::TableStore;

/// Factory for creating table stores
pub struct StorageFactory;

impl StorageFactory {
    /// Create a table store from explicit configuration
    pub async fn from_config(
        backend: &BackendConfig,
        tables: &TableNames,
    ) -> StorageResult<Arc<dyn TableStore>> {
        match backend {
            BackendConfig::File(config) => {
                let store = FileTableStore::new(config).await?;
                Ok(Arc::new(store))
            }
            BackendConfig::Airtable(config) => {
                let client = AirtableClient::new(config, tables)?;
                Ok(Arc::new(client))
            }
            BackendConfig::Memory(config) => {
                Ok(Arc::new(MemoryTableStore::from_memory_config(config)))
            }
        }
    }
}
