//! Core trait definitions for the table store layer

use async_trait::async_trait;

use super::error::StorageResult;
use super::MAX_RECORDS_PER_WRITE;
use crate::orders::{DeliveryRecord, OrderRecord, RecordId};

/// Read access to the recurring orders table
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Every order in table order
    async fn list_orders(&self) -> StorageResult<Vec<OrderRecord>>;
}

/// Append-only access to the deliveries table
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Largest batch a single `create_deliveries` call accepts
    fn max_batch_size(&self) -> usize {
        MAX_RECORDS_PER_WRITE
    }

    /// Create one batch of deliveries, returning the assigned ids in order
    async fn create_deliveries(&self, batch: Vec<DeliveryRecord>) -> StorageResult<Vec<RecordId>>;
}

/// A table store holding both tables
pub trait TableStore: Send + Sync {
    /// Short backend name for log lines
    fn backend_name(&self) -> &'static str;

    fn order_source(&self) -> &dyn OrderSource;

    fn delivery_sink(&self) -> &dyn DeliverySink;
}
