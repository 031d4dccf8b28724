//! In-memory table store for testing

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::orders::{DeliveryRecord, OrderRecord, RecordId, StoredDelivery};
use crate::storage::{
    config::MemoryConfig,
    error::{StorageError, StorageResult},
    traits::{DeliverySink, OrderSource, TableStore},
    MAX_RECORDS_PER_WRITE,
};

/// In-memory orders and deliveries tables
///
/// Creating a delivery also links it back onto its order, the way a linked
/// record field behaves in the real store. Every write call is recorded so
/// tests can inspect batch sizes.
pub struct MemoryTableStore {
    orders: Arc<RwLock<Vec<OrderRecord>>>,
    deliveries: Arc<RwLock<Vec<StoredDelivery>>>,
    write_calls: Arc<RwLock<Vec<usize>>>,
    max_batch_size: usize,
    fail_on_write_call: Option<usize>,
    next_id: AtomicUsize,
}

impl MemoryTableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_orders(Vec::new())
    }

    /// Create a store seeded with orders
    pub fn with_orders(orders: Vec<OrderRecord>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
            deliveries: Arc::new(RwLock::new(Vec::new())),
            write_calls: Arc::new(RwLock::new(Vec::new())),
            max_batch_size: MAX_RECORDS_PER_WRITE,
            fail_on_write_call: None,
            next_id: AtomicUsize::new(1),
        }
    }

    /// Create a store from configuration
    pub fn from_memory_config(config: &MemoryConfig) -> Self {
        Self::with_orders(config.orders.clone())
    }

    /// Lower the per-call write limit
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Fail the n-th write call (1-based) with a transport error
    pub fn failing_on_write_call(mut self, call: usize) -> Self {
        self.fail_on_write_call = Some(call);
        self
    }

    /// Snapshot of the deliveries table
    pub async fn deliveries(&self) -> Vec<StoredDelivery> {
        self.deliveries.read().await.clone()
    }

    /// Snapshot of the orders table
    pub async fn orders(&self) -> Vec<OrderRecord> {
        self.orders.read().await.clone()
    }

    /// Size of every write call received, including a failed one
    pub async fn write_calls(&self) -> Vec<usize> {
        self.write_calls.read().await.clone()
    }
}

impl Default for MemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderSource for MemoryTableStore {
    async fn list_orders(&self) -> StorageResult<Vec<OrderRecord>> {
        Ok(self.orders.read().await.clone())
    }
}

#[async_trait]
impl DeliverySink for MemoryTableStore {
    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    async fn create_deliveries(&self, batch: Vec<DeliveryRecord>) -> StorageResult<Vec<RecordId>> {
        let call_number = {
            let mut calls = self.write_calls.write().await;
            calls.push(batch.len());
            calls.len()
        };

        if self.fail_on_write_call == Some(call_number) {
            return Err(StorageError::request(format!(
                "simulated failure on write call {}",
                call_number
            )));
        }

        if batch.len() > self.max_batch_size {
            return Err(StorageError::BatchTooLarge {
                size: batch.len(),
                limit: self.max_batch_size,
            });
        }

        let mut deliveries = self.deliveries.write().await;
        let mut orders = self.orders.write().await;
        let mut ids = Vec::with_capacity(batch.len());

        for record in batch {
            let id = format!("recMem{:06}", self.next_id.fetch_add(1, Ordering::Relaxed));

            if let Some(order) = orders.iter_mut().find(|o| o.id == record.recurring_order) {
                order
                    .fields
                    .deliveries
                    .get_or_insert_with(Vec::new)
                    .push(json!({ "id": id }));
            }

            deliveries.push(StoredDelivery {
                id: id.clone(),
                fields: record,
            });
            ids.push(id);
        }

        Ok(ids)
    }
}

impl TableStore for MemoryTableStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn order_source(&self) -> &dyn OrderSource {
        self
    }

    fn delivery_sink(&self) -> &dyn DeliverySink {
        self
    }
}
