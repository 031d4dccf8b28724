//! File-based table store
//!
//! Each table is a JSON array on disk. Deliveries are appended by rewriting
//! the deliveries document; the orders document is patched at the same time
//! so new deliveries show up in each order's `Deliveries` cell. Order rows
//! are handled as raw JSON so columns this crate does not model survive.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::orders::{DeliveryRecord, OrderRecord, RecordId, StoredDelivery};
use crate::storage::{
    config::FileConfig,
    error::{StorageError, StorageResult},
    traits::{DeliverySink, OrderSource, TableStore},
};

/// File-based table store
pub struct FileTableStore {
    config: FileConfig,
    write_lock: Mutex<()>,
}

impl FileTableStore {
    /// Create a store over the configured paths
    ///
    /// The orders document must exist; the deliveries document is created on
    /// first write.
    pub async fn new(config: &FileConfig) -> StorageResult<Self> {
        if fs::metadata(&config.orders_path).await.is_err() {
            return Err(StorageError::not_found(format!(
                "orders file {}",
                config.orders_path.display()
            )));
        }

        Ok(Self {
            config: config.clone(),
            write_lock: Mutex::new(()),
        })
    }

    pub fn orders_path(&self) -> &Path {
        &self.config.orders_path
    }

    pub fn deliveries_path(&self) -> &Path {
        &self.config.deliveries_path
    }

    /// Read a JSON array, treating a missing file as empty
    async fn read_table<T: DeserializeOwned>(path: &Path) -> StorageResult<Vec<T>> {
        match fs::read_to_string(path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                StorageError::serialization(format!("{}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    /// Write a JSON array to the document's temporary file
    ///
    /// Returns the temporary path; the caller renames it into place.
    async fn stage_table<T: Serialize>(path: &Path, rows: &[T]) -> StorageResult<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(rows)?;
        let tmp = temp_path(path);
        fs::write(&tmp, content).await?;
        Ok(tmp)
    }
}

/// Append a delivery link to the order row with `order_id`
///
/// Every other key of the row is left as it was.
fn link_delivery(orders: &mut [Value], order_id: &str, delivery_id: &str) {
    let Some(row) = orders
        .iter_mut()
        .find(|row| row.get("id").and_then(Value::as_str) == Some(order_id))
    else {
        return;
    };
    let Some(row) = row.as_object_mut() else {
        return;
    };

    let fields = row
        .entry("fields")
        .or_insert_with(|| Value::Object(Default::default()));
    let Some(fields) = fields.as_object_mut() else {
        return;
    };

    let cell = fields
        .entry("Deliveries")
        .or_insert_with(|| Value::Array(Vec::new()));
    if !cell.is_array() {
        *cell = Value::Array(Vec::new());
    }
    if let Value::Array(links) = cell {
        links.push(json!({ "id": delivery_id }));
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn new_record_id() -> RecordId {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("rec{}", &uuid[..14])
}

#[async_trait]
impl OrderSource for FileTableStore {
    async fn list_orders(&self) -> StorageResult<Vec<OrderRecord>> {
        let orders = Self::read_table(&self.config.orders_path).await?;
        debug!(
            "Read {} orders from {}",
            orders.len(),
            self.config.orders_path.display()
        );
        Ok(orders)
    }
}

#[async_trait]
impl DeliverySink for FileTableStore {
    async fn create_deliveries(&self, batch: Vec<DeliveryRecord>) -> StorageResult<Vec<RecordId>> {
        let _guard = self.write_lock.lock().await;

        let mut deliveries: Vec<StoredDelivery> =
            Self::read_table(&self.config.deliveries_path).await?;
        let mut orders: Vec<Value> = Self::read_table(&self.config.orders_path).await?;
        let mut ids = Vec::with_capacity(batch.len());

        for record in batch {
            let id = new_record_id();
            link_delivery(&mut orders, &record.recurring_order, &id);
            deliveries.push(StoredDelivery {
                id: id.clone(),
                fields: record,
            });
            ids.push(id);
        }

        // Both documents are staged before either is replaced, and the order
        // links land first: a failure can leave links without deliveries,
        // never deliveries without links.
        let orders_tmp = Self::stage_table(&self.config.orders_path, &orders).await?;
        let deliveries_tmp = Self::stage_table(&self.config.deliveries_path, &deliveries).await?;
        fs::rename(&orders_tmp, &self.config.orders_path).await?;
        fs::rename(&deliveries_tmp, &self.config.deliveries_path).await?;

        debug!(
            "Appended {} deliveries to {}",
            ids.len(),
            self.config.deliveries_path.display()
        );
        Ok(ids)
    }
}

impl TableStore for FileTableStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    fn order_source(&self) -> &dyn OrderSource {
        self
    }

    fn delivery_sink(&self) -> &dyn DeliverySink {
        self
    }
}
