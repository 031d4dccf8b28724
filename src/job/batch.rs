//! Batching of delivery writes
//!
//! The table store caps how many records one create call may carry, so
//! payloads are split into ordered chunks and written one chunk at a time.

use tracing::debug;

use crate::orders::{DeliveryRecord, RecordId};
use crate::storage::{DeliverySink, StorageResult};

/// Split items into consecutive chunks of at most `limit`
///
/// Chunks keep the original order and only the last one may be short.
/// A limit of zero is treated as one.
///
/// # Examples
///
/// ```
/// use recurring_orders::job::batch::chunk_records;
///
/// let chunks = chunk_records((1..=5).collect::<Vec<_>>(), 2);
/// assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn chunk_records<T>(records: Vec<T>, limit: usize) -> Vec<Vec<T>> {
    let limit = limit.max(1);
    let mut chunks = Vec::with_capacity(records.len().div_ceil(limit));
    let mut remaining = records.into_iter().peekable();

    while remaining.peek().is_some() {
        chunks.push(remaining.by_ref().take(limit).collect());
    }

    chunks
}

/// Effective per-call limit: the configured size, capped by what the sink accepts
pub fn effective_batch_size(configured: usize, sink: &dyn DeliverySink) -> usize {
    configured.min(sink.max_batch_size()).max(1)
}

/// Write deliveries in chunks, awaiting each call before sending the next
///
/// The first failed call aborts the remaining chunks. Returns the ids the
/// store assigned, in payload order.
pub async fn write_in_batches(
    sink: &dyn DeliverySink,
    records: Vec<DeliveryRecord>,
    limit: usize,
) -> StorageResult<Vec<RecordId>> {
    let mut created = Vec::with_capacity(records.len());
    let chunks = chunk_records(records, limit);
    let total = chunks.len();

    for (index, chunk) in chunks.into_iter().enumerate() {
        debug!("Writing batch {}/{} ({} records)", index + 1, total, chunk.len());
        let ids = sink.create_deliveries(chunk).await?;
        created.extend(ids);
    }

    Ok(created)
}
