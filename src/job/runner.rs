//! Expansion run over every recurring order
//!
//! A run has two phases. Planning classifies every order up front, so a
//! data-integrity problem anywhere in the table stops the run before the
//! first write. Execution then walks the plan in table order, expanding and
//! writing one order at a time.

use tracing::{debug, info, warn};

use super::batch::{effective_batch_size, write_in_batches};
use crate::error::JobError;
use crate::orders::{build_deliveries, classify, MissingField, OrderDisposition, OrderRecord, RecordId};
use crate::storage::{DeliverySink, OrderSource, TableStore, MAX_RECORDS_PER_WRITE};

/// An order paired with the decision made about it
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedOrder {
    pub order_id: RecordId,
    pub name: String,
    pub disposition: OrderDisposition,
}

/// What happened to one order during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    AlreadyExpanded {
        order_id: RecordId,
    },
    Skipped {
        order_id: RecordId,
        name: String,
        missing: MissingField,
    },
    Expanded {
        order_id: RecordId,
        name: String,
        created: usize,
    },
}

/// Per-order outcomes of a completed run, in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<OrderOutcome>,
}

impl RunReport {
    pub fn orders_seen(&self) -> usize {
        self.outcomes.len()
    }

    /// Total deliveries written
    pub fn deliveries_created(&self) -> usize {
        self.outcomes
            .iter()
            .map(|outcome| match outcome {
                OrderOutcome::Expanded { created, .. } => *created,
                _ => 0,
            })
            .sum()
    }

    pub fn expanded(&self) -> usize {
        self.count(|o| matches!(o, OrderOutcome::Expanded { .. }))
    }

    pub fn already_expanded(&self) -> usize {
        self.count(|o| matches!(o, OrderOutcome::AlreadyExpanded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, OrderOutcome::Skipped { .. }))
    }

    /// Warning lines emitted for skipped orders
    pub fn warnings(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                OrderOutcome::Skipped { name, missing, .. } => Some(missing.skip_message(name)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&OrderOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Classify every order, failing on the first unreadable one
pub fn plan_run(orders: &[OrderRecord]) -> Result<Vec<PlannedOrder>, JobError> {
    orders
        .iter()
        .map(|order| {
            let disposition = classify(order)
                .map_err(|e| JobError::data_integrity(order.display_name(), e))?;
            Ok(PlannedOrder {
                order_id: order.id.clone(),
                name: order.display_name().to_string(),
                disposition,
            })
        })
        .collect()
}

/// Expands recurring orders into deliveries
pub struct RecurringOrderJob<'a> {
    source: &'a dyn OrderSource,
    sink: &'a dyn DeliverySink,
    batch_size: usize,
}

impl<'a> RecurringOrderJob<'a> {
    pub fn new(source: &'a dyn OrderSource, sink: &'a dyn DeliverySink) -> Self {
        Self {
            source,
            sink,
            batch_size: MAX_RECORDS_PER_WRITE,
        }
    }

    /// Read and write through the same store
    pub fn from_store(store: &'a dyn TableStore) -> Self {
        Self::new(store.order_source(), store.delivery_sink())
    }

    /// Upper bound on records per write call; the sink's own limit still applies
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Run the expansion once over every order
    pub async fn run(&self) -> Result<RunReport, JobError> {
        let orders = self.source.list_orders().await?;
        debug!("Loaded {} recurring orders", orders.len());

        let plan = plan_run(&orders)?;
        let limit = effective_batch_size(self.batch_size, self.sink);
        debug!("Writing deliveries in batches of up to {}", limit);

        let mut report = RunReport::default();
        for planned in plan {
            let outcome = self.execute(planned, limit).await?;
            report.outcomes.push(outcome);
        }

        info!("Done!");
        Ok(report)
    }

    async fn execute(&self, planned: PlannedOrder, limit: usize) -> Result<OrderOutcome, JobError> {
        let PlannedOrder {
            order_id,
            name,
            disposition,
        } = planned;

        match disposition {
            OrderDisposition::AlreadyExpanded => {
                debug!("\"{}\" already has deliveries", name);
                Ok(OrderOutcome::AlreadyExpanded { order_id })
            }
            OrderDisposition::Missing(missing) => {
                warn!("{}", missing.skip_message(&name));
                Ok(OrderOutcome::Skipped {
                    order_id,
                    name,
                    missing,
                })
            }
            OrderDisposition::Ready(scheduled) => {
                let deliveries = build_deliveries(&scheduled);
                info!("Creating {} deliveries for \"{}\".", deliveries.len(), name);

                let ids = write_in_batches(self.sink, deliveries, limit)
                    .await
                    .map_err(|e| JobError::from(e).with_context(format!("order \"{}\"", name)))?;

                Ok(OrderOutcome::Expanded {
                    order_id,
                    name,
                    created: ids.len(),
                })
            }
        }
    }
}
