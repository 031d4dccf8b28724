//! The recurring order expansion job
//!
//! - `batch` - chunking and sequential batch writes
//! - `runner` - planning and executing a run over every order

pub mod batch;
pub mod runner;

pub use batch::{chunk_records, effective_batch_size, write_in_batches};
pub use runner::{plan_run, OrderOutcome, PlannedOrder, RecurringOrderJob, RunReport};
