//! Table store abstraction
//!
//! The expansion job only ever reads orders and appends deliveries. Both
//! sides sit behind traits so the job can run against Airtable, local JSON
//! documents, or an in-memory store in tests.

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod traits;

pub use backends::{AirtableClient, FileTableStore, MemoryTableStore};
pub use config::{AirtableConfig, BackendConfig, BackendType, FileConfig, MemoryConfig, TableNames};
pub use error::{StorageError, StorageResult};
pub use factory::StorageFactory;
pub use traits::{DeliverySink, OrderSource, TableStore};

/// Most records the table store accepts in one create call
pub const MAX_RECORDS_PER_WRITE: usize = 50;
