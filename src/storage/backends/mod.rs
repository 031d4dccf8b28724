//! Table store backend implementations

pub mod airtable;
pub mod file;
pub mod memory;

pub use airtable::AirtableClient;
pub use file::FileTableStore;
pub use memory::MemoryTableStore;
