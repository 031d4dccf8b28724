//! Recurring orders and the deliveries generated from them

pub mod builder;
pub mod types;
pub mod validation;

pub use builder::{build_deliveries, build_delivery};
pub use types::{DeliveryRecord, OrderFields, OrderRecord, RecordId, StoredDelivery, WeekdayCell};
pub use validation::{classify, MissingField, OrderDisposition, ScheduledOrder};
