//! # recurring-orders
//!
//! Expands recurring delivery orders into one delivery record per scheduled
//! day, in a table store that holds both the orders and the deliveries.
//!
//! ## Usage
//!
//! ```bash
//! recurring-orders [-v] [-c recurring-orders.toml]
//! ```
//!
//! ## Modules
//!
//! - `schedule` - Calendar dates, weekday selectors and range expansion
//! - `orders` - Order and delivery records, the skip policy and payload building
//! - `job` - Batched writes and the run over every order
//! - `storage` - Table store traits with file, Airtable and in-memory backends
//! - `config` - Job configuration from TOML and the environment
//! - `app` - Logging, runtime setup and fatal error reporting for the binary
//! - `error` - The fatal `JobError` type and its error codes
pub mod app;
pub mod config;
pub mod error;
pub mod job;
pub mod orders;
pub mod schedule;
pub mod storage;

#[cfg(test)]
mod property_tests;
