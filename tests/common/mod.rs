//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test context builder for a file-backed table store
pub struct TestContextBuilder {
    temp_dir: TempDir,
    orders: Value,
    config: Option<String>,
    initial_files: Vec<(PathBuf, String)>,
}

impl TestContextBuilder {
    /// Create a new test context builder with an empty orders table
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            orders: Value::Array(Vec::new()),
            config: None,
            initial_files: Vec::new(),
        })
    }

    /// Set the orders table contents
    pub fn with_orders(mut self, orders: Value) -> Self {
        self.orders = orders;
        self
    }

    /// Write `recurring-orders.toml` with this content
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    /// Add an initial file
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.initial_files
            .push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    /// Build the test context
    pub fn build(self) -> Result<TestContext> {
        let path = self.temp_dir.path();

        fs::write(
            path.join("orders.json"),
            serde_json::to_string_pretty(&self.orders)?,
        )?;

        if let Some(config) = self.config {
            fs::write(path.join("recurring-orders.toml"), config)?;
        }

        for (file_path, content) in self.initial_files {
            let full_path = path.join(file_path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(full_path, content)?;
        }

        Ok(TestContext {
            temp_dir: self.temp_dir,
        })
    }
}

/// Test context that manages temporary directories and cleanup
pub struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    /// Get the path to the test directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn orders_path(&self) -> PathBuf {
        self.path().join("orders.json")
    }

    pub fn deliveries_path(&self) -> PathBuf {
        self.path().join("deliveries.json")
    }

    /// Deliveries table contents, empty when never written
    pub fn read_deliveries(&self) -> Result<Vec<Value>> {
        let path = self.deliveries_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Orders table contents
    pub fn read_orders(&self) -> Result<Vec<Value>> {
        Ok(serde_json::from_str(&fs::read_to_string(
            self.orders_path(),
        )?)?)
    }

    /// Dates of all written deliveries, in table order
    pub fn delivery_dates(&self) -> Result<Vec<String>> {
        Ok(self
            .read_deliveries()?
            .iter()
            .filter_map(|d| d["fields"]["Date"].as_str().map(String::from))
            .collect())
    }
}

/// An order row in table shape
pub fn order_row(id: &str, name: &str, start: &str, end: &str, days: &[&str]) -> Value {
    serde_json::json!({
        "id": id,
        "fields": {
            "Name": name,
            "Start Date": start,
            "End Date": end,
            "Days of week": days,
            "Restaurant": [{"id": "recRestaurant"}],
            "Hospital": [{"id": "recHospital"}]
        }
    })
}
