//! Record shapes for the orders and deliveries tables
//!
//! Records mirror the table store's `{"id": ..., "fields": {...}}` layout,
//! with field names exactly as they appear in the tables.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schedule::CalendarDate;

/// Opaque record identifier assigned by the table store
pub type RecordId = String;

/// A row of the recurring orders table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: RecordId,
    #[serde(default)]
    pub fields: OrderFields,
}

/// Cell values of a recurring order; every cell may be empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFields {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "Start Date", default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(rename = "End Date", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(rename = "Days of week", default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<WeekdayCell>>,

    #[serde(rename = "Restaurant", default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<Value>,

    #[serde(rename = "Hospital", default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<Value>,

    #[serde(rename = "Deliveries", default, skip_serializing_if = "Option::is_none")]
    pub deliveries: Option<Vec<Value>>,
}

/// A weekday cell, either a bare choice name or a `{"name": ...}` choice object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeekdayCell {
    Name(String),
    Choice { name: String },
}

impl WeekdayCell {
    pub fn name(&self) -> &str {
        match self {
            WeekdayCell::Name(name) | WeekdayCell::Choice { name } => name,
        }
    }
}

impl From<&str> for WeekdayCell {
    fn from(name: &str) -> Self {
        WeekdayCell::Name(name.to_string())
    }
}

impl OrderRecord {
    pub fn new(id: impl Into<RecordId>, fields: OrderFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Display name for log lines, the record id when the name is blank
    pub fn display_name(&self) -> &str {
        self.fields
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }

    /// Whether any delivery already links back to this order
    pub fn has_deliveries(&self) -> bool {
        self.fields
            .deliveries
            .as_ref()
            .is_some_and(|links| !links.is_empty())
    }
}

/// Payload of one row to append to the deliveries table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    #[serde(rename = "Date")]
    pub date: CalendarDate,

    #[serde(rename = "Restaurant", default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<Value>,

    #[serde(rename = "Hospital", default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<Value>,

    #[serde(rename = "Recurring order", with = "linked_record")]
    pub recurring_order: RecordId,
}

/// A delivery row as persisted, with the id the store assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDelivery {
    pub id: RecordId,
    pub fields: DeliveryRecord,
}

/// Single linked-record cell, written as `[{"id": ...}]`
///
/// Reading also accepts the `["id"]` form some APIs return.
mod linked_record {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Link {
        id: String,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LinkCell {
        Object(Link),
        Id(String),
    }

    pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
        [Link { id: id.to_string() }].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let cells = Vec::<LinkCell>::deserialize(deserializer)?;
        match cells.into_iter().next() {
            Some(LinkCell::Object(link)) => Ok(link.id),
            Some(LinkCell::Id(id)) => Ok(id),
            None => Err(D::Error::custom("linked record cell is empty")),
        }
    }
}
