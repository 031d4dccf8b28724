//! Per-order skip policy
//!
//! Decides, before any date math runs, whether an order is already expanded,
//! is missing a required cell, or is ready to expand. Cells that are present
//! but unreadable are data-integrity errors and stop the run.

use serde_json::Value;
use std::fmt;

use super::types::{OrderRecord, RecordId, WeekdayCell};
use crate::schedule::{CalendarDate, ScheduleError, WeekdaySet};

/// Required cell an order can be missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    StartDate,
    EndDate,
    DaysOfWeek,
}

impl MissingField {
    /// Column name in the orders table
    pub fn column(self) -> &'static str {
        match self {
            MissingField::StartDate => "Start Date",
            MissingField::EndDate => "End Date",
            MissingField::DaysOfWeek => "Days of week",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            MissingField::StartDate => "a start date",
            MissingField::EndDate => "an end date",
            MissingField::DaysOfWeek => "any 'Days of week' to repeat",
        }
    }

    /// Warning line for an order skipped because of this field
    pub fn skip_message(self, order_name: &str) -> String {
        format!(
            "Skipping \"{}\" because it doesn't have {}.",
            order_name,
            self.phrase()
        )
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// An order whose schedule cells have all been read successfully
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledOrder {
    pub id: RecordId,
    pub name: String,
    pub start: CalendarDate,
    pub end: CalendarDate,
    pub weekdays: WeekdaySet,
    pub restaurant: Option<Value>,
    pub hospital: Option<Value>,
}

/// What to do with an order
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDisposition {
    /// Deliveries already link to the order; skip without a word
    AlreadyExpanded,
    /// A required cell is empty; skip with a warning
    Missing(MissingField),
    /// Ready to expand
    Ready(ScheduledOrder),
}

/// Classify one order
///
/// Checks run in a fixed order: linked deliveries, start date, end date,
/// weekdays. The first empty field wins. Only a `Ready` order has its cells
/// parsed, so unreadable values on skipped orders are never reported.
pub fn classify(order: &OrderRecord) -> Result<OrderDisposition, ScheduleError> {
    if order.has_deliveries() {
        return Ok(OrderDisposition::AlreadyExpanded);
    }

    let fields = &order.fields;

    let Some(start) = non_blank(fields.start_date.as_deref()) else {
        return Ok(OrderDisposition::Missing(MissingField::StartDate));
    };
    let Some(end) = non_blank(fields.end_date.as_deref()) else {
        return Ok(OrderDisposition::Missing(MissingField::EndDate));
    };
    let days = match fields.days_of_week.as_deref() {
        Some(days) if !days.is_empty() => days,
        _ => return Ok(OrderDisposition::Missing(MissingField::DaysOfWeek)),
    };

    let weekdays = WeekdaySet::parse_names(days.iter().map(WeekdayCell::name))?;
    let start = CalendarDate::parse(start)?;
    let end = CalendarDate::parse(end)?;

    Ok(OrderDisposition::Ready(ScheduledOrder {
        id: order.id.clone(),
        name: order.display_name().to_string(),
        start,
        end,
        weekdays,
        restaurant: fields.restaurant.clone(),
        hospital: fields.hospital.clone(),
    }))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
