//! Delivery payload construction

use super::types::DeliveryRecord;
use super::validation::ScheduledOrder;
use crate::schedule::{expand, CalendarDate};

/// Delivery payload for one date of an order
///
/// Restaurant and hospital cells are copied as-is; an empty cell stays empty.
pub fn build_delivery(order: &ScheduledOrder, date: CalendarDate) -> DeliveryRecord {
    DeliveryRecord {
        date,
        restaurant: order.restaurant.clone(),
        hospital: order.hospital.clone(),
        recurring_order: order.id.clone(),
    }
}

/// Delivery payloads for every scheduled date of an order, in date order
pub fn build_deliveries(order: &ScheduledOrder) -> Vec<DeliveryRecord> {
    expand(order.start, order.end, &order.weekdays)
        .into_iter()
        .map(|date| build_delivery(order, date))
        .collect()
}
