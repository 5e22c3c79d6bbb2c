//! Human-readable descriptions of approval requests.

use crate::request::types::RequestKind;

/// Placeholder shown for request kinds this build does not understand.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown request type";

/// Describe a request that is still waiting on a decision.
pub fn describe_pending(kind: &RequestKind) -> String {
    match kind {
        RequestKind::Discount {
            menu_item_label,
            discount_amount,
            menu_item_price,
            staff_full_name,
            total_bill,
            ..
        } => format!(
            "{} would like to apply a discount of {} on {} ({}) on the total bill of {}.",
            staff_full_name, discount_amount, menu_item_label, menu_item_price, total_bill
        ),
        RequestKind::EarlyClockIn {
            staff_full_name,
            diff_from_scheduled_time,
            clock_in_time,
            scheduled_start_time,
        } => format!(
            "{} would like to clock in {} ({}) earlier than their scheduled start time ({}).",
            staff_full_name, diff_from_scheduled_time, clock_in_time, scheduled_start_time
        ),
        RequestKind::Unknown => UNKNOWN_DESCRIPTION.to_string(),
    }
}

/// Describe a request that has already been approved or rejected.
pub fn describe_resolved(kind: &RequestKind) -> String {
    match kind {
        RequestKind::Discount {
            menu_item_label,
            discount_amount,
            menu_item_price,
            staff_full_name,
            total_bill,
            ..
        } => format!(
            "{} had requested a discount of {} on {} ({}) on the total bill of {}.",
            staff_full_name, discount_amount, menu_item_label, menu_item_price, total_bill
        ),
        RequestKind::EarlyClockIn {
            staff_full_name,
            diff_from_scheduled_time,
            clock_in_time,
            scheduled_start_time,
        } => format!(
            "{} had requested to clock in {} ({}) earlier than their scheduled start time ({}).",
            staff_full_name, diff_from_scheduled_time, clock_in_time, scheduled_start_time
        ),
        RequestKind::Unknown => UNKNOWN_DESCRIPTION.to_string(),
    }
}
