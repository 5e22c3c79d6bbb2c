//! Core types for approval requests.
//!
//! These mirror the JSON the venue backend serves for manager approval
//! requests. Field names on the wire are kept through serde renames so the
//! Rust side can use its own naming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A staff-originated request waiting on (or already given) a manager decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Opaque id assigned by the backend, stable for the request's lifetime
    #[serde(rename = "uuid")]
    pub id: String,

    /// Venue the request belongs to
    #[serde(rename = "venueXRefID", default)]
    pub venue_id: String,

    /// What is being asked for
    #[serde(rename = "data")]
    pub kind: RequestKind,

    pub status: RequestStatus,

    #[serde(rename = "requestCreatedAt", default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Only meaningful once the request has left `Requested`; use `responded_at()`
    #[serde(rename = "responseSentAt", default)]
    pub responded_at: Option<DateTime<Utc>>,
}

impl ApprovalRequest {
    /// When the decision was sent, or `None` while the request is still open.
    pub fn responded_at(&self) -> Option<DateTime<Utc>> {
        match self.status {
            RequestStatus::Requested => None,
            RequestStatus::Approved | RequestStatus::Rejected => self.responded_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Requested
    }
}

/// The payload of a request, tagged by `type` on the wire.
///
/// `Unknown` catches any tag this build does not understand so a single
/// unexpected item can still be listed (with a placeholder) instead of
/// failing the whole fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RequestKind {
    #[serde(rename = "DISCOUNT")]
    Discount {
        #[serde(rename = "menuItemXRefID", default)]
        menu_item_id: String,
        #[serde(rename = "menuItemLabel", default)]
        menu_item_label: String,
        #[serde(rename = "discountAmount", default)]
        discount_amount: String,
        #[serde(rename = "menuItemPrice", default)]
        menu_item_price: String,
        #[serde(rename = "staffUserXRefID", default)]
        staff_id: String,
        #[serde(rename = "staffUserFullName", default)]
        staff_full_name: String,
        #[serde(rename = "totalBill", default)]
        total_bill: String,
    },

    #[serde(rename = "EARLY_CLOCKIN")]
    EarlyClockIn {
        #[serde(rename = "staffUserFullName", default)]
        staff_full_name: String,
        #[serde(rename = "diffFromScheduledTime", default)]
        diff_from_scheduled_time: String,
        #[serde(rename = "clockInTime", default)]
        clock_in_time: String,
        #[serde(rename = "scheduledStartTime", default)]
        scheduled_start_time: String,
    },

    #[serde(other)]
    Unknown,
}

impl RequestKind {
    /// Title shown above the request.
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Discount { .. } => "Discount Request",
            RequestKind::EarlyClockIn { .. } => "Early Clock-in Request",
            RequestKind::Unknown => "Unknown Request",
        }
    }

    pub fn staff_full_name(&self) -> Option<&str> {
        match self {
            RequestKind::Discount {
                staff_full_name, ..
            }
            | RequestKind::EarlyClockIn {
                staff_full_name, ..
            } => Some(staff_full_name),
            RequestKind::Unknown => None,
        }
    }
}

/// Lifecycle state of a request. Never moves back to `Requested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Requested,
    Approved,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Requested => write!(f, "REQUESTED"),
            RequestStatus::Approved => write!(f, "APPROVED"),
            RequestStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// A manager's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Parse a decision from user input. Accepts short forms.
    pub fn from_str_loose(s: &str) -> Option<Decision> {
        match s.to_lowercase().trim() {
            "approve" | "approved" | "a" | "yes" | "y" => Some(Decision::Approved),
            "reject" | "rejected" | "r" | "deny" | "no" | "n" => Some(Decision::Rejected),
            _ => None,
        }
    }
}

impl From<Decision> for RequestStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        RequestStatus::from(*self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_discount_request() {
        let json = r#"{
            "uuid": "a1",
            "venueXRefID": "24477",
            "data": {
                "type": "DISCOUNT",
                "typeLabel": "Discount Request",
                "menuItemXRefID": "m-9",
                "menuItemLabel": "Big Burger",
                "discountAmount": "$2.00",
                "menuItemPrice": "$12.00",
                "staffUserXRefID": "s-1",
                "staffUserFullName": "Dana Reyes",
                "totalBill": "$40.00"
            },
            "status": "REQUESTED",
            "requestCreatedAt": "2024-11-02T18:30:00Z",
            "responseSentAt": "2024-11-02T18:30:00Z"
        }"#;

        let request: ApprovalRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.id, "a1");
        assert_eq!(request.venue_id, "24477");
        assert_eq!(request.status, RequestStatus::Requested);
        assert!(request.created_at.is_some());
        // Open requests never report a response time
        assert!(request.responded_at().is_none());
        match request.kind {
            RequestKind::Discount {
                ref menu_item_label,
                ref total_bill,
                ..
            } => {
                assert_eq!(menu_item_label, "Big Burger");
                assert_eq!(total_bill, "$40.00");
            }
            other => panic!("expected discount, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_early_clock_in() {
        let json = r#"{
            "uuid": "b2",
            "venueXRefID": "24477",
            "data": {
                "type": "EARLY_CLOCKIN",
                "staffUserFullName": "Sam Ortiz",
                "diffFromScheduledTime": "1 hours and 30 minutes",
                "clockInTime": "7:00am",
                "scheduledStartTime": "8:30am"
            },
            "status": "APPROVED",
            "responseSentAt": "2024-11-02T19:00:00Z"
        }"#;

        let request: ApprovalRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind.label(), "Early Clock-in Request");
        assert_eq!(request.kind.staff_full_name(), Some("Sam Ortiz"));
        assert!(request.responded_at().is_some());
        assert!(!request.is_pending());
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let json = r#"{
            "uuid": "c3",
            "venueXRefID": "24477",
            "data": { "type": "REFUND", "amount": "$5.00" },
            "status": "REQUESTED"
        }"#;

        let request: ApprovalRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind, RequestKind::Unknown);
        assert_eq!(request.kind.label(), "Unknown Request");
    }

    #[test]
    fn test_missing_fields_decode_empty() {
        let json = r#"{
            "uuid": "d4",
            "data": { "type": "DISCOUNT", "staffUserFullName": "Lee" },
            "status": "REQUESTED"
        }"#;

        let request: ApprovalRequest = serde_json::from_str(json).unwrap();
        match request.kind {
            RequestKind::Discount {
                staff_full_name,
                total_bill,
                ..
            } => {
                assert_eq!(staff_full_name, "Lee");
                assert!(total_bill.is_empty());
            }
            other => panic!("expected discount, got {:?}", other),
        }
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!(Decision::from_str_loose("approve"), Some(Decision::Approved));
        assert_eq!(Decision::from_str_loose(" A "), Some(Decision::Approved));
        assert_eq!(Decision::from_str_loose("reject"), Some(Decision::Rejected));
        assert_eq!(Decision::from_str_loose("maybe"), None);
        assert_eq!(RequestStatus::from(Decision::Rejected), RequestStatus::Rejected);
        assert_eq!(
            serde_json::to_string(&Decision::Approved).unwrap(),
            "\"APPROVED\""
        );
    }
}
