//! In-memory request source for demos and local development.
//!
//! Behaves like a tiny venue backend: every few pending polls a staff
//! member "asks" for something, and posting a decision moves that request
//! to the resolved view.

use crate::request::{ApprovalRequest, Decision, RequestKind, RequestStatus};
use crate::source::{RequestSource, SourceError};
use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::Mutex;
use uuid::Uuid;

const STAFF_NAMES: &[&str] = &[
    "Dana Reyes",
    "Sam Ortiz",
    "Priya Nair",
    "Marcus Bell",
    "Aiko Tanaka",
    "Jordan Blake",
    "Lucia Moretti",
    "Omar Haddad",
];

const MENU_ITEMS: &[(&str, u32)] = &[
    ("Classic Burger", 1299),
    ("Truffle Fries", 799),
    ("Caesar Salad", 1099),
    ("Margherita Pizza", 1599),
    ("Iced Latte", 549),
];

#[derive(Debug, Default)]
struct DemoState {
    /// Newest first, like the real backend
    pending: Vec<ApprovalRequest>,
    /// Most recently answered first
    resolved: Vec<ApprovalRequest>,
    polls: u64,
}

/// Fake backend that invents a new request every `every_polls` pending fetches.
pub struct DemoSource {
    venue_id: String,
    every_polls: u64,
    state: Mutex<DemoState>,
}

impl DemoSource {
    pub fn new(venue_id: impl Into<String>, every_polls: u64) -> Self {
        Self {
            venue_id: venue_id.into(),
            every_polls: every_polls.max(1),
            state: Mutex::new(DemoState::default()),
        }
    }

    /// Number of requests currently waiting on a decision.
    pub async fn pending_count(&self) -> usize {
        self.state.lock().await.pending.len()
    }
}

#[async_trait]
impl RequestSource for DemoSource {
    async fn fetch_pending(&self, venue_id: &str) -> Result<Vec<ApprovalRequest>, SourceError> {
        let mut state = self.state.lock().await;
        if venue_id != self.venue_id {
            return Ok(Vec::new());
        }

        state.polls += 1;
        if state.polls % self.every_polls == 1 || self.every_polls == 1 {
            let request = mock_request(&self.venue_id);
            tracing::debug!("Demo source created request {}", request.id);
            state.pending.insert(0, request);
        }
        Ok(state.pending.clone())
    }

    async fn fetch_resolved(&self, venue_id: &str) -> Result<Vec<ApprovalRequest>, SourceError> {
        let state = self.state.lock().await;
        if venue_id != self.venue_id {
            return Ok(Vec::new());
        }
        Ok(state.resolved.clone())
    }

    async fn submit_decision(
        &self,
        venue_id: &str,
        request_id: &str,
        decision: Decision,
    ) -> Result<(), SourceError> {
        let mut state = self.state.lock().await;
        let position = state
            .pending
            .iter()
            .position(|r| r.id == request_id && r.venue_id == venue_id)
            .ok_or_else(|| SourceError::Status {
                status: 404,
                body: format!("no pending request {}", request_id),
            })?;

        let mut request = state.pending.remove(position);
        request.status = decision.into();
        request.responded_at = Some(Utc::now());
        state.resolved.insert(0, request);
        Ok(())
    }
}

/// Invent a plausible discount or early clock-in request.
pub fn mock_request(venue_id: &str) -> ApprovalRequest {
    mock_request_with(venue_id, &mut rand::thread_rng())
}

/// Same as `mock_request`, drawing from the given generator.
pub fn mock_request_with<R: Rng>(venue_id: &str, rng: &mut R) -> ApprovalRequest {
    let staff_full_name = STAFF_NAMES
        .choose(rng)
        .copied()
        .unwrap_or("Staff Member")
        .to_string();

    let kind = if rng.gen_bool(0.5) {
        let (label, price_cents) = MENU_ITEMS.choose(rng).copied().unwrap_or(("Special", 1000));
        let discount_cents = price_cents * rng.gen_range(10..=50) / 100;
        let total_cents = price_cents + rng.gen_range(10..=70) * 100;
        RequestKind::Discount {
            menu_item_id: Uuid::new_v4().to_string(),
            menu_item_label: label.to_string(),
            discount_amount: dollars(discount_cents),
            menu_item_price: dollars(price_cents),
            staff_id: Uuid::new_v4().to_string(),
            staff_full_name,
            total_bill: dollars(total_cents),
        }
    } else {
        let clock_in_hour: i32 = rng.gen_range(1..=12);
        let scheduled_hour: i32 = rng.gen_range(1..=12);
        let clock_in_minutes: i32 = *[0, 30].choose(rng).unwrap_or(&0);
        let scheduled_minutes: i32 = *[0, 30].choose(rng).unwrap_or(&0);
        RequestKind::EarlyClockIn {
            staff_full_name,
            diff_from_scheduled_time: format!(
                "{} hours and {} minutes",
                (clock_in_hour - scheduled_hour).abs(),
                (clock_in_minutes - scheduled_minutes).abs()
            ),
            clock_in_time: format!("{}:{:02}am", clock_in_hour, clock_in_minutes),
            scheduled_start_time: format!("{}:{:02}am", scheduled_hour, scheduled_minutes),
        }
    };

    ApprovalRequest {
        id: Uuid::new_v4().to_string(),
        venue_id: venue_id.to_string(),
        kind,
        status: RequestStatus::Requested,
        created_at: Some(Utc::now()),
        responded_at: None,
    }
}

fn dollars(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
