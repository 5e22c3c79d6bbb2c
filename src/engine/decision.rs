//! Single-flight submission of manager decisions.
//!
//! At most one decision is in transit at a time. The in-flight flag is held
//! by an RAII guard, so it is released on success, on error, and when the
//! submitting future is dropped part-way.
//!
//! Local lists are not touched here. The answered request leaves `pending`
//! and shows up in `resolved` on the next poll that observes the change.

use crate::engine::{DecisionError, Engine, Inner};
use crate::request::Decision;
use std::sync::atomic::Ordering;

/// Marks a decision as in flight for as long as it lives.
struct InFlightGuard<'a> {
    inner: &'a Inner,
}

impl<'a> InFlightGuard<'a> {
    /// Claim the single submission slot, or `None` if it is taken.
    fn acquire(inner: &'a Inner) -> Option<Self> {
        inner
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        inner.publish_in_flight(true);
        Some(Self { inner })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.inner.in_flight.store(false, Ordering::SeqCst);
        self.inner.publish_in_flight(false);
    }
}

impl Engine {
    /// Send an approve/reject decision for one request.
    ///
    /// Fails fast with `DecisionError::InFlight` if another decision is
    /// still being sent. On a source failure the request simply stays in
    /// `pending` so the manager can retry.
    pub async fn decide(&self, request_id: &str, decision: Decision) -> Result<(), DecisionError> {
        let inner = &*self.inner;
        let Some(_guard) = InFlightGuard::acquire(inner) else {
            tracing::debug!("Refusing {} for {}: a decision is in flight", decision, request_id);
            return Err(DecisionError::InFlight);
        };

        tracing::info!("Submitting {} for request {}", decision, request_id);
        inner
            .source
            .submit_decision(&inner.options.venue_id, request_id, decision)
            .await
            .map_err(|source| {
                tracing::warn!("Decision for {} failed: {}", request_id, source);
                DecisionError::Submit {
                    request_id: request_id.to_string(),
                    decision,
                    source,
                }
            })?;

        tracing::info!("{} sent for request {}", decision, request_id);
        Ok(())
    }
}
