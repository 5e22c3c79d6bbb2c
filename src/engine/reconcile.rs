//! Merging fetched request lists into local state.
//!
//! Both functions are synchronous and run under the engine's state lock,
//! so each call is one uninterrupted read-modify-write of `LocalState`.

use crate::engine::state::LocalState;
use crate::request::ApprovalRequest;
use std::collections::HashSet;

/// Replace the resolved cache with the source's current view.
///
/// Anything the source now reports as answered is also dropped from
/// `pending`, so an id never sits in both lists.
pub fn replace_resolved(state: &mut LocalState, fetched: Vec<ApprovalRequest>) {
    state.resolved = fetched;

    let resolved_ids: HashSet<&str> = state.resolved.iter().map(|r| r.id.as_str()).collect();
    state
        .pending
        .retain(|r| !resolved_ids.contains(r.id.as_str()));
}

/// Merge a freshly fetched pending list (newest first) into local state.
///
/// 1. Local pending items missing from the fetch are dropped (answered elsewhere).
/// 2. The fetch is de-duplicated by id, then walked oldest first.
/// 3. Each unseen id is marked seen and inserted at the front, so the newest
///    arrival ends up on top.
///
/// Returns the newly admitted requests in admission order (oldest first).
/// Only these should trigger the arrival effect.
///
/// Seen ids are skipped outright. One that dropped out of `pending` stays
/// out even if a later fetch lists it again.
pub fn reconcile_pending(
    state: &mut LocalState,
    fetched: Vec<ApprovalRequest>,
) -> Vec<ApprovalRequest> {
    let fetched: Vec<ApprovalRequest> = fetched
        .into_iter()
        .filter(|r| {
            if !r.is_pending() {
                tracing::debug!("Ignoring {} in pending fetch (status {})", r.id, r.status);
            }
            r.is_pending()
        })
        .collect();

    let fresh_ids: HashSet<&str> = fetched.iter().map(|r| r.id.as_str()).collect();
    state.pending.retain(|r| fresh_ids.contains(r.id.as_str()));

    let mut in_batch = HashSet::new();
    let mut unique = Vec::with_capacity(fetched.len());
    for request in &fetched {
        if in_batch.insert(request.id.as_str()) {
            unique.push(request.clone());
        }
    }

    let mut admitted = Vec::new();
    for request in unique.into_iter().rev() {
        if state.seen.contains(&request.id) {
            continue;
        }
        if state.resolved.iter().any(|r| r.id == request.id) {
            tracing::debug!("Not admitting {}: already answered", request.id);
            continue;
        }

        state.seen.insert(request.id.clone());
        state.pending.insert(0, request.clone());
        admitted.push(request);
    }

    admitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{RequestKind, RequestStatus};

    fn open(id: &str) -> ApprovalRequest {
        ApprovalRequest {
            id: id.to_string(),
            venue_id: "v1".to_string(),
            kind: RequestKind::EarlyClockIn {
                staff_full_name: "Sam Ortiz".to_string(),
                diff_from_scheduled_time: "1 hours and 0 minutes".to_string(),
                clock_in_time: "7:00am".to_string(),
                scheduled_start_time: "8:00am".to_string(),
            },
            status: RequestStatus::Requested,
            created_at: None,
            responded_at: None,
        }
    }

    fn answered(id: &str, status: RequestStatus) -> ApprovalRequest {
        ApprovalRequest {
            status,
            ..open(id)
        }
    }

    fn ids(requests: &[ApprovalRequest]) -> Vec<&str> {
        requests.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_batch_admitted_oldest_first_keeps_server_order() {
        let mut state = LocalState::default();
        let admitted = reconcile_pending(&mut state, vec![open("r3"), open("r2"), open("r1")]);

        assert_eq!(ids(&admitted), vec!["r1", "r2", "r3"]);
        assert_eq!(ids(&state.pending), vec!["r3", "r2", "r1"]);
        assert_eq!(state.seen.len(), 3);
    }

    #[test]
    fn test_new_arrival_goes_on_top() {
        let mut state = LocalState::default();
        reconcile_pending(&mut state, vec![open("a")]);
        let admitted = reconcile_pending(&mut state, vec![open("b"), open("a")]);

        assert_eq!(ids(&admitted), vec!["b"]);
        assert_eq!(ids(&state.pending), vec!["b", "a"]);
    }

    #[test]
    fn test_repeat_fetch_admits_nothing() {
        let mut state = LocalState::default();
        reconcile_pending(&mut state, vec![open("a"), open("b")]);
        let admitted = reconcile_pending(&mut state, vec![open("a"), open("b")]);

        assert!(admitted.is_empty());
        assert_eq!(ids(&state.pending), vec!["a", "b"]);
    }

    #[test]
    fn test_missing_items_are_dropped_without_disturbing_others() {
        let mut state = LocalState::default();
        reconcile_pending(&mut state, vec![open("c"), open("b"), open("a")]);
        let admitted = reconcile_pending(&mut state, vec![open("c"), open("a")]);

        assert!(admitted.is_empty());
        assert_eq!(ids(&state.pending), vec!["c", "a"]);
        // Seen set never shrinks
        assert!(state.seen.contains("b"));
    }

    #[test]
    fn test_empty_fetch_clears_pending() {
        let mut state = LocalState::default();
        reconcile_pending(&mut state, vec![open("a")]);
        let admitted = reconcile_pending(&mut state, Vec::new());

        assert!(admitted.is_empty());
        assert!(state.pending.is_empty());
    }

    #[test]
    fn test_duplicate_ids_in_one_fetch_admitted_once() {
        let mut state = LocalState::default();
        let admitted = reconcile_pending(&mut state, vec![open("a"), open("b"), open("a")]);

        assert_eq!(ids(&admitted), vec!["b", "a"]);
        assert_eq!(ids(&state.pending), vec!["a", "b"]);
    }

    #[test]
    fn test_reappearing_request_is_skipped() {
        let mut state = LocalState::default();
        reconcile_pending(&mut state, vec![open("x")]);
        reconcile_pending(&mut state, Vec::new());
        let admitted = reconcile_pending(&mut state, vec![open("x")]);

        assert!(admitted.is_empty());
        assert!(state.pending.is_empty());
        assert!(state.seen.contains("x"));
    }

    #[test]
    fn test_reappearing_request_does_not_block_new_ones() {
        let mut state = LocalState::default();
        reconcile_pending(&mut state, vec![open("x")]);
        reconcile_pending(&mut state, Vec::new());
        let admitted = reconcile_pending(&mut state, vec![open("y"), open("x")]);

        assert_eq!(ids(&admitted), vec!["y"]);
        assert_eq!(ids(&state.pending), vec!["y"]);
    }

    #[test]
    fn test_unknown_kind_is_still_admitted() {
        let mut state = LocalState::default();
        let weird = ApprovalRequest {
            kind: RequestKind::Unknown,
            ..open("w")
        };
        let admitted = reconcile_pending(&mut state, vec![weird]);

        assert_eq!(ids(&admitted), vec!["w"]);
        assert_eq!(state.pending[0].kind, RequestKind::Unknown);
        assert!(state.seen.contains("w"));
    }

    #[test]
    fn test_non_pending_status_in_pending_fetch_ignored() {
        let mut state = LocalState::default();
        let admitted = reconcile_pending(
            &mut state,
            vec![answered("a", RequestStatus::Approved), open("b")],
        );

        assert_eq!(ids(&admitted), vec!["b"]);
        assert!(!state.seen.contains("a"));
    }

    #[test]
    fn test_resolved_replace_is_overwrite_and_evicts_pending() {
        let mut state = LocalState::default();
        reconcile_pending(&mut state, vec![open("b"), open("a")]);

        replace_resolved(&mut state, vec![answered("a", RequestStatus::Rejected)]);
        assert_eq!(ids(&state.resolved), vec!["a"]);
        assert_eq!(ids(&state.pending), vec!["b"]);

        replace_resolved(&mut state, vec![answered("z", RequestStatus::Approved)]);
        assert_eq!(ids(&state.resolved), vec!["z"]);
    }

    #[test]
    fn test_answered_request_not_admitted_from_stale_pending_view() {
        let mut state = LocalState::default();
        replace_resolved(&mut state, vec![answered("a", RequestStatus::Approved)]);
        let admitted = reconcile_pending(&mut state, vec![open("a")]);

        assert!(admitted.is_empty());
        assert!(state.pending.is_empty());
    }
}
