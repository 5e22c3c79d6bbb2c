//! Local state owned by the engine, and the read-only view handed to renderers.

use crate::engine::dedup::DedupTracker;
use crate::request::ApprovalRequest;

/// Mutable state behind the engine's lock.
#[derive(Debug, Default)]
pub struct LocalState {
    /// Open requests, most recently admitted first
    pub pending: Vec<ApprovalRequest>,
    /// Answered requests in the order the source returned them
    pub resolved: Vec<ApprovalRequest>,
    /// Every id ever admitted into `pending`
    pub seen: DedupTracker,
}

/// What the presentation layer gets to see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub pending: Vec<ApprovalRequest>,
    pub resolved: Vec<ApprovalRequest>,
    /// True while a decision is being submitted; decision controls should be disabled
    pub in_flight: bool,
}

impl Snapshot {
    /// Nothing waiting on the manager.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn find_pending(&self, id: &str) -> Option<&ApprovalRequest> {
        self.pending.iter().find(|r| r.id == id)
    }
}
