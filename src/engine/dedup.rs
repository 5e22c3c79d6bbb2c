//! Process-lifetime record of every request id ever admitted.

use std::collections::HashSet;

/// Append-only set of admitted request ids.
///
/// No removal operation: an id that has been admitted once never
/// triggers the arrival effect again for the life of the process.
#[derive(Debug, Default, Clone)]
pub struct DedupTracker {
    seen: HashSet<String>,
}

impl DedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id. Returns true if it had not been seen before.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.seen.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
