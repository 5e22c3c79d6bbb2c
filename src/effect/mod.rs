pub mod terminal;

use crate::request::ApprovalRequest;
use anyhow::Result;

pub use terminal::TerminalEffect;

/// Feedback fired once per newly admitted pending request.
/// Implementations can ring a terminal bell, play a sound, flash a banner, etc.
///
/// Called in admission order, right after the request is put on top of
/// the pending list. Errors are logged by the engine and otherwise ignored;
/// the admission itself is never rolled back. Implementations must not block.
pub trait NotificationEffect: Send + Sync {
    fn on_admitted(&self, request: &ApprovalRequest) -> Result<()>;
}

/// Effect that does nothing (for headless and one-shot commands).
pub struct NoopEffect;

impl NotificationEffect for NoopEffect {
    fn on_admitted(&self, _request: &ApprovalRequest) -> Result<()> {
        Ok(())
    }
}
