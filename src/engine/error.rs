use crate::request::Decision;
use crate::source::SourceError;

/// Why a manager decision did not go through.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// Another decision is still being submitted.
    #[error("another decision is still being submitted, try again in a moment")]
    InFlight,

    /// The source refused or could not be reached. The request stays pending.
    #[error("failed to submit {decision} for request {request_id}")]
    Submit {
        request_id: String,
        decision: Decision,
        #[source]
        source: SourceError,
    },
}

/// Lifecycle misuse of the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("reconciliation loop is already running")]
    AlreadyRunning,
}
