use std::time::Duration;

/// Failure talking to the request source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The call did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection refused, DNS failure, reset, etc.
    #[error("transport error: {0}")]
    Transport(String),

    /// The source answered with a non-success status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the shape we expected.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl SourceError {
    /// Whether retrying on the next poll can reasonably succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Timeout(_) | SourceError::Transport(_) => true,
            SourceError::Status { status, .. } => *status >= 500 || *status == 429,
            SourceError::Decode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(SourceError::Timeout(Duration::from_secs(5)).is_transient());
        assert!(SourceError::Transport("connection reset".into()).is_transient());
        assert!(SourceError::Status {
            status: 503,
            body: String::new()
        }
        .is_transient());
        assert!(!SourceError::Status {
            status: 404,
            body: "no such request".into()
        }
        .is_transient());
        assert!(!SourceError::Decode("expected array".into()).is_transient());
    }
}
