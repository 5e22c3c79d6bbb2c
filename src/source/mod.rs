pub mod demo;
pub mod error;
pub mod http;

use crate::request::{ApprovalRequest, Decision};
use async_trait::async_trait;

pub use demo::DemoSource;
pub use error::SourceError;
pub use http::HttpRequestSource;

/// The remote source of truth for approval requests.
/// Implementations can be the venue HTTP backend, an in-memory demo, test fakes, etc.
#[async_trait]
pub trait RequestSource: Send + Sync {
    /// Requests still waiting on a decision, newest first.
    async fn fetch_pending(&self, venue_id: &str) -> Result<Vec<ApprovalRequest>, SourceError>;

    /// Approved and rejected requests, most recently answered first.
    async fn fetch_resolved(&self, venue_id: &str) -> Result<Vec<ApprovalRequest>, SourceError>;

    /// Send a manager decision for one request.
    async fn submit_decision(
        &self,
        venue_id: &str,
        request_id: &str,
        decision: Decision,
    ) -> Result<(), SourceError>;
}

/// Decode a JSON array of requests item by item.
///
/// An element that cannot be decoded at all is logged and skipped so it
/// cannot hide the rest of the list. Unknown request kinds decode fine
/// (as `RequestKind::Unknown`) and are kept.
pub fn decode_request_list(value: serde_json::Value) -> Result<Vec<ApprovalRequest>, SourceError> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(SourceError::Decode(format!(
                "expected a JSON array of requests, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut requests = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<ApprovalRequest>(item) {
            Ok(request) => requests.push(request),
            Err(e) => {
                tracing::warn!("Skipping undecodable request at index {}: {}", index, e);
            }
        }
    }
    Ok(requests)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestKind;
    use serde_json::json;

    #[test]
    fn test_decode_skips_broken_items() {
        let value = json!([
            { "uuid": "a", "data": { "type": "DISCOUNT" }, "status": "REQUESTED" },
            { "data": { "type": "DISCOUNT" }, "status": "REQUESTED" },
            { "uuid": "c", "data": { "type": "GIFT_CARD" }, "status": "REQUESTED" }
        ]);

        let requests = decode_request_list(value).unwrap();
        let ids: Vec<&str> = requests.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(requests[1].kind, RequestKind::Unknown);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = decode_request_list(json!({ "error": "nope" })).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
