//! HTTP client for the venue backend's approval-request endpoints.
//!
//! Reads go through the `frontend` API, decisions through the `invenue` API:
//! - `GET  {base}/frontend/operational-menu/v2/venues/{venue}/discounts/approval-requests?statusList=...`
//! - `POST {base}/invenue/operational-menu/v2/venues/{venue}/discounts/approval-requests/{id}/response`
//!
//! Every call is bounded by the client timeout; expiry maps to
//! `SourceError::Timeout` so the poll loop treats it as transient.

use crate::request::{ApprovalRequest, Decision};
use crate::source::{decode_request_list, RequestSource, SourceError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;

/// Query strings are sent verbatim; the status list keeps its literal comma.
const PENDING_QUERY: &str = "statusList=REQUESTED";
const RESOLVED_QUERY: &str = "statusList=APPROVED,REJECTED&sortDesc=responseSentAt";

/// Body of a decision POST.
#[derive(Debug, Serialize)]
struct DecisionBody {
    status: Decision,
}

/// Request source backed by the venue HTTP API.
pub struct HttpRequestSource {
    client: Client,
    /// Base URL without trailing slash (e.g. `http://10.0.0.5:8013`)
    base_url: String,
    /// Opaque bearer credential, if the deployment needs one
    auth_token: Option<String>,
    timeout: Duration,
}

impl HttpRequestSource {
    /// Create a source with a per-call timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
            timeout,
        })
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn requests_url(&self, venue_id: &str) -> String {
        format!(
            "{}/frontend/operational-menu/v2/venues/{}/discounts/approval-requests",
            self.base_url, venue_id
        )
    }

    fn list_url(&self, venue_id: &str, query: &str) -> String {
        format!("{}?{}", self.requests_url(venue_id), query)
    }

    fn response_url(&self, venue_id: &str, request_id: &str) -> String {
        format!(
            "{}/invenue/operational-menu/v2/venues/{}/discounts/approval-requests/{}/response",
            self.base_url, venue_id, request_id
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn map_error(&self, e: reqwest::Error) -> SourceError {
        if e.is_timeout() {
            SourceError::Timeout(self.timeout)
        } else if e.is_decode() {
            SourceError::Decode(e.to_string())
        } else {
            SourceError::Transport(e.to_string())
        }
    }

    async fn check_status(response: Response) -> Result<Response, SourceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SourceError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_list(&self, venue_id: &str, query: &str) -> Result<Vec<ApprovalRequest>, SourceError> {
        let url = self.list_url(venue_id, query);
        tracing::debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        let response = Self::check_status(response).await?;

        let body: serde_json::Value = response.json().await.map_err(|e| self.map_error(e))?;
        decode_request_list(body)
    }
}

#[async_trait]
impl RequestSource for HttpRequestSource {
    async fn fetch_pending(&self, venue_id: &str) -> Result<Vec<ApprovalRequest>, SourceError> {
        self.fetch_list(venue_id, PENDING_QUERY).await
    }

    async fn fetch_resolved(&self, venue_id: &str) -> Result<Vec<ApprovalRequest>, SourceError> {
        self.fetch_list(venue_id, RESOLVED_QUERY).await
    }

    async fn submit_decision(
        &self,
        venue_id: &str,
        request_id: &str,
        decision: Decision,
    ) -> Result<(), SourceError> {
        let url = self.response_url(venue_id, request_id);
        tracing::debug!("POST {} status={}", url, decision);

        let response = self
            .authorize(self.client.post(&url).json(&DecisionBody { status: decision }))
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let source = HttpRequestSource::new("http://host:8013/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.base_url(), "http://host:8013");
        assert_eq!(
            source.requests_url("24477"),
            "http://host:8013/frontend/operational-menu/v2/venues/24477/discounts/approval-requests"
        );
        assert_eq!(
            source.response_url("24477", "abc"),
            "http://host:8013/invenue/operational-menu/v2/venues/24477/discounts/approval-requests/abc/response"
        );
    }

    #[test]
    fn test_list_queries_keep_literal_comma() {
        let source = HttpRequestSource::new("http://host:8013", Duration::from_secs(1)).unwrap();
        assert_eq!(
            source.list_url("24477", RESOLVED_QUERY),
            "http://host:8013/frontend/operational-menu/v2/venues/24477/discounts/approval-requests?statusList=APPROVED,REJECTED&sortDesc=responseSentAt"
        );
        assert!(source
            .list_url("24477", PENDING_QUERY)
            .ends_with("/approval-requests?statusList=REQUESTED"));

        let parsed = reqwest::Url::parse(&source.list_url("24477", RESOLVED_QUERY)).unwrap();
        assert_eq!(
            parsed.query(),
            Some("statusList=APPROVED,REJECTED&sortDesc=responseSentAt")
        );
    }

    #[test]
    fn test_decision_body_shape() {
        let body = serde_json::to_value(DecisionBody {
            status: Decision::Rejected,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "status": "REJECTED" }));
    }
}
