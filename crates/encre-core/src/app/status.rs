//! Status views: serializable snapshots of the request history.
//!
//! Failures and progress surface as plain strings here; there is nothing
//! richer to escalate to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Keyword, RequestId, RequestKind, RequestRecord, RequestState};

/// Serializable view of `RequestState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStateView {
    Dispatched,
    Waiting,
    Fetching,
    Ready,
    Published,
    Failed,
}

impl From<RequestState> for RequestStateView {
    fn from(state: RequestState) -> Self {
        match state {
            RequestState::Dispatched => RequestStateView::Dispatched,
            RequestState::Waiting => RequestStateView::Waiting,
            RequestState::Fetching => RequestStateView::Fetching,
            RequestState::Ready => RequestStateView::Ready,
            RequestState::Published => RequestStateView::Published,
            RequestState::Failed => RequestStateView::Failed,
        }
    }
}

/// One request, as shown to the operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestStatus {
    pub request_id: RequestId,
    pub kind: RequestKind,
    pub keyword: Keyword,
    pub state: RequestStateView,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&RequestRecord> for RequestStatus {
    fn from(record: &RequestRecord) -> Self {
        Self {
            request_id: record.request_id,
            kind: record.kind,
            keyword: record.keyword.clone(),
            state: record.state.into(),
            last_error: record.last_error.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl RequestStatus {
    /// The one-line status string for this request.
    pub fn status_line(&self) -> String {
        let action = match self.kind {
            RequestKind::Generate => "generate",
            RequestKind::Publish => "publish",
        };
        let detail = match (self.state, self.last_error.as_deref()) {
            (RequestStateView::Failed, Some(error)) => error.to_string(),
            (RequestStateView::Failed, None) => "failed".to_string(),
            (RequestStateView::Dispatched, _) => "dispatched to the workflow".to_string(),
            (RequestStateView::Waiting, _) => "waiting for the workflow".to_string(),
            (RequestStateView::Fetching, _) => "reading the article back".to_string(),
            (RequestStateView::Ready, _) => "article ready".to_string(),
            (RequestStateView::Published, _) => "published".to_string(),
        };
        format!("{action} \"{}\": {detail}", self.keyword)
    }
}

/// Request tallies by state, for the status panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestCounts {
    pub dispatched: usize,
    pub waiting: usize,
    pub fetching: usize,
    pub ready: usize,
    pub published: usize,
    pub failed: usize,
}

impl RequestCounts {
    pub fn tally(records: &[RequestRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.state {
                RequestState::Dispatched => counts.dispatched += 1,
                RequestState::Waiting => counts.waiting += 1,
                RequestState::Fetching => counts.fetching += 1,
                RequestState::Ready => counts.ready += 1,
                RequestState::Published => counts.published += 1,
                RequestState::Failed => counts.failed += 1,
            }
        }
        counts
    }
}
