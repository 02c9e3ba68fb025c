//! Request records: the in-memory trace of one choreography run.
//!
//! This is the only local state the pipeline keeps (there is no persistence;
//! the datastore is remote and owned by someone else). Each generate or
//! publish action appends one record and moves it through its states as the
//! choreography advances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RequestId;
use super::keyword::Keyword;

/// Which choreography a record traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Generate,
    Publish,
}

/// Request state.
///
/// State transitions:
/// - Dispatched -> Waiting -> Fetching -> Ready    (generate)
/// - Dispatched -> Waiting -> Fetching -> Published (publish)
/// - any non-terminal state -> Failed
///
/// There is no retry transition anywhere: a failed request stays failed and
/// the operator starts a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// The outbound webhook call was accepted.
    Dispatched,

    /// Fixed delay before the read-back.
    Waiting,

    /// Reading the article back from the datastore.
    Fetching,

    /// Generate completed; the draft is in the operator's hands.
    Ready,

    /// Publish completed (the verification result lives in the report).
    Published,

    /// The choreography stopped on an error.
    Failed,
}

impl RequestState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestState::Ready | RequestState::Published | RequestState::Failed
        )
    }
}

/// One choreography run.
///
/// Same pattern as the article rows: plain data, transitions via methods so
/// `updated_at` can never be forgotten. Timestamps come in from the caller's
/// clock so tests can pin them.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub request_id: RequestId,
    pub kind: RequestKind,
    pub keyword: Keyword,
    pub state: RequestState,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RequestRecord {
    pub fn new(
        request_id: RequestId,
        kind: RequestKind,
        keyword: Keyword,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id,
            kind,
            keyword,
            state: RequestState::Dispatched,
            last_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_waiting(&mut self, now: DateTime<Utc>) {
        self.state = RequestState::Waiting;
        self.updated_at = now;
    }

    pub fn mark_fetching(&mut self, now: DateTime<Utc>) {
        self.state = RequestState::Fetching;
        self.updated_at = now;
    }

    pub fn mark_ready(&mut self, now: DateTime<Utc>) {
        self.state = RequestState::Ready;
        self.updated_at = now;
    }

    pub fn mark_published(&mut self, now: DateTime<Utc>) {
        self.state = RequestState::Published;
        self.updated_at = now;
    }

    pub fn mark_failed(&mut self, error: String, now: DateTime<Utc>) {
        self.state = RequestState::Failed;
        self.last_error = Some(error);
        self.updated_at = now;
    }
}
