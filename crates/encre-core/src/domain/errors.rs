//! Pipeline errors.
//!
//! Every failure the choreography can hit maps to one variant here, and the
//! `Display` text is the plain status string shown to the operator. Nothing
//! is retried automatically and nothing escalates; the request record keeps
//! the message and the pipeline goes back to idle.

use thiserror::Error;

/// Operational classification of a pipeline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local input validation failed; nothing left the process.
    Invalid,

    /// Transport-level failure (connect, timeout, broken body).
    Network,

    /// The remote answered and said no (non-2xx status or an explicit
    /// refusal in the receipt).
    Remote,

    /// The datastore has no row for the keyword yet.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("keyword must not be empty")]
    EmptyKeyword,

    #[error("draft needs a non-empty title and content before publication")]
    IncompleteDraft,

    #[error("network error: {message}")]
    Network { message: String },

    #[error("remote rejected the request (status {status}): {message}")]
    RemoteRejected { status: u16, message: String },

    #[error("remote declined the publication: {message}")]
    PublicationRefused { message: String },

    #[error("no article found yet for keyword \"{keyword}\"")]
    NotFoundYet { keyword: String },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::EmptyKeyword | PipelineError::IncompleteDraft => ErrorKind::Invalid,
            PipelineError::Network { .. } => ErrorKind::Network,
            PipelineError::RemoteRejected { .. } | PipelineError::PublicationRefused { .. } => {
                ErrorKind::Remote
            }
            PipelineError::NotFoundYet { .. } => ErrorKind::Missing,
        }
    }
}
