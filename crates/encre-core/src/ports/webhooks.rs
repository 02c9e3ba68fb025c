//! Webhook ports: the two outbound calls to the workflow engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ArticleDraft, Keyword, PipelineError};

/// What the publication webhook answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Triggers article generation.
///
/// Fire-and-forget from the caller's point of view: the remote workflow
/// eventually writes a row to the datastore, nothing useful comes back in
/// the response body.
#[async_trait]
pub trait GenerationWebhook: Send + Sync {
    async fn trigger_generation(&self, keyword: &Keyword) -> Result<(), PipelineError>;
}

/// Submits an edited draft for publication.
///
/// The remote answers synchronously with a receipt; `success == false` means
/// the workflow looked at the draft and declined it.
#[async_trait]
pub trait PublishWebhook: Send + Sync {
    async fn request_publication(&self, draft: &ArticleDraft)
    -> Result<PublishReceipt, PipelineError>;
}
