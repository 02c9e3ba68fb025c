//! HTTP adapter for the workflow engine's webhooks.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::RemoteConfig;
use crate::domain::{ArticleDraft, Keyword, PipelineError};
use crate::ports::{GenerationWebhook, PublishReceipt, PublishWebhook};

use super::into_network_error;

/// One client for both webhooks; they live on the same workflow engine.
pub struct HttpWebhooks {
    client: Client,
    generation_url: String,
    publish_url: String,
}

impl HttpWebhooks {
    pub fn new(remote: &RemoteConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(remote.http_timeout)
            .build()
            .map_err(into_network_error)?;
        Ok(Self {
            client,
            generation_url: remote.generation_webhook_url.clone(),
            publish_url: remote.publish_webhook_url.clone(),
        })
    }
}

#[async_trait]
impl GenerationWebhook for HttpWebhooks {
    async fn trigger_generation(&self, keyword: &Keyword) -> Result<(), PipelineError> {
        let body = serde_json::json!({ "keyword": keyword });
        tracing::info!(url = %self.generation_url, %keyword, "POST generation webhook");

        let response = self
            .client
            .post(&self.generation_url)
            .json(&body)
            .send()
            .await
            .map_err(into_network_error)?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "generation webhook answered");
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PipelineError::RemoteRejected {
                status: status.as_u16(),
                message,
            });
        }

        // The interesting side effect is the datastore row the workflow will
        // write; the response body carries nothing we depend on.
        Ok(())
    }
}

#[async_trait]
impl PublishWebhook for HttpWebhooks {
    async fn request_publication(
        &self,
        draft: &ArticleDraft,
    ) -> Result<PublishReceipt, PipelineError> {
        let body = serde_json::json!({
            "keyword": draft.keyword,
            "title": draft.title,
            "content": draft.content,
        });
        tracing::info!(url = %self.publish_url, keyword = %draft.keyword, "POST publish webhook");

        let response = self
            .client
            .post(&self.publish_url)
            .json(&body)
            .send()
            .await
            .map_err(into_network_error)?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "publish webhook answered");
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PipelineError::RemoteRejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<PublishReceipt>()
            .await
            .map_err(|e| PipelineError::RemoteRejected {
                status: status.as_u16(),
                message: format!("unreadable receipt: {e}"),
            })
    }
}
