//! HTTP adapter for the article datastore.
//!
//! The datastore exposes a REST row-filter surface: a table endpoint that
//! answers `select`/`column=eq.value` query parameters with a JSON array of
//! rows, authenticated by an api key sent both as the `apikey` header and as
//! a bearer token.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::RemoteConfig;
use crate::domain::{Article, Keyword, PipelineError};
use crate::ports::ArticleStore;

use super::into_network_error;

pub struct HttpArticleStore {
    client: Client,
    articles_url: String,
    api_key: String,
}

impl HttpArticleStore {
    pub fn new(remote: &RemoteConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(remote.http_timeout)
            .build()
            .map_err(into_network_error)?;
        Ok(Self {
            client,
            articles_url: format!("{}/articles", remote.store_url.trim_end_matches('/')),
            api_key: remote.store_api_key.clone(),
        })
    }

    async fn select(&self, query: &[(&str, &str)]) -> Result<Vec<Article>, PipelineError> {
        let response = self
            .client
            .get(&self.articles_url)
            .query(query)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(into_network_error)?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %self.articles_url, "datastore answered");
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PipelineError::RemoteRejected {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(into_network_error)
    }
}

#[async_trait]
impl ArticleStore for HttpArticleStore {
    async fn find_by_keyword(&self, keyword: &Keyword) -> Result<Option<Article>, PipelineError> {
        let filter = format!("eq.{}", keyword.as_str());
        let rows = self
            .select(&[("select", "*"), ("keyword", filter.as_str())])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<Article>, PipelineError> {
        self.select(&[("select", "*"), ("order", "created_at.desc")])
            .await
    }
}
