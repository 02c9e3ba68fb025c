//! Pipeline: the generate → wait → fetch → publish → verify choreography.
//!
//! One linear flow per operator action, no worker pool and no queue: the
//! remote workflow engine does the heavy lifting, this side dispatches a
//! webhook, waits a fixed delay, and reads the datastore back. Failures stop
//! the flow and end up as a status string on the request record; nothing is
//! retried automatically.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::PipelineConfig;
use crate::domain::{
    Article, ArticleDraft, ArticleFilter, ArticleOrder, Keyword, PipelineError, RequestId,
    RequestKind, RequestRecord, filter_and_sort,
};
use crate::ports::{
    ArticleStore, Clock, GenerationWebhook, IdGenerator, PublishWebhook, SystemClock,
    UlidGenerator,
};

use super::status::{RequestCounts, RequestStatus};

/// What `publish` hands back: the remote's receipt message plus the result
/// of the read-back verification. An accepted publication that is not yet
/// visible in the datastore is a report, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReport {
    pub message: Option<String>,
    pub verified: bool,
    pub article: Option<Article>,
}

impl PublishReport {
    pub fn status_line(&self) -> String {
        let base = if self.verified {
            "article published and visible in the datastore"
        } else {
            "publication accepted, not yet visible in the datastore"
        };
        match &self.message {
            Some(message) => format!("{base} ({message})"),
            None => base.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("missing port: {0}. The pipeline cannot run without it.")]
    MissingPort(&'static str),
}

/// Wires the pipeline's ports together, failing fast on anything missing.
///
/// Clock and id generation default to the system implementations; the
/// webhooks and the store have no sensible default and must be provided.
#[derive(Default)]
pub struct PipelineBuilder {
    generation: Option<Arc<dyn GenerationWebhook>>,
    publication: Option<Arc<dyn PublishWebhook>>,
    store: Option<Arc<dyn ArticleStore>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    config: Option<PipelineConfig>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation_webhook(mut self, webhook: Arc<dyn GenerationWebhook>) -> Self {
        self.generation = Some(webhook);
        self
    }

    pub fn publish_webhook(mut self, webhook: Arc<dyn PublishWebhook>) -> Self {
        self.publication = Some(webhook);
        self
    }

    pub fn article_store(mut self, store: Arc<dyn ArticleStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<Pipeline, BuildError> {
        Ok(Pipeline {
            generation: self
                .generation
                .ok_or(BuildError::MissingPort("generation webhook"))?,
            publication: self
                .publication
                .ok_or(BuildError::MissingPort("publish webhook"))?,
            store: self.store.ok_or(BuildError::MissingPort("article store"))?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            ids: self
                .ids
                .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock))),
            config: self.config.unwrap_or_default(),
            history: Mutex::new(Vec::new()),
        })
    }
}

/// The dashboard's request pipeline.
///
/// Holds the port wiring, the timing config, and the in-memory request
/// history (the only local state there is).
pub struct Pipeline {
    generation: Arc<dyn GenerationWebhook>,
    publication: Arc<dyn PublishWebhook>,
    store: Arc<dyn ArticleStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    config: PipelineConfig,
    history: Mutex<Vec<RequestRecord>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the generation choreography for one keyword: dispatch the
    /// webhook, wait the fixed delay, read the article back.
    pub async fn generate(&self, keyword: Keyword) -> Result<ArticleDraft, PipelineError> {
        let request_id = self.ids.generate_request_id();
        tracing::info!(request = %request_id, keyword = %keyword, "dispatching generation");

        let index = self
            .open_request(request_id, RequestKind::Generate, keyword.clone())
            .await;
        let outcome = self.run_generate(index, &keyword).await;
        self.record_failure(index, outcome.as_ref().err()).await;
        outcome
    }

    async fn run_generate(
        &self,
        index: usize,
        keyword: &Keyword,
    ) -> Result<ArticleDraft, PipelineError> {
        self.generation.trigger_generation(keyword).await?;

        self.transition(index, RequestRecord::mark_waiting).await;
        self.clock.sleep(self.config.generation_wait).await;

        self.transition(index, RequestRecord::mark_fetching).await;
        let article = self
            .store
            .find_by_keyword(keyword)
            .await?
            .ok_or_else(|| PipelineError::NotFoundYet {
                keyword: keyword.to_string(),
            })?;

        tracing::info!(article = %article.id, "generated article retrieved");
        self.transition(index, RequestRecord::mark_ready).await;
        Ok(article.into_draft())
    }

    /// Manual datastore read-back (the operator's "check again" action; the
    /// pipeline itself never re-polls).
    pub async fn fetch(&self, keyword: &Keyword) -> Result<Option<Article>, PipelineError> {
        self.store.find_by_keyword(keyword).await
    }

    /// Run the publication choreography for an edited draft: submit it,
    /// check the receipt, wait the fixed delay, verify the read-back.
    pub async fn publish(&self, draft: ArticleDraft) -> Result<PublishReport, PipelineError> {
        draft.ensure_publishable()?;

        let request_id = self.ids.generate_request_id();
        tracing::info!(request = %request_id, keyword = %draft.keyword, "dispatching publication");

        let index = self
            .open_request(request_id, RequestKind::Publish, draft.keyword.clone())
            .await;
        let outcome = self.run_publish(index, &draft).await;
        self.record_failure(index, outcome.as_ref().err()).await;
        outcome
    }

    async fn run_publish(
        &self,
        index: usize,
        draft: &ArticleDraft,
    ) -> Result<PublishReport, PipelineError> {
        let receipt = self.publication.request_publication(draft).await?;
        if !receipt.success {
            return Err(PipelineError::PublicationRefused {
                message: receipt
                    .message
                    .unwrap_or_else(|| "no reason given".to_string()),
            });
        }

        self.transition(index, RequestRecord::mark_waiting).await;
        self.clock.sleep(self.config.publish_wait).await;

        self.transition(index, RequestRecord::mark_fetching).await;
        let article = self.store.find_by_keyword(&draft.keyword).await?;
        let verified = article.as_ref().is_some_and(|a| a.published);
        if verified {
            tracing::info!(keyword = %draft.keyword, "publication verified");
        } else {
            tracing::warn!(keyword = %draft.keyword, "publication accepted but not visible yet");
        }

        self.transition(index, RequestRecord::mark_published).await;
        Ok(PublishReport {
            message: receipt.message,
            verified,
            article,
        })
    }

    /// Fetch the article list and narrow it in memory.
    pub async fn list_articles(
        &self,
        filter: &ArticleFilter,
        order: ArticleOrder,
    ) -> Result<Vec<Article>, PipelineError> {
        let rows = self.store.list().await?;
        Ok(filter_and_sort(rows, filter, order))
    }

    /// Request history, most recent first.
    pub async fn recent_requests(&self) -> Vec<RequestStatus> {
        let history = self.history.lock().await;
        history.iter().rev().map(RequestStatus::from).collect()
    }

    /// Request tallies by state.
    pub async fn counts(&self) -> RequestCounts {
        let history = self.history.lock().await;
        RequestCounts::tally(&history)
    }

    async fn open_request(
        &self,
        request_id: RequestId,
        kind: RequestKind,
        keyword: Keyword,
    ) -> usize {
        let now = self.clock.now();
        let mut history = self.history.lock().await;
        history.push(RequestRecord::new(request_id, kind, keyword, now));
        history.len() - 1
    }

    async fn transition(
        &self,
        index: usize,
        apply: impl FnOnce(&mut RequestRecord, DateTime<Utc>),
    ) {
        let now = self.clock.now();
        // ロックは遷移ごとに取り直す（await を跨いで保持しない）
        let mut history = self.history.lock().await;
        if let Some(record) = history.get_mut(index) {
            apply(record, now);
        }
    }

    async fn record_failure(&self, index: usize, error: Option<&PipelineError>) {
        if let Some(err) = error {
            let message = err.to_string();
            tracing::warn!(error = %message, "request failed");
            self.transition(index, move |record, now| record.mark_failed(message, now))
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleStatus, ErrorKind};
    use crate::impls::{InMemoryArticleStore, InMemoryWorkflow};
    use crate::ports::{FixedClock, PublishReceipt};
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn fixed_clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    fn demo_pipeline() -> (Pipeline, Arc<InMemoryArticleStore>) {
        let clock = Arc::new(fixed_clock());
        let ids: Arc<dyn IdGenerator> = Arc::new(UlidGenerator::new(fixed_clock()));
        let store = Arc::new(InMemoryArticleStore::new());
        let workflow = Arc::new(InMemoryWorkflow::new(
            store.clone(),
            ids.clone(),
            clock.clone(),
        ));
        let pipeline = Pipeline::builder()
            .generation_webhook(workflow.clone())
            .publish_webhook(workflow)
            .article_store(store.clone())
            .clock(clock)
            .id_generator(ids)
            .build()
            .unwrap();
        (pipeline, store)
    }

    struct SilentWebhook;

    #[async_trait]
    impl GenerationWebhook for SilentWebhook {
        async fn trigger_generation(&self, _keyword: &Keyword) -> Result<(), PipelineError> {
            Ok(())
        }
    }

    struct DownWebhook;

    #[async_trait]
    impl GenerationWebhook for DownWebhook {
        async fn trigger_generation(&self, _keyword: &Keyword) -> Result<(), PipelineError> {
            Err(PipelineError::Network {
                message: "connection refused".to_string(),
            })
        }
    }

    struct RefusingPublisher;

    #[async_trait]
    impl PublishWebhook for RefusingPublisher {
        async fn request_publication(
            &self,
            _draft: &ArticleDraft,
        ) -> Result<PublishReceipt, PipelineError> {
            Ok(PublishReceipt {
                success: false,
                message: Some("editorial quota exceeded".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn generate_returns_a_draft_when_the_workflow_delivers() {
        let (pipeline, _store) = demo_pipeline();
        let keyword = Keyword::new("rust").unwrap();

        let draft = pipeline.generate(keyword.clone()).await.unwrap();
        assert_eq!(draft.keyword, keyword);
        assert!(draft.title.contains("rust"));
        assert!(!draft.content.is_empty());

        let counts = pipeline.counts().await;
        assert_eq!(counts.ready, 1);
        assert_eq!(counts.failed, 0);
    }

    #[tokio::test]
    async fn generate_reports_not_found_yet_when_the_row_is_missing() {
        let store = Arc::new(InMemoryArticleStore::new());
        let pipeline = Pipeline::builder()
            .generation_webhook(Arc::new(SilentWebhook))
            .publish_webhook(Arc::new(RefusingPublisher))
            .article_store(store)
            .clock(Arc::new(fixed_clock()))
            .build()
            .unwrap();

        let err = pipeline
            .generate(Keyword::new("rust").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Missing);
        assert_eq!(err.to_string(), "no article found yet for keyword \"rust\"");

        let recent = pipeline.recent_requests().await;
        assert_eq!(recent.len(), 1);
        assert_eq!(
            recent[0].status_line(),
            "generate \"rust\": no article found yet for keyword \"rust\""
        );
    }

    #[tokio::test]
    async fn generate_surfaces_webhook_network_failures() {
        let store = Arc::new(InMemoryArticleStore::new());
        let pipeline = Pipeline::builder()
            .generation_webhook(Arc::new(DownWebhook))
            .publish_webhook(Arc::new(RefusingPublisher))
            .article_store(store)
            .clock(Arc::new(fixed_clock()))
            .build()
            .unwrap();

        let err = pipeline
            .generate(Keyword::new("rust").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);

        let counts = pipeline.counts().await;
        assert_eq!(counts.failed, 1);
    }

    #[tokio::test]
    async fn publish_verifies_the_published_flag() {
        let (pipeline, store) = demo_pipeline();
        let keyword = Keyword::new("rust").unwrap();

        let mut draft = pipeline.generate(keyword.clone()).await.unwrap();
        draft.title = "Rust, relu et corrigé".to_string();

        let report = pipeline.publish(draft).await.unwrap();
        assert!(report.verified);
        assert!(report.article.is_some());

        let stored = store.find_by_keyword(&keyword).await.unwrap().unwrap();
        assert!(stored.published);
        assert_eq!(stored.title, "Rust, relu et corrigé");

        let counts = pipeline.counts().await;
        assert_eq!(counts.ready, 1);
        assert_eq!(counts.published, 1);
    }

    #[tokio::test]
    async fn publish_rejects_incomplete_drafts_locally() {
        let (pipeline, _store) = demo_pipeline();
        let draft = ArticleDraft {
            title: "T".to_string(),
            keyword: Keyword::new("rust").unwrap(),
            content: "   ".to_string(),
        };

        let err = pipeline.publish(draft).await.unwrap_err();
        assert!(matches!(err, PipelineError::IncompleteDraft));

        // Validation failed before anything was dispatched or recorded.
        assert!(pipeline.recent_requests().await.is_empty());
    }

    #[tokio::test]
    async fn publish_surfaces_a_remote_refusal() {
        let store = Arc::new(InMemoryArticleStore::new());
        let pipeline = Pipeline::builder()
            .generation_webhook(Arc::new(SilentWebhook))
            .publish_webhook(Arc::new(RefusingPublisher))
            .article_store(store)
            .clock(Arc::new(fixed_clock()))
            .build()
            .unwrap();

        let draft = ArticleDraft {
            title: "T".to_string(),
            keyword: Keyword::new("rust").unwrap(),
            content: "Body.".to_string(),
        };
        let err = pipeline.publish(draft).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(
            err.to_string(),
            "remote declined the publication: editorial quota exceeded"
        );
    }

    #[tokio::test]
    async fn fetch_is_a_plain_read_back() {
        let (pipeline, _store) = demo_pipeline();
        let keyword = Keyword::new("rust").unwrap();

        assert!(pipeline.fetch(&keyword).await.unwrap().is_none());
        pipeline.generate(keyword.clone()).await.unwrap();
        assert!(pipeline.fetch(&keyword).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn list_articles_applies_filter_and_order() {
        let (pipeline, _store) = demo_pipeline();
        pipeline
            .generate(Keyword::new("rust").unwrap())
            .await
            .unwrap();
        let draft = pipeline.generate(Keyword::new("go").unwrap()).await.unwrap();
        pipeline.publish(draft).await.unwrap();

        let published = pipeline
            .list_articles(
                &ArticleFilter {
                    status: Some(ArticleStatus::Published),
                    search: None,
                },
                ArticleOrder::NewestFirst,
            )
            .await
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].keyword.as_str(), "go");

        let all = pipeline
            .list_articles(&ArticleFilter::default(), ArticleOrder::Alphabetical)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn builder_fails_fast_on_missing_ports() {
        let err = Pipeline::builder().build().unwrap_err();
        assert!(matches!(err, BuildError::MissingPort(_)));
    }
}
