//! In-memory adapters for tests and the offline demo.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Article, ArticleDraft, Keyword, PipelineError};
use crate::ports::{
    ArticleStore, Clock, GenerationWebhook, IdGenerator, PublishReceipt, PublishWebhook,
};

/// Article rows held in a keyword-keyed map.
///
/// One row per keyword, like the remote datastore: a second generation for
/// the same keyword replaces the first.
pub struct InMemoryArticleStore {
    rows: Mutex<HashMap<String, Article>>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, article: Article) {
        let mut rows = self.rows.lock().await;
        rows.insert(article.keyword.as_str().to_string(), article);
    }

    async fn apply_publication(&self, draft: &ArticleDraft) -> bool {
        let mut rows = self.rows.lock().await;
        match rows.get_mut(draft.keyword.as_str()) {
            Some(row) => {
                row.title = draft.title.clone();
                row.content = draft.content.clone();
                row.published = true;
                true
            }
            None => false,
        }
    }
}

impl Default for InMemoryArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn find_by_keyword(&self, keyword: &Keyword) -> Result<Option<Article>, PipelineError> {
        let rows = self.rows.lock().await;
        Ok(rows.get(keyword.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<Article>, PipelineError> {
        let rows = self.rows.lock().await;
        Ok(rows.values().cloned().collect())
    }
}

/// In-process stand-in for the remote workflow engine.
///
/// The real engine receives a webhook and eventually writes a row to the
/// datastore; this one writes the row synchronously inside the trigger, so
/// the fixed-delay wait always finds it.
pub struct InMemoryWorkflow {
    store: Arc<InMemoryArticleStore>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl InMemoryWorkflow {
    pub fn new(
        store: Arc<InMemoryArticleStore>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, ids, clock }
    }

    fn stub_article(&self, keyword: &Keyword) -> Article {
        Article {
            id: self.ids.generate_article_id(),
            title: format!("Generated article for \"{keyword}\""),
            keyword: keyword.clone(),
            content: stub_content(keyword),
            published: false,
            created_at: self.clock.now(),
        }
    }
}

fn stub_content(keyword: &Keyword) -> String {
    format!(
        "# {keyword}\n\nThis article covers {keyword} in depth. It explains why {keyword} \
         matters, where it shows up in practice, and how to get started without the usual \
         detours. **Key points** are collected at the end.\n\n## Going further\n\nA short \
         checklist closes the article, with pointers for readers who want more than an \
         overview of {keyword}."
    )
}

#[async_trait]
impl GenerationWebhook for InMemoryWorkflow {
    async fn trigger_generation(&self, keyword: &Keyword) -> Result<(), PipelineError> {
        let article = self.stub_article(keyword);
        tracing::debug!(article = %article.id, keyword = %keyword, "demo workflow wrote a row");
        self.store.insert(article).await;
        Ok(())
    }
}

#[async_trait]
impl PublishWebhook for InMemoryWorkflow {
    async fn request_publication(
        &self,
        draft: &ArticleDraft,
    ) -> Result<PublishReceipt, PipelineError> {
        if self.store.apply_publication(draft).await {
            Ok(PublishReceipt {
                success: true,
                message: Some("published".to_string()),
            })
        } else {
            Ok(PublishReceipt {
                success: false,
                message: Some(format!("no article for keyword \"{}\"", draft.keyword)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, UlidGenerator};
    use chrono::{TimeZone, Utc};

    fn workflow() -> (InMemoryWorkflow, Arc<InMemoryArticleStore>) {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        let store = Arc::new(InMemoryArticleStore::new());
        let workflow = InMemoryWorkflow::new(
            store.clone(),
            Arc::new(UlidGenerator::new(clock)),
            Arc::new(clock),
        );
        (workflow, store)
    }

    #[tokio::test]
    async fn trigger_writes_an_unpublished_row() {
        let (workflow, store) = workflow();
        let keyword = Keyword::new("rust").unwrap();

        workflow.trigger_generation(&keyword).await.unwrap();

        let row = store.find_by_keyword(&keyword).await.unwrap().unwrap();
        assert!(!row.published);
        assert_eq!(row.keyword, keyword);
    }

    #[tokio::test]
    async fn second_generation_replaces_the_row() {
        let (workflow, store) = workflow();
        let keyword = Keyword::new("rust").unwrap();

        workflow.trigger_generation(&keyword).await.unwrap();
        let first = store.find_by_keyword(&keyword).await.unwrap().unwrap();
        workflow.trigger_generation(&keyword).await.unwrap();
        let second = store.find_by_keyword(&keyword).await.unwrap().unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn publication_applies_the_edited_draft() {
        let (workflow, store) = workflow();
        let keyword = Keyword::new("rust").unwrap();
        workflow.trigger_generation(&keyword).await.unwrap();

        let mut draft = store
            .find_by_keyword(&keyword)
            .await
            .unwrap()
            .unwrap()
            .into_draft();
        draft.title = "Edited title".to_string();

        let receipt = workflow.request_publication(&draft).await.unwrap();
        assert!(receipt.success);

        let row = store.find_by_keyword(&keyword).await.unwrap().unwrap();
        assert!(row.published);
        assert_eq!(row.title, "Edited title");
    }

    #[tokio::test]
    async fn publication_of_an_unknown_keyword_is_refused() {
        let (workflow, _store) = workflow();
        let draft = ArticleDraft {
            title: "T".to_string(),
            keyword: Keyword::new("missing").unwrap(),
            content: "Body.".to_string(),
        };

        let receipt = workflow.request_publication(&draft).await.unwrap();
        assert!(!receipt.success);
        assert!(receipt.message.unwrap().contains("missing"));
    }
}
