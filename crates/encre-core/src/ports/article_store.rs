//! ArticleStore port: read access to the external datastore.
//!
//! The datastore is owned by the workflow engine; this side only ever reads.
//! The keyword is the lookup key for the latest generation (one row per
//! keyword is the remote's invariant, not ours to enforce).

use async_trait::async_trait;

use crate::domain::{Article, Keyword, PipelineError};

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Look up the article generated for `keyword`, if it exists yet.
    async fn find_by_keyword(&self, keyword: &Keyword) -> Result<Option<Article>, PipelineError>;

    /// Fetch every article row. Narrowing (status, search, order) happens
    /// in memory on top of this.
    async fn list(&self) -> Result<Vec<Article>, PipelineError>;
}
