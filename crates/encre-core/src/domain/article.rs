//! Article records and the operator-editable draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::text;

use super::errors::PipelineError;
use super::ids::ArticleId;
use super::keyword::Keyword;

/// An article row as the datastore returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub keyword: Keyword,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// The editable working copy the operator reviews before publication.
    pub fn into_draft(self) -> ArticleDraft {
        ArticleDraft {
            title: self.title,
            keyword: self.keyword,
            content: self.content,
        }
    }

    /// URL slug derived from the title.
    pub fn slug(&self) -> String {
        text::slug(&self.title)
    }

    /// Short teaser derived from the content.
    pub fn excerpt(&self, max_length: usize) -> String {
        text::excerpt(&self.content, max_length)
    }

    /// Estimated reading time of the content.
    pub fn reading_time(&self) -> text::ReadingTime {
        text::reading_time(&self.content)
    }
}

/// What the operator edits between generation and publication.
///
/// The keyword is carried along read-only (it is the datastore lookup key);
/// title and content are free to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub keyword: Keyword,
    pub content: String,
}

impl ArticleDraft {
    /// Publication needs something to publish.
    pub fn ensure_publishable(&self) -> Result<(), PipelineError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(PipelineError::IncompleteDraft);
        }
        Ok(())
    }
}

/// Publication status of an article, as the listing filters see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Draft,
    Published,
}

/// Listing filter: by status and/or free-text search over title, keyword
/// and content.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub status: Option<ArticleStatus>,
    pub search: Option<String>,
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleOrder {
    #[default]
    NewestFirst,
    OldestFirst,
    Alphabetical,
}

/// Apply a filter and an ordering to a fetched article list.
///
/// Pure function over the rows; the datastore is only ever asked for the
/// whole list and the narrowing happens here, in memory.
pub fn filter_and_sort(
    articles: Vec<Article>,
    filter: &ArticleFilter,
    order: ArticleOrder,
) -> Vec<Article> {
    let needle = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut rows: Vec<Article> = articles
        .into_iter()
        .filter(|article| {
            let status_ok = match filter.status {
                None => true,
                Some(ArticleStatus::Published) => article.published,
                Some(ArticleStatus::Draft) => !article.published,
            };
            let search_ok = needle.as_deref().is_none_or(|needle| {
                article.title.to_lowercase().contains(needle)
                    || article.keyword.as_str().to_lowercase().contains(needle)
                    || article.content.to_lowercase().contains(needle)
            });
            status_ok && search_ok
        })
        .collect();

    match order {
        ArticleOrder::NewestFirst => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ArticleOrder::OldestFirst => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ArticleOrder::Alphabetical => {
            rows.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ulid::Ulid;

    fn article(title: &str, keyword: &str, published: bool, day: u32) -> Article {
        Article {
            id: ArticleId::from_ulid(Ulid::new()),
            title: title.to_string(),
            keyword: Keyword::new(keyword).unwrap(),
            content: format!("Body of {title}."),
            published,
            created_at: Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn row_roundtrips_through_json() {
        let row = article("Getting started with Rust", "rust", false, 1);
        let json = serde_json::to_string(&row).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);

        // The row shape the datastore contract promises.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for field in ["id", "title", "keyword", "content", "published", "created_at"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn text_helpers_work_off_title_and_content() {
        let row = article("Génération d'Articles", "seo", false, 1);
        assert_eq!(row.slug(), "generation-darticles");
        assert!(row.excerpt(20).chars().count() <= 20);
        assert_eq!(row.reading_time().minutes(), 1);
    }

    #[test]
    fn draft_keeps_the_keyword() {
        let row = article("Getting started with Rust", "rust", false, 1);
        let draft = row.clone().into_draft();
        assert_eq!(draft.keyword, row.keyword);
        assert_eq!(draft.title, row.title);
    }

    #[test]
    fn empty_drafts_are_not_publishable() {
        let mut draft = article("T", "rust", false, 1).into_draft();
        draft.content = "   ".to_string();
        assert!(matches!(
            draft.ensure_publishable(),
            Err(PipelineError::IncompleteDraft)
        ));

        let mut draft = article("T", "rust", false, 1).into_draft();
        draft.title = String::new();
        assert!(draft.ensure_publishable().is_err());
    }

    #[test]
    fn filter_by_status() {
        let rows = vec![
            article("Draft one", "a", false, 1),
            article("Published one", "b", true, 2),
        ];

        let published = filter_and_sort(
            rows.clone(),
            &ArticleFilter {
                status: Some(ArticleStatus::Published),
                search: None,
            },
            ArticleOrder::NewestFirst,
        );
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Published one");

        let drafts = filter_and_sort(
            rows,
            &ArticleFilter {
                status: Some(ArticleStatus::Draft),
                search: None,
            },
            ArticleOrder::NewestFirst,
        );
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Draft one");
    }

    #[test]
    fn search_matches_title_keyword_and_content() {
        let rows = vec![
            article("Cloud costs", "finops", false, 1),
            article("Unrelated", "gardening", false, 2),
        ];

        let hits = filter_and_sort(
            rows,
            &ArticleFilter {
                status: None,
                search: Some("FINOPS".to_string()),
            },
            ArticleOrder::NewestFirst,
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].keyword.as_str(), "finops");
    }

    #[test]
    fn ordering_variants() {
        let rows = vec![
            article("Bravo", "b", false, 2),
            article("Alpha", "a", false, 1),
            article("Charlie", "c", false, 3),
        ];

        let newest = filter_and_sort(rows.clone(), &ArticleFilter::default(), ArticleOrder::NewestFirst);
        assert_eq!(newest[0].title, "Charlie");

        let oldest = filter_and_sort(rows.clone(), &ArticleFilter::default(), ArticleOrder::OldestFirst);
        assert_eq!(oldest[0].title, "Alpha");

        let alpha = filter_and_sort(rows, &ArticleFilter::default(), ArticleOrder::Alphabetical);
        assert_eq!(alpha[0].title, "Alpha");
        assert_eq!(alpha[2].title, "Charlie");
    }
}
