//! Domain model (IDs, keyword, article records, request history, errors).

pub mod article;
pub mod errors;
pub mod ids;
pub mod keyword;
pub mod request;

pub use article::{Article, ArticleDraft, ArticleFilter, ArticleOrder, ArticleStatus, filter_and_sort};
pub use errors::{ErrorKind, PipelineError};
pub use ids::{ArticleId, RequestId};
pub use keyword::Keyword;
pub use request::{RequestKind, RequestRecord, RequestState};
