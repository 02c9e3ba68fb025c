//! Domain identifiers (strongly-typed IDs).
//!
//! IDs are ULIDs (sortable by creation time, generatable without
//! coordination) wrapped in a phantom-typed `Id<T>` so an `ArticleId` and a
//! `RequestId` can never be mixed up at compile time. Serialization is
//! transparent: an id is the bare 26-char ULID string, which is what the
//! datastore rows carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Marker trait for id types.
///
/// Provides the prefix used by `Display` ("article-", "req-").
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic id type.
///
/// `T` is a zero-sized marker; it costs nothing at runtime but keeps the id
/// spaces apart at compile time.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Marker type for articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArticleTag {}

impl IdMarker for ArticleTag {
    fn prefix() -> &'static str {
        "article-"
    }
}

/// Marker type for pipeline requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestTag {}

impl IdMarker for RequestTag {
    fn prefix() -> &'static str {
        "req-"
    }
}

/// Identifier of an article row in the datastore.
pub type ArticleId = Id<ArticleTag>;

/// Identifier of one choreography run (generate or publish).
pub type RequestId = Id<RequestTag>;
