//! IdGenerator port: mints the ULID-backed ids.
//!
//! ULIDs sort by creation time and need no coordination, which is all this
//! single-operator tool asks of an id. The generator takes its timestamp
//! from a `Clock` so a pinned clock produces ids with a pinned time part.

use ulid::Ulid;

use crate::domain::{ArticleId, RequestId};
use crate::ports::Clock;

pub trait IdGenerator: Send + Sync {
    fn generate_request_id(&self) -> RequestId;

    fn generate_article_id(&self) -> ArticleId;
}

/// ULID-based generator seeded by a clock.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_request_id(&self) -> RequestId {
        RequestId::from(self.next_ulid())
    }

    fn generate_article_id(&self) -> ArticleId {
        ArticleId::from(self.next_ulid())
    }
}
