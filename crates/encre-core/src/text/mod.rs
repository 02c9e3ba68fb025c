//! Text normalization helpers for article metadata.
//!
//! - **slug**: URL slugs from titles (lowercase, accent-stripped,
//!   hyphenated, bounded to 100 chars, idempotent)
//! - **excerpt**: short teasers from article bodies, never longer than asked
//! - **reading_time**: minutes-to-read estimate, monotonic in word count

pub mod excerpt;
pub mod reading_time;
pub mod slug;

pub use self::excerpt::{DEFAULT_EXCERPT_LEN, excerpt};
pub use self::reading_time::{ReadingTime, WORDS_PER_MINUTE, reading_time};
pub use self::slug::{slug, unique_slug};
