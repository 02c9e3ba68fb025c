//! Reading-time estimation.

use std::fmt;

/// Average reading speed the estimate assumes.
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time, in whole minutes (never zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadingTime {
    minutes: usize,
}

impl ReadingTime {
    pub fn minutes(&self) -> usize {
        self.minutes
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.minutes)
    }
}

/// Estimate how long `content` takes to read at 200 words per minute,
/// rounded up. Empty content still reads as one minute.
pub fn reading_time(content: &str) -> ReadingTime {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    ReadingTime { minutes }
}
