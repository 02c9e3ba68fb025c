//! Keyword: the single operator-supplied string that seeds a generation and
//! is the lookup key for the resulting article row.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::PipelineError;

/// A validated keyword.
///
/// Construction trims surrounding whitespace and rejects empty input, so a
/// `Keyword` held anywhere in the pipeline is always usable as a lookup key.
/// Deserialization goes through the same validation (`try_from`), so store
/// rows with an empty keyword are rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Keyword(String);

impl Keyword {
    pub fn new(raw: impl Into<String>) -> Result<Self, PipelineError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(PipelineError::EmptyKeyword);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Keyword {
    type Error = PipelineError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Keyword> for String {
    fn from(keyword: Keyword) -> Self {
        keyword.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
