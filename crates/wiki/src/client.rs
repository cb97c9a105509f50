//! Encyclopedia client abstraction and the values it returns.
//!
//! This module defines the contract the answer pipeline relies on. Every
//! method performs at most one outbound call and never retries; retry policy
//! belongs to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wikiqa_core::AppResult;

/// Largest number of candidates a single search may request.
pub const MAX_SEARCH_LIMIT: u32 = 10;

/// Maximum number of categories kept on an [`Article`].
pub const MAX_CATEGORIES: usize = 5;

/// A search hit, ordered by the service's relevance ranking (rank 0 = best).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCandidate {
    /// Article title
    pub title: String,

    /// Plain-text snippet around the match
    pub snippet: String,

    /// Numeric page identifier
    pub page_id: u64,

    /// Article size in bytes
    pub byte_size: u64,

    /// Article word count
    pub word_count: u64,

    /// Last modification time, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl SearchCandidate {
    /// Create a candidate with only a title; metadata is zeroed.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: String::new(),
            page_id: 0,
            byte_size: 0,
            word_count: 0,
            last_modified: None,
        }
    }
}

/// A fetched article. Read-only once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Canonical article title
    pub title: String,

    /// Full plain-text extract
    pub extract: String,

    /// Canonical article URL
    pub url: String,

    /// Up to [`MAX_CATEGORIES`] category names
    pub categories: Vec<String>,

    /// Words in the extract
    pub word_count: usize,
}

/// Clamp a requested search limit into `1..=MAX_SEARCH_LIMIT`.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_SEARCH_LIMIT)
}

/// Trait for encyclopedia providers.
///
/// Implementations must be safe to share between concurrently running
/// pipelines; they hold no per-request state.
#[async_trait::async_trait]
pub trait EncyclopediaClient: Send + Sync {
    /// Get the provider name (e.g., "mediawiki").
    fn provider_name(&self) -> &str;

    /// Full-text search.
    ///
    /// Returns candidates in the service's ranking order, possibly empty.
    /// Fails with `AppError::Upstream` on a non-success status or a
    /// malformed payload.
    async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<SearchCandidate>>;

    /// Ask the service for its top "did you mean" suggestion.
    async fn suggest(&self, query: &str) -> AppResult<Option<String>>;

    /// Fetch the article with exactly this title.
    ///
    /// Fails with `AppError::NotFound` when no such page exists.
    async fn fetch_article(&self, title: &str) -> AppResult<Article>;

    /// Canonical URL for a title without fetching it.
    fn article_url(&self, title: &str) -> String;
}
