//! Spelling/fallback resolver.
//!
//! Produces an alternate query when the original one finds nothing. The
//! service's own "did you mean" suggestion is tried first, then the static
//! misspelling table. The resolver never fails: on any error it falls through
//! and ultimately hands back the original query.

pub mod dictionary;

use std::sync::Arc;
use wikiqa_wiki::EncyclopediaClient;

/// Resolves fallback queries for searches with no hits.
pub struct Resolver {
    client: Arc<dyn EncyclopediaClient>,
}

impl Resolver {
    /// Create a resolver backed by `client`'s suggestion feature.
    pub fn new(client: Arc<dyn EncyclopediaClient>) -> Self {
        Self { client }
    }

    /// Suggest an alternate query, or return `query` unchanged.
    pub async fn suggest(&self, query: &str) -> String {
        match self.client.suggest(query).await {
            Ok(Some(suggestion)) if differs(&suggestion, query) => {
                tracing::debug!("Service suggested {:?} for {:?}", suggestion, query);
                return suggestion;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Suggestion lookup failed, using local dictionary: {}", e);
            }
        }

        let corrected = dictionary::correct(query);
        if differs(&corrected, query) {
            tracing::debug!("Dictionary corrected {:?} to {:?}", query, corrected);
        }
        corrected
    }
}

/// Non-empty and not the same query up to case and surrounding whitespace.
fn differs(candidate: &str, original: &str) -> bool {
    let candidate = candidate.trim();
    !candidate.is_empty() && candidate.to_lowercase() != original.trim().to_lowercase()
}
