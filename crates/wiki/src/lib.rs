//! Encyclopedia integration crate for WikiQA.
//!
//! This crate provides a provider-agnostic abstraction over the public
//! encyclopedia API: full-text search, "did you mean" suggestions, and
//! exact-title content lookup.
//!
//! # Providers
//! - **MediaWiki**: the Wikipedia `api.php` endpoint (default)
//! - **SQLite**: a local offline article database
//!
//! # Example
//! ```no_run
//! use wikiqa_core::WikiConfig;
//! use wikiqa_wiki::{create_client, EncyclopediaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client(&WikiConfig::default())?;
//! let hits = client.search("quantum computing", 3).await?;
//! for hit in hits {
//!     println!("{}", hit.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod text;

// Re-export main types
pub use client::{clamp_limit, Article, EncyclopediaClient, SearchCandidate, MAX_CATEGORIES};
pub use factory::create_client;
pub use providers::{
    ArticleHit, CategoryStats, DatabaseStats, MediaWikiClient, RecentArticle, SqliteClient,
};
