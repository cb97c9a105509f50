//! Encyclopedia provider implementations.

pub mod mediawiki;
pub mod sqlite;

pub use mediawiki::MediaWikiClient;
pub use sqlite::{ArticleHit, CategoryStats, DatabaseStats, RecentArticle, SqliteClient};
