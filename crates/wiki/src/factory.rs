//! Encyclopedia client factory.
//!
//! Builds the configured provider behind an `Arc<dyn EncyclopediaClient>` so
//! one client can be shared by concurrently running pipelines.

use crate::client::EncyclopediaClient;
use crate::providers::{MediaWikiClient, SqliteClient};
use std::sync::Arc;
use wikiqa_core::{AppError, AppResult, WikiConfig};

/// Create an encyclopedia client from configuration.
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown, the HTTP client
/// cannot be initialised, or the sqlite provider has no database file.
pub fn create_client(config: &WikiConfig) -> AppResult<Arc<dyn EncyclopediaClient>> {
    match config.provider.to_lowercase().as_str() {
        "mediawiki" | "wikipedia" => {
            let client = MediaWikiClient::new(config)?;
            tracing::debug!("Using MediaWiki endpoint {}", client.endpoint());
            Ok(Arc::new(client))
        }
        "sqlite" => {
            let path = config.database.as_ref().ok_or_else(|| {
                AppError::Config("The sqlite provider requires wiki.database".to_string())
            })?;
            let client = SqliteClient::open(path, config.article_base_url())?;
            tracing::debug!("Using article database {:?}", client.path());
            Ok(Arc::new(client))
        }
        other => Err(AppError::Config(format!("Unknown provider: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default_client() {
        let client = create_client(&WikiConfig::default()).unwrap();
        assert_eq!(client.provider_name(), "mediawiki");
    }

    #[test]
    fn test_wikipedia_alias() {
        let mut config = WikiConfig::default();
        config.provider = "Wikipedia".to_string();
        config.language = "nl".to_string();

        let client = create_client(&config).unwrap();
        assert_eq!(
            client.article_url("Amsterdam"),
            "https://nl.wikipedia.org/wiki/Amsterdam"
        );
    }

    #[test]
    fn test_sqlite_provider() {
        let file = tempfile::NamedTempFile::new().unwrap();
        rusqlite::Connection::open(file.path())
            .unwrap()
            .execute_batch("CREATE TABLE articles (id INTEGER PRIMARY KEY, title TEXT, content TEXT, category TEXT);")
            .unwrap();

        let mut config = WikiConfig::default();
        config.provider = "sqlite".to_string();
        config.database = Some(file.path().to_path_buf());

        let client = create_client(&config).unwrap();
        assert_eq!(client.provider_name(), "sqlite");
        assert_eq!(
            client.article_url("Alan Turing"),
            "https://en.wikipedia.org/wiki/Alan_Turing"
        );
    }

    #[test]
    fn test_sqlite_provider_requires_database() {
        let mut config = WikiConfig::default();
        config.provider = "sqlite".to_string();

        match create_client(&config) {
            Err(AppError::Config(msg)) => assert!(msg.contains("wiki.database")),
            Err(other) => panic!("Expected config error, got {}", other),
            Ok(_) => panic!("Expected error without a database path"),
        }
    }

    #[test]
    fn test_unknown_provider() {
        let mut config = WikiConfig::default();
        config.provider = "britannica".to_string();

        match create_client(&config) {
            Err(err) => assert!(err.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
