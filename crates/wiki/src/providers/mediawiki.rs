//! MediaWiki encyclopedia provider.
//!
//! Talks to a MediaWiki `api.php` endpoint (Wikipedia by default) using the
//! `query` action: `list=search` for search and suggestions, and
//! `prop=extracts|info|categories` for article content.
//! API reference: https://www.mediawiki.org/wiki/API:Main_page

use crate::client::{clamp_limit, Article, EncyclopediaClient, SearchCandidate, MAX_CATEGORIES};
use crate::text::{article_url, count_words, strip_markup};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use wikiqa_core::{AppError, AppResult, WikiConfig};

/// Page id the content endpoint reports for a title with no page.
const MISSING_PAGE_ID: &str = "-1";

/// Envelope shared by every `action=query` response.
#[derive(Debug, Deserialize)]
struct QueryEnvelope<Q> {
    query: Option<Q>,
    #[serde(default)]
    error: Option<ApiError>,
}

/// Error object MediaWiki returns alongside HTTP 200.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    searchinfo: Option<SearchInfo>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
    #[serde(default)]
    pageid: u64,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    wordcount: u64,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentQuery {
    #[serde(default)]
    pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: Option<serde_json::Value>,
    #[serde(default)]
    invalid: Option<serde_json::Value>,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    fullurl: Option<String>,
    #[serde(default)]
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    title: String,
}

/// MediaWiki encyclopedia client.
pub struct MediaWikiClient {
    /// `api.php` endpoint
    endpoint: String,

    /// Base URL for `/wiki/<Title>` links
    article_base: String,

    /// HTTP client
    client: reqwest::Client,
}

impl MediaWikiClient {
    /// Create a client from configuration.
    ///
    /// The timeout and User-Agent apply to every request made by this client.
    pub fn new(config: &WikiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.api_endpoint(),
            article_base: config.article_base_url(),
            client,
        })
    }

    /// Create a client against an explicit endpoint with default HTTP settings.
    pub fn with_endpoint(endpoint: impl Into<String>, article_base: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            article_base: article_base.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The `api.php` URL this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one GET against the endpoint and return the body text.
    async fn get(&self, params: &[(&str, &str)]) -> AppResult<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to reach encyclopedia: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream(format!(
                "Encyclopedia API error ({}): {}",
                status, error_text
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read encyclopedia response: {}", e)))
    }
}

/// Decode an envelope, surfacing API-level errors as upstream failures.
fn decode<Q: serde::de::DeserializeOwned>(body: &str) -> AppResult<Option<Q>> {
    let envelope: QueryEnvelope<Q> = serde_json::from_str(body)
        .map_err(|e| AppError::Upstream(format!("Malformed encyclopedia response: {}", e)))?;

    if let Some(error) = envelope.error {
        return Err(AppError::Upstream(format!(
            "Encyclopedia API error ({}): {}",
            error.code, error.info
        )));
    }

    Ok(envelope.query)
}

/// Parse a `list=search` response into ranked candidates.
fn parse_search(body: &str) -> AppResult<Vec<SearchCandidate>> {
    // A query with no hits may omit the `query` object entirely.
    let Some(query) = decode::<SearchQuery>(body)? else {
        return Ok(Vec::new());
    };

    Ok(query
        .search
        .into_iter()
        .map(|hit| SearchCandidate {
            title: hit.title,
            snippet: strip_markup(&hit.snippet),
            page_id: hit.pageid,
            byte_size: hit.size,
            word_count: hit.wordcount,
            last_modified: hit.timestamp,
        })
        .collect())
}

/// Pull the suggestion out of a `srinfo=suggestion` response.
fn parse_suggestion(body: &str) -> AppResult<Option<String>> {
    let suggestion = decode::<SearchQuery>(body)?
        .and_then(|query| query.searchinfo)
        .and_then(|info| info.suggestion)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(suggestion)
}

/// Parse a `prop=extracts|info|categories` response for `title`.
fn parse_article(title: &str, body: &str, article_base: &str) -> AppResult<Article> {
    let query = decode::<ContentQuery>(body)?.ok_or_else(|| {
        AppError::Upstream("Encyclopedia response has no query object".to_string())
    })?;

    if query.pages.contains_key(MISSING_PAGE_ID) {
        return Err(AppError::NotFound(format!("No article titled '{}'", title)));
    }

    let (_, page) = query
        .pages
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("No article titled '{}'", title)))?;

    if page.missing.is_some() || page.invalid.is_some() {
        return Err(AppError::NotFound(format!("No article titled '{}'", title)));
    }

    let title = if page.title.is_empty() {
        title.to_string()
    } else {
        page.title
    };
    let extract = page.extract.unwrap_or_default();
    let url = page
        .fullurl
        .unwrap_or_else(|| article_url(article_base, &title));
    let categories = page
        .categories
        .into_iter()
        .map(|c| {
            c.title
                .strip_prefix("Category:")
                .unwrap_or(&c.title)
                .to_string()
        })
        .take(MAX_CATEGORIES)
        .collect();

    Ok(Article {
        word_count: count_words(&extract),
        title,
        extract,
        url,
        categories,
    })
}

#[async_trait::async_trait]
impl EncyclopediaClient for MediaWikiClient {
    fn provider_name(&self) -> &str {
        "mediawiki"
    }

    async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<SearchCandidate>> {
        let limit = clamp_limit(limit).to_string();
        tracing::debug!("Searching encyclopedia for {:?} (limit {})", query, limit);

        let body = self
            .get(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("srprop", "snippet|size|wordcount|timestamp"),
            ])
            .await?;

        let candidates = parse_search(&body)?;
        tracing::debug!("Search returned {} candidates", candidates.len());
        Ok(candidates)
    }

    async fn suggest(&self, query: &str) -> AppResult<Option<String>> {
        tracing::debug!("Requesting suggestion for {:?}", query);

        let body = self
            .get(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", query),
                ("srinfo", "suggestion"),
                ("srprop", ""),
                ("srlimit", "1"),
            ])
            .await?;

        parse_suggestion(&body)
    }

    async fn fetch_article(&self, title: &str) -> AppResult<Article> {
        tracing::debug!("Fetching article {:?}", title);

        let body = self
            .get(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts|info|categories"),
                ("explaintext", "1"),
                ("exsectionformat", "plain"),
                ("inprop", "url"),
                ("clshow", "!hidden"),
                ("cllimit", "5"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;

        let article = parse_article(title, &body, &self.article_base)?;
        tracing::debug!(
            "Fetched '{}' ({} words, {} categories)",
            article.title,
            article.word_count,
            article.categories.len()
        );
        Ok(article)
    }

    fn article_url(&self, title: &str) -> String {
        article_url(&self.article_base, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://en.wikipedia.org/wiki/";

    #[test]
    fn test_client_creation_from_config() {
        let client = MediaWikiClient::new(&WikiConfig::default()).unwrap();
        assert_eq!(client.provider_name(), "mediawiki");
        assert_eq!(client.endpoint(), "https://en.wikipedia.org/w/api.php");
        assert_eq!(
            client.article_url("Alan Turing"),
            "https://en.wikipedia.org/wiki/Alan_Turing"
        );
    }

    #[test]
    fn test_parse_search_keeps_rank_order() {
        let body = r#"{
            "batchcomplete": "",
            "query": {
                "searchinfo": {"totalhits": 2},
                "search": [
                    {"ns": 0, "title": "Quantum computing", "pageid": 25220,
                     "size": 120034, "wordcount": 14210,
                     "snippet": "<span class=\"searchmatch\">Quantum</span> computing",
                     "timestamp": "2024-05-01T12:00:00Z"},
                    {"ns": 0, "title": "Qubit", "pageid": 25284,
                     "size": 40000, "wordcount": 5000,
                     "snippet": "a <span class=\"searchmatch\">quantum</span> bit",
                     "timestamp": "2024-04-01T08:30:00Z"}
                ]
            }
        }"#;

        let candidates = parse_search(body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "Quantum computing");
        assert_eq!(candidates[0].snippet, "Quantum computing");
        assert_eq!(candidates[0].page_id, 25220);
        assert_eq!(candidates[0].word_count, 14210);
        assert!(candidates[0].last_modified.is_some());
        assert_eq!(candidates[1].title, "Qubit");
    }

    #[test]
    fn test_parse_search_empty() {
        let body = r#"{"query": {"searchinfo": {"totalhits": 0}, "search": []}}"#;
        assert!(parse_search(body).unwrap().is_empty());
        assert!(parse_search(r#"{"batchcomplete": ""}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_search_malformed_is_upstream_error() {
        let result = parse_search("<html>rate limited</html>");
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[test]
    fn test_parse_search_api_error_is_upstream_error() {
        let body = r#"{"error": {"code": "maxlag", "info": "Waiting for a database server"}}"#;
        match parse_search(body) {
            Err(AppError::Upstream(msg)) => assert!(msg.contains("maxlag")),
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_suggestion() {
        let body = r#"{"query": {"searchinfo": {"totalhits": 0, "suggestion": "albert einstein"}, "search": []}}"#;
        assert_eq!(
            parse_suggestion(body).unwrap(),
            Some("albert einstein".to_string())
        );

        let none = r#"{"query": {"searchinfo": {"totalhits": 0}, "search": []}}"#;
        assert_eq!(parse_suggestion(none).unwrap(), None);

        let blank = r#"{"query": {"searchinfo": {"suggestion": "  "}, "search": []}}"#;
        assert_eq!(parse_suggestion(blank).unwrap(), None);
    }

    #[test]
    fn test_parse_article() {
        let body = r#"{
            "query": {
                "pages": {
                    "25220": {
                        "pageid": 25220, "ns": 0, "title": "Quantum computing",
                        "extract": "A quantum computer is a computer.\nIt exploits quantum mechanics.",
                        "fullurl": "https://en.wikipedia.org/wiki/Quantum_computing",
                        "categories": [
                            {"ns": 14, "title": "Category:Quantum computing"},
                            {"ns": 14, "title": "Category:Models of computation"}
                        ]
                    }
                }
            }
        }"#;

        let article = parse_article("Quantum computing", body, BASE).unwrap();
        assert_eq!(article.title, "Quantum computing");
        assert_eq!(article.url, "https://en.wikipedia.org/wiki/Quantum_computing");
        assert_eq!(
            article.categories,
            vec!["Quantum computing", "Models of computation"]
        );
        assert_eq!(article.word_count, 10);
    }

    #[test]
    fn test_parse_article_caps_categories() {
        let categories: Vec<String> = (0..8)
            .map(|i| format!(r#"{{"ns": 14, "title": "Category:C{}"}}"#, i))
            .collect();
        let body = format!(
            r#"{{"query": {{"pages": {{"1": {{"pageid": 1, "title": "T", "extract": "x", "categories": [{}]}}}}}}}}"#,
            categories.join(",")
        );

        let article = parse_article("T", &body, BASE).unwrap();
        assert_eq!(article.categories.len(), MAX_CATEGORIES);
        assert_eq!(article.url, "https://en.wikipedia.org/wiki/T");
    }

    #[test]
    fn test_parse_article_missing_page_is_not_found() {
        let body = r#"{"query": {"pages": {"-1": {"ns": 0, "title": "Asdkjaslkdj", "missing": ""}}}}"#;
        let result = parse_article("Asdkjaslkdj", body, BASE);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_parse_article_without_query_is_upstream_error() {
        let result = parse_article("T", r#"{"batchcomplete": ""}"#, BASE);
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    /// Serve one canned HTTP response on a local port and return the endpoint.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/w/api.php", addr)
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_error() {
        let endpoint = serve_once("503 Service Unavailable", "maintenance").await;
        let client = MediaWikiClient::with_endpoint(endpoint, BASE);

        match client.search("quantum computing", 3).await {
            Err(AppError::Upstream(msg)) => {
                assert!(msg.contains("503"), "unexpected message: {}", msg);
                assert!(msg.contains("maintenance"));
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = MediaWikiClient::with_endpoint(format!("http://{}/w/api.php", addr), BASE);

        match client.fetch_article("Alan Turing").await {
            Err(AppError::Upstream(msg)) => assert!(msg.contains("Failed to reach encyclopedia")),
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_body_is_parsed() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"query":{"search":[{"title":"Volcano","pageid":7,"snippet":"A <b>volcano</b>"}]}}"#,
        )
        .await;
        let client = MediaWikiClient::with_endpoint(endpoint, BASE);

        let hits = client.search("volcano", 3).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Volcano");
        assert_eq!(hits[0].page_id, 7);
        assert_eq!(hits[0].snippet, "A volcano");
    }
}
