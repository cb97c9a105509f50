//! Offline article database provider.
//!
//! Serves search and content lookups from a local SQLite article store with
//! an `articles` table and a keyword `search_index`, so questions can be
//! answered without network access. The store is opened read-only.

use crate::client::{clamp_limit, Article, EncyclopediaClient, SearchCandidate, MAX_CATEGORIES};
use crate::text::{article_url, count_words};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use wikiqa_core::{AppError, AppResult};

/// Characters of article content shown as a search preview.
pub const PREVIEW_CHARS: i64 = 200;

/// Categories listed by [`SqliteClient::stats`].
const TOP_CATEGORIES: i64 = 20;

/// Recently updated articles listed by [`SqliteClient::stats`].
const RECENT_ARTICLES: i64 = 10;

/// One row matched by [`SqliteClient::search_articles`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleHit {
    pub id: i64,
    pub title: String,
    pub word_count: u64,
    pub importance_score: f64,
    /// First [`PREVIEW_CHARS`] characters of the content
    pub preview: String,
    /// Content size in bytes
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Article count and average length for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: String,
    pub count: u64,
    pub avg_words: f64,
}

/// A recently updated article.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentArticle {
    pub title: String,
    pub word_count: u64,
    pub importance_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Summary of the article store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub total_articles: u64,
    pub total_words: u64,
    pub avg_words: f64,
    pub min_words: u64,
    pub max_words: u64,
    pub avg_importance: f64,
    pub min_importance: f64,
    pub max_importance: f64,
    pub top_categories: Vec<CategoryStats>,
    pub recent_articles: Vec<RecentArticle>,
    pub total_keywords: u64,
    pub unique_keywords: u64,
}

impl DatabaseStats {
    /// Database file size in megabytes.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Encyclopedia client backed by a local SQLite article store.
pub struct SqliteClient {
    /// Database file
    path: PathBuf,

    /// Base URL for `/wiki/<Title>` links
    article_base: String,

    /// `rusqlite::Connection` is `Send` but not `Sync`
    conn: Mutex<Connection>,
}

impl SqliteClient {
    /// Open an existing article database read-only.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the file does not exist and
    /// `AppError::Database` if SQLite cannot open it.
    pub fn open(path: impl AsRef<Path>, article_base: impl Into<String>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::Config(format!(
                "Article database not found: {:?}",
                path
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| AppError::Database(format!("Failed to open {:?}: {}", path, e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            article_base: article_base.into(),
            conn: Mutex::new(conn),
        })
    }

    /// The database file this client reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_conn<T>(
        &self,
        action: &str,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> AppResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| AppError::Database("Article database lock poisoned".to_string()))?;
        f(&conn).map_err(|e| AppError::Database(format!("Failed to {}: {}", action, e)))
    }

    /// Substring search over titles and content.
    ///
    /// Results are ordered by importance score, then word count, both
    /// descending.
    pub fn search_articles(&self, query: &str, limit: u32) -> AppResult<Vec<ArticleHit>> {
        let pattern = format!("%{}%", query);

        self.with_conn("search articles", |conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, title,
                       CAST(COALESCE(word_count, 0) AS INTEGER),
                       COALESCE(importance_score, 0.0),
                       substr(COALESCE(content, ''), 1, ?3),
                       length(CAST(COALESCE(content, '') AS BLOB)),
                       last_updated
                FROM articles
                WHERE title LIKE ?1 OR content LIKE ?1
                ORDER BY importance_score DESC, word_count DESC
                LIMIT ?2
                "#,
            )?;

            let hits = stmt
                .query_map(params![pattern, limit, PREVIEW_CHARS], |row| {
                    Ok(ArticleHit {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        word_count: row.get::<_, i64>(2)?.max(0) as u64,
                        importance_score: row.get(3)?,
                        preview: row.get(4)?,
                        size_bytes: row.get::<_, i64>(5)?.max(0) as u64,
                        last_updated: text_value(row.get_ref(6)?),
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(hits)
        })
    }

    /// Gather size, length, category and keyword statistics.
    pub fn stats(&self) -> AppResult<DatabaseStats> {
        let size_bytes = std::fs::metadata(&self.path)?.len();

        let mut stats = self.with_conn("read database statistics", |conn| {
            let (total_articles, total_words, avg_words, min_words, max_words) = conn.query_row(
                r#"
                SELECT COUNT(*), COALESCE(SUM(word_count), 0),
                       AVG(word_count), MIN(word_count), MAX(word_count)
                FROM articles
                "#,
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, Option<f64>>(2)?,
                        row.get::<_, Option<i64>>(3)?,
                        row.get::<_, Option<i64>>(4)?,
                    ))
                },
            )?;

            let (avg_importance, min_importance, max_importance) = conn.query_row(
                "SELECT AVG(importance_score), MIN(importance_score), MAX(importance_score) FROM articles",
                [],
                |row| {
                    Ok((
                        row.get::<_, Option<f64>>(0)?,
                        row.get::<_, Option<f64>>(1)?,
                        row.get::<_, Option<f64>>(2)?,
                    ))
                },
            )?;

            let mut stmt = conn.prepare(
                r#"
                SELECT category, COUNT(*), AVG(word_count)
                FROM articles
                WHERE category IS NOT NULL AND category != ''
                GROUP BY category
                ORDER BY COUNT(*) DESC, category
                LIMIT ?1
                "#,
            )?;
            let top_categories = stmt
                .query_map([TOP_CATEGORIES], |row| {
                    Ok(CategoryStats {
                        category: row.get(0)?,
                        count: row.get::<_, i64>(1)?.max(0) as u64,
                        avg_words: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut stmt = conn.prepare(
                r#"
                SELECT title, CAST(COALESCE(word_count, 0) AS INTEGER),
                       COALESCE(importance_score, 0.0), last_updated
                FROM articles
                ORDER BY last_updated DESC
                LIMIT ?1
                "#,
            )?;
            let recent_articles = stmt
                .query_map([RECENT_ARTICLES], |row| {
                    Ok(RecentArticle {
                        title: row.get(0)?,
                        word_count: row.get::<_, i64>(1)?.max(0) as u64,
                        importance_score: row.get(2)?,
                        last_updated: text_value(row.get_ref(3)?),
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            // Stores built without keyword indexing have no search_index table
            let has_index = conn
                .query_row(
                    "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'search_index'",
                    [],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            let (total_keywords, unique_keywords) = if has_index {
                conn.query_row(
                    "SELECT COUNT(*), COUNT(DISTINCT keyword) FROM search_index",
                    [],
                    |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
                )?
            } else {
                (0, 0)
            };

            Ok(DatabaseStats {
                path: PathBuf::new(),
                size_bytes: 0,
                total_articles: total_articles.max(0) as u64,
                total_words: total_words.max(0) as u64,
                avg_words: avg_words.unwrap_or(0.0),
                min_words: min_words.unwrap_or(0).max(0) as u64,
                max_words: max_words.unwrap_or(0).max(0) as u64,
                avg_importance: avg_importance.unwrap_or(0.0),
                min_importance: min_importance.unwrap_or(0.0),
                max_importance: max_importance.unwrap_or(0.0),
                top_categories,
                recent_articles,
                total_keywords: total_keywords.max(0) as u64,
                unique_keywords: unique_keywords.max(0) as u64,
            })
        })?;

        stats.path = self.path.clone();
        stats.size_bytes = size_bytes;
        Ok(stats)
    }

    /// Look up one article by exact title: `(title, content, category)`.
    fn find_article(&self, title: &str) -> AppResult<Option<(String, String, Option<String>)>> {
        self.with_conn("fetch article", |conn| {
            conn.query_row(
                r#"
                SELECT title, COALESCE(content, ''), category
                FROM articles
                WHERE title = ?1
                ORDER BY id
                LIMIT 1
                "#,
                [title],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
        })
    }
}

/// Render a loosely typed column as text.
fn text_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

/// Parse a stored timestamp, either RFC 3339 or SQLite's `YYYY-MM-DD HH:MM:SS`.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[async_trait::async_trait]
impl EncyclopediaClient for SqliteClient {
    fn provider_name(&self) -> &str {
        "sqlite"
    }

    async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<SearchCandidate>> {
        tracing::debug!("Searching article database for {:?}", query);

        let hits = self.search_articles(query, clamp_limit(limit))?;
        tracing::debug!("Database search returned {} candidates", hits.len());

        Ok(hits
            .into_iter()
            .map(|hit| SearchCandidate {
                last_modified: hit.last_updated.as_deref().and_then(parse_timestamp),
                title: hit.title,
                snippet: hit.preview,
                page_id: hit.id.max(0) as u64,
                byte_size: hit.size_bytes,
                word_count: hit.word_count,
            })
            .collect())
    }

    async fn suggest(&self, query: &str) -> AppResult<Option<String>> {
        // The local store has no spelling index; callers fall back to the dictionary
        tracing::debug!("No database suggestion for {:?}", query);
        Ok(None)
    }

    async fn fetch_article(&self, title: &str) -> AppResult<Article> {
        tracing::debug!("Reading article {:?} from database", title);

        let (title, extract, category) = self
            .find_article(title)?
            .ok_or_else(|| AppError::NotFound(format!("No article titled '{}'", title)))?;

        let categories = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .into_iter()
            .take(MAX_CATEGORIES)
            .collect();

        Ok(Article {
            url: article_url(&self.article_base, &title),
            word_count: count_words(&extract),
            title,
            extract,
            categories,
        })
    }

    fn article_url(&self, title: &str) -> String {
        article_url(&self.article_base, title)
    }
}
