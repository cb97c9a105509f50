//! Offline article database commands.

use clap::{Args, Subcommand};
use std::path::PathBuf;
use wikiqa_core::{config::AppConfig, AppResult};
use wikiqa_wiki::{DatabaseStats, SqliteClient};

/// Inspect the offline article database
#[derive(Args, Debug)]
pub struct DbCommand {
    #[command(subcommand)]
    pub action: DbAction,
}

#[derive(Subcommand, Debug)]
pub enum DbAction {
    /// Show database statistics
    Stats(DbStatsCommand),

    /// Search article titles and content
    Search(DbSearchCommand),
}

/// Show database statistics
#[derive(Args, Debug)]
pub struct DbStatsCommand {
    /// Database file (default: wiki.database from config)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl DbStatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing db stats command");

        let db = open_database(config, self.database.as_ref())?;
        let stats = db.stats()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            print_stats(&stats);
        }

        Ok(())
    }
}

/// Search article titles and content
#[derive(Args, Debug)]
pub struct DbSearchCommand {
    /// Substring to look for
    pub query: String,

    /// Maximum number of results
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: u32,

    /// Database file (default: wiki.database from config)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl DbSearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing db search command for {:?}", self.query);

        let db = open_database(config, self.database.as_ref())?;
        let hits = db.search_articles(&self.query, self.limit)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&hits)?);
            return Ok(());
        }

        if hits.is_empty() {
            println!("No articles found for \"{}\"", self.query);
            return Ok(());
        }

        println!("Found {} articles for \"{}\":", hits.len(), self.query);
        for (rank, hit) in hits.iter().enumerate() {
            println!(
                "{}. {} ({} words, importance {:.3})",
                rank + 1,
                hit.title,
                hit.word_count,
                hit.importance_score
            );
            if !hit.preview.is_empty() {
                println!("   {}...", hit.preview.replace('\n', " "));
            }
        }

        Ok(())
    }
}

impl DbCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            DbAction::Stats(cmd) => cmd.execute(config).await,
            DbAction::Search(cmd) => cmd.execute(config).await,
        }
    }
}

fn open_database(config: &AppConfig, database: Option<&PathBuf>) -> AppResult<SqliteClient> {
    let path = database.cloned().unwrap_or_else(|| config.database_path());
    tracing::debug!("Opening article database {:?}", path);
    SqliteClient::open(&path, config.wiki.article_base_url())
}

fn print_stats(stats: &DatabaseStats) {
    println!("Article database: {}", stats.path.display());

    println!("  Articles: {}", stats.total_articles);
    println!("  Total words: {}", stats.total_words);
    println!("  Size: {:.2} MB", stats.size_mb());
    println!("  Average words: {:.0}", stats.avg_words);
    println!("  Shortest article: {} words", stats.min_words);
    println!("  Longest article: {} words", stats.max_words);

    println!("Importance:");
    println!("  Average: {:.3}", stats.avg_importance);
    println!("  Min: {:.3}", stats.min_importance);
    println!("  Max: {:.3}", stats.max_importance);

    println!("Search index:");
    println!("  Keywords: {}", stats.total_keywords);
    println!("  Unique keywords: {}", stats.unique_keywords);
    println!(
        "  Keywords per article: {:.1}",
        stats.total_keywords as f64 / stats.total_articles.max(1) as f64
    );

    if !stats.top_categories.is_empty() {
        println!("Top categories:");
        for category in &stats.top_categories {
            let name: String = category.category.chars().take(25).collect();
            println!(
                "  {:<25} {:>6} articles ({:.0} avg words)",
                name, category.count, category.avg_words
            );
        }
    }

    if !stats.recent_articles.is_empty() {
        println!("Recently updated:");
        for article in &stats.recent_articles {
            println!(
                "  {} ({} words, importance {:.3}, updated {})",
                article.title,
                article.word_count,
                article.importance_score,
                article.last_updated.as_deref().unwrap_or("unknown")
            );
        }
    }
}
