//! Search command handler.

use clap::Args;
use wikiqa_core::{config::AppConfig, AppResult};
use wikiqa_wiki::{clamp_limit, create_client, SearchCandidate};

/// Search for articles
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Free-text query
    pub query: String,

    /// Number of results (1-10, default from config)
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");

        let limit = clamp_limit(self.limit.unwrap_or(config.answer.search_limit));
        let client = create_client(&config.wiki)?;
        let hits = client.search(&self.query, limit).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&hits)?);
            return Ok(());
        }

        if hits.is_empty() {
            println!("No articles found for \"{}\"", self.query);
            return Ok(());
        }

        for (rank, hit) in hits.iter().enumerate() {
            println!("{}. {}", rank + 1, describe(hit));
            if !hit.snippet.is_empty() {
                println!("   {}", hit.snippet);
            }
            println!("   {}", client.article_url(&hit.title));
        }

        Ok(())
    }
}

fn describe(hit: &SearchCandidate) -> String {
    let modified = hit
        .last_modified
        .map(|t| format!(", modified {}", t.format("%Y-%m-%d")))
        .unwrap_or_default();

    format!(
        "{} ({} words, {} bytes{})",
        hit.title, hit.word_count, hit.byte_size, modified
    )
}
