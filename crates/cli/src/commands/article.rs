//! Article command handler.

use clap::Args;
use wikiqa_core::{config::AppConfig, AppResult};
use wikiqa_wiki::create_client;

/// Fetch one article by exact title
#[derive(Args, Debug)]
pub struct ArticleCommand {
    /// Exact article title
    pub title: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ArticleCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing article command for '{}'", self.title);

        let client = create_client(&config.wiki)?;
        let article = client.fetch_article(&self.title).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&article)?);
            return Ok(());
        }

        println!("# {}", article.title);
        println!("{}", article.url);
        if !article.categories.is_empty() {
            println!("Categories: {}", article.categories.join(", "));
        }
        println!("Words: {}", article.word_count);
        println!();
        println!("{}", article.extract);

        Ok(())
    }
}
