//! Suggest command handler.

use clap::Args;
use wikiqa_answer::Resolver;
use wikiqa_core::{config::AppConfig, AppResult};
use wikiqa_wiki::create_client;

/// Show the fallback query for a search
#[derive(Args, Debug)]
pub struct SuggestCommand {
    /// Query to correct
    pub query: String,
}

impl SuggestCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing suggest command");

        let resolver = Resolver::new(create_client(&config.wiki)?);
        let suggestion = resolver.suggest(&self.query).await;

        if suggestion == self.query {
            tracing::debug!("No correction found");
        }
        println!("{}", suggestion);

        Ok(())
    }
}
