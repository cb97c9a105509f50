//! Ask command handler.
//!
//! Runs the full answer pipeline for one question.

use clap::Args;
use std::time::Duration;
use wikiqa_answer::{AnswerResult, Pipeline};
use wikiqa_core::{config::AppConfig, AnswerStyle, AppError, AppResult};
use wikiqa_wiki::create_client;

/// Answer a question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to answer
    pub question: String,

    /// Answer style: full (three passages), compact or panel (two)
    #[arg(long, value_parser = parse_style, conflicts_with = "compact")]
    pub style: Option<AnswerStyle>,

    /// Shorthand for --style compact
    #[arg(long)]
    pub compact: bool,

    /// Output the answer payload as JSON
    #[arg(long)]
    pub json: bool,

    /// Give up after this many seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let mut answer_config = config.answer.clone();
        answer_config.style = self.style_or(answer_config.style);

        let client = create_client(&config.wiki)?;
        let pipeline = Pipeline::new(client, &answer_config)?;

        // Losing either race drops the pipeline and its in-flight requests
        let result = tokio::select! {
            result = self.answer(&pipeline) => result?,
            _ = tokio::signal::ctrl_c() => {
                return Err(AppError::Other("Interrupted".to_string()));
            }
        };

        self.print(&result)
    }

    /// Style requested on the command line, else `default`.
    pub fn style_or(&self, default: AnswerStyle) -> AnswerStyle {
        match (self.style, self.compact) {
            (Some(style), _) => style,
            (None, true) => AnswerStyle::Compact,
            (None, false) => default,
        }
    }

    async fn answer(&self, pipeline: &Pipeline) -> AppResult<AnswerResult> {
        let run = pipeline.process_question(&self.question);

        match self.timeout {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), run)
                .await
                .map_err(|_| AppError::Upstream(format!("No answer within {}s", secs))),
            None => Ok(run.await),
        }
    }

    fn print(&self, result: &AnswerResult) -> AppResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result.to_payload())?);
            return Ok(());
        }

        match result.response_text() {
            Some(response) if result.success() => {
                println!("{}", response);
                tracing::debug!(
                    "Answered from {} sources in {}ms",
                    result.source_titles().len(),
                    result.processing_time_ms()
                );
                Ok(())
            }
            _ => Err(AppError::Other(
                result
                    .error_message()
                    .unwrap_or("Question could not be answered")
                    .to_string(),
            )),
        }
    }
}

fn parse_style(s: &str) -> Result<AnswerStyle, String> {
    AnswerStyle::parse(s)
        .ok_or_else(|| format!("unknown style '{}' (expected full, compact or panel)", s))
}
