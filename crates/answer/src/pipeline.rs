//! Pipeline orchestrator.
//!
//! Runs one question through search, fallback, content fetch, extraction and
//! synthesis, in that order. Each step depends on the previous result, so a
//! single invocation never runs calls in parallel; independent invocations
//! share nothing but the client and may run concurrently.

use crate::extract::extract_passages;
use crate::resolver::Resolver;
use crate::synth::{SourceLink, SynthesisOptions, Synthesizer};
use crate::types::{AnswerResult, Question};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;
use wikiqa_core::{AnswerConfig, AppConfig, AppResult};
use wikiqa_wiki::{clamp_limit, create_client, EncyclopediaClient};

/// Pipeline states, logged as each one is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Searching,
    SearchingWithFallback,
    FetchingContent,
    Extracting,
    Synthesizing,
    Done,
    NoResults,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Searching => "searching",
            Stage::SearchingWithFallback => "searching_with_fallback",
            Stage::FetchingContent => "fetching_content",
            Stage::Extracting => "extracting",
            Stage::Synthesizing => "synthesizing",
            Stage::Done => "done",
            Stage::NoResults => "no_results",
        };
        f.write_str(name)
    }
}

fn enter(stage: Stage) {
    tracing::debug!(%stage, "Entering stage");
}

/// How a question was answered, before timing is attached.
enum Outcome {
    Answered {
        response: String,
        source_titles: Vec<String>,
    },
    NoResults(String),
}

/// Question answering pipeline.
pub struct Pipeline {
    client: Arc<dyn EncyclopediaClient>,
    resolver: Resolver,
    synthesizer: Synthesizer,
    search_limit: u32,
    passage_count: usize,
}

impl Pipeline {
    /// Create a pipeline over `client`.
    pub fn new(client: Arc<dyn EncyclopediaClient>, config: &AnswerConfig) -> AppResult<Self> {
        Ok(Self {
            resolver: Resolver::new(Arc::clone(&client)),
            synthesizer: Synthesizer::new(SynthesisOptions::from(config))?,
            client,
            search_limit: clamp_limit(config.search_limit),
            passage_count: config.style.passage_count(),
        })
    }

    /// Create a pipeline with the client selected by the configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = create_client(&config.wiki)?;
        Self::new(client, &config.answer)
    }

    /// Answer a question.
    ///
    /// Never fails: validation and upstream errors come back as a failed
    /// [`AnswerResult`]. Dropping the returned future abandons any in-flight
    /// request to the encyclopedia service.
    pub async fn process_question(&self, question: &str) -> AnswerResult {
        let mut rng = StdRng::from_entropy();
        self.process_question_with_rng(&mut rng, question).await
    }

    /// Answer a question drawing phrasing choices from `rng`.
    pub async fn process_question_with_rng<R>(&self, rng: &mut R, question: &str) -> AnswerResult
    where
        R: Rng + Send + ?Sized,
    {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("answer", %request_id);

        async move {
            let start = Instant::now();
            let outcome = self.run(rng, question).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            let result = match outcome {
                Ok(Outcome::Answered {
                    response,
                    source_titles,
                }) => AnswerResult::answered(response, source_titles, elapsed_ms),
                Ok(Outcome::NoResults(response)) => AnswerResult::no_results(response, elapsed_ms),
                Err(e) => {
                    tracing::warn!("Question failed: {}", e);
                    AnswerResult::failure(&e, elapsed_ms)
                }
            };

            tracing::info!(
                success = result.success(),
                sources = result.source_titles().len(),
                "Question finished in {}ms",
                elapsed_ms
            );
            result
        }
        .instrument(span)
        .await
    }

    async fn run<R>(&self, rng: &mut R, raw: &str) -> AppResult<Outcome>
    where
        R: Rng + Send + ?Sized,
    {
        let question = Question::parse(raw)?;

        enter(Stage::Searching);
        let mut candidates = self.client.search(question.as_str(), self.search_limit).await?;

        if candidates.is_empty() {
            enter(Stage::SearchingWithFallback);
            let suggestion = self.resolver.suggest(question.as_str()).await;
            if suggestion != question.as_str() {
                tracing::debug!("Retrying search with {:?}", suggestion);
                candidates = self.client.search(&suggestion, self.search_limit).await?;
            }
        }

        let Some(top) = candidates.first() else {
            enter(Stage::NoResults);
            let response = self.synthesizer.no_results(rng, question.as_str())?;
            return Ok(Outcome::NoResults(response));
        };

        // Only the top candidate is ever fetched
        enter(Stage::FetchingContent);
        let article = self.client.fetch_article(&top.title).await?;

        enter(Stage::Extracting);
        let mut passages = extract_passages(&article.extract, question.as_str(), self.passage_count);
        if passages.is_empty() {
            passages = top.snippet.clone();
        }

        enter(Stage::Synthesizing);
        let source_titles: Vec<String> = candidates.iter().map(|c| c.title.clone()).collect();
        let sources = [SourceLink {
            title: article.title.clone(),
            url: article.url.clone(),
        }];
        let response = self.synthesizer.synthesize(
            rng,
            question.as_str(),
            &article.title,
            &passages,
            &sources,
            &source_titles,
        )?;

        enter(Stage::Done);
        Ok(Outcome::Answered {
            response,
            source_titles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::SearchingWithFallback.to_string(), "searching_with_fallback");
        assert_eq!(Stage::NoResults.to_string(), "no_results");
    }
}
