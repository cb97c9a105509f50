//! Response synthesizer.
//!
//! Turns a question, the fetched article title, the selected passages and the
//! ranked candidate titles into a markdown answer. The layout is fixed; the
//! phrasing is drawn at random from the banks in [`phrases`], so every
//! entry point takes the random source explicitly.

pub mod classify;
pub mod phrases;
pub mod render;
pub mod rewrite;

pub use classify::{classify, QuestionKind};
pub use render::SourceLink;

use rand::Rng;
use render::{AnswerRenderer, AnswerView, NoResultsView};
use rewrite::RewriteOptions;
use wikiqa_core::{AnswerConfig, AppResult};

/// Related titles listed after the sources: ranks 2 and 3.
pub const MAX_RELATED_TITLES: usize = 2;

/// Randomisation knobs for synthesis.
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub connector_probability: f64,
    pub emphasis_probability: f64,
    pub emphasis_min_length: usize,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self::from(&AnswerConfig::default())
    }
}

impl From<&AnswerConfig> for SynthesisOptions {
    fn from(config: &AnswerConfig) -> Self {
        Self {
            connector_probability: config.connector_probability,
            emphasis_probability: config.emphasis_probability,
            emphasis_min_length: config.emphasis_min_length,
        }
    }
}

/// Builds answers from templates and phrase banks.
pub struct Synthesizer {
    renderer: AnswerRenderer,
    options: SynthesisOptions,
}

impl Synthesizer {
    pub fn new(options: SynthesisOptions) -> AppResult<Self> {
        Ok(Self {
            renderer: AnswerRenderer::new()?,
            options,
        })
    }

    /// Synthesize an answer.
    ///
    /// `sources` are the articles the passages came from. `candidate_titles`
    /// are all search candidates in rank order; the ones ranked 2nd and 3rd are
    /// listed as related topics.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        question: &str,
        title: &str,
        passages: &str,
        sources: &[SourceLink],
        candidate_titles: &[String],
    ) -> AppResult<String> {
        let kind = classify(question);
        tracing::debug!("Classified question as {}", kind.as_str());

        let opener = phrases::pick(rng, &phrases::OPENERS);
        let intro = phrases::introduction(kind, opener, title);

        let rewrite_options = RewriteOptions {
            max_sentences: kind.sentence_budget(),
            connector_probability: self.options.connector_probability,
            emphasis_probability: self.options.emphasis_probability,
            emphasis_min_length: self.options.emphasis_min_length,
        };
        let mut body = rewrite::rewrite(rng, passages, &rewrite_options);
        if body.is_empty() {
            body = passages.trim().to_string();
        }

        let closing = phrases::pick(rng, phrases::closings(kind));

        let related = candidate_titles
            .iter()
            .skip(1)
            .take(MAX_RELATED_TITLES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        self.renderer.render_answer(&AnswerView {
            intro: &intro,
            body: &body,
            closing,
            sources_header: phrases::SOURCES_HEADER,
            sources,
            related_label: phrases::RELATED_LABEL,
            related,
        })
    }

    /// The answer given when neither search found anything.
    ///
    /// Quotes `question` back verbatim.
    pub fn no_results<R: Rng + ?Sized>(&self, rng: &mut R, question: &str) -> AppResult<String> {
        self.renderer.render_no_results(&NoResultsView {
            question,
            encouragement: phrases::pick(rng, &phrases::NO_RESULT_MESSAGES),
            tips_header: phrases::RETRY_TIPS_HEADER,
            tips: &phrases::RETRY_TIPS,
        })
    }
}
