//! Encyclopedia question answering.
//!
//! Answers free-text questions from a single encyclopedia article: search,
//! optional spelling fallback, fetch of the top hit, lexical passage
//! selection, and templated answer synthesis.

pub mod extract;
pub mod pipeline;
pub mod resolver;
pub mod synth;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use extract::{extract_passages, RankedPassage};
pub use pipeline::{Pipeline, Stage};
pub use resolver::Resolver;
pub use synth::{classify, QuestionKind, SourceLink, SynthesisOptions, Synthesizer};
pub use types::{AnswerPayload, AnswerResult, Question, MAX_QUESTION_CHARS};
