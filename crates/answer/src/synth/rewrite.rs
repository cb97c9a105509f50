//! Conversational rewriting of selected passages.

use super::phrases::{pick, SENTENCE_CONNECTORS, SENTENCE_JOINERS};
use rand::Rng;

/// Sentence fragments this short or shorter are dropped.
pub const MIN_SENTENCE_CHARS: usize = 10;

/// Tunable randomisation for [`rewrite`].
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Maximum sentences kept
    pub max_sentences: usize,

    /// Probability of prefixing a sentence with a connector phrase
    pub connector_probability: f64,

    /// Probability of emphasising a long sentence
    pub emphasis_probability: f64,

    /// Sentences longer than this many characters may be emphasised
    pub emphasis_min_length: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            max_sentences: 4,
            connector_probability: 0.3,
            emphasis_probability: 0.5,
            emphasis_min_length: 100,
        }
    }
}

/// Split text into sentences on `.`, `!` and `?`.
///
/// Each sentence keeps its terminator; a trailing fragment without one gets a
/// period. Fragments of [`MIN_SENTENCE_CHARS`] characters or fewer are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.trim_end_matches(['.', '!', '?']).chars().count() > MIN_SENTENCE_CHARS)
        .map(|s| {
            if s.ends_with(['.', '!', '?']) {
                s.to_string()
            } else {
                format!("{}.", s)
            }
        })
        .collect()
}

/// Rewrite passages into a conversational paragraph.
///
/// Keeps the first `max_sentences` sentences. Each one independently may get
/// a connector phrase and, when long enough, emphasis markers. All sentences
/// are joined with a single joiner chosen once for the whole block.
pub fn rewrite<R: Rng + ?Sized>(rng: &mut R, passages: &str, options: &RewriteOptions) -> String {
    let sentences: Vec<String> = split_sentences(passages)
        .into_iter()
        .take(options.max_sentences)
        .map(|sentence| {
            let long = sentence.chars().count() > options.emphasis_min_length;

            let mut out = if rng.gen::<f64>() < options.connector_probability {
                format!("{}{}", pick(rng, &SENTENCE_CONNECTORS), lowercase_first(&sentence))
            } else {
                sentence
            };

            if long && rng.gen::<f64>() < options.emphasis_probability {
                out = format!("**{}**", out);
            }

            out
        })
        .collect();

    let joiner = pick(rng, &SENTENCE_JOINERS);
    sentences.join(joiner)
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PASSAGE: &str = "Quantum computers use qubits. They can hold superpositions! Really? Very. Error correction remains a major open challenge for the field.";

    fn plain() -> RewriteOptions {
        RewriteOptions {
            max_sentences: 4,
            connector_probability: 0.0,
            emphasis_probability: 0.0,
            emphasis_min_length: 100,
        }
    }

    #[test]
    fn test_split_sentences_drops_fragments() {
        let sentences = split_sentences(PASSAGE);
        assert_eq!(
            sentences,
            vec![
                "Quantum computers use qubits.",
                "They can hold superpositions!",
                "Error correction remains a major open challenge for the field.",
            ]
        );
    }

    #[test]
    fn test_split_sentences_terminates_trailing_fragment() {
        assert_eq!(
            split_sentences("An unfinished thought about rivers"),
            vec!["An unfinished thought about rivers."]
        );
    }

    #[test]
    fn test_rewrite_respects_sentence_budget() {
        let mut rng = StdRng::seed_from_u64(3);
        let options = RewriteOptions {
            max_sentences: 2,
            ..plain()
        };

        let body = rewrite(&mut rng, PASSAGE, &options);
        assert!(body.contains("Quantum computers use qubits."));
        assert!(body.contains("They can hold superpositions!"));
        assert!(!body.contains("Error correction"));
    }

    #[test]
    fn test_rewrite_connectors_lowercase_first_letter() {
        let mut rng = StdRng::seed_from_u64(11);
        let options = RewriteOptions {
            connector_probability: 1.0,
            ..plain()
        };

        let body = rewrite(&mut rng, "Rivers shape the land over millennia.", &options);
        assert!(SENTENCE_CONNECTORS
            .iter()
            .any(|c| body == format!("{}rivers shape the land over millennia.", c)));
    }

    #[test]
    fn test_rewrite_emphasis_only_for_long_sentences() {
        let mut rng = StdRng::seed_from_u64(5);
        let options = RewriteOptions {
            emphasis_probability: 1.0,
            emphasis_min_length: 40,
            ..plain()
        };

        let body = rewrite(&mut rng, PASSAGE, &options);
        assert!(body.contains("**Error correction remains a major open challenge for the field.**"));
        assert!(!body.contains("**Quantum computers use qubits.**"));
    }

    #[test]
    fn test_rewrite_uses_one_joiner() {
        let mut rng = StdRng::seed_from_u64(9);
        let body = rewrite(&mut rng, PASSAGE, &plain());

        let joiner = SENTENCE_JOINERS
            .iter()
            .find(|j| {
                body == [
                    "Quantum computers use qubits.",
                    "They can hold superpositions!",
                    "Error correction remains a major open challenge for the field.",
                ]
                .join(**j)
            });
        assert!(joiner.is_some(), "unexpected body: {}", body);
    }

    #[test]
    fn test_rewrite_empty_passage() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(rewrite(&mut rng, "", &RewriteOptions::default()), "");
    }
}
