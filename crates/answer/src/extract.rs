//! Relevance extractor.
//!
//! Lexical passage ranking: paragraphs of an article extract are scored by
//! how many question words they contain, and the best few are kept. There is
//! no semantic matching.

use unicode_segmentation::UnicodeSegmentation;

/// Paragraphs shorter than this many characters are headers or noise.
pub const MIN_PARAGRAPH_CHARS: usize = 50;

/// Question words this short or shorter are treated as stop words.
pub const STOP_WORD_MAX_CHARS: usize = 3;

/// Paragraphs returned when no paragraph matches any question word.
pub const FALLBACK_PASSAGES: usize = 2;

/// Separator placed between selected passages.
pub const PASSAGE_SEPARATOR: &str = "\n\n";

/// A scored paragraph. Only exists while ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPassage {
    pub text: String,
    pub score: u32,
}

/// Split an extract into candidate paragraphs, in original order.
pub fn paragraphs(extract: &str) -> Vec<&str> {
    extract
        .lines()
        .map(str::trim)
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
        .collect()
}

/// Lowercase question words longer than [`STOP_WORD_MAX_CHARS`].
pub fn question_tokens(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .unicode_words()
        .filter(|w| w.chars().count() > STOP_WORD_MAX_CHARS)
        .map(str::to_string)
        .collect()
}

/// Score one paragraph against the question tokens.
///
/// Every token found as a substring of the lowercased paragraph adds 2 points
/// when longer than three characters and 1 point otherwise.
pub fn score_paragraph(paragraph: &str, tokens: &[String]) -> u32 {
    let lower = paragraph.to_lowercase();
    tokens
        .iter()
        .filter(|token| lower.contains(token.as_str()))
        .map(|token| {
            if token.chars().count() > STOP_WORD_MAX_CHARS {
                2
            } else {
                1
            }
        })
        .sum()
}

/// Rank paragraphs by descending score; ties keep original order.
pub fn rank_passages(extract: &str, question: &str) -> Vec<RankedPassage> {
    let tokens = question_tokens(question);

    let mut ranked: Vec<RankedPassage> = paragraphs(extract)
        .into_iter()
        .map(|text| RankedPassage {
            score: score_paragraph(text, &tokens),
            text: text.to_string(),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Select the passages of `extract` most related to `question`.
///
/// Returns up to `max_passages` top-scored paragraphs joined by a blank line;
/// paragraphs that matched nothing are never selected this way.
/// When nothing matches, returns the first two paragraphs in original order.
/// Short articles yield whatever is available, possibly an empty string.
pub fn extract_passages(extract: &str, question: &str, max_passages: usize) -> String {
    let ranked = rank_passages(extract, question);

    let top_score = ranked.first().map(|p| p.score).unwrap_or(0);
    if top_score == 0 {
        tracing::debug!("No paragraph matched the question; using the article lead");
        return paragraphs(extract)
            .into_iter()
            .take(FALLBACK_PASSAGES)
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR);
    }

    tracing::debug!(
        "Selected passages from {} paragraphs (top score {})",
        ranked.len(),
        top_score
    );

    ranked
        .into_iter()
        .filter(|p| p.score > 0)
        .take(max_passages)
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join(PASSAGE_SEPARATOR)
}
