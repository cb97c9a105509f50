//! Question-type classification.

/// The framing an answer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    What,
    How,
    Why,
    When,
    Compare,
    General,
}

/// Classification rules, checked in order; the first rule with a matching
/// pattern wins. Questions matching nothing are [`QuestionKind::General`].
pub const CLASSIFICATION_RULES: &[(QuestionKind, &[&str])] = &[
    (QuestionKind::What, &["what", "what is", "what are"]),
    (QuestionKind::How, &["how", "how does", "how to"]),
    (QuestionKind::Why, &["why", "why is", "why does"]),
    (QuestionKind::When, &["when", "when did", "when was"]),
    (QuestionKind::Compare, &["compare", "difference", "vs"]),
];

impl QuestionKind {
    /// Sentences kept when rewriting passages for this kind of question.
    ///
    /// Process ("how") answers stay shorter.
    pub fn sentence_budget(&self) -> usize {
        match self {
            Self::How => 3,
            _ => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::What => "what",
            Self::How => "how",
            Self::Why => "why",
            Self::When => "when",
            Self::Compare => "compare",
            Self::General => "general",
        }
    }
}

/// Classify a question by its interrogative words.
pub fn classify(question: &str) -> QuestionKind {
    let lower = question.to_lowercase();

    CLASSIFICATION_RULES
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| contains_at_word_start(&lower, p)))
        .map(|(kind, _)| *kind)
        .unwrap_or(QuestionKind::General)
}

/// Case-sensitive substring search that only accepts matches beginning a word,
/// so "show" does not count as "how".
fn contains_at_word_start(haystack: &str, pattern: &str) -> bool {
    haystack.match_indices(pattern).any(|(idx, _)| {
        haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_kind() {
        assert_eq!(classify("What is quantum computing?"), QuestionKind::What);
        assert_eq!(classify("How does photosynthesis work?"), QuestionKind::How);
        assert_eq!(classify("Why is the sky blue?"), QuestionKind::Why);
        assert_eq!(classify("When did World War II end?"), QuestionKind::When);
        assert_eq!(classify("Compare Rust and Go"), QuestionKind::Compare);
        assert_eq!(classify("cats vs dogs"), QuestionKind::Compare);
        assert_eq!(classify("Tell me about Paris"), QuestionKind::General);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("WHY DOES ICE FLOAT"), QuestionKind::Why);
    }

    #[test]
    fn test_rule_priority() {
        // "what" outranks "difference"
        assert_eq!(
            classify("What is the difference between a virus and a bacterium?"),
            QuestionKind::What
        );
        assert_eq!(classify("How and why do stars form?"), QuestionKind::How);
    }

    #[test]
    fn test_patterns_must_start_a_word() {
        assert_eq!(classify("Show me the Eiffel Tower"), QuestionKind::General);
        assert_eq!(classify("Elvsborg fortress"), QuestionKind::General);
        assert_eq!(classify("Key differences of alloys"), QuestionKind::Compare);
    }

    #[test]
    fn test_sentence_budget() {
        assert_eq!(QuestionKind::How.sentence_budget(), 3);
        assert_eq!(QuestionKind::What.sentence_budget(), 4);
        assert_eq!(QuestionKind::General.sentence_budget(), 4);
    }
}
