//! Phrase banks for conversational answers.
//!
//! Every random choice draws uniformly from one of these fixed sets through
//! [`pick`], using whatever random source the caller passes in.

use super::classify::QuestionKind;
use rand::seq::SliceRandom;
use rand::Rng;

pub const OPENERS: [&str; 6] = [
    "Great question!",
    "Here's what I found.",
    "Good question!",
    "Let me explain.",
    "Happy to help with that.",
    "Interesting question!",
];

/// Prepended to individual sentences; the sentence's first letter is lowercased.
pub const SENTENCE_CONNECTORS: [&str; 6] = [
    "Interestingly, ",
    "Notably, ",
    "In fact, ",
    "What's more, ",
    "Additionally, ",
    "Importantly, ",
];

/// One of these joins every sentence of an answer body.
pub const SENTENCE_JOINERS: [&str; 5] = [" ", "\n\n", " Also, ", " Beyond that, ", " On top of that, "];

pub const CLOSINGS: [&str; 5] = [
    "I hope this helps!",
    "Let me know if you'd like to dig deeper.",
    "Feel free to ask a follow-up question.",
    "There's plenty more to explore on this topic.",
    "Want to know more? Just ask!",
];

/// Closings offered for process ("how") answers.
pub const PROCESS_CLOSINGS: [&str; 4] = [
    "I hope that clears up how it works!",
    "Let me know if any step needs more detail.",
    "Feel free to ask about any part of the process.",
    "Want to go deeper into one of the steps? Just ask!",
];

pub const SOURCES_HEADER: &str = "**Sources:**";

pub const RELATED_LABEL: &str = "**Related topics:**";

pub const NO_RESULT_MESSAGES: [&str; 4] = [
    "Don't worry, even the best searches come up empty sometimes!",
    "No luck this time, but let's try a different angle.",
    "That one stumped me, but a small tweak might do the trick.",
    "Sometimes a topic is just phrased differently in the encyclopedia.",
];

pub const RETRY_TIPS_HEADER: &str = "Here are a few things you could try:";

pub const RETRY_TIPS: [&str; 4] = [
    "Check the spelling of key terms",
    "Use more general keywords",
    "Ask about a broader or related topic",
    "Rephrase the question in fewer words",
];

/// Choose one option uniformly at random.
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

/// Closings available for a kind of question.
pub fn closings(kind: QuestionKind) -> &'static [&'static str] {
    match kind {
        QuestionKind::How => &PROCESS_CLOSINGS,
        _ => &CLOSINGS,
    }
}

/// Build the introduction line from an opener, the question kind and the title.
///
/// "What" and "compare" framings keep the title's case; the others lowercase it.
pub fn introduction(kind: QuestionKind, opener: &str, title: &str) -> String {
    let lower = title.to_lowercase();
    match kind {
        QuestionKind::What => format!("{} {} is a fascinating topic. Here's an overview:", opener, title),
        QuestionKind::How => format!("{} Here's how {} works:", opener, lower),
        QuestionKind::Why => format!("{} Here's the reasoning behind {}:", opener, lower),
        QuestionKind::When => format!("{} Here's the timeline of {}:", opener, lower),
        QuestionKind::Compare => format!("{} Let's compare, starting with {}:", opener, title),
        QuestionKind::General => format!("{} Here's what I found about {}:", opener, lower),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_returns_member() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(OPENERS.contains(&pick(&mut rng, &OPENERS)));
        }
    }

    #[test]
    fn test_pick_is_reproducible_with_seed() {
        let first: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| pick(&mut rng, &CLOSINGS)).collect()
        };
        let second: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| pick(&mut rng, &CLOSINGS)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_empty_set() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&mut rng, &[]), "");
    }

    #[test]
    fn test_introduction_title_case() {
        let what = introduction(QuestionKind::What, "Great question!", "Quantum Computing");
        assert!(what.contains("Quantum Computing"));

        let how = introduction(QuestionKind::How, "Great question!", "Quantum Computing");
        assert!(how.contains("quantum computing"));
        assert!(!how.contains("Quantum Computing"));

        let general = introduction(QuestionKind::General, "Let me explain.", "Paris");
        assert!(general.starts_with("Let me explain."));
        assert!(general.contains("paris"));
    }

    #[test]
    fn test_closings_per_kind() {
        assert_eq!(closings(QuestionKind::How).len(), 4);
        assert_eq!(closings(QuestionKind::What).len(), 5);
    }
}
