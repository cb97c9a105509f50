//! Static misspelling table used when the service offers no suggestion.

use unicode_segmentation::UnicodeSegmentation;

/// Known misspelling → correction pairs, lowercase.
///
/// Grouped loosely by domain; extend by adding rows.
pub const MISSPELLINGS: &[(&str, &str)] = &[
    // science
    ("scince", "science"),
    ("sience", "science"),
    ("physcis", "physics"),
    ("phisics", "physics"),
    ("chemestry", "chemistry"),
    ("chemisty", "chemistry"),
    ("biolgy", "biology"),
    ("bilogy", "biology"),
    ("quantom", "quantum"),
    ("quantam", "quantum"),
    ("quantm", "quantum"),
    ("evolusion", "evolution"),
    ("photosynthsis", "photosynthesis"),
    ("gravaty", "gravity"),
    ("atmoshpere", "atmosphere"),
    ("moleclue", "molecule"),
    ("electon", "electron"),
    ("nucleur", "nuclear"),
    ("relativty", "relativity"),
    // history
    ("histroy", "history"),
    ("hisotry", "history"),
    ("ancent", "ancient"),
    ("revolutoin", "revolution"),
    ("civilisaton", "civilization"),
    ("civilzation", "civilization"),
    ("renaissence", "renaissance"),
    ("renaisance", "renaissance"),
    ("medeival", "medieval"),
    ("midieval", "medieval"),
    ("emperer", "emperor"),
    ("pharoah", "pharaoh"),
    // geography
    ("geograpy", "geography"),
    ("goegraphy", "geography"),
    ("contenent", "continent"),
    ("continant", "continent"),
    ("mountian", "mountain"),
    ("vulcano", "volcano"),
    ("equater", "equator"),
    ("missisippi", "mississippi"),
    ("carribean", "caribbean"),
    ("phillipines", "philippines"),
    // technology
    ("technolgy", "technology"),
    ("tecnology", "technology"),
    ("computr", "computer"),
    ("compter", "computer"),
    ("computeing", "computing"),
    ("algoritm", "algorithm"),
    ("algorythm", "algorithm"),
    ("inteligence", "intelligence"),
    ("artifical", "artificial"),
    ("progamming", "programming"),
    ("programing", "programming"),
    ("internt", "internet"),
    ("softwear", "software"),
    ("databse", "database"),
    ("blockchian", "blockchain"),
    // general English
    ("teh", "the"),
    ("recieve", "receive"),
    ("beleive", "believe"),
    ("definately", "definitely"),
    ("seperate", "separate"),
    ("occured", "occurred"),
    ("untill", "until"),
    ("wich", "which"),
    ("becuase", "because"),
    ("goverment", "government"),
    ("enviroment", "environment"),
    ("langauge", "language"),
    ("libary", "library"),
    ("begining", "beginning"),
    ("wierd", "weird"),
];

/// Look up the correction for one word, ignoring case.
pub fn lookup(word: &str) -> Option<&'static str> {
    let lower = word.to_lowercase();
    MISSPELLINGS
        .iter()
        .find(|(wrong, _)| *wrong == lower)
        .map(|(_, right)| *right)
}

/// Replace every whole-word misspelling in `text`.
///
/// Matching is case-insensitive; a correction keeps the capital first
/// letter of the word it replaces. Everything else is copied unchanged.
pub fn correct(text: &str) -> String {
    text.split_word_bounds()
        .map(|segment| match lookup(segment) {
            Some(correction) if segment.chars().next().is_some_and(char::is_uppercase) => {
                capitalize(correction)
            }
            Some(correction) => correction.to_string(),
            None => segment.to_string(),
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
