use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Splits after every `.`, `!` or `?` that is followed by whitespace. The
/// whitespace belongs to neither sentence and empty pieces are dropped.
pub fn split_text_into_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY_REGEX.find_iter(text) {
        // The terminator is a single ASCII byte.
        let end = boundary.start() + 1;
        sentences.push(&text[start..end]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);
    sentences.retain(|sentence| !sentence.is_empty());
    sentences
}

/// Distinct lower-cased words of `text`, split on whitespace with punctuation kept.
pub fn split_text_into_word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

lazy_static! {
    static ref SENTENCE_BOUNDARY_REGEX: Regex = Regex::new(r"[.!?]\s+").unwrap();
}
