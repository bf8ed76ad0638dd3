//! Text normalization: lowercase, drop ASCII punctuation, tokenize, filter stop-words.

use crate::nlp::stopwords::StopWords;

/// Normalizes raw text into tokens.
///
/// Lowercases the whole string, removes every ASCII punctuation character (Unicode
/// punctuation is left alone), splits on whitespace and drops stop-words.
/// Order and duplicates are preserved.
pub fn clean_text(text: &str, stop_words: &StopWords) -> Vec<String> {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    stripped
        .split_whitespace()
        .filter(|word| !stop_words.contains(word))
        .map(str::to_string)
        .collect()
}

/// Trims ASCII punctuation from both ends of `s`.
pub fn strip_boundary_punctuation(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_punctuation())
}
