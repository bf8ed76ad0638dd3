//! Keyword extraction: turns a job description into keyword phrases via the
//! configured NLP backend, then flattens them into the Job Keyword List.

use rustc_hash::FxHashSet;
use tracing::warn;

use crate::nlp::normalize::strip_boundary_punctuation;
use crate::nlp::{PhraseExtractor, StopWords};

/// Runs the backend over `text` and returns normalized keyword phrases.
///
/// Each noun chunk and entity span is lowercased and stripped of boundary
/// punctuation; stop-words and strings of one character or less are dropped.
/// Duplicates are removed, first occurrence wins. A backend failure is logged
/// and yields no phrases.
pub async fn extract_keyword_phrases(
    backend: &dyn PhraseExtractor,
    text: &str,
    stop_words: &StopWords,
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let raw = match backend.extract_phrases(text).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(
                backend = backend.backend_name(),
                "Phrase extraction failed, continuing without keywords: {e}"
            );
            return Vec::new();
        }
    };

    let mut seen = FxHashSet::default();
    raw.spans()
        .filter_map(|span| {
            let cleaned = strip_boundary_punctuation(&span.to_lowercase()).to_string();
            let keep = !stop_words.contains(&cleaned) && cleaned.chars().count() > 1;
            keep.then_some(cleaned)
        })
        .filter(|phrase| seen.insert(phrase.clone()))
        .collect()
}

/// Splits phrases into words, drops stop-words, and deduplicates preserving
/// first-seen order.
pub fn flatten_keywords(phrases: &[String], stop_words: &StopWords) -> Vec<String> {
    let mut seen = FxHashSet::default();
    phrases
        .iter()
        .flat_map(|phrase| phrase.split_whitespace())
        .filter(|word| !stop_words.contains(word))
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}
