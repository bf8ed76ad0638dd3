//! English stop-word set shared by the normalizer and the keyword stage.
//!
//! Built once at startup and handed around as `Arc<StopWords>`; never mutated.

use std::str::FromStr;

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};
use thiserror::Error;

/// Which English list backs the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopWordList {
    /// The 179-word NLTK English corpus list.
    #[default]
    Nltk,
    /// The larger stopwords-iso English list shipped with the `stop-words` crate.
    Iso,
}

#[derive(Debug, Error)]
#[error("unknown stop-word list '{0}'")]
pub struct UnknownStopWordList(String);

impl FromStr for StopWordList {
    type Err = UnknownStopWordList;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nltk" => Ok(StopWordList::Nltk),
            "iso" => Ok(StopWordList::Iso),
            other => Err(UnknownStopWordList(other.to_string())),
        }
    }
}

/// Immutable lowercase stop-word set. Lookups are exact; callers lowercase first.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: FxHashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(StopWordList::Nltk)
    }
}

impl StopWords {
    pub fn new(list: StopWordList) -> Self {
        let words = match list {
            StopWordList::Nltk => NLTK_ENGLISH.iter().map(|s| s.to_string()).collect(),
            StopWordList::Iso => get(LANGUAGE::English).iter().map(|s| s.to_string()).collect(),
        };
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

const NLTK_ENGLISH: [&str; 179] = [
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];
