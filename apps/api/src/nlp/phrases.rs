//! Phrase extraction: pluggable, trait-based NLP backend that yields noun chunks
//! and named-entity spans for a piece of text.
//!
//! Default: `HeuristicPhraseExtractor` (pure-Rust, deterministic, no model files).
//! Alternative: `RemotePhraseExtractor` (external parser service over HTTP).
//!
//! `AppState` holds an `Arc<dyn PhraseExtractor>`, chosen at startup via config.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw spans as the backend saw them: original casing, punctuation intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPhrases {
    #[serde(default)]
    pub noun_chunks: Vec<String>,
    #[serde(default)]
    pub entities: Vec<String>,
}

impl RawPhrases {
    /// Noun chunks first, then entities, in backend order.
    pub fn spans(&self) -> impl Iterator<Item = &str> {
        self.noun_chunks
            .iter()
            .chain(self.entities.iter())
            .map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NLP service error (status {status}): {message}")]
    Service { status: u16, message: String },
}

/// The phrase extractor trait. Implement this to swap NLP backends without
/// touching the pipeline or handler code.
///
/// Carried in `AppState` as `Arc<dyn PhraseExtractor>`.
#[async_trait]
pub trait PhraseExtractor: Send + Sync {
    async fn extract_phrases(&self, text: &str) -> Result<RawPhrases, NlpError>;

    /// Short label for logs ("heuristic" | "remote").
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_yield_chunks_then_entities() {
        let phrases = RawPhrases {
            noun_chunks: vec!["a Python developer".into(), "experience".into()],
            entities: vec!["Python".into()],
        };
        let spans: Vec<&str> = phrases.spans().collect();
        assert_eq!(spans, vec!["a Python developer", "experience", "Python"]);
    }

    #[test]
    fn test_raw_phrases_deserialize_with_missing_fields() {
        let phrases: RawPhrases = serde_json::from_str(r#"{"entities": ["AWS"]}"#).unwrap();
        assert!(phrases.noun_chunks.is_empty());
        assert_eq!(phrases.entities, vec!["AWS"]);
    }
}
