use std::sync::Arc;

use crate::config::Config;
use crate::matching::pipeline::Analyzer;
use crate::nlp::{PhraseExtractor, StopWords};

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub stop_words: Arc<StopWords>,
    /// Pluggable phrase extractor. Default: HeuristicPhraseExtractor. Swap via NLP_BACKEND env.
    pub phrase_extractor: Arc<dyn PhraseExtractor>,
}

impl AppState {
    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.stop_words.clone(), self.phrase_extractor.clone())
    }
}
