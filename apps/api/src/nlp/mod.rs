// Linguistic layer: stop-words, normalization, and the pluggable phrase extractor.
// Everything here is read-only after startup and shared across requests.

pub mod heuristic;
pub mod normalize;
pub mod phrases;
pub mod remote;
pub mod stopwords;

pub use heuristic::HeuristicPhraseExtractor;
pub use phrases::{NlpError, PhraseExtractor, RawPhrases};
pub use remote::RemotePhraseExtractor;
pub use stopwords::StopWords;
