// Resume matching: keyword extraction, scoring, the end-to-end pipeline, and its handlers.
// NLP backends are reached only through nlp::PhraseExtractor.

pub mod handlers;
pub mod keywords;
pub mod pipeline;
pub mod scoring;
