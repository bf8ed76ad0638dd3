//! Resume/JD match pipeline: extract, normalize, keywords, score, word cloud.
//!
//! Stateless per call. The only inputs beyond the request are the shared
//! stop-word set and phrase extractor, both read-only after startup.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::extract::{extract_text_blocking, UploadedDocument};
use crate::matching::keywords::{extract_keyword_phrases, flatten_keywords};
use crate::matching::scoring::{score_resume, ScoreResult};
use crate::nlp::normalize::clean_text;
use crate::nlp::{PhraseExtractor, StopWords};
use crate::render::wordcloud::render_wordcloud;

/// Result block handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    /// `"NN.NN%"`
    pub score: String,
    pub score_value: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// Normalized noun chunks / entities the keywords were flattened from.
    pub keyword_phrases: Vec<String>,
    /// Base64 PNG. Absent when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wordcloud_img: Option<String>,
}

impl MatchReport {
    fn new(result: ScoreResult, keyword_phrases: Vec<String>, wordcloud_img: Option<String>) -> Self {
        Self {
            score: result.formatted_score(),
            score_value: result.score,
            matched: result.matched,
            missing: result.missing,
            keyword_phrases,
            wordcloud_img,
        }
    }
}

/// Runs the match pipeline against injected NLP dependencies.
#[derive(Clone)]
pub struct Analyzer {
    stop_words: Arc<StopWords>,
    phrases: Arc<dyn PhraseExtractor>,
}

impl Analyzer {
    pub fn new(stop_words: Arc<StopWords>, phrases: Arc<dyn PhraseExtractor>) -> Self {
        Self {
            stop_words,
            phrases,
        }
    }

    /// Scores `resume` against `job_description`.
    pub async fn analyze(&self, resume: UploadedDocument, job_description: &str) -> MatchReport {
        let request_id = Uuid::new_v4();
        let span = info_span!("analyze", %request_id, filename = %resume.filename);

        async move {
            let resume_text = extract_text_blocking(resume).await;
            self.analyze_text(&resume_text, job_description).await
        }
        .instrument(span)
        .await
    }

    /// Pipeline from already-extracted resume text onward.
    pub async fn analyze_text(&self, resume_text: &str, job_description: &str) -> MatchReport {
        let resume_tokens = clean_text(resume_text, &self.stop_words);
        debug!(
            chars = resume_text.len(),
            tokens = resume_tokens.len(),
            "Resume normalized"
        );

        let phrases =
            extract_keyword_phrases(self.phrases.as_ref(), job_description, &self.stop_words)
                .await;
        let job_keywords = flatten_keywords(&phrases, &self.stop_words);
        debug!(
            backend = self.phrases.backend_name(),
            phrases = phrases.len(),
            keywords = job_keywords.len(),
            "Job description keywords extracted"
        );

        let result = score_resume(&resume_tokens, &job_keywords);
        info!(
            score = result.score,
            matched = result.matched.len(),
            missing = result.missing.len(),
            "Resume scored"
        );

        let wordcloud_img = self.wordcloud(&result.matched).await;
        MatchReport::new(result, phrases, wordcloud_img)
    }

    async fn wordcloud(&self, matched: &[String]) -> Option<String> {
        if matched.is_empty() {
            return None;
        }

        let words = matched.to_vec();
        match tokio::task::spawn_blocking(move || render_wordcloud(&words)).await {
            Ok(Ok(image)) => image,
            Ok(Err(e)) => {
                warn!("Word cloud rendering failed: {e}");
                None
            }
            Err(e) => {
                warn!("Word cloud task failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::docx::tests::build_docx;
    use crate::nlp::{HeuristicPhraseExtractor, NlpError, RawPhrases};
    use async_trait::async_trait;

    /// Backend stub: every whitespace-separated word of the text is a noun chunk.
    struct EveryWord;

    #[async_trait]
    impl PhraseExtractor for EveryWord {
        async fn extract_phrases(&self, text: &str) -> Result<RawPhrases, NlpError> {
            Ok(RawPhrases {
                noun_chunks: text.split_whitespace().map(String::from).collect(),
                entities: vec![],
            })
        }

        fn backend_name(&self) -> &'static str {
            "every-word"
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(
            Arc::new(StopWords::default()),
            Arc::new(HeuristicPhraseExtractor),
        )
    }

    const PYTHON_JD: &str =
        "Looking for a Python developer with experience in machine learning and cloud infrastructure.";

    #[tokio::test]
    async fn test_python_developer_scenario() {
        let report = analyzer()
            .analyze_text("python developer cloud infrastructure", PYTHON_JD)
            .await;

        for keyword in ["python", "developer", "cloud", "infrastructure"] {
            assert!(
                report.matched.iter().any(|m| m == keyword),
                "{keyword} should match"
            );
        }
        assert_eq!(report.missing, vec!["experience", "machine", "learning"]);
        assert_eq!(report.score, "57.14%");
        assert!(report.wordcloud_img.is_some());
        assert!(report.keyword_phrases.contains(&"python developer".to_string()));
    }

    #[tokio::test]
    async fn test_empty_job_description() {
        let report = analyzer().analyze_text("python developer", "").await;
        assert_eq!(report.score, "0.00%");
        assert_eq!(report.score_value, 0.0);
        assert!(report.matched.is_empty());
        assert!(report.missing.is_empty());
        assert!(report.keyword_phrases.is_empty());
        assert!(report.wordcloud_img.is_none());
    }

    #[tokio::test]
    async fn test_unsupported_resume_format_misses_everything() {
        let resume = UploadedDocument::new("resume.txt", "python developer cloud infrastructure");
        let report = analyzer().analyze(resume, PYTHON_JD).await;

        assert!(report.matched.is_empty());
        assert_eq!(
            report.missing,
            vec![
                "python",
                "developer",
                "experience",
                "machine",
                "learning",
                "cloud",
                "infrastructure"
            ]
        );
        assert_eq!(report.score_value, 0.0);
        assert!(report.wordcloud_img.is_none());
    }

    #[tokio::test]
    async fn test_docx_resume_end_to_end() {
        let resume = UploadedDocument::new(
            "Resume.DOCX",
            build_docx(&["Jane Doe", "Python developer; cloud infrastructure on AWS."]),
        );
        let report = analyzer().analyze(resume, PYTHON_JD).await;
        assert_eq!(
            report.matched,
            vec!["python", "developer", "cloud", "infrastructure"]
        );
    }

    #[tokio::test]
    async fn test_resume_with_every_keyword_scores_100() {
        let analyzer = Analyzer::new(Arc::new(StopWords::default()), Arc::new(EveryWord));
        let report = analyzer
            .analyze_text("rust tokio axum", "Rust, Tokio and Axum!")
            .await;
        assert_eq!(report.score, "100.00%");
        assert!(report.missing.is_empty());
        assert_eq!(report.matched, vec!["rust", "tokio", "axum"]);
    }

    #[tokio::test]
    async fn test_report_json_omits_missing_image() {
        let report = analyzer().analyze_text("", PYTHON_JD).await;
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("wordcloud_img").is_none());
        assert_eq!(json["score"], "0.00%");
        assert_eq!(json["matched"], serde_json::json!([]));
    }
}
