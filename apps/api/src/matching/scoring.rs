//! Resume scoring: exact-match coverage of the Job Keyword List by resume tokens.
//!
//! No stemming, fuzzy matching, synonyms, or weighting: a keyword is matched
//! only if the identical string appears among the normalized resume tokens.

use rustc_hash::FxHashSet;

/// Coverage of job keywords by a resume.
///
/// `matched` and `missing` partition the deduplicated keyword list, each in
/// keyword order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreResult {
    /// 0.0 – 100.0
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl ScoreResult {
    /// Score as shown to users, e.g. `"57.14%"`.
    pub fn formatted_score(&self) -> String {
        format!("{:.2}%", self.score)
    }
}

/// Scores `resume_tokens` against `job_keywords`.
///
/// Keywords are deduplicated first (first occurrence wins). The score is
/// `100 * matched / keywords`, or `0.0` when there are no keywords.
pub fn score_resume(resume_tokens: &[String], job_keywords: &[String]) -> ScoreResult {
    let resume_words: FxHashSet<&str> = resume_tokens.iter().map(String::as_str).collect();

    let mut seen = FxHashSet::default();
    let (matched, missing): (Vec<String>, Vec<String>) = job_keywords
        .iter()
        .filter(|keyword| seen.insert(keyword.as_str()))
        .cloned()
        .partition(|keyword| resume_words.contains(keyword.as_str()));

    let total = matched.len() + missing.len();
    let score = if total > 0 {
        matched.len() as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    ScoreResult {
        score,
        matched,
        missing,
    }
}
