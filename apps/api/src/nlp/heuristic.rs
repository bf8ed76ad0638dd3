//! Rule-based phrase extractor.
//!
//! Approximates a dependency parser's noun chunks and an NER model's entity spans
//! with closed-class lexicons, suffix rules and capitalization:
//!
//! - noun chunks follow the pattern `(DET)? (ADJ|NUM)* (NOUN|PROPN)+`, with the
//!   determiner left out of the span;
//! - entities are runs of capitalized or acronym tokens. A sentence-initial
//!   capitalized word only starts an entity when it is an acronym or the next
//!   token is capitalized too.
//!
//! Punctuation at a word boundary (commas, colons, brackets, dashes) ends any
//! chunk or entity in progress. Sentences end at `.`, `!`, `?` and line breaks.

use async_trait::async_trait;
use phf::phf_set;

use crate::nlp::{NlpError, PhraseExtractor, RawPhrases};

/// Pure-Rust phrase extractor. Fast, deterministic, no model files.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPhraseExtractor;

#[async_trait]
impl PhraseExtractor for HeuristicPhraseExtractor {
    async fn extract_phrases(&self, text: &str) -> Result<RawPhrases, NlpError> {
        Ok(extract(text))
    }

    fn backend_name(&self) -> &'static str {
        "heuristic"
    }
}

/// Runs the chunker and entity finder over every sentence of `text`.
pub fn extract(text: &str) -> RawPhrases {
    let mut phrases = RawPhrases::default();
    for sentence in tokenize(text) {
        phrases.noun_chunks.extend(noun_chunks(&sentence));
        phrases.entities.extend(entity_spans(&sentence));
    }
    phrases
}

// ────────────────────────────────────────────────────────────────────────────
// Tokens
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pos {
    Determiner,
    Adjective,
    Number,
    Noun,
    ProperNoun,
    Verb,
    Adverb,
    /// Prepositions, conjunctions, pronouns, auxiliaries.
    Function,
    /// `-ing` form not yet resolved to `Noun` or `Verb`.
    Gerund,
}

impl Pos {
    fn is_noun(self) -> bool {
        matches!(self, Pos::Noun | Pos::ProperNoun)
    }

    fn is_modifier(self) -> bool {
        matches!(self, Pos::Adjective | Pos::Number)
    }
}

#[derive(Debug, Clone)]
struct Token {
    /// Word with boundary punctuation removed, original casing.
    text: String,
    pos: Pos,
    capitalized: bool,
    acronym: bool,
    sentence_initial: bool,
    /// Punctuation followed this word, so nothing may span past it.
    break_after: bool,
}

fn tokenize(text: &str) -> Vec<Vec<Token>> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        let mut current: Vec<Token> = Vec::new();

        for word in line.split_whitespace() {
            let left_trimmed = word.trim_start_matches(|c: char| !c.is_alphanumeric());
            let core = left_trimmed.trim_end_matches(|c: char| !c.is_alphanumeric());

            if core.is_empty() {
                // bare punctuation such as "—" or "&"
                if let Some(last) = current.last_mut() {
                    last.break_after = true;
                }
                continue;
            }

            if left_trimmed.len() != word.len() {
                if let Some(last) = current.last_mut() {
                    last.break_after = true;
                }
            }

            let trailing = &left_trimmed[core.len()..];
            let ends_sentence = trailing.contains(&['.', '!', '?'][..]);
            let sentence_initial = current.is_empty();

            current.push(Token {
                text: core.to_string(),
                pos: Pos::Noun,
                capitalized: core.chars().next().is_some_and(char::is_uppercase),
                acronym: is_acronym(core),
                sentence_initial,
                break_after: !trailing.is_empty(),
            });

            if ends_sentence {
                sentences.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            sentences.push(current);
        }
    }

    for sentence in &mut sentences {
        tag(sentence);
    }
    sentences
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() >= 2
        && word.chars().any(|c| c.is_ascii_uppercase())
        && word.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

// ────────────────────────────────────────────────────────────────────────────
// Part-of-speech guessing
// ────────────────────────────────────────────────────────────────────────────

fn tag(sentence: &mut [Token]) {
    for token in sentence.iter_mut() {
        token.pos = lexical_pos(token);
    }

    for i in 0..sentence.len() {
        if sentence[i].pos != Pos::Gerund {
            continue;
        }
        let prev = (i > 0 && !sentence[i - 1].break_after).then(|| sentence[i - 1].pos);
        let next = (!sentence[i].break_after)
            .then(|| sentence.get(i + 1).map(|t| t.pos))
            .flatten();

        // "machine learning", "data engineering team" vs "experience building APIs"
        let follows_nominal = matches!(
            prev,
            Some(Pos::Noun | Pos::ProperNoun | Pos::Adjective | Pos::Number | Pos::Determiner)
        );
        let opens_object = matches!(
            next,
            Some(Pos::Determiner | Pos::ProperNoun | Pos::Adjective | Pos::Function)
        ) && !matches!(next, Some(Pos::Function) if is_coordinator(&sentence[i + 1].text));

        sentence[i].pos = if follows_nominal && !opens_object {
            Pos::Noun
        } else {
            Pos::Verb
        };
    }
}

fn is_coordinator(word: &str) -> bool {
    matches!(word.to_lowercase().as_str(), "and" | "or" | "nor")
}

fn lexical_pos(token: &Token) -> Pos {
    let lower = token.text.to_lowercase();
    let word = lower.as_str();

    if word.starts_with(|c: char| c.is_ascii_digit()) {
        return Pos::Number;
    }
    if DETERMINERS.contains(word) {
        return Pos::Determiner;
    }
    if FUNCTION_WORDS.contains(word) {
        return Pos::Function;
    }
    if VERBS.contains(word) {
        return Pos::Verb;
    }
    if ADVERBS.contains(word) {
        return Pos::Adverb;
    }
    if ADJECTIVES.contains(word) {
        return Pos::Adjective;
    }
    if ING_NOUNS.contains(word) {
        return Pos::Noun;
    }
    if token.acronym || (token.capitalized && !token.sentence_initial) {
        return Pos::ProperNoun;
    }

    let len = word.chars().count();
    if len > 4 && word.ends_with("ing") {
        Pos::Gerund
    } else if len > 4 && word.ends_with("ly") {
        Pos::Adverb
    } else if len > 4 && word.ends_with("ed") && !word.ends_with("eed") {
        // participles used attributively: "experienced engineer"
        Pos::Adjective
    } else if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        Pos::Adjective
    } else {
        Pos::Noun
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Noun chunks and entities
// ────────────────────────────────────────────────────────────────────────────

fn noun_chunks(sentence: &[Token]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < sentence.len() {
        let start = i;
        let mut end = i;

        while end < sentence.len() && sentence[end].pos.is_modifier() {
            end += 1;
            if sentence[end - 1].break_after {
                break;
            }
        }

        let noun_start = end;
        let blocked = end > start && sentence[end - 1].break_after;
        if !blocked {
            while end < sentence.len() && sentence[end].pos.is_noun() {
                end += 1;
                if sentence[end - 1].break_after {
                    break;
                }
            }
        }

        if end > noun_start {
            chunks.push(join(&sentence[start..end]));
            i = end;
        } else {
            i = start + 1;
        }
    }

    chunks
}

fn entity_spans(sentence: &[Token]) -> Vec<String> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < sentence.len() {
        if !is_entity_token(sentence, i) {
            i += 1;
            continue;
        }

        let start = i;
        while i < sentence.len() && is_entity_token(sentence, i) {
            i += 1;
            if sentence[i - 1].break_after {
                break;
            }
        }
        spans.push(join(&sentence[start..i]));
    }

    spans
}

fn is_entity_token(sentence: &[Token], i: usize) -> bool {
    let token = &sentence[i];
    if !(token.capitalized || token.acronym) {
        return false;
    }
    if matches!(
        token.pos,
        Pos::Determiner | Pos::Function | Pos::Verb | Pos::Adverb
    ) {
        return false;
    }
    if !token.sentence_initial || token.acronym {
        return true;
    }

    !token.break_after
        && sentence
            .get(i + 1)
            .is_some_and(|next| next.capitalized || next.acronym)
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Lexicons
// ────────────────────────────────────────────────────────────────────────────

static DETERMINERS: phf::Set<&'static str> = phf_set! {
    "a", "an", "the", "this", "that", "these", "those", "my", "our", "your", "their", "his",
    "her", "its", "some", "any", "each", "every", "all", "no", "another", "such", "both",
    "either", "neither",
};

static FUNCTION_WORDS: phf::Set<&'static str> = phf_set! {
    // prepositions
    "for", "with", "in", "on", "at", "by", "of", "to", "from", "into", "onto", "about",
    "across", "within", "without", "through", "over", "under", "between", "among", "as",
    "like", "via", "per", "during", "after", "before", "around", "toward", "towards",
    "against", "upon", "beyond", "throughout", "than", "up", "out", "off",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "while", "whereas", "if", "because", "although",
    "though", "plus", "whether", "unless",
    // pronouns
    "i", "you", "we", "they", "he", "she", "it", "me", "us", "them", "him", "who", "whom",
    "whose", "which", "what", "where", "when", "why", "how", "yourself", "ourselves",
    "themselves", "anyone", "someone", "everyone", "everything", "something",
    // auxiliaries and modals
    "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "not",
};

static VERBS: phf::Set<&'static str> = phf_set! {
    "need", "needs", "looking", "seeking", "join", "joining", "build", "builds", "develop",
    "develops", "collaborate", "collaborates", "ensure", "ensures", "maintain", "maintains",
    "implement", "implements", "deliver", "delivers", "create", "creates", "write", "writes",
    "apply", "deploy", "deploys", "using", "use", "uses", "including", "include", "includes",
    "required", "preferred", "wanted", "want", "love", "enjoy", "thrive", "partner",
    "contribute", "contributes", "mentor", "mentors", "own", "owns", "drive", "drives",
    "help", "helps", "work", "works", "working", "make", "makes", "take", "takes", "get",
    "become", "know", "understand", "communicate", "solve", "improve", "scale", "ship",
};

static ADVERBS: phf::Set<&'static str> = phf_set! {
    "very", "also", "well", "often", "always", "never", "too", "just", "only", "now", "then",
    "here", "there", "again", "ideally", "preferably", "quickly", "highly", "strongly",
};

static ADJECTIVES: phf::Set<&'static str> = phf_set! {
    "senior", "junior", "strong", "excellent", "good", "great", "new", "large", "small",
    "high", "low", "remote", "hybrid", "relevant", "similar", "various", "multiple",
    "several", "proven", "solid", "deep", "related", "key", "main", "modern", "complex",
    "full", "fast", "big", "best", "top", "able", "current", "early", "global", "local",
    "open", "real", "scalable", "reliable", "secure", "robust", "technical", "professional",
    "analytical", "practical", "cross", "agile", "bachelor's", "master's", "mid", "lead",
    "principal", "staff", "entry", "other", "own", "same", "few", "more", "most", "many",
    "much",
};

/// `-ing` words that are almost always nouns in job postings.
static ING_NOUNS: phf::Set<&'static str> = phf_set! {
    "learning", "engineering", "testing", "marketing", "accounting", "computing",
    "networking", "programming", "training", "processing", "modeling", "modelling",
    "manufacturing", "banking", "consulting", "scheduling", "budgeting", "planning",
    "reporting", "hosting", "monitoring", "logging", "debugging", "scripting", "pricing",
    "advertising", "publishing", "staffing", "recruiting", "onboarding", "mentoring",
    "clustering", "caching", "streaming", "messaging", "routing", "billing", "shipping",
    "warehousing", "forecasting", "troubleshooting", "writing", "reasoning",
};

const ADJECTIVE_SUFFIXES: [&str; 7] = ["ous", "ful", "ive", "able", "ible", "ical", "less"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_developer_sentence() {
        let phrases = extract(
            "Looking for a Python developer with experience in machine learning and cloud infrastructure.",
        );
        assert_eq!(
            phrases.noun_chunks,
            vec![
                "Python developer",
                "experience",
                "machine learning",
                "cloud infrastructure"
            ]
        );
        assert_eq!(phrases.entities, vec!["Python"]);
    }

    #[test]
    fn test_title_case_role_and_acronyms() {
        let phrases = extract(
            "We need a Senior Rust Engineer. Experience with AWS and Kubernetes is required.",
        );
        assert_eq!(
            phrases.noun_chunks,
            vec!["Senior Rust Engineer", "Experience", "AWS", "Kubernetes"]
        );
        assert_eq!(
            phrases.entities,
            vec!["Senior Rust Engineer", "AWS", "Kubernetes"]
        );
    }

    #[test]
    fn test_commas_split_lists() {
        let phrases = extract("Skills: Python, Go, SQL");
        assert_eq!(phrases.noun_chunks, vec!["Skills", "Python", "Go", "SQL"]);
        assert_eq!(phrases.entities, vec!["Python", "Go", "SQL"]);
    }

    #[test]
    fn test_lines_are_separate_sentences() {
        let phrases = extract("distributed systems\ncloud platforms");
        assert_eq!(
            phrases.noun_chunks,
            vec!["distributed systems", "cloud platforms"]
        );
        assert!(phrases.entities.is_empty());
    }

    #[test]
    fn test_gerund_before_object_is_a_verb() {
        let phrases = extract("experience building APIs");
        assert_eq!(phrases.noun_chunks, vec!["experience", "APIs"]);
    }

    #[test]
    fn test_numbers_and_adjectives_modify_nouns() {
        let phrases = extract("5 years of strong backend experience");
        assert_eq!(phrases.noun_chunks, vec!["5 years", "strong backend experience"]);
    }

    #[test]
    fn test_dangling_adjective_is_not_a_chunk() {
        let phrases = extract("the candidate is reliable");
        assert_eq!(phrases.noun_chunks, vec!["candidate"]);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert_eq!(extract(""), RawPhrases::default());
        assert_eq!(extract("  \n  — "), RawPhrases::default());
    }

    #[test]
    fn test_acronym_detection() {
        assert!(is_acronym("AWS"));
        assert!(is_acronym("S3"));
        assert!(!is_acronym("A"));
        assert!(!is_acronym("APIs"));
        assert!(!is_acronym("42"));
    }

    #[tokio::test]
    async fn test_trait_backend_matches_free_function() {
        let text = "Own the Kafka pipeline.";
        let via_trait = HeuristicPhraseExtractor.extract_phrases(text).await.unwrap();
        assert_eq!(via_trait, extract(text));
        assert_eq!(HeuristicPhraseExtractor.backend_name(), "heuristic");
    }
}
