use anyhow::{bail, Context, Result};

use crate::nlp::stopwords::StopWordList;

/// Which phrase-extraction backend the keyword stage runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NlpBackendKind {
    /// Built-in rule-based chunker. No external process required.
    Heuristic,
    /// External NLP service reached over HTTP (see `NLP_SERVICE_URL`).
    Remote,
}

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub nlp_backend: NlpBackendKind,
    pub nlp_service_url: Option<String>,
    pub nlp_timeout_secs: u64,
    pub stop_words: StopWordList,
    pub max_upload_bytes: usize,
}

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_NLP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let nlp_backend = match lookup("NLP_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("heuristic") => NlpBackendKind::Heuristic,
            Some("remote") => NlpBackendKind::Remote,
            Some(other) => bail!("NLP_BACKEND must be 'heuristic' or 'remote', got '{other}'"),
        };

        let nlp_service_url = lookup("NLP_SERVICE_URL").filter(|url| !url.trim().is_empty());
        if nlp_backend == NlpBackendKind::Remote && nlp_service_url.is_none() {
            bail!("NLP_SERVICE_URL is required when NLP_BACKEND=remote");
        }

        let nlp_timeout_secs = match lookup("NLP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("NLP_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_NLP_TIMEOUT_SECS,
        };

        let stop_words = match lookup("STOPWORDS") {
            Some(raw) => raw
                .parse::<StopWordList>()
                .context("STOPWORDS must be 'nltk' or 'iso'")?,
            None => StopWordList::default(),
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            nlp_backend,
            nlp_service_url,
            nlp_timeout_secs,
            stop_words,
            max_upload_bytes,
        })
    }
}
