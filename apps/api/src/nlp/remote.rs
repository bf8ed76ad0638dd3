//! Remote phrase extractor. Delegates parsing to an external NLP service
//! (typically a thin wrapper around a dependency parser + NER model).
//!
//! Wire format:
//!   request  `POST {url}`  `{"text": "..."}`
//!   response `200`         `{"noun_chunks": ["..."], "entities": ["..."]}`
//!
//! One attempt per request. Failures surface as `NlpError` and the keyword stage
//! degrades to an empty phrase set.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nlp::{NlpError, PhraseExtractor, RawPhrases};

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
}

#[derive(Clone)]
pub struct RemotePhraseExtractor {
    client: Client,
    url: String,
}

impl RemotePhraseExtractor {
    pub fn new(url: String, timeout: Duration) -> Result<Self, NlpError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
        })
    }
}

#[async_trait]
impl PhraseExtractor for RemotePhraseExtractor {
    async fn extract_phrases(&self, text: &str) -> Result<RawPhrases, NlpError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ParseRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<ServiceError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(NlpError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let phrases: RawPhrases = response.json().await?;
        debug!(
            "NLP service returned {} noun chunks, {} entities",
            phrases.noun_chunks.len(),
            phrases.entities.len()
        );
        Ok(phrases)
    }

    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
