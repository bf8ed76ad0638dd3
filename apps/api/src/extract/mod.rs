//! Document text extraction for uploaded resumes.
//!
//! PDF goes through `pdf-extract`; DOCX is unzipped and its `word/document.xml`
//! streamed with `xml-rs`. Anything else yields an empty string. Parsing is
//! CPU-bound and `pdf-extract` may panic on malformed input, so request paths use
//! [`extract_text_blocking`], which runs on the blocking pool and maps every
//! failure to `""`.

pub mod docx;
pub mod pdf;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("xml error: {0}")]
    Xml(#[from] xml::reader::Error),

    #[error("pdf error: {0}")]
    Pdf(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive has no {0}")]
    MissingPart(&'static str),
}

/// Format hint derived from the uploaded filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentFormat {
    /// Case-insensitive extension check on the client-supplied filename.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".docx") {
            DocumentFormat::Docx
        } else if lower.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else {
            DocumentFormat::Unsupported
        }
    }
}

/// An uploaded resume: raw bytes plus the filename that carries the format hint.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::from_filename(&self.filename)
    }
}

/// Extracts text, reporting why parsing failed. Unsupported formats are `Ok("")`.
pub fn try_extract_text(document: &UploadedDocument) -> Result<String, ExtractError> {
    match document.format() {
        DocumentFormat::Pdf => pdf::extract(&document.bytes),
        DocumentFormat::Docx => docx::extract(&document.bytes),
        DocumentFormat::Unsupported => {
            debug!(
                filename = %document.filename,
                "Unsupported resume format, treating as empty"
            );
            Ok(String::new())
        }
    }
}

/// Extracts text, degrading any parse failure to an empty string.
pub fn extract_text(document: &UploadedDocument) -> String {
    try_extract_text(document).unwrap_or_else(|e| {
        warn!(
            filename = %document.filename,
            "Could not extract resume text: {e}"
        );
        String::new()
    })
}

/// [`extract_text`] on tokio's blocking pool. A panicking parser yields `""`.
pub async fn extract_text_blocking(document: UploadedDocument) -> String {
    let filename = document.filename.clone();
    match tokio::task::spawn_blocking(move || extract_text(&document)).await {
        Ok(text) => text,
        Err(e) => {
            warn!(filename = %filename, "Resume extraction task failed: {e}");
            String::new()
        }
    }
}
