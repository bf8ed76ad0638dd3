//! Axum route handlers for the match form and the JSON match API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::warn;

use crate::errors::AppError;
use crate::extract::UploadedDocument;
use crate::matching::pipeline::MatchReport;
use crate::render::render_page;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Multipart form
// ────────────────────────────────────────────────────────────────────────────

/// Fields of the upload form. A file part with an empty filename counts as absent.
#[derive(Debug, Default)]
pub struct MatchForm {
    pub resume: Option<UploadedDocument>,
    pub job_description: Option<String>,
}

impl MatchForm {
    /// Both inputs present and non-empty.
    pub fn into_inputs(self) -> Option<(UploadedDocument, String)> {
        match (self.resume, self.job_description) {
            (Some(resume), Some(jd)) if !jd.is_empty() => Some((resume, jd)),
            _ => None,
        }
    }
}

pub async fn read_match_form(multipart: &mut Multipart) -> Result<MatchForm, MultipartError> {
    let mut form = MatchForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !filename.is_empty() {
                    form.resume = Some(UploadedDocument::new(filename, bytes));
                }
            }
            Some("job_description") => form.job_description = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_form() -> Html<String> {
    Html(render_page("", None))
}

/// POST /
///
/// Runs the pipeline and re-renders the form with a result block. Any input
/// problem renders the plain form instead.
pub async fn handle_form_submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Html<String> {
    let form = match read_match_form(&mut multipart).await {
        Ok(form) => form,
        Err(e) => {
            warn!("Discarding unreadable form submission: {e}");
            return Html(render_page("", None));
        }
    };

    let echoed = form.job_description.clone().unwrap_or_default();
    match form.into_inputs() {
        Some((resume, jd)) => {
            let report = state.analyzer().analyze(resume, &jd).await;
            Html(render_page(&jd, Some(&report)))
        }
        None => Html(render_page(&echoed, None)),
    }
}

/// POST /api/v1/match
///
/// Same multipart fields as the form; returns the report as JSON.
pub async fn handle_match(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchReport>, AppError> {
    let form = read_match_form(&mut multipart).await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge {
                limit: state.config.max_upload_bytes,
            }
        } else {
            AppError::Multipart(e)
        }
    })?;

    if form.resume.is_none() {
        return Err(AppError::Validation("resume file is required".to_string()));
    }
    let (resume, jd) = form
        .into_inputs()
        .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;

    let report = state.analyzer().analyze(resume, &jd).await;
    Ok(Json(report))
}
