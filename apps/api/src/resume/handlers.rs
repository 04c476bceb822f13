//! Axum route handlers for the Resume API.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::resume::sections::{ResumeSections, SectionKind};
use crate::skills::pipeline::SkillReport;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub file_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub sections_found: Vec<SectionKind>,
    /// "Python - 4 years" style lines, in report order.
    pub summary: Vec<String>,
    pub skill_count: usize,
    #[serde(flatten)]
    pub report: SkillReport,
}

/// POST /api/v1/resumes/analyze
///
/// Accepts a multipart upload (field `file`: .pdf, .txt or .md), extracts its text, and
/// runs skill extraction over the skills/certifications/education sections followed by the
/// full document. Responds 422 `NO_SKILLS_FOUND` when nothing validates.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let (file_name, bytes) = read_file_field(&mut multipart).await?;

    if bytes.len() > state.config.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File is {} bytes; the limit is {} bytes",
            bytes.len(),
            state.config.max_upload_bytes
        )));
    }

    // PDF parsing is CPU-bound — spawn_blocking to avoid blocking the async executor.
    let documents = state.documents.clone();
    let name = file_name.clone();
    let text = tokio::task::spawn_blocking(move || documents.extract_text(&name, &bytes))
        .await
        .context("spawn_blocking failed in document extraction")??;

    let sections = ResumeSections::locate(&text);
    let relevant = sections.relevant_text(&text);
    let report = state.extract(&relevant).await;

    if report.is_empty() {
        warn!("No skills found in uploaded resume {file_name}");
        return Err(AppError::NoSkillsFound);
    }

    info!(
        "Analyzed resume {file_name}: {} skills, sections {:?}",
        report.skills.len(),
        sections.found()
    );

    Ok(Json(AnalyzeResumeResponse {
        file_name,
        analyzed_at: Utc::now(),
        sections_found: sections.found(),
        summary: report.skills.iter().map(|s| s.summary_line()).collect(),
        skill_count: report.skills.len(),
        report,
    }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok((file_name, bytes));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
