//! Request handlers.
//!
//! `upload_resume` runs the whole pipeline for one request: read the
//! multipart file, extract text, summarize, embed, fetch jobs, batch-embed
//! candidate blocks, rank, and shape the response. Every step either proceeds
//! or the request fails — there are no retries and no degraded modes. The
//! three empty-result outcomes are successes carrying distinct messages.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;
use crate::extract;
use crate::jobs;
use crate::matching::{self, ResumeSummary, ScoredMatch};
use crate::server::AppState;

/// The API returned an empty job list.
pub const MSG_NO_JOBS: &str = "No jobs available from API.";
/// Postings came back but none had usable title/description text.
pub const MSG_NO_USABLE_JOBS: &str = "No suitable jobs found in API data.";
/// No posting scored above the similarity threshold.
pub const MSG_NO_MATCHES: &str = "No suitable jobs found for this resume.";

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub resume_summary: ResumeSummary,
    pub top_matches: Vec<ScoredMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MatchResponse {
    fn empty(resume_summary: ResumeSummary, message: &str) -> Self {
        Self {
            resume_summary,
            top_matches: Vec::new(),
            message: Some(message.to_string()),
        }
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /upload` — match an uploaded resume against live job postings.
pub async fn upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResponse>, ApiError> {
    let (filename, bytes) = read_file_field(multipart).await?;
    tracing::debug!(file = %filename, bytes = bytes.len(), "resume received");

    let text = extract::extract_resume(&bytes, &filename)?;
    if text.trim().is_empty() {
        return Err(ApiError::EmptyResumeText);
    }

    let resume_summary = ResumeSummary::of(&text);

    // Embedding is synchronous ONNX inference — keep it off the async runtime.
    let provider = Arc::clone(&state.embedding);
    let resume_text = text.clone();
    let resume_vector = tokio::task::spawn_blocking(move || provider.embed(&resume_text))
        .await
        .map_err(|e| ApiError::Embedding(anyhow::anyhow!("embedding task failed: {e}")))?
        .map_err(ApiError::Embedding)?;

    // A fetch error fails the whole request; an empty list does not.
    let fetched = state.jobs.fetch_jobs().await?;
    if fetched.is_empty() {
        return Ok(Json(MatchResponse::empty(resume_summary, MSG_NO_JOBS)));
    }

    let candidates = jobs::build_candidates(
        fetched,
        state.config.jobs.max_postings,
        state.config.matching.description_preview_chars,
    );
    if candidates.is_empty() {
        return Ok(Json(MatchResponse::empty(resume_summary, MSG_NO_USABLE_JOBS)));
    }

    // One batch call for all candidate text blocks, order-preserving.
    let provider = Arc::clone(&state.embedding);
    let blocks: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
    let vectors = tokio::task::spawn_blocking(move || {
        let refs: Vec<&str> = blocks.iter().map(String::as_str).collect();
        provider.embed_batch(&refs)
    })
    .await
    .map_err(|e| ApiError::Embedding(anyhow::anyhow!("embedding task failed: {e}")))?
    .map_err(ApiError::Embedding)?;

    let pairs = candidates
        .into_iter()
        .zip(vectors)
        .map(|(c, v)| (c.posting, v))
        .collect();

    let top_matches = matching::rank(
        &resume_vector,
        pairs,
        state.config.matching.threshold,
        state.config.matching.limit,
    );
    tracing::debug!(matches = top_matches.len(), "ranking complete");

    if top_matches.is_empty() {
        return Ok(Json(MatchResponse::empty(resume_summary, MSG_NO_MATCHES)));
    }

    Ok(Json(MatchResponse {
        resume_summary,
        top_matches,
        message: None,
    }))
}

/// Pull the `file` field out of the multipart body. A missing field, missing
/// filename, or malformed body all count as "no file uploaded".
async fn read_file_field(mut multipart: Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::MissingFile)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_owned)
            .ok_or(ApiError::MissingFile)?;
        let bytes = field.bytes().await.map_err(|_| ApiError::MissingFile)?;
        return Ok((filename, bytes.to_vec()));
    }
    Err(ApiError::MissingFile)
}
