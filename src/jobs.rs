//! Job source adapter for the Remotive listing API.
//!
//! One GET per upload request — no pagination, no retry, no caching. A
//! transport failure or non-2xx status is a [`ApiError::JobFetch`] surfaced to
//! the caller; a 2xx payload with zero jobs is a distinct non-error outcome
//! the handler reports with an informational message.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::JobsConfig;
use crate::error::ApiError;

/// A posting as returned by the listing API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteJob {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub company_name: Option<String>,
    pub candidate_required_location: Option<String>,
    pub job_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RemoteJobsPayload {
    #[serde(default)]
    jobs: Vec<RemoteJob>,
}

/// The normalized posting shape returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct JobPosting {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub mode: Option<String>,
    /// Truncated for display; the full description only feeds the embedding.
    pub description: String,
}

/// A posting paired with the untruncated text block used for embedding.
#[derive(Debug, Clone)]
pub struct JobCandidate {
    pub posting: JobPosting,
    pub text: String,
}

/// HTTP client for the listing endpoint, with a bounded request timeout.
#[derive(Clone)]
pub struct JobClient {
    http: reqwest::Client,
    endpoint: String,
}

impl JobClient {
    pub fn new(config: &JobsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build jobs HTTP client")?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Fetch the raw posting list. Failure here is fatal to the request —
    /// it is never silently treated as "zero jobs".
    pub async fn fetch_jobs(&self) -> Result<Vec<RemoteJob>, ApiError> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ApiError::JobFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::JobFetch(e.to_string()))?;

        let payload: RemoteJobsPayload = response
            .json()
            .await
            .map_err(|e| ApiError::JobFetch(format!("invalid jobs payload: {e}")))?;

        Ok(payload.jobs)
    }
}

/// Normalize raw postings into scorable candidates.
///
/// Takes at most `cap` postings, builds each text block as
/// `title + " " + description` (trimmed), and drops postings whose block is
/// empty — they cannot be scored.
pub fn build_candidates(
    jobs: Vec<RemoteJob>,
    cap: usize,
    preview_chars: usize,
) -> Vec<JobCandidate> {
    jobs.into_iter()
        .take(cap)
        .filter_map(|job| {
            let text = format!("{} {}", job.title, job.description)
                .trim()
                .to_string();
            if text.is_empty() {
                return None;
            }
            let description = truncate_preview(&job.description, preview_chars);
            Some(JobCandidate {
                posting: JobPosting {
                    title: job.title,
                    company: job.company_name,
                    location: job.candidate_required_location,
                    mode: job.job_type,
                    description,
                },
                text,
            })
        })
        .collect()
}

/// Truncate content to max_chars, appending "..." if truncated.
/// Cuts on a char boundary so multibyte text is never split.
fn truncate_preview(content: &str, max_chars: usize) -> String {
    if content.len() <= max_chars {
        content.to_string()
    } else {
        let end = content
            .char_indices()
            .take_while(|(i, _)| *i < max_chars)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(max_chars);
        format!("{}...", &content[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, description: &str) -> RemoteJob {
        RemoteJob {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_remotive_payload() {
        let json = r#"{
            "job-count": 2,
            "jobs": [
                {"title": "Go Backend Engineer", "company_name": "Acme",
                 "candidate_required_location": "Worldwide", "job_type": "full_time",
                 "description": "Build distributed systems at scale"},
                {"title": "Designer", "description": ""}
            ]
        }"#;
        let payload: RemoteJobsPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.jobs.len(), 2);
        assert_eq!(payload.jobs[0].title, "Go Backend Engineer");
        assert_eq!(payload.jobs[0].company_name.as_deref(), Some("Acme"));
        assert!(payload.jobs[1].company_name.is_none());
    }

    #[test]
    fn empty_payload_yields_no_jobs() {
        let payload: RemoteJobsPayload = serde_json::from_str(r#"{"jobs": []}"#).unwrap();
        assert!(payload.jobs.is_empty());
        let payload: RemoteJobsPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.jobs.is_empty());
    }

    #[test]
    fn candidates_capped_before_filtering() {
        let jobs: Vec<RemoteJob> = (0..80).map(|i| job(&format!("Job {i}"), "desc")).collect();
        let candidates = build_candidates(jobs, 50, 200);
        assert_eq!(candidates.len(), 50);
        assert_eq!(candidates[0].posting.title, "Job 0");
        assert_eq!(candidates[49].posting.title, "Job 49");
    }

    #[test]
    fn blank_text_blocks_are_dropped() {
        let jobs = vec![
            job("", ""),
            job("  ", "   "),
            job("Real Job", "with a description"),
            job("Title only", ""),
        ];
        let candidates = build_candidates(jobs, 50, 200);
        let titles: Vec<&str> = candidates.iter().map(|c| c.posting.title.as_str()).collect();
        assert_eq!(titles, vec!["Real Job", "Title only"]);
    }

    #[test]
    fn text_block_keeps_full_description() {
        let long_desc = "d".repeat(500);
        let candidates = build_candidates(vec![job("Engineer", &long_desc)], 50, 200);
        assert_eq!(candidates[0].text, format!("Engineer {long_desc}"));
        // display description is capped, embedding text is not
        assert_eq!(candidates[0].posting.description.len(), 203);
        assert!(candidates[0].posting.description.ends_with("..."));
    }

    #[test]
    fn short_description_is_not_ellipsized() {
        let candidates = build_candidates(vec![job("Engineer", "short")], 50, 200);
        assert_eq!(candidates[0].posting.description, "short");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let preview = truncate_preview("héllo wörld", 7);
        assert!(preview.ends_with("..."));
        assert!(preview.is_char_boundary(preview.len() - 3));
    }
}
