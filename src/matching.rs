//! Similarity ranking.
//!
//! Pure functions over the resume vector and candidate vectors: cosine
//! similarity per candidate, stable descending sort on full precision, strict
//! threshold filter, limit truncation. Scores are rounded to 4 decimals only
//! when the response is built, so tie order never depends on rounding.

use serde::Serialize;

use crate::jobs::JobPosting;

/// A posting with its similarity score, ready for the response payload.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub posting: JobPosting,
    /// Cosine similarity rounded to 4 decimal places.
    pub score: f64,
}

/// Word and character counts of the extracted resume text.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeSummary {
    pub words: usize,
    pub chars: usize,
}

impl ResumeSummary {
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
        }
    }
}

/// Cosine of the angle between two vectors. Returns 0.0 when either vector
/// has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Score each candidate against the query vector, sort descending, keep only
/// scores strictly above `threshold`, and truncate to `limit`.
///
/// The sort is stable: candidates with equal scores keep their input order.
/// An empty result is a normal outcome, not an error.
pub fn rank(
    query: &[f32],
    candidates: Vec<(JobPosting, Vec<f32>)>,
    threshold: f32,
    limit: usize,
) -> Vec<ScoredMatch> {
    let mut scored: Vec<(JobPosting, f32)> = candidates
        .into_iter()
        .map(|(posting, vector)| {
            let score = cosine_similarity(query, &vector);
            (posting, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .filter(|(_, score)| *score > threshold)
        .take(limit)
        .map(|(posting, score)| ScoredMatch {
            posting,
            score: round4(score),
        })
        .collect()
}

/// Round to 4 decimal places for presentation.
fn round4(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 10_000.0
}
