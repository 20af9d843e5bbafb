//! Resume-to-job semantic matching service.
//!
//! resumatch accepts an uploaded resume (`.pdf`, `.docx`, `.txt`), embeds its
//! text with a local all-MiniLM-L6-v2 model, fetches live postings from the
//! Remotive API, and returns the top matches by cosine similarity.
//!
//! # Architecture
//!
//! - **Extraction**: per-page PDF text via `pdf-extract`, DOCX paragraphs from
//!   the ZIP container, lossy UTF-8 for plain text; uploads are spooled to a
//!   scoped temp file for the path-oriented parsers
//! - **Embeddings**: local ONNX Runtime with all-MiniLM-L6-v2 (384 dimensions),
//!   loaded once at startup
//! - **Ranking**: cosine similarity, stable descending sort, threshold filter,
//!   top-K truncation
//! - **Transport**: axum, `POST /upload` plus a `/health` probe, CORS fully open
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`extract`] — Resume text extraction for the supported formats
//! - [`embedding`] — Text-to-vector embedding via ONNX Runtime
//! - [`jobs`] — Remotive listing fetch and posting normalization
//! - [`matching`] — Cosine scoring, sorting, and filtering
//! - [`server`] — Router, shared state, and the serve loop

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod jobs;
pub mod matching;
pub mod server;
