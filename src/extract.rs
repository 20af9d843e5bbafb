//! Resume text extraction.
//!
//! Dispatches on the uploaded filename's extension (case-insensitive):
//! `.pdf` via per-page text extraction, `.docx` via the `word/document.xml`
//! part of the ZIP container, `.txt` via lossy UTF-8 decode. The PDF and DOCX
//! parsers operate on filesystem paths, so upload bytes are spooled to a
//! [`NamedTempFile`] that is removed on drop — on the error path as well.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::error::ApiError;

/// Supported resume formats, matched on the uploaded filename's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Txt,
}

impl ResumeFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    fn temp_suffix(self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Txt => ".txt",
        }
    }
}

/// Extract plain text from an uploaded resume.
///
/// Blank output is not rejected here — the upload handler enforces the
/// non-empty post-condition so it can answer with `EmptyResumeText`.
pub fn extract_resume(bytes: &[u8], filename: &str) -> Result<String, ApiError> {
    let format = ResumeFormat::from_filename(filename)
        .ok_or_else(|| ApiError::UnsupportedFormat(display_extension(filename)))?;

    match format {
        ResumeFormat::Txt => Ok(String::from_utf8_lossy(bytes).into_owned()),
        ResumeFormat::Pdf | ResumeFormat::Docx => {
            let tmp = spool_to_temp(bytes, format.temp_suffix()).map_err(ApiError::Extraction)?;
            let text = match format {
                ResumeFormat::Pdf => pdf_text(tmp.path()),
                ResumeFormat::Docx => docx_text(tmp.path()),
                ResumeFormat::Txt => unreachable!("txt is decoded in place"),
            };
            // tmp dropped here — the file is gone whether `text` is Ok or Err
            text.map_err(ApiError::Extraction)
        }
    }
}

/// Write upload bytes to a named temporary file with the given suffix.
/// The file is deleted when the returned handle drops.
pub fn spool_to_temp(bytes: &[u8], suffix: &str) -> Result<NamedTempFile> {
    let mut tmp = tempfile::Builder::new()
        .prefix("resumatch-upload-")
        .suffix(suffix)
        .tempfile()
        .context("failed to create temp file for upload")?;
    tmp.write_all(bytes).context("failed to spool upload to disk")?;
    tmp.flush().context("failed to flush upload temp file")?;
    Ok(tmp)
}

/// Per-page PDF text, skipping pages with no extractable text (e.g. scans),
/// joined with newlines in page order.
pub fn pdf_text(path: &Path) -> Result<String> {
    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| anyhow::anyhow!("PDF parsing failed: {e}"))?;

    let joined = pages
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(joined)
}

/// Paragraph text from a DOCX container, joined with newlines in document order.
pub fn docx_text(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path).context("failed to open DOCX temp file")?;
    let mut archive =
        zip::ZipArchive::new(file).context("failed to read DOCX as ZIP archive")?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("DOCX is missing word/document.xml")?
        .read_to_string(&mut xml)
        .context("failed to read document.xml from DOCX")?;

    Ok(docx_paragraphs(&xml).join("\n"))
}

/// Collect the text of each non-empty `<w:p>` paragraph by concatenating its
/// `<w:t>` runs. Self-closing runs and sibling elements whose names merely
/// start with `w:t` (`<w:tab/>`, `<w:tc>`) are skipped.
fn docx_paragraphs(xml: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();

    for chunk in xml.split("</w:p>") {
        let Some(p_start) = chunk.find("<w:p") else {
            continue;
        };
        let mut rest = &chunk[p_start..];
        let mut text = String::new();

        while let Some(t_start) = rest.find("<w:t") {
            let after = &rest[t_start + 4..];
            let Some(gt) = after.find('>') else {
                break;
            };
            let attrs = &after[..gt];
            let body = &after[gt + 1..];

            // A longer element name (<w:tab/>, <w:tc>) or a self-closing run
            if attrs.starts_with(|c: char| c.is_ascii_alphanumeric()) || attrs.ends_with('/') {
                rest = body;
                continue;
            }

            let Some(t_end) = body.find("</w:t>") else {
                break;
            };
            text.push_str(&body[..t_end]);
            rest = &body[t_end + 6..];
        }

        let text = unescape_xml(&text);
        if !text.trim().is_empty() {
            paragraphs.push(text);
        }
    }

    paragraphs
}

/// Decode the five predefined XML entities.
fn unescape_xml(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn display_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_else(|| "(no extension)".into())
}
