mod helpers;

use helpers::docx_bytes;
use resumatch::error::ApiError;
use resumatch::extract::{extract_resume, spool_to_temp};

const MINIMAL_PDF: &[u8] = include_bytes!("fixtures/minimal.pdf");

#[test]
fn pdf_extraction_returns_known_content() {
    let text = extract_resume(MINIMAL_PDF, "resume.pdf").unwrap();
    assert!(
        text.contains("Senior Go backend engineer"),
        "unexpected PDF text: {text:?}"
    );
}

#[test]
fn pdf_extension_match_is_case_insensitive() {
    let text = extract_resume(MINIMAL_PDF, "Resume.PDF").unwrap();
    assert!(!text.trim().is_empty());
}

#[test]
fn docx_extraction_joins_paragraphs_in_order() {
    let bytes = docx_bytes(&["Jane Doe", "Rust developer since 2019", "Contact: jane@example.com"]);
    let text = extract_resume(&bytes, "resume.docx").unwrap();
    assert_eq!(
        text,
        "Jane Doe\nRust developer since 2019\nContact: jane@example.com"
    );
}

#[test]
fn txt_extraction_decodes_content() {
    let text = extract_resume(b"Plain text resume body", "resume.txt").unwrap();
    assert_eq!(text, "Plain text resume body");
}

#[test]
fn unsupported_extension_never_partially_succeeds() {
    for name in ["resume.odt", "resume.doc", "resume.rtf", "resume"] {
        let err = extract_resume(b"content", name).unwrap_err();
        assert!(
            matches!(err, ApiError::UnsupportedFormat(_)),
            "{name} should be rejected"
        );
    }
}

#[test]
fn malformed_docx_is_an_extraction_error() {
    let err = extract_resume(b"this is not a zip archive", "resume.docx").unwrap_err();
    assert!(matches!(err, ApiError::Extraction(_)));
}

#[test]
fn malformed_pdf_is_an_extraction_error() {
    let err = extract_resume(b"%PDF-garbage", "resume.pdf").unwrap_err();
    assert!(matches!(err, ApiError::Extraction(_)));
}

#[test]
fn temp_file_is_gone_after_successful_extraction() {
    // Same mechanism extract_resume relies on: the spooled file lives only
    // as long as its handle.
    let tmp = spool_to_temp(MINIMAL_PDF, ".pdf").unwrap();
    let path = tmp.path().to_path_buf();
    let text = resumatch::extract::pdf_text(&path).unwrap();
    assert!(text.contains("Senior"));
    drop(tmp);
    assert!(!path.exists(), "temp file must not outlive extraction");
}

#[test]
fn temp_file_is_gone_after_failed_extraction() {
    let tmp = spool_to_temp(b"broken bytes", ".docx").unwrap();
    let path = tmp.path().to_path_buf();
    assert!(resumatch::extract::docx_text(&path).is_err());
    drop(tmp);
    assert!(!path.exists(), "temp file must not survive the error path");
}
