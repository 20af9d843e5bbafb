#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use tower::ServiceExt;

use resumatch::config::ResumatchConfig;
use resumatch::embedding::EmbeddingProvider;
use resumatch::jobs::JobClient;
use resumatch::server::{build_router, AppState};

/// Deterministic embedding stub: each keyword group is one axis, plus a small
/// constant tail so no vector has zero norm. Texts sharing keywords score
/// high; unrelated texts score near zero.
pub struct StubEmbedding;

const AXES: [&str; 4] = ["go", "backend", "distributed", "watercolor"];

impl EmbeddingProvider for StubEmbedding {
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> = AXES
            .iter()
            .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
            .collect();
        v.push(0.1);
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        AXES.len() + 1
    }
}

/// App state wired to the stub provider and a given jobs endpoint.
pub fn test_state(jobs_endpoint: &str) -> AppState {
    let mut config = ResumatchConfig::default();
    config.jobs.endpoint = jobs_endpoint.to_string();
    let jobs = JobClient::new(&config.jobs).unwrap();
    AppState {
        embedding: Arc::new(StubEmbedding),
        jobs,
        config: Arc::new(config),
    }
}

/// Router backed by [`test_state`].
pub fn test_router(jobs_endpoint: &str) -> Router {
    build_router(test_state(jobs_endpoint))
}

/// Spawn a one-route mock of the listing API on an ephemeral port.
/// Returns the endpoint URL to point the app at.
pub async fn spawn_jobs_api(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/jobs",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/jobs")
}

/// A Remotive-shaped posting object.
pub fn posting_json(title: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "company_name": "Acme",
        "candidate_required_location": "Worldwide",
        "job_type": "full_time",
        "description": description,
    })
}

const BOUNDARY: &str = "resumatch-test-boundary";

/// A multipart/form-data body with a single file field.
pub fn multipart_file(field: &str, filename: Option<&str>, content: &[u8]) -> (String, Vec<u8>) {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// POST a file to /upload and decode the JSON response.
pub async fn post_upload(
    router: Router,
    field: &str,
    filename: Option<&str>,
    content: &[u8],
) -> (StatusCode, serde_json::Value) {
    let (content_type, body) = multipart_file(field, filename, content);
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Build an in-memory DOCX container holding the given paragraphs.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>",
    );
    for p in paragraphs {
        xml.push_str(&format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"));
    }
    xml.push_str("</w:body></w:document>");

    let cursor = std::io::Cursor::new(Vec::new());
    let mut writer = zip::ZipWriter::new(cursor);
    let options = zip::write::SimpleFileOptions::default();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
