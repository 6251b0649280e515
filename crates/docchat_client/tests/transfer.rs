use std::time::Duration;

use docchat_client::{
    Backend, ClientSettings, FailureKind, HttpBackend, UploadFile, UPLOAD_FAILED_TEXT,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> ClientSettings {
    ClientSettings::new(Url::parse(&server.uri()).expect("server uri"))
}

fn pdf(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        bytes: b"%PDF-1.4 minimal".to_vec(),
    }
}

#[tokio::test]
async fn upload_posts_multipart_and_parses_receipt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        // The multipart body carries the form field and the filename.
        .and(body_string_contains("notes.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "3 chunks indexed",
            "total_docs": 3,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(settings(&server)).expect("backend");

    let receipt = backend
        .upload_document(&pdf("notes.pdf"))
        .await
        .expect("upload ok");
    assert_eq!(receipt.message, "3 chunks indexed");
    assert_eq!(receipt.total_docs, Some(3));
}

#[tokio::test]
async fn upload_failure_uses_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "unsupported file type",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(settings(&server)).expect("backend");

    let err = backend.upload_document(&pdf("bad.exe")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Backend(400));
    assert_eq!(err.message, "unsupported file type");
}

#[tokio::test]
async fn upload_failure_without_structured_message_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "embedding model crashed",
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(settings(&server)).expect("backend");

    let err = backend.upload_document(&pdf("notes.pdf")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, UPLOAD_FAILED_TEXT);
}

#[tokio::test]
async fn query_sends_json_and_parses_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({ "query": "What is the refund policy?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Within 30 days of purchase.",
            "context": [
                {
                    "text": "Refunds are issued within 30 days...",
                    "full_text": "Refunds are issued within 30 days of purchase.",
                    "score": 0.92,
                },
                { "text": "Contact support to start a refund.", "score": 0.31 },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(settings(&server)).expect("backend");

    let reply = backend
        .submit_query("What is the refund policy?")
        .await
        .expect("query ok");
    assert_eq!(reply.answer, "Within 30 days of purchase.");
    assert_eq!(reply.sources.len(), 2);
    assert_eq!(reply.sources[0].score, 0.92);
    assert_eq!(
        reply.sources[0].full_text.as_deref(),
        Some("Refunds are issued within 30 days of purchase.")
    );
    assert_eq!(reply.sources[1].full_text, None);
}

#[tokio::test]
async fn query_tolerates_missing_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "answer": "No idea, honestly." })),
        )
        .mount(&server)
        .await;

    let backend = HttpBackend::new(settings(&server)).expect("backend");

    let reply = backend.submit_query("anything?").await.expect("query ok");
    assert_eq!(reply.answer, "No idea, honestly.");
    assert!(reply.sources.is_empty());
}

#[tokio::test]
async fn query_non_2xx_is_a_transport_equivalent_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(settings(&server)).expect("backend");

    let err = backend.submit_query("hello?").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn query_fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(settings(&server)).expect("backend");

    let err = backend.submit_query("hello?").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn query_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "answer": "slow" })),
        )
        .mount(&server)
        .await;

    let mut settings = settings(&server);
    settings.request_timeout = Some(Duration::from_millis(50));
    let backend = HttpBackend::new(settings).expect("backend");

    let err = backend.submit_query("hello?").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
