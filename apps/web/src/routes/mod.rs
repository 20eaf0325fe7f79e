pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::intake::inputs::MAX_REQUEST_BYTES;
use crate::state::AppState;
use crate::ui;
use crate::workflow::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // HTML form
        .route("/", get(ui::handlers::handle_index))
        .route("/submit", post(ui::handlers::handle_submit))
        .route("/generate", post(ui::handlers::handle_generate))
        // JSON API
        .route("/api/v1/proposals/extract", post(handlers::handle_extract))
        .route("/api/v1/proposals/generate", post(handlers::handle_generate))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::intake::inputs::MAX_LOGO_BYTES;
    use crate::intake::logo::TINY_PNG;
    use crate::intake::pdf::test_pdf;
    use crate::llm_client::stub::StubClient;

    const BOUNDARY: &str = "proposal-writer-test-boundary";
    const FIELDS_REPLY: &str = "Purchasing Manager: Jane Doe\nScope of Work: Flood debris removal";
    const PROPOSAL_REPLY: &str = "1. Executive Summary\n2. Company Background\n\
        3. Proposed Solution\n4. Timeline\n5. Budget Breakdown\n6. Conclusion";

    struct Part<'a> {
        name: &'a str,
        filename: Option<&'a str>,
        content_type: Option<&'a str>,
        data: Vec<u8>,
    }

    fn text_part<'a>(name: &'a str, value: &str) -> Part<'a> {
        Part {
            name,
            filename: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        }
    }

    fn file_part<'a>(name: &'a str, filename: &'a str, content_type: &'a str, data: Vec<u8>) -> Part<'a> {
        Part {
            name,
            filename: Some(filename),
            content_type: Some(content_type),
            data,
        }
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
            if let Some(filename) = part.filename {
                disposition.push_str(&format!("; filename=\"{filename}\""));
            }
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(b"\r\n");
            if let Some(content_type) = part.content_type {
                body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(&part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn full_form(include_logo: bool) -> Vec<u8> {
        form_with(test_pdf::build(&["Report body..."]), include_logo.then(|| TINY_PNG.to_vec()))
    }

    fn form_with(document: Vec<u8>, logo: Option<Vec<u8>>) -> Vec<u8> {
        let mut parts = vec![
            file_part("document", "report.pdf", "application/pdf", document),
            text_part("disaster_article", "A flood destroyed..."),
            text_part("yearly_budget", "50000"),
        ];
        if let Some(logo) = logo {
            parts.push(file_part("client_logo", "logo.png", "image/png", logo));
        }
        multipart_body(&parts)
    }

    /// A PNG signature padded with zeros to `len` bytes.
    fn png_of_len(len: usize) -> Vec<u8> {
        let mut logo = TINY_PNG[..8].to_vec();
        logo.resize(len, 0);
        logo
    }

    fn session_from_page(html: &str) -> String {
        // The token alphabet is URL-safe base64, so it appears in the page unescaped.
        let marker = "name=\"session\" value=\"";
        let start = html.find(marker).unwrap() + marker.len();
        let end = start + html[start..].find('"').unwrap();
        html[start..end].to_string()
    }

    fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn app(stub: Arc<StubClient>) -> Router {
        build_router(AppState { llm: stub })
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let stub = Arc::new(StubClient::new(""));
        let response = app(stub)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model"], "llama-3.1");
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let stub = Arc::new(StubClient::new(""));
        let response = app(stub)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Proposal Writer App using Llama 3.1 and Groq API"));
        assert!(html.contains(">Submit</button>"));
    }

    #[tokio::test]
    async fn test_api_extract_then_generate() {
        let stub = Arc::new(StubClient::with_replies(&[FIELDS_REPLY, PROPOSAL_REPLY]));

        let response = app(stub.clone())
            .oneshot(multipart_request("/api/v1/proposals/extract", full_form(true)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let extracted: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(extracted["state"], "fields_extracted");
        assert_eq!(
            extracted["extracted_info"],
            serde_json::json!([
                "Purchasing Manager: Jane Doe",
                "Scope of Work: Flood debris removal"
            ])
        );
        let session = extracted["session"].as_str().unwrap().to_string();

        let response = app(stub.clone())
            .oneshot(
                Request::post("/api/v1/proposals/generate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::json!({ "session": session }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let generated: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(generated["state"], "proposal_generated");
        assert_eq!(generated["proposal"], PROPOSAL_REPLY);
        assert!(generated["client_logo"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert_eq!(stub.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_api_extract_missing_logo_is_warning_without_calls() {
        let stub = Arc::new(StubClient::new(FIELDS_REPLY));
        let response = app(stub.clone())
            .oneshot(multipart_request("/api/v1/proposals/extract", full_form(false)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"]["code"], "MISSING_INPUTS");
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_api_generate_with_bad_session() {
        let stub = Arc::new(StubClient::new(""));
        let response = app(stub.clone())
            .oneshot(
                Request::post("/api/v1/proposals/generate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"session": "not-a-session"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_html_submit_missing_logo_shows_only_warning() {
        let stub = Arc::new(StubClient::new(FIELDS_REPLY));
        let response = app(stub.clone())
            .oneshot(multipart_request("/submit", full_form(false)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("class=\"warning\""));
        assert!(!html.contains("Extracted Information"));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_html_submit_then_generate() {
        let stub = Arc::new(StubClient::with_replies(&[FIELDS_REPLY, PROPOSAL_REPLY]));

        let response = app(stub.clone())
            .oneshot(multipart_request("/submit", full_form(true)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Extracted Information"));
        assert!(html.contains("<p class=\"field\">Purchasing Manager: Jane Doe</p>"));
        assert!(html.contains("Generate Proposal"));

        let session = session_from_page(&html);

        let response = app(stub.clone())
            .oneshot(
                Request::post("/generate")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!("session={session}")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Generated Proposal"));
        assert!(html.contains("6. Conclusion"));
        assert!(html.contains("<img src=\"data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_html_submit_malformed_pdf_shows_error() {
        let stub = Arc::new(StubClient::new(FIELDS_REPLY));
        let body = multipart_body(&[
            file_part("document", "bad.pdf", "application/pdf", b"not a pdf".to_vec()),
            text_part("disaster_article", "A flood destroyed..."),
            file_part("client_logo", "logo.png", "image/png", TINY_PNG.to_vec()),
            text_part("yearly_budget", "50000"),
        ]);
        let response = app(stub.clone())
            .oneshot(multipart_request("/submit", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_string(response).await;
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("Malformed PDF"));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_non_image_logo_is_rejected() {
        let stub = Arc::new(StubClient::new(FIELDS_REPLY));
        let body = multipart_body(&[
            file_part("client_logo", "logo.gif", "image/gif", b"GIF89a....".to_vec()),
        ]);
        let response = app(stub)
            .oneshot(multipart_request("/api/v1/proposals/extract", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_html_round_trip_with_logo_at_size_limit() {
        let stub = Arc::new(StubClient::with_replies(&[FIELDS_REPLY, PROPOSAL_REPLY]));
        let body = form_with(
            test_pdf::build(&["Report body..."]),
            Some(png_of_len(MAX_LOGO_BYTES)),
        );

        let response = app(stub.clone())
            .oneshot(multipart_request("/submit", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let session = session_from_page(&body_string(response).await);

        let response = app(stub.clone())
            .oneshot(
                Request::post("/generate")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!("session={session}")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Generated Proposal"));
        assert_eq!(stub.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_logo_over_size_limit_is_rejected_before_model_call() {
        let stub = Arc::new(StubClient::new(FIELDS_REPLY));
        let body = form_with(
            test_pdf::build(&["Report body..."]),
            Some(png_of_len(MAX_LOGO_BYTES + 1)),
        );
        let response = app(stub.clone())
            .oneshot(multipart_request("/api/v1/proposals/extract", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_pdf_with_undefined_font_is_unprocessable() {
        let stub = Arc::new(StubClient::new(FIELDS_REPLY));
        let body = form_with(
            test_pdf::build_with_font_ref(&["Report body..."], "F9"),
            Some(TINY_PNG.to_vec()),
        );
        let response = app(stub.clone())
            .oneshot(multipart_request("/api/v1/proposals/extract", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"]["code"], "MALFORMED_PDF");
        assert!(stub.requests().is_empty());
    }
}
