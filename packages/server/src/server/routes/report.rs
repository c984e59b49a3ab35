use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{error, info};

use crate::domains::report::{process_document, PipelineError};
use crate::server::app::AppState;

/// Process an uploaded audit document into an archived report.
///
/// The request body is the raw PDF. Success returns the archived report as
/// JSON; failures return a plain-text description, 400 for client-caused
/// (missing input) and 500 for dependency-caused (analysis, synthesis,
/// archival) errors.
pub async fn process_document_handler(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Response {
    let document = if body.is_empty() {
        None
    } else {
        Some(body.to_vec())
    };

    match process_document(document, &state.server_deps).await {
        Ok(report) => {
            info!(file_name = %report.file_name, "Report pipeline completed");
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Report pipeline failed");
            let status = match &e {
                PipelineError::Ingestion(_) => StatusCode::BAD_REQUEST,
                PipelineError::Analysis(_)
                | PipelineError::Synthesis(_)
                | PipelineError::Archival(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Checklist;
    use crate::kernel::{MockDocumentAnalyzer, MockGenerator, MockObjectStore, ServerDeps};
    use crate::server::app::build_app;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn deps(
        analyzer: MockDocumentAnalyzer,
        generator: MockGenerator,
        store: MockObjectStore,
    ) -> ServerDeps {
        ServerDeps::new(
            Arc::new(analyzer),
            Arc::new(generator),
            Arc::new(store),
            None,
        )
    }

    fn post_document(body: &'static [u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/reports")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_body_without_fixture_is_bad_request() {
        let app = build_app(deps(
            MockDocumentAnalyzer::new(),
            MockGenerator::new(),
            MockObjectStore::new(),
        ));

        let response = app.oneshot(post_document(b"")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("document content"));
    }

    #[tokio::test]
    async fn test_success_returns_report_json() {
        let app = build_app(deps(
            MockDocumentAnalyzer::new(),
            MockGenerator::new().with_text_response("A verbose narrative."),
            MockObjectStore::new(),
        ));

        let response = app.oneshot(post_document(b"%PDF-")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: Checklist = serde_json::from_slice(&body).unwrap();
        assert_eq!(report.summary, "A verbose narrative.");
        assert!(report.file_name.starts_with("site_visit"));
    }

    #[tokio::test]
    async fn test_analysis_failure_is_server_error() {
        let app = build_app(deps(
            MockDocumentAnalyzer::failing(),
            MockGenerator::new(),
            MockObjectStore::new(),
        ));

        let response = app.oneshot(post_document(b"%PDF-")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("document analysis"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_app(deps(
            MockDocumentAnalyzer::new(),
            MockGenerator::new(),
            MockObjectStore::new(),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
