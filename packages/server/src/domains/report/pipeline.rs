//! Pipeline orchestrator.
//!
//! Linear state machine, no branching loops:
//! RECEIVE → ANALYZE → NORMALIZE → SYNTHESIZE_REPORT → SYNTHESIZE_SUMMARY →
//! ARCHIVE → RESPOND. Any stage failure short-circuits to a stage-tagged
//! error; no stage is retried.

use thiserror::Error;
use tracing::{info, warn};

use crate::common::Checklist;
use crate::kernel::ServerDeps;

use super::activities::{
    archive_report, normalize_analysis, synthesize_report, synthesize_summary,
};

/// Stage-tagged pipeline failure. Every variant is terminal for the
/// request; the orchestrator never partially recovers.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or unreadable input (client-caused)
    #[error("Error reading document content: {0}")]
    Ingestion(String),

    /// Document-analysis call failure
    #[error("Error during document analysis: {0}")]
    Analysis(anyhow::Error),

    /// Structured or free-text generation failure or non-conformance
    #[error("Error during report synthesis: {0}")]
    Synthesis(anyhow::Error),

    /// Persistence failure for either archived artifact
    #[error("Error during report archival: {0}")]
    Archival(anyhow::Error),
}

/// Run the full extraction-to-archive pipeline for one document.
///
/// `document` is the raw request body. `None` falls back to the configured
/// fixture document when one is present (non-production affordance);
/// without a fixture an absent body is an ingestion error.
pub async fn process_document(
    document: Option<Vec<u8>>,
    deps: &ServerDeps,
) -> Result<Checklist, PipelineError> {
    // RECEIVE
    let document = match document {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => match &deps.fixture_document {
            Some(fixture) => {
                warn!("Empty request body, substituting the configured fixture document");
                fixture.as_ref().clone()
            }
            None => {
                return Err(PipelineError::Ingestion(
                    "no document content found in the request".to_string(),
                ))
            }
        },
    };

    // ANALYZE
    let analysis = deps
        .analyzer
        .analyze(&document)
        .await
        .map_err(PipelineError::Analysis)?;

    // NORMALIZE
    let extraction = normalize_analysis(&analysis);
    info!(
        key_value_pairs = extraction.key_value_pairs.len(),
        text_bytes = extraction.text_content.len(),
        "Document analyzed and normalized"
    );

    // SYNTHESIZE_REPORT
    let mut report = synthesize_report(&extraction, deps.generator.as_ref())
        .await
        .map_err(PipelineError::Synthesis)?;

    // SYNTHESIZE_SUMMARY
    report.summary = synthesize_summary(&report, deps.generator.as_ref())
        .await
        .map_err(PipelineError::Synthesis)?;

    report.original_document = serde_json::to_value(&extraction).unwrap_or_default();

    // ARCHIVE
    archive_report(&mut report, &document, deps.object_store.as_ref())
        .await
        .map_err(PipelineError::Archival)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MockDocumentAnalyzer, MockGenerator, MockObjectStore, ServerDeps};
    use docintel::{
        AnalyzeResult, DocumentKeyValueElement, DocumentKeyValuePair, DocumentLine, DocumentPage,
    };
    use std::sync::Arc;

    fn analysis_fixture() -> AnalyzeResult {
        AnalyzeResult {
            pages: vec![DocumentPage {
                lines: vec![
                    DocumentLine {
                        content: "Cash Count".to_string(),
                    },
                    DocumentLine {
                        content: "Verified".to_string(),
                    },
                ],
            }],
            key_value_pairs: vec![DocumentKeyValuePair {
                key: Some(DocumentKeyValueElement::new("Office")),
                value: Some(DocumentKeyValueElement::new("Bangkok")),
            }],
        }
    }

    fn structured_response() -> &'static str {
        r#"{
            "summary": "placeholder",
            "sections": [{
                "title": "Cash Handling",
                "summary": "All counts reconciled.",
                "subsections": [{
                    "title": "Daily Count",
                    "items": [{
                        "question_number": "1",
                        "key": "Safe balanced?",
                        "value": "Yes",
                        "notes": null
                    }]
                }]
            }],
            "file_name": "bangkok_august_2021"
        }"#
    }

    struct TestHarness {
        deps: ServerDeps,
        analyzer: Arc<MockDocumentAnalyzer>,
        generator: Arc<MockGenerator>,
        store: Arc<MockObjectStore>,
    }

    fn harness(
        analyzer: MockDocumentAnalyzer,
        generator: MockGenerator,
        store: MockObjectStore,
        fixture_document: Option<Vec<u8>>,
    ) -> TestHarness {
        let analyzer = Arc::new(analyzer);
        let generator = Arc::new(generator);
        let store = Arc::new(store);

        TestHarness {
            deps: ServerDeps::new(
                analyzer.clone(),
                generator.clone(),
                store.clone(),
                fixture_document,
            ),
            analyzer,
            generator,
            store,
        }
    }

    #[tokio::test]
    async fn test_happy_path_reaches_archive() {
        let t = harness(
            MockDocumentAnalyzer::new().with_result(analysis_fixture()),
            MockGenerator::new()
                .with_structured_response(structured_response())
                .with_text_response("A verbose narrative."),
            MockObjectStore::new(),
            None,
        );

        let report = process_document(Some(b"%PDF-audit".to_vec()), &t.deps)
            .await
            .unwrap();

        assert_eq!(report.summary, "A verbose narrative.");
        assert!(report.file_name.starts_with("bangkok_august_2021"));
        assert_eq!(report.file_name.len(), "bangkok_august_2021".len() + 10);

        // Normalized extraction is carried on the archived report.
        assert_eq!(
            report.original_document["text_content"],
            "Cash Count Verified"
        );
        assert_eq!(
            report.original_document["key_value_pairs"]["Office"],
            "Bangkok"
        );

        // Both artifacts landed, and the archived JSON equals the response.
        let puts = t.store.puts();
        assert_eq!(puts.len(), 2);
        let json_put = puts.iter().find(|o| o.name.ends_with(".json")).unwrap();
        let archived: Checklist = serde_json::from_slice(&json_put.bytes).unwrap();
        assert_eq!(archived, report);
        let pdf_put = puts.iter().find(|o| o.name.ends_with(".pdf")).unwrap();
        assert_eq!(pdf_put.bytes, b"%PDF-audit");
    }

    #[tokio::test]
    async fn test_summary_synthesized_after_report() {
        let t = harness(
            MockDocumentAnalyzer::new().with_result(analysis_fixture()),
            MockGenerator::new().with_structured_response(structured_response()),
            MockObjectStore::new(),
            None,
        );

        process_document(Some(b"%PDF-".to_vec()), &t.deps)
            .await
            .unwrap();

        // The summary prompt sees the synthesized structure.
        let text_calls = t.generator.text_calls();
        assert_eq!(text_calls.len(), 1);
        assert!(text_calls[0].contains("Cash Handling"));
        assert_eq!(t.generator.structured_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_body_without_fixture_is_ingestion_error() {
        let t = harness(
            MockDocumentAnalyzer::new(),
            MockGenerator::new(),
            MockObjectStore::new(),
            None,
        );

        let error = process_document(None, &t.deps).await.unwrap_err();

        assert!(matches!(error, PipelineError::Ingestion(_)));
        assert_eq!(t.analyzer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_body_with_fixture_proceeds() {
        let t = harness(
            MockDocumentAnalyzer::new().with_result(analysis_fixture()),
            MockGenerator::new().with_structured_response(structured_response()),
            MockObjectStore::new(),
            Some(b"%PDF-fixture".to_vec()),
        );

        process_document(None, &t.deps).await.unwrap();

        // The fixture bytes flow through analysis and archival.
        assert_eq!(t.analyzer.analyzed_documents()[0], b"%PDF-fixture");
        let puts = t.store.puts();
        let pdf_put = puts.iter().find(|o| o.name.ends_with(".pdf")).unwrap();
        assert_eq!(pdf_put.bytes, b"%PDF-fixture");
    }

    #[tokio::test]
    async fn test_analysis_failure_short_circuits() {
        let t = harness(
            MockDocumentAnalyzer::failing(),
            MockGenerator::new(),
            MockObjectStore::new(),
            None,
        );

        let error = process_document(Some(b"%PDF-".to_vec()), &t.deps)
            .await
            .unwrap_err();

        assert!(matches!(error, PipelineError::Analysis(_)));
        assert!(t.generator.structured_calls().is_empty());
        assert!(t.generator.text_calls().is_empty());
        assert!(t.store.puts().is_empty());
    }

    #[tokio::test]
    async fn test_nonconforming_generation_short_circuits() {
        let t = harness(
            MockDocumentAnalyzer::new().with_result(analysis_fixture()),
            MockGenerator::new().with_structured_response(r#"{"unexpected": true}"#),
            MockObjectStore::new(),
            None,
        );

        let error = process_document(Some(b"%PDF-".to_vec()), &t.deps)
            .await
            .unwrap_err();

        assert!(matches!(error, PipelineError::Synthesis(_)));
        assert!(t.generator.text_calls().is_empty());
        assert!(t.store.puts().is_empty());
    }

    #[tokio::test]
    async fn test_summary_failure_prevents_archival() {
        let t = harness(
            MockDocumentAnalyzer::new().with_result(analysis_fixture()),
            MockGenerator::failing_text().with_structured_response(structured_response()),
            MockObjectStore::new(),
            None,
        );

        let error = process_document(Some(b"%PDF-".to_vec()), &t.deps)
            .await
            .unwrap_err();

        assert!(matches!(error, PipelineError::Synthesis(_)));
        assert!(t.store.puts().is_empty());
    }

    #[tokio::test]
    async fn test_partial_upload_failure_is_archival_error() {
        // One of the two uploads failing fails the request, unlike the
        // silent success it replaced. The persisted sibling stays in place.
        let t = harness(
            MockDocumentAnalyzer::new().with_result(analysis_fixture()),
            MockGenerator::new()
                .with_structured_response(structured_response())
                .with_text_response("A verbose narrative."),
            MockObjectStore::failing_when_name_contains(".pdf"),
            None,
        );

        let error = process_document(Some(b"%PDF-".to_vec()), &t.deps)
            .await
            .unwrap_err();

        assert!(matches!(error, PipelineError::Archival(_)));
        let names = t.store.stored_names();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".json"));
    }
}
