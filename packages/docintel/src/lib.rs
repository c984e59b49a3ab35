//! Pure Azure Document Intelligence REST API client
//!
//! Submits a document to a prebuilt analysis model and polls the resulting
//! long-running operation until it reaches a terminal state.
//!
//! # Example
//!
//! ```rust,ignore
//! use docintel::{DocIntelClient, DocIntelOptions};
//!
//! let client = DocIntelClient::new(DocIntelOptions {
//!     endpoint: "https://myresource.cognitiveservices.azure.com".into(),
//!     api_key: "...".into(),
//! });
//!
//! let result = client.analyze_document("prebuilt-document", pdf_bytes).await?;
//! for page in &result.pages {
//!     for line in &page.lines {
//!         println!("{}", line.content);
//!     }
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{DocIntelError, Result};
pub use types::*;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const API_VERSION: &str = "2023-07-31";

/// Prebuilt model for general document analysis (text + key/value pairs).
pub const PREBUILT_DOCUMENT: &str = "prebuilt-document";

const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLL_ATTEMPTS: u32 = 60;

/// Connection options for a Document Intelligence resource.
#[derive(Debug, Clone)]
pub struct DocIntelOptions {
    /// Resource endpoint, e.g. `https://myresource.cognitiveservices.azure.com`
    pub endpoint: String,
    pub api_key: String,
}

/// Azure Document Intelligence client.
#[derive(Clone)]
pub struct DocIntelClient {
    http_client: Client,
    options: DocIntelOptions,
}

impl DocIntelClient {
    pub fn new(options: DocIntelOptions) -> Self {
        Self {
            http_client: Client::new(),
            options,
        }
    }

    /// Analyze a document with the given prebuilt model.
    ///
    /// Submits the document bytes, then polls the operation returned in the
    /// `Operation-Location` header until it succeeds or fails. Polling is
    /// bounded; an operation that never terminates yields
    /// [`DocIntelError::Timeout`].
    pub async fn analyze_document(&self, model_id: &str, document: Vec<u8>) -> Result<AnalyzeResult> {
        let url = format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}",
            self.options.endpoint.trim_end_matches('/'),
            model_id,
            API_VERSION
        );

        let response = self
            .http_client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.options.api_key)
            .header("Content-Type", "application/pdf")
            .body(document)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Document analysis submission failed");
                DocIntelError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Document analysis rejected");
            return Err(DocIntelError::Api(format!(
                "analysis submission failed: {}",
                error_text
            )));
        }

        let operation_url = response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| DocIntelError::Api("missing Operation-Location header".into()))?;

        debug!(model_id, "Analysis accepted, polling operation");
        self.poll_operation(&operation_url).await
    }

    async fn poll_operation(&self, operation_url: &str) -> Result<AnalyzeResult> {
        for attempt in 1..=MAX_POLL_ATTEMPTS {
            tokio::time::sleep(POLL_INTERVAL).await;

            let response = self
                .http_client
                .get(operation_url)
                .header("Ocp-Apim-Subscription-Key", &self.options.api_key)
                .send()
                .await
                .map_err(|e| DocIntelError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(DocIntelError::Api(format!(
                    "operation poll failed ({}): {}",
                    status, error_text
                )));
            }

            let operation: AnalyzeOperation = response
                .json()
                .await
                .map_err(|e| DocIntelError::Parse(e.to_string()))?;

            match operation.status {
                OperationStatus::Succeeded => {
                    debug!(attempt, "Analysis succeeded");
                    return operation.analyze_result.ok_or_else(|| {
                        DocIntelError::Parse("succeeded operation without analyzeResult".into())
                    });
                }
                OperationStatus::Failed => {
                    let detail = operation
                        .error
                        .map(|e| e.message)
                        .unwrap_or_else(|| "unknown error".into());
                    return Err(DocIntelError::Api(format!("analysis failed: {}", detail)));
                }
                OperationStatus::NotStarted | OperationStatus::Running => {
                    debug!(attempt, "Analysis still running");
                }
            }
        }

        Err(DocIntelError::Timeout(MAX_POLL_ATTEMPTS))
    }
}
