//! Document Intelligence wire types.
//!
//! Only the slices of the analyze result this client's consumers read are
//! modelled: page lines and key/value detections. Everything else the
//! service returns (tables, styles, bounding regions) is ignored during
//! deserialization.

use serde::Deserialize;

/// State of a long-running analyze operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

/// Polled operation envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOperation {
    pub status: OperationStatus,

    /// Present once `status` is `Succeeded`.
    pub analyze_result: Option<AnalyzeResult>,

    /// Present once `status` is `Failed`.
    pub error: Option<OperationError>,
}

/// Error detail attached to a failed operation.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: String,
    pub message: String,
}

/// The analysis payload: pages of recognized lines plus detected
/// key/value pairs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    #[serde(default)]
    pub pages: Vec<DocumentPage>,

    #[serde(default)]
    pub key_value_pairs: Vec<DocumentKeyValuePair>,
}

/// One page of the analyzed document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentPage {
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

/// A single recognized line of text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentLine {
    pub content: String,
}

/// A detected field label / answer pair. Either side may be missing when
/// the model recognizes a label without an answer (or vice versa).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentKeyValuePair {
    pub key: Option<DocumentKeyValueElement>,
    pub value: Option<DocumentKeyValueElement>,
}

/// One side of a key/value detection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentKeyValueElement {
    pub content: String,
}

impl DocumentKeyValueElement {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
