//! Report types shared across the pipeline.
//!
//! This is the single source of truth for the checklist shapes. The doc
//! comments on generation-facing fields double as schema descriptions and
//! steer the structured generation step, so wording changes here change
//! model behavior.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One answered field from the audit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyValueItem {
    /// Question number from the original document, when one is printed.
    pub question_number: Option<String>,

    /// The field label as asked on the form.
    pub key: String,

    /// The recorded answer. Selection boxes attached to the question are
    /// listed here as a selection list.
    pub value: String,

    /// Additional information found in the document for this item, beyond
    /// the literal answer.
    pub notes: Option<String>,
}

/// A titled group of answered items within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChecklistSubSection {
    /// The title of the checklist sub-section.
    pub title: String,

    /// Every individual item in the sub-section, in document order.
    pub items: Vec<KeyValueItem>,
}

/// A top-level section of the checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChecklistSection {
    /// The title of the checklist section.
    pub title: String,

    /// Narrative summary of the responses in this section, to assist with
    /// report writing. Independent of the report-level summary.
    pub summary: String,

    /// The subsections in the section, in document order.
    pub subsections: Vec<ChecklistSubSection>,
}

/// The structured report produced from one audit document.
///
/// Created by the report synthesizer with a placeholder `summary`, then
/// mutated exactly twice: the summary synthesizer fills `summary`, the
/// archiver appends the collision suffix to `file_name`. After archival it
/// is never written again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Checklist {
    /// Narrative summary of the overall data in the document.
    pub summary: String,

    /// The sections of the checklist, in document order.
    pub sections: Vec<ChecklistSection>,

    /// The normalized extraction this report was derived from. Filled by
    /// the pipeline after synthesis; excluded from the generation schema.
    #[serde(default)]
    #[schemars(skip)]
    pub original_document: serde_json::Value,

    /// Unique archive name built from location and date information in the
    /// document content, e.g. `bangkok_august_2021`.
    pub file_name: String,
}

/// Output of the extraction normalizer: the flattened key/value detections
/// and the concatenated page text of one analyzed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedExtraction {
    pub key_value_pairs: BTreeMap<String, String>,
    pub text_content: String,
}
