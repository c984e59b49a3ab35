//! Extraction normalizer - flattens a raw analysis result.

use docintel::AnalyzeResult;
use std::collections::BTreeMap;

use crate::common::NormalizedExtraction;

/// Flatten a raw analysis result into the two artifacts the synthesizer
/// consumes: a key→value mapping and a single text blob.
///
/// This is a normalization step, not a validation step: empty inputs
/// produce empty outputs, never errors. A detection missing either side is
/// skipped entirely; a recurring key keeps its last detected value.
pub fn normalize_analysis(result: &AnalyzeResult) -> NormalizedExtraction {
    let mut key_value_pairs = BTreeMap::new();
    for pair in &result.key_value_pairs {
        if let (Some(key), Some(value)) = (&pair.key, &pair.value) {
            key_value_pairs.insert(key.content.clone(), value.content.clone());
        }
    }

    let text_content = result
        .pages
        .iter()
        .flat_map(|page| page.lines.iter())
        .map(|line| line.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    NormalizedExtraction {
        key_value_pairs,
        text_content,
    }
}
