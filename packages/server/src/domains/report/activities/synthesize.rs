//! Report and summary synthesizers.
//!
//! Two generation calls: a schema-constrained one that populates the full
//! checklist structure, and a free-text one that writes the report-level
//! narrative from the populated structure.

use anyhow::{Context, Result};
use azure_openai::StructuredOutput;
use tracing::info;

use crate::common::{Checklist, NormalizedExtraction};
use crate::kernel::BaseGenerator;

const REPORT_SYSTEM_PROMPT: &str = "You are a financial expert AI that assists with the \
    creation of reports based on reviews of financial offices across the organization.";

fn report_prompt(extraction: &NormalizedExtraction) -> String {
    let key_value_pairs =
        serde_json::to_string_pretty(&extraction.key_value_pairs).unwrap_or_default();

    format!(
        "Provided below is a report detailing an in-person review / audit from a recent \
         visit to a location.\n\
         \n\
         Key Value Pairs:\n\
         \n\
         {key_value_pairs}\n\
         \n\
         Full Text:\n\
         \n\
         {text}\n\
         \n\
         - Include all of the individual items in each section.\n\
         - Complete a summary of the responses in the section to assist with creating a narrative.\n\
         - Extract any additional information from each question and add it as a note.\n\
         - If a question includes additional selection boxes, include those as selections in a list in the output.\n\
         - Add additional information for any localization for the country the office is located in.",
        text = extraction.text_content,
    )
}

/// Populate the full report structure from the normalized extraction.
///
/// The generation capability guarantees structural conformance; `summary`
/// comes back as a placeholder, `original_document` unset, and `file_name`
/// as an unvalidated suggestion. Any call failure or non-conforming output
/// is fatal for the request.
pub async fn synthesize_report(
    extraction: &NormalizedExtraction,
    generator: &dyn BaseGenerator,
) -> Result<Checklist> {
    let schema = Checklist::structured_schema();
    let prompt = report_prompt(extraction);

    let json = generator
        .generate_structured(REPORT_SYSTEM_PROMPT, &prompt, schema)
        .await
        .context("structured generation call failed")?;

    let checklist: Checklist = serde_json::from_str(&json)
        .context("structured generation returned non-conforming output")?;

    info!(
        sections = checklist.sections.len(),
        suggested_name = %checklist.file_name,
        "Report structure synthesized"
    );

    Ok(checklist)
}

fn summary_prompt(report_json: &str) -> String {
    format!(
        "Review the provided JSON and provide a summary of the site visit.\n\
         Be verbose and cover all of the topics mentioned in the JSON.\n\
         JSON:\n\
         \n\
         {report_json}\n\
         \n\
         Only provide the summary, do not include any additional information."
    )
}

/// Produce the verbose report-level narrative from the populated structure.
///
/// The caller writes the returned text into `Checklist.summary`; no other
/// field is touched by this stage.
pub async fn synthesize_summary(
    report: &Checklist,
    generator: &dyn BaseGenerator,
) -> Result<String> {
    let report_json =
        serde_json::to_string_pretty(report).context("failed to serialize report for summary")?;

    generator
        .generate_text(&summary_prompt(&report_json))
        .await
        .context("summary generation call failed")
}
