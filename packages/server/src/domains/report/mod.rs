//! Report domain - the extraction-to-structured-report pipeline.

pub mod activities;
pub mod pipeline;

pub use pipeline::{process_document, PipelineError};
