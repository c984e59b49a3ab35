// Pipeline activities, one module per stage

pub mod archive;
pub mod normalize;
pub mod synthesize;

pub use archive::archive_report;
pub use normalize::normalize_analysis;
pub use synthesize::{synthesize_report, synthesize_summary};
