// Common types shared across the application

pub mod report_types;

pub use report_types::*;
