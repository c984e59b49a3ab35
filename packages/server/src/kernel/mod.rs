//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{AzureOpenAIAdapter, BlobStoreAdapter, DocIntelAdapter, ServerDeps};
pub use test_dependencies::{MockDocumentAnalyzer, MockGenerator, MockObjectStore, StoredObject};
pub use traits::*;
