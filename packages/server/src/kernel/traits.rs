// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (what to prompt for, what to archive) lives in the
// report domain and uses these traits.
//
// Naming convention: Base* for trait names (e.g., BaseGenerator)

use anyhow::Result;
use async_trait::async_trait;
use docintel::AnalyzeResult;

// =============================================================================
// Document Analyzer Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseDocumentAnalyzer: Send + Sync {
    /// Analyze raw document bytes into pages of lines and key/value
    /// detections.
    async fn analyze(&self, document: &[u8]) -> Result<AnalyzeResult>;
}

// =============================================================================
// Generator Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseGenerator: Send + Sync {
    /// Generate output conforming to the given JSON schema (returns the raw
    /// JSON string). Parse with serde_json::from_str in calling code.
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
    ) -> Result<String>;

    /// Generate free text from a prompt.
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}

// =============================================================================
// Object Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseObjectStore: Send + Sync {
    /// Persist an immutable object under the given name. Names are never
    /// reused within the pipeline; overwrite behavior is the store's.
    async fn put_object(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;
}
