//! Server dependencies for the pipeline (using traits for testability)
//!
//! This module provides the central dependency container used by the
//! report pipeline, plus the adapters that bridge the collaborator client
//! packages into the kernel traits.

use anyhow::Result;
use async_trait::async_trait;
use azure_openai::{AzureOpenAIClient, ChatRequest, Message, StructuredRequest};
use blobstore::BlobStoreClient;
use docintel::{AnalyzeResult, DocIntelClient, PREBUILT_DOCUMENT};
use std::sync::Arc;

use super::{BaseDocumentAnalyzer, BaseGenerator, BaseObjectStore};

// =============================================================================
// DocIntelClient Adapter (implements BaseDocumentAnalyzer trait)
// =============================================================================

/// Wrapper around DocIntelClient that implements BaseDocumentAnalyzer
pub struct DocIntelAdapter(pub Arc<DocIntelClient>);

impl DocIntelAdapter {
    pub fn new(client: Arc<DocIntelClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseDocumentAnalyzer for DocIntelAdapter {
    async fn analyze(&self, document: &[u8]) -> Result<AnalyzeResult> {
        self.0
            .analyze_document(PREBUILT_DOCUMENT, document.to_vec())
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// AzureOpenAIClient Adapter (implements BaseGenerator trait)
// =============================================================================

/// Wrapper around AzureOpenAIClient that implements BaseGenerator.
///
/// Both call shapes pin sampling (temperature 0.0, top_p 1.0) so repeated
/// runs over identical input stay as reproducible as the model allows.
pub struct AzureOpenAIAdapter(pub Arc<AzureOpenAIClient>);

impl AzureOpenAIAdapter {
    pub fn new(client: Arc<AzureOpenAIClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseGenerator for AzureOpenAIAdapter {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        let request = StructuredRequest::new(system_prompt, user_prompt, schema);
        self.0
            .structured_output(request)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::new()
            .message(Message::user(prompt))
            .temperature(0.0)
            .top_p(1.0);

        self.0
            .chat_completion(request)
            .await
            .map(|response| response.content)
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// BlobStoreClient Adapter (implements BaseObjectStore trait)
// =============================================================================

/// Wrapper around BlobStoreClient that implements BaseObjectStore
pub struct BlobStoreAdapter(pub Arc<BlobStoreClient>);

impl BlobStoreAdapter {
    pub fn new(client: Arc<BlobStoreClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseObjectStore for BlobStoreAdapter {
    async fn put_object(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.0
            .put_object(name, bytes, content_type)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to the pipeline (using traits for
/// testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub analyzer: Arc<dyn BaseDocumentAnalyzer>,
    pub generator: Arc<dyn BaseGenerator>,
    pub object_store: Arc<dyn BaseObjectStore>,
    /// Bundled document substituted for an empty request body. Populated
    /// only when FIXTURE_DOCUMENT_PATH is configured (non-production).
    pub fixture_document: Option<Arc<Vec<u8>>>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        analyzer: Arc<dyn BaseDocumentAnalyzer>,
        generator: Arc<dyn BaseGenerator>,
        object_store: Arc<dyn BaseObjectStore>,
        fixture_document: Option<Vec<u8>>,
    ) -> Self {
        Self {
            analyzer,
            generator,
            object_store,
            fixture_document: fixture_document.map(Arc::new),
        }
    }
}
