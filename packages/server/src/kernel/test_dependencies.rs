// Mock implementations of the kernel traits for testing
//
// Mocks record every call and replay scripted responses, so pipeline tests
// can assert which stages ran and with what inputs.

use anyhow::Result;
use async_trait::async_trait;
use docintel::AnalyzeResult;
use std::sync::{Arc, Mutex};

use super::{BaseDocumentAnalyzer, BaseGenerator, BaseObjectStore};

// =============================================================================
// Mock Document Analyzer
// =============================================================================

pub struct MockDocumentAnalyzer {
    result: Mutex<Option<AnalyzeResult>>,
    fail: bool,
    analyzed: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockDocumentAnalyzer {
    pub fn new() -> Self {
        Self {
            result: Mutex::new(None),
            fail: false,
            analyzed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Analyzer that fails every call.
    pub fn failing() -> Self {
        Self {
            result: Mutex::new(None),
            fail: true,
            analyzed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_result(self, result: AnalyzeResult) -> Self {
        *self.result.lock().unwrap() = Some(result);
        self
    }

    /// Every document passed to `analyze`, in call order.
    pub fn analyzed_documents(&self) -> Vec<Vec<u8>> {
        self.analyzed.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.analyzed.lock().unwrap().len()
    }
}

impl Default for MockDocumentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseDocumentAnalyzer for MockDocumentAnalyzer {
    async fn analyze(&self, document: &[u8]) -> Result<AnalyzeResult> {
        self.analyzed.lock().unwrap().push(document.to_vec());

        if self.fail {
            anyhow::bail!("mock analysis failure");
        }

        Ok(self.result.lock().unwrap().clone().unwrap_or_default())
    }
}

// =============================================================================
// Mock Generator
// =============================================================================

/// Arguments captured from a structured generation call
#[derive(Debug, Clone)]
pub struct StructuredCallArgs {
    pub system_prompt: String,
    pub user_prompt: String,
    pub schema: serde_json::Value,
}

pub struct MockGenerator {
    structured_responses: Mutex<Vec<String>>,
    text_responses: Mutex<Vec<String>>,
    structured_calls: Arc<Mutex<Vec<StructuredCallArgs>>>,
    text_calls: Arc<Mutex<Vec<String>>>,
    fail_structured: bool,
    fail_text: bool,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            structured_responses: Mutex::new(Vec::new()),
            text_responses: Mutex::new(Vec::new()),
            structured_calls: Arc::new(Mutex::new(Vec::new())),
            text_calls: Arc::new(Mutex::new(Vec::new())),
            fail_structured: false,
            fail_text: false,
        }
    }

    /// Generator whose structured calls fail.
    pub fn failing_structured() -> Self {
        Self {
            fail_structured: true,
            ..Self::new()
        }
    }

    /// Generator whose free-text calls fail.
    pub fn failing_text() -> Self {
        Self {
            fail_text: true,
            ..Self::new()
        }
    }

    /// Queue a structured response (raw JSON string), consumed in order.
    pub fn with_structured_response(self, json: impl Into<String>) -> Self {
        self.structured_responses.lock().unwrap().push(json.into());
        self
    }

    /// Queue a free-text response, consumed in order.
    pub fn with_text_response(self, text: impl Into<String>) -> Self {
        self.text_responses.lock().unwrap().push(text.into());
        self
    }

    pub fn structured_calls(&self) -> Vec<StructuredCallArgs> {
        self.structured_calls.lock().unwrap().clone()
    }

    pub fn text_calls(&self) -> Vec<String> {
        self.text_calls.lock().unwrap().clone()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseGenerator for MockGenerator {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        self.structured_calls.lock().unwrap().push(StructuredCallArgs {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            schema,
        });

        if self.fail_structured {
            anyhow::bail!("mock structured generation failure");
        }

        let mut responses = self.structured_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(r#"{"summary": "placeholder", "sections": [], "file_name": "site_visit"}"#.to_string())
        } else {
            Ok(responses.remove(0))
        }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.text_calls.lock().unwrap().push(prompt.to_string());

        if self.fail_text {
            anyhow::bail!("mock text generation failure");
        }

        let mut responses = self.text_responses.lock().unwrap();
        if responses.is_empty() {
            Ok("Mock narrative summary covering the site visit.".to_string())
        } else {
            Ok(responses.remove(0))
        }
    }
}

// =============================================================================
// Mock Object Store
// =============================================================================

/// One recorded `put_object` call.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

pub struct MockObjectStore {
    puts: Arc<Mutex<Vec<StoredObject>>>,
    fail_when_name_contains: Option<String>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            puts: Arc::new(Mutex::new(Vec::new())),
            fail_when_name_contains: None,
        }
    }

    /// Fail uploads whose name contains the given fragment; everything else
    /// still succeeds and is recorded. Used for partial-archival tests.
    pub fn failing_when_name_contains(fragment: impl Into<String>) -> Self {
        Self {
            puts: Arc::new(Mutex::new(Vec::new())),
            fail_when_name_contains: Some(fragment.into()),
        }
    }

    /// Every successfully stored object, in call order.
    pub fn puts(&self) -> Vec<StoredObject> {
        self.puts.lock().unwrap().clone()
    }

    pub fn stored_names(&self) -> Vec<String> {
        self.puts.lock().unwrap().iter().map(|o| o.name.clone()).collect()
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseObjectStore for MockObjectStore {
    async fn put_object(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        if let Some(fragment) = &self.fail_when_name_contains {
            if name.contains(fragment.as_str()) {
                anyhow::bail!("mock upload failure for '{}'", name);
            }
        }

        self.puts.lock().unwrap().push(StoredObject {
            name: name.to_string(),
            bytes,
            content_type: content_type.to_string(),
        });

        Ok(())
    }
}
