//! Pure Azure OpenAI REST API client
//!
//! A minimal client for Azure OpenAI chat completions with no
//! domain-specific logic. Requests are scoped to a single deployment;
//! supports plain completions and strict schema-constrained structured
//! outputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use azure_openai::{AzureOpenAIClient, AzureOpenAIOptions, ChatRequest, Message};
//!
//! let client = AzureOpenAIClient::new(AzureOpenAIOptions {
//!     endpoint: "https://myresource.openai.azure.com".into(),
//!     deployment: "gpt-4o".into(),
//!     api_key: "...".into(),
//! });
//!
//! let response = client
//!     .chat_completion(ChatRequest::new().message(Message::user("Hello!")))
//!     .await?;
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Findings {
//!     observations: Vec<String>,
//! }
//!
//! // Schema generated automatically from the type
//! let findings: Findings = client.extract(system_prompt, user_prompt).await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{AzureOpenAIError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_API_VERSION: &str = "2024-08-01-preview";

/// Connection options for an Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureOpenAIOptions {
    /// Resource endpoint, e.g. `https://myresource.openai.azure.com`
    pub endpoint: String,
    /// Deployment name the requests are scoped to
    pub deployment: String,
    pub api_key: String,
}

/// Azure OpenAI API client, bound to one deployment.
#[derive(Clone)]
pub struct AzureOpenAIClient {
    http_client: Client,
    options: AzureOpenAIOptions,
    api_version: String,
}

impl AzureOpenAIClient {
    pub fn new(options: AzureOpenAIOptions) -> Self {
        Self {
            http_client: Client::new(),
            options,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Override the service API version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Deployment this client is bound to.
    pub fn deployment(&self) -> &str {
        &self.options.deployment
    }

    fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.options.endpoint.trim_end_matches('/'),
            self.options.deployment,
            self.api_version
        )
    }

    /// Chat completion.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.chat_completions_url())
            .header("api-key", &self.options.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Azure OpenAI request failed");
                AzureOpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Azure OpenAI API error");
            return Err(AzureOpenAIError::Api(format!(
                "Azure OpenAI API error: {}",
                error_text
            )));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| AzureOpenAIError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AzureOpenAIError::Api("No response from Azure OpenAI".into()))?;

        debug!(
            deployment = %self.options.deployment,
            duration_ms = start.elapsed().as_millis(),
            "Azure OpenAI chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }

    /// Structured output with a strict JSON schema.
    ///
    /// Returns the raw JSON string; the service guarantees conformance to
    /// the schema in strict mode.
    pub async fn structured_output(&self, request: StructuredRequest) -> Result<String> {
        let response = self
            .http_client
            .post(self.chat_completions_url())
            .header("api-key", &self.options.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AzureOpenAIError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(error = %error_text, "Azure OpenAI structured output error");
            return Err(AzureOpenAIError::Api(format!(
                "Azure OpenAI structured output error: {}",
                error_text
            )));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| AzureOpenAIError::Parse(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AzureOpenAIError::Api("No response from Azure OpenAI".into()))
    }

    /// Type-safe structured output extraction.
    ///
    /// Generates the strict schema from `T`, sends it as the response
    /// format, and deserializes the response into `T`.
    pub async fn extract<T: StructuredOutput>(
        &self,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<T> {
        let schema = T::structured_schema();

        debug!(
            type_name = %T::type_name(),
            "Generated strict schema for extraction"
        );

        let request = StructuredRequest::new(system_prompt, user_prompt, schema);
        let json_str = self.structured_output(request).await?;

        serde_json::from_str(&json_str)
            .map_err(|e| AzureOpenAIError::Parse(format!("Failed to deserialize response: {}", e)))
    }
}
