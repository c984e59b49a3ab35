use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub doc_intel_endpoint: String,
    pub doc_intel_key: String,
    pub openai_endpoint: String,
    pub openai_deployment: String,
    pub openai_key: String,
    pub blob_endpoint: String,
    pub blob_key: String,
    pub blob_container_name: String,
    /// Non-production affordance: path to a bundled document substituted
    /// when a request arrives with an empty body. Leave unset in
    /// production deployments; an empty body then fails the request.
    pub fixture_document_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            doc_intel_endpoint: env::var("AZURE_DOC_INTEL_ENDPOINT")
                .context("AZURE_DOC_INTEL_ENDPOINT must be set")?,
            doc_intel_key: env::var("AZURE_DOC_INTEL_KEY")
                .context("AZURE_DOC_INTEL_KEY must be set")?,
            openai_endpoint: env::var("AZURE_OPENAI_API_BASE")
                .context("AZURE_OPENAI_API_BASE must be set")?,
            openai_deployment: env::var("AZURE_OPENAI_DEPLOYMENT")
                .context("AZURE_OPENAI_DEPLOYMENT must be set")?,
            openai_key: env::var("AZURE_OPENAI_KEY")
                .context("AZURE_OPENAI_KEY must be set")?,
            blob_endpoint: env::var("AZURE_BLOB_ENDPOINT")
                .context("AZURE_BLOB_ENDPOINT must be set")?,
            blob_key: env::var("AZURE_BLOB_KEY")
                .context("AZURE_BLOB_KEY must be set")?,
            blob_container_name: env::var("AZURE_BLOB_CONTAINER_NAME")
                .context("AZURE_BLOB_CONTAINER_NAME must be set")?,
            fixture_document_path: env::var("FIXTURE_DOCUMENT_PATH").ok(),
        })
    }
}
