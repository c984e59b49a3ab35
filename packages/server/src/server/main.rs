// Main entry point for API server

use anyhow::{Context, Result};
use azure_openai::{AzureOpenAIClient, AzureOpenAIOptions};
use blobstore::{BlobStoreClient, BlobStoreOptions};
use docintel::{DocIntelClient, DocIntelOptions};
use server_core::kernel::{AzureOpenAIAdapter, BlobStoreAdapter, DocIntelAdapter, ServerDeps};
use server_core::{server::build_app, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Field-Audit Report API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let analyzer = DocIntelAdapter::new(Arc::new(DocIntelClient::new(DocIntelOptions {
        endpoint: config.doc_intel_endpoint.clone(),
        api_key: config.doc_intel_key.clone(),
    })));

    let generator = AzureOpenAIAdapter::new(Arc::new(AzureOpenAIClient::new(AzureOpenAIOptions {
        endpoint: config.openai_endpoint.clone(),
        deployment: config.openai_deployment.clone(),
        api_key: config.openai_key.clone(),
    })));

    let object_store = BlobStoreAdapter::new(Arc::new(
        BlobStoreClient::new(BlobStoreOptions {
            endpoint: config.blob_endpoint.clone(),
            account_key: config.blob_key.clone(),
            container: config.blob_container_name.clone(),
        })
        .context("Failed to create blob store client")?,
    ));

    // Non-production affordance: requests with an empty body fall back to
    // this document when configured.
    let fixture_document = match &config.fixture_document_path {
        Some(path) => {
            tracing::warn!(
                path = %path,
                "Fixture document fallback ENABLED - never deploy this to production"
            );
            Some(
                tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read fixture document at {}", path))?,
            )
        }
        None => None,
    };

    let deps = ServerDeps::new(
        Arc::new(analyzer),
        Arc::new(generator),
        Arc::new(object_store),
        fixture_document,
    );

    // Build application
    let app = build_app(deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
