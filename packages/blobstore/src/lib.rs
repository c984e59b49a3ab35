//! Minimal Azure Blob Storage client
//!
//! Uploads block blobs to a single container, authenticating with
//! SharedKey-Lite request signatures. No download, listing, or deletion —
//! consumers of this crate archive immutable artifacts and never touch
//! them again.
//!
//! # Example
//!
//! ```rust,ignore
//! use blobstore::{BlobStoreClient, BlobStoreOptions};
//!
//! let client = BlobStoreClient::new(BlobStoreOptions {
//!     endpoint: "https://myaccount.blob.core.windows.net".into(),
//!     account_key: base64_key,
//!     container: "audit-reports".into(),
//! })?;
//!
//! client.put_object("report.json", bytes, "application/json").await?;
//! ```

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;
use thiserror::Error;
use tracing::{debug, warn};

const STORAGE_API_VERSION: &str = "2021-08-06";

/// Result type for blob store operations.
pub type Result<T> = std::result::Result<T, BlobStoreError>;

/// Blob store client errors.
#[derive(Debug, Error)]
pub enum BlobStoreError {
    /// Configuration error (bad endpoint, malformed account key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, auth rejection)
    #[error("API error: {0}")]
    Api(String),
}

/// Connection options for a storage account.
#[derive(Debug, Clone)]
pub struct BlobStoreOptions {
    /// Account endpoint, e.g. `https://myaccount.blob.core.windows.net`
    pub endpoint: String,
    /// Base64-encoded shared account key
    pub account_key: String,
    /// Container all uploads target
    pub container: String,
}

/// Azure Blob Storage client bound to one container.
#[derive(Clone)]
pub struct BlobStoreClient {
    http_client: Client,
    options: BlobStoreOptions,
    account: String,
}

impl BlobStoreClient {
    pub fn new(options: BlobStoreOptions) -> Result<Self> {
        let account = account_from_endpoint(&options.endpoint).ok_or_else(|| {
            BlobStoreError::Config(format!(
                "cannot derive account name from endpoint '{}'",
                options.endpoint
            ))
        })?;

        Ok(Self {
            http_client: Client::new(),
            options,
            account,
        })
    }

    /// Container this client uploads into.
    pub fn container(&self) -> &str {
        &self.options.container
    }

    /// Upload a block blob.
    ///
    /// The service overwrites an existing blob under the same name; callers
    /// are expected to pick collision-free names.
    pub async fn put_object(
        &self,
        blob_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let string_to_sign = put_blob_string_to_sign(
            content_type,
            &date,
            &self.account,
            &self.options.container,
            blob_name,
        );
        let authorization = self.sign(&string_to_sign)?;

        let url = format!(
            "{}/{}/{}",
            self.options.endpoint.trim_end_matches('/'),
            self.options.container,
            blob_name
        );

        let response = self
            .http_client
            .put(&url)
            .header("Authorization", authorization)
            .header("Content-Type", content_type)
            .header("x-ms-blob-type", "BlockBlob")
            .header("x-ms-date", &date)
            .header("x-ms-version", STORAGE_API_VERSION)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                warn!(blob_name, error = %e, "Blob upload request failed");
                BlobStoreError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(blob_name, status = %status, error = %error_text, "Blob upload rejected");
            return Err(BlobStoreError::Api(format!(
                "blob upload failed ({}): {}",
                status, error_text
            )));
        }

        debug!(blob_name, content_type, "Blob uploaded");
        Ok(())
    }

    /// Produce the `Authorization` header value for a signed request.
    fn sign(&self, string_to_sign: &str) -> Result<String> {
        let key = BASE64
            .decode(&self.options.account_key)
            .map_err(|e| BlobStoreError::Config(format!("account key is not valid base64: {}", e)))?;

        let mut mac = Hmac::<Sha256>::new_from_slice(&key)
            .map_err(|e| BlobStoreError::Config(format!("account key rejected: {}", e)))?;
        mac.update(string_to_sign.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());

        Ok(format!("SharedKeyLite {}:{}", self.account, signature))
    }
}

/// SharedKey-Lite string-to-sign for a block blob PUT.
///
/// Canonicalized headers are the three `x-ms-*` headers this client sends,
/// already in sorted order; the `Date` slot stays empty because `x-ms-date`
/// takes precedence.
fn put_blob_string_to_sign(
    content_type: &str,
    date: &str,
    account: &str,
    container: &str,
    blob_name: &str,
) -> String {
    format!(
        "PUT\n\n{}\n\nx-ms-blob-type:BlockBlob\nx-ms-date:{}\nx-ms-version:{}\n/{}/{}/{}",
        content_type, date, STORAGE_API_VERSION, account, container, blob_name
    )
}

fn account_from_endpoint(endpoint: &str) -> Option<String> {
    let host = endpoint
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .split('/')
        .next()?;
    let account = host.split('.').next()?;
    if account.is_empty() {
        None
    } else {
        Some(account.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_from_endpoint() {
        assert_eq!(
            account_from_endpoint("https://myaccount.blob.core.windows.net"),
            Some("myaccount".to_string())
        );
        assert_eq!(
            account_from_endpoint("https://myaccount.blob.core.windows.net/"),
            Some("myaccount".to_string())
        );
        assert_eq!(account_from_endpoint("https://"), None);
    }

    #[test]
    fn test_put_blob_string_to_sign() {
        let s = put_blob_string_to_sign(
            "application/json",
            "Mon, 04 Mar 2024 10:00:00 GMT",
            "myaccount",
            "audit-reports",
            "site_visit.json",
        );

        assert_eq!(
            s,
            "PUT\n\napplication/json\n\nx-ms-blob-type:BlockBlob\n\
             x-ms-date:Mon, 04 Mar 2024 10:00:00 GMT\n\
             x-ms-version:2021-08-06\n\
             /myaccount/audit-reports/site_visit.json"
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let client = BlobStoreClient::new(BlobStoreOptions {
            endpoint: "https://myaccount.blob.core.windows.net".into(),
            account_key: BASE64.encode(b"not a real key"),
            container: "audit-reports".into(),
        })
        .unwrap();

        let a = client.sign("PUT\n\napplication/json").unwrap();
        let b = client.sign("PUT\n\napplication/json").unwrap();

        assert_eq!(a, b);
        assert!(a.starts_with("SharedKeyLite myaccount:"));
    }

    #[test]
    fn test_invalid_account_key_rejected() {
        let client = BlobStoreClient::new(BlobStoreOptions {
            endpoint: "https://myaccount.blob.core.windows.net".into(),
            account_key: "not base64 !!!".into(),
            container: "audit-reports".into(),
        })
        .unwrap();

        assert!(matches!(
            client.sign("anything"),
            Err(BlobStoreError::Config(_))
        ));
    }
}
