use crate::error_utils::parse_json_with_context;
use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Yandex Disk API specific errors
#[derive(Debug, Error)]
pub enum DiskError {
    #[error("Yandex Disk API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

const DISK_API_BASE: &str = "https://cloud-api.yandex.net";

/// A one-shot upload URL returned by the upload endpoint.
///
/// The API may answer without an `href` (e.g. when the path already exists);
/// callers treat that as a failed upload for the item.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadLink {
    pub href: Option<String>,

    #[serde(default)]
    pub method: Option<String>,
}

/// Yandex Disk client for uploading photo files
pub struct DiskClient {
    client: Client,
    oauth_token: String,
    base_url: String,
}

impl DiskClient {
    pub fn new(oauth_token: &str) -> Result<Self> {
        Self::with_base_url(oauth_token, DISK_API_BASE)
    }

    /// Base URL override, used by tests to point the client at a mock server.
    pub fn with_base_url(oauth_token: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            oauth_token: oauth_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Request a one-shot upload href for the given disk path.
    pub async fn upload_link(&self, path: &str) -> Result<UploadLink> {
        let url = format!("{base}/v1/disk/resources/upload", base = self.base_url);
        debug!("Requesting upload href for {path}");

        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("OAuth {token}", token = self.oauth_token),
            )
            .header("Accept", "application/json")
            .query(&[("path", path)])
            .send()
            .await
            .with_context(|| format!("Failed to request upload URL for {path}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read upload URL response for {path}"))?;

        if !status.is_success() {
            // The endpoint answered without an upload href; the caller skips
            // this item and moves on.
            warn!("Upload URL request for {path} returned HTTP {status}: {body}");
            return Ok(UploadLink {
                href: None,
                method: None,
            });
        }

        parse_json_with_context(&body, "upload link")
    }

    /// PUT raw photo bytes to a previously obtained upload href.
    pub async fn put_bytes(&self, href: &str, bytes: Bytes) -> Result<()> {
        let href_url =
            Url::parse(href).with_context(|| format!("Invalid upload href: {href}"))?;

        debug!(
            "Uploading {len} bytes to {host}",
            len = bytes.len(),
            host = href_url.host_str().unwrap_or("<unknown>")
        );

        let response = self
            .client
            .put(href_url)
            .body(bytes)
            .send()
            .await
            .context("Failed to upload bytes to Yandex Disk")?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("could not read response body: {e}"));
            return Err(DiskError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        // The upload endpoint usually answers 201 with an empty body; report
        // the body as JSON when it parses, raw otherwise.
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => info!("Upload finished (HTTP {status}): {json}"),
            Err(_) => info!("Upload finished (HTTP {status}), response: {body:?}"),
        }

        Ok(())
    }
}
