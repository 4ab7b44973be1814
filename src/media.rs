use anyhow::{ensure, Context, Result};
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

/// Download a photo's bytes from its CDN URL.
pub async fn download_photo(client: &Client, url: &str) -> Result<Bytes> {
    debug!("Downloading photo from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download photo from {url}"))?;

    ensure!(
        response.status().is_success(),
        "Photo download from {url} failed with HTTP status {status}",
        status = response.status()
    );

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read photo bytes from {url}"))?;

    debug!("Downloaded {len} bytes", len = bytes.len());

    Ok(bytes)
}
