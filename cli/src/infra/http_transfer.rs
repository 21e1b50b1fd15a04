//! Infrastructure implementation of the `ArtifactTransfer` port with reqwest.

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;

use crate::application::ports::{ARTIFACT_CONTENT_TYPE, ArtifactTransfer};

/// PUTs artifact bytes to pre-signed S3 URLs.
#[derive(Default)]
pub struct HttpTransfer {
    client: reqwest::Client,
}

impl HttpTransfer {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ArtifactTransfer for HttpTransfer {
    async fn put(&self, url: &str, body: Vec<u8>) -> Result<()> {
        let bytes = body.len();
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, ARTIFACT_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .context("sending artifact")?;
        let status = response.status();
        response
            .error_for_status()
            .with_context(|| format!("artifact upload rejected with {status}"))?;
        tracing::debug!(bytes, %status, "artifact transferred");
        Ok(())
    }
}
