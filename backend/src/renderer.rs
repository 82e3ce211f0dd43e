//! HTTP client for the external certificate image renderer.
//!
//! The renderer is a black box: it receives the assembled certificate
//! metadata and replies with an opaque JSON artifact. Nothing in its reply
//! is validated here beyond "it is a JSON object"; the artifact travels
//! through storage and back to the caller untouched.

use std::time::Duration;

use common::model::certificate::CertificateMeta;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::error::Result;

/// Client for the external image renderer.
///
/// Owns a connection-pooled `reqwest::Client` built once at startup and
/// shared across requests through the application state. There is no retry
/// loop: a failed render fails the whole generation request.
#[derive(Clone)]
pub struct RendererClient {
    client: Client,
    endpoint_url: String,
}

impl RendererClient {
    pub fn new(endpoint_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.into(),
        })
    }

    /// Sends the assembled certificate metadata to the renderer and returns
    /// its artifact.
    pub async fn render(&self, meta: &CertificateMeta) -> Result<Map<String, Value>> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .json(meta)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
