//! Upload coordinator for the video block.
//!
//! Turns a file, a URL, or a picker selection into one normalized
//! [`UploadResult`](vidblock_core::UploadResult) or an
//! [`UploadError`](vidblock_core::UploadError), and reports it through the
//! `on_upload` / `on_error` callbacks. Presentation state is never touched
//! here.
//!
//! Transport goes through [`UploadBackend`]. [`RoutedBackend`] picks, per
//! pathway, either the configured HTTP endpoint (via [`HttpUploadClient`]) or
//! a host-supplied [`CustomUploader`] function.

pub mod api;
pub mod backend;
pub mod coordinator;
pub mod picker;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;
use vidblock_core::{UploadError, UploadResponse};

pub use backend::{CustomUploader, FileUploadFn, RoutedBackend, UploadBackend, UrlUploadFn};
pub use coordinator::{
    PreviewHook, UploadCallbacks, UploadHandle, UploadOutcome, Uploader,
};
pub use picker::{CancelledPicker, FilePicker};

/// HTTP client for the upload endpoints.
///
/// Endpoints are absolute URLs taken from the tool config. The client has no
/// request timeout; timeout policy belongs to whoever owns the transport.
#[derive(Clone, Debug)]
pub struct HttpUploadClient {
    client: Client,
    headers: HeaderMap,
}

impl HttpUploadClient {
    pub fn new(extra_headers: &HashMap<String, String>) -> Result<Self, UploadError> {
        let client = Client::builder()
            .build()
            .map_err(|e| UploadError::transport(format!("Failed to create HTTP client: {e}")))?;

        let mut headers = HeaderMap::new();
        for (name, value) in extra_headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = %name, "Skipping invalid additional request header"),
            }
        }

        Ok(Self { client, headers })
    }

    /// POST JSON body and deserialize the upload response.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<UploadResponse, UploadError> {
        let request = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .json(body);

        let response = request.send().await?;
        Self::read_response(response).await
    }

    /// POST multipart form and deserialize the upload response.
    pub async fn post_multipart(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> Result<UploadResponse, UploadError> {
        let request = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .multipart(form);

        let response = request.send().await?;
        Self::read_response(response).await
    }

    async fn read_response(response: reqwest::Response) -> Result<UploadResponse, UploadError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UploadError::Transport {
                message: format!("Upload request failed with status {status}: {error_text}"),
                status: Some(status.as_u16()),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            UploadError::Malformed(format!("Failed to parse response as JSON: {e}"))
        })
    }
}
