//! Upload transport abstraction
//!
//! The coordinator only talks to [`UploadBackend`]. [`RoutedBackend`] is the
//! production implementation; tests and hosts can provide their own.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::{Map, Value as JsonValue};
use std::future::Future;
use std::sync::Arc;
use vidblock_core::{
    ConfigError, FileBlob, UploadError, UploadPathway, UploadResponse, VideoToolConfig,
};

use crate::HttpUploadClient;

/// Host-supplied replacement for the by-file endpoint.
pub type FileUploadFn =
    Arc<dyn Fn(FileBlob) -> BoxFuture<'static, Result<UploadResponse, UploadError>> + Send + Sync>;

/// Host-supplied replacement for the by-url endpoint.
pub type UrlUploadFn =
    Arc<dyn Fn(String) -> BoxFuture<'static, Result<UploadResponse, UploadError>> + Send + Sync>;

/// Transport used by the coordinator.
///
/// Implementations return the raw server response; normalization into an
/// `UploadResult` happens in the coordinator so every backend gets the same
/// acceptance rules.
#[async_trait]
pub trait UploadBackend: Send + Sync {
    async fn upload_file(&self, file: FileBlob) -> Result<UploadResponse, UploadError>;

    async fn upload_url(&self, url: &str) -> Result<UploadResponse, UploadError>;
}

/// Custom uploader overrides. Each function, when present, replaces the
/// matching endpoint.
#[derive(Clone, Default)]
pub struct CustomUploader {
    pub upload_by_file: Option<FileUploadFn>,
    pub upload_by_url: Option<UrlUploadFn>,
}

impl CustomUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_file<F, Fut>(mut self, upload: F) -> Self
    where
        F: Fn(FileBlob) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<UploadResponse, UploadError>> + Send + 'static,
    {
        self.upload_by_file = Some(Arc::new(move |file| Box::pin(upload(file))));
        self
    }

    pub fn by_url<F, Fut>(mut self, upload: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<UploadResponse, UploadError>> + Send + 'static,
    {
        self.upload_by_url = Some(Arc::new(move |url| Box::pin(upload(url))));
        self
    }
}

impl std::fmt::Debug for CustomUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomUploader")
            .field("upload_by_file", &self.upload_by_file.is_some())
            .field("upload_by_url", &self.upload_by_url.is_some())
            .finish()
    }
}

enum FileRoute {
    Endpoint { url: String, field: String },
    Custom(FileUploadFn),
    Unavailable,
}

enum UrlRoute {
    Endpoint(String),
    Custom(UrlUploadFn),
    Unavailable,
}

/// Per-pathway choice between configured endpoint and custom override.
pub struct RoutedBackend {
    file: FileRoute,
    url: UrlRoute,
    http: Option<HttpUploadClient>,
    additional_data: Map<String, JsonValue>,
}

impl RoutedBackend {
    /// Build from config. Fails when neither pathway has an endpoint or an
    /// override, or when the config itself is invalid. A pathway left without
    /// either fails each of its uploads with [`UploadError::Unconfigured`].
    pub fn from_config(
        config: &VideoToolConfig,
        custom: CustomUploader,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let file = match (custom.upload_by_file, &config.endpoints.by_file) {
            (Some(upload), _) => FileRoute::Custom(upload),
            (None, Some(url)) => FileRoute::Endpoint {
                url: url.clone(),
                field: config.field.clone(),
            },
            (None, None) => FileRoute::Unavailable,
        };

        let url = match (custom.upload_by_url, &config.endpoints.by_url) {
            (Some(upload), _) => UrlRoute::Custom(upload),
            (None, Some(endpoint)) => UrlRoute::Endpoint(endpoint.clone()),
            (None, None) => UrlRoute::Unavailable,
        };

        if matches!(file, FileRoute::Unavailable) && matches!(url, UrlRoute::Unavailable) {
            return Err(ConfigError::MissingUploader);
        }

        let needs_http =
            matches!(file, FileRoute::Endpoint { .. }) || matches!(url, UrlRoute::Endpoint(_));
        let http = if needs_http {
            Some(
                HttpUploadClient::new(&config.additional_request_headers).map_err(|e| {
                    ConfigError::InvalidEndpoint {
                        pathway: UploadPathway::File,
                        reason: e.to_string(),
                    }
                })?,
            )
        } else {
            None
        };

        Ok(Self {
            file,
            url,
            http,
            additional_data: config.additional_request_data.clone(),
        })
    }

    fn http(&self) -> Result<&HttpUploadClient, UploadError> {
        self.http
            .as_ref()
            .ok_or_else(|| UploadError::transport("HTTP client was not initialized"))
    }
}

#[async_trait]
impl UploadBackend for RoutedBackend {
    async fn upload_file(&self, file: FileBlob) -> Result<UploadResponse, UploadError> {
        match &self.file {
            FileRoute::Custom(upload) => upload(file).await,
            FileRoute::Unavailable => Err(UploadError::Unconfigured(UploadPathway::File)),
            FileRoute::Endpoint { url, field } => {
                self.http()?
                    .upload_video_file(url, field, file, &self.additional_data)
                    .await
            }
        }
    }

    async fn upload_url(&self, url: &str) -> Result<UploadResponse, UploadError> {
        match &self.url {
            UrlRoute::Custom(upload) => upload(url.to_string()).await,
            UrlRoute::Unavailable => Err(UploadError::Unconfigured(UploadPathway::Url)),
            UrlRoute::Endpoint(endpoint) => {
                self.http()?
                    .upload_video_url(endpoint, url, &self.additional_data)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidblock_core::FileRef;

    #[test]
    fn test_no_uploader_at_all_is_config_error() {
        let config = VideoToolConfig::default();
        let err = RoutedBackend::from_config(&config, CustomUploader::new()).err();
        assert_eq!(err, Some(ConfigError::MissingUploader));
    }

    #[tokio::test]
    async fn test_single_pathway_config_fails_the_other_at_upload() {
        let mut config = VideoToolConfig::default();
        config.endpoints.by_file = Some("https://x/upload".to_string());
        let backend = RoutedBackend::from_config(&config, CustomUploader::new()).unwrap();

        let err = backend.upload_url("https://x/a.mp4").await.err();
        assert_eq!(err, Some(UploadError::Unconfigured(UploadPathway::Url)));

        let custom = CustomUploader::new()
            .by_url(|url| async move { Ok(UploadResponse::success(FileRef::new(url))) });
        let backend = RoutedBackend::from_config(&VideoToolConfig::default(), custom).unwrap();
        assert!(backend.http.is_none());

        let err = backend.upload_file(FileBlob::new(vec![1, 2, 3])).await.err();
        assert_eq!(err, Some(UploadError::Unconfigured(UploadPathway::File)));
    }

    #[test]
    fn test_override_covers_missing_endpoint() {
        let mut config = VideoToolConfig::default();
        config.endpoints.by_file = Some("https://x/upload".to_string());
        let custom = CustomUploader::new()
            .by_url(|url| async move { Ok(UploadResponse::success(FileRef::new(url))) });

        assert!(RoutedBackend::from_config(&config, custom).is_ok());
    }

    #[tokio::test]
    async fn test_custom_routes_skip_http() {
        let custom = CustomUploader::new()
            .by_file(|file: FileBlob| async move {
                Ok(UploadResponse::success(FileRef::new(format!(
                    "https://cdn/{}",
                    file.name.unwrap_or_default()
                ))))
            })
            .by_url(|url| async move { Ok(UploadResponse::success(FileRef::new(url))) });

        let backend = RoutedBackend::from_config(&VideoToolConfig::default(), custom).unwrap();
        assert!(backend.http.is_none());

        let response = backend
            .upload_file(FileBlob::new(vec![1, 2, 3]).with_name("clip.mp4"))
            .await
            .unwrap();
        assert_eq!(response.file.unwrap().url, "https://cdn/clip.mp4");

        let response = backend.upload_url("https://x/a.mp4").await.unwrap();
        assert_eq!(response.file.unwrap().url, "https://x/a.mp4");
    }
}
