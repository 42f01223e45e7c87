//! Endpoint calls for the two upload pathways.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tracing::warn;
use vidblock_core::{FileBlob, UploadError, UploadResponse};

use crate::HttpUploadClient;

/// Body of the by-url request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlUploadRequest<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_request_data: Option<&'a Map<String, JsonValue>>,
}

impl HttpUploadClient {
    /// Upload a blob as multipart form data under `field`.
    ///
    /// `additional_data` entries are sent as extra text fields; non-string
    /// values are JSON-encoded.
    pub async fn upload_video_file(
        &self,
        endpoint: &str,
        field: &str,
        file: FileBlob,
        additional_data: &Map<String, JsonValue>,
    ) -> Result<UploadResponse, UploadError> {
        let filename = file.name.clone().unwrap_or_else(|| field.to_string());
        let mime = file.mime_type.as_deref().and_then(checked_mime);

        let part = reqwest::multipart::Part::bytes(file.data.to_vec()).file_name(filename);
        let part = match mime {
            Some(mime) => part.mime_str(mime)?,
            None => part,
        };

        let mut form = reqwest::multipart::Form::new().part(field.to_string(), part);
        for (key, value) in additional_data {
            let text = match value {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            form = form.text(key.clone(), text);
        }

        self.post_multipart(endpoint, form).await
    }

    /// Ask the server to fetch and persist the media behind `url`.
    pub async fn upload_video_url(
        &self,
        endpoint: &str,
        url: &str,
        additional_data: &Map<String, JsonValue>,
    ) -> Result<UploadResponse, UploadError> {
        let body = UrlUploadRequest {
            url,
            additional_request_data: (!additional_data.is_empty()).then_some(additional_data),
        };

        self.post_json(endpoint, &body).await
    }
}

/// The declared MIME type if it parses; an unparsable one is dropped so the
/// part goes out with reqwest's default.
fn checked_mime(raw: &str) -> Option<&str> {
    match raw.parse::<mime::Mime>() {
        Ok(_) => Some(raw),
        Err(e) => {
            warn!(mime = %raw, error = %e, "Ignoring unparsable MIME type on upload");
            None
        }
    }
}
