use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::record::FileRef;
use crate::error::UploadError;

/// Binary payload picked from disk, dropped, or pasted from the clipboard.
#[derive(Debug, Clone, PartialEq)]
pub struct FileBlob {
    pub name: Option<String>,
    pub mime_type: Option<String>,
    pub data: Bytes,
}

impl FileBlob {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            name: None,
            mime_type: None,
            data: data.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Identifier of one upload invocation, increasing per coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UploadTicket(pub u64);

impl Display for UploadTicket {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

/// Raw body returned by both upload endpoints and by custom uploaders.
///
/// `success` is accepted as `0`/`1` or as a JSON boolean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, deserialize_with = "success_flag")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SuccessFlag {
    Bool(bool),
    Int(i64),
}

fn success_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<SuccessFlag>::deserialize(deserializer)? {
        Some(SuccessFlag::Bool(flag)) => flag,
        Some(SuccessFlag::Int(flag)) => flag != 0,
        None => false,
    })
}

impl UploadResponse {
    pub fn success(file: FileRef) -> Self {
        Self {
            success: true,
            file: Some(file),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            file: None,
            message: Some(message.into()),
        }
    }

    /// Normalize into an [`UploadResult`].
    ///
    /// Accepted only when the server reports success and returns a file with
    /// a non-empty url.
    pub fn into_result(self, ticket: UploadTicket) -> Result<UploadResult, UploadError> {
        if !self.success {
            return Err(UploadError::Rejected(
                self.message
                    .unwrap_or_else(|| "server reported success=0".to_string()),
            ));
        }

        match self.file {
            Some(file) if file.has_url() => Ok(UploadResult { ticket, file }),
            Some(_) => Err(UploadError::Malformed("response is missing file.url".to_string())),
            None => Err(UploadError::Malformed(
                "success reported without a file object".to_string(),
            )),
        }
    }
}

/// Normalized successful upload, delivered once to `on_upload`.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResult {
    pub ticket: UploadTicket,
    pub file: FileRef,
}
