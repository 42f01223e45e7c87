//! Error types module
//!
//! Two families of errors exist in this workspace:
//!
//! - [`UploadError`]: transport failures, server rejections and malformed
//!   responses. All of them travel through the single upload-failure path of
//!   the block and are never fatal to the surrounding document.
//! - [`ConfigError`]: misconfiguration the user cannot fix by retrying (no
//!   uploader at all, invalid endpoint, unknown tune). Raised from
//!   construction. A single missing pathway is an [`UploadError`] instead.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected conditions like a rejected file
    Debug,
    /// Warning level - for transport problems that may go away
    Warn,
    /// Error level - for responses that break the endpoint contract
    Error,
}

/// Metadata describing how an upload error should be reported
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "UPLOAD_REJECTED")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same upload could succeed
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },

    #[error("Upload rejected by server: {0}")]
    Rejected(String),

    #[error("Malformed upload response: {0}")]
    Malformed(String),

    #[error("Refusing to upload an empty file")]
    EmptyFile,

    #[error("Failed to resolve pasted blob {url}: {reason}")]
    BlobFetch { url: String, reason: String },

    #[error("No uploader configured for {0}")]
    Unconfigured(UploadPathway),
}

impl UploadError {
    pub fn transport(message: impl Into<String>) -> Self {
        UploadError::Transport {
            message: message.into(),
            status: None,
        }
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            UploadError::Transport { .. } => "UPLOAD_TRANSPORT_ERROR",
            UploadError::Rejected(_) => "UPLOAD_REJECTED",
            UploadError::Malformed(_) => "UPLOAD_MALFORMED_RESPONSE",
            UploadError::EmptyFile => "UPLOAD_EMPTY_FILE",
            UploadError::BlobFetch { .. } => "UPLOAD_BLOB_FETCH_FAILED",
            UploadError::Unconfigured(_) => "UPLOAD_PATHWAY_UNCONFIGURED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(
            self,
            UploadError::Transport { .. } | UploadError::BlobFetch { .. }
        )
    }

    fn log_level(&self) -> LogLevel {
        match self {
            UploadError::Transport { .. } | UploadError::BlobFetch { .. } => LogLevel::Warn,
            UploadError::Rejected(_) | UploadError::EmptyFile => LogLevel::Debug,
            UploadError::Malformed(_) | UploadError::Unconfigured(_) => LogLevel::Error,
        }
    }
}

/// Upload pathway named in configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPathway {
    File,
    Url,
}

impl std::fmt::Display for UploadPathway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadPathway::File => write!(f, "byFile"),
            UploadPathway::Url => write!(f, "byUrl"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("No uploader configured: set endpoints.byFile, endpoints.byUrl or a custom uploader")]
    MissingUploader,

    #[error("Invalid endpoint {pathway}: {reason}")]
    InvalidEndpoint {
        pathway: UploadPathway,
        reason: String,
    },

    #[error("Invalid multipart field name: {0:?}")]
    InvalidFieldName(String),

    #[error("Tune name {0:?} is declared more than once")]
    DuplicateTune(String),

    #[error("Tune name {0:?} is reserved for a built-in tune")]
    ReservedTuneName(String),

    #[error("Unknown tune: {0:?}")]
    UnknownTune(String),
}
