//! vidblock core library
//!
//! Domain models, configuration, error types and paste constants shared by
//! the upload coordinator, the presentation layer and the block controller.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{CaptionFeature, Endpoints, Features, VideoToolConfig};
pub use error::{ConfigError, ErrorMetadata, LogLevel, UploadError, UploadPathway};
pub use models::{
    ActionCallback, ActionConfig, FileBlob, FileRef, UploadResponse, UploadResult, UploadTicket,
    VideoRecord,
};
