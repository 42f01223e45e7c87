pub mod action;
pub mod record;
pub mod upload;

pub use action::{ActionCallback, ActionConfig};
pub use record::{FileRef, VideoRecord};
pub use upload::{FileBlob, UploadResponse, UploadResult, UploadTicket};
