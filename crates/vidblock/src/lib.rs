//! Video block for block-structured rich-text editors.
//!
//! A [`VideoBlock`] lets a user attach a video by picking a file, pasting a
//! URL or media tag, or dropping a file. The upload itself is delegated to
//! [`vidblock_uploader::Uploader`]; what the user sees is kept in a
//! [`vidblock_ui::VideoView`]. The block reconciles both with the saved
//! [`VideoRecord`] and reports failures through the [`EditorHost`].

pub mod block;
pub mod host;
pub mod paste;
pub mod tunes;

pub use block::{settle, BlockParams, Toolbox, VideoBlock};
pub use host::{EditorHost, Notification, NotificationStyle};
pub use paste::{PasteConfig, PasteEvent};
pub use tunes::{ActionId, CaptionToggle, TuneDescriptor, TuneId, CAPTION_TUNE};

pub use vidblock_core::{
    ActionConfig, CaptionFeature, ConfigError, FileBlob, FileRef, UploadError, UploadResponse,
    VideoRecord, VideoToolConfig,
};
pub use vidblock_ui::{Dimensions, MediaEvent, MediaKind, UiStatus, WidgetTree};
pub use vidblock_uploader::{CustomUploader, FilePicker, UploadHandle, UploadOutcome};
