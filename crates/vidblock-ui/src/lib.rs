//! Presentation layer of the video block.
//!
//! [`VideoView`] owns the visible structure and the `empty → uploading →
//! filled` status. It is driven entirely from outside: the block controller
//! calls its operations, and the host forwards the media element's load
//! events through [`VideoView::media_event`]. The view never touches the
//! saved record.

pub mod media;
pub mod view;

pub use media::{
    Dimensions, ExtensionClassifier, MediaClassifier, MediaElement, MediaEvent, MediaKind,
};
pub use view::{CaptionField, SelectButton, UiStatus, VideoView, ViewOptions, WidgetTree};
