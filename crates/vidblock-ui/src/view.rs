//! Video block widget state machine
//!
//! ```text
//!   Empty ──show_preloader──▶ Uploading ──media ready──▶ Filled
//!     ▲                           │                        │
//!     └──────hide_preloader───────┘◀────show_preloader─────┘
//! ```
//!
//! `Filled` is only entered when the displayed element reports its ready
//! event, never when a network response arrives.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use tracing::debug;

use crate::media::{
    Dimensions, ExtensionClassifier, MediaClassifier, MediaElement, MediaEvent,
};

const CSS_ROOT: &str = "video-tool";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiStatus {
    #[default]
    Empty,
    Uploading,
    Filled,
}

impl Display for UiStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UiStatus::Empty => write!(f, "empty"),
            UiStatus::Uploading => write!(f, "uploading"),
            UiStatus::Filled => write!(f, "filled"),
        }
    }
}

/// Static texts and mode of the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub caption_placeholder: String,
    pub button_content: String,
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionField {
    pub text: String,
    pub placeholder: String,
    pub editable: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectButton {
    pub label: String,
    pub visible: bool,
}

/// Snapshot of the widget for the host to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTree {
    pub status: UiStatus,
    pub classes: Vec<String>,
    pub preloader_visible: bool,
    pub media: Option<MediaElement>,
    pub caption: CaptionField,
    pub select_button: SelectButton,
}

pub struct VideoView {
    options: ViewOptions,
    classifier: Arc<dyn MediaClassifier>,
    status: UiStatus,
    media: Option<MediaElement>,
    caption: String,
    tunes: BTreeMap<String, bool>,
    rendered: bool,
}

impl VideoView {
    pub fn new(options: ViewOptions, classifier: Arc<dyn MediaClassifier>) -> Self {
        Self {
            options,
            classifier,
            status: UiStatus::Empty,
            media: None,
            caption: String::new(),
            tunes: BTreeMap::new(),
            rendered: false,
        }
    }

    pub fn with_default_classifier(options: ViewOptions) -> Self {
        Self::new(options, Arc::new(ExtensionClassifier::default()))
    }

    /// Build the structure. Later calls return the current snapshot of the
    /// same structure.
    pub fn render(&mut self) -> WidgetTree {
        if !self.rendered {
            debug!(status = %self.status, "Rendering video widget");
            self.rendered = true;
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> WidgetTree {
        let mut classes = vec![
            CSS_ROOT.to_string(),
            format!("{CSS_ROOT}--{}", self.status),
        ];
        classes.extend(
            self.tunes
                .iter()
                .filter(|(_, enabled)| **enabled)
                .map(|(name, _)| format!("{CSS_ROOT}--{name}")),
        );

        WidgetTree {
            status: self.status,
            classes,
            preloader_visible: self.status == UiStatus::Uploading,
            media: self.media.clone(),
            caption: CaptionField {
                text: self.caption.clone(),
                placeholder: self.options.caption_placeholder.clone(),
                editable: !self.options.read_only,
                visible: self.tune("caption"),
            },
            select_button: SelectButton {
                label: self.options.button_content.clone(),
                visible: self.status == UiStatus::Empty && !self.options.read_only,
            },
        }
    }

    pub fn status(&self) -> UiStatus {
        self.status
    }

    pub fn media(&self) -> Option<&MediaElement> {
        self.media.as_ref()
    }

    pub fn show_preloader(&mut self) {
        self.toggle_status(UiStatus::Uploading);
    }

    pub fn hide_preloader(&mut self) {
        self.toggle_status(UiStatus::Empty);
    }

    /// Show the current element again after a failed replacement upload.
    ///
    /// Only an element that already reported ready brings the widget back to
    /// `Filled`; returns whether it did.
    pub fn reinstate_media(&mut self) -> bool {
        match &self.media {
            Some(media) if media.ready => {
                self.toggle_status(UiStatus::Filled);
                true
            }
            _ => false,
        }
    }

    /// Replace the displayed element with one for `url`.
    ///
    /// The status is left alone; `Filled` follows from [`Self::media_event`].
    pub fn fill_media(&mut self, url: &str) {
        let kind = self.classifier.classify(url);
        debug!(url, ?kind, "Filling media element");
        self.media = Some(MediaElement::new(kind, url));
    }

    /// Deliver a load signal from the element displaying `src`.
    ///
    /// Signals for a replaced element, or of the wrong kind for the current
    /// one, are ignored. Returns whether the widget became `Filled`.
    pub fn media_event(
        &mut self,
        src: &str,
        event: MediaEvent,
        natural_size: Option<Dimensions>,
    ) -> bool {
        let Some(media) = self.media.as_mut() else {
            debug!(src, ?event, "Media event without an element");
            return false;
        };

        if media.src != src {
            debug!(src, current = %media.src, "Ignoring media event for a replaced element");
            return false;
        }

        if media.kind.ready_event() != event {
            debug!(src, ?event, kind = ?media.kind, "Ignoring non-ready media event");
            return false;
        }

        media.ready = true;
        media.natural_size = natural_size;
        self.toggle_status(UiStatus::Filled);
        true
    }

    pub fn fill_caption(&mut self, text: &str) {
        self.caption = text.to_string();
    }

    pub fn caption_text(&self) -> &str {
        &self.caption
    }

    /// Width over height of the loaded media; 1 when not available.
    pub fn aspect_ratio(&self) -> f64 {
        self.media
            .as_ref()
            .and_then(|media| media.natural_size)
            .and_then(|size| size.aspect_ratio())
            .unwrap_or(1.0)
    }

    pub fn apply_tune(&mut self, name: &str, enabled: bool) {
        self.tunes.insert(name.to_string(), enabled);
    }

    pub fn tune(&self, name: &str) -> bool {
        self.tunes.get(name).copied().unwrap_or(false)
    }

    fn toggle_status(&mut self, status: UiStatus) {
        if self.status != status {
            debug!(from = %self.status, to = %status, "Video widget status change");
        }
        self.status = status;
    }
}
