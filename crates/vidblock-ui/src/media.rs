//! Media element model and source classification.

use serde::Serialize;

/// Concrete element used to display a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Playable element with inline, controlled playback.
    Video,
    /// Still-image fallback (servers may return thumbnails).
    Image,
}

impl MediaKind {
    /// Event after which an element of this kind counts as ready.
    pub fn ready_event(self) -> MediaEvent {
        match self {
            MediaKind::Video => MediaEvent::LoadedData,
            MediaKind::Image => MediaEvent::Load,
        }
    }
}

/// Load signals a host can forward from a media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaEvent {
    /// First frame decoded (`loadeddata`).
    LoadedData,
    /// Resource loaded (`load`).
    Load,
}

/// Natural size of the loaded media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`, or `None` when either side is zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaElement {
    pub kind: MediaKind,
    pub src: String,
    pub controls: bool,
    pub plays_inline: bool,
    pub ready: bool,
    pub natural_size: Option<Dimensions>,
}

impl MediaElement {
    pub fn new(kind: MediaKind, src: impl Into<String>) -> Self {
        let is_video = kind == MediaKind::Video;
        Self {
            kind,
            src: src.into(),
            controls: is_video,
            plays_inline: is_video,
            ready: false,
            natural_size: None,
        }
    }
}

/// Decides which element kind displays a source reference.
pub trait MediaClassifier: Send + Sync {
    fn classify(&self, src: &str) -> MediaKind;
}

impl<F> MediaClassifier for F
where
    F: Fn(&str) -> MediaKind + Send + Sync,
{
    fn classify(&self, src: &str) -> MediaKind {
        self(src)
    }
}

/// Classifies by file extension of the source path.
///
/// Query string and fragment are ignored and matching is case-insensitive.
/// `data:video/...` sources are videos. Anything unrecognised, extensionless
/// URLs included, falls back to [`MediaKind::Image`].
#[derive(Debug, Clone)]
pub struct ExtensionClassifier {
    video_extensions: Vec<String>,
}

pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogv", "ogg", "mov", "m4v"];

impl Default for ExtensionClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_VIDEO_EXTENSIONS.iter().copied())
    }
}

impl ExtensionClassifier {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            video_extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    fn extension(src: &str) -> Option<String> {
        let path = src.split(['?', '#']).next().unwrap_or(src);
        let last_segment = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = last_segment.rsplit_once('.')?;
        (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
    }
}

impl MediaClassifier for ExtensionClassifier {
    fn classify(&self, src: &str) -> MediaKind {
        if src
            .get(..11)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:video/"))
        {
            return MediaKind::Video;
        }

        match Self::extension(src) {
            Some(ext) if self.video_extensions.contains(&ext) => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }
}
