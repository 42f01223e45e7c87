//! Paste declarations and defaults shared across crates.

use regex::Regex;
use std::sync::LazyLock;

/// Multipart field name used when the config does not override it.
pub const DEFAULT_FIELD_NAME: &str = "video";

/// MIME filter for the native file picker and for file paste.
pub const DEFAULT_MIME_TYPES: &str = "video/*";

pub const DEFAULT_CAPTION_PLACEHOLDER: &str = "Caption";
pub const DEFAULT_BUTTON_CONTENT: &str = "Select a video";

/// Notification shown when any upload pathway fails.
pub const UPLOAD_FAILED_MESSAGE: &str = "Couldn't upload video. Please try another.";

/// Scheme of transient in-page object references (pasted from some viewers).
pub const BLOB_SCHEME: &str = "blob:";

/// HTML tags this block accepts on paste.
pub const PASTE_TAGS: &[&str] = &["video"];

/// Key of the URL pattern in the paste declaration.
pub const VIDEO_PATTERN_KEY: &str = "video";

/// Recognised video URL: http(s), no whitespace, known container extension,
/// optional query string.
pub static VIDEO_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://\S+\.(mp4|webm|ogv|ogg|mov|m4v)(\?\S*)?$")
        .expect("video url pattern is a valid regex")
});

pub fn is_video_url(candidate: &str) -> bool {
    VIDEO_URL_PATTERN.is_match(candidate.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_url_pattern_matches_known_containers() {
        assert!(is_video_url("https://cdn.example.com/clips/a.mp4"));
        assert!(is_video_url("http://example.com/b.WEBM"));
        assert!(is_video_url("https://example.com/c.mov?token=abc"));
        assert!(is_video_url("  https://example.com/d.m4v  "));
    }

    #[test]
    fn test_video_url_pattern_rejects_other_urls() {
        assert!(!is_video_url("https://example.com/page.html"));
        assert!(!is_video_url("ftp://example.com/a.mp4"));
        assert!(!is_video_url("https://example.com/a b.mp4"));
        assert!(!is_video_url("a.mp4"));
    }
}
