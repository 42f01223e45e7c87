//! Paste and drop declarations.

use regex::Regex;
use vidblock_core::constants::{
    DEFAULT_MIME_TYPES, PASTE_TAGS, VIDEO_PATTERN_KEY, VIDEO_URL_PATTERN,
};
use vidblock_core::FileBlob;

/// Paste payload delivered by the host, already matched against
/// [`PasteConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum PasteEvent {
    /// An HTML media tag, with the value of its `src` attribute.
    Tag { tag: String, src: String },
    /// Text matched by the pattern registered under `key`.
    Pattern { key: String, data: String },
    /// A file pasted from the clipboard or dropped on the editor.
    File(FileBlob),
}

/// What this block accepts on paste.
#[derive(Debug, Clone)]
pub struct PasteConfig {
    pub tags: Vec<&'static str>,
    pub patterns: Vec<(&'static str, &'static Regex)>,
    pub mime_types: Vec<&'static str>,
}

impl PasteConfig {
    pub fn declared() -> Self {
        Self {
            tags: PASTE_TAGS.to_vec(),
            patterns: vec![(VIDEO_PATTERN_KEY, &*VIDEO_URL_PATTERN)],
            mime_types: vec![DEFAULT_MIME_TYPES],
        }
    }

    pub fn accepts_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn pattern(&self, key: &str) -> Option<&'static Regex> {
        self.patterns
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, regex)| *regex)
    }

    /// Match `text` against the declared patterns and build the event the
    /// host would deliver.
    pub fn match_text(&self, text: &str) -> Option<PasteEvent> {
        let text = text.trim();
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(text))
            .map(|(key, _)| PasteEvent::Pattern {
                key: key.to_string(),
                data: text.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_paste_config() {
        let config = PasteConfig::declared();
        assert!(config.accepts_tag("VIDEO"));
        assert!(!config.accepts_tag("img"));
        assert!(config.pattern("video").is_some());
        assert_eq!(config.mime_types, vec!["video/*"]);
    }

    #[test]
    fn test_match_text() {
        let config = PasteConfig::declared();
        assert_eq!(
            config.match_text(" https://x/a.mp4 "),
            Some(PasteEvent::Pattern {
                key: "video".to_string(),
                data: "https://x/a.mp4".to_string()
            })
        );
        assert_eq!(config.match_text("just some words"), None);
    }
}
