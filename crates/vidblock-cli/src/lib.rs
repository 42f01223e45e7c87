//! Support code for the `vidblock` command-line driver.

use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;
use vidblock::{EditorHost, FileBlob, Notification, VideoToolConfig};

/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vidblock=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Host that prints notifications to stderr.
pub struct TerminalHost;

#[async_trait]
impl EditorHost for TerminalHost {
    fn notify(&self, notification: Notification) {
        tracing::error!(style = ?notification.style, "{}", notification.message);
        eprintln!("{}", notification.message);
    }
}

/// Build the tool config from an optional JSON file, then apply endpoint
/// overrides from flags or the environment.
pub fn load_config(
    path: Option<&Path>,
    by_file: Option<String>,
    by_url: Option<String>,
) -> anyhow::Result<VideoToolConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Read config file {}", path.display()))?;
            let value: serde_json::Value =
                serde_json::from_str(&raw).context("Parse config file as JSON")?;
            VideoToolConfig::from_json(value).context("Invalid video tool config")?
        }
        None => VideoToolConfig::default(),
    };

    if by_file.is_some() {
        config.endpoints.by_file = by_file;
    }
    if by_url.is_some() {
        config.endpoints.by_url = by_url;
    }

    Ok(config)
}

/// MIME type for common video container extensions.
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "mp4" | "m4v" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "ogv" | "ogg" => Some("video/ogg"),
        "mov" => Some("video/quicktime"),
        _ => None,
    }
}

pub async fn read_video_file(path: &Path) -> anyhow::Result<FileBlob> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Read {}", path.display()))?;

    let mut file = FileBlob::new(data);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        file = file.with_name(name);
    }
    if let Some(mime) = guess_mime(path) {
        file = file.with_mime_type(mime);
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use vidblock::CaptionFeature;

    #[test]
    fn guess_mime_known_extensions() {
        assert_eq!(guess_mime(Path::new("clip.MP4")), Some("video/mp4"));
        assert_eq!(guess_mime(Path::new("a/b/clip.mov")), Some("video/quicktime"));
        assert_eq!(guess_mime(Path::new("notes.txt")), None);
        assert_eq!(guess_mime(Path::new("noext")), None);
    }

    #[test]
    fn load_config_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"endpoints":{{"byFile":"https://a/file","byUrl":"https://a/url"}},"features":{{"caption":"optional"}}}}"#
        )
        .unwrap();

        let config = load_config(
            Some(file.path()),
            Some("https://b/file".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(config.endpoints.by_file.as_deref(), Some("https://b/file"));
        assert_eq!(config.endpoints.by_url.as_deref(), Some("https://a/url"));
        assert_eq!(config.caption_feature(), CaptionFeature::Optional);
    }

    #[test]
    fn load_config_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_config(Some(file.path()), None, None).is_err());
    }

    #[tokio::test]
    async fn read_video_file_sets_name_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intro.webm");
        std::fs::write(&path, b"webm-bytes").unwrap();

        let file = read_video_file(&path).await.unwrap();
        assert_eq!(file.name.as_deref(), Some("intro.webm"));
        assert_eq!(file.mime_type.as_deref(), Some("video/webm"));
        assert_eq!(file.len(), 10);
    }
}
