use bytes::Bytes;
use std::sync::Arc;
use vidblock::{
    BlockParams, CaptionFeature, CustomUploader, EditorHost, FileBlob, FileRef, UploadResponse,
    VideoRecord, VideoToolConfig,
};

pub const VIDEO_A: &str = "https://x/a.mp4";
pub const VIDEO_B: &str = "https://x/b.mp4";

pub fn config() -> VideoToolConfig {
    VideoToolConfig::with_endpoints("https://uploads.test/file", "https://uploads.test/url")
}

pub fn config_with_caption(caption: CaptionFeature) -> VideoToolConfig {
    let mut config = config();
    config.features.caption = caption;
    config
}

pub fn params(config: VideoToolConfig, host: Arc<dyn EditorHost>) -> BlockParams {
    BlockParams::new(config, host)
}

pub fn saved_record(url: &str, caption: &str) -> VideoRecord {
    VideoRecord {
        file: FileRef::new(url),
        caption: caption.to_string(),
        aspect_ratio: 1.0,
    }
}

pub fn video_file() -> FileBlob {
    FileBlob::new(Bytes::from_static(b"\x00\x00\x00\x18ftypmp42"))
        .with_name("clip.mp4")
        .with_mime_type("video/mp4")
}

/// Custom uploader answering every call with `response`.
pub fn answering(response: UploadResponse) -> CustomUploader {
    let by_file = response.clone();
    CustomUploader::new()
        .by_file(move |_file| {
            let response = by_file.clone();
            async move { Ok(response) }
        })
        .by_url(move |_url| {
            let response = response.clone();
            async move { Ok(response) }
        })
}
