use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Reference to the uploaded media as returned by the server.
///
/// Only `url` is interpreted. Every other field the server sends is kept in
/// `extra` and written back unchanged on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl FileRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: Map::new(),
        }
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Saved data of one video block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoRecord {
    pub file: FileRef,
    pub caption: String,
    pub aspect_ratio: f64,
}

impl Default for VideoRecord {
    fn default() -> Self {
        Self {
            file: FileRef::default(),
            caption: String::new(),
            aspect_ratio: 1.0,
        }
    }
}

impl VideoRecord {
    /// A record is valid iff it points at an uploaded file.
    pub fn is_valid(&self) -> bool {
        self.file.has_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_record_serializes_to_persisted_shape() {
        let value = serde_json::to_value(VideoRecord::default()).unwrap();
        assert_eq!(
            value,
            json!({ "file": { "url": "" }, "caption": "", "aspectRatio": 1.0 })
        );
    }

    #[test]
    fn test_extra_file_fields_pass_through() {
        let raw = json!({
            "file": { "url": "https://x/a.mp4", "size": 1024, "meta": { "id": "abc" } },
            "caption": "Hello",
            "aspectRatio": 1.7777
        });
        let record: VideoRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.file.url, "https://x/a.mp4");
        assert_eq!(record.file.extra.get("size"), Some(&json!(1024)));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_missing_or_null_url_is_invalid() {
        let missing: VideoRecord = serde_json::from_value(json!({ "file": {} })).unwrap();
        assert!(!missing.is_valid());

        let null: VideoRecord = serde_json::from_value(json!({ "file": { "url": null } })).unwrap();
        assert!(!null.is_valid());

        let no_file: VideoRecord = serde_json::from_value(json!({ "caption": "x" })).unwrap();
        assert!(!no_file.is_valid());
        assert_eq!(no_file.aspect_ratio, 1.0);
    }
}
