//! Configuration module
//!
//! Host-supplied tool configuration. Every optional field is defaulted in
//! [`VideoToolConfig::default`] and nowhere else; deserialization fills
//! missing keys from that same impl.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

use crate::constants::{
    DEFAULT_BUTTON_CONTENT, DEFAULT_CAPTION_PLACEHOLDER, DEFAULT_FIELD_NAME, DEFAULT_MIME_TYPES,
};
use crate::error::{ConfigError, UploadPathway};
use crate::models::ActionConfig;

/// Upload endpoints. Either may be absent when a custom uploader covers it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoints {
    pub by_file: Option<String>,
    pub by_url: Option<String>,
}

/// How the caption affordance is offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptionFeature {
    /// Caption always shown (`true` in JSON).
    #[default]
    Enabled,
    /// Caption never shown (`false`).
    Disabled,
    /// Caption behind a settings toggle (`"optional"`).
    Optional,
}

impl<'de> Deserialize<'de> for CaptionFeature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Mode(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(CaptionFeature::Enabled),
            Raw::Flag(false) => Ok(CaptionFeature::Disabled),
            Raw::Mode(mode) if mode.eq_ignore_ascii_case("optional") => {
                Ok(CaptionFeature::Optional)
            }
            Raw::Mode(other) => Err(serde::de::Error::custom(format!(
                "caption feature must be true, false or \"optional\", got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Features {
    pub caption: CaptionFeature,
}

/// Video tool configuration as supplied by the host editor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoToolConfig {
    pub endpoints: Endpoints,
    /// Multipart field carrying the file.
    pub field: String,
    /// MIME filter for the file picker.
    pub types: String,
    pub additional_request_data: Map<String, JsonValue>,
    pub additional_request_headers: HashMap<String, String>,
    pub caption_placeholder: String,
    pub button_content: String,
    pub features: Features,
    pub actions: Vec<ActionConfig>,
}

impl Default for VideoToolConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            field: DEFAULT_FIELD_NAME.to_string(),
            types: DEFAULT_MIME_TYPES.to_string(),
            additional_request_data: Map::new(),
            additional_request_headers: HashMap::new(),
            caption_placeholder: DEFAULT_CAPTION_PLACEHOLDER.to_string(),
            button_content: DEFAULT_BUTTON_CONTENT.to_string(),
            features: Features::default(),
            actions: Vec::new(),
        }
    }
}

impl VideoToolConfig {
    pub fn with_endpoints(by_file: impl Into<String>, by_url: impl Into<String>) -> Self {
        Self {
            endpoints: Endpoints {
                by_file: Some(by_file.into()),
                by_url: Some(by_url.into()),
            },
            ..Self::default()
        }
    }

    pub fn from_json(value: JsonValue) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn caption_feature(&self) -> CaptionFeature {
        self.features.caption
    }

    /// Check the parts of the config that do not depend on custom uploaders.
    ///
    /// Whether each pathway has *some* uploader is checked by the coordinator,
    /// which is the only place that knows about overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field.trim().is_empty() {
            return Err(ConfigError::InvalidFieldName(self.field.clone()));
        }

        for (pathway, endpoint) in [
            (UploadPathway::File, &self.endpoints.by_file),
            (UploadPathway::Url, &self.endpoints.by_url),
        ] {
            if let Some(endpoint) = endpoint {
                validate_endpoint(pathway, endpoint)?;
            }
        }

        Ok(())
    }
}

fn validate_endpoint(pathway: UploadPathway, endpoint: &str) -> Result<(), ConfigError> {
    let parsed = reqwest::Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
        pathway,
        reason: format!("{endpoint:?} is not a valid URL: {e}"),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidEndpoint {
            pathway,
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
