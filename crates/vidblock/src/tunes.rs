//! Settings tunes
//!
//! Tune names are resolved once, at construction, into a closed set of
//! [`TuneId`]s. Duplicated or reserved names fail construction; activating a
//! name that was never declared is a [`ConfigError::UnknownTune`].

use vidblock_core::{ActionCallback, ActionConfig, CaptionFeature, ConfigError, VideoToolConfig};

pub const CAPTION_TUNE: &str = "caption";
const CAPTION_TUNE_TITLE: &str = "With caption";
const CAPTION_TUNE_ICON: &str = "caption";

/// Explicit caption state set through the settings toggle.
///
/// `Unset` means "not chosen yet". `render()` resolves it from the caption
/// text once; until something turns it on it reports and toggles as off, so
/// the settings entry always matches the visible caption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptionToggle {
    #[default]
    Unset,
    ForcedOn,
    ForcedOff,
}

impl CaptionToggle {
    pub fn as_option(self) -> Option<bool> {
        match self {
            CaptionToggle::Unset => None,
            CaptionToggle::ForcedOn => Some(true),
            CaptionToggle::ForcedOff => Some(false),
        }
    }

    pub fn is_on(self) -> bool {
        self == CaptionToggle::ForcedOn
    }

    pub fn from_bool(enabled: bool) -> Self {
        if enabled {
            CaptionToggle::ForcedOn
        } else {
            CaptionToggle::ForcedOff
        }
    }
}

/// Index of a user action inside the registry that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuneId {
    Caption,
    Action(ActionId),
}

#[derive(Clone)]
pub(crate) struct TuneEntry {
    pub id: TuneId,
    pub name: String,
    pub icon: String,
    pub title: String,
    pub toggle: bool,
    pub action: Option<ActionCallback>,
}

/// One settings entry as shown to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuneDescriptor {
    pub id: TuneId,
    pub name: String,
    pub icon: String,
    pub label: String,
    pub toggle: bool,
    pub is_active: bool,
}

#[derive(Clone, Default)]
pub(crate) struct TuneRegistry {
    entries: Vec<TuneEntry>,
}

impl TuneRegistry {
    /// Built-in tunes (none), then user actions, then the caption toggle when
    /// the caption feature is optional.
    pub fn from_config(config: &VideoToolConfig) -> Result<Self, ConfigError> {
        let mut entries: Vec<TuneEntry> = Vec::with_capacity(config.actions.len() + 1);

        for (index, action) in config.actions.iter().enumerate() {
            let ActionConfig {
                name,
                icon,
                title,
                toggle,
                action,
            } = action;

            if name == CAPTION_TUNE {
                return Err(ConfigError::ReservedTuneName(name.clone()));
            }
            if entries.iter().any(|entry| &entry.name == name) {
                return Err(ConfigError::DuplicateTune(name.clone()));
            }

            entries.push(TuneEntry {
                id: TuneId::Action(ActionId(index)),
                name: name.clone(),
                icon: icon.clone(),
                title: title.clone(),
                toggle: *toggle,
                action: action.clone(),
            });
        }

        if config.caption_feature() == CaptionFeature::Optional {
            entries.push(TuneEntry {
                id: TuneId::Caption,
                name: CAPTION_TUNE.to_string(),
                icon: CAPTION_TUNE_ICON.to_string(),
                title: CAPTION_TUNE_TITLE.to_string(),
                toggle: true,
                action: None,
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TuneEntry] {
        &self.entries
    }

    pub fn get(&self, id: TuneId) -> Option<&TuneEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn resolve(&self, name: &str) -> Result<TuneId, ConfigError> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.id)
            .ok_or_else(|| ConfigError::UnknownTune(name.to_string()))
    }
}
