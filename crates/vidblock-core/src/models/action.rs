use serde::Deserialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

/// Direct handler for a settings action; receives the action name.
pub type ActionCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Extra settings entry supplied by the host configuration.
///
/// Read-only input: the block never mutates it. When `action` is set, the
/// callback replaces the built-in toggle behaviour for this entry.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub name: String,
    pub icon: String,
    pub title: String,
    pub toggle: bool,
    #[serde(skip)]
    pub action: Option<ActionCallback>,
}

impl ActionConfig {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn toggle(mut self, toggle: bool) -> Self {
        self.toggle = toggle;
        self
    }

    pub fn with_action(mut self, action: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }
}

impl Debug for ActionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ActionConfig")
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("title", &self.title)
            .field("toggle", &self.toggle)
            .field("action", &self.action.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
