//! Boundary to the host editor runtime.

use async_trait::async_trait;
use vidblock_core::FileBlob;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStyle {
    Error,
}

/// Non-blocking message surfaced by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub style: NotificationStyle,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: NotificationStyle::Error,
        }
    }
}

/// Services the host editor provides to a block.
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Show a notification to the user.
    fn notify(&self, notification: Notification);

    /// Translate a user-visible string.
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }

    /// Resolve a transient `blob:` reference (pasted from some viewers) into
    /// its bytes.
    async fn fetch_blob(&self, url: &str) -> Result<FileBlob, String> {
        Err(format!("host cannot resolve {url}"))
    }
}
