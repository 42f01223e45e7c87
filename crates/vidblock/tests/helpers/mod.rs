pub mod fixtures;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use vidblock::{
    CustomUploader, EditorHost, FileBlob, FilePicker, Notification, UploadError, UploadResponse,
};

/// Host that records notifications and resolves `blob:` urls from a table.
#[derive(Default)]
pub struct RecordingHost {
    pub notifications: Mutex<Vec<Notification>>,
    pub blobs: Mutex<HashMap<String, FileBlob>>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_blob(self: Arc<Self>, url: &str, file: FileBlob) -> Arc<Self> {
        self.blobs.lock().unwrap().insert(url.to_string(), file);
        self
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

#[async_trait]
impl EditorHost for RecordingHost {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    async fn fetch_blob(&self, url: &str) -> Result<FileBlob, String> {
        self.blobs
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| format!("no blob registered for {url}"))
    }
}

/// Picker that always returns the same file.
pub struct FixedPicker(pub FileBlob);

#[async_trait]
impl FilePicker for FixedPicker {
    async fn pick(&self, _accept: &str) -> Option<FileBlob> {
        Some(self.0.clone())
    }
}

type Reply = Result<UploadResponse, UploadError>;

/// Custom uploader whose responses are released by the test, one gate per
/// url, so tests choose the order in which uploads resolve.
#[derive(Clone, Default)]
pub struct GatedUploader {
    gates: Arc<Mutex<HashMap<String, oneshot::Receiver<Reply>>>>,
}

impl GatedUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gate for `url` and return the sender that releases it.
    pub fn gate(&self, url: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(url.to_string(), rx);
        tx
    }

    pub fn custom_uploader(&self) -> CustomUploader {
        let gates = self.gates.clone();
        CustomUploader::new().by_url(move |url: String| {
            let gate = gates.lock().unwrap().remove(&url);
            async move {
                match gate {
                    Some(rx) => rx
                        .await
                        .unwrap_or_else(|_| Err(UploadError::transport("gate dropped"))),
                    None => Err(UploadError::transport(format!("no gate for {url}"))),
                }
            }
        })
    }
}
