//! Native file-selection surface provided by the host.

use async_trait::async_trait;
use vidblock_core::FileBlob;

/// Opens a file chooser restricted to `accept` (a MIME filter such as
/// `video/*`). Returns `None` when the user cancels.
#[async_trait]
pub trait FilePicker: Send + Sync {
    async fn pick(&self, accept: &str) -> Option<FileBlob>;
}

/// Picker for hosts without a file chooser; every selection is cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelledPicker;

#[async_trait]
impl FilePicker for CancelledPicker {
    async fn pick(&self, _accept: &str) -> Option<FileBlob> {
        None
    }
}
