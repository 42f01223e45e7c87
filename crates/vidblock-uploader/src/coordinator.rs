//! Upload coordinator
//!
//! Every public operation spawns a tokio task and returns an [`UploadHandle`]
//! immediately. For one invocation the ordering is fixed:
//!
//! 1. `on_preview` (if given) runs before any network call;
//! 2. exactly one of `on_upload` / `on_error` runs, always from the spawned
//!    task and never from the caller's stack.
//!
//! Overlapping invocations are independent. Nothing is cancelled or
//! serialized, so the last one to resolve is the last one delivered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, instrument, warn, Instrument};
use vidblock_core::{
    ErrorMetadata, FileBlob, LogLevel, UploadError, UploadResult, UploadTicket,
};

use crate::backend::UploadBackend;
use crate::picker::FilePicker;

/// Runs once, before the network call of a single invocation.
pub type PreviewHook = Box<dyn FnOnce() + Send + 'static>;

/// Success and failure sinks shared by every invocation.
#[derive(Clone)]
pub struct UploadCallbacks {
    pub on_upload: Arc<dyn Fn(UploadResult) + Send + Sync>,
    pub on_error: Arc<dyn Fn(UploadError) + Send + Sync>,
}

impl UploadCallbacks {
    pub fn new(
        on_upload: impl Fn(UploadResult) + Send + Sync + 'static,
        on_error: impl Fn(UploadError) + Send + Sync + 'static,
    ) -> Self {
        Self {
            on_upload: Arc::new(on_upload),
            on_error: Arc::new(on_error),
        }
    }
}

/// How one invocation ended, as seen by whoever awaits its handle.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Uploaded(UploadResult),
    Failed(UploadError),
    /// The picker was dismissed; no callback ran.
    Cancelled,
}

/// Handle to one in-flight upload. Dropping it does not cancel the upload.
#[derive(Debug)]
pub struct UploadHandle {
    ticket: UploadTicket,
    task: JoinHandle<UploadOutcome>,
}

impl UploadHandle {
    pub fn ticket(&self) -> UploadTicket {
        self.ticket
    }

    /// Wait for the callbacks of this invocation to have run.
    pub async fn wait(self) -> Result<UploadOutcome, JoinError> {
        self.task.await
    }

    /// Spawn `work` as a tracked upload. Used by the block for pathways that
    /// need a step before the coordinator (e.g. resolving a pasted blob).
    pub fn spawn<F>(ticket: UploadTicket, work: F) -> Self
    where
        F: std::future::Future<Output = UploadOutcome> + Send + 'static,
    {
        Self {
            ticket,
            task: tokio::spawn(work),
        }
    }
}

/// Coordinates the three upload pathways over an [`UploadBackend`].
///
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct Uploader {
    backend: Arc<dyn UploadBackend>,
    picker: Arc<dyn FilePicker>,
    accept: Arc<str>,
    callbacks: UploadCallbacks,
    next_ticket: Arc<AtomicU64>,
}

impl Uploader {
    pub fn new(
        backend: Arc<dyn UploadBackend>,
        picker: Arc<dyn FilePicker>,
        accept: impl Into<Arc<str>>,
        callbacks: UploadCallbacks,
    ) -> Self {
        Self {
            backend,
            picker,
            accept: accept.into(),
            callbacks,
            next_ticket: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn next_ticket(&self) -> UploadTicket {
        UploadTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Upload a blob from disk, drag-drop or the clipboard.
    pub fn upload_by_file(&self, file: FileBlob, on_preview: Option<PreviewHook>) -> UploadHandle {
        let ticket = self.next_ticket();
        if let Some(preview) = on_preview {
            preview();
        }

        let this = self.clone();
        UploadHandle::spawn(ticket, async move {
            let outcome = this.send_file(ticket, file).await;
            this.deliver(ticket, outcome)
        })
    }

    /// Ask the remote side to fetch and persist the media at `url`.
    pub fn upload_by_url(
        &self,
        url: impl Into<String>,
        on_preview: Option<PreviewHook>,
    ) -> UploadHandle {
        let ticket = self.next_ticket();
        let url = url.into();
        if let Some(preview) = on_preview {
            preview();
        }

        let this = self.clone();
        UploadHandle::spawn(ticket, async move {
            let outcome = this.send_url(ticket, &url).await;
            this.deliver(ticket, outcome)
        })
    }

    /// Open the host file picker and upload the selection.
    ///
    /// Cancelling the picker is not a failure: no callback runs and the handle
    /// resolves to [`UploadOutcome::Cancelled`].
    pub fn upload_selected_file(&self, on_preview: Option<PreviewHook>) -> UploadHandle {
        let ticket = self.next_ticket();
        let this = self.clone();

        UploadHandle::spawn(
            ticket,
            async move {
                let Some(file) = this.picker.pick(&this.accept).await else {
                    debug!("File selection cancelled");
                    return UploadOutcome::Cancelled;
                };

                if let Some(preview) = on_preview {
                    preview();
                }

                let outcome = this.send_file(ticket, file).await;
                this.deliver(ticket, outcome)
            }
            .instrument(tracing::info_span!("upload_selected_file", %ticket)),
        )
    }

    /// Run an already-resolved file upload on the current task.
    ///
    /// Same delivery contract as [`Uploader::upload_by_file`] minus the spawn;
    /// callers must themselves be off the triggering stack.
    pub async fn upload_file_now(&self, ticket: UploadTicket, file: FileBlob) -> UploadOutcome {
        let outcome = self.send_file(ticket, file).await;
        self.deliver(ticket, outcome)
    }

    /// Report a failure that happened before the backend was reached.
    pub fn fail(&self, ticket: UploadTicket, err: UploadError) -> UploadOutcome {
        self.deliver(ticket, Err(err))
    }

    #[instrument(skip_all, fields(%ticket, bytes = file.len()))]
    async fn send_file(
        &self,
        ticket: UploadTicket,
        file: FileBlob,
    ) -> Result<UploadResult, UploadError> {
        if file.is_empty() {
            return Err(UploadError::EmptyFile);
        }

        debug!(name = ?file.name, mime = ?file.mime_type, "Uploading video file");
        self.backend.upload_file(file).await?.into_result(ticket)
    }

    #[instrument(skip_all, fields(%ticket, %url))]
    async fn send_url(&self, ticket: UploadTicket, url: &str) -> Result<UploadResult, UploadError> {
        debug!("Uploading video by url");
        self.backend.upload_url(url).await?.into_result(ticket)
    }

    fn deliver(
        &self,
        ticket: UploadTicket,
        outcome: Result<UploadResult, UploadError>,
    ) -> UploadOutcome {
        match outcome {
            Ok(result) => {
                info!(%ticket, url = %result.file.url, "Video upload succeeded");
                (self.callbacks.on_upload)(result.clone());
                UploadOutcome::Uploaded(result)
            }
            Err(err) => {
                log_upload_error(ticket, &err);
                (self.callbacks.on_error)(err.clone());
                UploadOutcome::Failed(err)
            }
        }
    }
}

fn log_upload_error(ticket: UploadTicket, err: &UploadError) {
    let code = err.error_code();
    let recoverable = err.is_recoverable();
    match err.log_level() {
        LogLevel::Debug => debug!(%ticket, code, recoverable, error = %err, "Video upload failed"),
        LogLevel::Warn => warn!(%ticket, code, recoverable, error = %err, "Video upload failed"),
        LogLevel::Error => error!(%ticket, code, recoverable, error = %err, "Video upload failed"),
    }
}
