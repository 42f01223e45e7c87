//! Video block controller
//!
//! Owns the saved record and the view, and reconciles both with upload
//! results. Upload callbacks run on spawned tasks, so the record and the view
//! live together behind one mutex; each callback takes the lock once and
//! leaves them consistent.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use vidblock_core::constants::{BLOB_SCHEME, UPLOAD_FAILED_MESSAGE};
use vidblock_core::{
    CaptionFeature, ConfigError, FileBlob, UploadError, UploadResult, VideoRecord,
    VideoToolConfig,
};
use vidblock_ui::{
    Dimensions, ExtensionClassifier, MediaClassifier, MediaEvent, UiStatus, VideoView,
    ViewOptions, WidgetTree,
};
use vidblock_uploader::{
    CancelledPicker, CustomUploader, FilePicker, PreviewHook, RoutedBackend, UploadBackend,
    UploadCallbacks, UploadHandle, UploadOutcome, Uploader,
};

use crate::host::{EditorHost, Notification};
use crate::paste::{PasteConfig, PasteEvent};
use crate::tunes::{CaptionToggle, TuneDescriptor, TuneId, TuneRegistry, CAPTION_TUNE};

/// Toolbox entry for inserting a new video block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbox {
    pub title: &'static str,
    pub icon: &'static str,
}

/// Everything needed to construct a [`VideoBlock`].
pub struct BlockParams {
    pub data: Option<VideoRecord>,
    pub config: VideoToolConfig,
    pub read_only: bool,
    pub host: Arc<dyn EditorHost>,
    pub picker: Arc<dyn FilePicker>,
    pub custom_uploader: CustomUploader,
    pub classifier: Arc<dyn MediaClassifier>,
}

impl BlockParams {
    pub fn new(config: VideoToolConfig, host: Arc<dyn EditorHost>) -> Self {
        Self {
            data: None,
            config,
            read_only: false,
            host,
            picker: Arc::new(CancelledPicker),
            custom_uploader: CustomUploader::default(),
            classifier: Arc::new(ExtensionClassifier::default()),
        }
    }

    pub fn with_data(mut self, data: VideoRecord) -> Self {
        self.data = Some(data);
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_picker(mut self, picker: Arc<dyn FilePicker>) -> Self {
        self.picker = picker;
        self
    }

    pub fn with_custom_uploader(mut self, custom_uploader: CustomUploader) -> Self {
        self.custom_uploader = custom_uploader;
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn MediaClassifier>) -> Self {
        self.classifier = classifier;
        self
    }
}

struct BlockState {
    data: VideoRecord,
    view: VideoView,
    caption_toggle: CaptionToggle,
    action_states: BTreeMap<String, bool>,
}

fn lock(state: &Mutex<BlockState>) -> MutexGuard<'_, BlockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct VideoBlock {
    state: Arc<Mutex<BlockState>>,
    uploader: Uploader,
    host: Arc<dyn EditorHost>,
    tunes: TuneRegistry,
    caption_feature: CaptionFeature,
    read_only: bool,
}

impl VideoBlock {
    /// Construct a block whose uploads go to the configured endpoints, or to
    /// the custom uploader functions where given.
    pub fn new(mut params: BlockParams) -> Result<Self, ConfigError> {
        let custom = std::mem::take(&mut params.custom_uploader);
        let backend = RoutedBackend::from_config(&params.config, custom)?;
        Self::with_backend(params, Arc::new(backend))
    }

    /// Construct a block over an explicit transport.
    pub fn with_backend(
        params: BlockParams,
        backend: Arc<dyn UploadBackend>,
    ) -> Result<Self, ConfigError> {
        let BlockParams {
            data,
            config,
            read_only,
            host,
            picker,
            classifier,
            ..
        } = params;

        let tunes = TuneRegistry::from_config(&config)?;

        let view = VideoView::new(
            ViewOptions {
                caption_placeholder: host.translate(&config.caption_placeholder),
                button_content: host.translate(&config.button_content),
                read_only,
            },
            classifier,
        );

        let state = Arc::new(Mutex::new(BlockState {
            data: VideoRecord::default(),
            view,
            caption_toggle: CaptionToggle::Unset,
            action_states: BTreeMap::new(),
        }));

        let callbacks = {
            let on_upload_state = state.clone();
            let on_error_state = state.clone();
            let on_error_host = host.clone();
            UploadCallbacks::new(
                move |result| on_upload(&on_upload_state, result),
                move |err| on_error(&on_error_state, &*on_error_host, err),
            )
        };
        let uploader = Uploader::new(backend, picker, config.types.as_str(), callbacks);

        let block = Self {
            state,
            uploader,
            host,
            tunes,
            caption_feature: config.caption_feature(),
            read_only,
        };

        if let Some(data) = data {
            block.set_data(data);
        }

        Ok(block)
    }

    /// Toolbox entry for the host's insert menu.
    pub fn toolbox() -> Toolbox {
        Toolbox {
            title: "Video",
            icon: "video",
        }
    }

    pub fn paste_config() -> PasteConfig {
        PasteConfig::declared()
    }

    pub fn is_read_only_supported() -> bool {
        true
    }

    fn set_data(&self, data: VideoRecord) {
        let mut state = lock(&self.state);
        if data.file.has_url() {
            state.view.fill_media(&data.file.url);
        }
        state.view.fill_caption(&data.caption);
        state.data = data;
    }

    /// Build the widget and apply the initial caption and action tunes.
    pub fn render(&self) -> WidgetTree {
        let mut state = lock(&self.state);

        let caption_active = match self.caption_feature {
            CaptionFeature::Enabled => true,
            CaptionFeature::Disabled => false,
            CaptionFeature::Optional => match state.caption_toggle {
                CaptionToggle::ForcedOn => true,
                CaptionToggle::ForcedOff => false,
                CaptionToggle::Unset => !state.data.caption.is_empty(),
            },
        };
        if caption_active {
            state.caption_toggle = CaptionToggle::ForcedOn;
        }
        state.view.apply_tune(CAPTION_TUNE, caption_active);

        let action_states: Vec<(String, bool)> = state
            .action_states
            .iter()
            .map(|(name, enabled)| (name.clone(), *enabled))
            .collect();
        for (name, enabled) in action_states {
            state.view.apply_tune(&name, enabled);
        }

        state.view.render()
    }

    /// Current widget snapshot, without rendering.
    pub fn snapshot(&self) -> WidgetTree {
        lock(&self.state).view.snapshot()
    }

    pub fn status(&self) -> UiStatus {
        lock(&self.state).view.status()
    }

    /// The record as it stands, without reading back from the view.
    pub fn data(&self) -> VideoRecord {
        lock(&self.state).data.clone()
    }

    /// Read the caption and the media aspect ratio back from the view and
    /// return the record.
    pub fn save(&self) -> VideoRecord {
        let mut state = lock(&self.state);
        let caption = state.view.caption_text().to_string();
        let aspect_ratio = state.view.aspect_ratio();
        state.data.caption = caption;
        state.data.aspect_ratio = aspect_ratio;
        state.data.clone()
    }

    /// A record is valid iff its file has a non-empty url.
    pub fn validate(record: &VideoRecord) -> bool {
        record.is_valid()
    }

    /// Validate raw saved JSON; anything that does not deserialize into a
    /// record is invalid.
    pub fn validate_json(value: &serde_json::Value) -> bool {
        serde_json::from_value::<VideoRecord>(value.clone())
            .map(|record| record.is_valid())
            .unwrap_or(false)
    }

    /// Caption text edited by the user.
    pub fn set_caption(&self, text: &str) {
        let mut state = lock(&self.state);
        state.view.fill_caption(text);
        state.data.caption = text.to_string();
    }

    /// Forward a load signal from the displayed element.
    pub fn media_event(
        &self,
        src: &str,
        event: MediaEvent,
        natural_size: Option<Dimensions>,
    ) -> bool {
        lock(&self.state).view.media_event(src, event, natural_size)
    }

    pub fn render_settings(&self) -> Vec<TuneDescriptor> {
        let state = lock(&self.state);
        self.tunes
            .entries()
            .iter()
            .map(|entry| {
                let is_active = match entry.id {
                    TuneId::Caption => state.caption_toggle.is_on(),
                    TuneId::Action(_) => state
                        .action_states
                        .get(&entry.name)
                        .copied()
                        .unwrap_or(false),
                };
                TuneDescriptor {
                    id: entry.id,
                    name: entry.name.clone(),
                    icon: entry.icon.clone(),
                    label: self.host.translate(&entry.title),
                    toggle: entry.toggle,
                    is_active,
                }
            })
            .collect()
    }

    /// Resolve a tune name declared at construction.
    pub fn tune_id(&self, name: &str) -> Result<TuneId, ConfigError> {
        self.tunes.resolve(name)
    }

    /// Activate a settings entry. A custom action callback replaces the
    /// default toggle behaviour.
    pub fn activate_tune(&self, id: TuneId) -> Result<(), ConfigError> {
        let entry = self
            .tunes
            .get(id)
            .ok_or_else(|| ConfigError::UnknownTune(format!("{id:?}")))?;

        if let Some(action) = &entry.action {
            debug!(tune = %entry.name, "Running custom tune action");
            action(entry.name.as_str());
            return Ok(());
        }

        let mut state = lock(&self.state);
        match id {
            TuneId::Caption => {
                let enabled = !state.caption_toggle.is_on();
                state.caption_toggle = CaptionToggle::from_bool(enabled);
                state.view.apply_tune(CAPTION_TUNE, enabled);
                if !enabled {
                    state.data.caption.clear();
                    state.view.fill_caption("");
                }
                debug!(enabled, "Caption tune toggled");
            }
            TuneId::Action(_) => {
                let enabled = !state.action_states.get(&entry.name).copied().unwrap_or(false);
                state.action_states.insert(entry.name.clone(), enabled);
                state.view.apply_tune(&entry.name, enabled);
                debug!(tune = %entry.name, enabled, "Tune toggled");
            }
        }
        Ok(())
    }

    pub fn activate_tune_by_name(&self, name: &str) -> Result<(), ConfigError> {
        let id = self.tune_id(name)?;
        self.activate_tune(id)
    }

    /// Open the file picker and upload the selection. `None` in read-only
    /// mode.
    pub fn append(&self) -> Option<UploadHandle> {
        if self.read_only {
            debug!("Ignoring file selection on a read-only block");
            return None;
        }
        Some(self.uploader.upload_selected_file(Some(self.preview_hook())))
    }

    /// Upload a file and show the preloader.
    pub fn upload_file(&self, file: FileBlob) -> UploadHandle {
        self.show_preloader();
        self.uploader.upload_by_file(file, None)
    }

    /// Upload by url and show the preloader.
    pub fn upload_url(&self, url: &str) -> UploadHandle {
        self.show_preloader();
        self.uploader.upload_by_url(url, None)
    }

    /// Handle a paste the host matched against [`PasteConfig`].
    pub fn on_paste(&self, event: PasteEvent) -> Option<UploadHandle> {
        if self.read_only {
            debug!("Ignoring paste on a read-only block");
            return None;
        }

        match event {
            PasteEvent::Tag { tag, src } => {
                if !PasteConfig::declared().accepts_tag(&tag) {
                    debug!(%tag, "Ignoring paste of undeclared tag");
                    return None;
                }
                if src.is_empty() {
                    warn!(%tag, "Pasted media tag has no source");
                    return None;
                }
                if src.starts_with(BLOB_SCHEME) {
                    Some(self.upload_blob_reference(src))
                } else {
                    Some(self.upload_url(&src))
                }
            }
            PasteEvent::Pattern { key, data } => {
                if PasteConfig::declared().pattern(&key).is_none() {
                    debug!(%key, "Ignoring paste for undeclared pattern");
                    return None;
                }
                Some(self.upload_url(&data))
            }
            PasteEvent::File(file) => Some(self.upload_file(file)),
        }
    }

    /// A `blob:` reference must first be resolved to bytes by the host, then
    /// uploaded as a file.
    fn upload_blob_reference(&self, src: String) -> UploadHandle {
        self.show_preloader();
        let ticket = self.uploader.next_ticket();
        let uploader = self.uploader.clone();
        let host = self.host.clone();

        UploadHandle::spawn(ticket, async move {
            match host.fetch_blob(&src).await {
                Ok(file) => uploader.upload_file_now(ticket, file).await,
                Err(reason) => uploader.fail(ticket, UploadError::BlobFetch { url: src, reason }),
            }
        })
    }

    fn show_preloader(&self) {
        lock(&self.state).view.show_preloader();
    }

    fn preview_hook(&self) -> PreviewHook {
        let state = self.state.clone();
        Box::new(move || lock(&state).view.show_preloader())
    }
}

fn on_upload(state: &Mutex<BlockState>, result: UploadResult) {
    let mut state = lock(state);
    info!(ticket = %result.ticket, url = %result.file.url, "Video block file replaced");
    state.view.fill_media(&result.file.url);
    state.data.file = result.file;
}

fn on_error(state: &Mutex<BlockState>, host: &dyn EditorHost, err: UploadError) {
    {
        let mut state = lock(state);
        state.view.hide_preloader();
        if state.data.is_valid() {
            state.view.reinstate_media();
        }
    }
    debug!(error = %err, "Notifying host of failed upload");
    host.notify(Notification::error(host.translate(UPLOAD_FAILED_MESSAGE)));
}

/// Resolve an upload handle, mapping a panicked task to a transport error.
pub async fn settle(handle: UploadHandle) -> UploadOutcome {
    match handle.wait().await {
        Ok(outcome) => outcome,
        Err(err) => UploadOutcome::Failed(UploadError::transport(err.to_string())),
    }
}
