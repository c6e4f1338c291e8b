//! Document file actions: save, open and PDF export.
//!
//! Each action ends in exactly one notification, except user cancellation
//! which ends silently. Failures never touch the open document.

use log::{debug, error, info, warn};
use murekkep_core::grid::GridConfig;
use murekkep_core::host::{HostEditor, HostError, Toast};
use murekkep_core::settings::SessionConfig;
use murekkep_core::storage::{
    SnapshotFileError, decode_snapshot, encode_snapshot, ensure_extension, timestamped_stem, unix_millis,
};
use murekkep_render::RenderError;
use thiserror::Error;

use crate::picker::{FileFilter, FilePicker, PickerError};

/// File action errors.
#[derive(Debug, Error)]
pub enum FileActionError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    File(#[from] SnapshotFileError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Picker(#[from] PickerError),
}

/// How a file action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed { location: String },
    Cancelled,
    Failed,
    /// The host lacks the entry point the action needs.
    Unsupported,
}

/// Save/open/export handlers for one editing session.
pub struct FileActions<P> {
    picker: P,
    extension: String,
    prefix: String,
}

impl<P: FilePicker> FileActions<P> {
    pub fn new(picker: P, config: &SessionConfig) -> Self {
        Self {
            picker,
            extension: config.document_extension.clone(),
            prefix: config.file_name_prefix.clone(),
        }
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    /// Filter for the document open/save dialogs.
    pub fn document_filter(&self) -> FileFilter {
        FileFilter::new("Dijital Murekkep Document", &[self.extension.as_str(), "json"])
    }

    fn suggested_stem(&self) -> String {
        timestamped_stem(&self.prefix, unix_millis())
    }

    /// Write the host snapshot to a user-chosen file.
    pub async fn save<H: HostEditor + ?Sized>(&self, host: &mut H) -> ActionOutcome {
        match self.try_save(host).await {
            Ok(Some(location)) => {
                info!("Saved document to {}", location);
                host.toast(Toast::success("Saved", format!("Saved to {}", location)));
                ActionOutcome::Completed { location }
            }
            Ok(None) => {
                debug!("Save cancelled");
                ActionOutcome::Cancelled
            }
            Err(e) => {
                error!("Save failed: {}", e);
                host.toast(Toast::error("Save failed", e.to_string()));
                ActionOutcome::Failed
            }
        }
    }

    async fn try_save<H: HostEditor + ?Sized>(&self, host: &H) -> Result<Option<String>, FileActionError> {
        let bytes = encode_snapshot(&host.snapshot()?)?;
        let stem = self.suggested_stem();
        let suggested = format!("{}.{}", stem, self.extension);

        match self
            .picker
            .save_with_picker(&suggested, &self.document_filter(), &bytes)
            .await
        {
            Ok(location) => return Ok(Some(location)),
            Err(PickerError::Cancelled) => return Ok(None),
            Err(e) => warn!("Save dialog failed ({}), falling back to download", e),
        }

        let Some(name) = self.picker.prompt_file_name(&stem).await else {
            return Ok(None);
        };
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let name = ensure_extension(name, &self.extension);
        not_cancelled(self.picker.download(&name, &bytes).await)
    }

    /// Replace the host document with a user-chosen file.
    pub async fn open<H: HostEditor + ?Sized>(&self, host: &mut H) -> ActionOutcome {
        match self.try_open(host).await {
            Ok(Some(name)) => {
                info!("Opened {}", name);
                host.toast(Toast::success("Opened", format!("Loaded {}", name)));
                ActionOutcome::Completed { location: name }
            }
            Ok(None) => {
                debug!("Open cancelled");
                ActionOutcome::Cancelled
            }
            Err(FileActionError::Host(HostError::Unsupported(what))) => {
                warn!("Host has no {}; document left unchanged", what);
                host.toast(Toast::warning("Not opened", "This editor cannot load documents"));
                ActionOutcome::Unsupported
            }
            Err(e) => {
                error!("Open failed: {}", e);
                host.toast(Toast::error("Open failed", e.to_string()));
                ActionOutcome::Failed
            }
        }
    }

    async fn try_open<H: HostEditor + ?Sized>(&self, host: &mut H) -> Result<Option<String>, FileActionError> {
        let file = match self.picker.pick_open_file(&self.document_filter()).await {
            Ok(file) => file,
            Err(PickerError::Cancelled) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = decode_snapshot(&file.bytes)?;
        host.load_snapshot(snapshot)?;
        Ok(Some(file.name))
    }

    /// Export the drawing with its grid as a one-page PDF.
    ///
    /// `grid` is the configuration snapshot for the whole export.
    pub async fn export_pdf<H: HostEditor + ?Sized>(&self, host: &mut H, grid: &GridConfig) -> ActionOutcome {
        match self.try_export(host, grid).await {
            Ok(Some(location)) => {
                info!("Exported PDF to {}", location);
                host.toast(Toast::success("PDF saved", format!("Saved to {}", location)));
                ActionOutcome::Completed { location }
            }
            Ok(None) => ActionOutcome::Cancelled,
            Err(e) => {
                error!("PDF export failed: {}", e);
                host.toast(Toast::error("Export failed", e.to_string()));
                ActionOutcome::Failed
            }
        }
    }

    async fn try_export<H: HostEditor + ?Sized>(
        &self,
        host: &H,
        grid: &GridConfig,
    ) -> Result<Option<String>, FileActionError> {
        let snapshot = host.snapshot()?;
        let png = host.export_png(&snapshot)?;
        let stem = self.suggested_stem();
        let pdf = murekkep_render::export_pdf(&png, grid, &stem)?;
        not_cancelled(self.picker.download(&format!("{}.pdf", stem), &pdf).await)
    }
}

fn not_cancelled(result: Result<String, PickerError>) -> Result<Option<String>, FileActionError> {
    match result {
        Ok(location) => Ok(Some(location)),
        Err(PickerError::Cancelled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
