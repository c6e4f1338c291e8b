//! File picker abstraction.
//!
//! Save, open and download go through [`FilePicker`] so the session can
//! run against native dialogs or a scripted picker in tests.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Boxed single-shot future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Picker errors.
#[derive(Debug, Error)]
pub enum PickerError {
    /// The user dismissed the dialog. Never reported.
    #[error("Cancelled by user")]
    Cancelled,
    /// The platform has no such dialog.
    #[error("File picker unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;

/// File type filter for dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// A file chosen in an open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Platform file dialogs.
pub trait FilePicker {
    /// Let the user choose a destination and write `bytes` there.
    /// Returns where the file went.
    fn save_with_picker<'a>(
        &'a self,
        suggested_name: &'a str,
        filter: &'a FileFilter,
        bytes: &'a [u8],
    ) -> BoxFuture<'a, PickerResult<String>>;

    /// Ask for a file name. `None` when the user cancels.
    fn prompt_file_name<'a>(&'a self, default_name: &'a str) -> BoxFuture<'a, Option<String>>;

    /// Write `bytes` under `file_name` without asking. Returns where the file went.
    fn download<'a>(&'a self, file_name: &'a str, bytes: &'a [u8]) -> BoxFuture<'a, PickerResult<String>>;

    /// Let the user choose a file to read.
    fn pick_open_file<'a>(&'a self, filter: &'a FileFilter) -> BoxFuture<'a, PickerResult<PickedFile>>;
}

#[cfg(feature = "native")]
mod native {
    use std::path::PathBuf;

    use super::{BoxFuture, FileFilter, FilePicker, PickedFile, PickerError, PickerResult};

    /// Native dialogs via `rfd`; downloads land in the user's download directory.
    #[derive(Debug, Clone, Default)]
    pub struct NativePicker {
        download_dir: Option<PathBuf>,
    }

    impl NativePicker {
        pub fn new() -> Self {
            Self::default()
        }

        /// Write downloads to `dir` instead of the platform download directory.
        pub fn with_download_dir(dir: PathBuf) -> Self {
            Self {
                download_dir: Some(dir),
            }
        }

        fn download_target(&self, file_name: &str) -> PickerResult<PathBuf> {
            let dir = self
                .download_dir
                .clone()
                .or_else(dirs::download_dir)
                .or_else(dirs::home_dir)
                .ok_or_else(|| PickerError::Unavailable("no download directory".to_string()))?;
            Ok(dir.join(file_name))
        }
    }

    impl FilePicker for NativePicker {
        fn save_with_picker<'a>(
            &'a self,
            suggested_name: &'a str,
            filter: &'a FileFilter,
            bytes: &'a [u8],
        ) -> BoxFuture<'a, PickerResult<String>> {
            Box::pin(async move {
                let handle = rfd::AsyncFileDialog::new()
                    .set_title("Save Document")
                    .set_file_name(suggested_name)
                    .add_filter(&filter.name, filter.extensions.as_slice())
                    .save_file()
                    .await
                    .ok_or(PickerError::Cancelled)?;
                handle
                    .write(bytes)
                    .await
                    .map_err(|e| PickerError::Io(format!("Failed to write {}: {}", handle.file_name(), e)))?;
                Ok(handle.file_name())
            })
        }

        fn prompt_file_name<'a>(&'a self, default_name: &'a str) -> BoxFuture<'a, Option<String>> {
            // No text prompt on native; accept the suggestion.
            Box::pin(async move { Some(default_name.to_string()) })
        }

        fn download<'a>(&'a self, file_name: &'a str, bytes: &'a [u8]) -> BoxFuture<'a, PickerResult<String>> {
            Box::pin(async move {
                let path = self.download_target(file_name)?;
                std::fs::write(&path, bytes)
                    .map_err(|e| PickerError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
                Ok(path.display().to_string())
            })
        }

        fn pick_open_file<'a>(&'a self, filter: &'a FileFilter) -> BoxFuture<'a, PickerResult<PickedFile>> {
            Box::pin(async move {
                let handle = rfd::AsyncFileDialog::new()
                    .set_title("Open Document")
                    .add_filter(&filter.name, filter.extensions.as_slice())
                    .pick_file()
                    .await
                    .ok_or(PickerError::Cancelled)?;
                Ok(PickedFile {
                    name: handle.file_name(),
                    bytes: handle.read().await,
                })
            })
        }
    }
}

#[cfg(feature = "native")]
pub use native::NativePicker;

/// Scripted picker over a directory, for tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use super::{BoxFuture, FileFilter, FilePicker, PickedFile, PickerError, PickerResult};

    /// How the save dialog behaves.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SaveDialog {
        Writes,
        Cancels,
        Unavailable,
    }

    pub struct DirPicker {
        pub dir: PathBuf,
        pub save_dialog: SaveDialog,
        /// Answer to the file name prompt.
        pub prompt_answer: Option<String>,
        /// File the open dialog returns; `None` cancels.
        pub open_file: Option<PathBuf>,
        pub prompts: RefCell<Vec<String>>,
    }

    impl DirPicker {
        pub fn new(dir: PathBuf) -> Self {
            Self {
                dir,
                save_dialog: SaveDialog::Writes,
                prompt_answer: None,
                open_file: None,
                prompts: RefCell::new(Vec::new()),
            }
        }

        pub fn files(&self) -> Vec<String> {
            let mut names: Vec<String> = std::fs::read_dir(&self.dir)
                .map(|entries| {
                    entries
                        .filter_map(|e| e.ok())
                        .map(|e| e.file_name().to_string_lossy().into_owned())
                        .collect()
                })
                .unwrap_or_default();
            names.sort();
            names
        }

        fn write(&self, name: &str, bytes: &[u8]) -> PickerResult<String> {
            let path = self.dir.join(name);
            std::fs::write(&path, bytes).map_err(|e| PickerError::Io(e.to_string()))?;
            Ok(path.display().to_string())
        }
    }

    impl FilePicker for DirPicker {
        fn save_with_picker<'a>(
            &'a self,
            suggested_name: &'a str,
            _filter: &'a FileFilter,
            bytes: &'a [u8],
        ) -> BoxFuture<'a, PickerResult<String>> {
            Box::pin(async move {
                match self.save_dialog {
                    SaveDialog::Writes => self.write(suggested_name, bytes),
                    SaveDialog::Cancels => Err(PickerError::Cancelled),
                    SaveDialog::Unavailable => Err(PickerError::Unavailable("scripted".to_string())),
                }
            })
        }

        fn prompt_file_name<'a>(&'a self, default_name: &'a str) -> BoxFuture<'a, Option<String>> {
            Box::pin(async move {
                self.prompts.borrow_mut().push(default_name.to_string());
                self.prompt_answer.clone()
            })
        }

        fn download<'a>(&'a self, file_name: &'a str, bytes: &'a [u8]) -> BoxFuture<'a, PickerResult<String>> {
            Box::pin(async move { self.write(file_name, bytes) })
        }

        fn pick_open_file<'a>(&'a self, _filter: &'a FileFilter) -> BoxFuture<'a, PickerResult<PickedFile>> {
            Box::pin(async move {
                let path = self.open_file.clone().ok_or(PickerError::Cancelled)?;
                let bytes = std::fs::read(&path).map_err(|e| PickerError::Io(e.to_string()))?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Ok(PickedFile { name, bytes })
            })
        }
    }
}
