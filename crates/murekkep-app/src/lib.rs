//! Dijital Murekkep Application
//!
//! Editing session for a host whiteboard: save/open/PDF file actions,
//! the toolbar, the shape tree panel and the paper grid overlay.

mod actions;
mod overlay;
mod picker;
mod session;
mod shortcuts;
mod ui;

pub use actions::{ActionOutcome, FileActionError, FileActions};
pub use overlay::GridOverlay;
#[cfg(feature = "native")]
pub use picker::NativePicker;
pub use picker::{BoxFuture, FileFilter, FilePicker, PickedFile, PickerError, PickerResult};
pub use session::EditorSession;
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{RenameState, UiAction, UiState, render_ui, row_fill};

/// Initialise `env_logger` with an `info` default, overridable via `RUST_LOG`.
///
/// Safe to call more than once.
#[cfg(feature = "native")]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        log::info!("Starting Dijital Murekkep");
    }
}
