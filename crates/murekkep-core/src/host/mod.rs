//! Contract with the host whiteboard editor.
//!
//! The host owns the document model, selection, rendering and
//! persistence. This layer only queries and mutates it through
//! [`HostEditor`].

mod memory;

pub use memory::{MemoryDocument, MemoryHost, MemoryShape};

use std::fmt;

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::viewport::{CameraState, ViewportState};

/// Host shape (or page) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// User metadata this layer attaches to shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub force_show: bool,
}

/// Read-only view of a host shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    pub id: ShapeId,
    pub parent_id: ShapeId,
    /// Host type name, e.g. `geo`, `text`, `frame`.
    pub kind: String,
    pub meta: ShapeMeta,
    /// Intrinsic text content, if the shape type has any.
    pub text: Option<String>,
}

/// Type name of shapes whose name lives in their own properties.
pub const FRAME_KIND: &str = "frame";

/// A mutation this layer applies to a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeUpdate {
    /// Replace the shape's metadata.
    Meta(ShapeMeta),
    /// Rename a frame through its own name property.
    FrameName(String),
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Warning)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }
}

/// The host editor's serializable document state.
///
/// Treated as an opaque JSON value: never inspected here beyond being
/// written out and read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(pub serde_json::Value);

/// Host integration errors.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host does not support {0}")]
    Unsupported(&'static str),
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("Snapshot rejected: {0}")]
    Snapshot(String),
    #[error("Export failed: {0}")]
    Export(String),
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// The host editor surface this layer depends on.
pub trait HostEditor {
    /// Look up a shape by id.
    fn shape(&self, id: &ShapeId) -> Option<ShapeRecord>;

    /// Id of the page currently shown.
    fn current_page_id(&self) -> ShapeId;

    /// Child ids of a page or shape, in paint order.
    fn sorted_child_ids(&self, parent: &ShapeId) -> Vec<ShapeId>;

    /// Viewport size in logical screen pixels.
    fn viewport_screen_size(&self) -> Size;

    /// Visible rectangle in page coordinates.
    fn viewport_page_bounds(&self) -> Rect;

    /// Current camera.
    fn camera(&self) -> CameraState;

    fn device_pixel_ratio(&self) -> f64;

    fn is_dark_mode(&self) -> bool;

    /// Selected shape ids, in selection order.
    fn selected_ids(&self) -> Vec<ShapeId>;

    /// Replace the selection.
    fn set_selected_ids(&mut self, ids: Vec<ShapeId>);

    /// Apply a shape mutation.
    fn update_shape(&mut self, id: &ShapeId, update: ShapeUpdate) -> HostResult<()>;

    /// Serialize the full document.
    fn snapshot(&self) -> HostResult<Snapshot>;

    /// Replace the document with a snapshot.
    ///
    /// Hosts without a load entry point keep this default.
    fn load_snapshot(&mut self, snapshot: Snapshot) -> HostResult<()> {
        let _ = snapshot;
        Err(HostError::Unsupported("snapshot loading"))
    }

    /// Render a snapshot to PNG bytes, background included.
    fn export_png(&self, snapshot: &Snapshot) -> HostResult<Vec<u8>>;

    /// Post a notification.
    fn toast(&mut self, toast: Toast);

    /// Viewport snapshot for one render pass.
    fn viewport_state(&self) -> ViewportState {
        ViewportState::new(
            self.viewport_screen_size(),
            self.viewport_page_bounds(),
            self.camera(),
            self.device_pixel_ratio(),
        )
    }
}
