//! Dijital Murekkep Core Library
//!
//! Platform-agnostic logic for the paper grid, shape tree panel and
//! document files layered over a host whiteboard editor.

pub mod color;
pub mod grid;
pub mod host;
pub mod layers;
pub mod layout;
pub mod resize;
pub mod settings;
pub mod storage;
pub mod viewport;

pub use color::Rgba8;
pub use grid::{Axis, GridConfig, GridLine, GridStyle, MAJOR_LINE_INTERVAL, grid_lines};
pub use host::{
    HostEditor, HostError, HostResult, MemoryHost, Severity, ShapeId, ShapeMeta, ShapeRecord,
    ShapeUpdate, Snapshot, Toast,
};
pub use layers::{LayerRow, RowHighlight, ToggleOutcome, Visibility, VisibilityToggler};
pub use layout::LayoutClass;
pub use resize::{MAX_PANEL_WIDTH, MIN_PANEL_WIDTH, PanelResize};
pub use settings::{GridConfigError, GridConfigStore, GridSettingsForm, SessionConfig};
pub use storage::{SnapshotFileError, SnapshotFileResult};
pub use viewport::{CameraState, ViewportState};
