//! In-memory host editor.
//!
//! Implements the full [`HostEditor`] contract over a plain document
//! structure. Used by tests and by embedders without a real editor.

use std::collections::HashSet;

use kurbo::{Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    FRAME_KIND, HostEditor, HostError, HostResult, ShapeId, ShapeMeta, ShapeRecord, ShapeUpdate,
    Snapshot, Toast,
};
use crate::viewport::CameraState;

/// Export size used when the document has no shapes.
const EMPTY_EXPORT_SIZE: (u32, u32) = (320, 240);

/// Largest export side in pixels.
const MAX_EXPORT_SIDE: f64 = 16384.0;

/// A shape stored by [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryShape {
    pub id: ShapeId,
    pub parent_id: ShapeId,
    pub kind: String,
    #[serde(default)]
    pub meta: ShapeMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Page-space bounds, used for export.
    pub bounds: Rect,
}

/// Serializable document of [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    pub page_id: ShapeId,
    /// Shapes in paint order.
    pub shapes: Vec<MemoryShape>,
    #[serde(default)]
    pub selection: Vec<ShapeId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self {
            page_id: ShapeId::new("page:page"),
            shapes: Vec::new(),
            selection: Vec::new(),
        }
    }
}

impl MemoryDocument {
    /// Check ids are unique and every parent exists.
    fn validate(&self) -> HostResult<()> {
        let mut ids = HashSet::new();
        for shape in &self.shapes {
            if shape.id == self.page_id || !ids.insert(&shape.id) {
                return Err(HostError::Snapshot(format!("duplicate id {}", shape.id)));
            }
        }
        for shape in &self.shapes {
            if shape.parent_id != self.page_id && !ids.contains(&shape.parent_id) {
                return Err(HostError::Snapshot(format!(
                    "shape {} has unknown parent {}",
                    shape.id, shape.parent_id
                )));
            }
        }
        Ok(())
    }
}

/// Host editor backed by an in-memory document.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    document: MemoryDocument,
    camera: CameraState,
    screen_size: Size,
    device_pixel_ratio: f64,
    dark_mode: bool,
    export_failure: Option<String>,
    snapshot_loading: bool,
    toasts: Vec<Toast>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            document: MemoryDocument::default(),
            camera: CameraState::IDENTITY,
            screen_size: Size::new(1280.0, 800.0),
            device_pixel_ratio: 1.0,
            dark_mode: false,
            export_failure: None,
            snapshot_loading: true,
            toasts: Vec::new(),
        }
    }
}

impl MemoryHost {
    /// Create an empty host with a single page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape under `parent` and return its generated id.
    pub fn add_shape(&mut self, parent: &ShapeId, kind: &str, bounds: Rect) -> ShapeId {
        let id = ShapeId::new(format!("shape:{}", Uuid::new_v4()));
        self.insert_shape(MemoryShape {
            id: id.clone(),
            parent_id: parent.clone(),
            kind: kind.to_string(),
            meta: ShapeMeta::default(),
            text: None,
            bounds,
        });
        id
    }

    /// Insert a fully specified shape at the top of the paint order.
    pub fn insert_shape(&mut self, shape: MemoryShape) {
        self.document.shapes.retain(|s| s.id != shape.id);
        self.document.shapes.push(shape);
    }

    /// Set the intrinsic text of a shape.
    pub fn set_text(&mut self, id: &ShapeId, text: Option<&str>) {
        if let Some(shape) = self.shape_mut(id) {
            shape.text = text.map(str::to_string);
        }
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    pub fn set_camera(&mut self, camera: CameraState) {
        self.camera = camera;
    }

    pub fn set_screen_size(&mut self, size: Size) {
        self.screen_size = size;
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = ratio;
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
    }

    /// Make the next exports fail with `reason` (`None` restores success).
    pub fn set_export_failure(&mut self, reason: Option<&str>) {
        self.export_failure = reason.map(str::to_string);
    }

    /// Simulate a host build without a snapshot-load entry point.
    pub fn set_snapshot_loading(&mut self, supported: bool) {
        self.snapshot_loading = supported;
    }

    /// Notifications posted so far.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Drain posted notifications.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    fn shape_mut(&mut self, id: &ShapeId) -> Option<&mut MemoryShape> {
        self.document.shapes.iter_mut().find(|s| &s.id == id)
    }

    fn export_bounds(document: &MemoryDocument) -> Option<Rect> {
        document
            .shapes
            .iter()
            .map(|s| s.bounds)
            .reduce(|acc, r| acc.union(r))
    }
}

impl HostEditor for MemoryHost {
    fn shape(&self, id: &ShapeId) -> Option<ShapeRecord> {
        self.document.shapes.iter().find(|s| &s.id == id).map(|s| ShapeRecord {
            id: s.id.clone(),
            parent_id: s.parent_id.clone(),
            kind: s.kind.clone(),
            meta: s.meta.clone(),
            text: s.text.clone(),
        })
    }

    fn current_page_id(&self) -> ShapeId {
        self.document.page_id.clone()
    }

    fn sorted_child_ids(&self, parent: &ShapeId) -> Vec<ShapeId> {
        self.document
            .shapes
            .iter()
            .filter(|s| &s.parent_id == parent)
            .map(|s| s.id.clone())
            .collect()
    }

    fn viewport_screen_size(&self) -> Size {
        self.screen_size
    }

    fn viewport_page_bounds(&self) -> Rect {
        let zoom = if self.camera.zoom > 0.0 { self.camera.zoom } else { 1.0 };
        let origin = -self.camera.offset;
        let extent = Vec2::new(self.screen_size.width / zoom, self.screen_size.height / zoom);
        Rect::new(origin.x, origin.y, origin.x + extent.x, origin.y + extent.y)
    }

    fn camera(&self) -> CameraState {
        self.camera
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    fn selected_ids(&self) -> Vec<ShapeId> {
        self.document.selection.clone()
    }

    fn set_selected_ids(&mut self, ids: Vec<ShapeId>) {
        let known: Vec<ShapeId> = ids
            .into_iter()
            .filter(|id| self.document.shapes.iter().any(|s| &s.id == id))
            .collect();
        self.document.selection = known;
    }

    fn update_shape(&mut self, id: &ShapeId, update: ShapeUpdate) -> HostResult<()> {
        let shape = self
            .shape_mut(id)
            .ok_or_else(|| HostError::ShapeNotFound(id.clone()))?;
        match update {
            ShapeUpdate::Meta(meta) => shape.meta = meta,
            ShapeUpdate::FrameName(name) => {
                if shape.kind != FRAME_KIND {
                    return Err(HostError::Unsupported("naming non-frame shapes through props"));
                }
                shape.text = Some(name);
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> HostResult<Snapshot> {
        serde_json::to_value(&self.document)
            .map(Snapshot)
            .map_err(|e| HostError::Snapshot(e.to_string()))
    }

    fn load_snapshot(&mut self, snapshot: Snapshot) -> HostResult<()> {
        if !self.snapshot_loading {
            return Err(HostError::Unsupported("snapshot loading"));
        }
        let document: MemoryDocument =
            serde_json::from_value(snapshot.0).map_err(|e| HostError::Snapshot(e.to_string()))?;
        document.validate()?;
        log::info!("Loaded snapshot with {} shapes", document.shapes.len());
        self.document = document;
        Ok(())
    }

    fn export_png(&self, snapshot: &Snapshot) -> HostResult<Vec<u8>> {
        if let Some(reason) = &self.export_failure {
            return Err(HostError::Export(reason.clone()));
        }
        let document: MemoryDocument = serde_json::from_value(snapshot.0.clone())
            .map_err(|e| HostError::Export(e.to_string()))?;
        let (width, height) = match Self::export_bounds(&document) {
            Some(bounds) if bounds.width() >= 1.0 && bounds.height() >= 1.0 => {
                let (w, h) = (bounds.width().ceil(), bounds.height().ceil());
                if w > MAX_EXPORT_SIDE || h > MAX_EXPORT_SIDE {
                    return Err(HostError::Export(format!("export too large: {}x{} px", w, h)));
                }
                (w as u32, h as u32)
            }
            _ => EMPTY_EXPORT_SIZE,
        };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| HostError::Export("export too large".to_string()))?;
        // Opaque white background; shape rendering belongs to a real host.
        let pixels = vec![255u8; len];
        encode_png(&pixels, width, height)
    }

    fn toast(&mut self, toast: Toast) {
        log::info!("[{:?}] {}: {}", toast.severity, toast.title, toast.description);
        self.toasts.push(toast);
    }
}

fn encode_png(rgba: &[u8], width: u32, height: u32) -> HostResult<Vec<u8>> {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| HostError::Export(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| HostError::Export(e.to_string()))?;
    }
    Ok(data)
}
