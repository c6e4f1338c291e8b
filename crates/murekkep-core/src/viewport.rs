//! Viewport snapshot for page/device transforms.

use kurbo::{Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Host camera: page-space offset and zoom.
///
/// A page point `p` lands on screen at `(p + offset) * zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Page-space translation applied before zooming.
    pub offset: Vec2,
    /// Zoom factor (1.0 = 100%).
    pub zoom: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CameraState {
    /// No pan, no zoom. Used for unscaled exports.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        zoom: 1.0,
    };

    /// Create a camera from offset and zoom.
    pub fn new(offset: Vec2, zoom: f64) -> Self {
        Self { offset, zoom }
    }
}

/// Read-only snapshot of the host viewport, taken once per render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Viewport size in logical screen pixels.
    pub screen_size: Size,
    /// Visible rectangle in page coordinates.
    pub page_bounds: Rect,
    /// Camera transform.
    pub camera: CameraState,
    /// Physical pixels per logical pixel.
    pub device_pixel_ratio: f64,
}

impl ViewportState {
    /// Create a viewport snapshot.
    pub fn new(screen_size: Size, page_bounds: Rect, camera: CameraState, device_pixel_ratio: f64) -> Self {
        Self {
            screen_size,
            page_bounds,
            camera,
            device_pixel_ratio,
        }
    }

    /// Viewport for an unscaled image of the given pixel size.
    ///
    /// Page space and device space coincide: identity camera, ratio 1.
    pub fn identity(width: f64, height: f64) -> Self {
        Self {
            screen_size: Size::new(width, height),
            page_bounds: Rect::new(0.0, 0.0, width, height),
            camera: CameraState::IDENTITY,
            device_pixel_ratio: 1.0,
        }
    }

    /// Raster surface size in device pixels, rounded to whole pixels.
    pub fn device_size(&self) -> (u32, u32) {
        let ratio = self.sanitized_ratio();
        let w = (self.screen_size.width * ratio).round().max(0.0);
        let h = (self.screen_size.height * ratio).round().max(0.0);
        (w as u32, h as u32)
    }

    /// Convert a page-space x coordinate to a device-pixel x coordinate.
    pub fn page_x_to_device(&self, x: f64) -> f64 {
        (x + self.camera.offset.x) * self.camera.zoom * self.sanitized_ratio()
    }

    /// Convert a page-space y coordinate to a device-pixel y coordinate.
    pub fn page_y_to_device(&self, y: f64) -> f64 {
        (y + self.camera.offset.y) * self.camera.zoom * self.sanitized_ratio()
    }

    fn sanitized_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }
}
