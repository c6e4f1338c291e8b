//! Paper grid rasterizer.

use log::{debug, warn};
use murekkep_core::color::Rgba8;
use murekkep_core::grid::{Axis, GridConfig, GridLine, grid_lines};
use murekkep_core::viewport::ViewportState;
use thiserror::Error;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Image decode failed: {0}")]
    Decode(String),
    #[error("Image encode failed: {0}")]
    Encode(String),
    #[error("PDF export failed: {0}")]
    Pdf(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Everything a grid pass depends on. A repaint happens only when this changes.
#[derive(Debug, Clone, PartialEq)]
struct RenderKey {
    viewport: ViewportState,
    config: GridConfig,
    dark_mode: bool,
}

/// Owns the grid raster surface and repaints it when its inputs change.
///
/// The surface is sized in device pixels (screen size times device pixel
/// ratio) and is transparent wherever there is no grid line.
#[derive(Default)]
pub struct GridRenderer {
    surface: Option<Pixmap>,
    key: Option<RenderKey>,
    redraws: u64,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the surface up to date.
    ///
    /// Returns `Ok(true)` if the surface was repainted, `Ok(false)` if
    /// nothing it depends on has changed since the last pass.
    pub fn render(&mut self, viewport: &ViewportState, config: &GridConfig, dark_mode: bool) -> RenderResult<bool> {
        let key = RenderKey {
            viewport: *viewport,
            config: config.clone(),
            dark_mode,
        };
        if self.key.as_ref() == Some(&key) {
            return Ok(false);
        }

        let (width, height) = viewport.device_size();
        if width == 0 || height == 0 {
            self.surface = None;
            self.key = Some(key);
            self.redraws += 1;
            return Ok(true);
        }

        let reuse = self
            .surface
            .as_ref()
            .is_some_and(|s| s.width() == width && s.height() == height);
        if !reuse {
            let pixmap = Pixmap::new(width, height)
                .ok_or_else(|| RenderError::Surface(format!("cannot allocate {}x{} surface", width, height)))?;
            self.surface = Some(pixmap);
        }

        if let Some(surface) = self.surface.as_mut() {
            surface.fill(Color::TRANSPARENT);
            let drawn = paint_grid(surface, viewport, config);
            debug!("Grid repainted: {}x{} px, {} lines", width, height, drawn);
        }

        self.key = Some(key);
        self.redraws += 1;
        Ok(true)
    }

    /// Force the next `render` call to repaint.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// The current surface, or `None` when the viewport has no area.
    pub fn surface(&self) -> Option<&Pixmap> {
        self.surface.as_ref()
    }

    /// Surface size in device pixels.
    pub fn size(&self) -> (u32, u32) {
        self.surface.as_ref().map(|s| (s.width(), s.height())).unwrap_or((0, 0))
    }

    /// Premultiplied RGBA pixels of the surface.
    pub fn pixels(&self) -> &[u8] {
        self.surface.as_ref().map(|s| s.data()).unwrap_or(&[])
    }

    /// Number of repaints since creation.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }
}

/// Stroke the grid for `viewport` onto `pixmap`. Returns the number of lines drawn.
///
/// Lines span the whole surface. Minor lines are stroked first and major
/// lines on top, so crossings always show the heavier stroke.
pub fn paint_grid(pixmap: &mut Pixmap, viewport: &ViewportState, config: &GridConfig) -> usize {
    let lines = grid_lines(viewport.page_bounds, config);
    if lines.is_empty() {
        return 0;
    }

    let color = config.color().unwrap_or_else(|| {
        warn!("Invalid grid color {:?}, using default", config.line_color);
        GridConfig::default().color().unwrap_or(Rgba8::new(0xe0, 0xe0, 0xe0, 0xff))
    });
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;

    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    for major in [false, true] {
        let batch: Vec<&GridLine> = lines.iter().filter(|l| l.major == major).collect();
        let Some(first) = batch.first() else {
            continue;
        };
        let stroke = Stroke {
            width: config.width_for(first) as f32,
            ..Stroke::default()
        };

        let mut pb = PathBuilder::new();
        for line in &batch {
            let pos = line.device_position(viewport) as f32;
            match line.axis {
                Axis::Horizontal => {
                    pb.move_to(0.0, pos);
                    pb.line_to(width, pos);
                }
                Axis::Vertical => {
                    pb.move_to(pos, 0.0);
                    pb.line_to(pos, height);
                }
            }
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    lines.len()
}
