//! Drag-to-resize for the layer panel.
//!
//! Pointer moves only record the latest target width; the width is
//! applied on the next frame tick, so any number of moves between two
//! frames produce at most one update.

/// Narrowest panel width in logical pixels.
pub const MIN_PANEL_WIDTH: f32 = 150.0;
/// Widest panel width in logical pixels.
pub const MAX_PANEL_WIDTH: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start_x: f32,
    start_width: f32,
    last_width: f32,
    pending: Option<f32>,
}

/// Resize drag state for a panel edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelResize {
    drag: Option<Drag>,
}

impl PanelResize {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag from the handle.
    pub fn begin(&mut self, pointer_x: f32, current_width: f32) {
        self.drag = Some(Drag {
            start_x: pointer_x,
            start_width: current_width,
            last_width: current_width,
            pending: None,
        });
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Record a pointer move. Replaces any update not yet applied.
    pub fn pointer_moved(&mut self, pointer_x: f32) {
        if let Some(drag) = &mut self.drag {
            drag.pending = Some(pointer_x);
        }
    }

    /// Apply the latest pending move. Returns the new width if it changed.
    pub fn frame_tick(&mut self) -> Option<f32> {
        let drag = self.drag.as_mut()?;
        let pointer_x = drag.pending.take()?;
        let width = clamp_width(drag.start_width + (pointer_x - drag.start_x));
        if (width - drag.last_width).abs() < f32::EPSILON {
            return None;
        }
        drag.last_width = width;
        Some(width)
    }

    /// Pointer released: drop any pending update and end the drag.
    pub fn end(&mut self) {
        self.drag = None;
    }
}

/// Clamp a width to the allowed panel range.
pub fn clamp_width(width: f32) -> f32 {
    width.clamp(MIN_PANEL_WIDTH, MAX_PANEL_WIDTH)
}
