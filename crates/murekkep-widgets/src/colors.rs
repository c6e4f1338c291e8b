//! Line color swatches.

use egui::{Color32, CornerRadius, CursorIcon, Rect, Sense, Stroke, StrokeKind, Ui, Vec2, vec2};

use crate::{sizing, theme};

/// Grid line colors offered next to the hex field: (hex, name).
pub const LINE_COLOR_PRESETS: [(&str, &str); 6] = [
    ("#e0e0e0", "Light gray"),
    ("#c8c8c8", "Gray"),
    ("#a0a0a0", "Dark gray"),
    ("#bfdbfe", "Blue"),
    ("#fecaca", "Red"),
    ("#bbf7d0", "Green"),
];

/// A clickable rounded color swatch.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    selected: bool,
    size: Vec2,
}

impl<'a> ColorSwatch<'a> {
    /// Create a new color swatch.
    pub fn new(color: Color32, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
            size: vec2(sizing::SMALL, sizing::SMALL),
        }
    }

    /// Set whether this swatch is selected.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Show the swatch and return (clicked, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, self.color);
            let ring = if self.selected {
                Stroke::new(2.0, theme::ACCENT)
            } else {
                Stroke::new(1.0, theme::BORDER)
            };
            ui.painter().rect_stroke(rect, radius, ring, StrokeKind::Inside);
        }

        let clicked = response.clicked();
        response.on_hover_text(self.tooltip).on_hover_cursor(CursorIcon::PointingHand);
        (clicked, rect)
    }
}

/// Check if two colors match, ignoring alpha.
pub fn colors_match(a: Color32, b: Color32) -> bool {
    a.r() == b.r() && a.g() == b.g() && a.b() == b.b()
}
