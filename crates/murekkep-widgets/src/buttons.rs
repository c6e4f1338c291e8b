//! Button components: text buttons, toggle buttons, the visibility eye.

use egui::{Align2, Color32, CornerRadius, CursorIcon, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::{sizing, theme};

/// A toggle button with text label.
/// Solid blue background when selected.
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    min_width: Option<f32>,
    height: f32,
    font_size: f32,
}

impl<'a> ToggleButton<'a> {
    /// Create a new toggle button.
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            min_width: None,
            height: 24.0,
            font_size: 11.0,
        }
    }

    /// Set minimum width.
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Enlarge to touch size.
    pub fn compact(mut self, compact: bool) -> Self {
        if compact {
            self.height = sizing::TOUCH_TARGET;
            self.font_size = 14.0;
            self.min_width = Some(self.min_width.unwrap_or(0.0).max(60.0));
        }
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(self.font_size);
        let galley = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER);
        let text_width = galley.size().x;
        let width = self.min_width.unwrap_or(0.0).max(text_width + 16.0);
        let (rect, response) = ui.allocate_exact_size(vec2(width, self.height), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if response.hovered() {
                Color32::from_gray(235)
            } else {
                Color32::WHITE
            };
            let text_color = if self.selected { Color32::WHITE } else { theme::TEXT };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            if !self.selected {
                ui.painter().rect_stroke(
                    rect,
                    CornerRadius::same(sizing::CORNER_RADIUS),
                    Stroke::new(1.0, theme::BORDER),
                    StrokeKind::Inside,
                );
            }
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, text_color);
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A flat text button with an optional tooltip.
pub struct TextButton<'a> {
    label: &'a str,
    tooltip: Option<&'a str>,
    height: f32,
}

impl<'a> TextButton<'a> {
    /// Create a new text button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            tooltip: None,
            height: 24.0,
        }
    }

    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Enlarge to touch size.
    pub fn compact(mut self, compact: bool) -> Self {
        if compact {
            self.height = sizing::TOUCH_TARGET;
        }
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(12.0);
        let width = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER)
            .size()
            .x
            + 16.0;
        let (rect, response) = ui.allocate_at_least(vec2(width, self.height), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);

            ui.painter().text(
                Pos2::new(rect.left() + 8.0, rect.center().y),
                Align2::LEFT_CENTER,
                self.label,
                font_id,
                theme::TEXT,
            );
        }

        let clicked = response.clicked();
        let response = match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        };
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// Open or crossed-out eye showing a shape's own hidden flag.
pub struct EyeToggle {
    hidden: bool,
}

impl EyeToggle {
    pub fn new(hidden: bool) -> Self {
        Self { hidden }
    }

    /// Paint the eye into `rect`.
    pub fn paint(&self, painter: &Painter, rect: Rect, hovered: bool) {
        if hovered {
            painter.rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), Color32::from_black_alpha(12));
        }

        let color = if self.hidden { theme::TEXT_MUTED } else { theme::TEXT };
        let stroke = Stroke::new(1.2, color);
        let center = rect.center();
        let half_w = rect.width() * 0.36;
        let half_h = rect.height() * 0.22;

        // Lens outline: two arcs meeting at the corners.
        let steps = 12;
        let mut upper = Vec::with_capacity(steps + 1);
        let mut lower = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = center.x - half_w + t * 2.0 * half_w;
            let bulge = (t * std::f32::consts::PI).sin() * half_h;
            upper.push(Pos2::new(x, center.y - bulge));
            lower.push(Pos2::new(x, center.y + bulge));
        }
        painter.line(upper, stroke);
        painter.line(lower, stroke);
        painter.circle_stroke(center, half_h * 0.7, stroke);

        if self.hidden {
            painter.line_segment(
                [
                    Pos2::new(center.x - half_w, center.y + half_w * 0.8),
                    Pos2::new(center.x + half_w, center.y - half_w * 0.8),
                ],
                stroke,
            );
        }
    }
}
