//! Layer panel rows and the panel resize handle.

use egui::{Align2, Color32, CursorIcon, Id, Pos2, Rect, Response, Sense, Stroke, Ui, pos2, vec2};

use crate::buttons::EyeToggle;
use crate::{sizing, theme};

/// One row of the layer tree: indented name plus a visibility eye.
pub struct LayerRowView<'a> {
    id: Id,
    label: &'a str,
    indent: f32,
    fill: Color32,
    dimmed: bool,
    hidden: bool,
    height: f32,
}

/// What happened to a row this frame.
pub struct LayerRowResponse {
    /// Click/double-click on the row body.
    pub row: Response,
    /// The eye was clicked. Row clicks are not reported in the same frame.
    pub eye_clicked: bool,
    /// Where the name is drawn, for placing an inline editor.
    pub label_rect: Rect,
}

impl<'a> LayerRowView<'a> {
    pub fn new(id: Id, label: &'a str) -> Self {
        Self {
            id,
            label,
            indent: 10.0,
            fill: Color32::TRANSPARENT,
            dimmed: false,
            hidden: false,
            height: sizing::ROW_HEIGHT,
        }
    }

    /// Left padding of the name.
    pub fn indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }

    /// Row background.
    pub fn fill(mut self, fill: Color32) -> Self {
        self.fill = fill;
        self
    }

    /// Draw at reduced opacity (shape or an ancestor is hidden).
    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    /// The shape's own hidden flag, shown by the eye.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn show(self, ui: &mut Ui) -> LayerRowResponse {
        let width = ui.available_width();
        let (rect, row) = ui.allocate_exact_size(vec2(width, self.height), Sense::click());

        let eye_side = (self.height - 6.0).max(12.0);
        let eye_rect = Rect::from_center_size(
            pos2(rect.right() - 4.0 - eye_side / 2.0, rect.center().y),
            vec2(eye_side, eye_side),
        );
        let eye = ui.interact(eye_rect, self.id.with("eye"), Sense::click());
        let label_rect = Rect::from_min_max(
            pos2(rect.left() + self.indent, rect.top() + 2.0),
            pos2((eye_rect.left() - 4.0).max(rect.left() + self.indent), rect.bottom() - 2.0),
        );

        if ui.is_rect_visible(rect) {
            let mut painter = ui.painter().clone();
            if self.dimmed {
                painter.set_opacity(theme::HIDDEN_ROW_OPACITY);
            }

            let fill = if self.fill == Color32::TRANSPARENT && row.hovered() {
                theme::HOVER_BG
            } else {
                self.fill
            };
            painter.rect_filled(rect, 0.0, fill);
            painter.line_segment(
                [pos2(rect.left(), rect.bottom()), pos2(rect.right(), rect.bottom())],
                Stroke::new(1.0, Color32::from_gray(238)),
            );

            painter.with_clip_rect(label_rect).text(
                Pos2::new(label_rect.left(), label_rect.center().y),
                Align2::LEFT_CENTER,
                self.label,
                egui::FontId::proportional(12.0),
                theme::TEXT,
            );

            EyeToggle::new(self.hidden).paint(&painter, eye_rect, eye.hovered());
        }

        let eye_clicked = eye.clicked();
        eye.on_hover_cursor(CursorIcon::PointingHand);
        LayerRowResponse {
            row,
            eye_clicked,
            label_rect,
        }
    }
}

/// Vertical grip on a panel edge. Drag it to resize the panel.
pub fn resize_handle(ui: &mut Ui, id: Id, rect: Rect) -> Response {
    let response = ui.interact(rect, id, Sense::drag());
    if ui.is_rect_visible(rect) && (response.hovered() || response.dragged()) {
        let x = rect.center().x;
        ui.painter().line_segment(
            [pos2(x, rect.top() + 4.0), pos2(x, rect.bottom() - 4.0)],
            Stroke::new(2.0, theme::ACCENT.gamma_multiply(0.6)),
        );
    }
    response.on_hover_cursor(CursorIcon::ResizeHorizontal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_fills_available_width() {
        let ctx = egui::Context::default();
        let mut label_rect = Rect::NOTHING;
        let mut row_rect = Rect::NOTHING;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.set_width(200.0);
                let response = LayerRowView::new(Id::new("row"), "Frame shape")
                    .indent(30.0)
                    .fill(theme::ROW_SELECTED)
                    .show(ui);
                label_rect = response.label_rect;
                row_rect = response.row.rect;
                assert!(!response.eye_clicked);
            });
        });
        assert!((row_rect.height() - sizing::ROW_HEIGHT).abs() < f32::EPSILON);
        assert!((label_rect.left() - row_rect.left() - 30.0).abs() < 0.01);
        assert!(label_rect.right() < row_rect.right());
    }
}
