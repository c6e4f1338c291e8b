//! Dialog controls: text inputs and primary/secondary buttons.

use egui::{Align2, Color32, CornerRadius, CursorIcon, Margin, Response, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::{sizing, theme};

/// Single-line text input with a hint.
pub fn input_text(ui: &mut Ui, value: &mut String, width: f32, hint: &str) -> Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .desired_width(width)
            .hint_text(hint)
            .margin(Margin::symmetric(8, 6)),
    )
}

/// Solid accent button.
pub fn primary_btn(ui: &mut Ui, label: &str) -> bool {
    dialog_btn(ui, label, true)
}

/// Outlined neutral button.
pub fn secondary_btn(ui: &mut Ui, label: &str) -> bool {
    dialog_btn(ui, label, false)
}

fn dialog_btn(ui: &mut Ui, label: &str, primary: bool) -> bool {
    let font_id = egui::FontId::proportional(13.0);
    let text_width = ui
        .painter()
        .layout_no_wrap(label.to_string(), font_id.clone(), Color32::PLACEHOLDER)
        .size()
        .x;
    let (rect, response) = ui.allocate_exact_size(vec2((text_width + 24.0).max(72.0), 30.0), Sense::click());

    if ui.is_rect_visible(rect) {
        let radius = CornerRadius::same(sizing::CORNER_RADIUS);
        let (fill, text) = match (primary, response.hovered()) {
            (true, false) => (theme::ACCENT, Color32::WHITE),
            (true, true) => (theme::ACCENT.gamma_multiply(0.85), Color32::WHITE),
            (false, false) => (Color32::WHITE, theme::TEXT),
            (false, true) => (theme::HOVER_BG, theme::TEXT),
        };
        ui.painter().rect_filled(rect, radius, fill);
        if !primary {
            ui.painter()
                .rect_stroke(rect, radius, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
        }
        ui.painter().text(rect.center(), Align2::CENTER_CENTER, label, font_id, text);
    }

    let clicked = response.clicked();
    response.on_hover_cursor(CursorIcon::PointingHand);
    clicked
}
