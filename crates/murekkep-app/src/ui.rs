//! UI components using egui.

use egui::{Align2, Color32, Context, CornerRadius, Frame, Id, Margin, Pos2, Rect, Stroke, Vec2, pos2};
use murekkep_core::color::Rgba8;
use murekkep_core::grid::{GridConfig, GridStyle};
use murekkep_core::host::ShapeId;
use murekkep_core::layers::{LayerRow, RowHighlight};
use murekkep_core::layout::LayoutClass;
use murekkep_core::resize::PanelResize;
use murekkep_core::settings::{GridSettingsForm, SessionConfig};
use murekkep_widgets::{
    ColorSwatch, LINE_COLOR_PRESETS, LayerRowView, TextButton, ToggleButton, colors_match, input_text, menu_item,
    menu_item_enabled, menu_separator, panel_frame, primary_btn, resize_handle, secondary_btn, section_label,
    separator, sizing, theme, toolbar_frame, vertical_separator,
};

use crate::shortcuts::ShortcutRegistry;

/// Actions triggered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Save the document to a file.
    Save,
    /// Replace the document with a file.
    Open,
    /// Export the drawing with its grid as PDF.
    ExportPdf,
    /// Switch the paper style.
    SetGridStyle(GridStyle),
    /// Show the grid settings dialog.
    OpenGridSettings,
    /// Apply all four grid settings together.
    ApplyGridSettings(GridSettingsForm),
    /// Close the grid settings dialog without changes.
    CloseGridSettings,
    /// Show or hide the layer panel.
    ToggleLayerPanel,
    /// Row click; `additive` when Ctrl/Cmd or Shift is held.
    SelectShape { id: ShapeId, additive: bool },
    /// Eye click on a row.
    ToggleVisibility(ShapeId),
    /// Row double-click.
    BeginRename(ShapeId),
    /// The inline name editor changed.
    Rename { id: ShapeId, name: String },
    /// Enter, Escape or focus loss in the name editor.
    FinishRename,
}

/// Inline name editing for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameState {
    pub id: ShapeId,
    pub buffer: String,
    focus_requested: bool,
}

impl RenameState {
    pub fn new(id: ShapeId, current_name: String) -> Self {
        Self {
            id,
            buffer: current_name,
            focus_requested: false,
        }
    }
}

/// UI state that persists across frames.
pub struct UiState {
    pub layout: LayoutClass,
    pub panel_title: String,
    pub panel_visible: bool,
    /// File menu dropdown is open.
    pub menu_open: bool,
    /// Layer panel width in logical pixels.
    pub panel_width: f32,
    pub resize: PanelResize,
    /// Open grid settings dialog, if any.
    pub settings_form: Option<GridSettingsForm>,
    /// Validation message shown in the settings dialog.
    pub settings_error: Option<String>,
    pub renaming: Option<RenameState>,
}

impl UiState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            layout: LayoutClass::Regular,
            panel_title: config.panel_title.clone(),
            panel_visible: config.panel_visible,
            menu_open: false,
            panel_width: config.initial_panel_width,
            resize: PanelResize::new(),
            settings_form: None,
            settings_error: None,
            renaming: None,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

/// Render all UI and return the action triggered this frame, if any.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, grid: &GridConfig, rows: &[LayerRow]) -> Option<UiAction> {
    let toolbar_action = render_toolbar(ctx, ui_state, grid, !rows.is_empty());
    let panel_action = if ui_state.panel_visible {
        render_layer_panel(ctx, ui_state, rows)
    } else {
        None
    };
    let settings_action = if ui_state.settings_form.is_some() {
        render_grid_settings(ctx, ui_state)
    } else {
        None
    };

    settings_action.or(toolbar_action).or(panel_action)
}

/// Row background for a highlight level.
pub fn row_fill(highlight: RowHighlight) -> Color32 {
    match highlight {
        RowHighlight::Selected => theme::ROW_SELECTED,
        RowHighlight::AncestorSelected => theme::ROW_ANCESTOR_SELECTED,
        RowHighlight::Nested => theme::ROW_NESTED,
        RowHighlight::None => Color32::TRANSPARENT,
    }
}

/// Toolbar with the file menu, paper style and panel toggle.
///
/// Top-right on desktop; bottom-centre and larger on compact layouts.
fn render_toolbar(ctx: &Context, ui_state: &mut UiState, grid: &GridConfig, has_shapes: bool) -> Option<UiAction> {
    let mut action = None;
    let compact = ui_state.layout.is_compact();

    let area = egui::Area::new(Id::new("murekkep_toolbar"));
    let area = if compact {
        area.anchor(Align2::CENTER_BOTTOM, Vec2::new(0.0, -10.0))
    } else {
        area.anchor(Align2::RIGHT_TOP, Vec2::new(-10.0, 10.0))
    };

    let mut file_button = Rect::NOTHING;
    let toolbar = area.show(ctx, |ui| {
        toolbar_frame(compact).show(ui, |ui| {
            if compact {
                ui.set_max_width(400.0);
            }
            let gap = if compact { 8.0 } else { 4.0 };
            ui.spacing_mut().item_spacing = Vec2::new(gap, gap);
            let separator_height = if compact { sizing::TOUCH_TARGET * 0.6 } else { 14.0 };

            ui.horizontal_wrapped(|ui| {
                let before = ui.cursor().min;
                if ToggleButton::new("File", ui_state.menu_open).compact(compact).show(ui) {
                    ui_state.menu_open = !ui_state.menu_open;
                }
                file_button = Rect::from_min_max(before, ui.min_rect().max);

                vertical_separator(ui, separator_height);

                for style in GridStyle::ALL {
                    if ToggleButton::new(style.name(), grid.style == style)
                        .min_width(56.0)
                        .compact(compact)
                        .show(ui)
                    {
                        action = Some(UiAction::SetGridStyle(style));
                    }
                }
                if TextButton::new("Grid...")
                    .tooltip("Grid settings")
                    .compact(compact)
                    .show(ui)
                {
                    ui_state.menu_open = false;
                    action = Some(UiAction::OpenGridSettings);
                }

                vertical_separator(ui, separator_height);

                if ToggleButton::new(&ui_state.panel_title, ui_state.panel_visible)
                    .compact(compact)
                    .show(ui)
                {
                    action = Some(UiAction::ToggleLayerPanel);
                }
            });
        });
    });

    if ui_state.menu_open {
        let toolbar_rect = toolbar.response.rect;
        let (pivot, pos) = if compact {
            (Align2::LEFT_BOTTOM, pos2(toolbar_rect.left(), toolbar_rect.top() - 6.0))
        } else {
            (Align2::LEFT_TOP, pos2(toolbar_rect.left(), toolbar_rect.bottom() + 6.0))
        };
        let menu = egui::Area::new(Id::new("murekkep_file_menu"))
            .pivot(pivot)
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                panel_frame().show(ui, |ui| {
                    ui.set_width(180.0);
                    ui.vertical(|ui| {
                        ui.spacing_mut().item_spacing = Vec2::new(0.0, 2.0);
                        let save = ShortcutRegistry::label_for(&UiAction::Save);
                        let open = ShortcutRegistry::label_for(&UiAction::Open);
                        if menu_item(ui, "Save", &save) {
                            action = Some(UiAction::Save);
                        }
                        if menu_item(ui, "Open", &open) {
                            action = Some(UiAction::Open);
                        }
                        menu_separator(ui);
                        if menu_item_enabled(ui, "Export PDF", "", has_shapes) {
                            action = Some(UiAction::ExportPdf);
                        }
                    });
                });
            });

        let clicked_elsewhere = ctx.input(|i| {
            i.pointer.any_click()
                && i
                    .pointer
                    .interact_pos()
                    .is_some_and(|p| !menu.response.rect.contains(p) && !file_button.contains(p))
        });
        if clicked_elsewhere || matches!(action, Some(UiAction::Save | UiAction::Open | UiAction::ExportPdf)) {
            ui_state.menu_open = false;
        }
    }

    action
}

/// Floating shape tree with a drag handle on its right edge.
fn render_layer_panel(ctx: &Context, ui_state: &mut UiState, rows: &[LayerRow]) -> Option<UiAction> {
    let mut action = None;
    let additive = ctx.input(|i| i.modifiers.command || i.modifiers.ctrl || i.modifiers.shift);
    let row_height = if ui_state.layout.is_compact() {
        sizing::TOUCH_TARGET
    } else {
        sizing::ROW_HEIGHT
    };
    let max_height = (ctx.input(|i| i.content_rect().height()) - 80.0).max(120.0);

    egui::Area::new(Id::new("murekkep_layer_panel"))
        .anchor(Align2::LEFT_TOP, Vec2::new(10.0, 10.0))
        .show(ctx, |ui| {
            let frame = panel_frame().show(ui, |ui| {
                ui.set_width(ui_state.panel_width);
                ui.spacing_mut().item_spacing = Vec2::ZERO;
                section_label(ui, &ui_state.panel_title);
                ui.add_space(6.0);

                egui::ScrollArea::vertical().max_height(max_height).show(ui, |ui| {
                    if rows.is_empty() {
                        ui.label(egui::RichText::new("No shapes").size(11.0).color(theme::TEXT_MUTED));
                    }
                    for row in rows {
                        if let Some(row_action) = layer_row(ui, ui_state, row, row_height, additive) {
                            action = Some(row_action);
                        }
                    }
                });
            });

            let edge = frame.response.rect;
            let handle_rect = Rect::from_min_max(
                pos2(edge.right() - sizing::RESIZE_HANDLE_WIDTH / 2.0, edge.top()),
                pos2(edge.right() + sizing::RESIZE_HANDLE_WIDTH / 2.0, edge.bottom()),
            );
            let handle = resize_handle(ui, Id::new("murekkep_layer_panel_resize"), handle_rect);
            if let Some(pointer) = handle.interact_pointer_pos() {
                if handle.drag_started() {
                    ui_state.resize.begin(pointer.x, ui_state.panel_width);
                } else if handle.dragged() {
                    ui_state.resize.pointer_moved(pointer.x);
                }
            }
            if handle.drag_stopped() {
                ui_state.resize.end();
            }
        });

    action
}

fn layer_row(
    ui: &mut egui::Ui,
    ui_state: &mut UiState,
    row: &LayerRow,
    row_height: f32,
    additive: bool,
) -> Option<UiAction> {
    let response = LayerRowView::new(Id::new(("layer_row", row.id.as_str())), &row.name)
        .indent(row.indent())
        .fill(row_fill(row.highlight))
        .dimmed(row.dimmed)
        .hidden(row.hidden_flag)
        .height(row_height)
        .show(ui);

    if let Some(rename) = ui_state.renaming.as_mut().filter(|r| r.id == row.id) {
        let edit = ui.place(
            response.label_rect,
            egui::TextEdit::singleline(&mut rename.buffer).frame(true),
        );
        if !rename.focus_requested {
            edit.request_focus();
            rename.focus_requested = true;
        }
        let finished = ui.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape));
        if finished || edit.lost_focus() {
            return Some(UiAction::FinishRename);
        }
        if edit.changed() {
            return Some(UiAction::Rename {
                id: row.id.clone(),
                name: rename.buffer.clone(),
            });
        }
        return None;
    }

    if response.eye_clicked {
        Some(UiAction::ToggleVisibility(row.id.clone()))
    } else if response.row.double_clicked() {
        Some(UiAction::BeginRename(row.id.clone()))
    } else if response.row.clicked() {
        Some(UiAction::SelectShape {
            id: row.id.clone(),
            additive,
        })
    } else {
        None
    }
}

/// Modal with the four grid parameters. Apply submits them together.
fn render_grid_settings(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    let screen_rect = ctx.input(|i| i.content_rect());
    egui::Area::new(Id::new("grid_settings_backdrop"))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Middle)
        .interactable(true)
        .show(ctx, |ui| {
            let (rect, response) = ui.allocate_exact_size(screen_rect.size(), egui::Sense::click());
            ui.painter().rect_filled(rect, 0.0, Color32::from_black_alpha(80));
            if response.clicked() {
                action = Some(UiAction::CloseGridSettings);
            }
        });

    let error = ui_state.settings_error.clone();
    let Some(form) = ui_state.settings_form.as_mut() else {
        return action;
    };

    egui::Area::new(Id::new("grid_settings"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            Frame::new()
                .fill(Color32::WHITE)
                .corner_radius(CornerRadius::same(12))
                .stroke(Stroke::new(1.0, Color32::from_gray(200)))
                .inner_margin(Margin::same(20))
                .show(ui, |ui| {
                    let width = 260.0;
                    ui.set_width(width);
                    ui.label(
                        egui::RichText::new("Grid settings")
                            .size(16.0)
                            .strong()
                            .color(Color32::from_gray(30)),
                    );
                    ui.add_space(8.0);
                    separator(ui);

                    field(ui, "Cell size", &mut form.cell_size, width);
                    field(ui, "Line width", &mut form.minor_line_width, width);
                    field(ui, "Line color", &mut form.line_color, width);

                    let current = swatch_color(&form.line_color);
                    ui.horizontal(|ui| {
                        for (hex, name) in LINE_COLOR_PRESETS {
                            let Some(color) = swatch_color(hex) else {
                                continue;
                            };
                            let selected = current.is_some_and(|c| colors_match(c, color));
                            if ColorSwatch::new(color, name).selected(selected).show(ui).0 {
                                form.line_color = hex.to_string();
                            }
                        }
                    });
                    ui.add_space(8.0);

                    field(ui, "Major line width", &mut form.major_line_width, width);

                    if let Some(error) = &error {
                        ui.add_space(4.0);
                        ui.label(egui::RichText::new(error).size(11.0).color(Color32::from_rgb(220, 38, 38)));
                    }

                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        if secondary_btn(ui, "Cancel") {
                            action = Some(UiAction::CloseGridSettings);
                        }
                        if primary_btn(ui, "Apply") {
                            action = Some(UiAction::ApplyGridSettings(form.clone()));
                        }
                    });
                });
        });

    action
}

fn swatch_color(hex: &str) -> Option<Color32> {
    Rgba8::parse_hex(hex).map(|c| Color32::from_rgb(c.r, c.g, c.b))
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String, width: f32) {
    ui.label(egui::RichText::new(label).size(12.0).color(Color32::from_gray(60)));
    input_text(ui, value, width, "");
    ui.add_space(8.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use murekkep_core::host::{HostEditor, MemoryHost};
    use murekkep_core::layers::collect_rows;

    fn run_frame(ctx: &Context, ui_state: &mut UiState, rows: &[LayerRow]) -> Option<UiAction> {
        let mut action = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            action = render_ui(ctx, ui_state, &GridConfig::default(), rows);
        });
        action
    }

    #[test]
    fn test_row_fill_colors() {
        assert_eq!(row_fill(RowHighlight::Selected), Color32::from_rgb(0xE8, 0xF4, 0xFE));
        assert_eq!(row_fill(RowHighlight::AncestorSelected), Color32::from_rgb(0xF3, 0xF9, 0xFE));
        assert_eq!(row_fill(RowHighlight::Nested), Color32::from_black_alpha(6));
        assert_eq!(row_fill(RowHighlight::None), Color32::TRANSPARENT);
    }

    #[test]
    fn test_ui_state_from_config() {
        let state = UiState::default();
        assert!(state.panel_visible);
        assert_eq!(state.panel_title, "Shapes");
        assert!((state.panel_width - 200.0).abs() < f32::EPSILON);
        assert!(state.settings_form.is_none());
    }

    #[test]
    fn test_idle_frame_triggers_nothing() {
        let mut host = MemoryHost::new();
        let page = host.current_page_id();
        let frame = host.add_shape(&page, "frame", kurbo::Rect::new(0.0, 0.0, 10.0, 10.0));
        host.add_shape(&frame, "geo", kurbo::Rect::new(0.0, 0.0, 5.0, 5.0));
        let rows = collect_rows(&host);

        let ctx = Context::default();
        let mut state = UiState::default();
        state.settings_form = Some(GridSettingsForm::from_config(&GridConfig::default()));
        state.renaming = Some(RenameState::new(rows[1].id.clone(), rows[1].name.clone()));
        state.menu_open = true;
        for _ in 0..2 {
            assert_eq!(run_frame(&ctx, &mut state, &rows), None);
        }
        assert!(state.menu_open);
        assert!(!state.resize.is_dragging());
    }

    #[test]
    fn test_hidden_panel_and_compact_layout_render() {
        let ctx = Context::default();
        let mut state = UiState::default();
        state.panel_visible = false;
        state.layout = LayoutClass::Compact;
        assert_eq!(run_frame(&ctx, &mut state, &[]), None);
    }
}
