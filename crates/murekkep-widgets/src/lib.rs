//! egui widgets for the Dijital Murekkep chrome.
//!
//! - **Buttons**: text buttons, toggle buttons, the visibility eye
//! - **Colors**: line color swatches and presets
//! - **Inputs**: dialog text fields and buttons
//! - **Layers**: layer panel rows and the panel resize handle
//! - **Menu**: menu items, separators, panel frames
//! - **Layout**: section labels, separators

pub mod buttons;
pub mod colors;
pub mod inputs;
pub mod layers;
pub mod layout;
pub mod menu;

pub use buttons::{EyeToggle, TextButton, ToggleButton};
pub use colors::{ColorSwatch, LINE_COLOR_PRESETS, colors_match};
pub use inputs::{input_text, primary_btn, secondary_btn};
pub use layers::{LayerRowResponse, LayerRowView, resize_handle};
pub use layout::{section_label, separator, vertical_separator};
pub use menu::{menu_item, menu_item_enabled, menu_separator, panel_frame, toolbar_frame};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small button size (icons, color swatches)
    pub const SMALL: f32 = 20.0;
    /// Minimum hit target on touch screens
    pub const TOUCH_TARGET: f32 = 44.0;
    /// Layer row height
    pub const ROW_HEIGHT: f32 = 26.0;
    /// Width of the panel resize grip
    pub const RESIZE_HANDLE_WIDTH: f32 = 6.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Panel corner radius in the compact layout
    pub const PANEL_RADIUS_COMPACT: u8 = 12;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(221, 221, 221);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(242, 242, 242, 242);
    /// Row of a selected shape (#E8F4FE)
    pub const ROW_SELECTED: Color32 = Color32::from_rgb(0xE8, 0xF4, 0xFE);
    /// Row inside a selected shape (#F3F9FE)
    pub const ROW_ANCESTOR_SELECTED: Color32 = Color32::from_rgb(0xF3, 0xF9, 0xFE);
    /// Row of a nested, unselected shape (#00000006)
    pub const ROW_NESTED: Color32 = Color32::from_black_alpha(6);
    /// Opacity of rows whose shape is hidden
    pub const HIDDEN_ROW_OPACITY: f32 = 0.5;
}
