//! Session configuration and the grid configuration store.

use std::rc::Rc;

use thiserror::Error;

use crate::color::Rgba8;
use crate::grid::{GridConfig, GridStyle};

/// Default layer panel width in logical pixels.
pub const DEFAULT_PANEL_WIDTH: f32 = 200.0;

/// Static configuration for an editing session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Extension of the native document format, without the dot.
    pub document_extension: String,
    /// Prefix for suggested file names.
    pub file_name_prefix: String,
    /// Title shown above the shape tree.
    pub panel_title: String,
    pub initial_panel_width: f32,
    pub panel_visible: bool,
    pub initial_grid: GridConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            document_extension: "sdm".to_string(),
            file_name_prefix: "dijital-murekkep".to_string(),
            panel_title: "Shapes".to_string(),
            initial_panel_width: DEFAULT_PANEL_WIDTH,
            panel_visible: true,
            initial_grid: GridConfig::default(),
        }
    }
}

/// Holds the active grid configuration for the session.
///
/// `get` hands out an immutable snapshot. A render pass or export keeps
/// its snapshot even if `set` replaces the configuration meanwhile.
#[derive(Debug, Clone)]
pub struct GridConfigStore {
    current: Rc<GridConfig>,
    revision: u64,
}

impl Default for GridConfigStore {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridConfigStore {
    pub fn new(config: GridConfig) -> Self {
        Self {
            current: Rc::new(config),
            revision: 0,
        }
    }

    /// Snapshot of the current configuration.
    pub fn get(&self) -> Rc<GridConfig> {
        Rc::clone(&self.current)
    }

    /// Replace the whole configuration.
    pub fn set(&mut self, next: GridConfig) {
        if *self.current == next {
            return;
        }
        log::debug!("Grid configuration changed: {:?}", next);
        self.current = Rc::new(next);
        self.revision += 1;
    }

    /// Switch style, keeping the other parameters.
    pub fn set_style(&mut self, style: GridStyle) {
        let next = self.current.with_style(style);
        self.set(next);
    }

    /// Incremented on every effective change.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Validation errors for the grid settings form.
#[derive(Debug, Error, PartialEq)]
pub enum GridConfigError {
    #[error("Missing value for {0}")]
    Missing(&'static str),
    #[error("Invalid cell size: {0}")]
    CellSize(String),
    #[error("Invalid line width for {field}: {value}")]
    LineWidth { field: &'static str, value: String },
    #[error("Invalid color: {0}")]
    Color(String),
}

/// Editable text fields for the grid settings prompt.
///
/// All four values are required together; a missing or invalid field
/// discards the whole edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSettingsForm {
    pub cell_size: String,
    pub minor_line_width: String,
    pub line_color: String,
    pub major_line_width: String,
}

impl GridSettingsForm {
    /// Pre-fill the form from a configuration.
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            cell_size: format!("{}", config.cell_size),
            minor_line_width: format!("{}", config.minor_line_width),
            line_color: config.line_color.clone(),
            major_line_width: format!("{}", config.major_line_width),
        }
    }

    /// Build the next configuration from `base` and the form values.
    pub fn apply(&self, base: &GridConfig) -> Result<GridConfig, GridConfigError> {
        let cell_size = required(&self.cell_size, "cell size")?;
        let minor = required(&self.minor_line_width, "line width")?;
        let color = required(&self.line_color, "line color")?;
        let major = required(&self.major_line_width, "major line width")?;

        // Cell sizes are whole page units.
        let cell_size = cell_size
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| GridConfigError::CellSize(cell_size.to_string()))?;

        Ok(GridConfig {
            style: base.style,
            line_color: Rgba8::parse_hex(color)
                .map(|_| color.to_string())
                .ok_or_else(|| GridConfigError::Color(color.to_string()))?,
            minor_line_width: line_width(minor, "line width")?,
            major_line_width: line_width(major, "major line width")?,
            cell_size: f64::from(cell_size),
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, GridConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(GridConfigError::Missing(field))
    } else {
        Ok(trimmed)
    }
}

fn line_width(value: &str, field: &'static str) -> Result<f64, GridConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| GridConfigError::LineWidth {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_snapshot_survives_set() {
        let mut store = GridConfigStore::default();
        let before = store.get();
        store.set_style(GridStyle::Ruled);
        assert_eq!(before.style, GridStyle::Squared);
        assert_eq!(store.get().style, GridStyle::Ruled);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_store_ignores_identical_set() {
        let mut store = GridConfigStore::default();
        store.set(GridConfig::default());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_form_roundtrip_from_defaults() {
        let base = GridConfig::default();
        let form = GridSettingsForm::from_config(&base);
        assert_eq!(form.cell_size, "20");
        assert_eq!(form.apply(&base), Ok(base));
    }

    #[test]
    fn test_form_applies_all_fields() {
        let base = GridConfig::default().with_style(GridStyle::Ruled);
        let form = GridSettingsForm {
            cell_size: " 32 ".into(),
            minor_line_width: "0.5".into(),
            line_color: "#336699".into(),
            major_line_width: "3".into(),
        };
        let next = form.apply(&base).unwrap();
        assert_eq!(next.style, GridStyle::Ruled);
        assert!((next.cell_size - 32.0).abs() < f64::EPSILON);
        assert!((next.minor_line_width - 0.5).abs() < f64::EPSILON);
        assert!((next.major_line_width - 3.0).abs() < f64::EPSILON);
        assert_eq!(next.line_color, "#336699");
    }

    #[test]
    fn test_form_missing_field_discards_edit() {
        let base = GridConfig::default();
        let mut form = GridSettingsForm::from_config(&base);
        form.major_line_width.clear();
        assert_eq!(form.apply(&base), Err(GridConfigError::Missing("major line width")));
    }

    #[test]
    fn test_form_rejects_invalid_values() {
        let base = GridConfig::default();
        let mut form = GridSettingsForm::from_config(&base);
        form.cell_size = "0".into();
        assert!(matches!(form.apply(&base), Err(GridConfigError::CellSize(_))));

        let mut form = GridSettingsForm::from_config(&base);
        form.minor_line_width = "-1".into();
        assert!(matches!(form.apply(&base), Err(GridConfigError::LineWidth { .. })));

        let mut form = GridSettingsForm::from_config(&base);
        form.line_color = "grey".into();
        assert!(matches!(form.apply(&base), Err(GridConfigError::Color(_))));
    }

    #[test]
    fn test_session_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.document_extension, "sdm");
        assert!((config.initial_panel_width - 200.0).abs() < f32::EPSILON);
        assert!(config.panel_visible);
    }
}
