//! Paper grid configuration and line layout.
//!
//! Line layout is a pure function of the visible page rectangle and the
//! grid configuration. Positions are produced in page space; callers map
//! them to device pixels through [`ViewportState`].

use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::viewport::ViewportState;

/// Every Nth grid line is drawn as a major line.
pub const MAJOR_LINE_INTERVAL: i64 = 10;

/// Default grid cell size in page units.
pub const DEFAULT_CELL_SIZE: f64 = 20.0;

/// Default grid line color.
pub const DEFAULT_LINE_COLOR: &str = "#e0e0e0";

/// Paper style drawn behind the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    /// Plain background.
    None,
    /// Squared paper: horizontal and vertical lines.
    #[default]
    Squared,
    /// Ruled paper: horizontal lines only.
    Ruled,
}

impl GridStyle {
    /// All styles in toolbar order.
    pub const ALL: [GridStyle; 3] = [GridStyle::None, GridStyle::Squared, GridStyle::Ruled];

    /// Display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "No grid",
            GridStyle::Squared => "Squared paper",
            GridStyle::Ruled => "Ruled paper",
        }
    }
}

/// Active grid style and its visual parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub style: GridStyle,
    /// CSS hex color string.
    pub line_color: String,
    pub minor_line_width: f64,
    pub major_line_width: f64,
    /// Distance between adjacent lines in page units. Must be positive.
    pub cell_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            style: GridStyle::Squared,
            line_color: DEFAULT_LINE_COLOR.to_string(),
            minor_line_width: 1.0,
            major_line_width: 2.0,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl GridConfig {
    /// Copy of this config with a different style.
    pub fn with_style(&self, style: GridStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }

    /// Parsed line color, if the stored string is a valid hex color.
    pub fn color(&self) -> Option<Rgba8> {
        Rgba8::parse_hex(&self.line_color)
    }

    /// Stroke width for a line.
    pub fn width_for(&self, line: &GridLine) -> f64 {
        if line.major {
            self.major_line_width
        } else {
            self.minor_line_width
        }
    }
}

/// Orientation of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Constant y, spans the full width.
    Horizontal,
    /// Constant x, spans the full height.
    Vertical,
}

/// A single grid line in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub axis: Axis,
    /// The x (vertical) or y (horizontal) page coordinate.
    pub page_position: f64,
    pub major: bool,
}

impl GridLine {
    /// Position of this line in device pixels.
    pub fn device_position(&self, viewport: &ViewportState) -> f64 {
        match self.axis {
            Axis::Horizontal => viewport.page_y_to_device(self.page_position),
            Axis::Vertical => viewport.page_x_to_device(self.page_position),
        }
    }
}

/// Compute the grid lines visible inside `page_bounds`.
///
/// Horizontal lines come first, ordered by increasing y, then vertical
/// lines by increasing x. Ruled paper yields only minor horizontal lines.
pub fn grid_lines(page_bounds: Rect, config: &GridConfig) -> Vec<GridLine> {
    match config.style {
        GridStyle::None => Vec::new(),
        GridStyle::Squared => {
            let mut lines = axis_lines(Axis::Horizontal, page_bounds.y0, page_bounds.y1, config.cell_size, true);
            lines.extend(axis_lines(Axis::Vertical, page_bounds.x0, page_bounds.x1, config.cell_size, true));
            lines
        }
        GridStyle::Ruled => axis_lines(Axis::Horizontal, page_bounds.y0, page_bounds.y1, config.cell_size, false),
    }
}

/// Lines at every multiple of `cell` inside `[min, max]`.
///
/// Lines are indexed by their multiple of `cell` so positions are exact
/// multiples and the major test is integer arithmetic.
fn axis_lines(axis: Axis, min: f64, max: f64, cell: f64, classify_major: bool) -> Vec<GridLine> {
    if !(cell.is_finite() && cell > 0.0) || !min.is_finite() || !max.is_finite() || max < min {
        return Vec::new();
    }

    let first = (min / cell).ceil() as i64;
    let last = (max / cell).floor() as i64;
    if last < first {
        return Vec::new();
    }

    (first..=last)
        .map(|index| GridLine {
            axis,
            page_position: index as f64 * cell,
            major: classify_major && index.rem_euclid(MAJOR_LINE_INTERVAL) == 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squared(cell: f64) -> GridConfig {
        GridConfig {
            cell_size: cell,
            ..GridConfig::default()
        }
    }

    fn is_multiple(value: f64, cell: f64) -> bool {
        let ratio = value / cell;
        (ratio - ratio.round()).abs() < 1e-9
    }

    #[test]
    fn test_default_config() {
        let config = GridConfig::default();
        assert_eq!(config.style, GridStyle::Squared);
        assert_eq!(config.line_color, "#e0e0e0");
        assert!((config.cell_size - 20.0).abs() < f64::EPSILON);
        assert!(config.color().is_some());
    }

    #[test]
    fn test_none_is_empty() {
        let config = GridConfig::default().with_style(GridStyle::None);
        assert!(grid_lines(Rect::new(-500.0, -500.0, 500.0, 500.0), &config).is_empty());
        let tiny = GridConfig { cell_size: 0.5, ..config };
        assert!(grid_lines(Rect::new(0.0, 0.0, 1e4, 1e4), &tiny).is_empty());
    }

    #[test]
    fn test_squared_lines_within_bounds_and_on_multiples() {
        let bounds = Rect::new(-37.5, 13.0, 412.25, 301.0);
        for cell in [7.0, 20.0, 33.3] {
            let lines = grid_lines(bounds, &squared(cell));
            assert!(!lines.is_empty());
            for line in &lines {
                let (lo, hi) = match line.axis {
                    Axis::Horizontal => (bounds.y0, bounds.y1),
                    Axis::Vertical => (bounds.x0, bounds.x1),
                };
                assert!(line.page_position >= lo - 1e-9 && line.page_position <= hi + 1e-9);
                assert!(is_multiple(line.page_position, cell));
            }
        }
    }

    #[test]
    fn test_squared_counts_are_inclusive() {
        let lines = grid_lines(Rect::new(0.0, 0.0, 100.0, 40.0), &squared(20.0));
        let horizontal = lines.iter().filter(|l| l.axis == Axis::Horizontal).count();
        let vertical = lines.iter().filter(|l| l.axis == Axis::Vertical).count();
        // 0, 20, 40 and 0..=100 step 20
        assert_eq!(horizontal, 3);
        assert_eq!(vertical, 6);
        assert_eq!(lines[0].axis, Axis::Horizontal);
        assert_eq!(lines.last().map(|l| l.axis), Some(Axis::Vertical));
    }

    #[test]
    fn test_major_classification() {
        let lines = grid_lines(Rect::new(-450.0, -450.0, 450.0, 450.0), &squared(20.0));
        for line in &lines {
            let expected = (line.page_position / 200.0).fract().abs() < 1e-9;
            assert_eq!(line.major, expected, "line at {}", line.page_position);
        }
        let horizontal: Vec<_> = lines.iter().filter(|l| l.axis == Axis::Horizontal).collect();
        for window in horizontal.windows(10) {
            assert!(window.iter().any(|l| l.major));
        }
        // Negative multiples are major as well
        assert!(lines.iter().any(|l| l.major && l.page_position < 0.0));
    }

    #[test]
    fn test_ruled_is_horizontal_minor_only() {
        let config = squared(25.0).with_style(GridStyle::Ruled);
        let lines = grid_lines(Rect::new(0.0, 0.0, 300.0, 300.0), &config);
        assert_eq!(lines.len(), 13);
        assert!(lines.iter().all(|l| l.axis == Axis::Horizontal && !l.major));
        for pair in lines.windows(2) {
            assert!((pair[1].page_position - pair[0].page_position - 25.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_bounds_are_empty() {
        assert!(grid_lines(Rect::new(0.0, 100.0, 100.0, 0.0), &squared(20.0))
            .iter()
            .all(|l| l.axis == Axis::Vertical));
        assert!(grid_lines(Rect::new(100.0, 100.0, 0.0, 0.0), &squared(20.0)).is_empty());
        // No multiple of the cell inside the span
        assert!(grid_lines(Rect::new(1.0, 1.0, 19.0, 19.0), &squared(20.0)).is_empty());
    }

    #[test]
    fn test_invalid_cell_size_is_empty() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(grid_lines(bounds, &squared(0.0)).is_empty());
        assert!(grid_lines(bounds, &squared(-20.0)).is_empty());
        assert!(grid_lines(bounds, &squared(f64::NAN)).is_empty());
    }

    #[test]
    fn test_device_position() {
        use crate::viewport::CameraState;
        use kurbo::{Size, Vec2};

        let vp = ViewportState::new(
            Size::new(200.0, 200.0),
            Rect::new(-50.0, -50.0, 150.0, 150.0),
            CameraState::new(Vec2::new(50.0, 50.0), 1.0),
            2.0,
        );
        let line = GridLine {
            axis: Axis::Vertical,
            page_position: 0.0,
            major: true,
        };
        assert!((line.device_position(&vp) - 100.0).abs() < 1e-10);
    }
}
