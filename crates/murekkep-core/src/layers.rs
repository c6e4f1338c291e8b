//! Shape tree model for the layer panel.
//!
//! The panel mirrors the host hierarchy: rows are produced at render time
//! by walking `sorted_child_ids` from the current page. Clicks, renames and
//! visibility toggles are written straight back through the host.

use std::collections::{HashMap, HashSet};

use web_time::{Duration, Instant};

use crate::host::{FRAME_KIND, HostEditor, HostResult, ShapeId, ShapeMeta, ShapeRecord, ShapeUpdate};

/// Two toggles on the same row closer than this force the shape visible.
pub const FORCE_SHOW_WINDOW: Duration = Duration::from_millis(200);

/// Name shown for ids the host no longer knows.
pub const UNKNOWN_SHAPE_NAME: &str = "Unknown shape";

/// Per-shape visibility override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Shown even if an ancestor is hidden.
    Visible,
    Hidden,
    /// Same as the parent; visible at the top level.
    Inherit,
}

impl Visibility {
    /// Resolve the override encoded in shape metadata.
    ///
    /// `force_show` wins over `hidden`.
    pub fn from_meta(meta: &ShapeMeta) -> Self {
        if meta.force_show {
            Visibility::Visible
        } else if meta.hidden {
            Visibility::Hidden
        } else {
            Visibility::Inherit
        }
    }

    /// Effective hidden state given whether the parent is hidden.
    pub fn resolve(self, parent_hidden: bool) -> bool {
        match self {
            Visibility::Visible => false,
            Visibility::Hidden => true,
            Visibility::Inherit => parent_hidden,
        }
    }
}

/// Display name: user name, then intrinsic text, then the type label.
pub fn display_name<H: HostEditor + ?Sized>(host: &H, id: &ShapeId) -> String {
    match host.shape(id) {
        Some(shape) => name_of(&shape),
        None => UNKNOWN_SHAPE_NAME.to_string(),
    }
}

fn name_of(shape: &ShapeRecord) -> String {
    if let Some(name) = shape.meta.name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    if let Some(text) = shape.text.as_deref().filter(|t| !t.is_empty()) {
        return text.to_string();
    }
    capitalize(&format!("{} shape", shape.kind))
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Row background emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHighlight {
    None,
    /// Any row below the top level.
    Nested,
    /// An ancestor of this row is selected.
    AncestorSelected,
    Selected,
}

/// One visible row of the shape tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRow {
    pub id: ShapeId,
    pub depth: usize,
    pub name: String,
    pub kind: String,
    pub highlight: RowHighlight,
    /// Effectively hidden (own flag or inherited); drawn dimmed.
    pub dimmed: bool,
    /// The shape's own `hidden` flag, shown on the eye toggle.
    pub hidden_flag: bool,
}

impl LayerRow {
    /// Left padding in logical pixels.
    pub fn indent(&self) -> f32 {
        10.0 + self.depth as f32 * 20.0
    }
}

/// Flatten the current page's shape tree into rows, depth first.
pub fn collect_rows<H: HostEditor + ?Sized>(host: &H) -> Vec<LayerRow> {
    let mut rows = Vec::new();
    let mut visited = HashSet::new();
    let selected: HashSet<ShapeId> = host.selected_ids().into_iter().collect();
    let roots = host.sorted_child_ids(&host.current_page_id());
    push_rows(host, &roots, 0, false, false, &selected, &mut visited, &mut rows);
    rows
}

#[allow(clippy::too_many_arguments)]
fn push_rows<H: HostEditor + ?Sized>(
    host: &H,
    ids: &[ShapeId],
    depth: usize,
    parent_selected: bool,
    parent_hidden: bool,
    selected: &HashSet<ShapeId>,
    visited: &mut HashSet<ShapeId>,
    rows: &mut Vec<LayerRow>,
) {
    for id in ids {
        if !visited.insert(id.clone()) {
            log::warn!("Shape {} reached twice while building the layer tree", id);
            continue;
        }
        let Some(shape) = host.shape(id) else {
            continue;
        };

        let is_selected = selected.contains(id);
        let hidden = Visibility::from_meta(&shape.meta).resolve(parent_hidden);
        let highlight = if is_selected {
            RowHighlight::Selected
        } else if parent_selected {
            RowHighlight::AncestorSelected
        } else if depth > 0 {
            RowHighlight::Nested
        } else {
            RowHighlight::None
        };

        rows.push(LayerRow {
            id: id.clone(),
            depth,
            name: name_of(&shape),
            kind: shape.kind.clone(),
            highlight,
            dimmed: hidden,
            hidden_flag: shape.meta.hidden,
        });

        let children = host.sorted_child_ids(id);
        if !children.is_empty() {
            push_rows(
                host,
                &children,
                depth + 1,
                parent_selected || is_selected,
                hidden,
                selected,
                visited,
                rows,
            );
        }
    }
}

/// Apply a row click to the host selection.
///
/// A plain click selects only this shape. With `additive` (Ctrl/Shift)
/// the shape's membership is toggled.
pub fn click_row<H: HostEditor + ?Sized>(host: &mut H, id: &ShapeId, additive: bool) {
    if host.shape(id).is_none() {
        return;
    }
    let next = if additive {
        let mut current = host.selected_ids();
        if let Some(pos) = current.iter().position(|s| s == id) {
            current.remove(pos);
        } else {
            current.push(id.clone());
        }
        current
    } else {
        vec![id.clone()]
    };
    host.set_selected_ids(next);
}

/// Rename a shape. Frames keep their name in their own property.
pub fn rename<H: HostEditor + ?Sized>(host: &mut H, id: &ShapeId, name: &str) -> HostResult<()> {
    let Some(shape) = host.shape(id) else {
        return Err(crate::host::HostError::ShapeNotFound(id.clone()));
    };
    let update = if shape.kind == FRAME_KIND {
        ShapeUpdate::FrameName(name.to_string())
    } else {
        ShapeUpdate::Meta(ShapeMeta {
            name: Some(name.to_string()),
            ..shape.meta
        })
    };
    host.update_shape(id, update)
}

/// What a visibility toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The plain `hidden` flag was flipped to this value.
    Flipped { hidden: bool },
    /// A quick second toggle forced the shape visible.
    ForcedVisible,
}

/// Visibility toggles with the quick double-toggle gesture.
///
/// Tracks the last toggle time per shape. A toggle within
/// [`FORCE_SHOW_WINDOW`] of the previous one on the same shape sets
/// `force_show` and clears `hidden`, then resets the timer. Otherwise the
/// `hidden` flag flips and `force_show` is cleared.
#[derive(Debug, Default)]
pub struct VisibilityToggler {
    last_toggle: HashMap<ShapeId, Instant>,
}

impl VisibilityToggler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle using the current time.
    pub fn toggle<H: HostEditor + ?Sized>(&mut self, host: &mut H, id: &ShapeId) -> HostResult<ToggleOutcome> {
        self.toggle_at(host, id, Instant::now())
    }

    /// Toggle as if it happened at `now`.
    pub fn toggle_at<H: HostEditor + ?Sized>(
        &mut self,
        host: &mut H,
        id: &ShapeId,
        now: Instant,
    ) -> HostResult<ToggleOutcome> {
        let Some(shape) = host.shape(id) else {
            return Err(crate::host::HostError::ShapeNotFound(id.clone()));
        };

        self.last_toggle
            .retain(|_, last| now.saturating_duration_since(*last) < FORCE_SHOW_WINDOW);
        let quick = self.last_toggle.contains_key(id);

        let (meta, outcome) = if quick {
            self.last_toggle.remove(id);
            (
                ShapeMeta {
                    hidden: false,
                    force_show: true,
                    ..shape.meta
                },
                ToggleOutcome::ForcedVisible,
            )
        } else {
            self.last_toggle.insert(id.clone(), now);
            let hidden = !shape.meta.hidden;
            (
                ShapeMeta {
                    hidden,
                    force_show: false,
                    ..shape.meta
                },
                ToggleOutcome::Flipped { hidden },
            )
        };

        host.update_shape(id, ShapeUpdate::Meta(meta))?;
        log::debug!("Visibility toggle on {}: {:?}", id, outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use kurbo::Rect;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    fn tree() -> (MemoryHost, ShapeId, ShapeId, ShapeId) {
        let mut host = MemoryHost::new();
        let page = host.current_page_id();
        let group = host.add_shape(&page, "group", rect());
        let child = host.add_shape(&group, "geo", rect());
        let sibling = host.add_shape(&page, "text", rect());
        (host, group, child, sibling)
    }

    fn set_meta(host: &mut MemoryHost, id: &ShapeId, hidden: bool, force_show: bool) {
        host.update_shape(
            id,
            ShapeUpdate::Meta(ShapeMeta {
                name: None,
                hidden,
                force_show,
            }),
        )
        .unwrap();
    }

    #[test]
    fn test_visibility_from_meta() {
        let mut meta = ShapeMeta::default();
        assert_eq!(Visibility::from_meta(&meta), Visibility::Inherit);
        meta.hidden = true;
        assert_eq!(Visibility::from_meta(&meta), Visibility::Hidden);
        meta.force_show = true;
        assert_eq!(Visibility::from_meta(&meta), Visibility::Visible);
    }

    #[test]
    fn test_hidden_is_inherited_unless_forced() {
        let (mut host, group, child, sibling) = tree();
        let dimmed = |host: &MemoryHost, id: &ShapeId| {
            collect_rows(host).into_iter().find(|r| &r.id == id).unwrap().dimmed
        };
        assert!(!dimmed(&host, &child));

        set_meta(&mut host, &group, true, false);
        assert!(dimmed(&host, &group));
        assert!(dimmed(&host, &child));
        assert!(!dimmed(&host, &sibling));

        set_meta(&mut host, &child, true, true);
        assert!(!dimmed(&host, &child));
        assert!(!Visibility::Inherit.resolve(false));
        assert!(Visibility::Inherit.resolve(true));
    }

    #[test]
    fn test_rows_depth_first_with_highlight() {
        let (mut host, group, child, sibling) = tree();
        host.set_selected_ids(vec![group.clone()]);
        let rows = collect_rows(&host);
        let ids: Vec<_> = rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![group, child, sibling]);
        assert_eq!(rows[0].highlight, RowHighlight::Selected);
        assert_eq!(rows[1].highlight, RowHighlight::AncestorSelected);
        assert_eq!(rows[1].depth, 1);
        assert!((rows[1].indent() - 30.0).abs() < f32::EPSILON);
        assert_eq!(rows[2].highlight, RowHighlight::None);
    }

    #[test]
    fn test_rows_nested_highlight_and_dimming() {
        let (mut host, group, _child, _) = tree();
        set_meta(&mut host, &group, true, false);
        let rows = collect_rows(&host);
        assert!(rows[0].dimmed && rows[0].hidden_flag);
        assert_eq!(rows[1].highlight, RowHighlight::Nested);
        assert!(rows[1].dimmed);
        assert!(!rows[1].hidden_flag);
        assert!(!rows[2].dimmed);
    }

    #[test]
    fn test_display_name_order() {
        let (mut host, group, child, sibling) = tree();
        assert_eq!(display_name(&host, &group), "Group shape");
        host.set_text(&sibling, Some("Hello"));
        assert_eq!(display_name(&host, &sibling), "Hello");
        rename(&mut host, &sibling, "Title").unwrap();
        assert_eq!(display_name(&host, &sibling), "Title");
        assert_eq!(display_name(&host, &ShapeId::new("shape:none")), UNKNOWN_SHAPE_NAME);
        let _ = child;
    }

    #[test]
    fn test_rename_frame_uses_props() {
        let mut host = MemoryHost::new();
        let page = host.current_page_id();
        let frame = host.add_shape(&page, FRAME_KIND, rect());
        rename(&mut host, &frame, "Board").unwrap();
        let shape = host.shape(&frame).unwrap();
        assert_eq!(shape.text.as_deref(), Some("Board"));
        assert_eq!(shape.meta.name, None);
    }

    #[test]
    fn test_click_replaces_or_toggles_selection() {
        let (mut host, group, child, sibling) = tree();
        click_row(&mut host, &group, false);
        assert_eq!(host.selected_ids(), vec![group.clone()]);
        click_row(&mut host, &sibling, true);
        assert_eq!(host.selected_ids(), vec![group.clone(), sibling.clone()]);
        click_row(&mut host, &group, true);
        assert_eq!(host.selected_ids(), vec![sibling]);
        click_row(&mut host, &child, false);
        assert_eq!(host.selected_ids(), vec![child]);
    }

    #[test]
    fn test_single_toggle_flips_hidden() {
        let (mut host, group, _, _) = tree();
        set_meta(&mut host, &group, false, true);
        let mut toggler = VisibilityToggler::new();
        let outcome = toggler.toggle_at(&mut host, &group, Instant::now()).unwrap();
        assert_eq!(outcome, ToggleOutcome::Flipped { hidden: true });
        let meta = host.shape(&group).unwrap().meta;
        assert!(meta.hidden);
        assert!(!meta.force_show);
    }

    #[test]
    fn test_quick_double_toggle_forces_show() {
        let (mut host, group, _, _) = tree();
        rename(&mut host, &group, "Keep me").unwrap();
        let mut toggler = VisibilityToggler::new();
        let start = Instant::now();
        toggler.toggle_at(&mut host, &group, start).unwrap();
        let outcome = toggler
            .toggle_at(&mut host, &group, start + Duration::from_millis(120))
            .unwrap();
        assert_eq!(outcome, ToggleOutcome::ForcedVisible);
        let meta = host.shape(&group).unwrap().meta;
        assert!(!meta.hidden);
        assert!(meta.force_show);
        assert_eq!(meta.name.as_deref(), Some("Keep me"));
    }

    #[test]
    fn test_slow_toggles_flip_twice() {
        let (mut host, group, _, _) = tree();
        let mut toggler = VisibilityToggler::new();
        let start = Instant::now();
        toggler.toggle_at(&mut host, &group, start).unwrap();
        let outcome = toggler
            .toggle_at(&mut host, &group, start + Duration::from_millis(450))
            .unwrap();
        assert_eq!(outcome, ToggleOutcome::Flipped { hidden: false });
    }

    #[test]
    fn test_toggle_windows_are_per_shape() {
        let (mut host, group, _, sibling) = tree();
        let mut toggler = VisibilityToggler::new();
        let start = Instant::now();
        toggler.toggle_at(&mut host, &group, start).unwrap();
        let outcome = toggler
            .toggle_at(&mut host, &sibling, start + Duration::from_millis(50))
            .unwrap();
        assert_eq!(outcome, ToggleOutcome::Flipped { hidden: true });
    }

    #[test]
    fn test_third_quick_toggle_starts_over() {
        let (mut host, group, _, _) = tree();
        let mut toggler = VisibilityToggler::new();
        let start = Instant::now();
        toggler.toggle_at(&mut host, &group, start).unwrap();
        toggler.toggle_at(&mut host, &group, start + Duration::from_millis(100)).unwrap();
        let outcome = toggler
            .toggle_at(&mut host, &group, start + Duration::from_millis(150))
            .unwrap();
        assert_eq!(outcome, ToggleOutcome::Flipped { hidden: true });
    }

    #[test]
    fn test_stale_toggle_times_are_dropped() {
        let mut host = MemoryHost::new();
        let page = host.current_page_id();
        let mut toggler = VisibilityToggler::new();
        let start = Instant::now();
        for i in 0..50u64 {
            let id = host.add_shape(&page, "geo", rect());
            toggler
                .toggle_at(&mut host, &id, start + Duration::from_millis(i * 300))
                .unwrap();
        }
        assert_eq!(toggler.last_toggle.len(), 1);
    }
}
