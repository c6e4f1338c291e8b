//! Editing session: wires the host editor, file actions, grid and panel.

use log::{debug, info, warn};
use murekkep_core::grid::GridStyle;
use murekkep_core::host::{HostEditor, ShapeId};
use murekkep_core::layers::{self, VisibilityToggler, collect_rows, display_name};
use murekkep_core::layout::LayoutClass;
use murekkep_core::settings::{GridConfigStore, GridSettingsForm, SessionConfig};
use murekkep_render::GridRenderer;

use crate::actions::{ActionOutcome, FileActions};
use crate::overlay::GridOverlay;
use crate::picker::FilePicker;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{RenameState, UiAction, UiState, render_ui};

/// One editor session over a host whiteboard.
///
/// Built once per editor and handed the picker it should use, so menus
/// and shortcuts reach the file actions without any shared globals.
pub struct EditorSession<H, P> {
    host: H,
    actions: FileActions<P>,
    grid: GridConfigStore,
    toggler: VisibilityToggler,
    renderer: GridRenderer,
    overlay: GridOverlay,
    ui_state: UiState,
}

impl<H: HostEditor, P: FilePicker> EditorSession<H, P> {
    pub fn new(host: H, picker: P, config: SessionConfig) -> Self {
        info!(
            "Editor session started (.{} documents, grid {:?})",
            config.document_extension, config.initial_grid.style
        );
        Self {
            actions: FileActions::new(picker, &config),
            grid: GridConfigStore::new(config.initial_grid.clone()),
            toggler: VisibilityToggler::new(),
            renderer: GridRenderer::new(),
            overlay: GridOverlay::new(),
            ui_state: UiState::new(&config),
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn grid(&self) -> &GridConfigStore {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridConfigStore {
        &mut self.grid
    }

    pub fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn actions(&self) -> &FileActions<P> {
        &self.actions
    }

    /// Run one UI frame: chrome, actions, then the grid overlay.
    pub fn frame(&mut self, ctx: &egui::Context) {
        let (width, touch) = ctx.input(|i| (i.content_rect().width(), i.any_touches()));
        let layout = LayoutClass::classify(width, 0, touch);
        if layout != self.ui_state.layout {
            debug!("Layout changed to {:?}", layout);
            self.ui_state.layout = layout;
        }

        let shortcut = ShortcutRegistry::consume(ctx);
        let rows = collect_rows(&self.host);
        let grid = self.grid.get();
        let ui_action = render_ui(ctx, &mut self.ui_state, &grid, &rows);

        if let Some(width) = self.ui_state.resize.frame_tick() {
            self.ui_state.panel_width = width;
        }

        for action in shortcut.into_iter().chain(ui_action) {
            self.handle_action(action);
        }

        self.redraw_grid();
        self.overlay.sync(ctx, &self.renderer);
        self.overlay.paint(ctx, ctx.input(|i| i.content_rect()));
    }

    /// Repaint the grid surface if anything it depends on changed.
    pub fn redraw_grid(&mut self) {
        let viewport = self.host.viewport_state();
        let config = self.grid.get();
        if let Err(e) = self.renderer.render(&viewport, &config, self.host.is_dark_mode()) {
            warn!("Grid redraw failed: {}", e);
        }
    }

    /// Apply a UI action. File actions return their outcome.
    pub fn handle_action(&mut self, action: UiAction) -> Option<ActionOutcome> {
        debug!("UI action: {:?}", action);
        match action {
            UiAction::Save => return Some(pollster::block_on(self.actions.save(&mut self.host))),
            UiAction::Open => {
                self.ui_state.renaming = None;
                return Some(pollster::block_on(self.actions.open(&mut self.host)));
            }
            UiAction::ExportPdf => {
                let grid = self.grid.get();
                return Some(pollster::block_on(self.actions.export_pdf(&mut self.host, &grid)));
            }
            UiAction::SetGridStyle(style) => self.set_grid_style(style),
            UiAction::OpenGridSettings => {
                self.ui_state.settings_form = Some(GridSettingsForm::from_config(&self.grid.get()));
                self.ui_state.settings_error = None;
            }
            UiAction::ApplyGridSettings(form) => self.apply_grid_settings(&form),
            UiAction::CloseGridSettings => {
                self.ui_state.settings_form = None;
                self.ui_state.settings_error = None;
            }
            UiAction::ToggleLayerPanel => {
                self.ui_state.panel_visible = !self.ui_state.panel_visible;
                if !self.ui_state.panel_visible {
                    self.ui_state.resize.end();
                    self.ui_state.renaming = None;
                }
            }
            UiAction::SelectShape { id, additive } => layers::click_row(&mut self.host, &id, additive),
            UiAction::ToggleVisibility(id) => {
                if let Err(e) = self.toggler.toggle(&mut self.host, &id) {
                    warn!("Visibility toggle ignored: {}", e);
                }
            }
            UiAction::BeginRename(id) => self.begin_rename(id),
            UiAction::Rename { id, name } => {
                if let Err(e) = layers::rename(&mut self.host, &id, &name) {
                    warn!("Rename ignored: {}", e);
                    self.ui_state.renaming = None;
                }
            }
            UiAction::FinishRename => self.ui_state.renaming = None,
        }
        None
    }

    fn set_grid_style(&mut self, style: GridStyle) {
        if self.grid.get().style != style {
            info!("Grid style: {}", style.name());
            self.grid.set_style(style);
        }
    }

    fn apply_grid_settings(&mut self, form: &GridSettingsForm) {
        match form.apply(&self.grid.get()) {
            Ok(config) => {
                info!("Grid settings applied: cell {} px, color {}", config.cell_size, config.line_color);
                self.grid.set(config);
                self.ui_state.settings_form = None;
                self.ui_state.settings_error = None;
            }
            Err(e) => {
                debug!("Grid settings rejected: {}", e);
                self.ui_state.settings_error = Some(e.to_string());
            }
        }
    }

    fn begin_rename(&mut self, id: ShapeId) {
        if self.host.shape(&id).is_none() {
            warn!("Rename ignored: shape {} not found", id);
            return;
        }
        let name = display_name(&self.host, &id);
        self.ui_state.renaming = Some(RenameState::new(id, name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::testing::DirPicker;
    use kurbo::{Rect, Size};
    use murekkep_core::grid::GridConfig;
    use murekkep_core::host::{MemoryHost, Severity};
    use tempfile::{TempDir, tempdir};

    fn session() -> (EditorSession<MemoryHost, DirPicker>, TempDir) {
        let dir = tempdir().unwrap();
        let picker = DirPicker::new(dir.path().to_path_buf());
        (EditorSession::new(MemoryHost::new(), picker, SessionConfig::default()), dir)
    }

    fn add_shape(session: &mut EditorSession<MemoryHost, DirPicker>, kind: &str) -> ShapeId {
        let page = session.host().current_page_id();
        session
            .host_mut()
            .add_shape(&page, kind, Rect::new(0.0, 0.0, 40.0, 40.0))
    }

    #[test]
    fn test_grid_style_switch() {
        let (mut session, _dir) = session();
        let revision = session.grid().revision();
        session.handle_action(UiAction::SetGridStyle(GridStyle::Ruled));
        assert_eq!(session.grid().get().style, GridStyle::Ruled);
        assert!(session.grid().revision() > revision);

        let revision = session.grid().revision();
        session.handle_action(UiAction::SetGridStyle(GridStyle::Ruled));
        assert_eq!(session.grid().revision(), revision);
    }

    #[test]
    fn test_grid_settings_all_or_nothing() {
        let (mut session, _dir) = session();
        session.handle_action(UiAction::OpenGridSettings);
        let mut form = session.ui_state().settings_form.clone().unwrap();

        form.cell_size = "abc".to_string();
        form.line_color = "#112233".to_string();
        session.handle_action(UiAction::ApplyGridSettings(form.clone()));
        assert_eq!(*session.grid().get(), GridConfig::default());
        assert!(session.ui_state().settings_form.is_some());
        assert!(session.ui_state().settings_error.is_some());

        form.cell_size = "25".to_string();
        session.handle_action(UiAction::ApplyGridSettings(form));
        let config = session.grid().get();
        assert!((config.cell_size - 25.0).abs() < f64::EPSILON);
        assert_eq!(config.line_color, "#112233");
        assert!(session.ui_state().settings_form.is_none());
    }

    #[test]
    fn test_close_grid_settings_keeps_config() {
        let (mut session, _dir) = session();
        session.handle_action(UiAction::OpenGridSettings);
        session.handle_action(UiAction::CloseGridSettings);
        assert!(session.ui_state().settings_form.is_none());
        assert_eq!(*session.grid().get(), GridConfig::default());
    }

    #[test]
    fn test_select_and_toggle_visibility() {
        let (mut session, _dir) = session();
        let a = add_shape(&mut session, "geo");
        let b = add_shape(&mut session, "text");

        session.handle_action(UiAction::SelectShape {
            id: a.clone(),
            additive: false,
        });
        session.handle_action(UiAction::SelectShape {
            id: b.clone(),
            additive: true,
        });
        assert_eq!(session.host().selected_ids(), vec![a.clone(), b.clone()]);

        session.handle_action(UiAction::ToggleVisibility(a.clone()));
        assert!(session.host().shape(&a).unwrap().meta.hidden);
    }

    #[test]
    fn test_rename_applies_live() {
        let (mut session, _dir) = session();
        let id = add_shape(&mut session, "geo");

        session.handle_action(UiAction::BeginRename(id.clone()));
        assert_eq!(session.ui_state().renaming.as_ref().unwrap().buffer, "Geo shape");

        session.handle_action(UiAction::Rename {
            id: id.clone(),
            name: "Title".to_string(),
        });
        assert_eq!(session.host().shape(&id).unwrap().meta.name.as_deref(), Some("Title"));
        assert!(session.ui_state().renaming.is_some());

        session.handle_action(UiAction::FinishRename);
        assert!(session.ui_state().renaming.is_none());
    }

    #[test]
    fn test_rename_unknown_shape_is_ignored() {
        let (mut session, _dir) = session();
        session.handle_action(UiAction::BeginRename(ShapeId::new("missing")));
        assert!(session.ui_state().renaming.is_none());
        session.handle_action(UiAction::Rename {
            id: ShapeId::new("missing"),
            name: "x".to_string(),
        });
        assert!(session.host().toasts().is_empty());
    }

    #[test]
    fn test_toggle_layer_panel() {
        let (mut session, _dir) = session();
        assert!(session.ui_state().panel_visible);
        session.handle_action(UiAction::ToggleLayerPanel);
        assert!(!session.ui_state().panel_visible);
    }

    #[test]
    fn test_save_action_writes_document() {
        let (mut session, dir) = session();
        add_shape(&mut session, "geo");
        let outcome = session.handle_action(UiAction::Save);
        assert!(matches!(outcome, Some(ActionOutcome::Completed { .. })));
        assert_eq!(session.actions().picker().files().len(), 1);
        assert!(dir.path().read_dir().unwrap().next().is_some());
        assert_eq!(session.host().toasts()[0].severity, Severity::Success);
    }

    #[test]
    fn test_export_uses_current_grid() {
        let (mut session, _dir) = session();
        session.handle_action(UiAction::SetGridStyle(GridStyle::None));
        let outcome = session.handle_action(UiAction::ExportPdf);
        assert!(matches!(outcome, Some(ActionOutcome::Completed { .. })));
        let files = session.actions().picker().files();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with(".pdf"));
    }

    #[test]
    fn test_redraw_follows_host_viewport() {
        let (mut session, _dir) = session();
        session.host_mut().set_screen_size(Size::new(80.0, 60.0));
        session.redraw_grid();
        let redraws = session.renderer().redraw_count();
        session.redraw_grid();
        assert_eq!(session.renderer().redraw_count(), redraws);

        session.host_mut().set_dark_mode(true);
        session.redraw_grid();
        assert_eq!(session.renderer().redraw_count(), redraws + 1);
    }

    #[test]
    fn test_frame_runs_headless() {
        let (mut session, _dir) = session();
        add_shape(&mut session, "frame");
        let ctx = egui::Context::default();
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| session.frame(ctx));
        }
        assert!(session.renderer().redraw_count() >= 1);
    }

    #[test]
    fn test_shortcut_triggers_save() {
        let (mut session, _dir) = session();
        let modifiers = egui::Modifiers::COMMAND;
        let input = egui::RawInput {
            modifiers,
            events: vec![egui::Event::Key {
                key: egui::Key::S,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        };
        let ctx = egui::Context::default();
        let _ = ctx.run(input, |ctx| session.frame(ctx));
        assert_eq!(session.actions().picker().files().len(), 1);
    }
}
