//! Keyboard shortcut registry.

use egui::{Context, Key, KeyboardShortcut, Modifiers};

use crate::ui::UiAction;

/// A keyboard shortcut bound to a UI action.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: Key,
    /// Ctrl on Windows/Linux, Cmd on macOS.
    pub command: bool,
    pub shift: bool,
    pub action: UiAction,
    pub description: &'static str,
}

impl Shortcut {
    pub fn new(key: Key, command: bool, shift: bool, action: UiAction, description: &'static str) -> Self {
        Self {
            key,
            command,
            shift,
            action,
            description,
        }
    }

    /// Format for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key.name());
        parts.join("+")
    }

    fn keyboard_shortcut(&self) -> KeyboardShortcut {
        let mut modifiers = Modifiers::NONE;
        if self.command {
            modifiers = modifiers | Modifiers::COMMAND;
        }
        if self.shift {
            modifiers = modifiers | Modifiers::SHIFT;
        }
        KeyboardShortcut::new(modifiers, self.key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// All registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new(Key::S, true, false, UiAction::Save, "Save document"),
            Shortcut::new(Key::O, true, false, UiAction::Open, "Open document"),
        ]
    }

    /// Display string for the shortcut bound to `action`, or empty.
    pub fn label_for(action: &UiAction) -> String {
        Self::all()
            .into_iter()
            .find(|s| &s.action == action)
            .map(|s| s.format())
            .unwrap_or_default()
    }

    /// Consume the first pressed shortcut this frame.
    pub fn consume(ctx: &Context) -> Option<UiAction> {
        let shortcuts = Self::all();
        ctx.input_mut(|input| {
            shortcuts
                .iter()
                .find(|s| input.consume_shortcut(&s.keyboard_shortcut()))
                .map(|s| s.action.clone())
        })
    }
}
