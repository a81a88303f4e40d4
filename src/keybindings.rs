use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// A key pressed without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl From<&KeyEvent> for KeyCombo {
    fn from(key: &KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// What the router decides for a (key, focused window) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Keep focus; hand the key to the focused window.
    Stay,
    /// Move focus to another window.
    Transfer(WindowId),
    /// Stop the application loop.
    Terminate,
}

/// Declarative focus state machine: (key, focused window) -> [`Route`].
///
/// Pairs that are not in the table resolve to `None` and are ignored.
#[derive(Debug, Clone, Default)]
pub struct KeyRouter {
    table: HashMap<(KeyCombo, WindowId), Route>,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a binding, returning the route it replaced.
    pub fn bind(&mut self, combo: KeyCombo, source: WindowId, route: Route) -> Option<Route> {
        self.table.insert((combo, source), route)
    }

    pub fn stay(&mut self, combo: KeyCombo, source: WindowId) -> &mut Self {
        self.bind(combo, source, Route::Stay);
        self
    }

    pub fn transfer(&mut self, combo: KeyCombo, source: WindowId, target: WindowId) -> &mut Self {
        self.bind(combo, source, Route::Transfer(target));
        self
    }

    pub fn terminate(&mut self, combo: KeyCombo, source: WindowId) -> &mut Self {
        self.bind(combo, source, Route::Terminate);
        self
    }

    pub fn route(&self, key: &KeyEvent, source: WindowId) -> Option<Route> {
        self.table.get(&(KeyCombo::from(key), source)).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Every window id the table mentions, as a source or as a target.
    pub fn window_ids(&self) -> Vec<WindowId> {
        let mut ids: Vec<WindowId> = self
            .table
            .iter()
            .flat_map(|((_, source), route)| {
                let target = match route {
                    Route::Transfer(target) => Some(*target),
                    _ => None,
                };
                std::iter::once(*source).chain(target)
            })
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Bindings whose source is `window`, sorted by their display string.
    pub fn bindings_for(&self, window: WindowId) -> Vec<(KeyCombo, Route)> {
        let mut out: Vec<(KeyCombo, Route)> = self
            .table
            .iter()
            .filter(|((_, source), _)| *source == window)
            .map(|((combo, _), route)| (*combo, *route))
            .collect();
        out.sort_by_key(|(combo, _)| combo.display());
        out
    }
}
