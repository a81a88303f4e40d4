//! Shared component rendering context
//!
//! `ComponentContext` carries the window metadata a component may need while
//! rendering or handling keys, so the `Component` trait does not grow ad-hoc
//! boolean parameters.

use crate::window::WindowId;

/// Context passed to `Component` trait methods describing the owning window.
///
/// - `window`: id of the window the component lives in.
/// - `focused`: whether that window currently holds input focus.
/// - `modal`: whether that window is a modal prompt.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    window: WindowId,
    focused: bool,
    modal: bool,
}

impl ComponentContext {
    pub const fn new(window: WindowId, focused: bool) -> Self {
        Self {
            window,
            focused,
            modal: false,
        }
    }

    pub const fn window(&self) -> WindowId {
        self.window
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn modal(&self) -> bool {
        self.modal
    }

    /// Return a new `ComponentContext` with a modified `modal` flag.
    pub const fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }
}
