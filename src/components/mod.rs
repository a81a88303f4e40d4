use std::any::Any;

use crossterm::event::KeyEvent;

use crate::error::WindowError;
use crate::keybindings::Route;
use crate::ui::Canvas;

pub mod display;
pub mod prompt;
pub mod scrollable_list;

pub use crate::component_context::ComponentContext;
pub use display::{DetailSlot, DisplayPane};
pub use prompt::{ConfirmAction, PromptPane};
pub use scrollable_list::{ScrollDirection, ScrollableList, scroll_thumb, viewport_start};

/// Content drawn inside a window's frame.
///
/// `render` receives a canvas over the window's inner region. Key handling is
/// optional; returning `Ok(true)` means the key was consumed.
pub trait Component {
    fn render(&mut self, canvas: &mut Canvas<'_>, ctx: &ComponentContext) -> Result<(), WindowError>;

    fn handle_key(&mut self, _key: &KeyEvent, _ctx: &ComponentContext) -> Result<bool, WindowError> {
        Ok(false)
    }

    /// A route this component resolves `key` to on its own, ahead of the
    /// application's key router.
    fn key_route(&self, _key: &KeyEvent, _ctx: &ComponentContext) -> Option<Route> {
        None
    }

    /// Every route `key_route` can return, checked before the loop starts.
    fn routes(&self) -> Vec<Route> {
        Vec::new()
    }
}

/// Object-safe component with downcasting, as stored by `WindowNode`.
pub trait DynComponent: Component + Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component + Any> DynComponent for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
