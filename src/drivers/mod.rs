pub mod console;
pub mod keyboard;
pub mod scripted;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use std::io;

use crate::error::WindowError;
use crate::ui::RenderTarget;

/// Blocking source of key presses.
pub trait InputDriver {
    /// Block until the next key press is available.
    fn next_key(&mut self) -> io::Result<KeyEvent>;
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        (**self).next_key()
    }
}

/// Terminal surface the window tree is drawn onto.
pub trait OutputDriver {
    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    /// Full drawable area.
    fn area(&self) -> io::Result<Rect>;

    /// Run one frame. `f` draws into the frame's render target; its error
    /// aborts the frame and is returned.
    fn draw<F>(&mut self, f: F) -> Result<(), WindowError>
    where
        F: FnOnce(&mut dyn RenderTarget) -> Result<(), WindowError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    struct Dummy;
    impl InputDriver for Dummy {
        fn next_key(&mut self) -> io::Result<KeyEvent> {
            Ok(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
        }
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut d = Dummy;
        let mut r = &mut d;
        let key = InputDriver::next_key(&mut r).unwrap();
        assert_eq!(key.code, KeyCode::Char('x'));
    }
}
