use std::io;

use crossterm::event::KeyEvent;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// The blocking key loop that drives the UI thread.
///
/// Every key read from the driver is handed to the handler, which routes it
/// and redraws. All state changes a key causes, including the subscribers it
/// fires, have settled by the time the handler returns, so the next key
/// always observes a consistent tree.
pub struct EventLoop<D> {
    driver: D,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run until the handler returns [`ControlFlow::Quit`] or fails.
    ///
    /// A read error from the driver ends the loop with that error.
    pub fn run<F, E>(&mut self, mut handler: F) -> Result<(), E>
    where
        F: FnMut(KeyEvent) -> Result<ControlFlow, E>,
        E: From<io::Error>,
    {
        loop {
            let key = self.driver.next_key()?;
            if let ControlFlow::Quit = handler(key)? {
                return Ok(());
            }
        }
    }
}
