//! Error types for the window core and the binary that assembles it.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::receipts::LoadError;
use crate::window::WindowId;

/// Failures raised by the window tree, the router and the draw pass.
#[derive(Debug, Error)]
pub enum WindowError {
    /// A draw call tried to write past the bounds of its window.
    #[error(
        "layout overflow in window {window}: {len} columns at ({row}, {col}) exceeds budget of {budget}"
    )]
    LayoutOverflow {
        window: WindowId,
        row: u16,
        col: u16,
        len: usize,
        budget: u16,
    },

    #[error("window {child} does not fit inside parent {parent}")]
    ChildOutsideParent { parent: WindowId, child: WindowId },

    #[error("no window with id {0}")]
    UnknownWindow(WindowId),

    /// The assembled tree or keymap disagrees with itself.
    #[error("focus invariant violated: {0}")]
    FocusInvariant(String),

    #[error("terminal i/o: {0}")]
    Io(#[from] io::Error),
}

/// Top level error for the `receipt-tui` binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
