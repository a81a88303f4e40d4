//! Shared crate-wide constants.

/// Column at which the root window's title starts.
pub const TITLE_OFFSET: u16 = 2;

/// Placeholder shown by list and detail windows with nothing to display.
pub const NO_DATA: &str = "No data present";

/// Rows moved by PageUp/PageDown before a list has been drawn once and knows
/// its real viewport height.
pub const DEFAULT_PAGE_ROWS: usize = 10;
