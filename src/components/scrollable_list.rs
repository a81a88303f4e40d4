use std::ops::Range;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use ratatui::symbols::{block, line};

use crate::components::{Component, ComponentContext};
use crate::constants::{DEFAULT_PAGE_ROWS, NO_DATA};
use crate::error::WindowError;
use crate::event::{DataChanged, EventHandler, SubscriptionId};
use crate::record::ListRow;
use crate::theme;
use crate::ui::{Canvas, display_width, pad_to_width, truncate_to_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// First visible row for a list of `len` items shown `height` rows at a time.
///
/// The viewport is centered on `cursor` and clamped to either end, so whenever
/// `len >= height` exactly `height` rows are visible and the cursor is one of
/// them.
pub fn viewport_start(len: usize, height: usize, cursor: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    cursor.saturating_sub(height / 2).min(len - height)
}

/// Rows of the scroll bar thumb for a viewport starting at `start`.
///
/// `None` when everything fits. The thumb is at least one row and touches
/// the bottom exactly when the viewport shows the last item.
pub fn scroll_thumb(len: usize, height: usize, start: usize) -> Option<Range<usize>> {
    if height == 0 || len <= height {
        return None;
    }
    let size = (height * height / len).max(1);
    let offset = start.min(len - height) * (height - size) / (len - height);
    Some(offset..offset + size)
}

/// A list window body with a cursor and a data-changed event.
///
/// `cursor` is `None` exactly when the list is empty. Every cursor change
/// fires the data-changed event with the new index; moves that hit either end
/// are no-ops and fire nothing.
pub struct ScrollableList<T> {
    items: Vec<T>,
    cursor: Option<usize>,
    data_changed: EventHandler<DataChanged>,
    page_rows: usize,
    scroll_bar: bool,
}

impl<T: ListRow> ScrollableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            data_changed: EventHandler::new(),
            page_rows: DEFAULT_PAGE_ROWS,
            scroll_bar: false,
        }
    }

    /// Reserve the last column for a scroll bar, drawn while the items
    /// overflow the window.
    pub fn with_scroll_bar(mut self) -> Self {
        self.scroll_bar = true;
        self
    }

    pub fn set_scroll_bar(&mut self, enabled: bool) {
        self.scroll_bar = enabled;
    }

    pub fn has_scroll_bar(&self) -> bool {
        self.scroll_bar
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Item under the cursor. `None` for an empty list.
    pub fn selected(&self) -> Option<&T> {
        self.cursor.and_then(|index| self.items.get(index))
    }

    pub fn on_data_changed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&DataChanged) -> Result<(), WindowError> + 'static,
    {
        self.data_changed.subscribe(callback)
    }

    /// Replace the items and reset the cursor to the first one.
    pub fn set_data(&mut self, items: Vec<T>) -> Result<(), WindowError> {
        self.cursor = if items.is_empty() { None } else { Some(0) };
        self.items = items;
        self.notify()
    }

    /// Replace the items, keeping the cursor where it was when still in range.
    pub fn set_data_keep_cursor(&mut self, items: Vec<T>) -> Result<(), WindowError> {
        self.cursor = match (self.cursor, items.len()) {
            (_, 0) => None,
            (Some(index), len) => Some(index.min(len - 1)),
            (None, _) => Some(0),
        };
        self.items = items;
        self.notify()
    }

    /// Move one row. Returns whether the cursor actually moved.
    pub fn move_cursor(&mut self, direction: ScrollDirection) -> Result<bool, WindowError> {
        match direction {
            ScrollDirection::Up => self.move_by(-1),
            ScrollDirection::Down => self.move_by(1),
        }
    }

    /// Move by `delta` rows, clamping at both ends without wrapping.
    pub fn move_by(&mut self, delta: isize) -> Result<bool, WindowError> {
        let Some(current) = self.cursor else {
            return Ok(false);
        };
        let last = self.items.len() - 1;
        let target = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize).min(last)
        };
        self.move_to(target)
    }

    pub fn jump_first(&mut self) -> Result<bool, WindowError> {
        if self.items.is_empty() {
            return Ok(false);
        }
        self.move_to(0)
    }

    pub fn jump_last(&mut self) -> Result<bool, WindowError> {
        if self.items.is_empty() {
            return Ok(false);
        }
        self.move_to(self.items.len() - 1)
    }

    /// Rows visible in a viewport of `height` rows.
    pub fn viewport(&self, height: usize) -> Range<usize> {
        let len = self.items.len();
        let start = viewport_start(len, height, self.cursor.unwrap_or(0));
        start..(start + height).min(len)
    }

    fn move_to(&mut self, target: usize) -> Result<bool, WindowError> {
        if self.cursor == Some(target) {
            return Ok(false);
        }
        self.cursor = Some(target);
        self.notify()?;
        Ok(true)
    }

    fn notify(&mut self) -> Result<(), WindowError> {
        match self.cursor {
            Some(index) => self.data_changed.fire(&DataChanged { index }),
            None => Ok(()),
        }
    }
}

impl<T: ListRow> Default for ScrollableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// `text` fitted into `width` columns with `suffix` right after it.
fn compose_row(text: &str, suffix: &str, width: usize) -> String {
    let suffix_width = display_width(suffix);
    if suffix_width >= width {
        return pad_to_width(&truncate_to_width(suffix, width), width);
    }
    let mut row = pad_to_width(text, width - suffix_width);
    row.push_str(suffix);
    row
}

impl<T: ListRow + 'static> Component for ScrollableList<T> {
    fn render(&mut self, canvas: &mut Canvas<'_>, ctx: &ComponentContext) -> Result<(), WindowError> {
        let height = canvas.height() as usize;
        let width = canvas.width() as usize;
        if height == 0 || width == 0 {
            return Ok(());
        }
        self.page_rows = height;
        if self.items.is_empty() {
            canvas.put_str_clipped(0, 0, NO_DATA, theme::dim());
            return Ok(());
        }

        let total = self.items.len();
        let viewport = self.viewport(height);
        let thumb = if self.scroll_bar && width > 1 {
            scroll_thumb(total, height, viewport.start)
        } else {
            None
        };
        let row_width = if thumb.is_some() { width - 1 } else { width };
        for (row, index) in viewport.enumerate() {
            let suffix = format!("({}/{})", index + 1, total);
            let line = compose_row(&self.items[index].list_row(), &suffix, row_width);
            let style = if Some(index) == self.cursor {
                if ctx.focused() {
                    theme::focused_highlight()
                } else {
                    theme::unfocused_highlight()
                }
            } else {
                Style::default()
            };
            canvas.put_str(row as u16, 0, &line, style)?;
        }

        if let Some(thumb) = thumb {
            let col = row_width as u16;
            for row in 0..height {
                let symbol = if thumb.contains(&row) { block::FULL } else { line::VERTICAL };
                canvas.put_str(row as u16, col, symbol, theme::scroll_bar())?;
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &ComponentContext) -> Result<bool, WindowError> {
        let page = self.page_rows.max(1) as isize;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(ScrollDirection::Up)?,
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(ScrollDirection::Down)?,
            KeyCode::PageUp => self.move_by(-page)?,
            KeyCode::PageDown => self.move_by(page)?,
            KeyCode::Home => self.jump_first()?,
            KeyCode::End => self.jump_last()?,
            _ => return Ok(false),
        };
        Ok(true)
    }
}
