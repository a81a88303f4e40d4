//! Drawing surface abstraction and the window-local `Canvas`.
//!
//! The window core never writes to the terminal directly. It draws through a
//! [`RenderTarget`], which is implemented for `ratatui::buffer::Buffer` (the
//! frame buffer behind the real terminal) and for [`RecordingSurface`], a test
//! double that records every primitive call.
//!
//! A [`Canvas`] scopes a target to one window's rectangle. Its strict
//! [`Canvas::put_str`] refuses to write past the window edge and reports
//! [`WindowError::LayoutOverflow`] instead, so a misbehaving window cannot
//! scribble over its neighbours. [`Canvas::put_str_clipped`] is the explicit
//! opt-in for text that may be truncated.
use std::borrow::Cow;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::line;
use unicode_width::UnicodeWidthChar;

use crate::error::WindowError;
use crate::window::WindowId;

/// Primitive operations the window core needs from a terminal surface.
///
/// Coordinates are absolute cells. Implementations may assume callers stay
/// within [`RenderTarget::area`]; `Canvas` enforces that.
pub trait RenderTarget {
    fn area(&self) -> Rect;
    fn clear(&mut self, area: Rect);
    fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style);
    fn hline(&mut self, x: u16, y: u16, len: u16, symbol: &str, style: Style);
    fn vline(&mut self, x: u16, y: u16, len: u16, symbol: &str, style: Style);
}

impl RenderTarget for Buffer {
    fn area(&self) -> Rect {
        self.area
    }

    fn clear(&mut self, area: Rect) {
        let area = area.intersection(self.area);
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                if let Some(cell) = self.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
    }

    fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        self.set_string(x, y, text, style);
    }

    fn hline(&mut self, x: u16, y: u16, len: u16, symbol: &str, style: Style) {
        for dx in 0..len {
            if let Some(cell) = self.cell_mut((x.saturating_add(dx), y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }

    fn vline(&mut self, x: u16, y: u16, len: u16, symbol: &str, style: Style) {
        for dy in 0..len {
            if let Some(cell) = self.cell_mut((x, y.saturating_add(dy))) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}

/// One primitive call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Clear(Rect),
    Text {
        x: u16,
        y: u16,
        text: String,
        style: Style,
    },
    HLine {
        x: u16,
        y: u16,
        len: u16,
        symbol: String,
    },
    VLine {
        x: u16,
        y: u16,
        len: u16,
        symbol: String,
    },
}

/// Render target that records writes instead of painting a screen.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    area: Rect,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Text writes only, in call order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderTarget for RecordingSurface {
    fn area(&self) -> Rect {
        self.area
    }

    fn clear(&mut self, area: Rect) {
        self.ops.push(SurfaceOp::Clear(area));
    }

    fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        self.ops.push(SurfaceOp::Text {
            x,
            y,
            text: text.to_string(),
            style,
        });
    }

    fn hline(&mut self, x: u16, y: u16, len: u16, symbol: &str, _style: Style) {
        self.ops.push(SurfaceOp::HLine {
            x,
            y,
            len,
            symbol: symbol.to_string(),
        });
    }

    fn vline(&mut self, x: u16, y: u16, len: u16, symbol: &str, _style: Style) {
        self.ops.push(SurfaceOp::VLine {
            x,
            y,
            len,
            symbol: symbol.to_string(),
        });
    }
}

/// A render target scoped to one window's rectangle.
///
/// Rows and columns passed to a canvas are relative to its own origin.
pub struct Canvas<'a> {
    target: &'a mut dyn RenderTarget,
    area: Rect,
    window: WindowId,
}

impl<'a> Canvas<'a> {
    pub fn new(target: &'a mut dyn RenderTarget, area: Rect, window: WindowId) -> Self {
        let area = area.intersection(target.area());
        Self {
            target,
            area,
            window,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn width(&self) -> u16 {
        self.area.width
    }

    pub fn height(&self) -> u16 {
        self.area.height
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Borrow a canvas over the region inset by `margin` cells on every side.
    pub fn inset(&mut self, margin: u16) -> Canvas<'_> {
        let double = margin.saturating_mul(2);
        let area = Rect {
            x: self.area.x.saturating_add(margin),
            y: self.area.y.saturating_add(margin),
            width: self.area.width.saturating_sub(double),
            height: self.area.height.saturating_sub(double),
        };
        Canvas {
            target: &mut *self.target,
            area,
            window: self.window,
        }
    }

    pub fn clear(&mut self) {
        self.target.clear(self.area);
    }

    /// Write `text` at (`row`, `col`), failing if any of it would land outside
    /// the canvas.
    pub fn put_str(&mut self, row: u16, col: u16, text: &str, style: Style) -> Result<(), WindowError> {
        let len = display_width(text);
        let budget = self.area.width.saturating_sub(col);
        if row >= self.area.height || col > self.area.width || len > budget as usize {
            return Err(WindowError::LayoutOverflow {
                window: self.window,
                row,
                col,
                len,
                budget,
            });
        }
        if len > 0 {
            let text = printable(text);
            self.target
                .put_str(self.area.x + col, self.area.y + row, &text, style);
        }
        Ok(())
    }

    /// Write `text` at (`row`, `col`), truncating whatever does not fit.
    pub fn put_str_clipped(&mut self, row: u16, col: u16, text: &str, style: Style) {
        if row >= self.area.height || col >= self.area.width {
            return;
        }
        let available = (self.area.width - col) as usize;
        let text = truncate_to_width(&printable(text), available);
        if !text.is_empty() {
            self.target
                .put_str(self.area.x + col, self.area.y + row, &text, style);
        }
    }

    /// Box-drawing border along the canvas edge. Too-small canvases are left alone.
    pub fn draw_border(&mut self, style: Style) {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.area;
        if width < 2 || height < 2 {
            return;
        }
        let right = x + width - 1;
        let bottom = y + height - 1;
        self.target
            .hline(x + 1, y, width - 2, line::HORIZONTAL, style);
        self.target
            .hline(x + 1, bottom, width - 2, line::HORIZONTAL, style);
        self.target
            .vline(x, y + 1, height - 2, line::VERTICAL, style);
        self.target
            .vline(right, y + 1, height - 2, line::VERTICAL, style);
        self.target.put_str(x, y, line::TOP_LEFT, style);
        self.target.put_str(right, y, line::TOP_RIGHT, style);
        self.target.put_str(x, bottom, line::BOTTOM_LEFT, style);
        self.target.put_str(right, bottom, line::BOTTOM_RIGHT, style);
    }
}

/// Columns one character occupies. Control characters are drawn as a single
/// blank cell (see [`printable`]), so they count as one column.
pub fn char_width(ch: char) -> usize {
    if ch.is_control() {
        1
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Terminal column width of `value`.
pub fn display_width(value: &str) -> usize {
    value.chars().map(char_width).sum()
}

/// `value` with every control character replaced by a space.
pub fn printable(value: &str) -> Cow<'_, str> {
    if value.chars().any(char::is_control) {
        Cow::Owned(
            value
                .chars()
                .map(|ch| if ch.is_control() { ' ' } else { ch })
                .collect(),
        )
    } else {
        Cow::Borrowed(value)
    }
}

/// Longest prefix of `value` that fits in `width` columns.
pub fn truncate_to_width(value: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in value.chars() {
        let w = char_width(ch);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// `value` truncated and then right-padded with spaces to exactly `width` columns.
pub fn pad_to_width(value: &str, width: usize) -> String {
    let mut out = truncate_to_width(value, width);
    let used = display_width(&out);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}
