mod tree;

use std::fmt;

use crossterm::event::KeyEvent;
use ratatui::prelude::Rect;

use crate::components::{Component, ComponentContext, DynComponent};
use crate::constants::TITLE_OFFSET;
use crate::error::WindowError;
use crate::keybindings::{KeyCombo, Route};
use crate::theme;
use crate::ui::{Canvas, RenderTarget, display_width, truncate_to_width};

pub use tree::WindowTree;

/// Stable identifier of a window. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing [`WindowId`]s.
///
/// Owned by whoever assembles the tree (normally the `Application`) and
/// passed to [`WindowNode::new`].
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> WindowId {
        let id = WindowId(self.next);
        self.next += 1;
        id
    }
}

/// A rectangular terminal region in the window tree.
///
/// The outer rectangle includes the one-cell frame; content is drawn in
/// [`WindowNode::inner`]. Children are stored in the owning [`WindowTree`] and
/// referenced here by id.
pub struct WindowNode {
    id: WindowId,
    area: Rect,
    title: Option<String>,
    border: bool,
    visible: bool,
    focused: bool,
    modal: bool,
    parent: Option<WindowId>,
    children: Vec<WindowId>,
    claimed_keys: Vec<KeyCombo>,
    content: Option<Box<dyn DynComponent>>,
}

impl WindowNode {
    pub fn new(ids: &mut IdAllocator, area: Rect) -> Self {
        Self {
            id: ids.allocate(),
            area,
            title: None,
            border: false,
            visible: true,
            focused: false,
            modal: false,
            parent: None,
            children: Vec::new(),
            claimed_keys: Vec::new(),
            content: None,
        }
    }

    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn with_content<C: Component + 'static>(mut self, content: C) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    /// Mark this window as a modal prompt: hidden until it receives focus.
    pub fn modal(mut self) -> Self {
        self.modal = true;
        self.visible = false;
        self
    }

    /// Route `combo` straight to this window's component, bypassing the router.
    pub fn with_claimed_key(mut self, combo: KeyCombo) -> Self {
        self.claimed_keys.push(combo);
        self
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Content region: the outer rectangle minus the one-cell frame.
    pub fn inner(&self) -> Rect {
        Rect {
            x: self.area.x.saturating_add(1),
            y: self.area.y.saturating_add(1),
            width: self.area.width.saturating_sub(2),
            height: self.area.height.saturating_sub(2),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title<T: Into<String>>(&mut self, title: T) {
        self.title = Some(title.into());
    }

    pub fn border(&self) -> bool {
        self.border
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Toggle this window's focus flag only. Siblings are not touched; the
    /// caller performing a focus transfer clears the previous window first.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_modal(&self) -> bool {
        self.modal
    }

    pub fn parent(&self) -> Option<WindowId> {
        self.parent
    }

    pub fn children(&self) -> &[WindowId] {
        &self.children
    }

    pub fn claims(&self, key: &KeyEvent) -> bool {
        self.claimed_keys.iter().any(|combo| combo.matches(key))
    }

    pub fn context(&self) -> ComponentContext {
        ComponentContext::new(self.id, self.focused).with_modal(self.modal)
    }

    pub fn content(&self) -> Option<&dyn DynComponent> {
        self.content.as_deref()
    }

    pub fn content_mut(&mut self) -> Option<&mut (dyn DynComponent + 'static)> {
        self.content.as_deref_mut()
    }

    /// Forward a key to this window's component. Returns whether it was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Result<bool, WindowError> {
        let ctx = self.context();
        match self.content.as_mut() {
            Some(content) => content.handle_key(key, &ctx),
            None => Ok(false),
        }
    }

    /// The route this window's component resolves `key` to, if any.
    pub fn key_route(&self, key: &KeyEvent) -> Option<Route> {
        let ctx = self.context();
        self.content.as_ref().and_then(|content| content.key_route(key, &ctx))
    }

    /// Clear the region, then draw frame, title and content. Children are drawn
    /// by the tree afterwards.
    pub(crate) fn draw_self(&mut self, target: &mut dyn RenderTarget) -> Result<(), WindowError> {
        let ctx = self.context();
        let mut canvas = Canvas::new(target, self.area, self.id);
        canvas.clear();
        if self.border {
            canvas.draw_border(theme::border(self.focused));
        }
        self.draw_title(&mut canvas)?;
        if self.parent.is_none() {
            self.draw_dimensions(&mut canvas)?;
        }
        if let Some(content) = self.content.as_mut() {
            let mut inner = canvas.inset(1);
            content.render(&mut inner, &ctx)?;
        }
        Ok(())
    }

    fn draw_title(&self, canvas: &mut Canvas<'_>) -> Result<(), WindowError> {
        let Some(title) = self.title.as_deref() else {
            return Ok(());
        };
        let width = canvas.width();
        let text = truncate_to_width(title, (width / 2) as usize);
        let len = display_width(&text) as u16;
        if len == 0 {
            return Ok(());
        }
        // nested titles hug the right edge, the root's sits on the left
        let col = if self.parent.is_some() {
            width.saturating_sub(len + 1)
        } else {
            TITLE_OFFSET
        };
        if self.parent.is_none() && col + len > width {
            return Ok(());
        }
        canvas.put_str(0, col, &text, theme::title(self.focused))
    }

    fn draw_dimensions(&self, canvas: &mut Canvas<'_>) -> Result<(), WindowError> {
        let label = format!("{}, {}", self.area.width, self.area.height);
        let len = display_width(&label) as u16;
        let (width, height) = (canvas.width(), canvas.height());
        if height == 0 || len + 1 > width {
            return Ok(());
        }
        canvas.put_str(height - 1, width - len - 1, &label, theme::dim())
    }
}

impl fmt::Debug for WindowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowNode")
            .field("id", &self.id)
            .field("area", &self.area)
            .field("title", &self.title)
            .field("border", &self.border)
            .field("visible", &self.visible)
            .field("focused", &self.focused)
            .field("modal", &self.modal)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn rect(x: u16, y: u16, width: u16, height: u16) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn ids_are_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(b > a);
        assert_eq!(b.raw(), a.raw() + 1);
    }

    #[test]
    fn inner_subtracts_frame() {
        let mut ids = IdAllocator::new();
        let node = WindowNode::new(&mut ids, rect(2, 3, 10, 5));
        assert_eq!(node.inner(), rect(3, 4, 8, 3));
    }

    #[test]
    fn modal_windows_start_hidden() {
        let mut ids = IdAllocator::new();
        let node = WindowNode::new(&mut ids, rect(0, 0, 4, 4)).modal();
        assert!(node.is_modal());
        assert!(!node.is_visible());
    }

    #[test]
    fn root_title_is_left_aligned_and_truncated_to_half_width() {
        let mut ids = IdAllocator::new();
        let mut node = WindowNode::new(&mut ids, rect(0, 0, 20, 3)).with_title("abcdefghijklmnop");
        let mut buf = Buffer::empty(rect(0, 0, 20, 3));
        node.draw_self(&mut buf).unwrap();
        assert_eq!(row_text(&buf, 0), "  abcdefghij        ");
        assert_eq!(row_text(&buf, 2), "              20, 3 ");
    }

    #[test]
    fn nested_title_is_right_aligned_and_truncated_to_half_width() {
        let mut ids = IdAllocator::new();
        let root = WindowNode::new(&mut ids, rect(0, 0, 30, 6));
        let mut tree = WindowTree::new(root);
        let long = WindowNode::new(&mut ids, rect(0, 0, 20, 3)).with_title("abcdefghijklmnop");
        let short = WindowNode::new(&mut ids, rect(0, 3, 20, 3)).with_title("ab");
        tree.add_child(tree.root(), long).unwrap();
        tree.add_child(tree.root(), short).unwrap();

        let mut buf = Buffer::empty(rect(0, 0, 30, 6));
        tree.draw(&mut buf).unwrap();
        // both titles end at column width - 2, just before the corner
        let expected = format!("┌{}abcdefghij┐{}", "─".repeat(8), " ".repeat(10));
        assert_eq!(row_text(&buf, 0), expected);
        let expected = format!("┌{}ab┐{}", "─".repeat(16), " ".repeat(10));
        assert_eq!(row_text(&buf, 3), expected);
    }

    #[test]
    fn claimed_keys_match_exact_combo() {
        use crossterm::event::{KeyCode, KeyModifiers};
        let mut ids = IdAllocator::new();
        let node = WindowNode::new(&mut ids, rect(0, 0, 4, 4))
            .with_claimed_key(KeyCombo::new(KeyCode::Char('h'), KeyModifiers::NONE));
        assert!(node.claims(&KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)));
        assert!(!node.claims(&KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL)));
    }
}
