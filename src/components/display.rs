use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ratatui::style::Style;

use crate::components::{Component, ComponentContext};
use crate::constants::NO_DATA;
use crate::error::WindowError;
use crate::record::DetailView;
use crate::theme;
use crate::ui::Canvas;

/// Shared cell holding the record a [`DisplayPane`] shows.
///
/// Cloning the slot shares it. Data-changed subscribers write into a clone,
/// and the pane reads from it on the next draw.
#[derive(Clone, Default)]
pub struct DetailSlot {
    inner: Rc<RefCell<Option<Rc<dyn DetailView>>>>,
}

impl DetailSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, detail: Rc<dyn DetailView>) {
        *self.inner.borrow_mut() = Some(detail);
    }

    pub fn clear(&self) {
        *self.inner.borrow_mut() = None;
    }

    pub fn get(&self) -> Option<Rc<dyn DetailView>> {
        self.inner.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_none()
    }
}

impl fmt::Debug for DetailSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailSlot")
            .field("filled", &!self.is_empty())
            .finish()
    }
}

/// Window body that renders whatever detail view its slot currently holds.
///
/// Detail lines are drawn verbatim: a line wider than the window is a
/// [`WindowError::LayoutOverflow`], not silently cut.
#[derive(Debug, Default)]
pub struct DisplayPane {
    slot: DetailSlot,
}

impl DisplayPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(slot: DetailSlot) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> DetailSlot {
        self.slot.clone()
    }
}

impl Component for DisplayPane {
    fn render(&mut self, canvas: &mut Canvas<'_>, _ctx: &ComponentContext) -> Result<(), WindowError> {
        let Some(detail) = self.slot.get() else {
            canvas.put_str_clipped(1, 1, NO_DATA, theme::dim());
            return Ok(());
        };
        let height = canvas.height() as usize;
        for (row, line) in detail
            .detail_lines(canvas.width() as usize)
            .iter()
            .take(height)
            .enumerate()
        {
            canvas.put_str(row as u16, 0, line, Style::default())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TextBlock;
    use crate::ui::RecordingSurface;
    use crate::window::WindowId;
    use ratatui::layout::Rect;

    struct Wide;
    impl DetailView for Wide {
        fn detail_lines(&self, width: usize) -> Vec<String> {
            vec!["x".repeat(width + 1)]
        }
    }

    fn render(pane: &mut DisplayPane, area: Rect) -> Result<RecordingSurface, WindowError> {
        let mut surface = RecordingSurface::new(area);
        let ctx = ComponentContext::new(WindowId::from_raw(4), false);
        let mut canvas = Canvas::new(&mut surface, area, WindowId::from_raw(4));
        pane.render(&mut canvas, &ctx)?;
        Ok(surface)
    }

    #[test]
    fn empty_slot_shows_placeholder() {
        let mut pane = DisplayPane::new();
        let surface = render(&mut pane, Rect::new(0, 0, 30, 4)).unwrap();
        assert_eq!(surface.texts(), vec![NO_DATA]);
    }

    #[test]
    fn slot_updates_are_seen_on_next_draw() {
        let mut pane = DisplayPane::new();
        let slot = pane.slot();
        slot.set(Rc::new(TextBlock::new(["one", "two", "three"])));
        let surface = render(&mut pane, Rect::new(0, 0, 10, 2)).unwrap();
        assert_eq!(surface.texts(), vec!["one", "two"]);
        slot.clear();
        let surface = render(&mut pane, Rect::new(0, 0, 30, 4)).unwrap();
        assert_eq!(surface.texts(), vec![NO_DATA]);
    }

    #[test]
    fn overlong_detail_line_is_a_layout_overflow() {
        let mut pane = DisplayPane::new();
        pane.slot().set(Rc::new(Wide));
        let err = render(&mut pane, Rect::new(0, 0, 8, 3)).unwrap_err();
        assert!(matches!(
            err,
            WindowError::LayoutOverflow { window, len: 9, .. } if window == WindowId::from_raw(4)
        ));
    }
}
