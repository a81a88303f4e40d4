//! Capabilities a record type offers to the windows that display it.
//!
//! The window core never inspects record fields. A type shown in a
//! `ScrollableList` implements [`ListRow`]; a type shown in a `DisplayPane`
//! implements [`DetailView`].

use std::rc::Rc;

use crate::ui::truncate_to_width;

/// One-line projection used for list rows.
pub trait ListRow {
    fn list_row(&self) -> String;
}

/// Multi-line projection used by detail windows.
pub trait DetailView {
    /// Lines to render, each at most `width` columns wide. Longer lines are a
    /// layout error in the detail window.
    fn detail_lines(&self, width: usize) -> Vec<String>;
}

impl ListRow for String {
    fn list_row(&self) -> String {
        self.clone()
    }
}

impl ListRow for &str {
    fn list_row(&self) -> String {
        (*self).to_string()
    }
}

impl<T: ListRow + ?Sized> ListRow for Rc<T> {
    fn list_row(&self) -> String {
        (**self).list_row()
    }
}

impl<T: DetailView + ?Sized> DetailView for Rc<T> {
    fn detail_lines(&self, width: usize) -> Vec<String> {
        (**self).detail_lines(width)
    }
}

/// Static text shown as a detail view, e.g. help screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    lines: Vec<String>,
}

impl TextBlock {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl From<&str> for TextBlock {
    fn from(text: &str) -> Self {
        Self::new(text.lines())
    }
}

impl DetailView for TextBlock {
    fn detail_lines(&self, width: usize) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| truncate_to_width(line, width))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_block_fits_lines_to_width() {
        let block = TextBlock::from("short\na much longer line");
        assert_eq!(block.detail_lines(6), vec!["short", "a much"]);
    }

    #[test]
    fn rc_forwards_projections() {
        let row: Rc<String> = Rc::new("row".to_string());
        assert_eq!(row.list_row(), "row");
        let block: Rc<dyn DetailView> = Rc::new(TextBlock::new(["x"]));
        assert_eq!(block.detail_lines(10), vec!["x"]);
    }
}
