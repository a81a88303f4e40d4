use crossterm::event::{KeyCode, KeyEvent};

use crate::components::{Component, ComponentContext};
use crate::error::WindowError;
use crate::keybindings::Route;
use crate::theme;
use crate::ui::{Canvas, display_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Confirm,
    Cancel,
}

/// Body of a modal prompt window: a message and a confirm/cancel button pair.
///
/// Left/Right pick a button and Tab/BackTab toggle; these only work when the
/// owning window claims them. Enter resolves to the route of the selected
/// button.
#[derive(Debug, Clone)]
pub struct PromptPane {
    message: String,
    confirm_label: String,
    cancel_label: String,
    selected_confirm: bool,
    on_confirm: Route,
    on_cancel: Route,
}

impl PromptPane {
    pub fn new<T: Into<String>>(message: T, on_confirm: Route, on_cancel: Route) -> Self {
        Self {
            message: message.into(),
            confirm_label: "Yes".to_string(),
            cancel_label: "No".to_string(),
            selected_confirm: false,
            on_confirm,
            on_cancel,
        }
    }

    pub fn with_labels<C: Into<String>, X: Into<String>>(mut self, confirm: C, cancel: X) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn selected(&self) -> ConfirmAction {
        if self.selected_confirm {
            ConfirmAction::Confirm
        } else {
            ConfirmAction::Cancel
        }
    }

    pub fn route_for(&self, action: ConfirmAction) -> Route {
        match action {
            ConfirmAction::Confirm => self.on_confirm,
            ConfirmAction::Cancel => self.on_cancel,
        }
    }

    fn button(label: &str) -> String {
        format!("[ {label} ]")
    }
}

impl Component for PromptPane {
    fn render(&mut self, canvas: &mut Canvas<'_>, ctx: &ComponentContext) -> Result<(), WindowError> {
        let marker = if ctx.focused() { "> " } else { "  " };
        canvas.put_str_clipped(0, 0, &format!("{marker}{}", self.message), theme::prompt());

        let confirm = Self::button(&self.confirm_label);
        let cancel = Self::button(&self.cancel_label);
        let total = display_width(&confirm) + 1 + display_width(&cancel);
        let used = display_width(marker) + display_width(&self.message) + 1;
        let width = canvas.width() as usize;
        // buttons sit flush right and are dropped when they would cover the message
        if used + total > width {
            return Ok(());
        }
        let (confirm_style, cancel_style) = if self.selected_confirm {
            (theme::focused_highlight(), theme::prompt())
        } else {
            (theme::prompt(), theme::focused_highlight())
        };
        let start = (width - total) as u16;
        canvas.put_str(0, start, &confirm, confirm_style)?;
        let cancel_col = start + display_width(&confirm) as u16 + 1;
        canvas.put_str(0, cancel_col, &cancel, cancel_style)
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &ComponentContext) -> Result<bool, WindowError> {
        match key.code {
            KeyCode::Left => self.selected_confirm = true,
            KeyCode::Right => self.selected_confirm = false,
            KeyCode::Tab | KeyCode::BackTab => self.selected_confirm = !self.selected_confirm,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn key_route(&self, key: &KeyEvent, _ctx: &ComponentContext) -> Option<Route> {
        (key.code == KeyCode::Enter).then(|| self.route_for(self.selected()))
    }

    fn routes(&self) -> Vec<Route> {
        vec![self.on_confirm, self.on_cancel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::RecordingSurface;
    use crate::window::WindowId;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn pane() -> PromptPane {
        PromptPane::new("Quit?", Route::Terminate, Route::Transfer(WindowId::from_raw(1)))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctx() -> ComponentContext {
        ComponentContext::new(WindowId::from_raw(2), true).with_modal(true)
    }

    #[test]
    fn focused_prompt_shows_marker_and_clips() {
        let area = Rect::new(0, 0, 8, 1);
        let mut surface = RecordingSurface::new(area);
        let mut pane = PromptPane::new("Quit? (y/n)", Route::Terminate, Route::Stay);
        let mut canvas = Canvas::new(&mut surface, area, WindowId::from_raw(2));
        pane.render(&mut canvas, &ctx()).unwrap();
        assert_eq!(surface.texts(), vec!["> Quit? "]);
    }

    #[test]
    fn buttons_are_right_aligned_with_selection_highlight() {
        let area = Rect::new(0, 0, 24, 1);
        let mut surface = RecordingSurface::new(area);
        let mut pane = pane();
        let mut canvas = Canvas::new(&mut surface, area, WindowId::from_raw(2));
        pane.render(&mut canvas, &ctx()).unwrap();
        assert_eq!(surface.texts(), vec!["> Quit?", "[ Yes ]", "[ No ]"]);
        let cancel = surface.ops().iter().find_map(|op| match op {
            crate::ui::SurfaceOp::Text { x, text, style, .. } if text == "[ No ]" => {
                Some((*x, *style))
            }
            _ => None,
        });
        assert_eq!(cancel, Some((18, theme::focused_highlight())));
    }

    #[test]
    fn enter_follows_the_selected_button() {
        let mut pane = pane();
        let ctx = ctx();
        assert_eq!(pane.selected(), ConfirmAction::Cancel);
        assert_eq!(
            pane.key_route(&key(KeyCode::Enter), &ctx),
            Some(Route::Transfer(WindowId::from_raw(1)))
        );

        assert!(pane.handle_key(&key(KeyCode::Left), &ctx).unwrap());
        assert_eq!(pane.selected(), ConfirmAction::Confirm);
        assert_eq!(pane.key_route(&key(KeyCode::Enter), &ctx), Some(Route::Terminate));

        assert!(pane.handle_key(&key(KeyCode::Tab), &ctx).unwrap());
        assert_eq!(pane.selected(), ConfirmAction::Cancel);
        assert!(!pane.handle_key(&key(KeyCode::Char('x')), &ctx).unwrap());
        assert_eq!(pane.key_route(&key(KeyCode::Char('y')), &ctx), None);
    }

    #[test]
    fn labels_can_be_replaced() {
        let pane = pane().with_labels("Exit", "Stay");
        assert_eq!(pane.message(), "Quit?");
        assert_eq!(pane.routes().len(), 2);
        assert_eq!(PromptPane::button(&pane.confirm_label), "[ Exit ]");
    }
}
