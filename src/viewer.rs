//! Assembly of the receipt browser: layout, list to detail wiring, keymap.

use std::rc::Rc;

use crossterm::event::KeyCode;
use ratatui::layout::Rect;

use crate::app::Application;
use crate::components::{DetailSlot, DisplayPane, PromptPane, ScrollableList};
use crate::error::WindowError;
use crate::event::DataChanged;
use crate::keybindings::{KeyCombo, KeyRouter, Route};
use crate::receipts::Receipt;
use crate::record::{DetailView, TextBlock};
use crate::window::WindowId;

pub const QUIT_PROMPT: &str = "Quit? (y/n)";

const HELP_WIDTH: u16 = 56;
// four sections of keys, blank lines between them, plus the frame
const HELP_HEIGHT: u16 = 23;

/// Ids of the windows that make up the receipt browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerIds {
    pub root: WindowId,
    pub list: WindowId,
    pub detail: WindowId,
    pub help: WindowId,
    pub prompt: WindowId,
}

/// Window rectangles for a screen of size `area`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerLayout {
    pub list: Rect,
    pub detail: Rect,
    pub help: Rect,
    pub prompt: Rect,
}

impl ViewerLayout {
    /// The top row carries the root title and the bottom row its size
    /// label. The body between them is split one third list, two thirds
    /// detail; the prompt covers the bottom of the body and the help box
    /// is centered.
    pub fn compute(area: Rect) -> Self {
        let body = Rect::new(
            area.x,
            area.y + 1u16.min(area.height),
            area.width,
            area.height.saturating_sub(2),
        );
        let list_width = body.width / 3;
        let list = Rect::new(body.x, body.y, list_width, body.height);
        let detail = Rect::new(
            body.x + list_width,
            body.y,
            body.width - list_width,
            body.height,
        );

        let prompt_height = 3u16.min(body.height);
        let prompt = Rect::new(
            body.x,
            body.y + body.height - prompt_height,
            body.width,
            prompt_height,
        );

        let help_width = HELP_WIDTH.min(body.width);
        let help_height = HELP_HEIGHT.min(body.height);
        let help = Rect::new(
            body.x + (body.width - help_width) / 2,
            body.y + (body.height - help_height) / 2,
            help_width,
            help_height,
        );

        Self {
            list,
            detail,
            help,
            prompt,
        }
    }
}

/// Build the receipt browser over `area` with the list focused.
pub fn build_receipt_viewer(
    area: Rect,
    receipts: Vec<Receipt>,
) -> Result<(Application, ViewerIds), WindowError> {
    let layout = ViewerLayout::compute(area);
    let mut app = Application::new(area, Some("Receipts"));
    let root = app.root();

    let rows: Vec<Rc<Receipt>> = receipts.into_iter().map(Rc::new).collect();
    let slot = DetailSlot::new();

    let mut list: ScrollableList<Rc<Receipt>> = ScrollableList::new().with_scroll_bar();
    let sink = slot.clone();
    let lookup = rows.clone();
    list.on_data_changed(move |change: &DataChanged| {
        match lookup.get(change.index) {
            Some(receipt) => {
                let detail: Rc<dyn DetailView> = receipt.clone();
                sink.set(detail);
            }
            None => sink.clear(),
        }
        Ok(())
    });
    let count = rows.len();
    list.set_data(rows)?;

    let list = app
        .window(layout.list)
        .with_title(format!("List ({count})"))
        .with_content(list);
    let list_id = list.id();
    let detail = app
        .window(layout.detail)
        .with_title("Detail")
        .with_content(DisplayPane::with_slot(slot));
    let help_slot = DetailSlot::new();
    let help = app
        .window(layout.help)
        .with_title("Help")
        .with_content(DisplayPane::with_slot(help_slot.clone()))
        .modal();
    let mut prompt = app
        .window(layout.prompt)
        .with_title("Exit")
        .with_content(PromptPane::new(
            QUIT_PROMPT,
            Route::Terminate,
            Route::Transfer(list_id),
        ))
        .modal();
    for code in [KeyCode::Left, KeyCode::Right, KeyCode::Tab, KeyCode::BackTab] {
        prompt = prompt.with_claimed_key(KeyCombo::plain(code));
    }

    let ids = ViewerIds {
        root,
        list: app.add_window(root, list)?,
        detail: app.add_window(root, detail)?,
        help: app.add_window(root, help)?,
        prompt: app.add_window(root, prompt)?,
    };
    bind_keys(&mut app, &ids);
    help_slot.set(Rc::new(TextBlock::new(help_lines(app.router(), &ids))));
    app.focus(ids.list)?;
    app.validate_routes()?;
    tracing::info!(receipts = count, "receipt viewer assembled");
    Ok((app, ids))
}

fn bind_keys(app: &mut Application, ids: &ViewerIds) {
    use KeyCode::*;
    let plain = KeyCombo::plain;
    let router = app.router_mut();

    for code in [Up, Down, PageUp, PageDown, Home, End] {
        router.stay(plain(code), ids.list);
    }
    for code in [Enter, Right, Tab] {
        router.transfer(plain(code), ids.list, ids.detail);
    }
    router
        .transfer(plain(Char('h')), ids.list, ids.help)
        .transfer(plain(Char('q')), ids.list, ids.prompt)
        .transfer(plain(Esc), ids.list, ids.prompt)
        .terminate(KeyCombo::ctrl('c'), ids.list);

    for code in [Left, Esc, Tab, BackTab] {
        router.transfer(plain(code), ids.detail, ids.list);
    }
    router
        .transfer(plain(Char('h')), ids.detail, ids.help)
        .transfer(plain(Char('q')), ids.detail, ids.prompt)
        .terminate(KeyCombo::ctrl('c'), ids.detail);

    for code in [Char('h'), Esc, Enter] {
        router.transfer(plain(code), ids.help, ids.list);
    }

    // Enter answers with the selected button, see `PromptPane`
    router
        .terminate(plain(Char('y')), ids.prompt)
        .transfer(plain(Char('n')), ids.prompt, ids.list)
        .transfer(plain(Esc), ids.prompt, ids.list);
}

/// What a route does, for the help box. Lower ranks are listed first.
fn describe(route: Route, ids: &ViewerIds) -> (u8, &'static str) {
    match route {
        Route::Stay => (0, "move"),
        Route::Transfer(id) if id == ids.detail => (1, "open detail"),
        Route::Transfer(id) if id == ids.list => (2, "back to list"),
        Route::Transfer(id) if id == ids.help => (3, "help"),
        Route::Transfer(id) if id == ids.prompt => (4, "quit prompt"),
        Route::Transfer(_) => (5, "focus"),
        Route::Terminate => (6, "exit"),
    }
}

fn help_row(action: &str, keys: &str) -> String {
    format!("  {action:<12} {keys}")
}

/// Help text generated from the keymap, one section per window.
fn help_lines(router: &KeyRouter, ids: &ViewerIds) -> Vec<String> {
    let sections = [
        ("List", ids.list),
        ("Detail", ids.detail),
        ("Help", ids.help),
        ("Exit", ids.prompt),
    ];
    let mut lines = Vec::new();
    for (name, window) in sections {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(name.to_string());

        let mut groups: Vec<((u8, &str), Vec<String>)> = Vec::new();
        for (combo, route) in router.bindings_for(window) {
            let action = describe(route, ids);
            match groups.iter_mut().find(|(a, _)| *a == action) {
                Some((_, keys)) => keys.push(combo.display()),
                None => groups.push((action, vec![combo.display()])),
            }
        }
        groups.sort_by_key(|((rank, _), _)| *rank);
        if window == ids.prompt {
            lines.push(help_row("choose", "Left Right Tab"));
            lines.push(help_row("answer", "Enter"));
        }
        for ((_, action), keys) in groups {
            lines.push(help_row(action, &keys.join(" ")));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;

    fn receipt(store: &str, day: u32) -> Receipt {
        Receipt {
            store: store.to_string(),
            short: None,
            date: vec![2020, 1, day],
            category: None,
            products: Default::default(),
            subtotal: 1.0,
            tax: 0.1,
            total: 1.1,
            payment: None,
        }
    }

    #[test]
    fn layout_splits_body_into_thirds() {
        let layout = ViewerLayout::compute(Rect::new(0, 0, 90, 30));
        assert_eq!(layout.list, Rect::new(0, 1, 30, 28));
        assert_eq!(layout.detail, Rect::new(30, 1, 60, 28));
        assert_eq!(layout.prompt, Rect::new(0, 26, 90, 3));
        assert_eq!(layout.help, Rect::new(17, 3, 56, 23));
    }

    #[test]
    fn help_lists_every_binding_by_action() {
        let (app, ids) = build_receipt_viewer(Rect::new(0, 0, 90, 30), Vec::new()).unwrap();
        let lines = help_lines(app.router(), &ids);
        assert_eq!(lines.len() as u16 + 2, HELP_HEIGHT);
        assert_eq!(lines[0], "List");
        assert_eq!(lines[1], "  move         Down End Home PageDown PageUp Up");
        assert_eq!(lines[2], "  open detail  Enter Right Tab");
        assert!(lines.contains(&"  exit         Ctrl+c".to_string()));
        assert!(lines.contains(&"  answer       Enter".to_string()));
        assert!(lines.iter().all(|line| line.len() + 2 <= HELP_WIDTH as usize));

        let pane = app.tree().component::<DisplayPane>(ids.help).unwrap();
        assert!(!pane.slot().is_empty());
    }

    #[test]
    fn list_draws_a_scroll_bar() {
        let receipts: Vec<Receipt> = (1..=28).map(|day| receipt("S", day)).collect();
        let area = Rect::new(0, 0, 90, 20);
        let (mut app, ids) = build_receipt_viewer(area, receipts).unwrap();
        let list = app
            .tree()
            .component::<ScrollableList<Rc<Receipt>>>(ids.list)
            .unwrap();
        assert!(list.has_scroll_bar());

        let mut buf = Buffer::empty(area);
        app.draw(&mut buf).unwrap();
        // last inner column of the list window, first and last body rows
        let bar = |y: u16| buf.cell((28, y)).map(|c| c.symbol().to_string());
        assert_eq!(bar(2).as_deref(), Some("█"));
        assert_eq!(bar(17).as_deref(), Some("│"));
    }

    #[test]
    fn first_receipt_is_shown_on_start() {
        let (app, ids) =
            build_receipt_viewer(Rect::new(0, 0, 90, 30), vec![receipt("A", 1), receipt("B", 2)])
                .unwrap();
        assert_eq!(app.focused(), Some(ids.list));
        assert!(!app.tree().get(ids.help).unwrap().is_visible());
        assert!(!app.tree().get(ids.prompt).unwrap().is_visible());
        let list = app
            .tree()
            .component::<ScrollableList<Rc<Receipt>>>(ids.list)
            .unwrap();
        assert_eq!(list.cursor(), Some(0));
        let pane = app.tree().component::<DisplayPane>(ids.detail).unwrap();
        assert!(!pane.slot().is_empty());
    }

    #[test]
    fn keymap_matches_the_browser_flow() {
        let (app, ids) = build_receipt_viewer(Rect::new(0, 0, 90, 30), Vec::new()).unwrap();
        let router = app.router();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(router.route(&key(KeyCode::Down), ids.list), Some(Route::Stay));
        assert_eq!(
            router.route(&key(KeyCode::Tab), ids.list),
            Some(Route::Transfer(ids.detail))
        );
        assert_eq!(
            router.route(&key(KeyCode::BackTab), ids.detail),
            Some(Route::Transfer(ids.list))
        );
        assert_eq!(
            router.route(&key(KeyCode::Char('y')), ids.prompt),
            Some(Route::Terminate)
        );
        assert_eq!(router.route(&key(KeyCode::Char('y')), ids.list), None);
        // Enter on the prompt is answered by the prompt itself
        assert_eq!(router.route(&key(KeyCode::Enter), ids.prompt), None);
        let prompt = app.tree().get(ids.prompt).unwrap();
        assert!(prompt.claims(&key(KeyCode::Tab)));
        assert_eq!(
            prompt.key_route(&key(KeyCode::Enter)),
            Some(Route::Transfer(ids.list))
        );
        assert_eq!(
            router.route(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), ids.detail),
            Some(Route::Terminate)
        );
    }
}
