use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use receipt_tui::app::Application;
use receipt_tui::components::ScrollableList;
use receipt_tui::drivers::OutputDriver;
use receipt_tui::drivers::scripted::BufferOutput;
use receipt_tui::error::WindowError;
use receipt_tui::event::DataChanged;
use receipt_tui::keybindings::KeyCombo;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Five items in a list window whose inner area is three rows tall.
fn five_by_three() -> (Application, Rc<RefCell<Vec<usize>>>) {
    let mut app = Application::new(Rect::new(0, 0, 20, 7), None);
    let mut list = ScrollableList::new();
    list.set_data(vec!["a", "b", "c", "d", "e"]).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    list.on_data_changed(move |change: &DataChanged| {
        sink.borrow_mut().push(change.index);
        Ok(())
    });
    let node = app.window(Rect::new(0, 1, 20, 5)).with_content(list);
    let root = app.root();
    let id = app.add_window(root, node).unwrap();
    for code in [KeyCode::Up, KeyCode::Down, KeyCode::Home, KeyCode::End] {
        app.router_mut().stay(KeyCombo::plain(code), id);
    }
    app.focus(id).unwrap();
    (app, seen)
}

fn visible_items(output: &BufferOutput) -> Vec<String> {
    (2..5)
        .map(|y| output.row_text(y).chars().nth(1).map(String::from).unwrap_or_default())
        .collect()
}

fn draw(app: &mut Application, output: &mut BufferOutput) {
    output.draw(|target| app.draw(target)).unwrap();
}

#[test]
fn viewport_tracks_the_cursor_and_events_fire_on_moves_only() {
    let (mut app, seen) = five_by_three();
    let mut output = BufferOutput::new(Rect::new(0, 0, 20, 7));

    draw(&mut app, &mut output);
    assert_eq!(visible_items(&output), ["a", "b", "c"]);

    for _ in 0..3 {
        app.dispatch(&key(KeyCode::Down)).unwrap();
    }
    draw(&mut app, &mut output);
    assert_eq!(visible_items(&output), ["c", "d", "e"]);

    app.dispatch(&key(KeyCode::Down)).unwrap();
    // already on the last item
    app.dispatch(&key(KeyCode::Down)).unwrap();
    draw(&mut app, &mut output);
    assert_eq!(visible_items(&output), ["c", "d", "e"]);
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4]);

    app.dispatch(&key(KeyCode::Home)).unwrap();
    app.dispatch(&key(KeyCode::Up)).unwrap();
    draw(&mut app, &mut output);
    assert_eq!(visible_items(&output), ["a", "b", "c"]);
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4, 0]);
}

#[test]
fn subscriber_error_aborts_the_dispatch() {
    let mut app = Application::new(Rect::new(0, 0, 20, 7), None);
    let mut list = ScrollableList::new();
    list.set_data(vec!["a", "b"]).unwrap();
    list.on_data_changed(|_: &DataChanged| {
        Err(WindowError::FocusInvariant("detail pane gone".into()))
    });
    let node = app.window(Rect::new(0, 1, 20, 5)).with_content(list);
    let root = app.root();
    let id = app.add_window(root, node).unwrap();
    app.router_mut().stay(KeyCombo::plain(KeyCode::Down), id);
    app.focus(id).unwrap();

    assert!(matches!(
        app.dispatch(&key(KeyCode::Down)),
        Err(WindowError::FocusInvariant(_))
    ));
}
