//! The application: window tree, key router and the focus state machine.

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::drivers::{InputDriver, OutputDriver};
use crate::error::WindowError;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::{KeyRouter, Route};
use crate::ui::RenderTarget;
use crate::window::{IdAllocator, WindowId, WindowNode, WindowTree};

pub struct Application {
    ids: IdAllocator,
    tree: WindowTree,
    router: KeyRouter,
    focused: Option<WindowId>,
    running: bool,
}

impl Application {
    /// New application whose root window covers `area`.
    pub fn new(area: Rect, title: Option<&str>) -> Self {
        let mut ids = IdAllocator::new();
        let mut root = WindowNode::new(&mut ids, area);
        if let Some(title) = title {
            root.set_title(title);
        }
        Self {
            ids,
            tree: WindowTree::new(root),
            router: KeyRouter::new(),
            focused: None,
            running: true,
        }
    }

    /// A fresh, detached window with an id from this application.
    pub fn window(&mut self, area: Rect) -> WindowNode {
        WindowNode::new(&mut self.ids, area)
    }

    pub fn add_window(&mut self, parent: WindowId, node: WindowNode) -> Result<WindowId, WindowError> {
        self.tree.add_child(parent, node)
    }

    pub fn root(&self) -> WindowId {
        self.tree.root()
    }

    pub fn tree(&self) -> &WindowTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WindowTree {
        &mut self.tree
    }

    pub fn router(&self) -> &KeyRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut KeyRouter {
        &mut self.router
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Give `id` the initial focus.
    pub fn focus(&mut self, id: WindowId) -> Result<(), WindowError> {
        self.transfer_focus(id)
    }

    /// Move focus to `target`.
    ///
    /// The previous window loses focus and, if modal, is hidden. A modal
    /// target is shown. Focusing the focused window is a no-op.
    /// Fails with `FocusInvariant`, changing nothing, if a window other than
    /// the tracked one already holds focus.
    pub fn transfer_focus(&mut self, target: WindowId) -> Result<(), WindowError> {
        self.tree.node(target)?;
        let previous = self.focused;
        if previous == Some(target) {
            return Ok(());
        }
        let stray: Vec<WindowId> = self
            .tree
            .focused_windows()
            .into_iter()
            .filter(|id| Some(*id) != previous)
            .collect();
        if !stray.is_empty() {
            return Err(WindowError::FocusInvariant(format!(
                "windows {stray:?} hold focus besides {previous:?}"
            )));
        }
        if let Some(prev) = previous {
            let node = self.tree.node_mut(prev)?;
            node.set_focus(false);
            if node.is_modal() {
                node.set_visible(false);
            }
        }
        let node = self.tree.node_mut(target)?;
        node.set_focus(true);
        if node.is_modal() {
            node.set_visible(true);
        }
        self.focused = Some(target);
        tracing::debug!(from = ?previous, to = %target, "focus transferred");
        Ok(())
    }

    /// Route one key press.
    ///
    /// Keys the focused window claims go straight to it. Next the focused
    /// component may resolve the key to a route itself. Everything else is
    /// looked up in the router; unmapped pairs are ignored.
    pub fn dispatch(&mut self, key: &KeyEvent) -> Result<ControlFlow, WindowError> {
        let Some(focused) = self.focused else {
            tracing::trace!(code = ?key.code, "key with no focused window");
            return Ok(ControlFlow::Continue);
        };

        let node = self.tree.node_mut(focused)?;
        if node.claims(key) {
            node.handle_key(key)?;
            return Ok(ControlFlow::Continue);
        }

        match node.key_route(key).or_else(|| self.router.route(key, focused)) {
            None => {
                tracing::trace!(code = ?key.code, window = %focused, "unmapped key");
            }
            Some(route) => self.apply_route(focused, key, route)?,
        }

        Ok(if self.running {
            ControlFlow::Continue
        } else {
            ControlFlow::Quit
        })
    }

    fn apply_route(&mut self, focused: WindowId, key: &KeyEvent, route: Route) -> Result<(), WindowError> {
        match route {
            Route::Stay => {
                self.tree.node_mut(focused)?.handle_key(key)?;
            }
            Route::Transfer(target) => self.transfer_focus(target)?,
            Route::Terminate => {
                tracing::info!(window = %focused, "terminate requested");
                self.running = false;
            }
        }
        Ok(())
    }

    /// Draw the full tree.
    pub fn draw(&mut self, target: &mut dyn RenderTarget) -> Result<(), WindowError> {
        self.tree.draw(target)
    }

    /// Check the assembled tree and keymap before running.
    pub fn validate_routes(&self) -> Result<(), WindowError> {
        for id in self.router.window_ids() {
            if !self.tree.contains(id) {
                return Err(WindowError::FocusInvariant(format!(
                    "key router references unknown window {id}"
                )));
            }
        }
        for id in self.tree.ids() {
            let routes = self.tree.node(id)?.content().map(|c| c.routes()).unwrap_or_default();
            for route in routes {
                if let Route::Transfer(target) = route
                    && !self.tree.contains(target)
                {
                    return Err(WindowError::FocusInvariant(format!(
                        "window {id} routes to unknown window {target}"
                    )));
                }
            }
        }
        self.tree.check_focus_invariant()?;
        if let Some(focused) = self.focused
            && !self.tree.contains(focused)
        {
            return Err(WindowError::FocusInvariant(format!(
                "focused window {focused} is not in the tree"
            )));
        }
        Ok(())
    }

    /// Draw once, then read, dispatch and redraw until a terminate route fires.
    pub fn run<I, O>(&mut self, input: I, output: &mut O) -> Result<(), WindowError>
    where
        I: InputDriver,
        O: OutputDriver,
    {
        self.validate_routes()?;
        self.running = true;
        output.draw(|target| self.draw(target))?;

        let mut event_loop = EventLoop::new(input);
        event_loop.run(|key| {
            let flow = self.dispatch(&key)?;
            if flow == ControlFlow::Continue {
                output.draw(|target| self.draw(target))?;
            }
            Ok(flow)
        })
    }
}
