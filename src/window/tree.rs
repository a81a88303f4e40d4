use std::collections::BTreeMap;

use super::{WindowId, WindowNode};
use crate::components::Component;
use crate::error::WindowError;
use crate::ui::RenderTarget;

/// Arena of [`WindowNode`]s keyed by id.
///
/// Parent/child links are ids into the arena, so the tree has back-navigation
/// without reference cycles. Dropping the tree drops every window.
#[derive(Debug)]
pub struct WindowTree {
    nodes: BTreeMap<WindowId, WindowNode>,
    root: WindowId,
}

impl WindowTree {
    pub fn new(mut root: WindowNode) -> Self {
        root.parent = None;
        let id = root.id;
        let mut nodes = BTreeMap::new();
        nodes.insert(id, root);
        Self { nodes, root: id }
    }

    pub fn root(&self) -> WindowId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowNode> {
        self.nodes.get_mut(&id)
    }

    pub fn node(&self, id: WindowId) -> Result<&WindowNode, WindowError> {
        self.nodes.get(&id).ok_or(WindowError::UnknownWindow(id))
    }

    pub fn node_mut(&mut self, id: WindowId) -> Result<&mut WindowNode, WindowError> {
        self.nodes.get_mut(&id).ok_or(WindowError::UnknownWindow(id))
    }

    /// Attach `child` under `parent`.
    ///
    /// The child gets a border and a parent link. Layout is not computed here:
    /// the child's rectangle must already lie inside the parent's.
    pub fn add_child(&mut self, parent: WindowId, mut child: WindowNode) -> Result<WindowId, WindowError> {
        let id = child.id;
        if self.nodes.contains_key(&id) {
            return Err(WindowError::FocusInvariant(format!(
                "window {id} is already in the tree"
            )));
        }
        let parent_node = self.node(parent)?;
        let parent_area = parent_node.area;
        if parent_area.intersection(child.area) != child.area {
            return Err(WindowError::ChildOutsideParent { parent, child: id });
        }
        if child.focused
            && let Some(other) = self.children(parent).iter().find(|c| self.nodes[*c].focused)
        {
            return Err(WindowError::FocusInvariant(format!(
                "window {id} added focused next to focused sibling {other}"
            )));
        }
        child.parent = Some(parent);
        child.border = true;
        self.node_mut(parent)?.children.push(id);
        self.nodes.insert(id, child);
        tracing::debug!(window_id = %id, parent_id = %parent, "added window");
        Ok(id)
    }

    pub fn children(&self, id: WindowId) -> &[WindowId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: WindowId) -> Option<WindowId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Typed access to a window's component.
    pub fn component<C: Component + 'static>(&self, id: WindowId) -> Option<&C> {
        self.nodes
            .get(&id)?
            .content()?
            .as_any()
            .downcast_ref::<C>()
    }

    pub fn component_mut<C: Component + 'static>(&mut self, id: WindowId) -> Option<&mut C> {
        self.nodes
            .get_mut(&id)?
            .content_mut()?
            .as_any_mut()
            .downcast_mut::<C>()
    }

    /// Draw the whole tree top-down: each visible window draws itself, then
    /// its visible children in insertion order. Later children paint over
    /// earlier ones where they overlap.
    pub fn draw(&mut self, target: &mut dyn RenderTarget) -> Result<(), WindowError> {
        self.draw_node(self.root, target)
    }

    fn draw_node(&mut self, id: WindowId, target: &mut dyn RenderTarget) -> Result<(), WindowError> {
        let node = self.node_mut(id)?;
        if !node.visible {
            return Ok(());
        }
        node.draw_self(target)?;
        let children = node.children.clone();
        for child in children {
            self.draw_node(child, target)?;
        }
        Ok(())
    }

    pub fn focused_windows(&self) -> Vec<WindowId> {
        self.nodes
            .values()
            .filter(|node| node.focused)
            .map(|node| node.id)
            .collect()
    }

    /// Fails if more than one window anywhere in the tree holds focus.
    pub fn check_focus_invariant(&self) -> Result<(), WindowError> {
        let focused = self.focused_windows();
        if focused.len() > 1 {
            let ids: Vec<String> = focused.iter().map(|id| id.to_string()).collect();
            return Err(WindowError::FocusInvariant(format!(
                "multiple focused windows: {}",
                ids.join(", ")
            )));
        }
        Ok(())
    }
}
