//! Widget tree storage, hit testing and geometry helpers.
//!
//! Nodes live in a generational arena and are addressed by [`NodeId`]. The
//! parent/child relation is stored on the nodes; a child's position in its
//! parent's list is its draw order (low index first) and breaks hit-testing
//! ties (high index first). `layer` overrides both.

use crate::draw::Surface;
use crate::error::{TreeError, TreeResult};
use crate::state::WidgetState;
use crate::style::Style;
use crate::widget::{Behavior, RenderCx};
use crate::widgets::Container;
use std::any::Any;
use std::fmt;
use tinsel_core::alloc::{IndexSlot, SparseSet};
use tinsel_core::geometry::{Point, Rect};
use tinsel_core::profiling::profile_function;

/// Handle to a widget in a [`WidgetTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(IndexSlot);

/// A widget: behavior plus the data every widget shares.
pub struct Node {
    behavior: Option<Box<dyn Behavior>>,
    /// Absolute screen rectangle used for drawing and hit testing.
    pub bounds: Rect,
    /// Preferred rectangle, filled in when fitting to content.
    pub desired: Rect,
    pub style: Style,
    pub state: WidgetState,
    /// Z-order among siblings; higher is drawn later and hit first.
    pub layer: i32,
    /// Current content scroll offset.
    pub scroll: Point,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(behavior: impl Behavior, bounds: Rect) -> Self {
        Self {
            behavior: Some(Box::new(behavior)),
            bounds,
            desired: bounds,
            style: Style::default(),
            state: WidgetState::empty(),
            layer: 0,
            scroll: Point::ZERO,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_state(mut self, state: WidgetState) -> Self {
        self.state = state;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// `None` while the behavior is handling an event.
    pub fn behavior(&self) -> Option<&dyn Behavior> {
        self.behavior.as_deref()
    }

    pub fn name(&self) -> &'static str {
        self.behavior.as_ref().map_or("<detached>", |b| b.debug_name())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("behavior", &self.name())
            .field("bounds", &self.bounds)
            .field("state", &self.state)
            .field("layer", &self.layer)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .finish()
    }
}

pub struct WidgetTree {
    nodes: SparseSet<Node>,
    root: NodeId,
}

impl WidgetTree {
    /// Creates a tree whose root container covers `bounds`.
    pub fn new(bounds: Rect) -> Self {
        let mut nodes = SparseSet::new();
        let root = NodeId(nodes.push(Node::new(Container::bare(), bounds)));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live widgets, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.try_get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.try_get_mut(id.0)
    }

    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(|node| node.bounds)
    }

    /// State flags of `id`; empty for stale handles.
    pub fn state(&self, id: NodeId) -> WidgetState {
        self.node(id).map_or(WidgetState::empty(), |node| node.state)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Children of `id` in list order; empty for stale handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Typed access to the behavior of `id`.
    pub fn behavior<T: Behavior>(&self, id: NodeId) -> Option<&T> {
        let behavior: &dyn Any = self.node(id)?.behavior.as_deref()?;
        behavior.downcast_ref::<T>()
    }

    pub fn behavior_mut<T: Behavior>(&mut self, id: NodeId) -> Option<&mut T> {
        let behavior: &mut dyn Any = self.node_mut(id)?.behavior.as_deref_mut()?;
        behavior.downcast_mut::<T>()
    }

    pub(crate) fn take_behavior(&mut self, id: NodeId) -> Option<Box<dyn Behavior>> {
        self.node_mut(id)?.behavior.take()
    }

    pub(crate) fn restore_behavior(&mut self, id: NodeId, behavior: Box<dyn Behavior>) {
        if let Some(node) = self.node_mut(id) {
            node.behavior = Some(behavior);
        }
    }

    pub fn try_insert(&mut self, parent: NodeId, mut node: Node) -> TreeResult<NodeId> {
        if !self.contains(parent) {
            return Err(TreeError::StaleHandle(parent));
        }
        node.parent = Some(parent);
        let name = node.name();
        let id = NodeId(self.nodes.push(node));
        self.nodes.get_mut(parent.0).children.push(id);
        tracing::debug!(?id, ?parent, widget = name, "Added widget");
        Ok(id)
    }

    /// Adds `node` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale. Building under a removed widget is a
    /// programming error; use [`try_insert`](Self::try_insert) when the parent
    /// may legitimately be gone.
    pub fn insert(&mut self, parent: NodeId, node: Node) -> NodeId {
        let name = node.name();
        match self.try_insert(parent, node) {
            Ok(id) => id,
            Err(err) => panic!("cannot add {}: {}", name, err),
        }
    }

    /// Removes `id` and its whole subtree, returning how many widgets were
    /// dropped.
    pub fn remove(&mut self, id: NodeId) -> TreeResult<usize> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        let parent = self.parent(id).ok_or(TreeError::StaleHandle(id))?;
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|child| *child != id);
        }
        let doomed = self.descendants(id);
        for node in &doomed {
            self.nodes.remove(node.0);
        }
        tracing::debug!(?id, removed = doomed.len(), "Removed widget");
        Ok(doomed.len())
    }

    /// Moves `id` to the end of `parent`'s children.
    pub fn reparent(&mut self, id: NodeId, parent: NodeId) -> TreeResult<()> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        let old = self.parent(id).ok_or(TreeError::StaleHandle(id))?;
        if !self.contains(parent) {
            return Err(TreeError::StaleHandle(parent));
        }
        if self.is_within(parent, id) {
            return Err(TreeError::CyclicReparent { node: id, parent });
        }
        self.nodes.get_mut(old.0).children.retain(|child| *child != id);
        self.nodes.get_mut(parent.0).children.push(id);
        self.nodes.get_mut(id.0).parent = Some(parent);
        Ok(())
    }

    /// `id` and every widget below it, parents before children.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.node(next) else { continue };
            out.push(next);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// True if `id` is `ancestor` or lies below it.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// True if neither `id` nor any of its ancestors is hidden.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            match self.node(node) {
                Some(node) if !node.state.is_hidden() => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn update_state(&mut self, id: NodeId, flags: WidgetState, on: bool) {
        if let Some(node) = self.node_mut(id) {
            node.state.set(flags, on);
        }
    }

    /// Returns true if the flag changed.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let changed = node.state.is_hidden() != hidden;
        node.state.set(WidgetState::HIDDEN, hidden);
        if changed {
            tracing::debug!(?id, hidden, "Visibility changed");
        }
        changed
    }

    /// Topmost widget below `parent` containing `point`.
    ///
    /// Among the children that are hit, the one with the highest layer wins,
    /// ties going to the later child. The winner is searched recursively and
    /// its deepest hit descendant is returned, or the winner itself when no
    /// descendant is hit. `parent` itself is never returned.
    ///
    /// Hidden and paused widgets are skipped together with their subtrees.
    /// Descendants reaching outside their parent (an open submenu below its
    /// item, say) are still found unless the parent has [`WidgetState::CLIP`].
    pub fn find_top(&self, parent: NodeId, point: Point) -> Option<NodeId> {
        profile_function!();
        let mut best: Option<(i32, NodeId)> = None;
        for &child in self.children(parent) {
            let Some(hit) = self.hit(child, point) else {
                continue;
            };
            let layer = self.node(child).map_or(0, |node| node.layer);
            if best.is_none_or(|(top, _)| layer >= top) {
                best = Some((layer, hit));
            }
        }
        best.map(|(_, hit)| hit)
    }

    fn hit(&self, id: NodeId, point: Point) -> Option<NodeId> {
        let node = self.node(id)?;
        if !node.state.is_hittable() {
            return None;
        }
        let inside = node.bounds.contains(point);
        if !inside && node.state.contains(WidgetState::CLIP) {
            return None;
        }
        self.find_top(id, point).or(inside.then_some(id))
    }

    /// Shifts `id` and its visible descendants by `delta`.
    ///
    /// Hidden children keep their position.
    pub fn move_by(&mut self, id: NodeId, delta: Point) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.node_mut(next) else {
                continue;
            };
            node.bounds = node.bounds.translate(delta);
            node.desired = node.desired.translate(delta);
            let children = node.children.clone();
            stack.extend(
                children
                    .into_iter()
                    .filter(|child| !self.state(*child).is_hidden()),
            );
        }
    }

    /// Shifts `id` and every descendant, hidden or not, by `delta`.
    pub fn move_subtree(&mut self, id: NodeId, delta: Point) {
        for next in self.descendants(id) {
            if let Some(node) = self.node_mut(next) {
                node.bounds = node.bounds.translate(delta);
                node.desired = node.desired.translate(delta);
            }
        }
    }

    /// Moves `id` to `bounds.min`, carrying its visible children along, and
    /// resizes it to `bounds`.
    pub fn place(&mut self, id: NodeId, bounds: Rect) {
        let Some(old) = self.bounds(id) else {
            return;
        };
        self.move_by(id, bounds.min - old.min);
        if let Some(node) = self.node_mut(id) {
            node.bounds = bounds;
        }
    }

    /// How far the content of `id` can scroll on each axis.
    ///
    /// The content extent is the `desired` size when one was set larger than
    /// the bounds, otherwise the union of the unlocked children.
    pub fn scroll_range(&self, id: NodeId) -> Point {
        let Some(node) = self.node(id) else {
            return Point::ZERO;
        };
        let mut extent = node.desired.size();
        let content = node
            .children
            .iter()
            .filter_map(|child| self.node(*child))
            .filter(|child| !child.state.contains(WidgetState::LOCKED))
            .fold(Rect::ZERO, |acc, child| acc.union(child.bounds));
        if !content.is_empty() {
            extent = extent.max(content.max - node.bounds.min + node.scroll);
        }
        (extent - node.bounds.size()).max(Point::ZERO)
    }

    /// Scrolls the content of `id` to `offset`, clamped to its range.
    /// Locked children stay where they are.
    pub fn scroll_to(&mut self, id: NodeId, offset: Point) -> Point {
        let offset = offset.clamp(Point::ZERO, self.scroll_range(id));
        let Some(node) = self.node_mut(id) else {
            return Point::ZERO;
        };
        let delta = node.scroll - offset;
        node.scroll = offset;
        let children = node.children.clone();
        for child in children {
            if !self.state(child).contains(WidgetState::LOCKED) {
                self.move_subtree(child, delta);
            }
        }
        offset
    }

    /// Renders `id` and, through its behavior, its subtree.
    pub fn render(&self, id: NodeId, surface: &mut dyn Surface) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.state.is_hidden() {
            return;
        }
        if let Some(behavior) = node.behavior.as_deref() {
            behavior.render(&RenderCx::new(self, node, id), surface);
        }
    }

    /// Renders the visible children of `id` by ascending layer, keeping list
    /// order within a layer.
    pub fn render_children(&self, id: NodeId, surface: &mut dyn Surface) {
        profile_function!();
        let mut order: Vec<(i32, NodeId)> = self
            .children(id)
            .iter()
            .filter_map(|child| self.node(*child).map(|node| (node.layer, *child)))
            .collect();
        order.sort_by_key(|(layer, _)| *layer);
        for (_, child) in order {
            self.render(child, surface);
        }
    }
}
