//! Contexts handed to behaviors while handling events and rendering.

use crate::config::UiConfig;
use crate::draw::{Surface, TextMetrics};
use crate::interaction::{Interaction, Request, Role};
use crate::state::WidgetState;
use crate::style::Style;
use crate::tree::{Node, NodeId, WidgetTree};
use tinsel_core::geometry::Rect;

/// Access to the root while one widget handles an event.
///
/// The widget being dispatched to is [`EventCx::id`]. Its behavior is
/// detached from the tree for the duration of the call, so looking it up
/// through [`WidgetTree::behavior`] yields `None`; everything else in the
/// tree is reachable and mutable.
///
/// Register changes are queued with [`EventCx::release_focus`] and friends
/// and applied by the root after the handler returns, together with the
/// leave events they imply.
pub struct EventCx<'a> {
    tree: &'a mut WidgetTree,
    interaction: &'a mut Interaction,
    config: &'a UiConfig,
    metrics: &'a dyn TextMetrics,
    id: NodeId,
}

impl<'a> EventCx<'a> {
    pub(crate) fn new(
        tree: &'a mut WidgetTree,
        interaction: &'a mut Interaction,
        config: &'a UiConfig,
        metrics: &'a dyn TextMetrics,
        id: NodeId,
    ) -> Self {
        Self {
            tree,
            interaction,
            config,
            metrics,
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &WidgetTree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut *self.tree
    }

    pub fn config(&self) -> &UiConfig {
        self.config
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics
    }

    pub fn interaction(&self) -> &Interaction {
        &*self.interaction
    }

    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.id).unwrap_or_default()
    }

    /// Base style of the widget, without state variants applied.
    pub fn style(&self) -> Style {
        self.tree
            .node(self.id)
            .map_or(self.config.default_style, |node| node.style)
    }

    pub fn state(&self) -> WidgetState {
        self.tree.state(self.id)
    }

    pub fn set_state(&mut self, flags: WidgetState, on: bool) {
        self.tree.update_state(self.id, flags, on);
    }

    pub fn is_focused(&self) -> bool {
        self.interaction.focus() == Some(self.id)
    }

    /// Gives up focus if this widget has it. The blur is delivered after the
    /// current handler returns.
    pub fn release_focus(&mut self) {
        if self.is_focused() {
            self.interaction.request(Request::Assign(Role::Focus, None));
        }
    }

    pub fn request_focus(&mut self, target: NodeId) {
        self.interaction
            .request(Request::Assign(Role::Focus, Some(target)));
    }

    pub fn request_mark(&mut self, target: Option<NodeId>) {
        self.interaction.request(Request::Assign(Role::Mark, target));
    }

    /// Shows or hides `id`. Registers pointing into a newly hidden subtree
    /// are released by the root once the handler returns.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> bool {
        self.tree.set_hidden(id, hidden)
    }

    pub fn toggle_hidden(&mut self, id: NodeId) -> bool {
        let hidden = self.tree.state(id).is_hidden();
        self.tree.set_hidden(id, !hidden);
        !hidden
    }
}

/// Read-only view of one widget while it renders.
pub struct RenderCx<'a> {
    tree: &'a WidgetTree,
    node: &'a Node,
    id: NodeId,
}

impl<'a> RenderCx<'a> {
    pub(crate) fn new(tree: &'a WidgetTree, node: &'a Node, id: NodeId) -> Self {
        Self { tree, node, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a WidgetTree {
        self.tree
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn bounds(&self) -> Rect {
        self.node.bounds
    }

    pub fn state(&self) -> WidgetState {
        self.node.state
    }

    /// Style variant for the widget's current state.
    pub fn style(&self) -> Style {
        self.node.style.for_state(self.node.state)
    }

    pub fn base_style(&self) -> Style {
        self.node.style
    }

    /// Renders the visible children, lowest layer first.
    pub fn render_children(&self, surface: &mut dyn Surface) {
        self.tree.render_children(self.id, surface);
    }
}
