use crate::draw::Surface;
use crate::event::{ActionEvent, Event};
use crate::root::Root;
use crate::tree::{Node, NodeId};
use crate::widget::{ActionHandler, Behavior, EventCx, RenderCx};
use tinsel_core::geometry::Rect;

/// A caption bar that drags another widget around.
///
/// The bar is a sibling of its target, so hiding the target through the
/// close button leaves the bar in place.
#[derive(Debug, Clone)]
pub struct TitleBar {
    target: NodeId,
    text: String,
}

impl TitleBar {
    pub fn new(target: NodeId, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Behavior for TitleBar {
    fn debug_name(&self) -> &'static str {
        "TitleBar"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        let bounds = cx.bounds();
        let style = cx.style();
        style.draw_box(surface, bounds);
        style.draw_text(surface, bounds.min, &self.text);
        cx.render_children(surface);
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }

    fn as_action_handler(&mut self) -> Option<&mut dyn ActionHandler> {
        Some(self)
    }
}

impl ActionHandler for TitleBar {
    fn on_drag(&mut self, cx: &mut EventCx<'_>, event: &ActionEvent) -> bool {
        let id = cx.id();
        let tree = cx.tree_mut();
        tree.move_subtree(self.target, event.delta);
        tree.move_subtree(id, event.delta);
        true
    }
}

impl Root {
    /// Adds a title bar of `height` directly above `target`, with a button
    /// at its right end toggling the target's visibility.
    pub fn add_title_bar(
        &mut self,
        target: NodeId,
        height: i32,
        text: impl Into<String>,
    ) -> NodeId {
        let tree = self.tree();
        let (Some(parent), Some(node)) = (tree.parent(target), tree.node(target)) else {
            panic!("cannot add a title bar to {target:?}: no parent");
        };
        let (bounds, layer) = (node.bounds, node.layer);
        let rect = Rect::new(bounds.min.x, bounds.min.y - height, bounds.max.x, bounds.min.y);
        let node = Node::new(TitleBar::new(target, text), rect)
            .with_style(self.config().default_style.bar())
            .with_layer(layer);
        let bar = self.add(parent, node);

        let close = Rect::new(rect.max.x - height, rect.min.y, rect.max.x, rect.max.y);
        self.add_button(bar, close, "X", move |cx| {
            cx.toggle_hidden(target);
        });
        bar
    }
}
