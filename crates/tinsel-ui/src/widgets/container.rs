use crate::draw::Surface;
use crate::event::{Event, LayoutEvent};
use crate::root::Root;
use crate::state::WidgetState;
use crate::tree::NodeId;
use crate::widget::{Behavior, EventCx, LayoutHandler, RenderCx};
use tinsel_core::geometry::Rect;

/// A box holding other widgets.
///
/// Draws its decorated bounds, switching to the hover variant of its style
/// while hovered, then its visible children in order.
#[derive(Debug, Clone, Default)]
pub struct Container {
    decorated: bool,
}

impl Container {
    pub fn new() -> Self {
        Self { decorated: true }
    }

    /// A container that draws nothing of its own.
    pub fn bare() -> Self {
        Self { decorated: false }
    }
}

impl Behavior for Container {
    fn debug_name(&self) -> &'static str {
        "Container"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        if self.decorated {
            let style = if cx.state().contains(WidgetState::HOVER) {
                cx.base_style().hover()
            } else {
                cx.base_style()
            };
            style.draw_box(surface, cx.bounds());
        }
        cx.render_children(surface);
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }

    fn as_layout_handler(&mut self) -> Option<&mut dyn LayoutHandler> {
        Some(self)
    }
}

impl LayoutHandler for Container {
    /// Desired bounds grow to cover the visible children plus the margin.
    fn on_layout_get(&mut self, cx: &mut EventCx<'_>, _event: &LayoutEvent) -> bool {
        let id = cx.id();
        let margin = cx.style().margin;
        let tree = cx.tree_mut();
        let Some(bounds) = tree.bounds(id) else {
            return false;
        };
        let content = tree
            .children(id)
            .iter()
            .filter(|child| !tree.state(**child).is_hidden())
            .filter_map(|child| tree.bounds(*child))
            .fold(Rect::ZERO, |acc, child| acc.union(child));
        let desired = if content.is_empty() {
            bounds
        } else {
            Rect {
                min: bounds.min,
                max: content.max + margin,
            }
        };
        if let Some(node) = tree.node_mut(id) {
            node.desired = desired;
        }
        true
    }

    fn on_layout_set(&mut self, cx: &mut EventCx<'_>, event: &LayoutEvent) -> bool {
        let id = cx.id();
        cx.tree_mut().place(id, event.bounds);
        true
    }
}

impl Root {
    pub fn add_box(&mut self, parent: NodeId, bounds: Rect) -> NodeId {
        let node = self.node(Container::new(), bounds);
        self.add(parent, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, DrawList};

    #[test]
    fn test_place_moves_children_with_container() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let panel = root.add_box(root.id(), Rect::from_xywh(10, 10, 100, 100));
        let inner = root.add_box(panel, Rect::from_xywh(20, 20, 10, 10));

        root.place(panel, Rect::from_xywh(50, 60, 80, 80));
        assert_eq!(root.tree().bounds(panel), Some(Rect::from_xywh(50, 60, 80, 80)));
        assert_eq!(root.tree().bounds(inner), Some(Rect::from_xywh(60, 70, 10, 10)));
    }

    #[test]
    fn test_fit_covers_children() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let panel = root.add_box(root.id(), Rect::from_xywh(0, 0, 10, 10));
        root.add_box(panel, Rect::from_xywh(5, 5, 40, 30));

        let desired = root.fit(panel);
        assert_eq!(desired, Some(Rect::new(0, 0, 47, 37)));
    }

    #[test]
    fn test_hidden_children_are_not_drawn() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let panel = root.add_box(root.id(), Rect::from_xywh(0, 0, 100, 100));
        let shown = root.add_box(panel, Rect::from_xywh(0, 0, 10, 10));
        let hidden = root.add_box(panel, Rect::from_xywh(20, 0, 10, 10));
        root.set_hidden(hidden, true);

        let mut list = DrawList::new();
        root.render(&mut list);
        let filled: Vec<Rect> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(
            filled,
            vec![
                Rect::from_xywh(0, 0, 100, 100),
                root.tree().bounds(shown).unwrap_or_default()
            ]
        );
    }
}
