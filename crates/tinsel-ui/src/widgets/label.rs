use crate::draw::Surface;
use crate::event::{Event, LayoutEvent};
use crate::root::Root;
use crate::tree::NodeId;
use crate::widget::{Behavior, EventCx, LayoutHandler, RenderCx};
use tinsel_core::geometry::Rect;

/// Static text. Lines are split on `'\n'`.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Behavior for Label {
    fn debug_name(&self) -> &'static str {
        "Label"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        cx.style().draw_text(surface, cx.bounds().min, &self.text);
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }

    fn as_layout_handler(&mut self) -> Option<&mut dyn LayoutHandler> {
        Some(self)
    }
}

impl LayoutHandler for Label {
    fn on_layout_get(&mut self, cx: &mut EventCx<'_>, _event: &LayoutEvent) -> bool {
        let id = cx.id();
        let style = cx.style();
        let size = style.measure_text(cx.metrics(), &self.text) + style.margin * 2;
        let origin = cx.bounds().min;
        if let Some(node) = cx.tree_mut().node_mut(id) {
            node.desired = Rect::from_min_size(origin, size);
        }
        true
    }
}

impl Root {
    pub fn add_label(&mut self, parent: NodeId, bounds: Rect, text: impl Into<String>) -> NodeId {
        let node = self.node(Label::new(text), bounds);
        self.add(parent, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawList;

    #[test]
    fn test_label_draws_its_lines() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        root.add_label(root.id(), Rect::from_xywh(10, 10, 100, 20), "one\ntwo");

        let mut list = DrawList::new();
        root.render(&mut list);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn test_fit_measures_text() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let label = root.add_label(root.id(), Rect::from_xywh(10, 10, 1, 1), "hello");

        // 5 chars * 5px + 2 * margin, one 8px line + 2 * margin
        assert_eq!(root.fit(label), Some(Rect::from_xywh(10, 10, 29, 12)));
    }
}
