use crate::draw::{Surface, TextMetrics};
use crate::event::{Event, KeyEvent, MouseEvent};
use crate::input::Key;
use crate::root::Root;
use crate::style::Style;
use crate::tree::NodeId;
use crate::widget::{Behavior, EventCx, KeyHandler, MouseHandler, RenderCx};
use tinsel_core::geometry::{Point, Rect};

pub type PickCallback = Box<dyn FnMut(&mut EventCx<'_>, usize, &str)>;

/// Selectable rows of text, one line each.
pub struct List {
    items: Vec<String>,
    selected: Option<usize>,
    on_select: Option<PickCallback>,
}

impl List {
    pub fn new(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            selected: None,
            on_select: None,
        }
    }

    pub fn on_select(
        mut self,
        callback: impl FnMut(&mut EventCx<'_>, usize, &str) + 'static,
    ) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    fn row_height(metrics: &dyn TextMetrics, style: Style) -> i32 {
        metrics.line_height(style.font) + style.margin.y * 2
    }

    fn row_rect(bounds: Rect, row_height: i32, row: usize) -> Rect {
        Rect::from_xywh(
            bounds.min.x,
            bounds.min.y + row as i32 * row_height,
            bounds.width(),
            row_height,
        )
    }

    /// Row under `at`, if any.
    pub fn row_at(&self, bounds: Rect, row_height: i32, at: Point) -> Option<usize> {
        if !bounds.contains(at) || row_height <= 0 {
            return None;
        }
        let row = ((at.y - bounds.min.y) / row_height) as usize;
        (row < self.items.len()).then_some(row)
    }

    fn select(&mut self, cx: &mut EventCx<'_>, row: usize) -> bool {
        if row >= self.items.len() || self.selected == Some(row) {
            return false;
        }
        self.selected = Some(row);
        if let Some(callback) = self.on_select.as_mut() {
            callback(cx, row, &self.items[row]);
        }
        true
    }
}

impl std::fmt::Debug for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("List")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl Behavior for List {
    fn debug_name(&self) -> &'static str {
        "List"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        let bounds = cx.bounds();
        let style = cx.base_style();
        style.draw_box(surface, bounds);
        let height = Self::row_height(&*surface, style);
        for (row, item) in self.items.iter().enumerate() {
            let rect = Self::row_rect(bounds, height, row);
            if rect.min.y >= bounds.max.y {
                break;
            }
            if self.selected == Some(row) {
                style.focus().draw_box(surface, rect);
            }
            style.draw_text(surface, rect.min, item);
        }
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }

    fn as_mouse_handler(&mut self) -> Option<&mut dyn MouseHandler> {
        Some(self)
    }

    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        Some(self)
    }
}

impl MouseHandler for List {
    fn on_mouse_press(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        let height = Self::row_height(cx.metrics(), cx.style());
        match self.row_at(cx.bounds(), height, event.at) {
            Some(row) => {
                self.select(cx, row);
                true
            }
            None => false,
        }
    }
}

impl KeyHandler for List {
    fn on_key_press(&mut self, cx: &mut EventCx<'_>, event: &KeyEvent) -> bool {
        let last = self.items.len().checked_sub(1);
        let next = match (event.key, self.selected) {
            (Key::Up, Some(row)) => row.saturating_sub(1),
            (Key::Down, Some(row)) => last.map_or(row, |last| (row + 1).min(last)),
            (Key::Up | Key::Down, None) => 0,
            _ => return false,
        };
        self.select(cx, next);
        true
    }
}

impl Root {
    pub fn add_list(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        items: impl IntoIterator<Item = impl Into<String>>,
        on_select: impl FnMut(&mut EventCx<'_>, usize, &str) + 'static,
    ) -> NodeId {
        let node = self.node(List::new(items).on_select(on_select), bounds);
        self.add(parent, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputSnapshot, MouseButton};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_press_selects_row() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let picked = Rc::new(RefCell::new(Vec::new()));
        let sink = picked.clone();
        let bounds = Rect::from_xywh(0, 0, 80, 60);
        let list = root.add_list(root.id(), bounds, ["a", "b", "c"], move |_, row, text| {
            sink.borrow_mut().push((row, text.to_string()))
        });

        // rows are 12px tall
        root.update(&InputSnapshot::at(Point::new(5, 14)).press_mouse(MouseButton::Left));
        assert_eq!(root.tree().behavior::<List>(list).and_then(List::selected), Some(1));

        root.update(&InputSnapshot::at(Point::new(5, 14)).press_key(Key::Down));
        root.update(&InputSnapshot::at(Point::new(5, 14)).press_key(Key::Down));
        assert_eq!(
            *picked.borrow(),
            vec![(1, "b".to_string()), (2, "c".to_string())]
        );
    }

    #[test]
    fn test_row_at_outside_items() {
        let list = List::new(["a"]);
        let bounds = Rect::from_xywh(0, 0, 80, 60);
        assert_eq!(list.row_at(bounds, 12, Point::new(5, 5)), Some(0));
        assert_eq!(list.row_at(bounds, 12, Point::new(5, 30)), None);
        assert_eq!(list.row_at(bounds, 12, Point::new(90, 5)), None);
    }
}
