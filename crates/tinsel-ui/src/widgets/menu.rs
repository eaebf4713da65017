//! Menu bars, drop-down menus and their items.
//!
//! An [`Item`] may own a [`Menu`] as its child. The menu starts hidden and
//! one layer above the item, so an open menu draws over and is hit before
//! the widgets it overlaps, even outside the item's own bounds.
//!
//! Selecting an item closes the menus of its siblings together with every
//! menu nested inside them, so each level keeps at most one open submenu
//! chain.

use crate::draw::Surface;
use crate::event::{ActionEvent, Event, MouseEvent};
use crate::root::Root;
use crate::state::WidgetState;
use crate::tree::{Node, NodeId, WidgetTree};
use crate::widget::{ActionHandler, Behavior, EventCx, MouseHandler, RenderCx};
use tinsel_core::geometry::{Point, Rect};

use super::button::{ClickCallback, begin_click, complete_click};

/// Layer given to bars so their menus cover later siblings.
pub const BAR_LAYER: i32 = 1;

/// Nesting limit when walking submenu chains.
pub const MAX_MENU_DEPTH: usize = 16;

/// Horizontal top-level container of items.
///
/// Dragging the bar moves it together with its items and their menus.
#[derive(Debug, Clone, Default)]
pub struct Bar;

impl Behavior for Bar {
    fn debug_name(&self) -> &'static str {
        "Bar"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        cx.base_style().draw_box(surface, cx.bounds());
        cx.render_children(surface);
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }

    fn as_action_handler(&mut self) -> Option<&mut dyn ActionHandler> {
        Some(self)
    }
}

impl ActionHandler for Bar {
    fn on_drag(&mut self, cx: &mut EventCx<'_>, event: &ActionEvent) -> bool {
        let id = cx.id();
        cx.tree_mut().move_subtree(id, event.delta);
        true
    }
}

/// Vertical list of items, shown by its owning item.
#[derive(Debug, Clone, Default)]
pub struct Menu;

impl Behavior for Menu {
    fn debug_name(&self) -> &'static str {
        "Menu"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        cx.base_style().draw_box(surface, cx.bounds());
        cx.render_children(surface);
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }
}

pub struct Item {
    text: String,
    menu: Option<NodeId>,
    on_select: Option<ClickCallback>,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
            on_select: None,
        }
    }

    pub fn on_select(mut self, callback: impl FnMut(&mut EventCx<'_>) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The submenu opened by this item.
    pub fn menu(&self) -> Option<NodeId> {
        self.menu
    }

    fn select(&mut self, cx: &mut EventCx<'_>) {
        tracing::debug!(id = ?cx.id(), text = %self.text, "Menu item selected");
        if let Some(callback) = self.on_select.as_mut() {
            callback(cx);
        }
        let id = cx.id();
        let tree = cx.tree_mut();
        if let Some(parent) = tree.parent(id) {
            let siblings: Vec<NodeId> = tree
                .children(parent)
                .iter()
                .copied()
                .filter(|sibling| *sibling != id)
                .collect();
            for sibling in siblings {
                for menu in submenus(tree, sibling) {
                    close_menu_chain(tree, menu);
                }
            }
        }
        match self.menu.filter(|menu| tree.contains(*menu)) {
            Some(menu) if tree.state(menu).is_hidden() => {
                tree.set_hidden(menu, false);
            }
            Some(menu) => {
                close_menu_chain(tree, menu);
            }
            None => {
                if let Some(outermost) = outermost_menu(tree, id) {
                    close_menu_chain(tree, outermost);
                }
            }
        }
    }
}

impl std::fmt::Debug for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Item")
            .field("text", &self.text)
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

impl Behavior for Item {
    fn debug_name(&self) -> &'static str {
        "Item"
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

    fn as_mouse_handler(&mut self) -> Option<&mut dyn MouseHandler> {
        Some(self)
    }

    fn as_action_handler(&mut self) -> Option<&mut dyn ActionHandler> {
        Some(self)
    }
}

impl MouseHandler for Item {
    fn on_mouse_press(&mut self, cx: &mut EventCx<'_>, _event: &MouseEvent) -> bool {
        begin_click(cx);
        true
    }

    fn on_mouse_release(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        if complete_click(cx, event.at) {
            self.select(cx);
        }
        true
    }
}

impl ActionHandler for Item {
    fn on_blur(&mut self, cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        cx.set_state(WidgetState::PRESSED, false);
        true
    }
}

/// Children of `item` that are menus.
fn submenus(tree: &WidgetTree, item: NodeId) -> Vec<NodeId> {
    tree.children(item)
        .iter()
        .copied()
        .filter(|child| tree.behavior::<Menu>(*child).is_some())
        .collect()
}

/// The menu directly below a bar or floating item that contains `item`.
fn outermost_menu(tree: &WidgetTree, item: NodeId) -> Option<NodeId> {
    let mut menu = tree
        .parent(item)
        .filter(|parent| tree.behavior::<Menu>(*parent).is_some())?;
    for _ in 0..MAX_MENU_DEPTH {
        let Some(outer) = tree
            .parent(menu)
            .and_then(|owner| tree.parent(owner))
            .filter(|parent| tree.behavior::<Menu>(*parent).is_some())
        else {
            break;
        };
        menu = outer;
    }
    Some(menu)
}

/// Hides `menu` and every menu nested in it. Returns how many menus were
/// visited.
pub fn close_menu_chain(tree: &mut WidgetTree, menu: NodeId) -> usize {
    let mut stack = vec![(menu, 0)];
    let mut closed = 0;
    while let Some((menu, depth)) = stack.pop() {
        tree.set_hidden(menu, true);
        closed += 1;
        if depth >= MAX_MENU_DEPTH {
            tracing::warn!(?menu, "Menu nesting too deep, not closing further");
            continue;
        }
        for item in tree.children(menu).to_vec() {
            stack.extend(submenus(tree, item).into_iter().map(|sub| (sub, depth + 1)));
        }
    }
    closed
}

impl Root {
    pub fn add_bar(&mut self, parent: NodeId, bounds: Rect) -> NodeId {
        let style = self.config().default_style.bar();
        let node = Node::new(Bar, bounds).with_style(style).with_layer(BAR_LAYER);
        self.add(parent, node)
    }

    /// Adds a hidden menu to `item`, below it when the item sits in a bar and
    /// to its right otherwise.
    pub fn add_menu(&mut self, item: NodeId) -> NodeId {
        let tree = self.tree();
        let (Some(node), true) = (tree.node(item), tree.behavior::<Item>(item).is_some()) else {
            panic!("cannot add a menu to {item:?}: not a menu item");
        };
        let (bounds, layer) = (node.bounds, node.layer);
        let in_bar = tree
            .parent(item)
            .is_some_and(|parent| tree.behavior::<Bar>(parent).is_some());
        let origin = if in_bar {
            Point::new(bounds.min.x, bounds.max.y)
        } else {
            Point::new(bounds.max.x, bounds.min.y)
        };
        let node = Node::new(Menu, Rect::from_min_size(origin, Point::ZERO))
            .with_style(self.config().default_style.bar())
            .with_state(WidgetState::HIDDEN)
            .with_layer(layer + 1);
        let menu = self.add(item, node);
        if let Some(item) = self.tree_mut().behavior_mut::<Item>(item) {
            item.menu = Some(menu);
        }
        menu
    }

    /// Appends an item after the last one in a bar or menu, sized to its
    /// text plus margins.
    pub fn fit_item(
        &mut self,
        container: NodeId,
        text: impl Into<String>,
        on_select: impl FnMut(&mut EventCx<'_>) + 'static,
    ) -> NodeId {
        self.fit_item_with(container, Item::new(text).on_select(on_select))
    }

    pub fn fit_item_with(&mut self, container: NodeId, item: Item) -> NodeId {
        let style = self.config().default_style.bar();
        let size = style.measure_text(self.metrics(), item.text()) + style.margin * 2;
        let tree = self.tree();
        let Some(node) = tree.node(container) else {
            panic!("cannot fit an item into removed widget {container:?}");
        };
        let (bounds, layer) = (node.bounds, node.layer);
        let last = tree
            .children(container)
            .last()
            .and_then(|child| tree.bounds(*child));

        if tree.behavior::<Bar>(container).is_some() {
            let x = last.map_or(bounds.min.x, |rect| rect.max.x);
            let rect = Rect::new(x, bounds.min.y, x + size.x, bounds.max.y);
            return self.add(container, Node::new(item, rect).with_style(style).with_layer(layer));
        }
        if tree.behavior::<Menu>(container).is_none() {
            panic!(
                "cannot fit an item into {}: not a bar or menu",
                node.name()
            );
        }

        let y = last.map_or(bounds.min.y, |rect| rect.max.y);
        let rect = Rect::from_min_size(Point::new(bounds.min.x, y), size);
        let id = self.add(container, Node::new(item, rect).with_style(style).with_layer(layer));
        let grown = bounds.union(rect);
        let tree = self.tree_mut();
        if let Some(menu) = tree.node_mut(container) {
            menu.bounds = grown;
            menu.desired = grown;
        }
        for child in tree.children(container).to_vec() {
            if let Some(child) = tree.node_mut(child) {
                child.bounds.max.x = grown.max.x;
            }
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_items_laid_left_to_right() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let bar = root.add_bar(root.id(), Rect::from_xywh(0, 0, 320, 12));
        let file = root.fit_item(bar, "File", |_| {});
        let edit = root.fit_item(bar, "Edit", |_| {});

        // 4 chars * 5 + 2 * 3
        assert_eq!(root.tree().bounds(file), Some(Rect::new(0, 0, 26, 12)));
        assert_eq!(root.tree().bounds(edit), Some(Rect::new(26, 0, 52, 12)));
    }

    #[test]
    fn test_menu_grows_and_widens_items() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let bar = root.add_bar(root.id(), Rect::from_xywh(0, 0, 320, 12));
        let file = root.fit_item(bar, "File", |_| {});
        let menu = root.add_menu(file);
        let open = root.fit_item(menu, "Open", |_| {});
        let quit = root.fit_item(menu, "Quit now", |_| {});

        assert!(root.tree().state(menu).is_hidden());
        assert_eq!(root.tree().node(menu).map(|n| n.layer), Some(BAR_LAYER + 1));
        // 8 chars * 5 + 6 wide, 8 + 2 tall
        assert_eq!(root.tree().bounds(menu), Some(Rect::new(0, 12, 46, 32)));
        assert_eq!(root.tree().bounds(open), Some(Rect::new(0, 12, 46, 22)));
        assert_eq!(root.tree().bounds(quit), Some(Rect::new(0, 22, 46, 32)));
    }

    #[test]
    fn test_submenu_opens_to_the_right() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let bar = root.add_bar(root.id(), Rect::from_xywh(0, 0, 320, 12));
        let file = root.fit_item(bar, "File", |_| {});
        let menu = root.add_menu(file);
        let recent = root.fit_item(menu, "Recent", |_| {});
        let submenu = root.add_menu(recent);

        assert_eq!(root.tree().bounds(submenu), Some(Rect::from_xywh(36, 12, 0, 0)));
        assert_eq!(root.tree().node(submenu).map(|n| n.layer), Some(BAR_LAYER + 2));
    }

    #[test]
    fn test_close_menu_chain_hides_nested_menus() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let bar = root.add_bar(root.id(), Rect::from_xywh(0, 0, 320, 12));
        let file = root.fit_item(bar, "File", |_| {});
        let menu = root.add_menu(file);
        let recent = root.fit_item(menu, "Recent", |_| {});
        let submenu = root.add_menu(recent);
        root.set_hidden(menu, false);
        root.set_hidden(submenu, false);

        assert_eq!(close_menu_chain(root.tree_mut(), menu), 2);
        assert!(root.tree().state(menu).is_hidden());
        assert!(root.tree().state(submenu).is_hidden());
    }
}
