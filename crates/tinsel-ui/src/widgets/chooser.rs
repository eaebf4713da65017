//! Image viewing and tile picking.

use crate::draw::Surface;
use crate::event::{ActionEvent, Event, MouseEvent};
use crate::input::MouseButton;
use crate::root::Root;
use crate::state::WidgetState;
use crate::style::{Color, ImageId, Style};
use crate::tree::{Node, NodeId};
use crate::widget::{ActionHandler, Behavior, EventCx, MouseHandler, RenderCx};
use tinsel_core::geometry::{Point, Rect};

/// A framed view of the top-left part of an image.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    image: Option<ImageId>,
    image_size: Point,
}

impl Frame {
    pub fn new(image: Option<ImageId>, image_size: Point) -> Self {
        Self { image, image_size }
    }

    pub fn image(&self) -> Option<ImageId> {
        self.image
    }

    pub fn image_size(&self) -> Point {
        self.image_size
    }

    pub fn set_image(&mut self, image: Option<ImageId>, image_size: Point) {
        self.image = image;
        self.image_size = image_size;
    }

    fn draw(&self, surface: &mut dyn Surface, bounds: Rect, style: Style) {
        style.draw_box(surface, bounds);
        if let Some(image) = self.image {
            let visible = (bounds.size() - style.margin * 2).max(Point::ZERO).min(self.image_size);
            let src = Rect::from_min_size(Point::ZERO, visible);
            surface.draw_image(image, bounds.min + style.margin, src);
        }
    }
}

impl Behavior for Frame {
    fn debug_name(&self) -> &'static str {
        "Frame"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        self.draw(surface, cx.bounds(), cx.base_style());
        cx.render_children(surface);
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }
}

/// A rectangle outline marking a tile.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    color: Color,
}

impl Cursor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Behavior for Cursor {
    fn debug_name(&self) -> &'static str {
        "Cursor"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        surface.stroke_rect(cx.bounds(), cx.base_style().stroke.max(1), self.color);
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }
}

/// A picked tile and the button that picked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub tile: Point,
    pub button: MouseButton,
}

pub type SelectCallback = Box<dyn FnMut(&mut EventCx<'_>, Selection)>;

const HOVERED_COLOR: Color = Color::rgba(245, 245, 245, 245);
const SELECTED_COLOR: Color = Color::rgba(245, 245, 50, 245);

/// A [`Frame`] split into equal tiles.
///
/// Two cursor children overlay the image: one follows the pointer while it
/// is over the chooser, the other marks the last selected tile.
pub struct Chooser {
    frame: Frame,
    tile_size: Point,
    hovered: Option<NodeId>,
    selected: Option<NodeId>,
    selection: Option<Point>,
    on_select: Option<SelectCallback>,
}

impl Chooser {
    pub fn new(image: ImageId, image_size: Point, tile_size: Point) -> Self {
        Self {
            frame: Frame::new(Some(image), image_size),
            tile_size: tile_size.max(Point::ONE),
            hovered: None,
            selected: None,
            selection: None,
            on_select: None,
        }
    }

    pub fn on_select(
        mut self,
        callback: impl FnMut(&mut EventCx<'_>, Selection) + 'static,
    ) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn tile_size(&self) -> Point {
        self.tile_size
    }

    /// The last selected tile.
    pub fn selection(&self) -> Option<Point> {
        self.selection
    }

    /// Number of tiles on each axis, at least one.
    pub fn tiles(&self) -> Point {
        (self.frame.image_size / self.tile_size).max(Point::ONE)
    }

    /// Tile under `at` for a chooser whose image starts at `origin + margin`.
    pub fn tile_at(&self, origin: Point, margin: Point, at: Point) -> Point {
        let rel = at - origin - margin;
        let tile = Point::new(
            rel.x.div_euclid(self.tile_size.x),
            rel.y.div_euclid(self.tile_size.y),
        );
        tile.clamp(Point::ZERO, self.tiles() - Point::ONE)
    }

    pub fn tile_rect(&self, origin: Point, margin: Point, tile: Point) -> Rect {
        Rect::from_min_size(origin + margin + tile * self.tile_size, self.tile_size)
    }

    /// Moves `cursor` over the tile under `at` and shows it.
    fn show_cursor(&self, cx: &mut EventCx<'_>, cursor: Option<NodeId>, at: Point) -> Point {
        let (origin, margin) = (cx.bounds().min, cx.style().margin);
        let tile = self.tile_at(origin, margin, at);
        if let Some(cursor) = cursor {
            let rect = self.tile_rect(origin, margin, tile);
            let tree = cx.tree_mut();
            tree.place(cursor, rect);
            tree.set_hidden(cursor, false);
        }
        tile
    }
}

impl std::fmt::Debug for Chooser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chooser")
            .field("frame", &self.frame)
            .field("tile_size", &self.tile_size)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl Behavior for Chooser {
    fn debug_name(&self) -> &'static str {
        "Chooser"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        self.frame.draw(surface, cx.bounds(), cx.style());
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

impl MouseHandler for Chooser {
    fn on_mouse_move(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        self.show_cursor(cx, self.hovered, event.at);
        true
    }

    fn on_mouse_press(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        let tile = self.show_cursor(cx, self.selected, event.at);
        self.selection = Some(tile);
        tracing::debug!(id = ?cx.id(), ?tile, button = ?event.button, "Tile selected");
        if let Some(callback) = self.on_select.as_mut() {
            callback(
                cx,
                Selection {
                    tile,
                    button: event.button,
                },
            );
        }
        true
    }
}

impl ActionHandler for Chooser {
    fn on_unhover(&mut self, cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        if let Some(hovered) = self.hovered {
            cx.tree_mut().set_hidden(hovered, true);
        }
        true
    }
}

impl Root {
    pub fn add_frame(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        image: Option<ImageId>,
        image_size: Point,
    ) -> NodeId {
        let node = self.node(Frame::new(image, image_size), bounds);
        self.add(parent, node)
    }

    pub fn add_chooser(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        image: ImageId,
        image_size: Point,
        tile_size: Point,
        on_select: impl FnMut(&mut EventCx<'_>, Selection) + 'static,
    ) -> NodeId {
        let chooser = Chooser::new(image, image_size, tile_size).on_select(on_select);
        let cursor_bounds = Rect::from_min_size(bounds.min, chooser.tile_size());
        let node = self.node(chooser, bounds);
        let id = self.add(parent, node);

        let overlay = WidgetState::PAUSED | WidgetState::LOCKED | WidgetState::HIDDEN;
        let hovered = self.add(
            id,
            Node::new(Cursor::new(HOVERED_COLOR), cursor_bounds).with_state(overlay),
        );
        let selected = self.add(
            id,
            Node::new(Cursor::new(SELECTED_COLOR), cursor_bounds).with_state(overlay),
        );
        if let Some(chooser) = self.tree_mut().behavior_mut::<Chooser>(id) {
            chooser.hovered = Some(hovered);
            chooser.selected = Some(selected);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_quantization() {
        let chooser = Chooser::new(ImageId(1), Point::new(64, 32), Point::new(16, 16));
        let origin = Point::new(10, 10);
        let margin = Point::new(2, 2);
        assert_eq!(chooser.tiles(), Point::new(4, 2));
        assert_eq!(chooser.tile_at(origin, margin, Point::new(12, 12)), Point::ZERO);
        assert_eq!(chooser.tile_at(origin, margin, Point::new(28, 29)), Point::new(1, 1));
        assert_eq!(chooser.tile_at(origin, margin, Point::new(500, 500)), Point::new(3, 1));
        assert_eq!(chooser.tile_at(origin, margin, Point::new(0, 0)), Point::ZERO);
    }

    #[test]
    fn test_tile_rect() {
        let chooser = Chooser::new(ImageId(1), Point::new(64, 32), Point::new(16, 16));
        assert_eq!(
            chooser.tile_rect(Point::new(10, 10), Point::new(2, 2), Point::new(1, 1)),
            Rect::from_xywh(28, 28, 16, 16)
        );
    }
}
