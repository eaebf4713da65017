//! Range control with a knob along a horizontal or vertical track.
//!
//! A slider may be bound to another widget, in which case every value change
//! scrolls that widget's content proportionally. Scrollers are sliders bound
//! this way, created locked so they stay put while the content moves.

use crate::draw::Surface;
use crate::event::{ActionEvent, Event, MouseEvent};
use crate::root::Root;
use crate::state::WidgetState;
use crate::tree::{Node, NodeId};
use crate::widget::{ActionHandler, Behavior, EventCx, MouseHandler, RenderCx};
use tinsel_core::geometry::{Point, Rect};

pub type ValueCallback = Box<dyn FnMut(&mut EventCx<'_>, i32)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Wider than tall is horizontal; everything else is vertical.
    pub fn for_bounds(bounds: Rect) -> Self {
        if bounds.width() > bounds.height() {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    /// Component of `p` along the track.
    pub fn along(self, p: Point) -> i32 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }

    /// Component of `p` across the track.
    pub fn across(self, p: Point) -> i32 {
        match self {
            Self::Horizontal => p.y,
            Self::Vertical => p.x,
        }
    }

    fn compose(self, along: i32, across: i32) -> Point {
        match self {
            Self::Horizontal => Point::new(along, across),
            Self::Vertical => Point::new(across, along),
        }
    }
}

pub struct Slider {
    orientation: Orientation,
    value: i32,
    low: i32,
    high: i32,
    scrolled: Option<NodeId>,
    on_change: Option<ValueCallback>,
}

impl Slider {
    /// A slider at `low` whose orientation follows the shape of `bounds`.
    pub fn new(bounds: Rect, low: i32, high: i32) -> Self {
        Self {
            orientation: Orientation::for_bounds(bounds),
            value: low.min(high),
            low: low.min(high),
            high: low.max(high),
            scrolled: None,
            on_change: None,
        }
    }

    pub fn on_change(mut self, callback: impl FnMut(&mut EventCx<'_>, i32) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Binds the slider to the content of `target`.
    pub fn scrolling(mut self, target: NodeId) -> Self {
        self.scrolled = Some(target);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn low(&self) -> i32 {
        self.low
    }

    pub fn high(&self) -> i32 {
        self.high
    }

    pub fn scrolled(&self) -> Option<NodeId> {
        self.scrolled
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.low, self.high)
    }

    fn track_len(&self, bounds: Rect, margin: Point) -> i32 {
        let o = self.orientation;
        o.along(bounds.size()).saturating_sub(o.along(margin).saturating_mul(2))
    }

    /// Width of the range. Always fits, even for the full `i32` range.
    fn span(&self) -> i64 {
        i64::from(self.high) - i64::from(self.low)
    }

    /// Value under the pointer at `at`, clamped to the range and rounded to
    /// the nearest step.
    pub fn value_at(&self, bounds: Rect, margin: Point, at: Point) -> i32 {
        let track = self.track_len(bounds, margin);
        if track <= 0 {
            return self.low;
        }
        let o = self.orientation;
        let start = i64::from(o.along(bounds.min)) + i64::from(o.along(margin));
        let offset = (i64::from(o.along(at)) - start).clamp(0, i64::from(track));
        let value = i64::from(self.low) + scale(offset, self.span(), i64::from(track));
        i32::try_from(value).map_or(self.high, |value| self.clamp(value))
    }

    /// Center of the knob for the current value.
    pub fn knob_center(&self, bounds: Rect, margin: Point) -> Point {
        let o = self.orientation;
        let span = self.span();
        let track = self.track_len(bounds, margin).max(0);
        let travel = if span > 0 {
            let along = i64::from(self.value) - i64::from(self.low);
            i32::try_from(scale(along, i64::from(track), span)).unwrap_or(track)
        } else {
            0
        };
        o.compose(
            o.along(bounds.min) + o.along(margin) + travel,
            o.across(bounds.center()),
        )
    }

    /// Half the thinner side minus the margin.
    pub fn knob_radius(&self, bounds: Rect, margin: Point) -> i32 {
        let o = self.orientation;
        (o.across(bounds.size()) / 2 - o.across(margin)).max(1)
    }

    /// Clamps and stores `value`, scrolls the bound widget and runs the
    /// callback when the value changed. Returns whether it changed.
    pub fn set_value(&mut self, cx: &mut EventCx<'_>, value: i32) -> bool {
        let value = self.clamp(value);
        let changed = value != self.value;
        self.value = value;
        self.apply_scroll(cx);
        if changed {
            tracing::trace!(id = ?cx.id(), value, "Slider moved");
            if let Some(callback) = self.on_change.as_mut() {
                callback(cx, value);
            }
        }
        changed
    }

    fn apply_scroll(&self, cx: &mut EventCx<'_>) {
        let Some(target) = self.scrolled else {
            return;
        };
        let o = self.orientation;
        let tree = cx.tree_mut();
        let range = o.along(tree.scroll_range(target)).max(0);
        let span = self.span();
        let along = if span > 0 {
            let offset = i64::from(self.value) - i64::from(self.low);
            i32::try_from(offset * i64::from(range) / span).unwrap_or(range)
        } else {
            0
        };
        let current = tree.node(target).map_or(Point::ZERO, |node| node.scroll);
        tree.scroll_to(target, o.compose(along, o.across(current)));
    }

    fn track_to(&mut self, cx: &mut EventCx<'_>, at: Point) -> bool {
        let value = self.value_at(cx.bounds(), cx.style().margin, at);
        self.set_value(cx, value);
        true
    }
}

/// `value * num / den` rounded to the nearest integer.
///
/// Callers keep `value` and `num` non-negative and below 2^32, and `den`
/// positive, so the product never leaves `i64`.
fn scale(value: i64, num: i64, den: i64) -> i64 {
    (value * num + den / 2) / den
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("orientation", &self.orientation)
            .field("value", &self.value)
            .field("low", &self.low)
            .field("high", &self.high)
            .field("scrolled", &self.scrolled)
            .finish_non_exhaustive()
    }
}

impl Behavior for Slider {
    fn debug_name(&self) -> &'static str {
        match self.orientation {
            Orientation::Horizontal => "HorizontalSlider",
            Orientation::Vertical => "VerticalSlider",
        }
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        let bounds = cx.bounds();
        let style = cx.style();
        style.draw_box(surface, bounds);
        cx.base_style().knob().draw_circle(
            surface,
            self.knob_center(bounds, style.margin),
            self.knob_radius(bounds, style.margin),
        );
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

impl MouseHandler for Slider {
    fn on_mouse_press(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        self.track_to(cx, event.at)
    }

    fn on_mouse_hold(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        self.track_to(cx, event.at)
    }

    fn on_mouse_wheel(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        let step = match self.orientation {
            Orientation::Horizontal if event.wheel.x != 0 => event.wheel.x,
            _ => event.wheel.y,
        };
        self.set_value(cx, self.value.saturating_sub(step));
        true
    }
}

impl ActionHandler for Slider {
    fn on_drag(&mut self, cx: &mut EventCx<'_>, event: &ActionEvent) -> bool {
        self.track_to(cx, event.at)
    }
}

impl Root {
    pub fn add_slider(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        low: i32,
        high: i32,
        on_change: impl FnMut(&mut EventCx<'_>, i32) + 'static,
    ) -> NodeId {
        let node = self.node(Slider::new(bounds, low, high).on_change(on_change), bounds);
        self.add(parent, node)
    }

    /// Sets a slider's value through the same path as pointer input.
    /// Returns whether the value changed.
    pub fn set_slider_value(&mut self, id: NodeId, value: i32) -> crate::error::TreeResult<bool> {
        self.with_behavior(id, |slider: &mut Slider, cx| slider.set_value(cx, value))
    }

    /// Adds a scroller along the right edge of `target`.
    pub fn add_vertical_scroller(&mut self, target: NodeId) -> NodeId {
        self.add_scroller(target, Orientation::Vertical)
    }

    /// Adds a scroller along the bottom edge of `target`.
    pub fn add_horizontal_scroller(&mut self, target: NodeId) -> NodeId {
        self.add_scroller(target, Orientation::Horizontal)
    }

    fn add_scroller(&mut self, target: NodeId, orientation: Orientation) -> NodeId {
        let Some(bounds) = self.tree().bounds(target) else {
            panic!("cannot add a scroller to removed widget {target:?}");
        };
        let thickness = self.config().scroller_thickness;
        let rect = match orientation {
            Orientation::Vertical => {
                Rect::new(bounds.max.x - thickness, bounds.min.y, bounds.max.x, bounds.max.y)
            }
            Orientation::Horizontal => {
                Rect::new(bounds.min.x, bounds.max.y - thickness, bounds.max.x, bounds.max.y)
            }
        };
        let layer = self
            .tree()
            .children(target)
            .iter()
            .filter_map(|child| self.tree().node(*child))
            .map(|child| child.layer)
            .max()
            .unwrap_or(0)
            + 1;
        let (low, high) = (self.config().slider_low, self.config().slider_high);
        let mut slider = Slider::new(rect, low, high).scrolling(target);
        slider.orientation = orientation;
        let node = Node::new(slider, rect)
            .with_style(self.config().default_style)
            .with_state(WidgetState::LOCKED)
            .with_layer(layer);
        self.add(target, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_slider(rng: &mut ChaCha8Rng) -> (Slider, Rect, Point) {
        let margin = Point::new(rng.gen_range(0..4), rng.gen_range(0..4));
        let origin = Point::new(rng.gen_range(-500..500), rng.gen_range(-500..500));
        let size = Point::new(rng.gen_range(9..300), rng.gen_range(9..300));
        let bounds = Rect::from_min_size(origin, size);
        let (low, high) = if rng.gen_bool(0.5) {
            (rng.gen_range(i32::MIN..=i32::MAX), rng.gen_range(i32::MIN..=i32::MAX))
        } else {
            let low = rng.gen_range(-1000..1000);
            (low, low + rng.gen_range(0..400))
        };
        (Slider::new(bounds, low, high), bounds, margin)
    }

    #[test]
    fn test_orientation_from_aspect() {
        assert_eq!(
            Orientation::for_bounds(Rect::from_xywh(0, 0, 100, 10)),
            Orientation::Horizontal
        );
        assert_eq!(
            Orientation::for_bounds(Rect::from_xywh(0, 0, 10, 10)),
            Orientation::Vertical
        );
    }

    #[test]
    fn test_value_at_track_positions() {
        let bounds = Rect::from_xywh(0, 0, 104, 10);
        let slider = Slider::new(bounds, 0, 100);
        let margin = Point::new(2, 2);
        assert_eq!(slider.value_at(bounds, margin, Point::new(2, 5)), 0);
        assert_eq!(slider.value_at(bounds, margin, Point::new(52, 5)), 50);
        assert_eq!(slider.value_at(bounds, margin, Point::new(102, 5)), 100);
        assert_eq!(slider.value_at(bounds, margin, Point::new(500, 5)), 100);
        assert_eq!(slider.value_at(bounds, margin, Point::new(-40, 5)), 0);
    }

    #[test]
    fn test_wide_ranges_do_not_overflow() {
        let bounds = Rect::from_xywh(0, 0, 104, 10);
        let margin = Point::new(2, 2);
        let slider = Slider::new(bounds, 0, 100_000_000);
        assert_eq!(slider.value_at(bounds, margin, Point::new(52, 5)), 50_000_000);

        let mut full = Slider::new(bounds, i32::MIN, i32::MAX);
        assert_eq!(full.value_at(bounds, margin, Point::new(2, 5)), i32::MIN);
        assert_eq!(full.value_at(bounds, margin, Point::new(102, 5)), i32::MAX);
        full.value = i32::MAX;
        assert_eq!(full.knob_center(bounds, margin), Point::new(102, 5));
        full.value = i32::MIN;
        assert_eq!(full.knob_center(bounds, margin), Point::new(2, 5));
    }

    #[test]
    fn test_value_at_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..2000 {
            let (slider, bounds, margin) = random_slider(&mut rng);
            let at = Point::new(rng.gen_range(-2000..2000), rng.gen_range(-2000..2000));
            let value = slider.value_at(bounds, margin, at);
            assert!(
                (slider.low()..=slider.high()).contains(&value),
                "{value} outside {}..={}",
                slider.low(),
                slider.high()
            );
        }
    }

    #[test]
    fn test_knob_and_pointer_agree() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        for _ in 0..500 {
            let (mut slider, bounds, margin) = random_slider(&mut rng);
            let o = slider.orientation();
            let track = slider.track_len(bounds, margin);
            let start = o.along(bounds.min) + o.along(margin);
            let across = o.across(bounds.center());

            if slider.span() >= i64::from(track) {
                // every track position is reachable and the knob lands on it
                for offset in 0..=track {
                    let at = o.compose(start + offset, across);
                    slider.value = slider.value_at(bounds, margin, at);
                    assert_eq!(o.along(slider.knob_center(bounds, margin)), start + offset);
                }
            } else {
                // every value is reachable and the pointer at its knob selects it
                for value in slider.low()..=slider.high() {
                    slider.value = value;
                    let knob = slider.knob_center(bounds, margin);
                    assert_eq!(slider.value_at(bounds, margin, knob), value);
                }
            }
        }
    }

    #[test]
    fn test_knob_follows_value() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let id = root.add_slider(root.id(), Rect::from_xywh(0, 0, 104, 10), 0, 100, |_, _| {});
        assert_eq!(root.set_slider_value(id, 250), Ok(true));
        let slider = root.tree().behavior::<Slider>(id);
        assert_eq!(slider.map(Slider::value), Some(100));
        let bounds = Rect::from_xywh(0, 0, 104, 10);
        let center = slider.map(|s| s.knob_center(bounds, Point::new(2, 2)));
        assert_eq!(center, Some(Point::new(102, 5)));
        assert_eq!(root.set_slider_value(id, 100), Ok(false));
    }

    #[test]
    fn test_full_range_scroller() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        root.config_mut().slider_low = i32::MIN;
        root.config_mut().slider_high = i32::MAX;
        let panel = root.add_box(root.id(), Rect::from_xywh(0, 0, 100, 100));
        let content = root.add_box(panel, Rect::from_xywh(0, 0, 90, 300));
        let scroller = root.add_vertical_scroller(panel);

        assert_eq!(root.set_slider_value(scroller, i32::MAX), Ok(true));
        assert_eq!(root.tree().node(panel).map(|n| n.scroll), Some(Point::new(0, 200)));
        assert_eq!(root.tree().bounds(content), Some(Rect::from_xywh(0, -200, 90, 300)));

        // 2^31 * 200 / (2^32 - 1), truncated
        assert_eq!(root.set_slider_value(scroller, 0), Ok(true));
        assert_eq!(root.tree().node(panel).map(|n| n.scroll), Some(Point::new(0, 100)));
    }

    #[test]
    fn test_scroller_is_locked_on_top() {
        let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
        let panel = root.add_box(root.id(), Rect::from_xywh(0, 0, 100, 100));
        root.add_box(panel, Rect::from_xywh(0, 0, 90, 300));
        let scroller = root.add_vertical_scroller(panel);

        let node = root.tree().node(scroller);
        assert_eq!(node.map(|n| n.bounds), Some(Rect::new(92, 0, 100, 100)));
        assert_eq!(node.map(|n| n.layer), Some(1));
        assert!(root.tree().state(scroller).contains(WidgetState::LOCKED));
        assert_eq!(
            root.tree().behavior::<Slider>(scroller).map(Slider::orientation),
            Some(Orientation::Vertical)
        );
    }
}
