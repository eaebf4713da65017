use crate::draw::Surface;
use crate::event::{ActionEvent, Event, MouseEvent};
use crate::root::Root;
use crate::state::WidgetState;
use crate::style::ImageId;
use crate::tree::NodeId;
use crate::widget::{ActionHandler, Behavior, EventCx, MouseHandler, RenderCx};
use tinsel_core::geometry::{Point, Rect};

pub type ClickCallback = Box<dyn FnMut(&mut EventCx<'_>)>;
pub type ToggleCallback = Box<dyn FnMut(&mut EventCx<'_>, bool)>;

/// Marks the widget as pressed; the matching release decides whether the
/// press becomes a click.
pub(crate) fn begin_click(cx: &mut EventCx<'_>) {
    cx.set_state(WidgetState::PRESSED, true);
}

/// Ends a press. Returns true when the widget was pressed and the release
/// happened inside its bounds.
pub(crate) fn complete_click(cx: &mut EventCx<'_>, at: Point) -> bool {
    let pressed = cx.state().contains(WidgetState::PRESSED);
    cx.set_state(WidgetState::PRESSED, false);
    pressed && cx.bounds().contains(at)
}

/// A push button with a text caption.
pub struct Button {
    text: String,
    on_click: Option<ClickCallback>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            on_click: None,
        }
    }

    pub fn on_click(mut self, callback: impl FnMut(&mut EventCx<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Completes a click and runs the callback. Returns whether it fired.
    pub(crate) fn release(&mut self, cx: &mut EventCx<'_>, at: Point) -> bool {
        if !complete_click(cx, at) {
            return false;
        }
        tracing::trace!(id = ?cx.id(), text = %self.text, "Button clicked");
        if let Some(callback) = self.on_click.as_mut() {
            callback(cx);
        }
        true
    }

    /// Draws the caption, shifted down one pixel while pressed.
    fn draw_caption(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface, at: Point) {
        let shift = if cx.state().contains(WidgetState::PRESSED) {
            Point::ONE
        } else {
            Point::ZERO
        };
        cx.style().draw_text(surface, at + shift, &self.text);
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl Behavior for Button {
    fn debug_name(&self) -> &'static str {
        "Button"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        let bounds = cx.bounds();
        cx.style().draw_box(surface, bounds);
        self.draw_caption(cx, surface, bounds.min);
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

impl MouseHandler for Button {
    fn on_mouse_press(&mut self, cx: &mut EventCx<'_>, _event: &MouseEvent) -> bool {
        begin_click(cx);
        true
    }

    fn on_mouse_release(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        self.release(cx, event.at);
        true
    }
}

impl ActionHandler for Button {
    fn on_blur(&mut self, cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        cx.set_state(WidgetState::PRESSED, false);
        true
    }
}

/// A button that flips a boolean on every click.
///
/// The box on the left shows the state; an icon replaces it when set.
pub struct Checkbox {
    button: Button,
    checked: bool,
    icon: Option<ImageId>,
    on_change: Option<ToggleCallback>,
}

impl Checkbox {
    pub fn new(text: impl Into<String>, checked: bool) -> Self {
        Self {
            button: Button::new(text),
            checked,
            icon: None,
            on_change: None,
        }
    }

    pub fn with_icon(mut self, icon: ImageId) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(&mut EventCx<'_>, bool) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the state without running the callback.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn text(&self) -> &str {
        self.button.text()
    }

    fn check_box(bounds: Rect, margin: Point) -> Rect {
        let side = bounds.height() - margin.y * 2;
        Rect::from_min_size(bounds.min + margin, Point::splat(side.max(0)))
    }
}

impl std::fmt::Debug for Checkbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkbox")
            .field("button", &self.button)
            .field("checked", &self.checked)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

impl Behavior for Checkbox {
    fn debug_name(&self) -> &'static str {
        "Checkbox"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        let bounds = cx.bounds();
        let style = cx.style();
        style.draw_box(surface, bounds);

        let check = Self::check_box(bounds, style.margin);
        match self.icon {
            Some(icon) => surface.draw_image(
                icon,
                check.min,
                Rect::from_min_size(Point::ZERO, check.size()),
            ),
            None => {
                let check_style = cx.base_style().check();
                check_style.draw_box(surface, check);
                if self.checked {
                    let mark = check.inset(Point::splat(2));
                    surface.stroke_line(mark.min, mark.max, check_style.stroke, check_style.fore);
                    surface.stroke_line(
                        Point::new(mark.min.x, mark.max.y),
                        Point::new(mark.max.x, mark.min.y),
                        check_style.stroke,
                        check_style.fore,
                    );
                }
            }
        }
        let caption = Point::new(check.max.x, bounds.min.y);
        self.button.draw_caption(cx, surface, caption);
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

impl MouseHandler for Checkbox {
    fn on_mouse_press(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        self.button.on_mouse_press(cx, event)
    }

    fn on_mouse_release(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        if self.button.release(cx, event.at) {
            self.checked = !self.checked;
            if let Some(callback) = self.on_change.as_mut() {
                callback(cx, self.checked);
            }
        }
        true
    }
}

impl ActionHandler for Checkbox {
    fn on_blur(&mut self, cx: &mut EventCx<'_>, event: &ActionEvent) -> bool {
        self.button.on_blur(cx, event)
    }
}

impl Root {
    pub fn add_button(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        text: impl Into<String>,
        on_click: impl FnMut(&mut EventCx<'_>) + 'static,
    ) -> NodeId {
        let node = self.node(Button::new(text).on_click(on_click), bounds);
        self.add(parent, node)
    }

    pub fn add_checkbox(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        text: impl Into<String>,
        checked: bool,
        on_change: impl FnMut(&mut EventCx<'_>, bool) + 'static,
    ) -> NodeId {
        let node = self.node(Checkbox::new(text, checked).on_change(on_change), bounds);
        self.add(parent, node)
    }
}
