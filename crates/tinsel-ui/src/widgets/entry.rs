//! Single-line text entry.
//!
//! The buffer is edited through a column cursor that always stays within
//! `0..=len`. Editing keys repeat while held, after
//! [`UiConfig::key_repeat_delay`](crate::config::UiConfig::key_repeat_delay) frames.

use crate::draw::{Surface, TextMetrics};
use crate::event::{ActionEvent, Event, KeyEvent, MouseEvent};
use crate::input::Key;
use crate::root::Root;
use crate::state::WidgetState;
use crate::style::{ImageId, Style};
use crate::tree::NodeId;
use crate::widget::{ActionHandler, Behavior, EventCx, KeyHandler, MouseHandler, RenderCx};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tinsel_core::geometry::{Point, Rect};

pub type ChangeCallback = Box<dyn FnMut(&mut EventCx<'_>, &str)>;

pub struct Entry {
    text: String,
    cursor: usize,
    label: Option<String>,
    icon: Option<ImageId>,
    field: Option<usize>,
    on_change: Option<ChangeCallback>,
}

impl Entry {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            label: None,
            icon: None,
            field: None,
            on_change: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: ImageId) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Accept composed text from IME field `field` in addition to general text.
    pub fn with_field(mut self, field: usize) -> Self {
        self.field = Some(field);
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(&mut EventCx<'_>, &str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the buffer and moves the cursor to its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Buffer length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.len());
    }

    pub fn move_left(&mut self) -> bool {
        let moved = self.cursor > 0;
        self.cursor = self.cursor.saturating_sub(1);
        moved
    }

    pub fn move_right(&mut self) -> bool {
        let moved = self.cursor < self.len();
        self.set_cursor(self.cursor + 1);
        moved
    }

    pub fn home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn end(&mut self) -> bool {
        let len = self.len();
        let moved = self.cursor != len;
        self.cursor = len;
        moved
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        true
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        true
    }

    /// Inserts `run` at the cursor and advances past it. Control characters
    /// are dropped.
    pub fn insert(&mut self, run: &str) -> bool {
        let printable: String = run.chars().filter(|c| !c.is_control()).collect();
        if printable.is_empty() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, &printable);
        self.cursor += printable.chars().count();
        true
    }

    fn byte_offset(&self, column: usize) -> usize {
        self.text
            .char_indices()
            .nth(column)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn prefix(&self, column: usize) -> &str {
        &self.text[..self.byte_offset(column)]
    }

    fn label_width(&self, metrics: &dyn TextMetrics, style: Style) -> i32 {
        self.label
            .as_deref()
            .map_or(0, |label| style.measure_text(metrics, label).x + style.margin.x * 2)
    }

    /// The editable part of `bounds`, right of the label and icon.
    fn field_rect(&self, bounds: Rect, metrics: &dyn TextMetrics, style: Style) -> Rect {
        let mut field = bounds;
        field.min.x = (field.min.x + self.label_width(metrics, style)).min(field.max.x);
        field
    }

    fn text_origin(&self, field: Rect) -> Point {
        match self.icon {
            Some(_) => Point::new(field.min.x + field.height(), field.min.y),
            None => field.min,
        }
    }

    /// Applies one editing key. Returns whether the key is an entry key.
    fn edit(&mut self, cx: &mut EventCx<'_>, key: Key) -> bool {
        match key {
            Key::Left => {
                self.move_left();
            }
            Key::Right => {
                self.move_right();
            }
            Key::Home => {
                self.home();
            }
            Key::End => {
                self.end();
            }
            Key::Backspace => {
                self.backspace();
            }
            Key::Delete => {
                self.delete();
            }
            Key::Enter => {
                tracing::debug!(id = ?cx.id(), text = %self.text, "Entry committed");
                if let Some(callback) = self.on_change.as_mut() {
                    callback(cx, &self.text);
                }
            }
            Key::Tab | Key::F2 => cx.release_focus(),
            _ => return false,
        }
        true
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("text", &self.text)
            .field("cursor", &self.cursor)
            .field("label", &self.label)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl Behavior for Entry {
    fn debug_name(&self) -> &'static str {
        "Entry"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        let bounds = cx.bounds();
        let style = cx.style();
        if let Some(label) = &self.label {
            cx.base_style().draw_text(surface, bounds.min, label);
        }
        let field = self.field_rect(bounds, &*surface, style);
        style.draw_box(surface, field);
        if let Some(icon) = self.icon {
            let side = field.height();
            let src = Rect::from_min_size(Point::ZERO, Point::splat(side));
            surface.draw_image(icon, field.min, src);
        }
        let origin = self.text_origin(field);
        style.draw_text(surface, origin, &self.text);

        if cx.state().contains(WidgetState::FOCUS) {
            let caret = style.measure_text(&*surface, self.prefix(self.cursor)).x;
            let x = origin.x + style.margin.x + caret;
            surface.stroke_line(
                Point::new(x, field.min.y + style.margin.y),
                Point::new(x, field.max.y - style.margin.y),
                style.stroke,
                style.writing,
            );
        }
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }

    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        Some(self)
    }

    fn as_mouse_handler(&mut self) -> Option<&mut dyn MouseHandler> {
        Some(self)
    }

    fn as_action_handler(&mut self) -> Option<&mut dyn ActionHandler> {
        Some(self)
    }
}

impl KeyHandler for Entry {
    fn on_key_press(&mut self, cx: &mut EventCx<'_>, event: &KeyEvent) -> bool {
        self.edit(cx, event.key)
    }

    fn on_key_hold(&mut self, cx: &mut EventCx<'_>, event: &KeyEvent) -> bool {
        let repeatable = matches!(
            event.key,
            Key::Left | Key::Right | Key::Backspace | Key::Delete
        );
        repeatable && cx.config().should_repeat(event.duration) && self.edit(cx, event.key)
    }

    fn on_key_text(&mut self, _cx: &mut EventCx<'_>, event: &KeyEvent) -> bool {
        if event.field.is_some() && event.field != self.field {
            return false;
        }
        self.insert(&event.text)
    }
}

impl MouseHandler for Entry {
    /// Places the cursor at the column nearest to the pointer.
    fn on_mouse_press(&mut self, cx: &mut EventCx<'_>, event: &MouseEvent) -> bool {
        let style = cx.style();
        let field = self.field_rect(cx.bounds(), cx.metrics(), style);
        let x = event.at.x - self.text_origin(field).x - style.margin.x;
        let mut column = 0;
        while column < self.len() {
            let left = style.measure_text(cx.metrics(), self.prefix(column)).x;
            let right = style.measure_text(cx.metrics(), self.prefix(column + 1)).x;
            if x < (left + right) / 2 {
                break;
            }
            column += 1;
        }
        self.cursor = column;
        true
    }
}

impl ActionHandler for Entry {
    fn on_blur(&mut self, cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        tracing::trace!(id = ?cx.id(), text = %self.text, "Entry lost focus");
        true
    }
}

impl Root {
    pub fn add_entry(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        text: impl Into<String>,
        on_change: impl FnMut(&mut EventCx<'_>, &str) + 'static,
    ) -> NodeId {
        let node = self.node(Entry::new(text).on_change(on_change), bounds);
        self.add(parent, node)
    }

    /// An entry editing `binding`, written back on enter.
    pub fn add_string_entry(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        binding: Rc<RefCell<String>>,
    ) -> NodeId {
        let text = binding.borrow().clone();
        self.add_entry(parent, bounds, text, move |_, text| {
            binding.replace(text.to_string());
        })
    }

    /// An entry editing the integer `binding`. Text that does not parse
    /// leaves the binding untouched.
    pub fn add_int_entry(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        binding: Rc<Cell<i32>>,
    ) -> NodeId {
        let text = binding.get().to_string();
        self.add_entry(parent, bounds, text, move |cx, text| match text.trim().parse() {
            Ok(value) => binding.set(value),
            Err(err) => tracing::warn!(id = ?cx.id(), text, %err, "Ignoring malformed integer"),
        })
    }
}
