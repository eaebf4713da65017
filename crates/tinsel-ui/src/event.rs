//! Typed UI events.
//!
//! Every input occurrence becomes one [`Event`], a tagged union over six
//! families. Each family carries only the payload relevant to it and a kind
//! telling which message of the family it is. [`Message`] is the flattened
//! kind, handy for logging and for asserting event order in tests.
//!
//! Events are plain values. The root they originate from is reachable
//! through the [`EventCx`](crate::widget::EventCx) passed alongside them.

use crate::input::{Key, Modifiers, MouseButton};
use tinsel_core::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadKind {
    Attach,
    Detach,
    Press,
    Hold,
    Release,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Press,
    Hold,
    Release,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchKind {
    Press,
    Hold,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseKind {
    Press,
    Hold,
    Release,
    Move,
    Wheel,
}

/// Interaction transitions emitted by the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Focus,
    Blur,
    Hover,
    Unhover,
    Drag,
    Drop,
    Mark,
    Unmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Asks the widget to report its preferred size in `desired`.
    Get,
    /// Assigns new bounds to the widget.
    Set,
}

/// The kind of an event, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    Pad(PadKind),
    Key(KeyKind),
    Touch(TouchKind),
    Mouse(MouseKind),
    Action(ActionKind),
    Layout(LayoutKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PadEvent {
    pub kind: PadKind,
    pub pad: u32,
    pub button: u32,
    pub duration: u32,
    pub axes: Vec<f32>,
}

impl PadEvent {
    pub fn new(kind: PadKind, pad: u32) -> Self {
        Self {
            kind,
            pad,
            button: 0,
            duration: 0,
            axes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyKind,
    pub key: Key,
    pub duration: u32,
    /// Composed text, only set for [`KeyKind::Text`].
    pub text: String,
    /// IME field the text belongs to; `None` for general input.
    pub field: Option<usize>,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(kind: KeyKind, key: Key) -> Self {
        Self {
            kind,
            key,
            duration: 0,
            text: String::new(),
            field: None,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn text(text: &str, field: Option<usize>) -> Self {
        Self {
            text: text.to_string(),
            field,
            ..Self::new(KeyKind::Text, Key::Other(0))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    pub kind: TouchKind,
    pub touch: u64,
    pub at: Point,
    pub delta: Point,
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseKind,
    pub at: Point,
    pub delta: Point,
    pub button: MouseButton,
    pub duration: u32,
    pub wheel: Point,
}

impl MouseEvent {
    pub fn new(kind: MouseKind, at: Point) -> Self {
        Self {
            kind,
            at,
            delta: Point::ZERO,
            button: MouseButton::Left,
            duration: 0,
            wheel: Point::ZERO,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEvent {
    pub kind: ActionKind,
    pub at: Point,
    pub delta: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEvent {
    pub kind: LayoutKind,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Pad(PadEvent),
    Key(KeyEvent),
    Touch(TouchEvent),
    Mouse(MouseEvent),
    Action(ActionEvent),
    Layout(LayoutEvent),
}

impl Event {
    pub fn action(kind: ActionKind, at: Point) -> Self {
        Self::Action(ActionEvent {
            kind,
            at,
            delta: Point::ZERO,
        })
    }

    pub fn drag(at: Point, delta: Point) -> Self {
        Self::Action(ActionEvent {
            kind: ActionKind::Drag,
            at,
            delta,
        })
    }

    pub fn layout(kind: LayoutKind, bounds: Rect) -> Self {
        Self::Layout(LayoutEvent { kind, bounds })
    }

    pub fn mouse(kind: MouseKind, at: Point) -> Self {
        Self::Mouse(MouseEvent::new(kind, at))
    }

    pub fn message(&self) -> Message {
        match self {
            Event::Pad(e) => Message::Pad(e.kind),
            Event::Key(e) => Message::Key(e.kind),
            Event::Touch(e) => Message::Touch(e.kind),
            Event::Mouse(e) => Message::Mouse(e.kind),
            Event::Action(e) => Message::Action(e.kind),
            Event::Layout(e) => Message::Layout(e.kind),
        }
    }

    /// Screen position carried by the event, if it has one.
    pub fn at(&self) -> Option<Point> {
        match self {
            Event::Touch(e) => Some(e.at),
            Event::Mouse(e) => Some(e.at),
            Event::Action(e) => Some(e.at),
            Event::Pad(_) | Event::Key(_) | Event::Layout(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_matches_family() {
        let at = Point::new(1, 2);
        assert_eq!(
            Event::mouse(MouseKind::Wheel, at).message(),
            Message::Mouse(MouseKind::Wheel)
        );
        assert_eq!(
            Event::action(ActionKind::Blur, at).message(),
            Message::Action(ActionKind::Blur)
        );
        assert_eq!(
            Event::Key(KeyEvent::text("x", None)).message(),
            Message::Key(KeyKind::Text)
        );
    }

    #[test]
    fn test_at_only_for_positional_events() {
        let at = Point::new(5, 6);
        assert_eq!(Event::drag(at, Point::ONE).at(), Some(at));
        assert_eq!(Event::Pad(PadEvent::new(PadKind::Attach, 0)).at(), None);
        assert_eq!(Event::layout(LayoutKind::Set, Rect::ZERO).at(), None);
    }
}
