//! Host input snapshot and its translation into events.
//!
//! The host fills an [`InputSnapshot`] once per frame with whatever its
//! platform layer sampled. [`InputTranslator`] turns it into an ordered list
//! of [`Event`]s: pad events first, then keys, text, touches and finally the
//! mouse. Handlers may rely on that order.

use crate::config::UiConfig;
use crate::event::{
    Event, KeyEvent, KeyKind, MouseEvent, MouseKind, PadEvent, PadKind, TouchEvent, TouchKind,
};
use bitflags::bitflags;
use tinsel_core::geometry::Point;
use tinsel_core::profiling::profile_function;

/// Keys the toolkit gives meaning to. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    Space,
    F2,
    /// Host-specific key code.
    Other(u32),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
    Other(u8),
}

bitflags! {
    /// Keyboard modifiers held while an event was sampled.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT   = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT     = 1 << 2;
        const META    = 1 << 3;
    }
}

/// How a button or key changed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Pressed,
    Held,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonInput<B> {
    pub button: B,
    pub phase: Phase,
    /// Frames the button has been down.
    pub duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PadInput {
    pub pad: u32,
    pub buttons: Vec<ButtonInput<u32>>,
    pub axes: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchInput {
    pub touch: u64,
    pub phase: Phase,
    pub at: Point,
    pub delta: Point,
    pub duration: u32,
}

/// Text typed into an IME-backed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImeField {
    pub field: usize,
    pub text: String,
}

/// Everything the host sampled during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub pads_attached: Vec<u32>,
    pub pads_detached: Vec<u32>,
    pub pads: Vec<PadInput>,
    pub keys: Vec<ButtonInput<Key>>,
    pub modifiers: Modifiers,
    /// Text composed outside of any IME field.
    pub text: String,
    pub ime: Vec<ImeField>,
    pub touches: Vec<TouchInput>,
    pub cursor: Point,
    pub buttons: Vec<ButtonInput<MouseButton>>,
    pub wheel: Point,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with the cursor at `cursor` and nothing else going on.
    pub fn at(cursor: Point) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    pub fn move_mouse(mut self, cursor: Point) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn press_mouse(self, button: MouseButton) -> Self {
        self.mouse(button, Phase::Pressed, 0)
    }

    pub fn hold_mouse(self, button: MouseButton, duration: u32) -> Self {
        self.mouse(button, Phase::Held, duration)
    }

    pub fn release_mouse(self, button: MouseButton) -> Self {
        self.mouse(button, Phase::Released, 0)
    }

    pub fn mouse(mut self, button: MouseButton, phase: Phase, duration: u32) -> Self {
        self.buttons.push(ButtonInput {
            button,
            phase,
            duration,
        });
        self
    }

    pub fn scroll(mut self, wheel: Point) -> Self {
        self.wheel = wheel;
        self
    }

    pub fn press_key(self, key: Key) -> Self {
        self.key(key, Phase::Pressed, 0)
    }

    pub fn hold_key(self, key: Key, duration: u32) -> Self {
        self.key(key, Phase::Held, duration)
    }

    pub fn release_key(self, key: Key) -> Self {
        self.key(key, Phase::Released, 0)
    }

    pub fn key(mut self, key: Key, phase: Phase, duration: u32) -> Self {
        self.keys.push(ButtonInput {
            button: key,
            phase,
            duration,
        });
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn type_text(mut self, text: &str) -> Self {
        self.text.push_str(text);
        self
    }

    pub fn ime_text(mut self, field: usize, text: &str) -> Self {
        self.ime.push(ImeField {
            field,
            text: text.to_string(),
        });
        self
    }

    pub fn touch(mut self, touch: u64, phase: Phase, at: Point) -> Self {
        self.touches.push(TouchInput {
            touch,
            phase,
            at,
            delta: Point::ZERO,
            duration: 0,
        });
        self
    }

    pub fn attach_pad(mut self, pad: u32) -> Self {
        self.pads_attached.push(pad);
        self
    }

    pub fn detach_pad(mut self, pad: u32) -> Self {
        self.pads_detached.push(pad);
        self
    }

    pub fn pad_button(mut self, pad: u32, button: u32, phase: Phase, duration: u32) -> Self {
        let input = ButtonInput {
            button,
            phase,
            duration,
        };
        match self.pads.iter_mut().find(|p| p.pad == pad) {
            Some(existing) => existing.buttons.push(input),
            None => self.pads.push(PadInput {
                pad,
                buttons: vec![input],
                axes: Vec::new(),
            }),
        }
        self
    }

    pub fn pad_axes(mut self, pad: u32, axes: &[f32]) -> Self {
        match self.pads.iter_mut().find(|p| p.pad == pad) {
            Some(existing) => existing.axes = axes.to_vec(),
            None => self.pads.push(PadInput {
                pad,
                buttons: Vec::new(),
                axes: axes.to_vec(),
            }),
        }
        self
    }
}

/// Converts snapshots into ordered event lists, remembering the cursor
/// between frames to derive move deltas.
#[derive(Debug, Clone, Default)]
pub struct InputTranslator {
    last_cursor: Option<Point>,
}

const PHASES: [Phase; 3] = [Phase::Pressed, Phase::Held, Phase::Released];

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position of the last translated snapshot.
    pub fn cursor(&self) -> Option<Point> {
        self.last_cursor
    }

    pub fn translate(&mut self, input: &InputSnapshot, config: &UiConfig) -> Vec<Event> {
        profile_function!();
        let mut events = Vec::new();
        Self::pad_events(input, config, &mut events);
        Self::key_events(input, &mut events);
        Self::touch_events(input, &mut events);
        self.mouse_events(input, &mut events);
        events
    }

    fn pad_events(input: &InputSnapshot, config: &UiConfig, events: &mut Vec<Event>) {
        for &pad in &input.pads_detached {
            events.push(Event::Pad(PadEvent::new(PadKind::Detach, pad)));
        }
        for &pad in &input.pads_attached {
            events.push(Event::Pad(PadEvent::new(PadKind::Attach, pad)));
        }
        for pad in &input.pads {
            for phase in PHASES {
                let kind = match phase {
                    Phase::Pressed => PadKind::Press,
                    Phase::Held => PadKind::Hold,
                    Phase::Released => PadKind::Release,
                };
                for button in pad.buttons.iter().filter(|b| b.phase == phase) {
                    let mut event = PadEvent::new(kind, pad.pad);
                    event.button = button.button;
                    event.duration = button.duration;
                    event.axes = pad.axes.clone();
                    events.push(Event::Pad(event));
                }
            }
            if pad.axes.iter().any(|axis| axis.abs() > config.pad_dead_zone) {
                let mut event = PadEvent::new(PadKind::Move, pad.pad);
                event.axes = pad.axes.clone();
                events.push(Event::Pad(event));
            }
        }
    }

    fn key_events(input: &InputSnapshot, events: &mut Vec<Event>) {
        for phase in PHASES {
            let kind = match phase {
                Phase::Pressed => KeyKind::Press,
                Phase::Held => KeyKind::Hold,
                Phase::Released => KeyKind::Release,
            };
            for key in input.keys.iter().filter(|k| k.phase == phase) {
                let mut event = KeyEvent::new(kind, key.button);
                event.duration = key.duration;
                event.modifiers = input.modifiers;
                events.push(Event::Key(event));
            }
        }
        if !input.text.is_empty() {
            let mut event = KeyEvent::text(&input.text, None);
            event.modifiers = input.modifiers;
            events.push(Event::Key(event));
        }
        for field in input.ime.iter().filter(|f| !f.text.is_empty()) {
            let mut event = KeyEvent::text(&field.text, Some(field.field));
            event.modifiers = input.modifiers;
            events.push(Event::Key(event));
        }
    }

    fn touch_events(input: &InputSnapshot, events: &mut Vec<Event>) {
        for phase in PHASES {
            let kind = match phase {
                Phase::Pressed => TouchKind::Press,
                Phase::Held => TouchKind::Hold,
                Phase::Released => TouchKind::Release,
            };
            for touch in input.touches.iter().filter(|t| t.phase == phase) {
                events.push(Event::Touch(TouchEvent {
                    kind,
                    touch: touch.touch,
                    at: touch.at,
                    delta: touch.delta,
                    duration: touch.duration,
                }));
            }
        }
    }

    fn mouse_events(&mut self, input: &InputSnapshot, events: &mut Vec<Event>) {
        let at = input.cursor;
        let delta = self.last_cursor.map_or(Point::ZERO, |last| at - last);
        if self.last_cursor != Some(at) {
            let mut event = MouseEvent::new(MouseKind::Move, at);
            event.delta = delta;
            events.push(Event::Mouse(event));
        }
        self.last_cursor = Some(at);

        for phase in PHASES {
            let kind = match phase {
                Phase::Pressed => MouseKind::Press,
                Phase::Held => MouseKind::Hold,
                Phase::Released => MouseKind::Release,
            };
            for button in input.buttons.iter().filter(|b| b.phase == phase) {
                let mut event = MouseEvent::new(kind, at).with_button(button.button);
                event.duration = button.duration;
                events.push(Event::Mouse(event));
            }
        }

        if input.wheel != Point::ZERO {
            let mut event = MouseEvent::new(MouseKind::Wheel, at);
            event.wheel = input.wheel;
            events.push(Event::Mouse(event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Message;

    fn messages(events: &[Event]) -> Vec<Message> {
        events.iter().map(Event::message).collect()
    }

    #[test]
    fn test_families_are_ordered() {
        let input = InputSnapshot::at(Point::new(3, 4))
            .press_mouse(MouseButton::Left)
            .touch(1, Phase::Pressed, Point::new(1, 1))
            .type_text("a")
            .press_key(Key::Enter)
            .pad_button(0, 2, Phase::Pressed, 0);
        let events = InputTranslator::new().translate(&input, &UiConfig::default());
        assert_eq!(
            messages(&events),
            vec![
                Message::Pad(PadKind::Press),
                Message::Key(KeyKind::Press),
                Message::Key(KeyKind::Text),
                Message::Touch(TouchKind::Press),
                Message::Mouse(MouseKind::Move),
                Message::Mouse(MouseKind::Press),
            ]
        );
    }

    #[test]
    fn test_move_only_when_cursor_changes() {
        let config = UiConfig::default();
        let mut translator = InputTranslator::new();
        let first = translator.translate(&InputSnapshot::at(Point::new(10, 10)), &config);
        assert_eq!(first.len(), 1);

        let same = translator.translate(&InputSnapshot::at(Point::new(10, 10)), &config);
        assert!(same.is_empty());

        let moved = translator.translate(&InputSnapshot::at(Point::new(14, 7)), &config);
        match &moved[0] {
            Event::Mouse(event) => assert_eq!(event.delta, Point::new(4, -3)),
            other => panic!("expected a mouse move, got {:?}", other),
        }
    }

    #[test]
    fn test_pad_dead_zone() {
        let config = UiConfig::default();
        let mut translator = InputTranslator::new();
        translator.translate(&InputSnapshot::new(), &config);

        let quiet = translator.translate(&InputSnapshot::new().pad_axes(0, &[0.05, -0.1]), &config);
        assert!(quiet.is_empty());

        let moved = translator.translate(&InputSnapshot::new().pad_axes(0, &[0.5, 0.0]), &config);
        assert_eq!(messages(&moved), vec![Message::Pad(PadKind::Move)]);
    }

    #[test]
    fn test_ime_fields_follow_general_text() {
        let config = UiConfig::default();
        let mut translator = InputTranslator::new();
        translator.translate(&InputSnapshot::new(), &config);
        let input = InputSnapshot::new().ime_text(2, "ime").type_text("plain");
        let events = translator.translate(&input, &config);
        let fields: Vec<_> = events
            .iter()
            .map(|event| match event {
                Event::Key(key) => (key.text.clone(), key.field),
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(
            fields,
            vec![("plain".to_string(), None), ("ime".to_string(), Some(2))]
        );
    }
}
