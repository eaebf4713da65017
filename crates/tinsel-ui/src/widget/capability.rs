//! Behavior traits and capability-based dispatch.
//!
//! Every widget node owns one boxed [`Behavior`]. Instead of one large
//! interface with a method per message, a behavior opts into whole event
//! families by answering the capability queries (`as_mouse_handler`,
//! `as_key_handler`, ...) with `Some(self)`. The family traits give every
//! message a default that reports "not handled", so an implementation only
//! overrides the messages it cares about.
//!
//! [`dispatch`] switches on the event tag once and calls exactly one method:
//! the matching family method when the capability is present, otherwise the
//! behavior's generic [`Behavior::handle`] fallback.
//!
//! # Example
//!
//! ```
//! use tinsel_ui::draw::Surface;
//! use tinsel_ui::event::{Event, MouseEvent};
//! use tinsel_ui::widget::{Behavior, EventCx, MouseHandler, RenderCx};
//!
//! struct Clicky {
//!     clicks: u32,
//! }
//!
//! impl MouseHandler for Clicky {
//!     fn on_mouse_press(&mut self, _cx: &mut EventCx<'_>, _event: &MouseEvent) -> bool {
//!         self.clicks += 1;
//!         true
//!     }
//! }
//!
//! impl Behavior for Clicky {
//!     fn debug_name(&self) -> &'static str {
//!         "Clicky"
//!     }
//!
//!     fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
//!         cx.style().draw_box(surface, cx.bounds());
//!     }
//!
//!     fn handle(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
//!         false
//!     }
//!
//!     fn as_mouse_handler(&mut self) -> Option<&mut dyn MouseHandler> {
//!         Some(self)
//!     }
//! }
//! ```

use super::context::{EventCx, RenderCx};
use crate::draw::Surface;
use crate::event::{
    ActionEvent, ActionKind, Event, KeyEvent, KeyKind, LayoutEvent, LayoutKind, MouseEvent,
    MouseKind, PadEvent, PadKind, TouchEvent, TouchKind,
};
use std::any::Any;
use tinsel_core::profiling::profile_function;

/// Logic and rendering of one widget kind.
pub trait Behavior: Any {
    /// Name used in logs and debug output.
    fn debug_name(&self) -> &'static str;

    /// Draws the widget. Containers call [`RenderCx::render_children`].
    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface);

    /// Fallback for events whose family this behavior has no capability for.
    fn handle(&mut self, cx: &mut EventCx<'_>, event: &Event) -> bool;

    fn as_pad_handler(&mut self) -> Option<&mut dyn PadHandler> {
        None
    }

    fn as_key_handler(&mut self) -> Option<&mut dyn KeyHandler> {
        None
    }

    fn as_touch_handler(&mut self) -> Option<&mut dyn TouchHandler> {
        None
    }

    fn as_mouse_handler(&mut self) -> Option<&mut dyn MouseHandler> {
        None
    }

    fn as_action_handler(&mut self) -> Option<&mut dyn ActionHandler> {
        None
    }

    fn as_layout_handler(&mut self) -> Option<&mut dyn LayoutHandler> {
        None
    }
}

pub trait PadHandler {
    fn on_pad_attach(&mut self, _cx: &mut EventCx<'_>, _event: &PadEvent) -> bool {
        false
    }

    fn on_pad_detach(&mut self, _cx: &mut EventCx<'_>, _event: &PadEvent) -> bool {
        false
    }

    fn on_pad_press(&mut self, _cx: &mut EventCx<'_>, _event: &PadEvent) -> bool {
        false
    }

    fn on_pad_hold(&mut self, _cx: &mut EventCx<'_>, _event: &PadEvent) -> bool {
        false
    }

    fn on_pad_release(&mut self, _cx: &mut EventCx<'_>, _event: &PadEvent) -> bool {
        false
    }

    fn on_pad_move(&mut self, _cx: &mut EventCx<'_>, _event: &PadEvent) -> bool {
        false
    }
}

pub trait KeyHandler {
    fn on_key_press(&mut self, _cx: &mut EventCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_hold(&mut self, _cx: &mut EventCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_release(&mut self, _cx: &mut EventCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_text(&mut self, _cx: &mut EventCx<'_>, _event: &KeyEvent) -> bool {
        false
    }
}

pub trait TouchHandler {
    fn on_touch_press(&mut self, _cx: &mut EventCx<'_>, _event: &TouchEvent) -> bool {
        false
    }

    fn on_touch_hold(&mut self, _cx: &mut EventCx<'_>, _event: &TouchEvent) -> bool {
        false
    }

    fn on_touch_release(&mut self, _cx: &mut EventCx<'_>, _event: &TouchEvent) -> bool {
        false
    }
}

pub trait MouseHandler {
    fn on_mouse_press(&mut self, _cx: &mut EventCx<'_>, _event: &MouseEvent) -> bool {
        false
    }

    fn on_mouse_hold(&mut self, _cx: &mut EventCx<'_>, _event: &MouseEvent) -> bool {
        false
    }

    fn on_mouse_release(&mut self, _cx: &mut EventCx<'_>, _event: &MouseEvent) -> bool {
        false
    }

    fn on_mouse_move(&mut self, _cx: &mut EventCx<'_>, _event: &MouseEvent) -> bool {
        false
    }

    fn on_mouse_wheel(&mut self, _cx: &mut EventCx<'_>, _event: &MouseEvent) -> bool {
        false
    }
}

pub trait ActionHandler {
    fn on_focus(&mut self, _cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        false
    }

    fn on_blur(&mut self, _cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        false
    }

    fn on_hover(&mut self, _cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        false
    }

    fn on_unhover(&mut self, _cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        false
    }

    fn on_drag(&mut self, _cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        false
    }

    fn on_drop(&mut self, _cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        false
    }

    fn on_mark(&mut self, _cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        false
    }

    fn on_unmark(&mut self, _cx: &mut EventCx<'_>, _event: &ActionEvent) -> bool {
        false
    }
}

pub trait LayoutHandler {
    fn on_layout_get(&mut self, _cx: &mut EventCx<'_>, _event: &LayoutEvent) -> bool {
        false
    }

    fn on_layout_set(&mut self, _cx: &mut EventCx<'_>, _event: &LayoutEvent) -> bool {
        false
    }
}

/// Routes `event` to exactly one handler of `behavior`.
pub fn dispatch(behavior: &mut dyn Behavior, cx: &mut EventCx<'_>, event: &Event) -> bool {
    profile_function!();
    match event {
        Event::Pad(e) => match behavior.as_pad_handler() {
            Some(h) => match e.kind {
                PadKind::Attach => h.on_pad_attach(cx, e),
                PadKind::Detach => h.on_pad_detach(cx, e),
                PadKind::Press => h.on_pad_press(cx, e),
                PadKind::Hold => h.on_pad_hold(cx, e),
                PadKind::Release => h.on_pad_release(cx, e),
                PadKind::Move => h.on_pad_move(cx, e),
            },
            None => behavior.handle(cx, event),
        },
        Event::Key(e) => match behavior.as_key_handler() {
            Some(h) => match e.kind {
                KeyKind::Press => h.on_key_press(cx, e),
                KeyKind::Hold => h.on_key_hold(cx, e),
                KeyKind::Release => h.on_key_release(cx, e),
                KeyKind::Text => h.on_key_text(cx, e),
            },
            None => behavior.handle(cx, event),
        },
        Event::Touch(e) => match behavior.as_touch_handler() {
            Some(h) => match e.kind {
                TouchKind::Press => h.on_touch_press(cx, e),
                TouchKind::Hold => h.on_touch_hold(cx, e),
                TouchKind::Release => h.on_touch_release(cx, e),
            },
            None => behavior.handle(cx, event),
        },
        Event::Mouse(e) => match behavior.as_mouse_handler() {
            Some(h) => match e.kind {
                MouseKind::Press => h.on_mouse_press(cx, e),
                MouseKind::Hold => h.on_mouse_hold(cx, e),
                MouseKind::Release => h.on_mouse_release(cx, e),
                MouseKind::Move => h.on_mouse_move(cx, e),
                MouseKind::Wheel => h.on_mouse_wheel(cx, e),
            },
            None => behavior.handle(cx, event),
        },
        Event::Action(e) => match behavior.as_action_handler() {
            Some(h) => match e.kind {
                ActionKind::Focus => h.on_focus(cx, e),
                ActionKind::Blur => h.on_blur(cx, e),
                ActionKind::Hover => h.on_hover(cx, e),
                ActionKind::Unhover => h.on_unhover(cx, e),
                ActionKind::Drag => h.on_drag(cx, e),
                ActionKind::Drop => h.on_drop(cx, e),
                ActionKind::Mark => h.on_mark(cx, e),
                ActionKind::Unmark => h.on_unmark(cx, e),
            },
            None => behavior.handle(cx, event),
        },
        Event::Layout(e) => match behavior.as_layout_handler() {
            Some(h) => match e.kind {
                LayoutKind::Get => h.on_layout_get(cx, e),
                LayoutKind::Set => h.on_layout_set(cx, e),
            },
            None => behavior.handle(cx, event),
        },
    }
}
