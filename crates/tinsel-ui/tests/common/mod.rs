//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use tinsel_core::config::CoreConfig;
use tinsel_core::logging;
use tinsel_ui::draw::Surface;
use tinsel_ui::event::{Event, Message};
use tinsel_ui::geometry::{Point, Rect};
use tinsel_ui::input::{InputSnapshot, MouseButton};
use tinsel_ui::{Behavior, EventCx, NodeId, RenderCx, Root};

pub type Log = Rc<RefCell<Vec<(&'static str, Message)>>>;

/// A behavior that records every event it receives.
pub struct Recorder {
    name: &'static str,
    log: Log,
    claims: bool,
}

impl Recorder {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            claims: true,
        }
    }

    /// A recorder that reports every event as unhandled.
    pub fn passive(name: &'static str, log: &Log) -> Self {
        Self {
            claims: false,
            ..Self::new(name, log)
        }
    }
}

impl Behavior for Recorder {
    fn debug_name(&self) -> &'static str {
        "Recorder"
    }

    fn render(&self, cx: &RenderCx<'_>, surface: &mut dyn Surface) {
        cx.style().draw_box(surface, cx.bounds());
        cx.render_children(surface);
    }

    fn handle(&mut self, _cx: &mut EventCx<'_>, event: &Event) -> bool {
        self.log.borrow_mut().push((self.name, event.message()));
        self.claims
    }
}

/// A 320x240 root, with logging routed to the test output.
pub fn screen() -> Root {
    logging::init_with(&CoreConfig::default().with_filter("warn,tinsel_ui=trace"));
    Root::new(Rect::from_xywh(0, 0, 320, 240))
}

pub fn recorder(
    root: &mut Root,
    parent: NodeId,
    name: &'static str,
    log: &Log,
    bounds: Rect,
) -> NodeId {
    let node = root.node(Recorder::new(name, log), bounds);
    root.add(parent, node)
}

/// Position of the first `(name, message)` entry in the log.
pub fn position(log: &Log, name: &str, message: Message) -> Option<usize> {
    log.borrow()
        .iter()
        .position(|(n, m)| *n == name && *m == message)
}

pub fn click(root: &mut Root, at: Point) {
    click_with(root, at, MouseButton::Left);
}

pub fn click_with(root: &mut Root, at: Point, button: MouseButton) {
    root.update(&InputSnapshot::at(at).press_mouse(button));
    root.update(&InputSnapshot::at(at).release_mouse(button));
}

pub fn move_to(root: &mut Root, at: Point) {
    root.update(&InputSnapshot::at(at));
}
