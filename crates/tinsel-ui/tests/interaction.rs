//! Integration tests for the root's interaction registers.
//!
//! These tests verify transition ordering, hit testing, register release on
//! hide and remove, and event routing to the fallback handler.

mod common;

use common::{Log, Recorder, move_to, position, recorder, screen};
use std::cell::Cell;
use std::rc::Rc;
use tinsel_ui::event::{
    ActionKind, Event, KeyEvent, KeyKind, Message, MouseKind, PadEvent, PadKind,
};
use tinsel_ui::geometry::{Point, Rect};
use tinsel_ui::input::{InputSnapshot, Key, MouseButton};
use tinsel_ui::{TreeError, WidgetState};

#[test]
fn test_unhover_before_hover() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let a = recorder(&mut root, root_id, "a", &log, Rect::from_xywh(0, 0, 50, 50));
    let root_id = root.id();
    let b = recorder(&mut root, root_id, "b", &log, Rect::from_xywh(60, 0, 50, 50));

    move_to(&mut root, Point::new(10, 10));
    assert_eq!(root.hover(), Some(a));
    move_to(&mut root, Point::new(70, 10));
    assert_eq!(root.hover(), Some(b));

    assert_eq!(
        *log.borrow(),
        vec![
            ("a", Message::Action(ActionKind::Hover)),
            ("a", Message::Mouse(MouseKind::Move)),
            ("a", Message::Action(ActionKind::Unhover)),
            ("b", Message::Action(ActionKind::Hover)),
            ("b", Message::Mouse(MouseKind::Move)),
        ]
    );
    assert!(!root.tree().state(a).contains(WidgetState::HOVER));
    assert!(root.tree().state(b).contains(WidgetState::HOVER));
}

#[test]
fn test_blur_before_focus() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let a = recorder(&mut root, root_id, "a", &log, Rect::from_xywh(0, 0, 50, 50));
    let root_id = root.id();
    let b = recorder(&mut root, root_id, "b", &log, Rect::from_xywh(60, 0, 50, 50));

    root.update(&InputSnapshot::at(Point::new(10, 10)).press_mouse(MouseButton::Left));
    assert_eq!(root.focus(), Some(a));
    assert_eq!(root.drag(), Some(a));
    root.update(&InputSnapshot::at(Point::new(70, 10)).press_mouse(MouseButton::Left));
    assert_eq!(root.focus(), Some(b));

    let blur = position(&log, "a", Message::Action(ActionKind::Blur));
    let focus = position(&log, "b", Message::Action(ActionKind::Focus));
    assert!(blur.is_some() && focus.is_some());
    assert!(blur < focus);
    assert!(root.tree().state(b).contains(WidgetState::FOCUS));
    assert!(!root.tree().state(a).contains(WidgetState::FOCUS));
}

#[test]
fn test_press_delivered_after_focus() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    recorder(&mut root, root_id, "a", &log, Rect::from_xywh(0, 0, 50, 50));

    root.dispatch(&Event::mouse(MouseKind::Press, Point::new(5, 5)));
    root.dispatch(&Event::mouse(MouseKind::Release, Point::new(5, 5)));
    assert_eq!(
        *log.borrow(),
        vec![
            ("a", Message::Action(ActionKind::Focus)),
            ("a", Message::Action(ActionKind::Drag)),
            ("a", Message::Mouse(MouseKind::Press)),
            ("a", Message::Action(ActionKind::Drop)),
            ("a", Message::Mouse(MouseKind::Release)),
        ]
    );
    assert_eq!(root.drag(), None);
}

#[test]
fn test_drag_while_over_dragged_widget() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    recorder(&mut root, root_id, "a", &log, Rect::from_xywh(0, 0, 50, 50));

    root.update(&InputSnapshot::at(Point::new(10, 10)).press_mouse(MouseButton::Left));
    log.borrow_mut().clear();
    move_to(&mut root, Point::new(20, 10));
    assert_eq!(*log.borrow(), vec![("a", Message::Action(ActionKind::Drag))]);
}

#[test]
fn test_higher_layer_wins_hit() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let low = recorder(&mut root, root_id, "low", &log, Rect::from_xywh(0, 0, 100, 100));
    let root_id = root.id();
    let high = recorder(&mut root, root_id, "high", &log, Rect::from_xywh(0, 0, 100, 100));
    let root_id = root.id();
    let later = recorder(&mut root, root_id, "later", &log, Rect::from_xywh(0, 0, 100, 100));
    if let Some(node) = root.tree_mut().node_mut(high) {
        node.layer = 2;
    }

    assert_eq!(root.tree().find_top(root.id(), Point::new(5, 5)), Some(high));
    if let Some(node) = root.tree_mut().node_mut(high) {
        node.layer = 0;
    }
    assert_eq!(root.tree().find_top(root.id(), Point::new(5, 5)), Some(later));
    assert_ne!(root.tree().find_top(root.id(), Point::new(5, 5)), Some(low));
}

#[test]
fn test_overflowing_child_is_hit_unless_clipped() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let panel = recorder(&mut root, root_id, "panel", &log, Rect::from_xywh(0, 0, 50, 20));
    let popup = recorder(&mut root, panel, "popup", &log, Rect::from_xywh(0, 20, 50, 50));

    assert_eq!(root.tree().find_top(root.id(), Point::new(5, 30)), Some(popup));
    root.tree_mut().update_state(panel, WidgetState::CLIP, true);
    assert_eq!(root.tree().find_top(root.id(), Point::new(5, 30)), None);
}

#[test]
fn test_hidden_and_paused_are_not_hit() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let under = recorder(&mut root, root_id, "under", &log, Rect::from_xywh(0, 0, 50, 50));
    let root_id = root.id();
    let over = recorder(&mut root, root_id, "over", &log, Rect::from_xywh(0, 0, 50, 50));
    assert_eq!(root.tree().find_top(root.id(), Point::new(5, 5)), Some(over));

    root.set_hidden(over, true);
    assert_eq!(root.tree().find_top(root.id(), Point::new(5, 5)), Some(under));
    root.tree_mut().update_state(under, WidgetState::PAUSED, true);
    assert_eq!(root.tree().find_top(root.id(), Point::new(5, 5)), None);
}

#[test]
fn test_hiding_releases_registers_with_leave_events() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let panel = recorder(&mut root, root_id, "panel", &log, Rect::from_xywh(0, 0, 100, 100));
    let child = recorder(&mut root, panel, "child", &log, Rect::from_xywh(10, 10, 20, 20));

    root.update(&InputSnapshot::at(Point::new(15, 15)).press_mouse(MouseButton::Left));
    assert_eq!(root.focus(), Some(child));
    assert_eq!(root.hover(), Some(child));
    log.borrow_mut().clear();

    root.set_hidden(panel, true);
    assert_eq!(root.focus(), None);
    assert_eq!(root.hover(), None);
    assert_eq!(root.drag(), None);
    assert!(position(&log, "child", Message::Action(ActionKind::Blur)).is_some());
    assert!(position(&log, "child", Message::Action(ActionKind::Unhover)).is_some());
    assert!(!root.tree().is_visible(child));
}

#[test]
fn test_removal_clears_registers() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let panel = recorder(&mut root, root_id, "panel", &log, Rect::from_xywh(0, 0, 100, 100));
    let child = recorder(&mut root, panel, "child", &log, Rect::from_xywh(10, 10, 20, 20));
    root.set_focus(Some(child));
    root.set_mark(Some(child));

    assert_eq!(root.remove(panel), Ok(2));
    assert_eq!(root.focus(), None);
    assert_eq!(root.mark(), None);
    assert!(!root.tree().contains(child));
    assert_eq!(root.remove(child), Err(TreeError::StaleHandle(child)));
    assert_eq!(root.remove(root.id()), Err(TreeError::RootRemoval));

    // events after removal do not reach the removed widgets
    log.borrow_mut().clear();
    root.update(&InputSnapshot::new().press_key(Key::Enter));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_keys_go_to_focus() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let a = recorder(&mut root, root_id, "a", &log, Rect::from_xywh(0, 0, 50, 50));
    let root_id = root.id();
    recorder(&mut root, root_id, "b", &log, Rect::from_xywh(60, 0, 50, 50));
    root.set_focus(Some(a));
    log.borrow_mut().clear();

    root.update(&InputSnapshot::at(Point::new(300, 200)).press_key(Key::Left).type_text("x"));
    assert_eq!(
        *log.borrow(),
        vec![
            ("a", Message::Key(KeyKind::Press)),
            ("a", Message::Key(KeyKind::Text)),
        ]
    );
}

#[test]
fn test_pad_prefers_mark_then_focus_then_fallback() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let marked = recorder(&mut root, root_id, "marked", &log, Rect::from_xywh(0, 0, 50, 50));
    let node = root.node(Recorder::passive("focused", &log), Rect::from_xywh(60, 0, 50, 50));
    let focused = root.add(root.id(), node);
    let fallbacks = Rc::new(Cell::new(0));
    let counter = fallbacks.clone();
    root.set_fallback(move |_| {
        counter.set(counter.get() + 1);
        true
    });

    let pad = Event::Pad(PadEvent::new(PadKind::Press, 0));
    root.set_focus(Some(focused));
    root.set_mark(Some(marked));
    log.borrow_mut().clear();
    assert!(root.dispatch(&pad));
    assert_eq!(*log.borrow(), vec![("marked", Message::Pad(PadKind::Press))]);

    root.set_mark(None);
    log.borrow_mut().clear();
    assert!(root.dispatch(&pad));
    assert_eq!(*log.borrow(), vec![("focused", Message::Pad(PadKind::Press))]);
    assert_eq!(fallbacks.get(), 1);
}

#[test]
fn test_unrouted_events_reach_fallback() {
    let mut root = screen();
    assert!(!root.dispatch(&Event::Key(KeyEvent::new(KeyKind::Press, Key::Enter))));
    assert!(!root.dispatch(&Event::action(ActionKind::Hover, Point::ZERO)));

    let seen = Rc::new(Cell::new(0));
    let counter = seen.clone();
    root.set_fallback(move |event| {
        counter.set(counter.get() + 1);
        matches!(event, Event::Action(_))
    });
    assert!(root.dispatch(&Event::action(ActionKind::Hover, Point::ZERO)));
    assert!(!root.dispatch(&Event::mouse(MouseKind::Wheel, Point::new(500, 500))));
    assert_eq!(seen.get(), 2);
}

#[test]
fn test_pad_events_precede_mouse_events() {
    let mut root = screen();
    let log = Log::default();
    let root_id = root.id();
    let a = recorder(&mut root, root_id, "a", &log, Rect::from_xywh(0, 0, 50, 50));
    root.set_focus(Some(a));
    log.borrow_mut().clear();

    let input = InputSnapshot::at(Point::new(5, 5))
        .press_mouse(MouseButton::Left)
        .press_key(Key::Space)
        .attach_pad(0);
    root.update(&input);
    let log = log.borrow();
    assert_eq!(log.first().map(|e| e.1), Some(Message::Pad(PadKind::Attach)));
    let key = log.iter().position(|e| e.1 == Message::Key(KeyKind::Press));
    let press = log.iter().position(|e| e.1 == Message::Mouse(MouseKind::Press));
    assert!(key < press);
}
