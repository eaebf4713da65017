//! Counter Example - a headless run of the widget toolkit
//!
//! Builds a small window with a counter, a slider and a menu bar, then feeds
//! it a scripted sequence of input frames the way a host would, printing
//! the draw list of the last frame.
//!
//! Run with `RUST_LOG=tinsel_ui=trace` to watch the interaction registers.

use std::cell::Cell;
use std::rc::Rc;
use tinsel_core::logging;
use tinsel_core::profiling::{ProfilingBackend, init_profiling, new_frame};
use tinsel_ui::draw::DrawList;
use tinsel_ui::geometry::{Point, Rect};
use tinsel_ui::input::{InputSnapshot, MouseButton};
use tinsel_ui::widgets::Label;
use tinsel_ui::Root;

fn main() {
    logging::init();
    init_profiling(ProfilingBackend::InProcess);

    let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
    let bar = root.add_bar(root.id(), Rect::from_xywh(0, 0, 320, 12));
    let file = root.fit_item(bar, "File", |_| {});
    let menu = root.add_menu(file);
    root.fit_item(menu, "Reset", |_| tracing::info!("Reset selected"));

    let window = root.add_box(root.id(), Rect::from_xywh(20, 40, 200, 120));
    root.add_title_bar(window, 10, "Counter");
    let count = Rc::new(Cell::new(0));
    let label = root.add_label(window, Rect::from_xywh(30, 50, 100, 12), "Count: 0");

    let counter = count.clone();
    root.add_button(window, Rect::from_xywh(30, 70, 60, 14), "+1", move |cx| {
        counter.set(counter.get() + 1);
        if let Some(label) = cx.tree_mut().behavior_mut::<Label>(label) {
            label.set_text(format!("Count: {}", counter.get()));
        }
    });
    root.add_slider(window, Rect::from_xywh(30, 100, 104, 10), 0, 100, |_, value| {
        tracing::info!(value, "Slider moved");
    });

    let button = Point::new(40, 75);
    let frames = [
        InputSnapshot::at(button),
        InputSnapshot::at(button).press_mouse(MouseButton::Left),
        InputSnapshot::at(button).release_mouse(MouseButton::Left),
        InputSnapshot::at(button).press_mouse(MouseButton::Left),
        InputSnapshot::at(button).release_mouse(MouseButton::Left),
        InputSnapshot::at(Point::new(82, 105)).press_mouse(MouseButton::Left),
        InputSnapshot::at(Point::new(82, 105)).release_mouse(MouseButton::Left),
        InputSnapshot::at(Point::new(10, 5)).press_mouse(MouseButton::Left),
        InputSnapshot::at(Point::new(10, 5)).release_mouse(MouseButton::Left),
    ];

    let mut list = DrawList::new();
    for frame in &frames {
        new_frame();
        root.update(frame);
        list.clear();
        root.render(&mut list);
    }

    println!("count = {}", count.get());
    for command in list.commands() {
        println!("{command:?}");
    }
}
