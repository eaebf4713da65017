//! Tinsel UI - a small retained-mode widget toolkit
//!
//! This crate provides the core of an immediate-input, retained-tree UI:
//! - An arena-backed widget tree with generational handles
//! - Behaviors that opt into event families by capability
//! - A root controller tracking hover, focus, drag and mark
//! - Built-in widgets: boxes, labels, buttons, entries, sliders, menus, ...
//! - Host-agnostic drawing through the [`Surface`](draw::Surface) trait
//!
//! ## Quick Start
//!
//! ```rust
//! use tinsel_ui::draw::DrawList;
//! use tinsel_ui::input::{InputSnapshot, MouseButton};
//! use tinsel_ui::geometry::{Point, Rect};
//! use tinsel_ui::Root;
//!
//! let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
//! let panel = root.add_box(root.id(), Rect::from_xywh(10, 10, 200, 100));
//! root.add_label(panel, Rect::from_xywh(15, 15, 100, 12), "Hello, World!");
//! root.add_button(panel, Rect::from_xywh(15, 40, 60, 14), "Click Me", |_| {});
//!
//! // Once per frame:
//! root.update(&InputSnapshot::at(Point::new(20, 45)).press_mouse(MouseButton::Left));
//! let mut list = DrawList::new();
//! root.render(&mut list);
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod event;
pub mod input;
pub mod interaction;
pub mod root;
pub mod state;
pub mod style;
pub mod tree;
pub mod widget;
pub mod widgets;

pub use tinsel_core::geometry;

// Re-export main types
pub use config::UiConfig;
pub use draw::{DrawCommand, DrawList, FixedMetrics, Surface, TextMetrics};
pub use error::{TreeError, TreeResult};
pub use event::Event;
pub use input::{InputSnapshot, InputTranslator};
pub use interaction::{Interaction, Role};
pub use root::Root;
pub use state::WidgetState;
pub use style::{Color, FontId, ImageId, Style};
pub use tree::{Node, NodeId, WidgetTree};
pub use widget::{Behavior, EventCx, RenderCx};
