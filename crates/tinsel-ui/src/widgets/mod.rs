//! Built-in widget behaviors.
//!
//! Each module provides a behavior type plus the `Root::add_*` builders that
//! create and wire up nodes using it.

pub mod button;
pub mod chooser;
pub mod container;
pub mod entry;
pub mod label;
pub mod list;
pub mod menu;
pub mod slider;
pub mod title_bar;

pub use button::{Button, Checkbox, ClickCallback, ToggleCallback};
pub use chooser::{Chooser, Cursor, Frame, SelectCallback, Selection};
pub use container::Container;
pub use entry::{ChangeCallback, Entry};
pub use label::Label;
pub use list::{List, PickCallback};
pub use menu::{Bar, Item, Menu, close_menu_chain};
pub use slider::{Orientation, Slider, ValueCallback};
pub use title_bar::TitleBar;
