//! Widget behaviors and the contexts they run in.

pub mod capability;
pub mod context;

pub use capability::{
    ActionHandler, Behavior, KeyHandler, LayoutHandler, MouseHandler, PadHandler, TouchHandler,
    dispatch,
};
pub use context::{EventCx, RenderCx};
