//! Tinsel Core
//!
//! Shared primitives for the Tinsel UI toolkit: integer screen geometry, a
//! generational arena, and the logging and profiling setup used by every
//! crate in the workspace.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
