//! Integer vector math re-exported from [`glam`].
//!
//! Screen coordinates in Tinsel are whole pixels, so the integer vector types
//! are the ones used throughout. The float types are re-exported for hosts
//! that convert to and from device coordinates.

pub use glam::{IVec2, Vec2, ivec2, vec2};
