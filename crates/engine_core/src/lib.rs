//! Core engine types for the orrery viewer: frame timing plus the math and
//! ECS re-exports every other crate builds on.

pub mod time;

pub use time::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
