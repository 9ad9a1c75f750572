//! Pointer picking against planet proxies, backed by Rapier3D.
//!
//! No dynamics run here: the collider set is a static query structure that
//! the viewer keeps in sync with planet positions each frame and casts
//! pointer rays into.

pub mod scene;

pub use scene::*;

// Re-export common Rapier types
pub use rapier3d::prelude::ColliderHandle;
