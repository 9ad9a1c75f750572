//! Procedural generation for planet surfaces, ring systems, and the starfield.

pub mod starfield;
pub mod textures;

pub use starfield::*;
pub use textures::*;
