//! Pure math for touch handling in Tactile
//!
//! This crate contains the geometry primitives, the local-to-scene affine
//! transform and the physical unit types used throughout the Tactile crates.

mod geometry;
mod transform;
mod unit;

pub use geometry::*;
pub use transform::*;
pub use unit::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::transform::SceneTransform;
    pub use crate::unit::{Mm, ScreenDensity};
}
