//! Gesture recognizers for Tactile
//!
//! Recognizers are [`TouchTarget`](tactile_core::TouchTarget)s that compete
//! for touches through the window's registry instead of grabbing them on
//! press.

mod config;
mod damper;
mod direction;
mod drag_area;
pub mod gesture_constants;

pub use config::DragAreaConfig;
pub use damper::{DampedPoint, Damper};
pub use direction::Direction;
pub use drag_area::{DirectionalDragArea, DragAreaSignal, DragStatus};

pub mod prelude {
    pub use crate::config::DragAreaConfig;
    pub use crate::direction::Direction;
    pub use crate::drag_area::{DirectionalDragArea, DragAreaSignal, DragStatus};
}
