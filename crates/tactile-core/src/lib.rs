//! Touch ownership runtime for Tactile
//!
//! Raw window touch events come in through a [`TouchDispatcher`]. The
//! [`TouchRegistry`] decides which [`TouchTarget`] gets to see each touch
//! point, letting several gesture recognizers compete for the same finger
//! without more than one of them ever winning it.

mod active_touches;
pub mod collections;
mod dispatcher;
mod error;
mod event;
mod pool;
mod registry;
mod target;
mod time;
mod timer;

pub use active_touches::ActiveTouchesInfo;
pub use dispatcher::TouchDispatcher;
pub use error::RegistryError;
pub use event::{
    RegistryNotification, TouchEvent, TouchId, TouchOwnershipEvent, TouchPoint, TouchPointState,
};
pub use pool::Pool;
pub use registry::{
    DeliveryPlan, RegistryConfig, TouchRegistry, DEFAULT_CANDIDATE_INACTIVITY_TIMEOUT_MS,
};
pub use target::{TargetId, TouchContext, TouchTarget};
pub use time::{FakeTimeSource, RealTimeSource, SharedTimeSource, TimeSource};
pub use timer::{SingleShotTimer, UNBOUNDED_INTERVAL_MS};

pub use tactile_geometry::{Point, Rect, SceneTransform, Size};

pub mod prelude {
    pub use crate::event::{TouchEvent, TouchId, TouchPoint, TouchPointState};
    pub use crate::target::{TargetId, TouchContext, TouchTarget};
    pub use crate::time::{SharedTimeSource, TimeSource};
    pub use crate::{TouchDispatcher, TouchRegistry};
}
