//! Tunables of a [`DirectionalDragArea`](crate::DirectionalDragArea).

use crate::direction::Direction;
use crate::gesture_constants::{
    COMPOSITION_TIME_MS, DISTANCE_THRESHOLD, MAX_DAMPING_DELTA, MAX_DISTANCE, MAX_TIME_MS,
};
use tactile_core::UNBOUNDED_INTERVAL_MS;
use tactile_geometry::ScreenDensity;

/// Recognition parameters. Distances are in scene pixels, times in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAreaConfig {
    pub direction: Direction,
    pub distance_threshold: f32,
    pub max_distance: f32,
    pub max_damping_delta: f32,
    pub composition_time_ms: i64,
    pub max_time_ms: i64,
    pub immediate_recognition: bool,
    /// Recognize without ever claiming the touch, so whatever sits below
    /// keeps getting it.
    pub monitor_only: bool,
}

impl Default for DragAreaConfig {
    fn default() -> Self {
        Self::for_density(ScreenDensity::default())
    }
}

impl DragAreaConfig {
    pub fn for_density(density: ScreenDensity) -> Self {
        Self {
            direction: Direction::default(),
            distance_threshold: DISTANCE_THRESHOLD.to_px(density),
            max_distance: MAX_DISTANCE.to_px(density),
            max_damping_delta: MAX_DAMPING_DELTA.to_px(density),
            composition_time_ms: COMPOSITION_TIME_MS,
            max_time_ms: MAX_TIME_MS,
            immediate_recognition: false,
            monitor_only: false,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_distance_threshold(mut self, distance_threshold: f32) -> Self {
        self.distance_threshold = distance_threshold;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_max_damping_delta(mut self, max_damping_delta: f32) -> Self {
        self.max_damping_delta = max_damping_delta;
        self
    }

    pub fn with_composition_time_ms(mut self, composition_time_ms: i64) -> Self {
        self.composition_time_ms = composition_time_ms;
        self
    }

    pub fn with_max_time_ms(mut self, max_time_ms: i64) -> Self {
        self.max_time_ms = max_time_ms;
        self
    }

    pub fn with_immediate_recognition(mut self, immediate_recognition: bool) -> Self {
        self.immediate_recognition = immediate_recognition;
        self
    }

    pub fn with_monitor_only(mut self, monitor_only: bool) -> Self {
        self.monitor_only = monitor_only;
        self
    }

    /// No composition window and no time limit. Meant for tests and for
    /// hosts that cannot keep a steady clock.
    pub fn remove_time_constraints(&mut self) {
        self.composition_time_ms = 0;
        self.max_time_ms = UNBOUNDED_INTERVAL_MS;
    }

    /// Whether a press is recognized right away, without any threshold.
    pub fn recognition_is_disabled(&self) -> bool {
        self.immediate_recognition
            || (self.distance_threshold <= 0.0 && self.composition_time_ms <= 0)
    }

    /// A threshold that cannot be reached before `max_distance`, or a
    /// composition window outlasting `max_time_ms`, would reject every drag.
    pub fn recognition_properties_are_sane(&self) -> bool {
        self.recognition_is_disabled()
            || (self.distance_threshold < self.max_distance
                && self.composition_time_ms < self.max_time_ms)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
