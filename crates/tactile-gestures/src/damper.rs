//! Dead-band damping of touch positions.
//!
//! A damped value only follows its input once the input has moved more than
//! `max_delta` away from it, and then trails it by exactly `max_delta`. Small
//! back-and-forth jitter of a finger therefore never shows up as a change of
//! direction.

use tactile_geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Damper {
    value: f32,
    max_delta: f32,
}

impl Damper {
    pub fn new(max_delta: f32) -> Self {
        Self {
            value: 0.0,
            max_delta: max_delta.max(0.0),
        }
    }

    pub fn set_max_delta(&mut self, max_delta: f32) {
        self.max_delta = max_delta.max(0.0);
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    pub fn update(&mut self, input: f32) -> f32 {
        let delta = input - self.value;
        if delta > self.max_delta {
            self.value = input - self.max_delta;
        } else if delta < -self.max_delta {
            self.value = input + self.max_delta;
        }
        self.value
    }

    pub fn reset(&mut self, value: f32) {
        self.value = value;
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Damps both coordinates of a point independently.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DampedPoint {
    x: Damper,
    y: Damper,
}

impl DampedPoint {
    pub fn new(max_delta: f32) -> Self {
        Self {
            x: Damper::new(max_delta),
            y: Damper::new(max_delta),
        }
    }

    pub fn set_max_delta(&mut self, max_delta: f32) {
        self.x.set_max_delta(max_delta);
        self.y.set_max_delta(max_delta);
    }

    pub fn update(&mut self, input: Point) -> Point {
        Point::new(self.x.update(input.x), self.y.update(input.y))
    }

    pub fn reset(&mut self, value: Point) {
        self.x.reset(value.x);
        self.y.reset(value.y);
    }

    pub fn value(&self) -> Point {
        Point::new(self.x.value(), self.y.value())
    }
}
