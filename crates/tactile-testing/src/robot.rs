//! Robot-style driver for touch scenarios
//!
//! A [`GestureRobot`] is a window with a fake clock. Tests place drag areas
//! and plain items in it, then script fingers going down, moving and lifting
//! while checking what each target made of it.
//!
//! # Example
//!
//! ```
//! use tactile_gestures::{DragAreaConfig, DragStatus};
//! use tactile_geometry::Size;
//! use tactile_testing::GestureRobot;
//!
//! let mut robot = GestureRobot::new();
//! let area = robot.add_drag_area(Size::new(100.0, 100.0), DragAreaConfig::default());
//!
//! robot.press(0, 10.0, 10.0);
//! robot.advance_time(100);
//! robot.move_to(0, 60.0, 10.0);
//!
//! assert_eq!(robot.drag_area(area).status(), DragStatus::Recognized);
//! ```

use tactile_core::{
    FakeTimeSource, TargetId, TouchDispatcher, TouchEvent, TouchId, TouchPoint, TouchRegistry,
};
use tactile_geometry::{Point, Rect, SceneTransform, Size};
use tactile_gestures::{DirectionalDragArea, DragAreaConfig};

use crate::target::{PlainTouchArea, RobotTarget};

/// Clock value the robot starts at, so that press timestamps are never zero.
pub const ROBOT_START_TIME_MS: i64 = 10_000;

pub struct GestureRobot {
    clock: FakeTimeSource,
    window: TouchDispatcher<RobotTarget>,
    /// Fingers currently down, in press order, with their scene position.
    fingers: Vec<(TouchId, Point)>,
}

impl Default for GestureRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRobot {
    pub fn new() -> Self {
        let clock = FakeTimeSource::starting_at(ROBOT_START_TIME_MS);
        let window = TouchDispatcher::new(clock.shared());
        Self {
            clock,
            window,
            fingers: Vec::new(),
        }
    }

    pub fn clock(&self) -> &FakeTimeSource {
        &self.clock
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub fn registry(&self) -> &TouchRegistry {
        self.window.registry()
    }

    pub fn window(&mut self) -> &mut TouchDispatcher<RobotTarget> {
        &mut self.window
    }

    /// Adds a drag area at the scene origin, above everything added before.
    pub fn add_drag_area(&mut self, size: Size, config: DragAreaConfig) -> TargetId {
        self.add_drag_area_with_transform(size, config, SceneTransform::IDENTITY)
    }

    pub fn add_drag_area_with_transform(
        &mut self,
        size: Size,
        config: DragAreaConfig,
        transform: SceneTransform,
    ) -> TargetId {
        let area = DirectionalDragArea::new(size, config, self.clock.shared())
            .with_scene_transform(transform);
        self.window.insert(RobotTarget::DragArea(area))
    }

    pub fn add_plain_area(&mut self, bounds: Rect) -> TargetId {
        self.window
            .insert(RobotTarget::Plain(PlainTouchArea::new(bounds)))
    }

    pub fn remove(&mut self, id: TargetId) -> Option<RobotTarget> {
        self.window.remove(id)
    }

    /// # Panics
    ///
    /// If `id` is not a live drag area.
    pub fn drag_area(&self, id: TargetId) -> &DirectionalDragArea {
        self.window
            .target(id)
            .and_then(RobotTarget::as_drag_area)
            .unwrap_or_else(|| panic!("{id} is not a drag area"))
    }

    /// # Panics
    ///
    /// If `id` is not a live drag area.
    pub fn drag_area_mut(&mut self, id: TargetId) -> &mut DirectionalDragArea {
        self.window
            .target_mut(id)
            .and_then(RobotTarget::as_drag_area_mut)
            .unwrap_or_else(|| panic!("{id} is not a drag area"))
    }

    /// # Panics
    ///
    /// If `id` is not a live plain area.
    pub fn plain_area(&self, id: TargetId) -> &PlainTouchArea {
        self.window
            .target(id)
            .and_then(RobotTarget::as_plain)
            .unwrap_or_else(|| panic!("{id} is not a plain area"))
    }

    pub fn set_drag_area_enabled(&mut self, id: TargetId, enabled: bool) {
        self.window.update_target(id, |target, ctx| {
            if let Some(area) = target.as_drag_area_mut() {
                area.set_enabled(enabled, ctx);
            }
        });
    }

    pub fn set_drag_area_visible(&mut self, id: TargetId, visible: bool) {
        self.window.update_target(id, |target, ctx| {
            if let Some(area) = target.as_drag_area_mut() {
                area.set_visible(visible, ctx);
            }
        });
    }

    /// Current scene position of a finger that is down.
    pub fn finger(&self, id: TouchId) -> Option<Point> {
        self.fingers
            .iter()
            .find(|(finger, _)| *finger == id)
            .map(|(_, pos)| *pos)
    }

    pub fn fingers_down(&self) -> usize {
        self.fingers.len()
    }

    /// Sends a custom event as is, bypassing finger bookkeeping.
    pub fn dispatch(&mut self, event: &TouchEvent) {
        self.window.dispatch(event);
    }

    /// Puts a finger down. Fingers already down are reported stationary.
    pub fn press(&mut self, id: TouchId, x: f32, y: f32) {
        let pos = Point::new(x, y);
        let mut event = self.stationary_except(&[id]);
        event.push(TouchPoint::pressed(id, pos));
        self.fingers.retain(|(finger, _)| *finger != id);
        self.fingers.push((id, pos));
        self.window.dispatch(&event);
    }

    /// Puts several fingers down within a single event.
    pub fn press_many(&mut self, presses: &[(TouchId, f32, f32)]) {
        let ids: Vec<TouchId> = presses.iter().map(|&(id, _, _)| id).collect();
        let mut event = self.stationary_except(&ids);
        for &(id, x, y) in presses {
            let pos = Point::new(x, y);
            event.push(TouchPoint::pressed(id, pos));
            self.fingers.retain(|(finger, _)| *finger != id);
            self.fingers.push((id, pos));
        }
        self.window.dispatch(&event);
    }

    pub fn move_to(&mut self, id: TouchId, x: f32, y: f32) {
        let pos = Point::new(x, y);
        if self.finger(id).is_none() {
            log::warn!("moving finger {id} which is not down");
        }
        let mut event = self.stationary_except(&[id]);
        event.push(TouchPoint::moved(id, pos));
        if let Some(finger) = self.fingers.iter_mut().find(|(finger, _)| *finger == id) {
            finger.1 = pos;
        }
        self.window.dispatch(&event);
    }

    pub fn move_by(&mut self, id: TouchId, dx: f32, dy: f32) {
        let current = self.finger(id).unwrap_or(Point::ZERO);
        self.move_to(id, current.x + dx, current.y + dy);
    }

    /// Lifts a finger where it currently is.
    pub fn release(&mut self, id: TouchId) {
        let pos = self.finger(id).unwrap_or(Point::ZERO);
        self.release_at(id, pos.x, pos.y);
    }

    pub fn release_at(&mut self, id: TouchId, x: f32, y: f32) {
        let mut event = self.stationary_except(&[id]);
        event.push(TouchPoint::released(id, Point::new(x, y)));
        self.fingers.retain(|(finger, _)| *finger != id);
        self.window.dispatch(&event);
    }

    /// Cancels every finger that is down, as a window losing focus would.
    pub fn cancel_all(&mut self) {
        let event: TouchEvent = self
            .fingers
            .drain(..)
            .map(|(id, pos)| TouchPoint::cancelled(id, pos))
            .collect();
        if !event.is_empty() {
            self.window.dispatch(&event);
        }
    }

    /// Drags a finger from its current position in `steps` equal moves,
    /// advancing the clock by `step_ms` before each one.
    pub fn drag_by(&mut self, id: TouchId, dx: f32, dy: f32, steps: u32, step_ms: i64) {
        let start = self.finger(id).unwrap_or(Point::ZERO);
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.advance_time(step_ms);
            self.move_to(id, start.x + dx * t, start.y + dy * t);
        }
    }

    /// Advances the clock and fires whatever timers expired on the way.
    pub fn advance_time(&mut self, msecs: i64) {
        self.clock.advance(msecs);
        self.window.process_timers();
    }

    pub fn process_timers(&mut self) {
        self.window.process_timers();
    }

    fn stationary_except(&self, skip: &[TouchId]) -> TouchEvent {
        self.fingers
            .iter()
            .filter(|(finger, _)| !skip.contains(finger))
            .map(|(finger, pos)| TouchPoint::stationary(*finger, *pos))
            .collect()
    }
}
