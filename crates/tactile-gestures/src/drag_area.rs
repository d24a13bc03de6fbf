//! Directional drag recognition.
//!
//! A [`DirectionalDragArea`] sits on top of other items and watches presses
//! without accepting them. While undecided it is merely a candidate owner of
//! the touch, so whatever lies below keeps getting the events. Only once the
//! finger has travelled far enough in the right direction does it claim the
//! touch from the [`TouchRegistry`](tactile_core::TouchRegistry), taking
//! delivery over from the item below.
//!
//! ```text
//!                 press                     far enough
//!  WaitingForTouch ────► Undecided ───────────────────────► Recognized
//!        ▲                   │  wrong direction, too far,        │
//!        │                   │  too slow, second finger,         │
//!        └───────────────────┴── release ◄───────────────────────┘
//! ```

use crate::config::DragAreaConfig;
use crate::damper::DampedPoint;
use crate::direction::Direction;
use crate::gesture_constants::PUBLIC_POS_SMOOTHING;
use smallvec::SmallVec;
use tactile_core::{
    ActiveTouchesInfo, SharedTimeSource, SingleShotTimer, TouchContext, TouchEvent, TouchId,
    TouchOwnershipEvent, TouchPoint, TouchTarget,
};
use tactile_geometry::{Point, Rect, SceneTransform, Size};

const LOG_TARGET: &str = "tactile::drag_area";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragStatus {
    #[default]
    WaitingForTouch,
    Undecided,
    Recognized,
}

/// Property changes of a drag area, in the order they happen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAreaSignal {
    StatusChanged(DragStatus),
    PressedChanged(bool),
    DraggingChanged(bool),
    TouchPosChanged(Point),
    TouchScenePosChanged(Point),
    DistanceChanged(f32),
    SceneDistanceChanged(f32),
}

type Listener = Box<dyn Fn(&DragAreaSignal)>;

pub struct DirectionalDragArea {
    config: DragAreaConfig,
    size: Size,
    transform: SceneTransform,
    /// Gesture axis in scene coordinates, normalized.
    scene_direction: Point,
    enabled: bool,
    visible: bool,

    status: DragStatus,
    touch_id: Option<TouchId>,
    start_pos: Point,
    start_scene_pos: Point,
    public_pos: Point,
    public_scene_pos: Point,
    damped_scene_pos: DampedPoint,
    previous_damped_scene_pos: Point,

    time_source: SharedTimeSource,
    active_touches: ActiveTouchesInfo,
    recognition_timer: SingleShotTimer,
    listeners: Vec<Listener>,
}

impl DirectionalDragArea {
    pub fn new(size: Size, config: DragAreaConfig, time_source: SharedTimeSource) -> Self {
        let mut area = Self {
            config,
            size,
            transform: SceneTransform::IDENTITY,
            scene_direction: config.direction.local_vector(),
            enabled: true,
            visible: true,
            status: DragStatus::WaitingForTouch,
            touch_id: None,
            start_pos: Point::ZERO,
            start_scene_pos: Point::ZERO,
            public_pos: Point::ZERO,
            public_scene_pos: Point::ZERO,
            damped_scene_pos: DampedPoint::new(config.max_damping_delta),
            previous_damped_scene_pos: Point::ZERO,
            active_touches: ActiveTouchesInfo::new(time_source.clone()),
            recognition_timer: SingleShotTimer::new(config.max_time_ms),
            time_source,
            listeners: Vec::new(),
        };
        area.update_scene_direction();
        area
    }

    pub fn with_scene_transform(mut self, transform: SceneTransform) -> Self {
        self.set_scene_transform(transform);
        self
    }

    /// Registers a listener for property changes.
    pub fn connect(&mut self, listener: impl Fn(&DragAreaSignal) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self, signal: DragAreaSignal) {
        for listener in &self.listeners {
            listener(&signal);
        }
    }

    pub fn config(&self) -> &DragAreaConfig {
        &self.config
    }

    /// Takes effect for the next gesture; one in flight keeps its start
    /// position but is evaluated against the new values.
    pub fn set_config(&mut self, config: DragAreaConfig) {
        self.config = config;
        self.damped_scene_pos.set_max_delta(config.max_damping_delta);
        self.recognition_timer.set_interval_ms(config.max_time_ms);
        self.update_scene_direction();
    }

    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if self.config.direction == direction {
            return;
        }
        self.config.direction = direction;
        self.update_scene_direction();
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_scene_transform(&mut self, transform: SceneTransform) {
        self.transform = transform;
        self.update_scene_direction();
    }

    fn update_scene_direction(&mut self) {
        let local = self.config.direction.local_vector();
        self.scene_direction = self.transform.map_vector_to_scene(local).normalized();
    }

    pub fn scene_direction(&self) -> Point {
        self.scene_direction
    }

    pub fn set_time_source(&mut self, time_source: SharedTimeSource) {
        self.active_touches.set_time_source(time_source.clone());
        self.time_source = time_source;
    }

    fn now(&self) -> i64 {
        self.time_source.msecs_since_reference()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool, ctx: &mut TouchContext<'_>) {
        self.enabled = enabled;
        self.give_up_if_disabled_or_invisible(ctx);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool, ctx: &mut TouchContext<'_>) {
        self.visible = visible;
        self.give_up_if_disabled_or_invisible(ctx);
    }

    fn give_up_if_disabled_or_invisible(&mut self, ctx: &mut TouchContext<'_>) {
        if self.is_interactive() {
            return;
        }
        if self.status != DragStatus::WaitingForTouch {
            log::debug!(target: LOG_TARGET, "giving up gesture, no longer interactive");
            self.give_up_touch(ctx);
        }
        self.active_touches.clear();
    }

    /// Forces the area back to `WaitingForTouch`, releasing whatever claim it
    /// held on its touch.
    pub fn reset(&mut self, ctx: &mut TouchContext<'_>) {
        if self.status != DragStatus::WaitingForTouch {
            self.give_up_touch(ctx);
        }
    }

    fn give_up_touch(&mut self, ctx: &mut TouchContext<'_>) {
        if let Some(touch) = self.touch_id {
            ctx.remove_candidate_owner_for_touch(touch);
            ctx.add_touch_watcher(touch);
        }
        self.set_status(DragStatus::WaitingForTouch);
    }

    pub fn status(&self) -> DragStatus {
        self.status
    }

    pub fn pressed(&self) -> bool {
        self.status != DragStatus::WaitingForTouch
    }

    pub fn dragging(&self) -> bool {
        self.status == DragStatus::Recognized
    }

    pub fn touch_id(&self) -> Option<TouchId> {
        self.touch_id
    }

    pub fn touch_pos(&self) -> Point {
        self.public_pos
    }

    pub fn touch_x(&self) -> f32 {
        self.public_pos.x
    }

    pub fn touch_y(&self) -> f32 {
        self.public_pos.y
    }

    pub fn touch_scene_pos(&self) -> Point {
        self.public_scene_pos
    }

    pub fn touch_scene_x(&self) -> f32 {
        self.public_scene_pos.x
    }

    pub fn touch_scene_y(&self) -> f32 {
        self.public_scene_pos.y
    }

    /// Travel of the public position along the direction's axis, in local
    /// coordinates.
    pub fn distance(&self) -> f32 {
        if self.config.direction.is_horizontal() {
            self.public_pos.x - self.start_pos.x
        } else {
            self.public_pos.y - self.start_pos.y
        }
    }

    /// Travel of the public position along the gesture axis, in scene
    /// coordinates.
    pub fn scene_distance(&self) -> f32 {
        (self.public_scene_pos - self.start_scene_pos).dot(self.scene_direction)
    }

    pub fn active_touches(&self) -> &ActiveTouchesInfo {
        &self.active_touches
    }

    fn set_status(&mut self, status: DragStatus) {
        if self.status == status {
            return;
        }
        let old = self.status;
        self.status = status;
        log::debug!(target: LOG_TARGET, "{old:?} -> {status:?}");

        if old == DragStatus::Undecided {
            self.recognition_timer.stop();
        }

        match status {
            DragStatus::WaitingForTouch => {
                if old == DragStatus::Recognized {
                    self.emit(DragAreaSignal::DraggingChanged(false));
                }
                self.emit(DragAreaSignal::PressedChanged(false));
                self.touch_id = None;
            }
            DragStatus::Undecided => {
                let now = self.now();
                self.recognition_timer.start(now);
                self.emit(DragAreaSignal::PressedChanged(true));
            }
            DragStatus::Recognized => {
                if old == DragStatus::WaitingForTouch {
                    self.emit(DragAreaSignal::PressedChanged(true));
                }
                self.emit(DragAreaSignal::DraggingChanged(true));
            }
        }
        self.emit(DragAreaSignal::StatusChanged(status));
    }

    fn set_public_pos(&mut self, pos: Point) {
        debug_assert!(
            self.status != DragStatus::Undecided,
            "public position must not move while undecided"
        );
        if self.public_pos == pos {
            return;
        }
        let old_distance = self.distance();
        self.public_pos = pos;
        self.emit(DragAreaSignal::TouchPosChanged(pos));
        let distance = self.distance();
        if distance != old_distance {
            self.emit(DragAreaSignal::DistanceChanged(distance));
        }
    }

    fn set_public_scene_pos(&mut self, pos: Point) {
        debug_assert!(
            self.status != DragStatus::Undecided,
            "public position must not move while undecided"
        );
        if self.public_scene_pos == pos {
            return;
        }
        let old_distance = self.scene_distance();
        self.public_scene_pos = pos;
        self.emit(DragAreaSignal::TouchScenePosChanged(pos));
        let distance = self.scene_distance();
        if distance != old_distance {
            self.emit(DragAreaSignal::SceneDistanceChanged(distance));
        }
    }

    /// Moves the public position towards `point`. Right after a thresholded
    /// recognition the finger is well past the start, so the public position
    /// catches up gradually instead of jumping.
    fn update_public_position(&mut self, point: &TouchPoint) {
        if self.config.recognition_is_disabled() {
            self.set_public_pos(point.pos);
            self.set_public_scene_pos(point.scene_pos);
        } else {
            let pos = self.public_pos + (point.pos - self.public_pos) * PUBLIC_POS_SMOOTHING;
            let scene_pos = self.public_scene_pos
                + (point.scene_pos - self.public_scene_pos) * PUBLIC_POS_SMOOTHING;
            self.set_public_pos(pos);
            self.set_public_scene_pos(scene_pos);
        }
    }

    /// Whether some touch in the window started less than the composition
    /// time ago.
    fn is_within_touch_composition_window(&self) -> bool {
        let composition_time = self.config.composition_time_ms;
        if composition_time <= 0 {
            return false;
        }
        let now = self.now();
        self.active_touches
            .most_recent_start_time()
            .is_some_and(|start| now <= start.saturating_add(composition_time))
    }

    fn moving_in_right_direction(&self) -> bool {
        if self.config.direction.is_axis_agnostic() {
            return true;
        }
        let movement = self.damped_scene_pos.value() - self.previous_damped_scene_pos;
        movement.dot(self.scene_direction) >= 0.0
    }

    /// Reads the undamped scene position, so a move of exactly
    /// `threshold + ε` recognizes whatever the damping delta.
    fn moved_far_enough(&self, scene_pos: Point) -> bool {
        let threshold = self.config.distance_threshold;
        if threshold <= 0.0 {
            return true;
        }
        let projection = (scene_pos - self.start_scene_pos).dot(self.scene_direction);
        if self.config.direction.is_axis_agnostic() {
            projection.abs() > threshold
        } else {
            projection > threshold
        }
    }

    /// Undamped, like [`Self::moved_far_enough`].
    fn is_past_max_distance(&self, scene_pos: Point) -> bool {
        let max_distance = self.config.max_distance;
        (scene_pos - self.start_scene_pos).length_squared() > max_distance * max_distance
    }

    fn watch_pressed_touches(event: &TouchEvent, ctx: &mut TouchContext<'_>) {
        for point in event.pressed_points() {
            ctx.add_touch_watcher(point.id);
        }
    }

    fn reject_gesture(&mut self, ctx: &mut TouchContext<'_>) {
        if let Some(touch) = self.touch_id {
            ctx.remove_candidate_owner_for_touch(touch);
            ctx.add_touch_watcher(touch);
        }
        self.set_status(DragStatus::WaitingForTouch);
    }

    fn touch_event_absent(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) -> bool {
        if !event.has_pressed() {
            return false;
        }

        let pressed: SmallVec<[TouchPoint; 4]> = event.pressed_points().copied().collect();
        let sane = self.config.recognition_properties_are_sane();
        if !sane {
            log::warn!(
                target: LOG_TARGET,
                "distance threshold {} must stay below max distance {} and composition time {} below max time {}",
                self.config.distance_threshold,
                self.config.max_distance,
                self.config.composition_time_ms,
                self.config.max_time_ms
            );
        }
        if pressed.len() > 1 || !sane || self.is_within_touch_composition_window() {
            log::trace!(target: LOG_TARGET, "not a single-finger drag, watching {} presses", pressed.len());
            Self::watch_pressed_touches(event, ctx);
            return false;
        }

        let point = pressed[0];
        self.touch_id = Some(point.id);
        self.start_pos = point.pos;
        self.start_scene_pos = point.scene_pos;
        self.damped_scene_pos.reset(point.scene_pos);
        self.previous_damped_scene_pos = point.scene_pos;
        self.set_public_pos(point.pos);
        self.set_public_scene_pos(point.scene_pos);

        if self.config.recognition_is_disabled() {
            if self.config.monitor_only {
                ctx.add_touch_watcher(point.id);
            } else if let Err(err) = ctx
                .add_candidate_owner_for_touch(point.id)
                .and_then(|()| ctx.request_touch_ownership(point.id))
            {
                log::warn!(target: LOG_TARGET, "cannot claim touch {}: {err}", point.id);
                ctx.remove_candidate_owner_for_touch(point.id);
                ctx.add_touch_watcher(point.id);
                self.touch_id = None;
                return false;
            }
            self.set_status(DragStatus::Recognized);
            !self.config.monitor_only
        } else {
            if self.config.monitor_only {
                ctx.add_touch_watcher(point.id);
            } else if let Err(err) = ctx.add_candidate_owner_for_touch(point.id) {
                log::warn!(target: LOG_TARGET, "cannot compete for touch {}: {err}", point.id);
                ctx.add_touch_watcher(point.id);
                self.touch_id = None;
                return false;
            }
            self.set_status(DragStatus::Undecided);
            false
        }
    }

    fn touch_event_recognized(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) -> bool {
        let Some(touch) = self.touch_id else {
            return false;
        };
        match event.point(touch).copied() {
            Some(point) => {
                self.handle_recognized_point(&point);
                true
            }
            None if event.points().iter().all(|point| point.state.is_pressed()) => false,
            None => {
                log::error!(target: LOG_TARGET, "owned touch {touch} missing from its own event");
                ctx.remove_candidate_owner_for_touch(touch);
                self.set_status(DragStatus::WaitingForTouch);
                false
            }
        }
    }

    fn handle_recognized_point(&mut self, point: &TouchPoint) {
        self.update_public_position(point);
        if point.state.has_ended() {
            self.set_status(DragStatus::WaitingForTouch);
        }
    }

    fn unowned_touch_event_undecided(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) {
        let Some(touch) = self.touch_id else {
            return;
        };
        // other points are only watched
        let Some(point) = event.point(touch).copied() else {
            return;
        };

        if point.state.has_ended() {
            log::debug!(target: LOG_TARGET, "touch {touch} ended before recognition");
            self.reject_gesture(ctx);
            return;
        }

        self.previous_damped_scene_pos = self.damped_scene_pos.value();
        self.damped_scene_pos.update(point.scene_pos);

        if !self.moving_in_right_direction() {
            log::debug!(target: LOG_TARGET, "touch {touch} went the wrong way");
            self.reject_gesture(ctx);
            return;
        }

        if self.is_within_touch_composition_window() {
            log::trace!(target: LOG_TARGET, "inside composition window, waiting");
            return;
        }

        if self.moved_far_enough(point.scene_pos) {
            if !self.config.monitor_only {
                if let Err(err) = ctx.request_touch_ownership(touch) {
                    log::warn!(target: LOG_TARGET, "lost the race for touch {touch}: {err}");
                    self.reject_gesture(ctx);
                    return;
                }
            }
            self.set_status(DragStatus::Recognized);
            self.update_public_position(&point);
        } else if self.is_past_max_distance(point.scene_pos) {
            log::debug!(target: LOG_TARGET, "touch {touch} went too far off course");
            self.reject_gesture(ctx);
        }
    }
}

impl TouchTarget for DirectionalDragArea {
    fn scene_transform(&self) -> SceneTransform {
        self.transform
    }

    fn contains(&self, local: Point) -> bool {
        Rect::from_size(self.size).contains_point(local)
    }

    fn is_interactive(&self) -> bool {
        self.enabled && self.visible
    }

    fn touch_event(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) -> bool {
        match self.status {
            DragStatus::WaitingForTouch => self.touch_event_absent(event, ctx),
            DragStatus::Undecided => {
                Self::watch_pressed_touches(event, ctx);
                false
            }
            DragStatus::Recognized => self.touch_event_recognized(event, ctx),
        }
    }

    fn unowned_touch_event(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) {
        match self.status {
            DragStatus::WaitingForTouch => {}
            DragStatus::Undecided => self.unowned_touch_event_undecided(event, ctx),
            DragStatus::Recognized => {
                if !self.config.monitor_only {
                    return;
                }
                if let Some(point) = self.touch_id.and_then(|touch| event.point(touch)).copied() {
                    self.handle_recognized_point(&point);
                }
            }
        }
    }

    fn touch_ownership_event(&mut self, event: TouchOwnershipEvent, ctx: &mut TouchContext<'_>) {
        if self.touch_id != Some(event.touch) {
            return;
        }
        if event.gained {
            log::trace!(target: LOG_TARGET, "owning touch {}", event.touch);
        } else {
            log::debug!(target: LOG_TARGET, "touch {} went to someone else", event.touch);
            ctx.add_touch_watcher(event.touch);
            self.set_status(DragStatus::WaitingForTouch);
        }
    }

    fn touch_ungrab_event(&mut self, touch: TouchId, _ctx: &mut TouchContext<'_>) {
        if self.status == DragStatus::Recognized && self.touch_id == Some(touch) {
            self.set_status(DragStatus::WaitingForTouch);
        }
    }

    fn observe_window_touches(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) {
        if self.status == DragStatus::Undecided
            && event
                .pressed_points()
                .any(|point| Some(point.id) != self.touch_id)
            && self.is_within_touch_composition_window()
        {
            log::debug!(target: LOG_TARGET, "second finger landed, not a single-finger drag");
            self.reject_gesture(ctx);
        }
        self.active_touches.update(event);
    }

    fn process_timers(&mut self, ctx: &mut TouchContext<'_>) {
        let now = self.now();
        if self.recognition_timer.take_expired(now) && self.status == DragStatus::Undecided {
            log::debug!(target: LOG_TARGET, "undecided for too long");
            self.reject_gesture(ctx);
        }
    }

    fn detach(&mut self, ctx: &mut TouchContext<'_>) {
        self.reset(ctx);
    }
}

#[cfg(test)]
#[path = "tests/drag_area_tests.rs"]
mod tests;
