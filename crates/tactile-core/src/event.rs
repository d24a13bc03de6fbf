use crate::target::TargetId;
use smallvec::SmallVec;
use tactile_geometry::{Point, SceneTransform};

pub type TouchId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPointState {
    Pressed,
    Moved,
    Stationary,
    Released,
    Cancelled,
}

impl TouchPointState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        matches!(self, TouchPointState::Pressed)
    }

    /// Released and cancelled points are both gone after this event.
    #[inline]
    pub fn has_ended(self) -> bool {
        matches!(self, TouchPointState::Released | TouchPointState::Cancelled)
    }
}

/// A single finger within a [`TouchEvent`].
///
/// `scene_pos` is what the windowing system reports. `pos` is relative to the
/// target the event is being delivered to and gets filled in by the
/// dispatcher when it maps the event into that target's coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    pub state: TouchPointState,
    pub pos: Point,
    pub scene_pos: Point,
}

impl TouchPoint {
    pub fn new(id: TouchId, state: TouchPointState, scene_pos: Point) -> Self {
        Self {
            id,
            state,
            pos: scene_pos,
            scene_pos,
        }
    }

    pub fn pressed(id: TouchId, scene_pos: Point) -> Self {
        Self::new(id, TouchPointState::Pressed, scene_pos)
    }

    pub fn moved(id: TouchId, scene_pos: Point) -> Self {
        Self::new(id, TouchPointState::Moved, scene_pos)
    }

    pub fn stationary(id: TouchId, scene_pos: Point) -> Self {
        Self::new(id, TouchPointState::Stationary, scene_pos)
    }

    pub fn released(id: TouchId, scene_pos: Point) -> Self {
        Self::new(id, TouchPointState::Released, scene_pos)
    }

    pub fn cancelled(id: TouchId, scene_pos: Point) -> Self {
        Self::new(id, TouchPointState::Cancelled, scene_pos)
    }

    pub fn with_pos(mut self, pos: Point) -> Self {
        self.pos = pos;
        self
    }
}

/// All touch points that changed (or stayed) in one window input frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchEvent {
    points: SmallVec<[TouchPoint; 4]>,
}

impl TouchEvent {
    pub fn new(points: impl IntoIterator<Item = TouchPoint>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn push(&mut self, point: TouchPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    pub fn point(&self, id: TouchId) -> Option<&TouchPoint> {
        self.points.iter().find(|point| point.id == id)
    }

    pub fn contains(&self, id: TouchId) -> bool {
        self.point(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn has_pressed(&self) -> bool {
        self.points.iter().any(|point| point.state.is_pressed())
    }

    pub fn has_ended(&self) -> bool {
        self.points.iter().any(|point| point.state.has_ended())
    }

    pub fn pressed_points(&self) -> impl Iterator<Item = &TouchPoint> {
        self.points.iter().filter(|point| point.state.is_pressed())
    }

    /// Copy of this event restricted to the given touch ids, keeping the
    /// original point order.
    pub fn subset(&self, ids: &[TouchId]) -> TouchEvent {
        TouchEvent {
            points: self
                .points
                .iter()
                .filter(|point| ids.contains(&point.id))
                .copied()
                .collect(),
        }
    }

    /// Copy of this event with every local position recomputed from the scene
    /// position through `transform` (local → scene).
    pub fn mapped_from_scene(&self, transform: &SceneTransform) -> TouchEvent {
        TouchEvent {
            points: self
                .points
                .iter()
                .map(|point| point.with_pos(transform.map_from_scene(point.scene_pos)))
                .collect(),
        }
    }
}

impl FromIterator<TouchPoint> for TouchEvent {
    fn from_iter<I: IntoIterator<Item = TouchPoint>>(iter: I) -> Self {
        TouchEvent::new(iter)
    }
}

/// Tells a target it has been granted (or denied) a touch it competed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchOwnershipEvent {
    pub touch: TouchId,
    pub target: TargetId,
    pub gained: bool,
}

/// Messages the registry queues while arbitrating, delivered by the
/// dispatcher once the handler that triggered them has returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryNotification {
    Ownership(TouchOwnershipEvent),
    /// The target that implicitly grabbed a touch by accepting its press no
    /// longer receives it.
    Ungrab { touch: TouchId, target: TargetId },
}

impl RegistryNotification {
    pub fn target(&self) -> TargetId {
        match self {
            RegistryNotification::Ownership(event) => event.target,
            RegistryNotification::Ungrab { target, .. } => *target,
        }
    }
}
