//! Touch targets and the handles the registry refers to them by.

use crate::error::RegistryError;
use crate::event::{TouchEvent, TouchId, TouchOwnershipEvent};
use crate::registry::TouchRegistry;
use std::fmt;
use tactile_geometry::{Point, SceneTransform};

/// Generational handle to a target living in a `TouchDispatcher`.
///
/// The registry only ever stores handles. Once a target is removed its slot
/// generation moves on, so a handle that was never unregistered simply stops
/// resolving instead of pointing at a dead target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId {
    index: u32,
    generation: u32,
}

impl TargetId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}v{}", self.index, self.generation)
    }
}

/// What a handler gets to talk back to the registry with.
///
/// Every registry call made through the context is on behalf of the target
/// currently being delivered to.
pub struct TouchContext<'a> {
    registry: &'a mut TouchRegistry,
    target: TargetId,
}

impl<'a> TouchContext<'a> {
    pub fn new(registry: &'a mut TouchRegistry, target: TargetId) -> Self {
        Self { registry, target }
    }

    pub fn target_id(&self) -> TargetId {
        self.target
    }

    pub fn now(&self) -> i64 {
        self.registry.now()
    }

    pub fn registry(&self) -> &TouchRegistry {
        &*self.registry
    }

    pub fn add_candidate_owner_for_touch(&mut self, touch: TouchId) -> Result<(), RegistryError> {
        self.registry.add_candidate_owner_for_touch(touch, self.target)
    }

    pub fn remove_candidate_owner_for_touch(&mut self, touch: TouchId) {
        self.registry
            .remove_candidate_owner_for_touch(touch, self.target);
    }

    pub fn add_touch_watcher(&mut self, touch: TouchId) {
        self.registry.add_touch_watcher(touch, self.target);
    }

    pub fn request_touch_ownership(&mut self, touch: TouchId) -> Result<(), RegistryError> {
        self.registry.request_touch_ownership(touch, self.target)
    }
}

/// Something the window delivers touches to.
///
/// `touch_event` carries presses that hit the target plus every point the
/// target owns or implicitly grabbed. `unowned_touch_event` carries updates
/// of touches the target is a candidate for or watches while nobody owns
/// them. Events are always mapped into the target's local coordinates.
pub trait TouchTarget {
    /// Mapping from this target's local coordinates to the scene.
    fn scene_transform(&self) -> SceneTransform;

    /// Hit test in local coordinates.
    fn contains(&self, local: Point) -> bool;

    /// Disabled or invisible targets get neither presses nor observations.
    fn is_interactive(&self) -> bool {
        true
    }

    /// Returns whether the event was accepted. Accepting a press grabs it.
    fn touch_event(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) -> bool;

    fn unowned_touch_event(&mut self, _event: &TouchEvent, _ctx: &mut TouchContext<'_>) {}

    fn touch_ownership_event(&mut self, _event: TouchOwnershipEvent, _ctx: &mut TouchContext<'_>) {}

    fn touch_ungrab_event(&mut self, _touch: TouchId, _ctx: &mut TouchContext<'_>) {}

    /// Sees every window event, in scene coordinates, after delivery.
    fn observe_window_touches(&mut self, _event: &TouchEvent, _ctx: &mut TouchContext<'_>) {}

    fn process_timers(&mut self, _ctx: &mut TouchContext<'_>) {}

    /// Called right before the target leaves its window.
    fn detach(&mut self, _ctx: &mut TouchContext<'_>) {}
}

impl<T: TouchTarget + ?Sized> TouchTarget for Box<T> {
    fn scene_transform(&self) -> SceneTransform {
        (**self).scene_transform()
    }

    fn contains(&self, local: Point) -> bool {
        (**self).contains(local)
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }

    fn touch_event(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) -> bool {
        (**self).touch_event(event, ctx)
    }

    fn unowned_touch_event(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) {
        (**self).unowned_touch_event(event, ctx)
    }

    fn touch_ownership_event(&mut self, event: TouchOwnershipEvent, ctx: &mut TouchContext<'_>) {
        (**self).touch_ownership_event(event, ctx)
    }

    fn touch_ungrab_event(&mut self, touch: TouchId, ctx: &mut TouchContext<'_>) {
        (**self).touch_ungrab_event(touch, ctx)
    }

    fn observe_window_touches(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) {
        (**self).observe_window_touches(event, ctx)
    }

    fn process_timers(&mut self, ctx: &mut TouchContext<'_>) {
        (**self).process_timers(ctx)
    }

    fn detach(&mut self, ctx: &mut TouchContext<'_>) {
        (**self).detach(ctx)
    }
}
