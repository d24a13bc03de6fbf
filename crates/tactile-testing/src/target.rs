use tactile_core::{TouchContext, TouchEvent, TouchId, TouchPointState, TouchTarget};
use tactile_geometry::{Point, Rect, SceneTransform};
use tactile_gestures::DirectionalDragArea;

/// One point as a [`PlainTouchArea`] received it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReceivedTouch {
    pub id: TouchId,
    pub state: TouchPointState,
    pub pos: Point,
}

/// An ordinary item that takes every press landing on it, like a button or
/// a flickable would. Drag areas placed above it steal touches from it.
#[derive(Debug)]
pub struct PlainTouchArea {
    bounds: Rect,
    transform: SceneTransform,
    received: Vec<ReceivedTouch>,
    ungrabbed: Vec<TouchId>,
}

impl PlainTouchArea {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            transform: SceneTransform::IDENTITY,
            received: Vec::new(),
            ungrabbed: Vec::new(),
        }
    }

    pub fn with_scene_transform(mut self, transform: SceneTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn received(&self) -> &[ReceivedTouch] {
        &self.received
    }

    /// Touches that were taken away from this area.
    pub fn ungrabbed(&self) -> &[TouchId] {
        &self.ungrabbed
    }

    pub fn clear(&mut self) {
        self.received.clear();
        self.ungrabbed.clear();
    }
}

impl TouchTarget for PlainTouchArea {
    fn scene_transform(&self) -> SceneTransform {
        self.transform
    }

    fn contains(&self, local: Point) -> bool {
        self.bounds.contains_point(local)
    }

    fn touch_event(&mut self, event: &TouchEvent, _ctx: &mut TouchContext<'_>) -> bool {
        self.received
            .extend(event.points().iter().map(|point| ReceivedTouch {
                id: point.id,
                state: point.state,
                pos: point.pos,
            }));
        true
    }

    fn touch_ungrab_event(&mut self, touch: TouchId, _ctx: &mut TouchContext<'_>) {
        self.ungrabbed.push(touch);
    }
}

/// Everything a [`GestureRobot`](crate::GestureRobot) window can hold.
pub enum RobotTarget {
    DragArea(DirectionalDragArea),
    Plain(PlainTouchArea),
}

impl RobotTarget {
    pub fn as_drag_area(&self) -> Option<&DirectionalDragArea> {
        match self {
            RobotTarget::DragArea(area) => Some(area),
            RobotTarget::Plain(_) => None,
        }
    }

    pub fn as_drag_area_mut(&mut self) -> Option<&mut DirectionalDragArea> {
        match self {
            RobotTarget::DragArea(area) => Some(area),
            RobotTarget::Plain(_) => None,
        }
    }

    pub fn as_plain(&self) -> Option<&PlainTouchArea> {
        match self {
            RobotTarget::Plain(area) => Some(area),
            RobotTarget::DragArea(_) => None,
        }
    }

    fn inner(&self) -> &dyn TouchTarget {
        match self {
            RobotTarget::DragArea(area) => area,
            RobotTarget::Plain(area) => area,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn TouchTarget {
        match self {
            RobotTarget::DragArea(area) => area,
            RobotTarget::Plain(area) => area,
        }
    }
}

impl TouchTarget for RobotTarget {
    fn scene_transform(&self) -> SceneTransform {
        self.inner().scene_transform()
    }

    fn contains(&self, local: Point) -> bool {
        self.inner().contains(local)
    }

    fn is_interactive(&self) -> bool {
        self.inner().is_interactive()
    }

    fn touch_event(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) -> bool {
        self.inner_mut().touch_event(event, ctx)
    }

    fn unowned_touch_event(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) {
        self.inner_mut().unowned_touch_event(event, ctx)
    }

    fn touch_ownership_event(
        &mut self,
        event: tactile_core::TouchOwnershipEvent,
        ctx: &mut TouchContext<'_>,
    ) {
        self.inner_mut().touch_ownership_event(event, ctx)
    }

    fn touch_ungrab_event(&mut self, touch: TouchId, ctx: &mut TouchContext<'_>) {
        self.inner_mut().touch_ungrab_event(touch, ctx)
    }

    fn observe_window_touches(&mut self, event: &TouchEvent, ctx: &mut TouchContext<'_>) {
        self.inner_mut().observe_window_touches(event, ctx)
    }

    fn process_timers(&mut self, ctx: &mut TouchContext<'_>) {
        self.inner_mut().process_timers(ctx)
    }

    fn detach(&mut self, ctx: &mut TouchContext<'_>) {
        self.inner_mut().detach(ctx)
    }
}
