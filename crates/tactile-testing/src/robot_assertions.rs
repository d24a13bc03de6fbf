//! Assertion utilities for robot testing
//!
//! Positions coming out of a drag area are smoothed and damped floats, so
//! most checks here compare within a tolerance.

use tactile_core::{TargetId, TouchId, TouchRegistry};
use tactile_geometry::Point;
use tactile_gestures::{DirectionalDragArea, DragStatus};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a point is approximately equal to another.
pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Assert that a drag area is in the expected state, with `pressed` and
/// `dragging` consistent with it.
pub fn assert_status(area: &DirectionalDragArea, expected: DragStatus, msg: &str) {
    assert_eq!(area.status(), expected, "{}: wrong status", msg);
    assert_eq!(
        area.pressed(),
        expected != DragStatus::WaitingForTouch,
        "{}: pressed out of sync with {:?}",
        msg,
        expected
    );
    assert_eq!(
        area.dragging(),
        expected == DragStatus::Recognized,
        "{}: dragging out of sync with {:?}",
        msg,
        expected
    );
}

/// Assert that `touch` is owned by `owner`, or by nobody.
pub fn assert_owner(registry: &TouchRegistry, touch: TouchId, owner: Option<TargetId>, msg: &str) {
    assert_eq!(
        registry.owner_of(touch),
        owner,
        "{}: wrong owner for touch {}",
        msg,
        touch
    );
}

/// Assert that at most one target owns each tracked touch and that an owned
/// touch has no candidates left.
pub fn assert_exclusive_ownership(registry: &TouchRegistry, touches: &[TouchId], msg: &str) {
    for &touch in touches {
        if registry.owner_of(touch).is_some() {
            assert!(
                registry.candidates_of(touch).is_empty(),
                "{}: owned touch {} still has candidates {:?}",
                msg,
                touch,
                registry.candidates_of(touch)
            );
        }
    }
}
