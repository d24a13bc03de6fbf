use super::*;
use crate::event::TouchPoint;
use crate::time::FakeTimeSource;
use tactile_geometry::Point;

fn press(id: TouchId) -> TouchEvent {
    TouchEvent::new([TouchPoint::pressed(id, Point::ZERO)])
}

fn release(id: TouchId) -> TouchEvent {
    TouchEvent::new([TouchPoint::released(id, Point::ZERO)])
}

#[test]
fn presses_are_recorded_with_their_start_time() {
    let clock = FakeTimeSource::starting_at(1_000);
    let mut touches = ActiveTouchesInfo::new(clock.shared());

    touches.update(&press(1));
    clock.advance(30);
    touches.update(&press(2));

    assert_eq!(touches.touch_start_time(1), Some(1_000));
    assert_eq!(touches.touch_start_time(2), Some(1_030));
    assert_eq!(touches.most_recent_start_time(), Some(1_030));
    assert_eq!(touches.len(), 2);
}

#[test]
fn releases_and_cancels_remove_touches() {
    let clock = FakeTimeSource::new();
    let mut touches = ActiveTouchesInfo::new(clock.shared());

    touches.update(&TouchEvent::new([
        TouchPoint::pressed(1, Point::ZERO),
        TouchPoint::pressed(2, Point::ZERO),
    ]));
    touches.update(&release(1));
    assert!(!touches.contains(1));
    assert!(touches.contains(2));

    touches.update(&TouchEvent::new([TouchPoint::cancelled(2, Point::ZERO)]));
    assert!(touches.is_empty());
    assert_eq!(touches.most_recent_start_time(), None);
}

#[test]
fn moves_do_not_change_bookkeeping() {
    let clock = FakeTimeSource::new();
    let mut touches = ActiveTouchesInfo::new(clock.shared());
    touches.update(&press(7));
    clock.advance(500);
    touches.update(&TouchEvent::new([TouchPoint::moved(7, Point::new(5.0, 5.0))]));
    assert_eq!(touches.touch_start_time(7), Some(0));
}

#[test]
fn repeated_press_keeps_a_single_entry() {
    let _ = env_logger::builder().is_test(true).try_init();
    let clock = FakeTimeSource::new();
    let mut touches = ActiveTouchesInfo::new(clock.shared());
    touches.update(&press(3));
    clock.advance(10);
    touches.update(&press(3));
    assert_eq!(touches.len(), 1);
    assert_eq!(touches.touch_start_time(3), Some(10));
}
