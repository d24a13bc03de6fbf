//! Long random touch sessions over competing drag areas.
//!
//! Whatever the fingers do, every area must end each cycle back in
//! `WaitingForTouch`, the registry must forget every touch, and no touch may
//! ever be owned by an area that does not consider itself recognized.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tactile_core::{TargetId, TouchId};
use tactile_geometry::{Point, Rect, Size};
use tactile_gestures::{Direction, DragAreaConfig, DragAreaSignal, DragStatus};
use tactile_testing::robot_assertions::assert_exclusive_ownership;
use tactile_testing::GestureRobot;

const CYCLES: usize = 1000;
const DIRECTIONS: [Direction; 6] = [
    Direction::Rightwards,
    Direction::Leftwards,
    Direction::Downwards,
    Direction::Upwards,
    Direction::Horizontal,
    Direction::Vertical,
];

fn check_consistency(robot: &GestureRobot, areas: &[TargetId], touches: &[TouchId], cycle: usize) {
    let msg = format!("cycle {cycle}");
    assert_exclusive_ownership(robot.registry(), touches, &msg);

    for &id in areas {
        let area = robot.drag_area(id);
        match area.status() {
            DragStatus::WaitingForTouch => assert_eq!(area.touch_id(), None, "{msg}"),
            DragStatus::Undecided => {
                let touch = area.touch_id().expect("undecided area tracks a touch");
                assert!(
                    robot.registry().is_candidate(touch, id),
                    "{msg}: undecided {id} is not a candidate for {touch}"
                );
            }
            DragStatus::Recognized => {
                let touch = area.touch_id().expect("recognized area tracks a touch");
                assert_eq!(
                    robot.registry().owner_of(touch),
                    Some(id),
                    "{msg}: recognized {id} does not own {touch}"
                );
            }
        }
    }

    for &touch in touches {
        if let Some(owner) = robot.registry().owner_of(touch) {
            if areas.contains(&owner) {
                assert_eq!(
                    robot.drag_area(owner).status(),
                    DragStatus::Recognized,
                    "{msg}: {owner} owns {touch} without recognizing"
                );
            }
        }
    }
}

#[test]
fn random_sessions_always_settle() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = StdRng::seed_from_u64(0x7AC7_11E5);
    let mut robot = GestureRobot::new();
    let size = Size::new(300.0, 300.0);

    robot.add_plain_area(Rect::from_size(size));
    let areas: Vec<TargetId> = (0..3)
        .map(|i| {
            let config = DragAreaConfig::default()
                .with_direction(DIRECTIONS[(i * 2 + 1) % DIRECTIONS.len()]);
            robot.add_drag_area(size, config)
        })
        .collect();

    let mut next_touch: TouchId = 0;
    for cycle in 0..CYCLES {
        for (i, &id) in areas.iter().enumerate() {
            let direction = DIRECTIONS[(cycle + i) % DIRECTIONS.len()];
            robot.drag_area_mut(id).set_direction(direction);
        }

        let mut down: Vec<TouchId> = Vec::new();
        let mut seen: Vec<TouchId> = Vec::new();
        let steps = rng.gen_range(1..12);
        for _ in 0..steps {
            match rng.gen_range(0..10) {
                0 | 1 if down.len() < 2 => {
                    let touch = next_touch;
                    next_touch += 1;
                    robot.press(
                        touch,
                        rng.gen_range(20.0..280.0),
                        rng.gen_range(20.0..280.0),
                    );
                    down.push(touch);
                    seen.push(touch);
                }
                2 if !down.is_empty() => {
                    let touch = down.remove(rng.gen_range(0..down.len()));
                    robot.release(touch);
                }
                3 => robot.advance_time(rng.gen_range(0..500)),
                _ if !down.is_empty() => {
                    let touch = down[rng.gen_range(0..down.len())];
                    robot.advance_time(rng.gen_range(0..40));
                    robot.move_by(touch, rng.gen_range(-30.0..30.0), rng.gen_range(-30.0..30.0));
                }
                _ => robot.advance_time(rng.gen_range(0..80)),
            }
            check_consistency(&robot, &areas, &seen, cycle);
        }

        if rng.gen_bool(0.1) {
            robot.cancel_all();
        } else {
            for touch in down.drain(..) {
                robot.release(touch);
            }
        }
        robot.advance_time(100);

        check_consistency(&robot, &areas, &seen, cycle);
        for &id in &areas {
            assert_eq!(
                robot.drag_area(id).status(),
                DragStatus::WaitingForTouch,
                "cycle {cycle}: {id} did not settle"
            );
        }
        assert_eq!(
            robot.registry().active_touch_count(),
            0,
            "cycle {cycle}: registry kept touches"
        );
        assert_eq!(robot.fingers_down(), 0);
    }
}

#[derive(Default)]
struct SignalCounts {
    recognized: usize,
    dragging_on: usize,
    dragging_off: usize,
}

#[test]
fn every_clean_drag_recognizes_exactly_once() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = StdRng::seed_from_u64(0x0D12_A6ED);
    let mut robot = GestureRobot::new();
    let center = Point::new(150.0, 150.0);
    let area = robot.add_drag_area(Size::new(300.0, 300.0), DragAreaConfig::default());
    let threshold = robot.drag_area(area).config().distance_threshold;

    let counts = Rc::new(RefCell::new(SignalCounts::default()));
    let sink = counts.clone();
    robot.drag_area_mut(area).connect(move |signal| {
        let mut counts = sink.borrow_mut();
        match signal {
            DragAreaSignal::StatusChanged(DragStatus::Recognized) => counts.recognized += 1,
            DragAreaSignal::DraggingChanged(true) => counts.dragging_on += 1,
            DragAreaSignal::DraggingChanged(false) => counts.dragging_off += 1,
            _ => {}
        }
    });

    for cycle in 0..CYCLES {
        let direction = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
        robot.drag_area_mut(area).set_direction(direction);
        let along = direction.local_vector();
        let across = Point::new(-along.y, along.x);
        let touch = cycle as TouchId;

        robot.press(touch, center.x, center.y);
        robot.advance_time(70);
        let target = center
            + along * (threshold + 1.0 + rng.gen_range(-0.5f32..0.5))
            + across * rng.gen_range(-0.5f32..0.5);
        robot.move_to(touch, target.x, target.y);
        assert_eq!(
            robot.drag_area(area).status(),
            DragStatus::Recognized,
            "cycle {cycle}: {direction:?}"
        );
        assert_eq!(counts.borrow().recognized, cycle + 1, "cycle {cycle}");

        robot.release(touch);
        assert_eq!(robot.drag_area(area).status(), DragStatus::WaitingForTouch);
        assert!(robot.drag_area(area).active_touches().is_empty(), "cycle {cycle}");
        robot.advance_time(20);
    }

    let counts = counts.borrow();
    assert_eq!(counts.recognized, CYCLES);
    assert_eq!(counts.dragging_on, CYCLES);
    assert_eq!(counts.dragging_off, CYCLES);
    assert_eq!(robot.registry().active_touch_count(), 0);
}
