use super::*;
use crate::event::TouchPoint;
use crate::time::FakeTimeSource;
use tactile_geometry::Point;

const A: TargetId = TargetId::new(0, 0);
const B: TargetId = TargetId::new(1, 0);
const C: TargetId = TargetId::new(2, 0);

fn registry() -> (FakeTimeSource, TouchRegistry) {
    let _ = env_logger::builder().is_test(true).try_init();
    let clock = FakeTimeSource::new();
    let registry = TouchRegistry::new(clock.shared());
    (clock, registry)
}

fn press(registry: &mut TouchRegistry, id: TouchId) {
    registry.update(&TouchEvent::new([TouchPoint::pressed(id, Point::ZERO)]));
}

fn release(registry: &mut TouchRegistry, id: TouchId) {
    registry.update(&TouchEvent::new([TouchPoint::released(id, Point::ZERO)]));
}

fn drain(registry: &mut TouchRegistry) -> Vec<RegistryNotification> {
    std::iter::from_fn(|| registry.pop_notification()).collect()
}

fn ownership(touch: TouchId, target: TargetId, gained: bool) -> RegistryNotification {
    RegistryNotification::Ownership(TouchOwnershipEvent {
        touch,
        target,
        gained,
    })
}

#[test]
fn candidates_are_kept_in_registration_order_without_duplicates() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);

    registry.add_candidate_owner_for_touch(1, B).unwrap();
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    registry.add_candidate_owner_for_touch(1, B).unwrap();

    assert_eq!(registry.candidates_of(1), vec![B, A]);
    assert_eq!(registry.owner_of(1), None);
}

#[test]
fn adding_candidate_for_unknown_touch_fails() {
    let (_clock, mut registry) = registry();
    assert_eq!(
        registry.add_candidate_owner_for_touch(9, A),
        Err(RegistryError::UnknownTouch { touch: 9 })
    );
}

#[test]
fn first_request_wins_and_everybody_else_loses() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    for target in [A, B, C] {
        registry.add_candidate_owner_for_touch(1, target).unwrap();
    }

    registry.request_touch_ownership(1, B).unwrap();

    assert_eq!(registry.owner_of(1), Some(B));
    assert!(registry.candidates_of(1).is_empty());
    assert_eq!(
        drain(&mut registry),
        vec![
            ownership(1, B, true),
            ownership(1, A, false),
            ownership(1, C, false),
        ]
    );

    assert_eq!(
        registry.request_touch_ownership(1, A),
        Err(RegistryError::AlreadyOwned { touch: 1, owner: B })
    );
    assert_eq!(
        registry.add_candidate_owner_for_touch(1, C),
        Err(RegistryError::AlreadyOwned { touch: 1, owner: B })
    );
    assert_eq!(registry.owner_of(1), Some(B));
}

#[test]
fn owner_requesting_again_is_harmless() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    registry.request_touch_ownership(1, A).unwrap();
    drain(&mut registry);

    registry.request_touch_ownership(1, A).unwrap();
    assert!(drain(&mut registry).is_empty());
}

#[test]
fn only_candidates_may_claim_a_touch() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    registry.add_touch_watcher(1, B);

    assert_eq!(
        registry.request_touch_ownership(1, B),
        Err(RegistryError::NotACandidate { touch: 1, target: B })
    );
    assert_eq!(
        registry.request_touch_ownership(1, C),
        Err(RegistryError::NotACandidate { touch: 1, target: C })
    );
    assert_eq!(registry.owner_of(1), None);
    assert_eq!(registry.candidates_of(1), vec![A]);
    assert!(drain(&mut registry).is_empty());

    registry.remove_candidate_owner_for_touch(1, A);
    assert_eq!(
        registry.request_touch_ownership(1, A),
        Err(RegistryError::NotACandidate { touch: 1, target: A })
    );
}

#[test]
fn removing_a_candidate_twice_is_safe() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    registry.add_candidate_owner_for_touch(1, B).unwrap();

    registry.remove_candidate_owner_for_touch(1, A);
    let after_first = registry.candidates_of(1);
    registry.remove_candidate_owner_for_touch(1, A);

    assert_eq!(after_first, vec![B]);
    assert_eq!(registry.candidates_of(1), after_first);
    assert!(registry.is_tracking(1));

    registry.remove_candidate_owner_for_touch(42, A);
    registry.remove_candidate_owner_for_touch(1, C);
    assert_eq!(registry.candidates_of(1), vec![B]);
}

#[test]
fn ended_touch_is_freed_once_its_last_candidate_leaves() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    release(&mut registry, 1);
    assert!(registry.is_tracking(1));

    registry.remove_candidate_owner_for_touch(1, A);
    assert!(!registry.is_tracking(1));
    assert_eq!(registry.active_touch_count(), 0);
}

#[test]
fn removal_inside_dispatch_defers_freeing() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    release(&mut registry, 1);

    registry.begin_dispatch();
    registry.remove_candidate_owner_for_touch(1, A);
    assert!(registry.is_tracking(1));
    registry.end_dispatch();
    assert!(!registry.is_tracking(1));
}

#[test]
fn watchers_keep_hearing_about_owned_touches() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    registry.add_candidate_owner_for_touch(1, B).unwrap();
    registry.add_touch_watcher(1, C);
    registry.add_touch_watcher(1, C);

    let event = TouchEvent::new([TouchPoint::moved(1, Point::new(1.0, 0.0))]);
    let plan = registry.unowned_delivery_plan(&event);
    assert_eq!(plan.keys().copied().collect::<Vec<_>>(), vec![A, B, C]);

    registry.request_touch_ownership(1, A).unwrap();
    let plan = registry.unowned_delivery_plan(&event);
    assert_eq!(plan.keys().copied().collect::<Vec<_>>(), vec![C]);
    assert!(registry.wants_unowned_updates(1, C));
    assert!(!registry.wants_unowned_updates(1, B));

    let owned = registry.owned_delivery_plan(&event);
    assert_eq!(owned.get(&A).map(|ids| ids.to_vec()), Some(vec![1]));
}

#[test]
fn ownership_displaces_the_implicit_grabber() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    registry.grab_touch(1, C);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    assert_eq!(registry.delivery_target_of(1), Some(C));

    registry.request_touch_ownership(1, A).unwrap();

    assert_eq!(registry.delivery_target_of(1), Some(A));
    assert_eq!(registry.grabber_of(1), None);
    assert_eq!(
        drain(&mut registry),
        vec![
            ownership(1, A, true),
            RegistryNotification::Ungrab {
                touch: 1,
                target: C
            },
        ]
    );
}

#[test]
fn removing_the_owner_releases_the_touch() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    registry.request_touch_ownership(1, A).unwrap();
    registry.remove_candidate_owner_for_touch(1, A);
    assert_eq!(registry.owner_of(1), None);
    assert!(registry.is_tracking(1));
}

#[test]
fn undecided_candidates_default_after_inactivity_timeout() {
    let (clock, mut registry) = registry();
    press(&mut registry, 1);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    clock.advance(500);
    registry.add_candidate_owner_for_touch(1, B).unwrap();

    clock.advance(DEFAULT_CANDIDATE_INACTIVITY_TIMEOUT_MS - 500);
    registry.process_timers();

    assert_eq!(registry.candidates_of(1), vec![B]);
    assert_eq!(drain(&mut registry), vec![ownership(1, A, false)]);

    clock.advance(500);
    registry.process_timers();
    assert!(registry.candidates_of(1).is_empty());
}

#[test]
fn forgetting_a_target_purges_every_reference() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 1);
    press(&mut registry, 2);
    registry.add_candidate_owner_for_touch(1, A).unwrap();
    registry.add_touch_watcher(1, A);
    registry.add_candidate_owner_for_touch(2, A).unwrap();
    registry.request_touch_ownership(2, A).unwrap();

    registry.forget_target(A);

    assert!(registry.candidates_of(1).is_empty());
    assert!(registry.watchers_of(1).is_empty());
    assert_eq!(registry.owner_of(2), None);
    assert!(!registry.has_pending_notifications());
}

#[test]
fn at_most_one_owner_under_competing_requests() {
    let (_clock, mut registry) = registry();
    press(&mut registry, 5);
    for target in [A, B, C] {
        registry.add_candidate_owner_for_touch(5, target).unwrap();
    }
    let granted = [C, A, B]
        .into_iter()
        .filter(|target| registry.request_touch_ownership(5, *target).is_ok())
        .count();
    assert_eq!(granted, 1);
    assert_eq!(registry.owner_of(5), Some(C));
}
