//! Window-level touch delivery.
//!
//! `TouchDispatcher` plays the part of a window: it owns the targets, filters
//! every incoming touch event through the [`TouchRegistry`] and routes each
//! point to whoever should see it.

use crate::collections::TouchIdSet;
use crate::event::{RegistryNotification, TouchEvent, TouchId};
use crate::registry::TouchRegistry;
use crate::target::{TargetId, TouchContext, TouchTarget};
use crate::time::SharedTimeSource;
use smallvec::SmallVec;

struct TargetSlot<T> {
    generation: u32,
    target: Option<T>,
}

pub struct TouchDispatcher<T: TouchTarget> {
    registry: TouchRegistry,
    slots: Vec<TargetSlot<T>>,
    free_slots: Vec<u32>,
    /// Bottom-most first.
    z_order: Vec<TargetId>,
}

impl<T: TouchTarget> TouchDispatcher<T> {
    pub fn new(time_source: SharedTimeSource) -> Self {
        Self::with_registry(TouchRegistry::new(time_source))
    }

    pub fn with_registry(registry: TouchRegistry) -> Self {
        Self {
            registry,
            slots: Vec::new(),
            free_slots: Vec::new(),
            z_order: Vec::new(),
        }
    }

    pub fn registry(&self) -> &TouchRegistry {
        &self.registry
    }

    pub fn time_source(&self) -> &SharedTimeSource {
        self.registry.time_source()
    }

    /// Adds `target` on top of every target already in the window.
    pub fn insert(&mut self, target: T) -> TargetId {
        let id = match self.free_slots.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.target = Some(target);
                TargetId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(TargetSlot {
                    generation: 0,
                    target: Some(target),
                });
                TargetId::new(index, 0)
            }
        };
        self.z_order.push(id);
        id
    }

    /// Takes `id` out of the window. The target gets to withdraw from the
    /// registry first; anything it forgets is purged afterwards anyway.
    pub fn remove(&mut self, id: TargetId) -> Option<T> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        let mut target = slot.target.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_slots.push(id.index());
        self.z_order.retain(|other| *other != id);

        {
            let mut ctx = TouchContext::new(&mut self.registry, id);
            target.detach(&mut ctx);
        }
        self.registry.forget_target(id);
        self.deliver_notifications();
        Some(target)
    }

    pub fn target(&self, id: TargetId) -> Option<&T> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.target.as_ref())
    }

    pub fn target_mut(&mut self, id: TargetId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.target.as_mut())
    }

    pub fn contains_target(&self, id: TargetId) -> bool {
        self.target(id).is_some()
    }

    pub fn target_ids(&self) -> &[TargetId] {
        &self.z_order
    }

    /// Runs `f` on a target together with a registry context, for changes
    /// (like disabling) that have to touch the registry.
    pub fn update_target<R>(
        &mut self,
        id: TargetId,
        f: impl FnOnce(&mut T, &mut TouchContext<'_>) -> R,
    ) -> Option<R> {
        let result = self.with_target(id, f);
        self.deliver_notifications();
        result
    }

    fn with_target<R>(
        &mut self,
        id: TargetId,
        f: impl FnOnce(&mut T, &mut TouchContext<'_>) -> R,
    ) -> Option<R> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        let target = slot.target.as_mut()?;
        let mut ctx = TouchContext::new(&mut self.registry, id);
        Some(f(target, &mut ctx))
    }

    /// Delivers one window touch event.
    pub fn dispatch(&mut self, event: &TouchEvent) {
        log::trace!("dispatching {:?}", event.points());

        self.registry.update(event);
        let owned_plan = self.registry.owned_delivery_plan(event);
        let unowned_plan = self.registry.unowned_delivery_plan(event);

        self.registry.begin_dispatch();

        for (target, mut ids) in unowned_plan {
            self.deliver_notifications();
            ids.retain(|id| self.registry.wants_unowned_updates(*id, target));
            if ids.is_empty() {
                continue;
            }
            self.with_target(target, |handler, ctx| {
                let local = event.subset(&ids).mapped_from_scene(&handler.scene_transform());
                handler.unowned_touch_event(&local, ctx);
            });
            self.deliver_notifications();
        }

        for (target, mut ids) in owned_plan {
            ids.retain(|id| self.registry.delivery_target_of(*id) == Some(target));
            if ids.is_empty() {
                continue;
            }
            self.with_target(target, |handler, ctx| {
                let local = event.subset(&ids).mapped_from_scene(&handler.scene_transform());
                handler.touch_event(&local, ctx);
            });
            self.deliver_notifications();
        }

        self.deliver_presses(event);

        for id in self.z_order.clone() {
            self.with_target(id, |handler, ctx| {
                if handler.is_interactive() {
                    handler.observe_window_touches(event, ctx);
                }
            });
            self.deliver_notifications();
        }

        self.registry.end_dispatch();
        self.deliver_notifications();
    }

    /// Offers fresh presses to the targets under them, topmost first, until
    /// one accepts.
    fn deliver_presses(&mut self, event: &TouchEvent) {
        let mut claimed = TouchIdSet::default();
        for point in event.pressed_points() {
            if self.registry.delivery_target_of(point.id).is_some() {
                claimed.insert(point.id);
            }
        }

        for id in self.z_order.clone().into_iter().rev() {
            let hits: SmallVec<[TouchId; 4]> = match self.target(id) {
                Some(target) if target.is_interactive() => {
                    let transform = target.scene_transform();
                    event
                        .pressed_points()
                        .filter(|point| !claimed.contains(&point.id))
                        .filter(|point| {
                            target.contains(transform.map_from_scene(point.scene_pos))
                        })
                        .map(|point| point.id)
                        .collect()
                }
                _ => continue,
            };
            if hits.is_empty() {
                continue;
            }

            let accepted = self
                .with_target(id, |handler, ctx| {
                    let local = event.subset(&hits).mapped_from_scene(&handler.scene_transform());
                    handler.touch_event(&local, ctx)
                })
                .unwrap_or(false);

            if accepted {
                for touch in &hits {
                    if self.registry.owner_of(*touch).is_none() {
                        self.registry.grab_touch(*touch, id);
                    }
                    claimed.insert(*touch);
                }
            }
            self.deliver_notifications();
        }
    }

    /// Fires whatever timers expired in the registry and in the targets.
    pub fn process_timers(&mut self) {
        self.registry.process_timers();
        self.deliver_notifications();

        for id in self.z_order.clone() {
            self.with_target(id, |handler, ctx| handler.process_timers(ctx));
            self.deliver_notifications();
        }
    }

    fn deliver_notifications(&mut self) {
        while let Some(notification) = self.registry.pop_notification() {
            log::trace!("delivering {:?}", notification);
            let target = notification.target();
            let delivered = self.with_target(target, |handler, ctx| match notification {
                RegistryNotification::Ownership(event) => handler.touch_ownership_event(event, ctx),
                RegistryNotification::Ungrab { touch, .. } => handler.touch_ungrab_event(touch, ctx),
            });
            if delivered.is_none() {
                log::debug!("dropping notification for departed {target}");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
