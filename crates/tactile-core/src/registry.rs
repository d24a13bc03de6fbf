//! Window-wide arbitration of touch ownership.
//!
//! Every touch that goes down in a window gets a `TouchInfo` here. Gesture
//! recognizers that might want a touch sign up as candidates and keep being
//! told about its updates while nobody owns it. The first candidate that
//! asks for ownership gets it; everybody else is told they lost and drops
//! out. From then on only the owner sees that touch.
//!
//! The registry never calls into targets. Outcomes that targets must hear
//! about are queued as [`RegistryNotification`]s and delivered by the
//! dispatcher after the current handler returns.

use crate::error::RegistryError;
use crate::event::{RegistryNotification, TouchEvent, TouchId, TouchOwnershipEvent};
use crate::pool::Pool;
use crate::target::TargetId;
use crate::time::SharedTimeSource;
use crate::timer::SingleShotTimer;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// How long a candidate may stay undecided before it forfeits the touch.
pub const DEFAULT_CANDIDATE_INACTIVITY_TIMEOUT_MS: i64 = 1000;

/// Touch ids grouped by the target they are delivered to, in delivery order.
pub type DeliveryPlan = IndexMap<TargetId, SmallVec<[TouchId; 4]>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    pub candidate_inactivity_timeout_ms: i64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            candidate_inactivity_timeout_ms: DEFAULT_CANDIDATE_INACTIVITY_TIMEOUT_MS,
        }
    }
}

#[derive(Clone, Debug)]
struct CandidateInfo {
    target: TargetId,
    inactivity_timer: SingleShotTimer,
}

#[derive(Clone, Debug)]
struct TouchInfo {
    id: TouchId,
    physically_ended: bool,
    candidates: SmallVec<[CandidateInfo; 2]>,
    owner: Option<TargetId>,
    /// Target that accepted the press outside of the candidate protocol.
    grabber: Option<TargetId>,
    watchers: SmallVec<[TargetId; 2]>,
}

impl TouchInfo {
    fn new(id: TouchId) -> Self {
        Self {
            id,
            physically_ended: false,
            candidates: SmallVec::new(),
            owner: None,
            grabber: None,
            watchers: SmallVec::new(),
        }
    }

    fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    fn ended(&self) -> bool {
        self.physically_ended && (self.is_owned() || self.candidates.is_empty())
    }

    fn candidate_index(&self, target: TargetId) -> Option<usize> {
        self.candidates
            .iter()
            .position(|candidate| candidate.target == target)
    }

    fn delivery_target(&self) -> Option<TargetId> {
        self.owner.or(self.grabber)
    }
}

pub struct TouchRegistry {
    time_source: SharedTimeSource,
    config: RegistryConfig,
    touches: Pool<TouchInfo>,
    notifications: VecDeque<RegistryNotification>,
    in_dispatch_loop: bool,
}

impl TouchRegistry {
    pub fn new(time_source: SharedTimeSource) -> Self {
        Self::with_config(time_source, RegistryConfig::default())
    }

    pub fn with_config(time_source: SharedTimeSource, config: RegistryConfig) -> Self {
        Self {
            time_source,
            config,
            touches: Pool::new(),
            notifications: VecDeque::new(),
            in_dispatch_loop: false,
        }
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    pub fn time_source(&self) -> &SharedTimeSource {
        &self.time_source
    }

    pub fn now(&self) -> i64 {
        self.time_source.msecs_since_reference()
    }

    fn touch_info(&self, touch: TouchId) -> Option<&TouchInfo> {
        self.touches.find(|info| info.id == touch)
    }

    fn touch_info_mut(&mut self, touch: TouchId) -> Option<&mut TouchInfo> {
        self.touches.find_mut(|info| info.id == touch)
    }

    /// Starts tracking pressed points and flags ended ones.
    pub fn update(&mut self, event: &TouchEvent) {
        for point in event.points() {
            if point.state.is_pressed() {
                if let Some(stale) = self.touches.position(|info| info.id == point.id) {
                    log::warn!(
                        "touch {} pressed while still tracked, dropping its old state",
                        point.id
                    );
                    self.touches.free_slot(stale);
                }
                self.touches.acquire_slot(TouchInfo::new(point.id));
            } else if point.state.has_ended() {
                match self.touch_info_mut(point.id) {
                    Some(info) => info.physically_ended = true,
                    None => log::trace!("touch {} ended without being tracked", point.id),
                }
            }
        }
    }

    /// Signs `candidate` up for `touch`. Adding the same candidate twice is a
    /// no-op.
    pub fn add_candidate_owner_for_touch(
        &mut self,
        touch: TouchId,
        candidate: TargetId,
    ) -> Result<(), RegistryError> {
        let now = self.now();
        let timeout = self.config.candidate_inactivity_timeout_ms;
        let info = self
            .touch_info_mut(touch)
            .ok_or(RegistryError::UnknownTouch { touch })?;

        if let Some(owner) = info.owner {
            log::warn!("{candidate} tried to become a candidate for touch {touch}, owned by {owner}");
            return Err(RegistryError::AlreadyOwned { touch, owner });
        }

        if info.candidate_index(candidate).is_some() {
            return Ok(());
        }

        let mut inactivity_timer = SingleShotTimer::new(timeout);
        inactivity_timer.start(now);
        info.candidates.push(CandidateInfo {
            target: candidate,
            inactivity_timer,
        });
        log::trace!("{candidate} is now a candidate for touch {touch}");
        Ok(())
    }

    /// Withdraws `candidate` from `touch`. Calling it for a target that is not
    /// a candidate, or for an unknown touch, does nothing. Withdrawing the
    /// owner leaves the touch unowned.
    pub fn remove_candidate_owner_for_touch(&mut self, touch: TouchId, candidate: TargetId) {
        let Some(index) = self.touches.position(|info| info.id == touch) else {
            return;
        };
        let Some(info) = self.touches.get_mut(index) else {
            return;
        };

        if let Some(position) = info.candidate_index(candidate) {
            info.candidates.remove(position);
            log::trace!("{candidate} is no longer a candidate for touch {touch}");
        }
        if info.owner == Some(candidate) {
            info.owner = None;
            log::debug!("{candidate} released ownership of touch {touch}");
        }

        if !self.in_dispatch_loop && info.ended() {
            self.touches.free_slot(index);
        }
    }

    /// Keeps `watcher` informed about unowned updates of `touch` without
    /// competing for it.
    pub fn add_touch_watcher(&mut self, touch: TouchId, watcher: TargetId) {
        match self.touch_info_mut(touch) {
            Some(info) => {
                if !info.watchers.contains(&watcher) {
                    info.watchers.push(watcher);
                }
            }
            None => log::trace!("{watcher} cannot watch untracked touch {touch}"),
        }
    }

    /// Grants `candidate` exclusive delivery of `touch`.
    ///
    /// All other candidates lose the touch and are notified. Only a current
    /// candidate may ask.
    pub fn request_touch_ownership(
        &mut self,
        touch: TouchId,
        candidate: TargetId,
    ) -> Result<(), RegistryError> {
        let info = self
            .touch_info_mut(touch)
            .ok_or(RegistryError::UnknownTouch { touch })?;

        match info.owner {
            Some(owner) if owner == candidate => return Ok(()),
            Some(owner) => return Err(RegistryError::AlreadyOwned { touch, owner }),
            None => {}
        }
        if info.candidate_index(candidate).is_none() {
            log::warn!("{candidate} asked for touch {touch} without being a candidate");
            return Err(RegistryError::NotACandidate { touch, target: candidate });
        }

        let losers: SmallVec<[TargetId; 2]> = info
            .candidates
            .drain(..)
            .map(|other| other.target)
            .filter(|other| *other != candidate)
            .collect();
        info.owner = Some(candidate);
        let displaced_grabber = info.grabber.take().filter(|grabber| *grabber != candidate);

        log::debug!("{candidate} now owns touch {touch}");
        self.notifications
            .push_back(RegistryNotification::Ownership(TouchOwnershipEvent {
                touch,
                target: candidate,
                gained: true,
            }));
        for loser in losers {
            self.notifications
                .push_back(RegistryNotification::Ownership(TouchOwnershipEvent {
                    touch,
                    target: loser,
                    gained: false,
                }));
        }
        if let Some(grabber) = displaced_grabber {
            self.notifications.push_back(RegistryNotification::Ungrab {
                touch,
                target: grabber,
            });
        }
        Ok(())
    }

    /// Records that `target` accepted the press of `touch`. Has no effect on
    /// an owned touch.
    pub fn grab_touch(&mut self, touch: TouchId, target: TargetId) {
        if let Some(info) = self.touch_info_mut(touch) {
            if !info.is_owned() {
                info.grabber = Some(target);
            }
        }
    }

    /// Drops every reference the registry holds to `target`.
    pub fn forget_target(&mut self, target: TargetId) {
        for info in self.touches.iter_mut() {
            info.candidates.retain(|candidate| candidate.target != target);
            info.watchers.retain(|watcher| *watcher != target);
            if info.owner == Some(target) {
                info.owner = None;
            }
            if info.grabber == Some(target) {
                info.grabber = None;
            }
        }
        self.notifications
            .retain(|notification| notification.target() != target);
        if !self.in_dispatch_loop {
            self.free_ended_touch_infos();
        }
    }

    /// Rejects candidates that stayed undecided for too long.
    pub fn process_timers(&mut self) {
        let now = self.now();
        let mut defaulted: SmallVec<[(TouchId, TargetId); 2]> = SmallVec::new();
        for info in self.touches.iter_mut() {
            let id = info.id;
            info.candidates.retain(|candidate| {
                if candidate.inactivity_timer.take_expired(now) {
                    defaulted.push((id, candidate.target));
                    false
                } else {
                    true
                }
            });
        }

        for (touch, target) in defaulted {
            log::warn!("candidate {target} for touch {touch} defaulted");
            self.notifications
                .push_back(RegistryNotification::Ownership(TouchOwnershipEvent {
                    touch,
                    target,
                    gained: false,
                }));
        }

        if !self.in_dispatch_loop {
            self.free_ended_touch_infos();
        }
    }

    /// Owned (or grabbed) points of `event`, grouped by who receives them.
    pub fn owned_delivery_plan(&self, event: &TouchEvent) -> DeliveryPlan {
        let mut plan = DeliveryPlan::new();
        for point in event.points() {
            if let Some(target) = self.touch_info(point.id).and_then(TouchInfo::delivery_target) {
                plan.entry(target).or_default().push(point.id);
            }
        }
        plan
    }

    /// Unowned updates of `event` that candidates and watchers must hear
    /// about, in registration order.
    pub fn unowned_delivery_plan(&self, event: &TouchEvent) -> DeliveryPlan {
        let mut plan = DeliveryPlan::new();
        for info in self.touches.iter() {
            if info.is_owned() && info.watchers.is_empty() {
                continue;
            }
            if !event.contains(info.id) {
                continue;
            }

            let candidates = info
                .candidates
                .iter()
                .map(|candidate| candidate.target)
                .filter(|_| !info.is_owned());
            for target in candidates.chain(info.watchers.iter().copied()) {
                let ids = plan.entry(target).or_default();
                if !ids.contains(&info.id) {
                    ids.push(info.id);
                }
            }
        }
        plan
    }

    /// Whether `target` should still get unowned updates of `touch`.
    pub fn wants_unowned_updates(&self, touch: TouchId, target: TargetId) -> bool {
        self.touch_info(touch).is_some_and(|info| {
            info.watchers.contains(&target)
                || (!info.is_owned() && info.candidate_index(target).is_some())
        })
    }

    pub fn begin_dispatch(&mut self) {
        self.in_dispatch_loop = true;
    }

    pub fn end_dispatch(&mut self) {
        self.in_dispatch_loop = false;
        self.free_ended_touch_infos();
    }

    pub fn free_ended_touch_infos(&mut self) {
        self.touches.retain(|info| !info.ended());
    }

    pub fn pop_notification(&mut self) -> Option<RegistryNotification> {
        self.notifications.pop_front()
    }

    pub fn has_pending_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }

    pub fn owner_of(&self, touch: TouchId) -> Option<TargetId> {
        self.touch_info(touch).and_then(|info| info.owner)
    }

    pub fn grabber_of(&self, touch: TouchId) -> Option<TargetId> {
        self.touch_info(touch).and_then(|info| info.grabber)
    }

    /// Owner if there is one, otherwise whoever accepted the press.
    pub fn delivery_target_of(&self, touch: TouchId) -> Option<TargetId> {
        self.touch_info(touch).and_then(TouchInfo::delivery_target)
    }

    pub fn candidates_of(&self, touch: TouchId) -> Vec<TargetId> {
        self.touch_info(touch)
            .map(|info| info.candidates.iter().map(|c| c.target).collect())
            .unwrap_or_default()
    }

    pub fn watchers_of(&self, touch: TouchId) -> Vec<TargetId> {
        self.touch_info(touch)
            .map(|info| info.watchers.to_vec())
            .unwrap_or_default()
    }

    pub fn is_candidate(&self, touch: TouchId, target: TargetId) -> bool {
        self.touch_info(touch)
            .is_some_and(|info| info.candidate_index(target).is_some())
    }

    pub fn is_tracking(&self, touch: TouchId) -> bool {
        self.touch_info(touch).is_some()
    }

    pub fn active_touch_count(&self) -> usize {
        self.touches.len()
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
