//! Bookkeeping of the touches currently down and when each one started.

use crate::event::{TouchEvent, TouchId};
use crate::pool::Pool;
use crate::time::SharedTimeSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ActiveTouchInfo {
    id: TouchId,
    start_time: i64,
}

/// Tracks pressed touch ids together with their press timestamps.
///
/// This is what recognizers consult to know whether another finger landed
/// recently enough to turn a would-be single-finger gesture into a
/// multi-finger one.
pub struct ActiveTouchesInfo {
    time_source: SharedTimeSource,
    touches: Pool<ActiveTouchInfo>,
}

impl ActiveTouchesInfo {
    pub fn new(time_source: SharedTimeSource) -> Self {
        Self {
            time_source,
            touches: Pool::new(),
        }
    }

    pub fn set_time_source(&mut self, time_source: SharedTimeSource) {
        self.time_source = time_source;
    }

    /// Records presses and forgets released or cancelled touches.
    pub fn update(&mut self, event: &TouchEvent) {
        if !event.has_pressed() && !event.has_ended() {
            return;
        }

        for point in event.points() {
            if point.state.is_pressed() {
                self.add_touch(point.id);
            } else if point.state.has_ended() {
                self.remove_touch(point.id);
            }
        }
    }

    fn add_touch(&mut self, id: TouchId) {
        let now = self.time_source.msecs_since_reference();
        if let Some(existing) = self.touches.find_mut(|info| info.id == id) {
            log::warn!("touch {id} pressed again without being released, restarting it");
            existing.start_time = now;
            return;
        }
        self.touches.acquire_slot(ActiveTouchInfo {
            id,
            start_time: now,
        });
    }

    fn remove_touch(&mut self, id: TouchId) {
        if let Some(index) = self.touches.position(|info| info.id == id) {
            self.touches.free_slot(index);
        }
    }

    pub fn touch_start_time(&self, id: TouchId) -> Option<i64> {
        self.touches
            .find(|info| info.id == id)
            .map(|info| info.start_time)
    }

    pub fn contains(&self, id: TouchId) -> bool {
        self.touch_start_time(id).is_some()
    }

    /// Start time of the touch that was pressed last, if any touch is down.
    pub fn most_recent_start_time(&self) -> Option<i64> {
        self.touches.iter().map(|info| info.start_time).max()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn clear(&mut self) {
        self.touches.clear();
    }
}

#[cfg(test)]
#[path = "tests/active_touches_tests.rs"]
mod tests;
