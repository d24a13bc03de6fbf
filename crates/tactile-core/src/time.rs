//! Time sources for the touch runtime.
//!
//! The composition window and every timer in Tactile read the clock through
//! [`TimeSource`], so hosts can plug in the platform clock and tests can step
//! time deterministically.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use web_time::Instant;

/// Provides millisecond timestamps relative to an arbitrary fixed reference.
pub trait TimeSource {
    /// Returns the number of milliseconds elapsed since the reference point.
    fn msecs_since_reference(&self) -> i64;
}

/// Shared handle to the clock used by a window and everything attached to it.
pub type SharedTimeSource = Rc<dyn TimeSource>;

/// Wall clock backed by a monotonic [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct RealTimeSource {
    reference: Instant,
}

impl RealTimeSource {
    pub fn new() -> Self {
        Self {
            reference: Instant::now(),
        }
    }

    pub fn shared() -> SharedTimeSource {
        Rc::new(Self::new())
    }
}

impl Default for RealTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for RealTimeSource {
    fn msecs_since_reference(&self) -> i64 {
        i64::try_from(self.reference.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

/// Manually driven clock. Clones share the same current time.
#[derive(Clone, Default)]
pub struct FakeTimeSource {
    now: Rc<Cell<i64>>,
}

impl FakeTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(msecs: i64) -> Self {
        let source = Self::new();
        source.set(msecs);
        source
    }

    pub fn set(&self, msecs: i64) {
        self.now.set(msecs);
    }

    pub fn advance(&self, msecs: i64) {
        self.now.set(self.now.get() + msecs);
    }

    pub fn now(&self) -> i64 {
        self.now.get()
    }

    /// Returns a type-erased handle that still follows this clock.
    pub fn shared(&self) -> SharedTimeSource {
        Rc::new(self.clone())
    }
}

impl TimeSource for FakeTimeSource {
    fn msecs_since_reference(&self) -> i64 {
        self.now.get()
    }
}

impl fmt::Debug for FakeTimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeTimeSource")
            .field("now", &self.now.get())
            .finish()
    }
}
