//! Hash containers for touch ids.
//!
//! Touch ids are small integers handed out by the windowing system, so the
//! Fx hasher is used unless the `std-hash` feature asks for std's SipHash.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
}

/// Touch ids already routed during one dispatch.
pub type TouchIdSet = map::HashSet<crate::event::TouchId>;
