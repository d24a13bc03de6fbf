//! Shared gesture constants for directional drag recognition.
//!
//! Distances are physical so that a gesture takes the same finger travel on
//! every screen. They get converted to pixels through the window's
//! `ScreenDensity`.

use tactile_geometry::Mm;

/// Travel along the gesture axis needed before a drag is recognized.
pub const DISTANCE_THRESHOLD: Mm = Mm(4.0);

/// Travel in any direction after which an undecided drag is given up.
pub const MAX_DISTANCE: Mm = Mm(10.0);

/// Jitter amplitude absorbed by the damped touch position.
pub const MAX_DAMPING_DELTA: Mm = Mm(1.0);

/// Time after a press during which another press makes the gesture a
/// multi-finger one.
pub const COMPOSITION_TIME_MS: i64 = 60;

/// How long a drag may stay undecided.
pub const MAX_TIME_MS: i64 = 400;

/// Fraction of the remaining distance the public touch position catches up
/// with on every update once recognized.
pub const PUBLIC_POS_SMOOTHING: f32 = 0.4;
