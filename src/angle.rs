/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Angle normalisation — periodic degrees to a bounded, locally linear coordinate.
//!
//! Sensor angles are measured anticlockwise from the agent's heading in whole
//! degrees. Membership ramps need a coordinate where "ahead" is 0, "left" is
//! positive and "right" is negative, so every angle is mapped through the
//! tangent of its half-angle:
//!
//! ```text
//!   degrees :   0     45     90    135   180   225    270    315
//!   tan(x/2):   0   0.41    1.0   2.41   +50  -2.41   -1.0  -0.41
//! ```
//!
//! # Invariants
//!
//! - **ANG-001**: output is always in `[-ANGLE_LIMIT, ANGLE_LIMIT]`.
//! - **ANG-002**: exactly 180° returns `+ANGLE_LIMIT` (the half-angle tangent is
//!   undefined there).

use core::f64::consts::PI;

/// Saturation bound of the normalised angle coordinate.
pub const ANGLE_LIMIT: f64 = 50.0;

/// Map an angle in degrees to `tan(degrees / 2)`, clamped to `[-50, 50]`.
///
/// Any integer is accepted; only `degrees mod 360` is meaningful to callers.
///
/// ```rust
/// use fuzzy_pilot::angle::normalize_angle;
///
/// assert_eq!(normalize_angle(0), 0.0);
/// assert_eq!(normalize_angle(180), 50.0);
/// assert!((normalize_angle(90) - 1.0).abs() < 1e-12);
/// ```
pub fn normalize_angle(degrees: i32) -> f64 {
    if degrees == 180 {
        return ANGLE_LIMIT;
    }
    let half_radians = f64::from(degrees) / 2.0 * (PI / 180.0);
    let t = libm::tan(half_radians);
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(-ANGLE_LIMIT, ANGLE_LIMIT)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
