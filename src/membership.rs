/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Membership function library — six parametrised scalar → [0, 1] shapes.
//!
//! Every shape is built from the same primitive: a straight line `a·x + b`
//! clamped to the unit interval. Distance memberships take the raw distance;
//! angle memberships run their input through [`normalize_angle`] first so a
//! straight line is meaningful on a periodic domain.
//!
//! | Function | Input | Shape |
//! |----------|-------|-------|
//! | [`wall_safe`] | distance | single ramp |
//! | [`wall_close`] | distance | rising ramp until it reaches 1, then falling ramp |
//! | [`wall_danger`] | distance | single ramp (typically descending) |
//! | [`angle_left`] | degrees | single ramp on normalised angle |
//! | [`angle_right`] | degrees | single ramp on normalised angle |
//! | [`angle_front`] | degrees | symmetric tent around 0 |
//!
//! # Invariants
//!
//! - **MEM-001**: every function returns a degree in `[0.0, 1.0]`; a NaN line
//!   value maps to `0.0`.
//!
//! [`normalize_angle`]: crate::angle::normalize_angle

use crate::angle::normalize_angle;

// ─── Ramp primitives ────────────────────────────────────────────────────────

/// A straight line `slope · x + intercept`, read as a membership degree by
/// clamping to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ramp {
    /// Line slope `a`.
    pub slope: f64,
    /// Line intercept `b`.
    pub intercept: f64,
}

impl Ramp {
    /// Construct a ramp from its slope and intercept.
    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Unclamped line value at `x`.
    #[inline]
    pub fn line(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Same line with the slope sign flipped; intercept unchanged.
    #[inline]
    pub fn mirrored(&self) -> Self {
        Self::new(-self.slope, self.intercept)
    }

    /// Membership degree at `x`: the line clamped to `[0, 1]`.
    #[inline]
    pub fn degree(&self, x: f64) -> f64 {
        clamp_unit(self.line(x))
    }
}

/// Two-segment ramp used by the wall-close membership: `rising` applies while
/// its line is below 1, `falling` takes over from there.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitRamp {
    /// Segment `(a, b)` in effect while `a·x + b < 1`.
    pub rising: Ramp,
    /// Segment `(c, d)` in effect once the rising line reaches 1.
    pub falling: Ramp,
}

impl SplitRamp {
    /// Construct from the four coefficients `(a, b, c, d)`.
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            rising: Ramp::new(a, b),
            falling: Ramp::new(c, d),
        }
    }

    /// Membership degree at `x`.
    #[inline]
    pub fn degree(&self, x: f64) -> f64 {
        if self.rising.line(x) < 1.0 {
            self.rising.degree(x)
        } else {
            self.falling.degree(x)
        }
    }
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

// ─── Hand-tuned defaults ────────────────────────────────────────────────────

/// Hand-tuned angle-front coefficients.
pub const DEFAULT_ANGLE_FRONT: Ramp = Ramp::new(5.0, 1.0);
/// Hand-tuned angle-left coefficients.
pub const DEFAULT_ANGLE_LEFT: Ramp = Ramp::new(2.0, -1.0);
/// Hand-tuned angle-right coefficients (mirror of left).
pub const DEFAULT_ANGLE_RIGHT: Ramp = Ramp::new(-2.0, -1.0);
/// Hand-tuned wall-safe coefficients.
pub const DEFAULT_WALL_SAFE: Ramp = Ramp::new(0.015, -5.0);
/// Hand-tuned wall-close coefficients.
pub const DEFAULT_WALL_CLOSE: SplitRamp = SplitRamp::new(0.008, -1.2, -0.009, 3.6);
/// Hand-tuned wall-danger coefficients.
pub const DEFAULT_WALL_DANGER: Ramp = Ramp::new(-0.006, 1.6);

// ─── Distance memberships ───────────────────────────────────────────────────

/// "The closest wall is at a safe distance."
pub fn wall_safe(distance: f64, ramp: Ramp) -> f64 {
    ramp.degree(distance)
}

/// "The closest wall is close": rises, saturates at 1, then falls off again.
pub fn wall_close(distance: f64, ramp: SplitRamp) -> f64 {
    ramp.degree(distance)
}

/// "The closest wall is dangerously near."
pub fn wall_danger(distance: f64, ramp: Ramp) -> f64 {
    ramp.degree(distance)
}

// ─── Angle memberships ──────────────────────────────────────────────────────

/// "The angle points to the left." Single ramp on the normalised angle.
pub fn angle_left(degrees: i32, ramp: Ramp) -> f64 {
    ramp.degree(normalize_angle(degrees))
}

/// "The angle points to the right." Same shape as [`angle_left`]; the mirror
/// comes from the coefficients.
pub fn angle_right(degrees: i32, ramp: Ramp) -> f64 {
    ramp.degree(normalize_angle(degrees))
}

/// "The angle points straight ahead."
///
/// Symmetric about 0: `a·t + b` for `t ≤ 0`, `−a·t + b` for `t > 0`.
pub fn angle_front(degrees: i32, ramp: Ramp) -> f64 {
    let t = normalize_angle(degrees);
    if t <= 0.0 {
        ramp.degree(t)
    } else {
        ramp.mirrored().degree(t)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn in_unit(v: f64) -> bool {
        (0.0..=1.0).contains(&v)
    }

    #[test]
    fn test_ramp_clamps_both_ends() {
        let r = Ramp::new(1.0, 0.0);
        assert_eq!(r.degree(-3.0), 0.0);
        assert_eq!(r.degree(0.25), 0.25);
        assert_eq!(r.degree(7.0), 1.0);
    }

    #[test]
    fn test_ramp_nan_maps_to_zero() {
        let r = Ramp::new(f64::INFINITY, 0.0);
        // inf * 0 = NaN
        assert_eq!(r.degree(0.0), 0.0);
    }

    #[test]
    fn test_wall_safe_default_shape() {
        assert_eq!(wall_safe(100.0, DEFAULT_WALL_SAFE), 0.0);
        assert!((wall_safe(350.0, DEFAULT_WALL_SAFE) - 0.25).abs() < 1e-12);
        assert_eq!(wall_safe(600.0, DEFAULT_WALL_SAFE), 1.0);
    }

    #[test]
    fn test_wall_close_switches_branch_at_one() {
        // Rising: 0.008x - 1.2 reaches 1 at x = 275.
        assert_eq!(wall_close(100.0, DEFAULT_WALL_CLOSE), 0.0);
        assert!((wall_close(200.0, DEFAULT_WALL_CLOSE) - 0.4).abs() < 1e-12);
        // At 300 the rising line is 1.2, so the falling branch applies:
        // -0.009 * 300 + 3.6 = 0.9
        assert!((wall_close(300.0, DEFAULT_WALL_CLOSE) - 0.9).abs() < 1e-12);
        assert_eq!(wall_close(600.0, DEFAULT_WALL_CLOSE), 0.0);
    }

    #[test]
    fn test_wall_danger_descends() {
        assert_eq!(wall_danger(50.0, DEFAULT_WALL_DANGER), 1.0);
        assert!((wall_danger(200.0, DEFAULT_WALL_DANGER) - 0.4).abs() < 1e-12);
        assert_eq!(wall_danger(400.0, DEFAULT_WALL_DANGER), 0.0);
    }

    #[test]
    fn test_angle_left_and_right_mirror() {
        assert!((angle_left(90, DEFAULT_ANGLE_LEFT) - 1.0).abs() < 1e-9);
        assert_eq!(angle_left(270, DEFAULT_ANGLE_LEFT), 0.0);
        assert!((angle_right(270, DEFAULT_ANGLE_RIGHT) - 1.0).abs() < 1e-9);
        assert_eq!(angle_right(90, DEFAULT_ANGLE_RIGHT), 0.0);
        // 180° is pinned to +50 on both sides, so it is the one asymmetric point.
        for deg in (0..360).filter(|&d| d != 180) {
            let l = angle_left(deg, DEFAULT_ANGLE_LEFT);
            let r = angle_right(360 - deg, DEFAULT_ANGLE_RIGHT);
            assert!((l - r).abs() < 1e-9, "deg {}: left {} right {}", deg, l, r);
        }
    }

    #[test]
    fn test_angle_front_peaks_ahead() {
        assert_eq!(angle_front(0, DEFAULT_ANGLE_FRONT), 1.0);
        assert_eq!(angle_front(90, DEFAULT_ANGLE_FRONT), 0.0);
        assert_eq!(angle_front(270, DEFAULT_ANGLE_FRONT), 0.0);
        let left = angle_front(10, DEFAULT_ANGLE_FRONT);
        let right = angle_front(350, DEFAULT_ANGLE_FRONT);
        assert!(left > 0.0 && left < 1.0);
        assert!((left - right).abs() < 1e-9);
    }

    #[test]
    fn test_all_memberships_bounded() {
        let ramps = [
            Ramp::new(0.0, 0.0),
            Ramp::new(1e6, -3.0),
            Ramp::new(-1e6, 3.0),
            Ramp::new(-0.5, 0.7),
            Ramp::new(2.5, -10.0),
        ];
        let distances = [0.0, 0.5, 10.0, 250.0, 600.0, 1e9];
        for r in ramps {
            let split = SplitRamp { rising: r, falling: r.mirrored() };
            for &d in &distances {
                assert!(in_unit(wall_safe(d, r)));
                assert!(in_unit(wall_danger(d, r)));
                assert!(in_unit(wall_close(d, split)));
            }
            for deg in (-360..720).step_by(7) {
                assert!(in_unit(angle_left(deg, r)));
                assert!(in_unit(angle_right(deg, r)));
                assert!(in_unit(angle_front(deg, r)));
            }
        }
    }
}
