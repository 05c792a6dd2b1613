/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Centroid defuzzification — closed-form area and moment of the output sets.
//!
//! Each output variable owns a fixed trapezoid-like set on the steering axis:
//! a rising ramp up to the variable's strength `h`, a flat top at `h`, and a
//! falling ramp back to zero.
//!
//! ```text
//!          p1        p2
//!   h ─────┬─────────┬─────
//!         /           \
//!        / rise   fall \
//!   0 ──┴───────────────┴──
//!      z1               z2
//! ```
//!
//! Area and first moment are computed exactly from the line coefficients, so
//! one tick costs a fixed handful of multiplications no matter the inputs.
//!
//! # Edge cases
//!
//! - A ramp with zero slope has no crossing; its integrals are 0 and it
//!   suppresses the flat top.
//! - Inverted bounds (`lo > hi`) integrate to 0. For the flat top this
//!   happens when the two ramps cross below `h` (strength above the apex).
//! - Zero total area returns [`NEUTRAL_CENTROID`].

use crate::aggregate::OutputStrengths;
use crate::membership::Ramp;

/// Crisp output when no output set has area: the centre of the no-turn band.
pub const NEUTRAL_CENTROID: f64 = 1.0;

// ─── Primitive integrals ────────────────────────────────────────────────────

/// `∫ (a·x + b) dx` over `[lo, hi]`; 0 if `lo > hi`.
pub fn integrate_linear(a: f64, b: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return 0.0;
    }
    a * (hi * hi - lo * lo) / 2.0 + b * (hi - lo)
}

/// `∫ x·(a·x + b) dx` over `[lo, hi]`; 0 if `lo > hi`.
pub fn integrate_linear_x(a: f64, b: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return 0.0;
    }
    a * (hi * hi * hi - lo * lo * lo) / 3.0 + b * (hi * hi - lo * lo) / 2.0
}

/// `∫ y dx` over `[lo, hi]` for the constant `y`; 0 if `lo > hi`.
pub fn integrate_box(y: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return 0.0;
    }
    y * (hi - lo)
}

/// `∫ x·y dx` over `[lo, hi]` for the constant `y`; 0 if `lo > hi`.
pub fn integrate_box_x(y: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return 0.0;
    }
    y * (hi * hi - lo * lo) / 2.0
}

/// `x` where `a·x + b == y`, or `None` for a flat line.
#[inline]
pub fn crossing(a: f64, b: f64, y: f64) -> Option<f64> {
    if a == 0.0 {
        None
    } else {
        Some((y - b) / a)
    }
}

/// Ordered `[lo, hi]` between the line's zero crossing and its `maxy` crossing.
fn ramp_span(a: f64, b: f64, maxy: f64) -> Option<(f64, f64)> {
    let top = crossing(a, b, maxy)?;
    let zero = crossing(a, b, 0.0)?;
    Some(if top > zero { (zero, top) } else { (top, zero) })
}

/// Area under `a·x + b` between where it equals 0 and where it equals `maxy`.
///
/// Returns 0 when `a == 0`.
pub fn integrate_linear_with_y(a: f64, b: f64, maxy: f64) -> f64 {
    ramp_span(a, b, maxy).map_or(0.0, |(lo, hi)| integrate_linear(a, b, lo, hi))
}

/// First moment of `a·x + b` between where it equals 0 and where it equals `maxy`.
///
/// Returns 0 when `a == 0`.
pub fn integrate_linear_x_with_y(a: f64, b: f64, maxy: f64) -> f64 {
    ramp_span(a, b, maxy).map_or(0.0, |(lo, hi)| integrate_linear_x(a, b, lo, hi))
}

// ─── Output shapes ──────────────────────────────────────────────────────────

/// Fixed geometry of one output fuzzy set: rising ramp, flat top, falling ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputShape {
    /// Ramp `(f1a, f1b)` leading up to the plateau.
    pub rise: Ramp,
    /// Ramp `(f2a, f2b)` leading back down to zero.
    pub fall: Ramp,
}

/// Turn-left set: `(2, 0, −2, 2)`, centred on 0.5.
pub const TURN_LEFT_SHAPE: OutputShape = OutputShape::new(2.0, 0.0, -2.0, 2.0);
/// No-turn set: `(3, −2, −3, 4)`, centred on 1.0.
pub const NO_TURN_SHAPE: OutputShape = OutputShape::new(3.0, -2.0, -3.0, 4.0);
/// Turn-right set: `(2, −2, −2, 4)`, centred on 1.5.
pub const TURN_RIGHT_SHAPE: OutputShape = OutputShape::new(2.0, -2.0, -2.0, 4.0);

impl OutputShape {
    /// Build from the four line coefficients `(f1a, f1b, f2a, f2b)`.
    pub const fn new(f1a: f64, f1b: f64, f2a: f64, f2b: f64) -> Self {
        Self {
            rise: Ramp::new(f1a, f1b),
            fall: Ramp::new(f2a, f2b),
        }
    }

    /// Where the rising and falling ramps reach `height`, if both are sloped.
    fn plateau(&self, height: f64) -> Option<(f64, f64)> {
        let p1 = crossing(self.rise.slope, self.rise.intercept, height)?;
        let p2 = crossing(self.fall.slope, self.fall.intercept, height)?;
        Some((p1, p2))
    }

    /// Area of the set clipped at `height`.
    pub fn area(&self, height: f64) -> f64 {
        let top = self
            .plateau(height)
            .map_or(0.0, |(p1, p2)| integrate_box(height, p1, p2));
        integrate_linear_with_y(self.rise.slope, self.rise.intercept, height)
            + top
            + integrate_linear_with_y(self.fall.slope, self.fall.intercept, height)
    }

    /// First moment (`∫ x·μ(x) dx`) of the set clipped at `height`.
    pub fn moment(&self, height: f64) -> f64 {
        let top = self
            .plateau(height)
            .map_or(0.0, |(p1, p2)| integrate_box_x(height, p1, p2));
        integrate_linear_x_with_y(self.rise.slope, self.rise.intercept, height)
            + top
            + integrate_linear_x_with_y(self.fall.slope, self.fall.intercept, height)
    }
}

// ─── Centroid ───────────────────────────────────────────────────────────────

/// Area-weighted centroid of the three output sets at the given strengths.
///
/// Returns [`NEUTRAL_CENTROID`] when the total area is exactly zero.
///
/// ```rust
/// use fuzzy_pilot::defuzz::centroid;
///
/// assert_eq!(centroid(0.0, 0.0, 0.0), 1.0);
/// assert!(centroid(1.0, 0.0, 0.0) < 0.75);
/// assert!(centroid(0.0, 0.0, 1.0) >= 1.25);
/// ```
pub fn centroid(turn_left: f64, no_turn: f64, turn_right: f64) -> f64 {
    let area = TURN_LEFT_SHAPE.area(turn_left)
        + NO_TURN_SHAPE.area(no_turn)
        + TURN_RIGHT_SHAPE.area(turn_right);
    if area == 0.0 {
        return NEUTRAL_CENTROID;
    }
    let moment = TURN_LEFT_SHAPE.moment(turn_left)
        + NO_TURN_SHAPE.moment(no_turn)
        + TURN_RIGHT_SHAPE.moment(turn_right);
    moment / area
}

/// [`centroid`] of aggregated strengths.
pub fn defuzzify(strengths: &OutputStrengths) -> f64 {
    centroid(strengths.turn_left, strengths.no_turn, strengths.turn_right)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
