/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! The tunable parameter vector ("chromosome") and its slot map.
//!
//! Twelve real coefficients shape every membership function in the
//! controller. The external tuner owns the vector; the controller only reads
//! it, one tick at a time.
//!
//! ```text
//!  slot  meaning                         consumer
//!  ────  ──────────────────────────────  ────────────────────────
//!   0    wall-danger slope               wall_danger
//!   1    wall-danger intercept           wall_danger
//!   2    shared angle slope magnitude    angle_left / angle_right (signed per rule)
//!   3    shared angle intercept          angle_left / angle_right
//!   4-7  wall-close (a, b, c, d)         wall_close
//!   8    wall-safe slope                 wall_safe
//!   9    wall-safe intercept             wall_safe
//!  10    angle-front slope               angle_front
//!  11    angle-front intercept           angle_front
//! ```
//!
//! Slots 2 and 3 feed six rule antecedents. Mirrored rules reuse the same
//! physical slope with a flipped sign; [`AngleRule::slope_sign`] is the
//! single place those signs live.

use core::ops::Index;

use crate::membership::{Ramp, SplitRamp};

/// Number of coefficients in a [`ParamVector`].
pub const PARAM_COUNT: usize = 12;

/// Errors raised when building a [`ParamVector`] from untrusted input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    /// The input did not contain exactly [`PARAM_COUNT`] values.
    #[error("parameter vector needs {expected} values, got {found}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Length supplied.
        found: usize,
    },
    /// A coefficient was NaN or infinite.
    #[error("parameter slot {slot} is not finite")]
    NonFinite {
        /// Offending slot index.
        slot: usize,
    },
}

// ─── Slots ──────────────────────────────────────────────────────────────────

/// Named index into a [`ParamVector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Slot {
    /// Wall-danger slope.
    WallDangerSlope = 0,
    /// Wall-danger intercept.
    WallDangerIntercept = 1,
    /// Shared angle-left/right slope magnitude.
    AngleSlope = 2,
    /// Shared angle-left/right intercept.
    AngleIntercept = 3,
    /// Wall-close rising slope `a`.
    WallCloseA = 4,
    /// Wall-close rising intercept `b`.
    WallCloseB = 5,
    /// Wall-close falling slope `c`.
    WallCloseC = 6,
    /// Wall-close falling intercept `d`.
    WallCloseD = 7,
    /// Wall-safe slope.
    WallSafeSlope = 8,
    /// Wall-safe intercept.
    WallSafeIntercept = 9,
    /// Angle-front slope.
    AngleFrontSlope = 10,
    /// Angle-front intercept.
    AngleFrontIntercept = 11,
}

impl Slot {
    /// Position of this slot in the raw array.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Rule antecedents that consume the shared angle coefficients (slots 2 and 3).
///
/// | Consumer | Rule | Slope sign |
/// |----------|------|-----------|
/// | `DangerLeft` | 1 | negated |
/// | `DangerRight` | 2 | as stored |
/// | `CloseLeft` | 3 | as stored |
/// | `CloseRight` | 4 | as stored |
/// | `FurthestRight` | 6 | as stored |
/// | `FurthestLeft` | 7 | negated |
///
/// Rule 3 reads the stored sign even though it is a "left" antecedent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AngleRule {
    /// Rule 1: closest angle is left (danger branch).
    DangerLeft,
    /// Rule 2: closest angle is right (danger branch).
    DangerRight,
    /// Rule 3: closest angle is left (close branch).
    CloseLeft,
    /// Rule 4: closest angle is right (close branch).
    CloseRight,
    /// Rule 6: furthest angle is right.
    FurthestRight,
    /// Rule 7: furthest angle is left.
    FurthestLeft,
}

impl AngleRule {
    /// Sign applied to the shared slope for this consumer.
    pub const fn slope_sign(self) -> f64 {
        match self {
            AngleRule::DangerLeft | AngleRule::FurthestLeft => -1.0,
            AngleRule::DangerRight
            | AngleRule::CloseLeft
            | AngleRule::CloseRight
            | AngleRule::FurthestRight => 1.0,
        }
    }
}

// ─── ParamVector ────────────────────────────────────────────────────────────

/// The 12-coefficient controller parameter vector.
///
/// Serialises as a flat sequence of 12 numbers (the `xbest` field of a
/// [`BestRecord`](crate::record::BestRecord)).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParamVector(pub [f64; PARAM_COUNT]);

impl ParamVector {
    /// Wrap a raw coefficient array.
    pub const fn new(values: [f64; PARAM_COUNT]) -> Self {
        Self(values)
    }

    /// Build from a slice, checking length and finiteness.
    pub fn from_slice(values: &[f64]) -> Result<Self, ParamError> {
        let array: [f64; PARAM_COUNT] =
            values.try_into().map_err(|_| ParamError::WrongLength {
                expected: PARAM_COUNT,
                found: values.len(),
            })?;
        if let Some(slot) = array.iter().position(|v| !v.is_finite()) {
            return Err(ParamError::NonFinite { slot });
        }
        Ok(Self(array))
    }

    /// Raw coefficients.
    pub fn as_array(&self) -> &[f64; PARAM_COUNT] {
        &self.0
    }

    /// Wall-danger ramp (slots 0, 1).
    pub fn wall_danger(&self) -> Ramp {
        Ramp::new(self[Slot::WallDangerSlope], self[Slot::WallDangerIntercept])
    }

    /// Wall-close two-segment ramp (slots 4–7).
    pub fn wall_close(&self) -> SplitRamp {
        SplitRamp::new(
            self[Slot::WallCloseA],
            self[Slot::WallCloseB],
            self[Slot::WallCloseC],
            self[Slot::WallCloseD],
        )
    }

    /// Wall-safe ramp (slots 8, 9).
    pub fn wall_safe(&self) -> Ramp {
        Ramp::new(self[Slot::WallSafeSlope], self[Slot::WallSafeIntercept])
    }

    /// Angle-front ramp (slots 10, 11).
    pub fn angle_front(&self) -> Ramp {
        Ramp::new(self[Slot::AngleFrontSlope], self[Slot::AngleFrontIntercept])
    }

    /// Shared angle ramp (slots 2, 3) as seen by `rule`, slope sign applied.
    pub fn angle_ramp(&self, rule: AngleRule) -> Ramp {
        Ramp::new(
            rule.slope_sign() * self[Slot::AngleSlope],
            self[Slot::AngleIntercept],
        )
    }
}

impl Default for ParamVector {
    /// The hand-tuned starting point the tuner seeds its search with.
    fn default() -> Self {
        DEFAULT_PARAMS
    }
}

impl Index<Slot> for ParamVector {
    type Output = f64;

    fn index(&self, slot: Slot) -> &f64 {
        &self.0[slot.index()]
    }
}

impl From<[f64; PARAM_COUNT]> for ParamVector {
    fn from(values: [f64; PARAM_COUNT]) -> Self {
        Self(values)
    }
}

// ─── Search space ───────────────────────────────────────────────────────────

/// Hand-tuned starting vector.
pub const DEFAULT_PARAMS: ParamVector = ParamVector([
    -0.006, 1.6, -2.0, -1.0, 0.008, -1.2, -0.009, 3.6, 0.015, -5.0, 5.0, 1.0,
]);

/// Box bounds and per-slot step scales the tuner searches within.
///
/// The controller never reads this; it is shipped alongside the vector so
/// tuners and tools agree on the admissible region.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSpace {
    /// Initial search point.
    pub initial: ParamVector,
    /// Per-slot standard deviation of the initial search distribution.
    pub stds: [f64; PARAM_COUNT],
    /// Per-slot lower bound.
    pub lower: [f64; PARAM_COUNT],
    /// Per-slot upper bound.
    pub upper: [f64; PARAM_COUNT],
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self {
            initial: DEFAULT_PARAMS,
            stds: [
                0.0012, 0.32, 0.4, 0.2, 0.0016, 0.24, 0.0018, 0.72, 0.003, 1.0, 1.0, 0.2,
            ],
            lower: [
                -0.02, -6.0, -6.0, -6.0, -0.02, -6.0, -0.02, -6.0, -0.02, -6.0, -6.0, -6.0,
            ],
            upper: [
                0.02, 6.0, 6.0, 6.0, 0.02, 6.0, 0.02, 6.0, 0.02, 6.0, 6.0, 6.0,
            ],
        }
    }
}

impl SearchSpace {
    /// `true` if every slot of `params` lies within `[lower, upper]`.
    pub fn contains(&self, params: &ParamVector) -> bool {
        params
            .0
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(v, (lo, hi))| *lo <= *v && *v <= *hi)
    }

    /// Clamp every slot of `params` into `[lower, upper]`.
    pub fn clamp(&self, params: &ParamVector) -> ParamVector {
        let mut out = params.0;
        for (i, v) in out.iter_mut().enumerate() {
            *v = v.clamp(self.lower[i], self.upper[i]);
        }
        ParamVector(out)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
