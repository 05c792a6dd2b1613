/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Rule evaluation — eight named antecedents over one sensor snapshot.
//!
//! | # | Antecedent | Consequent |
//! |---|-----------|------------|
//! | 1 | wall danger AND closest angle left | turn right |
//! | 2 | wall danger AND closest angle right | turn left |
//! | 3 | wall close AND closest angle left | turn right |
//! | 4 | wall close AND closest angle right | turn left |
//! | 5 | wall safe | no turn |
//! | 6 | furthest angle right | turn right |
//! | 7 | furthest angle left | turn left |
//! | 8 | furthest angle front | no turn |
//!
//! The consequent column is applied by [`crate::aggregate`]; this module only
//! produces the eight activation strengths.

use crate::membership::{angle_front, angle_left, angle_right, wall_close, wall_danger, wall_safe};
use crate::params::{AngleRule, ParamVector};

/// Sensor readings for one control tick, produced by the host's environment scan.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSnapshot {
    /// Distance to the closest wall (non-negative).
    pub closest: f64,
    /// Direction of the closest wall, degrees anticlockwise from heading, in `[0, 360)`.
    pub closest_angle: i32,
    /// Direction with the most clearance, degrees anticlockwise from heading, in `[0, 360)`.
    pub furthest_angle: i32,
}

impl SensorSnapshot {
    /// Construct a snapshot.
    pub const fn new(closest: f64, closest_angle: i32, furthest_angle: i32) -> Self {
        Self {
            closest,
            closest_angle,
            furthest_angle,
        }
    }
}

/// Fuzzy AND: the minimum of two degrees.
#[inline]
pub fn fuzzy_and(a: f64, b: f64) -> f64 {
    if a < b {
        a
    } else {
        b
    }
}

/// Activation strength of each of the eight rules, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleActivations {
    /// Rule 1: danger AND closest-left.
    pub danger_left: f64,
    /// Rule 2: danger AND closest-right.
    pub danger_right: f64,
    /// Rule 3: close AND closest-left.
    pub close_left: f64,
    /// Rule 4: close AND closest-right.
    pub close_right: f64,
    /// Rule 5: safe.
    pub safe: f64,
    /// Rule 6: furthest-right.
    pub furthest_right: f64,
    /// Rule 7: furthest-left.
    pub furthest_left: f64,
    /// Rule 8: furthest-front.
    pub furthest_front: f64,
}

impl RuleActivations {
    /// Activations in rule order 1..=8.
    pub fn as_array(&self) -> [f64; 8] {
        [
            self.danger_left,
            self.danger_right,
            self.close_left,
            self.close_right,
            self.safe,
            self.furthest_right,
            self.furthest_left,
            self.furthest_front,
        ]
    }
}

/// Fire all eight rules for `sensors` under `params`.
pub fn evaluate_rules(sensors: &SensorSnapshot, params: &ParamVector) -> RuleActivations {
    let danger = wall_danger(sensors.closest, params.wall_danger());
    let close = wall_close(sensors.closest, params.wall_close());

    let closest_left =
        |rule: AngleRule| angle_left(sensors.closest_angle, params.angle_ramp(rule));
    let closest_right =
        |rule: AngleRule| angle_right(sensors.closest_angle, params.angle_ramp(rule));

    RuleActivations {
        danger_left: fuzzy_and(danger, closest_left(AngleRule::DangerLeft)),
        danger_right: fuzzy_and(danger, closest_right(AngleRule::DangerRight)),
        close_left: fuzzy_and(close, closest_left(AngleRule::CloseLeft)),
        close_right: fuzzy_and(close, closest_right(AngleRule::CloseRight)),
        safe: wall_safe(sensors.closest, params.wall_safe()),
        furthest_right: angle_right(
            sensors.furthest_angle,
            params.angle_ramp(AngleRule::FurthestRight),
        ),
        furthest_left: angle_left(
            sensors.furthest_angle,
            params.angle_ramp(AngleRule::FurthestLeft),
        ),
        furthest_front: angle_front(sensors.furthest_angle, params.angle_front()),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
