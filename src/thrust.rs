//! Thrust policy — ordered crisp rules deciding whether to fire the thruster.
//!
//! Steering is fuzzy; thrust is not. The policy walks a fixed list of
//! situations and fires on the first match, reporting which one so hosts can
//! log or count them.
//!
//! | Order | Reason | Fires when |
//! |-------|--------|-----------|
//! | 1 | [`ThrustReason::AvoidShot`] | a shot is inbound and the nose and track are clear |
//! | 2 | [`ThrustReason::Propulsion`] | the clearest path is dead ahead and the agent is slow |
//! | 3 | [`ThrustReason::TrackingCorrection`] | drifting backwards towards a near wall |
//! | 4 | [`ThrustReason::RearClearance`] | a wall is right behind |
//! | 5 | [`ThrustReason::WideTrackingCorrection`] | drifting sideways into a very near wall |
//! | 6 | [`ThrustReason::AftQuarter150`] | a wall is near at heading + 150° |
//! | 7 | [`ThrustReason::AftQuarter210`] | a wall is near at heading + 210° |
//! | 8 | [`ThrustReason::LowSpeed`] | the agent has nearly stopped |

/// Crisp inputs for the thrust decision.
///
/// Distances come from wall feelers; angles are whole degrees.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrustSensors {
    /// Distance to the nearest threatening shot, non-positive when none.
    pub shot_alert: f64,
    /// Wall distance straight ahead.
    pub front_wall: f64,
    /// Wall distance along the direction of travel.
    pub track_wall: f64,
    /// Wall distance straight behind.
    pub back_wall: f64,
    /// Wall distance at heading + 150°.
    pub aft_150_wall: f64,
    /// Wall distance at heading + 210°.
    pub aft_210_wall: f64,
    /// Current speed.
    pub speed: f64,
    /// Heading minus tracking, in `[0, 360)`; see [`heading_tracking_diff`].
    pub heading_tracking_diff: i32,
    /// Scan direction with the most clearance, degrees from heading.
    pub furthest_angle: i32,
}

/// Why the thruster fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThrustReason {
    /// Dodge an incoming shot.
    AvoidShot,
    /// Accelerate along a clear path.
    Propulsion,
    /// Counter backwards drift towards a wall.
    TrackingCorrection,
    /// Move away from a wall behind.
    RearClearance,
    /// Counter sideways drift towards a very near wall.
    WideTrackingCorrection,
    /// Move away from a wall at heading + 150°.
    AftQuarter150,
    /// Move away from a wall at heading + 210°.
    AftQuarter210,
    /// Keep moving.
    LowSpeed,
}

/// Open interval of heading/tracking divergence, exclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffWindow {
    /// Lower bound (exclusive).
    pub above: i32,
    /// Upper bound (exclusive).
    pub below: i32,
}

impl DiffWindow {
    fn contains(&self, diff: i32) -> bool {
        self.above < diff && diff < self.below
    }
}

/// Every threshold the thrust policy compares against.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrustConfig {
    /// Shots closer than this (and above zero) trigger avoidance.
    pub shot_alert_within: f64,
    /// Nose clearance required to dodge a shot.
    pub shot_front_clear: f64,
    /// Track clearance required to dodge a shot.
    pub shot_track_clear: f64,
    /// Speed below which propulsion along a clear heading fires.
    pub propulsion_speed_below: f64,
    /// Nose clearance required for propulsion.
    pub propulsion_front_clear: f64,
    /// Divergence window for the tracking correction.
    pub tracking_window: DiffWindow,
    /// Track distance under which the tracking correction fires.
    pub tracking_wall_within: f64,
    /// Nose clearance required for the tracking correction.
    pub tracking_front_clear: f64,
    /// Rear distance under which rear clearance fires.
    pub rear_wall_within: f64,
    /// Nose clearance required for rear clearance.
    pub rear_front_clear: f64,
    /// Divergence window for the wide tracking correction.
    pub wide_window: DiffWindow,
    /// Track distance under which the wide correction fires.
    pub wide_wall_within: f64,
    /// Nose clearance required for the wide correction.
    pub wide_front_clear: f64,
    /// Aft-quarter distance under which the quarter rules fire.
    pub aft_wall_within: f64,
    /// Nose clearance required for the quarter rules.
    pub aft_front_clear: f64,
    /// Speed below which the agent always thrusts.
    pub min_speed: f64,
}

impl Default for ThrustConfig {
    fn default() -> Self {
        Self {
            shot_alert_within: 200.0,
            shot_front_clear: 200.0,
            shot_track_clear: 80.0,
            propulsion_speed_below: 7.0,
            propulsion_front_clear: 200.0,
            tracking_window: DiffWindow { above: 110, below: 250 },
            tracking_wall_within: 300.0,
            tracking_front_clear: 250.0,
            rear_wall_within: 70.0,
            rear_front_clear: 250.0,
            wide_window: DiffWindow { above: 85, below: 275 },
            wide_wall_within: 100.0,
            wide_front_clear: 200.0,
            aft_wall_within: 70.0,
            aft_front_clear: 250.0,
            min_speed: 5.0,
        }
    }
}

/// `(heading + 360 − tracking) mod 360`, always in `[0, 360)`.
pub fn heading_tracking_diff(heading: i32, tracking: i32) -> i32 {
    (heading + 360 - tracking).rem_euclid(360)
}

/// First matching thrust rule, or `None` to coast.
pub fn thrust_reason(s: &ThrustSensors, cfg: &ThrustConfig) -> Option<ThrustReason> {
    let front = s.front_wall;
    if s.shot_alert > 0.0
        && s.shot_alert < cfg.shot_alert_within
        && front > cfg.shot_front_clear
        && s.track_wall > cfg.shot_track_clear
    {
        Some(ThrustReason::AvoidShot)
    } else if s.furthest_angle == 0
        && s.speed < cfg.propulsion_speed_below
        && front > cfg.propulsion_front_clear
    {
        Some(ThrustReason::Propulsion)
    } else if cfg.tracking_window.contains(s.heading_tracking_diff)
        && s.track_wall < cfg.tracking_wall_within
        && front > cfg.tracking_front_clear
    {
        Some(ThrustReason::TrackingCorrection)
    } else if s.back_wall < cfg.rear_wall_within && front > cfg.rear_front_clear {
        Some(ThrustReason::RearClearance)
    } else if cfg.wide_window.contains(s.heading_tracking_diff)
        && s.track_wall < cfg.wide_wall_within
        && front > cfg.wide_front_clear
    {
        Some(ThrustReason::WideTrackingCorrection)
    } else if s.aft_150_wall < cfg.aft_wall_within && front > cfg.aft_front_clear {
        Some(ThrustReason::AftQuarter150)
    } else if s.aft_210_wall < cfg.aft_wall_within && front > cfg.aft_front_clear {
        Some(ThrustReason::AftQuarter210)
    } else if s.speed < cfg.min_speed {
        Some(ThrustReason::LowSpeed)
    } else {
        None
    }
}

/// `true` if any thrust rule fires.
pub fn should_thrust(s: &ThrustSensors, cfg: &ThrustConfig) -> bool {
    thrust_reason(s, cfg).is_some()
}
