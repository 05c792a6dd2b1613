/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Per-tick decision entry points.
//!
//! [`decide`] is the whole pipeline as one pure function. [`evaluate`] runs the
//! same pipeline but keeps every intermediate for diagnostics. [`Pilot`] binds a
//! parameter vector and band edges for hosts that steer many ticks with the
//! same candidate.
//!
//! # Invariants
//!
//! - **CTL-001**: no state survives between calls; identical arguments give
//!   bit-identical results.
//! - **CTL-002**: fixed operation count, no allocation, no I/O.

use crate::action::{SteeringBands, SteeringCommand};
use crate::aggregate::OutputStrengths;
use crate::defuzz::defuzzify;
use crate::params::ParamVector;
use crate::rules::{evaluate_rules, RuleActivations, SensorSnapshot};

pub use crate::action::classify;

/// Everything the pipeline computed for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    /// Per-rule activation strengths.
    pub activations: RuleActivations,
    /// Summed output-variable strengths.
    pub strengths: OutputStrengths,
    /// Defuzzified steering value.
    pub crisp: f64,
    /// Thresholded command (default bands).
    pub command: SteeringCommand,
}

/// Crisp steering value for one tick.
///
/// ```rust
/// use fuzzy_pilot::controller::{classify, decide};
/// use fuzzy_pilot::action::SteeringCommand;
/// use fuzzy_pilot::params::ParamVector;
///
/// let params = ParamVector::default();
/// let crisp = decide(600.0, 0, 0, &params);
/// assert_eq!(classify(crisp), SteeringCommand::NoTurn);
/// ```
pub fn decide(closest: f64, closest_angle: i32, furthest_angle: i32, params: &ParamVector) -> f64 {
    let sensors = SensorSnapshot::new(closest, closest_angle, furthest_angle);
    let activations = evaluate_rules(&sensors, params);
    defuzzify(&OutputStrengths::from_activations(&activations))
}

/// Run the full pipeline and keep the intermediates.
pub fn evaluate(sensors: &SensorSnapshot, params: &ParamVector) -> Decision {
    evaluate_with(sensors, params, &SteeringBands::default())
}

/// [`evaluate`] with custom band edges.
pub fn evaluate_with(
    sensors: &SensorSnapshot,
    params: &ParamVector,
    bands: &SteeringBands,
) -> Decision {
    let activations = evaluate_rules(sensors, params);
    let strengths = OutputStrengths::from_activations(&activations);
    let crisp = defuzzify(&strengths);
    Decision {
        activations,
        strengths,
        crisp,
        command: bands.classify(crisp),
    }
}

/// A parameter vector bound to band edges, steering one snapshot at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct Pilot {
    params: ParamVector,
    bands: SteeringBands,
}

impl Pilot {
    /// Pilot with the default band edges.
    pub fn new(params: ParamVector) -> Self {
        Self {
            params,
            bands: SteeringBands::default(),
        }
    }

    /// Replace the band edges.
    pub fn with_bands(mut self, bands: SteeringBands) -> Self {
        self.bands = bands;
        self
    }

    /// The bound parameter vector.
    pub fn params(&self) -> &ParamVector {
        &self.params
    }

    /// Swap in a new parameter vector (e.g. the next candidate).
    pub fn set_params(&mut self, params: ParamVector) {
        self.params = params;
    }

    /// Steering command for `sensors`.
    pub fn steer(&self, sensors: &SensorSnapshot) -> SteeringCommand {
        self.evaluate(sensors).command
    }

    /// Full decision trace for `sensors`.
    pub fn evaluate(&self, sensors: &SensorSnapshot) -> Decision {
        evaluate_with(sensors, &self.params, &self.bands)
    }
}
