//! Output aggregation — rule activations to three output-variable strengths.
//!
//! Each output variable sums (not maxes) the rules that vote for it, so a
//! strength can exceed 1 when several rules agree. The defuzzifier handles
//! heights above 1 and tuned parameter vectors rely on this.

use crate::rules::RuleActivations;

/// Summed strength of each steering output variable, each in `[0, ∞)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputStrengths {
    /// Rules 2 + 4 + 7.
    pub turn_left: f64,
    /// Rules 5 + 8.
    pub no_turn: f64,
    /// Rules 1 + 3 + 6.
    pub turn_right: f64,
}

impl OutputStrengths {
    /// Aggregate rule activations into output strengths.
    pub fn from_activations(acts: &RuleActivations) -> Self {
        Self {
            turn_left: acts.danger_right + acts.close_right + acts.furthest_left,
            no_turn: acts.safe + acts.furthest_front,
            turn_right: acts.danger_left + acts.close_left + acts.furthest_right,
        }
    }

    /// `true` when no rule fired at all.
    pub fn is_silent(&self) -> bool {
        self.turn_left == 0.0 && self.no_turn == 0.0 && self.turn_right == 0.0
    }
}
