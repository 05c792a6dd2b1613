//! Action mapping — crisp steering value to a discrete command.
//!
//! ```text
//!   crisp:  ──── 0.75 ──────── 1.25 ────
//!            TurnLeft │ NoTurn  │ TurnRight
//! ```
//!
//! Pure thresholding with no hysteresis. Consecutive ticks are the host's
//! problem.

/// Discrete steering command for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SteeringCommand {
    /// Press the left-turn actuator.
    TurnLeft,
    /// Release both turn actuators.
    NoTurn,
    /// Press the right-turn actuator.
    TurnRight,
}

impl SteeringCommand {
    /// Signed direction: −1 left, 0 none, +1 right.
    pub fn direction(&self) -> i8 {
        match self {
            SteeringCommand::TurnLeft => -1,
            SteeringCommand::NoTurn => 0,
            SteeringCommand::TurnRight => 1,
        }
    }

    /// Actuator key state as `(left_pressed, right_pressed)`.
    ///
    /// At most one key is ever pressed.
    pub fn keys(&self) -> (bool, bool) {
        match self {
            SteeringCommand::TurnLeft => (true, false),
            SteeringCommand::NoTurn => (false, false),
            SteeringCommand::TurnRight => (false, true),
        }
    }
}

/// Band edges separating the three commands on the crisp axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteeringBands {
    /// Crisp values strictly below this turn left.
    pub left_below: f64,
    /// Crisp values at or above this turn right.
    pub right_from: f64,
}

impl Default for SteeringBands {
    fn default() -> Self {
        Self {
            left_below: 0.75,
            right_from: 1.25,
        }
    }
}

impl SteeringBands {
    /// Map `crisp` to a command using these band edges.
    pub fn classify(&self, crisp: f64) -> SteeringCommand {
        if crisp < self.left_below {
            SteeringCommand::TurnLeft
        } else if crisp < self.right_from {
            SteeringCommand::NoTurn
        } else {
            SteeringCommand::TurnRight
        }
    }
}

/// Map `crisp` to a command with the default bands `[0.75, 1.25)`.
pub fn classify(crisp: f64) -> SteeringCommand {
    SteeringBands::default().classify(crisp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(classify(0.0), SteeringCommand::TurnLeft);
        assert_eq!(classify(0.7499), SteeringCommand::TurnLeft);
        assert_eq!(classify(0.75), SteeringCommand::NoTurn);
        assert_eq!(classify(1.0), SteeringCommand::NoTurn);
        assert_eq!(classify(1.2499), SteeringCommand::NoTurn);
        assert_eq!(classify(1.25), SteeringCommand::TurnRight);
        assert_eq!(classify(2.0), SteeringCommand::TurnRight);
    }

    #[test]
    fn test_custom_bands() {
        let bands = SteeringBands { left_below: 0.9, right_from: 1.1 };
        assert_eq!(bands.classify(0.8), SteeringCommand::TurnLeft);
        assert_eq!(bands.classify(1.15), SteeringCommand::TurnRight);
        assert_eq!(classify(0.8), SteeringCommand::NoTurn);
    }

    #[test]
    fn test_keys_and_direction() {
        assert_eq!(SteeringCommand::TurnLeft.keys(), (true, false));
        assert_eq!(SteeringCommand::NoTurn.keys(), (false, false));
        assert_eq!(SteeringCommand::TurnRight.keys(), (false, true));
        assert_eq!(SteeringCommand::TurnLeft.direction(), -1);
        assert_eq!(SteeringCommand::TurnRight.direction(), 1);
    }
}
