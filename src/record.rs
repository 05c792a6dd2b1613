//! Best-parameters record — the tuner's published result.
//!
//! The external tuner writes this after every generation; hosts read `xbest`
//! and hand it to the controller. With the `serde` feature it serialises as a
//! flat document:
//!
//! ```json
//! {
//!   "xbest": [-0.006, 1.6, -2.0, -1.0, 0.008, -1.2, -0.009, 3.6, 0.015, -5.0, 5.0, 1.0],
//!   "fbest": 998812.0
//! }
//! ```

use crate::params::ParamVector;

/// Best parameter vector found so far and its fitness (lower is better).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestRecord {
    /// Best parameter vector.
    pub xbest: ParamVector,
    /// Fitness achieved by `xbest`.
    pub fbest: f64,
}

impl BestRecord {
    /// Construct a record.
    pub fn new(xbest: ParamVector, fbest: f64) -> Self {
        Self { xbest, fbest }
    }

    /// Keep whichever of `self` and `other` has the lower fitness.
    pub fn better_of(self, other: BestRecord) -> BestRecord {
        if other.fbest < self.fbest {
            other
        } else {
            self
        }
    }
}
