//! # fuzzy-pilot
//!
//! A tunable fuzzy-logic steering core for wall-avoiding autonomous agents.
//!
//! ---
//!
//! ## One pure function per tick
//!
//! Every control tick the host scans its surroundings and reduces the scan to
//! three numbers: how far the closest wall is, which direction it lies in, and
//! which direction has the most clearance. The controller turns those three
//! numbers into a single steering command. It keeps no state between ticks
//! and allocates nothing.
//!
//! The controller's shape is not hard-coded. Twelve coefficients, the
//! [`ParamVector`], set the slope and offset of every membership ramp, so an
//! external optimizer can tune the whole controller as one chromosome.
//!
//! ## The pipeline
//!
//! ```text
//! SensorSnapshot ─► membership ─► rules ─► aggregate ─► defuzz ─► action
//!   (closest,        6 ramps       8 ANDs    3 sums      centroid   Left /
//!    angles)            ▲                                          NoTurn /
//!                       │                                          Right
//!                  ParamVector
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`angle`] | [`normalize_angle`](angle::normalize_angle) | Periodic degrees → bounded half-angle tangent |
//! | [`membership`] | [`Ramp`](membership::Ramp), [`SplitRamp`](membership::SplitRamp) | Six clamped-ramp membership functions |
//! | [`params`] | [`ParamVector`], [`AngleRule`](params::AngleRule) | Slot map, per-rule sign flips, search bounds |
//! | [`rules`] | [`SensorSnapshot`], [`RuleActivations`](rules::RuleActivations) | Eight fuzzy-AND rule antecedents |
//! | [`aggregate`] | [`OutputStrengths`](aggregate::OutputStrengths) | Sum activations per output variable |
//! | [`defuzz`] | [`OutputShape`](defuzz::OutputShape) | Closed-form area/moment centroid |
//! | [`action`] | [`SteeringCommand`] | Threshold the crisp value into a command |
//! | [`controller`] | [`decide`], [`Pilot`](controller::Pilot) | The per-tick entry points |
//! | [`thrust`] | [`ThrustReason`](thrust::ThrustReason) | Ordered crisp thrust rules |
//! | [`record`] | [`BestRecord`](record::BestRecord) | Tuner result `{ xbest, fbest }` |
//! | [`session`] | [`Session`](session::Session), [`Optimizer`](session::Optimizer) | Candidate scoring across agent lives |
//! | `checkpoint` | `Checkpoint` | Versioned, atomically written run snapshots (requires `std`) |
//!
//! ## `no_std`
//!
//! Without the `std` feature the crate is `#![no_std]`; everything except
//! [`session`] is heap-free, and [`session`] needs only `alloc`. The default
//! `std` feature adds serde derives (`serde` feature) and the JSON checkpoint
//! module.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod angle;
pub mod membership;
pub mod params;
pub mod rules;
pub mod aggregate;
pub mod defuzz;
pub mod action;
pub mod controller;
pub mod thrust;
pub mod record;
pub mod session;
#[cfg(feature = "std")]
pub mod checkpoint;

pub use action::{classify, SteeringCommand};
pub use controller::{decide, evaluate, Decision};
pub use params::ParamVector;
pub use rules::SensorSnapshot;
