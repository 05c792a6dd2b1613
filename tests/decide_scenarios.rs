//! End-to-end steering scenarios through the public entry points.
//!
//! Exercises `decide` / `evaluate` / `classify` with the hand-tuned parameter
//! vector, degenerate vectors, and serialised vectors.

use fuzzy_pilot::action::SteeringCommand;
use fuzzy_pilot::controller::{classify, decide, evaluate, Pilot};
use fuzzy_pilot::params::ParamVector;
use fuzzy_pilot::rules::SensorSnapshot;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn tuned() -> ParamVector {
    ParamVector::new([
        -0.006, 1.6, -2.0, -1.0, 0.008, -1.2, -0.009, 3.6, 0.015, -5.0, 5.0, 1.0,
    ])
}

/// A spread of sensor snapshots covering open space, walls on every side and
/// every clearance direction.
fn battery() -> Vec<SensorSnapshot> {
    let mut out = Vec::new();
    for closest in [0.0, 25.0, 50.0, 120.0, 200.0, 275.0, 320.0, 450.0, 600.0] {
        for closest_angle in (0..360).step_by(30) {
            for furthest_angle in (0..360).step_by(45) {
                out.push(SensorSnapshot::new(closest, closest_angle, furthest_angle));
            }
        }
    }
    out
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn test_open_space_goes_straight() {
    let d = evaluate(&SensorSnapshot::new(600.0, 0, 0), &tuned());
    assert!(
        d.strengths.no_turn > d.strengths.turn_left + d.strengths.turn_right,
        "no-turn should dominate: {:?}",
        d.strengths
    );
    assert_eq!(d.strengths.no_turn, 2.0);
    assert!((d.crisp - 1.0).abs() < 1e-9, "crisp {}", d.crisp);
    assert_eq!(d.command, SteeringCommand::NoTurn);
}

#[test]
fn test_wall_danger_on_the_left_turns_right() {
    let crisp = decide(50.0, 90, 0, &tuned());
    assert!((crisp - 1.3).abs() < 1e-9, "crisp {}", crisp);
    assert_eq!(classify(crisp), SteeringCommand::TurnRight);
}

#[test]
fn test_wall_danger_on_the_right_turns_left() {
    let crisp = decide(50.0, 270, 0, &tuned());
    assert!((crisp - 0.7).abs() < 1e-9, "crisp {}", crisp);
    assert_eq!(classify(crisp), SteeringCommand::TurnLeft);
}

#[test]
fn test_shallow_wall_angle_does_not_trigger_danger_rules() {
    // tan(15°) ≈ 0.27 keeps the angle-left ramp (2t − 1) below zero.
    let d = evaluate(&SensorSnapshot::new(50.0, 30, 0), &tuned());
    assert_eq!(d.activations.danger_left, 0.0);
    assert_eq!(d.activations.danger_right, 0.0);
    assert!((d.crisp - 1.0).abs() < 1e-9, "crisp {}", d.crisp);
    assert_eq!(d.command, SteeringCommand::NoTurn);
}

#[test]
fn test_clear_path_pulls_the_heading() {
    let left = evaluate(&SensorSnapshot::new(600.0, 0, 90), &tuned());
    let right = evaluate(&SensorSnapshot::new(600.0, 0, 270), &tuned());
    assert!(left.strengths.turn_left > 0.99);
    assert!(right.strengths.turn_right > 0.99);
    assert!(left.crisp < 1.0 && right.crisp > 1.0);
}

// ── Properties ───────────────────────────────────────────────────────────────

#[test]
fn test_decide_is_idempotent() {
    let params = tuned();
    for s in battery() {
        let a = decide(s.closest, s.closest_angle, s.furthest_angle, &params);
        let b = decide(s.closest, s.closest_angle, s.furthest_angle, &params);
        assert_eq!(a.to_bits(), b.to_bits(), "snapshot {:?}", s);
    }
}

#[test]
fn test_outputs_finite_and_bounded() {
    let params = tuned();
    for s in battery() {
        let d = evaluate(&s, &params);
        assert!(d.crisp.is_finite(), "snapshot {:?} -> {}", s, d.crisp);
        for v in d.activations.as_array() {
            assert!((0.0..=1.0).contains(&v), "snapshot {:?}", s);
        }
        assert!(d.strengths.turn_left >= 0.0);
        assert!(d.strengths.no_turn >= 0.0);
        assert!(d.strengths.turn_right >= 0.0);
    }
}

#[test]
fn test_all_zero_params_fall_back_to_neutral() {
    let zeros = ParamVector::new([0.0; 12]);
    for s in battery() {
        let crisp = decide(s.closest, s.closest_angle, s.furthest_angle, &zeros);
        assert_eq!(crisp, 1.0, "snapshot {:?}", s);
    }
}

#[test]
fn test_flat_saturated_params_stay_finite() {
    // Zero slopes with unit intercepts: every membership is 1, every
    // strength exceeds 1.
    let mut raw = [0.0; 12];
    for slot in [1, 3, 5, 7, 9, 11] {
        raw[slot] = 1.0;
    }
    let flat = ParamVector::new(raw);
    let d = evaluate(&SensorSnapshot::new(100.0, 45, 300), &flat);
    assert_eq!(d.strengths.turn_left, 3.0);
    assert_eq!(d.strengths.no_turn, 2.0);
    assert_eq!(d.strengths.turn_right, 3.0);
    assert!(d.crisp.is_finite());
}

#[test]
fn test_pilot_agrees_with_decide() {
    let pilot = Pilot::new(tuned());
    for s in battery() {
        let crisp = decide(s.closest, s.closest_angle, s.furthest_angle, &tuned());
        assert_eq!(pilot.steer(&s), classify(crisp));
    }
}

// ── Serialisation ────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
mod serialised {
    use super::*;
    use fuzzy_pilot::record::BestRecord;

    #[test]
    fn test_param_vector_is_a_flat_json_array() {
        let json = serde_json::to_string(&tuned()).unwrap();
        assert!(json.starts_with('[') && json.ends_with(']'), "got {}", json);
        let back: ParamVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tuned());
    }

    #[test]
    fn test_round_trip_preserves_decisions() {
        let json = serde_json::to_string(&BestRecord::new(tuned(), 998_000.0)).unwrap();
        let restored: BestRecord = serde_json::from_str(&json).unwrap();
        for s in battery() {
            let before = decide(s.closest, s.closest_angle, s.furthest_angle, &tuned());
            let after = decide(s.closest, s.closest_angle, s.furthest_angle, &restored.xbest);
            assert_eq!(before.to_bits(), after.to_bits(), "snapshot {:?}", s);
        }
    }

    #[test]
    fn test_wrong_length_vector_is_rejected() {
        let short = "[1.0, 2.0, 3.0]";
        assert!(serde_json::from_str::<ParamVector>(short).is_err());
    }
}
