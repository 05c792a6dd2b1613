//! # One tuning episode, end to end
//!
//! A host-side loop the way a game bot would run it, with the physics replaced
//! by a scripted sensor course:
//!
//! 1. every tick the current candidate steers (fuzzy) and decides thrust (crisp),
//! 2. the [`Session`] turns deaths into fitness,
//! 3. a tiny replay "optimizer" hands out the same three candidates each
//!    generation and keeps the best,
//! 4. after every generation the run is checkpointed and the best record
//!    written, both atomically.
//!
//! No learning happens here; plug a real evolution strategy into
//! [`Optimizer`] for that.
//!
//! ## Running this example
//!
//! ```text
//! cargo run --example episode
//! ```

use std::path::PathBuf;

use fuzzy_pilot::action::SteeringCommand;
use fuzzy_pilot::checkpoint::{write_best_record, Checkpoint};
use fuzzy_pilot::controller::{evaluate, Pilot};
use fuzzy_pilot::params::{ParamVector, Slot, DEFAULT_PARAMS};
use fuzzy_pilot::record::BestRecord;
use fuzzy_pilot::rules::SensorSnapshot;
use fuzzy_pilot::session::{Optimizer, Session, SessionConfig, SessionEvent};
use fuzzy_pilot::thrust::{heading_tracking_diff, thrust_reason, ThrustConfig, ThrustSensors};
use serde::{Deserialize, Serialize};

// ── Course ───────────────────────────────────────────────────────────────────

/// One scripted tick: what the scan sees plus the feeler distances.
struct Frame {
    scan: SensorSnapshot,
    heading: i32,
    tracking: i32,
    speed: f64,
}

const fn frame(closest: f64, closest_angle: i32, furthest_angle: i32, speed: f64) -> Frame {
    Frame {
        scan: SensorSnapshot::new(closest, closest_angle, furthest_angle),
        heading: 90,
        tracking: 90,
        speed,
    }
}

const COURSE: [Frame; 6] = [
    frame(600.0, 0, 0, 3.0),
    frame(320.0, 60, 0, 6.0),
    frame(50.0, 90, 0, 8.0),
    frame(600.0, 0, 90, 8.0),
    frame(45.0, 270, 0, 4.0),
    frame(200.0, 300, 45, 9.0),
];

const MAX_LIFE: usize = 30;

fn thrust_sensors(f: &Frame) -> ThrustSensors {
    ThrustSensors {
        shot_alert: -1.0,
        front_wall: f.scan.closest.max(260.0),
        track_wall: f.scan.closest,
        back_wall: 400.0,
        aft_150_wall: 400.0,
        aft_210_wall: 400.0,
        speed: f.speed,
        heading_tracking_diff: heading_tracking_diff(f.heading, f.tracking),
        furthest_angle: f.scan.furthest_angle,
    }
}

fn survives(f: &Frame, command: SteeringCommand) -> bool {
    if f.scan.closest >= 60.0 {
        return true;
    }
    match f.scan.closest_angle {
        1..=179 => command == SteeringCommand::TurnRight,
        181..=359 => command == SteeringCommand::TurnLeft,
        _ => true,
    }
}

// ── Replay optimizer ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Replay {
    population: Vec<ParamVector>,
    best: Option<BestRecord>,
}

impl Optimizer for Replay {
    fn ask(&mut self) -> Vec<ParamVector> {
        self.population.clone()
    }

    fn tell(&mut self, candidates: &[ParamVector], fitness: &[f64]) {
        for (x, f) in candidates.iter().zip(fitness) {
            let record = BestRecord::new(*x, *f);
            self.best = Some(self.best.map_or(record, |b| b.better_of(record)));
        }
    }

    fn best(&self) -> Option<BestRecord> {
        self.best
    }
}

fn variant(slot: Slot, value: f64) -> ParamVector {
    let mut raw = DEFAULT_PARAMS.0;
    raw[slot.index()] = value;
    ParamVector::new(raw)
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("── Decisions of the tuned controller ──\n");
    for f in &COURSE {
        let d = evaluate(&f.scan, &DEFAULT_PARAMS);
        let reason = thrust_reason(&thrust_sensors(f), &ThrustConfig::default());
        println!(
            "  closest {:>5.0} @ {:>3}°  clear @ {:>3}°  →  L {:.2} N {:.2} R {:.2}  crisp {:.3}  {:<10} thrust {:?}",
            f.scan.closest,
            f.scan.closest_angle,
            f.scan.furthest_angle,
            d.strengths.turn_left,
            d.strengths.no_turn,
            d.strengths.turn_right,
            d.crisp,
            format!("{:?}", d.command),
            reason,
        );
    }

    let out_dir: PathBuf = std::env::temp_dir().join("fuzzy-pilot-episode");
    let ckpt_path = out_dir.join("es.ckpt");
    let best_path = out_dir.join("cma_best.json");

    let optimizer = Replay {
        population: vec![
            DEFAULT_PARAMS,
            ParamVector::new([0.0; 12]),
            variant(Slot::AngleIntercept, 1.0),
        ],
        best: None,
    };
    let mut session = Session::new(optimizer, SessionConfig { evals_per_candidate: 2, ..Default::default() })?;

    println!("\n── Scoring three candidates over two generations ──\n");
    let mut step = 0usize;
    let mut respawning = false;
    let mut thrust_ticks = 0u64;
    let mut generations = 0;
    while generations < 2 {
        let alive = if respawning {
            respawning = false;
            step = 0;
            true
        } else {
            let f = &COURSE[step % COURSE.len()];
            let command = Pilot::new(*session.params()).steer(&f.scan);
            if thrust_reason(&thrust_sensors(f), &ThrustConfig::default()).is_some() {
                thrust_ticks += 1;
            }
            step += 1;
            step <= MAX_LIFE && survives(f, command)
        };
        respawning = !alive;

        match session.tick(alive)? {
            Some(SessionEvent::CandidateScored { candidate, mean_fitness }) => {
                println!("  candidate {} scored {:.1}", candidate, mean_fitness);
            }
            Some(SessionEvent::GenerationComplete { generation, best }) => {
                println!("  generation {} complete", generation);
                let reference = best.map_or(DEFAULT_PARAMS, |b| b.xbest);
                Checkpoint::new(session.generation(), reference, session.optimizer().clone())
                    .save(&ckpt_path)?;
                if let Some(best) = best {
                    println!("    best fitness {:.1}", best.fbest);
                    write_best_record(&best_path, &best)?;
                }
                generations += 1;
            }
            _ => {}
        }
    }

    println!("\n  thrust fired on {} ticks", thrust_ticks);
    println!("  checkpoint: {}", ckpt_path.display());
    println!("  best record: {}", best_path.display());

    let resumed: Option<Checkpoint<Replay>> = Checkpoint::load(&ckpt_path)?;
    if let Some(ckpt) = resumed {
        let session = Session::resume(ckpt.optimizer, SessionConfig::default(), ckpt.generation)?;
        println!("  resumed at generation {}", session.generation());
    }
    Ok(())
}
