//! Training session — the explicit context a host threads through its tick loop.
//!
//! The controller is stateless; scoring candidates is not. A [`Session`] owns
//! the bookkeeping that turns agent deaths into fitness values for the
//! external optimizer:
//!
//! ```text
//! tick(alive) ──► alive→dead? ──► accumulate fitness ──► N deaths? ──► next candidate
//!                                                                          │
//!                                              last candidate? ◄──────────┘
//!                                                    │
//!                                   tell(optimizer) + ask() ──► next generation
//! ```
//!
//! Fitness is a countdown from [`SessionConfig::initial_fitness`], decremented
//! once per tick while the candidate flies, so longer survival scores lower
//! (better) for a minimising optimizer.
//!
//! The optimizer itself lives behind the [`Optimizer`] trait; any evolution
//! strategy, random search or replay fixture can drive a session.

extern crate alloc;

use alloc::vec::Vec;

use crate::params::ParamVector;
use crate::record::BestRecord;

/// Errors raised while driving a [`Session`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// The optimizer proposed no candidates.
    #[error("optimizer proposed an empty population for generation {generation}")]
    EmptyPopulation {
        /// Generation that came back empty.
        generation: u64,
    },
}

/// The ask/tell seam to an external parameter search.
///
/// Fitness values are minimised.
pub trait Optimizer {
    /// Propose the next population of candidates.
    fn ask(&mut self) -> Vec<ParamVector>;

    /// Report the mean fitness of each candidate from the last [`ask`](Optimizer::ask).
    fn tell(&mut self, candidates: &[ParamVector], fitness: &[f64]);

    /// Best candidate seen so far, if any generation has completed.
    fn best(&self) -> Option<BestRecord>;
}

/// Scoring knobs for a session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Deaths averaged into one candidate's fitness. Exactly this many lives
    /// are scored and averaged; no extra death is recorded and discarded.
    pub evals_per_candidate: u32,
    /// Fitness value at spawn, decremented once per tick.
    pub initial_fitness: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            evals_per_candidate: 5,
            initial_fitness: 1_000_000.0,
        }
    }
}

/// Notable transitions reported by [`Session::tick`].
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// The agent died and its fitness was recorded against the current candidate.
    FitnessRecorded {
        /// Candidate index within the generation.
        candidate: usize,
        /// Evaluations recorded so far for this candidate.
        evals: u32,
        /// Fitness of the life that just ended.
        fitness: f64,
    },
    /// A candidate finished all its evaluations.
    CandidateScored {
        /// Candidate index within the generation.
        candidate: usize,
        /// Mean fitness over its evaluations.
        mean_fitness: f64,
    },
    /// Every candidate was scored and the optimizer was told.
    GenerationComplete {
        /// Index of the generation that just completed.
        generation: u64,
        /// The optimizer's best after the update.
        best: Option<BestRecord>,
    },
}

/// Loop-owned bookkeeping for scoring candidates across agent lives.
///
/// `candidates` is never empty and `current` always indexes into it, also
/// while the session waits for a population after an empty `ask`.
pub struct Session<O: Optimizer> {
    optimizer: O,
    config: SessionConfig,
    candidates: Vec<ParamVector>,
    candidate_fitness: Vec<f64>,
    generation: u64,
    current: usize,
    evals: u32,
    fitness_sum: f64,
    fitness: f64,
    agent_alive: bool,
    awaiting_population: bool,
}

impl<O: Optimizer> Session<O> {
    /// Start a session, asking `optimizer` for the first population.
    pub fn new(mut optimizer: O, config: SessionConfig) -> Result<Self, SessionError> {
        let candidates = optimizer.ask();
        if candidates.is_empty() {
            tracing::warn!(generation = 0, "optimizer proposed an empty population");
            return Err(SessionError::EmptyPopulation { generation: 0 });
        }
        let fitness = config.initial_fitness;
        Ok(Self {
            optimizer,
            config,
            candidate_fitness: Vec::with_capacity(candidates.len()),
            candidates,
            generation: 0,
            current: 0,
            evals: 0,
            fitness_sum: 0.0,
            fitness,
            agent_alive: true,
            awaiting_population: false,
        })
    }

    /// Start at a given generation index, e.g. after restoring a checkpoint.
    pub fn resume(optimizer: O, config: SessionConfig, generation: u64) -> Result<Self, SessionError> {
        let mut session = Self::new(optimizer, config).map_err(|_| SessionError::EmptyPopulation {
            generation,
        })?;
        session.generation = generation;
        Ok(session)
    }

    /// Advance one tick. `alive` is the host's view of the agent this tick.
    ///
    /// Returns the most significant transition, if any.
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyPopulation`] when the optimizer has no candidates
    /// for the next generation. The finished generation has already been
    /// told; the session keeps flying the previous population unscored and
    /// asks again on every following tick until a population arrives.
    pub fn tick(&mut self, alive: bool) -> Result<Option<SessionEvent>, SessionError> {
        let died = self.agent_alive && !alive;
        self.agent_alive = alive;
        let life_fitness = self.fitness;
        if died {
            self.fitness = self.config.initial_fitness;
        }
        self.fitness -= 1.0;

        if self.awaiting_population {
            // Lives flown while stalled belong to no candidate.
            self.install_next_population()?;
            return Ok(None);
        }
        if died {
            return self.record_death(life_fitness).map(Some);
        }
        Ok(None)
    }

    fn record_death(&mut self, fitness: f64) -> Result<SessionEvent, SessionError> {
        let candidate = self.current;
        self.evals += 1;
        self.fitness_sum += fitness;
        tracing::debug!(candidate, evals = self.evals, fitness, "agent died");

        if self.evals < self.config.evals_per_candidate.max(1) {
            return Ok(SessionEvent::FitnessRecorded {
                candidate,
                evals: self.evals,
                fitness,
            });
        }

        let mean_fitness = self.fitness_sum / f64::from(self.evals);
        tracing::info!(candidate, mean_fitness, "candidate scored");
        self.candidate_fitness.push(mean_fitness);
        self.fitness_sum = 0.0;
        self.evals = 0;

        if candidate + 1 < self.candidates.len() {
            self.current = candidate + 1;
            return Ok(SessionEvent::CandidateScored {
                candidate,
                mean_fitness,
            });
        }

        self.optimizer.tell(&self.candidates, &self.candidate_fitness);
        let finished = self.generation;
        let best = self.optimizer.best();
        if let Some(b) = &best {
            tracing::info!(generation = finished, fbest = b.fbest, "generation done");
        } else {
            tracing::info!(generation = finished, "generation done");
        }

        self.generation += 1;
        self.candidate_fitness.clear();
        self.current = 0;
        self.install_next_population()?;

        Ok(SessionEvent::GenerationComplete {
            generation: finished,
            best,
        })
    }

    /// Ask for the next population. An empty answer keeps the old candidates
    /// in place so `current` stays a valid index.
    fn install_next_population(&mut self) -> Result<(), SessionError> {
        let next = self.optimizer.ask();
        if next.is_empty() {
            tracing::warn!(generation = self.generation, "optimizer proposed an empty population");
            self.awaiting_population = true;
            return Err(SessionError::EmptyPopulation {
                generation: self.generation,
            });
        }
        self.candidates = next;
        self.awaiting_population = false;
        Ok(())
    }

    /// Parameter vector of the candidate currently under evaluation.
    pub fn params(&self) -> &ParamVector {
        &self.candidates[self.current]
    }

    /// Current generation index (0-based).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the candidate under evaluation within the generation.
    pub fn candidate_index(&self) -> usize {
        self.current
    }

    /// Number of candidates in the current generation.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Deaths recorded so far for the current candidate.
    pub fn evals(&self) -> u32 {
        self.evals
    }

    /// Fitness of the life in progress.
    pub fn live_fitness(&self) -> f64 {
        self.fitness
    }

    /// Mean fitness of candidates already scored this generation.
    pub fn scored(&self) -> &[f64] {
        &self.candidate_fitness
    }

    /// `true` while the optimizer owes the session a non-empty population.
    ///
    /// Deaths are not scored in this state.
    pub fn awaiting_population(&self) -> bool {
        self.awaiting_population
    }

    /// Whether the agent was alive on the last tick.
    pub fn agent_alive(&self) -> bool {
        self.agent_alive
    }

    /// Scoring configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Borrow the optimizer (e.g. to checkpoint its state).
    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Give back the optimizer, ending the session.
    pub fn into_optimizer(self) -> O {
        self.optimizer
    }
}
