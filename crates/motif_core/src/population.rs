//! The population-engine contract.
//!
//! The motif loop treats the dynamical engine as an opaque collaborator: it
//! seeds objects, nudges the tunable parameters between steps, advances time,
//! and reads back the state surface defined here. Nothing in the loop depends
//! on how an engine moves energy around.

use crate::error::{MotifError, Result};
use serde::{Deserialize, Serialize};

/// Trait for population engines driven by the motif loop
pub trait PopulationEngine {
    fn params(&self) -> &EngineParams;

    /// Tunable configuration, freely mutated between steps.
    fn params_mut(&mut self) -> &mut EngineParams;

    /// Create a new group holding one tracked object per seed.
    fn add_group(&mut self, group_id: &str, seeds: Vec<ObjectSeed>);

    /// Advance simulated time by `dt`.
    fn step(&mut self, dt: f32);

    fn global_state(&self) -> GlobalState;

    /// Every group with full per-object snapshots, oldest group first.
    fn groups(&self) -> &[Group];
}

/// Discrete motion state of a tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectState {
    Ascending,
    Descending,
    Oscillating,
}

impl ObjectState {
    /// Size of the state space.
    pub const COUNT: usize = 3;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Simple,
    Complex,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Simple => write!(f, "simple"),
            ObjectKind::Complex => write!(f, "complex"),
        }
    }
}

/// One recorded encounter between two objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub partner: u64,
    /// Energy of the recording object at the time of the interaction
    pub energy: f32,
    /// Unix millis
    pub timestamp: i64,
}

/// What the loop records about the input that spawned an object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub input_complexity: f32,
    pub framework_coherence: f32,
    /// Mean of input complexity and framework coherence
    pub discernment_strength: f32,
}

/// Initial attributes for a new tracked object. The engine assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSeed {
    pub speed: f32,
    pub kind: ObjectKind,
    pub oscillation_phase: f32,
    pub last_energy_change: f32,
    pub state: ObjectState,
    pub interaction_history: Vec<Interaction>,
    pub energy: f32,
    pub metadata: ObjectMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub id: u64,
    pub speed: f32,
    pub kind: ObjectKind,
    pub oscillation_phase: f32,
    pub last_energy_change: f32,
    pub state: ObjectState,
    pub interaction_history: Vec<Interaction>,
    pub energy: f32,
    pub metadata: ObjectMetadata,
}

impl TrackedObject {
    pub fn from_seed(id: u64, seed: ObjectSeed) -> Self {
        Self {
            id,
            speed: seed.speed,
            kind: seed.kind,
            oscillation_phase: seed.oscillation_phase,
            last_energy_change: seed.last_energy_change,
            state: seed.state,
            interaction_history: seed.interaction_history,
            energy: seed.energy,
            metadata: seed.metadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub objects: Vec<TrackedObject>,
}

impl Group {
    pub fn avg_energy(&self) -> f32 {
        let energies: Vec<f32> = self.objects.iter().map(|o| o.energy).collect();
        crate::numeric::mean(&energies)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateDistribution {
    pub ascending: usize,
    pub descending: usize,
    pub oscillating: usize,
}

impl StateDistribution {
    pub fn record(&mut self, state: ObjectState) {
        match state {
            ObjectState::Ascending => self.ascending += 1,
            ObjectState::Descending => self.descending += 1,
            ObjectState::Oscillating => self.oscillating += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ascending + self.descending + self.oscillating
    }
}

/// Population-wide summary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalState {
    pub energy_mean: f32,
    pub energy_variance: f32,
    pub state_distribution: StateDistribution,
    pub total_objects: usize,
    pub total_groups: usize,
}

impl GlobalState {
    /// Summarize a set of groups. All zero for an empty population.
    pub fn from_groups(groups: &[Group]) -> Self {
        let mut state_distribution = StateDistribution::default();
        let mut energies = Vec::new();
        for obj in groups.iter().flat_map(|g| g.objects.iter()) {
            state_distribution.record(obj.state);
            energies.push(obj.energy);
        }
        Self {
            energy_mean: crate::numeric::mean(&energies),
            energy_variance: crate::numeric::variance(&energies),
            state_distribution,
            total_objects: energies.len(),
            total_groups: groups.len(),
        }
    }
}

/// Engine configuration. The first block is fixed at construction; the
/// second block is retuned by the refinement stage every cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    pub energy_regeneration: f32,
    pub oscillation_strength: f32,
    pub bayesian_influence: f32,
    pub floor_threshold: f32,
    pub gravity: f32,
    pub min_group_count: usize,
    pub max_group_count: usize,

    pub friction: f32,
    pub turbulence: f32,
    pub spiral_tightness: f32,
    pub interaction_radius: f32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            energy_regeneration: 0.02,
            oscillation_strength: 0.1,
            bayesian_influence: 0.5,
            floor_threshold: 0.05,
            gravity: 0.008,
            min_group_count: 3,
            max_group_count: 20,

            friction: 0.02,
            turbulence: 0.05,
            spiral_tightness: 1.0,
            interaction_radius: 0.3,
        }
    }
}

/// Sanitize `v` (non-finite resets to `fallback`) and clamp into [lo, hi].
fn clamp_field(v: &mut f32, fallback: f32, lo: f32, hi: f32) {
    *v = crate::numeric::sanitize(*v, fallback).clamp(lo, hi);
}

impl EngineParams {
    /// Pull every tunable back into its valid range. Non-finite values
    /// reset to the default.
    pub fn clamp_tunables(&mut self) {
        let d = Self::default();
        clamp_field(&mut self.energy_regeneration, d.energy_regeneration, 0.0, 1.0);
        clamp_field(&mut self.oscillation_strength, d.oscillation_strength, 0.0, 1.0);
        clamp_field(&mut self.bayesian_influence, d.bayesian_influence, 0.0, 2.5);
        clamp_field(&mut self.gravity, d.gravity, 0.0, 1.0);
        clamp_field(&mut self.friction, d.friction, 0.0, 1.0);
        clamp_field(&mut self.turbulence, d.turbulence, 0.0, 1.0);
        clamp_field(&mut self.spiral_tightness, d.spiral_tightness, 0.01, 10.0);
        clamp_field(&mut self.interaction_radius, d.interaction_radius, 0.0, 1.0);
    }

    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("energy_regeneration", self.energy_regeneration),
            ("oscillation_strength", self.oscillation_strength),
            ("bayesian_influence", self.bayesian_influence),
            ("floor_threshold", self.floor_threshold),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("turbulence", self.turbulence),
            ("spiral_tightness", self.spiral_tightness),
            ("interaction_radius", self.interaction_radius),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(MotifError::InvalidParameter { name, value });
            }
        }
        if self.max_group_count == 0 {
            return Err(MotifError::NonPositive {
                name: "max_group_count",
                value: 0,
            });
        }
        if self.min_group_count > self.max_group_count {
            return Err(MotifError::GroupBounds {
                min: self.min_group_count,
                max: self.max_group_count,
            });
        }
        Ok(())
    }
}
