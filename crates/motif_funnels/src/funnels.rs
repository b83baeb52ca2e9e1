//! Funnel dynamics implementation

use motif_core::numeric::{mean, sanitize};
use motif_core::{
    Clock, EngineParams, GlobalState, Group, Interaction, ObjectKind, ObjectMetadata, ObjectSeed,
    ObjectState, PopulationEngine, RandomSource, Result, TrackedObject,
};
use std::f32::consts::TAU;
use std::sync::Arc;

/// Upper bound for object energy.
pub const ENERGY_MAX: f32 = 2.0;

/// Energy change per unit time below which an object counts as oscillating.
const STATE_DEAD_BAND: f32 = 0.002;

/// Energy of the resting objects seeded at construction.
const RESTING_ENERGY: f32 = 1.0;

/// Interactions remembered per object, most recent kept.
pub const INTERACTION_HISTORY_LIMIT: usize = 32;

/// Scales the bayesian pull so full influence closes 10% of the gap per unit time.
const BAYESIAN_RATE: f32 = 0.1;

pub struct Funnels {
    params: EngineParams,
    groups: Vec<Group>,
    next_id: u64,
    clock: Arc<dyn Clock>,
    rng: Box<dyn RandomSource>,
    /// Total simulated time
    elapsed: f32,
}

impl Funnels {
    /// Validate `params` and seed `min_group_count` resting groups.
    pub fn new(
        params: EngineParams,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        params.validate()?;

        let mut funnels = Self {
            params,
            groups: Vec::new(),
            next_id: 0,
            clock,
            rng,
            elapsed: 0.0,
        };

        for i in 0..funnels.params.min_group_count {
            let seed = ObjectSeed {
                speed: 0.1,
                kind: ObjectKind::Simple,
                oscillation_phase: funnels.rng.next_unit() * TAU,
                last_energy_change: 0.0,
                state: ObjectState::Descending,
                interaction_history: Vec::new(),
                energy: RESTING_ENERGY,
                metadata: ObjectMetadata::default(),
            };
            funnels.add_group(&format!("funnel-{}", i), vec![seed]);
        }

        tracing::info!(
            "Funnels initialized with {} resting groups (max {})",
            funnels.groups.len(),
            funnels.params.max_group_count
        );
        Ok(funnels)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn object_count(&self) -> usize {
        self.groups.iter().map(|g| g.objects.len()).sum()
    }

    fn next_object_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drift every object's energy and update its state.
    fn drift(&mut self, dt: f32) {
        let p = &self.params;
        let energies: Vec<f32> = self
            .groups
            .iter()
            .flat_map(|g| g.objects.iter().map(|o| o.energy))
            .collect();
        let population_mean = mean(&energies);

        for obj in self.groups.iter_mut().flat_map(|g| g.objects.iter_mut()) {
            let prev = obj.energy;

            obj.oscillation_phase =
                (obj.oscillation_phase + obj.speed * p.spiral_tightness * dt).rem_euclid(TAU);
            let oscillation = p.oscillation_strength * obj.oscillation_phase.sin();
            let noise = p.turbulence * (self.rng.next_unit() * 2.0 - 1.0);
            let pull = p.bayesian_influence * BAYESIAN_RATE * (population_mean - prev);

            let d_energy =
                p.energy_regeneration - p.gravity - p.friction * prev + oscillation + noise + pull;
            obj.energy = sanitize(prev + d_energy * dt, RESTING_ENERGY)
                .clamp(p.floor_threshold, ENERGY_MAX);

            let change = obj.energy - prev;
            let reversed = obj.last_energy_change != 0.0
                && change != 0.0
                && change.signum() != obj.last_energy_change.signum();
            obj.state = if change.abs() < STATE_DEAD_BAND * dt || reversed {
                ObjectState::Oscillating
            } else if change > 0.0 {
                ObjectState::Ascending
            } else {
                ObjectState::Descending
            };
            obj.last_energy_change = change;
        }
    }

    /// Each object records an encounter with its nearest neighbour in range.
    fn interact(&mut self) {
        let radius = self.params.interaction_radius;
        let now = self.clock.now_millis();
        let snapshot: Vec<(u64, f32)> = self
            .groups
            .iter()
            .flat_map(|g| g.objects.iter().map(|o| (o.id, o.energy)))
            .collect();

        for obj in self.groups.iter_mut().flat_map(|g| g.objects.iter_mut()) {
            let nearest = snapshot
                .iter()
                .filter(|(id, _)| *id != obj.id)
                .map(|(id, e)| (*id, (e - obj.energy).abs()))
                .filter(|(_, d)| *d <= radius)
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((partner, _)) = nearest {
                obj.interaction_history.push(Interaction {
                    partner,
                    energy: obj.energy,
                    timestamp: now,
                });
                let excess = obj
                    .interaction_history
                    .len()
                    .saturating_sub(INTERACTION_HISTORY_LIMIT);
                obj.interaction_history.drain(..excess);
            }
        }
    }
}

impl PopulationEngine for Funnels {
    fn params(&self) -> &EngineParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut EngineParams {
        &mut self.params
    }

    fn add_group(&mut self, group_id: &str, seeds: Vec<ObjectSeed>) {
        let objects: Vec<TrackedObject> = seeds
            .into_iter()
            .map(|seed| {
                let id = self.next_object_id();
                TrackedObject::from_seed(id, seed)
            })
            .collect();

        if let Some(existing) = self.groups.iter_mut().find(|g| g.id == group_id) {
            existing.objects.extend(objects);
        } else {
            self.groups.push(Group {
                id: group_id.to_string(),
                objects,
            });
        }

        while self.groups.len() > self.params.max_group_count.max(1) {
            let evicted = self.groups.remove(0);
            tracing::debug!(
                "Evicted funnel {} ({} objects, avg energy {:.3})",
                evicted.id,
                evicted.objects.len(),
                evicted.avg_energy()
            );
        }
    }

    fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            tracing::warn!("Ignoring non-positive or non-finite dt {}", dt);
            return;
        }
        self.drift(dt);
        self.interact();
        self.elapsed += dt;
    }

    fn global_state(&self) -> GlobalState {
        GlobalState::from_groups(&self.groups)
    }

    fn groups(&self) -> &[Group] {
        &self.groups
    }
}
