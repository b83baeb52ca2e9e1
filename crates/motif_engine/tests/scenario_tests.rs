//! End-to-end cycles against a scripted population.
//!
//! The scripted population keeps every object it is given, forces each one
//! into a chosen state and energy on every step, and pads its interaction
//! history so the detector sees a stable loop.

use motif_core::{
    Clock, EngineParams, GlobalState, Group, Interaction, ManualClock, ObjectKind, ObjectSeed,
    ObjectState, PopulationEngine, SequenceRandom, TrackedObject,
};
use motif_engine::{InputValue, MotifConfig, MotifEngine, MotifType};
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Scripted population
// ============================================================================

struct ScriptedPopulation {
    params: EngineParams,
    groups: Vec<Group>,
    next_id: u64,
    clock: Arc<dyn Clock>,
    state: ObjectState,
    energy: f32,
}

impl ScriptedPopulation {
    fn new(clock: Arc<dyn Clock>, state: ObjectState, energy: f32) -> Self {
        Self {
            params: EngineParams::default(),
            groups: Vec::new(),
            next_id: 0,
            clock,
            state,
            energy,
        }
    }
}

impl PopulationEngine for ScriptedPopulation {
    fn params(&self) -> &EngineParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut EngineParams {
        &mut self.params
    }

    fn add_group(&mut self, group_id: &str, seeds: Vec<ObjectSeed>) {
        let objects = seeds
            .into_iter()
            .map(|seed| {
                self.next_id += 1;
                TrackedObject::from_seed(self.next_id, seed)
            })
            .collect();
        self.groups.push(Group {
            id: group_id.to_string(),
            objects,
        });
    }

    fn step(&mut self, _dt: f32) {
        let now = self.clock.now_millis();
        for obj in self.groups.iter_mut().flat_map(|g| g.objects.iter_mut()) {
            obj.state = self.state;
            obj.energy = self.energy;
            while obj.interaction_history.len() < 3 {
                obj.interaction_history.push(Interaction {
                    partner: obj.id + 100,
                    energy: self.energy,
                    timestamp: now,
                });
            }
            for interaction in obj.interaction_history.iter_mut() {
                interaction.timestamp = now;
            }
        }
    }

    fn global_state(&self) -> GlobalState {
        GlobalState::from_groups(&self.groups)
    }

    fn groups(&self) -> &[Group] {
        &self.groups
    }
}

fn scenario_config() -> MotifConfig {
    MotifConfig {
        plasticity_threshold: 0.6,
        stability_threshold: 0.5,
        quality_threshold: 0.4,
        ..Default::default()
    }
}

fn scripted_engine(
    config: MotifConfig,
    clock: &ManualClock,
    state: ObjectState,
    energy: f32,
) -> MotifEngine<ScriptedPopulation> {
    let clock: Arc<dyn Clock> = Arc::new(clock.clone());
    let population = ScriptedPopulation::new(Arc::clone(&clock), state, energy);
    MotifEngine::with_parts(
        config,
        population,
        clock,
        Box::new(SequenceRandom::new(vec![0.25, 0.5, 0.75])),
    )
    .unwrap()
}

fn near_identical(i: usize) -> InputValue {
    json!({"topic": "tea", "mood": "calm", "n": i}).into()
}

// ============================================================================
// Motif detection
// ============================================================================

#[test]
fn test_oscillating_loop_becomes_taste_motif() {
    let clock = ManualClock::new(10_000);
    let mut engine = scripted_engine(scenario_config(), &clock, ObjectState::Oscillating, 0.9);

    let mut last = None;
    for i in 0..3 {
        clock.advance(1_000);
        last = Some(engine.advance(near_identical(i), None, 1.0));
    }
    let result = last.unwrap();

    let taste = result
        .active_motifs
        .iter()
        .find(|m| m.motif_type == MotifType::Taste && m.lifespan >= 3)
        .expect("taste motif with lifespan >= 3");
    assert_eq!(taste.id.group, "drv-0");
    assert_eq!(taste.first_detected, 11_000);
    assert_eq!(taste.last_updated, 13_000);
    assert!((taste.plasticity - 0.9).abs() < 1e-6);
    assert_eq!(taste.state_history.len(), 3);

    // One motif per seeded object
    assert_eq!(engine.motifs().len(), 3);
}

#[test]
fn test_ascending_loop_becomes_growth_motif() {
    let clock = ManualClock::new(0);
    let mut engine = scripted_engine(scenario_config(), &clock, ObjectState::Ascending, 0.95);
    clock.advance(1);
    let result = engine.advance("rising".into(), None, 1.0);
    assert_eq!(result.active_motifs.len(), 1);
    assert_eq!(result.active_motifs[0].motif_type, MotifType::Growth);
}

#[test]
fn test_descending_objects_never_form_motifs() {
    let clock = ManualClock::new(0);
    let mut engine = scripted_engine(scenario_config(), &clock, ObjectState::Descending, 1.5);
    for i in 0..5 {
        clock.advance(100);
        engine.advance(near_identical(i), None, 1.0);
    }
    assert!(engine.motifs().is_empty());
    assert!(engine.active_motifs().is_empty());
}

#[test]
fn test_low_energy_objects_never_form_motifs() {
    let clock = ManualClock::new(0);
    let mut engine = scripted_engine(scenario_config(), &clock, ObjectState::Oscillating, 0.6);
    for i in 0..5 {
        engine.advance(near_identical(i), None, 1.0);
    }
    assert!(engine.motifs().is_empty());
}

#[test]
fn test_ttl_eviction_and_rediscovery() {
    let clock = ManualClock::new(0);
    let config = MotifConfig {
        motif_ttl_ms: 5_000,
        ..scenario_config()
    };
    let mut engine = scripted_engine(config, &clock, ObjectState::Oscillating, 0.9);

    engine.advance(near_identical(0), None, 1.0);
    engine.advance(near_identical(1), None, 1.0);
    assert_eq!(engine.motifs().motifs().next().map(|m| m.lifespan), Some(2));

    // Stop qualifying, then let the TTL run out
    engine.population_mut().state = ObjectState::Descending;
    clock.advance(5_001);
    engine.advance(near_identical(2), None, 1.0);
    assert!(engine.motifs().is_empty());

    // Qualify again: fresh motifs, lifespan restarts
    engine.population_mut().state = ObjectState::Oscillating;
    clock.advance(10);
    engine.advance(near_identical(3), None, 1.0);
    let now = clock.now_millis();
    assert!(!engine.motifs().is_empty());
    for motif in engine.motifs().motifs() {
        assert_eq!(motif.lifespan, 1);
        assert_eq!(motif.first_detected, now);
    }
}

// ============================================================================
// Cycle outputs
// ============================================================================

#[test]
fn test_empty_record_is_simple() {
    let clock = ManualClock::new(0);
    let mut engine = scripted_engine(scenario_config(), &clock, ObjectState::Oscillating, 0.9);
    let result = engine.advance(json!({}).into(), None, 1.0);
    assert_eq!(result.discernment.complexity, 0.0);
    assert_eq!(result.discernment.kind, ObjectKind::Simple);
}

#[test]
fn test_first_two_inputs_fully_novel() {
    let clock = ManualClock::new(0);
    let mut engine = scripted_engine(scenario_config(), &clock, ObjectState::Oscillating, 0.9);
    let first = engine.advance("same".into(), None, 1.0);
    let second = engine.advance("same".into(), None, 1.0);
    let third = engine.advance("same".into(), None, 1.0);
    assert_eq!(first.discernment.novelty, 1.0);
    assert_eq!(second.discernment.novelty, 1.0);
    assert_eq!(third.discernment.novelty, 0.0);
}

#[test]
fn test_summary_without_motifs() {
    let clock = ManualClock::new(0);
    let engine = scripted_engine(scenario_config(), &clock, ObjectState::Oscillating, 0.9);
    let summary = engine.system_summary();
    assert_eq!(summary.total_motifs, 0);
    assert_eq!(summary.avg_plasticity, 0.0);
    assert_eq!(summary.avg_quality, 0.0);
    assert!(summary.motif_distribution.is_empty());
    assert!(summary.current_state.is_none());
}

#[test]
fn test_summary_counts_active_motifs() {
    let clock = ManualClock::new(0);
    let mut engine = scripted_engine(scenario_config(), &clock, ObjectState::Oscillating, 0.9);
    for i in 0..4 {
        engine.advance(near_identical(i), None, 1.0);
    }
    let summary = engine.system_summary();
    assert_eq!(summary.total_motifs, 4);
    assert_eq!(summary.motif_distribution.get(&MotifType::Taste), Some(&4));
    assert!((summary.avg_plasticity - 0.9).abs() < 1e-6);
    assert_eq!(summary.system_age, 4);
    assert_eq!(summary.total_cycles, 4);
}

#[test]
fn test_rings_stay_at_capacity() {
    let clock = ManualClock::new(0);
    let config = MotifConfig {
        history_limit: 4,
        evolution_limit: 3,
        ..scenario_config()
    };
    let mut engine = scripted_engine(config, &clock, ObjectState::Oscillating, 0.9);
    for i in 0..12 {
        let result = engine.advance(InputValue::from(i as f64), None, 1.0);
        assert!(result.evolution.len() <= 3);
        assert!(engine.input_history().len() <= 4);
    }
    assert_eq!(engine.input_history().len(), 4);
    assert_eq!(engine.evolution_log().len(), 3);
    assert_eq!(engine.evolution_log()[0].time, 9);
}
