//! Discernment: turn one input into one freshly seeded population object
//! and a judgment about it.

use crate::complexity::{input_complexity, COMPLEXITY_THRESHOLD};
use crate::novelty::{input_novelty, InputRecord};
use motif_core::numeric::unit;
use motif_core::{
    BoundedHistory, Discernment, ExternalState, InputValue, Judgment, JudgmentLevel, Nuance,
    ObjectKind, ObjectMetadata, ObjectSeed, ObjectState, PopulationEngine, RandomSource,
};
use std::f32::consts::TAU;

/// Coherence assumed when the caller supplies no framework summary.
pub const BASELINE_COHERENCE: f32 = 0.5;

/// Stand-in for each missing framework field.
const MISSING_FIELD: f32 = 0.5;

const INITIAL_ENERGY_MIN: f32 = 0.6;
const INITIAL_ENERGY_RANGE: f32 = 0.4;

/// Coherence implied by the caller's framework summary (0.0 - 1.0).
pub fn framework_coherence(external: Option<&ExternalState>) -> f32 {
    match external.and_then(|s| s.framework) {
        None => BASELINE_COHERENCE,
        Some(f) => {
            let coherence = f.coherence.unwrap_or(MISSING_FIELD);
            let adaptability = f.adaptability.unwrap_or(MISSING_FIELD);
            let complexity = f.complexity.unwrap_or(MISSING_FIELD);
            unit(coherence * adaptability * complexity)
        }
    }
}

/// Initial attributes of the object seeded for an input.
///
/// Draws the oscillation phase, then the initial energy, from `rng`.
pub fn seed_object(complexity: f32, coherence: f32, rng: &mut dyn RandomSource) -> ObjectSeed {
    let oscillation_phase = rng.next_unit() * TAU;
    let energy = INITIAL_ENERGY_MIN + rng.next_unit() * INITIAL_ENERGY_RANGE;
    ObjectSeed {
        speed: complexity * 0.2 + 0.1,
        kind: if complexity > COMPLEXITY_THRESHOLD {
            ObjectKind::Complex
        } else {
            ObjectKind::Simple
        },
        oscillation_phase,
        last_energy_change: 0.0,
        state: ObjectState::Descending,
        interaction_history: Vec::new(),
        energy,
        metadata: ObjectMetadata {
            input_complexity: complexity,
            framework_coherence: coherence,
            discernment_strength: (complexity + coherence) / 2.0,
        },
    }
}

/// Judge an object snapshot. Pure.
pub fn extract_judgment(
    state: ObjectState,
    kind: ObjectKind,
    energy: f32,
    metadata: &ObjectMetadata,
) -> Judgment {
    let strength = metadata.discernment_strength;
    Judgment {
        level: match state {
            ObjectState::Oscillating => JudgmentLevel::Refined,
            ObjectState::Ascending => JudgmentLevel::Developing,
            ObjectState::Descending => JudgmentLevel::Basic,
        },
        nuance: if metadata.input_complexity > COMPLEXITY_THRESHOLD {
            Nuance::Nuanced
        } else {
            Nuance::Direct
        },
        confidence: unit(strength * (1.0 + energy * 0.5)),
        rationale: format!(
            "Discernment with {} processing at {:.1}% strength",
            kind,
            strength * 100.0
        ),
    }
}

/// Seed one object for `input` under `group_id` and judge it.
///
/// Novelty is measured against `history` as it stood before this input.
pub fn discern<E: PopulationEngine + ?Sized>(
    input: &InputValue,
    external: Option<&ExternalState>,
    history: &BoundedHistory<InputRecord>,
    population: &mut E,
    rng: &mut dyn RandomSource,
    group_id: &str,
) -> Discernment {
    let complexity = input_complexity(input);
    let coherence = framework_coherence(external);
    let seed = seed_object(complexity, coherence, rng);

    let judgment = extract_judgment(seed.state, seed.kind, seed.energy, &seed.metadata);
    let confidence = unit(seed.metadata.discernment_strength);
    let kind = seed.kind;

    population.add_group(group_id, vec![seed]);

    Discernment {
        judgment,
        confidence,
        kind,
        complexity,
        novelty: input_novelty(input, history),
    }
}
