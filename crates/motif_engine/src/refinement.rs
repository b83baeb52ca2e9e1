//! Refinement: feed judgment, feedback and external guidance back into the
//! population's tunable parameters, advance it, and score what comes back.
//!
//! Tuning happens in a fixed order (output, feedback, external state) and
//! is followed by a clamp into the engine's valid ranges before stepping.

use crate::complexity::COMPLEXITY_THRESHOLD;
use motif_core::numeric::{sanitize, unit};
use motif_core::{
    Discernment, EngineParams, ExternalState, Feedback, FrameworkState, FrameworkSummary,
    GlobalState, Group, JudgmentLevel, ObjectState, PopulationEngine,
};
use std::collections::HashSet;

/// Upper bound of framework plasticity.
pub const PLASTICITY_MAX: f32 = 2.0;

const BAYESIAN_CAP: f32 = 0.9;
const BASE_INTERACTION_RADIUS: f32 = 0.3;
const REGENERATION_RANGE: (f32, f32) = (0.01, 0.1);
const EXTERNAL_QUALITY_THRESHOLD: f32 = 0.7;
const EXTERNAL_COHERENCE_THRESHOLD: f32 = 0.8;
/// Object count at which population complexity saturates.
const COMPLEXITY_SATURATION: f32 = 20.0;

/// Aggregate metrics over every tracked object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateMetrics {
    /// Mean interaction-history length per object
    pub interaction_density: f32,
    /// 1 - global energy variance
    pub coherence: f32,
    /// Distinct states observed / 3
    pub state_variety: f32,
    pub complexity: f32,
    pub adaptability: f32,
}

impl AggregateMetrics {
    pub fn from_population(groups: &[Group], global: &GlobalState) -> Self {
        let mut objects = 0usize;
        let mut interactions = 0usize;
        let mut states: HashSet<ObjectState> = HashSet::new();

        for obj in groups.iter().flat_map(|g| g.objects.iter()) {
            objects += 1;
            interactions += obj.interaction_history.len();
            states.insert(obj.state);
        }

        let interaction_density = if objects > 0 {
            interactions as f32 / objects as f32
        } else {
            0.0
        };
        let state_variety = unit(states.len() as f32 / ObjectState::COUNT as f32);

        Self {
            interaction_density,
            coherence: unit(1.0 - global.energy_variance),
            state_variety,
            complexity: unit(objects as f32 / COMPLEXITY_SATURATION),
            adaptability: state_variety * interaction_density,
        }
    }
}

/// Step 1: confidence raises bayesian influence, refined judgments swing
/// harder, complexity widens the interaction radius.
pub fn apply_output_influence(params: &mut EngineParams, output: &Discernment) {
    params.bayesian_influence =
        (params.bayesian_influence + output.confidence * 0.3).min(BAYESIAN_CAP);
    if output.judgment.level == JudgmentLevel::Refined {
        params.oscillation_strength *= 1.1;
    }
    params.interaction_radius = BASE_INTERACTION_RADIUS + output.complexity * 0.2;
}

/// Step 2: good feedback speeds regeneration, high learning potential
/// lowers friction, reinforcement calms turbulence and challenge stirs it.
pub fn apply_feedback_influence(params: &mut EngineParams, feedback: &Feedback) {
    let (lo, hi) = REGENERATION_RANGE;
    params.energy_regeneration =
        (params.energy_regeneration + feedback.quality * 0.1).clamp(lo, hi);
    if feedback.learning_potential > COMPLEXITY_THRESHOLD {
        params.friction *= 0.95;
    }
    if feedback.reinforces {
        params.turbulence *= 0.9;
    } else if feedback.challenges {
        params.turbulence *= 1.2;
    }
}

/// Step 3: the caller's external state steers tightness, gravity,
/// bayesian influence and radius. Missing fields never trigger a branch.
pub fn apply_state_guidance(
    params: &mut EngineParams,
    external: Option<&ExternalState>,
    input_sensitivity: f32,
) {
    let quality = external.and_then(|s| s.quality);
    if quality.is_some_and(|q| q > EXTERNAL_QUALITY_THRESHOLD) {
        params.spiral_tightness *= 1.05;
    } else {
        params.gravity *= 0.95;
    }

    let plasticity = external
        .and_then(|s| s.plasticity)
        .unwrap_or(input_sensitivity);
    params.bayesian_influence *= input_sensitivity + plasticity;

    let coherence = external.and_then(|s| s.framework).and_then(|f| f.coherence);
    if coherence.is_some_and(|c| c > EXTERNAL_COHERENCE_THRESHOLD) {
        params.interaction_radius *= 0.9;
    }
}

/// Tune, step by `dt`, and score the population.
pub fn refine<E: PopulationEngine + ?Sized>(
    population: &mut E,
    output: &Discernment,
    feedback: &Feedback,
    external: Option<&ExternalState>,
    dt: f32,
    input_sensitivity: f32,
) -> FrameworkState {
    {
        let params = population.params_mut();
        apply_output_influence(params, output);
        apply_feedback_influence(params, feedback);
        apply_state_guidance(params, external, input_sensitivity);
        params.clamp_tunables();
        tracing::trace!(
            "Tuned: bayesian={:.3} radius={:.3} regen={:.3} turbulence={:.3}",
            params.bayesian_influence,
            params.interaction_radius,
            params.energy_regeneration,
            params.turbulence
        );
    }

    population.step(dt);

    let global = population.global_state();
    let metrics = AggregateMetrics::from_population(population.groups(), &global);

    FrameworkState {
        framework: framework_summary(&global, &metrics, output, feedback),
        plasticity: new_plasticity(global.energy_mean, output, feedback),
        quality: state_quality(&global, &metrics, output, feedback),
        coherence: metrics.coherence,
        adaptability: metrics.adaptability,
        last_output: output.clone(),
        last_feedback: feedback.clone(),
    }
}

fn new_plasticity(base: f32, output: &Discernment, feedback: &Feedback) -> f32 {
    let confidence_boost = output.confidence * 0.1;
    let feedback_boost = feedback.quality * feedback.learning_potential * 0.15;
    let novelty_boost = output.novelty * if feedback.challenges { 0.2 } else { 0.05 };
    sanitize(base + confidence_boost + feedback_boost + novelty_boost, 0.0)
        .clamp(0.0, PLASTICITY_MAX)
}

fn framework_summary(
    global: &GlobalState,
    metrics: &AggregateMetrics,
    output: &Discernment,
    feedback: &Feedback,
) -> FrameworkSummary {
    let mut coherence = metrics.coherence;
    let mut adaptability = metrics.adaptability;
    let mut stability = 1.0 - global.energy_variance;

    if output.judgment.level == JudgmentLevel::Refined {
        coherence *= 1.1;
        stability *= 1.05;
    }
    if feedback.reinforces {
        stability *= 1.1;
    } else if feedback.challenges {
        adaptability *= 1.15;
    }

    FrameworkSummary {
        complexity: metrics.complexity,
        coherence: unit(coherence),
        adaptability: sanitize(adaptability, 0.0).max(0.0),
        plasticity: global.energy_mean,
        stability: unit(stability),
        object_count: global.total_objects,
        group_count: global.total_groups,
        state_distribution: global.state_distribution,
    }
}

fn state_quality(
    global: &GlobalState,
    metrics: &AggregateMetrics,
    output: &Discernment,
    feedback: &Feedback,
) -> f32 {
    let energy_quality = global.energy_mean * (1.0 - global.energy_variance);
    let interaction_quality = metrics.interaction_density * metrics.coherence;
    let adaptive_quality = metrics.adaptability * metrics.state_variety;

    unit(
        energy_quality * 0.4
            + interaction_quality * 0.2
            + adaptive_quality * 0.3
            + output.confidence * 0.1
            + feedback.quality * 0.1
            + feedback.learning_potential * 0.05,
    )
}
