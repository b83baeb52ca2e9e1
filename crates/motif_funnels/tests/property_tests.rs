//! Property-based tests for funnel dynamics.
//!
//! Whatever the tuning, stepping the population must keep energies finite
//! and within [floor, ENERGY_MAX], and the global summary consistent with
//! the per-object snapshots.

use motif_core::{
    EngineParams, ManualClock, ObjectKind, ObjectMetadata, ObjectSeed, ObjectState,
    PopulationEngine, SeededRandom,
};
use motif_funnels::{Funnels, ENERGY_MAX};
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Strategies
// ============================================================================

fn arb_params() -> impl Strategy<Value = EngineParams> {
    (
        0.0f32..0.2,
        0.0f32..2.0,
        0.0f32..1.0,
        0.0f32..0.1,
        0.0f32..0.5,
        0.0f32..2.0,
        0.0f32..3.0,
        0.0f32..1.0,
    )
        .prop_map(
            |(regen, osc, bayes, gravity, friction, turbulence, spiral, radius)| EngineParams {
                energy_regeneration: regen,
                oscillation_strength: osc,
                bayesian_influence: bayes,
                gravity,
                friction,
                turbulence,
                spiral_tightness: spiral,
                interaction_radius: radius,
                ..Default::default()
            },
        )
}

fn arb_seed() -> impl Strategy<Value = ObjectSeed> {
    (0.0f32..2.0, 0.1f32..0.3, 0.0f32..6.28).prop_map(|(energy, speed, phase)| ObjectSeed {
        speed,
        kind: ObjectKind::Simple,
        oscillation_phase: phase,
        last_energy_change: 0.0,
        state: ObjectState::Descending,
        interaction_history: vec![],
        energy,
        metadata: ObjectMetadata::default(),
    })
}

// ============================================================================
// Dynamics Properties
// ============================================================================

proptest! {
    #[test]
    fn energies_stay_bounded(
        params in arb_params(),
        seeds in prop::collection::vec(arb_seed(), 1..6),
        dt in 0.1f32..5.0,
        seed in any::<u64>(),
    ) {
        let mut funnels = Funnels::new(
            params,
            Arc::new(ManualClock::new(0)),
            Box::new(SeededRandom::new(seed)),
        ).unwrap();
        funnels.add_group("probe", seeds);

        for _ in 0..100 {
            funnels.step(dt);
        }

        let floor = funnels.params().floor_threshold;
        for obj in funnels.groups().iter().flat_map(|g| g.objects.iter()) {
            prop_assert!(obj.energy.is_finite(), "energy not finite: {}", obj.energy);
            prop_assert!(
                obj.energy >= floor && obj.energy <= ENERGY_MAX,
                "energy out of range: {}",
                obj.energy
            );
        }
    }

    #[test]
    fn global_state_matches_snapshots(
        seeds in prop::collection::vec(arb_seed(), 0..6),
        seed in any::<u64>(),
    ) {
        let mut funnels = Funnels::new(
            EngineParams::default(),
            Arc::new(ManualClock::new(0)),
            Box::new(SeededRandom::new(seed)),
        ).unwrap();
        funnels.add_group("probe", seeds);
        funnels.step(1.0);

        let gs = funnels.global_state();
        prop_assert_eq!(gs.total_objects, funnels.object_count());
        prop_assert_eq!(gs.state_distribution.total(), gs.total_objects);
        prop_assert_eq!(gs.total_groups, funnels.groups().len());
        prop_assert!(gs.energy_variance >= 0.0 && gs.energy_variance.is_finite());
        prop_assert!(gs.total_groups <= funnels.params().max_group_count);
    }
}
