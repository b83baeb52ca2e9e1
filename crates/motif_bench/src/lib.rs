//! motif_bench: trajectory simulation tests for the motif loop.
//!
//! Validates behavior over long runs of cycles:
//! - Thousands of closed-loop cycles (framework state fed back as external state)
//! - Repetition drives novelty to zero
//! - Idle gaps longer than the motif TTL leave only fresh motifs
//! - Motifs on live funnels age across cycles
//! - Different seeds give different trajectories

use motif_core::{ExternalState, FrameworkState, InputValue, ManualClock};
use motif_engine::MotifEngine;
use motif_funnels::Funnels;

/// Run `cycles` cycles of `dt`, advancing `clock` by `gap_ms` before each.
/// With `closed_loop`, each cycle's framework state is fed back as the next
/// cycle's external state. Returns every cycle's framework state.
fn simulate(
    engine: &mut MotifEngine<Funnels>,
    clock: &ManualClock,
    input: impl Fn(usize) -> InputValue,
    cycles: usize,
    dt: f32,
    gap_ms: i64,
    closed_loop: bool,
) -> Vec<FrameworkState> {
    let mut external: Option<ExternalState> = None;
    let mut trajectory = Vec::with_capacity(cycles);
    for i in 0..cycles {
        clock.advance(gap_ms);
        let result = engine.advance(input(i), external.as_ref(), dt);
        if closed_loop {
            external = Some(ExternalState::from(&result.framework_state));
        }
        trajectory.push(result.framework_state);
    }
    trajectory
}

fn varied_input(i: usize) -> InputValue {
    match i % 4 {
        0 => InputValue::record([
            ("topic", InputValue::from("tea")),
            ("step", InputValue::from(i as f64)),
        ]),
        1 => InputValue::from(format!("a short note about cycle {}", i)),
        2 => InputValue::from(vec![
            InputValue::from(i as f64),
            InputValue::record([("nested", InputValue::from(true))]),
        ]),
        _ => InputValue::Null,
    }
}
