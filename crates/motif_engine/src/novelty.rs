//! Novelty Estimation
//!
//! How unlike the recent past is this input? Inputs are compared in their
//! canonical (compact JSON) form by normalized edit distance against a short
//! window of history; the closest match decides.

use motif_core::similarity::similarity;
use motif_core::{BoundedHistory, ExternalState, InputValue};
use serde::Serialize;

/// Number of most recent history entries compared against.
pub const RECENT_INPUTS_WINDOW: usize = 5;

/// One remembered input.
#[derive(Debug, Clone, Serialize)]
pub struct InputRecord {
    pub input: InputValue,
    pub state: Option<ExternalState>,
    /// Unix millis
    pub timestamp: i64,
}

/// Novelty of `input` against `history` (0.0 = seen before, 1.0 = new).
/// With fewer than two remembered inputs everything is maximally novel.
pub fn input_novelty(input: &InputValue, history: &BoundedHistory<InputRecord>) -> f32 {
    if history.len() < 2 {
        return 1.0;
    }

    let current = input.canonical();
    let closest = history
        .recent(RECENT_INPUTS_WINDOW)
        .map(|record| similarity(&current, &record.input.canonical()))
        .fold(0.0f32, f32::max);

    tracing::trace!("Novelty window closest similarity {:.3}", closest);
    (1.0 - closest).clamp(0.0, 1.0)
}
