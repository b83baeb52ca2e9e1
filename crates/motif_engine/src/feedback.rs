//! Environmental feedback synthesized from a discernment.

use motif_core::numeric::unit;
use motif_core::{Discernment, Feedback};

pub const FEEDBACK_KIND: &str = "environmental_feedback";

/// Confidence above which feedback reinforces.
pub const CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Novelty above which feedback challenges.
pub const NOVELTY_THRESHOLD: f32 = 0.7;

/// Build feedback for `output`. `jitter` is a uniform draw in [0, 1).
pub fn synthesize_feedback(output: &Discernment, jitter: f32, timestamp: i64) -> Feedback {
    let quality = unit(output.confidence * (0.8 + jitter * 0.4));
    Feedback {
        kind: FEEDBACK_KIND.to_string(),
        quality,
        learning_potential: unit(output.complexity * quality),
        reinforces: output.confidence > CONFIDENCE_THRESHOLD,
        challenges: output.novelty > NOVELTY_THRESHOLD,
        timestamp,
    }
}
