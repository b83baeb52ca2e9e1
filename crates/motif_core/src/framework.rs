//! Per-cycle records: what discernment judged, what the environment fed
//! back, and what refinement made of the framework.

use crate::population::{ObjectKind, StateDistribution};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentLevel {
    Basic,
    Developing,
    Refined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nuance {
    Direct,
    Nuanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub level: JudgmentLevel,
    pub nuance: Nuance,
    /// 0.0 - 1.0
    pub confidence: f32,
    /// Human-readable; not machine-consumed
    pub rationale: String,
}

/// Output of the discernment stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discernment {
    pub judgment: Judgment,
    /// Discernment strength of the seeded object (0.0 - 1.0)
    pub confidence: f32,
    pub kind: ObjectKind,
    /// Input complexity (0.0 - 1.0)
    pub complexity: f32,
    /// Input novelty against recent history (0.0 - 1.0)
    pub novelty: f32,
}

/// Environmental feedback synthesized from a discernment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Always "environmental_feedback"
    pub kind: String,
    pub quality: f32,
    pub learning_potential: f32,
    pub reinforces: bool,
    pub challenges: bool,
    /// Unix millis
    pub timestamp: i64,
}

/// Framework-level aggregate read back from the population after a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkSummary {
    pub complexity: f32,
    pub coherence: f32,
    /// Non-negative; grows with interaction density
    pub adaptability: f32,
    /// Population energy mean
    pub plasticity: f32,
    pub stability: f32,
    pub object_count: usize,
    pub group_count: usize,
    pub state_distribution: StateDistribution,
}

/// Result of one refinement.
///
/// The caller may hand it back (via [`ExternalState::from`]) as the next
/// cycle's external state. Whether it does so consistently is up to the
/// caller; the loop keeps no copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkState {
    pub framework: FrameworkSummary,
    /// 0.0 - 2.0
    pub plasticity: f32,
    pub quality: f32,
    pub coherence: f32,
    pub adaptability: f32,
    pub last_output: Discernment,
    pub last_feedback: Feedback,
}

/// Framework fields of an external state; any may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalFramework {
    pub complexity: Option<f32>,
    pub coherence: Option<f32>,
    pub adaptability: Option<f32>,
}

/// Caller-supplied context for a cycle. Partially populated states are
/// normal; every consumer defaults what is missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalState {
    pub framework: Option<ExternalFramework>,
    pub quality: Option<f32>,
    pub plasticity: Option<f32>,
}

impl From<&FrameworkState> for ExternalState {
    fn from(state: &FrameworkState) -> Self {
        Self {
            framework: Some(ExternalFramework {
                complexity: Some(state.framework.complexity),
                coherence: Some(state.framework.coherence),
                adaptability: Some(state.framework.adaptability),
            }),
            quality: Some(state.quality),
            plasticity: Some(state.plasticity),
        }
    }
}
