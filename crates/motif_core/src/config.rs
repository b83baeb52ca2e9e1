use crate::error::{MotifError, Result};
use crate::population::EngineParams;
use serde::{Deserialize, Serialize};

// ============================================================================
// Motif loop configuration
// ============================================================================

/// Construction-time configuration for the motif loop.
///
/// Every field is optional when deserialized; missing fields take the
/// defaults below. Call [`MotifConfig::validate`] (the engine does) before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotifConfig {
    /// Minimum object energy for a stable loop (exclusive).
    pub plasticity_threshold: f32,
    /// Minimum motif stability to be reported as active (exclusive).
    pub stability_threshold: f32,
    /// Minimum motif quality to be reported as active (exclusive).
    pub quality_threshold: f32,
    /// Base of the external-state plasticity multiplier on bayesian influence.
    /// Also stands in for an absent external plasticity.
    pub input_sensitivity: f32,
    /// Initial engine energy regeneration.
    pub plasticity_regeneration: f32,
    /// Initial engine oscillation strength.
    pub discernment_sensitivity: f32,
    /// Initial engine bayesian influence.
    pub refinement_strength: f32,
    /// Idle time after which a motif is evicted.
    pub motif_ttl_ms: i64,
    /// Input history capacity.
    pub history_limit: usize,
    /// Evolution log capacity.
    pub evolution_limit: usize,
}

impl Default for MotifConfig {
    fn default() -> Self {
        Self {
            plasticity_threshold: 0.7,
            stability_threshold: 0.8,
            quality_threshold: 0.6,
            input_sensitivity: 0.5,
            plasticity_regeneration: 0.02,
            discernment_sensitivity: 0.1,
            refinement_strength: 0.5,
            motif_ttl_ms: 60_000,
            history_limit: 100,
            evolution_limit: 50,
        }
    }
}

impl MotifConfig {
    /// Reject out-of-range thresholds and non-positive TTL / capacities.
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("plasticity_threshold", self.plasticity_threshold),
            ("stability_threshold", self.stability_threshold),
            ("quality_threshold", self.quality_threshold),
            ("input_sensitivity", self.input_sensitivity),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(MotifError::ThresholdOutOfRange { name, value });
            }
        }

        let rates = [
            ("plasticity_regeneration", self.plasticity_regeneration),
            ("discernment_sensitivity", self.discernment_sensitivity),
            ("refinement_strength", self.refinement_strength),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(MotifError::InvalidParameter { name, value });
            }
        }

        if self.motif_ttl_ms <= 0 {
            return Err(MotifError::NonPositive {
                name: "motif_ttl_ms",
                value: self.motif_ttl_ms,
            });
        }
        if self.history_limit == 0 {
            return Err(MotifError::NonPositive {
                name: "history_limit",
                value: 0,
            });
        }
        if self.evolution_limit == 0 {
            return Err(MotifError::NonPositive {
                name: "evolution_limit",
                value: 0,
            });
        }
        Ok(())
    }

    /// Initial engine configuration implied by this config.
    pub fn engine_params(&self) -> EngineParams {
        EngineParams {
            energy_regeneration: self.plasticity_regeneration,
            oscillation_strength: self.discernment_sensitivity,
            bayesian_influence: self.refinement_strength,
            ..EngineParams::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
