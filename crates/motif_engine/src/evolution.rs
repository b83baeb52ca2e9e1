//! Evolution log entries and the aggregate system summary.

use crate::detector::{Motif, MotifType};
use motif_core::numeric::mean;
use motif_core::BoundedHistory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One cycle's snapshot of the framework.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionEntry {
    /// Cycle index; keeps counting after the log starts evicting
    pub time: u64,
    pub plasticity: f32,
    pub quality: f32,
    pub complexity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSummary {
    pub total_motifs: usize,
    pub motif_distribution: BTreeMap<MotifType, usize>,
    pub avg_plasticity: f32,
    pub avg_quality: f32,
    /// Entries currently held in the evolution log
    pub system_age: usize,
    pub total_cycles: u64,
    pub current_state: Option<EvolutionEntry>,
}

/// Summarize `active` motifs alongside the evolution log.
pub fn summarize(
    active: &[Motif],
    log: &BoundedHistory<EvolutionEntry>,
    total_cycles: u64,
) -> SystemSummary {
    let mut motif_distribution = BTreeMap::new();
    for motif in active {
        *motif_distribution.entry(motif.motif_type).or_insert(0) += 1;
    }

    let plasticities: Vec<f32> = active.iter().map(|m| m.plasticity).collect();
    let qualities: Vec<f32> = active.iter().map(|m| m.quality).collect();

    SystemSummary {
        total_motifs: active.len(),
        motif_distribution,
        avg_plasticity: mean(&plasticities),
        avg_quality: mean(&qualities),
        system_age: log.len(),
        total_cycles,
        current_state: log.last().copied(),
    }
}
