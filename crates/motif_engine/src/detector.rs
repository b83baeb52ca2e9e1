//! Motif Detection
//!
//! After each refinement the detector scans every tracked object. Objects
//! in a stable loop (enough interactions, enough energy, oscillating or
//! strongly ascending) are recorded as motifs keyed by (group, object).
//! A motif ages by one cycle each time its object is re-detected and is
//! evicted once it has gone unseen for longer than the TTL.
//!
//! Motifs are reported in first-detection order. A motif re-created after
//! eviction counts as newly detected.

use motif_core::numeric::{mean, std_dev, unit, variance};
use motif_core::{Group, Interaction, ObjectState, TrackedObject};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Maximum samples kept in a motif's state history.
pub const STATE_HISTORY_LIMIT: usize = 10;

/// Interactions needed before an object can form a loop.
const MIN_INTERACTIONS: usize = 3;

/// Energy an ascending object needs to count as a loop.
const ASCENDING_ENERGY: f32 = 0.8;

/// Interaction count at which the interaction quality term saturates.
const INTERACTION_SATURATION: f32 = 8.0;

/// Distinct partners at which partner diversity saturates.
const PARTNER_SATURATION: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotifType {
    /// Stuck descending
    Rut,
    /// Settled oscillation
    Taste,
    /// Sustained ascent
    Growth,
    /// Not yet classifiable
    Emerging,
}

impl MotifType {
    pub fn from_state(state: ObjectState) -> Self {
        match state {
            ObjectState::Descending => MotifType::Rut,
            ObjectState::Oscillating => MotifType::Taste,
            ObjectState::Ascending => MotifType::Growth,
        }
    }
}

/// Identity of a motif: the group and object it was detected on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotifKey {
    pub group: String,
    pub object: u64,
}

impl std::fmt::Display for MotifKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.group, self.object)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSample {
    pub state: ObjectState,
    /// Raw object energy (may exceed 1.0)
    pub energy: f32,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motif {
    pub id: MotifKey,
    pub motif_type: MotifType,
    pub quality: f32,
    pub plasticity: f32,
    pub stability: f32,
    pub coherence: f32,
    /// Consecutive detections since creation
    pub lifespan: u32,
    pub first_detected: i64,
    pub last_updated: i64,
    pub interactions: usize,
    /// Most recent samples, oldest first
    pub state_history: Vec<StateSample>,
}

pub struct MotifDetector {
    /// Keyed by detection sequence number
    motifs: BTreeMap<u64, Motif>,
    index: HashMap<MotifKey, u64>,
    next_seq: u64,
    plasticity_threshold: f32,
    ttl_ms: i64,
}

impl MotifDetector {
    pub fn new(plasticity_threshold: f32, ttl_ms: i64) -> Self {
        Self {
            motifs: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
            plasticity_threshold,
            ttl_ms,
        }
    }

    /// Upsert a motif for every object in a stable loop, then evict motifs
    /// idle for longer than the TTL.
    pub fn scan(&mut self, groups: &[Group], now: i64) {
        for group in groups {
            for obj in &group.objects {
                if self.is_stable_loop(obj) {
                    self.upsert(&group.id, obj, now);
                }
            }
        }

        let ttl = self.ttl_ms;
        let index = &mut self.index;
        self.motifs.retain(|_, motif| {
            let keep = now - motif.last_updated <= ttl;
            if !keep {
                tracing::debug!("Motif {} evicted after {} cycles", motif.id, motif.lifespan);
                index.remove(&motif.id);
            }
            keep
        });
    }

    pub fn is_stable_loop(&self, obj: &TrackedObject) -> bool {
        let experienced = obj.interaction_history.len() >= MIN_INTERACTIONS;
        let plastic = obj.energy > self.plasticity_threshold;
        let stable_state = match obj.state {
            ObjectState::Oscillating => true,
            ObjectState::Ascending => obj.energy > ASCENDING_ENERGY,
            ObjectState::Descending => false,
        };
        experienced && plastic && stable_state
    }

    fn upsert(&mut self, group_id: &str, obj: &TrackedObject, now: i64) {
        let key = MotifKey {
            group: group_id.to_string(),
            object: obj.id,
        };
        let stability = interaction_stability(&obj.interaction_history, now, self.ttl_ms);
        let sample = StateSample {
            state: obj.state,
            energy: obj.energy,
            timestamp: now,
        };

        let existing = self.index.get(&key).and_then(|seq| self.motifs.get_mut(seq));
        match existing {
            Some(motif) => {
                motif.motif_type = MotifType::from_state(obj.state);
                motif.quality = motif_quality(obj, stability);
                motif.plasticity = unit(obj.energy);
                motif.stability = stability;
                motif.coherence = interaction_coherence(&obj.interaction_history);
                motif.lifespan += 1;
                motif.last_updated = now;
                motif.interactions = obj.interaction_history.len();
                motif.state_history.push(sample);
                let excess = motif.state_history.len().saturating_sub(STATE_HISTORY_LIMIT);
                motif.state_history.drain(..excess);
            }
            None => {
                tracing::debug!("New {:?} motif {}", MotifType::from_state(obj.state), key);
                let motif = Motif {
                    id: key.clone(),
                    motif_type: MotifType::from_state(obj.state),
                    quality: motif_quality(obj, stability),
                    plasticity: unit(obj.energy),
                    stability,
                    coherence: interaction_coherence(&obj.interaction_history),
                    lifespan: 1,
                    first_detected: now,
                    last_updated: now,
                    interactions: obj.interaction_history.len(),
                    state_history: vec![sample],
                };
                let seq = self.next_seq;
                self.next_seq += 1;
                self.index.insert(key, seq);
                self.motifs.insert(seq, motif);
            }
        }
    }

    /// Motifs above both thresholds, in first-detection order.
    pub fn active(&self, stability_threshold: f32, quality_threshold: f32) -> Vec<Motif> {
        self.motifs
            .values()
            .filter(|m| m.stability > stability_threshold && m.quality > quality_threshold)
            .cloned()
            .collect()
    }

    /// Every live motif, in first-detection order.
    pub fn motifs(&self) -> impl Iterator<Item = &Motif> {
        self.motifs.values()
    }

    pub fn get(&self, key: &MotifKey) -> Option<&Motif> {
        self.index.get(key).and_then(|seq| self.motifs.get(seq))
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }
}

/// Consistency of interaction energies blended with recency (0.0 - 1.0).
/// Zero with fewer than three interactions.
pub fn interaction_stability(history: &[Interaction], now: i64, ttl_ms: i64) -> f32 {
    if history.len() < MIN_INTERACTIONS {
        return 0.0;
    }
    let energies: Vec<f32> = history.iter().map(|h| h.energy).collect();
    let consistency = 1.0 - variance(&energies).min(1.0);

    let window = ttl_ms as f64 / 2.0;
    let recent = history
        .iter()
        .filter(|h| ((now - h.timestamp) as f64) < window)
        .count();
    let recency = (recent as f32 / 3.0).min(1.0);

    unit(consistency * 0.6 + recency * 0.4)
}

/// Partner diversity blended with relative energy steadiness (0.0 - 1.0).
pub fn interaction_coherence(history: &[Interaction]) -> f32 {
    if history.is_empty() {
        return 0.0;
    }
    let partners: HashSet<u64> = history.iter().map(|h| h.partner).collect();
    let diversity = (partners.len() as f32 / PARTNER_SATURATION).min(1.0);

    let energies: Vec<f32> = history.iter().map(|h| h.energy).collect();
    let m = mean(&energies);
    let scale = if m == 0.0 { 1.0 } else { m };
    let steadiness = unit(1.0 - std_dev(&energies) / scale);

    unit(diversity * 0.4 + steadiness * 0.6)
}

/// Quality of a loop: energy, experience, stability and state.
pub fn motif_quality(obj: &TrackedObject, stability: f32) -> f32 {
    let interaction_quality =
        (obj.interaction_history.len() as f32 / INTERACTION_SATURATION).min(1.0);
    let state_quality = match obj.state {
        ObjectState::Oscillating => 1.0,
        ObjectState::Ascending => 0.7,
        ObjectState::Descending => 0.4,
    };
    unit(obj.energy * 0.3 + interaction_quality * 0.2 + stability * 0.3 + state_quality * 0.2)
}
