//! Motif Engine
//!
//! The MotifEngine owns one population and drives it a cycle at a time:
//! - Discerns each input into a freshly seeded object
//! - Synthesizes environmental feedback for the judgment
//! - Refines the population parameters and steps it
//! - Logs the framework's evolution
//! - Scans the population for motifs

use crate::detector::{Motif, MotifDetector};
use crate::discernment::discern;
use crate::evolution::{summarize, EvolutionEntry, SystemSummary};
use crate::feedback::synthesize_feedback;
use crate::novelty::InputRecord;
use crate::refinement::refine;
use motif_core::{
    BoundedHistory, Clock, Discernment, ExternalState, FrameworkState, InputValue, MotifConfig,
    PopulationEngine, RandomSource, Result, SeededRandom, SystemClock,
};
use motif_funnels::Funnels;
use serde::Serialize;
use std::sync::Arc;

/// Everything one cycle produced.
#[derive(Debug, Clone, Serialize)]
pub struct CycleResult {
    pub discernment: Discernment,
    pub framework_state: FrameworkState,
    /// Active motifs after this cycle's scan, in first-detection order
    pub active_motifs: Vec<Motif>,
    /// Evolution log, oldest first
    pub evolution: Vec<EvolutionEntry>,
}

pub struct MotifEngine<E: PopulationEngine = Funnels> {
    config: MotifConfig,
    population: E,
    detector: MotifDetector,
    input_history: BoundedHistory<InputRecord>,
    evolution: BoundedHistory<EvolutionEntry>,
    clock: Arc<dyn Clock>,
    rng: Box<dyn RandomSource>,
    /// Completed cycles
    cycle: u64,
}

impl MotifEngine<Funnels> {
    /// Wall clock and entropy-seeded randomness.
    pub fn new(config: MotifConfig) -> Result<Self> {
        config.validate()?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let population = Funnels::new(
            config.engine_params(),
            Arc::clone(&clock),
            Box::new(SeededRandom::from_entropy()),
        )?;
        Self::with_parts(config, population, clock, Box::new(SeededRandom::from_entropy()))
    }

    /// Reproducible engine: the same seed and clock readings replay the same cycles.
    pub fn with_seed(config: MotifConfig, clock: Arc<dyn Clock>, seed: u64) -> Result<Self> {
        config.validate()?;
        let population = Funnels::new(
            config.engine_params(),
            Arc::clone(&clock),
            Box::new(SeededRandom::new(seed)),
        )?;
        Self::with_parts(
            config,
            population,
            clock,
            Box::new(SeededRandom::new(seed.wrapping_add(1))),
        )
    }
}

impl<E: PopulationEngine> MotifEngine<E> {
    /// Assemble an engine around an existing population.
    pub fn with_parts(
        config: MotifConfig,
        population: E,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        config.validate()?;

        let engine = Self {
            detector: MotifDetector::new(config.plasticity_threshold, config.motif_ttl_ms),
            input_history: BoundedHistory::new(config.history_limit)?,
            evolution: BoundedHistory::new(config.evolution_limit)?,
            config,
            population,
            clock,
            rng,
            cycle: 0,
        };

        tracing::info!(
            "Motif engine ready: plasticity>{} stability>{} quality>{} ttl={}ms",
            engine.config.plasticity_threshold,
            engine.config.stability_threshold,
            engine.config.quality_threshold,
            engine.config.motif_ttl_ms
        );
        Ok(engine)
    }

    /// Run one full cycle on `input`.
    ///
    /// `external` is usually the previous cycle's framework state converted
    /// with [`ExternalState::from`], but any partial state is accepted.
    pub fn advance(
        &mut self,
        input: InputValue,
        external: Option<&ExternalState>,
        dt: f32,
    ) -> CycleResult {
        let group_id = format!("drv-{}", self.cycle);
        let discernment = discern(
            &input,
            external,
            &self.input_history,
            &mut self.population,
            self.rng.as_mut(),
            &group_id,
        );

        let now = self.clock.now_millis();
        self.input_history.push(InputRecord {
            input,
            state: external.copied(),
            timestamp: now,
        });

        let jitter = self.rng.next_unit();
        let feedback = synthesize_feedback(&discernment, jitter, now);

        let framework_state = refine(
            &mut self.population,
            &discernment,
            &feedback,
            external,
            dt,
            self.config.input_sensitivity,
        );

        self.evolution.push(EvolutionEntry {
            time: self.cycle,
            plasticity: framework_state.plasticity,
            quality: framework_state.quality,
            complexity: framework_state.framework.complexity,
        });
        self.cycle += 1;

        self.detector.scan(self.population.groups(), self.clock.now_millis());
        let active_motifs = self.active_motifs();

        tracing::debug!(
            "Cycle {}: {:?} judgment, plasticity={:.3} quality={:.3}, {} active of {} motifs",
            self.cycle,
            discernment.judgment.level,
            framework_state.plasticity,
            framework_state.quality,
            active_motifs.len(),
            self.detector.len()
        );

        CycleResult {
            discernment,
            framework_state,
            active_motifs,
            evolution: self.evolution.to_vec(),
        }
    }

    /// Motifs above the configured stability and quality thresholds.
    pub fn active_motifs(&self) -> Vec<Motif> {
        self.detector
            .active(self.config.stability_threshold, self.config.quality_threshold)
    }

    pub fn evolution_log(&self) -> Vec<EvolutionEntry> {
        self.evolution.to_vec()
    }

    pub fn system_summary(&self) -> SystemSummary {
        summarize(&self.active_motifs(), &self.evolution, self.cycle)
    }

    /// Every live motif, active or not.
    pub fn motifs(&self) -> &MotifDetector {
        &self.detector
    }

    pub fn input_history(&self) -> &BoundedHistory<InputRecord> {
        &self.input_history
    }

    pub fn population(&self) -> &E {
        &self.population
    }

    /// Direct access to the population between cycles.
    pub fn population_mut(&mut self) -> &mut E {
        &mut self.population
    }

    pub fn config(&self) -> &MotifConfig {
        &self.config
    }

    pub fn cycles(&self) -> u64 {
        self.cycle
    }
}
