//! # Motif Engine
//!
//! An online scoring loop over a population of simulated objects. Each
//! cycle takes one caller input and:
//!
//! 1. **Discerns** it: scores complexity and novelty, seeds an object, judges it
//! 2. **Synthesizes feedback** for that judgment
//! 3. **Refines** the population: tunes its parameters, steps it, scores it
//! 4. **Logs** the framework's evolution
//! 5. **Detects motifs**: objects settled into stable, high-energy loops
//!
//! ```no_run
//! use motif_engine::{MotifConfig, MotifEngine};
//!
//! let mut engine = MotifEngine::new(MotifConfig::default())?;
//! let result = engine.advance(serde_json::json!({"topic": "tea"}).into(), None, 1.0);
//! println!("{} active motifs", result.active_motifs.len());
//! # Ok::<(), motif_engine::MotifError>(())
//! ```

pub mod complexity;
pub mod detector;
pub mod discernment;
pub mod evolution;
pub mod feedback;
pub mod novelty;
pub mod refinement;
pub mod system;

pub use detector::{Motif, MotifDetector, MotifKey, MotifType, StateSample};
pub use evolution::{EvolutionEntry, SystemSummary};
pub use novelty::InputRecord;
pub use system::{CycleResult, MotifEngine};

pub use motif_core::{ExternalState, FrameworkState, InputValue, MotifConfig, MotifError};
