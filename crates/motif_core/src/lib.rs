//! # Motif Core
//!
//! Shared foundation for the motif loop:
//!
//! - **Configuration**: [`MotifConfig`] with eager validation
//! - **Inputs**: [`InputValue`], a tagged union over caller values
//! - **Capabilities**: injectable [`Clock`] and [`RandomSource`]
//! - **Population contract**: [`PopulationEngine`] and its state surface
//! - **Cycle records**: [`Judgment`], [`Feedback`], [`FrameworkState`]
//! - **Utilities**: edit-distance similarity, numeric helpers, bounded history

pub mod capability;
pub mod config;
pub mod error;
pub mod framework;
pub mod history;
pub mod input;
pub mod numeric;
pub mod population;
pub mod similarity;

pub use capability::{Clock, ManualClock, RandomSource, SeededRandom, SequenceRandom, SystemClock};
pub use config::MotifConfig;
pub use error::{MotifError, Result};
pub use framework::{
    Discernment, ExternalFramework, ExternalState, Feedback, FrameworkState, FrameworkSummary,
    Judgment, JudgmentLevel, Nuance,
};
pub use history::BoundedHistory;
pub use input::InputValue;
pub use population::{
    EngineParams, GlobalState, Group, Interaction, ObjectKind, ObjectMetadata, ObjectSeed,
    ObjectState, PopulationEngine, StateDistribution, TrackedObject,
};
