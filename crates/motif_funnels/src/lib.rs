//! # Motif Funnels
//!
//! A population engine for the motif loop. Objects live in named groups
//! ("funnels") and carry an energy that drifts under:
//!
//! - **Regeneration** vs **gravity** and **friction**: the baseline drift
//! - **Oscillation**: a phase-driven swing whose speed scales with spiral tightness
//! - **Turbulence**: uniform noise
//! - **Bayesian influence**: a pull toward the population mean
//!
//! After each step, every object looks for its nearest neighbour (by energy)
//! within the interaction radius and records the encounter.

mod funnels;

pub use funnels::{Funnels, ENERGY_MAX, INTERACTION_HISTORY_LIMIT};
