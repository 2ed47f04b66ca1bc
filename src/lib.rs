//! Idle Engine - progression and encounter resolution for an idle RPG.
//!
//! Pure, stateless formulas that turn randomness and hero/enemy statistics into
//! game outcomes: experience curves, weighted sampling, combat hit and damage
//! resolution, and task/drop rolling. Every random operation takes an injected
//! `rng: &mut impl Rng` so resolutions replay exactly under a seeded generator.

pub mod combat;
pub mod core;
pub mod progression;
pub mod registry;
pub mod rng;
pub mod simulator;
pub mod tasks;

pub use crate::core::error::EngineError;
