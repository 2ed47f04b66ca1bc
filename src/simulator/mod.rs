//! Balance simulator for Monte Carlo analysis.
//!
//! Runs thousands of seeded samples through the real engine code to check:
//! - How long fights take and how often the hero wins
//! - How much a task actually yields per cycle
//! - Whether a biome's task pool matches its declared weights
//! - The XP needed for each level

mod config;
mod duel;
mod loot_sim;
mod report;
mod runner;

pub use config::{SimConfig, SimMode, USAGE};
pub use duel::{run_duel, DuelResult, DuelSetup, MAX_DUEL_DURATION_MS};
pub use loot_sim::{simulate_drops, simulate_pool, DropLine, DropStats, PoolLine, PoolStats};
pub use report::{DuelReport, SimReport};
pub use runner::{build_duel_setup, run_simulation};

/// Registry bundled with the simulator for quick experiments.
pub const SAMPLE_REGISTRY: &str = include_str!("../../data/sample_registry.json");
