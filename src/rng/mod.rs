//! Random sampling primitives.
//!
//! Every operation draws unit deviates in [0,1) from an injected `rand::Rng`,
//! one `f64` per deviate, so a seeded generator replays resolutions exactly.

pub mod sampling;
pub mod scripted;
pub mod weighted;

pub use sampling::*;
pub use scripted::ScriptedRng;
pub use weighted::*;
