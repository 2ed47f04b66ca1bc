//! Experience curve and level progress.

pub mod leveling;

pub use leveling::*;
