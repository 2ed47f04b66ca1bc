//! Task outputs, keyed output maps and biome task pools.

pub mod biome;
pub mod resolution;
pub mod types;

pub use biome::*;
pub use resolution::*;
pub use types::*;
