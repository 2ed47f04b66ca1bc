//! Combat system types, formulas and swing resolution.

pub mod logic;
pub mod math;
pub mod types;

pub use logic::*;
pub use math::*;
pub use types::*;
