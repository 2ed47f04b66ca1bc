//! Shared balance numbers and the crate error type.

pub mod balance;
pub mod error;

pub use balance::*;
pub use error::EngineError;
