//! Error type for the data-loading surface of the engine.
//!
//! The formula core never fails: degenerate inputs resolve to documented
//! fallbacks (`Option::None`, the range minimum). Only parsing and registry
//! loading return `Result<_, EngineError>`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed registry data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid task output: {0}")]
    InvalidOutput(String),

    #[error("unknown combat type '{0}' (expected melee, ranged or magic)")]
    UnknownCombatType(String),

    #[error("duplicate {table} id '{id}'")]
    DuplicateId { table: &'static str, id: String },

    #[error("no {table} with id '{id}'")]
    UnknownId { table: &'static str, id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = EngineError::UnknownCombatType("sling".to_string());
        assert!(err.to_string().contains("sling"));

        let err = EngineError::DuplicateId {
            table: "tasks",
            id: "chop_oak".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate tasks id 'chop_oak'");
    }

    #[test]
    fn test_json_errors_convert() {
        let parse: Result<u32, serde_json::Error> = serde_json::from_str("not json");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::Json(_)));
    }
}
