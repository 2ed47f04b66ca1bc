//! Idle Engine Balance Simulator
//!
//! Samples the real combat, drop and task-pool code with a seeded RNG and
//! prints aggregate statistics for balance tuning.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulator                                   # 1000 goblin duels
//!   cargo run --bin simulator -- --mode pool --runs 100000      # forest task pool
//!   cargo run --bin simulator -- --mode drops --task smelt_bar --input iron_ore:ore
//!   RUST_LOG=debug cargo run --bin simulator -- --runs 5        # per-fight logging

use idle_engine::registry::Registry;
use idle_engine::simulator::{run_simulation, SimConfig, SAMPLE_REGISTRY, USAGE};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let config = match SimConfig::from_args(std::env::args().skip(1)) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let registry = match &config.registry_path {
        Some(path) => Registry::load(path),
        None => Registry::from_json_str(SAMPLE_REGISTRY),
    };
    let registry = match registry {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("failed to load registry: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run_simulation(&config, &registry) {
        Ok(report) => {
            if config.quiet {
                println!("{}", report.summary_line());
            } else {
                println!("{}", report.to_text());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("simulation failed: {err}");
            ExitCode::FAILURE
        }
    }
}
