//! Dispatches a configured simulation against a loaded registry.

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::{SimConfig, SimMode};
use super::duel::{run_duel, DuelSetup};
use super::loot_sim::{simulate_drops, simulate_pool};
use super::report::{DuelReport, SimReport};
use crate::combat::HeroLoadout;
use crate::core::error::EngineError;
use crate::registry::Registry;
use crate::tasks::ConsumedInput;

fn unknown(table: &'static str, id: &str) -> EngineError {
    EngineError::UnknownId {
        table,
        id: id.to_string(),
    }
}

/// Builds the hero side of a duel from the config and registry weapons.
pub fn build_duel_setup(config: &SimConfig, registry: &Registry) -> Result<DuelSetup, EngineError> {
    let mut hero = HeroLoadout::new(config.style, config.attack_skill, config.defence_skill);
    if let Some(weapon_id) = &config.weapon_id {
        let weapon = registry
            .weapon(weapon_id)
            .ok_or_else(|| unknown("weapon", weapon_id))?;
        hero = hero.with_weapon(weapon.clone());
    }
    Ok(DuelSetup {
        hero,
        hero_hp: config.hero_hp,
        food: config.food,
        food_heal: config.food_heal,
    })
}

/// Runs the simulation and returns a report. One seeded RNG drives the whole run.
pub fn run_simulation(config: &SimConfig, registry: &Registry) -> Result<SimReport, EngineError> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    info!("simulating {:?} x{} (seed {})", config.mode, config.runs, config.seed);

    let report = match config.mode {
        SimMode::Duel => {
            let enemy = registry
                .enemy(&config.enemy_id)
                .ok_or_else(|| unknown("enemy", &config.enemy_id))?;
            let setup = build_duel_setup(config, registry)?;
            if setup.hero.is_mismatched() {
                info!("weapon does not match {} style, fighting unarmed", setup.hero.style);
            }
            let results: Vec<_> = (0..config.runs)
                .map(|_| run_duel(&setup, enemy, &mut rng))
                .collect();
            SimReport::Duel(DuelReport::from_results(&enemy.id, &results))
        }
        SimMode::Drops => {
            let task = registry
                .task(&config.task_id)
                .ok_or_else(|| unknown("task", &config.task_id))?;
            let consumed: Vec<ConsumedInput> = config
                .input
                .iter()
                .map(|(item, tag)| ConsumedInput::new(item.as_str(), &[tag.as_str()]))
                .collect();
            SimReport::Drops(simulate_drops(task, &consumed, config.runs, &mut rng))
        }
        SimMode::Pool => {
            let biome = registry
                .biome(&config.biome_id)
                .ok_or_else(|| unknown("biome", &config.biome_id))?;
            SimReport::Pool(simulate_pool(biome, config.runs, &mut rng))
        }
        SimMode::XpTable => SimReport::XpTable,
    };

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::SAMPLE_REGISTRY;

    fn registry() -> Registry {
        Registry::from_json_str(SAMPLE_REGISTRY).unwrap()
    }

    fn config(mode: SimMode) -> SimConfig {
        SimConfig {
            mode,
            runs: 200,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_duel_against_sample_goblin() {
        let report = run_simulation(&config(SimMode::Duel), &registry()).unwrap();
        let SimReport::Duel(duel) = report else {
            panic!("expected a duel report");
        };
        assert_eq!(duel.enemy_id, "goblin");
        assert_eq!(duel.fights, 200);
        assert!(duel.wins > 0);
    }

    #[test]
    fn test_same_seed_same_report() {
        let a = run_simulation(&config(SimMode::Duel), &registry()).unwrap();
        let b = run_simulation(&config(SimMode::Duel), &registry()).unwrap();
        assert_eq!(a.summary_line(), b.summary_line());
    }

    #[test]
    fn test_keyed_drops_need_input() {
        let mut cfg = config(SimMode::Drops);
        cfg.task_id = "smelt_bar".to_string();

        let SimReport::Drops(stats) = run_simulation(&cfg, &registry()).unwrap() else {
            panic!("expected a drop report");
        };
        assert!(stats.lines.is_empty());
        assert_eq!(stats.empty_cycles, 200);

        cfg.input = Some(("copper_ore".to_string(), "ore".to_string()));
        let SimReport::Drops(stats) = run_simulation(&cfg, &registry()).unwrap() else {
            panic!("expected a drop report");
        };
        assert_eq!(stats.lines[0].target.id(), "copper_bar");
        assert_eq!(stats.lines[0].total_quantity, 200);
    }

    #[test]
    fn test_unknown_ids_are_reported() {
        let mut cfg = config(SimMode::Duel);
        cfg.enemy_id = "dragon".to_string();
        let err = run_simulation(&cfg, &registry()).unwrap_err();
        assert_eq!(err.to_string(), "no enemy with id 'dragon'");

        let mut cfg = config(SimMode::Duel);
        cfg.weapon_id = Some("excalibur".to_string());
        assert!(matches!(
            run_simulation(&cfg, &registry()),
            Err(EngineError::UnknownId { table: "weapon", .. })
        ));

        let mut cfg = config(SimMode::Pool);
        cfg.biome_id = "desert".to_string();
        assert!(run_simulation(&cfg, &registry()).is_err());
    }

    #[test]
    fn test_unarmed_when_weapon_omitted() {
        let mut cfg = config(SimMode::Duel);
        cfg.weapon_id = None;
        let setup = build_duel_setup(&cfg, &registry()).unwrap();
        assert!(setup.hero.weapon.is_none());
    }
}
