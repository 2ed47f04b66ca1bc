//! Simulation configuration.

use crate::combat::CombatType;

/// What the simulator should sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimMode {
    /// Hero vs enemy fights on a millisecond clock.
    Duel,
    /// Repeated resolution of one task's outputs.
    Drops,
    /// Repeated picks from one biome's task pool.
    Pool,
    /// Cumulative XP thresholds for every level.
    XpTable,
}

impl SimMode {
    fn parse(name: &str) -> Result<Self, String> {
        match name {
            "duel" => Ok(SimMode::Duel),
            "drops" => Ok(SimMode::Drops),
            "pool" => Ok(SimMode::Pool),
            "xp-table" => Ok(SimMode::XpTable),
            other => Err(format!(
                "unknown mode '{other}' (expected duel, drops, pool or xp-table)"
            )),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub mode: SimMode,

    /// Number of fights, task cycles or pool picks
    pub runs: u32,

    /// Random seed for reproducibility
    pub seed: u64,

    /// Registry document to load (None = bundled sample registry)
    pub registry_path: Option<String>,

    pub task_id: String,
    pub biome_id: String,
    pub enemy_id: String,

    /// Consumed input for keyed tasks, e.g. `iron_ore:ore`
    pub input: Option<(String, String)>,

    // Hero setup for duels
    pub style: CombatType,
    pub weapon_id: Option<String>,
    pub attack_skill: u32,
    pub defence_skill: u32,
    pub hero_hp: u32,
    pub food: u32,
    pub food_heal: u32,

    /// Only print the final summary line
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: SimMode::Duel,
            runs: 1000,
            seed: 42,
            registry_path: None,
            task_id: "forage".to_string(),
            biome_id: "forest".to_string(),
            enemy_id: "goblin".to_string(),
            input: None,
            style: CombatType::Melee,
            weapon_id: Some("bronze_sword".to_string()),
            attack_skill: 10,
            defence_skill: 10,
            hero_hp: 50,
            food: 5,
            food_heal: 12,
            quiet: false,
        }
    }
}

fn number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    value
        .ok_or_else(|| format!("{flag} requires a value"))?
        .parse()
        .map_err(|_| format!("{flag} requires a number"))
}

fn text(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("{flag} requires a value"))
}

impl SimConfig {
    /// Parses `--flag value` style arguments (without the program name).
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Option<Self>, String> {
        let mut config = SimConfig::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mode" => config.mode = SimMode::parse(&text(&arg, args.next())?)?,
                "--runs" => config.runs = number(&arg, args.next())?,
                "--seed" => config.seed = number(&arg, args.next())?,
                "--registry" => config.registry_path = Some(text(&arg, args.next())?),
                "--task" => config.task_id = text(&arg, args.next())?,
                "--biome" => config.biome_id = text(&arg, args.next())?,
                "--enemy" => config.enemy_id = text(&arg, args.next())?,
                "--input" => {
                    let raw = text(&arg, args.next())?;
                    let (item, tag) = raw
                        .split_once(':')
                        .ok_or_else(|| format!("--input expects ITEM:TAG, got '{raw}'"))?;
                    config.input = Some((item.to_string(), tag.to_string()));
                }
                "--style" => {
                    config.style = text(&arg, args.next())?
                        .parse::<CombatType>()
                        .map_err(|err| format!("--style: {err}"))?;
                }
                "--weapon" => {
                    let weapon = text(&arg, args.next())?;
                    config.weapon_id = (weapon != "none").then_some(weapon);
                }
                "--attack" => config.attack_skill = number(&arg, args.next())?,
                "--defence" => config.defence_skill = number(&arg, args.next())?,
                "--hp" => config.hero_hp = number(&arg, args.next())?,
                "--food" => config.food = number(&arg, args.next())?,
                "--food-heal" => config.food_heal = number(&arg, args.next())?,
                "--quiet" => config.quiet = true,
                "--help" | "-h" => return Ok(None),
                other => return Err(format!("Unknown argument: {other}")),
            }
        }

        if config.runs == 0 {
            return Err("--runs must be at least 1".to_string());
        }
        Ok(Some(config))
    }
}

pub const USAGE: &str = "Idle Engine Balance Simulator

Usage: simulator [OPTIONS]

Options:
  --mode MODE      duel | drops | pool | xp-table (default: duel)
  --runs N         Fights, task cycles or pool picks (default: 1000)
  --seed N         RNG seed (default: 42)
  --registry FILE  Registry JSON (default: bundled sample)
  --task ID        Task for drops mode (default: forage)
  --input ITEM:TAG Consumed input for keyed tasks, e.g. iron_ore:ore
  --biome ID       Biome for pool mode (default: forest)
  --enemy ID       Enemy for duel mode (default: goblin)
  --style STYLE    melee | ranged | magic (default: melee)
  --weapon ID      Weapon id, or 'none' (default: bronze_sword)
  --attack N       Hero attack skill (default: 10)
  --defence N      Hero defence skill (default: 10)
  --hp N           Hero max HP (default: 50)
  --food N         Food carried into each fight (default: 5)
  --food-heal N    HP restored per food (default: 12)
  --quiet          Only print the summary line
  --help, -h       Show this help";
