use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::balance::{DEFAULT_COMBAT_XP, DEFAULT_DEFENCE_XP, DEFAULT_ENEMY_ATTACK_INTERVAL_MS};
use crate::core::error::EngineError;

/// Combat style. Each style beats exactly one other:
/// melee beats ranged, ranged beats magic, magic beats melee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatType {
    Melee,
    Ranged,
    Magic,
}

impl CombatType {
    pub const ALL: [CombatType; 3] = [CombatType::Melee, CombatType::Ranged, CombatType::Magic];

    /// The style this one is strong against.
    pub fn beats(self) -> CombatType {
        match self {
            CombatType::Melee => CombatType::Ranged,
            CombatType::Ranged => CombatType::Magic,
            CombatType::Magic => CombatType::Melee,
        }
    }

    /// The style this one is weak against.
    pub fn beaten_by(self) -> CombatType {
        match self {
            CombatType::Melee => CombatType::Magic,
            CombatType::Ranged => CombatType::Melee,
            CombatType::Magic => CombatType::Ranged,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CombatType::Melee => "melee",
            CombatType::Ranged => "ranged",
            CombatType::Magic => "magic",
        }
    }
}

impl fmt::Display for CombatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombatType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "melee" => Ok(CombatType::Melee),
            "ranged" => Ok(CombatType::Ranged),
            "magic" => Ok(CombatType::Magic),
            _ => Err(EngineError::UnknownCombatType(s.to_string())),
        }
    }
}

/// Reads an optional combat type, mapping unknown names to `None`.
///
/// Unknown styles fight at the neutral multiplier instead of rejecting the record.
pub fn lenient_combat_type<'de, D>(deserializer: D) -> Result<Option<CombatType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|name| match name.parse() {
        Ok(combat_type) => Some(combat_type),
        Err(err) => {
            debug!("treating combat type as neutral: {err}");
            None
        }
    }))
}

/// A current/max resource such as hit points or energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub current: u32,
    pub max: u32,
}

impl Pool {
    /// A full pool.
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn with_current(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    /// Fill fraction. A pool with `max == 0` reports 0.
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f64 / self.max as f64
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Removes `amount`, stopping at zero. Returns what is left.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    /// Adds `amount`, stopping at `max`. Returns how much was actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }
}

/// Weapon stats relevant to damage rolls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: String,
    pub min_damage: u32,
    pub max_damage: u32,
    /// Combat style the weapon is used with. Any other style fights unarmed.
    pub skill_required: CombatType,
}

impl Weapon {
    pub fn new(min_damage: u32, max_damage: u32, skill_required: CombatType) -> Self {
        Self {
            id: String::new(),
            min_damage,
            max_damage,
            skill_required,
        }
    }

    /// Whether the weapon can be used with `style`.
    pub fn matches(&self, style: CombatType) -> bool {
        self.skill_required == style
    }
}

/// Experience an enemy grants when defeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpAward {
    #[serde(default = "default_combat_xp")]
    pub combat_xp: u32,
    #[serde(default = "default_defence_xp")]
    pub defence_xp: u32,
}

fn default_combat_xp() -> u32 {
    DEFAULT_COMBAT_XP
}

fn default_defence_xp() -> u32 {
    DEFAULT_DEFENCE_XP
}

impl Default for XpAward {
    fn default() -> Self {
        Self {
            combat_xp: DEFAULT_COMBAT_XP,
            defence_xp: DEFAULT_DEFENCE_XP,
        }
    }
}

/// Hit points, energy and defensive profile of anything that can be attacked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantStats {
    pub hp: Pool,
    pub energy: Pool,
    #[serde(default)]
    pub defence_skill: u32,
    #[serde(default, deserialize_with = "lenient_combat_type")]
    pub combat_type: Option<CombatType>,
}

impl CombatantStats {
    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }
}

/// Enemy definition as supplied by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub max_hp: u32,
    #[serde(default = "default_skill")]
    pub attack_skill: u32,
    #[serde(default)]
    pub defence_skill: u32,
    pub min_damage: u32,
    pub max_damage: u32,
    #[serde(default, deserialize_with = "lenient_combat_type")]
    pub combat_type: Option<CombatType>,
    #[serde(default)]
    pub xp_awarded: Option<XpAward>,
    #[serde(default = "default_attack_interval")]
    pub attack_interval_ms: f64,
}

fn default_skill() -> u32 {
    1
}

fn default_attack_interval() -> f64 {
    DEFAULT_ENEMY_ATTACK_INTERVAL_MS
}

impl Enemy {
    pub fn new(id: impl Into<String>, max_hp: u32, min_damage: u32, max_damage: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            max_hp,
            attack_skill: default_skill(),
            defence_skill: 0,
            min_damage,
            max_damage,
            combat_type: None,
            xp_awarded: None,
            attack_interval_ms: DEFAULT_ENEMY_ATTACK_INTERVAL_MS,
        }
    }

    pub fn with_combat_type(mut self, combat_type: CombatType) -> Self {
        self.combat_type = Some(combat_type);
        self
    }

    pub fn with_skills(mut self, attack_skill: u32, defence_skill: u32) -> Self {
        self.attack_skill = attack_skill;
        self.defence_skill = defence_skill;
        self
    }

    pub fn with_xp(mut self, award: XpAward) -> Self {
        self.xp_awarded = Some(award);
        self
    }

    /// Fresh combatant stats for a new encounter. Enemies do not use energy.
    pub fn spawn(&self) -> CombatantStats {
        CombatantStats {
            hp: Pool::new(self.max_hp),
            energy: Pool::new(0),
            defence_skill: self.defence_skill,
            combat_type: self.combat_type,
        }
    }
}
