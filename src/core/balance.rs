//! Shared balance constants used by the engine and the simulator.
//!
//! All core balance numbers are defined here.
//! Change once, test everywhere.

// =============================================================================
// LEVELING
// =============================================================================

/// Highest reachable level. Levels above this are clamped before lookup.
pub const MAX_LEVEL: u32 = 99;

/// Flat term added per level in the XP curve: floor(i + XP_CURVE_SCALE * 2^(i / XP_CURVE_DOUBLING)).
pub const XP_CURVE_SCALE: f64 = 300.0;

/// Levels it takes for the exponential part of the curve to double.
pub const XP_CURVE_DOUBLING: f64 = 7.0;

/// The summed curve terms are divided by this before flooring.
pub const XP_CURVE_DIVISOR: u64 = 4;

// =============================================================================
// HIT CHANCE
// =============================================================================

/// Hit chance percent when attacker and defender skills are equal.
pub const BASE_HIT_CHANCE: i64 = 50;

/// Hit chance percent gained per point of skill advantage.
pub const HIT_CHANCE_PER_SKILL: i64 = 2;

/// Hit chance can never drop below this percent.
pub const MIN_HIT_CHANCE: i64 = 5;

/// Hit chance can never exceed this percent.
pub const MAX_HIT_CHANCE: i64 = 95;

// =============================================================================
// DAMAGE
// =============================================================================

/// Damage reduction percent granted per point of defence skill.
pub const DEFENCE_REDUCTION_PER_SKILL: f64 = 0.5;

/// Defence reduction percent cap (50% = half damage at most).
pub const MAX_DEFENCE_REDUCTION_PERCENT: f64 = 50.0;

/// Damage range used when fighting without a usable weapon.
pub const UNARMED_MIN_DAMAGE: u32 = 1;
pub const UNARMED_MAX_DAMAGE: u32 = 2;

/// Every landed hit deals at least this much.
pub const MIN_HIT_DAMAGE: u32 = 1;

/// Multiplier when the attacker's combat type beats the defender's.
pub const RPS_ADVANTAGE_MULTIPLIER: f64 = 1.25;

/// Multiplier when the defender's combat type beats the attacker's.
pub const RPS_DISADVANTAGE_MULTIPLIER: f64 = 0.75;

/// Multiplier for matching or unknown combat types.
pub const RPS_NEUTRAL_MULTIPLIER: f64 = 1.0;

// =============================================================================
// ATTACK SPEED
// =============================================================================

/// Hero attack interval at skill level 0, in milliseconds.
pub const BASE_ATTACK_SPEED_MS: f64 = 3000.0;

/// Fractional speed-up per skill level.
pub const ATTACK_SPEED_PER_LEVEL: f64 = 0.005;

/// Attack interval floor in milliseconds.
pub const MIN_ATTACK_SPEED_MS: f64 = 500.0;

/// Attack interval for enemies that do not declare one, in milliseconds.
pub const DEFAULT_ENEMY_ATTACK_INTERVAL_MS: f64 = 2400.0;

// =============================================================================
// AUTO-CONSUME
// =============================================================================

/// Food/drink is consumed when the pool drops below this fraction of its max.
pub const AUTO_CONSUME_THRESHOLD: f64 = 0.20;

// =============================================================================
// COMBAT XP
// =============================================================================

/// Combat XP granted by enemies that declare no award.
pub const DEFAULT_COMBAT_XP: u32 = 10;

/// Defence XP granted by enemies that declare no award.
pub const DEFAULT_DEFENCE_XP: u32 = 5;

// =============================================================================
// TASKS
// =============================================================================

/// Chance percent assumed for task outputs that do not declare one.
pub const DEFAULT_OUTPUT_CHANCE: f64 = 100.0;

/// Quantity assumed for task outputs that do not declare one.
pub const DEFAULT_OUTPUT_QUANTITY: u32 = 1;
