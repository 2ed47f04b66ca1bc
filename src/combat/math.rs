//! Combat math shared by the engine and the simulator.
//!
//! These pure functions calculate combat outcomes without side effects.
//! Functions that take an `rng` document how many deviates they draw, because
//! a seeded replay depends on the exact draw order of a swing.

use rand::Rng;

use super::types::{CombatType, CombatantStats, Enemy, Pool, Weapon};
use crate::core::balance::*;
use crate::rng::unit;

/// Hit chance percent: `50 + 2 * (attacker - defender)`, clamped to 5..=95.
pub fn calculate_hit_chance(attacker_skill: i64, defender_skill: i64) -> i64 {
    let raw = BASE_HIT_CHANCE + HIT_CHANCE_PER_SKILL * (attacker_skill - defender_skill);
    raw.clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// Roll for a hit. Draws once: true when a draw in [0, 100) is below the hit chance.
pub fn roll_hit(attacker_skill: i64, defender_skill: i64, rng: &mut impl Rng) -> bool {
    let chance = calculate_hit_chance(attacker_skill, defender_skill);
    unit(rng) * 100.0 < chance as f64
}

/// Uniform damage in `[min, max]`.
///
/// A degenerate range (`min >= max`) returns `min` without drawing;
/// otherwise draws once.
pub fn roll_damage(min: u32, max: u32, rng: &mut impl Rng) -> u32 {
    if min >= max {
        return min;
    }
    let span = (max as u64 - min as u64 + 1) as f64;
    let offset = (unit(rng) * span).floor() as u64;
    (min as u64 + offset).min(max as u64) as u32
}

/// Fraction of incoming damage removed by defence: `min(skill * 0.5, 50) / 100`.
pub fn calculate_defence_reduction(defence_skill: u32) -> f64 {
    (defence_skill as f64 * DEFENCE_REDUCTION_PER_SKILL).min(MAX_DEFENCE_REDUCTION_PERCENT) / 100.0
}

/// Rock-paper-scissors damage multiplier for an attack.
///
/// 1.25 when the attacker's style beats the defender's, 0.75 for the reverse,
/// 1.0 for matching styles or when either side is unknown.
pub fn calculate_rps_multiplier(attacker: Option<CombatType>, defender: Option<CombatType>) -> f64 {
    match (attacker, defender) {
        (Some(attacker), Some(defender)) if attacker.beats() == defender => RPS_ADVANTAGE_MULTIPLIER,
        (Some(attacker), Some(defender)) if defender.beats() == attacker => {
            RPS_DISADVANTAGE_MULTIPLIER
        }
        _ => RPS_NEUTRAL_MULTIPLIER,
    }
}

/// Applies style multiplier and defence to a rolled base, floors, and enforces
/// the one-damage minimum.
fn mitigate(base: f64, rps_multiplier: f64, defence_skill: u32) -> u32 {
    let reduced = base * rps_multiplier * (1.0 - calculate_defence_reduction(defence_skill));
    let floored = reduced.floor();
    if floored < MIN_HIT_DAMAGE as f64 {
        MIN_HIT_DAMAGE
    } else {
        floored as u32
    }
}

/// Damage a hero deals to `enemy` with one landed hit.
///
/// Without a weapon, or with one whose required skill is not the selected
/// style, the hero fights unarmed (1..=2, no bonus). Draws at most once.
pub fn compute_hero_damage(
    weapon: Option<&Weapon>,
    enemy: &Enemy,
    damage_bonus: i32,
    selected_style: CombatType,
    rng: &mut impl Rng,
) -> u32 {
    let base = match weapon {
        Some(weapon) if weapon.matches(selected_style) => {
            roll_damage(weapon.min_damage, weapon.max_damage, rng) as f64 + damage_bonus as f64
        }
        _ => roll_damage(UNARMED_MIN_DAMAGE, UNARMED_MAX_DAMAGE, rng) as f64,
    };
    let rps = calculate_rps_multiplier(Some(selected_style), enemy.combat_type);
    mitigate(base, rps, enemy.defence_skill)
}

/// Damage `enemy` deals to a hero with one landed hit. Draws at most once.
pub fn compute_enemy_damage(
    enemy: &Enemy,
    effective_defence_skill: u32,
    hero_style: CombatType,
    rng: &mut impl Rng,
) -> u32 {
    let base = roll_damage(enemy.min_damage, enemy.max_damage, rng) as f64;
    let rps = calculate_rps_multiplier(enemy.combat_type, Some(hero_style));
    mitigate(base, rps, effective_defence_skill)
}

/// Hero attack interval in milliseconds.
///
/// `3000 / (1 + level * 0.005) + tick_speed_bonus`, never below 500ms.
/// The bonus is usually negative (faster attacks).
pub fn get_hero_attack_speed(skill_level: u32, tick_speed_bonus: f64) -> f64 {
    let speed = BASE_ATTACK_SPEED_MS / (1.0 + skill_level as f64 * ATTACK_SPEED_PER_LEVEL)
        + tick_speed_bonus;
    speed.max(MIN_ATTACK_SPEED_MS)
}

/// Which consumables a combatant should use right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoConsume {
    pub needs_food: bool,
    pub needs_drink: bool,
}

/// Flags food below 20% HP and drink below 20% energy, independently.
/// Pools with a max of zero never flag.
pub fn check_auto_consume(combatant: &CombatantStats) -> AutoConsume {
    let below = |pool: &Pool| pool.max > 0 && pool.ratio() < AUTO_CONSUME_THRESHOLD;
    AutoConsume {
        needs_food: below(&combatant.hp),
        needs_drink: below(&combatant.energy),
    }
}

/// Experience for defeating an enemy, credited to the attack style used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatXpAward {
    pub skill: CombatType,
    pub combat_xp: u32,
    pub defence_xp: u32,
}

/// Reads the enemy's declared award, defaulting to 10 combat / 5 defence XP.
pub fn get_combat_xp_award(enemy: &Enemy, attack_type: CombatType) -> CombatXpAward {
    let award = enemy.xp_awarded.unwrap_or_default();
    CombatXpAward {
        skill: attack_type,
        combat_xp: award.combat_xp,
        defence_xp: award.defence_xp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::{Pool, XpAward};
    use crate::rng::ScriptedRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn combatant(hp: (u32, u32), energy: (u32, u32)) -> CombatantStats {
        CombatantStats {
            hp: Pool::with_current(hp.0, hp.1),
            energy: Pool::with_current(energy.0, energy.1),
            defence_skill: 0,
            combat_type: None,
        }
    }

    #[test]
    fn test_hit_chance_linear_region() {
        assert_eq!(calculate_hit_chance(10, 10), 50);
        assert_eq!(calculate_hit_chance(20, 10), 70);
        assert_eq!(calculate_hit_chance(1, 11), 30);
    }

    #[test]
    fn test_hit_chance_clamped() {
        assert_eq!(calculate_hit_chance(99, 1), 95);
        assert_eq!(calculate_hit_chance(1, 99), 5);
        assert_eq!(calculate_hit_chance(-1000, 1000), 5);
        assert_eq!(calculate_hit_chance(1000, -1000), 95);
    }

    #[test]
    fn test_roll_hit_uses_strict_comparison() {
        // Even skills: 50% chance. A draw of exactly 0.5 misses.
        let mut rng = ScriptedRng::new(vec![0.5, 0.49]);
        assert!(!roll_hit(10, 10, &mut rng));
        assert!(roll_hit(10, 10, &mut rng));
    }

    #[test]
    fn test_roll_damage_degenerate_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(roll_damage(5, 5, &mut rng), 5);
        }
        assert_eq!(roll_damage(8, 3, &mut rng), 8);
    }

    #[test]
    fn test_roll_damage_degenerate_range_does_not_draw() {
        let mut rng = ScriptedRng::new(vec![0.9]);
        roll_damage(5, 5, &mut rng);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_roll_damage_inclusive_bounds() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.999_999]);
        assert_eq!(roll_damage(3, 7, &mut rng), 3);
        assert_eq!(roll_damage(3, 7, &mut rng), 7);
    }

    #[test]
    fn test_roll_damage_full_u32_range() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.9999999999999999]);
        assert_eq!(roll_damage(0, u32::MAX, &mut rng), 0);
        assert_eq!(roll_damage(0, u32::MAX, &mut rng), u32::MAX);
    }

    #[test]
    fn test_defence_reduction() {
        assert_eq!(calculate_defence_reduction(0), 0.0);
        assert_eq!(calculate_defence_reduction(40), 0.2);
        assert_eq!(calculate_defence_reduction(100), 0.5);
        assert_eq!(calculate_defence_reduction(120), 0.5);
    }

    #[test]
    fn test_rps_cycle() {
        use CombatType::*;
        assert_eq!(calculate_rps_multiplier(Some(Melee), Some(Ranged)), 1.25);
        assert_eq!(calculate_rps_multiplier(Some(Ranged), Some(Melee)), 0.75);
        assert_eq!(calculate_rps_multiplier(Some(Melee), Some(Magic)), 0.75);
        assert_eq!(calculate_rps_multiplier(Some(Magic), Some(Melee)), 1.25);
        assert_eq!(calculate_rps_multiplier(Some(Ranged), Some(Magic)), 1.25);
        assert_eq!(calculate_rps_multiplier(Some(Melee), Some(Melee)), 1.0);
    }

    #[test]
    fn test_rps_unknown_is_neutral() {
        assert_eq!(calculate_rps_multiplier(None, Some(CombatType::Magic)), 1.0);
        assert_eq!(calculate_rps_multiplier(Some(CombatType::Magic), None), 1.0);
        assert_eq!(calculate_rps_multiplier(None, None), 1.0);
    }

    #[test]
    fn test_hero_damage_with_advantage_and_defence() {
        // 10 * 1.25 * (1 - 0.2) = 10
        let sword = Weapon::new(10, 10, CombatType::Melee);
        let archer = Enemy::new("archer", 30, 1, 2)
            .with_combat_type(CombatType::Ranged)
            .with_skills(1, 40);
        let mut rng = ScriptedRng::new(vec![0.5]);
        assert_eq!(
            compute_hero_damage(Some(&sword), &archer, 0, CombatType::Melee, &mut rng),
            10
        );
    }

    #[test]
    fn test_hero_damage_adds_bonus_before_multipliers() {
        // (6 + 2) * 0.75 = 6
        let sword = Weapon::new(6, 6, CombatType::Melee);
        let mage = Enemy::new("mage", 30, 1, 2).with_combat_type(CombatType::Magic);
        let mut rng = ScriptedRng::new(vec![0.5]);
        assert_eq!(
            compute_hero_damage(Some(&sword), &mage, 2, CombatType::Melee, &mut rng),
            6
        );
    }

    #[test]
    fn test_weapon_mismatch_fights_unarmed_without_bonus() {
        let bow = Weapon::new(20, 30, CombatType::Ranged);
        let dummy = Enemy::new("dummy", 30, 1, 2).with_combat_type(CombatType::Melee);
        let mut rng = ScriptedRng::new(vec![0.99]);
        // Unarmed top roll is 2, neutral style, no defence.
        assert_eq!(
            compute_hero_damage(Some(&bow), &dummy, 50, CombatType::Melee, &mut rng),
            2
        );
        assert_eq!(compute_hero_damage(None, &dummy, 50, CombatType::Melee, &mut rng), 2);
    }

    #[test]
    fn test_hero_damage_minimum_one() {
        let stick = Weapon::new(0, 0, CombatType::Magic);
        let knight = Enemy::new("knight", 30, 1, 2)
            .with_combat_type(CombatType::Ranged)
            .with_skills(1, 200);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(
            compute_hero_damage(Some(&stick), &knight, -10, CombatType::Magic, &mut rng),
            1
        );
    }

    #[test]
    fn test_enemy_damage_uses_enemy_style_against_hero() {
        // Magic beats melee: 8 * 1.25 * (1 - 0.1) = 9
        let warlock = Enemy::new("warlock", 30, 8, 8).with_combat_type(CombatType::Magic);
        let mut rng = ScriptedRng::new(vec![0.0]);
        assert_eq!(compute_enemy_damage(&warlock, 20, CombatType::Melee, &mut rng), 9);
    }

    #[test]
    fn test_enemy_damage_minimum_one() {
        let mite = Enemy::new("mite", 1, 0, 1).with_combat_type(CombatType::Ranged);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..200 {
            assert!(compute_enemy_damage(&mite, 500, CombatType::Melee, &mut rng) >= 1);
        }
    }

    #[test]
    fn test_attack_speed_curve() {
        assert!((get_hero_attack_speed(1, 0.0) - 2985.07).abs() < 1.0);
        assert!((get_hero_attack_speed(10, 0.0) - 2857.14).abs() < 1.0);
        assert!((get_hero_attack_speed(100, 0.0) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_attack_speed_bonus_and_floor() {
        assert!((get_hero_attack_speed(100, -250.0) - 1750.0).abs() < 1e-9);
        assert_eq!(get_hero_attack_speed(99, -5000.0), MIN_ATTACK_SPEED_MS);
    }

    #[test]
    fn test_attack_speed_decreases_with_level() {
        for level in 1..99 {
            assert!(get_hero_attack_speed(level + 1, 0.0) < get_hero_attack_speed(level, 0.0));
        }
    }

    #[test]
    fn test_auto_consume_food_only() {
        let result = check_auto_consume(&combatant((10, 100), (80, 100)));
        assert_eq!(
            result,
            AutoConsume {
                needs_food: true,
                needs_drink: false
            }
        );
    }

    #[test]
    fn test_auto_consume_both_and_threshold() {
        let result = check_auto_consume(&combatant((19, 100), (0, 100)));
        assert!(result.needs_food && result.needs_drink);

        // Exactly 20% is not below the threshold.
        let result = check_auto_consume(&combatant((20, 100), (20, 100)));
        assert_eq!(result, AutoConsume::default());
    }

    #[test]
    fn test_auto_consume_ignores_empty_pools() {
        let result = check_auto_consume(&combatant((0, 0), (0, 0)));
        assert_eq!(result, AutoConsume::default());
    }

    #[test]
    fn test_xp_award_defaults_and_declared() {
        let rat = Enemy::new("rat", 5, 1, 1);
        let award = get_combat_xp_award(&rat, CombatType::Ranged);
        assert_eq!(award.skill, CombatType::Ranged);
        assert_eq!((award.combat_xp, award.defence_xp), (10, 5));

        let troll = Enemy::new("troll", 80, 4, 9).with_xp(XpAward {
            combat_xp: 120,
            defence_xp: 40,
        });
        let award = get_combat_xp_award(&troll, CombatType::Melee);
        assert_eq!((award.combat_xp, award.defence_xp), (120, 40));
    }
}
