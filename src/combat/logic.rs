//! Swing resolution: a hit roll followed, on a hit, by a damage roll.
//!
//! One swing draws in a fixed order: the hit deviate first, then (only when
//! the hit lands and the damage range is not degenerate) the damage deviate.
//! Style multiplier and defence mitigation draw nothing.

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::math::{compute_enemy_damage, compute_hero_damage, get_hero_attack_speed, roll_hit};
use super::types::{CombatType, Enemy, Pool, Weapon};

/// Everything about a hero that feeds the swing formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroLoadout {
    /// Selected combat style.
    pub style: CombatType,
    /// Level in the selected style's skill.
    pub attack_skill: u32,
    /// Defence level plus any armour bonus.
    pub defence_skill: u32,
    #[serde(default)]
    pub weapon: Option<Weapon>,
    #[serde(default)]
    pub damage_bonus: i32,
    /// Added to the attack interval; negative values attack faster.
    #[serde(default)]
    pub tick_speed_bonus: f64,
}

impl HeroLoadout {
    pub fn new(style: CombatType, attack_skill: u32, defence_skill: u32) -> Self {
        Self {
            style,
            attack_skill,
            defence_skill,
            weapon: None,
            damage_bonus: 0,
            tick_speed_bonus: 0.0,
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    /// True when the equipped weapon cannot be used with the selected style.
    pub fn is_mismatched(&self) -> bool {
        self.weapon
            .as_ref()
            .is_some_and(|weapon| !weapon.matches(self.style))
    }

    pub fn attack_speed_ms(&self) -> f64 {
        get_hero_attack_speed(self.attack_skill, self.tick_speed_bonus)
    }
}

/// Result of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwingOutcome {
    Miss,
    Hit { damage: u32 },
}

impl SwingOutcome {
    pub fn damage(self) -> u32 {
        match self {
            SwingOutcome::Miss => 0,
            SwingOutcome::Hit { damage } => damage,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, SwingOutcome::Hit { .. })
    }

    /// Applies the swing to `target`. Returns true if it emptied the pool.
    pub fn apply_to(self, target: &mut Pool) -> bool {
        if let SwingOutcome::Hit { damage } = self {
            target.apply_damage(damage);
            return target.is_empty();
        }
        false
    }
}

/// Hero attacks `enemy`: hit roll against the enemy's defence skill, then damage.
pub fn resolve_hero_swing(hero: &HeroLoadout, enemy: &Enemy, rng: &mut impl Rng) -> SwingOutcome {
    if !roll_hit(hero.attack_skill as i64, enemy.defence_skill as i64, rng) {
        trace!("hero misses {}", enemy.id);
        return SwingOutcome::Miss;
    }
    let damage = compute_hero_damage(
        hero.weapon.as_ref(),
        enemy,
        hero.damage_bonus,
        hero.style,
        rng,
    );
    trace!("hero hits {} for {}", enemy.id, damage);
    SwingOutcome::Hit { damage }
}

/// `enemy` attacks the hero: hit roll against the hero's defence skill, then damage.
pub fn resolve_enemy_swing(enemy: &Enemy, hero: &HeroLoadout, rng: &mut impl Rng) -> SwingOutcome {
    if !roll_hit(enemy.attack_skill as i64, hero.defence_skill as i64, rng) {
        trace!("{} misses", enemy.id);
        return SwingOutcome::Miss;
    }
    let damage = compute_enemy_damage(enemy, hero.defence_skill, hero.style, rng);
    trace!("{} hits hero for {}", enemy.id, damage);
    SwingOutcome::Hit { damage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn swordsman() -> HeroLoadout {
        HeroLoadout::new(CombatType::Melee, 10, 10).with_weapon(Weapon::new(4, 8, CombatType::Melee))
    }

    #[test]
    fn test_miss_draws_only_hit_roll() {
        let enemy = Enemy::new("rat", 10, 1, 3).with_skills(1, 10);
        // 50% hit chance, draw 0.9 misses.
        let mut rng = ScriptedRng::new(vec![0.9, 0.0]);
        assert_eq!(resolve_hero_swing(&swordsman(), &enemy, &mut rng), SwingOutcome::Miss);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_hit_draws_hit_then_damage() {
        let enemy = Enemy::new("rat", 10, 1, 3).with_skills(1, 10);
        // Hit on 0.1, damage draw 0.999 -> top of 4..=8.
        let mut rng = ScriptedRng::new(vec![0.1, 0.999]);
        let outcome = resolve_hero_swing(&swordsman(), &enemy, &mut rng);
        assert_eq!(outcome, SwingOutcome::Hit { damage: 7 });
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_enemy_swing_uses_hero_defence_and_style() {
        let hero = HeroLoadout::new(CombatType::Magic, 1, 0);
        // Ranged beats magic: 4 * 1.25 = 5.
        let archer = Enemy::new("archer", 10, 4, 4)
            .with_combat_type(CombatType::Ranged)
            .with_skills(20, 1);
        let mut rng = ScriptedRng::new(vec![0.0]);
        assert_eq!(
            resolve_enemy_swing(&archer, &hero, &mut rng),
            SwingOutcome::Hit { damage: 5 }
        );
        assert_eq!(rng.draws(), 1, "degenerate damage range must not draw");
    }

    #[test]
    fn test_apply_to_reports_kill() {
        let mut hp = Pool::new(5);
        assert!(!SwingOutcome::Miss.apply_to(&mut hp));
        assert!(!SwingOutcome::Hit { damage: 3 }.apply_to(&mut hp));
        assert!(SwingOutcome::Hit { damage: 3 }.apply_to(&mut hp));
        assert_eq!(hp.current, 0);
    }

    #[test]
    fn test_mismatch_detection() {
        let mut hero = swordsman();
        assert!(!hero.is_mismatched());
        hero.style = CombatType::Ranged;
        assert!(hero.is_mismatched());
        hero.weapon = None;
        assert!(!hero.is_mismatched());
    }

    #[test]
    fn test_loadout_attack_speed() {
        let mut hero = HeroLoadout::new(CombatType::Melee, 100, 1);
        assert!((hero.attack_speed_ms() - 2000.0).abs() < 1e-9);
        hero.tick_speed_bonus = -100.0;
        assert!((hero.attack_speed_ms() - 1900.0).abs() < 1e-9);
    }
}
