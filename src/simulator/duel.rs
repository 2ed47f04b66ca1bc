//! Hero vs enemy fights on a millisecond clock.
//!
//! The hero swings every `attack_speed_ms`, the enemy every
//! `attack_interval_ms`; on a tie the hero swings first. After every enemy
//! swing the hero eats food while below the auto-consume threshold.

use log::debug;
use rand::Rng;

use crate::combat::{
    check_auto_consume, get_combat_xp_award, resolve_enemy_swing, resolve_hero_swing,
    CombatXpAward, CombatantStats, Enemy, HeroLoadout, Pool,
};
use crate::core::balance::MIN_ATTACK_SPEED_MS;

/// Fights longer than this are abandoned as stalemates.
pub const MAX_DUEL_DURATION_MS: f64 = 30.0 * 60.0 * 1000.0;

/// Hero side of a duel.
#[derive(Debug, Clone)]
pub struct DuelSetup {
    pub hero: HeroLoadout,
    pub hero_hp: u32,
    pub food: u32,
    pub food_heal: u32,
}

/// Outcome of a single fight.
#[derive(Debug, Clone, Default)]
pub struct DuelResult {
    pub hero_won: bool,
    pub timed_out: bool,
    pub duration_ms: f64,
    pub hero_swings: u32,
    pub hero_hits: u32,
    pub enemy_swings: u32,
    pub enemy_hits: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub food_eaten: u32,
    pub xp: Option<CombatXpAward>,
}

impl DuelResult {
    pub fn hero_hit_rate(&self) -> f64 {
        if self.hero_swings == 0 {
            0.0
        } else {
            self.hero_hits as f64 / self.hero_swings as f64
        }
    }
}

/// Runs one fight to the death (or the stalemate cap).
pub fn run_duel(setup: &DuelSetup, enemy: &Enemy, rng: &mut impl Rng) -> DuelResult {
    let mut result = DuelResult::default();
    let mut hero = CombatantStats {
        hp: Pool::new(setup.hero_hp),
        energy: Pool::new(0),
        defence_skill: setup.hero.defence_skill,
        combat_type: Some(setup.hero.style),
    };
    let mut foe = enemy.spawn();
    let mut food = setup.food;

    let hero_interval = setup.hero.attack_speed_ms();
    let enemy_interval = enemy.attack_interval_ms.max(MIN_ATTACK_SPEED_MS);
    let mut hero_next = hero_interval;
    let mut enemy_next = enemy_interval;

    while hero.is_alive() && foe.is_alive() {
        if hero_next <= enemy_next {
            result.duration_ms = hero_next;
            if result.duration_ms > MAX_DUEL_DURATION_MS {
                result.timed_out = true;
                break;
            }
            let outcome = resolve_hero_swing(&setup.hero, enemy, rng);
            result.hero_swings += 1;
            if outcome.is_hit() {
                result.hero_hits += 1;
                result.damage_dealt += outcome.damage() as u64;
            }
            outcome.apply_to(&mut foe.hp);
            hero_next += hero_interval;
        } else {
            result.duration_ms = enemy_next;
            if result.duration_ms > MAX_DUEL_DURATION_MS {
                result.timed_out = true;
                break;
            }
            let outcome = resolve_enemy_swing(enemy, &setup.hero, rng);
            result.enemy_swings += 1;
            if outcome.is_hit() {
                result.enemy_hits += 1;
                result.damage_taken += outcome.damage() as u64;
            }
            outcome.apply_to(&mut hero.hp);

            while hero.is_alive() && food > 0 && check_auto_consume(&hero).needs_food {
                food -= 1;
                result.food_eaten += 1;
                hero.hp.restore(setup.food_heal);
                if setup.food_heal == 0 {
                    break;
                }
            }
            enemy_next += enemy_interval;
        }
    }

    result.hero_won = !foe.is_alive();
    if result.hero_won {
        result.xp = Some(get_combat_xp_award(enemy, setup.hero.style));
    }
    debug!(
        "duel vs {}: won={} after {:.0}ms ({} swings, {} food)",
        enemy.id, result.hero_won, result.duration_ms, result.hero_swings, result.food_eaten
    );
    result
}
