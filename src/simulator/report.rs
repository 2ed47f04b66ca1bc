//! Simulation report generation.

use super::duel::DuelResult;
use super::loot_sim::{DropStats, PoolStats};
use crate::core::balance::MAX_LEVEL;
use crate::progression::xp_for_level;

/// Aggregated results from many duels against one enemy.
#[derive(Debug, Clone, Default)]
pub struct DuelReport {
    pub enemy_id: String,
    pub fights: u32,
    pub wins: u32,
    pub timeouts: u32,
    pub avg_duration_ms: f64,
    pub avg_hero_swings: f64,
    pub hero_hit_rate: f64,
    pub enemy_hit_rate: f64,
    pub avg_damage_dealt: f64,
    pub avg_damage_taken: f64,
    pub avg_food_eaten: f64,
    pub total_combat_xp: u64,
    pub total_defence_xp: u64,
}

impl DuelReport {
    pub fn from_results(enemy_id: impl Into<String>, results: &[DuelResult]) -> Self {
        let fights = results.len() as u32;
        let per_fight = |total: f64| total / fights.max(1) as f64;
        let rate = |hits: u32, swings: u32| {
            if swings == 0 {
                0.0
            } else {
                hits as f64 / swings as f64
            }
        };

        let hero_swings: u32 = results.iter().map(|r| r.hero_swings).sum();
        let hero_hits = results.iter().map(|r| r.hero_hits).sum();
        let enemy_swings = results.iter().map(|r| r.enemy_swings).sum();
        let enemy_hits = results.iter().map(|r| r.enemy_hits).sum();

        Self {
            enemy_id: enemy_id.into(),
            fights,
            wins: results.iter().filter(|r| r.hero_won).count() as u32,
            timeouts: results.iter().filter(|r| r.timed_out).count() as u32,
            avg_duration_ms: per_fight(results.iter().map(|r| r.duration_ms).sum()),
            avg_hero_swings: per_fight(hero_swings as f64),
            hero_hit_rate: rate(hero_hits, hero_swings),
            enemy_hit_rate: rate(enemy_hits, enemy_swings),
            avg_damage_dealt: per_fight(results.iter().map(|r| r.damage_dealt as f64).sum()),
            avg_damage_taken: per_fight(results.iter().map(|r| r.damage_taken as f64).sum()),
            avg_food_eaten: per_fight(results.iter().map(|r| r.food_eaten as f64).sum()),
            total_combat_xp: results
                .iter()
                .filter_map(|r| r.xp)
                .map(|xp| xp.combat_xp as u64)
                .sum(),
            total_defence_xp: results
                .iter()
                .filter_map(|r| r.xp)
                .map(|xp| xp.defence_xp as u64)
                .sum(),
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.fights == 0 {
            0.0
        } else {
            self.wins as f64 / self.fights as f64
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "vs {}: {} fights, {:.1}% won, {:.1}s avg, {:.1} food avg, {} timeouts",
            self.enemy_id,
            self.fights,
            self.win_rate() * 100.0,
            self.avg_duration_ms / 1000.0,
            self.avg_food_eaten,
            self.timeouts
        )
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Duel Report: {} ===\n\n", self.enemy_id));
        report.push_str(&format!("  Fights:          {}\n", self.fights));
        report.push_str(&format!(
            "  Win Rate:        {:.1}% ({} won, {} timed out)\n",
            self.win_rate() * 100.0,
            self.wins,
            self.timeouts
        ));
        report.push_str(&format!(
            "  Avg Duration:    {:.1}s\n",
            self.avg_duration_ms / 1000.0
        ));
        report.push_str(&format!("  Avg Swings:      {:.1}\n", self.avg_hero_swings));
        report.push_str(&format!(
            "  Hit Rate:        hero {:.1}%, enemy {:.1}%\n",
            self.hero_hit_rate * 100.0,
            self.enemy_hit_rate * 100.0
        ));
        report.push_str(&format!(
            "  Avg Damage:      dealt {:.1}, taken {:.1}\n",
            self.avg_damage_dealt, self.avg_damage_taken
        ));
        report.push_str(&format!("  Avg Food Eaten:  {:.2}\n", self.avg_food_eaten));
        report.push_str(&format!(
            "  XP Earned:       {} combat, {} defence\n",
            self.total_combat_xp, self.total_defence_xp
        ));
        report
    }
}

fn drops_text(stats: &DropStats) -> String {
    let mut report = format!(
        "=== Drop Report: {} ({} cycles) ===\n\n",
        stats.task_id, stats.cycles
    );
    if stats.lines.is_empty() {
        report.push_str("  No outputs apply to this task with the given input.\n");
        return report;
    }
    report.push_str("  Target                    Awarded   Total   Per cycle (expected)\n");
    for line in &stats.lines {
        report.push_str(&format!(
            "  {:<24} {:>7.1}% {:>7} {:>8.3} ({:.3})\n",
            line.target.to_string(),
            line.times_awarded as f64 / stats.cycles.max(1) as f64 * 100.0,
            line.total_quantity,
            line.observed_per_cycle(stats.cycles),
            line.expected_per_cycle
        ));
    }
    report.push_str(&format!("\n  Empty cycles: {}\n", stats.empty_cycles));
    report
}

fn pool_text(stats: &PoolStats) -> String {
    let mut report = format!(
        "=== Task Pool Report: {} ({} picks) ===\n\n",
        stats.biome_id, stats.picks
    );
    for line in &stats.lines {
        let observed = stats.observed_percent(line);
        let bar = "#".repeat((observed / 2.0).round() as usize);
        report.push_str(&format!(
            "  {:<20} {:>6.2}% (declared {:>6.2}%) {}\n",
            line.task_id, observed, line.declared_percent, bar
        ));
    }
    if stats.misses > 0 {
        report.push_str(&format!("  No task picked: {}\n", stats.misses));
    }
    report
}

fn xp_table_text() -> String {
    let mut report = String::from("=== XP Table ===\n\n  Level   Total XP   To next\n");
    for level in 1..=MAX_LEVEL {
        let total = xp_for_level(level);
        let to_next = if level < MAX_LEVEL {
            (xp_for_level(level + 1) - total).to_string()
        } else {
            "-".to_string()
        };
        report.push_str(&format!("  {level:>5} {total:>10} {to_next:>9}\n"));
    }
    report
}

/// Result of one simulator invocation.
#[derive(Debug, Clone)]
pub enum SimReport {
    Duel(DuelReport),
    Drops(DropStats),
    Pool(PoolStats),
    XpTable,
}

impl SimReport {
    pub fn summary_line(&self) -> String {
        match self {
            SimReport::Duel(report) => report.summary_line(),
            SimReport::Drops(stats) => format!(
                "{}: {} cycles, {} targets, {} empty",
                stats.task_id,
                stats.cycles,
                stats.lines.len(),
                stats.empty_cycles
            ),
            SimReport::Pool(stats) => format!(
                "{}: {} picks, max deviation {:.2} points",
                stats.biome_id,
                stats.picks,
                stats.max_deviation()
            ),
            SimReport::XpTable => format!(
                "level {} at {} xp",
                MAX_LEVEL,
                xp_for_level(MAX_LEVEL)
            ),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            SimReport::Duel(report) => report.to_text(),
            SimReport::Drops(stats) => drops_text(stats),
            SimReport::Pool(stats) => pool_text(stats),
            SimReport::XpTable => xp_table_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatType, CombatXpAward};

    fn won(duration_ms: f64, food: u32) -> DuelResult {
        DuelResult {
            hero_won: true,
            duration_ms,
            hero_swings: 4,
            hero_hits: 3,
            enemy_swings: 2,
            enemy_hits: 1,
            damage_dealt: 20,
            damage_taken: 4,
            food_eaten: food,
            xp: Some(CombatXpAward {
                skill: CombatType::Melee,
                combat_xp: 10,
                defence_xp: 5,
            }),
            ..DuelResult::default()
        }
    }

    #[test]
    fn test_duel_report_aggregates() {
        let lost = DuelResult {
            timed_out: true,
            duration_ms: 6000.0,
            ..DuelResult::default()
        };
        let report = DuelReport::from_results("goblin", &[won(2000.0, 1), won(4000.0, 0), lost]);

        assert_eq!(report.fights, 3);
        assert_eq!(report.wins, 2);
        assert_eq!(report.timeouts, 1);
        assert!((report.win_rate() - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.avg_duration_ms - 4000.0).abs() < 1e-9);
        assert!((report.hero_hit_rate - 0.75).abs() < 1e-12);
        assert!((report.avg_hero_swings - 8.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.total_combat_xp, 20);
        assert_eq!(report.total_defence_xp, 10);
        assert!(report.summary_line().contains("66.7% won"));
    }

    #[test]
    fn test_empty_report_is_zeroed() {
        let report = DuelReport::from_results("nobody", &[]);
        assert_eq!(report.win_rate(), 0.0);
        assert_eq!(report.avg_duration_ms, 0.0);
        assert_eq!(report.hero_hit_rate, 0.0);
    }

    #[test]
    fn test_xp_table_lists_every_level() {
        let text = SimReport::XpTable.to_text();
        assert_eq!(text.lines().filter(|l| l.trim_start().starts_with("99 ")).count(), 1);
        assert!(text.contains("13034431"));
        assert!(SimReport::XpTable.summary_line().contains("13034431"));
    }
}
