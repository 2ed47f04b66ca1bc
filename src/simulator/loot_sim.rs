//! Drop and task-pool sampling against the real resolution code.

use rand::Rng;

use crate::tasks::{
    output_odds, resolve_task, select_outputs, Biome, ConsumedInput, OutputTarget, TaskDefinition,
};

/// Observed yield of one output target.
#[derive(Debug, Clone, PartialEq)]
pub struct DropLine {
    pub target: OutputTarget,
    /// Cycles in which this target was awarded at least once.
    pub times_awarded: u32,
    pub total_quantity: u64,
    /// Mean quantity per cycle implied by the declared chances.
    pub expected_per_cycle: f64,
}

impl DropLine {
    pub fn observed_per_cycle(&self, cycles: u32) -> f64 {
        if cycles == 0 {
            0.0
        } else {
            self.total_quantity as f64 / cycles as f64
        }
    }
}

/// Statistics about repeated cycles of one task.
#[derive(Debug, Clone, Default)]
pub struct DropStats {
    pub task_id: String,
    pub cycles: u32,
    /// Cycles that awarded nothing at all.
    pub empty_cycles: u32,
    /// One line per distinct target, in declaration order.
    pub lines: Vec<DropLine>,
}

impl DropStats {
    fn line_mut(&mut self, target: &OutputTarget) -> Option<&mut DropLine> {
        self.lines.iter_mut().find(|line| &line.target == target)
    }
}

/// Resolves `cycles` cycles of `task` and tallies what came out.
pub fn simulate_drops(
    task: &TaskDefinition,
    consumed: &[ConsumedInput],
    cycles: u32,
    rng: &mut impl Rng,
) -> DropStats {
    let mut stats = DropStats {
        task_id: task.id.clone(),
        cycles,
        ..DropStats::default()
    };

    let declared = select_outputs(task, consumed).unwrap_or(&[]);
    for (output, odds) in declared.iter().zip(output_odds(declared)) {
        let expected = output.quantity as f64 * odds.percent / 100.0;
        match stats.line_mut(&output.target) {
            Some(line) => line.expected_per_cycle += expected,
            None => stats.lines.push(DropLine {
                target: output.target.clone(),
                times_awarded: 0,
                total_quantity: 0,
                expected_per_cycle: expected,
            }),
        }
    }

    for _ in 0..cycles {
        let awards = resolve_task(task, consumed, rng);
        if awards.is_empty() {
            stats.empty_cycles += 1;
        }
        let mut seen: Vec<&OutputTarget> = Vec::new();
        for award in &awards {
            if let Some(line) = stats.line_mut(&award.target) {
                line.total_quantity += award.quantity as u64;
                if !seen.contains(&&award.target) {
                    line.times_awarded += 1;
                    seen.push(&award.target);
                }
            }
        }
    }

    stats
}

/// Observed frequency of one pool entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolLine {
    pub task_id: String,
    pub declared_percent: f64,
    pub picks: u32,
}

/// Statistics about repeated picks from a biome's task pool.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub biome_id: String,
    pub picks: u32,
    /// Picks that produced no task (empty or weightless pool).
    pub misses: u32,
    pub lines: Vec<PoolLine>,
}

impl PoolStats {
    pub fn observed_percent(&self, line: &PoolLine) -> f64 {
        if self.picks == 0 {
            0.0
        } else {
            line.picks as f64 / self.picks as f64 * 100.0
        }
    }

    /// Largest gap between observed and declared percentages.
    pub fn max_deviation(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| (self.observed_percent(line) - line.declared_percent).abs())
            .fold(0.0, f64::max)
    }
}

pub fn simulate_pool(biome: &Biome, picks: u32, rng: &mut impl Rng) -> PoolStats {
    let mut stats = PoolStats {
        biome_id: biome.id.clone(),
        picks,
        misses: 0,
        lines: biome
            .task_odds()
            .into_iter()
            .map(|odds| PoolLine {
                task_id: odds.task_id,
                declared_percent: odds.percent,
                picks: 0,
            })
            .collect(),
    };

    for _ in 0..picks {
        match biome.task_pool.choose_index(rng) {
            Some(index) => stats.lines[index].picks += 1,
            None => stats.misses += 1,
        }
    }

    stats
}
