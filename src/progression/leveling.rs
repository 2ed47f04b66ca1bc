//! Experience-to-level curve.
//!
//! Cumulative XP for level L is `floor(sum(floor(i + 300 * 2^(i/7))) / 4)` for
//! i in 1..L. Each term is floored before summing and the quotient is floored
//! after; reordering the floors changes the table.

use crate::core::balance::{MAX_LEVEL, XP_CURVE_DIVISOR, XP_CURVE_DOUBLING, XP_CURVE_SCALE};
use serde::{Deserialize, Serialize};

/// Floored curve term contributed by level `i`.
fn curve_term(i: u32) -> u64 {
    let i = i as f64;
    (i + XP_CURVE_SCALE * 2f64.powf(i / XP_CURVE_DOUBLING)).floor() as u64
}

/// Cumulative XP needed to reach `level`. Level 1 (and below) needs 0;
/// levels above `MAX_LEVEL` are clamped.
pub fn xp_for_level(level: u32) -> u64 {
    if level <= 1 {
        return 0;
    }
    let level = level.min(MAX_LEVEL);
    let sum: u64 = (1..level).map(curve_term).sum();
    sum / XP_CURVE_DIVISOR
}

/// Where a total XP value sits on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpProgress {
    pub level: u32,
    /// Fraction of the way from `current_level_xp` to `next_level_xp` (0..1).
    /// Always 0.0 at `MAX_LEVEL`.
    pub progress: f64,
    pub current_level_xp: u64,
    /// `None` at `MAX_LEVEL`: there is no further threshold.
    pub next_level_xp: Option<u64>,
}

impl XpProgress {
    pub fn is_max_level(&self) -> bool {
        self.next_level_xp.is_none()
    }
}

/// Finds the level for `xp` and how far it is into that level.
///
/// Thresholds are accumulated in a single pass rather than recomputing
/// `xp_for_level` for every candidate level.
pub fn get_xp_progress(xp: u64) -> XpProgress {
    let mut sum = 0u64;
    let mut current_level_xp = 0u64;

    for level in 1..MAX_LEVEL {
        sum += curve_term(level);
        let next_level_xp = sum / XP_CURVE_DIVISOR;
        if xp < next_level_xp {
            let span = (next_level_xp - current_level_xp) as f64;
            return XpProgress {
                level,
                progress: (xp - current_level_xp) as f64 / span,
                current_level_xp,
                next_level_xp: Some(next_level_xp),
            };
        }
        current_level_xp = next_level_xp;
    }

    XpProgress {
        level: MAX_LEVEL,
        progress: 0.0,
        current_level_xp,
        next_level_xp: None,
    }
}

/// Level reached with `xp` total experience.
pub fn level_for_xp(xp: u64) -> u32 {
    get_xp_progress(xp).level
}

/// XP still needed to reach the next level, `None` at `MAX_LEVEL`.
pub fn xp_to_next_level(xp: u64) -> Option<u64> {
    get_xp_progress(xp).next_level_xp.map(|next| next - xp)
}

/// Result of adding experience to a running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    pub total_xp: u64,
}

impl LevelUp {
    pub fn levels_gained(&self) -> u32 {
        self.new_level - self.old_level
    }
}

/// Adds `gained` to `current_xp` (saturating) and reports levels crossed.
pub fn apply_xp(current_xp: u64, gained: u64) -> LevelUp {
    let total_xp = current_xp.saturating_add(gained);
    LevelUp {
        old_level: level_for_xp(current_xp),
        new_level: level_for_xp(total_xp),
        total_xp,
    }
}

/// A skill level, always in `1..=MAX_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct SkillLevel(u32);

impl SkillLevel {
    pub const MIN: SkillLevel = SkillLevel(1);

    /// Clamps `level` into `1..=MAX_LEVEL`.
    pub fn new(level: u32) -> Self {
        Self(level.clamp(1, MAX_LEVEL))
    }

    pub fn from_xp(xp: u64) -> Self {
        Self(level_for_xp(xp))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<u32> for SkillLevel {
    fn from(level: u32) -> Self {
        Self::new(level)
    }
}

impl From<SkillLevel> for u32 {
    fn from(level: SkillLevel) -> Self {
        level.0
    }
}
