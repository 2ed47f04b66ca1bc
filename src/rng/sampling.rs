//! Uniform sampling operations built on a single unit-deviate draw.

use rand::Rng;

/// Draws one uniform deviate in [0, 1).
///
/// All other primitives are expressed through this draw, never `gen_range`,
/// so the number and order of draws per operation is fixed.
#[inline]
pub fn unit(rng: &mut impl Rng) -> f64 {
    rng.gen::<f64>()
}

/// Uniform integer in `[min, max]` inclusive.
///
/// A degenerate range (`min > max`) returns `min` without drawing. The span is
/// computed in `i128`, so the full `i64` range is valid.
pub fn random_int(min: i64, max: i64, rng: &mut impl Rng) -> i64 {
    if min > max {
        return min;
    }
    let span = (max as i128 - min as i128 + 1) as f64;
    let offset = (unit(rng) * span).floor() as i128;
    (min as i128 + offset).min(max as i128) as i64
}

/// Uniform float in `[min, max)`.
pub fn random_float(min: f64, max: f64, rng: &mut impl Rng) -> f64 {
    min + unit(rng) * (max - min)
}

/// Uniformly selects one element. Returns `None` for an empty slice (no draw).
pub fn random_choice<'a, T>(items: &'a [T], rng: &mut impl Rng) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = random_int(0, items.len() as i64 - 1, rng) as usize;
    items.get(index)
}

/// In-place Fisher-Yates shuffle, walking from the last index down to 1.
pub fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = random_int(0, i as i64, rng) as usize;
        items.swap(i, j);
    }
}

/// Sum of `count` dice with `sides` faces each.
///
/// `count == 0` yields 0. A zero-sided die is a degenerate range and always shows 1.
/// The total is accumulated in `u64` and cannot overflow.
pub fn roll_dice(sides: u32, count: u32, rng: &mut impl Rng) -> u64 {
    (0..count)
        .map(|_| random_int(1, sides as i64, rng) as u64)
        .sum()
}

/// Rolls a single six-sided die.
pub fn roll_d6(rng: &mut impl Rng) -> u32 {
    random_int(1, 6, rng) as u32
}

/// Percentage roll: true when a draw in [0, 100) is strictly below `percent_chance`.
///
/// Always consumes one draw, so `<= 0` fails and `>= 100` succeeds without
/// disturbing the draw sequence of whatever roll comes next.
pub fn roll_chance(percent_chance: f64, rng: &mut impl Rng) -> bool {
    unit(rng) * 100.0 < percent_chance
}
