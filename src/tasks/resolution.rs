//! Task outcome rolling.
//!
//! Every declared output is an independent percentage roll: a single cycle can
//! award nothing, one output, or all of them. Keyed tasks first bind which
//! input variant was consumed, then roll that variant's list.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{ConsumedInput, OutputTarget, TaskDefinition, TaskOutput, TaskOutputs};
use crate::rng::roll_chance;

/// Something granted by a resolved task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Award {
    pub target: OutputTarget,
    pub quantity: u32,
}

/// Rolls each output once, in declaration order (one draw per entry).
pub fn roll_outputs(outputs: &[TaskOutput], rng: &mut impl Rng) -> Vec<Award> {
    outputs
        .iter()
        .filter(|output| roll_chance(output.chance, rng))
        .map(|output| Award {
            target: output.target.clone(),
            quantity: output.quantity,
        })
        .collect()
}

/// Id of the first consumed input carrying `accept_tag`.
pub fn bind_output_key<'a>(accept_tag: &str, consumed: &'a [ConsumedInput]) -> Option<&'a str> {
    consumed
        .iter()
        .find(|input| input.has_tag(accept_tag))
        .map(|input| input.item_id.as_str())
}

/// The output list that applies to this cycle, if any.
pub fn select_outputs<'a>(task: &'a TaskDefinition, consumed: &[ConsumedInput]) -> Option<&'a [TaskOutput]> {
    match &task.outputs {
        TaskOutputs::Fixed(outputs) => Some(outputs.as_slice()),
        TaskOutputs::Keyed { accept_tag, by_key } => {
            let Some(key) = bind_output_key(accept_tag, consumed) else {
                debug!("task {}: no consumed input tagged '{}'", task.id, accept_tag);
                return None;
            };
            let outputs = by_key.get(key).map(Vec::as_slice);
            if outputs.is_none() {
                debug!("task {}: no outputs mapped for '{}'", task.id, key);
            }
            outputs
        }
    }
}

/// Resolves one task cycle. Unmatched keyed tasks yield no awards and draw nothing.
pub fn resolve_task(task: &TaskDefinition, consumed: &[ConsumedInput], rng: &mut impl Rng) -> Vec<Award> {
    match select_outputs(task, consumed) {
        Some(outputs) => roll_outputs(outputs, rng),
        None => Vec::new(),
    }
}

/// Resolves `cycles` consecutive cycles with the same inputs and merges the awards.
pub fn resolve_task_cycles(
    task: &TaskDefinition,
    consumed: &[ConsumedInput],
    cycles: u32,
    rng: &mut impl Rng,
) -> Vec<Award> {
    let Some(outputs) = select_outputs(task, consumed) else {
        return Vec::new();
    };
    merge_awards((0..cycles).flat_map(|_| roll_outputs(outputs, rng)))
}

/// Sums quantities per target, keeping the order in which targets first appear.
pub fn merge_awards(awards: impl IntoIterator<Item = Award>) -> Vec<Award> {
    let mut merged: Vec<Award> = Vec::new();
    for award in awards {
        match merged.iter_mut().find(|existing| existing.target == award.target) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(award.quantity),
            None => merged.push(award),
        }
    }
    merged
}

/// Chance summary for display: one line per declared output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOdds {
    pub target: String,
    pub quantity: u32,
    /// Chance clamped to 0..=100 as it will actually resolve.
    pub percent: f64,
}

pub fn output_odds(outputs: &[TaskOutput]) -> Vec<OutputOdds> {
    outputs
        .iter()
        .map(|output| OutputOdds {
            target: output.target.to_string(),
            quantity: output.quantity,
            percent: output.chance.clamp(0.0, 100.0),
        })
        .collect()
}
