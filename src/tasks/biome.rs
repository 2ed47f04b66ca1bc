//! Biome task pools: which task an area surfaces next.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rng::WeightedTable;

/// An explorable area with a weighted pool of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBiome", into = "RawBiome")]
pub struct Biome {
    pub id: String,
    pub name: String,
    pub task_pool: WeightedTable<String>,
}

/// Registry shape: `{ "id", "name", "taskPool": [{ "taskId", "weight" }] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBiome {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    task_pool: Vec<RawPoolEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPoolEntry {
    task_id: String,
    weight: f64,
}

impl From<RawBiome> for Biome {
    fn from(raw: RawBiome) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| raw.id.clone()),
            id: raw.id,
            task_pool: raw
                .task_pool
                .into_iter()
                .map(|entry| (entry.task_id, entry.weight))
                .collect(),
        }
    }
}

impl From<Biome> for RawBiome {
    fn from(biome: Biome) -> Self {
        Self {
            id: biome.id,
            name: Some(biome.name),
            task_pool: biome
                .task_pool
                .iter()
                .map(|entry| RawPoolEntry {
                    task_id: entry.item.clone(),
                    weight: entry.weight,
                })
                .collect(),
        }
    }
}

/// Display odds for one pool entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOdds {
    pub task_id: String,
    pub weight: f64,
    /// `weight / total_weight * 100`; 0 for a pool with no positive weight.
    pub percent: f64,
}

impl Biome {
    pub fn new(id: impl Into<String>, task_pool: WeightedTable<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            task_pool,
        }
    }

    /// Picks exactly one task id, or `None` if the pool is empty or weightless.
    pub fn pick_task(&self, rng: &mut impl Rng) -> Option<&str> {
        self.task_pool.choose(rng).map(String::as_str)
    }

    /// Percentage chance of each task, in pool order.
    pub fn task_odds(&self) -> Vec<TaskOdds> {
        self.task_pool
            .iter()
            .enumerate()
            .map(|(index, entry)| TaskOdds {
                task_id: entry.item.clone(),
                weight: entry.weight,
                percent: self.task_pool.share_of(index).unwrap_or(0.0) * 100.0,
            })
            .collect()
    }
}
