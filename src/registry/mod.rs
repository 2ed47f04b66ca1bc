//! Registry data supplied by the game's content layer.
//!
//! The engine only parses what it consumes and indexes it by id. Referential
//! integrity (that an output's item exists, that a pool's task exists) is the
//! content layer's responsibility and is not checked here.

use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::combat::{Enemy, Weapon};
use crate::core::error::EngineError;
use crate::tasks::{Biome, TaskDefinition};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryFile {
    #[serde(default)]
    tasks: Vec<TaskDefinition>,
    #[serde(default)]
    biomes: Vec<Biome>,
    #[serde(default)]
    enemies: Vec<Enemy>,
    #[serde(default)]
    weapons: Vec<Weapon>,
}

/// Tasks, biomes, enemies and weapons indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tasks: BTreeMap<String, TaskDefinition>,
    biomes: BTreeMap<String, Biome>,
    enemies: BTreeMap<String, Enemy>,
    weapons: BTreeMap<String, Weapon>,
}

fn index_by_id<T>(
    table: &'static str,
    items: Vec<T>,
    id_of: impl Fn(&T) -> &str,
) -> Result<BTreeMap<String, T>, EngineError> {
    let mut indexed = BTreeMap::new();
    for item in items {
        let id = id_of(&item).to_string();
        if indexed.contains_key(&id) {
            return Err(EngineError::DuplicateId { table, id });
        }
        indexed.insert(id, item);
    }
    Ok(indexed)
}

impl Registry {
    /// Parses a registry document.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        let registry = Self {
            tasks: index_by_id("tasks", file.tasks, |task| task.id.as_str())?,
            biomes: index_by_id("biomes", file.biomes, |biome| biome.id.as_str())?,
            enemies: index_by_id("enemies", file.enemies, |enemy| enemy.id.as_str())?,
            weapons: index_by_id("weapons", file.weapons, |weapon| weapon.id.as_str())?,
        };
        info!(
            "registry loaded: {} tasks, {} biomes, {} enemies, {} weapons",
            registry.tasks.len(),
            registry.biomes.len(),
            registry.enemies.len(),
            registry.weapons.len()
        );
        Ok(registry)
    }

    /// Reads and parses a registry document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn task(&self, id: &str) -> Option<&TaskDefinition> {
        self.tasks.get(id)
    }

    pub fn biome(&self, id: &str) -> Option<&Biome> {
        self.biomes.get(id)
    }

    pub fn enemy(&self, id: &str) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    pub fn weapon(&self, id: &str) -> Option<&Weapon> {
        self.weapons.get(id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskDefinition> {
        self.tasks.values()
    }

    pub fn biomes(&self) -> impl Iterator<Item = &Biome> {
        self.biomes.values()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    pub fn weapons(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }
}
