use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::balance::{DEFAULT_OUTPUT_CHANCE, DEFAULT_OUTPUT_QUANTITY};
use crate::core::error::EngineError;

/// What a task output grants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputTarget {
    Item(String),
    Currency(String),
}

impl OutputTarget {
    pub fn id(&self) -> &str {
        match self {
            OutputTarget::Item(id) | OutputTarget::Currency(id) => id,
        }
    }

    pub fn is_currency(&self) -> bool {
        matches!(self, OutputTarget::Currency(_))
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Item(id) => write!(f, "item:{id}"),
            OutputTarget::Currency(id) => write!(f, "currency:{id}"),
        }
    }
}

/// One possible output of a task: an independent `chance`% roll for `quantity` of `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskOutput", into = "RawTaskOutput")]
pub struct TaskOutput {
    pub target: OutputTarget,
    pub quantity: u32,
    pub chance: f64,
}

impl TaskOutput {
    pub fn item(id: impl Into<String>, quantity: u32, chance: f64) -> Self {
        Self {
            target: OutputTarget::Item(id.into()),
            quantity,
            chance,
        }
    }

    pub fn currency(id: impl Into<String>, quantity: u32, chance: f64) -> Self {
        Self {
            target: OutputTarget::Currency(id.into()),
            quantity,
            chance,
        }
    }
}

/// Registry shape: `{ "itemId" | "currencyId", "quantity", "chance" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaskOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency_id: Option<String>,
    #[serde(default = "default_quantity")]
    quantity: u32,
    #[serde(default = "default_chance")]
    chance: f64,
}

fn default_quantity() -> u32 {
    DEFAULT_OUTPUT_QUANTITY
}

fn default_chance() -> f64 {
    DEFAULT_OUTPUT_CHANCE
}

impl TryFrom<RawTaskOutput> for TaskOutput {
    type Error = EngineError;

    fn try_from(raw: RawTaskOutput) -> Result<Self, Self::Error> {
        let target = match (raw.item_id, raw.currency_id) {
            (Some(item), None) => OutputTarget::Item(item),
            (None, Some(currency)) => OutputTarget::Currency(currency),
            (Some(item), Some(currency)) => {
                return Err(EngineError::InvalidOutput(format!(
                    "output names both item '{item}' and currency '{currency}'"
                )))
            }
            (None, None) => {
                return Err(EngineError::InvalidOutput(
                    "output needs an itemId or a currencyId".to_string(),
                ))
            }
        };
        if raw.quantity == 0 {
            return Err(EngineError::InvalidOutput(format!(
                "output {target} has a quantity of 0"
            )));
        }
        Ok(Self {
            target,
            quantity: raw.quantity,
            chance: raw.chance,
        })
    }
}

impl From<TaskOutput> for RawTaskOutput {
    fn from(output: TaskOutput) -> Self {
        let (item_id, currency_id) = match output.target {
            OutputTarget::Item(id) => (Some(id), None),
            OutputTarget::Currency(id) => (None, Some(id)),
        };
        Self {
            item_id,
            currency_id,
            quantity: output.quantity,
            chance: output.chance,
        }
    }
}

/// How a task declares its outputs.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutputs {
    /// A single list, rolled every time.
    Fixed(Vec<TaskOutput>),
    /// One list per input variant. The variant is the id of the consumed input
    /// that carried `accept_tag` (e.g. which ore filled an `ore` slot).
    Keyed {
        accept_tag: String,
        by_key: BTreeMap<String, Vec<TaskOutput>>,
    },
}

impl Default for TaskOutputs {
    fn default() -> Self {
        TaskOutputs::Fixed(Vec::new())
    }
}

/// A task or crafting card as far as outcome rolling is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskDefinition", into = "RawTaskDefinition")]
pub struct TaskDefinition {
    pub id: String,
    pub name: String,
    pub outputs: TaskOutputs,
}

impl TaskDefinition {
    pub fn fixed(id: impl Into<String>, outputs: Vec<TaskOutput>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            outputs: TaskOutputs::Fixed(outputs),
        }
    }

    pub fn keyed(
        id: impl Into<String>,
        accept_tag: impl Into<String>,
        by_key: BTreeMap<String, Vec<TaskOutput>>,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            outputs: TaskOutputs::Keyed {
                accept_tag: accept_tag.into(),
                by_key,
            },
        }
    }
}

/// Registry shape: `outputs` list, or `acceptTag` + `outputMap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaskDefinition {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    outputs: Vec<TaskOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accept_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_map: Option<BTreeMap<String, Vec<TaskOutput>>>,
}

impl TryFrom<RawTaskDefinition> for TaskDefinition {
    type Error = EngineError;

    fn try_from(raw: RawTaskDefinition) -> Result<Self, Self::Error> {
        let outputs = match (raw.output_map, raw.accept_tag) {
            (None, _) => TaskOutputs::Fixed(raw.outputs),
            (Some(_), _) if !raw.outputs.is_empty() => {
                return Err(EngineError::InvalidOutput(format!(
                    "task '{}' declares both outputs and outputMap",
                    raw.id
                )))
            }
            (Some(by_key), Some(accept_tag)) => TaskOutputs::Keyed { accept_tag, by_key },
            (Some(_), None) => {
                return Err(EngineError::InvalidOutput(format!(
                    "task '{}' has an outputMap but no acceptTag",
                    raw.id
                )))
            }
        };
        Ok(Self {
            name: raw.name.unwrap_or_else(|| raw.id.clone()),
            id: raw.id,
            outputs,
        })
    }
}

impl From<TaskDefinition> for RawTaskDefinition {
    fn from(task: TaskDefinition) -> Self {
        let (outputs, accept_tag, output_map) = match task.outputs {
            TaskOutputs::Fixed(outputs) => (outputs, None, None),
            TaskOutputs::Keyed { accept_tag, by_key } => (Vec::new(), Some(accept_tag), Some(by_key)),
        };
        Self {
            id: task.id,
            name: Some(task.name),
            outputs,
            accept_tag,
            output_map,
        }
    }
}

/// An input actually consumed when a task cycle started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedInput {
    pub item_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ConsumedInput {
    pub fn new(item_id: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            item_id: item_id.into(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
