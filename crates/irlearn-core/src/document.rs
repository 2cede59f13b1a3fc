//! The code document handed to the climate integration.
//!
//! Layout of `commands`:
//!
//! ```text
//! commands
//! ├── off                                  (flat slot)
//! └── <operation>
//!     └── <preset>
//!         └── <fan>
//!             └── <swing>
//!                 └── "<temperature>"      (slot)
//! ```
//!
//! Every level is an [`OrderedMap`] so keys serialize in the order they were
//! inserted, which is the order the operator selected them. Slots are
//! created once by the builder and only ever filled afterwards.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::catalog::{FanMode, OperationMode, PresetMode, SwingMode};
use crate::error::DocumentError;
use crate::temperature::{Precision, Temperature};

/// Learned command, opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandToken(String);

impl CommandToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for CommandToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// A command slot. Serializes as `""` until filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot(Option<CommandToken>);

impl Slot {
    pub fn token(&self) -> Option<&CommandToken> {
        self.0.as_ref()
    }

    pub fn is_filled(&self) -> bool {
        self.0.is_some()
    }

    fn fill(&mut self, token: CommandToken) {
        self.0 = Some(token);
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_ref().map_or("", CommandToken::as_str))
    }
}

/// Insertion-ordered map, serialized as a JSON object keyed by `Display`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: PartialEq, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the end, or replace the value of an existing key in place.
    pub fn insert(&mut self, key: K, value: V) {
        match self.get_mut(&key) {
            Some(existing) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: fmt::Display, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

pub type TemperatureSlots = OrderedMap<Temperature, Slot>;
pub type SwingTree = OrderedMap<SwingMode, TemperatureSlots>;
pub type FanTree = OrderedMap<FanMode, SwingTree>;
pub type PresetTree = OrderedMap<PresetMode, FanTree>;
pub type OperationTree = OrderedMap<OperationMode, PresetTree>;

/// Full address of a climate slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandKey {
    pub operation: OperationMode,
    pub preset: PresetMode,
    pub fan: FanMode,
    pub swing: SwingMode,
    pub temperature: Temperature,
}

/// One slot of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Leaf {
    /// The flat `commands.off` slot.
    Off,
    /// A slot of the expanded tree.
    Climate(CommandKey),
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Off => f.write_str("OFF"),
            Leaf::Climate(key) => write!(
                f,
                "O = {} P = {} F = {} S = {}  {}°",
                key.operation.as_ref().to_uppercase(),
                key.preset.as_ref().to_uppercase(),
                key.fan.as_ref().to_uppercase(),
                key.swing.as_ref().to_uppercase(),
                key.temperature
            ),
        }
    }
}

/// The `commands` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Commands {
    off: Slot,
    tree: OperationTree,
}

impl Commands {
    pub(crate) fn new(tree: OperationTree) -> Self {
        Self {
            off: Slot::default(),
            tree,
        }
    }

    pub fn off(&self) -> &Slot {
        &self.off
    }

    pub fn tree(&self) -> &OperationTree {
        &self.tree
    }

    fn slot(&self, key: &CommandKey) -> Option<&Slot> {
        self.tree
            .get(&key.operation)?
            .get(&key.preset)?
            .get(&key.fan)?
            .get(&key.swing)?
            .get(&key.temperature)
    }

    fn slot_mut(&mut self, key: &CommandKey) -> Option<&mut Slot> {
        self.tree
            .get_mut(&key.operation)?
            .get_mut(&key.preset)?
            .get_mut(&key.fan)?
            .get_mut(&key.swing)?
            .get_mut(&key.temperature)
    }
}

impl Serialize for Commands {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tree.len() + 1))?;
        map.serialize_entry("off", &self.off)?;
        for (operation, presets) in self.tree.iter() {
            map.serialize_entry(operation.as_ref(), presets)?;
        }
        map.end()
    }
}

/// The complete code document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDocument {
    pub(crate) manufacturer: String,
    pub(crate) supported_models: Vec<String>,
    pub(crate) supported_controller: String,
    pub(crate) commands_encoding: String,
    pub(crate) min_temperature: Temperature,
    pub(crate) max_temperature: Temperature,
    pub(crate) precision: Precision,
    pub(crate) operation_modes: Vec<OperationMode>,
    pub(crate) preset_modes: Vec<PresetMode>,
    pub(crate) fan_modes: Vec<FanMode>,
    pub(crate) swing_modes: Vec<SwingMode>,
    pub(crate) commands: Commands,
}

impl OutputDocument {
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn commands(&self) -> &Commands {
        &self.commands
    }

    /// Every slot in learning order: `off` first, then the tree depth-first.
    pub fn leaves(&self) -> Vec<Leaf> {
        let mut leaves = Vec::with_capacity(self.leaf_count());
        leaves.push(Leaf::Off);
        for (operation, presets) in self.commands.tree.iter() {
            for (preset, fans) in presets.iter() {
                for (fan, swings) in fans.iter() {
                    for (swing, temperatures) in swings.iter() {
                        for temperature in temperatures.keys() {
                            leaves.push(Leaf::Climate(CommandKey {
                                operation: *operation,
                                preset: *preset,
                                fan: *fan,
                                swing: *swing,
                                temperature: *temperature,
                            }));
                        }
                    }
                }
            }
        }
        leaves
    }

    /// Number of slots, including `off`.
    pub fn leaf_count(&self) -> usize {
        1 + self
            .commands
            .tree
            .iter()
            .flat_map(|(_, presets)| presets.iter())
            .flat_map(|(_, fans)| fans.iter())
            .flat_map(|(_, swings)| swings.iter())
            .map(|(_, temperatures)| temperatures.len())
            .sum::<usize>()
    }

    /// Number of slots already holding a command.
    pub fn filled_count(&self) -> usize {
        usize::from(self.commands.off.is_filled())
            + self
                .commands
                .tree
                .iter()
                .flat_map(|(_, presets)| presets.iter())
                .flat_map(|(_, fans)| fans.iter())
                .flat_map(|(_, swings)| swings.iter())
                .flat_map(|(_, temperatures)| temperatures.iter())
                .filter(|(_, slot)| slot.is_filled())
                .count()
    }

    pub fn get(&self, leaf: &Leaf) -> Option<&Slot> {
        match leaf {
            Leaf::Off => Some(&self.commands.off),
            Leaf::Climate(key) => self.commands.slot(key),
        }
    }

    /// Fill one slot. Never adds keys: an address the builder did not
    /// create is rejected.
    pub fn set(&mut self, leaf: &Leaf, token: CommandToken) -> Result<(), DocumentError> {
        let slot = match leaf {
            Leaf::Off => Some(&mut self.commands.off),
            Leaf::Climate(key) => self.commands.slot_mut(key),
        };
        slot.ok_or(DocumentError::UnknownLeaf(*leaf))?.fill(token);
        Ok(())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
