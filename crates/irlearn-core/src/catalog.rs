//! Mode catalogs understood by the climate integration.
//!
//! Each catalog is a closed enumeration whose wire string is the key used in
//! the code document. Selections made by the operator are kept as ordered
//! `Vec`s of these variants, so the document follows selection order rather
//! than declaration order.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// HVAC operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
pub enum OperationMode {
    /// Unit powered off. Learned once as a flat command, never expanded.
    #[strum(serialize = "off")]
    Off,
    #[strum(serialize = "auto")]
    Auto,
    #[strum(serialize = "heat")]
    Heat,
    #[strum(serialize = "cool")]
    Cool,
    #[strum(serialize = "heat_cool")]
    HeatCool,
    #[strum(serialize = "fan_only")]
    FanOnly,
    #[strum(serialize = "dry")]
    Dry,
}

impl OperationMode {
    /// Operation modes an operator may pick. `off` is always learned and
    /// lives outside the expanded tree, so it is never offered.
    pub fn selectable() -> Vec<Self> {
        Self::iter().filter(|mode| *mode != Self::Off).collect()
    }
}

/// Preset mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
pub enum PresetMode {
    #[strum(serialize = "none")]
    None,
    #[strum(serialize = "eco")]
    Eco,
    #[strum(serialize = "turbo")]
    Turbo,
}

/// Fan speed. `Auto` plus up to ten discrete levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
pub enum FanMode {
    #[strum(serialize = "auto")]
    Auto,
    #[strum(serialize = "level1")]
    Level1,
    #[strum(serialize = "level2")]
    Level2,
    #[strum(serialize = "level3")]
    Level3,
    #[strum(serialize = "level4")]
    Level4,
    #[strum(serialize = "level5")]
    Level5,
    #[strum(serialize = "level6")]
    Level6,
    #[strum(serialize = "level7")]
    Level7,
    #[strum(serialize = "level8")]
    Level8,
    #[strum(serialize = "level9")]
    Level9,
    #[strum(serialize = "level10")]
    Level10,
}

/// Louver swing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
pub enum SwingMode {
    #[strum(serialize = "off")]
    Off,
    #[strum(serialize = "horizontal")]
    Horizontal,
    #[strum(serialize = "vertical")]
    Vertical,
    #[strum(serialize = "both")]
    Both,
}

/// Shared behaviour of the four catalogs, used by prompts and by the
/// non-interactive flag parser.
pub trait Catalog: Copy + Eq + std::fmt::Display + std::str::FromStr + AsRef<str> + 'static {
    /// Human-readable catalog name, e.g. "fan mode".
    const NAME: &'static str;

    /// Every variant in declaration order.
    fn all() -> Vec<Self>;

    /// Variants offered for selection.
    fn choices() -> Vec<Self> {
        Self::all()
    }
}

impl Catalog for OperationMode {
    const NAME: &'static str = "operation mode";

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    fn choices() -> Vec<Self> {
        Self::selectable()
    }
}

impl Catalog for PresetMode {
    const NAME: &'static str = "preset mode";

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl Catalog for FanMode {
    const NAME: &'static str = "fan mode";

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl Catalog for SwingMode {
    const NAME: &'static str = "swing mode";

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Serialize catalogs as their wire strings.
macro_rules! wire_string_serde {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.as_ref())
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let raw = String::deserialize(deserializer)?;
                    raw.parse().map_err(|_| {
                        de::Error::custom(format!(
                            "unknown {} '{}'",
                            <$ty as Catalog>::NAME,
                            raw
                        ))
                    })
                }
            }
        )+
    };
}

wire_string_serde!(OperationMode, PresetMode, FanMode, SwingMode);
