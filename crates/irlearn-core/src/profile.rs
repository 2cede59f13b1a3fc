//! Device profile: what the operator says the unit supports.

use std::collections::HashSet;
use std::hash::Hash;

use crate::catalog::{Catalog, FanMode, OperationMode, PresetMode, SwingMode};
use crate::error::ProfileError;
use crate::temperature::{ladder_len, Precision, Temperature, MAX_LADDER_LEN};

/// Controller written to `supportedController` unless overridden.
pub const DEFAULT_CONTROLLER: &str = "Broadlink";

/// Encoding written to `commandsEncoding` unless overridden.
pub const DEFAULT_ENCODING: &str = "Base64";

/// Who the document is for and how its commands are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub manufacturer: String,
    pub supported_models: Vec<String>,
    pub controller: String,
    pub encoding: String,
}

impl DeviceInfo {
    /// Device info using the default controller and encoding.
    pub fn new(manufacturer: impl Into<String>, supported_models: Vec<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            supported_models,
            controller: DEFAULT_CONTROLLER.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

/// Mode selections in the order the operator picked them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeSelection {
    pub operation_modes: Vec<OperationMode>,
    pub preset_modes: Vec<PresetMode>,
    pub fan_modes: Vec<FanMode>,
    pub swing_modes: Vec<SwingMode>,
}

/// A validated, immutable device profile.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    info: DeviceInfo,
    modes: ModeSelection,
    min_temperature: Temperature,
    max_temperature: Temperature,
    precision: Precision,
}

impl DeviceProfile {
    /// Validate and assemble a profile.
    ///
    /// Empty mode lists and `max < min` are accepted; they simply produce a
    /// document with no climate leaves. Bounds must have at most one decimal
    /// and span at most [`MAX_LADDER_LEN`] setpoints.
    pub fn new(
        info: DeviceInfo,
        modes: ModeSelection,
        min_temperature: Temperature,
        max_temperature: Temperature,
        precision: Precision,
    ) -> Result<Self, ProfileError> {
        if modes.operation_modes.contains(&OperationMode::Off) {
            return Err(ProfileError::OffNotSelectable);
        }
        ensure_unique(&modes.operation_modes)?;
        ensure_unique(&modes.preset_modes)?;
        ensure_unique(&modes.fan_modes)?;
        ensure_unique(&modes.swing_modes)?;

        if !min_temperature.is_finite() {
            return Err(ProfileError::NonFiniteTemperature { bound: "minimum" });
        }
        if !max_temperature.is_finite() {
            return Err(ProfileError::NonFiniteTemperature { bound: "maximum" });
        }
        for (bound, temperature) in [("minimum", min_temperature), ("maximum", max_temperature)] {
            if !temperature.is_tenths() {
                return Err(ProfileError::TemperatureTooPrecise {
                    bound,
                    value: temperature.value(),
                });
            }
        }
        if ladder_len(min_temperature, max_temperature, precision).is_none() {
            return Err(ProfileError::TemperatureRangeTooLarge {
                min: min_temperature,
                max: max_temperature,
                limit: MAX_LADDER_LEN,
            });
        }

        Ok(Self {
            info,
            modes,
            min_temperature,
            max_temperature,
            precision,
        })
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn modes(&self) -> &ModeSelection {
        &self.modes
    }

    pub fn min_temperature(&self) -> Temperature {
        self.min_temperature
    }

    pub fn max_temperature(&self) -> Temperature {
        self.max_temperature
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }
}

fn ensure_unique<T: Catalog + Hash>(modes: &[T]) -> Result<(), ProfileError> {
    let mut seen = HashSet::with_capacity(modes.len());
    for mode in modes {
        if !seen.insert(*mode) {
            return Err(ProfileError::DuplicateMode {
                kind: T::NAME,
                mode: mode.to_string(),
            });
        }
    }
    Ok(())
}
