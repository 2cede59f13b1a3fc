//! Temperatures, precision and the temperature ladder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A setpoint temperature.
///
/// Whole values render as integers (`16`), fractional ones keep a single
/// decimal (`16.5`). The rendered form is also the key used for the
/// temperature level of the code document.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f64);

impl Temperature {
    /// Negative zero is stored as zero so it renders as `0`.
    pub fn new(value: f64) -> Self {
        Self(if value == 0.0 { 0.0 } else { value })
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_whole(self) -> bool {
        self.0.fract() == 0.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// True when the value has at most one decimal, e.g. `16` or `16.5`.
    pub fn is_tenths(self) -> bool {
        ((self.0 * 10.0).round() / 10.0 - self.0).abs() < 1e-9
    }
}

impl From<f64> for Temperature {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Temperature {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}

impl FromStr for Temperature {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<f64>().map(Self::new)
    }
}

impl Serialize for Temperature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole values are written as JSON integers, not `16.0`.
        if self.is_whole() && self.0.abs() < i64::MAX as f64 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Temperature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::new)
    }
}

/// Temperature step between two adjacent setpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precision {
    /// 1.0 degree steps.
    #[default]
    Whole,
    /// 0.5 degree steps.
    Half,
}

impl Precision {
    /// Every supported precision, default first.
    pub const ALL: [Precision; 2] = [Precision::Whole, Precision::Half];

    pub fn step(self) -> f64 {
        match self {
            Precision::Whole => 1.0,
            Precision::Half => 0.5,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.step())
    }
}

/// Error returned when a precision other than 1.0 or 0.5 is requested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported precision '{0}' (expected 1.0 or 0.5)")]
pub struct ParsePrecisionError(pub String);

impl FromStr for Precision {
    type Err = ParsePrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" => Ok(Precision::Whole),
            "0.5" | ".5" => Ok(Precision::Half),
            other => Err(ParsePrecisionError(other.to_string())),
        }
    }
}

impl Serialize for Precision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.step())
    }
}

impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let step = f64::deserialize(deserializer)?;
        if step == 1.0 {
            Ok(Precision::Whole)
        } else if step == 0.5 {
            Ok(Precision::Half)
        } else {
            Err(serde::de::Error::custom(ParsePrecisionError(step.to_string())))
        }
    }
}

/// Longest ladder a profile may ask for. Real units span a few dozen setpoints.
pub const MAX_LADDER_LEN: usize = 201;

/// Number of setpoints from `min` to `max` inclusive, `precision` apart.
///
/// `Some(0)` when `max < min` or either bound is not finite, `None` when the
/// ladder would be longer than [`MAX_LADDER_LEN`].
pub fn ladder_len(min: Temperature, max: Temperature, precision: Precision) -> Option<usize> {
    let (min, max) = (min.value(), max.value());
    if !min.is_finite() || !max.is_finite() || max < min {
        return Some(0);
    }

    // Tolerate representation error in (max - min) / step, e.g. 16.1..16.6.
    let steps = ((max - min) / precision.step() + 1e-9).floor();
    if !steps.is_finite() || steps >= MAX_LADDER_LEN as f64 {
        return None;
    }
    Some(steps as usize + 1)
}

/// Every setpoint from `min` to `max` inclusive, `precision` apart.
///
/// Values are computed as `min + step * i` from an integer step count and
/// rounded to one decimal, so `max` is reached exactly instead of drifting
/// under repeated float addition. Returns an empty ladder when `max < min`,
/// either bound is not finite, or the ladder exceeds [`MAX_LADDER_LEN`].
pub fn temperature_ladder(min: Temperature, max: Temperature, precision: Precision) -> Vec<Temperature> {
    let len = ladder_len(min, max, precision).unwrap_or(0);
    let (min, step) = (min.value(), precision.step());

    (0..len)
        .map(|i| {
            let value = min + step * i as f64;
            Temperature::new((value * 10.0).round() / 10.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder(min: f64, max: f64, precision: Precision) -> Vec<String> {
        temperature_ladder(min.into(), max.into(), precision)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn whole_ladder_includes_both_ends() {
        let temps = ladder(16.0, 30.0, Precision::Whole);
        assert_eq!(temps.len(), 15);
        assert_eq!(temps.first().map(String::as_str), Some("16"));
        assert_eq!(temps.last().map(String::as_str), Some("30"));
        let expected: Vec<String> = (16..=30).map(|t| t.to_string()).collect();
        assert_eq!(temps, expected);
    }

    #[test]
    fn half_ladder_keeps_fractions() {
        assert_eq!(ladder(16.0, 17.0, Precision::Half), vec!["16", "16.5", "17"]);
    }

    #[test]
    fn ladder_is_deterministic() {
        let first = temperature_ladder(18.0.into(), 24.0.into(), Precision::Half);
        let second = temperature_ladder(18.0.into(), 24.0.into(), Precision::Half);
        assert_eq!(first, second);
        assert_eq!(first.len(), 13);
    }

    #[test]
    fn single_point_ladder() {
        assert_eq!(ladder(21.0, 21.0, Precision::Half), vec!["21"]);
    }

    #[test]
    fn inverted_bounds_yield_empty_ladder() {
        assert!(ladder(30.0, 16.0, Precision::Whole).is_empty());
    }

    #[test]
    fn max_not_on_step_is_not_overshot() {
        assert_eq!(ladder(16.0, 17.7, Precision::Half), vec!["16", "16.5", "17", "17.5"]);
    }

    #[test]
    fn fractional_start_does_not_drift() {
        assert_eq!(ladder(16.1, 17.1, Precision::Half), vec!["16.1", "16.6", "17.1"]);
    }

    #[test]
    fn whole_temperatures_render_as_integers() {
        assert_eq!(Temperature::new(16.0).to_string(), "16");
        assert_eq!(Temperature::new(16.5).to_string(), "16.5");
        assert_eq!(Temperature::new(-2.0).to_string(), "-2");
    }

    #[test]
    fn oversized_ladder_is_refused_without_allocating() {
        assert_eq!(ladder_len(0.0.into(), 1e300.into(), Precision::Whole), None);
        assert!(temperature_ladder(0.0.into(), 1e300.into(), Precision::Whole).is_empty());
        assert_eq!(ladder_len(0.0.into(), 1e9.into(), Precision::Half), None);
    }

    #[test]
    fn ladder_len_limits() {
        assert_eq!(ladder_len(16.0.into(), 30.0.into(), Precision::Whole), Some(15));
        assert_eq!(ladder_len(0.0.into(), 200.0.into(), Precision::Whole), Some(MAX_LADDER_LEN));
        assert_eq!(ladder_len(0.0.into(), 201.0.into(), Precision::Whole), None);
        assert_eq!(ladder_len(30.0.into(), 16.0.into(), Precision::Whole), Some(0));
    }

    #[test]
    fn negative_zero_renders_and_serializes_as_zero() {
        for temperature in [Temperature::new(-0.0), Temperature::from(-0.0), "-0".parse().unwrap()] {
            assert_eq!(temperature.to_string(), "0");
            assert_eq!(serde_json::to_string(&temperature).unwrap(), "0");
        }
        assert_eq!(ladder(-0.5, 0.5, Precision::Half), vec!["-0.5", "0", "0.5"]);
    }

    #[test]
    fn tenths_detection() {
        assert!(Temperature::new(16.0).is_tenths());
        assert!(Temperature::new(16.1).is_tenths());
        assert!(Temperature::new(-3.5).is_tenths());
        assert!(!Temperature::new(16.25).is_tenths());
        assert!(!Temperature::new(16.05).is_tenths());
    }

    #[test]
    fn whole_temperatures_serialize_as_integers() {
        assert_eq!(serde_json::to_string(&Temperature::new(16.0)).unwrap(), "16");
        assert_eq!(serde_json::to_string(&Temperature::new(16.5)).unwrap(), "16.5");
    }

    #[test]
    fn precision_parses_offered_choices() {
        assert_eq!("1.0".parse::<Precision>(), Ok(Precision::Whole));
        assert_eq!("1".parse::<Precision>(), Ok(Precision::Whole));
        assert_eq!(" 0.5 ".parse::<Precision>(), Ok(Precision::Half));
        assert!("0.1".parse::<Precision>().is_err());
    }

    #[test]
    fn precision_serializes_as_float() {
        assert_eq!(serde_json::to_string(&Precision::Whole).unwrap(), "1.0");
        assert_eq!(serde_json::to_string(&Precision::Half).unwrap(), "0.5");
        assert_eq!(serde_json::from_str::<Precision>("0.5").unwrap(), Precision::Half);
        assert!(serde_json::from_str::<Precision>("0.25").is_err());
    }
}
