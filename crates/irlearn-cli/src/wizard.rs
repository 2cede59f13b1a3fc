//! Interactive collection of the device profile.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use irlearn_core::{
    Catalog, DeviceInfo, DeviceProfile, FanMode, ModeSelection, OperationMode, Precision, PresetMode,
    SwingMode, Temperature,
};
use tracing::debug;

use crate::prompt::Terminal;

/// Fill in manufacturer and models that were not given on the command line.
pub fn ask_device_info<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    manufacturer: Option<String>,
    models: Vec<String>,
) -> io::Result<(String, Vec<String>)> {
    let manufacturer = match manufacturer {
        Some(manufacturer) => manufacturer,
        None => terminal.ask_non_empty("Manufacturer: ")?,
    };

    let models = if models.is_empty() {
        terminal
            .ask("Supported models (comma separated, empty for none): ")?
            .split(',')
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .map(String::from)
            .collect()
    } else {
        models
    };

    Ok((manufacturer, models))
}

/// Ask for the supported modes, temperature range and precision.
///
/// Prompts in this order: operation, preset, fan and swing modes, minimum
/// and maximum temperature, precision. The maximum is asked again while it
/// is below the minimum.
pub fn ask_profile<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    info: DeviceInfo,
) -> Result<DeviceProfile> {
    let modes = ModeSelection {
        operation_modes: terminal
            .multi_select("Select Operation Modes", &OperationMode::choices())?,
        preset_modes: terminal.multi_select("Select Preset Modes", &PresetMode::choices())?,
        fan_modes: terminal.multi_select(
            "Select Fan Modes (Number of speeds supported)",
            &FanMode::choices(),
        )?,
        swing_modes: terminal.multi_select("Select Fan Swing Modes", &SwingMode::choices())?,
    };

    let min = terminal.number("Enter the Minimum Temperature: ")?;
    let max = loop {
        let max = terminal.number("Enter the Maximum Temperature: ")?;
        if max >= min {
            break max;
        }
        terminal.say(format_args!("  Maximum must be at least {}", Temperature::new(min)))?;
    };

    let precision = terminal.select_one("Select Precision (Default is 1.0)", &Precision::ALL)?;

    debug!(?modes, min, max, %precision, "profile collected");

    DeviceProfile::new(info, modes, min.into(), max.into(), precision)
        .context("Invalid device profile")
}

#[cfg(test)]
mod tests {
    use super::*;
    use irlearn_core::{build, ProfileError};

    fn info() -> DeviceInfo {
        DeviceInfo::new("Midea", vec!["MSAG".into()])
    }

    #[test]
    fn full_wizard_run() {
        let script = "cool,heat\nnone\n1 2\noff\n16\n18\n\n";
        let mut terminal = Terminal::new(script.as_bytes(), Vec::new());

        let profile = ask_profile(&mut terminal, info()).unwrap();

        assert_eq!(
            profile.modes().operation_modes,
            vec![OperationMode::Cool, OperationMode::Heat]
        );
        assert_eq!(profile.modes().fan_modes, vec![FanMode::Auto, FanMode::Level1]);
        assert_eq!(profile.precision(), Precision::Whole);
        assert_eq!(build(&profile).leaf_count(), 2 * 2 * 3 + 1);
    }

    #[test]
    fn maximum_below_minimum_is_asked_again() {
        let script = "cool\nnone\nauto\noff\n20\n18\nabc\n22\n0.5\n";
        let mut terminal = Terminal::new(script.as_bytes(), Vec::new());

        let profile = ask_profile(&mut terminal, info()).unwrap();
        assert_eq!(profile.max_temperature(), Temperature::new(22.0));
        assert_eq!(profile.precision(), Precision::Half);

        let shown = String::from_utf8(terminal.into_inner().1).unwrap();
        assert!(shown.contains("Maximum must be at least 20"));
        assert!(shown.contains("'abc' is not a number"));
    }

    #[test]
    fn wizard_fails_when_input_ends() {
        let mut terminal = Terminal::new("cool\n".as_bytes(), Vec::new());
        assert!(ask_profile(&mut terminal, info()).is_err());
    }

    #[test]
    fn invalid_profile_keeps_the_typed_error() {
        let script = "cool\nnone\nauto\noff\n16\n1e9\n\n";
        let mut terminal = Terminal::new(script.as_bytes(), Vec::new());

        let err = ask_profile(&mut terminal, info()).unwrap_err();
        let profile_err = err.downcast_ref::<ProfileError>().unwrap();
        assert!(matches!(profile_err, ProfileError::TemperatureRangeTooLarge { .. }));
        assert!(err.to_string().contains("Invalid device profile"));
    }

    #[test]
    fn device_info_prompts_only_for_missing_values() {
        let mut terminal = Terminal::new("\nFujitsu\nASYG09, ASYG12 ,\n".as_bytes(), Vec::new());
        let (manufacturer, models) = ask_device_info(&mut terminal, None, Vec::new()).unwrap();
        assert_eq!(manufacturer, "Fujitsu");
        assert_eq!(models, vec!["ASYG09", "ASYG12"]);

        let mut terminal = Terminal::new("".as_bytes(), Vec::new());
        let (manufacturer, models) =
            ask_device_info(&mut terminal, Some("LG".into()), vec!["S09".into()]).unwrap();
        assert_eq!(manufacturer, "LG");
        assert_eq!(models, vec!["S09"]);
    }
}
