//! Builds the empty code document from a device profile.

use crate::document::{
    Commands, FanTree, OperationTree, OutputDocument, PresetTree, Slot, SwingTree, TemperatureSlots,
};
use crate::profile::DeviceProfile;
use crate::temperature::temperature_ladder;

/// Expand a profile into a document with every slot present and empty.
///
/// The tree is operation → preset → fan → swing → temperature, each level in
/// the order the modes were selected. An empty selection on any axis leaves
/// that part of the tree empty.
pub fn build(profile: &DeviceProfile) -> OutputDocument {
    let modes = profile.modes();
    let temperatures = temperature_ladder(
        profile.min_temperature(),
        profile.max_temperature(),
        profile.precision(),
    );

    let mut tree = OperationTree::new();
    for operation in &modes.operation_modes {
        let mut presets = PresetTree::new();
        for preset in &modes.preset_modes {
            let mut fans = FanTree::new();
            for fan in &modes.fan_modes {
                let mut swings = SwingTree::new();
                for swing in &modes.swing_modes {
                    let mut slots = TemperatureSlots::new();
                    for temperature in &temperatures {
                        slots.insert(*temperature, Slot::default());
                    }
                    swings.insert(*swing, slots);
                }
                fans.insert(*fan, swings);
            }
            presets.insert(*preset, fans);
        }
        tree.insert(*operation, presets);
    }

    let info = profile.info();
    OutputDocument {
        manufacturer: info.manufacturer.clone(),
        supported_models: info.supported_models.clone(),
        supported_controller: info.controller.clone(),
        commands_encoding: info.encoding.clone(),
        min_temperature: profile.min_temperature(),
        max_temperature: profile.max_temperature(),
        precision: profile.precision(),
        operation_modes: modes.operation_modes.clone(),
        preset_modes: modes.preset_modes.clone(),
        fan_modes: modes.fan_modes.clone(),
        swing_modes: modes.swing_modes.clone(),
        commands: Commands::new(tree),
    }
}
