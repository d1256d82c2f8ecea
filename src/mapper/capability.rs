//! Derives the shape of a virtual controller from the elements its mappers
//! write to.
use crate::controller::{
    capabilities::{AxisCapabilities, Capabilities},
    Axis, ElementIdentifier,
};

use super::{element_map::ElementMap, force_feedback::ForceFeedbackActuatorMap};

/// Axes every virtual controller presents, whether mapped or not
pub const REQUIRED_AXES: &[Axis] = &[];
/// Axes every virtual controller presents with force feedback support
pub const REQUIRED_FORCE_FEEDBACK_AXES: &[Axis] = &[];
/// Minimum number of buttons every virtual controller presents
pub const MIN_NUM_BUTTONS: u8 = 0;
/// Whether every virtual controller presents a POV hat
pub const IS_POV_REQUIRED: bool = false;

/// Compute the virtual controller capabilities implied by the given element
/// and force feedback actuator assignments
pub fn derive_capabilities(
    elements: &ElementMap,
    actuators: &ForceFeedbackActuatorMap,
) -> Capabilities {
    let mut axis_present = [false; Axis::COUNT];
    let mut axis_force_feedback = [false; Axis::COUNT];
    let mut highest_button: Option<usize> = None;
    let mut has_pov = IS_POV_REQUIRED;

    for axis in REQUIRED_AXES {
        axis_present[axis.index()] = true;
    }
    for axis in REQUIRED_FORCE_FEEDBACK_AXES {
        axis_present[axis.index()] = true;
        axis_force_feedback[axis.index()] = true;
    }

    for (_, mapper) in elements.iter() {
        for target in mapper.target_elements() {
            match target {
                ElementIdentifier::Axis(axis) => axis_present[axis.index()] = true,
                ElementIdentifier::Button(button) => {
                    highest_button = highest_button.max(Some(button.index()));
                }
                ElementIdentifier::Pov => has_pov = true,
                ElementIdentifier::WholeController => (),
            }
        }
    }

    for (_, element) in actuators.iter() {
        for axis in element.axes() {
            axis_present[axis.index()] = true;
            axis_force_feedback[axis.index()] = true;
        }
    }

    let axes = Axis::ALL
        .iter()
        .filter(|axis| axis_present[axis.index()])
        .map(|axis| AxisCapabilities {
            axis: *axis,
            supports_force_feedback: axis_force_feedback[axis.index()],
        })
        .collect();

    let mapped_buttons = highest_button.map_or(0, |index| index as u8 + 1);
    Capabilities {
        axes,
        num_buttons: mapped_buttons.max(MIN_NUM_BUTTONS),
        has_pov,
    }
}
