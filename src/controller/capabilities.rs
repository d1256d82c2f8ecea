use serde::Serialize;

use super::{Axis, Button, ElementIdentifier};

/// Describes one axis present on a virtual controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisCapabilities {
    pub axis: Axis,
    pub supports_force_feedback: bool,
}

/// Shape of a virtual controller: which axes it has, how many buttons and
/// whether it presents a POV hat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Present axes in ascending [Axis] order without duplicates
    pub axes: Vec<AxisCapabilities>,
    pub num_buttons: u8,
    pub has_pov: bool,
}

impl Capabilities {
    /// Returns the position of the given axis within [Capabilities::axes]
    pub fn find_axis(&self, axis: Axis) -> Option<usize> {
        self.axes.iter().position(|caps| caps.axis == axis)
    }

    pub fn has_axis(&self, axis: Axis) -> bool {
        self.find_axis(axis).is_some()
    }

    pub fn has_button(&self, button: Button) -> bool {
        button.number() <= self.num_buttons as usize
    }

    pub fn num_axes(&self) -> usize {
        self.axes.len()
    }

    /// Returns true if the virtual controller has the given element
    pub fn has_element(&self, element: ElementIdentifier) -> bool {
        match element {
            ElementIdentifier::Axis(axis) => self.has_axis(axis),
            ElementIdentifier::Button(button) => self.has_button(button),
            ElementIdentifier::Pov => self.has_pov,
            ElementIdentifier::WholeController => true,
        }
    }

    pub fn force_feedback_axis_count(&self) -> usize {
        self.axes
            .iter()
            .filter(|caps| caps.supports_force_feedback)
            .count()
    }

    pub fn force_feedback_is_supported(&self) -> bool {
        self.force_feedback_axis_count() > 0
    }

    pub fn force_feedback_is_supported_for_axis(&self, axis: Axis) -> bool {
        self.axes
            .iter()
            .any(|caps| caps.axis == axis && caps.supports_force_feedback)
    }
}
