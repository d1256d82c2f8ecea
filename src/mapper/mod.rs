//! Translation from physical gamepad readings to virtual controller state
pub mod builder;
pub mod capability;
pub mod definitions;
pub mod element;
pub mod element_map;
#[cfg(test)]
pub mod element_test;
pub mod force_feedback;
#[cfg(test)]
pub mod force_feedback_test;
pub mod parser;
#[cfg(test)]
pub mod parser_test;
pub mod registry;
#[cfg(test)]
pub mod registry_test;

use crate::controller::{
    capabilities::Capabilities,
    clamp_analog,
    keyboard::{KeyboardSink, NullKeyboard},
    physical::{button_flags, PhysicalGamepad},
    state::ControllerState,
};

use self::{
    capability::derive_capabilities,
    element_map::{ElementMap, PhysicalElement},
    force_feedback::{ForceFeedbackActuatorMap, OrderedMagnitudeComponents, PhysicalActuatorComponents},
};

/// Complete translation from one physical gamepad to one virtual controller.
/// A mapper is immutable once created.
#[derive(Debug, Clone)]
pub struct Mapper {
    name: String,
    elements: ElementMap,
    force_feedback: ForceFeedbackActuatorMap,
    capabilities: Capabilities,
}

impl Mapper {
    /// Create a new mapper. An empty name creates an anonymous mapper that
    /// cannot be registered.
    pub fn new(
        name: impl Into<String>,
        elements: ElementMap,
        force_feedback: ForceFeedbackActuatorMap,
    ) -> Self {
        let capabilities = derive_capabilities(&elements, &force_feedback);
        Self {
            name: name.into(),
            elements,
            force_feedback,
            capabilities,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn element_map(&self) -> &ElementMap {
        &self.elements
    }

    /// Deep copy of the element assignments
    pub fn clone_element_map(&self) -> ElementMap {
        self.elements.clone()
    }

    pub fn force_feedback_actuator_map(&self) -> ForceFeedbackActuatorMap {
        self.force_feedback
    }

    /// Translate a physical reading into a virtual controller state. Keyboard
    /// contributions are discarded.
    pub fn map_physical_to_virtual(&self, gamepad: &PhysicalGamepad) -> ControllerState {
        self.map_physical_to_virtual_with_keyboard(gamepad, &mut NullKeyboard)
    }

    /// Translate a physical reading into a virtual controller state, sending
    /// keyboard contributions to the given keyboard.
    pub fn map_physical_to_virtual_with_keyboard(
        &self,
        gamepad: &PhysicalGamepad,
        keyboard: &mut dyn KeyboardSink,
    ) -> ControllerState {
        let mut state = ControllerState::default();

        // Physical Y axes point up while virtual Y axes point down
        let sticks = [
            (PhysicalElement::StickLeftX, clamp_analog(gamepad.thumb_lx as i32)),
            (PhysicalElement::StickLeftY, clamp_analog(-(gamepad.thumb_ly as i32))),
            (PhysicalElement::StickRightX, clamp_analog(gamepad.thumb_rx as i32)),
            (PhysicalElement::StickRightY, clamp_analog(-(gamepad.thumb_ry as i32))),
        ];
        for (element, value) in sticks {
            if let Some(mapper) = self.elements.get(element) {
                mapper.contribute_from_analog_value(&mut state, keyboard, value as i16);
            }
        }

        let dpad = [
            (PhysicalElement::DpadUp, button_flags::DPAD_UP),
            (PhysicalElement::DpadDown, button_flags::DPAD_DOWN),
            (PhysicalElement::DpadLeft, button_flags::DPAD_LEFT),
            (PhysicalElement::DpadRight, button_flags::DPAD_RIGHT),
        ];
        self.contribute_buttons(&mut state, keyboard, gamepad, &dpad);

        let triggers = [
            (PhysicalElement::TriggerLT, gamepad.left_trigger),
            (PhysicalElement::TriggerRT, gamepad.right_trigger),
        ];
        for (element, value) in triggers {
            if let Some(mapper) = self.elements.get(element) {
                mapper.contribute_from_trigger_value(&mut state, keyboard, value);
            }
        }

        let buttons = [
            (PhysicalElement::ButtonA, button_flags::A),
            (PhysicalElement::ButtonB, button_flags::B),
            (PhysicalElement::ButtonX, button_flags::X),
            (PhysicalElement::ButtonY, button_flags::Y),
            (PhysicalElement::ButtonLB, button_flags::LEFT_SHOULDER),
            (PhysicalElement::ButtonRB, button_flags::RIGHT_SHOULDER),
            (PhysicalElement::ButtonBack, button_flags::BACK),
            (PhysicalElement::ButtonStart, button_flags::START),
            (PhysicalElement::ButtonLS, button_flags::LEFT_THUMB),
            (PhysicalElement::ButtonRS, button_flags::RIGHT_THUMB),
        ];
        self.contribute_buttons(&mut state, keyboard, gamepad, &buttons);

        state.saturate_axes();
        state
    }

    fn contribute_buttons(
        &self,
        state: &mut ControllerState,
        keyboard: &mut dyn KeyboardSink,
        gamepad: &PhysicalGamepad,
        buttons: &[(PhysicalElement, u16)],
    ) {
        for (element, flag) in buttons {
            if let Some(mapper) = self.elements.get(*element) {
                mapper.contribute_from_button_value(state, keyboard, gamepad.is_button_pressed(*flag));
            }
        }
    }

    /// Translate virtual force feedback magnitudes into physical actuator
    /// output levels, scaled by the device-wide gain
    pub fn map_force_feedback_virtual_to_physical(
        &self,
        components: &OrderedMagnitudeComponents,
        gain: f64,
    ) -> PhysicalActuatorComponents {
        self.force_feedback.map_virtual_to_physical(components, gain)
    }
}
