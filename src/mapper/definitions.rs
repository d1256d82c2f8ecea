//! Mappers that are always available
use crate::controller::{Axis, AxisDirection, Button, PovDirection};

use super::{
    element::ElementMapper,
    element_map::{ElementMap, PhysicalElement},
    force_feedback::ForceFeedbackActuatorMap,
    registry::MapperRegistry,
    Mapper,
};

pub const STANDARD_GAMEPAD: &str = "StandardGamepad";
pub const DIGITAL_GAMEPAD: &str = "DigitalGamepad";
pub const EXTENDED_GAMEPAD: &str = "ExtendedGamepad";
pub const XINPUT_NATIVE: &str = "XInputNative";
pub const XINPUT_SHARED_TRIGGERS: &str = "XInputSharedTriggers";

/// Names of the built-in mappers in registration order
pub const BUILTIN_MAPPER_NAMES: [&str; 5] = [
    STANDARD_GAMEPAD,
    DIGITAL_GAMEPAD,
    EXTENDED_GAMEPAD,
    XINPUT_NATIVE,
    XINPUT_SHARED_TRIGGERS,
];

/// Register every built-in mapper. [STANDARD_GAMEPAD] is registered first
/// so it becomes the default unless another mapper was registered earlier.
pub fn register_builtin_mappers(registry: &MapperRegistry) {
    let mappers = [
        standard_gamepad(),
        digital_gamepad(),
        extended_gamepad(),
        xinput_native(),
        xinput_shared_triggers(),
    ];
    for mapper in mappers {
        let name = mapper.name().to_string();
        if let Err(e) = registry.register(mapper) {
            log::warn!("Unable to register built-in mapper '{name}': {e}");
        }
    }
}

fn button(number: usize) -> ElementMapper {
    // Built-in definitions only use valid button numbers
    ElementMapper::Button(Button::from_number(number).unwrap_or(Button::B1))
}

fn with_dpad_pov(map: ElementMap) -> ElementMap {
    map.with(PhysicalElement::DpadUp, ElementMapper::Pov(PovDirection::Up))
        .with(PhysicalElement::DpadDown, ElementMapper::Pov(PovDirection::Down))
        .with(PhysicalElement::DpadLeft, ElementMapper::Pov(PovDirection::Left))
        .with(PhysicalElement::DpadRight, ElementMapper::Pov(PovDirection::Right))
}

/// Face and shoulder buttons on 1-6 in the order A, B, X, Y, LB, RB
fn with_face_buttons(map: ElementMap) -> ElementMap {
    map.with(PhysicalElement::ButtonA, button(1))
        .with(PhysicalElement::ButtonB, button(2))
        .with(PhysicalElement::ButtonX, button(3))
        .with(PhysicalElement::ButtonY, button(4))
        .with(PhysicalElement::ButtonLB, button(5))
        .with(PhysicalElement::ButtonRB, button(6))
}

/// Back, Start and the stick clicks on consecutive buttons starting at `first`
fn with_menu_buttons(map: ElementMap, first: usize) -> ElementMap {
    map.with(PhysicalElement::ButtonBack, button(first))
        .with(PhysicalElement::ButtonStart, button(first + 1))
        .with(PhysicalElement::ButtonLS, button(first + 2))
        .with(PhysicalElement::ButtonRS, button(first + 3))
}

/// Sticks on X/Y and Z/RotZ, triggers as buttons 7 and 8, d-pad as POV
pub fn standard_gamepad() -> Mapper {
    let map = ElementMap::new()
        .with(PhysicalElement::StickLeftX, ElementMapper::axis(Axis::X))
        .with(PhysicalElement::StickLeftY, ElementMapper::axis(Axis::Y))
        .with(PhysicalElement::StickRightX, ElementMapper::axis(Axis::Z))
        .with(PhysicalElement::StickRightY, ElementMapper::axis(Axis::RotZ))
        .with(PhysicalElement::TriggerLT, button(7))
        .with(PhysicalElement::TriggerRT, button(8));
    let map = with_menu_buttons(with_face_buttons(with_dpad_pov(map)), 9);

    Mapper::new(STANDARD_GAMEPAD, map, ForceFeedbackActuatorMap::default())
}

/// Same layout as [standard_gamepad] with sticks that only report their
/// extremes
pub fn digital_gamepad() -> Mapper {
    let both = AxisDirection::Both;
    let map = ElementMap::new()
        .with(
            PhysicalElement::StickLeftX,
            ElementMapper::digital_axis(Axis::X, both),
        )
        .with(
            PhysicalElement::StickLeftY,
            ElementMapper::digital_axis(Axis::Y, both),
        )
        .with(
            PhysicalElement::StickRightX,
            ElementMapper::digital_axis(Axis::Z, both),
        )
        .with(
            PhysicalElement::StickRightY,
            ElementMapper::digital_axis(Axis::RotZ, both),
        )
        .with(PhysicalElement::TriggerLT, button(7))
        .with(PhysicalElement::TriggerRT, button(8));
    let map = with_menu_buttons(with_face_buttons(with_dpad_pov(map)), 9);

    Mapper::new(DIGITAL_GAMEPAD, map, ForceFeedbackActuatorMap::default())
}

/// Same sticks as [standard_gamepad] with the triggers on RotX and RotY
pub fn extended_gamepad() -> Mapper {
    let map = ElementMap::new()
        .with(PhysicalElement::StickLeftX, ElementMapper::axis(Axis::X))
        .with(PhysicalElement::StickLeftY, ElementMapper::axis(Axis::Y))
        .with(PhysicalElement::StickRightX, ElementMapper::axis(Axis::Z))
        .with(PhysicalElement::StickRightY, ElementMapper::axis(Axis::RotZ))
        .with(PhysicalElement::TriggerLT, ElementMapper::axis(Axis::RotX))
        .with(PhysicalElement::TriggerRT, ElementMapper::axis(Axis::RotY));
    let map = with_menu_buttons(with_face_buttons(with_dpad_pov(map)), 7);

    Mapper::new(EXTENDED_GAMEPAD, map, ForceFeedbackActuatorMap::default())
}

/// Layout an XInput controller has when accessed natively
pub fn xinput_native() -> Mapper {
    let map = ElementMap::new()
        .with(PhysicalElement::StickLeftX, ElementMapper::axis(Axis::X))
        .with(PhysicalElement::StickLeftY, ElementMapper::axis(Axis::Y))
        .with(PhysicalElement::StickRightX, ElementMapper::axis(Axis::RotX))
        .with(PhysicalElement::StickRightY, ElementMapper::axis(Axis::RotY))
        .with(PhysicalElement::TriggerLT, ElementMapper::axis(Axis::Z))
        .with(PhysicalElement::TriggerRT, ElementMapper::axis(Axis::RotZ));
    let map = with_menu_buttons(with_face_buttons(with_dpad_pov(map)), 7);

    Mapper::new(XINPUT_NATIVE, map, ForceFeedbackActuatorMap::default())
}

/// Same as [xinput_native] with both triggers sharing the Z axis
pub fn xinput_shared_triggers() -> Mapper {
    let map = ElementMap::new()
        .with(PhysicalElement::StickLeftX, ElementMapper::axis(Axis::X))
        .with(PhysicalElement::StickLeftY, ElementMapper::axis(Axis::Y))
        .with(PhysicalElement::StickRightX, ElementMapper::axis(Axis::RotX))
        .with(PhysicalElement::StickRightY, ElementMapper::axis(Axis::RotY))
        .with(
            PhysicalElement::TriggerLT,
            ElementMapper::half_axis(Axis::Z, AxisDirection::Positive),
        )
        .with(
            PhysicalElement::TriggerRT,
            ElementMapper::half_axis(Axis::Z, AxisDirection::Negative),
        );
    let map = with_menu_buttons(with_face_buttons(with_dpad_pov(map)), 7);

    Mapper::new(XINPUT_SHARED_TRIGGERS, map, ForceFeedbackActuatorMap::default())
}
