use crate::{
    controller::{
        keyboard::{KeyIdentifier, KeyboardState, NullKeyboard},
        state::ControllerState,
        Axis, AxisDirection, Button, ElementIdentifier, PovDirection, ANALOG_VALUE_MAX,
        ANALOG_VALUE_MIN,
    },
    mapper::element::{ElementMapper, COMPOUND_MAX_MAPPERS},
};

fn analog(mapper: &ElementMapper, value: i16) -> ControllerState {
    let mut state = ControllerState::default();
    mapper.contribute_from_analog_value(&mut state, &mut NullKeyboard, value);
    state
}

fn trigger(mapper: &ElementMapper, value: u8) -> ControllerState {
    let mut state = ControllerState::default();
    mapper.contribute_from_trigger_value(&mut state, &mut NullKeyboard, value);
    state
}

fn button(mapper: &ElementMapper, pressed: bool) -> ControllerState {
    let mut state = ControllerState::default();
    mapper.contribute_from_button_value(&mut state, &mut NullKeyboard, pressed);
    state
}

#[test]
fn test_axis_analog() {
    let both = ElementMapper::axis(Axis::X);
    assert_eq!(analog(&both, 1234).axis_value(Axis::X), 1234);
    assert_eq!(analog(&both, -32768).axis_value(Axis::X), ANALOG_VALUE_MIN);

    let positive = ElementMapper::half_axis(Axis::X, AxisDirection::Positive);
    assert_eq!(analog(&positive, -32767).axis_value(Axis::X), 0);
    assert_eq!(analog(&positive, 0).axis_value(Axis::X), 16383);
    assert_eq!(analog(&positive, 32767).axis_value(Axis::X), ANALOG_VALUE_MAX);

    let negative = ElementMapper::half_axis(Axis::X, AxisDirection::Negative);
    assert_eq!(analog(&negative, 32767).axis_value(Axis::X), 0);
    assert_eq!(analog(&negative, 0).axis_value(Axis::X), -16383);
    assert_eq!(analog(&negative, -32767).axis_value(Axis::X), ANALOG_VALUE_MIN);
}

#[test]
fn test_axis_trigger() {
    let both = ElementMapper::axis(Axis::Z);
    assert_eq!(trigger(&both, 0).axis_value(Axis::Z), ANALOG_VALUE_MIN);
    assert_eq!(trigger(&both, 255).axis_value(Axis::Z), ANALOG_VALUE_MAX);

    let positive = ElementMapper::half_axis(Axis::Z, AxisDirection::Positive);
    assert_eq!(trigger(&positive, 0).axis_value(Axis::Z), 0);
    assert_eq!(trigger(&positive, 255).axis_value(Axis::Z), ANALOG_VALUE_MAX);

    let negative = ElementMapper::half_axis(Axis::Z, AxisDirection::Negative);
    assert_eq!(trigger(&negative, 0).axis_value(Axis::Z), 0);
    assert_eq!(trigger(&negative, 255).axis_value(Axis::Z), ANALOG_VALUE_MIN);
}

#[test]
fn test_axis_button() {
    let both = ElementMapper::axis(Axis::Y);
    assert_eq!(button(&both, true).axis_value(Axis::Y), ANALOG_VALUE_MAX);
    assert_eq!(button(&both, false).axis_value(Axis::Y), ANALOG_VALUE_MIN);

    let positive = ElementMapper::half_axis(Axis::Y, AxisDirection::Positive);
    assert_eq!(button(&positive, true).axis_value(Axis::Y), ANALOG_VALUE_MAX);
    assert_eq!(button(&positive, false).axis_value(Axis::Y), 0);

    let negative = ElementMapper::half_axis(Axis::Y, AxisDirection::Negative);
    assert_eq!(button(&negative, true).axis_value(Axis::Y), ANALOG_VALUE_MIN);
    assert_eq!(button(&negative, false).axis_value(Axis::Y), 0);
}

#[test]
fn test_digital_axis() {
    let both = ElementMapper::digital_axis(Axis::RotX, AxisDirection::Both);
    assert_eq!(analog(&both, 10000).axis_value(Axis::RotX), 0);
    assert_eq!(analog(&both, 20000).axis_value(Axis::RotX), ANALOG_VALUE_MAX);
    assert_eq!(analog(&both, -20000).axis_value(Axis::RotX), ANALOG_VALUE_MIN);
    assert_eq!(trigger(&both, 200).axis_value(Axis::RotX), ANALOG_VALUE_MAX);
    assert_eq!(trigger(&both, 10).axis_value(Axis::RotX), ANALOG_VALUE_MIN);

    let positive = ElementMapper::digital_axis(Axis::RotX, AxisDirection::Positive);
    assert_eq!(analog(&positive, 20000).axis_value(Axis::RotX), ANALOG_VALUE_MAX);
    assert_eq!(analog(&positive, -20000).axis_value(Axis::RotX), 0);
    assert_eq!(trigger(&positive, 10).axis_value(Axis::RotX), 0);

    let negative = ElementMapper::digital_axis(Axis::RotX, AxisDirection::Negative);
    assert_eq!(analog(&negative, -20000).axis_value(Axis::RotX), ANALOG_VALUE_MIN);
    assert_eq!(analog(&negative, 20000).axis_value(Axis::RotX), 0);
    assert_eq!(trigger(&negative, 200).axis_value(Axis::RotX), ANALOG_VALUE_MIN);
    assert_eq!(button(&negative, false).axis_value(Axis::RotX), 0);
}

#[test]
fn test_button_thresholds() {
    let mapper = ElementMapper::Button(Button::B3);
    assert!(analog(&mapper, 20000).is_button_pressed(Button::B3));
    assert!(analog(&mapper, -20000).is_button_pressed(Button::B3));
    assert!(!analog(&mapper, 16383).is_button_pressed(Button::B3));
    assert!(trigger(&mapper, 31).is_button_pressed(Button::B3));
    assert!(!trigger(&mapper, 30).is_button_pressed(Button::B3));
    assert!(button(&mapper, true).is_button_pressed(Button::B3));
    assert!(!button(&mapper, false).is_button_pressed(Button::B3));
}

#[test]
fn test_button_merge() {
    let mapper = ElementMapper::Button(Button::B1);
    let mut state = ControllerState::default();
    mapper.contribute_from_button_value(&mut state, &mut NullKeyboard, true);
    mapper.contribute_from_button_value(&mut state, &mut NullKeyboard, false);
    assert!(state.is_button_pressed(Button::B1), "release must not clear a press");
}

#[test]
fn test_pov() {
    let mapper = ElementMapper::Pov(PovDirection::Left);
    let state = button(&mapper, true);
    assert!(state.pov.left);
    assert!(!state.pov.up);
    assert_eq!(state.pov.all(), 0b0100);
    assert_eq!(mapper.target_elements(), vec![ElementIdentifier::Pov]);
}

#[test]
fn test_keyboard() {
    let key = KeyIdentifier(0x39);
    let mapper = ElementMapper::Keyboard(key);
    let mut state = ControllerState::default();
    let mut keyboard = KeyboardState::new();

    mapper.contribute_from_analog_value(&mut state, &mut keyboard, 30000);
    assert!(keyboard.is_pressed(key));
    mapper.contribute_neutral(&mut state, &mut keyboard);
    assert!(!keyboard.is_pressed(key));
    mapper.contribute_from_trigger_value(&mut state, &mut keyboard, 255);
    assert!(keyboard.is_pressed(key));
    mapper.contribute_from_button_value(&mut state, &mut keyboard, false);
    assert!(!keyboard.is_pressed(key));

    assert_eq!(state, ControllerState::default());
    assert_eq!(mapper.target_element_count(), 0);
    assert_eq!(mapper.target_element_at(0), None);
}

#[test]
fn test_invert() {
    let mapper = ElementMapper::invert(ElementMapper::axis(Axis::X));
    assert_eq!(analog(&mapper, 1000).axis_value(Axis::X), -1000);
    assert_eq!(analog(&mapper, -32768).axis_value(Axis::X), ANALOG_VALUE_MAX);
    assert_eq!(trigger(&mapper, 0).axis_value(Axis::X), ANALOG_VALUE_MAX);
    assert_eq!(trigger(&mapper, 255).axis_value(Axis::X), ANALOG_VALUE_MIN);

    let mapper = ElementMapper::invert(ElementMapper::Button(Button::B2));
    assert!(button(&mapper, true).is_button_pressed(Button::B2));
    assert_eq!(mapper.target_elements(), vec![ElementIdentifier::Button(Button::B2)]);
}

#[test]
fn test_split() {
    let mapper = ElementMapper::split(
        Some(ElementMapper::Button(Button::B1)),
        Some(ElementMapper::Button(Button::B2)),
    );
    let state = analog(&mapper, 30000);
    assert!(state.is_button_pressed(Button::B1));
    assert!(!state.is_button_pressed(Button::B2));

    let state = analog(&mapper, -30000);
    assert!(!state.is_button_pressed(Button::B1));
    assert!(state.is_button_pressed(Button::B2));

    let state = trigger(&mapper, 200);
    assert!(state.is_button_pressed(Button::B1));
    let state = trigger(&mapper, 100);
    assert!(!state.is_button_pressed(Button::B1));
    assert!(state.is_button_pressed(Button::B2));

    assert_eq!(
        mapper.target_elements(),
        vec![
            ElementIdentifier::Button(Button::B1),
            ElementIdentifier::Button(Button::B2)
        ]
    );
}

#[test]
fn test_split_releases_inactive_side() {
    let forward = KeyIdentifier(0x11);
    let backward = KeyIdentifier(0x1F);
    let mapper = ElementMapper::split(
        Some(ElementMapper::Keyboard(forward)),
        Some(ElementMapper::Keyboard(backward)),
    );
    let mut state = ControllerState::default();
    let mut keyboard = KeyboardState::new();

    mapper.contribute_from_analog_value(&mut state, &mut keyboard, -30000);
    assert!(keyboard.is_pressed(backward));
    mapper.contribute_from_analog_value(&mut state, &mut keyboard, 30000);
    assert!(keyboard.is_pressed(forward));
    assert!(!keyboard.is_pressed(backward), "inactive side should be released");
}

#[test]
fn test_split_with_missing_side() {
    let mapper = ElementMapper::split(None, Some(ElementMapper::axis(Axis::Y)));
    assert_eq!(analog(&mapper, 5000), ControllerState::default());
    assert_eq!(analog(&mapper, -5000).axis_value(Axis::Y), -5000);
    assert_eq!(mapper.target_element_count(), 1);
    assert_eq!(mapper.target_element_at(0), Some(ElementIdentifier::Axis(Axis::Y)));
}

#[test]
fn test_compound() {
    let mapper = ElementMapper::compound(vec![
        ElementMapper::Button(Button::B1),
        ElementMapper::Pov(PovDirection::Up),
        ElementMapper::Button(Button::B1),
    ])
    .expect("three mappers should fit");
    let state = button(&mapper, true);
    assert!(state.is_button_pressed(Button::B1));
    assert!(state.pov.up);

    assert_eq!(mapper.target_element_count(), 3);
    assert_eq!(mapper.target_element_at(1), Some(ElementIdentifier::Pov));
    assert_eq!(mapper.target_element_at(2), Some(ElementIdentifier::Button(Button::B1)));
    assert_eq!(mapper.target_element_at(3), None);

    let too_many = vec![ElementMapper::Button(Button::B1); COMPOUND_MAX_MAPPERS + 1];
    assert!(ElementMapper::compound(too_many).is_none());
}

#[test]
fn test_clone_is_deep() {
    let original = ElementMapper::split(
        Some(ElementMapper::invert(ElementMapper::axis(Axis::X))),
        None,
    );
    let mut copy = original.clone();
    assert_eq!(copy, original);
    if let ElementMapper::Split { negative, .. } = &mut copy {
        *negative = Some(Box::new(ElementMapper::Button(Button::B5)));
    }
    assert_ne!(copy, original);
    assert_eq!(original.target_element_count(), 1);
    assert_eq!(copy.target_element_count(), 2);
}

#[test]
fn test_clone_translates_identically() {
    let original = ElementMapper::compound(vec![
        ElementMapper::split(
            Some(ElementMapper::invert(ElementMapper::half_axis(
                Axis::Z,
                AxisDirection::Positive,
            ))),
            Some(ElementMapper::Button(Button::B2)),
        ),
        ElementMapper::digital_axis(Axis::RotY, AxisDirection::Both),
        ElementMapper::Pov(PovDirection::Left),
    ])
    .expect("three mappers fit in a compound");
    let copy = original.clone();

    for value in [i16::MIN, -20000, -1, 0, 1, 16384, i16::MAX] {
        assert_eq!(analog(&copy, value), analog(&original, value), "analog {value}");
    }
    for value in [0, 30, 31, 127, 200, 255] {
        assert_eq!(trigger(&copy, value), trigger(&original, value), "trigger {value}");
    }
    for pressed in [false, true] {
        assert_eq!(button(&copy, pressed), button(&original, pressed), "button {pressed}");
    }
}

#[test]
fn test_neutral_is_noop_for_state() {
    let mappers = [
        ElementMapper::axis(Axis::X),
        ElementMapper::digital_axis(Axis::Y, AxisDirection::Positive),
        ElementMapper::Button(Button::B4),
        ElementMapper::Pov(PovDirection::Down),
    ];
    for mapper in mappers.iter() {
        let mut state = ControllerState::default();
        mapper.contribute_neutral(&mut state, &mut NullKeyboard);
        assert_eq!(state, ControllerState::default(), "{mapper} changed the state");
    }
}

#[test]
fn test_display() {
    let mapper = ElementMapper::split(
        Some(ElementMapper::half_axis(Axis::RotZ, AxisDirection::Positive)),
        None,
    );
    assert_eq!(mapper.to_string(), "Split(Axis(RotZ, +), Null)");
    assert_eq!(ElementMapper::Button(Button::B12).to_string(), "Button(12)");
    assert_eq!(
        ElementMapper::Keyboard(KeyIdentifier(0x39)).to_string(),
        "Keyboard(DIK_SPACE)"
    );
}
