use std::error::Error;

use crate::{
    controller::{keyboard::KeyIdentifier, Axis, AxisDirection, Button, PovDirection},
    mapper::{
        element::ElementMapper,
        force_feedback::{ActuatorElement, ForceFeedbackActuator},
        parser::{
            compute_recursion_depth, element_mapper_from_string, extract_parts,
            find_controller_element_index, find_force_feedback_actuator,
            force_feedback_actuator_from_string, is_controller_element_string_valid,
            is_force_feedback_actuator_string_valid, split_params, ElementMapperStringParts,
            ParseError,
        },
    },
};

#[test]
fn test_recursion_depth() {
    assert_eq!(compute_recursion_depth("Null"), Some(0));
    assert_eq!(compute_recursion_depth("Button(1)"), Some(1));
    assert_eq!(
        compute_recursion_depth("Split(Button(1), Invert(Axis(X)))"),
        Some(3)
    );
    assert_eq!(compute_recursion_depth("Button(1))"), None);
    assert_eq!(compute_recursion_depth("Button((1)"), None);
    assert_eq!(compute_recursion_depth(")("), None);
}

#[test]
fn test_extract_parts() {
    assert_eq!(
        extract_parts(" Axis( X, + ) "),
        Some(ElementMapperStringParts {
            type_name: "Axis",
            params: "X, +",
        })
    );
    assert_eq!(
        extract_parts("Null"),
        Some(ElementMapperStringParts {
            type_name: "Null",
            params: "",
        })
    );
    assert_eq!(extract_parts("(X)"), None, "missing type");
    assert_eq!(extract_parts("Axis(X) trailing"), None);
    assert_eq!(extract_parts(""), None);
    assert_eq!(extract_parts("Axis(X)(Y)"), None, "misplaced parentheses");
    assert_eq!(extract_parts("Axis(X))"), None, "unbalanced parentheses");
    assert_eq!(extract_parts("Axis((X)"), None, "unbalanced parentheses");
}

#[test]
fn test_split_params() {
    assert_eq!(split_params(""), Some(vec![]));
    assert_eq!(split_params("X"), Some(vec!["X"]));
    assert_eq!(
        split_params("Button(1), Split(Axis(X, +), Null)"),
        Some(vec!["Button(1)", "Split(Axis(X, +), Null)"])
    );
    assert_eq!(split_params("X,,Y"), None);
    assert_eq!(split_params("X,"), None);
}

#[test]
fn test_simple_mappers() -> Result<(), Box<dyn Error>> {
    assert_eq!(element_mapper_from_string("Null")?, None);
    assert_eq!(element_mapper_from_string("Null()")?, None);
    assert_eq!(
        element_mapper_from_string("Axis(RX)")?,
        Some(ElementMapper::axis(Axis::RotX))
    );
    assert_eq!(
        element_mapper_from_string("axis(rotz, Negative)")?,
        Some(ElementMapper::half_axis(Axis::RotZ, AxisDirection::Negative))
    );
    assert_eq!(
        element_mapper_from_string("DigitalAxis(Y, +)")?,
        Some(ElementMapper::digital_axis(Axis::Y, AxisDirection::Positive))
    );
    assert_eq!(
        element_mapper_from_string("Button(16)")?,
        Some(ElementMapper::Button(Button::B16))
    );
    assert_eq!(
        element_mapper_from_string("Button(B3)")?,
        Some(ElementMapper::Button(Button::B3))
    );
    assert_eq!(
        element_mapper_from_string("Pov(left)")?,
        Some(ElementMapper::Pov(PovDirection::Left))
    );
    assert_eq!(
        element_mapper_from_string("Keyboard(DIK_ESCAPE)")?,
        Some(ElementMapper::Keyboard(KeyIdentifier(0x01)))
    );
    assert_eq!(
        element_mapper_from_string("Keyboard(0x39)")?,
        Some(ElementMapper::Keyboard(KeyIdentifier(0x39)))
    );

    Ok(())
}

#[test]
fn test_nested_mappers() -> Result<(), Box<dyn Error>> {
    let mapper = element_mapper_from_string("Split(Button(1), Invert(Axis(Z, +)))")?;
    let expected = ElementMapper::split(
        Some(ElementMapper::Button(Button::B1)),
        Some(ElementMapper::invert(ElementMapper::half_axis(
            Axis::Z,
            AxisDirection::Positive,
        ))),
    );
    assert_eq!(mapper, Some(expected));

    let mapper = element_mapper_from_string("Split(Null, Pov(Down))")?;
    assert_eq!(
        mapper,
        Some(ElementMapper::split(None, Some(ElementMapper::Pov(PovDirection::Down))))
    );

    let mapper = element_mapper_from_string("Compound(Button(1), Null, Pov(Up))")?
        .ok_or("compound should not be null")?;
    assert_eq!(mapper.target_element_count(), 2);

    Ok(())
}

#[test]
fn test_display_round_trip() -> Result<(), Box<dyn Error>> {
    let text = "Compound(Split(Axis(X, +), Null), DigitalAxis(RotY, -), Keyboard(DIK_W), Invert(Button(4)))";
    let mapper = element_mapper_from_string(text)?.ok_or("should parse")?;
    assert_eq!(mapper.to_string(), text);
    Ok(())
}

#[test]
fn test_invalid_mappers() {
    let cases = [
        "Button(0)",
        "Button(17)",
        "Button(+5)",
        "Button(B+5)",
        "Button(B)",
        "Axis(W)",
        "Axis(X, sideways)",
        "Axis()",
        "Axis(X, +, +)",
        "Pov(UpLeft)",
        "Keyboard(NotAKey)",
        "Keyboard(0)",
        "Invert(Null)",
        "Split(Button(1))",
        "Compound()",
        "Unknown(1)",
        "Button(1) extra",
    ];
    for case in cases {
        let result = element_mapper_from_string(case);
        println!("{case}: {result:?}");
        assert!(result.is_err(), "'{case}' should not parse");
    }

    assert_eq!(
        element_mapper_from_string("Button(1"),
        Err(ParseError::Unbalanced("Button(1".into()))
    );
    let nine = "Compound(Button(1), Button(2), Button(3), Button(4), Button(5), Button(6), Button(7), Button(8), Button(9))";
    assert!(matches!(
        element_mapper_from_string(nine),
        Err(ParseError::ParameterCount { .. })
    ));
}

#[test]
fn test_recursion_limit() {
    let mut deep = String::from("Button(1)");
    for _ in 0..7 {
        deep = format!("Invert({deep})");
    }
    assert_eq!(compute_recursion_depth(&deep), Some(8));
    assert!(element_mapper_from_string(&deep).is_ok());

    let deeper = format!("Invert({deep})");
    assert_eq!(
        element_mapper_from_string(&deeper),
        Err(ParseError::TooDeep(9))
    );
}

#[test]
fn test_element_names() {
    assert_eq!(find_controller_element_index("StickLeftX"), Some(0));
    assert_eq!(find_controller_element_index("triggerrt"), Some(9));
    assert_eq!(find_controller_element_index("ButtonRS"), Some(19));
    assert!(is_controller_element_string_valid("DpadLeft"));
    assert!(!is_controller_element_string_valid("ButtonGuide"));
}

#[test]
fn test_actuators() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        find_force_feedback_actuator("ForceFeedback.RightImpulseTrigger"),
        Some(ForceFeedbackActuator::RightImpulseTrigger)
    );
    assert!(is_force_feedback_actuator_string_valid("ForceFeedback.LeftMotor"));
    assert!(!is_force_feedback_actuator_string_valid("RightMotor"));

    assert_eq!(force_feedback_actuator_from_string("Null")?, None);
    assert_eq!(
        force_feedback_actuator_from_string("SingleAxis(Y, -)")?,
        Some(ActuatorElement::SingleAxis {
            axis: Axis::Y,
            direction: AxisDirection::Negative
        })
    );
    assert_eq!(
        force_feedback_actuator_from_string("MagnitudeProjection(X, RotX)")?,
        Some(ActuatorElement::MagnitudeProjection {
            first: Axis::X,
            second: Axis::RotX
        })
    );
    assert!(force_feedback_actuator_from_string("MagnitudeProjection(X, X)").is_err());
    assert!(force_feedback_actuator_from_string("MagnitudeProjection(X)").is_err());
    assert!(force_feedback_actuator_from_string("Axis(X)").is_err());

    Ok(())
}
