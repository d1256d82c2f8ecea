use crate::{
    controller::{Axis, AxisDirection},
    mapper::force_feedback::{
        actuator_output, ActuatorElement, ForceFeedbackActuator, ForceFeedbackActuatorMap,
        OrderedMagnitudeComponents, EFFECT_MODIFIER_MAXIMUM,
    },
};

fn components(x: f64, y: f64) -> OrderedMagnitudeComponents {
    let mut components = [0.0; Axis::COUNT];
    components[Axis::X.index()] = x;
    components[Axis::Y.index()] = y;
    components
}

#[test]
fn test_actuator_output() {
    assert_eq!(actuator_output(10000.0, EFFECT_MODIFIER_MAXIMUM), u16::MAX);
    assert_eq!(actuator_output(-10000.0, EFFECT_MODIFIER_MAXIMUM), u16::MAX);
    assert_eq!(actuator_output(20000.0, EFFECT_MODIFIER_MAXIMUM), u16::MAX);
    assert_eq!(actuator_output(5000.0, EFFECT_MODIFIER_MAXIMUM), 32768);
    assert_eq!(actuator_output(10000.0, 5000.0), 32768);
    assert_eq!(actuator_output(10000.0, 0.0), 0);
    assert_eq!(actuator_output(0.0, EFFECT_MODIFIER_MAXIMUM), 0);
    assert_eq!(actuator_output(f64::NAN, EFFECT_MODIFIER_MAXIMUM), 0);
}

#[test]
fn test_single_axis() {
    let components = components(-6000.0, 0.0);
    let both = ActuatorElement::SingleAxis {
        axis: Axis::X,
        direction: AxisDirection::Both,
    };
    let positive = ActuatorElement::SingleAxis {
        axis: Axis::X,
        direction: AxisDirection::Positive,
    };
    let negative = ActuatorElement::SingleAxis {
        axis: Axis::X,
        direction: AxisDirection::Negative,
    };
    assert_eq!(both.raw_magnitude(&components), -6000.0);
    assert_eq!(positive.raw_magnitude(&components), 0.0);
    assert_eq!(negative.raw_magnitude(&components), -6000.0);
}

#[test]
fn test_positive_actuator_output() {
    let map = ForceFeedbackActuatorMap::empty().with(
        ForceFeedbackActuator::LeftMotor,
        ActuatorElement::SingleAxis {
            axis: Axis::X,
            direction: AxisDirection::Positive,
        },
    );
    let gain = 5000.0;
    let levels: Vec<u16> = [0.0, 1000.0, 2500.0, 5000.0, 10000.0, 15000.0]
        .iter()
        .map(|x| map.map_virtual_to_physical(&components(*x, 0.0), gain).left_motor)
        .collect();
    println!("{levels:?}");
    assert_eq!(levels[0], 0);
    assert!(levels.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(levels[1] < levels[2] && levels[2] < levels[3] && levels[3] < levels[4]);
    // Saturates at the gain scaled maximum
    assert_eq!(levels[4], 32768);
    assert_eq!(levels[5], 32768);

    let negative = map.map_virtual_to_physical(&components(-10000.0, 0.0), gain);
    assert_eq!(negative.left_motor, 0);
}

#[test]
fn test_magnitude_projection() {
    let element = ActuatorElement::MagnitudeProjection {
        first: Axis::X,
        second: Axis::Y,
    };
    assert_eq!(element.raw_magnitude(&components(3000.0, -4000.0)), 5000.0);
    assert_eq!(element.axes(), vec![Axis::X, Axis::Y]);
}

#[test]
fn test_default_map() {
    let map = ForceFeedbackActuatorMap::default();
    let physical = map.map_virtual_to_physical(&components(3000.0, 4000.0), EFFECT_MODIFIER_MAXIMUM);
    assert_eq!(physical.left_motor, 32768);
    assert_eq!(physical.right_motor, 32768);
    assert_eq!(physical.left_impulse_trigger, 0);
    assert_eq!(physical.right_impulse_trigger, 0);
}

#[test]
fn test_disabled_actuators_output_zero() {
    let map = ForceFeedbackActuatorMap::empty().with(
        ForceFeedbackActuator::RightImpulseTrigger,
        ActuatorElement::SingleAxis {
            axis: Axis::Y,
            direction: AxisDirection::Positive,
        },
    );
    let physical = map.map_virtual_to_physical(&components(10000.0, 10000.0), 10000.0);
    assert_eq!(physical.get(ForceFeedbackActuator::LeftMotor), 0);
    assert_eq!(physical.get(ForceFeedbackActuator::RightMotor), 0);
    assert_eq!(physical.get(ForceFeedbackActuator::RightImpulseTrigger), u16::MAX);

    let physical = map.map_virtual_to_physical(&components(10000.0, -10000.0), 10000.0);
    assert_eq!(physical.right_impulse_trigger, 0, "wrong polarity is ignored");
}

#[test]
fn test_actuator_names() {
    assert_eq!(
        ForceFeedbackActuator::from_name("forcefeedback.leftmotor"),
        Some(ForceFeedbackActuator::LeftMotor)
    );
    assert_eq!(ForceFeedbackActuator::from_name("LeftMotor"), None);
    for actuator in ForceFeedbackActuator::ALL {
        assert_eq!(ForceFeedbackActuator::from_name(actuator.as_str()), Some(actuator));
    }
}
