//! Routing of virtual force feedback magnitudes to the physical actuators
use std::fmt::Display;

use serde::Serialize;

use crate::controller::{Axis, AxisDirection};

/// Maximum magnitude of a force feedback effect on one axis
pub const EFFECT_FORCE_MAGNITUDE_MAXIMUM: f64 = 10000.0;
/// Magnitude of a force feedback effect that produces no force
pub const EFFECT_FORCE_MAGNITUDE_ZERO: f64 = 0.0;
/// Maximum value of the device-wide force feedback gain
pub const EFFECT_MODIFIER_MAXIMUM: f64 = 10000.0;

/// Effect magnitude for each virtual axis, indexed by [Axis::index]
pub type OrderedMagnitudeComponents = [f64; Axis::COUNT];

/// Physical force feedback actuators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ForceFeedbackActuator {
    LeftMotor,
    RightMotor,
    LeftImpulseTrigger,
    RightImpulseTrigger,
}

impl ForceFeedbackActuator {
    pub const COUNT: usize = 4;
    pub const ALL: [ForceFeedbackActuator; ForceFeedbackActuator::COUNT] = [
        ForceFeedbackActuator::LeftMotor,
        ForceFeedbackActuator::RightMotor,
        ForceFeedbackActuator::LeftImpulseTrigger,
        ForceFeedbackActuator::RightImpulseTrigger,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Configuration name of the actuator (e.g. "ForceFeedback.LeftMotor")
    pub fn as_str(&self) -> &'static str {
        match self {
            ForceFeedbackActuator::LeftMotor => "ForceFeedback.LeftMotor",
            ForceFeedbackActuator::RightMotor => "ForceFeedback.RightMotor",
            ForceFeedbackActuator::LeftImpulseTrigger => "ForceFeedback.LeftImpulseTrigger",
            ForceFeedbackActuator::RightImpulseTrigger => "ForceFeedback.RightImpulseTrigger",
        }
    }

    /// Case-insensitive lookup by configuration name
    pub fn from_name(name: &str) -> Option<ForceFeedbackActuator> {
        ForceFeedbackActuator::ALL
            .iter()
            .find(|actuator| actuator.as_str().eq_ignore_ascii_case(name))
            .copied()
    }
}

impl Display for ForceFeedbackActuator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Describes which virtual axis magnitudes drive a physical actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorElement {
    /// Driven by one axis, optionally only by one polarity of it
    SingleAxis { axis: Axis, direction: AxisDirection },
    /// Driven by the length of the vector formed by two axes
    MagnitudeProjection { first: Axis, second: Axis },
}

impl ActuatorElement {
    /// Axes that must support force feedback for this element to work
    pub fn axes(&self) -> Vec<Axis> {
        match self {
            ActuatorElement::SingleAxis { axis, .. } => vec![*axis],
            ActuatorElement::MagnitudeProjection { first, second } => vec![*first, *second],
        }
    }

    /// Raw signed magnitude picked out of the virtual components
    pub fn raw_magnitude(&self, components: &OrderedMagnitudeComponents) -> f64 {
        match self {
            ActuatorElement::SingleAxis { axis, direction } => {
                let value = components[axis.index()];
                match direction {
                    AxisDirection::Both => value,
                    AxisDirection::Positive if value > EFFECT_FORCE_MAGNITUDE_ZERO => value,
                    AxisDirection::Negative if value < EFFECT_FORCE_MAGNITUDE_ZERO => value,
                    _ => EFFECT_FORCE_MAGNITUDE_ZERO,
                }
            }
            ActuatorElement::MagnitudeProjection { first, second } => {
                let first = components[first.index()];
                let second = components[second.index()];
                (first * first + second * second).sqrt()
            }
        }
    }
}

impl Display for ActuatorElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActuatorElement::SingleAxis { axis, direction } => match direction {
                AxisDirection::Both => write!(f, "SingleAxis({axis})"),
                _ => write!(f, "SingleAxis({axis}, {direction})"),
            },
            ActuatorElement::MagnitudeProjection { first, second } => {
                write!(f, "MagnitudeProjection({first}, {second})")
            }
        }
    }
}

/// Actuator element assignment for every [ForceFeedbackActuator]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceFeedbackActuatorMap {
    actuators: [Option<ActuatorElement>; ForceFeedbackActuator::COUNT],
}

/// Both rumble motors follow the magnitude of the X/Y force vector and the
/// impulse triggers are unused.
impl Default for ForceFeedbackActuatorMap {
    fn default() -> Self {
        let projection = ActuatorElement::MagnitudeProjection {
            first: Axis::X,
            second: Axis::Y,
        };
        Self::empty()
            .with(ForceFeedbackActuator::LeftMotor, projection)
            .with(ForceFeedbackActuator::RightMotor, projection)
    }
}

impl ForceFeedbackActuatorMap {
    /// Map with every actuator disabled
    pub fn empty() -> Self {
        Self {
            actuators: [None; ForceFeedbackActuator::COUNT],
        }
    }

    pub fn get(&self, actuator: ForceFeedbackActuator) -> Option<ActuatorElement> {
        self.actuators[actuator.index()]
    }

    pub fn set(&mut self, actuator: ForceFeedbackActuator, element: Option<ActuatorElement>) {
        self.actuators[actuator.index()] = element;
    }

    pub fn with(mut self, actuator: ForceFeedbackActuator, element: ActuatorElement) -> Self {
        self.set(actuator, Some(element));
        self
    }

    /// Enabled actuators with their elements
    pub fn iter(&self) -> impl Iterator<Item = (ForceFeedbackActuator, ActuatorElement)> + '_ {
        ForceFeedbackActuator::ALL
            .iter()
            .filter_map(|actuator| self.get(*actuator).map(|element| (*actuator, element)))
    }

    /// Compute the physical output for every actuator
    pub fn map_virtual_to_physical(
        &self,
        components: &OrderedMagnitudeComponents,
        gain: f64,
    ) -> PhysicalActuatorComponents {
        let mut physical = PhysicalActuatorComponents::default();
        for (actuator, element) in self.iter() {
            let value = actuator_output(element.raw_magnitude(components), gain);
            physical.set(actuator, value);
        }
        physical
    }
}

/// Scale a raw magnitude by the gain and convert it to the physical
/// actuator range. The magnitude saturates at
/// [EFFECT_FORCE_MAGNITUDE_MAXIMUM] before scaling.
pub fn actuator_output(raw_magnitude: f64, gain: f64) -> u16 {
    let gain = if gain.is_nan() {
        0.0
    } else {
        gain.clamp(0.0, EFFECT_MODIFIER_MAXIMUM)
    };
    let gain_multiplier = gain / EFFECT_MODIFIER_MAXIMUM;
    let magnitude = if raw_magnitude.is_nan() {
        EFFECT_FORCE_MAGNITUDE_ZERO
    } else {
        raw_magnitude.abs()
    };
    let strength = (EFFECT_FORCE_MAGNITUDE_MAXIMUM * gain_multiplier).min(gain_multiplier * magnitude);
    let scaled = strength * (u16::MAX as f64) / EFFECT_FORCE_MAGNITUDE_MAXIMUM;
    scaled.round().clamp(0.0, u16::MAX as f64) as u16
}

/// Output level of each physical actuator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhysicalActuatorComponents {
    pub left_motor: u16,
    pub right_motor: u16,
    pub left_impulse_trigger: u16,
    pub right_impulse_trigger: u16,
}

impl PhysicalActuatorComponents {
    pub fn get(&self, actuator: ForceFeedbackActuator) -> u16 {
        match actuator {
            ForceFeedbackActuator::LeftMotor => self.left_motor,
            ForceFeedbackActuator::RightMotor => self.right_motor,
            ForceFeedbackActuator::LeftImpulseTrigger => self.left_impulse_trigger,
            ForceFeedbackActuator::RightImpulseTrigger => self.right_impulse_trigger,
        }
    }

    pub fn set(&mut self, actuator: ForceFeedbackActuator, value: u16) {
        match actuator {
            ForceFeedbackActuator::LeftMotor => self.left_motor = value,
            ForceFeedbackActuator::RightMotor => self.right_motor = value,
            ForceFeedbackActuator::LeftImpulseTrigger => self.left_impulse_trigger = value,
            ForceFeedbackActuator::RightImpulseTrigger => self.right_impulse_trigger = value,
        }
    }
}
