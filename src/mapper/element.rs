//! Element mappers turn a single physical reading into contributions to the
//! virtual controller state.
use std::fmt::Display;

use crate::controller::{
    clamp_analog,
    keyboard::{KeyIdentifier, KeyboardSink},
    state::ControllerState,
    Axis, AxisDirection, Button, ElementIdentifier, PovDirection, ANALOG_PRESSED_THRESHOLD,
    ANALOG_VALUE_MAX, ANALOG_VALUE_MIN, ANALOG_VALUE_NEUTRAL, TRIGGER_PRESSED_THRESHOLD,
    TRIGGER_VALUE_MAX, TRIGGER_VALUE_MID, TRIGGER_VALUE_MIN,
};

/// Maximum number of children a [CompoundMapper] can hold
pub const COMPOUND_MAX_MAPPERS: usize = 8;

/// Returns true if an analog reading is far enough from neutral to count as
/// pressed. The sign of the displacement does not matter.
pub fn analog_is_pressed(value: i16) -> bool {
    (value as i32 - ANALOG_VALUE_NEUTRAL).abs() > ANALOG_PRESSED_THRESHOLD
}

/// Returns true if a trigger reading counts as pressed
pub fn trigger_is_pressed(value: u8) -> bool {
    value as i32 > TRIGGER_PRESSED_THRESHOLD
}

/// Maps one physical element onto zero or more virtual controller elements
#[derive(Debug, Clone, PartialEq)]
pub enum ElementMapper {
    /// Drives an axis proportionally to the input
    Axis {
        axis: Axis,
        direction: AxisDirection,
    },
    /// Drives an axis to its extremes or neutral
    DigitalAxis {
        axis: Axis,
        direction: AxisDirection,
    },
    Button(Button),
    Pov(PovDirection),
    Keyboard(KeyIdentifier),
    /// Inverts the input before handing it to the wrapped mapper
    Invert(Box<ElementMapper>),
    /// Sends the input to one of two mappers depending on its polarity
    Split {
        positive: Option<Box<ElementMapper>>,
        negative: Option<Box<ElementMapper>>,
    },
    Compound(CompoundMapper),
}

/// Ordered group of up to [COMPOUND_MAX_MAPPERS] mappers that all receive
/// the same input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundMapper {
    mappers: Vec<ElementMapper>,
}

impl CompoundMapper {
    /// Returns `None` if more than [COMPOUND_MAX_MAPPERS] mappers are given
    pub fn new(mappers: Vec<ElementMapper>) -> Option<Self> {
        if mappers.len() > COMPOUND_MAX_MAPPERS {
            return None;
        }
        Some(Self { mappers })
    }

    pub fn mappers(&self) -> &[ElementMapper] {
        self.mappers.as_slice()
    }
}

impl ElementMapper {
    pub fn axis(axis: Axis) -> Self {
        Self::Axis {
            axis,
            direction: AxisDirection::Both,
        }
    }

    pub fn half_axis(axis: Axis, direction: AxisDirection) -> Self {
        Self::Axis { axis, direction }
    }

    pub fn digital_axis(axis: Axis, direction: AxisDirection) -> Self {
        Self::DigitalAxis { axis, direction }
    }

    pub fn invert(mapper: ElementMapper) -> Self {
        Self::Invert(Box::new(mapper))
    }

    pub fn split(positive: Option<ElementMapper>, negative: Option<ElementMapper>) -> Self {
        Self::Split {
            positive: positive.map(Box::new),
            negative: negative.map(Box::new),
        }
    }

    /// Returns `None` if more than [COMPOUND_MAX_MAPPERS] mappers are given
    pub fn compound(mappers: Vec<ElementMapper>) -> Option<Self> {
        CompoundMapper::new(mappers).map(Self::Compound)
    }

    /// Contribute a thumbstick reading
    pub fn contribute_from_analog_value(
        &self,
        state: &mut ControllerState,
        keyboard: &mut dyn KeyboardSink,
        value: i16,
    ) {
        match self {
            Self::Axis { axis, direction } => {
                let value = clamp_analog(value as i32);
                let contribution = match direction {
                    AxisDirection::Both => value,
                    AxisDirection::Positive => (value - ANALOG_VALUE_MIN) / 2,
                    AxisDirection::Negative => (value - ANALOG_VALUE_MAX) / 2,
                };
                state.add_to_axis(*axis, contribution);
            }
            Self::DigitalAxis { axis, direction } => {
                let value = value as i32;
                let positive = value > ANALOG_VALUE_NEUTRAL + ANALOG_PRESSED_THRESHOLD;
                let negative = value < ANALOG_VALUE_NEUTRAL - ANALOG_PRESSED_THRESHOLD;
                let contribution = match direction {
                    AxisDirection::Both if positive => ANALOG_VALUE_MAX,
                    AxisDirection::Both if negative => ANALOG_VALUE_MIN,
                    AxisDirection::Positive if positive => ANALOG_VALUE_MAX,
                    AxisDirection::Negative if negative => ANALOG_VALUE_MIN,
                    _ => ANALOG_VALUE_NEUTRAL,
                };
                state.add_to_axis(*axis, contribution);
            }
            Self::Button(_) | Self::Pov(_) | Self::Keyboard(_) => {
                self.contribute_from_button_value(state, keyboard, analog_is_pressed(value));
            }
            Self::Invert(mapper) => {
                let inverted = clamp_analog(-(value as i32)) as i16;
                mapper.contribute_from_analog_value(state, keyboard, inverted);
            }
            Self::Split { positive, negative } => {
                let is_positive = value as i32 >= ANALOG_VALUE_NEUTRAL;
                let (active, inactive) = Self::split_sides(positive, negative, is_positive);
                if let Some(active) = active {
                    active.contribute_from_analog_value(state, keyboard, value);
                }
                if let Some(inactive) = inactive {
                    inactive.contribute_neutral(state, keyboard);
                }
            }
            Self::Compound(compound) => {
                for mapper in compound.mappers.iter() {
                    mapper.contribute_from_analog_value(state, keyboard, value);
                }
            }
        }
    }

    /// Contribute a trigger reading
    pub fn contribute_from_trigger_value(
        &self,
        state: &mut ControllerState,
        keyboard: &mut dyn KeyboardSink,
        value: u8,
    ) {
        match self {
            Self::Axis { axis, direction } => {
                let value = value as i32;
                let range = TRIGGER_VALUE_MAX - TRIGGER_VALUE_MIN;
                let contribution = match direction {
                    AxisDirection::Both => {
                        ANALOG_VALUE_MIN + value * (ANALOG_VALUE_MAX - ANALOG_VALUE_MIN) / range
                    }
                    AxisDirection::Positive => value * ANALOG_VALUE_MAX / range,
                    AxisDirection::Negative => -(value * ANALOG_VALUE_MAX / range),
                };
                state.add_to_axis(*axis, contribution);
            }
            Self::DigitalAxis { axis, direction } => {
                let pressed = trigger_is_pressed(value);
                let contribution = match direction {
                    AxisDirection::Both if pressed => ANALOG_VALUE_MAX,
                    AxisDirection::Both => ANALOG_VALUE_MIN,
                    AxisDirection::Positive if pressed => ANALOG_VALUE_MAX,
                    AxisDirection::Negative if pressed => ANALOG_VALUE_MIN,
                    _ => ANALOG_VALUE_NEUTRAL,
                };
                state.add_to_axis(*axis, contribution);
            }
            Self::Button(_) | Self::Pov(_) | Self::Keyboard(_) => {
                self.contribute_from_button_value(state, keyboard, trigger_is_pressed(value));
            }
            Self::Invert(mapper) => {
                let inverted = (TRIGGER_VALUE_MAX - value as i32) as u8;
                mapper.contribute_from_trigger_value(state, keyboard, inverted);
            }
            Self::Split { positive, negative } => {
                let is_positive = value as i32 >= TRIGGER_VALUE_MID;
                let (active, inactive) = Self::split_sides(positive, negative, is_positive);
                if let Some(active) = active {
                    active.contribute_from_trigger_value(state, keyboard, value);
                }
                if let Some(inactive) = inactive {
                    inactive.contribute_neutral(state, keyboard);
                }
            }
            Self::Compound(compound) => {
                for mapper in compound.mappers.iter() {
                    mapper.contribute_from_trigger_value(state, keyboard, value);
                }
            }
        }
    }

    /// Contribute a digital button reading
    pub fn contribute_from_button_value(
        &self,
        state: &mut ControllerState,
        keyboard: &mut dyn KeyboardSink,
        pressed: bool,
    ) {
        match self {
            Self::Axis { axis, direction } | Self::DigitalAxis { axis, direction } => {
                let contribution = match direction {
                    AxisDirection::Both if pressed => ANALOG_VALUE_MAX,
                    AxisDirection::Both => ANALOG_VALUE_MIN,
                    AxisDirection::Positive if pressed => ANALOG_VALUE_MAX,
                    AxisDirection::Negative if pressed => ANALOG_VALUE_MIN,
                    _ => ANALOG_VALUE_NEUTRAL,
                };
                state.add_to_axis(*axis, contribution);
            }
            Self::Button(button) => state.merge_button(*button, pressed),
            Self::Pov(direction) => state.merge_pov(*direction, pressed),
            Self::Keyboard(key) => {
                if pressed {
                    keyboard.submit_key_pressed(*key);
                } else {
                    keyboard.submit_key_released(*key);
                }
            }
            // Button readings pass through uninverted
            Self::Invert(mapper) => mapper.contribute_from_button_value(state, keyboard, pressed),
            Self::Split { positive, negative } => {
                let (active, inactive) = Self::split_sides(positive, negative, pressed);
                if let Some(active) = active {
                    active.contribute_from_button_value(state, keyboard, pressed);
                }
                if let Some(inactive) = inactive {
                    inactive.contribute_neutral(state, keyboard);
                }
            }
            Self::Compound(compound) => {
                for mapper in compound.mappers.iter() {
                    mapper.contribute_from_button_value(state, keyboard, pressed);
                }
            }
        }
    }

    /// Contribute the resting state. Only mappers that own state outside of
    /// the virtual controller need to do anything here.
    pub fn contribute_neutral(&self, state: &mut ControllerState, keyboard: &mut dyn KeyboardSink) {
        match self {
            Self::Axis { .. } | Self::DigitalAxis { .. } | Self::Button(_) | Self::Pov(_) => (),
            Self::Keyboard(key) => keyboard.submit_key_released(*key),
            Self::Invert(mapper) => mapper.contribute_neutral(state, keyboard),
            Self::Split { positive, negative } => {
                if let Some(positive) = positive {
                    positive.contribute_neutral(state, keyboard);
                }
                if let Some(negative) = negative {
                    negative.contribute_neutral(state, keyboard);
                }
            }
            Self::Compound(compound) => {
                for mapper in compound.mappers.iter() {
                    mapper.contribute_neutral(state, keyboard);
                }
            }
        }
    }

    /// Number of virtual controller elements this mapper writes to
    pub fn target_element_count(&self) -> usize {
        match self {
            Self::Axis { .. } | Self::DigitalAxis { .. } | Self::Button(_) | Self::Pov(_) => 1,
            Self::Keyboard(_) => 0,
            Self::Invert(mapper) => mapper.target_element_count(),
            Self::Split { positive, negative } => {
                positive.as_ref().map_or(0, |m| m.target_element_count())
                    + negative.as_ref().map_or(0, |m| m.target_element_count())
            }
            Self::Compound(compound) => compound
                .mappers
                .iter()
                .map(|m| m.target_element_count())
                .sum(),
        }
    }

    /// Returns the target element at the given index, where
    /// `index < target_element_count()`
    pub fn target_element_at(&self, index: usize) -> Option<ElementIdentifier> {
        match self {
            Self::Axis { axis, .. } | Self::DigitalAxis { axis, .. } => {
                (index == 0).then_some(ElementIdentifier::Axis(*axis))
            }
            Self::Button(button) => (index == 0).then_some(ElementIdentifier::Button(*button)),
            Self::Pov(_) => (index == 0).then_some(ElementIdentifier::Pov),
            Self::Keyboard(_) => None,
            Self::Invert(mapper) => mapper.target_element_at(index),
            Self::Split { positive, negative } => {
                let children = [positive.as_deref(), negative.as_deref()];
                Self::child_target_at(children.into_iter().flatten(), index)
            }
            Self::Compound(compound) => Self::child_target_at(compound.mappers.iter(), index),
        }
    }

    /// All target elements in order. Duplicates are kept.
    pub fn target_elements(&self) -> Vec<ElementIdentifier> {
        (0..self.target_element_count())
            .filter_map(|i| self.target_element_at(i))
            .collect()
    }

    fn child_target_at<'a>(
        children: impl Iterator<Item = &'a ElementMapper>,
        mut index: usize,
    ) -> Option<ElementIdentifier> {
        for child in children {
            let count = child.target_element_count();
            if index < count {
                return child.target_element_at(index);
            }
            index -= count;
        }
        None
    }

    fn split_sides<'a>(
        positive: &'a Option<Box<ElementMapper>>,
        negative: &'a Option<Box<ElementMapper>>,
        is_positive: bool,
    ) -> (Option<&'a ElementMapper>, Option<&'a ElementMapper>) {
        if is_positive {
            (positive.as_deref(), negative.as_deref())
        } else {
            (negative.as_deref(), positive.as_deref())
        }
    }
}

/// Formats the mapper in the same syntax accepted by the mapper string parser
impl Display for ElementMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Axis { axis, direction } => match direction {
                AxisDirection::Both => write!(f, "Axis({axis})"),
                _ => write!(f, "Axis({axis}, {direction})"),
            },
            Self::DigitalAxis { axis, direction } => match direction {
                AxisDirection::Both => write!(f, "DigitalAxis({axis})"),
                _ => write!(f, "DigitalAxis({axis}, {direction})"),
            },
            Self::Button(button) => write!(f, "Button({})", button.number()),
            Self::Pov(direction) => write!(f, "Pov({direction})"),
            Self::Keyboard(key) => write!(f, "Keyboard({key})"),
            Self::Invert(mapper) => write!(f, "Invert({mapper})"),
            Self::Split { positive, negative } => {
                write!(f, "Split(")?;
                match positive {
                    Some(mapper) => write!(f, "{mapper}")?,
                    None => write!(f, "Null")?,
                }
                write!(f, ", ")?;
                match negative {
                    Some(mapper) => write!(f, "{mapper}")?,
                    None => write!(f, "Null")?,
                }
                write!(f, ")")
            }
            Self::Compound(compound) => {
                let parts: Vec<String> = compound.mappers.iter().map(|m| m.to_string()).collect();
                write!(f, "Compound({})", parts.join(", "))
            }
        }
    }
}
