//! Types that describe the virtual controller presented to applications and
//! the physical XInput-style gamepad that feeds it.
pub mod capabilities;
pub mod keyboard;
pub mod physical;
pub mod state;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Maximum value of a virtual axis or a physical thumbstick reading
pub const ANALOG_VALUE_MAX: i32 = 32767;
/// Minimum value of a virtual axis or a physical thumbstick reading. The
/// range is kept symmetric so negation never overflows.
pub const ANALOG_VALUE_MIN: i32 = -32767;
/// Resting value of a virtual axis or a physical thumbstick
pub const ANALOG_VALUE_NEUTRAL: i32 = 0;

/// Maximum physical trigger reading
pub const TRIGGER_VALUE_MAX: i32 = 255;
/// Minimum physical trigger reading
pub const TRIGGER_VALUE_MIN: i32 = 0;
/// Trigger reading considered the midpoint of its travel
pub const TRIGGER_VALUE_MID: i32 = 127;

/// Analog displacement from neutral beyond which an analog reading counts as
/// a button press.
pub const ANALOG_PRESSED_THRESHOLD: i32 = (ANALOG_VALUE_MAX - ANALOG_VALUE_NEUTRAL) / 2;
/// Trigger reading above which a trigger counts as a button press. Matches
/// the XInput trigger threshold.
pub const TRIGGER_PRESSED_THRESHOLD: i32 = 30;

/// Number of physical controller slots
pub const PHYSICAL_CONTROLLER_COUNT: usize = 4;

/// Saturate a value into the virtual axis range
pub fn clamp_analog(value: i32) -> i32 {
    value.clamp(ANALOG_VALUE_MIN, ANALOG_VALUE_MAX)
}

/// Virtual axis types. The declaration order is the canonical order used
/// when reporting axes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Axis {
    X,
    Y,
    Z,
    RotX,
    RotY,
    RotZ,
}

impl Axis {
    pub const COUNT: usize = 6;
    pub const ALL: [Axis; Axis::COUNT] = [
        Axis::X,
        Axis::Y,
        Axis::Z,
        Axis::RotX,
        Axis::RotY,
        Axis::RotZ,
    ];

    /// Index of the axis into [state::ControllerState::axis]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Axis> {
        Axis::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::RotX => "RotX",
            Axis::RotY => "RotY",
            Axis::RotZ => "RotZ",
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Restricts which half of an axis a mapper drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisDirection {
    #[default]
    Both,
    Positive,
    Negative,
}

impl AxisDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisDirection::Both => "Both",
            AxisDirection::Positive => "+",
            AxisDirection::Negative => "-",
        }
    }
}

impl Display for AxisDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Virtual buttons, numbered from 1 to 16
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Button {
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
    B10,
    B11,
    B12,
    B13,
    B14,
    B15,
    B16,
}

impl Button {
    pub const COUNT: usize = 16;
    pub const ALL: [Button; Button::COUNT] = [
        Button::B1,
        Button::B2,
        Button::B3,
        Button::B4,
        Button::B5,
        Button::B6,
        Button::B7,
        Button::B8,
        Button::B9,
        Button::B10,
        Button::B11,
        Button::B12,
        Button::B13,
        Button::B14,
        Button::B15,
        Button::B16,
    ];

    /// Zero-based index of the button into [state::ControllerState::button]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Button> {
        Button::ALL.get(index).copied()
    }

    /// Returns the button with the given one-based number (e.g. 1 for [Button::B1])
    pub fn from_number(number: usize) -> Option<Button> {
        number.checked_sub(1).and_then(Button::from_index)
    }

    /// One-based button number
    pub fn number(&self) -> usize {
        self.index() + 1
    }
}

impl Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "B{}", self.number())
    }
}

/// Directions of the virtual point-of-view hat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PovDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PovDirection {
    pub const COUNT: usize = 4;
    pub const ALL: [PovDirection; PovDirection::COUNT] = [
        PovDirection::Up,
        PovDirection::Down,
        PovDirection::Left,
        PovDirection::Right,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PovDirection::Up => "Up",
            PovDirection::Down => "Down",
            PovDirection::Left => "Left",
            PovDirection::Right => "Right",
        }
    }
}

impl Display for PovDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies one element of the virtual controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementIdentifier {
    Axis(Axis),
    Button(Button),
    Pov,
    WholeController,
}

impl Display for ElementIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementIdentifier::Axis(axis) => write!(f, "Axis {axis}"),
            ElementIdentifier::Button(button) => write!(f, "Button {}", button.number()),
            ElementIdentifier::Pov => write!(f, "POV"),
            ElementIdentifier::WholeController => write!(f, "Controller"),
        }
    }
}
