use serde::Serialize;

use super::{clamp_analog, Axis, Button, PovDirection};

/// Pressed state of each of the four POV directions. Opposing directions may
/// both be pressed; resolving them is left to whoever presents the hat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PovState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl PovState {
    pub fn is_pressed(&self, direction: PovDirection) -> bool {
        match direction {
            PovDirection::Up => self.up,
            PovDirection::Down => self.down,
            PovDirection::Left => self.left,
            PovDirection::Right => self.right,
        }
    }

    pub fn set(&mut self, direction: PovDirection, pressed: bool) {
        let component = match direction {
            PovDirection::Up => &mut self.up,
            PovDirection::Down => &mut self.down,
            PovDirection::Left => &mut self.left,
            PovDirection::Right => &mut self.right,
        };
        *component = pressed;
    }

    /// All four components as a bitmask, one bit per direction in
    /// [PovDirection] order (bit 0 is up).
    pub fn all(&self) -> u8 {
        PovDirection::ALL
            .iter()
            .filter(|direction| self.is_pressed(**direction))
            .fold(0, |bits, direction| bits | (1 << direction.index()))
    }
}

/// Snapshot of the virtual controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControllerState {
    /// Axis values indexed by [Axis::index]
    pub axis: [i32; Axis::COUNT],
    /// Button states indexed by [Button::index]
    pub button: [bool; Button::COUNT],
    pub pov: PovState,
}

impl ControllerState {
    pub fn axis_value(&self, axis: Axis) -> i32 {
        self.axis[axis.index()]
    }

    pub fn is_button_pressed(&self, button: Button) -> bool {
        self.button[button.index()]
    }

    /// Accumulate a contribution into the given axis. The sum may leave the
    /// axis range until [ControllerState::saturate_axes] is called.
    pub fn add_to_axis(&mut self, axis: Axis, value: i32) {
        let current = &mut self.axis[axis.index()];
        *current = current.saturating_add(value);
    }

    /// Presses the given button if `pressed` is true. A released input never
    /// clears a button another element already pressed.
    pub fn merge_button(&mut self, button: Button, pressed: bool) {
        self.button[button.index()] |= pressed;
    }

    /// Presses the given POV direction if `pressed` is true
    pub fn merge_pov(&mut self, direction: PovDirection, pressed: bool) {
        if pressed {
            self.pov.set(direction, true);
        }
    }

    /// Clamp every axis into the virtual axis range
    pub fn saturate_axes(&mut self) {
        for value in self.axis.iter_mut() {
            *value = clamp_analog(*value);
        }
    }
}
