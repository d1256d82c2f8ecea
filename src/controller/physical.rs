//! Physical XInput-style gamepad readings
use packed_struct::prelude::*;
use serde::Serialize;

/// XInput button flags as they appear in [PhysicalGamepad::buttons]
pub mod button_flags {
    pub const DPAD_UP: u16 = 0x0001;
    pub const DPAD_DOWN: u16 = 0x0002;
    pub const DPAD_LEFT: u16 = 0x0004;
    pub const DPAD_RIGHT: u16 = 0x0008;
    pub const START: u16 = 0x0010;
    pub const BACK: u16 = 0x0020;
    pub const LEFT_THUMB: u16 = 0x0040;
    pub const RIGHT_THUMB: u16 = 0x0080;
    pub const LEFT_SHOULDER: u16 = 0x0100;
    pub const RIGHT_SHOULDER: u16 = 0x0200;
    pub const A: u16 = 0x1000;
    pub const B: u16 = 0x2000;
    pub const X: u16 = 0x4000;
    pub const Y: u16 = 0x8000;

    /// Flag names in the order they are listed by diagnostics
    pub const NAMED: [(&str, u16); 14] = [
        ("DpadUp", DPAD_UP),
        ("DpadDown", DPAD_DOWN),
        ("DpadLeft", DPAD_LEFT),
        ("DpadRight", DPAD_RIGHT),
        ("Start", START),
        ("Back", BACK),
        ("LS", LEFT_THUMB),
        ("RS", RIGHT_THUMB),
        ("LB", LEFT_SHOULDER),
        ("RB", RIGHT_SHOULDER),
        ("A", A),
        ("B", B),
        ("X", X),
        ("Y", Y),
    ];
}

/// Size of a raw [XInputGamepadReport] in bytes
pub const GAMEPAD_REPORT_SIZE: usize = 12;

/// Raw XInput gamepad report
/// Byte 0-1: button flags
/// Byte 2: left trigger
/// Byte 3: right trigger
/// Byte 4-11: thumbstick readings
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "12")]
pub struct XInputGamepadReport {
    // BYTES 0-1
    #[packed_field(bytes = "0..=1", endian = "lsb")]
    pub buttons: u16,
    // BYTE 2
    #[packed_field(bytes = "2")]
    pub left_trigger: u8,
    // BYTE 3
    #[packed_field(bytes = "3")]
    pub right_trigger: u8,
    // BYTES 4-5
    #[packed_field(bytes = "4..=5", endian = "lsb")]
    pub thumb_lx: i16,
    // BYTES 6-7
    #[packed_field(bytes = "6..=7", endian = "lsb")]
    pub thumb_ly: i16,
    // BYTES 8-9
    #[packed_field(bytes = "8..=9", endian = "lsb")]
    pub thumb_rx: i16,
    // BYTES 10-11
    #[packed_field(bytes = "10..=11", endian = "lsb")]
    pub thumb_ry: i16,
}

/// One reading of a physical gamepad. Thumbstick Y axes are positive when
/// pushed up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhysicalGamepad {
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

impl PhysicalGamepad {
    /// Returns true if every bit in the given XInput button flag is set
    pub fn is_button_pressed(&self, flag: u16) -> bool {
        (self.buttons & flag) == flag
    }

    /// Decode a raw XInput gamepad report
    pub fn from_report_bytes(data: &[u8]) -> Result<Self, PackingError> {
        let report = XInputGamepadReport::unpack_from_slice(data)?;
        Ok(report.into())
    }

    /// Names of all pressed buttons
    pub fn pressed_button_names(&self) -> Vec<&'static str> {
        button_flags::NAMED
            .iter()
            .filter(|(_, flag)| self.is_button_pressed(*flag))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl From<XInputGamepadReport> for PhysicalGamepad {
    fn from(report: XInputGamepadReport) -> Self {
        Self {
            buttons: report.buttons,
            left_trigger: report.left_trigger,
            right_trigger: report.right_trigger,
            thumb_lx: report.thumb_lx,
            thumb_ly: report.thumb_ly,
            thumb_rx: report.thumb_rx,
            thumb_ry: report.thumb_ry,
        }
    }
}

impl From<PhysicalGamepad> for XInputGamepadReport {
    fn from(gamepad: PhysicalGamepad) -> Self {
        Self {
            buttons: gamepad.buttons,
            left_trigger: gamepad.left_trigger,
            right_trigger: gamepad.right_trigger,
            thumb_lx: gamepad.thumb_lx,
            thumb_ly: gamepad.thumb_ly,
            thumb_rx: gamepad.thumb_rx,
            thumb_ry: gamepad.thumb_ry,
        }
    }
}

/// Result code of a successful physical read
pub const READ_SUCCESS: u32 = 0;

/// Physical controller reading along with the status of the read that
/// produced it.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PhysicalState {
    pub error_code: u32,
    pub packet_number: u32,
    pub gamepad: PhysicalGamepad,
}

impl PhysicalState {
    pub fn new(packet_number: u32, gamepad: PhysicalGamepad) -> Self {
        Self {
            error_code: READ_SUCCESS,
            packet_number,
            gamepad,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error_code == READ_SUCCESS
    }
}

/// Two states are equal when nothing observable changed between them. The
/// packet number only matters for successful reads.
impl PartialEq for PhysicalState {
    fn eq(&self, other: &Self) -> bool {
        if self.error_code != other.error_code {
            return false;
        }
        if self.is_ok() {
            return self.packet_number == other.packet_number;
        }
        true
    }
}

impl Eq for PhysicalState {}
