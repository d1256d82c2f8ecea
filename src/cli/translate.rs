use std::error::Error;

use clap::Args;
use padmap::controller::keyboard::KeyboardState;
use padmap::controller::physical::{button_flags, PhysicalGamepad};
use padmap::controller::Axis;
use padmap::mapper::force_feedback::{
    ForceFeedbackActuator, OrderedMagnitudeComponents, EFFECT_MODIFIER_MAXIMUM,
};
use padmap::mapper::registry::MapperRegistry;
use serde_json::json;
use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

#[derive(Args, Debug, Clone)]
pub struct TranslateArgs {
    /// Mapper name (empty for the default mapper)
    pub name: String,
    /// Raw 12 byte XInput gamepad report as hex (e.g. "001000000000000000000000").
    /// Overrides all other inputs.
    #[arg(long)]
    pub report: Option<String>,
    /// Left stick X
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub lx: i16,
    /// Left stick Y (positive is up)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub ly: i16,
    /// Right stick X
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub rx: i16,
    /// Right stick Y (positive is up)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub ry: i16,
    /// Left trigger
    #[arg(long, default_value_t = 0)]
    pub lt: u8,
    /// Right trigger
    #[arg(long, default_value_t = 0)]
    pub rt: u8,
    /// Pressed buttons (e.g. "A,LB,DpadUp")
    #[arg(long, value_delimiter = ',')]
    pub buttons: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RumbleArgs {
    /// Mapper name (empty for the default mapper)
    pub name: String,
    /// Effect magnitude on each axis in X, Y, Z, RotX, RotY, RotZ order
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub magnitudes: Vec<f64>,
    /// Device gain (0-10000)
    #[arg(long, default_value_t = EFFECT_MODIFIER_MAXIMUM)]
    pub gain: f64,
}

#[derive(Tabled)]
struct ActuatorLevelRow {
    #[tabled(rename = "Actuator")]
    actuator: String,
    #[tabled(rename = "Level")]
    level: u16,
}

/// Decode hex text such as "0a ff 10" or "0aff10" into bytes
fn decode_hex(text: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err("Hex report must have an even number of digits".into());
    }
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for i in (0..digits.len()).step_by(2) {
        let byte = digits
            .get(i..i + 2)
            .ok_or("Hex report contains invalid characters")?;
        bytes.push(u8::from_str_radix(byte, 16)?);
    }
    Ok(bytes)
}

fn button_flag(name: &str) -> Option<u16> {
    button_flags::NAMED
        .iter()
        .find(|(flag_name, _)| flag_name.eq_ignore_ascii_case(name.trim()))
        .map(|(_, flag)| *flag)
}

impl TranslateArgs {
    fn gamepad(&self) -> Result<PhysicalGamepad, Box<dyn Error>> {
        if let Some(report) = self.report.as_ref() {
            let bytes = decode_hex(report)?;
            let gamepad = PhysicalGamepad::from_report_bytes(&bytes)
                .map_err(|e| format!("Invalid gamepad report: {e:?}"))?;
            return Ok(gamepad);
        }

        let mut buttons = 0;
        for name in self.buttons.iter() {
            let flag = button_flag(name).ok_or_else(|| format!("Unknown button: {name}"))?;
            buttons |= flag;
        }
        Ok(PhysicalGamepad {
            buttons,
            left_trigger: self.lt,
            right_trigger: self.rt,
            thumb_lx: self.lx,
            thumb_ly: self.ly,
            thumb_rx: self.rx,
            thumb_ry: self.ry,
        })
    }
}

pub fn handle_translate(registry: &MapperRegistry, args: TranslateArgs) -> Result<(), Box<dyn Error>> {
    let Some(mapper) = registry.get_by_name(&args.name) else {
        return Err(format!("No mapper exists with name: {}", args.name).into());
    };
    let gamepad = args.gamepad()?;
    log::debug!("Translating {gamepad:?} with mapper '{}'", mapper.name());

    let mut keyboard = KeyboardState::new();
    let state = mapper.map_physical_to_virtual_with_keyboard(&gamepad, &mut keyboard);
    let keys: Vec<String> = keyboard
        .pressed_keys()
        .iter()
        .map(|key| key.to_string())
        .collect();

    let output = json!({
        "mapper": mapper.name(),
        "physical": {
            "gamepad": gamepad,
            "pressed": gamepad.pressed_button_names(),
        },
        "virtual": state,
        "keyboard": keys,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

pub fn handle_rumble(registry: &MapperRegistry, args: RumbleArgs) -> Result<(), Box<dyn Error>> {
    let Some(mapper) = registry.get_by_name(&args.name) else {
        return Err(format!("No mapper exists with name: {}", args.name).into());
    };
    if args.magnitudes.len() > Axis::COUNT {
        return Err(format!("At most {} magnitudes can be given", Axis::COUNT).into());
    }

    let mut components: OrderedMagnitudeComponents = [0.0; Axis::COUNT];
    for (component, magnitude) in components.iter_mut().zip(args.magnitudes.iter()) {
        *component = *magnitude;
    }
    let levels = mapper.map_force_feedback_virtual_to_physical(&components, args.gain);

    let rows: Vec<ActuatorLevelRow> = ForceFeedbackActuator::ALL
        .iter()
        .map(|actuator| ActuatorLevelRow {
            actuator: actuator.to_string(),
            level: levels.get(*actuator),
        })
        .collect();
    let mut table = Table::new(rows);
    table
        .with(Style::modern_rounded())
        .with(Panel::header(format!("Actuators: {}", mapper.name())));
    println!("{table}");

    Ok(())
}
