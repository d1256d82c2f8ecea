use std::error::Error;

use clap::Subcommand;
use padmap::mapper::parser::{
    compute_recursion_depth, element_mapper_from_string, extract_parts,
    find_controller_element_index, find_force_feedback_actuator,
    force_feedback_actuator_from_string,
};
use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

#[derive(Subcommand, Debug, Clone)]
pub enum ParseCommand {
    /// Parse an element mapper string (e.g. "Split(Button(1), Axis(Z, -))")
    ElementMapper { value: String },
    /// Check a physical controller element name (e.g. "TriggerLT")
    Element { value: String },
    /// Check a force feedback actuator name (e.g. "ForceFeedback.LeftMotor")
    Actuator { value: String },
    /// Parse a force feedback actuator element string (e.g. "SingleAxis(X, +)")
    ActuatorElement { value: String },
}

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Target")]
    target: String,
}

pub fn handle_parse(cmd: ParseCommand) -> Result<(), Box<dyn Error>> {
    match cmd {
        ParseCommand::ElementMapper { value } => {
            if let Some(parts) = extract_parts(&value) {
                log::debug!("Type: {}, params: {}", parts.type_name, parts.params);
            }
            let depth = compute_recursion_depth(&value).unwrap_or_default();
            let Some(mapper) = element_mapper_from_string(&value)? else {
                println!("Null mapper (depth {depth})");
                return Ok(());
            };
            println!("{mapper} (depth {depth})");

            let rows: Vec<TargetRow> = mapper
                .target_elements()
                .into_iter()
                .enumerate()
                .map(|(index, target)| TargetRow {
                    index,
                    target: target.to_string(),
                })
                .collect();
            let count = rows.len();
            let mut table = Table::new(rows);
            table
                .with(Style::modern_rounded())
                .with(Panel::header("Target Elements"));
            println!("{table}");
            println!("Found {count} target element(s)");
        }
        ParseCommand::Element { value } => match find_controller_element_index(&value) {
            Some(index) => println!("{value} is controller element {index}"),
            None => return Err(format!("Unknown controller element: {value}").into()),
        },
        ParseCommand::Actuator { value } => match find_force_feedback_actuator(&value) {
            Some(actuator) => println!("{value} is actuator {}", actuator.index()),
            None => return Err(format!("Unknown force feedback actuator: {value}").into()),
        },
        ParseCommand::ActuatorElement { value } => {
            match force_feedback_actuator_from_string(&value)? {
                Some(element) => {
                    let axes: Vec<String> = element.axes().iter().map(|a| a.to_string()).collect();
                    println!("{element} (axes: {})", axes.join(", "));
                }
                None => println!("Actuator disabled"),
            }
        }
    }

    Ok(())
}
