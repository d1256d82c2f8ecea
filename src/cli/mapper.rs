use std::error::Error;

use clap::Subcommand;
use padmap::controller::capabilities::Capabilities;
use padmap::mapper::element_map::PhysicalElement;
use padmap::mapper::force_feedback::ForceFeedbackActuator;
use padmap::mapper::registry::MapperRegistry;
use padmap::mapper::Mapper;
use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

#[derive(Subcommand, Debug, Clone)]
pub enum MappersCommand {
    /// List all registered mappers
    List,
    /// Show the element and force feedback assignments of a mapper
    Show {
        /// Mapper name (empty for the default mapper)
        name: String,
    },
    /// Log and print the capabilities of every registered mapper
    Dump,
}

#[derive(Tabled)]
struct MapperRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Axes")]
    axes: String,
    #[tabled(rename = "Buttons")]
    buttons: u8,
    #[tabled(rename = "POV")]
    pov: bool,
    #[tabled(rename = "Force Feedback Axes")]
    force_feedback: String,
    #[tabled(rename = "Default")]
    default: String,
}

#[derive(Tabled)]
struct ElementRow {
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "Mapper")]
    mapper: String,
    #[tabled(rename = "Targets")]
    targets: String,
}

#[derive(Tabled)]
struct ActuatorRow {
    #[tabled(rename = "Actuator")]
    actuator: String,
    #[tabled(rename = "Element")]
    element: String,
}

fn axis_list(caps: &Capabilities, force_feedback_only: bool) -> String {
    caps.axes
        .iter()
        .filter(|axis| !force_feedback_only || axis.supports_force_feedback)
        .map(|axis| axis.axis.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

fn capabilities_table(mapper: &Mapper) -> Table {
    let caps = mapper.capabilities();
    let row = MapperRow {
        name: mapper.name().to_string(),
        axes: axis_list(caps, false),
        buttons: caps.num_buttons,
        pov: caps.has_pov,
        force_feedback: axis_list(caps, true),
        default: String::new(),
    };
    let mut table = Table::new(vec![row]);
    table
        .with(Style::modern_rounded())
        .with(Panel::header("Capabilities"));
    table
}

pub fn handle_mappers(registry: &MapperRegistry, cmd: MappersCommand) -> Result<(), Box<dyn Error>> {
    match cmd {
        MappersCommand::List => {
            let default_name = registry.default_name();
            let rows: Vec<MapperRow> = registry
                .names()
                .into_iter()
                .filter_map(|name| registry.get_by_name(&name))
                .map(|mapper| {
                    let caps = mapper.capabilities();
                    let is_default = default_name.as_deref() == Some(mapper.name());
                    MapperRow {
                        name: mapper.name().to_string(),
                        axes: axis_list(caps, false),
                        buttons: caps.num_buttons,
                        pov: caps.has_pov,
                        force_feedback: axis_list(caps, true),
                        default: if is_default { "*".into() } else { String::new() },
                    }
                })
                .collect();
            let count = rows.len();

            let mut table = Table::new(rows);
            table
                .with(Style::modern_rounded())
                .with(Panel::header("Mappers"));
            println!("{table}");
            println!("Found {count} mapper(s)");
        }
        MappersCommand::Show { name } => {
            let Some(mapper) = registry.get_by_name(&name) else {
                return Err(format!("No mapper exists with name: {name}").into());
            };

            let elements = mapper.element_map();
            let rows: Vec<ElementRow> = PhysicalElement::ALL
                .iter()
                .map(|element| {
                    let assigned = elements.get(*element);
                    let targets = assigned
                        .map(|m| {
                            m.target_elements()
                                .iter()
                                .map(|target| target.to_string())
                                .collect::<Vec<String>>()
                                .join(", ")
                        })
                        .unwrap_or_default();
                    ElementRow {
                        element: element.to_string(),
                        mapper: assigned.map_or("Null".to_string(), |m| m.to_string()),
                        targets,
                    }
                })
                .collect();
            let mut table = Table::new(rows);
            table
                .with(Style::modern_rounded())
                .with(Panel::header(format!("Mapper: {}", mapper.name())));
            println!("{table}");

            let actuators = mapper.force_feedback_actuator_map();
            let rows: Vec<ActuatorRow> = ForceFeedbackActuator::ALL
                .iter()
                .map(|actuator| ActuatorRow {
                    actuator: actuator.to_string(),
                    element: actuators
                        .get(*actuator)
                        .map_or("Null".to_string(), |e| e.to_string()),
                })
                .collect();
            let mut table = Table::new(rows);
            table
                .with(Style::modern_rounded())
                .with(Panel::header("Force Feedback"));
            println!("{table}");
            println!("{}", capabilities_table(&mapper));
        }
        MappersCommand::Dump => {
            registry.dump_registered_mappers();
            let capabilities = registry.registered_capabilities();
            println!("{}", serde_json::to_string_pretty(&capabilities)?);
        }
    }

    Ok(())
}

pub fn handle_configured(registry: &MapperRegistry, slot: usize) -> Result<(), Box<dyn Error>> {
    let mapper = registry.get_configured(slot);
    let name = match mapper.is_anonymous() {
        true => "(null)",
        false => mapper.name(),
    };
    println!("Controller {slot} uses mapper: {name}");
    println!("{}", capabilities_table(&mapper));

    Ok(())
}
