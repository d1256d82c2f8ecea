pub mod mapper;
pub mod parse;
pub mod translate;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use mapper::{handle_configured, handle_mappers, MappersCommand};
use padmap::config::{load_mapper_configs, merge_selections, MapperConfig};
use padmap::mapper::builder::MapperBuilder;
use padmap::mapper::definitions::register_builtin_mappers;
use padmap::mapper::registry::MapperRegistry;
use parse::{handle_parse, ParseCommand};
use translate::{handle_rumble, handle_translate, RumbleArgs, TranslateArgs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Additional mapper config file(s) to load after the default locations
    #[arg(long = "config", short = 'c')]
    pub configs: Vec<PathBuf>,
    /// Skip loading mapper configs from the default locations
    #[arg(long, action)]
    pub no_default_configs: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Inspect registered mappers
    Mappers {
        #[command(subcommand)]
        cmd: MappersCommand,
    },
    /// Show the mapper configured for a controller slot
    Configured {
        /// Controller slot (0-3)
        slot: usize,
    },
    /// Translate a physical gamepad reading with a mapper
    Translate(TranslateArgs),
    /// Translate force feedback magnitudes to physical actuator levels
    Rumble(RumbleArgs),
    /// Check mapper strings
    Parse {
        #[command(subcommand)]
        cmd: ParseCommand,
    },
}

pub fn main_cli(args: Args) -> Result<(), Box<dyn Error>> {
    let Args {
        configs,
        no_default_configs,
        cmd,
    } = args;
    let load = || load_registry(configs.as_slice(), no_default_configs);

    match cmd {
        Commands::Mappers { cmd } => handle_mappers(&*load()?, cmd)?,
        Commands::Configured { slot } => handle_configured(&*load()?, slot)?,
        Commands::Translate(cmd) => handle_translate(&*load()?, cmd)?,
        Commands::Rumble(cmd) => handle_rumble(&*load()?, cmd)?,
        Commands::Parse { cmd } => handle_parse(cmd)?,
    }

    Ok(())
}

/// Create the registry with the built-in mappers plus every custom mapper
/// defined by the loaded mapper configs
pub fn load_registry(
    paths: &[PathBuf],
    no_default_configs: bool,
) -> Result<Arc<MapperRegistry>, Box<dyn Error>> {
    let mut configs: Vec<MapperConfig> = Vec::new();
    if !no_default_configs {
        configs.extend(load_mapper_configs().into_iter().map(|(_, config)| config));
    }
    for path in paths {
        let config = MapperConfig::from_yaml_path(path)
            .map_err(|e| format!("Unable to load {}: {e}", path.display()))?;
        configs.push(config);
    }
    log::debug!("Loaded {} mapper config(s)", configs.len());

    let registry = Arc::new(MapperRegistry::with_selection(merge_selections(
        configs.iter(),
    )));
    register_builtin_mappers(&registry);

    let mut builder = MapperBuilder::new(registry.clone());
    for config in configs.iter() {
        for e in config.apply_custom_mappers(&mut builder) {
            log::warn!("Config '{}': {e}", config.name);
        }
    }
    if let Err(e) = builder.build_all() {
        log::warn!("{e}");
    }

    Ok(registry)
}
