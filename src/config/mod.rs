pub mod path;


use std::{collections::BTreeMap, io, io::Read, path::Path, path::PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    controller::PHYSICAL_CONTROLLER_COUNT,
    mapper::{
        builder::{BuildError, MapperBuilder},
        registry::MapperSelection,
    },
};

use path::{get_mappers_paths, get_multidir_sorted_files};

/// Kind of document expected in a mapper configuration file
pub const MAPPER_CONFIG_KIND: &str = "MapperConfig";

/// Represents all possible errors loading a [MapperConfig]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
    #[error("Unsupported config kind: {0}")]
    InvalidKind(String),
}

/// Represents errors found while applying a loaded [MapperConfig]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Custom mapper '{name}': {source}")]
    CustomMapper {
        name: String,
        #[source]
        source: BuildError,
    },
    #[error("Controller slot {0} is out of range")]
    InvalidSlot(usize),
}

/// Loads all mapper configs in all default locations in load order
pub fn load_mapper_configs() -> Vec<(PathBuf, MapperConfig)> {
    let paths = get_mappers_paths();
    let files = get_multidir_sorted_files(paths.as_slice(), |entry| {
        entry
            .path()
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml")
    });

    let mut configs = Vec::with_capacity(files.len());
    for file in files {
        log::trace!("Found file: {}", file.display());
        match MapperConfig::from_yaml_path(&file) {
            Ok(config) => configs.push((file, config)),
            Err(e) => log::warn!("Failed to load mapper config {}: {e}", file.display()),
        }
    }

    configs
}

/// Combine the mapper selections of several configs. Selections from later
/// configs take precedence.
pub fn merge_selections<'a>(configs: impl IntoIterator<Item = &'a MapperConfig>) -> MapperSelection {
    let mut merged = MapperSelection::default();
    for config in configs {
        let selection = config.selection();
        if selection.default_name.is_some() {
            merged.default_name = selection.default_name;
        }
        merged.per_controller.extend(selection.per_controller);
    }
    merged
}

/// Mapper configuration file. Selects which mapper each controller uses and
/// defines custom mappers.
#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct MapperConfig {
    pub version: u32,
    pub kind: String,
    pub name: String,
    pub description: Option<String>,
    pub mapper: Option<MapperSelectionConfig>,
    pub custom_mappers: Option<Vec<CustomMapperConfig>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub struct MapperSelectionConfig {
    /// Mapper used by every controller without its own selection
    #[serde(rename = "type")]
    pub mapper_type: Option<String>,
    /// Mapper selected per controller slot (0-3)
    pub controllers: Option<BTreeMap<usize, String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CustomMapperConfig {
    pub name: String,
    /// Registered mapper or other custom mapper this one starts from
    pub template: Option<String>,
    /// Element mapper strings keyed by physical element (e.g. "ButtonA")
    pub elements: Option<BTreeMap<String, String>>,
    /// Actuator element strings keyed by actuator (e.g. "ForceFeedback.LeftMotor")
    pub force_feedback: Option<BTreeMap<String, String>>,
}

impl MapperConfig {
    /// Load a [MapperConfig] from the given YAML string
    pub fn from_yaml(content: String) -> Result<MapperConfig, LoadError> {
        let config: MapperConfig = serde_yaml::from_str(content.as_str())?;
        config.validate()
    }

    /// Load a [MapperConfig] from the given YAML file
    pub fn from_yaml_file(path: String) -> Result<MapperConfig, LoadError> {
        Self::from_yaml_path(path)
    }

    /// Load a [MapperConfig] from the given YAML file path
    pub fn from_yaml_path<P: AsRef<Path>>(path: P) -> Result<MapperConfig, LoadError> {
        let mut file = std::fs::File::open(path)?;
        let mut content = String::default();
        file.read_to_string(&mut content)?;
        Self::from_yaml(content)
    }

    fn validate(self) -> Result<MapperConfig, LoadError> {
        if self.kind != MAPPER_CONFIG_KIND {
            return Err(LoadError::InvalidKind(self.kind));
        }
        Ok(self)
    }

    /// Mapper selection described by this config. Out of range controller
    /// slots are skipped.
    pub fn selection(&self) -> MapperSelection {
        let mut selection = MapperSelection::default();
        let Some(mapper) = self.mapper.as_ref() else {
            return selection;
        };
        selection.default_name = mapper.mapper_type.clone();
        for (slot, name) in mapper.controllers.iter().flatten() {
            if *slot >= PHYSICAL_CONTROLLER_COUNT {
                log::warn!("{}", ConfigError::InvalidSlot(*slot));
                continue;
            }
            selection.per_controller.insert(*slot, name.clone());
        }
        selection
    }

    /// Create a blueprint for every custom mapper in this config. Problems
    /// with individual settings invalidate the affected blueprint and are
    /// returned.
    pub fn apply_custom_mappers(&self, builder: &mut MapperBuilder) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for custom in self.custom_mappers.iter().flatten() {
            errors.extend(custom.apply(builder));
        }
        errors
    }
}

impl CustomMapperConfig {
    /// Create the blueprint for this custom mapper
    pub fn apply(&self, builder: &mut MapperBuilder) -> Vec<ConfigError> {
        let name = self.name.as_str();
        let error = |source: BuildError| ConfigError::CustomMapper {
            name: name.to_string(),
            source,
        };
        if let Err(e) = builder.create_blueprint(name) {
            return vec![error(e)];
        }

        let mut errors = Vec::new();
        if let Some(template) = self.template.as_ref() {
            if let Err(e) = builder.set_blueprint_template(name, template) {
                errors.push(error(e));
            }
        }
        for (element, value) in self.elements.iter().flatten() {
            if let Err(e) = builder.set_blueprint_element_mapper_for_string(name, element, value) {
                errors.push(error(e));
            }
        }
        for (actuator, value) in self.force_feedback.iter().flatten() {
            if let Err(e) =
                builder.set_blueprint_force_feedback_actuator_for_string(name, actuator, value)
            {
                errors.push(error(e));
            }
        }

        if !errors.is_empty() {
            if let Err(e) = builder.invalidate_blueprint(name) {
                errors.push(error(e));
            }
        }
        for e in errors.iter() {
            log::warn!("{e}");
        }

        errors
    }
}
