//! Builds mappers from blueprints. A blueprint names an optional template
//! (a registered mapper or another blueprint) plus the element and actuator
//! assignments that differ from it.
use std::{collections::BTreeMap, sync::Arc};

use thiserror::Error;

use super::{
    element::ElementMapper,
    element_map::{ElementMap, PhysicalElement},
    force_feedback::{ActuatorElement, ForceFeedbackActuator, ForceFeedbackActuatorMap},
    parser::{self, ParseError},
    registry::{MapperRegistry, RegistryError},
    Mapper,
};

/// Possible errors when editing or building blueprints
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Blueprint name cannot be empty")]
    EmptyName,
    #[error("Blueprint '{0}' already exists")]
    BlueprintExists(String),
    #[error("A mapper named '{0}' is already registered")]
    MapperExists(String),
    #[error("Blueprint '{0}' does not exist")]
    UnknownBlueprint(String),
    #[error("Blueprint '{0}' can no longer be changed")]
    Frozen(String),
    #[error("Blueprint '{0}' was invalidated")]
    Invalidated(String),
    #[error("Template '{template}' of blueprint '{name}' does not exist")]
    UnknownTemplate { name: String, template: String },
    #[error("Template cycle detected at blueprint '{0}'")]
    Cycle(String),
    #[error("Blueprint '{0}' previously failed to build")]
    PreviouslyFailed(String),
    #[error("Failed to build blueprint(s): {}", .0.join(", "))]
    BuildAllFailed(Vec<String>),
    #[error("Unable to parse: {0}")]
    Parse(#[from] ParseError),
    #[error("Unable to register: {0}")]
    Registry(#[from] RegistryError),
}

/// Progress of a blueprint towards becoming a registered mapper
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildStatus {
    /// Still editable
    #[default]
    Unbuilt,
    /// Currently resolving its template chain
    InProgress,
    Built,
    Failed,
}

/// Description of a mapper that has not been built yet
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    template: Option<String>,
    elements: BTreeMap<PhysicalElement, Option<ElementMapper>>,
    force_feedback: BTreeMap<ForceFeedbackActuator, Option<ActuatorElement>>,
    status: BuildStatus,
    invalidated: bool,
}

impl Blueprint {
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Element overrides. A `None` override removes the template's mapper.
    pub fn element_overrides(&self) -> &BTreeMap<PhysicalElement, Option<ElementMapper>> {
        &self.elements
    }

    /// Actuator overrides. A `None` override disables the actuator.
    pub fn force_feedback_overrides(
        &self,
    ) -> &BTreeMap<ForceFeedbackActuator, Option<ActuatorElement>> {
        &self.force_feedback
    }

    pub fn status(&self) -> BuildStatus {
        self.status
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }
}

/// Collects blueprints and builds them into mappers in the given registry
#[derive(Debug)]
pub struct MapperBuilder {
    registry: Arc<MapperRegistry>,
    blueprints: BTreeMap<String, Blueprint>,
}

impl MapperBuilder {
    pub fn new(registry: Arc<MapperRegistry>) -> Self {
        Self {
            registry,
            blueprints: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &Arc<MapperRegistry> {
        &self.registry
    }

    /// Create a new, empty blueprint. The name must not be used by another
    /// blueprint or by a registered mapper.
    pub fn create_blueprint(&mut self, name: &str) -> Result<(), BuildError> {
        if name.is_empty() {
            return Err(BuildError::EmptyName);
        }
        if self.blueprints.contains_key(name) {
            return Err(BuildError::BlueprintExists(name.to_string()));
        }
        if self.registry.is_registered(name) {
            return Err(BuildError::MapperExists(name.to_string()));
        }
        log::debug!("Created blueprint '{name}'");
        self.blueprints.insert(name.to_string(), Blueprint::default());
        Ok(())
    }

    pub fn does_blueprint_name_exist(&self, name: &str) -> bool {
        self.blueprints.contains_key(name)
    }

    pub fn blueprint(&self, name: &str) -> Option<&Blueprint> {
        self.blueprints.get(name)
    }

    /// Names of all blueprints in sorted order
    pub fn blueprint_names(&self) -> Vec<String> {
        self.blueprints.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Result<&Blueprint, BuildError> {
        self.blueprints
            .get(name)
            .ok_or_else(|| BuildError::UnknownBlueprint(name.to_string()))
    }

    /// Returns the blueprint for editing. Blueprints are frozen once a build
    /// has been attempted.
    fn get_editable(&mut self, name: &str) -> Result<&mut Blueprint, BuildError> {
        let blueprint = self
            .blueprints
            .get_mut(name)
            .ok_or_else(|| BuildError::UnknownBlueprint(name.to_string()))?;
        if blueprint.status != BuildStatus::Unbuilt {
            return Err(BuildError::Frozen(name.to_string()));
        }
        Ok(blueprint)
    }

    /// Set the template of the blueprint. An empty template name removes the
    /// template.
    pub fn set_blueprint_template(&mut self, name: &str, template: &str) -> Result<(), BuildError> {
        let blueprint = self.get_editable(name)?;
        blueprint.template = match template.is_empty() {
            true => None,
            false => Some(template.to_string()),
        };
        Ok(())
    }

    pub fn blueprint_template(&self, name: &str) -> Result<Option<&str>, BuildError> {
        Ok(self.get(name)?.template())
    }

    /// Override the mapper of one element. `None` removes the template's
    /// mapper for that element.
    pub fn set_blueprint_element_mapper(
        &mut self,
        name: &str,
        element: PhysicalElement,
        mapper: Option<ElementMapper>,
    ) -> Result<(), BuildError> {
        let blueprint = self.get_editable(name)?;
        blueprint.elements.insert(element, mapper);
        Ok(())
    }

    /// Parse both the element name and the mapper string and override the
    /// element's mapper
    pub fn set_blueprint_element_mapper_for_string(
        &mut self,
        name: &str,
        element: &str,
        mapper: &str,
    ) -> Result<(), BuildError> {
        let element = PhysicalElement::from_name(element.trim())
            .ok_or_else(|| ParseError::UnknownElement(element.to_string()))?;
        let mapper = parser::element_mapper_from_string(mapper)?;
        self.set_blueprint_element_mapper(name, element, mapper)
    }

    /// Remove an element override. Returns true if an override was present.
    pub fn clear_blueprint_element_mapper(
        &mut self,
        name: &str,
        element: PhysicalElement,
    ) -> Result<bool, BuildError> {
        let blueprint = self.get_editable(name)?;
        Ok(blueprint.elements.remove(&element).is_some())
    }

    pub fn clear_blueprint_element_mapper_for_string(
        &mut self,
        name: &str,
        element: &str,
    ) -> Result<bool, BuildError> {
        let element = PhysicalElement::from_name(element.trim())
            .ok_or_else(|| ParseError::UnknownElement(element.to_string()))?;
        self.clear_blueprint_element_mapper(name, element)
    }

    /// Element overrides of the blueprint
    pub fn blueprint_element_map_spec(
        &self,
        name: &str,
    ) -> Result<&BTreeMap<PhysicalElement, Option<ElementMapper>>, BuildError> {
        Ok(self.get(name)?.element_overrides())
    }

    /// Override one force feedback actuator. `None` disables the actuator.
    pub fn set_blueprint_force_feedback_actuator(
        &mut self,
        name: &str,
        actuator: ForceFeedbackActuator,
        element: Option<ActuatorElement>,
    ) -> Result<(), BuildError> {
        let blueprint = self.get_editable(name)?;
        blueprint.force_feedback.insert(actuator, element);
        Ok(())
    }

    pub fn set_blueprint_force_feedback_actuator_for_string(
        &mut self,
        name: &str,
        actuator: &str,
        element: &str,
    ) -> Result<(), BuildError> {
        let actuator = parser::find_force_feedback_actuator(actuator)
            .ok_or_else(|| ParseError::UnknownActuator(actuator.to_string()))?;
        let element = parser::force_feedback_actuator_from_string(element)?;
        self.set_blueprint_force_feedback_actuator(name, actuator, element)
    }

    /// Remove an actuator override. Returns true if an override was present.
    pub fn clear_blueprint_force_feedback_actuator(
        &mut self,
        name: &str,
        actuator: ForceFeedbackActuator,
    ) -> Result<bool, BuildError> {
        let blueprint = self.get_editable(name)?;
        Ok(blueprint.force_feedback.remove(&actuator).is_some())
    }

    pub fn clear_blueprint_force_feedback_actuator_for_string(
        &mut self,
        name: &str,
        actuator: &str,
    ) -> Result<bool, BuildError> {
        let actuator = parser::find_force_feedback_actuator(actuator)
            .ok_or_else(|| ParseError::UnknownActuator(actuator.to_string()))?;
        self.clear_blueprint_force_feedback_actuator(name, actuator)
    }

    /// Mark the blueprint as unusable. Building it, or any blueprint that
    /// uses it as a template, will fail.
    pub fn invalidate_blueprint(&mut self, name: &str) -> Result<(), BuildError> {
        let blueprint = self.get_editable(name)?;
        log::warn!("Invalidating blueprint '{name}'");
        blueprint.invalidated = true;
        Ok(())
    }

    /// Build the named blueprint and register the resulting mapper. A
    /// blueprint can only be built once.
    pub fn build(&mut self, name: &str) -> Result<Arc<Mapper>, BuildError> {
        let result = match self.blueprint(name).map(|b| b.status) {
            Some(BuildStatus::Built) => Err(BuildError::MapperExists(name.to_string())),
            _ => self.build_blueprint(name),
        };
        match result.as_ref() {
            Ok(mapper) => log::info!("Built mapper '{}'", mapper.name()),
            Err(e) => log::error!("Unable to build mapper '{name}': {e}"),
        }
        result
    }

    /// Build every blueprint that is not built yet. Succeeds only if every
    /// blueprint builds.
    pub fn build_all(&mut self) -> Result<(), BuildError> {
        let mut failed = Vec::new();
        for name in self.blueprint_names() {
            if self.blueprint(&name).map(|b| b.status) == Some(BuildStatus::Built) {
                continue;
            }
            if self.build(&name).is_err() {
                failed.push(name);
            }
        }
        if !failed.is_empty() {
            return Err(BuildError::BuildAllFailed(failed));
        }
        Ok(())
    }

    fn set_status(&mut self, name: &str, status: BuildStatus) {
        if let Some(blueprint) = self.blueprints.get_mut(name) {
            blueprint.status = status;
        }
    }

    fn build_blueprint(&mut self, name: &str) -> Result<Arc<Mapper>, BuildError> {
        let blueprint = self.get(name)?;
        let status = blueprint.status;
        let invalidated = blueprint.invalidated;
        let template = blueprint.template.clone();
        match status {
            BuildStatus::Unbuilt => (),
            BuildStatus::InProgress => return Err(BuildError::Cycle(name.to_string())),
            BuildStatus::Failed => return Err(BuildError::PreviouslyFailed(name.to_string())),
            // Templates that are already built are reused
            BuildStatus::Built => {
                return self
                    .registry
                    .get_by_name(name)
                    .ok_or_else(|| RegistryError::NotRegistered(name.to_string()).into());
            }
        }
        if invalidated {
            self.set_status(name, BuildStatus::Failed);
            return Err(BuildError::Invalidated(name.to_string()));
        }

        self.set_status(name, BuildStatus::InProgress);
        log::debug!("Building blueprint '{name}' with template {template:?}");

        let result = self
            .resolve_template(name, template.as_deref())
            .and_then(|(elements, force_feedback)| self.finish(name, elements, force_feedback));
        match result {
            Ok(mapper) => {
                self.set_status(name, BuildStatus::Built);
                Ok(mapper)
            }
            Err(e) => {
                self.set_status(name, BuildStatus::Failed);
                Err(e)
            }
        }
    }

    /// Returns the element and actuator maps the blueprint starts from
    fn resolve_template(
        &mut self,
        name: &str,
        template: Option<&str>,
    ) -> Result<(ElementMap, ForceFeedbackActuatorMap), BuildError> {
        let Some(template) = template else {
            return Ok((ElementMap::new(), ForceFeedbackActuatorMap::default()));
        };

        let mapper = if self.blueprints.contains_key(template) {
            self.build_blueprint(template)?
        } else {
            self.registry
                .get_by_name(template)
                .ok_or_else(|| BuildError::UnknownTemplate {
                    name: name.to_string(),
                    template: template.to_string(),
                })?
        };

        Ok((
            mapper.clone_element_map(),
            mapper.force_feedback_actuator_map(),
        ))
    }

    fn finish(
        &mut self,
        name: &str,
        mut elements: ElementMap,
        mut force_feedback: ForceFeedbackActuatorMap,
    ) -> Result<Arc<Mapper>, BuildError> {
        let blueprint = self.get(name)?;
        for (element, mapper) in blueprint.elements.iter() {
            elements.set(*element, mapper.clone());
        }
        for (actuator, element) in blueprint.force_feedback.iter() {
            force_feedback.set(*actuator, *element);
        }

        let mapper = Mapper::new(name, elements, force_feedback);
        Ok(self.registry.register(mapper)?)
    }
}
