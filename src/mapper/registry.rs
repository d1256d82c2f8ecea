//! Named collection of mappers shared by every consumer
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use thiserror::Error;

use crate::controller::{capabilities::Capabilities, PHYSICAL_CONTROLLER_COUNT};

use super::{element_map::ElementMap, force_feedback::ForceFeedbackActuatorMap, Mapper};

/// Possible errors when changing the registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Anonymous mappers cannot be registered")]
    Anonymous,
    #[error("A mapper named '{0}' is already registered")]
    AlreadyRegistered(String),
    #[error("No mapper named '{0}' is registered")]
    NotRegistered(String),
    #[error("Registered mapper '{0}' is a different object")]
    ObjectMismatch(String),
}

/// Mapper selection used when resolving the mapper for a controller slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapperSelection {
    /// Mapper for any slot without its own selection
    pub default_name: Option<String>,
    /// Mapper selected per controller slot
    pub per_controller: HashMap<usize, String>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    mappers: BTreeMap<String, Arc<Mapper>>,
    default_name: Option<String>,
}

/// Registry of named mappers. The first mapper registered becomes the
/// default.
#[derive(Debug, Default)]
pub struct MapperRegistry {
    inner: RwLock<RegistryInner>,
    null_mapper: OnceLock<Arc<Mapper>>,
    selection: RwLock<MapperSelection>,
    configured: OnceLock<[Arc<Mapper>; PHYSICAL_CONTROLLER_COUNT]>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that resolves configured mappers from the given
    /// selection
    pub fn with_selection(selection: MapperSelection) -> Self {
        let registry = Self::default();
        registry.set_selection(selection);
        registry
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the selection used by [MapperRegistry::get_configured]. Has
    /// no effect once configured mappers have been resolved.
    pub fn set_selection(&self, selection: MapperSelection) {
        if self.configured.get().is_some() {
            log::warn!("Configured mappers are already resolved; ignoring new selection");
            return;
        }
        let mut current = self.selection.write().unwrap_or_else(|e| e.into_inner());
        *current = selection;
    }

    /// Add a mapper to the registry and return the shared handle to it
    pub fn register(&self, mapper: Mapper) -> Result<Arc<Mapper>, RegistryError> {
        if mapper.is_anonymous() {
            return Err(RegistryError::Anonymous);
        }
        let name = mapper.name().to_string();
        let mut inner = self.write();
        if inner.mappers.contains_key(&name) {
            log::warn!("Mapper '{name}' is already registered");
            return Err(RegistryError::AlreadyRegistered(name));
        }

        let mapper = Arc::new(mapper);
        inner.mappers.insert(name.clone(), mapper.clone());
        if inner.default_name.is_none() {
            log::debug!("Mapper '{name}' is the default mapper");
            inner.default_name = Some(name.clone());
        }
        log::debug!("Registered mapper '{name}'");

        Ok(mapper)
    }

    /// Remove a mapper from the registry. The given handle must be the object
    /// that was registered under the given name.
    pub fn unregister(&self, name: &str, mapper: &Arc<Mapper>) -> Result<(), RegistryError> {
        let mut inner = self.write();
        let Some(registered) = inner.mappers.get(name) else {
            log::error!("Attempted to unregister mapper '{name}' which is not registered");
            return Err(RegistryError::NotRegistered(name.to_string()));
        };
        if !Arc::ptr_eq(registered, mapper) {
            log::error!("Attempted to unregister mapper '{name}' using a different object");
            return Err(RegistryError::ObjectMismatch(name.to_string()));
        }

        inner.mappers.remove(name);
        if inner.default_name.as_deref() == Some(name) {
            inner.default_name = None;
        }
        log::debug!("Unregistered mapper '{name}'");

        Ok(())
    }

    /// Look up a mapper by name. An empty name returns the default mapper.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<Mapper>> {
        if name.is_empty() {
            return self.get_default();
        }
        self.read().mappers.get(name).cloned()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.read().mappers.contains_key(name)
    }

    pub fn get_default(&self) -> Option<Arc<Mapper>> {
        let inner = self.read();
        let name = inner.default_name.as_ref()?;
        inner.mappers.get(name).cloned()
    }

    pub fn default_name(&self) -> Option<String> {
        self.read().default_name.clone()
    }

    /// Mapper with no elements and no force feedback. It is never registered.
    pub fn get_null(&self) -> Arc<Mapper> {
        self.null_mapper
            .get_or_init(|| {
                Arc::new(Mapper::new(
                    "",
                    ElementMap::new(),
                    ForceFeedbackActuatorMap::empty(),
                ))
            })
            .clone()
    }

    /// Mapper configured for the given controller slot. Every slot is
    /// resolved once, on first use, in the order: the slot's own selection,
    /// the selection default, the registry default, the null mapper.
    pub fn get_configured(&self, slot: usize) -> Arc<Mapper> {
        let configured = self.configured.get_or_init(|| {
            let selection = self
                .selection
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .clone();
            std::array::from_fn(|slot| self.resolve_configured(&selection, slot))
        });
        match configured.get(slot) {
            Some(mapper) => mapper.clone(),
            None => {
                log::error!("Controller slot {slot} is out of range");
                self.get_null()
            }
        }
    }

    fn resolve_configured(&self, selection: &MapperSelection, slot: usize) -> Arc<Mapper> {
        if let Some(name) = selection.per_controller.get(&slot) {
            if let Some(mapper) = self.get_by_name(name) {
                log::info!("Using mapper '{name}' for controller {slot}");
                return mapper;
            }
            log::warn!("Mapper '{name}' selected for controller {slot} does not exist");
        }
        if let Some(name) = selection.default_name.as_ref() {
            if let Some(mapper) = self.get_by_name(name) {
                log::info!("Using mapper '{name}' for controller {slot}");
                return mapper;
            }
            log::warn!("Default mapper '{name}' does not exist");
        }
        if let Some(mapper) = self.get_default() {
            log::info!("Using default mapper '{}' for controller {slot}", mapper.name());
            return mapper;
        }
        log::warn!("No mappers are registered; controller {slot} uses the null mapper");
        self.get_null()
    }

    /// Names of all registered mappers in sorted order
    pub fn names(&self) -> Vec<String> {
        self.read().mappers.keys().cloned().collect()
    }

    /// Capabilities of every registered mapper keyed by name
    pub fn registered_capabilities(&self) -> BTreeMap<String, Capabilities> {
        self.read()
            .mappers
            .iter()
            .map(|(name, mapper)| (name.clone(), mapper.capabilities().clone()))
            .collect()
    }

    /// Log the capabilities of every registered mapper
    pub fn dump_registered_mappers(&self) {
        let inner = self.read();
        log::info!("Dumping {} registered mapper(s)", inner.mappers.len());
        for (name, mapper) in inner.mappers.iter() {
            let caps = mapper.capabilities();
            let axes: Vec<String> = caps
                .axes
                .iter()
                .map(|axis| match axis.supports_force_feedback {
                    true => format!("{}(FF)", axis.axis),
                    false => axis.axis.to_string(),
                })
                .collect();
            let default_marker = match inner.default_name.as_deref() == Some(name.as_str()) {
                true => " (default)",
                false => "",
            };
            log::info!(
                "Mapper '{name}'{default_marker}: axes=[{}] buttons={} pov={}",
                axes.join(", "),
                caps.num_buttons,
                caps.has_pov
            );
        }
    }
}
