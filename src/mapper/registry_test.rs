use std::{error::Error, sync::Arc};

use crate::{
    controller::{Axis, Button},
    mapper::{
        definitions::{register_builtin_mappers, STANDARD_GAMEPAD, XINPUT_NATIVE},
        element::ElementMapper,
        element_map::{ElementMap, PhysicalElement},
        force_feedback::ForceFeedbackActuatorMap,
        registry::{MapperRegistry, MapperSelection, RegistryError},
        Mapper,
    },
};

fn simple_mapper(name: &str) -> Mapper {
    let map = ElementMap::new().with(PhysicalElement::ButtonA, ElementMapper::Button(Button::B1));
    Mapper::new(name, map, ForceFeedbackActuatorMap::empty())
}

#[test]
fn test_register_and_lookup() -> Result<(), Box<dyn Error>> {
    let registry = MapperRegistry::new();
    assert!(registry.get_default().is_none());
    assert!(registry.get_by_name("").is_none());

    let first = registry.register(simple_mapper("First"))?;
    let second = registry.register(simple_mapper("Second"))?;
    assert!(!Arc::ptr_eq(&first, &second));

    let default = registry.get_default().ok_or("should have a default")?;
    assert!(Arc::ptr_eq(&default, &first), "first registered wins");
    let by_empty_name = registry.get_by_name("").ok_or("should have a default")?;
    assert!(Arc::ptr_eq(&by_empty_name, &first));
    assert!(registry.get_by_name("Third").is_none());
    assert_eq!(registry.names(), vec!["First".to_string(), "Second".to_string()]);

    Ok(())
}

#[test]
fn test_register_rejects_duplicates_and_anonymous() -> Result<(), Box<dyn Error>> {
    let registry = MapperRegistry::new();
    registry.register(simple_mapper("Mapper"))?;
    assert_eq!(
        registry.register(simple_mapper("Mapper")).err(),
        Some(RegistryError::AlreadyRegistered("Mapper".into()))
    );
    assert_eq!(
        registry.register(simple_mapper("")).err(),
        Some(RegistryError::Anonymous)
    );
    Ok(())
}

#[test]
fn test_unregister() -> Result<(), Box<dyn Error>> {
    let registry = MapperRegistry::new();
    let mapper = registry.register(simple_mapper("Mapper"))?;
    let impostor = Arc::new(simple_mapper("Mapper"));

    assert_eq!(
        registry.unregister("Mapper", &impostor),
        Err(RegistryError::ObjectMismatch("Mapper".into()))
    );
    assert!(registry.is_registered("Mapper"));
    assert_eq!(
        registry.unregister("Other", &mapper),
        Err(RegistryError::NotRegistered("Other".into()))
    );

    registry.unregister("Mapper", &mapper)?;
    assert!(!registry.is_registered("Mapper"));
    assert!(registry.get_default().is_none());

    Ok(())
}

#[test]
fn test_null_mapper() {
    let registry = MapperRegistry::new();
    let null = registry.get_null();
    assert!(null.is_anonymous());
    assert!(null.capabilities().axes.is_empty());
    assert_eq!(null.capabilities().num_buttons, 0);
    assert!(Arc::ptr_eq(&null, &registry.get_null()), "null mapper is shared");
    assert!(registry.names().is_empty(), "null mapper is never registered");
}

#[test]
fn test_configured() -> Result<(), Box<dyn Error>> {
    let mut selection = MapperSelection {
        default_name: Some(XINPUT_NATIVE.to_string()),
        ..Default::default()
    };
    selection.per_controller.insert(1, "DigitalGamepad".to_string());
    selection.per_controller.insert(2, "DoesNotExist".to_string());
    let registry = MapperRegistry::with_selection(selection);
    register_builtin_mappers(&registry);

    assert_eq!(registry.get_configured(0).name(), XINPUT_NATIVE);
    assert_eq!(registry.get_configured(1).name(), "DigitalGamepad");
    assert_eq!(registry.get_configured(2).name(), XINPUT_NATIVE);
    assert!(registry.get_configured(4).is_anonymous(), "out of range slot");

    let first = registry.get_configured(1);
    assert!(Arc::ptr_eq(&first, &registry.get_configured(1)));

    Ok(())
}

#[test]
fn test_configured_falls_back_to_default() {
    let registry = MapperRegistry::new();
    register_builtin_mappers(&registry);
    assert_eq!(registry.get_configured(3).name(), STANDARD_GAMEPAD);

    let empty = MapperRegistry::new();
    assert!(empty.get_configured(0).is_anonymous());
}

#[test]
fn test_registered_capabilities() {
    let registry = MapperRegistry::new();
    register_builtin_mappers(&registry);
    registry.dump_registered_mappers();

    let capabilities = registry.registered_capabilities();
    assert_eq!(capabilities.len(), 5);
    let standard = &capabilities[STANDARD_GAMEPAD];
    assert_eq!(standard.num_buttons, 12);
    assert!(standard.has_pov);
    assert!(standard.has_axis(Axis::RotZ));
    assert!(standard.force_feedback_is_supported_for_axis(Axis::X));
}
