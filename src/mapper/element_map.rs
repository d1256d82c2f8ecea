use std::fmt::Display;

use super::element::ElementMapper;

/// Inputs of the physical gamepad that can be assigned an element mapper.
/// The declaration order is the order in which readings are translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhysicalElement {
    StickLeftX,
    StickLeftY,
    StickRightX,
    StickRightY,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    TriggerLT,
    TriggerRT,
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonLB,
    ButtonRB,
    ButtonBack,
    ButtonStart,
    ButtonLS,
    ButtonRS,
}

impl PhysicalElement {
    pub const COUNT: usize = 20;
    pub const ALL: [PhysicalElement; PhysicalElement::COUNT] = [
        PhysicalElement::StickLeftX,
        PhysicalElement::StickLeftY,
        PhysicalElement::StickRightX,
        PhysicalElement::StickRightY,
        PhysicalElement::DpadUp,
        PhysicalElement::DpadDown,
        PhysicalElement::DpadLeft,
        PhysicalElement::DpadRight,
        PhysicalElement::TriggerLT,
        PhysicalElement::TriggerRT,
        PhysicalElement::ButtonA,
        PhysicalElement::ButtonB,
        PhysicalElement::ButtonX,
        PhysicalElement::ButtonY,
        PhysicalElement::ButtonLB,
        PhysicalElement::ButtonRB,
        PhysicalElement::ButtonBack,
        PhysicalElement::ButtonStart,
        PhysicalElement::ButtonLS,
        PhysicalElement::ButtonRS,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<PhysicalElement> {
        PhysicalElement::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicalElement::StickLeftX => "StickLeftX",
            PhysicalElement::StickLeftY => "StickLeftY",
            PhysicalElement::StickRightX => "StickRightX",
            PhysicalElement::StickRightY => "StickRightY",
            PhysicalElement::DpadUp => "DpadUp",
            PhysicalElement::DpadDown => "DpadDown",
            PhysicalElement::DpadLeft => "DpadLeft",
            PhysicalElement::DpadRight => "DpadRight",
            PhysicalElement::TriggerLT => "TriggerLT",
            PhysicalElement::TriggerRT => "TriggerRT",
            PhysicalElement::ButtonA => "ButtonA",
            PhysicalElement::ButtonB => "ButtonB",
            PhysicalElement::ButtonX => "ButtonX",
            PhysicalElement::ButtonY => "ButtonY",
            PhysicalElement::ButtonLB => "ButtonLB",
            PhysicalElement::ButtonRB => "ButtonRB",
            PhysicalElement::ButtonBack => "ButtonBack",
            PhysicalElement::ButtonStart => "ButtonStart",
            PhysicalElement::ButtonLS => "ButtonLS",
            PhysicalElement::ButtonRS => "ButtonRS",
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<PhysicalElement> {
        PhysicalElement::ALL
            .iter()
            .find(|element| element.as_str().eq_ignore_ascii_case(name))
            .copied()
    }
}

impl Display for PhysicalElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Element mapper assignment for every [PhysicalElement]. Unassigned
/// elements contribute nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementMap {
    mappers: [Option<ElementMapper>; PhysicalElement::COUNT],
}

impl ElementMap {
    /// Map with no element assigned
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element: PhysicalElement) -> Option<&ElementMapper> {
        self.mappers[element.index()].as_ref()
    }

    pub fn set(&mut self, element: PhysicalElement, mapper: Option<ElementMapper>) {
        self.mappers[element.index()] = mapper;
    }

    /// Builder-style variant of [ElementMap::set]
    pub fn with(mut self, element: PhysicalElement, mapper: ElementMapper) -> Self {
        self.set(element, Some(mapper));
        self
    }

    /// Assigned elements with their mappers, in translation order
    pub fn iter(&self) -> impl Iterator<Item = (PhysicalElement, &ElementMapper)> {
        PhysicalElement::ALL
            .iter()
            .filter_map(|element| self.get(*element).map(|mapper| (*element, mapper)))
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.iter().all(|mapper| mapper.is_none())
    }
}
