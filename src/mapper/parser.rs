//! Parser for the textual form of element mappers and force feedback
//! actuator elements, e.g. `Split(Button(3), Invert(Axis(Z, +)))`.
use thiserror::Error;

use crate::controller::{keyboard::KeyIdentifier, Axis, AxisDirection, Button, PovDirection};

use super::{
    element::{ElementMapper, COMPOUND_MAX_MAPPERS},
    element_map::PhysicalElement,
    force_feedback::{ActuatorElement, ForceFeedbackActuator},
};

/// Maximum nesting depth of a mapper string
pub const MAX_RECURSION_DEPTH: u32 = 8;

/// Possible errors when parsing a mapper string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unbalanced parentheses in '{0}'")]
    Unbalanced(String),
    #[error("Nesting depth of {0} exceeds the maximum of {max}", max = MAX_RECURSION_DEPTH)]
    TooDeep(u32),
    #[error("Malformed mapper string '{0}'")]
    Malformed(String),
    #[error("Unknown type '{0}'")]
    UnknownType(String),
    #[error("Wrong number of parameters for '{type_name}': {count}")]
    ParameterCount { type_name: String, count: usize },
    #[error("Invalid parameter '{param}' for '{type_name}'")]
    InvalidParameter { type_name: String, param: String },
    #[error("Unknown controller element '{0}'")]
    UnknownElement(String),
    #[error("Unknown force feedback actuator '{0}'")]
    UnknownActuator(String),
}

/// Type name and raw parameter text of a mapper string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementMapperStringParts<'a> {
    pub type_name: &'a str,
    pub params: &'a str,
}

/// Returns the parenthesis nesting depth of the given string, or `None` if
/// its parentheses are unbalanced
pub fn compute_recursion_depth(value: &str) -> Option<u32> {
    let mut depth: u32 = 0;
    let mut max_depth: u32 = 0;
    for c in value.chars() {
        match c {
            '(' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' => depth = depth.checked_sub(1)?,
            _ => (),
        }
    }
    (depth == 0).then_some(max_depth)
}

/// Split a mapper string into its type name and parameter text. A string
/// without parentheses is a type with no parameters. Anything after the
/// closing parenthesis makes the string invalid.
pub fn extract_parts(value: &str) -> Option<ElementMapperStringParts<'_>> {
    let value = value.trim();
    let Some(open) = value.find('(') else {
        if value.is_empty() || value.contains(')') || value.contains(',') {
            return None;
        }
        return Some(ElementMapperStringParts {
            type_name: value,
            params: "",
        });
    };
    let close = value.rfind(')')?;
    if close < open || close != value.len() - 1 {
        return None;
    }
    let type_name = value[..open].trim();
    if type_name.is_empty() {
        return None;
    }
    // The outer parentheses must enclose everything between them
    let params = value[open + 1..close].trim();
    compute_recursion_depth(params)?;
    Some(ElementMapperStringParts { type_name, params })
}

/// Split parameter text on the commas that are not nested in parentheses.
/// Empty parameter text yields no parameters; an empty parameter between
/// commas is invalid.
pub fn split_params(params: &str) -> Option<Vec<&str>> {
    let params = params.trim();
    if params.is_empty() {
        return Some(vec![]);
    }

    let mut parts = Vec::new();
    let mut depth: u32 = 0;
    let mut start = 0;
    for (i, c) in params.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(params[start..i].trim());
                start = i + 1;
            }
            _ => (),
        }
    }
    parts.push(params[start..].trim());

    if parts.iter().any(|part| part.is_empty()) {
        return None;
    }
    Some(parts)
}

/// Returns the index of the named physical controller element
pub fn find_controller_element_index(name: &str) -> Option<usize> {
    PhysicalElement::from_name(name.trim()).map(|element| element.index())
}

pub fn is_controller_element_string_valid(name: &str) -> bool {
    find_controller_element_index(name).is_some()
}

/// Returns the named force feedback actuator (e.g. "ForceFeedback.LeftMotor")
pub fn find_force_feedback_actuator(name: &str) -> Option<ForceFeedbackActuator> {
    ForceFeedbackActuator::from_name(name.trim())
}

pub fn is_force_feedback_actuator_string_valid(name: &str) -> bool {
    find_force_feedback_actuator(name).is_some()
}

/// Parse an element mapper string. `Null` parses to `None`.
pub fn element_mapper_from_string(value: &str) -> Result<Option<ElementMapper>, ParseError> {
    check_depth(value)?;
    parse_element_mapper(value)
}

/// Parse a force feedback actuator element string. `Null` parses to `None`.
pub fn force_feedback_actuator_from_string(
    value: &str,
) -> Result<Option<ActuatorElement>, ParseError> {
    check_depth(value)?;
    let parts = extract_parts(value).ok_or_else(|| ParseError::Malformed(value.to_string()))?;
    let params =
        split_params(parts.params).ok_or_else(|| ParseError::Malformed(value.to_string()))?;
    let type_name = parts.type_name;

    let element = match type_name.to_ascii_lowercase().as_str() {
        "null" => {
            expect_count(type_name, &params, 0, 0)?;
            None
        }
        "singleaxis" => {
            expect_count(type_name, &params, 1, 2)?;
            let axis = parse_axis(type_name, params[0])?;
            let direction = match params.get(1) {
                Some(param) => parse_direction(type_name, param)?,
                None => AxisDirection::Both,
            };
            Some(ActuatorElement::SingleAxis { axis, direction })
        }
        "magnitudeprojection" => {
            expect_count(type_name, &params, 2, 2)?;
            let first = parse_axis(type_name, params[0])?;
            let second = parse_axis(type_name, params[1])?;
            if first == second {
                return Err(invalid(type_name, params[1]));
            }
            Some(ActuatorElement::MagnitudeProjection { first, second })
        }
        _ => return Err(ParseError::UnknownType(type_name.to_string())),
    };

    Ok(element)
}

fn check_depth(value: &str) -> Result<(), ParseError> {
    let depth =
        compute_recursion_depth(value).ok_or_else(|| ParseError::Unbalanced(value.to_string()))?;
    if depth > MAX_RECURSION_DEPTH {
        return Err(ParseError::TooDeep(depth));
    }
    Ok(())
}

fn parse_element_mapper(value: &str) -> Result<Option<ElementMapper>, ParseError> {
    let parts = extract_parts(value).ok_or_else(|| ParseError::Malformed(value.to_string()))?;
    let params =
        split_params(parts.params).ok_or_else(|| ParseError::Malformed(value.to_string()))?;
    let type_name = parts.type_name;
    log::trace!("Parsing '{type_name}' with params {params:?}");

    let mapper = match type_name.to_ascii_lowercase().as_str() {
        "null" => {
            expect_count(type_name, &params, 0, 0)?;
            None
        }
        "axis" | "digitalaxis" => {
            expect_count(type_name, &params, 1, 2)?;
            let axis = parse_axis(type_name, params[0])?;
            let direction = match params.get(1) {
                Some(param) => parse_direction(type_name, param)?,
                None => AxisDirection::Both,
            };
            if type_name.eq_ignore_ascii_case("axis") {
                Some(ElementMapper::Axis { axis, direction })
            } else {
                Some(ElementMapper::DigitalAxis { axis, direction })
            }
        }
        "button" => {
            expect_count(type_name, &params, 1, 1)?;
            Some(ElementMapper::Button(parse_button(type_name, params[0])?))
        }
        "pov" => {
            expect_count(type_name, &params, 1, 1)?;
            Some(ElementMapper::Pov(parse_pov_direction(type_name, params[0])?))
        }
        "keyboard" => {
            expect_count(type_name, &params, 1, 1)?;
            let key =
                KeyIdentifier::from_name(params[0]).ok_or_else(|| invalid(type_name, params[0]))?;
            Some(ElementMapper::Keyboard(key))
        }
        "invert" => {
            expect_count(type_name, &params, 1, 1)?;
            let child = parse_element_mapper(params[0])?;
            let child = child.ok_or_else(|| invalid(type_name, params[0]))?;
            Some(ElementMapper::invert(child))
        }
        "split" => {
            expect_count(type_name, &params, 2, 2)?;
            let positive = parse_element_mapper(params[0])?;
            let negative = parse_element_mapper(params[1])?;
            Some(ElementMapper::split(positive, negative))
        }
        "compound" => {
            expect_count(type_name, &params, 1, COMPOUND_MAX_MAPPERS)?;
            let mut children = Vec::with_capacity(params.len());
            for param in params.iter() {
                if let Some(child) = parse_element_mapper(param)? {
                    children.push(child);
                }
            }
            let compound = ElementMapper::compound(children).ok_or(ParseError::ParameterCount {
                type_name: type_name.to_string(),
                count: params.len(),
            })?;
            Some(compound)
        }
        _ => return Err(ParseError::UnknownType(type_name.to_string())),
    };

    Ok(mapper)
}

fn expect_count(type_name: &str, params: &[&str], min: usize, max: usize) -> Result<(), ParseError> {
    if params.len() < min || params.len() > max {
        return Err(ParseError::ParameterCount {
            type_name: type_name.to_string(),
            count: params.len(),
        });
    }
    Ok(())
}

fn invalid(type_name: &str, param: &str) -> ParseError {
    ParseError::InvalidParameter {
        type_name: type_name.to_string(),
        param: param.to_string(),
    }
}

fn parse_axis(type_name: &str, param: &str) -> Result<Axis, ParseError> {
    let axis = match param.to_ascii_lowercase().as_str() {
        "x" => Axis::X,
        "y" => Axis::Y,
        "z" => Axis::Z,
        "rotx" | "rx" => Axis::RotX,
        "roty" | "ry" => Axis::RotY,
        "rotz" | "rz" => Axis::RotZ,
        _ => return Err(invalid(type_name, param)),
    };
    Ok(axis)
}

fn parse_direction(type_name: &str, param: &str) -> Result<AxisDirection, ParseError> {
    let direction = match param.to_ascii_lowercase().as_str() {
        "both" | "bidir" | "bidirectional" => AxisDirection::Both,
        "+" | "positive" | "pos" => AxisDirection::Positive,
        "-" | "negative" | "neg" => AxisDirection::Negative,
        _ => return Err(invalid(type_name, param)),
    };
    Ok(direction)
}

fn parse_button(type_name: &str, param: &str) -> Result<Button, ParseError> {
    let number = param
        .strip_prefix('B')
        .or_else(|| param.strip_prefix('b'))
        .unwrap_or(param);
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(type_name, param));
    }
    number
        .parse::<usize>()
        .ok()
        .and_then(Button::from_number)
        .ok_or_else(|| invalid(type_name, param))
}

fn parse_pov_direction(type_name: &str, param: &str) -> Result<PovDirection, ParseError> {
    PovDirection::ALL
        .iter()
        .find(|direction| direction.as_str().eq_ignore_ascii_case(param))
        .copied()
        .ok_or_else(|| invalid(type_name, param))
}
