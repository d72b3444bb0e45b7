//! Parser for the GPIO tool's `funcs` output.
//!
//! A header row followed by one `<index>, <pull>, <func>, <func>, ...` line
//! per pin.

use crate::board::GPIO_PREFIX;
use crate::error::{Result, StatusError};

const FIELD_SEPARATOR: &str = ", ";

/// Pull configuration and supported functions of one pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinFunctions {
    pub index: u32,
    /// Pull resistor state, e.g. "UP", "DOWN" or "NONE"
    pub pull: String,
    pub funcs: Vec<String>,
}

/// Parse `funcs` output, discarding the header row.
pub fn parse_pin_functions(output: &str) -> Result<Vec<PinFunctions>> {
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_function_line)
        .collect()
}

/// Parse one `funcs` line (header already removed).
pub fn parse_function_line(line: &str) -> Result<PinFunctions> {
    let mut fields = line.split(FIELD_SEPARATOR);

    let index = fields
        .next()
        .map(str::trim)
        .map(|field| field.strip_prefix(GPIO_PREFIX).unwrap_or(field))
        .and_then(|field| field.trim().parse::<u32>().ok())
        .ok_or_else(|| StatusError::parse_error(format!("No pin index in `{}`", line)))?;
    let pull = fields
        .next()
        .ok_or_else(|| StatusError::parse_error(format!("No pull state in `{}`", line)))?;

    Ok(PinFunctions {
        index,
        pull: pull.trim().to_string(),
        funcs: fields.map(|f| f.trim().to_string()).collect(),
    })
}
