//! Live BCM pin status from the GPIO tool.
//!
//! The tool is queried twice over the same pin range: `get` for level and
//! active function, `funcs` for pull state and supported functions. The two
//! results are joined on the pin index each line carries, never on line order.

pub mod funcs;
pub mod state;

pub use funcs::{parse_pin_functions, PinFunctions};
pub use state::{parse_pin_states, PinState};

use crate::board::GPIO_PREFIX;
use crate::command::CommandRunner;
use crate::error::{Result, StatusError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;
use tracing::debug;

/// Merged status of one BCM pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BcmPinStatus {
    /// Signal level, 0 or 1
    pub current_value: u8,
    pub pull: String,
    pub current_func: String,
    /// Supported functions, omitted when not requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funcs: Option<Vec<String>>,
}

/// Merged pin status keyed by logical name (`GPIO<n>`).
pub type BcmPins = HashMap<String, BcmPinStatus>;

/// Logical name of a BCM pin index.
pub fn bcm_name(index: u32) -> String {
    format!("{}{}", GPIO_PREFIX, index)
}

/// Join state and function records on their pin index.
///
/// Both sources must describe exactly the same set of pins, each once.
pub fn merge(states: Vec<PinState>, functions: Vec<PinFunctions>, include_funcs: bool) -> Result<BcmPins> {
    let mut by_index: BTreeMap<u32, PinFunctions> = BTreeMap::new();
    for entry in functions {
        let index = entry.index;
        if by_index.insert(index, entry).is_some() {
            return Err(StatusError::mismatch_error(format!(
                "GPIO{} listed twice in function output",
                index
            )));
        }
    }

    let mut merged = BcmPins::with_capacity(states.len());
    for state in states {
        let entry = by_index.remove(&state.index).ok_or_else(|| {
            StatusError::mismatch_error(format!("GPIO{} has a state but no function list", state.index))
        })?;

        let status = BcmPinStatus {
            current_value: state.level,
            pull: entry.pull,
            current_func: state.function,
            funcs: include_funcs.then_some(entry.funcs),
        };
        if merged.insert(bcm_name(state.index), status).is_some() {
            return Err(StatusError::mismatch_error(format!(
                "GPIO{} listed twice in state output",
                state.index
            )));
        }
    }

    if let Some(index) = by_index.keys().next() {
        return Err(StatusError::mismatch_error(format!(
            "GPIO{} has a function list but no state ({} unmatched)",
            index,
            by_index.len()
        )));
    }

    Ok(merged)
}

/// Query the GPIO tool over `range` and merge both outputs.
///
/// The `get` and `funcs` calls run concurrently. Either output yielding no
/// pins is treated as a failed tool; a mismatch is only reported when both
/// list pins.
pub async fn read_bcm_pins(
    runner: &dyn CommandRunner,
    gpio_tool: &str,
    range: RangeInclusive<u32>,
    include_funcs: bool,
) -> Result<BcmPins> {
    let bounds = format!("{}-{}", range.start(), range.end());
    let get_command = format!("{} get {}", gpio_tool, bounds);
    let funcs_command = format!("{} funcs {}", gpio_tool, bounds);

    let (state_output, funcs_output) =
        futures_util::try_join!(runner.run(&get_command), runner.run(&funcs_command))?;

    let states = parse_pin_states(&state_output)?;
    if states.is_empty() {
        return Err(StatusError::parse_error(format!("`{}` returned no pins", get_command)));
    }
    let functions = parse_pin_functions(&funcs_output)?;
    if functions.is_empty() {
        return Err(StatusError::parse_error(format!("`{}` returned no pins", funcs_command)));
    }
    debug!(
        "Parsed {} pin states and {} function lists",
        states.len(),
        functions.len()
    );

    merge(states, functions, include_funcs)
}
