//! Parser for the GPIO tool's `get` output.
//!
//! One line per pin, e.g. `GPIO 10: level=1 fsel=4 func=ALT0 pull=DOWN`.

use crate::board::GPIO_PREFIX;
use crate::error::{Result, StatusError};

/// Live state of one pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinState {
    pub index: u32,
    /// Signal level, 0 or 1
    pub level: u8,
    /// Active function, e.g. "INPUT", "OUTPUT" or "ALT0"
    pub function: String,
}

/// Parse every non-blank line of `get` output, in output order.
pub fn parse_pin_states(output: &str) -> Result<Vec<PinState>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_state_line)
        .collect()
}

/// Parse one `get` line.
///
/// Fields are located by their own markers rather than by position: the
/// index is the token ending in `:`, the level follows `level=` and the
/// function follows `func=` (or `fn=`).
pub fn parse_state_line(line: &str) -> Result<PinState> {
    let mut index = None;
    let mut level = None;
    let mut function = None;

    for token in line.split_whitespace() {
        if let Some(value) = token.strip_prefix("level=") {
            level = Some(value);
        } else if let Some(value) = token.strip_prefix("func=").or_else(|| token.strip_prefix("fn=")) {
            function = Some(value);
        } else if index.is_none() {
            if let Some(stem) = token.strip_suffix(':') {
                index = stem
                    .strip_prefix(GPIO_PREFIX)
                    .unwrap_or(stem)
                    .parse::<u32>()
                    .ok();
            }
        }
    }

    let index = index.ok_or_else(|| StatusError::parse_error(format!("No pin index in `{}`", line)))?;
    let level = match level {
        Some("0") => 0,
        Some("1") => 1,
        _ => {
            return Err(StatusError::parse_error(format!("No valid level in `{}`", line)));
        }
    };
    let function = function
        .filter(|f| !f.is_empty())
        .ok_or_else(|| StatusError::parse_error(format!("No function in `{}`", line)))?;

    Ok(PinState {
        index,
        level,
        function: function.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tool_line() {
        let state = parse_state_line("GPIO 10: level=1 fsel=4 func=ALT0").unwrap();
        assert_eq!(
            state,
            PinState {
                index: 10,
                level: 1,
                function: "ALT0".to_string()
            }
        );
    }

    #[test]
    fn test_parse_line_without_prefix() {
        let state = parse_state_line("10: level=1 fsel=4 func=ALT0").unwrap();
        assert_eq!(state.index, 10);
        assert_eq!(state.level, 1);
        assert_eq!(state.function, "ALT0");
    }

    #[test]
    fn test_parse_line_with_pull_and_fn_key() {
        let state = parse_state_line("GPIO 4: level=0 fsel=1 fn=OUTPUT pull=NONE").unwrap();
        assert_eq!(state.index, 4);
        assert_eq!(state.level, 0);
        assert_eq!(state.function, "OUTPUT");
    }

    #[test]
    fn test_parse_multiple_lines_keeps_order() {
        let output = "GPIO 2: level=1 fsel=4 func=SDA1\n\nGPIO 0: level=0 fsel=0 func=INPUT\n";
        let states = parse_pin_states(output).unwrap();
        let indices: Vec<u32> = states.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![2, 0]);
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(parse_state_line("GPIO 10 level=1 func=ALT0").is_err());
        assert!(parse_state_line("GPIO 10: fsel=4 func=ALT0").is_err());
        assert!(parse_state_line("GPIO 10: level=7 func=ALT0").is_err());
        assert!(parse_state_line("GPIO 10: level=1 fsel=4").is_err());
        assert!(parse_state_line("Unknown GPIO \"foo\"").is_err());
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_pin_states("").unwrap().is_empty());
    }
}
