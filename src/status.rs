//! The composite GPIO status report.
//!
//! [`StatusAggregator::get_status`] is the single entry point used by every
//! front end. It first checks that both external tools exist; without them
//! the report carries only the availability flags. With them it combines the
//! static board facts, the live BCM pin data and the service flags.

use crate::board::{Board, HardwareFacts, PhysicalPinLayout};
use crate::command::CommandRunner;
use crate::config::ToolConfig;
use crate::error::Result;
use crate::gpio::{self, BcmPinStatus, BcmPins};
use crate::services::{self, ServiceFlags};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

fn default_true() -> bool {
    true
}

/// Which optional parts of the report the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest {
    /// Include hardware facts
    #[serde(default = "default_true")]
    pub hw: bool,
    /// Include each pin's supported function list
    #[serde(default = "default_true")]
    pub funcs: bool,
}

impl Default for StatusRequest {
    fn default() -> Self {
        Self { hw: true, funcs: true }
    }
}

/// Whether each external tool is usable for this request.
///
/// A flag is set when the tool was found on the search path. `raspi_gpio`
/// is cleared again when the tool was found but its output could not be
/// used (failed run, timeout, empty or malformed output), so `false` does
/// not always mean the tool is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAvailability {
    pub raspi_config: bool,
    pub raspi_gpio: bool,
}

impl CommandAvailability {
    /// Both tools are usable.
    pub fn all_present(&self) -> bool {
        self.raspi_config && self.raspi_gpio
    }
}

/// One physical pin, annotated with live data when it is a BCM pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinReport {
    pub physical_name: u32,
    pub name: String,
    pub is_bcm: bool,
    #[serde(flatten)]
    pub status: Option<BcmPinStatus>,
}

/// Header geometry and every annotated pin, ascending by physical position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinStatusReport {
    pub rows: u32,
    pub columns: u32,
    pub pins: Vec<PinReport>,
}

/// The full response to a `gpio_status` request.
///
/// Only `commands` is present when either tool is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub commands: CommandAvailability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<HardwareFacts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<ServiceFlags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PinStatusReport>,
}

impl StatusReport {
    /// A report carrying only tool availability.
    pub fn degraded(commands: CommandAvailability) -> Self {
        Self {
            commands,
            hardware: None,
            services: None,
            status: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status.is_none()
    }
}

/// How much of the report can be produced for this request.
#[derive(Debug, Clone, Copy)]
pub enum Mode<'a> {
    /// Tools or topology missing: availability flags only
    Degraded,
    /// Everything available
    Full(&'a Board),
}

/// Mark every physical pin that has merged BCM data.
pub fn annotate_pins(layout: &PhysicalPinLayout, bcm: &BcmPins) -> Vec<PinReport> {
    layout
        .pins
        .iter()
        .map(|pin| {
            let status = bcm.get(&pin.name).cloned();
            PinReport {
                physical_name: pin.physical_name,
                name: pin.name.clone(),
                is_bcm: status.is_some(),
                status,
            }
        })
        .collect()
}

/// Builds status reports from the board topology and the external tools.
///
/// Cheap to share: the board is behind an `Arc` and never mutated.
#[derive(Clone)]
pub struct StatusAggregator {
    runner: Arc<dyn CommandRunner>,
    config: ToolConfig,
    board: Option<Arc<Board>>,
}

impl StatusAggregator {
    /// Create an aggregator. `board` is `None` when detection failed.
    pub fn new(runner: Arc<dyn CommandRunner>, config: ToolConfig, board: Option<Board>) -> Self {
        Self {
            runner,
            config,
            board: board.map(Arc::new),
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_deref()
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Look both tools up on the search path.
    pub fn check_commands(&self) -> CommandAvailability {
        CommandAvailability {
            raspi_config: self.runner.is_available(&self.config.config_tool),
            raspi_gpio: self.runner.is_available(&self.config.gpio_tool),
        }
    }

    /// Decide the mode for a request.
    pub fn mode(&self, commands: &CommandAvailability) -> Mode<'_> {
        match self.board() {
            Some(board) if commands.all_present() => Mode::Full(board),
            _ => Mode::Degraded,
        }
    }

    /// Build a status report.
    ///
    /// Tool failures degrade the report; only inconsistent pin data is an
    /// error.
    pub async fn get_status(&self, request: StatusRequest) -> Result<StatusReport> {
        let commands = self.check_commands();

        let board = match self.mode(&commands) {
            Mode::Full(board) => board,
            Mode::Degraded => {
                if !commands.all_present() {
                    info!(
                        "GPIO tools unavailable ({}: {}, {}: {})",
                        self.config.config_tool,
                        commands.raspi_config,
                        self.config.gpio_tool,
                        commands.raspi_gpio
                    );
                } else {
                    warn!("Board topology unknown, reporting tool availability only");
                }
                return Ok(StatusReport::degraded(commands));
            }
        };

        let runner = self.runner.as_ref();
        let pins = async {
            match board.layout.bcm_range() {
                Some(range) => gpio::read_bcm_pins(runner, &self.config.gpio_tool, range, request.funcs).await,
                None => Ok(BcmPins::new()),
            }
        };
        let (pins, services) = tokio::join!(pins, services::check_services(runner, &self.config.config_tool));

        let bcm = match pins {
            Ok(bcm) => bcm,
            Err(e) if e.is_tool_failure() => {
                warn!("{} unusable, degrading report: {}", self.config.gpio_tool, e);
                return Ok(StatusReport::degraded(CommandAvailability {
                    raspi_gpio: false,
                    ..commands
                }));
            }
            Err(e) => return Err(e),
        };

        Ok(StatusReport {
            commands,
            hardware: request.hw.then(|| board.facts.clone()),
            services: Some(services),
            status: Some(PinStatusReport {
                rows: board.layout.rows,
                columns: board.layout.columns,
                pins: annotate_pins(&board.layout, &bcm),
            }),
        })
    }
}
