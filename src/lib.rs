//! # GPIO Status - Raspberry Pi header diagnostics
//!
//! Reports the live state of a Raspberry Pi's GPIO header: which physical
//! pins carry which BCM GPIO, each GPIO's level, active function, pull
//! resistor and supported alternate functions, plus whether OS interfaces
//! such as SPI, I2C or SSH are enabled.
//!
//! Live data comes from the `raspi-gpio` and `raspi-config` tools. When
//! either is missing the report degrades to tool availability only.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gpio_status::{Board, StatusAggregator, StatusRequest, SystemCommandRunner, ToolConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ToolConfig::default();
//!     let board = Board::detect(&config).ok();
//!     let runner = Arc::new(SystemCommandRunner::new(config.command_timeout()));
//!
//!     let aggregator = StatusAggregator::new(runner, config, board);
//!     let report = aggregator.get_status(StatusRequest::default()).await?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod command;
pub mod config;
pub mod error;
pub mod gpio;
pub mod services;
pub mod status;
pub mod web;

// Re-export public API
pub use board::{Board, HardwareFacts, PhysicalPin, PhysicalPinLayout};
pub use command::{CommandRunner, ScriptedRunner, SystemCommandRunner};
pub use config::ToolConfig;
pub use error::{Result, StatusError};
pub use gpio::BcmPinStatus;
pub use services::ServiceFlags;
pub use status::{StatusAggregator, StatusReport, StatusRequest};
pub use web::{start_web_server, WebConfig};

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 8080;
