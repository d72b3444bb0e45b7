//! Static board topology: hardware identity and the GPIO header layout.
//!
//! Both are fixed for the lifetime of the process. They are computed once at
//! startup and then shared read-only with every request.

pub mod header;
pub mod revision;

pub use header::{select_header, HeaderKind, PhysicalPin, PhysicalPinLayout, GPIO_PREFIX};

use crate::config::ToolConfig;
use crate::error::{Result, StatusError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use tracing::info;

const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Immutable identity of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareFacts {
    /// Revision code as reported by the firmware
    pub revision: String,
    /// Model name, e.g. "4B"
    pub model: String,
    pub pcb_revision: String,
    /// Release quarter, e.g. "2019Q2"
    pub released: String,
    pub soc: String,
    pub manufacturer: String,
    /// Memory size in MB
    pub memory: u32,
    pub storage: String,
    pub usb: u32,
    pub usb3: u32,
    pub ethernet: u32,
    /// Ethernet speed in Mbps
    pub eth_speed: u32,
    pub wifi: bool,
    pub bluetooth: bool,
    pub csi: u32,
    pub dsi: u32,
}

/// Everything known about the board without running any tool.
#[derive(Debug, Clone)]
pub struct BoardInfo {
    pub facts: HardwareFacts,
    /// Every header on the board, keyed by header name
    pub headers: BTreeMap<String, PhysicalPinLayout>,
}

impl BoardInfo {
    /// Decode board info from a revision code.
    pub fn from_revision(code: &str) -> Result<Self> {
        let (facts, kind) = revision::decode(code)?;
        Ok(Self {
            facts,
            headers: kind.headers(),
        })
    }
}

/// Hardware facts plus the selected header layout.
#[derive(Debug, Clone)]
pub struct Board {
    pub facts: HardwareFacts,
    pub layout: PhysicalPinLayout,
}

impl Board {
    /// Detect the board this process runs on.
    ///
    /// The configured revision override wins over `/proc/cpuinfo`.
    pub fn detect(config: &ToolConfig) -> Result<Self> {
        let code = match &config.revision_override {
            Some(code) => code.clone(),
            None => read_revision(&fs::read_to_string(CPUINFO_PATH)?)?,
        };

        let board = Self::from_revision(&code)?;
        info!(
            "Detected Raspberry Pi {} (revision {}, {} pins)",
            board.facts.model,
            board.facts.revision,
            board.layout.pins.len()
        );
        Ok(board)
    }

    /// Build a board from a revision code.
    pub fn from_revision(code: &str) -> Result<Self> {
        Self::from_info(BoardInfo::from_revision(code)?)
    }

    /// Select the GPIO header of `info`: `J8` if present, otherwise `P1`.
    pub fn from_info(info: BoardInfo) -> Result<Self> {
        let layout = select_header(&info.headers).cloned().ok_or_else(|| {
            StatusError::board_error(format!(
                "Raspberry Pi {} has no J8 or P1 header",
                info.facts.model
            ))
        })?;

        Ok(Self {
            facts: info.facts,
            layout,
        })
    }
}

/// Extract the revision code from the contents of /proc/cpuinfo.
pub fn read_revision(cpuinfo: &str) -> Result<String> {
    cpuinfo
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == "Revision")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StatusError::board_error("No board revision in /proc/cpuinfo"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PI4_CPUINFO: &str = "processor\t: 0\nBogoMIPS\t: 108.00\n\nHardware\t: BCM2835\nRevision\t: c03114\nSerial\t\t: 10000000abcdef01\nModel\t\t: Raspberry Pi 4 Model B Rev 1.4\n";

    #[test]
    fn test_read_revision() {
        assert_eq!(read_revision(PI4_CPUINFO).unwrap(), "c03114");
        assert!(read_revision("processor\t: 0\n").is_err());
        assert!(read_revision("Revision\t:\n").is_err());
    }

    #[test]
    fn test_board_from_revision() {
        let board = Board::from_revision("c03114").unwrap();
        assert_eq!(board.facts.model, "4B");
        assert_eq!(board.facts.memory, 4096);
        assert_eq!(board.layout.pins.len(), 40);
    }

    #[test]
    fn test_board_falls_back_to_p1() {
        let board = Board::from_revision("0003").unwrap();
        assert_eq!(board.layout.pins.len(), 26);
        assert_eq!(board.layout.rows, 13);
    }

    #[test]
    fn test_compute_module_is_rejected() {
        let err = Board::from_revision("a020a0").unwrap_err();
        assert!(matches!(err, StatusError::Board(_)));
    }

    #[test]
    fn test_detect_uses_override() {
        let config = ToolConfig::default().with_revision_override(Some("9000c1".to_string()));
        let board = Board::detect(&config).unwrap();
        assert_eq!(board.facts.model, "Zero W");
    }
}
