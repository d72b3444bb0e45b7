//! Physical pin header layouts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Logical-name prefix of BCM GPIO pins.
pub const GPIO_PREFIX: &str = "GPIO";

/// Preferred header name, present on every 40-pin board.
pub const PRIMARY_HEADER: &str = "J8";

/// Header name on the original 26-pin boards.
pub const FALLBACK_HEADER: &str = "P1";

/// One connector position on a header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalPin {
    /// 1-based connector index
    pub physical_name: u32,
    /// Logical name, e.g. `GPIO17`, `5V` or `GND`
    pub name: String,
}

impl PhysicalPin {
    pub fn new(physical_name: u32, name: impl Into<String>) -> Self {
        Self {
            physical_name,
            name: name.into(),
        }
    }

    /// BCM index when this is a GPIO pin.
    pub fn bcm_index(&self) -> Option<u32> {
        self.name.strip_prefix(GPIO_PREFIX)?.parse().ok()
    }
}

/// Header geometry and its pins, sorted by physical position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalPinLayout {
    pub rows: u32,
    pub columns: u32,
    pub pins: Vec<PhysicalPin>,
}

impl PhysicalPinLayout {
    /// Build a layout; pins are sorted ascending by physical position.
    pub fn new(rows: u32, columns: u32, mut pins: Vec<PhysicalPin>) -> Self {
        pins.sort_by_key(|pin| pin.physical_name);
        Self { rows, columns, pins }
    }

    /// Highest BCM index exposed on this header.
    pub fn max_bcm_index(&self) -> Option<u32> {
        self.pins.iter().filter_map(PhysicalPin::bcm_index).max()
    }

    /// The pin range to query the GPIO tool for: `0..=max`.
    ///
    /// `None` when the header exposes no GPIO pins at all.
    pub fn bcm_range(&self) -> Option<RangeInclusive<u32>> {
        self.max_bcm_index().map(|max| 0..=max)
    }
}

/// Which header a board carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// 40-pin J8
    J8,
    /// 26-pin P1 of the revision 1.0 Model B
    P1Rev1,
    /// 26-pin P1 of later Model A/B boards
    P1Rev2,
    /// No GPIO header (compute modules)
    None,
}

impl HeaderKind {
    /// All headers of this kind, keyed by header name.
    pub fn headers(self) -> BTreeMap<String, PhysicalPinLayout> {
        let mut headers = BTreeMap::new();
        match self {
            HeaderKind::J8 => {
                headers.insert(PRIMARY_HEADER.to_string(), layout(20, &J8_NAMES));
            }
            HeaderKind::P1Rev1 => {
                headers.insert(FALLBACK_HEADER.to_string(), layout(13, &P1_REV1_NAMES));
            }
            HeaderKind::P1Rev2 => {
                headers.insert(FALLBACK_HEADER.to_string(), layout(13, &J8_NAMES[..26]));
            }
            HeaderKind::None => {}
        }
        headers
    }
}

/// Pick `J8` when present, otherwise `P1`.
pub fn select_header(headers: &BTreeMap<String, PhysicalPinLayout>) -> Option<&PhysicalPinLayout> {
    headers
        .get(PRIMARY_HEADER)
        .or_else(|| headers.get(FALLBACK_HEADER))
}

fn layout(rows: u32, names: &[&str]) -> PhysicalPinLayout {
    let pins = names
        .iter()
        .zip(1u32..)
        .map(|(name, number)| PhysicalPin::new(number, *name))
        .collect();
    PhysicalPinLayout::new(rows, 2, pins)
}

// Odd pins run down the left column, even pins down the right.
const J8_NAMES: [&str; 40] = [
    "3V3", "5V", "GPIO2", "5V", "GPIO3", "GND", "GPIO4", "GPIO14", "GND", "GPIO15",
    "GPIO17", "GPIO18", "GPIO27", "GND", "GPIO22", "GPIO23", "3V3", "GPIO24", "GPIO10", "GND",
    "GPIO9", "GPIO25", "GPIO11", "GPIO8", "GND", "GPIO7", "GPIO0", "GPIO1", "GPIO5", "GND",
    "GPIO6", "GPIO12", "GPIO13", "GND", "GPIO19", "GPIO16", "GPIO26", "GPIO20", "GND", "GPIO21",
];

const P1_REV1_NAMES: [&str; 26] = [
    "3V3", "5V", "GPIO0", "5V", "GPIO1", "GND", "GPIO4", "GPIO14", "GND", "GPIO15",
    "GPIO17", "GPIO18", "GPIO21", "GND", "GPIO22", "GPIO23", "3V3", "GPIO24", "GPIO10", "GND",
    "GPIO9", "GPIO25", "GPIO11", "GPIO8", "GND", "GPIO7",
];
