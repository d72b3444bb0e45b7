//! Board revision code decoding.
//!
//! Boards since the Pi 2 encode their identity as bit fields of the revision
//! code (`NOQuuuWuFMMMCCCCPPPPTTTTTTTTRRRR`, with `F` set). Earlier boards use
//! a small table of opaque codes.

use super::header::HeaderKind;
use super::HardwareFacts;
use crate::error::{Result, StatusError};

const NEW_STYLE_FLAG: u32 = 1 << 23;
const OVERVOLTAGE_FLAG: u32 = 0x0100_0000;

/// Static facts shared by every board of one model.
struct ModelSpec {
    model: &'static str,
    released: &'static str,
    storage: &'static str,
    usb: u32,
    usb3: u32,
    ethernet: u32,
    eth_speed: u32,
    wifi: bool,
    bluetooth: bool,
    csi: u32,
    dsi: u32,
    header: HeaderKind,
}

#[allow(clippy::too_many_arguments)]
const fn model_spec(
    model: &'static str,
    released: &'static str,
    storage: &'static str,
    usb: u32,
    usb3: u32,
    ethernet: u32,
    eth_speed: u32,
    wireless: bool,
    csi: u32,
    dsi: u32,
    header: HeaderKind,
) -> ModelSpec {
    ModelSpec {
        model,
        released,
        storage,
        usb,
        usb3,
        ethernet,
        eth_speed,
        wifi: wireless,
        bluetooth: wireless,
        csi,
        dsi,
        header,
    }
}

const MODEL_A: ModelSpec = model_spec("A", "2013Q1", "SD", 1, 0, 0, 0, false, 1, 1, HeaderKind::P1Rev2);
const MODEL_B: ModelSpec = model_spec("B", "2012Q1", "SD", 2, 0, 1, 100, false, 1, 1, HeaderKind::P1Rev2);
const MODEL_B_REV1: ModelSpec = model_spec("B", "2012Q1", "SD", 2, 0, 1, 100, false, 1, 1, HeaderKind::P1Rev1);
const MODEL_A_PLUS: ModelSpec = model_spec("A+", "2014Q4", "MicroSD", 1, 0, 0, 0, false, 1, 1, HeaderKind::J8);
const MODEL_B_PLUS: ModelSpec = model_spec("B+", "2014Q3", "MicroSD", 4, 0, 1, 100, false, 1, 1, HeaderKind::J8);
const MODEL_CM: ModelSpec = model_spec("CM", "2014Q2", "eMMC", 1, 0, 0, 0, false, 2, 2, HeaderKind::None);

/// Look up a new-style board type field.
fn model_for_type(board_type: u32) -> Option<ModelSpec> {
    use super::header::HeaderKind::{None as NoHeader, J8};
    let spec = match board_type {
        0x00 => MODEL_A,
        0x01 => MODEL_B,
        0x02 => MODEL_A_PLUS,
        0x03 => MODEL_B_PLUS,
        0x04 => model_spec("2B", "2015Q1", "MicroSD", 4, 0, 1, 100, false, 1, 1, J8),
        0x06 => MODEL_CM,
        0x08 => model_spec("3B", "2016Q1", "MicroSD", 4, 0, 1, 100, true, 1, 1, J8),
        0x09 => model_spec("Zero", "2015Q4", "MicroSD", 1, 0, 0, 0, false, 1, 0, J8),
        0x0a => model_spec("CM3", "2017Q1", "eMMC", 1, 0, 0, 0, false, 2, 2, NoHeader),
        0x0c => model_spec("Zero W", "2017Q1", "MicroSD", 1, 0, 0, 0, true, 1, 0, J8),
        0x0d => model_spec("3B+", "2018Q1", "MicroSD", 4, 0, 1, 300, true, 1, 1, J8),
        0x0e => model_spec("3A+", "2018Q4", "MicroSD", 1, 0, 0, 0, true, 1, 1, J8),
        0x10 => model_spec("CM3+", "2019Q1", "MicroSD", 1, 0, 0, 0, false, 2, 2, NoHeader),
        0x11 => model_spec("4B", "2019Q2", "MicroSD", 4, 2, 1, 1000, true, 1, 1, J8),
        0x12 => model_spec("Zero2W", "2021Q4", "MicroSD", 1, 0, 0, 0, true, 1, 0, J8),
        0x13 => model_spec("400", "2020Q4", "MicroSD", 3, 2, 1, 1000, true, 0, 0, J8),
        0x14 => model_spec("CM4", "2020Q4", "eMMC", 1, 0, 1, 1000, true, 2, 2, NoHeader),
        0x15 => model_spec("CM4S", "2022Q1", "eMMC", 1, 0, 0, 0, false, 2, 2, NoHeader),
        0x17 => model_spec("5B", "2023Q4", "MicroSD", 4, 2, 1, 1000, true, 2, 2, J8),
        0x18 => model_spec("CM5", "2024Q4", "eMMC", 2, 2, 1, 1000, true, 2, 2, NoHeader),
        0x19 => model_spec("500", "2024Q4", "MicroSD", 3, 2, 1, 1000, true, 0, 0, J8),
        _ => return None,
    };
    Some(spec)
}

fn soc_name(processor: u32) -> Option<&'static str> {
    match processor {
        0 => Some("BCM2835"),
        1 => Some("BCM2836"),
        2 => Some("BCM2837"),
        3 => Some("BCM2711"),
        4 => Some("BCM2712"),
        _ => None,
    }
}

fn manufacturer_name(code: u32) -> Option<&'static str> {
    match code {
        0 => Some("Sony"),
        1 => Some("Egoman"),
        2 | 4 => Some("Embest"),
        3 => Some("Sony Japan"),
        5 => Some("Stadium"),
        _ => None,
    }
}

/// Decode a hexadecimal revision code into hardware facts and a header kind.
pub fn decode(code: &str) -> Result<(HardwareFacts, HeaderKind)> {
    let trimmed = code.trim().trim_start_matches("0x");
    let raw = u32::from_str_radix(trimmed, 16)
        .map_err(|_| StatusError::board_error(format!("Invalid revision code `{}`", code)))?;

    if raw & NEW_STYLE_FLAG != 0 {
        decode_new_style(raw)
    } else {
        decode_old_style(raw & !OVERVOLTAGE_FLAG)
    }
}

fn decode_new_style(raw: u32) -> Result<(HardwareFacts, HeaderKind)> {
    let pcb = raw & 0xf;
    let board_type = (raw >> 4) & 0xff;
    let processor = (raw >> 12) & 0xf;
    let manufacturer = (raw >> 16) & 0xf;
    let memory = 256u32 << ((raw >> 20) & 0x7);

    let spec = model_for_type(board_type).ok_or_else(|| {
        StatusError::board_error(format!("Unknown board type 0x{:02x} in revision {:06x}", board_type, raw))
    })?;
    let soc = soc_name(processor)
        .ok_or_else(|| StatusError::board_error(format!("Unknown processor {} in revision {:06x}", processor, raw)))?;
    let manufacturer = manufacturer_name(manufacturer).unwrap_or("Unknown");

    let header = spec.header;
    let facts = facts_from(&spec, format!("{:06x}", raw), format!("1.{}", pcb), soc, manufacturer, memory);
    Ok((facts, header))
}

fn decode_old_style(raw: u32) -> Result<(HardwareFacts, HeaderKind)> {
    let (spec, pcb, memory, manufacturer) = match raw {
        0x02 | 0x03 => (MODEL_B_REV1, "1.0", 256, "Egoman"),
        0x04 => (MODEL_B, "2.0", 256, "Sony"),
        0x05 => (MODEL_B, "2.0", 256, "Qisda"),
        0x06 => (MODEL_B, "2.0", 256, "Egoman"),
        0x07 => (MODEL_A, "2.0", 256, "Egoman"),
        0x08 => (MODEL_A, "2.0", 256, "Sony"),
        0x09 => (MODEL_A, "2.0", 256, "Qisda"),
        0x0d => (MODEL_B, "2.0", 512, "Egoman"),
        0x0e => (MODEL_B, "2.0", 512, "Sony"),
        0x0f => (MODEL_B, "2.0", 512, "Qisda"),
        0x10 => (MODEL_B_PLUS, "1.2", 512, "Sony"),
        0x11 => (MODEL_CM, "1.0", 512, "Sony"),
        0x12 => (MODEL_A_PLUS, "1.1", 256, "Sony"),
        0x13 => (MODEL_B_PLUS, "1.2", 512, "Embest"),
        0x14 => (MODEL_CM, "1.0", 512, "Embest"),
        0x15 => (MODEL_A_PLUS, "1.1", 256, "Embest"),
        _ => {
            return Err(StatusError::board_error(format!("Unknown revision code {:04x}", raw)));
        }
    };

    let header = spec.header;
    let facts = facts_from(&spec, format!("{:04x}", raw), pcb.to_string(), "BCM2835", manufacturer, memory);
    Ok((facts, header))
}

fn facts_from(
    spec: &ModelSpec,
    revision: String,
    pcb_revision: String,
    soc: &str,
    manufacturer: &str,
    memory: u32,
) -> HardwareFacts {
    HardwareFacts {
        revision,
        model: spec.model.to_string(),
        pcb_revision,
        released: spec.released.to_string(),
        soc: soc.to_string(),
        manufacturer: manufacturer.to_string(),
        memory,
        storage: spec.storage.to_string(),
        usb: spec.usb,
        usb3: spec.usb3,
        ethernet: spec.ethernet,
        eth_speed: spec.eth_speed,
        wifi: spec.wifi,
        bluetooth: spec.bluetooth,
        csi: spec.csi,
        dsi: spec.dsi,
    }
}
