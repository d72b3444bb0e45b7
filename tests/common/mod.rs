//! Shared fixtures: canned raspi-gpio / raspi-config output for a Pi 3B.

#![allow(dead_code)]

use gpio_status::{Board, ScriptedRunner, StatusAggregator, ToolConfig};
use std::sync::Arc;

pub const PI3B_REVISION: &str = "a02082";

/// `raspi-gpio get 0-<max>` output: even pins high, I2C/SPI pins on ALT0.
pub fn state_output(max: u32) -> String {
    (0..=max)
        .map(|i| {
            let (fsel, func) = match i {
                2 | 3 | 7..=11 => (4, "ALT0".to_string()),
                17 => (1, "OUTPUT".to_string()),
                _ => (0, "INPUT".to_string()),
            };
            format!("GPIO {}: level={} fsel={} func={}", i, (i + 1) % 2, fsel, func)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `raspi-gpio funcs 0-<max>` output including its header row.
pub fn funcs_output(max: u32) -> String {
    let mut lines = vec!["GPIO, DEFAULT PULL, ALT0, ALT1, ALT2, ALT3, ALT4, ALT5".to_string()];
    lines.extend((0..=max).map(|i| {
        let pull = if i <= 8 { "UP" } else { "DOWN" };
        format!("{}, {}, FA{}, FB{}, FC{}, FD{}, FE{}, FF{}", i, pull, i, i, i, i, i, i)
    }));
    lines.join("\n")
}

/// Service query outputs: ssh and i2c enabled, everything else disabled.
pub fn with_services(runner: ScriptedRunner) -> ScriptedRunner {
    [
        ("get_camera", "1"),
        ("get_ssh", "0"),
        ("get_spi", "1"),
        ("get_i2c", "0"),
        ("get_serial", "1"),
        ("get_serial_hw", "1"),
        ("get_onewire", "1"),
        ("get_rgpio", "1"),
    ]
    .into_iter()
    .fold(runner, |runner, (query, out)| {
        runner.with_output(format!("raspi-config nonint {}", query), out)
    })
}

/// A runner where both tools exist and answer for GPIO 0-27.
pub fn healthy_runner() -> ScriptedRunner {
    with_services(
        ScriptedRunner::new()
            .with_program("raspi-config")
            .with_program("raspi-gpio")
            .with_output("raspi-gpio get 0-27", state_output(27))
            .with_output("raspi-gpio funcs 0-27", funcs_output(27)),
    )
}

pub fn aggregator(runner: ScriptedRunner) -> (StatusAggregator, Arc<ScriptedRunner>) {
    let runner = Arc::new(runner);
    let board = Board::from_revision(PI3B_REVISION).expect("Pi 3B revision should decode");
    let aggregator = StatusAggregator::new(runner.clone(), ToolConfig::default(), Some(board));
    (aggregator, runner)
}
