//! OS interface enablement flags.

use crate::command::CommandRunner;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// An OS interface whose enablement can be queried from the config tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Camera,
    Ssh,
    Spi,
    I2c,
    Serial,
    SerialHw,
    OneWire,
    RemoteGpio,
}

impl Service {
    pub const ALL: [Service; 8] = [
        Service::Camera,
        Service::Ssh,
        Service::Spi,
        Service::I2c,
        Service::Serial,
        Service::SerialHw,
        Service::OneWire,
        Service::RemoteGpio,
    ];

    /// Non-interactive query understood by the config tool.
    pub fn query(self) -> &'static str {
        match self {
            Service::Camera => "get_camera",
            Service::Ssh => "get_ssh",
            Service::Spi => "get_spi",
            Service::I2c => "get_i2c",
            Service::Serial => "get_serial",
            Service::SerialHw => "get_serial_hw",
            Service::OneWire => "get_onewire",
            Service::RemoteGpio => "get_rgpio",
        }
    }

    /// Full command line for this query.
    pub fn command_line(self, config_tool: &str) -> String {
        format!("{} nonint {}", config_tool, self.query())
    }
}

/// Whether each OS interface is enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFlags {
    pub camera: bool,
    pub ssh: bool,
    pub spi: bool,
    pub i2c: bool,
    pub serial: bool,
    pub serial_hw: bool,
    pub one_wire: bool,
    pub remote_gpio: bool,
}

impl ServiceFlags {
    fn set(&mut self, service: Service, enabled: bool) {
        let flag = match service {
            Service::Camera => &mut self.camera,
            Service::Ssh => &mut self.ssh,
            Service::Spi => &mut self.spi,
            Service::I2c => &mut self.i2c,
            Service::Serial => &mut self.serial,
            Service::SerialHw => &mut self.serial_hw,
            Service::OneWire => &mut self.one_wire,
            Service::RemoteGpio => &mut self.remote_gpio,
        };
        *flag = enabled;
    }
}

/// The config tool prints `0` for an enabled interface.
pub fn is_enabled(output: &str) -> bool {
    output.trim() == "0"
}

/// Query one interface. A failed query counts as disabled.
pub async fn check_service(runner: &dyn CommandRunner, config_tool: &str, service: Service) -> bool {
    let command = service.command_line(config_tool);
    match runner.run(&command).await {
        Ok(output) => is_enabled(&output),
        Err(e) => {
            warn!("Service query `{}` failed: {}", command, e);
            false
        }
    }
}

/// Query every interface concurrently.
pub async fn check_services(runner: &dyn CommandRunner, config_tool: &str) -> ServiceFlags {
    let results = join_all(
        Service::ALL
            .iter()
            .map(|&service| async move { (service, check_service(runner, config_tool, service).await) }),
    )
    .await;

    let mut flags = ServiceFlags::default();
    for (service, enabled) in results {
        flags.set(service, enabled);
    }
    flags
}
