//! External tool configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default name of the OS configuration tool.
pub const DEFAULT_CONFIG_TOOL: &str = "raspi-config";

/// Default name of the GPIO introspection tool.
pub const DEFAULT_GPIO_TOOL: &str = "raspi-gpio";

/// Default bound on a single subprocess call, in milliseconds.
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 5000;

/// Configuration for the external tools the status report is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Name of the OS configuration tool (service flag queries)
    pub config_tool: String,
    /// Name of the GPIO tool (pin state and function queries)
    pub gpio_tool: String,
    /// Maximum runtime of a single subprocess call
    pub command_timeout_ms: u64,
    /// Board revision code to use instead of the one in /proc/cpuinfo
    pub revision_override: Option<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            config_tool: DEFAULT_CONFIG_TOOL.to_string(),
            gpio_tool: DEFAULT_GPIO_TOOL.to_string(),
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
            revision_override: None,
        }
    }
}

impl ToolConfig {
    /// Set the configuration tool name.
    pub fn with_config_tool(mut self, tool: impl Into<String>) -> Self {
        self.config_tool = tool.into();
        self
    }

    /// Set the GPIO tool name.
    pub fn with_gpio_tool(mut self, tool: impl Into<String>) -> Self {
        self.gpio_tool = tool.into();
        self
    }

    /// Set the per-command timeout.
    pub fn with_command_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.command_timeout_ms = timeout_ms;
        self
    }

    /// Force a board revision code.
    pub fn with_revision_override(mut self, revision: Option<String>) -> Self {
        self.revision_override = revision;
        self
    }

    /// The per-command timeout as a `Duration`.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert_eq!(config.config_tool, "raspi-config");
        assert_eq!(config.gpio_tool, "raspi-gpio");
        assert_eq!(config.command_timeout(), Duration::from_secs(5));
        assert!(config.revision_override.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ToolConfig::default()
            .with_gpio_tool("pinctrl")
            .with_command_timeout_ms(250)
            .with_revision_override(Some("a02082".to_string()));
        assert_eq!(config.gpio_tool, "pinctrl");
        assert_eq!(config.command_timeout_ms, 250);
        assert_eq!(config.revision_override.as_deref(), Some("a02082"));
    }
}
