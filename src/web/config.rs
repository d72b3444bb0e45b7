//! Settings for the dashboard server.

use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Where the status API listens and which dashboard it serves.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// Allow the dashboard to be hosted on another origin
    pub enable_cors: bool,
    /// Dashboard assets served at `/`; API-only when unset
    pub dashboard_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, crate::DEFAULT_WEB_PORT)
    }
}

impl WebConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            enable_cors: true,
            dashboard_dir: None,
        }
    }

    pub fn with_cors(mut self, enable_cors: bool) -> Self {
        self.enable_cors = enable_cors;
        self
    }

    pub fn with_dashboard_dir(mut self, dir: Option<impl Into<PathBuf>>) -> Self {
        self.dashboard_dir = dir.map(Into::into);
        self
    }

    /// The dashboard directory, if one is configured and exists.
    pub fn dashboard(&self) -> Option<&Path> {
        self.dashboard_dir.as_deref().filter(|dir| dir.is_dir())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
