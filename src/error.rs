//! Error handling for the GPIO status service.

/// A specialized `Result` type for GPIO status operations.
pub type Result<T> = std::result::Result<T, StatusError>;

/// The main error type for GPIO status operations.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tool output could not be parsed
    #[error("Failed to parse tool output: {0}")]
    Parse(String),

    /// Pin state and pin function sources disagree on which pins exist
    #[error("Pin data mismatch: {0}")]
    ParseMismatch(String),

    /// An external command could not be started
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// An external command did not finish in time
    #[error("Command `{command}` timed out after {timeout_ms}ms")]
    Timeout { command: String, timeout_ms: u64 },

    /// Board topology could not be determined
    #[error("Board error: {0}")]
    Board(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),
}

impl StatusError {
    /// Create a new parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new mismatch error
    pub fn mismatch_error(msg: impl Into<String>) -> Self {
        Self::ParseMismatch(msg.into())
    }

    /// Create a new command failure
    pub fn command_failed(command: impl Into<String>, reason: impl ToString) -> Self {
        Self::CommandFailed {
            command: command.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new board error
    pub fn board_error(msg: impl Into<String>) -> Self {
        Self::Board(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Whether this error means a tool produced nothing usable.
    ///
    /// Such failures degrade the report instead of failing the request.
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Parse(_) | Self::CommandFailed { .. } | Self::Timeout { .. }
        )
    }
}
