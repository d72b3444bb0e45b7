//! External command execution.
//!
//! Every piece of live pin data comes from a subprocess. The [`CommandRunner`]
//! trait is the single seam through which those processes are started, so the
//! rest of the crate can run against canned output on machines that are not
//! Raspberry Pis.

use crate::error::{Result, StatusError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::process::Stdio;
use std::sync::Mutex;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Executes command lines and checks for executables on the search path.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a whitespace-separated command line and return its trimmed stdout.
    ///
    /// The exit status is ignored: some tools report their answer as printed
    /// text and exit non-zero regardless.
    async fn run(&self, command_line: &str) -> Result<String>;

    /// Whether an executable with this name exists on the search path.
    fn is_available(&self, program: &str) -> bool;
}

/// Runs commands as real OS processes.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    /// Create a runner that bounds each process by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, command_line: &str) -> Result<String> {
        let mut parts = command_line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| StatusError::command_failed(command_line, "empty command line"))?;

        debug!("Running `{}`", command_line);

        let child = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| StatusError::Timeout {
                command: command_line.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|e| StatusError::command_failed(command_line, e))?;

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Answers commands from a fixed table instead of spawning processes.
///
/// Used on hosts without the Raspberry Pi tools and throughout the tests.
/// Every command line it is asked to run is recorded.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    outputs: HashMap<String, String>,
    available: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    /// Create an empty runner: no tools available, no canned output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a program as present on the search path.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.available.insert(program.into());
        self
    }

    /// Register the stdout for an exact command line.
    pub fn with_output(mut self, command_line: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.outputs.insert(command_line.into(), stdout.into());
        self
    }

    /// Command lines run so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command_line: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command_line.to_string());
        }

        self.outputs
            .get(command_line)
            .map(|stdout| stdout.trim().to_string())
            .ok_or_else(|| StatusError::command_failed(command_line, "no scripted output"))
    }

    fn is_available(&self, program: &str) -> bool {
        self.available.contains(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_runner_captures_trimmed_stdout() {
        let runner = SystemCommandRunner::new(Duration::from_secs(5));
        let output = runner.run("echo   hello   world").await.unwrap();
        assert_eq!(output, "hello world");
    }

    #[tokio::test]
    async fn test_system_runner_ignores_exit_status() {
        let runner = SystemCommandRunner::new(Duration::from_secs(5));
        let output = runner.run("false").await.unwrap();
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let runner = SystemCommandRunner::new(Duration::from_secs(5));
        let err = runner
            .run("definitely-not-a-real-program-4821")
            .await
            .unwrap_err();
        assert!(matches!(err, StatusError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn test_system_runner_timeout() {
        let runner = SystemCommandRunner::new(Duration::from_millis(50));
        let err = runner.run("sleep 5").await.unwrap_err();
        assert!(matches!(err, StatusError::Timeout { timeout_ms: 50, .. }));
    }

    #[tokio::test]
    async fn test_system_runner_empty_command() {
        let runner = SystemCommandRunner::new(Duration::from_secs(1));
        assert!(runner.run("   ").await.is_err());
    }

    #[test]
    fn test_system_runner_path_lookup() {
        let runner = SystemCommandRunner::new(Duration::from_secs(1));
        assert!(runner.is_available("sh"));
        assert!(!runner.is_available("definitely-not-a-real-program-4821"));
    }

    #[tokio::test]
    async fn test_scripted_runner() {
        let runner = ScriptedRunner::new()
            .with_program("raspi-gpio")
            .with_output("raspi-gpio get 0-1", "  GPIO 0: level=1\n");

        assert!(runner.is_available("raspi-gpio"));
        assert!(!runner.is_available("raspi-config"));
        assert_eq!(runner.run("raspi-gpio get 0-1").await.unwrap(), "GPIO 0: level=1");
        assert!(runner.run("raspi-gpio funcs 0-1").await.is_err());
        assert_eq!(runner.calls(), vec!["raspi-gpio get 0-1", "raspi-gpio funcs 0-1"]);
    }
}
