//! Process-backed kubectl execution.

use super::Invocation;
use crate::error::ApiError;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Executes kubectl invocations.
pub trait KubectlRunner {
    /// Run to completion and return stdout. Non-zero exit becomes
    /// [`ApiError::KubectlFailed`] carrying stderr.
    fn capture(&self, invocation: &Invocation) -> Result<String, ApiError>;

    /// Run with inherited stdio (logs -f, events -w, debug -it, pass-through output).
    fn interactive(&self, invocation: &Invocation) -> Result<(), ApiError>;
}

/// Runs the configured kubectl binary as a child process.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: String,
}

impl ProcessRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(invocation.to_args());
        command.envs(invocation.envs().iter().map(|(k, v)| (k.as_str(), v.as_str())));
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> ApiError {
        ApiError::KubectlUnavailable {
            binary: self.binary.clone(),
            source,
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

impl KubectlRunner for ProcessRunner {
    fn capture(&self, invocation: &Invocation) -> Result<String, ApiError> {
        let output = self
            .command(invocation)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(ApiError::KubectlFailed {
                status: describe_status(output.status),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn interactive(&self, invocation: &Invocation) -> Result<(), ApiError> {
        let status = self
            .command(invocation)
            .status()
            .map_err(|e| self.spawn_error(e))?;
        debug!(status = %status, "kubectl exited");

        if !status.success() {
            // stderr already went to the terminal
            return Err(ApiError::KubectlFailed {
                status: describe_status(status),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}
