//! Error types for blt-pa11y
//!
//! Messages are written for the operator at the terminal, with a hint on
//! what to do next where one exists.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for blt-pa11y
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Failed to load configuration '{path}': {reason}")]
    ConfigLoad { path: String, reason: String },

    #[error("Invalid configuration override '{0}'. Expected key=value")]
    InvalidOverride(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // === Provisioning Errors ===
    #[error("{0}")]
    ScaffoldCopy(String),

    #[error("Unable to setup Pa11y, please confirm node.js, npm, and npx are available. {0}")]
    ToolInstall(String),

    #[error("Pa11y is not configured. Run 'blt-pa11y tests:pa11y:init' to generate its configuration")]
    ProvisioningDeclined,

    // === Execution Errors ===
    #[error("Pa11y tests execution failed, please check setup!")]
    ToolSetupFailure,

    #[error("Pa11y tests failed!")]
    AssertionFailure,

    #[error("Pa11y exited unexpectedly ({})", describe_code(*.0))]
    UnclassifiedExecution(Option<i32>),

    #[error("Failed to launch '{program}': {error}")]
    Launch { program: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// Create a configuration load error for a file
    pub fn config_load(path: &Path, reason: impl ToString) -> Self {
        Self::ConfigLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a launch error for an external program
    pub fn launch(program: &Path, error: impl ToString) -> Self {
        Self::Launch {
            program: program.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Process exit status for this error
    ///
    /// Accessibility violations keep pa11y's own code so CI can tell them
    /// apart from broken setups.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::AssertionFailure => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::AssertionFailure.exit_code(), 2);
        assert_eq!(Error::ToolSetupFailure.exit_code(), 1);
        assert_eq!(Error::UnclassifiedExecution(Some(7)).exit_code(), 1);
        assert_eq!(Error::ProvisioningDeclined.exit_code(), 1);
    }

    #[test]
    fn test_messages_distinguish_setup_from_assertion() {
        assert_eq!(
            Error::ToolSetupFailure.to_string(),
            "Pa11y tests execution failed, please check setup!"
        );
        assert_eq!(Error::AssertionFailure.to_string(), "Pa11y tests failed!");
        assert_eq!(
            Error::UnclassifiedExecution(None).to_string(),
            "Pa11y exited unexpectedly (terminated by signal)"
        );
        assert_eq!(
            Error::UnclassifiedExecution(Some(137)).to_string(),
            "Pa11y exited unexpectedly (exit code 137)"
        );
    }
}
