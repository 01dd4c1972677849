//! Test runner implementation
//!
//! Writes the tool configuration to a transient JSON file, then runs pa11y
//! once per target URL, stopping at the first failure.

use async_trait::async_trait;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::NamedTempFile;

use crate::common::{Error, Result};

use super::config::{RunConfig, ToolConfig};

/// How a single pa11y invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    /// Exit code 1: pa11y could not run (bad config, browser failure, ...)
    ToolSetupFailure,
    /// Exit code 2: accessibility issues above the threshold
    AssertionFailure,
    /// Any other exit code, or `None` when killed by a signal
    Unclassified(Option<i32>),
}

impl RunOutcome {
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => RunOutcome::Success,
            Some(1) => RunOutcome::ToolSetupFailure,
            Some(2) => RunOutcome::AssertionFailure,
            other => RunOutcome::Unclassified(other),
        }
    }

    /// The error this outcome aborts the run with, if any
    pub fn into_error(self) -> Option<Error> {
        match self {
            RunOutcome::Success => None,
            RunOutcome::ToolSetupFailure => Some(Error::ToolSetupFailure),
            RunOutcome::AssertionFailure => Some(Error::AssertionFailure),
            RunOutcome::Unclassified(code) => Some(Error::UnclassifiedExecution(code)),
        }
    }
}

/// Starts external processes and waits for them
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Run `program` with `args` to completion, returning its exit code
    async fn run(&self, program: &Path, args: &[String], interactive: bool) -> Result<Option<i32>>;
}

/// Launches real child processes with inherited stdout/stderr
#[derive(Debug, Default)]
pub struct TokioLauncher;

#[async_trait]
impl ProcessLauncher for TokioLauncher {
    async fn run(&self, program: &Path, args: &[String], interactive: bool) -> Result<Option<i32>> {
        let status = tokio::process::Command::new(program)
            .args(args)
            .stdin(if interactive {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::launch(program, e))?;
        Ok(status.code())
    }
}

/// The JSON file passed to pa11y with `--config`
///
/// Removed when dropped, or explicitly with [`TransientConfig::remove`].
#[derive(Debug)]
pub struct TransientConfig {
    file: NamedTempFile,
}

impl TransientConfig {
    /// Write `config` to a fresh, uniquely named file in the temp directory
    pub fn write(config: &ToolConfig) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("pa11y-ci")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer_pretty(&mut file, config)?;
        file.flush()?;
        tracing::debug!(path = %file.path().display(), "wrote pa11y config");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, reporting any error
    pub fn remove(self) -> Result<()> {
        self.file.close()?;
        Ok(())
    }

    /// Delete the file now; a failure is logged and otherwise ignored
    pub fn discard(self) {
        let path = self.path().to_path_buf();
        if let Err(e) = self.remove() {
            tracing::warn!(path = %path.display(), "could not remove pa11y config: {}", e);
        }
    }
}

/// Command-line arguments for one pa11y invocation
pub fn pa11y_args(url: &str, config_file: &Path, threshold: Option<u64>) -> Vec<String> {
    let mut args = vec![
        url.to_string(),
        "--config".to_string(),
        config_file.display().to_string(),
    ];
    if let Some(threshold) = threshold {
        args.push("--threshold".to_string());
        args.push(threshold.to_string());
    }
    args
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub urls: Vec<String>,
}

/// Runs pa11y against each target URL in turn
pub struct TestRunner<'a> {
    launcher: &'a dyn ProcessLauncher,
    program: PathBuf,
    interactive: bool,
}

impl<'a> TestRunner<'a> {
    pub fn new(launcher: &'a dyn ProcessLauncher, program: impl Into<PathBuf>, interactive: bool) -> Self {
        Self {
            launcher,
            program: program.into(),
            interactive,
        }
    }

    /// Test every target URL, stopping at the first failure
    pub async fn run(&self, config: &RunConfig) -> Result<RunSummary> {
        let urls = config.target_urls();
        let transient = TransientConfig::write(&config.defaults)?;

        println!(
            "\n{} {} URL(s) with {}",
            "Running Pa11y:".blue().bold(),
            urls.len(),
            self.program.display().to_string().dimmed()
        );

        for url in &urls {
            let args = pa11y_args(url, transient.path(), config.threshold);
            tracing::debug!(program = %self.program.display(), ?args, "invoking pa11y");

            let code = self
                .launcher
                .run(&self.program, &args, self.interactive)
                .await?;

            if let Some(error) = RunOutcome::from_exit_code(code).into_error() {
                println!("  {} {}", "✗".red(), url);
                transient.discard();
                log_run_config(config);
                return Err(error);
            }
            println!("  {} {}", "✓".green(), url);
        }

        transient.discard();
        println!("\n{} {}\n", "✓".green().bold(), "Pa11y tests passed".green().bold());

        Ok(RunSummary { urls })
    }
}

fn log_run_config(config: &RunConfig) {
    match serde_json::to_string_pretty(config) {
        Ok(json) => tracing::debug!("pa11y run configuration:\n{}", json),
        Err(e) => tracing::debug!("pa11y run configuration unavailable: {}", e),
    }
}
