//! Package installation
//!
//! pa11y ships through npm, so installing it means running the project's
//! package manager in the repository root.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::common::{Error, Result};

/// Installs a package as a project-local dev dependency
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Human-readable command line, for logs
    fn describe(&self, package: &str) -> String;

    /// Install `package` into the project at `project_dir`
    async fn install(&self, package: &str, project_dir: &Path) -> Result<()>;
}

/// `npm install <package> --save-dev`
#[derive(Debug, Default)]
pub struct NpmInstaller {
    /// Explicit npm path; looked up on PATH when unset
    npm: Option<PathBuf>,
}

impl NpmInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_npm(npm: impl Into<PathBuf>) -> Self {
        Self {
            npm: Some(npm.into()),
        }
    }

    fn locate(&self) -> Result<PathBuf> {
        match &self.npm {
            Some(path) => Ok(path.clone()),
            None => which::which("npm")
                .map_err(|e| Error::ToolInstall(format!("npm not found on PATH: {}", e))),
        }
    }
}

#[async_trait]
impl PackageInstaller for NpmInstaller {
    fn describe(&self, package: &str) -> String {
        format!("npm install {} --save-dev", package)
    }

    async fn install(&self, package: &str, project_dir: &Path) -> Result<()> {
        let npm = self.locate()?;
        tracing::debug!(npm = %npm.display(), dir = %project_dir.display(), "running npm install");

        let status = tokio::process::Command::new(&npm)
            .args(["install", package, "--save-dev"])
            .current_dir(project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::ToolInstall(format!("failed to run {}: {}", npm.display(), e)))?;

        if !status.success() {
            return Err(Error::ToolInstall(format!(
                "'{}' exited with {}",
                self.describe(package),
                status
            )));
        }

        Ok(())
    }
}
