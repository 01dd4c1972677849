//! pa11y installation
//!
//! pa11y is installed as a project-local npm dependency whenever the project
//! carries pa11y configuration. Without it no test can run, so a failed
//! install is fatal.

pub mod installer;

use colored::Colorize;

use crate::common::config::ProjectConfig;
use crate::common::Result;
use installer::PackageInstaller;

/// npm package providing the pa11y binary
pub const PA11Y_PACKAGE: &str = "pa11y";

/// Result of [`setup_pa11y_executable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStatus {
    Installed,
    /// The project has no `pa11y` configuration
    Skipped,
}

/// Install pa11y into the project if it is configured for pa11y
pub async fn setup_pa11y_executable(
    project: &ProjectConfig,
    installer: &dyn PackageInstaller,
) -> Result<SetupStatus> {
    if !project.has_pa11y() {
        tracing::debug!("no pa11y configuration, skipping install");
        return Ok(SetupStatus::Skipped);
    }

    let root = project.paths().root();
    println!("{} {}", "Installing".cyan(), installer.describe(PA11Y_PACKAGE).dimmed());
    installer.install(PA11Y_PACKAGE, root).await?;
    println!("  {} pa11y installed", "✓".green());

    Ok(SetupStatus::Installed)
}
