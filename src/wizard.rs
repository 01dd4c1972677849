//! Pa11y configuration wizard
//!
//! Validates that the layered pa11y configuration agrees with the project
//! before a run, and offers to regenerate `local.yml` when it does not.

use colored::Colorize;

use crate::common::config::ProjectConfig;
use crate::common::{Error, Result};
use crate::config::{self, ConfigSource, ResolvedConfig};
use crate::prompt::Confirm;
use crate::scaffold::{self, Provisioning};
use crate::setup::installer::PackageInstaller;

/// Outcome of [`TestsWizard::validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Everything that was logged as a warning, in order
    pub warnings: Vec<String>,
    passed: bool,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.passed
    }

    fn fail(mut self, warnings: Vec<String>) -> Self {
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        self.warnings.extend(warnings);
        self.passed = false;
        self
    }
}

/// Checks and repairs the local pa11y setup
pub struct TestsWizard<'a> {
    project: &'a ProjectConfig,
    prompt: &'a dyn Confirm,
}

impl<'a> TestsWizard<'a> {
    pub fn new(project: &'a ProjectConfig, prompt: &'a dyn Confirm) -> Self {
        Self { project, prompt }
    }

    /// `local.yml` overlaid with `pa11y.yml`
    ///
    /// Missing files read as empty; use [`Self::required_local_config`] when
    /// both must exist.
    pub fn local_pa11y_config(&self) -> Result<ResolvedConfig> {
        let paths = self.project.paths();
        config::load(&[
            ConfigSource::optional(paths.local_config()),
            ConfigSource::optional(paths.shared_config()),
        ])
    }

    /// Like [`Self::local_pa11y_config`] but both files must exist
    pub fn required_local_config(&self) -> Result<ResolvedConfig> {
        let paths = self.project.paths();
        config::load(&[
            ConfigSource::required(paths.local_config()),
            ConfigSource::required(paths.shared_config()),
        ])
    }

    /// Whether the local pa11y configuration matches the project
    ///
    /// Never fails: problems are logged as warnings and reported through
    /// [`ValidationReport::passed`].
    pub fn validate(&self) -> ValidationReport {
        let report = ValidationReport {
            warnings: Vec::new(),
            passed: true,
        };
        let show = |value: Option<&str>| value.unwrap_or("(unset)").to_string();

        let local = match self.local_pa11y_config() {
            Ok(local) => local,
            Err(e) => return report.fail(vec![format!("Unable to read Pa11y configuration: {e}")]),
        };

        let project_uri = self.project.local_uri();
        let base_url = local.get_str("base_url");
        if project_uri != base_url {
            return report.fail(vec![
                "project.local.uri in blt.yml does not match base_url in local.yml.".to_string(),
                format!("project.local.uri = {}", show(project_uri.as_deref())),
                format!("base_url = {}", show(base_url.as_deref())),
            ]);
        }

        if self.project.run_server() {
            let server_url = self.project.server_url();
            if server_url != project_uri {
                return report.fail(vec![
                    "tests.run-server is enabled, but the server URL does not match the project's base URL."
                        .to_string(),
                    format!("project.local.uri = {}", show(project_uri.as_deref())),
                    format!("tests.server.url = {}", show(server_url.as_deref())),
                    format!("base_url = {}", show(base_url.as_deref())),
                ]);
            }
        }

        report
    }

    /// Offer to (re)generate `local.yml` when it is missing or inconsistent
    ///
    /// Declining leaves the project untouched and fails with
    /// [`Error::ProvisioningDeclined`].
    pub async fn configure(&self, installer: &dyn PackageInstaller) -> Result<()> {
        let local = self.project.paths().local_config();
        if !local.exists() {
            tracing::warn!("Pa11y is not configured properly: tests/pa11y/local.yml is missing.");
        } else if self.validate().passed() {
            return Ok(());
        }

        println!("blt-pa11y can (re)generate tests/pa11y/local.yml using tests/pa11y/example.local.yml.");
        let confirm = self.prompt.confirm(
            &format!(
                "Do you want (re)generate local Pa11y config in {}?",
                "tests/pa11y/local.yml".cyan()
            ),
            true,
        )?;
        if !confirm {
            return Err(Error::ProvisioningDeclined);
        }

        if local.exists() {
            std::fs::remove_file(&local)?;
        }
        match scaffold::provision(self.project, self.prompt, installer).await? {
            Provisioning::Ready => Ok(()),
            Provisioning::Declined => Err(Error::ProvisioningDeclined),
        }
    }
}
