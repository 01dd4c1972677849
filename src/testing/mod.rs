//! pa11y test execution
//!
//! [`run_tests`] is the whole `tests:pa11y:run` pipeline: wizard validation,
//! report directory, run configuration, then one pa11y invocation per URL.

mod config;
mod runner;

pub use config::*;
pub use runner::{
    pa11y_args, ProcessLauncher, RunOutcome, RunSummary, TestRunner, TokioLauncher,
    TransientConfig,
};

use crate::common::config::ProjectConfig;
use crate::common::Result;
use crate::prompt::Confirm;
use crate::reports;
use crate::setup::installer::PackageInstaller;
use crate::wizard::TestsWizard;

/// Run pa11y against every configured URL
pub async fn run_tests(
    project: &ProjectConfig,
    prompt: &dyn Confirm,
    installer: &dyn PackageInstaller,
    launcher: &dyn ProcessLauncher,
) -> Result<RunSummary> {
    let wizard = TestsWizard::new(project, prompt);
    if project.validate_enabled()? {
        wizard.configure(installer).await?;
    } else {
        tracing::debug!("pa11y.validate is off, skipping configuration wizard");
    }

    let local = wizard.required_local_config()?;
    if project.values().contains("pa11y") {
        tracing::debug!(
            "pa11y project settings:\n{}",
            serde_yaml::to_string(&project.values().get("pa11y")).unwrap_or_default()
        );
    }
    tracing::debug!("pa11y local configuration:\n{}", local.to_yaml());

    reports::ensure_report_dir(&project.report_dir())?;

    let run_config = RunConfig::from_config(&local, project.path_override()?)?;
    TestRunner::new(launcher, project.pa11y_bin(), prompt.is_interactive())
        .run(&run_config)
        .await
}
