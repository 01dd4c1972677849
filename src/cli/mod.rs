//! CLI command handling
//!
//! Maps each command onto its handler. Lifecycle steps that a framework
//! would fire as hooks (init, validate, run) are plain sequential calls here.

use colored::Colorize;

use crate::commands::{Commands, GlobalOptions};
use crate::common::config::{Override, ProjectConfig};
use crate::common::{Error, Result};
use crate::prompt::{Confirm, FixedAnswer, TerminalPrompt};
use crate::scaffold::{self, Provisioning};
use crate::setup::installer::NpmInstaller;
use crate::testing::{self, TokioLauncher};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, opts: &GlobalOptions) -> Result<()> {
    let project = load_project(opts)?;
    let prompt = prompt_for(opts);

    match command {
        Commands::RecipesInit => {
            scaffold::init_recipes(&project)?;
            Ok(())
        }

        Commands::TestsInit => {
            match scaffold::provision(&project, prompt.as_ref(), &NpmInstaller::new()).await? {
                Provisioning::Ready => {
                    println!("{}", "Pa11y is configured.".green());
                    Ok(())
                }
                Provisioning::Declined => Err(Error::ProvisioningDeclined),
            }
        }

        Commands::TestsRun => {
            let summary = testing::run_tests(
                &project,
                prompt.as_ref(),
                &NpmInstaller::new(),
                &TokioLauncher,
            )
            .await?;
            tracing::info!("tested {} URL(s)", summary.urls.len());
            Ok(())
        }
    }
}

fn load_project(opts: &GlobalOptions) -> Result<ProjectConfig> {
    let root = match &opts.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let root = root.canonicalize().unwrap_or(root);

    let overrides = opts
        .define
        .iter()
        .map(|raw| Override::parse(raw))
        .collect::<Result<Vec<_>>>()?;

    ProjectConfig::load(&root, &overrides)
}

fn prompt_for(opts: &GlobalOptions) -> Box<dyn Confirm> {
    if opts.yes {
        Box::new(FixedAnswer::Yes)
    } else if opts.no_interaction {
        Box::new(FixedAnswer::Default)
    } else {
        Box::new(TerminalPrompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_selection() {
        let yes = GlobalOptions {
            yes: true,
            ..Default::default()
        };
        assert!(prompt_for(&yes).confirm("q?", false).unwrap());

        let defaults = GlobalOptions {
            no_interaction: true,
            ..Default::default()
        };
        assert!(!prompt_for(&defaults).confirm("q?", false).unwrap());
        assert!(prompt_for(&defaults).confirm("q?", true).unwrap());
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GlobalOptions {
            root: Some(dir.path().to_path_buf()),
            define: vec!["nonsense".to_string()],
            ..Default::default()
        };
        assert!(load_project(&opts).is_err());
    }

    #[test]
    fn test_overrides_reach_project_config() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GlobalOptions {
            root: Some(dir.path().to_path_buf()),
            define: vec!["project.local.uri=http://cli.test".to_string()],
            ..Default::default()
        };
        let project = load_project(&opts).unwrap();
        assert_eq!(project.local_uri().as_deref(), Some("http://cli.test"));
    }
}
