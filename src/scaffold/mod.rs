//! Scaffold provisioning
//!
//! Makes sure a project has the files pa11y runs need:
//! - `recipes:pa11y:init` copies the bundled example files into `tests/pa11y`
//! - `tests:pa11y:init` creates `local.yml` from `example.local.yml` and
//!   installs pa11y

pub mod expand;

use colored::Colorize;
use std::path::Path;
use walkdir::WalkDir;

use crate::common::config::ProjectConfig;
use crate::common::paths::ProjectPaths;
use crate::common::{Error, Result};
use crate::prompt::Confirm;
use crate::setup::{self, installer::PackageInstaller};

/// Outcome of `tests:pa11y:init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioning {
    Ready,
    /// The operator declined to generate missing configuration
    Declined,
}

/// Whether the shared config and the local template are both present
pub fn is_configured(paths: &ProjectPaths) -> bool {
    paths.shared_config().exists() && paths.example_local_config().exists()
}

/// `recipes:pa11y:init`: copy the bundled scaffold into `tests/pa11y`
///
/// Existing files with the same name are overwritten.
pub fn init_recipes(project: &ProjectConfig) -> Result<usize> {
    let source = project.scaffold_dir();
    let dest = project.paths().pa11y_dir();
    tracing::debug!(source = %source.display(), dest = %dest.display(), "copying scaffold");

    let copied = copy_dir(&source, &dest).map_err(|e| {
        Error::ScaffoldCopy(format!(
            "Could not copy example files into the repository root: {}",
            e
        ))
    })?;

    println!(
        "{}",
        "Example Pa11y tests were copied into your application.".green()
    );
    Ok(copied)
}

/// Recursively copy `source` into `dest`, returning the number of files
fn copy_dir(source: &Path, dest: &Path) -> std::result::Result<usize, String> {
    if !source.is_dir() {
        return Err(format!("{} is not a directory", source.display()));
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(|e| e.to_string())?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| e.to_string())?;
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .map_err(|e| format!("{}: {}", target.display(), e))?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("{}: {}", parent.display(), e))?;
            }
            std::fs::copy(entry.path(), &target)
                .map_err(|e| format!("{}: {}", target.display(), e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Create `local.yml` from `example.local.yml` unless it already exists
///
/// Returns whether a file was written. Placeholders are expanded with
/// project settings before anything is written.
pub fn copy_local_config(project: &ProjectConfig) -> Result<bool> {
    let paths = project.paths();
    let from = paths.example_local_config();
    let to = paths.local_config();

    if to.exists() {
        tracing::debug!(path = %to.display(), "local config exists, not overwriting");
        return Ok(false);
    }

    println!("Generating Pa11y configuration files...");
    let copy_error = |e: std::io::Error| {
        tracing::debug!(error = %e, "copy failed");
        Error::ScaffoldCopy(format!(
            "Unable to copy {} into your repository.",
            paths.relative(&from)
        ))
    };
    let template = std::fs::read_to_string(&from).map_err(copy_error)?;
    let expanded = expand::expand(&template, project.values());
    std::fs::write(&to, expanded).map_err(copy_error)?;

    Ok(true)
}

/// `tests:pa11y:init`
pub async fn provision(
    project: &ProjectConfig,
    prompt: &dyn Confirm,
    installer: &dyn PackageInstaller,
) -> Result<Provisioning> {
    if !is_configured(project.paths()) {
        let confirm = prompt.confirm(
            "Pa11y configuration is not fully initialized. Run recipes:pa11y:init now?",
            true,
        )?;
        if !confirm {
            return Ok(Provisioning::Declined);
        }
        init_recipes(project)?;
    }

    copy_local_config(project)?;
    setup::setup_pa11y_executable(project, installer).await?;

    Ok(Provisioning::Ready)
}
