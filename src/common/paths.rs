//! Project filesystem layout
//!
//! All paths are relative to the repository root:
//! - `tests/pa11y/pa11y.yml`: shared, checked-in pa11y configuration
//! - `tests/pa11y/example.local.yml`: template for local overrides
//! - `tests/pa11y/local.yml`: local, git-ignored overrides
//! - `blt/blt.yml` and `blt/local.blt.yml`: project configuration

use std::path::{Path, PathBuf};

/// Directory under the repository root holding pa11y files
const PA11Y_DIR: &str = "tests/pa11y";

/// Shared pa11y configuration file name
pub const SHARED_CONFIG: &str = "pa11y.yml";

/// Template for the local override file
pub const EXAMPLE_LOCAL_CONFIG: &str = "example.local.yml";

/// Local override file name
pub const LOCAL_CONFIG: &str = "local.yml";

/// Well-known locations inside a project repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Repository root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `tests/pa11y`
    pub fn pa11y_dir(&self) -> PathBuf {
        self.root.join(PA11Y_DIR)
    }

    /// `tests/pa11y/pa11y.yml`
    pub fn shared_config(&self) -> PathBuf {
        self.pa11y_dir().join(SHARED_CONFIG)
    }

    /// `tests/pa11y/example.local.yml`
    pub fn example_local_config(&self) -> PathBuf {
        self.pa11y_dir().join(EXAMPLE_LOCAL_CONFIG)
    }

    /// `tests/pa11y/local.yml`
    pub fn local_config(&self) -> PathBuf {
        self.pa11y_dir().join(LOCAL_CONFIG)
    }

    /// `blt/blt.yml`
    pub fn project_config(&self) -> PathBuf {
        self.root.join("blt").join("blt.yml")
    }

    /// `blt/local.blt.yml`
    pub fn project_local_config(&self) -> PathBuf {
        self.root.join("blt").join("local.blt.yml")
    }

    /// pa11y as installed by `npm install pa11y --save-dev`
    pub fn default_pa11y_bin(&self) -> PathBuf {
        self.root.join("node_modules").join(".bin").join("pa11y")
    }

    /// Scaffold files shipped next to the plugin in a Composer vendor tree
    pub fn default_scaffold_dir(&self) -> PathBuf {
        self.root
            .join("vendor")
            .join("acquia")
            .join("blt-pa11y")
            .join("scripts")
    }

    /// Default `tests.reports.localDir`
    pub fn default_reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    /// Render `path` relative to the repository root when possible
    pub fn relative<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_string_lossy(),
            Err(_) => path.to_string_lossy(),
        }
    }
}
