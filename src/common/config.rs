//! Project configuration
//!
//! The project configuration is layered from `blt/blt.yml`, then
//! `blt/local.blt.yml`, then any `-D key=value` overrides given on the
//! command line. `repo.root` is always set to the repository root.

use serde_yaml::Value;
use std::path::{Path, PathBuf};

use super::paths::ProjectPaths;
use super::{Error, Result};
use crate::config::{self, ConfigSource, ResolvedConfig};

/// A single `-D key=value` override
#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    pub key: String,
    pub value: Value,
}

impl Override {
    /// Parse `key=value`
    ///
    /// The value is read as YAML, so `true` becomes a boolean and `[/a, /b]`
    /// a list. Anything that does not parse is kept as a plain string.
    pub fn parse(raw: &str) -> Result<Self> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| Error::InvalidOverride(raw.to_string()))?;
        let key = key.trim();
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(Error::InvalidOverride(raw.to_string()));
        }

        let value = serde_yaml::from_str::<Value>(value)
            .unwrap_or_else(|_| Value::String(value.to_string()));

        Ok(Self {
            key: key.to_string(),
            value,
        })
    }
}

/// Project settings consumed by the pa11y commands
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    paths: ProjectPaths,
    values: ResolvedConfig,
}

impl ProjectConfig {
    /// Load the project configuration rooted at `root`
    pub fn load(root: &Path, overrides: &[Override]) -> Result<Self> {
        let paths = ProjectPaths::new(root);
        let values = config::load(&[
            ConfigSource::optional(paths.project_config()),
            ConfigSource::optional(paths.project_local_config()),
        ])?;
        Ok(Self::from_values(paths, values, overrides))
    }

    /// Build from already-resolved values
    pub fn from_values(paths: ProjectPaths, mut values: ResolvedConfig, overrides: &[Override]) -> Self {
        for o in overrides {
            tracing::debug!(key = %o.key, "applying config override");
            values.set(&o.key, o.value.clone());
        }
        values.set(
            "repo.root",
            Value::String(paths.root().display().to_string()),
        );
        Self { paths, values }
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn values(&self) -> &ResolvedConfig {
        &self.values
    }

    /// `pa11y.validate`, default true
    pub fn validate_enabled(&self) -> Result<bool> {
        self.values.get_or("pa11y.validate", true)
    }

    /// Whether the project has any pa11y configuration at all
    pub fn has_pa11y(&self) -> bool {
        self.values.is_truthy("pa11y")
    }

    /// `project.local.uri`
    pub fn local_uri(&self) -> Option<String> {
        self.values.get_str("project.local.uri")
    }

    /// `tests.run-server`
    pub fn run_server(&self) -> bool {
        self.values.is_truthy("tests.run-server")
    }

    /// `tests.server.url`
    pub fn server_url(&self) -> Option<String> {
        self.values.get_str("tests.server.url")
    }

    /// `pa11y.paths`, accepting a single string or a list
    pub fn path_override(&self) -> Result<Option<Vec<String>>> {
        match self.values.get("pa11y.paths") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(path)) => Ok(Some(vec![path.clone()])),
            Some(Value::Sequence(_)) => self.values.get_opt("pa11y.paths"),
            Some(other) => Err(Error::Config(format!(
                "pa11y.paths must be a string or a list of strings, got {:?}",
                other
            ))),
        }
    }

    /// pa11y executable, `pa11y.bin` or the npm-installed default
    pub fn pa11y_bin(&self) -> PathBuf {
        self.path_setting("pa11y.bin")
            .unwrap_or_else(|| self.paths.default_pa11y_bin())
    }

    /// Directory of bundled scaffold files, `pa11y.scaffold-dir`
    pub fn scaffold_dir(&self) -> PathBuf {
        self.path_setting("pa11y.scaffold-dir")
            .unwrap_or_else(|| self.paths.default_scaffold_dir())
    }

    /// `<tests.reports.localDir>/pa11y`
    pub fn report_dir(&self) -> PathBuf {
        self.path_setting("tests.reports.localDir")
            .unwrap_or_else(|| self.paths.default_reports_dir())
            .join("pa11y")
    }

    /// A path-valued setting; relative paths resolve against the repo root
    fn path_setting(&self, key: &str) -> Option<PathBuf> {
        let raw = self.values.get_str(key)?;
        let path = PathBuf::from(raw);
        Some(if path.is_relative() {
            self.paths.root().join(path)
        } else {
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn project(yaml: &str, overrides: &[Override]) -> ProjectConfig {
        ProjectConfig::from_values(
            ProjectPaths::new("/srv/site"),
            ResolvedConfig::from_yaml(yaml).unwrap(),
            overrides,
        )
    }

    #[test]
    fn test_parse_override_types() {
        let o = Override::parse("pa11y.validate=false").unwrap();
        assert_eq!(o.key, "pa11y.validate");
        assert_eq!(o.value, Value::Bool(false));

        let o = Override::parse("pa11y.paths=/about").unwrap();
        assert_eq!(o.value, Value::String("/about".into()));

        let o = Override::parse("pa11y.paths=[/a, /b]").unwrap();
        assert!(o.value.is_sequence());

        let o = Override::parse("project.local.uri=http://x.test:8080").unwrap();
        assert_eq!(o.value, Value::String("http://x.test:8080".into()));
    }

    #[test]
    fn test_parse_override_rejects_bad_keys() {
        assert!(Override::parse("no-equals-sign").is_err());
        assert!(Override::parse("=value").is_err());
        assert!(Override::parse("a..b=1").is_err());
    }

    #[test]
    fn test_overrides_win_and_repo_root_is_set() {
        let config = project(
            "project:\n  local:\n    uri: http://a.test\n",
            &[Override::parse("project.local.uri=http://b.test").unwrap()],
        );
        assert_eq!(config.local_uri().as_deref(), Some("http://b.test"));
        assert_eq!(config.values().get_str("repo.root").as_deref(), Some("/srv/site"));
    }

    #[test]
    fn test_path_override_string_or_list() {
        assert_eq!(project("{}", &[]).path_override().unwrap(), None);
        assert_eq!(
            project("pa11y:\n  paths: /about\n", &[]).path_override().unwrap(),
            Some(vec!["/about".to_string()])
        );
        assert_eq!(
            project("pa11y:\n  paths: [/a, /b]\n", &[]).path_override().unwrap(),
            Some(vec!["/a".to_string(), "/b".to_string()])
        );
        assert!(project("pa11y:\n  paths: {a: 1}\n", &[]).path_override().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = project("{}", &[]);
        assert!(config.validate_enabled().unwrap());
        assert!(!config.has_pa11y());
        assert!(!config.run_server());
        assert_eq!(
            config.pa11y_bin(),
            PathBuf::from("/srv/site/node_modules/.bin/pa11y")
        );
        assert_eq!(config.report_dir(), PathBuf::from("/srv/site/reports/pa11y"));
    }

    #[test]
    fn test_relative_path_settings_resolve_against_root() {
        let config = project(
            "tests:\n  reports:\n    localDir: build/reports\npa11y:\n  bin: /usr/bin/pa11y\n",
            &[],
        );
        assert_eq!(
            config.report_dir(),
            PathBuf::from("/srv/site/build/reports/pa11y")
        );
        assert_eq!(config.pa11y_bin(), PathBuf::from("/usr/bin/pa11y"));
    }

    #[test]
    fn test_load_layers_project_files() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("blt")).unwrap();
        std::fs::write(
            dir.path().join("blt/blt.yml"),
            "project:\n  local:\n    uri: http://shared.test\npa11y:\n  validate: true\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("blt/local.blt.yml"),
            "project:\n  local:\n    uri: http://mine.test\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path(), &[]).unwrap();
        assert_eq!(config.local_uri().as_deref(), Some("http://mine.test"));
        assert!(config.has_pa11y());
    }
}
