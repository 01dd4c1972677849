//! Run configuration types
//!
//! [`RunConfig`] is read from the layered pa11y configuration
//! (`local.yml` + `pa11y.yml`). Its tool-facing half, [`ToolConfig`], is
//! written to the JSON file handed to pa11y with `--config`.

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};
use crate::config::ResolvedConfig;

/// pa11y reporter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reporter {
    #[default]
    Cli,
    Json,
    Csv,
    Tsv,
    Html,
}

/// Accessibility standard to test against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standard {
    Section508,
    #[serde(rename = "WCAG2A")]
    Wcag2A,
    #[default]
    #[serde(rename = "WCAG2AA")]
    Wcag2AA,
    #[serde(rename = "WCAG2AAA")]
    Wcag2AAA,
}

/// Browser viewport in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 320,
            height: 480,
        }
    }
}

/// Headless Chrome settings; not configurable
#[derive(Debug, Clone, Serialize)]
pub struct ChromeLaunchConfig {
    #[serde(rename = "ignoreHTTPSErrors")]
    pub ignore_https_errors: bool,
    pub args: Vec<&'static str>,
}

impl Default for ChromeLaunchConfig {
    fn default() -> Self {
        Self {
            ignore_https_errors: true,
            args: vec![
                "--no-sandbox",
                "--disable-setuid-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                "--headless",
            ],
        }
    }
}

/// The options pa11y reads from its `--config` file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub timeout: u64,
    pub reporter: Reporter,
    pub viewport: Viewport,
    pub standard: Standard,
    pub hide_elements: Vec<String>,
    pub ignore: Vec<String>,
    pub chrome_launch_config: ChromeLaunchConfig,
}

/// Everything one `tests:pa11y:run` needs
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub defaults: ToolConfig,
    /// Passed as `--threshold`; zero is a real value, not "unset"
    pub threshold: Option<u64>,
    pub base_url: String,
    pub paths: Vec<String>,
}

/// A path list written either as one string or as a list
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl RunConfig {
    /// Read the run configuration from the layered pa11y config
    ///
    /// `path_override` replaces the configured `paths` when given.
    pub fn from_config(config: &ResolvedConfig, path_override: Option<Vec<String>>) -> Result<Self> {
        let defaults = ToolConfig {
            timeout: config.get_or("config.timeout", 5000)?,
            reporter: config.get_or("config.reporter", Reporter::default())?,
            viewport: Viewport {
                width: config.get_or("config.viewport.width", Viewport::default().width)?,
                height: config.get_or("config.viewport.height", Viewport::default().height)?,
            },
            standard: config.get_or("config.standard", Standard::default())?,
            hide_elements: config.get_or("config.hideElements", vec!["svg".to_string()])?,
            ignore: config.get_or("config.ignore", vec!["notice".to_string()])?,
            chrome_launch_config: ChromeLaunchConfig::default(),
        };

        let base_url = config
            .get_str("base_url")
            .ok_or_else(|| Error::Config("base_url is not set in tests/pa11y/local.yml".to_string()))?;

        let paths = match path_override {
            Some(paths) => paths,
            None => match config.get_opt::<OneOrMany>("paths")? {
                Some(OneOrMany::One(path)) => vec![path],
                Some(OneOrMany::Many(paths)) => paths,
                None => vec!["/".to_string()],
            },
        };
        if paths.is_empty() {
            return Err(Error::Config("No paths configured for Pa11y".to_string()));
        }

        Ok(Self {
            defaults,
            threshold: config.get_opt("config.threshold")?,
            base_url,
            paths,
        })
    }

    /// `base_url` joined with each path, in order
    pub fn target_urls(&self) -> Vec<String> {
        self.paths
            .iter()
            .map(|path| format!("{}{}", self.base_url, path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_config(yaml: &str) -> RunConfig {
        RunConfig::from_config(&ResolvedConfig::from_yaml(yaml).unwrap(), None).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = run_config("base_url: http://example.test\n");
        assert_eq!(config.defaults.timeout, 5000);
        assert_eq!(config.defaults.reporter, Reporter::Cli);
        assert_eq!(config.defaults.viewport, Viewport { width: 320, height: 480 });
        assert_eq!(config.defaults.standard, Standard::Wcag2AA);
        assert_eq!(config.defaults.hide_elements, vec!["svg"]);
        assert_eq!(config.defaults.ignore, vec!["notice"]);
        assert_eq!(config.threshold, None);
        assert_eq!(config.paths, vec!["/"]);
    }

    #[test]
    fn test_reads_every_field() {
        let config = run_config(
            r#"
base_url: http://example.test
paths: [/, /about]
config:
  timeout: 30000
  reporter: json
  viewport:
    width: 1280
  standard: WCAG2AAA
  hideElements: [".ad", "svg"]
  ignore: [warning, notice]
  threshold: 0
"#,
        );
        assert_eq!(config.defaults.timeout, 30000);
        assert_eq!(config.defaults.reporter, Reporter::Json);
        assert_eq!(config.defaults.viewport, Viewport { width: 1280, height: 480 });
        assert_eq!(config.defaults.standard, Standard::Wcag2AAA);
        assert_eq!(config.defaults.hide_elements, vec![".ad", "svg"]);
        assert_eq!(config.defaults.ignore, vec!["warning", "notice"]);
        assert_eq!(config.threshold, Some(0));
    }

    #[test]
    fn test_target_urls_follow_path_order() {
        let config = run_config("base_url: http://example.test\npaths: [/, /about]\n");
        assert_eq!(
            config.target_urls(),
            vec!["http://example.test/", "http://example.test/about"]
        );
    }

    #[test]
    fn test_single_string_path() {
        let config = run_config("base_url: http://example.test\npaths: /contact\n");
        assert_eq!(config.target_urls(), vec!["http://example.test/contact"]);
    }

    #[test]
    fn test_path_override_replaces_paths() {
        let config = RunConfig::from_config(
            &ResolvedConfig::from_yaml("base_url: http://example.test\npaths: [/, /about]\n").unwrap(),
            Some(vec!["/about".to_string()]),
        )
        .unwrap();
        assert_eq!(config.target_urls(), vec!["http://example.test/about"]);
    }

    #[test]
    fn test_missing_base_url_is_error() {
        let err = RunConfig::from_config(&ResolvedConfig::from_yaml("paths: [/]\n").unwrap(), None)
            .unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        for yaml in [
            "base_url: x\nconfig: {threshold: -1}\n",
            "base_url: x\nconfig: {standard: WCAG3}\n",
            "base_url: x\nconfig: {reporter: xml}\n",
            "base_url: x\npaths: []\n",
        ] {
            let config = ResolvedConfig::from_yaml(yaml).unwrap();
            assert!(RunConfig::from_config(&config, None).is_err(), "{yaml}");
        }
    }

    #[test]
    fn test_tool_config_json_shape() {
        let config = run_config("base_url: http://example.test\nconfig: {threshold: 3}\n");
        let json = serde_json::to_value(&config.defaults).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "timeout": 5000,
                "reporter": "cli",
                "viewport": {"width": 320, "height": 480},
                "standard": "WCAG2AA",
                "hideElements": ["svg"],
                "ignore": ["notice"],
                "chromeLaunchConfig": {
                    "ignoreHTTPSErrors": true,
                    "args": [
                        "--no-sandbox",
                        "--disable-setuid-sandbox",
                        "--disable-dev-shm-usage",
                        "--disable-gpu",
                        "--headless"
                    ]
                }
            })
        );
    }
}
