//! Layered YAML configuration
//!
//! Loads an ordered list of YAML files and merges them into a single
//! [`ResolvedConfig`]. Later sources win; see [`merge`] for the rules.
//! Values are looked up by dotted path, e.g. `config.viewport.width`.

pub mod merge;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

/// A configuration file to layer
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub path: PathBuf,
    /// Fail when the file is absent instead of treating it as empty
    pub required: bool,
}

impl ConfigSource {
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }
}

/// Load and layer `sources` in order
pub fn load(sources: &[ConfigSource]) -> Result<ResolvedConfig> {
    let layers = sources
        .iter()
        .map(load_source)
        .collect::<Result<Vec<_>>>()?;
    Ok(ResolvedConfig::from_value(merge::merge_layers(layers)))
}

fn load_source(source: &ConfigSource) -> Result<Value> {
    if !source.path.exists() {
        if source.required {
            return Err(Error::config_load(&source.path, "file not found"));
        }
        tracing::trace!(path = %source.path.display(), "optional config absent");
        return Ok(Value::Mapping(Mapping::new()));
    }

    let content = std::fs::read_to_string(&source.path)
        .map_err(|e| Error::config_load(&source.path, e))?;
    let layer = parse_document(&source.path, &content)?;
    tracing::debug!(path = %source.path.display(), "loaded config layer");
    Ok(layer)
}

fn parse_document(path: &Path, content: &str) -> Result<Value> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| Error::config_load(path, e))?;
    match value {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        Value::Mapping(_) => Ok(value),
        _ => Err(Error::config_load(path, "top-level YAML value must be a mapping")),
    }
}

/// The result of layering one or more configuration sources
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedConfig {
    root: Mapping,
}

impl ResolvedConfig {
    /// Wrap a merged value; anything but a mapping resolves to empty
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Mapping(root) => Self { root },
            _ => Self::default(),
        }
    }

    /// Parse a single YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        parse_document(Path::new("<inline>"), content).map(Self::from_value)
    }

    /// Look up a dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    /// Whether a dotted path is present and not null
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some_and(|v| !v.is_null())
    }

    /// Deserialize the value at `path`, returning `default` when it is
    /// absent or null
    pub fn get_or<T: DeserializeOwned>(&self, path: &str, default: T) -> Result<T> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(default),
            Some(value) => serde_yaml::from_value(value.clone())
                .map_err(|e| Error::Config(format!("Invalid value for '{}': {}", path, e))),
        }
    }

    /// Deserialize the value at `path` if present
    pub fn get_opt<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .map_err(|e| Error::Config(format!("Invalid value for '{}': {}", path, e))),
        }
    }

    /// Scalar at `path` rendered as a string, for comparisons and messages
    pub fn get_str(&self, path: &str) -> Option<String> {
        self.get(path).and_then(scalar_to_string)
    }

    /// Loose truthiness, mirroring how YAML flags are usually written
    ///
    /// Absent, null, `false`, `0`, empty strings, `"0"`, `"false"` and empty
    /// collections are false.
    pub fn is_truthy(&self, path: &str) -> bool {
        match self.get(path) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false")),
            Some(Value::Sequence(seq)) => !seq.is_empty(),
            Some(Value::Mapping(map)) => !map.is_empty(),
            Some(Value::Tagged(_)) => true,
        }
    }

    /// Assign `value` at a dotted path, creating intermediate mappings
    ///
    /// Any non-mapping value met along the path is replaced.
    pub fn set(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for segment in parents {
            let key = Value::String(segment.to_string());
            let entry = current
                .entry(key)
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !entry.is_mapping() {
                *entry = Value::Mapping(Mapping::new());
            }
            let Value::Mapping(next) = entry else {
                return;
            };
            current = next;
        }
        current.insert(Value::String(last.to_string()), value);
    }

    /// The full merged document
    pub fn export(&self) -> Value {
        Value::Mapping(self.root.clone())
    }

    /// Render the merged document as YAML for diagnostics
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(&self.export()).unwrap_or_else(|e| format!("<unprintable: {e}>"))
    }
}

/// Render a scalar YAML value as text
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
