//! Pipeline configuration from YAML

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Option key that carries the global interactive flag
pub const INTERACTIVE: &str = "interactive";

/// Errors raised while loading a pipeline configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Pipeline entry {index}: expected a stage name or a single-entry mapping, found {found}")]
    InvalidEntry { index: usize, found: String },

    #[error("Pipeline entry {index}: expected a single-entry mapping, found {keys} keys")]
    InvalidDescriptor { index: usize, keys: usize },

    #[error("Pipeline entry {index} ({name}): options must be a mapping with string keys, found {found}")]
    InvalidOptions {
        index: usize,
        name: String,
        found: String,
    },

    #[error("Pipeline entry {index}: '{name}' is not of the form <group>.<stage>")]
    InvalidStageId { index: usize, name: String },

    #[error("Stage '{stage}': option 'interactive' must be a boolean, found {found}")]
    InvalidInteractive { stage: String, found: String },
}

/// Top-level configuration loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Ordered stage descriptors, each `group.Stage` or `{group.Stage: {option: value}}`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pipeline: Vec<Value>,
}

/// A validated `<group>.<stage>` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StageId {
    pub group: String,
    pub stage: String,
}

impl FromStr for StageId {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let mut parts = name.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(stage), None)
                if IDENTIFIER.is_match(group) && IDENTIFIER.is_match(stage) =>
            {
                Ok(StageId {
                    group: group.to_string(),
                    stage: stage.to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.stage)
    }
}

/// Keyword options handed to a stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageOptions(BTreeMap<String, Value>);

impl StageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options seeded with the global interactive flag
    pub fn with_interactive(interactive: bool) -> Self {
        let mut options = Self::new();
        options.insert(INTERACTIVE, Value::Bool(interactive));
        options
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Overlay `other` on top of these options; keys in `other` win
    pub fn merged_with(mut self, other: &StageOptions) -> Self {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }

    /// The effective interactive flag, if present and boolean
    pub fn interactive(&self) -> Option<bool> {
        self.get(INTERACTIVE).and_then(Value::as_bool)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for StageOptions {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One validated pipeline entry
#[derive(Debug, Clone, PartialEq)]
pub struct StageSpec {
    pub id: StageId,
    pub options: StageOptions,
}

/// Classify one raw pipeline entry and validate it
fn entry_to_spec(index: usize, entry: &Value) -> Result<StageSpec, ConfigError> {
    let (name, options) = match entry {
        Value::String(name) => (name.as_str(), StageOptions::new()),
        Value::Mapping(map) => {
            if map.len() != 1 {
                return Err(ConfigError::InvalidDescriptor {
                    index,
                    keys: map.len(),
                });
            }
            let (key, options) = map
                .iter()
                .next()
                .ok_or(ConfigError::InvalidDescriptor { index, keys: 0 })?;
            let name = key.as_str().ok_or_else(|| ConfigError::InvalidEntry {
                index,
                found: format!("a mapping keyed by {}", describe_value(key)),
            })?;
            (name, options_from_value(index, name, options)?)
        }
        other => {
            return Err(ConfigError::InvalidEntry {
                index,
                found: describe_value(other),
            })
        }
    };

    let id = name
        .parse::<StageId>()
        .map_err(|_| ConfigError::InvalidStageId {
            index,
            name: name.to_string(),
        })?;

    if let Some(value) = options.get(INTERACTIVE) {
        if !value.is_bool() {
            return Err(ConfigError::InvalidInteractive {
                stage: id.to_string(),
                found: describe_value(value),
            });
        }
    }

    Ok(StageSpec { id, options })
}

fn options_from_value(index: usize, name: &str, value: &Value) -> Result<StageOptions, ConfigError> {
    let invalid = |found: String| ConfigError::InvalidOptions {
        index,
        name: name.to_string(),
        found,
    };

    match value {
        Value::Null => Ok(StageOptions::new()),
        Value::Mapping(map) => map
            .iter()
            .map(|(key, value)| match key.as_str() {
                Some(key) => Ok((key, value.clone())),
                None => Err(invalid(format!("key {}", describe_value(key)))),
            })
            .collect(),
        other => Err(invalid(describe_value(other))),
    }
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document carries no pipeline at all
        let document: Value = serde_yaml::from_str(yaml)?;
        if document.is_null() {
            return Ok(Self::default());
        }

        let config: PipelineConfig = serde_yaml::from_value(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every descriptor
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stages().map(|_| ())
    }

    /// Validated stage entries, in configuration order
    pub fn stages(&self) -> Result<Vec<StageSpec>, ConfigError> {
        self.pipeline
            .iter()
            .enumerate()
            .map(|(index, entry)| entry_to_spec(index, entry))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pipeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipeline.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string '{}'", s),
        Value::Sequence(_) => "a sequence".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}
