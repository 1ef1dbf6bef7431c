//! Converter configuration loaded from YAML.
//!
//! Every section is optional:
//!
//! ```yaml
//! vocabularies:
//!   service_start_type:
//!     SERVICE_SYSTEM_START: SERVICE_SYSTEM_ALERT
//! output:
//!   format: ndjson
//!   container_type: observed-data
//! ```
//!
//! Vocabulary entries extend or override the built-in tables.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatcher::{Elevator, DEFAULT_CONTAINER_TYPE};
use crate::error::{ElevatorError, Result};
use crate::vocab::{Vocabularies, VocabularyKind};

/// Output encoding for converted containers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON container per line
    #[default]
    Ndjson,
    /// A single JSON array of containers
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub container_type: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            container_type: DEFAULT_CONTAINER_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorConfig {
    /// Vocabulary overrides: table name -> (legacy value -> label)
    pub vocabularies: HashMap<String, HashMap<String, String>>,

    pub output: OutputConfig,
}

impl ElevatorConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    /// Returns error if the file can't be read, isn't valid YAML, or names an
    /// unknown vocabulary table
    ///
    /// # Example
    /// ```ignore
    /// use elevator::ElevatorConfig;
    ///
    /// let config = ElevatorConfig::load_from_file("elevator.yaml")?;
    /// let elevator = config.elevator()?;
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| {
            ElevatorError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_yaml_str(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        // An empty document deserializes to null; treat it as all defaults
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for name in self.vocabularies.keys() {
            if VocabularyKind::from_name(name).is_none() {
                return Err(ElevatorError::ConfigError(format!(
                    "Unknown vocabulary table '{}' (expected one of: {})",
                    name,
                    VocabularyKind::ALL
                        .iter()
                        .map(|k| k.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
        }

        if self.output.container_type.is_empty() {
            return Err(ElevatorError::ConfigError(
                "output.container_type cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Built-in vocabularies with this configuration's overrides applied
    pub fn vocabularies(&self) -> Result<Vocabularies> {
        let mut vocabularies = Vocabularies::builtin();

        for (name, entries) in &self.vocabularies {
            let kind = VocabularyKind::from_name(name).ok_or_else(|| {
                ElevatorError::ConfigError(format!("Unknown vocabulary table '{}'", name))
            })?;
            let table = vocabularies.table_mut(kind);
            for (value, label) in entries {
                table.insert(value.clone(), label.clone());
            }
        }

        Ok(vocabularies)
    }

    /// Build a configured [`Elevator`]
    pub fn elevator(&self) -> Result<Elevator> {
        Ok(Elevator::new(self.vocabularies()?).with_container_type(&self.output.container_type))
    }
}
