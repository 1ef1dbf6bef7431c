//! Error type for the I/O boundary (reading legacy documents, loading
//! configuration, writing containers).
//!
//! Conversion itself never fails; see [`crate::diagnostics`].

use std::fmt;

#[derive(Debug)]
pub enum ElevatorError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    ConfigError(String),
}

impl From<std::io::Error> for ElevatorError {
    fn from(err: std::io::Error) -> Self {
        ElevatorError::IoError(err)
    }
}

impl From<serde_json::Error> for ElevatorError {
    fn from(err: serde_json::Error) -> Self {
        ElevatorError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for ElevatorError {
    fn from(err: serde_yaml::Error) -> Self {
        ElevatorError::YamlError(err)
    }
}

impl fmt::Display for ElevatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorError::IoError(e) => write!(f, "IO error: {}", e),
            ElevatorError::JsonError(e) => write!(f, "JSON error: {}", e),
            ElevatorError::YamlError(e) => write!(f, "YAML error: {}", e),
            ElevatorError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for ElevatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ElevatorError::IoError(e) => Some(e),
            ElevatorError::JsonError(e) => Some(e),
            ElevatorError::YamlError(e) => Some(e),
            ElevatorError::ConfigError(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ElevatorError>;
