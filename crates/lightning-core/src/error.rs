//! Error types for configuration validation and project composition

use std::path::PathBuf;
use thiserror::Error;

/// A configuration rejected at the boundary, before composition starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("{field} '{value}' is not available for the {preset} preset (expected one of: {allowed})")]
    Incompatible {
        field: &'static str,
        value: String,
        preset: String,
        allowed: String,
    },
}

/// Failure while composing a project or running a post-scaffold step.
///
/// All variants are fatal; partial output is left on disk.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render template {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("invalid manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with code {}", .code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    Process { command: String, code: Option<i32> },
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
