//! Configuration for a generation pass

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LoadError;
use crate::shaping::LINE_LIMIT;

/// Configuration options for the output layer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Width budget for line-shortening
    pub line_limit: usize,

    /// Namespace prefix under which service manifests are addressed
    pub service_prefix: String,

    /// Extension of generated source files
    pub source_extension: String,

    /// Root directory for generated sources
    pub source_dir: Option<PathBuf>,

    /// Root directory for compiled output and resources
    pub class_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            line_limit: LINE_LIMIT,
            service_prefix: "META-INF/services/".to_string(),
            source_extension: "java".to_string(),
            source_dir: None,
            class_dir: None,
        }
    }
}

impl OutputConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the line-shortening width budget
    pub fn with_line_limit(mut self, limit: usize) -> Self {
        self.line_limit = limit;
        self
    }

    /// Set the service manifest prefix
    pub fn with_service_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.service_prefix = prefix.into();
        self
    }

    /// Set the source file extension
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    /// Set the generated sources directory
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Set the class output directory
    pub fn with_class_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.class_dir = Some(dir.into());
        self
    }
}
