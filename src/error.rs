//! Error types for output targets and sinks

use std::path::PathBuf;

use thiserror::Error;

use crate::key::TargetKey;

/// Errors an [`OutputSink`](crate::sink::OutputSink) can report
#[derive(Error, Debug)]
pub enum SinkError {
    /// The destination was already opened for writing during this pass
    #[error("destination already exists: {path}")]
    DestinationExists { path: String },

    /// Nothing has been committed under this path
    #[error("no such output: {path}")]
    NotFound { path: String },

    /// Any other read or write failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SinkError {
    /// Create an I/O error for the given output path
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the write-once destination was already used
    pub fn is_destination_exists(&self) -> bool {
        matches!(self, Self::DestinationExists { .. })
    }
}

/// Fatal errors raised by the output core
///
/// Recoverable conditions (identical-content regeneration, source file
/// collisions) never surface here; they are reported as diagnostics.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Malformed target identity
    #[error("invalid target key: {reason}")]
    InvalidKey { reason: String },

    /// The sink refused an operation
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Streaming text into an already opened destination failed
    #[error("failed writing {key}: {source}")]
    Io {
        key: TargetKey,
        #[source]
        source: std::io::Error,
    },

    /// A cache factory could not build the target
    #[error("could not create output target {key}: {message}")]
    Construction { key: TargetKey, message: String },
}

impl OutputError {
    /// Create an invalid key error
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            reason: reason.into(),
        }
    }

    /// Create a write failure for a target
    pub fn io(key: &TargetKey, source: std::io::Error) -> Self {
        Self::Io {
            key: key.clone(),
            source,
        }
    }

    /// Create a construction failure for a target
    pub fn construction(key: &TargetKey, message: impl Into<String>) -> Self {
        Self::Construction {
            key: key.clone(),
            message: message.into(),
        }
    }
}

/// Errors that can occur when loading TOML input files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_exists_display() {
        let err = SinkError::DestinationExists {
            path: "com/acme/Foo.java".to_string(),
        };
        assert!(err.is_destination_exists());
        assert_eq!(
            err.to_string(),
            "destination already exists: com/acme/Foo.java"
        );
    }

    #[test]
    fn test_sink_error_is_transparent() {
        let err: OutputError = SinkError::NotFound {
            path: "x".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "no such output: x");
    }

    #[test]
    fn test_construction_mentions_key() {
        let key = TargetKey::new("com.acme", "Foo").unwrap();
        let err = OutputError::construction(&key, "boom");
        assert!(err.to_string().contains("com.acme.Foo"));
        assert!(err.to_string().contains("boom"));
    }
}
