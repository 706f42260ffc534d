//! Output sink abstraction
//!
//! The core never touches files directly. Everything it writes or reads back
//! goes through an [`OutputSink`], which models the build environment's
//! write-once output table plus its diagnostic channel.
//!
//! Two implementations are provided:
//! - [`MemorySink`]: in-memory table, used by tests and embedders
//! - [`FsSink`]: directory-backed, used by the CLI

#[cfg(test)]
pub(crate) mod faulty;
mod fs;
mod memory;

use std::fmt;
use std::io::{Read, Write};

pub use fs::FsSink;
pub use memory::MemorySink;

use crate::error::SinkError;

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Location class of an output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Generated source files
    SourceOutput,
    /// Compiled output and resources (service manifests live here)
    ClassOutput,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::SourceOutput => write!(f, "source-output"),
            Location::ClassOutput => write!(f, "class-output"),
        }
    }
}

/// Severity of a reported diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A message sent through the diagnostic channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Recorded diagnostics, in report order
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity,
            message: message.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.with_severity(Severity::Error).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The build environment as seen by the output core
pub trait OutputSink {
    /// Open a destination for writing; fails with
    /// [`SinkError::DestinationExists`] if it was already opened this pass
    fn create(
        &mut self,
        location: Location,
        namespace: &str,
        name: &str,
    ) -> SinkResult<Box<dyn Write>>;

    /// Open previously committed content for reading
    fn open(&mut self, location: Location, namespace: &str, name: &str)
        -> SinkResult<Box<dyn Read>>;

    /// Send a message through the diagnostic channel
    fn report(&mut self, severity: Severity, message: &str);
}

/// Relative path of an output: namespace dots become directory separators
pub fn resolve_path(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", namespace.replace('.', "/"), name)
    }
}

/// Log a diagnostic at the matching tracing level
pub(crate) fn trace_diagnostic(severity: Severity, message: &str) {
    match severity {
        Severity::Error => tracing::error!("{}", message),
        Severity::Warning => tracing::warn!("{}", message),
        Severity::Info => tracing::info!("{}", message),
    }
}
